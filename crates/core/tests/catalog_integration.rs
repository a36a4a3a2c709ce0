//! Integration tests for the catalog surface and offline degradation.

mod support;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use edulink_core::{CatalogService, OfflineController};
use edulink_domain::{EdulinkError, NewUser};
use support::{course, MockLms};

fn new_user(email: &str) -> NewUser {
    NewUser {
        first_name: "Ana".to_string(),
        last_name: "Souza".to_string(),
        email: email.to_string(),
        tax_id: Some("123.456.789-00".to_string()),
        phone: None,
    }
}

#[tokio::test]
async fn network_failure_degrades_to_simulated_data_and_flips_offline() {
    let lms = Arc::new(MockLms::new());
    lms.fail_reads_with(EdulinkError::Network("connection refused".into()));
    let offline = Arc::new(OfflineController::new());
    let service = CatalogService::new(lms.clone(), offline.clone());

    let page = service.list_courses(1, 10, None).await.unwrap();

    assert!(!page.items.is_empty(), "simulated catalog should not be empty");
    assert!(service.is_offline());
    assert!(offline.reason().unwrap().contains("connection refused"));
}

#[tokio::test]
async fn while_offline_reads_skip_the_network_entirely() {
    let lms = Arc::new(MockLms::new());
    let offline = Arc::new(OfflineController::new());
    offline.set_offline("operator says down");
    let service = CatalogService::new(lms.clone(), offline);

    let _ = service.list_courses(1, 10, None).await.unwrap();
    let _ = service.list_users(1, 10, None).await.unwrap();

    assert_eq!(lms.course_page_calls.load(Ordering::SeqCst), 0);
    assert_eq!(lms.user_page_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn simulated_search_filters_by_title() {
    let lms = Arc::new(MockLms::new());
    let offline = Arc::new(OfflineController::new());
    offline.set_offline("down");
    let service = CatalogService::new(lms, offline);

    let page = service.list_courses(1, 10, Some("marketing")).await.unwrap();

    assert!(!page.items.is_empty());
    assert!(page.items.iter().all(|c| c.title.to_lowercase().contains("marketing")));
}

#[tokio::test]
async fn auth_failure_propagates_instead_of_degrading() {
    let lms = Arc::new(MockLms::new());
    lms.fail_reads_with(EdulinkError::Auth("token rejected".into()));
    let offline = Arc::new(OfflineController::new());
    let service = CatalogService::new(lms, offline.clone());

    let result = service.list_courses(1, 10, None).await;

    assert!(matches!(result, Err(EdulinkError::Auth(_))));
    assert!(!offline.is_offline());
}

#[tokio::test]
async fn clean_read_success_restores_online_mode() {
    let lms = Arc::new(MockLms::new().with_courses(vec![course("c1", "Course 1")]));
    lms.fail_next_read_with(EdulinkError::Network("request timed out after 10s".into()));
    let offline = Arc::new(OfflineController::new());
    let service = CatalogService::new(lms, offline.clone());

    let _ = service.list_courses(1, 10, None).await.unwrap();
    assert!(service.is_offline());

    // Operator flips the switch; the next live read succeeds and keeps us
    // online.
    offline.set_online();
    let page = service.list_courses(1, 10, None).await.unwrap();

    assert_eq!(page.items.len(), 1);
    assert!(!service.is_offline());
}

#[tokio::test]
async fn create_user_failure_yields_offline_tagged_placeholder() {
    let lms = Arc::new(MockLms::new());
    lms.fail_create_user_with(EdulinkError::Network("connection refused".into()));
    let offline = Arc::new(OfflineController::new());
    let service = CatalogService::new(lms, offline.clone());

    let created = service.create_user(new_user("ana@example.com")).await.unwrap();

    assert!(created.offline);
    assert!(created.external_id.starts_with("offline-"));
    assert_eq!(created.email, "ana@example.com");
    assert!(offline.is_offline());
}

#[tokio::test]
async fn create_user_is_attempted_live_even_while_offline() {
    let lms = Arc::new(MockLms::new());
    let offline = Arc::new(OfflineController::new());
    offline.set_offline("down earlier");
    let service = CatalogService::new(lms.clone(), offline.clone());

    let created = service.create_user(new_user("bruno@example.com")).await.unwrap();

    assert_eq!(lms.create_user_calls.load(Ordering::SeqCst), 1);
    assert!(!created.offline);
    // Opportunistic recovery: the successful write flipped us back online.
    assert!(!offline.is_offline());
}

#[tokio::test]
async fn offline_course_details_come_from_the_simulated_catalog() {
    let lms = Arc::new(MockLms::new());
    let offline = Arc::new(OfflineController::new());
    offline.set_offline("down");
    let service = CatalogService::new(lms, offline);

    let found = service.course_details("9001").await.unwrap();
    assert_eq!(found.external_id, "9001");

    let missing = service.course_details("nope").await;
    assert!(matches!(missing, Err(EdulinkError::NotFound(_))));
}
