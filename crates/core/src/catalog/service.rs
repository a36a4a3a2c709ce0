//! Catalog service: the inbound read/create surface with offline fallback
//!
//! Read operations consult the offline controller *before* calling the LMS:
//! when already offline the network is skipped entirely, avoiding repeated
//! timeouts against a known-down dependency. Write operations always attempt
//! the live call and fall back to a tagged placeholder only on failure.

use std::sync::Arc;

use edulink_domain::{CanonicalCourse, CanonicalUser, EdulinkError, NewUser, Page, Result};
use tracing::{debug, warn};
use uuid::Uuid;

use super::ports::LmsPort;
use super::simulated;
use crate::offline::OfflineController;

/// Course/user listing surface consumed by the UI layer.
pub struct CatalogService {
    lms: Arc<dyn LmsPort>,
    offline: Arc<OfflineController>,
}

impl CatalogService {
    pub fn new(lms: Arc<dyn LmsPort>, offline: Arc<OfflineController>) -> Self {
        Self { lms, offline }
    }

    /// Read-only probe for UI banners.
    pub fn is_offline(&self) -> bool {
        self.offline.is_offline()
    }

    /// List courses, live or simulated. Never raises for network-class
    /// failures; those degrade to the simulated catalog. Auth failures are
    /// surfaced so the caller can prompt for re-authentication.
    pub async fn list_courses(
        &self,
        page: u32,
        page_size: u32,
        search: Option<&str>,
    ) -> Result<Page<CanonicalCourse>> {
        if self.offline.is_offline() {
            debug!(page, "offline mode, serving simulated course list");
            return Ok(Self::simulated_courses(page, page_size, search));
        }

        match self.lms.fetch_course_page(page, page_size, search).await {
            Ok(result) => {
                self.offline.record_success();
                Ok(result)
            }
            Err(e) if e.triggers_offline() => {
                warn!(error = %e, "course listing failed, degrading to simulated data");
                self.offline.record_failure(&e);
                Ok(Self::simulated_courses(page, page_size, search))
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch a single course by its upstream identifier.
    pub async fn course_details(&self, external_id: &str) -> Result<CanonicalCourse> {
        if self.offline.is_offline() {
            return Self::simulated_course(external_id);
        }

        match self.lms.fetch_course(external_id).await {
            Ok(course) => {
                self.offline.record_success();
                Ok(course)
            }
            Err(e) if e.triggers_offline() => {
                warn!(external_id, error = %e, "course lookup failed, degrading to simulated data");
                self.offline.record_failure(&e);
                Self::simulated_course(external_id)
            }
            Err(e) => Err(e),
        }
    }

    /// List students, live or simulated, same degradation rules as
    /// [`CatalogService::list_courses`].
    pub async fn list_users(
        &self,
        page: u32,
        page_size: u32,
        search: Option<&str>,
    ) -> Result<Page<CanonicalUser>> {
        if self.offline.is_offline() {
            debug!(page, "offline mode, serving simulated user list");
            return Ok(Self::simulated_users(page, page_size, search));
        }

        match self.lms.fetch_user_page(page, page_size, search).await {
            Ok(result) => {
                self.offline.record_success();
                Ok(result)
            }
            Err(e) if e.triggers_offline() => {
                warn!(error = %e, "user listing failed, degrading to simulated data");
                self.offline.record_failure(&e);
                Ok(Self::simulated_users(page, page_size, search))
            }
            Err(e) => Err(e),
        }
    }

    /// Create a user. The live call is attempted even while offline, since
    /// the remote dependency may have recovered. On network-class failure a
    /// locally-synthesized placeholder tagged `offline: true` is returned so
    /// enrollment workflows can proceed provisionally.
    pub async fn create_user(&self, user: NewUser) -> Result<CanonicalUser> {
        match self.lms.create_remote_user(&user).await {
            Ok(created) => {
                self.offline.record_success();
                Ok(created)
            }
            Err(e) if e.triggers_offline() => {
                warn!(email = %user.email, error = %e, "remote user creation failed, synthesizing offline placeholder");
                self.offline.record_failure(&e);
                Ok(Self::placeholder_user(&user))
            }
            Err(e) => Err(e),
        }
    }

    fn simulated_courses(page: u32, page_size: u32, search: Option<&str>) -> Page<CanonicalCourse> {
        let courses = sample_filtered(simulated::sample_courses(), search, |course, term| {
            simulated::matches_term(&course.title, term)
                || simulated::matches_term(&course.description, term)
        });
        simulated::paginate(&courses, page, page_size)
    }

    fn simulated_course(external_id: &str) -> Result<CanonicalCourse> {
        simulated::sample_courses()
            .into_iter()
            .find(|course| course.external_id == external_id)
            .ok_or_else(|| {
                EdulinkError::NotFound(format!("course {external_id} not in simulated catalog"))
            })
    }

    fn simulated_users(page: u32, page_size: u32, search: Option<&str>) -> Page<CanonicalUser> {
        let users = sample_filtered(simulated::sample_users(), search, |user, term| {
            simulated::matches_term(&user.first_name, term)
                || simulated::matches_term(&user.last_name, term)
                || simulated::matches_term(&user.email, term)
        });
        simulated::paginate(&users, page, page_size)
    }

    fn placeholder_user(user: &NewUser) -> CanonicalUser {
        CanonicalUser {
            id: String::new(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone().unwrap_or_default(),
            tax_id: user.tax_id.clone().unwrap_or_default(),
            external_id: format!("offline-{}", Uuid::new_v4()),
            offline: true,
        }
    }
}

fn sample_filtered<T>(
    items: Vec<T>,
    search: Option<&str>,
    matches: impl Fn(&T, &str) -> bool,
) -> Vec<T> {
    match search {
        Some(term) if !term.trim().is_empty() => {
            items.into_iter().filter(|item| matches(item, term.trim())).collect()
        }
        _ => items,
    }
}
