//! Canonical-typed LMS client
//!
//! Implements the core [`LmsPort`] on top of the request gateway and the
//! schema adapter. Each operation carries a fixed authentication mode:
//! course reads use the public/service secret, the user roster and user
//! creation use the administrative override, and enrollment creation runs
//! as the calling user (session bearer, or an exchanged token when no
//! session exists).

use std::time::Duration;

use async_trait::async_trait;
use edulink_domain::constants::HEALTH_CHECK_TIMEOUT_SECS;
use edulink_domain::{CanonicalCourse, CanonicalUser, EdulinkError, NewUser, Page, Result};
use edulink_core::LmsPort;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, warn};
use url::form_urlencoded;

use super::adapter::{adapt_page_meta, UpstreamRecord};
use super::gateway::{AuthMode, RequestGateway};
use crate::http::HttpClient;

/// Remote LMS client speaking canonical types.
pub struct LmsClient {
    gateway: RequestGateway,
    base_url: String,
}

impl LmsClient {
    pub fn new(gateway: RequestGateway, base_url: impl Into<String>) -> Self {
        Self { gateway, base_url: base_url.into() }
    }

    /// Probe the upstream with a short-deadline request, independent of the
    /// main client timeout. Returns whether the platform answered at all.
    pub async fn check_health(&self) -> bool {
        let probe = match HttpClient::builder()
            .timeout(Duration::from_secs(HEALTH_CHECK_TIMEOUT_SECS))
            .build()
        {
            Ok(client) => client,
            Err(_) => return false,
        };

        let reachable =
            probe.send(probe.request(Method::HEAD, &self.base_url)).await.is_ok();
        debug!(reachable, "LMS health probe");
        reachable
    }

    async fn fetch_page<T, F>(
        &self,
        path: &str,
        auth: AuthMode,
        page: u32,
        page_size: u32,
        search: Option<&str>,
        adapt: F,
    ) -> Result<Page<T>>
    where
        F: Fn(Value) -> Result<T>,
    {
        let query = page_query(page, page_size, search);
        let body = self.gateway.send(Method::GET, &format!("{path}?{query}"), None, auth).await?;

        let (total_items, total_pages) = adapt_page_meta(&body);
        let mut items = Vec::new();
        for raw in list_items(&body) {
            match adapt(raw.clone()) {
                Ok(item) => items.push(item),
                // One bad record must not sink the page.
                Err(err) => warn!(%err, "skipping unadaptable upstream record"),
            }
        }

        Ok(Page { items, page, total_pages, total_items })
    }
}

#[async_trait]
impl LmsPort for LmsClient {
    async fn fetch_course_page(
        &self,
        page: u32,
        page_size: u32,
        search: Option<&str>,
    ) -> Result<Page<CanonicalCourse>> {
        self.fetch_page("/courses", AuthMode::Service, page, page_size, search, |raw| {
            UpstreamRecord::Course(raw).into_course()
        })
        .await
    }

    async fn fetch_course(&self, external_id: &str) -> Result<CanonicalCourse> {
        let path = format!("/courses/{external_id}");
        let body = self.gateway.send(Method::GET, &path, None, AuthMode::Service).await?;
        UpstreamRecord::Course(unwrap_envelope(&body).clone()).into_course()
    }

    async fn fetch_user_page(
        &self,
        page: u32,
        page_size: u32,
        search: Option<&str>,
    ) -> Result<Page<CanonicalUser>> {
        self.fetch_page("/users", AuthMode::AdminOverride, page, page_size, search, |raw| {
            UpstreamRecord::User(raw).into_user()
        })
        .await
    }

    async fn create_remote_user(&self, user: &NewUser) -> Result<CanonicalUser> {
        let payload = json!({
            "first_name": user.first_name,
            "last_name": user.last_name,
            "email": user.email,
            "tax_id": user.tax_id,
            "phone": user.phone,
        });

        let body = self
            .gateway
            .send(Method::POST, "/users", Some(&payload), AuthMode::AdminOverride)
            .await?;
        UpstreamRecord::User(unwrap_envelope(&body).clone()).into_user()
    }

    async fn create_remote_enrollment(
        &self,
        student_external_id: &str,
        course_external_id: &str,
    ) -> Result<String> {
        let payload = json!({
            "user_id": student_external_id,
            "course_id": course_external_id,
        });

        let body = self
            .gateway
            .send(Method::POST, "/enrollments", Some(&payload), AuthMode::User)
            .await?;

        let record = unwrap_envelope(&body);
        match record.get("id") {
            Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            // A created enrollment without an identifier cannot be tracked;
            // reporting it as success would be indistinguishable from one.
            _ => Err(EdulinkError::MalformedResponse(
                "enrollment response carries no id".to_string(),
            )),
        }
    }
}

fn page_query(page: u32, page_size: u32, search: Option<&str>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    serializer.append_pair("page", &page.to_string());
    serializer.append_pair("per_page", &page_size.to_string());
    if let Some(term) = search {
        if !term.trim().is_empty() {
            serializer.append_pair("search", term.trim());
        }
    }
    serializer.finish()
}

/// List payloads arrive either as a bare array or wrapped in a `data` key.
fn list_items(body: &Value) -> &[Value] {
    match body {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(items)) => items,
            _ => &[],
        },
        _ => &[],
    }
}

/// Single-record payloads are sometimes wrapped in a `data` envelope too.
fn unwrap_envelope(body: &Value) -> &Value {
    match body.get("data") {
        Some(inner) if inner.is_object() => inner,
        _ => body,
    }
}
