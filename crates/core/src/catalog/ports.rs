//! Port interfaces for the remote LMS and the end-user session

use async_trait::async_trait;
use edulink_domain::{CanonicalCourse, CanonicalUser, NewUser, Page, Result};

/// Canonical-typed face of the remote LMS.
///
/// Implemented in infra on top of the request gateway, classifier and schema
/// adapter; core services and the sync engine only ever see canonical types
/// through this port.
#[async_trait]
pub trait LmsPort: Send + Sync {
    /// Fetch one page of the upstream course collection. `page` is 1-based.
    async fn fetch_course_page(
        &self,
        page: u32,
        page_size: u32,
        search: Option<&str>,
    ) -> Result<Page<CanonicalCourse>>;

    /// Fetch a single course by its upstream identifier.
    async fn fetch_course(&self, external_id: &str) -> Result<CanonicalCourse>;

    /// Fetch one page of the upstream user collection. `page` is 1-based.
    async fn fetch_user_page(
        &self,
        page: u32,
        page_size: u32,
        search: Option<&str>,
    ) -> Result<Page<CanonicalUser>>;

    /// Create a user on the remote LMS and return it in canonical shape.
    async fn create_remote_user(&self, user: &NewUser) -> Result<CanonicalUser>;

    /// Enroll a student in a course on the remote LMS, returning the remote
    /// enrollment identifier.
    async fn create_remote_enrollment(
        &self,
        student_external_id: &str,
        course_external_id: &str,
    ) -> Result<String>;
}

/// Capability offered by the authentication-session subsystem: a bearer
/// credential for the current caller and whether that caller is an
/// administrator.
#[async_trait]
pub trait SessionPort: Send + Sync {
    /// Bearer token of the current end-user session, when one exists.
    async fn bearer_token(&self) -> Option<String>;

    /// Whether the current caller holds administrative rights.
    fn is_administrator(&self) -> bool;
}
