//! Port interfaces for the local record store
//!
//! Upsert-by-external-id is composed from find/insert/update; the store
//! itself only needs these primitives.

use async_trait::async_trait;
use edulink_domain::{CanonicalCourse, CanonicalEnrollment, CanonicalUser, Result};

/// Local storage for course records.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Look up a local course by its upstream identifier.
    async fn find_by_external_id(&self, external_id: &str) -> Result<Option<CanonicalCourse>>;

    /// Insert a new course seeded with the upstream id, returning the local id.
    async fn insert(&self, course: &CanonicalCourse) -> Result<String>;

    /// Update the mutable fields of an existing local course.
    async fn update(&self, id: &str, course: &CanonicalCourse) -> Result<()>;
}

/// Local storage for student records.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Look up a local student by their upstream identifier.
    async fn find_by_external_id(&self, external_id: &str) -> Result<Option<CanonicalUser>>;

    /// Insert a new student seeded with the upstream id, returning the local id.
    async fn insert(&self, user: &CanonicalUser) -> Result<String>;

    /// Update the mutable fields of an existing local student.
    async fn update(&self, id: &str, user: &CanonicalUser) -> Result<()>;
}

/// Local storage for enrollment records.
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Persist a new enrollment, returning the local id.
    async fn insert(&self, enrollment: &CanonicalEnrollment) -> Result<String>;
}
