//! Canonical data types used throughout the integration layer
//!
//! Upstream LMS records arrive in loosely-typed, version-dependent shapes;
//! the infra schema adapter normalizes them into the canonical types defined
//! here. Everything outside the adapter interacts solely with these.

pub mod course;
pub mod enrollment;
pub mod payment;
pub mod sync;
pub mod user;

pub use course::CanonicalCourse;
pub use enrollment::{
    CanonicalEnrollment, EnrollmentResult, EnrollmentResultStatus, EnrollmentStatus,
};
pub use payment::{ChargeOutcome, PaymentSpec};
pub use sync::{Page, SyncRun, SyncRunType, SyncScope};
pub use user::{CanonicalUser, NewUser};
