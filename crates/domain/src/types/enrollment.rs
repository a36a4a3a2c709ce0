//! Canonical enrollment record and the orchestration result type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Enrollment lifecycle state as tracked by the LMS.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    Active,
    Inactive,
    Completed,
}

/// Enrollment as seen by the rest of the system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CanonicalEnrollment {
    /// Local identifier; empty until the record has been persisted.
    pub id: String,
    pub student_external_id: String,
    pub course_external_id: String,
    pub status: EnrollmentStatus,
    pub enrollment_date: DateTime<Utc>,
    pub expiration_date: Option<DateTime<Utc>>,
}

/// Status of an enrollment attempt after the orchestrated sequence
/// (remote enrollment, local record, payment) has run.
///
/// `PaymentConfirmed` is reached by an external webhook collaborator, not by
/// this layer; it is modeled here so callers share one state machine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EnrollmentResultStatus {
    /// Local enrollment record exists; no payment was requested.
    Created,
    /// A charge was requested and a payment link issued.
    PaymentPending,
    /// Payment confirmed out of band.
    PaymentConfirmed,
    /// The gateway call failed; the enrollment itself stands.
    PaymentFailed,
}

/// Aggregate outcome of one enrollment attempt. Each step of the sequence is
/// independently observable so partial success can be reported accurately.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrollmentResult {
    pub status: EnrollmentResultStatus,
    /// Identifier of the local enrollment record. Always present: a failed
    /// local insert aborts the whole operation instead.
    pub local_id: String,
    /// Identifier assigned by the remote LMS, when that step succeeded.
    pub remote_id: Option<String>,
    /// Why the remote LMS step failed, when it did. The caller may retry the
    /// remote step later; the local record remains the source of truth.
    pub remote_error: Option<String>,
    /// Payment link issued by the gateway, when a charge was requested and
    /// succeeded.
    pub invoice_url: Option<String>,
    /// Why the payment step failed, when it did.
    pub payment_error: Option<String>,
}

impl EnrollmentResult {
    /// Build the base result for a freshly created local enrollment.
    pub fn created(local_id: impl Into<String>) -> Self {
        Self {
            status: EnrollmentResultStatus::Created,
            local_id: local_id.into(),
            remote_id: None,
            remote_error: None,
            invoice_url: None,
            payment_error: None,
        }
    }
}
