//! Enrollment orchestrator
//!
//! Sequences remote LMS enrollment, the local enrollment record and the
//! payment-gateway invoice with independent failure handling per step. The
//! three steps are intentionally not atomic: neither the LMS nor the payment
//! gateway offers two-phase commit, so consistency is compensating and
//! best-effort by design. The local record is the source of truth.

use std::sync::Arc;

use chrono::Utc;
use edulink_domain::{
    CanonicalEnrollment, EnrollmentResult, EnrollmentResultStatus, EnrollmentStatus, PaymentSpec,
    Result,
};
use tracing::{info, instrument, warn};

use super::ports::PaymentGateway;
use crate::catalog::ports::LmsPort;
use crate::sync::ports::EnrollmentRepository;

/// Orchestrates the three-step enrollment workflow.
pub struct EnrollmentOrchestrator {
    lms: Arc<dyn LmsPort>,
    enrollments: Arc<dyn EnrollmentRepository>,
    payments: Arc<dyn PaymentGateway>,
}

impl EnrollmentOrchestrator {
    pub fn new(
        lms: Arc<dyn LmsPort>,
        enrollments: Arc<dyn EnrollmentRepository>,
        payments: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self { lms, enrollments, payments }
    }

    /// Enroll a student in a course.
    ///
    /// 1. Remote LMS enrollment: failure is recorded in the result but does
    ///    not stop the workflow; the caller can retry the remote step later.
    /// 2. Local enrollment record: failure here is fatal and propagated,
    ///    since without a local record the enrollment has no effect anywhere.
    /// 3. Payment charge (when a spec is given): failure does not roll back
    ///    steps 1-2; the enrollment stands and only the payment portion is
    ///    reported as failed, leaving a manual retry path open.
    #[instrument(skip(self, payment), fields(student = student_external_id, course = course_external_id))]
    pub async fn enroll(
        &self,
        student_external_id: &str,
        course_external_id: &str,
        payment: Option<PaymentSpec>,
    ) -> Result<EnrollmentResult> {
        // Step 1: remote LMS enrollment, attempted even while offline.
        let (remote_id, remote_error) = match self
            .lms
            .create_remote_enrollment(student_external_id, course_external_id)
            .await
        {
            Ok(id) => {
                info!(remote_id = %id, "remote enrollment created");
                (Some(id), None)
            }
            Err(e) => {
                warn!(error = %e, "remote enrollment failed, continuing with local record");
                (None, Some(e.to_string()))
            }
        };

        // Step 2: the local record, unconditionally.
        let enrollment = CanonicalEnrollment {
            id: String::new(),
            student_external_id: student_external_id.to_string(),
            course_external_id: course_external_id.to_string(),
            status: EnrollmentStatus::Active,
            enrollment_date: Utc::now(),
            expiration_date: None,
        };
        let local_id = self.enrollments.insert(&enrollment).await?;

        let mut result = EnrollmentResult::created(local_id);
        result.remote_id = remote_id;
        result.remote_error = remote_error;

        // Step 3: payment, when requested.
        if let Some(spec) = payment {
            match self.payments.create_charge(&spec).await {
                Ok(outcome) if outcome.success => {
                    info!(invoice_url = ?outcome.invoice_url, "payment link issued");
                    result.status = EnrollmentResultStatus::PaymentPending;
                    result.invoice_url = outcome.invoice_url;
                }
                Ok(outcome) => {
                    warn!(error = ?outcome.error, "payment gateway rejected charge");
                    result.status = EnrollmentResultStatus::PaymentFailed;
                    result.payment_error =
                        Some(outcome.error.unwrap_or_else(|| "charge rejected".to_string()));
                }
                Err(e) => {
                    warn!(error = %e, "payment gateway call failed");
                    result.status = EnrollmentResultStatus::PaymentFailed;
                    result.payment_error = Some(e.to_string());
                }
            }
        }

        Ok(result)
    }
}
