//! Port interface for the payment gateway collaborator

use async_trait::async_trait;
use edulink_domain::{ChargeOutcome, PaymentSpec, Result};

/// Opaque "create charge" capability returning a payment-link result.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Request a charge/invoice for the given spec.
    ///
    /// Transport failures may surface as `Err`; a gateway-side rejection is
    /// reported through `ChargeOutcome::success == false`. Callers treat both
    /// as a failed payment step.
    async fn create_charge(&self, spec: &PaymentSpec) -> Result<ChargeOutcome>;
}
