//! Payment gateway collaborator types

use serde::{Deserialize, Serialize};

/// What to charge for an enrollment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentSpec {
    pub amount: f64,
    pub due_in_days: u32,
    pub description: Option<String>,
}

/// Result of asking the gateway for a charge/invoice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChargeOutcome {
    pub success: bool,
    pub invoice_url: Option<String>,
    pub error: Option<String>,
}

impl ChargeOutcome {
    pub fn ok(invoice_url: impl Into<String>) -> Self {
        Self { success: true, invoice_url: Some(invoice_url.into()), error: None }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self { success: false, invoice_url: None, error: Some(error.into()) }
    }
}
