//! Canonical course record

use serde::{Deserialize, Serialize};

/// Course as seen by the rest of the system, normalized from whichever
/// upstream shape the LMS produced it in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CanonicalCourse {
    /// Local identifier; empty until the record has been persisted.
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub price_total: f64,
    pub price_monthly: f64,
    pub duration_label: String,
    /// The upstream LMS identifier. Sole reconciliation join key; never
    /// defaulted or substituted.
    pub external_id: String,
}
