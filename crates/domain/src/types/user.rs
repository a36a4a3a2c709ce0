//! Canonical user/student record

use serde::{Deserialize, Serialize};

/// Student as seen by the rest of the system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CanonicalUser {
    /// Local identifier; empty until the record has been persisted.
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub tax_id: String,
    /// The upstream LMS identifier. Sole reconciliation join key.
    pub external_id: String,
    /// Set when this record was synthesized locally because the LMS was
    /// unreachable. Such users exist only provisionally until a later sync.
    #[serde(default)]
    pub offline: bool,
}

/// Input for creating a user, before any identifier exists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub tax_id: Option<String>,
    pub phone: Option<String>,
}
