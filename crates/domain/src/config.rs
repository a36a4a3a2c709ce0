//! Configuration structures for the LMS integration layer
//!
//! Populated by the infra config loader (environment variables with a TOML
//! file fallback). Secrets are injected here rather than embedded anywhere
//! in code; rotation happens outside this layer.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PAGE_SIZE, REQUEST_TIMEOUT_SECS};

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub lms: LmsConfig,
    pub oauth: OAuthConfig,
}

/// Remote LMS connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LmsConfig {
    /// Base URL of the LMS host, without the API root (e.g. "https://lms.example.com").
    pub base_url: String,
    /// Tenant identifier sent in the school header on every request.
    pub school_id: String,
    /// Long-lived administrative override secret.
    pub admin_secret: String,
    /// Long-lived public/service secret.
    pub service_secret: String,
    /// Per-call timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Page size for collection walks.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

/// Client-credentials exchange settings for per-user tokens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Full URL of the token endpoint.
    pub token_url: String,
}

fn default_timeout_secs() -> u64 {
    REQUEST_TIMEOUT_SECS
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}
