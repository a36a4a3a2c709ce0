//! Shared helpers for the infra integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use edulink_core::SessionPort;
use edulink_domain::{LmsConfig, OAuthConfig};

/// Session stub with a configurable bearer and admin flag.
pub struct StubSession {
    bearer: Option<String>,
    admin: bool,
}

impl StubSession {
    pub fn anonymous() -> Self {
        Self { bearer: None, admin: false }
    }

    pub fn with_bearer(token: impl Into<String>) -> Self {
        Self { bearer: Some(token.into()), admin: false }
    }

    pub fn administrator(token: impl Into<String>) -> Self {
        Self { bearer: Some(token.into()), admin: true }
    }
}

#[async_trait]
impl SessionPort for StubSession {
    async fn bearer_token(&self) -> Option<String> {
        self.bearer.clone()
    }

    fn is_administrator(&self) -> bool {
        self.admin
    }
}

/// LMS connection settings pointed at a local mock server.
pub fn lms_config(base_url: &str) -> LmsConfig {
    LmsConfig {
        base_url: base_url.to_string(),
        school_id: "school-1".to_string(),
        admin_secret: "admin-secret".to_string(),
        service_secret: "service-secret".to_string(),
        timeout_secs: 5,
        page_size: 100,
    }
}

/// Credential-exchange settings pointed at a local mock server.
pub fn oauth_config(token_url: &str) -> OAuthConfig {
    OAuthConfig {
        client_id: "client-id".to_string(),
        client_secret: "client-secret".to_string(),
        token_url: token_url.to_string(),
    }
}
