//! Request gateway for the remote LMS
//!
//! Builds outbound requests: normalizes the target path, attaches the
//! content-type and tenant headers, selects exactly one of the three
//! authentication schemes, and executes within the configured timeout. No
//! retries happen here; that policy belongs to callers.

use std::sync::Arc;
use std::time::Duration;

use edulink_core::SessionPort;
use edulink_domain::constants::{API_ROOT, SCHOOL_HEADER};
use edulink_domain::{EdulinkError, LmsConfig, Result};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use super::auth::TokenCache;
use super::classify::classify;
use crate::http::HttpClient;

/// Which credential authorizes an outbound call. Exactly one is selected
/// per call; schemes are never mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Long-lived administrative override secret.
    AdminOverride,
    /// Long-lived public/service secret.
    Service,
    /// Per-caller token: the session bearer when one exists, otherwise a
    /// token from the cache.
    User,
}

/// Normalize a caller-provided path: collapse repeated separators, strip any
/// accidental duplicate API-root prefixes, and prepend the canonical API
/// root exactly once. Idempotent.
pub fn normalize_path(path: &str) -> String {
    // Collapse separator runs while preserving the query string untouched.
    let trimmed = path.trim();
    let (raw_path, query) = match trimmed.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (trimmed, None),
    };

    let mut collapsed = String::with_capacity(raw_path.len() + 1);
    collapsed.push('/');
    for segment in raw_path.split('/').filter(|s| !s.is_empty()) {
        if !collapsed.ends_with('/') {
            collapsed.push('/');
        }
        collapsed.push_str(segment);
    }

    // Strip however many API-root prefixes the caller managed to stack.
    let mut rest = collapsed.as_str();
    while let Some(stripped) = rest.strip_prefix(API_ROOT) {
        if stripped.is_empty() || stripped.starts_with('/') {
            rest = stripped;
        } else {
            break;
        }
    }

    let mut normalized = String::from(API_ROOT);
    normalized.push_str(rest);
    if let Some(query) = query {
        normalized.push('?');
        normalized.push_str(query);
    }
    normalized
}

/// Builds and executes outbound LMS requests.
pub struct RequestGateway {
    http: HttpClient,
    base_url: String,
    school_id: String,
    admin_secret: String,
    service_secret: String,
    tokens: Arc<TokenCache>,
    session: Arc<dyn SessionPort>,
}

impl RequestGateway {
    pub fn new(
        config: &LmsConfig,
        tokens: Arc<TokenCache>,
        session: Arc<dyn SessionPort>,
    ) -> Result<Self> {
        let http =
            HttpClient::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            school_id: config.school_id.clone(),
            admin_secret: config.admin_secret.clone(),
            service_secret: config.service_secret.clone(),
            tokens,
            session,
        })
    }

    /// Send one request and classify the response into the domain taxonomy.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        auth: AuthMode,
    ) -> Result<Value> {
        let url = format!("{}{}", self.base_url, normalize_path(path));
        let bearer = self.credential_for(auth).await?;

        debug!(%method, %url, ?auth, "dispatching LMS request");

        let mut builder = self
            .http
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json")
            .header(SCHOOL_HEADER, &self.school_id)
            .header(AUTHORIZATION, format!("Bearer {bearer}"));

        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = self.http.send(builder).await?;
        let status = response.status();
        let text = response.text().await.map_err(|e| {
            EdulinkError::MalformedResponse(format!("response body could not be read: {e}"))
        })?;

        classify(&text, status).into_result()
    }

    async fn credential_for(&self, auth: AuthMode) -> Result<String> {
        match auth {
            AuthMode::AdminOverride => Ok(self.admin_secret.clone()),
            AuthMode::Service => Ok(self.service_secret.clone()),
            AuthMode::User => match self.session.bearer_token().await {
                Some(token) => Ok(token),
                None => self.tokens.token().await,
            },
        }
    }
}
