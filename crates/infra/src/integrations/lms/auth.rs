//! Token cache for the client-credentials exchange
//!
//! Caches the short-lived bearer token in process memory only, refreshing it
//! through the credential exchange when expired or absent. The refresh is a
//! single-flight critical section: the cache slot lives behind an async
//! mutex held across the exchange, so concurrent callers observe either the
//! old valid token or the new one, never a partial value and never a
//! duplicate exchange.

use std::time::{Duration, Instant};

use edulink_domain::constants::TOKEN_LIFETIME_SAFETY;
use edulink_domain::{EdulinkError, OAuthConfig, Result};
use reqwest::Method;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::http::HttpClient;

/// A cached bearer token with its safety-margin expiry.
#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: Instant,
}

impl CachedToken {
    fn from_exchange(value: String, lifetime_secs: u64) -> Self {
        // Only a fraction of the nominal lifetime is trusted, to avoid
        // edge-of-expiry races.
        let usable = Duration::from_secs_f64(lifetime_secs as f64 * TOKEN_LIFETIME_SAFETY);
        Self { value, expires_at: Instant::now() + usable }
    }

    fn is_usable(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// Wire shape of the credential exchange response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

/// Process-memory cache over the credential exchange.
pub struct TokenCache {
    http: HttpClient,
    config: OAuthConfig,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    pub fn new(config: OAuthConfig) -> Result<Self> {
        let http = HttpClient::new()?;
        Ok(Self { http, config, cached: Mutex::new(None) })
    }

    /// Return a usable bearer token, exchanging credentials only when the
    /// cached one is expired or absent.
    pub async fn token(&self) -> Result<String> {
        let mut slot = self.cached.lock().await;

        if let Some(cached) = slot.as_ref() {
            if cached.is_usable() {
                debug!("serving cached LMS token");
                return Ok(cached.value.clone());
            }
        }

        // Exchange failures must not populate the cache with a partial
        // value; the slot is only written on success.
        let fresh = self.exchange().await?;
        let value = fresh.value.clone();
        *slot = Some(fresh);

        info!("refreshed LMS access token");
        Ok(value)
    }

    /// Drop the cached token, forcing the next call to exchange again. Used
    /// after an auth failure that suggests the token was revoked upstream.
    pub async fn invalidate(&self) {
        *self.cached.lock().await = None;
    }

    async fn exchange(&self) -> Result<CachedToken> {
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ];

        let builder = self.http.request(Method::POST, &self.config.token_url).form(&form);
        let response = self
            .http
            .send(builder)
            .await
            .map_err(|e| EdulinkError::AuthExchange(format!("token endpoint unreachable: {e}")))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            EdulinkError::AuthExchange(format!("token response could not be read: {e}"))
        })?;

        if !status.is_success() {
            return Err(EdulinkError::AuthExchange(format!(
                "token endpoint answered HTTP {status}: {body}"
            )));
        }

        let parsed: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            EdulinkError::AuthExchange(format!("token response missing fields: {e}"))
        })?;

        if parsed.access_token.is_empty() {
            return Err(EdulinkError::AuthExchange("token endpoint returned an empty token".into()));
        }

        Ok(CachedToken::from_exchange(parsed.access_token, parsed.expires_in))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_usable_within_the_safety_margin() {
        let token = CachedToken::from_exchange("abc".into(), 3600);
        assert!(token.is_usable());
    }

    #[test]
    fn zero_lifetime_token_is_immediately_unusable() {
        let token = CachedToken::from_exchange("abc".into(), 0);
        assert!(!token.is_usable());
    }

    #[test]
    fn safety_margin_shortens_the_nominal_lifetime() {
        let token = CachedToken::from_exchange("abc".into(), 100);
        let remaining = token.expires_at.saturating_duration_since(Instant::now());

        assert!(remaining <= Duration::from_secs(90));
        assert!(remaining > Duration::from_secs(85));
    }
}
