//! Configuration loader
//!
//! ## Loading strategy
//! 1. Attempts to load from environment variables (after a best-effort
//!    `.env` load)
//! 2. If incomplete, falls back to loading from a file
//! 3. Probes multiple paths for config files
//! 4. Supports TOML and JSON formats
//!
//! ## Environment variables
//! - `EDULINK_LMS_BASE_URL`: Base URL of the LMS host
//! - `EDULINK_SCHOOL_ID`: Tenant identifier
//! - `EDULINK_ADMIN_SECRET`: Administrative override secret
//! - `EDULINK_SERVICE_SECRET`: Public/service secret
//! - `EDULINK_TIMEOUT_SECS`: Per-call timeout in seconds (optional)
//! - `EDULINK_PAGE_SIZE`: Collection walk page size (optional)
//! - `EDULINK_OAUTH_CLIENT_ID`: Credential-exchange client id
//! - `EDULINK_OAUTH_CLIENT_SECRET`: Credential-exchange client secret
//! - `EDULINK_OAUTH_TOKEN_URL`: Full URL of the token endpoint

use std::path::{Path, PathBuf};

use edulink_domain::constants::{DEFAULT_PAGE_SIZE, REQUEST_TIMEOUT_SECS};
use edulink_domain::{Config, EdulinkError, LmsConfig, OAuthConfig, Result};

/// Load configuration with automatic fallback strategy.
///
/// # Errors
/// Returns `EdulinkError::Config` if neither the environment nor any probed
/// file yields a complete configuration.
pub fn load() -> Result<Config> {
    // A missing .env file is fine; explicit environment always wins.
    dotenvy::dotenv().ok();

    match load_from_env() {
        Ok(config) => {
            tracing::info!("configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "environment incomplete, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables. All required variables
/// must be present.
///
/// # Errors
/// Returns `EdulinkError::Config` if required variables are missing or have
/// invalid values.
pub fn load_from_env() -> Result<Config> {
    let base_url = env_var("EDULINK_LMS_BASE_URL")?;
    let school_id = env_var("EDULINK_SCHOOL_ID")?;
    let admin_secret = env_var("EDULINK_ADMIN_SECRET")?;
    let service_secret = env_var("EDULINK_SERVICE_SECRET")?;

    let timeout_secs = env_parsed("EDULINK_TIMEOUT_SECS", REQUEST_TIMEOUT_SECS)?;
    let page_size = env_parsed("EDULINK_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;

    let client_id = env_var("EDULINK_OAUTH_CLIENT_ID")?;
    let client_secret = env_var("EDULINK_OAUTH_CLIENT_SECRET")?;
    let token_url = env_var("EDULINK_OAUTH_TOKEN_URL")?;

    Ok(Config {
        lms: LmsConfig {
            base_url,
            school_id,
            admin_secret,
            service_secret,
            timeout_secs,
            page_size,
        },
        oauth: OAuthConfig { client_id, client_secret, token_url },
    })
}

/// Load configuration from a file. If `path` is `None`, probes standard
/// locations via [`probe_config_paths`]. Format is detected by extension.
///
/// # Errors
/// Returns `EdulinkError::Config` if no file is found, the format is
/// unsupported, or parsing fails.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(EdulinkError::Config(format!(
                    "config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            EdulinkError::Config("no config file found in any standard location".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| EdulinkError::Config(format!("failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| EdulinkError::Config(format!("invalid TOML: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| EdulinkError::Config(format!("invalid JSON: {e}"))),
        _ => Err(EdulinkError::Config(format!("unsupported config format: {extension}"))),
    }
}

/// Probe standard locations for a config file: the working directory and up
/// to two parents, then the executable's directory. First hit wins.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("config.toml"),
            cwd.join("config.json"),
            cwd.join("edulink.toml"),
            cwd.join("edulink.json"),
            cwd.join("../config.toml"),
            cwd.join("../config.json"),
            cwd.join("../../config.toml"),
            cwd.join("../../config.json"),
        ]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![
                exe_dir.join("config.toml"),
                exe_dir.join("config.json"),
                exe_dir.join("edulink.toml"),
                exe_dir.join("edulink.json"),
            ]);
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| EdulinkError::Config(format!("missing required environment variable: {key}")))
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> Result<T> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|_| EdulinkError::Config(format!("invalid value for {key}: {raw}"))),
        Err(_) => Ok(default),
    }
}
