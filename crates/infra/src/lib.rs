//! # Edulink Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The bounded HTTP client
//! - The LMS integration (token cache, request gateway, response
//!   classifier, schema adapter, canonical client)
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `edulink-core`
//! - Depends on `edulink-domain` and `edulink-core`
//! - Contains all "impure" code (network I/O, environment access)

pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;

// Re-export commonly used items
pub use errors::InfraError;
pub use http::HttpClient;
pub use integrations::lms::{
    classify, normalize_path, AuthMode, Classification, LmsClient, RequestGateway, TokenCache,
    UpstreamRecord,
};
