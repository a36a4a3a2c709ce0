//! Remote LMS integration
//!
//! Everything that talks to the external Learning Management System lives
//! here: token lifecycle, request construction, response classification,
//! schema normalization and the canonical-typed client consumed by core
//! services.

pub mod adapter;
pub mod auth;
pub mod classify;
pub mod client;
pub mod gateway;

pub use adapter::UpstreamRecord;
pub use auth::TokenCache;
pub use classify::{classify, Classification};
pub use client::LmsClient;
pub use gateway::{normalize_path, AuthMode, RequestGateway};
