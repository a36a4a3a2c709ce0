//! Domain constants shared across the workspace

/// Canonical API root for the remote LMS. Prepended exactly once by the
/// request gateway regardless of how callers format their paths.
pub const API_ROOT: &str = "/api/v2";

/// Tenant header carried on every outbound LMS request.
pub const SCHOOL_HEADER: &str = "X-School-Id";

/// Bound on every outbound LMS call, in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Short timeout for the lightweight health probe, in seconds.
pub const HEALTH_CHECK_TIMEOUT_SECS: u64 = 5;

/// Page size used when walking upstream collections.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Fraction of the nominal token lifetime after which a cached token is no
/// longer considered usable. Avoids edge-of-expiry races.
pub const TOKEN_LIFETIME_SAFETY: f64 = 0.9;
