//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

/// Hard cap on records returned by a single-user activity query.
pub const MAX_ACTIVITIES_PER_QUERY: usize = 1000;

/// Hard cap on records returned by a project-scoped activity query.
pub const MAX_PROJECT_ACTIVITIES_PER_QUERY: usize = 10_000;

/// Default page size when the caller does not request an amount.
pub const DEFAULT_ACTIVITIES_PER_QUERY: usize = 100;

/// Token validity window in days.
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 30;

/// Default per-insert timeout for batch submission, in seconds.
pub const DEFAULT_INSERT_TIMEOUT_SECS: u64 = 30;

/// Authorization header scheme prefix stripped before token validation.
pub const TOKEN_SCHEME_PREFIX: &str = "Token ";

/// Filter keys accepted by activity queries. Anything else is rejected.
pub const ALLOWED_FILTER_KEYS: &[&str] = &[
    "executable_name",
    "browser_url",
    "browser_title",
    "ip_address",
    "mac_address",
    "activity_type",
    "idle_activity",
];
