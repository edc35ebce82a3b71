//! Centralized tracing target constants for structured logging.
//!
//! Every log line the crate emits uses one of these targets, so subscriber
//! filters such as `hazreg_server::authorization=debug` can isolate a
//! single concern.

/// Login, logout and session token handling.
pub const TRACING_TARGET_AUTHENTICATION: &str = "hazreg_server::authentication";

/// Route permission checks and row scoping.
pub const TRACING_TARGET_AUTHORIZATION: &str = "hazreg_server::authorization";

/// Identity resolution from the user marker.
pub const TRACING_TARGET_IDENTITY: &str = "hazreg_server::identity";

/// Session lifecycle and navigation generations.
pub const TRACING_TARGET_SESSION: &str = "hazreg_server::session";

/// Record store access.
pub const TRACING_TARGET_STORE: &str = "hazreg_server::store";

/// Error recovery including middleware errors and request failures.
pub const TRACING_TARGET_RECOVERY_ERROR: &str = "hazreg_server::recovery::error";

/// Panic recovery including handler panics and service failures.
pub const TRACING_TARGET_RECOVERY_PANIC: &str = "hazreg_server::recovery::panic";

/// Password hashing and verification operations.
pub const TRACING_TARGET_PASSWORD_HASHER: &str = "hazreg_server::password_hasher";

/// Health check caching and service availability monitoring.
pub const TRACING_TARGET_HEALTH_CACHE: &str = "hazreg_server::health_cache";

/// Per-request timing and size metrics.
pub const TRACING_TARGET_METRICS: &str = "hazreg_server::metrics";
