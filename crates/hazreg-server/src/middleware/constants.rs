//! Shared middleware constants.

/// Default maximum request body size: 64KB.
///
/// Every request body in this API is a small JSON document.
pub const DEFAULT_MAX_BODY_SIZE: usize = 64 * 1024;

/// Header carrying the per-request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";
