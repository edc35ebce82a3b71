//! Monitor response types.

use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Service health.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonitorStatus {
    /// Timestamp when this status was generated.
    pub checked_at: Timestamp,
    /// Whether the record store answered the last probe.
    pub is_healthy: bool,
    /// Application version.
    pub version: String,
}

impl MonitorStatus {
    pub fn new(is_healthy: bool) -> Self {
        Self {
            checked_at: Timestamp::now(),
            is_healthy,
            version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}
