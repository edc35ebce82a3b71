//! Authentication response types.

use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::service::SessionContext;

/// A newly issued session.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Bearer token for the `Authorization` header.
    pub session_token: Uuid,
    pub issued_at: Timestamp,
    pub expires_at: Timestamp,
}

impl Session {
    pub fn from_context(session: &SessionContext) -> Self {
        Self {
            session_token: session.id(),
            issued_at: session.issued_at(),
            expires_at: session.expires_at(),
        }
    }
}
