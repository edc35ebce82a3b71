//! Navigation response types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::extract::auth::{IdentityState, Role, RouteDecision, route_prefix};

/// Permission decision for a navigation target.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Navigation {
    /// Path as requested.
    pub path: String,
    /// Route prefix the decision was made on; `null` for `/`.
    pub route_prefix: Option<String>,
    /// Role the decision was made for.
    pub role: Option<Role>,
    pub has_permission: bool,
    /// Set while the identity is still resolving; no decision is made.
    pub is_loading: bool,
}

impl Navigation {
    pub fn new(path: String, identity: IdentityState, decision: RouteDecision) -> Self {
        Self {
            route_prefix: route_prefix(&path),
            path,
            role: identity.role(),
            has_permission: decision.has_permission,
            is_loading: decision.is_loading,
        }
    }
}
