//! Identity response types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::extract::auth::{IdentityState, Role};

/// The caller's resolved identity.
///
/// While `isLoading` is set, `role` and `locationId` are `null` and carry
/// no meaning.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub role: Option<Role>,
    pub location_id: Option<Uuid>,
    pub is_loading: bool,
}

impl From<IdentityState> for Identity {
    fn from(state: IdentityState) -> Self {
        match state {
            IdentityState::Loading => Self {
                role: None,
                location_id: None,
                is_loading: true,
            },
            IdentityState::Resolved(identity) => Self {
                role: identity.role,
                location_id: identity.location_id,
                is_loading: false,
            },
        }
    }
}
