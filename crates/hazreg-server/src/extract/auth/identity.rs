//! Resolved identities and the loading state.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Role;

/// The effective role and location of the current user.
///
/// Both fields are `None` for the anonymous identity, which carries no
/// permissions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedIdentity {
    /// Effective role, `None` when anonymous or no role is assigned.
    pub role: Option<Role>,
    /// Assigned location, used for row scoping.
    pub location_id: Option<Uuid>,
}

impl ResolvedIdentity {
    /// The identity with no role and no location.
    pub const ANONYMOUS: Self = Self {
        role: None,
        location_id: None,
    };

    /// Creates a new identity.
    #[inline]
    pub const fn new(role: Option<Role>, location_id: Option<Uuid>) -> Self {
        Self { role, location_id }
    }

    /// Returns the anonymous identity.
    #[inline]
    pub const fn anonymous() -> Self {
        Self::ANONYMOUS
    }

    /// Returns whether this identity carries no role.
    #[inline]
    pub const fn is_anonymous(&self) -> bool {
        self.role.is_none()
    }
}

/// Result of an identity lookup that may still be in flight.
///
/// `Loading` is neither allowed nor denied: callers must wait for a new
/// resolution instead of rendering or rejecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityState {
    /// The current resolution cycle has not completed.
    Loading,
    /// The current resolution cycle completed with this identity.
    Resolved(ResolvedIdentity),
}

impl IdentityState {
    /// Returns whether the identity is still resolving.
    #[inline]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns the resolved identity, if any.
    #[inline]
    pub const fn resolved(&self) -> Option<ResolvedIdentity> {
        match self {
            Self::Loading => None,
            Self::Resolved(identity) => Some(*identity),
        }
    }

    /// Returns the resolved role; `None` while loading or when anonymous.
    #[inline]
    pub fn role(&self) -> Option<Role> {
        self.resolved().and_then(|identity| identity.role)
    }
}

impl From<ResolvedIdentity> for IdentityState {
    #[inline]
    fn from(identity: ResolvedIdentity) -> Self {
        Self::Resolved(identity)
    }
}
