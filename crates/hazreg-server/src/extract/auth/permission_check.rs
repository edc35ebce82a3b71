//! Per-navigation permission check state machine.
//!
//! ```text
//! Unknown ──resolve──▶ Resolved ──evaluate──▶ Allowed | Denied
//!    ▲                                                 │
//!    └──────────────────── restart ◀───────────────────┘
//! ```
//!
//! `Resolved → Allowed | Denied` depends only on the role and the route
//! table. Nothing moves a settled check except `restart`, which a new
//! navigation or session change triggers.

use super::{IdentityState, ResolvedIdentity, RouteDecision, RoutePermissionTable};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PermissionCheck {
    /// Identity not resolved yet.
    #[default]
    Unknown,
    /// Identity known, route not evaluated yet.
    Resolved(ResolvedIdentity),
    /// Route evaluated and permitted.
    Allowed(ResolvedIdentity),
    /// Route evaluated and refused.
    Denied(ResolvedIdentity),
}

impl PermissionCheck {
    /// Starts a check in the `Unknown` state.
    #[inline]
    pub const fn new() -> Self {
        Self::Unknown
    }

    /// Records the resolved identity. Only moves out of `Unknown`.
    #[must_use]
    pub fn resolve(self, identity: ResolvedIdentity) -> Self {
        match self {
            Self::Unknown => Self::Resolved(identity),
            settled => settled,
        }
    }

    /// Records the outcome of an identity lookup that may have been
    /// superseded; `Loading` leaves the check `Unknown`.
    #[must_use]
    pub fn resolve_state(self, state: IdentityState) -> Self {
        match state {
            IdentityState::Loading => self,
            IdentityState::Resolved(identity) => self.resolve(identity),
        }
    }

    /// Evaluates `path` for a resolved identity. Only moves out of `Resolved`.
    #[must_use]
    pub fn evaluate(self, table: &RoutePermissionTable, path: &str) -> Self {
        match self {
            Self::Resolved(identity) if table.check(path, identity.role) => Self::Allowed(identity),
            Self::Resolved(identity) => Self::Denied(identity),
            other => other,
        }
    }

    /// Returns to `Unknown`.
    #[must_use]
    pub const fn restart(self) -> Self {
        Self::Unknown
    }

    /// Returns the identity known to this check, if any.
    pub const fn identity(&self) -> Option<ResolvedIdentity> {
        match self {
            Self::Unknown => None,
            Self::Resolved(identity) | Self::Allowed(identity) | Self::Denied(identity) => {
                Some(*identity)
            }
        }
    }

    /// Projects the state onto the `{has_permission, is_loading}` pair.
    ///
    /// Unsettled checks report loading; they carry no decision.
    pub const fn decision(&self) -> RouteDecision {
        match self {
            Self::Unknown | Self::Resolved(_) => RouteDecision::LOADING,
            Self::Allowed(_) => RouteDecision::settled(true),
            Self::Denied(_) => RouteDecision::settled(false),
        }
    }
}
