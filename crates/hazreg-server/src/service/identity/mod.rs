//! Identity resolution from the user marker.
//!
//! The resolver turns a user marker into the effective role and assigned
//! location. It fails closed: an absent or unknown marker, an inactive
//! user, and any backend error all produce the anonymous identity.

use crate::extract::auth::{IdentityState, ResolvedIdentity, Role};
use crate::service::session::{CycleJoin, NavigationTicket, SessionContext};
use crate::service::store::SharedRecordStore;
use crate::utility::tracing_targets::TRACING_TARGET_IDENTITY;

/// Resolves user markers against the record store.
#[derive(Clone)]
pub struct IdentityResolver {
    store: SharedRecordStore,
}

impl IdentityResolver {
    /// Creates a resolver over `store`.
    pub fn new(store: SharedRecordStore) -> Self {
        Self { store }
    }

    /// Resolves `marker` to an identity. Never fails.
    #[tracing::instrument(skip_all, target = TRACING_TARGET_IDENTITY)]
    pub async fn resolve(&self, marker: Option<&str>) -> ResolvedIdentity {
        let Some(marker) = marker.map(normalize_marker).filter(|m| !m.is_empty()) else {
            tracing::debug!(target: TRACING_TARGET_IDENTITY, "no user marker, anonymous");
            return ResolvedIdentity::ANONYMOUS;
        };

        let access = match self.store.find_user_access(&marker).await {
            Ok(Some(access)) => access,
            Ok(None) => {
                tracing::debug!(
                    target: TRACING_TARGET_IDENTITY,
                    "no active user for marker, anonymous"
                );
                return ResolvedIdentity::ANONYMOUS;
            }
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET_IDENTITY,
                    error = %error,
                    "identity lookup failed, falling back to anonymous"
                );
                return ResolvedIdentity::ANONYMOUS;
            }
        };

        let role = Role::from_assignments(access.role_names.iter().map(String::as_str));
        let identity = ResolvedIdentity::new(role, access.user.location_id);

        tracing::debug!(
            target: TRACING_TARGET_IDENTITY,
            user_id = %access.user.id,
            role = ?identity.role,
            location_id = ?identity.location_id,
            assigned_roles = access.role_names.len(),
            "identity resolved"
        );

        identity
    }

    /// Runs a fresh resolution cycle for `session`.
    ///
    /// Returns `Loading` if a newer navigation or a logout cancels the cycle
    /// before it commits.
    pub async fn resolve_navigation(&self, session: &SessionContext) -> IdentityState {
        let ticket = session.begin_navigation().await;
        self.run_cycle(session, ticket).await
    }

    /// Returns the identity of the session's current cycle.
    ///
    /// Starts a cycle when none is running and none has completed. When
    /// another request is already running the current cycle, waits for it;
    /// `Loading` is reported only if that cycle is superseded or revoked.
    pub async fn resolve_cached(&self, session: &SessionContext) -> IdentityState {
        match session.join_cycle().await {
            CycleJoin::Settled(identity) => IdentityState::Resolved(identity),
            CycleJoin::Follow(follower) => follower.wait().await,
            CycleJoin::Lead(ticket) => self.run_cycle(session, ticket).await,
        }
    }

    async fn run_cycle(&self, session: &SessionContext, ticket: NavigationTicket) -> IdentityState {
        let identity = tokio::select! {
            biased;
            () = ticket.cancelled() => {
                tracing::debug!(
                    target: TRACING_TARGET_IDENTITY,
                    session_id = %session.id(),
                    generation = ticket.generation(),
                    "identity resolution cancelled"
                );
                return IdentityState::Loading;
            }
            identity = self.resolve(Some(session.marker())) => identity,
        };

        if session.complete(&ticket, identity).await {
            IdentityState::Resolved(identity)
        } else {
            IdentityState::Loading
        }
    }
}

impl std::fmt::Debug for IdentityResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityResolver").finish_non_exhaustive()
    }
}

/// Trims and lower-cases a user marker.
pub fn normalize_marker(marker: &str) -> String {
    marker.trim().to_lowercase()
}
