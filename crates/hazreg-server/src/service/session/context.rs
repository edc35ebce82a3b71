use std::sync::atomic::{AtomicU64, Ordering};

use jiff::Timestamp;
use tokio::sync::{Mutex, watch};
use tokio_util::sync::{CancellationToken, DropGuard, WaitForCancellationFuture};
use uuid::Uuid;

use crate::extract::auth::{IdentityState, ResolvedIdentity};
use crate::utility::tracing_targets::TRACING_TARGET_SESSION;

/// Handle for one resolution cycle started by [`SessionContext::begin_navigation`].
///
/// The cycle is cancelled when a newer one starts, when the session is
/// revoked, or when the ticket is dropped before completing.
#[derive(Debug)]
pub struct NavigationTicket {
    generation: u64,
    token: CancellationToken,
    _guard: DropGuard,
}

impl NavigationTicket {
    /// Returns the generation this ticket belongs to.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns whether this cycle has been superseded or revoked.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Completes when this cycle is cancelled.
    #[inline]
    pub fn cancelled(&self) -> WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }
}

/// A request waiting on a cycle another request is running.
#[derive(Debug)]
pub struct CycleFollower {
    generation: u64,
    token: CancellationToken,
    resolved: watch::Receiver<Option<(u64, ResolvedIdentity)>>,
}

impl CycleFollower {
    /// Returns the generation being waited on.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Waits for the followed cycle to commit.
    ///
    /// Returns `Loading` if the cycle is superseded or revoked first.
    pub async fn wait(mut self) -> IdentityState {
        let generation = self.generation;
        tokio::select! {
            biased;
            committed = self.resolved.wait_for(|resolved| {
                matches!(resolved, Some((committed, _)) if *committed == generation)
            }) => match committed.as_deref() {
                Ok(Some((_, identity))) => IdentityState::Resolved(*identity),
                _ => IdentityState::Loading,
            },
            () = self.token.cancelled() => IdentityState::Loading,
        }
    }
}

/// How a request takes part in the session's current cycle.
#[derive(Debug)]
pub enum CycleJoin {
    /// The current cycle already committed this identity.
    Settled(ResolvedIdentity),
    /// Another request is running the current cycle.
    Follow(CycleFollower),
    /// No cycle was running; the caller runs the new one.
    Lead(NavigationTicket),
}

/// Per-session authorization state.
///
/// Holds the user marker, the navigation generation counter and the
/// identity committed by the most recent completed cycle.
#[derive(Debug)]
pub struct SessionContext {
    id: Uuid,
    marker: String,
    issued_at: Timestamp,
    expires_at: Timestamp,

    generation: AtomicU64,
    resolved: watch::Sender<Option<(u64, ResolvedIdentity)>>,
    in_flight: Mutex<Option<CancellationToken>>,
    revoked: CancellationToken,
}

impl SessionContext {
    pub(super) fn new(
        id: Uuid,
        marker: String,
        issued_at: Timestamp,
        expires_at: Timestamp,
    ) -> Self {
        Self {
            id,
            marker,
            issued_at,
            expires_at,
            generation: AtomicU64::new(0),
            resolved: watch::Sender::new(None),
            in_flight: Mutex::new(None),
            revoked: CancellationToken::new(),
        }
    }

    /// Opaque session identifier, also used as the bearer token.
    #[inline]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Normalized user marker this session resolves.
    #[inline]
    pub fn marker(&self) -> &str {
        &self.marker
    }

    #[inline]
    pub fn issued_at(&self) -> Timestamp {
        self.issued_at
    }

    #[inline]
    pub fn expires_at(&self) -> Timestamp {
        self.expires_at
    }

    /// Returns whether the session is past its expiry at `now`.
    #[inline]
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        self.expires_at <= now
    }

    /// Returns the current navigation generation; `0` before the first cycle.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    #[inline]
    pub fn is_revoked(&self) -> bool {
        self.revoked.is_cancelled()
    }

    /// Starts a new resolution cycle and cancels the previous one.
    pub async fn begin_navigation(&self) -> NavigationTicket {
        let mut in_flight = self.in_flight.lock().await;
        self.start_cycle(&mut in_flight)
    }

    /// Joins the current cycle, or starts one when none is running.
    ///
    /// The check and the start happen under one lock, so concurrent first
    /// requests run a single cycle and the others follow it.
    pub async fn join_cycle(&self) -> CycleJoin {
        let mut in_flight = self.in_flight.lock().await;

        let generation = self.generation();
        if let Some((committed, identity)) = *self.resolved.borrow()
            && committed == generation
        {
            return CycleJoin::Settled(identity);
        }

        match in_flight.as_ref() {
            Some(token) if !token.is_cancelled() => CycleJoin::Follow(CycleFollower {
                generation,
                token: token.clone(),
                resolved: self.resolved.subscribe(),
            }),
            _ => CycleJoin::Lead(self.start_cycle(&mut in_flight)),
        }
    }

    fn start_cycle(&self, in_flight: &mut Option<CancellationToken>) -> NavigationTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let token = self.revoked.child_token();
        if let Some(previous) = in_flight.replace(token.clone()) {
            previous.cancel();
        }

        tracing::debug!(
            target: TRACING_TARGET_SESSION,
            session_id = %self.id,
            generation,
            "navigation cycle started"
        );

        NavigationTicket {
            generation,
            _guard: token.clone().drop_guard(),
            token,
        }
    }

    /// Commits `identity` for the ticket's cycle.
    ///
    /// Returns `false`, leaving the state untouched, when the cycle was
    /// cancelled or a newer one has started.
    pub async fn complete(&self, ticket: &NavigationTicket, identity: ResolvedIdentity) -> bool {
        let committed = self.resolved.send_if_modified(|resolved| {
            if ticket.is_cancelled() || ticket.generation != self.generation() {
                return false;
            }

            *resolved = Some((ticket.generation, identity));
            true
        });

        if !committed {
            tracing::debug!(
                target: TRACING_TARGET_SESSION,
                session_id = %self.id,
                generation = ticket.generation,
                current_generation = self.generation(),
                "discarding superseded identity resolution"
            );
        }

        committed
    }

    /// Returns the identity of the current cycle, or `Loading` while that
    /// cycle has not completed.
    pub async fn state(&self) -> IdentityState {
        match *self.resolved.borrow() {
            Some((generation, identity)) if generation == self.generation() => {
                IdentityState::Resolved(identity)
            }
            _ => IdentityState::Loading,
        }
    }

    /// Returns whether a cycle is running that has not been cancelled.
    pub async fn is_navigating(&self) -> bool {
        let in_flight = self.in_flight.lock().await;
        in_flight.as_ref().is_some_and(|token| !token.is_cancelled())
    }

    /// Revokes the session, cancelling any in-flight cycle.
    pub fn revoke(&self) {
        self.revoked.cancel();
    }
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;

    use super::*;
    use crate::extract::auth::Role;

    fn session() -> SessionContext {
        let now = Timestamp::now();
        SessionContext::new(
            Uuid::new_v4(),
            "ada@example.com".to_owned(),
            now,
            now + SignedDuration::from_hours(1),
        )
    }

    fn manager() -> ResolvedIdentity {
        ResolvedIdentity::new(Some(Role::Manager), Some(Uuid::new_v4()))
    }

    #[tokio::test]
    async fn loading_before_first_cycle() {
        let session = session();
        assert_eq!(session.generation(), 0);
        assert!(session.state().await.is_loading());
        assert!(!session.is_navigating().await);
    }

    #[tokio::test]
    async fn current_cycle_commits() {
        let session = session();
        let ticket = session.begin_navigation().await;
        assert!(session.is_navigating().await);

        assert!(session.complete(&ticket, manager()).await);
        assert_eq!(session.state().await.role(), Some(Role::Manager));
    }

    #[tokio::test]
    async fn superseded_cycle_is_discarded() {
        let session = session();
        let first = session.begin_navigation().await;
        let second = session.begin_navigation().await;

        assert!(first.is_cancelled());
        assert!(!session.complete(&first, manager()).await);
        assert!(session.state().await.is_loading());

        let admin = ResolvedIdentity::new(Some(Role::Administrator), None);
        assert!(session.complete(&second, admin).await);
        assert_eq!(session.state().await.role(), Some(Role::Administrator));
    }

    #[tokio::test]
    async fn new_cycle_hides_previous_identity() {
        let session = session();
        let first = session.begin_navigation().await;
        assert!(session.complete(&first, manager()).await);

        let _second = session.begin_navigation().await;
        assert!(session.state().await.is_loading());
    }

    #[tokio::test]
    async fn dropped_ticket_stops_navigating() {
        let session = session();
        let ticket = session.begin_navigation().await;
        drop(ticket);
        assert!(!session.is_navigating().await);
    }

    #[tokio::test]
    async fn second_joiner_follows_running_cycle() -> anyhow::Result<()> {
        let session = session();
        let CycleJoin::Lead(ticket) = session.join_cycle().await else {
            anyhow::bail!("first joiner must lead");
        };
        let CycleJoin::Follow(follower) = session.join_cycle().await else {
            anyhow::bail!("second joiner must follow");
        };
        assert_eq!(follower.generation(), ticket.generation());
        assert_eq!(session.generation(), 1);

        assert!(session.complete(&ticket, manager()).await);
        assert_eq!(follower.wait().await.role(), Some(Role::Manager));

        let CycleJoin::Settled(identity) = session.join_cycle().await else {
            anyhow::bail!("completed cycle must be settled");
        };
        assert_eq!(identity.role, Some(Role::Manager));
        Ok(())
    }

    #[tokio::test]
    async fn follower_of_superseded_cycle_is_loading() -> anyhow::Result<()> {
        let session = session();
        let CycleJoin::Lead(_first) = session.join_cycle().await else {
            anyhow::bail!("first joiner must lead");
        };
        let CycleJoin::Follow(follower) = session.join_cycle().await else {
            anyhow::bail!("second joiner must follow");
        };

        let _second = session.begin_navigation().await;
        assert!(follower.wait().await.is_loading());
        Ok(())
    }

    #[tokio::test]
    async fn revoke_cancels_in_flight_cycle() {
        let session = session();
        let ticket = session.begin_navigation().await;
        session.revoke();

        assert!(session.is_revoked());
        assert!(ticket.is_cancelled());
        assert!(!session.complete(&ticket, manager()).await);
    }
}
