//! Per-request authorization state.

use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;

use super::{IdentityState, ResolvedIdentity, SessionHeader};
use crate::handler::{Error, Result};
use crate::service::{IdentityResolver, SessionContext, SessionStore};
use crate::utility::tracing_targets::TRACING_TARGET_AUTHENTICATION;

/// The caller's session, if any, and the identity of its current cycle.
///
/// A request without a session token, or with a token for an unknown or
/// expired session, is anonymous. Only a malformed token rejects.
///
/// ```rust,ignore
/// async fn handler(auth_state: AuthState) -> Result<impl IntoResponse> {
///     match auth_state.identity() {
///         IdentityState::Loading => ...,
///         IdentityState::Resolved(identity) => ...,
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthState {
    session: Option<Arc<SessionContext>>,
    identity: IdentityState,
}

impl AuthState {
    /// State of a caller without a live session.
    pub fn anonymous() -> Self {
        Self {
            session: None,
            identity: IdentityState::Resolved(ResolvedIdentity::ANONYMOUS),
        }
    }

    /// State of a caller with a live session.
    pub fn with_session(session: Arc<SessionContext>, identity: IdentityState) -> Self {
        Self {
            session: Some(session),
            identity,
        }
    }

    /// Returns the caller's live session.
    #[inline]
    pub fn session(&self) -> Option<&Arc<SessionContext>> {
        self.session.as_ref()
    }

    /// Returns the identity, possibly still loading.
    #[inline]
    pub fn identity(&self) -> IdentityState {
        self.identity
    }

    pub async fn from_session_header(
        session_header: Option<SessionHeader>,
        sessions: &SessionStore,
        resolver: &IdentityResolver,
    ) -> Self {
        let Some(session_header) = session_header else {
            return Self::anonymous();
        };

        let Some(session) = sessions.get(session_header.session_id()).await else {
            tracing::warn!(
                target: TRACING_TARGET_AUTHENTICATION,
                session_id = %session_header.session_id(),
                "unknown or expired session, treating caller as anonymous"
            );
            return Self::anonymous();
        };

        let identity = resolver.resolve_cached(&session).await;
        Self::with_session(session, identity)
    }
}

impl<S> FromRequestParts<S> for AuthState
where
    S: Sync + Send,
    SessionStore: FromRef<S>,
    IdentityResolver: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(auth_state) = parts.extensions.get::<Self>() {
            return Ok(auth_state.clone());
        }

        let session_header =
            <SessionHeader as OptionalFromRequestParts<S>>::from_request_parts(parts, state)
                .await?;

        let sessions = SessionStore::from_ref(state);
        let resolver = IdentityResolver::from_ref(state);
        let auth_state = Self::from_session_header(session_header, &sessions, &resolver).await;

        parts.extensions.insert(auth_state.clone());
        Ok(auth_state)
    }
}

impl aide::OperationInput for AuthState {}
