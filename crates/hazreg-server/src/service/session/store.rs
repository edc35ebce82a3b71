use std::collections::HashMap;
use std::sync::Arc;

use jiff::{SignedDuration, Timestamp};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::SessionContext;
use crate::service::{Error, Result};
use crate::utility::tracing_targets::TRACING_TARGET_SESSION;

/// In-memory registry of live sessions keyed by their opaque id.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Arc<SessionContext>>>>,
    ttl: SignedDuration,
}

impl SessionStore {
    /// Creates an empty store whose sessions live for `ttl`.
    pub fn new(ttl: SignedDuration) -> Self {
        Self {
            sessions: Arc::default(),
            ttl,
        }
    }

    /// Returns the session lifetime.
    #[inline]
    pub fn ttl(&self) -> SignedDuration {
        self.ttl
    }

    /// Creates a session for `marker`, which is trimmed and lower-cased.
    ///
    /// Expired sessions are pruned on the way.
    pub async fn create(&self, marker: &str) -> Result<Arc<SessionContext>> {
        let issued_at = Timestamp::now();
        let expires_at = issued_at.checked_add(self.ttl).map_err(|e| {
            Error::internal("session", "Session expiry is out of range").with_source(e)
        })?;

        let session = Arc::new(SessionContext::new(
            Uuid::new_v4(),
            marker.trim().to_lowercase(),
            issued_at,
            expires_at,
        ));

        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, existing| {
            let keep = !existing.is_expired_at(issued_at);
            if !keep {
                existing.revoke();
            }
            keep
        });
        sessions.insert(session.id(), Arc::clone(&session));

        tracing::info!(
            target: TRACING_TARGET_SESSION,
            session_id = %session.id(),
            expires_at = %expires_at,
            active_sessions = sessions.len(),
            "session created"
        );

        Ok(session)
    }

    /// Returns a live session; expired sessions are removed and `None`
    /// is returned.
    pub async fn get(&self, id: Uuid) -> Option<Arc<SessionContext>> {
        let session = {
            let sessions = self.sessions.read().await;
            sessions.get(&id).cloned()?
        };

        if session.is_expired_at(Timestamp::now()) {
            tracing::debug!(
                target: TRACING_TARGET_SESSION,
                session_id = %id,
                "session expired"
            );
            self.remove(id).await;
            return None;
        }

        Some(session)
    }

    /// Removes and revokes a session. Returns whether it existed.
    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id);
        let Some(session) = removed else {
            return false;
        };

        session.revoke();
        tracing::info!(
            target: TRACING_TARGET_SESSION,
            session_id = %id,
            "session removed"
        );
        true
    }

    /// Returns the number of sessions held, expired or not.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
