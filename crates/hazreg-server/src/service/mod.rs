//! Application state and dependency injection.

mod cache;
mod config;
mod identity;
mod security;
mod session;
mod store;

use std::sync::Arc;

use crate::extract::auth::RoutePermissionTable;
pub use crate::service::cache::HealthCache;
pub use crate::service::config::{ServiceConfig, ServiceConfigBuilder};
pub use crate::service::identity::{IdentityResolver, normalize_marker};
pub use crate::service::security::PasswordHasher;
pub use crate::service::session::{
    CycleFollower, CycleJoin, NavigationTicket, SessionContext, SessionStore,
};
pub use crate::service::store::{RecordStore, SharedRecordStore};
#[cfg(test)]
pub(crate) use crate::service::store::memory::MemoryStore;
// Re-export error types from crate root for convenience
pub use crate::{Error, Result};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Clone)]
pub struct ServiceState {
    // External services:
    pub store: SharedRecordStore,

    // Internal services:
    pub identity_resolver: IdentityResolver,
    pub sessions: SessionStore,
    pub route_table: RoutePermissionTable,
    pub password_hasher: PasswordHasher,
    pub health_cache: HealthCache,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// Connects to PostgreSQL and applies migrations if configured.
    pub async fn from_config(service_config: &ServiceConfig) -> Result<Self> {
        service_config.validate()?;
        let pg_client = service_config.connect_postgres().await?;
        Ok(Self::with_store(service_config, Arc::new(pg_client)))
    }

    /// Builds application state over an existing record store.
    pub fn with_store(service_config: &ServiceConfig, store: SharedRecordStore) -> Self {
        Self {
            identity_resolver: IdentityResolver::new(Arc::clone(&store)),
            store,

            sessions: SessionStore::new(service_config.session_ttl()),
            route_table: service_config.route_table(),
            password_hasher: PasswordHasher::new(),
            health_cache: HealthCache::new(),
        }
    }
}

impl std::fmt::Debug for ServiceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceState")
            .field("sessions", &self.sessions)
            .field("route_table", &self.route_table)
            .finish_non_exhaustive()
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

// External services:
impl_di!(store: SharedRecordStore);

// Internal services:
impl_di!(identity_resolver: IdentityResolver);
impl_di!(sessions: SessionStore);
impl_di!(route_table: RoutePermissionTable);
impl_di!(password_hasher: PasswordHasher);
impl_di!(health_cache: HealthCache);
