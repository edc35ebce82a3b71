//! Read access to the records the authorization core depends on.
//!
//! [`RecordStore`] is the seam between the service and persistence. The
//! production implementation is [`hazreg_postgres::PgClient`]; tests use an in-memory store.

mod postgres;

#[cfg(test)]
pub(crate) mod memory;

use hazreg_postgres::model::{Location, SiteRegister, UserAccess};
use hazreg_postgres::query::Pagination;

use crate::extract::auth::LocationFilter;
use crate::service::Result;

/// Record lookups needed by identity resolution, login and data routes.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync + 'static {
    /// Finds an active user and every role assigned to them.
    ///
    /// `email` is already normalized; inactive users are absent.
    async fn find_user_access(&self, email: &str) -> Result<Option<UserAccess>>;

    /// Lists locations ordered by name.
    async fn list_locations(&self, pagination: Pagination) -> Result<Vec<Location>>;

    /// Lists site-register rows passing `filter`, ordered by product name.
    ///
    /// A filter that matches nothing yields an empty list without a query.
    async fn list_site_registers(
        &self,
        filter: &LocationFilter,
        pagination: Pagination,
    ) -> Result<Vec<SiteRegister>>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> Result<()>;
}

/// Convenience alias for the type-erased store held by the service state.
pub type SharedRecordStore = std::sync::Arc<dyn RecordStore>;
