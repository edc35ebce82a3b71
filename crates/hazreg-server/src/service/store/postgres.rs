use hazreg_postgres::PgClient;
use hazreg_postgres::model::{Location, SiteRegister, UserAccess};
use hazreg_postgres::query::{
    LocationRepository, Pagination, SiteRegisterRepository, UserRepository,
};

use super::RecordStore;
use crate::extract::auth::LocationFilter;
use crate::service::Result;
use crate::utility::tracing_targets::TRACING_TARGET_STORE;

#[async_trait::async_trait]
impl RecordStore for PgClient {
    async fn find_user_access(&self, email: &str) -> Result<Option<UserAccess>> {
        let mut conn = self.get_connection().await?;
        let access = conn.find_user_access_by_email(email).await?;
        Ok(access)
    }

    async fn list_locations(&self, pagination: Pagination) -> Result<Vec<Location>> {
        let mut conn = self.get_connection().await?;
        let locations = conn.list_locations(pagination).await?;
        Ok(locations)
    }

    async fn list_site_registers(
        &self,
        filter: &LocationFilter,
        pagination: Pagination,
    ) -> Result<Vec<SiteRegister>> {
        if filter.matches_nothing() {
            tracing::debug!(
                target: TRACING_TARGET_STORE,
                "pinned filter without location, skipping site-register query"
            );
            return Ok(Vec::new());
        }

        let mut conn = self.get_connection().await?;
        let rows = conn
            .list_site_registers(filter.location_id, pagination)
            .await?;
        Ok(rows)
    }

    async fn ping(&self) -> Result<()> {
        PgClient::ping(self).await?;
        Ok(())
    }
}
