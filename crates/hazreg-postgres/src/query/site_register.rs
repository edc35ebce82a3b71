use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use super::Pagination;
use crate::model::SiteRegister;
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for site-register database operations.
pub trait SiteRegisterRepository {
    /// Lists site-register entries, optionally restricted to one location.
    ///
    /// `None` lists entries across all locations; callers are responsible
    /// for deciding whether the caller may see them.
    fn list_site_registers(
        &mut self,
        location_id: Option<Uuid>,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<SiteRegister>>> + Send;
}

impl SiteRegisterRepository for PgConnection {
    async fn list_site_registers(
        &mut self,
        location_id: Option<Uuid>,
        pagination: Pagination,
    ) -> PgResult<Vec<SiteRegister>> {
        use schema::site_registers::{self, dsl};

        let mut query = site_registers::table
            .select(SiteRegister::as_select())
            .into_boxed();

        if let Some(location_id) = location_id {
            query = query.filter(dsl::location_id.eq(location_id));
        }

        query
            .order((dsl::product_name.asc(), dsl::id.asc()))
            .limit(pagination.limit)
            .offset(pagination.offset)
            .load(self)
            .await
            .map_err(PgError::from)
    }
}
