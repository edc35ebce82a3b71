use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::Pagination;
use crate::model::Location;
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for location database operations.
pub trait LocationRepository {
    /// Lists locations ordered by name.
    fn list_locations(
        &mut self,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<Location>>> + Send;
}

impl LocationRepository for PgConnection {
    async fn list_locations(&mut self, pagination: Pagination) -> PgResult<Vec<Location>> {
        use schema::locations::{self, dsl};

        locations::table
            .order((dsl::name.asc(), dsl::id.asc()))
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(Location::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }
}
