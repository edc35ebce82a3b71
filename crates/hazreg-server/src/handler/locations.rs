//! Location handlers.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;

use crate::extract::{Json, Query};
use crate::handler::Result;
use crate::handler::request::Pagination;
use crate::handler::response::{ErrorResponse, Location, LocationsPage};
use crate::service::{ServiceState, SharedRecordStore};

const TRACING_TARGET: &str = "hazreg_server::handler::locations";

/// Lists every location. Administration only.
#[tracing::instrument(skip_all)]
async fn list_locations(
    State(store): State<SharedRecordStore>,
    Query(pagination): Query<Pagination>,
) -> Result<(StatusCode, Json<LocationsPage>)> {
    let pagination = pagination.into();
    let locations = store.list_locations(pagination).await?;

    tracing::debug!(
        target: TRACING_TARGET,
        count = locations.len(),
        "locations listed"
    );

    let page = LocationsPage::from_models(locations, pagination, Location::from_model);
    Ok((StatusCode::OK, Json(page)))
}

fn list_locations_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List locations")
        .description("Lists the location hierarchy. Requires the administration tier.")
        .response::<200, Json<LocationsPage>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<403, Json<ErrorResponse>>()
}

/// Returns a [`Router`] with the location routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/locations", get_with(list_locations, list_locations_docs))
        .with_path_items(|item| item.tag("Locations"))
}
