//! Site-register handlers.
//!
//! Every query goes through [`scope_location_filter`]: location-bound roles
//! only ever see their own location's rows, whatever filter they send.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;

use crate::extract::auth::{LocationFilter, ResolvedIdentity, scope_location_filter};
use crate::extract::{AuthState, Json, Query};
use crate::handler::request::{ListSiteRegisters, ScopeFilter};
use crate::handler::response::{ErrorResponse, Page, SiteRegister, SiteRegistersPage};
use crate::handler::{ErrorKind, Result};
use crate::service::{ServiceState, SharedRecordStore};

const TRACING_TARGET: &str = "hazreg_server::handler::site_registers";

fn resolved_identity(auth_state: &AuthState) -> Result<ResolvedIdentity> {
    auth_state.identity().resolved().ok_or_else(|| {
        ErrorKind::ServiceUnavailable
            .with_message("Identity is still resolving, retry shortly")
            .with_resource("identity")
    })
}

/// Returns the filter the caller is allowed to apply.
#[tracing::instrument(skip_all)]
async fn scope_filter(
    auth_state: AuthState,
    Json(request): Json<ScopeFilter>,
) -> Result<(StatusCode, Json<LocationFilter>)> {
    let identity = resolved_identity(&auth_state)?;
    let filter = scope_location_filter(identity.role, identity.location_id, request.requested());

    tracing::debug!(
        target: TRACING_TARGET,
        role = ?identity.role,
        requested = ?request.location_id,
        effective = ?filter.location_id,
        read_only = filter.read_only,
        "location filter scoped"
    );

    Ok((StatusCode::OK, Json(filter)))
}

fn scope_filter_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Scope location filter")
        .description(
            "Returns the location filter the caller may apply. Administrators and power users \
             get the requested filter back. Other roles get a read-only filter pinned to their \
             assigned location.",
        )
        .response::<200, Json<LocationFilter>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<503, Json<ErrorResponse>>()
}

/// Lists site-register rows within the caller's scope.
#[tracing::instrument(skip_all)]
async fn list_site_registers(
    State(store): State<SharedRecordStore>,
    auth_state: AuthState,
    Query(request): Query<ListSiteRegisters>,
) -> Result<(StatusCode, Json<SiteRegistersPage>)> {
    let identity = resolved_identity(&auth_state)?;
    let filter = scope_location_filter(
        identity.role,
        identity.location_id,
        request.filter().requested(),
    );
    let pagination = request.pagination().into();

    let rows = store.list_site_registers(&filter, pagination).await?;

    tracing::debug!(
        target: TRACING_TARGET,
        role = ?identity.role,
        location_id = ?filter.location_id,
        count = rows.len(),
        "site registers listed"
    );

    let page = Page::from_models(rows, pagination, SiteRegister::from_model);
    Ok((StatusCode::OK, Json(SiteRegistersPage { filter, page })))
}

fn list_site_registers_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List site registers")
        .description(
            "Lists hazardous products held at locations within the caller's scope. The \
             effective filter is returned alongside the rows.",
        )
        .response::<200, Json<SiteRegistersPage>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<403, Json<ErrorResponse>>()
        .response::<503, Json<ErrorResponse>>()
}

/// Returns a [`Router`] with the site-register routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route(
            "/site-registers",
            get_with(list_site_registers, list_site_registers_docs),
        )
        .api_route(
            "/site-registers/scope",
            post_with(scope_filter, scope_filter_docs),
        )
        .with_path_items(|item| item.tag("Site registers"))
}
