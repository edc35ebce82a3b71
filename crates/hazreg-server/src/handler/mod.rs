//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! Routes are split in two groups. Private routes sit behind
//! [`require_route_permission`], which checks the request path against the
//! [`RoutePermissionTable`] before the handler runs. Public routes do their
//! own checks, if any.
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use hazreg_server::handler::routes;
//! use hazreg_server::middleware::{OpenApiConfig, RouterOpenApiExt};
//! use hazreg_server::service::{ServiceConfig, ServiceState};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServiceConfig::default();
//! let state = ServiceState::from_config(&config).await?;
//!
//! let router: axum::Router = routes(state.clone())
//!     .with_open_api(OpenApiConfig::default())
//!     .with_state(state);
//! # Ok(())
//! # }
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler
//! [`RoutePermissionTable`]: crate::extract::auth::RoutePermissionTable
//! [`require_route_permission`]: crate::middleware::require_route_permission

mod authentication;
mod error;
mod locations;
mod monitors;
mod navigation;
mod request;
mod response;
mod session;
mod site_registers;

use aide::axum::ApiRouter;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
pub(crate) use crate::handler::response::ErrorResponse;
use crate::middleware::RouterAuthorizationExt;
use crate::service::ServiceState;

#[inline]
async fn not_found() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns an [`ApiRouter`] with all routes gated by the route table.
fn private_routes(state: ServiceState) -> ApiRouter<ServiceState> {
    ApiRouter::new()
        .merge(site_registers::routes())
        .merge(locations::routes())
        .with_route_permissions(state)
}

/// Returns an [`ApiRouter`] with all public routes.
fn public_routes() -> ApiRouter<ServiceState> {
    ApiRouter::new()
        .merge(authentication::routes())
        .merge(session::routes())
        .merge(navigation::routes())
        .merge(monitors::routes())
}

/// Returns an [`ApiRouter`] with all routes.
pub fn routes(state: ServiceState) -> ApiRouter<ServiceState> {
    ApiRouter::new()
        .merge(private_routes(state))
        .merge(public_routes())
        .fallback(not_found)
}
