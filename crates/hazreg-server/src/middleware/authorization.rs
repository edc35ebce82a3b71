//! Route-permission middleware.
//!
//! Evaluates the request path against the [`RoutePermissionTable`] with the
//! caller's current identity. While the identity is still resolving no
//! decision is made and the request is answered with `503`.

use aide::axum::ApiRouter;
use axum::extract::{Request, State};
use axum::middleware::{Next, from_fn_with_state};
use axum::response::Response;

use crate::extract::AuthState;
use crate::extract::auth::{IdentityState, RoutePermissionTable};
use crate::handler::{ErrorKind, Result};
use crate::service::ServiceState;
use crate::utility::tracing_targets::TRACING_TARGET_AUTHORIZATION;

/// Extension trait for [`ApiRouter`] to apply the route-permission check.
pub trait RouterAuthorizationExt {
    /// Requires every route added so far to pass the route-permission table.
    fn with_route_permissions(self, state: ServiceState) -> Self;
}

impl RouterAuthorizationExt for ApiRouter<ServiceState> {
    fn with_route_permissions(self, state: ServiceState) -> Self {
        self.route_layer(from_fn_with_state(state, require_route_permission))
    }
}

/// Requires the caller's role to be allowed on the request path.
///
/// Anonymous callers on listed routes get `401`, resolved callers without
/// the required tier get `403`.
pub async fn require_route_permission(
    State(route_table): State<RoutePermissionTable>,
    auth_state: AuthState,
    request: Request,
    next: Next,
) -> Result<Response> {
    let path = request.uri().path().to_owned();

    let identity = match auth_state.identity() {
        IdentityState::Loading => {
            tracing::debug!(
                target: TRACING_TARGET_AUTHORIZATION,
                path = %path,
                "identity still resolving, deferring decision"
            );
            return Err(ErrorKind::ServiceUnavailable
                .with_message("Identity is still resolving, retry shortly")
                .with_resource("authorization"));
        }
        IdentityState::Resolved(identity) => identity,
    };

    if route_table.check(&path, identity.role) {
        return Ok(next.run(request).await);
    }

    tracing::warn!(
        target: TRACING_TARGET_AUTHORIZATION,
        path = %path,
        role = ?identity.role,
        has_session = auth_state.session().is_some(),
        "route access denied"
    );

    let error = match (identity.role, auth_state.session()) {
        (Some(_), _) => {
            ErrorKind::Forbidden.with_message("Your role does not grant access to this route")
        }
        (None, None) => ErrorKind::MissingAuthToken.into_error(),
        (None, Some(_)) => ErrorKind::Unauthorized.with_message("Session has no role assigned"),
    };

    Err(error.with_resource("authorization"))
}
