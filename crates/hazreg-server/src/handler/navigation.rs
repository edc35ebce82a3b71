//! Navigation permission checks.
//!
//! `POST /navigation` starts a fresh identity resolution cycle for the
//! session and decides on the target path once it settles. A newer
//! navigation on the same session supersedes the cycle, in which case the
//! superseded request reports `isLoading` instead of a decision.
//!
//! `GET /navigation/status` never starts a cycle. It evaluates the path
//! against whatever the session's current cycle has resolved so far.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;

use crate::extract::auth::{
    IdentityState, PermissionCheck, ResolvedIdentity, RoutePermissionTable,
};
use crate::extract::{Json, SessionHeader, ValidateJson, ValidateQuery};
use crate::handler::Result;
use crate::handler::request::{Navigate, NavigationStatus};
use crate::handler::response::{ErrorResponse, Navigation};
use crate::service::{IdentityResolver, ServiceState, SessionStore};

const TRACING_TARGET: &str = "hazreg_server::handler::navigation";

#[tracing::instrument(skip_all)]
async fn navigate(
    State(sessions): State<SessionStore>,
    State(identity_resolver): State<IdentityResolver>,
    State(route_table): State<RoutePermissionTable>,
    session_header: Option<SessionHeader>,
    ValidateJson(request): ValidateJson<Navigate>,
) -> Result<(StatusCode, Json<Navigation>)> {
    let session = match session_header {
        Some(header) => sessions.get(header.session_id()).await,
        None => None,
    };

    let identity = match session {
        Some(ref session) => identity_resolver.resolve_navigation(session).await,
        None => IdentityState::Resolved(ResolvedIdentity::ANONYMOUS),
    };

    let decision = PermissionCheck::new()
        .resolve_state(identity)
        .evaluate(&route_table, &request.path)
        .decision();

    tracing::info!(
        target: TRACING_TARGET,
        path = %request.path,
        role = ?identity.role(),
        has_permission = decision.has_permission,
        is_loading = decision.is_loading,
        "navigation evaluated"
    );

    Ok((
        StatusCode::OK,
        Json(Navigation::new(request.path, identity, decision)),
    ))
}

fn navigate_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Navigate")
        .description(
            "Re-resolves the caller's identity and decides whether the role may open the \
             target path. Paths whose first segment is not in the route table are open.",
        )
        .response::<200, Json<Navigation>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
}

#[tracing::instrument(skip_all)]
async fn get_navigation_status(
    State(sessions): State<SessionStore>,
    State(route_table): State<RoutePermissionTable>,
    session_header: Option<SessionHeader>,
    ValidateQuery(request): ValidateQuery<NavigationStatus>,
) -> Result<(StatusCode, Json<Navigation>)> {
    let session = match session_header {
        Some(header) => sessions.get(header.session_id()).await,
        None => None,
    };

    let identity = match session {
        Some(ref session) => session.state().await,
        None => IdentityState::Resolved(ResolvedIdentity::ANONYMOUS),
    };

    let decision = route_table.evaluate(&request.path, &identity);

    tracing::debug!(
        target: TRACING_TARGET,
        path = %request.path,
        has_permission = decision.has_permission,
        is_loading = decision.is_loading,
        "navigation status read"
    );

    Ok((
        StatusCode::OK,
        Json(Navigation::new(request.path, identity, decision)),
    ))
}

fn get_navigation_status_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get navigation status")
        .description(
            "Evaluates a path against the identity of the session's current cycle without \
             starting a new one.",
        )
        .response::<200, Json<Navigation>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
}

/// Returns a [`Router`] with the navigation routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/navigation", post_with(navigate, navigate_docs))
        .api_route(
            "/navigation/status",
            get_with(get_navigation_status, get_navigation_status_docs),
        )
        .with_path_items(|item| item.tag("Navigation"))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use crate::extract::auth::Role;
    use crate::handler::response::Navigation;
    use crate::handler::test::TestContext;

    async fn navigate(ctx: &TestContext, token: Option<&str>, path: &str) -> Navigation {
        let request = ctx.server.post("/navigation").json(&json!({ "path": path }));
        let request = match token {
            Some(token) => request.authorization_bearer(token),
            None => request,
        };

        let response = request.await;
        response.assert_status_ok();
        response.json::<Navigation>()
    }

    #[tokio::test]
    async fn administrator_opens_users() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;
        let token = ctx.sign_in("admin@example.com").await?;

        let navigation = navigate(&ctx, Some(&token), "/users").await;
        assert_eq!(navigation.role, Some(Role::Administrator));
        assert_eq!(navigation.route_prefix.as_deref(), Some("users"));
        assert!(navigation.has_permission);
        assert!(!navigation.is_loading);
        Ok(())
    }

    #[tokio::test]
    async fn standard_user_is_denied_users() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;
        let token = ctx.sign_in("standard@example.com").await?;

        let navigation = navigate(&ctx, Some(&token), "/users").await;
        assert_eq!(navigation.role, Some(Role::Standard));
        assert!(!navigation.has_permission);
        assert!(!navigation.is_loading);
        Ok(())
    }

    #[tokio::test]
    async fn manager_opens_compliance_but_not_locations() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;
        let token = ctx.sign_in("manager@example.com").await?;

        let compliance = navigate(&ctx, Some(&token), "/compliance").await;
        assert!(compliance.has_permission);

        let locations = navigate(&ctx, Some(&token), "/locations").await;
        assert!(!locations.has_permission);
        assert_eq!(locations.role, Some(Role::Manager));
        Ok(())
    }

    #[tokio::test]
    async fn anonymous_is_denied_listed_routes() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;

        for path in ["/users", "/compliance", "/dashboard"] {
            let navigation = navigate(&ctx, None, path).await;
            assert_eq!(navigation.role, None);
            assert!(!navigation.has_permission, "{path} should be denied");
            assert!(!navigation.is_loading);
        }

        let unknown_session = uuid::Uuid::new_v4().to_string();
        let navigation = navigate(&ctx, Some(&unknown_session), "/users").await;
        assert_eq!(navigation.role, None);
        assert!(!navigation.has_permission);
        Ok(())
    }

    #[tokio::test]
    async fn unlisted_routes_are_open() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;
        let token = ctx.sign_in("standard@example.com").await?;

        for path in ["/", "/help", "/help/ghs-pictograms"] {
            assert!(navigate(&ctx, Some(&token), path).await.has_permission);
            assert!(navigate(&ctx, None, path).await.has_permission);
        }
        Ok(())
    }

    #[tokio::test]
    async fn decision_uses_first_segment_only() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;
        let token = ctx.sign_in("standard@example.com").await?;

        let navigation = navigate(&ctx, Some(&token), "/Users/42/edit?tab=roles").await;
        assert_eq!(navigation.route_prefix.as_deref(), Some("users"));
        assert!(!navigation.has_permission);
        Ok(())
    }

    #[tokio::test]
    async fn superseded_navigation_reports_loading() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;
        let token = ctx.sign_in("admin@example.com").await?;
        ctx.store
            .set_lookup_delay(Some(Duration::from_millis(300)))
            .await;

        let first = navigate(&ctx, Some(&token), "/users");
        let second = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            navigate(&ctx, Some(&token), "/compliance").await
        };
        let (first, second) = tokio::join!(first, second);

        assert!(first.is_loading);
        assert!(!first.has_permission);
        assert_eq!(first.role, None);

        assert!(!second.is_loading);
        assert!(second.has_permission);
        assert_eq!(second.role, Some(Role::Administrator));
        Ok(())
    }

    #[tokio::test]
    async fn padded_paths_are_rejected() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;

        let response = ctx
            .server
            .post("/navigation")
            .json(&json!({ "path": " /users" }))
            .await;
        response.assert_status_bad_request();

        let response = ctx
            .server
            .get("/navigation/status")
            .add_query_param("path", " /users")
            .await;
        response.assert_status_bad_request();
        Ok(())
    }

    #[tokio::test]
    async fn encoded_prefix_is_still_guarded() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;
        let token = ctx.sign_in("standard@example.com").await?;

        let anonymous = navigate(&ctx, None, "/%75sers").await;
        assert_eq!(anonymous.route_prefix.as_deref(), Some("users"));
        assert!(!anonymous.has_permission);

        let standard = navigate(&ctx, Some(&token), "/%75sers").await;
        assert!(!standard.has_permission);
        Ok(())
    }

    #[tokio::test]
    async fn status_does_not_start_a_cycle() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;
        let session = ctx.state.sessions.create("manager@example.com").await?;

        let response = ctx
            .server
            .get("/navigation/status")
            .add_query_param("path", "/compliance")
            .authorization_bearer(session.id())
            .await;
        response.assert_status_ok();

        let navigation = response.json::<Navigation>();
        assert!(navigation.is_loading);
        assert!(!navigation.has_permission);
        assert!(!session.is_navigating().await);

        ctx.state.identity_resolver.resolve_navigation(&session).await;

        let response = ctx
            .server
            .get("/navigation/status")
            .add_query_param("path", "/compliance")
            .authorization_bearer(session.id())
            .await;
        let navigation = response.json::<Navigation>();
        assert!(!navigation.is_loading);
        assert!(navigation.has_permission);
        Ok(())
    }
}
