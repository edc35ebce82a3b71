//! Session introspection.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::http::StatusCode;

use crate::extract::{AuthState, Json};
use crate::handler::Result;
use crate::handler::response::{ErrorResponse, Identity};
use crate::service::ServiceState;

const TRACING_TARGET: &str = "hazreg_server::handler::session";

/// Returns the identity of the caller's current resolution cycle.
#[tracing::instrument(skip_all)]
async fn get_identity(auth_state: AuthState) -> Result<(StatusCode, Json<Identity>)> {
    let identity = Identity::from(auth_state.identity());

    tracing::debug!(
        target: TRACING_TARGET,
        has_session = auth_state.session().is_some(),
        role = ?identity.role,
        is_loading = identity.is_loading,
        "identity read"
    );

    Ok((StatusCode::OK, Json(identity)))
}

fn get_identity_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get identity")
        .description(
            "Returns the caller's effective role and assigned location. Callers without a \
             session get a `null` role. While resolution is in flight `isLoading` is set.",
        )
        .response::<200, Json<Identity>>()
        .response::<401, Json<ErrorResponse>>()
}

/// Returns a [`Router`] with the session routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/session/identity", get_with(get_identity, get_identity_docs))
        .with_path_items(|item| item.tag("Session"))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::http::StatusCode;

    use crate::extract::auth::Role;
    use crate::handler::response::Identity;
    use crate::handler::test::TestContext;

    #[tokio::test]
    async fn anonymous_identity() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;

        let response = ctx.server.get("/session/identity").await;
        response.assert_status_ok();

        let identity = response.json::<Identity>();
        assert_eq!(identity.role, None);
        assert_eq!(identity.location_id, None);
        assert!(!identity.is_loading);
        Ok(())
    }

    #[tokio::test]
    async fn resolved_identity() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;
        let token = ctx.sign_in("standard@example.com").await?;

        let response = ctx
            .server
            .get("/session/identity")
            .authorization_bearer(&token)
            .await;
        response.assert_status_ok();

        let identity = response.json::<Identity>();
        assert_eq!(identity.role, Some(Role::Standard));
        assert_eq!(identity.location_id, Some(ctx.location_a));
        Ok(())
    }

    #[tokio::test]
    async fn malformed_token_is_rejected() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;

        let response = ctx
            .server
            .get("/session/identity")
            .authorization_bearer("not-a-session")
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        Ok(())
    }

    #[tokio::test]
    async fn in_flight_resolution_is_awaited() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;
        let session = ctx.state.sessions.create("admin@example.com").await?;
        ctx.store
            .set_lookup_delay(Some(Duration::from_millis(200)))
            .await;

        let resolver = ctx.state.identity_resolver.clone();
        let pending = session.clone();
        let cycle = tokio::spawn(async move { resolver.resolve_navigation(&pending).await });
        tokio::time::sleep(Duration::from_millis(50)).await;

        let response = ctx
            .server
            .get("/session/identity")
            .authorization_bearer(session.id())
            .await;
        response.assert_status_ok();

        let identity = response.json::<Identity>();
        assert!(!identity.is_loading);
        assert_eq!(identity.role, Some(Role::Administrator));

        assert!(!cycle.await?.is_loading());
        assert_eq!(session.generation(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn superseded_resolution_reports_loading() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;
        let session = ctx.state.sessions.create("admin@example.com").await?;
        ctx.store
            .set_lookup_delay(Some(Duration::from_millis(300)))
            .await;

        let resolver = ctx.state.identity_resolver.clone();
        let pending = session.clone();
        let cycle = tokio::spawn(async move { resolver.resolve_navigation(&pending).await });
        tokio::time::sleep(Duration::from_millis(50)).await;

        let request = ctx
            .server
            .get("/session/identity")
            .authorization_bearer(session.id());
        let supersede = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            ctx.store.set_lookup_delay(None).await;
            ctx.state.identity_resolver.resolve_navigation(&session).await
        };
        let (response, fresh) = tokio::join!(request, supersede);
        response.assert_status_ok();

        let identity = response.json::<Identity>();
        assert!(identity.is_loading);
        assert_eq!(identity.role, None);

        assert!(cycle.await?.is_loading());
        assert_eq!(fresh.role(), Some(Role::Administrator));
        Ok(())
    }
}
