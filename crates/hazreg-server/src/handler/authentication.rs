//! Login and logout.
//!
//! Login verifies the password against the stored Argon2 hash and opens a
//! session whose id is the bearer token. Every login failure answers with
//! the same `401`, so callers cannot tell unknown accounts from wrong
//! passwords.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;

use crate::extract::{Json, SessionHeader, ValidateJson};
use crate::handler::request::Login;
use crate::handler::response::{ErrorResponse, Session};
use crate::handler::{Error, ErrorKind, Result};
use crate::service::{
    IdentityResolver, PasswordHasher, ServiceState, SessionStore, SharedRecordStore,
    normalize_marker,
};

const TRACING_TARGET: &str = "hazreg_server::handler::authentication";

fn login_failed() -> Error<'static> {
    ErrorKind::Unauthorized
        .with_message("Invalid email or password")
        .with_resource("authentication")
}

#[tracing::instrument(skip_all)]
async fn login(
    State(store): State<SharedRecordStore>,
    State(password_hasher): State<PasswordHasher>,
    State(sessions): State<SessionStore>,
    State(identity_resolver): State<IdentityResolver>,
    ValidateJson(request): ValidateJson<Login>,
) -> Result<(StatusCode, Json<Session>)> {
    let email = normalize_marker(&request.email);

    let access = store.find_user_access(&email).await.map_err(|e| {
        tracing::error!(
            target: TRACING_TARGET,
            error = %e,
            "user lookup failed during login"
        );
        login_failed()
    })?;

    let password_hash = access
        .as_ref()
        .and_then(|access| access.user.password_hash.as_deref());

    // Unknown accounts still pay for one verification.
    let password_valid = match password_hash {
        Some(password_hash) => password_hasher
            .verify_password(&request.password, password_hash)
            .is_ok(),
        None => password_hasher.verify_dummy_password(&request.password),
    };

    let Some(access) = access.filter(|_| password_valid) else {
        tracing::warn!(
            target: TRACING_TARGET,
            password_valid,
            "login failed"
        );
        return Err(login_failed());
    };

    let session = sessions.create(&email).await?;
    let identity = identity_resolver.resolve_navigation(&session).await;

    tracing::info!(
        target: TRACING_TARGET,
        user_id = %access.user.id,
        session_id = %session.id(),
        role = ?identity.role(),
        "login successful"
    );

    Ok((StatusCode::CREATED, Json(Session::from_context(&session))))
}

fn login_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Log in")
        .description(
            "Verifies the credentials and opens a session. The returned session token is \
             sent as `Authorization: Bearer <token>` on later requests.",
        )
        .response::<201, Json<Session>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
}

#[tracing::instrument(skip_all)]
async fn logout(
    State(sessions): State<SessionStore>,
    session_header: Option<SessionHeader>,
) -> Result<StatusCode> {
    if let Some(session_header) = session_header {
        let removed = sessions.remove(session_header.session_id()).await;
        tracing::info!(
            target: TRACING_TARGET,
            session_id = %session_header.session_id(),
            removed,
            "logout"
        );
    }

    Ok(StatusCode::NO_CONTENT)
}

fn logout_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Log out")
        .description("Ends the session and cancels any identity resolution in flight. Idempotent.")
        .response::<204, ()>()
        .response::<401, Json<ErrorResponse>>()
}

/// Returns a [`Router`] with the authentication routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/auth/login", post_with(login, login_docs))
        .api_route("/auth/logout", post_with(logout, logout_docs))
        .with_path_items(|item| item.tag("Authentication"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::handler::test::TestContext;

    #[tokio::test]
    async fn login_returns_session() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;

        let response = ctx
            .server
            .post("/auth/login")
            .json(&json!({ "email": "Admin@Example.com", "password": TestContext::PASSWORD }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let session = response.json::<Session>();
        assert!(session.expires_at > session.issued_at);
        assert!(ctx.state.sessions.get(session.session_token).await.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;

        let wrong_password = ctx
            .server
            .post("/auth/login")
            .json(&json!({ "email": "admin@example.com", "password": "wrong" }))
            .await;
        let unknown_user = ctx
            .server
            .post("/auth/login")
            .json(&json!({ "email": "nobody@example.com", "password": "wrong" }))
            .await;

        wrong_password.assert_status(StatusCode::UNAUTHORIZED);
        unknown_user.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_password.text(), unknown_user.text());
        assert!(ctx.state.sessions.is_empty().await);
        Ok(())
    }

    #[tokio::test]
    async fn login_fails_closed_when_store_is_down() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;
        ctx.store.set_failing(true);

        let response = ctx
            .server
            .post("/auth/login")
            .json(&json!({ "email": "admin@example.com", "password": TestContext::PASSWORD }))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        Ok(())
    }

    #[tokio::test]
    async fn login_validates_body() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;

        let response = ctx
            .server
            .post("/auth/login")
            .json(&json!({ "email": "not-an-email", "password": "x" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn logout_is_idempotent() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;
        let token = ctx.sign_in("standard@example.com").await?;

        let first = ctx
            .server
            .post("/auth/logout")
            .authorization_bearer(&token)
            .await;
        first.assert_status(StatusCode::NO_CONTENT);

        let second = ctx
            .server
            .post("/auth/logout")
            .authorization_bearer(&token)
            .await;
        second.assert_status(StatusCode::NO_CONTENT);

        let anonymous = ctx.server.post("/auth/logout").await;
        anonymous.assert_status(StatusCode::NO_CONTENT);

        let identity = ctx
            .server
            .get("/session/identity")
            .authorization_bearer(&token)
            .await;
        identity.assert_status_ok();
        assert_eq!(identity.json::<serde_json::Value>()["role"], json!(null));
        Ok(())
    }
}
