//! Session token extraction from the `Authorization: Bearer` header.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use axum_extra::typed_header::TypedHeaderRejectionReason;
use uuid::Uuid;

use crate::handler::{Error, ErrorKind, Result};
use crate::utility::tracing_targets::TRACING_TARGET_AUTHENTICATION;

/// Opaque session token carried as a bearer token.
///
/// Rejects with `401` when the header is missing or the token is not a
/// session id. Use `Option<SessionHeader>` to treat a missing header as an
/// anonymous caller.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionHeader(Uuid);

impl SessionHeader {
    #[inline]
    pub const fn new(session_id: Uuid) -> Self {
        Self(session_id)
    }

    /// Returns the session id.
    #[inline]
    pub const fn session_id(&self) -> Uuid {
        self.0
    }

    fn from_bearer(bearer: &Bearer) -> Result<Self> {
        let session_id = Uuid::try_parse(bearer.token()).map_err(|_| {
            tracing::debug!(
                target: TRACING_TARGET_AUTHENTICATION,
                "bearer token is not a session id"
            );
            ErrorKind::MalformedAuthToken
                .with_message("Invalid session token")
                .with_context("The bearer token is not a session token issued by this service")
                .with_resource("authentication")
        })?;

        Ok(Self(session_id))
    }
}

impl<S> FromRequestParts<S> for SessionHeader
where
    S: Sync + Send,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(session_header) = parts.extensions.get::<Self>() {
            return Ok(*session_header);
        }

        type AuthBearerHeader = TypedHeader<Authorization<Bearer>>;
        match <AuthBearerHeader as FromRequestParts<S>>::from_request_parts(parts, state).await {
            Ok(TypedHeader(Authorization(bearer))) => {
                let session_header = Self::from_bearer(&bearer)?;
                parts.extensions.insert(session_header);
                Ok(session_header)
            }
            Err(rejection) => {
                let error = match rejection.reason() {
                    TypedHeaderRejectionReason::Missing => ErrorKind::MissingAuthToken
                        .with_message("Authentication required")
                        .with_context("Missing Authorization header with Bearer token")
                        .with_resource("authentication"),
                    TypedHeaderRejectionReason::Error(_) => ErrorKind::MalformedAuthToken
                        .with_message("Invalid token format")
                        .with_context("Authorization header must contain a valid Bearer token")
                        .with_resource("authentication"),
                    _ => ErrorKind::InternalServerError
                        .with_message("Authentication processing failed")
                        .with_context("Unexpected error during header extraction")
                        .with_resource("authentication"),
                };
                Err(error)
            }
        }
    }
}

impl<S> OptionalFromRequestParts<S> for SessionHeader
where
    S: Sync + Send,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        match <Self as FromRequestParts<S>>::from_request_parts(parts, state).await {
            Ok(session_header) => Ok(Some(session_header)),
            Err(error) if error.kind() == ErrorKind::MissingAuthToken => Ok(None),
            Err(error) => Err(error),
        }
    }
}

impl aide::OperationInput for SessionHeader {}

#[cfg(test)]
mod tests {
    use axum::http::{Request, header};

    use super::*;

    async fn extract(value: Option<&str>) -> Result<Option<SessionHeader>> {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = value {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let (mut parts, ()) = builder
            .body(())
            .map_err(|_| ErrorKind::InternalServerError.into_error())?
            .into_parts();
        <SessionHeader as OptionalFromRequestParts<()>>::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn missing_header_is_none() -> anyhow::Result<()> {
        assert_eq!(extract(None).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn session_id_is_parsed() -> anyhow::Result<()> {
        let id = Uuid::new_v4();
        let header = extract(Some(&format!("Bearer {id}"))).await?;
        assert_eq!(header.map(|h| h.session_id()), Some(id));
        Ok(())
    }

    #[tokio::test]
    async fn non_uuid_token_is_malformed() {
        let error = extract(Some("Bearer not-a-session")).await.err();
        assert_eq!(error.map(|e| e.kind()), Some(ErrorKind::MalformedAuthToken));
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_malformed() {
        let error = extract(Some("Basic dXNlcjpwYXNz")).await.err();
        assert_eq!(error.map(|e| e.kind()), Some(ErrorKind::MalformedAuthToken));
    }
}
