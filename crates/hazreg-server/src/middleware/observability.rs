//! Observability middleware for request tracing and timing.
//!
//! Every request gets a UUID request id, propagated to the response, and a
//! tracing span. The `Authorization` header is marked sensitive so session
//! tokens never reach the logs.

use std::time::Instant;

use axum::Router;
use axum::extract::Request;
use axum::http::{HeaderName, header};
use axum::middleware::{Next, from_fn};
use axum::response::Response;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::TraceLayer;

use super::constants::REQUEST_ID_HEADER;
use crate::extract::auth::route_prefix;
use crate::utility::tracing_targets::TRACING_TARGET_METRICS;

/// Extension trait for `axum::`[`Router`] to apply observability middleware.
pub trait RouterObservabilityExt<S> {
    /// Layers request ids, tracing spans and sensitive-header redaction.
    fn with_observability(self) -> Self;

    /// Layers per-request timing, logged by route prefix.
    fn with_metrics(self) -> Self;
}

impl<S> RouterObservabilityExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_observability(self) -> Self {
        let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

        self.layer(PropagateRequestIdLayer::new(request_id.clone()))
            .layer(SetSensitiveRequestHeadersLayer::new([
                header::AUTHORIZATION,
                header::COOKIE,
            ]))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
    }

    fn with_metrics(self) -> Self {
        self.layer(from_fn(track_request_metrics))
    }
}

/// Logs method, route prefix, status and duration of every request.
pub async fn track_request_metrics(request: Request, next: Next) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();
    let route = route_prefix(request.uri().path()).unwrap_or_else(|| "/".to_owned());

    let response = next.run(request).await;

    tracing::trace!(
        target: TRACING_TARGET_METRICS,
        method = %method,
        route = %route,
        status = response.status().as_u16(),
        duration_ms = start_time.elapsed().as_millis() as u64,
        "request completed"
    );

    response
}
