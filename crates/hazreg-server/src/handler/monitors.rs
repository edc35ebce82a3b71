//! Health monitoring handlers.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;

use crate::extract::Json;
use crate::handler::Result;
use crate::handler::response::MonitorStatus;
use crate::service::{HealthCache, ServiceState, SharedRecordStore};

/// Tracing target for monitor operations.
const TRACING_TARGET: &str = "hazreg_server::handler::monitors";

#[tracing::instrument(skip_all)]
async fn health_status(
    State(store): State<SharedRecordStore>,
    State(health_cache): State<HealthCache>,
) -> Result<(StatusCode, Json<MonitorStatus>)> {
    let is_healthy = health_cache.is_healthy(store.as_ref()).await;

    let status_code = if is_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    tracing::debug!(
        target: TRACING_TARGET,
        is_healthy,
        status_code = status_code.as_u16(),
        "health status response prepared"
    );

    Ok((status_code, Json(MonitorStatus::new(is_healthy))))
}

fn health_status_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get health status")
        .description("Reports whether the record store is reachable. Probes are cached briefly.")
        .response::<200, Json<MonitorStatus>>()
        .response::<503, Json<MonitorStatus>>()
}

/// Returns a [`Router`] with all health monitoring routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/health", get_with(health_status, health_status_docs))
        .with_path_items(|item| item.tag("Monitors"))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;
    use crate::handler::test::{TestContext, create_test_server_with_router};

    #[tokio::test]
    async fn healthy_store() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        let response = server.get("/health").await;
        response.assert_status_ok();

        let status = response.json::<MonitorStatus>();
        assert!(status.is_healthy);
        assert_eq!(status.version, env!("CARGO_PKG_VERSION"));
        Ok(())
    }

    #[tokio::test]
    async fn unreachable_store() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;
        ctx.store.set_failing(true);

        let response = ctx.server.get("/health").await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        assert!(!response.json::<MonitorStatus>().is_healthy);
        Ok(())
    }
}
