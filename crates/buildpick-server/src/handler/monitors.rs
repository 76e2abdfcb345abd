//! System health monitoring handlers.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use buildpick_core::ArtifactPathResolver;
use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::extract::Json;
use crate::handler::Result;
use crate::handler::response::ErrorResponse;
use crate::service::ServiceState;

/// Tracing target for monitor operations.
const TRACING_TARGET: &str = "buildpick_server::handler::monitors";

/// Response type for the health check.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Whether the build-store answered the probe.
    pub is_healthy: bool,
    /// When the probe ran.
    pub updated_at: Timestamp,
}

/// Reports liveness and whether the build-store is readable.
#[tracing::instrument(skip_all)]
async fn health_status(
    State(resolver): State<ArtifactPathResolver>,
) -> Result<(StatusCode, Json<HealthResponse>)> {
    let is_healthy = match resolver.store().job_names().await {
        Ok(_) => true,
        Err(error) => {
            tracing::warn!(
                target: TRACING_TARGET,
                error = %error,
                "Build-store probe failed"
            );
            false
        }
    };

    let response = HealthResponse {
        is_healthy,
        updated_at: Timestamp::now(),
    };

    let status_code = if is_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    tracing::debug!(
        target: TRACING_TARGET,
        is_healthy,
        status_code = status_code.as_u16(),
        "Health status response prepared"
    );

    Ok((status_code, Json(response)))
}

fn health_status_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get system health status")
        .description("Returns liveness plus a build-store readability probe.")
        .response::<200, Json<HealthResponse>>()
        .response::<503, Json<HealthResponse>>()
        .response::<500, Json<ErrorResponse>>()
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
