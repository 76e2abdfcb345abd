//! Parameter value binding handlers.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::http::StatusCode;
use buildpick_core::parameter::{ArtifactParameter, StringParameterValue};

use crate::extract::{Json, Path};
use crate::handler::Result;
use crate::handler::request::{BindValueRequest, ParameterPathParams};
use crate::handler::response::ErrorResponse;
use crate::service::ServiceState;

/// Tracing target for parameter operations.
const TRACING_TARGET: &str = "buildpick_server::handler::parameters";

/// Binds a submitted form object to a string parameter value.
#[tracing::instrument(skip_all, fields(parameter = %path_params.name))]
async fn bind_parameter_value(
    Path(path_params): Path<ParameterPathParams>,
    Json(request): Json<BindValueRequest>,
) -> Result<(StatusCode, Json<StringParameterValue>)> {
    tracing::debug!(target: TRACING_TARGET, "Binding parameter value");

    let parameter = ArtifactParameter::new(&path_params.name, &request.job_name);
    let value = parameter.bind_value(&request.submission)?;

    tracing::debug!(target: TRACING_TARGET, "Parameter value bound");
    Ok((StatusCode::OK, Json(value)))
}

fn bind_parameter_value_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Bind a parameter value")
        .description(
            "Binds a submitted form object (`{\"name\": ..., \"value\": ...}`) to \
             a plain string parameter value carrying the resolved artifact path.",
        )
        .response::<200, Json<StringParameterValue>>()
        .response::<400, Json<ErrorResponse>>()
}

/// The query-string value creation path, kept only to answer honestly that it
/// does not exist.
#[tracing::instrument(skip_all, fields(parameter = %path_params.name))]
async fn create_parameter_value(
    Path(path_params): Path<ParameterPathParams>,
) -> Result<(StatusCode, Json<StringParameterValue>)> {
    let parameter = ArtifactParameter::new(&path_params.name, "");
    let value = parameter.bind_from_query()?;
    Ok((StatusCode::OK, Json(value)))
}

fn create_parameter_value_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Create a parameter value from the query string")
        .description("Not implemented; artifact parameters only bind from a form submission.")
        .response::<501, Json<ErrorResponse>>()
}

/// Returns a [`Router`] with all parameter binding routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route(
            "/parameters/{name}/value",
            post_with(bind_parameter_value, bind_parameter_value_docs)
                .get_with(create_parameter_value, create_parameter_value_docs),
        )
        .with_path_items(|item| item.tag("Parameters"))
}
