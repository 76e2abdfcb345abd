//! Dropdown population handlers.
//!
//! Each endpoint returns a flat ordered array of strings for one dropdown of
//! the cascading job → build → artifact selection. Lookup failures are soft
//! here: an unknown job or build produces an empty dropdown, not an error
//! page. A syntactically invalid build number is a hard 400 in all cases.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use buildpick_core::{ArtifactPathResolver, ErrorKind as CoreErrorKind};

use crate::extract::{Json, Query};
use crate::handler::request::{
    ArtifactFillParams, BuildFillParams, JobFillParams, ValueFillParams,
};
use crate::handler::response::ErrorResponse;
use crate::handler::{Error, Result};
use crate::service::ServiceState;

/// Tracing target for fill operations.
const TRACING_TARGET: &str = "buildpick_server::handler::fills";

/// Converts lookup misses into an empty dropdown.
fn soften<T>(result: buildpick_core::Result<Vec<T>>) -> Result<Vec<T>> {
    match result {
        Ok(items) => Ok(items),
        Err(error) if error.kind() == CoreErrorKind::NotFound => {
            tracing::debug!(
                target: TRACING_TARGET,
                error = %error,
                "Lookup failed, returning empty dropdown"
            );
            Ok(Vec::new())
        }
        Err(error) => Err(Error::from(error)),
    }
}

/// Lists all jobs except the one the parameter belongs to.
#[tracing::instrument(skip_all, fields(exclude = %params.exclude))]
async fn fill_jobs(
    State(resolver): State<ArtifactPathResolver>,
    Query(params): Query<JobFillParams>,
) -> Result<(StatusCode, Json<Vec<String>>)> {
    tracing::debug!(target: TRACING_TARGET, "Filling job dropdown");

    let names = resolver.list_other_jobs(&params.exclude).await?;

    tracing::debug!(target: TRACING_TARGET, job_count = names.len(), "Job dropdown filled");
    Ok((StatusCode::OK, Json(names)))
}

fn fill_jobs_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List selectable jobs")
        .description("Returns all job names except the excluded one, for the job dropdown.")
        .response::<200, Json<Vec<String>>>()
        .response::<500, Json<ErrorResponse>>()
}

/// Lists the build numbers of the selected job, most recent first.
#[tracing::instrument(skip_all, fields(job = %params.job))]
async fn fill_builds(
    State(resolver): State<ArtifactPathResolver>,
    Query(params): Query<BuildFillParams>,
) -> Result<(StatusCode, Json<Vec<String>>)> {
    tracing::debug!(target: TRACING_TARGET, "Filling build dropdown");

    let numbers = soften(resolver.list_builds(&params.job).await)?;
    let items: Vec<String> = numbers.into_iter().map(|number| number.to_string()).collect();

    tracing::debug!(target: TRACING_TARGET, build_count = items.len(), "Build dropdown filled");
    Ok((StatusCode::OK, Json(items)))
}

fn fill_builds_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List builds of a job")
        .description(
            "Returns the build numbers of the selected job, most recent first, \
             as decimal strings. Unknown jobs yield an empty list.",
        )
        .response::<200, Json<Vec<String>>>()
        .response::<500, Json<ErrorResponse>>()
}

/// Lists the artifacts archived by the selected build.
#[tracing::instrument(skip_all, fields(job = %params.job, build = %params.build))]
async fn fill_artifacts(
    State(resolver): State<ArtifactPathResolver>,
    Query(params): Query<ArtifactFillParams>,
) -> Result<(StatusCode, Json<Vec<String>>)> {
    tracing::debug!(target: TRACING_TARGET, "Filling artifact dropdown");

    let items = soften(resolver.list_artifacts(&params.job, &params.build).await)?;

    tracing::debug!(
        target: TRACING_TARGET,
        artifact_count = items.len(),
        "Artifact dropdown filled"
    );
    Ok((StatusCode::OK, Json(items)))
}

fn fill_artifacts_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List artifacts of a build")
        .description(
            "Returns the relative names of the artifacts archived by the selected \
             build. An empty build selection or an unknown job/build yields an \
             empty list; a malformed build number is a hard 400.",
        )
        .response::<200, Json<Vec<String>>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<500, Json<ErrorResponse>>()
}

/// Resolves the selection to zero-or-one absolute artifact paths.
#[tracing::instrument(skip_all, fields(job = %params.job, build = %params.build))]
async fn fill_value(
    State(resolver): State<ArtifactPathResolver>,
    Query(params): Query<ValueFillParams>,
) -> Result<(StatusCode, Json<Vec<String>>)> {
    tracing::debug!(target: TRACING_TARGET, "Filling resolved value");

    let entries = match resolver
        .resolve(&params.job, &params.build, &params.artifact)
        .await
    {
        Ok(Some(path)) => vec![path.into_string()],
        Ok(None) => Vec::new(),
        Err(error) if error.kind() == CoreErrorKind::NotFound => {
            tracing::debug!(
                target: TRACING_TARGET,
                error = %error,
                "Lookup failed, returning empty value fill"
            );
            Vec::new()
        }
        Err(error) => return Err(Error::from(error)),
    };

    Ok((StatusCode::OK, Json(entries)))
}

fn fill_value_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Resolve the selected artifact")
        .description(
            "Returns the absolute path of the selected artifact as a single-entry \
             list, or an empty list while the selection is incomplete or the \
             job/build cannot be found. A malformed build number is a hard 400.",
        )
        .response::<200, Json<Vec<String>>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<500, Json<ErrorResponse>>()
}

/// Returns a [`Router`] with all dropdown fill routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/fills/jobs", get_with(fill_jobs, fill_jobs_docs))
        .api_route("/fills/builds", get_with(fill_builds, fill_builds_docs))
        .api_route(
            "/fills/artifacts",
            get_with(fill_artifacts, fill_artifacts_docs),
        )
        .api_route("/fills/value", get_with(fill_value, fill_value_docs))
        .with_path_items(|item| item.tag("Fills"))
}
