//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! Routes are built as an aide [`ApiRouter`] so the OpenAPI document is
//! generated from the same definitions that serve traffic; see
//! [`RouterOpenApiExt`] for turning the result into a plain router with the
//! documentation endpoints attached.
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler
//! [`ApiRouter`]: aide::axum::ApiRouter
//! [`RouterOpenApiExt`]: crate::middleware::RouterOpenApiExt

mod error;
mod fills;
mod monitors;
mod parameters;
pub mod request;
mod response;

use aide::axum::ApiRouter;

pub use crate::handler::error::{Error, ErrorKind, Result};
pub use crate::handler::monitors::HealthResponse;
pub use crate::handler::response::ErrorResponse;
use crate::service::ServiceState;

/// Returns an [`ApiRouter`] with all API routes.
pub fn api_routes() -> ApiRouter<ServiceState> {
    ApiRouter::new()
        .merge(fills::routes())
        .merge(parameters::routes())
        .merge(monitors::routes())
}
