//! Router middleware: OpenAPI documentation and request observability.

mod observability;
mod specification;

pub use self::observability::RouterObservabilityExt;
pub use self::specification::{OpenApiConfig, RouterOpenApiExt};
