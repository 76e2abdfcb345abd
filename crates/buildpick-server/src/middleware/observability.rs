//! Request observability middleware.

use std::time::Duration;

use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Extension trait for [`Router`] to add request tracing and timeouts.
pub trait RouterObservabilityExt {
    /// Adds an HTTP trace span per request and a request timeout.
    ///
    /// Requests exceeding the timeout are terminated with `408 Request
    /// Timeout`.
    fn with_observability(self, request_timeout: Duration) -> Self;
}

impl RouterObservabilityExt for Router {
    fn with_observability(self, request_timeout: Duration) -> Self {
        self.layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(request_timeout))
    }
}
