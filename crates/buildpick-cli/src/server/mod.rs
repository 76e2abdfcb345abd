//! HTTP server startup with lifecycle management.
//!
//! Binds the configured address, serves the router, and shuts down
//! gracefully on SIGINT or SIGTERM.

/// Tracing target for server startup events.
pub const TRACING_TARGET_STARTUP: &str = "buildpick_cli::server::startup";

/// Tracing target for server shutdown events.
pub const TRACING_TARGET_SHUTDOWN: &str = "buildpick_cli::server::shutdown";

mod error;
mod shutdown;

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

pub use self::error::{Result, ServerError};
use self::shutdown::shutdown_signal;
use crate::config::ServerConfig;

/// Starts the HTTP server with graceful shutdown.
///
/// This function validates the configuration, binds to the specified
/// address, and serves requests until a shutdown signal arrives.
///
/// # Errors
///
/// Returns an error if:
/// - Server configuration is invalid
/// - Cannot bind to the specified address/port
/// - Server encounters a fatal error during operation
pub async fn serve(app: Router, config: ServerConfig) -> Result<()> {
    if let Err(validation_error) = config.validate() {
        tracing::error!(
            target: TRACING_TARGET_STARTUP,
            error = %validation_error,
            "Invalid server configuration"
        );
        return Err(ServerError::InvalidConfig(validation_error.to_string()));
    }

    let server_addr = config.server_addr();
    let listener = match TcpListener::bind(server_addr).await {
        Ok(listener) => {
            tracing::info!(
                target: TRACING_TARGET_STARTUP,
                addr = %server_addr,
                "Successfully bound to address"
            );
            listener
        }
        Err(listener_err) => {
            let error = ServerError::Bind {
                address: server_addr.to_string(),
                source: listener_err,
            };
            log_failure(&error);
            return Err(error);
        }
    };

    tracing::info!(
        target: TRACING_TARGET_STARTUP,
        addr = %server_addr,
        "Server is ready and listening for connections"
    );

    if config.binds_to_all_interfaces() {
        tracing::warn!(
            target: TRACING_TARGET_STARTUP,
            "Server is bound to all interfaces. Ensure firewall rules are properly configured."
        );
    }

    let shutdown_signal = shutdown_signal(config.shutdown_timeout());
    let served = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal)
    .await;

    match served {
        Ok(()) => {
            tracing::info!(target: TRACING_TARGET_SHUTDOWN, "Server shut down gracefully");
            Ok(())
        }
        Err(serve_err) => {
            let error = ServerError::Runtime(serve_err);
            log_failure(&error);
            Err(error)
        }
    }
}

/// Logs a server failure together with its recovery suggestion, if any.
fn log_failure(error: &ServerError) {
    tracing::error!(
        target: TRACING_TARGET_SHUTDOWN,
        error = %error,
        "Server encountered an error"
    );

    if let Some(suggestion) = error.suggestion() {
        tracing::warn!(target: TRACING_TARGET_SHUTDOWN, suggestion, "Recovery suggestion");
    }
}
