//! CLI configuration management.
//!
//! This module defines the complete CLI configuration hierarchy:
//!
//! ```text
//! Cli
//! ├── server: ServerConfig    # Host, port, timeouts
//! ├── service: ServiceConfig  # Build-store data directory
//! └── openapi: OpenApiConfig  # Documentation paths
//! ```
//!
//! All configuration can be provided via CLI arguments or environment
//! variables. Use `--help` to see all available options.
//!
//! # Example
//!
//! ```bash
//! # Configure the store and server
//! buildpick --data-dir /var/lib/jobs --port 8080
//!
//! # Or via environment variables
//! BUILDPICK_DATA_DIR=/var/lib/jobs PORT=8080 buildpick
//! ```

mod server;

use std::process;

use anyhow::Context;
use buildpick_server::middleware::OpenApiConfig;
use buildpick_server::service::ServiceConfig;
use clap::Parser;
use serde::{Deserialize, Serialize};

pub use self::server::ServerConfig;

/// Tracing target for configuration events.
pub const TRACING_TARGET_CONFIG: &str = "buildpick_cli::config";

/// Complete CLI configuration.
///
/// Combines all configuration groups for the buildpick server:
/// - [`ServerConfig`]: Network binding and lifecycle timeouts
/// - [`ServiceConfig`]: The build-store data directory
/// - [`OpenApiConfig`]: OpenAPI and Scalar UI paths
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "buildpick")]
#[command(about = "Buildpick artifact parameter server")]
#[command(version)]
pub struct Cli {
    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// External build-store configuration.
    #[clap(flatten)]
    pub service: ServiceConfig,

    /// OpenAPI documentation paths.
    #[clap(flatten)]
    pub openapi: OpenApiConfig,
}

impl Cli {
    /// Loads environment variables from a `.env` file and parses CLI
    /// arguments.
    ///
    /// The `.env` file is loaded before clap parses arguments so its values
    /// are visible to clap's `env` fallbacks.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from a `.env` file if one exists.
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// Initializes tracing with environment-based filtering.
    pub fn init_tracing() {
        use tracing_subscriber::EnvFilter;
        use tracing_subscriber::layer::SubscriberExt;
        use tracing_subscriber::util::SubscriberInitExt;

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.server
            .validate()
            .context("invalid server configuration")?;
        Ok(())
    }

    /// Logs configuration at startup (no sensitive information).
    pub fn log(&self) {
        Self::log_build_info();
        self.server.log();

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            data_dir = %self.service.data_dir.display(),
            openapi_path = %self.openapi.open_api_json,
            scalar_path = %self.openapi.scalar_ui,
            "Store and documentation configuration"
        );
    }

    /// Logs build information at debug level.
    fn log_build_info() {
        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            "Build information"
        );
    }
}
