//! Application state and dependency injection.

use std::path::PathBuf;
use std::sync::Arc;

use buildpick_core::store::{BuildStore, DirBuildStore};
use buildpick_core::{ArtifactPathResolver, Result};
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// External build-store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct ServiceConfig {
    /// Root directory of the build archive layout
    /// (`<root>/<job>/builds/<number>/archive`).
    #[cfg_attr(
        feature = "config",
        arg(long, env = "BUILDPICK_DATA_DIR", default_value = "./data/jobs")
    )]
    pub data_dir: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data/jobs"),
        }
    }
}

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Clone)]
pub struct ServiceState {
    pub resolver: ArtifactPathResolver,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// Opens the directory build-store under the configured data directory.
    pub async fn from_config(config: &ServiceConfig) -> Result<Self> {
        let store = DirBuildStore::open(&config.data_dir).await?;
        Ok(Self::with_store(Arc::new(store)))
    }

    /// Creates application state over any injected build-store.
    pub fn with_store(store: Arc<dyn BuildStore>) -> Self {
        Self {
            resolver: ArtifactPathResolver::new(store),
        }
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(resolver: ArtifactPathResolver);
