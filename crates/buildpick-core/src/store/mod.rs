//! Build-store collaborator abstraction.
//!
//! The build-store owns jobs, builds, and archived artifacts; this crate only
//! queries it. Implementations are injected explicitly (an `Arc<dyn
//! BuildStore>` constructor argument) rather than looked up through any
//! process-wide registry.

mod dir;
mod memory;

use std::path::PathBuf;

use async_trait::async_trait;

pub use self::dir::DirBuildStore;
pub use self::memory::MemoryBuildStore;
use crate::error::Result;
use crate::types::{BuildNumber, BuildRef, JobRef};

/// Read-only registry of jobs, builds, and archived artifacts.
///
/// Every operation is a single-shot, stateless query. Implementations are
/// responsible for serializing their own concurrent access; callers hold no
/// locks and perform no writes through this trait.
#[async_trait]
pub trait BuildStore: Send + Sync {
    /// Looks up a job by name.
    ///
    /// Fails with [`NotFound`] when no such job exists.
    ///
    /// [`NotFound`]: crate::ErrorKind::NotFound
    async fn job(&self, name: &str) -> Result<JobRef>;

    /// Returns the names of all jobs in the store, in stable order.
    async fn job_names(&self) -> Result<Vec<String>>;

    /// Looks up a single build of a job.
    ///
    /// Fails with [`NotFound`] when the build does not exist.
    ///
    /// [`NotFound`]: crate::ErrorKind::NotFound
    async fn build(&self, job: &JobRef, number: BuildNumber) -> Result<BuildRef>;

    /// Returns all builds of a job, most recent first.
    ///
    /// A job that has not run yet yields an empty list.
    async fn builds(&self, job: &JobRef) -> Result<Vec<BuildRef>>;

    /// Returns the relative names of all artifacts archived by a build.
    ///
    /// A build that archived nothing yields an empty list.
    async fn archived_artifacts(&self, build: &BuildRef) -> Result<Vec<String>>;

    /// Returns the absolute directory holding the build's archived artifacts.
    async fn artifact_root(&self, build: &BuildRef) -> Result<PathBuf>;
}
