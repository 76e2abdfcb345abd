//! In-memory build-store for tests and embedders.
//!
//! The store is populated up front with a `with_*` builder and never mutated
//! afterwards, which keeps it trivially safe to share behind an `Arc`.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::store::BuildStore;
use crate::types::{BuildNumber, BuildRef, JobRef};

/// Deterministic fixture implementation of [`BuildStore`].
///
/// Job names are kept in lexicographic order; builds of a job are listed
/// most recent first.
///
/// # Example
///
/// ```rust
/// use buildpick_core::store::MemoryBuildStore;
///
/// let store = MemoryBuildStore::new()
///     .with_job("deploy")
///     .with_build(
///         "build-app",
///         42,
///         "/data/jobs/build-app/builds/42/archive",
///         ["dist/app.jar", "logs/out.txt"],
///     );
/// ```
#[derive(Debug, Default, Clone)]
pub struct MemoryBuildStore {
    jobs: BTreeMap<String, JobEntry>,
}

#[derive(Debug, Default, Clone)]
struct JobEntry {
    builds: BTreeMap<u32, BuildEntry>,
}

#[derive(Debug, Clone)]
struct BuildEntry {
    artifact_root: PathBuf,
    artifacts: Vec<String>,
}

impl MemoryBuildStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a job with no builds.
    pub fn with_job(mut self, name: impl Into<String>) -> Self {
        self.jobs.entry(name.into()).or_default();
        self
    }

    /// Adds a build with its artifact root and archived artifact names,
    /// creating the job if needed.
    pub fn with_build<I, S>(
        mut self,
        job: impl Into<String>,
        number: u32,
        artifact_root: impl Into<PathBuf>,
        artifacts: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entry = BuildEntry {
            artifact_root: artifact_root.into(),
            artifacts: artifacts.into_iter().map(Into::into).collect(),
        };
        self.jobs
            .entry(job.into())
            .or_default()
            .builds
            .insert(number, entry);
        self
    }

    fn job_entry(&self, name: &str) -> Result<&JobEntry> {
        self.jobs
            .get(name)
            .ok_or_else(|| Error::not_found().with_message(format!("job {name:?} does not exist")))
    }

    fn build_entry(&self, job_name: &str, number: BuildNumber) -> Result<&BuildEntry> {
        self.job_entry(job_name)?
            .builds
            .get(&number.get())
            .ok_or_else(|| {
                Error::not_found()
                    .with_message(format!("build {number} of job {job_name:?} does not exist"))
            })
    }
}

#[async_trait]
impl BuildStore for MemoryBuildStore {
    async fn job(&self, name: &str) -> Result<JobRef> {
        self.job_entry(name)?;
        Ok(JobRef::new(name))
    }

    async fn job_names(&self) -> Result<Vec<String>> {
        Ok(self.jobs.keys().cloned().collect())
    }

    async fn build(&self, job: &JobRef, number: BuildNumber) -> Result<BuildRef> {
        self.build_entry(job.name(), number)?;
        Ok(BuildRef::new(job, number))
    }

    async fn builds(&self, job: &JobRef) -> Result<Vec<BuildRef>> {
        let entry = self.job_entry(job.name())?;
        Ok(entry
            .builds
            .keys()
            .rev()
            .filter_map(|number| BuildNumber::try_from(*number).ok())
            .map(|number| BuildRef::new(job, number))
            .collect())
    }

    async fn archived_artifacts(&self, build: &BuildRef) -> Result<Vec<String>> {
        let entry = self.build_entry(build.job_name(), build.number())?;
        Ok(entry.artifacts.clone())
    }

    async fn artifact_root(&self, build: &BuildRef) -> Result<PathBuf> {
        let entry = self.build_entry(build.job_name(), build.number())?;
        Ok(entry.artifact_root.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn sample_store() -> MemoryBuildStore {
        MemoryBuildStore::new()
            .with_job("idle")
            .with_build("build-app", 41, "/data/jobs/build-app/builds/41/archive", ["old.jar"])
            .with_build(
                "build-app",
                42,
                "/data/jobs/build-app/builds/42/archive",
                ["dist/app.jar", "logs/out.txt"],
            )
    }

    #[tokio::test]
    async fn job_names_are_sorted() {
        let store = sample_store();
        assert_eq!(store.job_names().await.unwrap(), ["build-app", "idle"]);
    }

    #[tokio::test]
    async fn unknown_job_is_not_found() {
        let store = sample_store();
        let error = store.job("nope").await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn builds_are_most_recent_first() {
        let store = sample_store();
        let job = store.job("build-app").await.unwrap();
        let numbers: Vec<u32> = store
            .builds(&job)
            .await
            .unwrap()
            .iter()
            .map(|build| build.number().get())
            .collect();
        assert_eq!(numbers, [42, 41]);
    }

    #[tokio::test]
    async fn job_without_builds_yields_empty_list() {
        let store = sample_store();
        let job = store.job("idle").await.unwrap();
        assert!(store.builds(&job).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn artifacts_and_root_round_trip() {
        let store = sample_store();
        let job = store.job("build-app").await.unwrap();
        let build = store
            .build(&job, BuildNumber::try_from(42).unwrap())
            .await
            .unwrap();

        assert_eq!(
            store.archived_artifacts(&build).await.unwrap(),
            ["dist/app.jar", "logs/out.txt"]
        );
        assert_eq!(
            store.artifact_root(&build).await.unwrap(),
            PathBuf::from("/data/jobs/build-app/builds/42/archive")
        );
    }

    #[tokio::test]
    async fn missing_build_is_not_found() {
        let store = sample_store();
        let job = store.job("build-app").await.unwrap();
        let error = store
            .build(&job, BuildNumber::try_from(99).unwrap())
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }
}
