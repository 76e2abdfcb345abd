//! Resolution of a (job, build, artifact) selection to an absolute path.

use std::sync::Arc;

use crate::TRACING_TARGET_RESOLVER;
use crate::error::Result;
use crate::store::BuildStore;
use crate::types::{BuildNumber, ResolvedArtifactPath};

/// Resolves artifact selections against an injected [`BuildStore`].
///
/// The resolver owns no data and keeps no state between calls; every
/// operation is a read-only query against the store it was constructed with.
/// Callers pass the selected job name into each call explicitly.
///
/// Cloning is cheap; the store is shared behind an `Arc`.
#[derive(Clone)]
pub struct ArtifactPathResolver {
    store: Arc<dyn BuildStore>,
}

impl ArtifactPathResolver {
    /// Creates a resolver backed by the given build-store.
    pub fn new(store: Arc<dyn BuildStore>) -> Self {
        Self { store }
    }

    /// Returns the build-store this resolver queries.
    pub fn store(&self) -> Arc<dyn BuildStore> {
        Arc::clone(&self.store)
    }

    /// Resolves an artifact selection to its absolute path.
    ///
    /// The path is formed by concatenating the build's artifact root
    /// directory, `/`, and `artifact_name`, without normalization or an
    /// existence check; the artifact name is assumed to come from a prior
    /// [`list_artifacts`] call against the same store.
    ///
    /// An empty `build_number` or `artifact_name` means nothing has been
    /// selected yet and yields `Ok(None)` rather than an error.
    ///
    /// # Errors
    ///
    /// - [`InvalidArgument`] when `build_number` is not a positive integer.
    /// - [`NotFound`] when the job or the build does not exist.
    ///
    /// [`list_artifacts`]: Self::list_artifacts
    /// [`InvalidArgument`]: crate::ErrorKind::InvalidArgument
    /// [`NotFound`]: crate::ErrorKind::NotFound
    pub async fn resolve(
        &self,
        job_name: &str,
        build_number: &str,
        artifact_name: &str,
    ) -> Result<Option<ResolvedArtifactPath>> {
        if build_number.is_empty() || artifact_name.is_empty() {
            tracing::debug!(
                target: TRACING_TARGET_RESOLVER,
                job = job_name,
                "no build or artifact selected yet"
            );
            return Ok(None);
        }

        let number: BuildNumber = build_number.parse()?;
        let job = self.store.job(job_name).await?;
        let build = self.store.build(&job, number).await?;
        let root = self.store.artifact_root(&build).await?;
        let path = ResolvedArtifactPath::from_root(&root, artifact_name);

        tracing::debug!(
            target: TRACING_TARGET_RESOLVER,
            job = job_name,
            build = %number,
            path = %path,
            "resolved artifact path"
        );

        Ok(Some(path))
    }

    /// Lists all job names except `excluding`.
    ///
    /// Used to populate the job dropdown without offering the job the
    /// parameter belongs to.
    pub async fn list_other_jobs(&self, excluding: &str) -> Result<Vec<String>> {
        let mut names = self.store.job_names().await?;
        names.retain(|name| name != excluding);
        Ok(names)
    }

    /// Lists the build numbers of a job, most recent first.
    pub async fn list_builds(&self, job_name: &str) -> Result<Vec<BuildNumber>> {
        let job = self.store.job(job_name).await?;
        let builds = self.store.builds(&job).await?;
        Ok(builds.iter().map(|build| build.number()).collect())
    }

    /// Lists the relative artifact names archived by one build.
    ///
    /// An empty `build_number` means no build has been selected yet and
    /// yields an empty list. A malformed one is a hard error, matching
    /// [`resolve`].
    ///
    /// [`resolve`]: Self::resolve
    pub async fn list_artifacts(&self, job_name: &str, build_number: &str) -> Result<Vec<String>> {
        if build_number.is_empty() {
            return Ok(Vec::new());
        }

        let number: BuildNumber = build_number.parse()?;
        let job = self.store.job(job_name).await?;
        let build = self.store.build(&job, number).await?;
        self.store.archived_artifacts(&build).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::store::MemoryBuildStore;

    fn resolver() -> ArtifactPathResolver {
        let store = MemoryBuildStore::new()
            .with_job("this-job")
            .with_build(
                "build-app",
                42,
                "/data/jobs/build-app/builds/42/archive",
                ["dist/app.jar", "logs/out.txt"],
            )
            .with_build("build-app", 7, "/data/jobs/build-app/builds/7/archive", ["old.jar"]);
        ArtifactPathResolver::new(Arc::new(store))
    }

    #[tokio::test]
    async fn resolve_concatenates_root_and_name() {
        let resolver = resolver();
        let path = resolver
            .resolve("build-app", "42", "dist/app.jar")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            path.as_str(),
            "/data/jobs/build-app/builds/42/archive/dist/app.jar"
        );
    }

    #[tokio::test]
    async fn resolve_is_idempotent() {
        let resolver = resolver();
        let first = resolver.resolve("build-app", "42", "dist/app.jar").await.unwrap();
        let second = resolver.resolve("build-app", "42", "dist/app.jar").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn resolve_rejects_non_numeric_build() {
        let resolver = resolver();
        let error = resolver
            .resolve("build-app", "abc", "dist/app.jar")
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidArgument);
    }

    #[tokio::test]
    async fn resolve_reports_missing_build_and_job() {
        let resolver = resolver();

        let error = resolver
            .resolve("build-app", "99", "dist/app.jar")
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NotFound);

        let error = resolver
            .resolve("ghost", "1", "dist/app.jar")
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn resolve_treats_empty_selection_as_none() {
        let resolver = resolver();
        assert!(resolver.resolve("build-app", "42", "").await.unwrap().is_none());
        assert!(resolver.resolve("build-app", "", "dist/app.jar").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn other_jobs_never_include_the_excluded_one() {
        let resolver = resolver();
        let names = resolver.list_other_jobs("this-job").await.unwrap();
        assert_eq!(names, ["build-app"]);

        let names = resolver.list_other_jobs("unrelated").await.unwrap();
        assert_eq!(names, ["build-app", "this-job"]);
    }

    #[tokio::test]
    async fn builds_are_listed_most_recent_first() {
        let resolver = resolver();
        let numbers: Vec<u32> = resolver
            .list_builds("build-app")
            .await
            .unwrap()
            .iter()
            .map(|number| number.get())
            .collect();
        assert_eq!(numbers, [42, 7]);
    }

    #[tokio::test]
    async fn artifacts_follow_build_selection() {
        let resolver = resolver();

        assert_eq!(
            resolver.list_artifacts("build-app", "42").await.unwrap(),
            ["dist/app.jar", "logs/out.txt"]
        );
        assert!(resolver.list_artifacts("build-app", "").await.unwrap().is_empty());

        let error = resolver.list_artifacts("build-app", "abc").await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidArgument);

        let error = resolver.list_artifacts("ghost", "1").await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }
}
