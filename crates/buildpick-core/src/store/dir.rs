//! Read-only build-store over an on-disk build archive layout.
//!
//! The expected layout is the host's archive convention:
//!
//! ```text
//! <root>/<job>/builds/<number>/archive/<artifact...>
//! ```
//!
//! This is an adapter over an existing directory tree, not a storage engine:
//! it never writes, and it reports whatever is on disk at call time.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::TRACING_TARGET_STORE;
use crate::error::{Error, Result};
use crate::store::BuildStore;
use crate::types::{BuildNumber, BuildRef, JobRef};

/// Directory name holding the numbered builds of a job.
const BUILDS_DIR: &str = "builds";

/// Directory name holding a build's archived artifacts.
const ARCHIVE_DIR: &str = "archive";

/// Filesystem-backed implementation of [`BuildStore`].
#[derive(Debug, Clone)]
pub struct DirBuildStore {
    root: PathBuf,
}

impl DirBuildStore {
    /// Opens a build-store rooted at the given directory.
    ///
    /// The root is canonicalized up front so every artifact root reported by
    /// this store is an absolute path.
    ///
    /// # Errors
    ///
    /// Fails with a store error when the directory does not exist or cannot
    /// be resolved.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let root = fs::canonicalize(&root).await.map_err(|err| {
            Error::store()
                .with_message(format!("cannot open build store at {}", root.display()))
                .with_source(err)
        })?;

        tracing::debug!(
            target: TRACING_TARGET_STORE,
            root = %root.display(),
            "opened directory build store"
        );

        Ok(Self { root })
    }

    /// Returns the canonical root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn job_dir(&self, name: &str) -> Result<PathBuf> {
        validate_job_name(name)?;
        Ok(self.root.join(name))
    }

    fn build_dir(&self, job_name: &str, number: BuildNumber) -> Result<PathBuf> {
        Ok(self
            .job_dir(job_name)?
            .join(BUILDS_DIR)
            .join(number.to_string()))
    }
}

#[async_trait]
impl BuildStore for DirBuildStore {
    async fn job(&self, name: &str) -> Result<JobRef> {
        let dir = self.job_dir(name)?;
        if dir_exists(&dir).await? {
            Ok(JobRef::new(name))
        } else {
            Err(Error::not_found().with_message(format!("job {name:?} does not exist")))
        }
    }

    async fn job_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut entries = read_dir(&self.root).await?;
        while let Some(entry) = next_entry(&mut entries, &self.root).await? {
            if entry_is_dir(&entry, &self.root).await?
                && let Some(name) = entry.file_name().to_str()
            {
                names.push(name.to_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    async fn build(&self, job: &JobRef, number: BuildNumber) -> Result<BuildRef> {
        let dir = self.build_dir(job.name(), number)?;
        if dir_exists(&dir).await? {
            Ok(BuildRef::new(job, number))
        } else {
            Err(Error::not_found().with_message(format!(
                "build {number} of job {:?} does not exist",
                job.name()
            )))
        }
    }

    async fn builds(&self, job: &JobRef) -> Result<Vec<BuildRef>> {
        // The job itself must exist; an empty or missing builds directory
        // just means the job has not run yet.
        self.job(job.name()).await?;

        let dir = self.job_dir(job.name())?.join(BUILDS_DIR);
        if !dir_exists(&dir).await? {
            return Ok(Vec::new());
        }

        let mut numbers = Vec::new();
        let mut entries = read_dir(&dir).await?;
        while let Some(entry) = next_entry(&mut entries, &dir).await? {
            if entry_is_dir(&entry, &dir).await?
                && let Some(number) = entry
                    .file_name()
                    .to_str()
                    .and_then(|name| name.parse::<BuildNumber>().ok())
            {
                numbers.push(number);
            }
        }
        numbers.sort();
        numbers.reverse();

        Ok(numbers
            .into_iter()
            .map(|number| BuildRef::new(job, number))
            .collect())
    }

    async fn archived_artifacts(&self, build: &BuildRef) -> Result<Vec<String>> {
        let job = JobRef::new(build.job_name());
        self.build(&job, build.number()).await?;

        let archive = self.build_dir(build.job_name(), build.number())?.join(ARCHIVE_DIR);
        collect_relative_files(&archive).await
    }

    async fn artifact_root(&self, build: &BuildRef) -> Result<PathBuf> {
        let job = JobRef::new(build.job_name());
        self.build(&job, build.number()).await?;

        Ok(self
            .build_dir(build.job_name(), build.number())?
            .join(ARCHIVE_DIR))
    }
}

/// Rejects job names that would escape the store root.
///
/// Job directories are always direct children of the root; anything shaped
/// like a path is a caller bug, not a lookup miss.
fn validate_job_name(name: &str) -> Result<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(Error::invalid_argument()
            .with_message(format!("job name {name:?} is not a plain directory name")));
    }
    Ok(())
}

async fn dir_exists(path: &Path) -> Result<bool> {
    match fs::metadata(path).await {
        Ok(metadata) => Ok(metadata.is_dir()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(store_error(path, err)),
    }
}

async fn read_dir(path: &Path) -> Result<fs::ReadDir> {
    fs::read_dir(path).await.map_err(|err| store_error(path, err))
}

async fn next_entry(entries: &mut fs::ReadDir, dir: &Path) -> Result<Option<fs::DirEntry>> {
    entries.next_entry().await.map_err(|err| store_error(dir, err))
}

async fn entry_is_dir(entry: &fs::DirEntry, dir: &Path) -> Result<bool> {
    let file_type = entry.file_type().await.map_err(|err| store_error(dir, err))?;
    Ok(file_type.is_dir())
}

fn store_error(path: &Path, err: io::Error) -> Error {
    Error::store()
        .with_message(format!("cannot read {}", path.display()))
        .with_source(err)
}

/// Collects relative file names under `base`, recursively, with `/` as the
/// separator regardless of platform. A missing `base` yields an empty list.
async fn collect_relative_files(base: &Path) -> Result<Vec<String>> {
    if !dir_exists(base).await? {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    let mut pending = vec![base.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let mut entries = read_dir(&dir).await?;
        while let Some(entry) = next_entry(&mut entries, &dir).await? {
            let path = entry.path();
            if entry_is_dir(&entry, &dir).await? {
                pending.push(path);
            } else if let Ok(relative) = path.strip_prefix(base) {
                let name = relative
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                names.push(name);
            }
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    /// Lays out `<root>/<job>/builds/<number>/archive/<artifacts...>` in a
    /// temporary directory.
    fn scaffold(jobs: &[(&str, &[(u32, &[&str])])]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (job, builds) in jobs {
            let job_dir = dir.path().join(job);
            std::fs::create_dir_all(&job_dir).unwrap();
            for (number, artifacts) in *builds {
                let archive = job_dir
                    .join(BUILDS_DIR)
                    .join(number.to_string())
                    .join(ARCHIVE_DIR);
                std::fs::create_dir_all(&archive).unwrap();
                for artifact in *artifacts {
                    let path = archive.join(artifact);
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent).unwrap();
                    }
                    std::fs::write(path, b"artifact").unwrap();
                }
            }
        }
        dir
    }

    #[tokio::test]
    async fn open_rejects_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let error = DirBuildStore::open(missing).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Store);
    }

    #[tokio::test]
    async fn lists_jobs_builds_and_artifacts() {
        let dir = scaffold(&[
            (
                "build-app",
                &[
                    (41, &["old.jar"] as &[&str]),
                    (42, &["dist/app.jar", "logs/out.txt"]),
                ],
            ),
            ("deploy", &[]),
        ]);
        let store = DirBuildStore::open(dir.path()).await.unwrap();

        assert_eq!(store.job_names().await.unwrap(), ["build-app", "deploy"]);

        let job = store.job("build-app").await.unwrap();
        let numbers: Vec<u32> = store
            .builds(&job)
            .await
            .unwrap()
            .iter()
            .map(|build| build.number().get())
            .collect();
        assert_eq!(numbers, [42, 41]);

        let build = store
            .build(&job, BuildNumber::try_from(42).unwrap())
            .await
            .unwrap();
        assert_eq!(
            store.archived_artifacts(&build).await.unwrap(),
            ["dist/app.jar", "logs/out.txt"]
        );
    }

    #[tokio::test]
    async fn artifact_root_is_absolute() {
        let dir = scaffold(&[("build-app", &[(7, &["a.txt"] as &[&str])])]);
        let store = DirBuildStore::open(dir.path()).await.unwrap();

        let job = store.job("build-app").await.unwrap();
        let build = store
            .build(&job, BuildNumber::try_from(7).unwrap())
            .await
            .unwrap();
        let root = store.artifact_root(&build).await.unwrap();

        assert!(root.is_absolute());
        assert!(root.ends_with("build-app/builds/7/archive"));
    }

    #[tokio::test]
    async fn job_without_builds_directory_has_no_builds() {
        let dir = scaffold(&[("deploy", &[])]);
        let store = DirBuildStore::open(dir.path()).await.unwrap();

        let job = store.job("deploy").await.unwrap();
        assert!(store.builds(&job).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_archive_directory_means_no_artifacts() {
        let dir = scaffold(&[("build-app", &[])]);
        std::fs::create_dir_all(dir.path().join("build-app/builds/3")).unwrap();
        let store = DirBuildStore::open(dir.path()).await.unwrap();

        let job = store.job("build-app").await.unwrap();
        let build = store
            .build(&job, BuildNumber::try_from(3).unwrap())
            .await
            .unwrap();
        assert!(store.archived_artifacts(&build).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_job_and_build_are_not_found() {
        let dir = scaffold(&[("build-app", &[(1, &[] as &[&str])])]);
        let store = DirBuildStore::open(dir.path()).await.unwrap();

        let error = store.job("ghost").await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NotFound);

        let job = store.job("build-app").await.unwrap();
        let error = store
            .build(&job, BuildNumber::try_from(99).unwrap())
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn path_shaped_job_names_are_rejected() {
        let dir = scaffold(&[("build-app", &[])]);
        let store = DirBuildStore::open(dir.path()).await.unwrap();

        for name in ["../build-app", "a/b", "a\\b", "..", ""] {
            let error = store.job(name).await.unwrap_err();
            assert_eq!(error.kind(), ErrorKind::InvalidArgument, "name {name:?}");
        }
    }
}
