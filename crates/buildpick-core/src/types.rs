//! Domain identifiers shared across the workspace.
//!
//! All of these types are handles into the external build-store; none of
//! them carry any state of their own beyond identity.

use std::num::NonZeroU32;
use std::path::Path;
use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Name-based handle for a job owned by the external build-store.
///
/// A `JobRef` is only ever produced by a successful store lookup; holding one
/// means the job existed at lookup time, nothing more.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobRef {
    name: String,
}

impl JobRef {
    /// Creates a new job handle.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the job name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// One-based number of a single job execution.
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct BuildNumber(NonZeroU32);

impl BuildNumber {
    /// Creates a build number from a non-zero value.
    pub const fn new(number: NonZeroU32) -> Self {
        Self(number)
    }

    /// Returns the build number as a plain integer.
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl TryFrom<u32> for BuildNumber {
    type Error = Error;

    fn try_from(number: u32) -> Result<Self, Self::Error> {
        NonZeroU32::new(number).map(Self).ok_or_else(|| {
            Error::invalid_argument().with_message("build numbers start at one")
        })
    }
}

impl FromStr for BuildNumber {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        text.parse::<NonZeroU32>().map(Self).map_err(|err| {
            Error::invalid_argument()
                .with_message(format!("build number {text:?} is not a positive integer"))
                .with_source(err)
        })
    }
}

/// Identifies one execution of a job.
///
/// Immutable once created by the build-store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildRef {
    job_name: String,
    number: BuildNumber,
}

impl BuildRef {
    /// Creates a new build handle for the given job.
    pub fn new(job: &JobRef, number: BuildNumber) -> Self {
        Self {
            job_name: job.name().to_owned(),
            number,
        }
    }

    /// Returns the name of the job this build belongs to.
    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    /// Returns the build number.
    pub fn number(&self) -> BuildNumber {
        self.number
    }
}

/// Absolute path of an archived artifact, ready to be bound as a string
/// parameter value.
///
/// Formed by concatenating the build's artifact root directory, `/`, and the
/// artifact's relative name. The path is not normalized, escaped, or checked
/// for existence; the relative name is assumed to come from a prior
/// enumeration against the same store.
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedArtifactPath(String);

impl ResolvedArtifactPath {
    /// Joins an artifact root directory and a relative artifact name.
    pub(crate) fn from_root(root: &Path, artifact_name: &str) -> Self {
        Self(format!("{}/{}", root.display(), artifact_name))
    }

    /// Returns the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the path, returning the underlying string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for ResolvedArtifactPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn build_number_parses_positive_integers() {
        let number: BuildNumber = "42".parse().unwrap();
        assert_eq!(number.get(), 42);
        assert_eq!(number.to_string(), "42");
    }

    #[test]
    fn build_number_rejects_garbage() {
        for text in ["", "abc", "-1", "0", "4.2", "42 "] {
            let error = text.parse::<BuildNumber>().unwrap_err();
            assert_eq!(error.kind(), ErrorKind::InvalidArgument, "input {text:?}");
        }
    }

    #[test]
    fn build_number_rejects_zero_conversion() {
        assert!(BuildNumber::try_from(0).is_err());
        assert_eq!(BuildNumber::try_from(7).unwrap().get(), 7);
    }

    #[test]
    fn resolved_path_is_plain_concatenation() {
        let path = ResolvedArtifactPath::from_root(
            Path::new("/data/jobs/build-app/builds/42/archive"),
            "dist/app.jar",
        );
        assert_eq!(
            path.as_str(),
            "/data/jobs/build-app/builds/42/archive/dist/app.jar"
        );
    }

    #[test]
    fn build_ref_remembers_its_job() {
        let job = JobRef::new("deploy");
        let build = BuildRef::new(&job, BuildNumber::try_from(3).unwrap());
        assert_eq!(build.job_name(), "deploy");
        assert_eq!(build.number().get(), 3);
    }
}
