#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

//! # Buildpick Core
//!
//! This crate provides the foundational abstractions for artifact-pick
//! parameters: the [`BuildStore`] collaborator trait, the
//! [`ArtifactPathResolver`] that turns a (job, build, artifact) selection
//! into an absolute path, and the parameter value binding types. It does not
//! own jobs, builds, or artifacts; those belong to the external build-store.
//!
//! [`BuildStore`]: store::BuildStore

/// Tracing target for resolver operations.
pub const TRACING_TARGET_RESOLVER: &str = "buildpick_core::resolver";

/// Tracing target for build-store operations.
pub const TRACING_TARGET_STORE: &str = "buildpick_core::store";

/// Tracing target for parameter binding.
pub const TRACING_TARGET_PARAMETER: &str = "buildpick_core::parameter";

mod error;
mod types;

pub mod parameter;
pub mod resolver;
pub mod store;

// Re-export key types for convenience
pub use error::{BoxedError, Error, ErrorKind, Result};
pub use resolver::ArtifactPathResolver;
pub use types::{BuildNumber, BuildRef, JobRef, ResolvedArtifactPath};
