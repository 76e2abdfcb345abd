//! Common error type definitions.

use strum::{AsRefStr, IntoStaticStr};
use thiserror::Error as ThisError;

/// Type alias for boxed dynamic errors that can be sent across threads.
///
/// This type is commonly used as a source error in structured error types,
/// providing a way to wrap any error that implements the standard `Error`
/// trait while maintaining Send and Sync bounds for multi-threaded contexts.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Categories of errors that can occur in buildpick-core operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// A caller-supplied value is malformed (for example a build number that
    /// is not a positive integer).
    InvalidArgument,
    /// The requested job or build does not exist in the build-store.
    NotFound,
    /// The operation is intentionally not implemented.
    Unsupported,
    /// The build-store itself failed (filesystem or backend error).
    Store,
}

/// A structured error type for buildpick-core operations.
#[derive(Debug, ThisError)]
#[error("{kind:?}{}", message.as_ref().map(|m| format!(": {}", m)).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional error message.
    pub message: Option<String>,
    /// Optional source error.
    #[source]
    pub source: Option<BoxedError>,
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            source: None,
        }
    }

    /// Adds a message to this error.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Adds a source error to this error.
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Creates a new invalid argument error.
    pub fn invalid_argument() -> Self {
        Self::new(ErrorKind::InvalidArgument)
    }

    /// Creates a new not found error.
    pub fn not_found() -> Self {
        Self::new(ErrorKind::NotFound)
    }

    /// Creates a new unsupported error.
    pub fn unsupported() -> Self {
        Self::new(ErrorKind::Unsupported)
    }

    /// Creates a new store error.
    pub fn store() -> Self {
        Self::new(ErrorKind::Store)
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error kind as a string.
    pub fn kind_str(&self) -> &'static str {
        self.kind.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_strings_are_snake_case() {
        assert_eq!(Error::invalid_argument().kind_str(), "invalid_argument");
        assert_eq!(Error::not_found().kind_str(), "not_found");
        assert_eq!(Error::unsupported().kind_str(), "unsupported");
        assert_eq!(Error::store().kind_str(), "store");
    }

    #[test]
    fn message_shows_up_in_display() {
        let error = Error::not_found().with_message("job \"deploy\" does not exist");
        let display = error.to_string();
        assert!(display.contains("NotFound"));
        assert!(display.contains("deploy"));
    }

    #[test]
    fn source_is_preserved() {
        let io_error = std::io::Error::other("disk on fire");
        let error = Error::store().with_source(io_error);
        assert!(std::error::Error::source(&error).is_some());
    }
}
