//! Error types for the lifecycle engine
//!
//! Precondition failures (`NotFound`, `AlreadyExists`, `InvalidOperation`,
//! `NoActiveSpec`, `NotInitialized`) are raised before any file is written.
//! I/O failures are propagated as-is; nothing is retried or rolled back.

use specsmith_doc::DocError;
use std::path::PathBuf;

/// Main engine error type
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    /// Referenced spec has no document
    #[error("spec not found: {id}")]
    NotFound {
        /// Requested id
        id: String,
    },

    /// A spec with this id already exists
    #[error("spec '{id}' already exists")]
    AlreadyExists {
        /// Conflicting id
        id: String,
    },

    /// Operation not allowed in the current state
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// No id given and the active pointer is empty
    #[error("no active spec")]
    NoActiveSpec,

    /// Project has no `.specs/` directory
    #[error(".specs/ not found in {}; run `specsmith init` first", path.display())]
    NotInitialized {
        /// Project root that was searched
        path: PathBuf,
    },

    /// Filesystem failure
    #[error("io error at {}: {source}", path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Unreadable configuration file
    #[error("config error: {0}")]
    Config(String),

    /// Document could not be rendered
    #[error("document error: {0}")]
    Document(#[from] DocError),
}

impl SpecError {
    /// Create not-found error
    #[inline]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create IO error for path
    #[inline]
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Refusal to complete a spec with unchecked tasks
    #[must_use]
    pub fn tasks_remaining(id: &str, remaining: usize) -> Self {
        Self::InvalidOperation(format!(
            "'{id}' has {remaining} task(s) not completed; use --force to complete anyway"
        ))
    }

    /// Check if error is a missing spec
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if error is a document that is not valid UTF-8
    #[inline]
    #[must_use]
    pub fn is_invalid_data(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::InvalidData)
    }

    /// Check if error was raised before any mutation
    #[inline]
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::AlreadyExists { .. }
                | Self::InvalidOperation(_)
                | Self::NoActiveSpec
                | Self::NotInitialized { .. }
        )
    }
}

/// Result type alias for engine operations
pub type SpecResult<T> = Result<T, SpecError>;
