//! Error types for the strata library.
//!
//! This module provides the error hierarchy for document loading, validation,
//! and merging, using `thiserror` for ergonomic error handling.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::node::NodeKind;

/// Result type alias for operations that may fail with a strata error.
///
/// # Examples
///
/// ```
/// use strata::{Error, Result};
///
/// fn example_operation() -> Result<String> {
///     Ok("production".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Identifies which document in a merge an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentRole {
    /// The base document (lowest precedence).
    Base,
    /// An overlay document, by zero-based position in the overlay list.
    Overlay(usize),
}

impl fmt::Display for DocumentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => write!(f, "base"),
            Self::Overlay(index) => write!(f, "overlay {index}"),
        }
    }
}

/// The main error type for the strata library.
#[derive(Debug, Error)]
pub enum Error {
    /// A document root was not a mapping.
    ///
    /// Merging requires every participating document to be a mapping at the
    /// root; this error aborts the merge immediately.
    #[error("non-mapping root: {role} document is a {kind}, expected a mapping")]
    NonMappingRoot {
        /// Which document had the bad root.
        role: DocumentRole,
        /// The kind actually found at the root.
        kind: NodeKind,
    },

    /// A YAML document could not be parsed.
    #[error("configuration error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A JSON document could not be parsed or serialized.
    #[error("JSON configuration error: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field or path that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },
}

impl Error {
    /// Check if this error is a non-mapping root failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata::{DocumentRole, Error, NodeKind};
    ///
    /// let err = Error::NonMappingRoot {
    ///     role: DocumentRole::Base,
    ///     kind: NodeKind::Sequence,
    /// };
    /// assert!(err.is_non_mapping_root());
    /// ```
    #[must_use]
    pub const fn is_non_mapping_root(&self) -> bool {
        matches!(self, Self::NonMappingRoot { .. })
    }

    /// Check if this error is a validation failure.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
