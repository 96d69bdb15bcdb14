//! Error types for property resolution and resource loading.

use std::path::PathBuf;
use thiserror::Error;

/// A raw string could not be turned into the requested value type.
///
/// Always propagated to the caller. A conversion failure means the
/// environment or a declaration is misconfigured, not that a lookup missed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// The text is not a valid literal of the target type.
    #[error("Cannot convert '{value}' to {type_name}: {reason}")]
    InvalidValue {
        type_name: &'static str,
        value: String,
        reason: String,
    },

    /// The text is not a well-formed URL.
    #[error("Malformed URL '{value}': {reason}")]
    InvalidUrl { value: String, reason: String },

    /// No converter exists for the named type.
    #[error("Type {0} cannot be parsed")]
    UnsupportedType(String),
}

/// Errors raised by file and resource backed property sources.
#[derive(Error, Debug)]
pub enum PropError {
    /// A stored value failed conversion.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// A resource could not be located under any search root.
    #[error("Resource [{0}] not found")]
    ResourceMissing(String),

    /// Resource names must contain at least one non-whitespace character.
    #[error("Resource name cannot be empty")]
    InvalidResourceName,

    /// Reading a located file failed.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using `PropError`
pub type Result<T> = std::result::Result<T, PropError>;
