//! Errors raised while entering a scope.

use prop_core::ConversionError;
use thiserror::Error;

/// Scope lifecycle error type.
///
/// Both variants are configuration bugs rather than test failures: the host
/// should abort the test unit instead of reporting it as disabled.
#[derive(Debug, Error)]
pub enum ChecksError {
    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),

    #[error("Invalid declaration: {0}")]
    Declaration(String),
}

impl From<serde_json::Error> for ChecksError {
    fn from(e: serde_json::Error) -> Self {
        Self::Declaration(e.to_string())
    }
}

/// Result type for scope operations.
pub type Result<T> = std::result::Result<T, ChecksError>;
