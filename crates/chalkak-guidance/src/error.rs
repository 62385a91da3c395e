//! Error types for guidance operations.

use thiserror::Error;

/// Result type for guidance operations.
pub type GuidanceResult<T> = Result<T, GuidanceError>;

/// Errors raised while installing a reference or building the engine.
///
/// Per-frame operations never fail; a missing reference or empty detection
/// set is reported through the alignment state instead.
#[derive(Debug, Error)]
pub enum GuidanceError {
    #[error("Invalid guide: {0}")]
    InvalidGuide(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GuidanceError {
    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

impl From<validator::ValidationErrors> for GuidanceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::InvalidGuide(errors.to_string())
    }
}
