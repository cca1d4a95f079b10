//! Error types for march configuration.

use thiserror::Error;

/// Errors that can occur when validating march settings.
#[derive(Error, Debug)]
pub enum MarchError {
    /// Settings that cannot drive a terminating march.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

/// Result type for march configuration.
pub type Result<T> = std::result::Result<T, MarchError>;
