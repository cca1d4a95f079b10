//! Error types for camera construction.

use thiserror::Error;

/// Errors that can occur when building a camera.
#[derive(Error, Debug)]
pub enum CameraError {
    /// Aperture half-angle outside the usable range.
    #[error("aperture angle must be in (0, pi/2) radians, got {0}")]
    InvalidAperture(f64),

    /// Screen with a zero dimension.
    #[error("screen dimensions must be non-zero, got {0}x{1}")]
    EmptyScreen(u32, u32),
}

/// Result type for camera operations.
pub type Result<T> = std::result::Result<T, CameraError>;
