//! Error types for the gesture interaction engine.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// Camera could not be acquired or played back
    #[error("Camera error: {0}")]
    Camera(#[from] CameraError),

    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Pixel buffer could not be built or read
    #[error("Image error: {0}")]
    Image(String),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Landmark model failed to load (non-fatal, triggers motion fallback)
    #[error("Model load error: {0}")]
    ModelLoad(String),

    /// Landmark model failed on a single frame
    #[error("Estimation error: {0}")]
    Estimation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Device access failures surfaced to the user with a retry affordance.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraError {
    /// User or browser refused camera access
    #[error("camera permission denied")]
    PermissionDenied,

    /// No capture device is present
    #[error("no camera device found")]
    NoDevice,

    /// Stream exists but playback needs a user gesture first
    #[error("camera playback blocked until user interaction")]
    PlaybackBlocked,
}

/// User-facing action offered while the camera is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordance {
    /// Ask for camera permission again
    RetryPermission,
    /// Look for a device again
    RetryDevice,
    /// Tap to start playback of an already-acquired stream
    TapToPlay,
}

impl CameraError {
    /// The affordance the host should show for this failure
    #[must_use]
    pub const fn affordance(self) -> Affordance {
        match self {
            Self::PermissionDenied => Affordance::RetryPermission,
            Self::NoDevice => Affordance::RetryDevice,
            Self::PlaybackBlocked => Affordance::TapToPlay,
        }
    }
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
