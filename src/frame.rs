//! Video frames and the camera boundary.
//!
//! The engine never talks to a device directly. Hosts implement
//! [`FrameSource`] over whatever capture API they have; the engine owns the
//! stream lifecycle and calls `stop` on every exit path.

use crate::{config::CameraConfig, error::CameraError, Error, Result};
use image::{Rgba, RgbaImage};
use std::time::Instant;

/// One captured video frame
#[derive(Debug, Clone)]
pub struct Frame {
    pub image: RgbaImage,
    pub captured_at: Instant,
}

impl Frame {
    #[must_use]
    pub const fn new(image: RgbaImage, captured_at: Instant) -> Self {
        Self { image, captured_at }
    }

    /// Wrap raw RGBA bytes
    ///
    /// # Errors
    ///
    /// Returns `Error::Image` when the buffer length does not match the dimensions
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>, captured_at: Instant) -> Result<Self> {
        let len = data.len();
        let image = RgbaImage::from_raw(width, height, data).ok_or_else(|| {
            Error::Image(format!("RGBA buffer of {len} bytes does not fit {width}x{height}"))
        })?;
        Ok(Self::new(image, captured_at))
    }

    /// A frame filled with a single color
    #[must_use]
    pub fn solid(width: u32, height: u32, rgb: [u8; 3], captured_at: Instant) -> Self {
        let pixel = Rgba([rgb[0], rgb[1], rgb[2], 255]);
        Self::new(RgbaImage::from_pixel(width, height, pixel), captured_at)
    }

    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

/// Description of a started stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamHandle {
    pub id: u64,
    pub width: u32,
    pub height: u32,
}

/// What the engine asks the camera for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraRequest {
    pub ideal_width: u32,
    pub ideal_height: u32,
    pub user_facing: bool,
}

impl From<&CameraConfig> for CameraRequest {
    fn from(config: &CameraConfig) -> Self {
        Self {
            ideal_width: config.width,
            ideal_height: config.height,
            user_facing: config.user_facing,
        }
    }
}

/// Host-provided camera
pub trait FrameSource {
    /// Acquire the device and begin streaming. May block on a permission prompt.
    fn start(&mut self, request: &CameraRequest) -> std::result::Result<StreamHandle, CameraError>;

    /// Release the device and any partially acquired stream. Must be idempotent.
    fn stop(&mut self);

    /// Latest frame, if one is ready
    fn current_frame(&mut self) -> Option<Frame>;

    /// Retry playback of an acquired stream after a user interaction
    /// (autoplay policies). Sources that never block playback can keep the default.
    fn resume_playback(&mut self) -> std::result::Result<StreamHandle, CameraError> {
        Err(CameraError::PlaybackBlocked)
    }
}
