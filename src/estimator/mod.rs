//! Hand estimation backends.
//!
//! A landmark model is tried once at startup. If it loads, frames go through
//! [`MlHandEstimator`]; otherwise [`MotionFallbackEstimator`] diffs consecutive
//! frames into a [`MotionRegionMap`]. The choice never changes per frame.

/// Frame-differencing fallback
pub mod motion;

pub use motion::{motion_regions, MotionFallbackEstimator, MotionRegionMap};

use crate::{frame::Frame, landmarks::HandLandmarks, utils::run_with_timeout, Error, Result};
use log::{info, warn};
use std::time::Duration;

/// Output of one estimation pass
#[derive(Debug, Clone, PartialEq)]
pub enum Estimate {
    /// Zero or more detected hands
    Hands(Vec<HandLandmarks>),
    /// Region motion energy; `None` until a previous frame exists
    Motion(Option<MotionRegionMap>),
}

/// Any backend that turns a frame into an [`Estimate`]
pub trait HandEstimator: Send {
    /// Estimate hands or motion for one frame
    ///
    /// # Errors
    ///
    /// Transient backend failures; callers skip the frame
    fn estimate(&mut self, frame: &Frame) -> Result<Estimate>;

    /// Drop any per-stream state (previous frame, tracking)
    fn reset(&mut self) {}

    /// Backend name for logging
    fn name(&self) -> &str;
}

/// An external hand landmark model
pub trait LandmarkModel: Send {
    /// Detect hands in a frame, landmarks normalized to [0, 1]
    ///
    /// # Errors
    ///
    /// Model-specific inference failures
    fn estimate_hands(&mut self, frame: &Frame) -> Result<Vec<HandLandmarks>>;
}

/// Estimator backed by a loaded landmark model
pub struct MlHandEstimator {
    model: Box<dyn LandmarkModel>,
}

impl MlHandEstimator {
    #[must_use]
    pub fn new(model: Box<dyn LandmarkModel>) -> Self {
        Self { model }
    }
}

impl HandEstimator for MlHandEstimator {
    fn estimate(&mut self, frame: &Frame) -> Result<Estimate> {
        self.model.estimate_hands(frame).map(Estimate::Hands)
    }

    fn name(&self) -> &str {
        "MlHandEstimator"
    }
}

/// Which backend a session ended up with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimatorKind {
    Landmarks,
    MotionFallback,
}

/// Pick the backend once from the model load outcome. Load failures are
/// logged and absorbed; the motion fallback is always available.
pub fn select_estimator(load_result: Result<Box<dyn LandmarkModel>>) -> (Box<dyn HandEstimator>, EstimatorKind) {
    match load_result {
        Ok(model) => {
            info!("Landmark model loaded, using landmark estimation");
            (Box::new(MlHandEstimator::new(model)), EstimatorKind::Landmarks)
        }
        Err(e) => {
            warn!("Landmark model unavailable ({e}), using motion fallback");
            (Box::new(MotionFallbackEstimator::new()), EstimatorKind::MotionFallback)
        }
    }
}

/// Load a landmark model without blocking longer than `timeout`
///
/// # Errors
///
/// Returns the loader's error, or `ModelLoad` on timeout
pub fn load_model_with_timeout<F>(loader: F, timeout: Duration) -> Result<Box<dyn LandmarkModel>>
where
    F: FnOnce() -> Result<Box<dyn LandmarkModel>> + Send + 'static,
{
    run_with_timeout(
        loader,
        timeout,
        Error::ModelLoad(format!("model load timed out after {} ms", timeout.as_millis())),
    )
}
