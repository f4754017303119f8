use super::{Estimate, HandEstimator};
use crate::{constants::MOTION_SAMPLE_STRIDE, frame::Frame, Result};
use image::RgbaImage;
use log::debug;
use serde::{Deserialize, Serialize};

/// Mean per-pixel motion energy in five overlapping regions
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MotionRegionMap {
    pub left: f64,
    pub center: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl MotionRegionMap {
    /// Overall motion: the mean of the three horizontal bands
    #[must_use]
    pub fn total(&self) -> f64 {
        (self.left + self.center + self.right) / 3.0
    }
}

#[derive(Default)]
struct Accumulator {
    sum: f64,
    count: u64,
}

impl Accumulator {
    fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

/// Diff two equally sized frames. Every `MOTION_SAMPLE_STRIDE`th pixel on both
/// axes contributes |ΔR|+|ΔG|+|ΔB| to its horizontal third and vertical half.
/// Returns `None` when the frames differ in size.
#[must_use]
pub fn motion_regions(current: &RgbaImage, previous: &RgbaImage) -> Option<MotionRegionMap> {
    if current.dimensions() != previous.dimensions() {
        return None;
    }
    let (width, height) = current.dimensions();

    let mut left = Accumulator::default();
    let mut center = Accumulator::default();
    let mut right = Accumulator::default();
    let mut top = Accumulator::default();
    let mut bottom = Accumulator::default();

    for y in (0..height).step_by(MOTION_SAMPLE_STRIDE as usize) {
        for x in (0..width).step_by(MOTION_SAMPLE_STRIDE as usize) {
            let a = current.get_pixel(x, y).0;
            let b = previous.get_pixel(x, y).0;
            let diff: u32 = (0..3).map(|c| u32::from(a[c].abs_diff(b[c]))).sum();
            let diff = f64::from(diff);

            // Integer comparisons keep band edges exact: x < w/3 <=> 3x < w
            if 3 * x < width {
                left.add(diff);
            } else if 3 * x < 2 * width {
                center.add(diff);
            } else {
                right.add(diff);
            }

            if 2 * y < height {
                top.add(diff);
            } else {
                bottom.add(diff);
            }
        }
    }

    Some(MotionRegionMap {
        left: left.mean(),
        center: center.mean(),
        right: right.mean(),
        top: top.mean(),
        bottom: bottom.mean(),
    })
}

/// Fallback estimator that needs no model: diffs each frame against the last
#[derive(Default)]
pub struct MotionFallbackEstimator {
    previous: Option<RgbaImage>,
}

impl MotionFallbackEstimator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl HandEstimator for MotionFallbackEstimator {
    fn estimate(&mut self, frame: &Frame) -> Result<Estimate> {
        let regions = self
            .previous
            .as_ref()
            .and_then(|previous| motion_regions(&frame.image, previous));

        if regions.is_none() && self.previous.is_some() {
            debug!("Frame size changed, restarting motion reference");
        }

        self.previous = Some(frame.image.clone());
        Ok(Estimate::Motion(regions))
    }

    fn reset(&mut self) {
        self.previous = None;
    }

    fn name(&self) -> &str {
        "MotionFallbackEstimator"
    }
}
