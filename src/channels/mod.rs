//! Continuous gesture channels.
//!
//! Each channel turns a continuously varying hand measurement into a smoothed
//! delta signal, independently of the discrete debouncer:
//!
//! 1. The frame's raw reading is diffed against the previous one; a channel
//!    with no previous reading only records it.
//! 2. The delta goes into a ramp-weighted ring buffer per axis.
//! 3. If the weighted average's magnitude exceeds the activation threshold,
//!    the average is scaled by the channel gain, clamped, and emitted, subject
//!    to a minimum spacing between emissions.

/// Ramp-weighted ring buffer
pub mod weighted;

/// Two-hand distance → zoom
pub mod zoom;

/// Single-hand displacement → 3D position delta
pub mod position;

/// Single-hand orientation → yaw/pitch delta
pub mod rotation;

pub use position::{PositionDelta, PositionTracker};
pub use rotation::{RotationDelta, RotationTracker};
pub use weighted::WeightedHistory;
pub use zoom::ZoomTracker;

use crate::{config::ChannelConfig, landmarks::HandLandmarks, utils::clamp_symmetric};
use std::time::Instant;

/// Trait for all continuous channels
pub trait ContinuousChannel {
    /// Emitted delta type
    type Output;

    /// Feed one frame's hands; returns a delta when the channel fires
    fn update(&mut self, hands: &[HandLandmarks], gesture_locked: bool, now: Instant) -> Option<Self::Output>;

    /// Forget the previous reading and history
    fn reset(&mut self);

    /// Get channel name
    fn name(&self) -> &str;
}

/// Gating and smoothing shared by every channel, over `D` axes
#[derive(Debug, Clone)]
pub struct SmoothingChannel<const D: usize> {
    config: ChannelConfig,
    axes: [WeightedHistory; D],
    last_emit: Option<Instant>,
}

impl<const D: usize> SmoothingChannel<D> {
    #[must_use]
    pub fn new(config: ChannelConfig) -> Self {
        let axes = std::array::from_fn(|_| WeightedHistory::new(config.capacity));
        Self {
            config,
            axes,
            last_emit: None,
        }
    }

    /// Push one delta per axis and decide whether to emit
    pub fn push(&mut self, deltas: [f64; D], now: Instant) -> Option<[f64; D]> {
        for (axis, delta) in self.axes.iter_mut().zip(deltas) {
            axis.push(delta);
        }

        let averages = self.weighted_averages();
        let magnitude = averages.iter().map(|a| a * a).sum::<f64>().sqrt();
        if !(magnitude > self.config.activation_threshold) {
            return None;
        }

        if let Some(last) = self.last_emit {
            if now.saturating_duration_since(last) < self.config.min_interval() {
                return None;
            }
        }
        self.last_emit = Some(now);

        Some(averages.map(|a| clamp_symmetric(a * self.config.gain, self.config.max_magnitude)))
    }

    /// Current per-axis weighted averages
    #[must_use]
    pub fn weighted_averages(&self) -> [f64; D] {
        std::array::from_fn(|i| self.axes[i].weighted_average())
    }

    /// Samples held on the first axis
    #[must_use]
    pub fn len(&self) -> usize {
        self.axes.first().map_or(0, WeightedHistory::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub const fn config(&self) -> &ChannelConfig {
        &self.config
    }

    pub fn clear(&mut self) {
        for axis in &mut self.axes {
            axis.clear();
        }
        self.last_emit = None;
    }
}
