use super::{ContinuousChannel, SmoothingChannel};
use crate::{config::ChannelConfig, landmarks::HandLandmarks};
use log::trace;
use std::time::Instant;

/// Zoom from the distance between two wrists.
///
/// Hands moving closer yield a negative delta (zoom in), hands moving apart a
/// positive one. Requires exactly two hands; anything else clears the channel.
pub struct ZoomTracker {
    channel: SmoothingChannel<1>,
    previous_distance: Option<f64>,
}

impl ZoomTracker {
    #[must_use]
    pub fn new(config: ChannelConfig) -> Self {
        Self {
            channel: SmoothingChannel::new(config),
            previous_distance: None,
        }
    }

    /// Feed a raw two-hand distance directly
    pub fn update_distance(&mut self, distance: f64, now: Instant) -> Option<f64> {
        let previous = self.previous_distance.replace(distance)?;
        let delta = distance - previous;
        let zoom = self.channel.push([delta], now).map(|[z]| z);
        trace!("zoom distance {distance:.3} delta {delta:+.4} -> {zoom:?}");
        zoom
    }
}

impl ContinuousChannel for ZoomTracker {
    type Output = f64;

    fn update(&mut self, hands: &[HandLandmarks], _gesture_locked: bool, now: Instant) -> Option<f64> {
        let [first, second] = hands else {
            self.reset();
            return None;
        };
        let distance = f64::from(first.wrist().distance(second.wrist()));
        self.update_distance(distance, now)
    }

    fn reset(&mut self) {
        self.previous_distance = None;
        self.channel.clear();
    }

    fn name(&self) -> &str {
        "zoom"
    }
}
