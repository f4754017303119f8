use super::{ContinuousChannel, SmoothingChannel};
use crate::{config::ChannelConfig, landmarks::HandLandmarks};
use std::time::Instant;

/// 3D displacement delta in normalized video units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionDelta {
    /// Wrist moved right (unmirrored camera space)
    pub dx: f64,
    /// Wrist moved down
    pub dy: f64,
    /// Palm grew, i.e. the hand moved toward the camera
    pub dz: f64,
}

/// Moves a scene object with one open hand.
///
/// Suppressed while a discrete gesture holds the lock so both systems do not
/// fight over the same hand motion.
pub struct PositionTracker {
    channel: SmoothingChannel<3>,
    previous: Option<[f64; 3]>,
}

impl PositionTracker {
    #[must_use]
    pub fn new(config: ChannelConfig) -> Self {
        Self {
            channel: SmoothingChannel::new(config),
            previous: None,
        }
    }

    fn reading(hand: &HandLandmarks) -> [f64; 3] {
        let wrist = hand.wrist();
        [f64::from(wrist.x), f64::from(wrist.y), f64::from(hand.palm_width())]
    }
}

impl ContinuousChannel for PositionTracker {
    type Output = PositionDelta;

    fn update(&mut self, hands: &[HandLandmarks], gesture_locked: bool, now: Instant) -> Option<PositionDelta> {
        let [hand] = hands else {
            self.reset();
            return None;
        };
        if gesture_locked {
            self.reset();
            return None;
        }

        let current = Self::reading(hand);
        let previous = self.previous.replace(current)?;
        let deltas = [
            current[0] - previous[0],
            current[1] - previous[1],
            current[2] - previous[2],
        ];

        self.channel
            .push(deltas, now)
            .map(|[dx, dy, dz]| PositionDelta { dx, dy, dz })
    }

    fn reset(&mut self) {
        self.previous = None;
        self.channel.clear();
    }

    fn name(&self) -> &str {
        "position"
    }
}
