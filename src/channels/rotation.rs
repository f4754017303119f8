use super::{ContinuousChannel, SmoothingChannel};
use crate::{config::ChannelConfig, landmarks::HandLandmarks};
use std::{f64::consts::PI, time::Instant};

/// Palms narrower than this give no usable foreshortening ratio
const MIN_PALM_WIDTH: f32 = 1e-3;

/// Angular delta
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationDelta {
    /// Change in pointing angle, radians (clockwise positive on screen)
    pub yaw: f64,
    /// Change in hand length relative to palm width (tilting toward the camera is negative)
    pub pitch: f64,
}

/// Orientation tracking from one hand: the wrist→middle-knuckle angle drives
/// yaw and the hand's foreshortening drives pitch.
pub struct RotationTracker {
    channel: SmoothingChannel<2>,
    previous: Option<[f64; 2]>,
}

/// Map an angle difference into (-π, π]
fn wrap_angle(delta: f64) -> f64 {
    let wrapped = (delta + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped <= -PI {
        wrapped + 2.0 * PI
    } else {
        wrapped
    }
}

impl RotationTracker {
    #[must_use]
    pub fn new(config: ChannelConfig) -> Self {
        Self {
            channel: SmoothingChannel::new(config),
            previous: None,
        }
    }

    fn reading(hand: &HandLandmarks) -> Option<[f64; 2]> {
        let width = hand.palm_width();
        if width < MIN_PALM_WIDTH {
            return None;
        }
        Some([
            f64::from(hand.pointing_angle()),
            f64::from(hand.hand_length() / width),
        ])
    }
}

impl ContinuousChannel for RotationTracker {
    type Output = RotationDelta;

    fn update(&mut self, hands: &[HandLandmarks], gesture_locked: bool, now: Instant) -> Option<RotationDelta> {
        let [hand] = hands else {
            self.reset();
            return None;
        };
        if gesture_locked {
            self.reset();
            return None;
        }

        // Degenerate palm: keep the last good reading
        let current = Self::reading(hand)?;
        let previous = self.previous.replace(current)?;
        let deltas = [wrap_angle(current[0] - previous[0]), current[1] - previous[1]];

        self.channel
            .push(deltas, now)
            .map(|[yaw, pitch]| RotationDelta { yaw, pitch })
    }

    fn reset(&mut self) {
        self.previous = None;
        self.channel.clear();
    }

    fn name(&self) -> &str {
        "rotation"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(0.1) - 0.1).abs() < 1e-12);
        assert!((wrap_angle(2.0 * PI - 0.1) + 0.1).abs() < 1e-9);
        assert!((wrap_angle(-2.0 * PI + 0.1) - 0.1).abs() < 1e-9);
        assert!((wrap_angle(PI) - PI).abs() < 1e-12);
    }
}
