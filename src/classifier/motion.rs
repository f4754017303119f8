use super::GestureSymbol;
use crate::{config::MotionClassifierConfig, estimator::MotionRegionMap};
use log::trace;
use std::collections::VecDeque;

/// Classifies the coarse motion-energy stream used when no landmark model is
/// available. Decisions look at the recent history, not a single frame.
pub struct MotionClassifier {
    config: MotionClassifierConfig,
    history: VecDeque<f64>,
}

impl MotionClassifier {
    #[must_use]
    pub fn new(config: MotionClassifierConfig) -> Self {
        Self {
            history: VecDeque::with_capacity(config.history_capacity),
            config,
        }
    }

    /// Push this frame's motion and classify against the updated history
    pub fn classify(&mut self, regions: &MotionRegionMap) -> GestureSymbol {
        let total = regions.total();

        if self.history.len() >= self.config.history_capacity {
            self.history.pop_front();
        }
        self.history.push_back(total);

        // Need enough history for oscillation and variance to mean anything
        if self.history.len() < self.config.min_history {
            return GestureSymbol::None;
        }

        let stats = self.stats();
        let c = &self.config;

        let symbol = if stats.oscillation > c.wave_oscillation && stats.variance > c.wave_variance && total > c.wave_motion
        {
            GestureSymbol::Wave
        } else if regions.center > regions.left * c.point_dominance
            && regions.center > regions.right * c.point_dominance
            && total > c.point_motion
        {
            GestureSymbol::Point
        } else if total < c.fist_max_motion && stats.variance < c.fist_max_variance {
            GestureSymbol::Fist
        } else if regions.top > regions.bottom * c.thumbs_up_dominance && total > c.thumbs_up_motion {
            GestureSymbol::ThumbsUp
        } else if total > c.peace_motion && stats.variance > c.peace_variance {
            GestureSymbol::Peace
        } else if stats.strong_swings >= c.ok_min_swings && stats.variance > c.ok_variance {
            GestureSymbol::Ok
        } else {
            GestureSymbol::None
        };

        trace!(
            "motion {:.1} var {:.1} osc {:.1} -> {}",
            total,
            stats.variance,
            stats.oscillation,
            symbol
        );
        symbol
    }

    pub fn reset(&mut self) {
        self.history.clear();
    }

    /// Number of samples currently held
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    fn stats(&self) -> MotionStats {
        let n = self.history.len() as f64;
        let mean = self.history.iter().sum::<f64>() / n;
        let variance = self.history.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

        let recent_start = self.history.len().saturating_sub(self.config.oscillation_window);
        let recent: Vec<f64> = self.history.iter().skip(recent_start).copied().collect();
        let steps: Vec<f64> = recent.windows(2).map(|w| (w[1] - w[0]).abs()).collect();
        let oscillation = if steps.is_empty() {
            0.0
        } else {
            steps.iter().sum::<f64>() / steps.len() as f64
        };
        let strong_swings = steps.iter().filter(|s| **s > self.config.ok_swing).count();

        MotionStats {
            variance,
            oscillation,
            strong_swings,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct MotionStats {
    variance: f64,
    oscillation: f64,
    strong_swings: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(level: f64) -> MotionRegionMap {
        MotionRegionMap {
            left: level,
            center: level,
            right: level,
            top: level,
            bottom: level,
        }
    }

    #[test]
    fn test_needs_minimum_history() {
        let mut classifier = MotionClassifier::new(MotionClassifierConfig::default());
        for _ in 0..7 {
            assert_eq!(classifier.classify(&uniform(1.0)), GestureSymbol::None);
        }
        // Eighth still frame: low motion, low variance
        assert_eq!(classifier.classify(&uniform(1.0)), GestureSymbol::Fist);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut classifier = MotionClassifier::new(MotionClassifierConfig::default());
        for _ in 0..40 {
            classifier.classify(&uniform(2.0));
        }
        assert_eq!(classifier.history_len(), 15);
        classifier.reset();
        assert_eq!(classifier.history_len(), 0);
    }

    #[test]
    fn test_alternating_energy_is_wave() {
        let mut classifier = MotionClassifier::new(MotionClassifierConfig::default());
        let mut last = GestureSymbol::None;
        for i in 0..12 {
            let level = if i % 2 == 0 { 5.0 } else { 40.0 };
            last = classifier.classify(&uniform(level));
        }
        // Last frame is a high-energy frame in a strongly oscillating history
        assert_eq!(last, GestureSymbol::Wave);
    }

    #[test]
    fn test_center_dominant_motion_is_point() {
        let mut classifier = MotionClassifier::new(MotionClassifierConfig::default());
        let regions = MotionRegionMap {
            left: 5.0,
            center: 50.0,
            right: 5.0,
            top: 20.0,
            bottom: 20.0,
        };
        let mut last = GestureSymbol::None;
        for _ in 0..8 {
            last = classifier.classify(&regions);
        }
        assert_eq!(last, GestureSymbol::Point);
    }
}
