//! Per-frame gesture classification.
//!
//! Two classifiers turn estimator output into one [`GestureSymbol`] per frame:
//! a rule-based landmark classifier for the ML path and a motion-history
//! classifier for the frame-differencing fallback.

/// Rule-based classification of a single hand pose
pub mod landmark;

/// Oscillation and variance heuristics over motion-energy history
pub mod motion;

use crate::{config::ClassifierConfig, estimator::Estimate};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Closed set of recognized hand poses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureSymbol {
    None,
    Wave,
    Point,
    Fist,
    Ok,
    ThumbsUp,
    Peace,
}

impl GestureSymbol {
    /// Every symbol other than `None`
    pub const ACTIVE: [Self; 6] = [Self::Wave, Self::Point, Self::Fist, Self::Ok, Self::ThumbsUp, Self::Peace];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Wave => "wave",
            Self::Point => "point",
            Self::Fist => "fist",
            Self::Ok => "ok",
            Self::ThumbsUp => "thumbs_up",
            Self::Peace => "peace",
        }
    }

    /// Slot in per-gesture tables; `None` has no slot
    #[must_use]
    pub const fn slot(self) -> Option<usize> {
        match self {
            Self::None => None,
            Self::Wave => Some(0),
            Self::Point => Some(1),
            Self::Fist => Some(2),
            Self::Ok => Some(3),
            Self::ThumbsUp => Some(4),
            Self::Peace => Some(5),
        }
    }
}

impl fmt::Display for GestureSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GestureSymbol {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "wave" => Ok(Self::Wave),
            "point" => Ok(Self::Point),
            "fist" => Ok(Self::Fist),
            "ok" => Ok(Self::Ok),
            "thumbs_up" | "thumbsup" => Ok(Self::ThumbsUp),
            "peace" => Ok(Self::Peace),
            _ => Err(crate::Error::InvalidInput(format!("Unknown gesture: {s}"))),
        }
    }
}

/// Dispatches an [`Estimate`] to the matching classifier
pub struct GestureClassifier {
    config: ClassifierConfig,
    motion: motion::MotionClassifier,
}

impl GestureClassifier {
    #[must_use]
    pub fn new(config: ClassifierConfig) -> Self {
        let motion = motion::MotionClassifier::new(config.motion.clone());
        Self { config, motion }
    }

    /// Classify one frame. Only the first detected hand drives discrete gestures.
    pub fn classify(&mut self, estimate: &Estimate) -> GestureSymbol {
        match estimate {
            Estimate::Hands(hands) => hands
                .first()
                .map_or(GestureSymbol::None, |hand| landmark::classify(hand, &self.config)),
            Estimate::Motion(Some(regions)) => self.motion.classify(regions),
            Estimate::Motion(None) => GestureSymbol::None,
        }
    }

    pub fn reset(&mut self) {
        self.motion.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_names_round_trip() {
        for symbol in GestureSymbol::ACTIVE {
            assert_eq!(symbol.as_str().parse::<GestureSymbol>().unwrap(), symbol);
        }
        assert!("clap".parse::<GestureSymbol>().is_err());
    }

    #[test]
    fn test_slots_are_distinct() {
        let mut slots: Vec<usize> = GestureSymbol::ACTIVE.iter().filter_map(|g| g.slot()).collect();
        slots.dedup();
        assert_eq!(slots, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(GestureSymbol::None.slot(), None);
    }

    #[test]
    fn test_no_hands_is_none() {
        let mut classifier = GestureClassifier::new(ClassifierConfig::default());
        assert_eq!(classifier.classify(&Estimate::Hands(Vec::new())), GestureSymbol::None);
        assert_eq!(classifier.classify(&Estimate::Motion(None)), GestureSymbol::None);
    }
}
