//! Hand landmark types and the geometry the classifier and channels share.

use crate::{
    constants::{
        INDEX_MCP, INDEX_TIP, MIDDLE_MCP, MIDDLE_TIP, NUM_HAND_LANDMARKS, PINKY_MCP, PINKY_TIP, RING_MCP, RING_TIP,
        THUMB_MCP, THUMB_TIP, WRIST,
    },
    Error, Result,
};
use serde::{Deserialize, Serialize};

/// A 2D point in normalized video coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// The five fingers, in landmark order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Self; 5] = [Self::Thumb, Self::Index, Self::Middle, Self::Ring, Self::Pinky];

    /// (tip, knuckle) landmark indices used for the extension test
    #[must_use]
    pub const fn tip_and_knuckle(self) -> (usize, usize) {
        match self {
            Self::Thumb => (THUMB_TIP, THUMB_MCP),
            Self::Index => (INDEX_TIP, INDEX_MCP),
            Self::Middle => (MIDDLE_TIP, MIDDLE_MCP),
            Self::Ring => (RING_TIP, RING_MCP),
            Self::Pinky => (PINKY_TIP, PINKY_MCP),
        }
    }
}

/// Extension state of each finger in [`Finger::ALL`] order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FingerStates(pub [bool; 5]);

impl FingerStates {
    #[must_use]
    pub const fn is_extended(&self, finger: Finger) -> bool {
        self.0[finger as usize]
    }

    #[must_use]
    pub fn extended_count(&self) -> usize {
        self.0.iter().filter(|up| **up).count()
    }

    /// True when exactly the given fingers are extended
    #[must_use]
    pub fn only(&self, fingers: &[Finger]) -> bool {
        Finger::ALL
            .iter()
            .all(|f| self.is_extended(*f) == fingers.contains(f))
    }
}

/// 21 landmark points for one detected hand
#[derive(Debug, Clone, PartialEq)]
pub struct HandLandmarks {
    points: [Point2; NUM_HAND_LANDMARKS],
}

impl HandLandmarks {
    /// Build from exactly 21 finite points
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a wrong point count or non-finite coordinates
    pub fn from_points(points: &[Point2]) -> Result<Self> {
        let points: [Point2; NUM_HAND_LANDMARKS] = points.try_into().map_err(|_| {
            Error::InvalidInput(format!(
                "Expected {NUM_HAND_LANDMARKS} hand landmarks, got {}",
                points.len()
            ))
        })?;

        if let Some(idx) = points.iter().position(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(Error::InvalidInput(format!("Non-finite landmark at index {idx}")));
        }

        Ok(Self { points })
    }

    /// Build from `[x, y]` pairs, the shape landmark models and traces produce
    ///
    /// # Errors
    ///
    /// Same as [`HandLandmarks::from_points`]
    pub fn from_pairs(pairs: &[[f32; 2]]) -> Result<Self> {
        let points: Vec<Point2> = pairs.iter().map(|[x, y]| Point2::new(*x, *y)).collect();
        Self::from_points(&points)
    }

    #[must_use]
    pub const fn points(&self) -> &[Point2; NUM_HAND_LANDMARKS] {
        &self.points
    }

    #[must_use]
    pub const fn point(&self, index: usize) -> Point2 {
        self.points[index]
    }

    #[must_use]
    pub const fn wrist(&self) -> Point2 {
        self.points[WRIST]
    }

    /// Tip above knuckle counts as extended (camera space, y down)
    #[must_use]
    pub fn finger_states(&self) -> FingerStates {
        let mut states = [false; 5];
        for (slot, finger) in states.iter_mut().zip(Finger::ALL) {
            let (tip, knuckle) = finger.tip_and_knuckle();
            *slot = self.points[tip].y < self.points[knuckle].y;
        }
        FingerStates(states)
    }

    #[must_use]
    pub fn thumb_index_distance(&self) -> f32 {
        self.points[THUMB_TIP].distance(self.points[INDEX_TIP])
    }

    #[must_use]
    pub fn index_middle_distance(&self) -> f32 {
        self.points[INDEX_TIP].distance(self.points[MIDDLE_TIP])
    }

    /// Index knuckle to pinky knuckle; grows as the hand approaches the camera
    #[must_use]
    pub fn palm_width(&self) -> f32 {
        self.points[INDEX_MCP].distance(self.points[PINKY_MCP])
    }

    /// Wrist to middle knuckle
    #[must_use]
    pub fn hand_length(&self) -> f32 {
        self.points[WRIST].distance(self.points[MIDDLE_MCP])
    }

    /// Angle of the wrist→middle-knuckle vector from straight up, radians
    #[must_use]
    pub fn pointing_angle(&self) -> f32 {
        let wrist = self.points[WRIST];
        let knuckle = self.points[MIDDLE_MCP];
        (knuckle.x - wrist.x).atan2(wrist.y - knuckle.y)
    }
}
