use std::collections::VecDeque;

/// Bounded history of per-frame deltas with a ramp-weighted average.
///
/// The i-th oldest sample carries weight `i + 1`, so the newest samples
/// dominate while older ones still damp single-frame noise.
#[derive(Debug, Clone)]
pub struct WeightedHistory {
    capacity: usize,
    samples: VecDeque<f64>,
}

impl WeightedHistory {
    /// # Panics
    ///
    /// Panics if `capacity` is zero
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than 0");
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
        }
    }

    /// Push a sample, evicting the oldest when full
    pub fn push(&mut self, value: f64) {
        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(value);
    }

    /// Ramp-weighted mean; zero when empty
    #[must_use]
    pub fn weighted_average(&self) -> f64 {
        let (weighted_sum, weight_sum) = self
            .samples
            .iter()
            .enumerate()
            .fold((0.0, 0.0), |(sum, weights), (i, value)| {
                let weight = (i + 1) as f64;
                (sum + value * weight, weights + weight)
            });

        if weight_sum == 0.0 {
            0.0
        } else {
            weighted_sum / weight_sum
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}
