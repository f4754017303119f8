//! Gesture debouncing and lock state machine.
//!
//! Raw per-frame classification flickers between neighbouring symbols. The
//! debouncer turns that stream into rare, mutually exclusive events using
//! three nested guards:
//!
//! 1. **Lock / transition hysteresis**: one gesture holds the floor; a
//!    challenger must be seen for `min_transition_frames` consecutive frames
//!    before it takes over.
//! 2. **Stability**: frames of the locked gesture arriving within
//!    `stability_window` of each other build a stability streak. Only frames
//!    that were already stable count toward firing.
//! 3. **Repeats**: stable frames within `repeat_window` accumulate repeats;
//!    `required_repeats` fires the event.
//!
//! After firing, a global cooldown silences every gesture and a longer
//! per-gesture cooldown silences the one that fired. Deferred actions
//! (unlock, feedback reset) are stored as deadlines and applied at the start
//! of the next update, so the machine is fully driven by caller time.
//!
//! ```
//! use gesture_interaction::{classifier::GestureSymbol, config::DebounceConfig, debouncer::Debouncer};
//! use std::time::{Duration, Instant};
//!
//! let mut debouncer = Debouncer::new(DebounceConfig::default());
//! let start = Instant::now();
//! let fired: Vec<_> = (0..10)
//!     .filter_map(|i| debouncer.update(GestureSymbol::Fist, start + Duration::from_millis(33 * i)).fired())
//!     .collect();
//! assert_eq!(fired, vec![GestureSymbol::Fist]);
//! ```

use crate::{classifier::GestureSymbol, config::DebounceConfig};
use log::{debug, info};
use std::time::{Duration, Instant};

/// Per-gesture progress counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GestureCounters {
    /// Consecutive frames seen within the stability window
    pub stability: u32,
    /// Stable frames seen within the repeat window
    pub repeats: u32,
    /// Consecutive frames seen while another gesture holds the lock
    pub transitions: u32,
    /// Last frame this gesture was processed
    pub last_seen: Option<Instant>,
    /// This gesture is ignored until then
    pub cooldown_until: Option<Instant>,
}

impl GestureCounters {
    fn clear_progress(&mut self) {
        self.stability = 0;
        self.repeats = 0;
        self.transitions = 0;
    }
}

/// Hold-progress shown to the user while a gesture builds up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureFeedback {
    pub gesture: GestureSymbol,
    /// 0-100
    pub confidence: u8,
}

/// Conceptual state of the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    Idle,
    Locked(GestureSymbol),
}

/// What one update did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Global cooldown active; frame ignored
    GlobalCooldown,
    /// This gesture's own cooldown is active; frame ignored
    GestureCooldown(GestureSymbol),
    /// `none` frame: counters cleared, lock released
    Reset,
    /// A challenger was seen but has not displaced the lock yet
    Challenging { challenger: GestureSymbol, frames: u32 },
    /// Frame counted toward the locked gesture
    Accumulating(GestureSymbol),
    /// Thresholds met but this gesture fired most recently
    Suppressed(GestureSymbol),
    /// Event fired
    Fired(GestureSymbol),
}

impl Decision {
    /// The gesture that fired, if any
    #[must_use]
    pub const fn fired(self) -> Option<GestureSymbol> {
        match self {
            Self::Fired(g) => Some(g),
            _ => None,
        }
    }
}

/// All debouncer state. Lives exactly as long as the engine is enabled.
#[derive(Debug, Clone, Default)]
pub struct GestureRuntimeState {
    locked: Option<GestureSymbol>,
    counters: [GestureCounters; 6],
    global_cooldown_until: Option<Instant>,
    last_fired: Option<GestureSymbol>,
    unlock_at: Option<Instant>,
    feedback_reset_at: Option<Instant>,
    feedback: Option<GestureFeedback>,
}

impl GestureRuntimeState {
    fn counters_mut(&mut self, gesture: GestureSymbol) -> Option<&mut GestureCounters> {
        gesture.slot().map(|slot| &mut self.counters[slot])
    }

    fn reset_all_counters(&mut self) {
        for counters in &mut self.counters {
            counters.clear_progress();
        }
    }
}

fn elapsed_since(since: Option<Instant>, now: Instant) -> Option<Duration> {
    since.map(|t| now.saturating_duration_since(t))
}

fn reached(deadline: Option<Instant>, now: Instant) -> bool {
    deadline.is_some_and(|d| now >= d)
}

fn active(until: Option<Instant>, now: Instant) -> bool {
    until.is_some_and(|u| now < u)
}

/// The lock state machine
pub struct Debouncer {
    config: DebounceConfig,
    state: GestureRuntimeState,
}

impl Debouncer {
    #[must_use]
    pub fn new(config: DebounceConfig) -> Self {
        Self {
            config,
            state: GestureRuntimeState::default(),
        }
    }

    /// Process one classified frame at time `now`
    pub fn update(&mut self, gesture: GestureSymbol, now: Instant) -> Decision {
        self.apply_deadlines(now);

        if active(self.state.global_cooldown_until, now) {
            return Decision::GlobalCooldown;
        }

        let Some(slot) = gesture.slot() else {
            if self.state.locked.is_some() {
                debug!("none frame, releasing lock");
            }
            self.state.reset_all_counters();
            self.state.locked = None;
            self.state.feedback = None;
            return Decision::Reset;
        };

        if active(self.state.counters[slot].cooldown_until, now) {
            return Decision::GestureCooldown(gesture);
        }

        // Any counted frame breaks every other gesture's challenge streak
        for (i, counters) in self.state.counters.iter_mut().enumerate() {
            if i != slot {
                counters.transitions = 0;
            }
        }

        match self.state.locked {
            Some(holder) if holder != gesture => {
                let frames = {
                    let challenger = &mut self.state.counters[slot];
                    challenger.transitions += 1;
                    challenger.transitions
                };
                if frames < self.config.min_transition_frames {
                    return Decision::Challenging {
                        challenger: gesture,
                        frames,
                    };
                }
                debug!("{gesture} displaced {holder} after {frames} frames");
                if let Some(holder_counters) = self.state.counters_mut(holder) {
                    holder_counters.clear_progress();
                }
                self.state.locked = Some(gesture);
                self.state.counters[slot].transitions = 0;
            }
            Some(_) => {}
            None => {
                debug!("lock acquired by {gesture}");
                self.state.locked = Some(gesture);
                self.state.counters[slot].transitions = 0;
            }
        }

        self.accumulate(gesture, slot, now)
    }

    fn accumulate(&mut self, gesture: GestureSymbol, slot: usize, now: Instant) -> Decision {
        let config = &self.config;
        let counters = &mut self.state.counters[slot];

        let since_last = elapsed_since(counters.last_seen, now);
        let recent = since_last.is_some_and(|d| d < config.stability_window());
        let was_stable = recent && counters.stability >= config.stability_frames;

        if recent {
            counters.stability = counters.stability.saturating_add(1);
        } else {
            counters.stability = 1;
            counters.repeats = 0;
        }

        if was_stable {
            if since_last.is_some_and(|d| d < config.repeat_window()) {
                counters.repeats = counters.repeats.saturating_add(1);
            } else {
                counters.repeats = 1;
            }
        }
        counters.last_seen = Some(now);

        let repeats = counters.repeats;
        let confidence = (u64::from(repeats) * 100 / u64::from(config.required_repeats.max(1))).min(100) as u8;

        if repeats < config.required_repeats {
            self.state.feedback = Some(GestureFeedback { gesture, confidence });
            return Decision::Accumulating(gesture);
        }

        if self.state.last_fired == Some(gesture) {
            return Decision::Suppressed(gesture);
        }

        self.fire(gesture, slot, now);
        Decision::Fired(gesture)
    }

    fn fire(&mut self, gesture: GestureSymbol, slot: usize, now: Instant) {
        info!("Gesture triggered: {gesture}");
        let counters = &mut self.state.counters[slot];
        counters.cooldown_until = Some(now + self.config.per_gesture_cooldown());
        counters.repeats = 0;
        counters.stability = 0;

        self.state.global_cooldown_until = Some(now + self.config.global_cooldown());
        self.state.last_fired = Some(gesture);
        self.state.unlock_at = Some(now + self.config.unlock_after());
        self.state.feedback_reset_at = Some(now + self.config.feedback_reset());
        self.state.feedback = Some(GestureFeedback {
            gesture,
            confidence: 100,
        });
    }

    fn apply_deadlines(&mut self, now: Instant) {
        if reached(self.state.unlock_at, now) {
            debug!("unlocking gesture slot");
            self.state.unlock_at = None;
            self.state.locked = None;
        }
        if reached(self.state.feedback_reset_at, now) {
            self.state.feedback_reset_at = None;
            self.state.feedback = None;
            self.state.last_fired = None;
        }
    }

    /// Advance deadlines without a frame (e.g. while no frames arrive)
    pub fn poll(&mut self, now: Instant) {
        self.apply_deadlines(now);
    }

    #[must_use]
    pub const fn state(&self) -> DebounceState {
        match self.state.locked {
            Some(g) => DebounceState::Locked(g),
            None => DebounceState::Idle,
        }
    }

    #[must_use]
    pub const fn locked(&self) -> Option<GestureSymbol> {
        self.state.locked
    }

    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.state.locked.is_some()
    }

    /// Snapshot of one gesture's counters; `None` yields zeroed counters
    #[must_use]
    pub fn counters(&self, gesture: GestureSymbol) -> GestureCounters {
        gesture
            .slot()
            .map(|slot| self.state.counters[slot])
            .unwrap_or_default()
    }

    #[must_use]
    pub const fn feedback(&self) -> Option<GestureFeedback> {
        self.state.feedback
    }

    #[must_use]
    pub const fn global_cooldown_until(&self) -> Option<Instant> {
        self.state.global_cooldown_until
    }

    #[must_use]
    pub const fn config(&self) -> &DebounceConfig {
        &self.config
    }

    /// Discard all runtime state
    pub fn reset(&mut self) {
        self.state = GestureRuntimeState::default();
    }
}
