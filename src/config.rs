//! Configuration management for the gesture interaction engine

use crate::{
    constants::{
        DEFAULT_CAMERA_HEIGHT, DEFAULT_CAMERA_WIDTH, DEFAULT_FEEDBACK_RESET_MS, DEFAULT_GLOBAL_COOLDOWN_MS,
        DEFAULT_GPU_PROBE_TIMEOUT_MS, DEFAULT_MIN_TRANSITION_FRAMES, DEFAULT_MODEL_LOAD_TIMEOUT_MS,
        DEFAULT_OK_THRESHOLD, DEFAULT_PEACE_MIN_SEPARATION, DEFAULT_PER_GESTURE_COOLDOWN_MS,
        DEFAULT_REPEAT_WINDOW_MS, DEFAULT_REQUIRED_REPEATS, DEFAULT_STABILITY_FRAMES, DEFAULT_STABILITY_WINDOW_MS,
        DEFAULT_UNLOCK_AFTER_MS, MAX_CHANNEL_CAPACITY, MIN_CHANNEL_CAPACITY, MOTION_HISTORY_CAPACITY,
        MOTION_MIN_HISTORY, MOTION_OSCILLATION_WINDOW,
    },
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

/// Engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Lifecycle and frame scheduling
    pub engine: EngineConfig,

    /// Camera request
    pub camera: CameraConfig,

    /// Discrete gesture debouncing
    pub debounce: DebounceConfig,

    /// Per-frame classification thresholds
    pub classifier: ClassifierConfig,

    /// Continuous zoom/position/rotation channels
    pub channels: ChannelsConfig,
}

/// Lifecycle and scheduling options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Whether the engine may acquire the camera
    pub enabled: bool,

    /// Process every Nth tick (1 = every tick)
    pub process_every_nth_frame: u32,

    /// Tick rate cap; 60 or more disables limiting
    pub target_fps: u32,

    /// Wall-clock limit for landmark model loading
    pub model_load_timeout_ms: u64,

    /// Wall-clock limit for GPU renderer probing
    pub gpu_probe_timeout_ms: u64,
}

/// Camera request parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Ideal capture width
    pub width: u32,

    /// Ideal capture height
    pub height: u32,

    /// Prefer the user-facing camera
    pub user_facing: bool,
}

/// Debouncer tuning. camelCase aliases match the host-facing option names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebounceConfig {
    /// Consecutive frames a challenger must hold to displace the lock
    #[serde(alias = "minTransitionFrames")]
    pub min_transition_frames: u32,

    /// Recency window for frame-to-frame stability
    #[serde(alias = "stabilityWindowMs")]
    pub stability_window_ms: u64,

    /// Consecutive stable frames before repeats are counted
    #[serde(alias = "stabilityFrames")]
    pub stability_frames: u32,

    /// Recency window for counting repeats
    #[serde(alias = "repeatWindowMs")]
    pub repeat_window_ms: u64,

    /// Repeats needed to fire
    #[serde(alias = "requiredRepeats")]
    pub required_repeats: u32,

    /// Quiet period for the gesture that fired
    #[serde(alias = "perGestureCooldownMs")]
    pub per_gesture_cooldown_ms: u64,

    /// Quiet period for every gesture after any fire
    #[serde(alias = "globalCooldownMs")]
    pub global_cooldown_ms: u64,

    /// Release the lock this long after a fire
    #[serde(alias = "unlockAfterMs")]
    pub unlock_after_ms: u64,

    /// Clear UI feedback this long after a fire
    #[serde(alias = "feedbackResetMs")]
    pub feedback_reset_ms: u64,
}

/// Landmark classifier thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Thumb-tip to index-tip distance below which a hand reads as `ok`
    pub ok_threshold: f32,

    /// Minimum index-middle tip separation for `peace`
    pub peace_min_separation: f32,

    /// Fallback motion heuristics
    pub motion: MotionClassifierConfig,
}

/// Motion fallback heuristics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionClassifierConfig {
    pub history_capacity: usize,
    pub min_history: usize,
    pub oscillation_window: usize,
    pub wave_oscillation: f64,
    pub wave_variance: f64,
    pub wave_motion: f64,
    pub point_dominance: f64,
    pub point_motion: f64,
    pub fist_max_motion: f64,
    pub fist_max_variance: f64,
    pub thumbs_up_dominance: f64,
    pub thumbs_up_motion: f64,
    pub peace_motion: f64,
    pub peace_variance: f64,
    pub ok_swing: f64,
    pub ok_min_swings: usize,
    pub ok_variance: f64,
}

/// Continuous channel settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelsConfig {
    pub zoom: ChannelConfig,
    pub position: ChannelConfig,
    pub rotation: ChannelConfig,
}

/// One smoothing channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Ring buffer capacity (8-12)
    pub capacity: usize,

    /// Weighted-average magnitude that must be exceeded to emit
    pub activation_threshold: f64,

    /// Multiplier applied to the weighted average
    pub gain: f64,

    /// Per-axis clamp on the emitted delta
    pub max_magnitude: f64,

    /// Minimum spacing between emissions
    pub min_interval_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            process_every_nth_frame: 1,
            target_fps: 30,
            model_load_timeout_ms: DEFAULT_MODEL_LOAD_TIMEOUT_MS,
            gpu_probe_timeout_ms: DEFAULT_GPU_PROBE_TIMEOUT_MS,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CAMERA_WIDTH,
            height: DEFAULT_CAMERA_HEIGHT,
            user_facing: true,
        }
    }
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            min_transition_frames: DEFAULT_MIN_TRANSITION_FRAMES,
            stability_window_ms: DEFAULT_STABILITY_WINDOW_MS,
            stability_frames: DEFAULT_STABILITY_FRAMES,
            repeat_window_ms: DEFAULT_REPEAT_WINDOW_MS,
            required_repeats: DEFAULT_REQUIRED_REPEATS,
            per_gesture_cooldown_ms: DEFAULT_PER_GESTURE_COOLDOWN_MS,
            global_cooldown_ms: DEFAULT_GLOBAL_COOLDOWN_MS,
            unlock_after_ms: DEFAULT_UNLOCK_AFTER_MS,
            feedback_reset_ms: DEFAULT_FEEDBACK_RESET_MS,
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            ok_threshold: DEFAULT_OK_THRESHOLD,
            peace_min_separation: DEFAULT_PEACE_MIN_SEPARATION,
            motion: MotionClassifierConfig::default(),
        }
    }
}

impl Default for MotionClassifierConfig {
    fn default() -> Self {
        Self {
            history_capacity: MOTION_HISTORY_CAPACITY,
            min_history: MOTION_MIN_HISTORY,
            oscillation_window: MOTION_OSCILLATION_WINDOW,
            wave_oscillation: 8.0,
            wave_variance: 80.0,
            wave_motion: 12.0,
            point_dominance: 1.3,
            point_motion: 18.0,
            fist_max_motion: 6.0,
            fist_max_variance: 25.0,
            thumbs_up_dominance: 1.2,
            thumbs_up_motion: 20.0,
            peace_motion: 15.0,
            peace_variance: 120.0,
            ok_swing: 10.0,
            ok_min_swings: 3,
            ok_variance: 100.0,
        }
    }
}

impl Default for ChannelsConfig {
    fn default() -> Self {
        Self {
            zoom: ChannelConfig::zoom(),
            position: ChannelConfig::position(),
            rotation: ChannelConfig::rotation(),
        }
    }
}

impl ChannelConfig {
    /// Two-hand distance channel
    #[must_use]
    pub const fn zoom() -> Self {
        Self {
            capacity: 12,
            activation_threshold: 0.008,
            gain: 8.0,
            max_magnitude: 0.15,
            min_interval_ms: 0,
        }
    }

    /// Single-hand wrist displacement channel
    #[must_use]
    pub const fn position() -> Self {
        Self {
            capacity: 8,
            activation_threshold: 0.004,
            gain: 4.0,
            max_magnitude: 0.25,
            min_interval_ms: 16,
        }
    }

    /// Single-hand orientation channel
    #[must_use]
    pub const fn rotation() -> Self {
        Self {
            capacity: 8,
            activation_threshold: 0.02,
            gain: 1.5,
            max_magnitude: 0.1,
            min_interval_ms: 16,
        }
    }

    #[must_use]
    pub const fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    fn validate(&self, name: &str) -> Result<()> {
        if !(MIN_CHANNEL_CAPACITY..=MAX_CHANNEL_CAPACITY).contains(&self.capacity) {
            return Err(Error::ConfigError(format!(
                "{name} channel capacity must be between {MIN_CHANNEL_CAPACITY} and {MAX_CHANNEL_CAPACITY}"
            )));
        }
        if !(self.activation_threshold >= 0.0) {
            return Err(Error::ConfigError(format!(
                "{name} activation threshold must be non-negative"
            )));
        }
        if !(self.gain > 0.0) || !(self.max_magnitude > 0.0) {
            return Err(Error::ConfigError(format!(
                "{name} gain and max magnitude must be positive"
            )));
        }
        Ok(())
    }
}

impl DebounceConfig {
    #[must_use]
    pub const fn stability_window(&self) -> Duration {
        Duration::from_millis(self.stability_window_ms)
    }

    #[must_use]
    pub const fn repeat_window(&self) -> Duration {
        Duration::from_millis(self.repeat_window_ms)
    }

    #[must_use]
    pub const fn per_gesture_cooldown(&self) -> Duration {
        Duration::from_millis(self.per_gesture_cooldown_ms)
    }

    #[must_use]
    pub const fn global_cooldown(&self) -> Duration {
        Duration::from_millis(self.global_cooldown_ms)
    }

    #[must_use]
    pub const fn unlock_after(&self) -> Duration {
        Duration::from_millis(self.unlock_after_ms)
    }

    #[must_use]
    pub const fn feedback_reset(&self) -> Duration {
        Duration::from_millis(self.feedback_reset_ms)
    }
}

impl EngineConfig {
    #[must_use]
    pub const fn model_load_timeout(&self) -> Duration {
        Duration::from_millis(self.model_load_timeout_ms)
    }

    #[must_use]
    pub const fn gpu_probe_timeout(&self) -> Duration {
        Duration::from_millis(self.gpu_probe_timeout_ms)
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.engine.process_every_nth_frame == 0 {
            return Err(Error::ConfigError(
                "process_every_nth_frame must be greater than 0".to_string(),
            ));
        }
        if self.engine.target_fps == 0 {
            return Err(Error::ConfigError("Target FPS must be greater than 0".to_string()));
        }

        let d = &self.debounce;
        if d.min_transition_frames == 0 {
            return Err(Error::ConfigError(
                "min_transition_frames must be greater than 0".to_string(),
            ));
        }
        if d.stability_frames == 0 || d.required_repeats == 0 {
            return Err(Error::ConfigError(
                "stability_frames and required_repeats must be greater than 0".to_string(),
            ));
        }
        if d.stability_window_ms == 0 || d.repeat_window_ms == 0 {
            return Err(Error::ConfigError(
                "Stability and repeat windows must be greater than 0".to_string(),
            ));
        }

        if !(self.classifier.ok_threshold > 0.0 && self.classifier.ok_threshold < 1.0) {
            return Err(Error::ConfigError("ok_threshold must be in (0, 1)".to_string()));
        }
        if !(self.classifier.peace_min_separation >= 0.0) {
            return Err(Error::ConfigError(
                "peace_min_separation must be non-negative".to_string(),
            ));
        }
        let m = &self.classifier.motion;
        if m.min_history < 2 || m.min_history > m.history_capacity {
            return Err(Error::ConfigError(
                "Motion min_history must be at least 2 and no larger than history_capacity".to_string(),
            ));
        }

        self.channels.zoom.validate("Zoom")?;
        self.channels.position.validate("Position")?;
        self.channels.rotation.validate("Rotation")?;

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Gesture Interaction Engine Configuration

engine:
  enabled: true
  process_every_nth_frame: 1
  target_fps: 30
  model_load_timeout_ms: 10000
  gpu_probe_timeout_ms: 2000

camera:
  width: 640
  height: 480
  user_facing: true

# Discrete gesture debouncing (camelCase keys are accepted too)
debounce:
  min_transition_frames: 6
  stability_window_ms: 250
  stability_frames: 4
  repeat_window_ms: 600
  required_repeats: 3
  per_gesture_cooldown_ms: 3000
  global_cooldown_ms: 2000
  unlock_after_ms: 1000
  feedback_reset_ms: 2000

classifier:
  ok_threshold: 0.05
  peace_min_separation: 0.04
  motion:
    history_capacity: 15
    min_history: 8
    oscillation_window: 8
    wave_oscillation: 8.0
    wave_variance: 80.0
    wave_motion: 12.0
    point_dominance: 1.3
    point_motion: 18.0
    fist_max_motion: 6.0
    fist_max_variance: 25.0
    thumbs_up_dominance: 1.2
    thumbs_up_motion: 20.0
    peace_motion: 15.0
    peace_variance: 120.0
    ok_swing: 10.0
    ok_min_swings: 3
    ok_variance: 100.0

# Continuous channels
channels:
  zoom:
    capacity: 12
    activation_threshold: 0.008
    gain: 8.0
    max_magnitude: 0.15
    min_interval_ms: 0
  position:
    capacity: 8
    activation_threshold: 0.004
    gain: 4.0
    max_magnitude: 0.25
    min_interval_ms: 16
  rotation:
    capacity: 8
    activation_threshold: 0.02
    gain: 1.5
    max_magnitude: 0.1
    min_interval_ms: 16
"#;
