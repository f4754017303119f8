//! Constants used throughout the engine

/// Number of landmarks reported per hand
pub const NUM_HAND_LANDMARKS: usize = 21;

/// Landmark indices (wrist, thumb, finger tips and knuckles)
pub const WRIST: usize = 0;
pub const THUMB_MCP: usize = 2;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_TIP: usize = 20;

/// Debouncer defaults
pub const DEFAULT_MIN_TRANSITION_FRAMES: u32 = 6;
pub const DEFAULT_STABILITY_WINDOW_MS: u64 = 250;
pub const DEFAULT_STABILITY_FRAMES: u32 = 4;
pub const DEFAULT_REPEAT_WINDOW_MS: u64 = 600;
pub const DEFAULT_REQUIRED_REPEATS: u32 = 3;
pub const DEFAULT_PER_GESTURE_COOLDOWN_MS: u64 = 3000;
pub const DEFAULT_GLOBAL_COOLDOWN_MS: u64 = 2000;
pub const DEFAULT_UNLOCK_AFTER_MS: u64 = 1000;
pub const DEFAULT_FEEDBACK_RESET_MS: u64 = 2000;

/// Landmark classifier thresholds (normalized video coordinates)
pub const DEFAULT_OK_THRESHOLD: f32 = 0.05;
pub const DEFAULT_PEACE_MIN_SEPARATION: f32 = 0.04;

/// Motion classifier history bounds
pub const MOTION_HISTORY_CAPACITY: usize = 15;
pub const MOTION_MIN_HISTORY: usize = 8;
pub const MOTION_OSCILLATION_WINDOW: usize = 8;

/// Motion fallback samples every Nth pixel on both axes
pub const MOTION_SAMPLE_STRIDE: u32 = 2;

/// Continuous channel ring buffer bounds
pub const MIN_CHANNEL_CAPACITY: usize = 8;
pub const MAX_CHANNEL_CAPACITY: usize = 12;

/// Timeout for landmark model loading
pub const DEFAULT_MODEL_LOAD_TIMEOUT_MS: u64 = 10_000;

/// Timeout for GPU renderer probing
pub const DEFAULT_GPU_PROBE_TIMEOUT_MS: u64 = 2_000;

/// Requested camera resolution
pub const DEFAULT_CAMERA_WIDTH: u32 = 640;
pub const DEFAULT_CAMERA_HEIGHT: u32 = 480;
