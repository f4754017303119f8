//! Gesture interaction engine for camera-driven user interfaces.
//!
//! Turns a live camera stream into two kinds of output:
//! - discrete gesture events (fist, point, ok, thumbs up, peace, wave) that
//!   fire only after a pose has been held stably long enough
//! - continuous, smoothed zoom / position / rotation deltas derived from hand
//!   geometry
//!
//! The per-frame pipeline consists of:
//! 1. Frame acquisition from a host-provided [`frame::FrameSource`]
//! 2. Hand estimation: a landmark model when one loads, frame-differencing
//!    motion estimation otherwise
//! 3. Classification of the estimate into a [`classifier::GestureSymbol`]
//! 4. Temporal debouncing with lock, cooldowns and transition hysteresis
//! 5. Weighted smoothing of the continuous channels
//!
//! # Examples
//!
//! ## Debouncing a Classified Stream
//!
//! ```
//! use gesture_interaction::{classifier::GestureSymbol, config::DebounceConfig, debouncer::Debouncer};
//! use std::time::{Duration, Instant};
//!
//! let mut debouncer = Debouncer::new(DebounceConfig::default());
//! let start = Instant::now();
//!
//! let fired: Vec<_> = (0..10)
//!     .filter_map(|i| debouncer.update(GestureSymbol::Fist, start + Duration::from_millis(33 * i)).fired())
//!     .collect();
//! assert_eq!(fired, vec![GestureSymbol::Fist]);
//! ```
//!
//! ## Capability Probing
//!
//! ```
//! use gesture_interaction::capability::{probe, DeviceSignals, PerformanceTier};
//!
//! let phone = DeviceSignals {
//!     user_agent: "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)".to_string(),
//!     viewport_width: 390,
//!     viewport_height: 844,
//!     ..DeviceSignals::default()
//! };
//! assert_eq!(probe(&phone), PerformanceTier::Low);
//! ```
//!
//! ## Driving the Engine
//!
//! ```no_run
//! use gesture_interaction::{
//!     config::Config,
//!     engine::{EventLog, GestureEngine},
//!     error::CameraError,
//!     frame::{CameraRequest, Frame, FrameSource, StreamHandle},
//!     Error,
//! };
//! use std::time::Instant;
//!
//! struct Webcam;
//!
//! impl FrameSource for Webcam {
//!     fn start(&mut self, _request: &CameraRequest) -> Result<StreamHandle, CameraError> {
//!         Ok(StreamHandle { id: 1, width: 640, height: 480 })
//!     }
//!     fn stop(&mut self) {}
//!     fn current_frame(&mut self) -> Option<Frame> {
//!         None
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut engine = GestureEngine::with_model_loader(
//!     Config::default(),
//!     Box::new(Webcam),
//!     || Err(Error::ModelLoad("no model bundled".into())),
//!     EventLog::default(),
//! )?;
//! engine.enable()?;
//! loop {
//!     engine.tick(Instant::now());
//!     for event in engine.sink_mut().events.drain(..) {
//!         println!("{event:?}");
//!     }
//! }
//! # }
//! ```

/// Error types and result handling
pub mod error;

/// Constants used throughout the engine
pub mod constants;

/// Configuration management
pub mod config;

/// Device capability probing and quality profiles
pub mod capability;

/// Frame skipping and rate limiting
pub mod pacing;

/// Hand landmark geometry
pub mod landmarks;

/// Video frames and the camera source boundary
pub mod frame;

/// Hand estimation backends (landmark model and motion fallback)
pub mod estimator;

/// Gesture classification from landmarks or motion
pub mod classifier;

/// Temporal debouncing of classified gestures
pub mod debouncer;

/// Continuous zoom, position and rotation channels
pub mod channels;

/// Engine lifecycle and per-frame orchestration
pub mod engine;

/// Utility functions
pub mod utils;

pub use error::{Error, Result};
