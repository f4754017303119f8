//! The gesture interaction engine.
//!
//! Owns the camera lifecycle and drives one processing pass per host tick:
//! frame → estimator → classifier → debouncer → `on_gesture`, and in parallel
//! hands → continuous channels → `on_zoom` / `on_position_change` /
//! `on_rotation_change`. Everything runs on the caller's thread; a failed
//! frame is logged and skipped, never propagated.

use crate::{
    channels::{ContinuousChannel, PositionDelta, PositionTracker, RotationDelta, RotationTracker, ZoomTracker},
    classifier::{GestureClassifier, GestureSymbol},
    config::Config,
    debouncer::{Debouncer, Decision, GestureFeedback},
    error::{Affordance, CameraError},
    estimator::{load_model_with_timeout, select_estimator, Estimate, EstimatorKind, HandEstimator, LandmarkModel},
    frame::{CameraRequest, FrameSource, StreamHandle},
    pacing::{FrameRateLimiter, FrameSkipper},
    Result,
};
use log::{debug, info, warn};
use serde::Serialize;
use std::time::Instant;

/// Receiver of engine output
pub trait InteractionSink {
    /// A debounced discrete gesture fired
    fn on_gesture(&mut self, gesture: GestureSymbol);

    /// Signed zoom delta; negative zooms in
    fn on_zoom(&mut self, _delta: f64) {}

    /// 3D position delta
    fn on_position_change(&mut self, _dx: f64, _dy: f64, _dz: f64) {}

    /// Angular delta, radians
    fn on_rotation_change(&mut self, _yaw: f64, _pitch: f64) {}
}

/// One emitted event
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum InteractionEvent {
    Gesture { gesture: GestureSymbol },
    Zoom { delta: f64 },
    Position { dx: f64, dy: f64, dz: f64 },
    Rotation { yaw: f64, pitch: f64 },
}

/// Sink that records every event in order
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    pub events: Vec<InteractionEvent>,
}

impl EventLog {
    /// Gestures only, in firing order
    #[must_use]
    pub fn gestures(&self) -> Vec<GestureSymbol> {
        self.events
            .iter()
            .filter_map(|e| match e {
                InteractionEvent::Gesture { gesture } => Some(*gesture),
                _ => None,
            })
            .collect()
    }

    /// Zoom deltas only
    #[must_use]
    pub fn zooms(&self) -> Vec<f64> {
        self.events
            .iter()
            .filter_map(|e| match e {
                InteractionEvent::Zoom { delta } => Some(*delta),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl InteractionSink for EventLog {
    fn on_gesture(&mut self, gesture: GestureSymbol) {
        self.events.push(InteractionEvent::Gesture { gesture });
    }

    fn on_zoom(&mut self, delta: f64) {
        self.events.push(InteractionEvent::Zoom { delta });
    }

    fn on_position_change(&mut self, dx: f64, dy: f64, dz: f64) {
        self.events.push(InteractionEvent::Position { dx, dy, dz });
    }

    fn on_rotation_change(&mut self, yaw: f64, pitch: f64) {
        self.events.push(InteractionEvent::Rotation { yaw, pitch });
    }
}

/// Camera state as seen by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraStatus {
    /// No stream held
    Off,
    /// Frames are flowing
    Streaming(StreamHandle),
    /// Acquisition or playback failed; see [`GestureEngine::affordance`]
    Failed(CameraError),
}

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Engine is disabled; nothing ran
    Disabled,
    /// Camera is not streaming
    CameraUnavailable,
    /// Dropped by frame skipping or rate limiting
    Skipped,
    /// Source had no frame ready
    NoFrame,
    /// Estimator failed on this frame; frame dropped
    EstimationFailed,
    /// Frame went through the whole pipeline
    Processed { symbol: GestureSymbol, decision: Decision },
}

/// Per-session state, built on enable and dropped on disable
struct Session {
    classifier: GestureClassifier,
    debouncer: Debouncer,
    zoom: ZoomTracker,
    position: PositionTracker,
    rotation: RotationTracker,
    skipper: FrameSkipper,
    limiter: FrameRateLimiter,
}

impl Session {
    fn new(config: &Config) -> Self {
        Self {
            classifier: GestureClassifier::new(config.classifier.clone()),
            debouncer: Debouncer::new(config.debounce.clone()),
            zoom: ZoomTracker::new(config.channels.zoom.clone()),
            position: PositionTracker::new(config.channels.position.clone()),
            rotation: RotationTracker::new(config.channels.rotation.clone()),
            skipper: FrameSkipper::new(config.engine.process_every_nth_frame),
            limiter: FrameRateLimiter::new(config.engine.target_fps),
        }
    }
}

/// Main engine struct
pub struct GestureEngine<K: InteractionSink> {
    config: Config,
    source: Box<dyn FrameSource>,
    estimator: Box<dyn HandEstimator>,
    estimator_kind: EstimatorKind,
    sink: K,
    camera: CameraStatus,
    session: Option<Session>,
}

impl<K: InteractionSink> GestureEngine<K> {
    /// Create a disabled engine around an already chosen estimator
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration does not validate
    pub fn new(
        config: Config,
        source: Box<dyn FrameSource>,
        estimator: Box<dyn HandEstimator>,
        estimator_kind: EstimatorKind,
        sink: K,
    ) -> Result<Self> {
        config.validate()?;
        info!("Gesture engine created with {} backend", estimator.name());
        Ok(Self {
            config,
            source,
            estimator,
            estimator_kind,
            sink,
            camera: CameraStatus::Off,
            session: None,
        })
    }

    /// Create a disabled engine, trying the landmark model once with the
    /// configured timeout and falling back to motion estimation
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration does not validate
    pub fn with_model_loader<F>(config: Config, source: Box<dyn FrameSource>, loader: F, sink: K) -> Result<Self>
    where
        F: FnOnce() -> Result<Box<dyn LandmarkModel>> + Send + 'static,
    {
        config.validate()?;
        let (estimator, kind) = select_estimator(load_model_with_timeout(loader, config.engine.model_load_timeout()));
        Self::new(config, source, estimator, kind, sink)
    }

    /// Follow the host's `enabled` flag
    ///
    /// # Errors
    ///
    /// Camera acquisition failures when enabling
    pub fn set_enabled(&mut self, enabled: bool) -> std::result::Result<(), CameraError> {
        if enabled {
            self.enable()
        } else {
            self.disable();
            Ok(())
        }
    }

    /// Build session state and acquire the camera
    ///
    /// # Errors
    ///
    /// Camera acquisition failures; the engine stays enabled so the host can retry
    pub fn enable(&mut self) -> std::result::Result<(), CameraError> {
        if self.session.is_none() {
            info!("Enabling gesture engine");
            self.config.engine.enabled = true;
            self.session = Some(Session::new(&self.config));
            self.estimator.reset();
        }
        match self.camera {
            CameraStatus::Streaming(_) => Ok(()),
            _ => self.start_camera(),
        }
    }

    /// Stop processing and release the camera synchronously
    pub fn disable(&mut self) {
        if self.session.is_some() {
            info!("Disabling gesture engine");
        }
        self.config.engine.enabled = false;
        self.release_camera();
        self.session = None;
        self.estimator.reset();
    }

    /// Try the camera again after a failure, without rebuilding the engine
    ///
    /// # Errors
    ///
    /// The new acquisition failure, if any
    pub fn retry_camera(&mut self) -> std::result::Result<(), CameraError> {
        if self.session.is_none() {
            return self.enable();
        }
        self.start_camera()
    }

    /// Resume playback after a user tap when autoplay was blocked
    ///
    /// # Errors
    ///
    /// `PlaybackBlocked` again if the source still refuses
    pub fn tap_to_play(&mut self) -> std::result::Result<(), CameraError> {
        match self.camera {
            CameraStatus::Failed(CameraError::PlaybackBlocked) => match self.source.resume_playback() {
                Ok(handle) => {
                    info!("Camera playback resumed on stream {}", handle.id);
                    self.camera = CameraStatus::Streaming(handle);
                    Ok(())
                }
                Err(e) => {
                    warn!("Camera playback still blocked: {e}");
                    self.camera = CameraStatus::Failed(e);
                    Err(e)
                }
            },
            CameraStatus::Streaming(_) => Ok(()),
            _ => self.retry_camera(),
        }
    }

    /// Stop the camera but keep the session (e.g. a camera toggle button)
    pub fn stop_camera(&mut self) {
        self.release_camera();
    }

    fn start_camera(&mut self) -> std::result::Result<(), CameraError> {
        let request = CameraRequest::from(&self.config.camera);
        match self.source.start(&request) {
            Ok(handle) => {
                info!("Camera stream {} started at {}x{}", handle.id, handle.width, handle.height);
                self.camera = CameraStatus::Streaming(handle);
                Ok(())
            }
            Err(CameraError::PlaybackBlocked) => {
                // Stream stays acquired so a tap can resume it
                warn!("Camera playback blocked, waiting for user interaction");
                self.camera = CameraStatus::Failed(CameraError::PlaybackBlocked);
                Err(CameraError::PlaybackBlocked)
            }
            Err(e) => {
                warn!("Camera unavailable: {e}");
                self.source.stop();
                self.camera = CameraStatus::Failed(e);
                Err(e)
            }
        }
    }

    fn release_camera(&mut self) {
        if self.camera != CameraStatus::Off {
            debug!("Releasing camera");
            self.source.stop();
            self.camera = CameraStatus::Off;
        }
    }

    /// Run one host tick at time `now`
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let Some(session) = self.session.as_mut() else {
            return TickOutcome::Disabled;
        };

        if !matches!(self.camera, CameraStatus::Streaming(_)) {
            session.debouncer.poll(now);
            return TickOutcome::CameraUnavailable;
        }

        if !session.limiter.should_render(now) || !session.skipper.should_process() {
            return TickOutcome::Skipped;
        }

        let Some(frame) = self.source.current_frame() else {
            session.debouncer.poll(now);
            return TickOutcome::NoFrame;
        };

        let estimate = match self.estimator.estimate(&frame) {
            Ok(estimate) => estimate,
            Err(e) => {
                warn!("{} failed on frame: {e}", self.estimator.name());
                return TickOutcome::EstimationFailed;
            }
        };

        self.process_estimate(&estimate, now)
    }

    /// Run classification, debouncing and the continuous channels on an
    /// estimate produced elsewhere (recorded traces, external trackers)
    pub fn process_estimate(&mut self, estimate: &Estimate, now: Instant) -> TickOutcome {
        let Some(session) = self.session.as_mut() else {
            return TickOutcome::Disabled;
        };

        let symbol = session.classifier.classify(estimate);
        let decision = session.debouncer.update(symbol, now);
        debug!("frame: {symbol} -> {decision:?}");

        if let Some(gesture) = decision.fired() {
            self.sink.on_gesture(gesture);
        }

        if let Estimate::Hands(hands) = estimate {
            let locked = session.debouncer.is_locked();

            if let Some(delta) = session.zoom.update(hands, locked, now) {
                self.sink.on_zoom(delta);
            }
            if let Some(PositionDelta { dx, dy, dz }) = session.position.update(hands, locked, now) {
                self.sink.on_position_change(dx, dy, dz);
            }
            if let Some(RotationDelta { yaw, pitch }) = session.rotation.update(hands, locked, now) {
                self.sink.on_rotation_change(yaw, pitch);
            }
        }

        TickOutcome::Processed { symbol, decision }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub const fn camera_status(&self) -> CameraStatus {
        self.camera
    }

    /// What the host should offer the user while the camera is unavailable
    #[must_use]
    pub const fn affordance(&self) -> Option<Affordance> {
        match self.camera {
            CameraStatus::Failed(e) => Some(e.affordance()),
            _ => None,
        }
    }

    #[must_use]
    pub const fn estimator_kind(&self) -> EstimatorKind {
        self.estimator_kind
    }

    /// Hold progress for the on-screen indicator
    #[must_use]
    pub fn feedback(&self) -> Option<GestureFeedback> {
        self.session.as_ref().and_then(|s| s.debouncer.feedback())
    }

    /// Gesture currently holding the lock
    #[must_use]
    pub fn locked_gesture(&self) -> Option<GestureSymbol> {
        self.session.as_ref().and_then(|s| s.debouncer.locked())
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub const fn sink(&self) -> &K {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }
}

impl<K: InteractionSink> Drop for GestureEngine<K> {
    fn drop(&mut self) {
        self.release_camera();
    }
}
