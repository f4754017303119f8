//! Command-line front end for the gesture interaction engine.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gesture_interaction::{
    capability::{probe, probe_gpu_with_timeout, DeviceSignals, GpuContext, QualityProfile},
    config::{Config, EXAMPLE_CONFIG},
    engine::{EventLog, GestureEngine, InteractionEvent, TickOutcome},
    error::CameraError,
    estimator::{
        Estimate, EstimatorKind, HandEstimator, LandmarkModel, MlHandEstimator, MotionFallbackEstimator,
        MotionRegionMap,
    },
    frame::{CameraRequest, Frame, FrameSource, StreamHandle},
    landmarks::HandLandmarks,
};
use log::{info, warn};
use serde::Deserialize;
use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify a device and print its quality profile
    Probe(ProbeArgs),

    /// Feed a recorded trace of hand landmarks through the engine
    Replay {
        /// Trace file (YAML)
        trace: PathBuf,

        /// Path to configuration file (YAML format)
        #[arg(short = 'C', long)]
        config: Option<PathBuf>,
    },

    /// Print an example configuration file
    ExampleConfig,
}

#[derive(clap::Args, Debug)]
struct ProbeArgs {
    /// User agent string
    #[arg(long, default_value = "")]
    user_agent: String,

    /// Logical CPU cores
    #[arg(long)]
    cores: Option<u32>,

    /// Device memory in GB
    #[arg(long)]
    memory: Option<f64>,

    /// Viewport width
    #[arg(long, default_value = "1920")]
    width: u32,

    /// Viewport height
    #[arg(long, default_value = "1080")]
    height: u32,

    /// Device pixel ratio
    #[arg(long, default_value = "1.0")]
    dpr: f64,

    /// GPU renderer string
    #[arg(long, conflicts_with = "no_gpu")]
    gpu: Option<String>,

    /// Treat the device as having no GPU context
    #[arg(long)]
    no_gpu: bool,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<PathBuf>,
}

/// A recorded session
#[derive(Debug, Deserialize)]
struct Trace {
    frames: Vec<TraceFrame>,
}

/// One recorded frame: either hands or motion energy
#[derive(Debug, Deserialize)]
struct TraceFrame {
    at_ms: u64,
    #[serde(default)]
    hands: Vec<Vec<[f32; 2]>>,
    #[serde(default)]
    motion: Option<MotionRegionMap>,
}

impl Trace {
    /// Backend the recording came from: motion-only traces replay through the
    /// fallback, anything with hand frames through the landmark path
    fn estimator(&self) -> (Box<dyn HandEstimator>, EstimatorKind) {
        if self.frames.iter().any(|f| f.motion.is_none()) {
            (Box::new(MlHandEstimator::new(Box::new(RecordedHands))), EstimatorKind::Landmarks)
        } else {
            (Box::new(MotionFallbackEstimator::new()), EstimatorKind::MotionFallback)
        }
    }
}

impl TraceFrame {
    fn instant(&self, start: Instant) -> Result<Instant> {
        start
            .checked_add(Duration::from_millis(self.at_ms))
            .with_context(|| format!("frame time {} ms out of range", self.at_ms))
    }

    fn to_estimate(&self) -> Result<Estimate> {
        if let Some(motion) = self.motion {
            return Ok(Estimate::Motion(Some(motion)));
        }
        let hands = self
            .hands
            .iter()
            .map(|pairs| HandLandmarks::from_pairs(pairs))
            .collect::<gesture_interaction::Result<Vec<_>>>()
            .with_context(|| format!("invalid hand at {} ms", self.at_ms))?;
        Ok(Estimate::Hands(hands))
    }
}

/// Landmark model stand-in: recorded hands are fed to the engine directly
struct RecordedHands;

impl LandmarkModel for RecordedHands {
    fn estimate_hands(&mut self, _frame: &Frame) -> gesture_interaction::Result<Vec<HandLandmarks>> {
        Ok(Vec::new())
    }
}

/// Camera stand-in for replay: always available, never produces frames
struct ReplaySource;

impl FrameSource for ReplaySource {
    fn start(&mut self, request: &CameraRequest) -> std::result::Result<StreamHandle, CameraError> {
        Ok(StreamHandle {
            id: 0,
            width: request.ideal_width,
            height: request.ideal_height,
        })
    }

    fn stop(&mut self) {}

    fn current_frame(&mut self) -> Option<Frame> {
        None
    }
}

fn load_config(path: Option<&Path>) -> Config {
    match path {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            match Config::from_file(path) {
                Ok(cfg) => cfg,
                Err(e) => {
                    warn!("Failed to load config file: {e}. Using defaults.");
                    Config::default()
                }
            }
        }
        None => Config::default(),
    }
}

fn run_probe(args: ProbeArgs) -> Result<()> {
    let config = load_config(args.config.as_deref());

    let gpu = if args.no_gpu {
        None
    } else {
        let renderer = args.gpu.clone();
        probe_gpu_with_timeout(move || Some(GpuContext { renderer }), config.engine.gpu_probe_timeout())
    };

    let signals = DeviceSignals {
        user_agent: args.user_agent,
        hardware_concurrency: args.cores,
        device_memory_gb: args.memory,
        viewport_width: args.width,
        viewport_height: args.height,
        device_pixel_ratio: args.dpr,
        gpu,
    };

    let tier = probe(&signals);
    println!("tier: {tier}");
    let profile = QualityProfile::for_tier(tier, signals.device_pixel_ratio);
    print!("{}", serde_yaml::to_string(&profile)?);
    Ok(())
}

fn run_replay(trace_path: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path);
    let content = std::fs::read_to_string(trace_path)
        .with_context(|| format!("failed to read trace {}", trace_path.display()))?;
    let trace: Trace = serde_yaml::from_str(&content).context("failed to parse trace")?;
    info!("Replaying {} frames from {}", trace.frames.len(), trace_path.display());

    let (estimator, kind) = trace.estimator();
    let mut engine = GestureEngine::new(config, Box::new(ReplaySource), estimator, kind, EventLog::default())?;
    engine.enable()?;
    info!("Replaying through {kind:?} estimation");

    let start = Instant::now();
    let mut fired = 0usize;
    for frame in &trace.frames {
        let now = frame.instant(start)?;
        let outcome = engine.process_estimate(&frame.to_estimate()?, now);
        if let TickOutcome::Processed { symbol, decision } = outcome {
            log::debug!("{:>6} ms  {symbol:<9} {decision:?}", frame.at_ms);
        }

        for event in engine.sink_mut().events.drain(..) {
            if matches!(event, InteractionEvent::Gesture { .. }) {
                fired += 1;
            }
            println!("{:>6} ms  {}", frame.at_ms, serde_yaml::to_string(&event)?.trim_end().replace('\n', ", "));
        }
    }

    info!("Replay finished: {fired} gestures fired");
    engine.disable();
    Ok(())
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    match args.command {
        Command::Probe(probe_args) => run_probe(probe_args),
        Command::Replay { trace, config } => run_replay(&trace, config.as_deref()),
        Command::ExampleConfig => {
            print!("{EXAMPLE_CONFIG}");
            Ok(())
        }
    }
}
