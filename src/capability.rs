//! Device capability probing.
//!
//! Classifies the device into a [`PerformanceTier`] once per session from
//! static hints and derives the downstream quality budget from it. Missing
//! hints are treated as "capable enough", never as errors.

use crate::{utils::run_with_timeout, Error};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::{fmt, time::Duration};

/// Mobile user-agent markers (matched case-insensitively)
const MOBILE_UA_MARKERS: [&str; 4] = ["iphone", "ipad", "ipod", "android"];

/// Renderer substrings of integrated or mobile-class GPUs
const INTEGRATED_GPU_MARKERS: [&str; 3] = ["Intel", "Mali", "Adreno"];

const LOW_CORE_COUNT: u32 = 4;
const HIGH_CORE_COUNT: u32 = 6;
const LOW_MEMORY_GB: f64 = 4.0;
const HIGH_MEMORY_GB: f64 = 6.0;
const SMALL_SCREEN_WIDTH: u32 = 768;
const SMALL_SCREEN_HEIGHT: u32 = 600;

/// Coarse device class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceTier {
    Low,
    Medium,
    High,
}

impl fmt::Display for PerformanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        })
    }
}

/// A GPU context that could be created
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GpuContext {
    /// Unmasked renderer string, when the driver exposes it
    pub renderer: Option<String>,
}

/// Static hardware hints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceSignals {
    pub user_agent: String,
    pub hardware_concurrency: Option<u32>,
    /// Device memory in GB
    pub device_memory_gb: Option<f64>,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub device_pixel_ratio: f64,
    /// `None` when no GPU context could be obtained
    pub gpu: Option<GpuContext>,
}

impl Default for DeviceSignals {
    fn default() -> Self {
        Self {
            user_agent: String::new(),
            hardware_concurrency: None,
            device_memory_gb: None,
            viewport_width: 1920,
            viewport_height: 1080,
            device_pixel_ratio: 1.0,
            gpu: Some(GpuContext::default()),
        }
    }
}

impl DeviceSignals {
    #[must_use]
    pub fn is_mobile(&self) -> bool {
        let ua = self.user_agent.to_lowercase();
        MOBILE_UA_MARKERS.iter().any(|marker| ua.contains(*marker))
    }

    #[must_use]
    pub fn is_small_screen(&self) -> bool {
        self.viewport_width < SMALL_SCREEN_WIDTH || self.viewport_height < SMALL_SCREEN_HEIGHT
    }

    /// Known-low cores or memory; unknown values never count
    #[must_use]
    pub fn is_low_end(&self) -> bool {
        self.hardware_concurrency.is_some_and(|c| c <= LOW_CORE_COUNT)
            || self.device_memory_gb.is_some_and(|m| m <= LOW_MEMORY_GB)
    }

    /// Known-high cores or memory
    #[must_use]
    pub fn is_high_end(&self) -> bool {
        self.hardware_concurrency.is_some_and(|c| c >= HIGH_CORE_COUNT)
            || self.device_memory_gb.is_some_and(|m| m >= HIGH_MEMORY_GB)
    }
}

/// Classify a device. Pure: identical signals always give the same tier.
#[must_use]
pub fn probe(signals: &DeviceSignals) -> PerformanceTier {
    let mobile = signals.is_mobile();
    let small = signals.is_small_screen();
    let low_end = signals.is_low_end();

    let tier = if mobile {
        if low_end || small {
            PerformanceTier::Low
        } else if signals.is_high_end() {
            PerformanceTier::Medium
        } else {
            PerformanceTier::Low
        }
    } else if low_end || small {
        PerformanceTier::Low
    } else {
        match &signals.gpu {
            None => PerformanceTier::Low,
            Some(GpuContext {
                renderer: Some(renderer),
            }) if INTEGRATED_GPU_MARKERS.iter().any(|m| renderer.contains(*m)) => PerformanceTier::Medium,
            Some(_) => PerformanceTier::High,
        }
    };

    debug!("probe: mobile={mobile} small={small} low_end={low_end} -> {tier}");
    tier
}

/// Run a GPU query with a wall-clock limit. A query that fails or times out
/// counts as "no GPU context".
pub fn probe_gpu_with_timeout<F>(query: F, timeout: Duration) -> Option<GpuContext>
where
    F: FnOnce() -> Option<GpuContext> + Send + 'static,
{
    match run_with_timeout(
        move || Ok(query()),
        timeout,
        Error::InvalidInput(format!("GPU probe timed out after {} ms", timeout.as_millis())),
    ) {
        Ok(gpu) => gpu,
        Err(e) => {
            warn!("{e}, assuming no GPU context");
            None
        }
    }
}

/// Rendering budget derived from the tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityProfile {
    pub tier: PerformanceTier,
    pub snow_particles: u32,
    pub stars: u32,
    pub firework_particles: u32,
    pub sparkles: u32,
    pub enable_bloom: bool,
    pub enable_shadows: bool,
    pub enable_aurora: bool,
    pub enable_contact_shadows: bool,
    pub target_fps: u32,
    pub pixel_ratio: f64,
    /// `None` shows every carousel image
    pub carousel_images: Option<u32>,
}

impl QualityProfile {
    #[must_use]
    pub fn for_tier(tier: PerformanceTier, device_pixel_ratio: f64) -> Self {
        let high = tier == PerformanceTier::High;
        let (snow_particles, stars, firework_particles, sparkles) = match tier {
            PerformanceTier::High => (600, 5000, 200, 300),
            PerformanceTier::Medium => (250, 1500, 80, 100),
            PerformanceTier::Low => (100, 500, 30, 40),
        };
        let (target_fps, pixel_ratio, carousel_images) = match tier {
            PerformanceTier::High => (60, device_pixel_ratio.min(2.0), None),
            PerformanceTier::Medium => (45, device_pixel_ratio.min(1.5), Some(7)),
            PerformanceTier::Low => (30, 1.0, Some(4)),
        };

        Self {
            tier,
            snow_particles,
            stars,
            firework_particles,
            sparkles,
            enable_bloom: high,
            enable_shadows: high,
            enable_aurora: high,
            enable_contact_shadows: high,
            target_fps,
            pixel_ratio,
            carousel_images,
        }
    }

    /// Probe and derive in one step
    #[must_use]
    pub fn from_signals(signals: &DeviceSignals) -> Self {
        Self::for_tier(probe(signals), signals.device_pixel_ratio)
    }
}
