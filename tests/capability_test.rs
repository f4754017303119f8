//! Device tier classification

use gesture_interaction::capability::{
    probe, probe_gpu_with_timeout, DeviceSignals, GpuContext, PerformanceTier, QualityProfile,
};
use rand::Rng;
use std::time::Duration;

const IPHONE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15";
const ANDROID_UA: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 Chrome/120.0 Mobile";
const DESKTOP_UA: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 Chrome/120.0";

fn desktop() -> DeviceSignals {
    DeviceSignals {
        user_agent: DESKTOP_UA.to_string(),
        hardware_concurrency: Some(8),
        device_memory_gb: Some(8.0),
        gpu: Some(GpuContext {
            renderer: Some("NVIDIA GeForce RTX 3070".to_string()),
        }),
        ..DeviceSignals::default()
    }
}

fn phone(user_agent: &str) -> DeviceSignals {
    DeviceSignals {
        user_agent: user_agent.to_string(),
        hardware_concurrency: Some(8),
        device_memory_gb: Some(8.0),
        viewport_width: 820,
        viewport_height: 1180,
        device_pixel_ratio: 3.0,
        ..DeviceSignals::default()
    }
}

#[test]
fn test_mobile_low_end_is_low() {
    let mut signals = phone(ANDROID_UA);
    signals.hardware_concurrency = Some(4);
    assert_eq!(probe(&signals), PerformanceTier::Low);

    let mut signals = phone(ANDROID_UA);
    signals.device_memory_gb = Some(2.0);
    assert_eq!(probe(&signals), PerformanceTier::Low);
}

#[test]
fn test_mobile_small_screen_is_low() {
    let mut signals = phone(IPHONE_UA);
    signals.viewport_width = 390;
    signals.viewport_height = 844;
    assert_eq!(probe(&signals), PerformanceTier::Low);
}

#[test]
fn test_capable_mobile_is_medium() {
    assert_eq!(probe(&phone(ANDROID_UA)), PerformanceTier::Medium);
    assert_eq!(probe(&phone(IPHONE_UA)), PerformanceTier::Medium);
}

#[test]
fn test_mobile_with_unknown_hardware_is_low() {
    let mut signals = phone(IPHONE_UA);
    signals.hardware_concurrency = None;
    signals.device_memory_gb = None;
    assert_eq!(probe(&signals), PerformanceTier::Low);
}

#[test]
fn test_desktop_low_end_is_low() {
    let mut signals = desktop();
    signals.hardware_concurrency = Some(2);
    assert_eq!(probe(&signals), PerformanceTier::Low);

    let mut signals = desktop();
    signals.viewport_width = 700;
    assert_eq!(probe(&signals), PerformanceTier::Low);
}

#[test]
fn test_desktop_without_gpu_is_low() {
    let mut signals = desktop();
    signals.gpu = None;
    assert_eq!(probe(&signals), PerformanceTier::Low);
}

#[test]
fn test_integrated_gpu_is_medium() {
    for renderer in ["Intel(R) UHD Graphics 620", "Mali-G78", "Adreno (TM) 740"] {
        let mut signals = desktop();
        signals.gpu = Some(GpuContext {
            renderer: Some(renderer.to_string()),
        });
        assert_eq!(probe(&signals), PerformanceTier::Medium, "{renderer}");
    }
}

#[test]
fn test_discrete_gpu_is_high() {
    assert_eq!(probe(&desktop()), PerformanceTier::High);
}

#[test]
fn test_masked_renderer_is_high() {
    let mut signals = desktop();
    signals.gpu = Some(GpuContext { renderer: None });
    assert_eq!(probe(&signals), PerformanceTier::High);
}

#[test]
fn test_unknown_memory_is_not_low() {
    let mut signals = desktop();
    signals.device_memory_gb = None;
    signals.hardware_concurrency = None;
    assert_eq!(probe(&signals), PerformanceTier::High);
}

#[test]
fn test_probe_is_deterministic() {
    let mut rng = rand::thread_rng();
    let agents = [IPHONE_UA, ANDROID_UA, DESKTOP_UA, ""];
    for _ in 0..200 {
        let signals = DeviceSignals {
            user_agent: agents[rng.gen_range(0..agents.len())].to_string(),
            hardware_concurrency: rng.gen_bool(0.8).then(|| rng.gen_range(1..32)),
            device_memory_gb: rng.gen_bool(0.8).then(|| f64::from(rng.gen_range(1..16u32))),
            viewport_width: rng.gen_range(320..3840),
            viewport_height: rng.gen_range(480..2160),
            device_pixel_ratio: 1.0,
            gpu: rng.gen_bool(0.9).then(|| GpuContext {
                renderer: Some(if rng.gen_bool(0.5) { "Intel Iris" } else { "Radeon RX" }.to_string()),
            }),
        };
        assert_eq!(probe(&signals), probe(&signals.clone()));
    }
}

#[test]
fn test_gpu_probe_success_passes_through() {
    let gpu = probe_gpu_with_timeout(
        || {
            Some(GpuContext {
                renderer: Some("Mali-G78".to_string()),
            })
        },
        Duration::from_secs(2),
    );
    assert_eq!(gpu.and_then(|g| g.renderer).as_deref(), Some("Mali-G78"));
}

#[test]
fn test_quality_profile_from_signals() {
    let profile = QualityProfile::from_signals(&phone(ANDROID_UA));
    assert_eq!(profile.tier, PerformanceTier::Medium);
    assert_eq!(profile.pixel_ratio, 1.5);
    assert_eq!(profile.target_fps, 45);
    assert!(!profile.enable_bloom);
}
