//! Configuration loading and validation

use gesture_interaction::{
    config::{ChannelConfig, Config, EXAMPLE_CONFIG},
    Error,
};
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("gesture-interaction-{}-{name}", std::process::id()))
}

#[test]
fn test_file_round_trip() {
    let path = temp_path("round-trip.yaml");

    let mut config = Config::default();
    config.debounce.required_repeats = 5;
    config.channels.position = ChannelConfig {
        gain: 2.5,
        ..ChannelConfig::position()
    };
    config.to_file(&path).unwrap();

    let loaded = Config::from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_missing_file_is_io_error() {
    let result = Config::from_file(temp_path("does-not-exist.yaml"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_malformed_yaml_is_config_error() {
    let result = Config::from_yaml("debounce: [not, a, map");
    assert!(matches!(result, Err(Error::ConfigError(_))));
}

#[test]
fn test_partial_config_keeps_defaults() {
    let config = Config::from_yaml("engine:\n  target_fps: 60\ncamera:\n  user_facing: false\n").unwrap();
    assert_eq!(config.engine.target_fps, 60);
    assert!(!config.camera.user_facing);
    assert_eq!(config.camera.width, 640);
    assert_eq!(config.debounce, Config::default().debounce);
}

#[test]
fn test_example_config_is_valid() {
    let config = Config::from_yaml(EXAMPLE_CONFIG).unwrap();
    assert!(config.validate().is_ok());
}

#[test]
fn test_validation_errors() {
    let cases: [(&str, fn(&mut Config)); 10] = [
        ("nth frame", |c: &mut Config| c.engine.process_every_nth_frame = 0),
        ("fps", |c: &mut Config| c.engine.target_fps = 0),
        ("repeats", |c: &mut Config| c.debounce.required_repeats = 0),
        ("window", |c: &mut Config| c.debounce.stability_window_ms = 0),
        ("stability frames", |c: &mut Config| c.debounce.stability_frames = 0),
        ("ok threshold", |c: &mut Config| c.classifier.ok_threshold = 0.0),
        ("motion history", |c: &mut Config| c.classifier.motion.min_history = 20),
        ("rotation gain", |c: &mut Config| c.channels.rotation.gain = 0.0),
        ("position capacity", |c: &mut Config| c.channels.position.capacity = 13),
        ("zoom threshold", |c: &mut Config| c.channels.zoom.activation_threshold = f64::NAN),
    ];

    for (name, mutate) in cases {
        let mut config = Config::default();
        mutate(&mut config);
        assert!(
            matches!(config.validate(), Err(Error::ConfigError(_))),
            "{name} should be rejected"
        );
    }
}

#[test]
fn test_any_cooldown_pairing_is_accepted() {
    let mut config = Config::default();
    config.debounce.per_gesture_cooldown_ms = 500;
    config.debounce.global_cooldown_ms = 2000;
    assert!(config.validate().is_ok());

    config.debounce.per_gesture_cooldown_ms = 0;
    config.debounce.global_cooldown_ms = 0;
    assert!(config.validate().is_ok());
}
