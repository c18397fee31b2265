//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use stickdrive::config::AppConfig;
use stickdrive_core::MotionPolicy;
use stickdrive_input::ControllerMode;
use serial_test::serial;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("SD_WINDOW__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("SD_WINDOW__TITLE");
    assert_eq!(config.window.title, "Test From Env");
}

#[test]
#[serial]
fn test_env_selects_policy_and_mode() {
    std::env::set_var("SD_MOTION__POLICY", "translate");
    std::env::set_var("SD_CONTROLLER__INITIAL_MODE", "custom");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("SD_MOTION__POLICY");
    std::env::remove_var("SD_CONTROLLER__INITIAL_MODE");

    assert_eq!(config.motion.policy, MotionPolicy::Translate);
    assert_eq!(config.controller.initial_mode, ControllerMode::Custom);
}

#[test]
#[serial]
fn test_default_file_matches_builtin_defaults() {
    let from_file = AppConfig::load().unwrap();
    let builtin = AppConfig::default();

    assert_eq!(from_file.window.title, builtin.window.title);
    assert_eq!(from_file.joystick.outer_radius, builtin.joystick.outer_radius);
    assert_eq!(from_file.joystick.padding, builtin.joystick.padding);
    assert_eq!(from_file.controller.initial_mode, builtin.controller.initial_mode);
    assert_eq!(from_file.controller.gamepad, builtin.controller.gamepad);
    assert_eq!(from_file.motion.policy, builtin.motion.policy);
    assert_eq!(from_file.camera.radius, builtin.camera.radius);
}

#[test]
#[serial]
fn test_invalid_env_value_is_an_error() {
    std::env::set_var("SD_MOTION__POLICY", "teleport");
    let result = AppConfig::load();
    std::env::remove_var("SD_MOTION__POLICY");

    let err = result.unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}
