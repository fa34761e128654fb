//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use serial_test::serial;
use tilebox::config::AppConfig;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("TBX_PHYSICS__GRAVITY", "-9.8");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.physics.gravity, -9.8);
    std::env::remove_var("TBX_PHYSICS__GRAVITY");
}

#[test]
#[serial]
fn test_file_config_loading() {
    // Remove env var to test file-based config
    std::env::remove_var("TBX_PHYSICS__GRAVITY");

    let config = AppConfig::load().unwrap();
    // config/default.toml pins the same value as the built-in default
    assert_eq!(config.physics.gravity, -20.0);
    assert_eq!(config.debug.log_level, "info");
}

#[test]
#[serial]
fn test_env_log_level_override() {
    std::env::set_var("TBX_DEBUG__LOG_LEVEL", "trace");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.debug.log_level, "trace");
    std::env::remove_var("TBX_DEBUG__LOG_LEVEL");
}
