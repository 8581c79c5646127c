//! Integration tests for AppSettings loading with layered precedence.
//!
//! Precedence:
//! - Defaults → Config file: file wins for every key it specifies
//! - Any → Env vars: REPLACE (explicit user override)
//!
//! Each test uses its own environment prefix so tests can run in parallel.

use std::env;
use std::fs;

use tempfile::TempDir;

use cliverb::config::{env_prefix, AppSettings, DebuggerSettings};
use cliverb::exitcode;

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("app.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn given_no_config_file_when_load_then_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.toml");

    // Act
    let settings = AppSettings::load_from(Some(&missing), "CLIVERB_CFG_DEFAULTS").unwrap();

    // Assert
    assert_eq!(settings, AppSettings::default());
    assert!(settings.debug_param);
    assert_eq!(settings.debugger, DebuggerSettings::default());
}

#[test]
fn given_full_config_file_when_load_then_file_values_used() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
debug_param = false
color = false

[debugger]
poll_interval_ms = 50
timeout_secs = 3
"#,
    );

    // Act
    let settings = AppSettings::load_from(Some(&path), "CLIVERB_CFG_FULL").unwrap();

    // Assert
    assert!(!settings.debug_param);
    assert!(!settings.color);
    assert_eq!(settings.debugger.poll_interval_ms, 50);
    assert_eq!(settings.debugger.timeout_secs, Some(3));
}

#[test]
fn given_partial_config_file_when_load_then_missing_keys_keep_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[debugger]\ntimeout_secs = 10\n");

    let settings = AppSettings::load_from(Some(&path), "CLIVERB_CFG_PARTIAL").unwrap();

    assert!(settings.debug_param);
    assert!(settings.color);
    assert_eq!(settings.debugger.poll_interval_ms, 500);
    assert_eq!(settings.debugger.timeout_secs, Some(10));
}

#[test]
fn given_env_vars_when_load_then_override_config_file() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "debug_param = true\n[debugger]\npoll_interval_ms = 50\n");
    env::set_var("CLIVERB_CFG_ENV_DEBUG_PARAM", "false");
    env::set_var("CLIVERB_CFG_ENV_DEBUGGER__POLL_INTERVAL_MS", "20");
    env::set_var("CLIVERB_CFG_ENV_DEBUGGER__TIMEOUT_SECS", "7");

    // Act
    let settings = AppSettings::load_from(Some(&path), "CLIVERB_CFG_ENV").unwrap();

    // Assert
    assert!(!settings.debug_param);
    assert_eq!(settings.debugger.poll_interval_ms, 20);
    assert_eq!(settings.debugger.timeout_secs, Some(7));

    env::remove_var("CLIVERB_CFG_ENV_DEBUG_PARAM");
    env::remove_var("CLIVERB_CFG_ENV_DEBUGGER__POLL_INTERVAL_MS");
    env::remove_var("CLIVERB_CFG_ENV_DEBUGGER__TIMEOUT_SECS");
}

#[test]
fn given_invalid_toml_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "debug_param = [not toml");

    let err = AppSettings::load_from(Some(&path), "CLIVERB_CFG_INVALID").unwrap_err();

    assert_eq!(err.exit_code(), exitcode::CONFIG);
    assert!(err.to_string().contains("config error"));
}

#[test]
fn given_wrong_value_type_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "debug_param = \"sometimes\"\n");

    let result = AppSettings::load_from(Some(&path), "CLIVERB_CFG_TYPE");

    assert!(result.is_err());
}

#[test]
fn given_app_name_when_building_env_prefix_then_matches_loader_convention() {
    assert_eq!(env_prefix("cliverb-demo"), "CLIVERB_DEMO");
}
