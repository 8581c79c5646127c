//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/<app>/<app>.toml`
//! 3. Environment variables: `<APP>_*` prefix, `__` between nested keys
//!    (e.g. `MYAPP_DEBUGGER__TIMEOUT_SECS=30`)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;

/// Settings of the wait-for-debugger aid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DebuggerSettings {
    /// How often to check whether a debugger got attached
    pub poll_interval_ms: u64,
    /// Give up waiting after this many seconds (default: wait forever)
    pub timeout_secs: Option<u64>,
}

impl Default for DebuggerSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 500,
            timeout_secs: None,
        }
    }
}

/// Raw debugger settings for intermediate parsing (`None` → not specified).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawDebuggerSettings {
    pub poll_interval_ms: Option<u64>,
    pub timeout_secs: Option<u64>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawAppSettings {
    pub debug_param: Option<bool>,
    pub color: Option<bool>,
    #[serde(default)]
    pub debugger: RawDebuggerSettings,
}

/// Framework settings of a command-line application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppSettings {
    /// Add the `--debug`/`-d` parameter to every command
    pub debug_param: bool,
    /// Colored error output
    pub color: bool,
    pub debugger: DebuggerSettings,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            debug_param: true,
            color: true,
            debugger: DebuggerSettings::default(),
        }
    }
}

/// Get the XDG config directory for an application.
pub fn global_config_dir(app_name: &str) -> Option<PathBuf> {
    ProjectDirs::from("", "", app_name).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file of an application.
pub fn global_config_path(app_name: &str) -> Option<PathBuf> {
    global_config_dir(app_name).map(|dir| dir.join(format!("{}.toml", app_name)))
}

/// Environment variable prefix for an application: `my-app` → `MY_APP`.
pub fn env_prefix(app_name: &str) -> String {
    app_name.to_uppercase().replace('-', "_")
}

/// Load a TOML file into RawAppSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawAppSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl AppSettings {
    /// Load settings for `app_name` with layered precedence.
    pub fn load(app_name: &str) -> Result<Self, ApplicationError> {
        Self::load_from(
            global_config_path(app_name).as_deref(),
            &env_prefix(app_name),
        )
    }

    /// Load settings from an explicit config file (skipped if missing) and
    /// environment variables with the given prefix.
    pub fn load_from(path: Option<&Path>, env_prefix: &str) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Config file
        if let Some(path) = path {
            if path.exists() {
                debug!(path = %path.display(), "loading settings file");
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Environment variables (explicit override)
        Self::apply_env_overrides(current, env_prefix)
    }

    /// Merge overlay config onto self (base): overlay wins if specified.
    fn merge_with(&self, overlay: &RawAppSettings) -> Self {
        Self {
            debug_param: overlay.debug_param.unwrap_or(self.debug_param),
            color: overlay.color.unwrap_or(self.color),
            debugger: DebuggerSettings {
                poll_interval_ms: overlay
                    .debugger
                    .poll_interval_ms
                    .unwrap_or(self.debugger.poll_interval_ms),
                timeout_secs: overlay.debugger.timeout_secs.or(self.debugger.timeout_secs),
            },
        }
    }

    /// Apply `<PREFIX>_*` environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self, prefix: &str) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_bool("debug_param") {
            settings.debug_param = val;
        }
        if let Ok(val) = config.get_bool("color") {
            settings.color = val;
        }
        if let Ok(val) = config.get::<u64>("debugger.poll_interval_ms") {
            settings.debugger.poll_interval_ms = val;
        }
        if let Ok(val) = config.get::<u64>("debugger.timeout_secs") {
            settings.debugger.timeout_secs = Some(val);
        }

        Ok(settings)
    }
}
