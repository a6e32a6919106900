//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path:?}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path:?}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/gridwin/config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Number of cells per row.
    #[serde(default)]
    pub columns: Option<usize>,

    /// Fixed row height in pixels (terminal lines in the demo shell).
    #[serde(default)]
    pub row_height: Option<f64>,

    /// Extra rows rendered beyond the visible window.
    #[serde(default)]
    pub overscan_row_count: Option<usize>,

    /// Idle delay before the is-scrolling flag resets, in milliseconds.
    #[serde(default)]
    pub scrolling_reset_delay_ms: Option<u64>,

    /// Scroll offset applied once at startup.
    #[serde(default)]
    pub initial_scroll_top: Option<f64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Number of cells per row.
    pub columns: usize,
    /// Fixed row height in pixels.
    pub row_height: f64,
    /// Extra rows rendered beyond the visible window.
    pub overscan_row_count: usize,
    /// Idle delay before the is-scrolling flag resets.
    pub scrolling_reset_delay_ms: u64,
    /// Scroll offset applied once at startup.
    pub initial_scroll_top: Option<f64>,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            columns: 3,
            row_height: 2.0,
            overscan_row_count: 1,
            scrolling_reset_delay_ms: 150,
            initial_scroll_top: None,
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/gridwin/gridwin.log` on Unix-like systems, or the
/// appropriate platform path elsewhere. Falls back to the current directory
/// if the state directory cannot be determined.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("gridwin").join("gridwin.log")
    } else {
        PathBuf::from("gridwin.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if the file doesn't exist (not an error - use
/// defaults).
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/gridwin/config.toml` on Unix, the appropriate path on
/// other platforms, `None` if the home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gridwin").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (like CLI `--config`)
/// 2. `GRIDWIN_CONFIG` environment variable
/// 3. Default path `~/.config/gridwin/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns an error only if a config file exists but cannot be read or
/// parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("GRIDWIN_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use
/// the default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        columns: config.columns.unwrap_or(defaults.columns),
        row_height: config.row_height.unwrap_or(defaults.row_height),
        overscan_row_count: config
            .overscan_row_count
            .unwrap_or(defaults.overscan_row_count),
        scrolling_reset_delay_ms: config
            .scrolling_reset_delay_ms
            .unwrap_or(defaults.scrolling_reset_delay_ms),
        initial_scroll_top: config.initial_scroll_top.or(defaults.initial_scroll_top),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `GRIDWIN_COLUMNS`: override column count
/// - `GRIDWIN_ROW_HEIGHT`: override row height
/// - `GRIDWIN_OVERSCAN`: override overscan row count
/// - `GRIDWIN_LOG_FILE`: override log file path
///
/// Unparsable values are ignored with a warning rather than failing startup.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(columns) = std::env::var("GRIDWIN_COLUMNS") {
        match columns.parse::<usize>() {
            Ok(value) if value >= 1 => config.columns = value,
            _ => warn!(value = %columns, "ignoring invalid GRIDWIN_COLUMNS"),
        }
    }

    if let Ok(row_height) = std::env::var("GRIDWIN_ROW_HEIGHT") {
        match row_height.parse::<f64>() {
            Ok(value) if value.is_finite() && value > 0.0 => config.row_height = value,
            _ => warn!(value = %row_height, "ignoring invalid GRIDWIN_ROW_HEIGHT"),
        }
    }

    if let Ok(overscan) = std::env::var("GRIDWIN_OVERSCAN") {
        match overscan.parse::<usize>() {
            Ok(value) => config.overscan_row_count = value,
            _ => warn!(value = %overscan, "ignoring invalid GRIDWIN_OVERSCAN"),
        }
    }

    if let Ok(log_file) = std::env::var("GRIDWIN_LOG_FILE") {
        config.log_file_path = PathBuf::from(log_file);
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    columns_override: Option<usize>,
    row_height_override: Option<f64>,
    overscan_override: Option<usize>,
    initial_scroll_top_override: Option<f64>,
) -> ResolvedConfig {
    if let Some(columns) = columns_override {
        config.columns = columns;
    }

    if let Some(row_height) = row_height_override {
        config.row_height = row_height;
    }

    if let Some(overscan) = overscan_override {
        config.overscan_row_count = overscan;
    }

    if let Some(initial) = initial_scroll_top_override {
        config.initial_scroll_top = Some(initial);
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
