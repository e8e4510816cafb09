//! Configuration file loading with precedence handling.
//!
//! Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)

use crate::model::{
    CodeCharactersCase, CodeType, HorizontalScrollUnit, RowWrapping, ScrollBarVisibility,
    TextEncoding, VerticalScrollUnit, ViewMode,
};
use crate::view_state::engine::{EngineConfig, DEFAULT_MIN_ROW_POSITION_LENGTH};
use crate::view_state::structure::{StructureConfig, DEFAULT_BYTES_PER_ROW};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "HEXGRID_CONFIG";

/// Environment variable overriding the code type.
pub const CODE_TYPE_ENV_VAR: &str = "HEXGRID_CODE_TYPE";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
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
/// Corresponds to `~/.config/hexgrid/config.toml`:
///
/// ```toml
/// bytes_per_row = 16
/// view_mode = "dual"
/// code_type = "hexadecimal"
/// code_case = "lower"
/// encoding = "utf8"
/// vertical_scrollbar = "always"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Bytes per row when not wrapping.
    #[serde(default)]
    pub bytes_per_row: Option<usize>,

    /// Fixed or width-derived bytes per row.
    #[serde(default)]
    pub row_wrapping: Option<RowWrapping>,

    /// Upper bound on bytes per row when wrapping (0 = none).
    #[serde(default)]
    pub max_bytes_per_row: Option<usize>,

    /// Wrapped bytes per row is a multiple of this.
    #[serde(default)]
    pub wrapping_bytes_group_size: Option<usize>,

    /// Sections shown.
    #[serde(default)]
    pub view_mode: Option<ViewMode>,

    /// Numeric base of the code matrix.
    #[serde(default)]
    pub code_type: Option<CodeType>,

    /// Case of code digits.
    #[serde(default)]
    pub code_case: Option<CodeCharactersCase>,

    /// Case of row positions.
    #[serde(default)]
    pub row_position_case: Option<CodeCharactersCase>,

    /// Minimum gutter digits.
    #[serde(default)]
    pub min_row_position_length: Option<usize>,

    /// Maximum gutter digits (0 = none).
    #[serde(default)]
    pub max_row_position_length: Option<usize>,

    /// Preview encoding.
    #[serde(default)]
    pub encoding: Option<TextEncoding>,

    /// Caret blink period in milliseconds (0 = steady).
    #[serde(default)]
    pub blink_rate_ms: Option<u64>,

    /// Vertical scroll granularity.
    #[serde(default)]
    pub vertical_scroll_unit: Option<VerticalScrollUnit>,

    /// Horizontal scroll granularity.
    #[serde(default)]
    pub horizontal_scroll_unit: Option<HorizontalScrollUnit>,

    /// Vertical scrollbar policy.
    #[serde(default)]
    pub vertical_scrollbar: Option<ScrollBarVisibility>,

    /// Horizontal scrollbar policy.
    #[serde(default)]
    pub horizontal_scrollbar: Option<ScrollBarVisibility>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Bytes per row when not wrapping.
    pub bytes_per_row: usize,
    /// Fixed or width-derived bytes per row.
    pub row_wrapping: RowWrapping,
    /// Upper bound on wrapped bytes per row (0 = none).
    pub max_bytes_per_row: usize,
    /// Wrapped bytes per row group size.
    pub wrapping_bytes_group_size: usize,
    /// Sections shown.
    pub view_mode: ViewMode,
    /// Numeric base of the code matrix.
    pub code_type: CodeType,
    /// Case of code digits.
    pub code_case: CodeCharactersCase,
    /// Case of row positions.
    pub row_position_case: CodeCharactersCase,
    /// Minimum gutter digits.
    pub min_row_position_length: usize,
    /// Maximum gutter digits (0 = none).
    pub max_row_position_length: usize,
    /// Preview encoding.
    pub encoding: TextEncoding,
    /// Caret blink period.
    pub blink_rate_ms: u64,
    /// Vertical scroll granularity.
    pub vertical_scroll_unit: VerticalScrollUnit,
    /// Horizontal scroll granularity.
    pub horizontal_scroll_unit: HorizontalScrollUnit,
    /// Vertical scrollbar policy.
    pub vertical_scrollbar: ScrollBarVisibility,
    /// Horizontal scrollbar policy.
    pub horizontal_scrollbar: ScrollBarVisibility,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            bytes_per_row: DEFAULT_BYTES_PER_ROW,
            row_wrapping: engine.structure.row_wrapping,
            max_bytes_per_row: engine.structure.max_bytes_per_row,
            wrapping_bytes_group_size: engine.structure.wrapping_bytes_group_size,
            view_mode: engine.structure.view_mode,
            code_type: engine.structure.code_type,
            code_case: engine.code_case,
            row_position_case: engine.row_position_case,
            min_row_position_length: DEFAULT_MIN_ROW_POSITION_LENGTH,
            max_row_position_length: engine.max_row_position_length,
            encoding: engine.encoding,
            blink_rate_ms: engine.blink_rate_ms,
            vertical_scroll_unit: engine.vertical_scroll_unit,
            horizontal_scroll_unit: engine.horizontal_scroll_unit,
            vertical_scrollbar: engine.vertical_scrollbar,
            horizontal_scrollbar: engine.horizontal_scrollbar,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Engine settings for a terminal host, where scrollbars are one cell.
    ///
    /// Values are not validated here; the engine rejects bad ones.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            structure: StructureConfig {
                view_mode: self.view_mode,
                code_type: self.code_type,
                row_wrapping: self.row_wrapping,
                bytes_per_row: self.bytes_per_row,
                max_bytes_per_row: self.max_bytes_per_row,
                wrapping_bytes_group_size: self.wrapping_bytes_group_size,
            },
            code_case: self.code_case,
            row_position_case: self.row_position_case,
            min_row_position_length: self.min_row_position_length,
            max_row_position_length: self.max_row_position_length,
            encoding: self.encoding,
            blink_rate_ms: self.blink_rate_ms,
            vertical_scroll_unit: self.vertical_scroll_unit,
            horizontal_scroll_unit: self.horizontal_scroll_unit,
            vertical_scrollbar: self.vertical_scrollbar,
            horizontal_scrollbar: self.horizontal_scrollbar,
            ..EngineConfig::default()
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/hexgrid/hexgrid.log` on Unix-like systems,
/// or the platform equivalent. Falls back to the current directory when no
/// state directory exists.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("hexgrid").join("hexgrid.log")
    } else {
        PathBuf::from("hexgrid.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
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
/// Returns `~/.config/hexgrid/config.toml` on Unix, appropriate path on other
/// platforms. Returns `None` if no config directory can be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hexgrid").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `HEXGRID_CONFIG` environment variable
/// 3. Default path `~/.config/hexgrid/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed,
/// or `HEXGRID_CONFIG` is not valid unicode.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    match std::env::var(CONFIG_ENV_VAR) {
        Ok(env_path) => return load_config_file(PathBuf::from(env_path)),
        Err(std::env::VarError::NotUnicode(raw)) => {
            return Err(ConfigError::InvalidPath(raw.to_string_lossy().into_owned()));
        }
        Err(std::env::VarError::NotPresent) => {}
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `HEXGRID_CODE_TYPE`: Override code type (`bin`, `oct`, `dec`, `hex`, ...)
///
/// Unrecognised values are ignored and the previous setting kept.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(value) = std::env::var(CODE_TYPE_ENV_VAR) {
        match value.parse::<CodeType>() {
            Ok(code_type) => config.code_type = code_type,
            Err(err) => tracing::warn!(%err, "ignoring {CODE_TYPE_ENV_VAR}"),
        }
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        bytes_per_row: config.bytes_per_row.unwrap_or(defaults.bytes_per_row),
        row_wrapping: config.row_wrapping.unwrap_or(defaults.row_wrapping),
        max_bytes_per_row: config.max_bytes_per_row.unwrap_or(defaults.max_bytes_per_row),
        wrapping_bytes_group_size: config
            .wrapping_bytes_group_size
            .unwrap_or(defaults.wrapping_bytes_group_size),
        view_mode: config.view_mode.unwrap_or(defaults.view_mode),
        code_type: config.code_type.unwrap_or(defaults.code_type),
        code_case: config.code_case.unwrap_or(defaults.code_case),
        row_position_case: config.row_position_case.unwrap_or(defaults.row_position_case),
        min_row_position_length: config
            .min_row_position_length
            .unwrap_or(defaults.min_row_position_length),
        max_row_position_length: config
            .max_row_position_length
            .unwrap_or(defaults.max_row_position_length),
        encoding: config.encoding.unwrap_or(defaults.encoding),
        blink_rate_ms: config.blink_rate_ms.unwrap_or(defaults.blink_rate_ms),
        vertical_scroll_unit: config
            .vertical_scroll_unit
            .unwrap_or(defaults.vertical_scroll_unit),
        horizontal_scroll_unit: config
            .horizontal_scroll_unit
            .unwrap_or(defaults.horizontal_scroll_unit),
        vertical_scrollbar: config.vertical_scrollbar.unwrap_or(defaults.vertical_scrollbar),
        horizontal_scrollbar: config
            .horizontal_scrollbar
            .unwrap_or(defaults.horizontal_scrollbar),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Overrides given on the command line. `None` leaves the setting alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--code-type`
    pub code_type: Option<CodeType>,
    /// `--view-mode`
    pub view_mode: Option<ViewMode>,
    /// `--bytes-per-row`
    pub bytes_per_row: Option<usize>,
    /// `--wrap`
    pub row_wrapping: Option<RowWrapping>,
    /// `--upper` / `--lower`
    pub code_case: Option<CodeCharactersCase>,
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only flags explicitly set by the user are applied.
pub fn apply_cli_overrides(mut config: ResolvedConfig, overrides: CliOverrides) -> ResolvedConfig {
    if let Some(code_type) = overrides.code_type {
        config.code_type = code_type;
    }
    if let Some(view_mode) = overrides.view_mode {
        config.view_mode = view_mode;
    }
    if let Some(bytes_per_row) = overrides.bytes_per_row {
        config.bytes_per_row = bytes_per_row;
    }
    if let Some(row_wrapping) = overrides.row_wrapping {
        config.row_wrapping = row_wrapping;
    }
    if let Some(code_case) = overrides.code_case {
        config.code_case = code_case;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
