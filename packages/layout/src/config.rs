//! Configuration for the overview.
//!
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.
//! Every key is optional; a missing file means the defaults.

use std::fs;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::LayoutStrategy;

/// Smallest spacing the overview accepts, in pixels.
pub const MIN_DISTANCE: i32 = 5;

/// Spacing used when none is configured, in pixels.
pub const DEFAULT_DISTANCE: i32 = 50;

/// Layout options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Strategy used by the expose mode.
    /// - `xd`: rows of stacked windows
    /// - `boxy`: windows snapped to a grid
    /// - `cosmos`: physics simulation, keeps windows near where they are
    ///
    /// Default: "cosmos"
    pub expose_layout: LayoutStrategy,

    /// Space between windows, and between the layout and the screen edge,
    /// in pixels. Values below 5 are raised to 5.
    /// Default: 50
    pub distance: i32,

    /// Whether layouts smaller than the screen are scaled up to fill it.
    /// Default: false
    pub allow_upscale: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            expose_layout: LayoutStrategy::default(),
            distance: DEFAULT_DISTANCE,
            allow_upscale: false,
        }
    }
}

impl LayoutConfig {
    /// Spacing actually used for layouts.
    #[must_use]
    pub const fn effective_distance(&self) -> i32 {
        if self.distance < MIN_DISTANCE { MIN_DISTANCE } else { self.distance }
    }
}

/// Panel handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct PanelConfig {
    /// Keep the layout clear of docks and panels.
    /// Default: true
    pub reserve_space: bool,
}

impl Default for PanelConfig {
    fn default() -> Self { Self { reserve_space: true } }
}

/// Root configuration.
///
/// Example:
/// ```json
/// {
///   "layout": {
///     "exposeLayout": "boxy",
///     "distance": 40
///   },
///   "panel": {
///     "reserveSpace": false
///   }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ExposeConfig {
    /// Layout options.
    pub layout: LayoutConfig,
    /// Panel handling.
    pub panel: PanelConfig,
}

/// Errors that can occur when loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration file was found in any of the expected locations.
    #[error(
        "No configuration file found. Expected at ~/.expose.jsonc or $XDG_CONFIG_HOME/expose/config.jsonc"
    )]
    NotFound,

    /// The configuration file exists but could not be read.
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file contains invalid JSON.
    #[error("Failed to parse configuration file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// File names tried in each configuration directory, in order.
const FILE_NAMES: [&str; 2] = ["config.jsonc", "config.json"];

/// Returns the possible configuration file paths in priority order.
///
/// The function checks the following locations:
/// 1. `$XDG_CONFIG_HOME/expose/config.jsonc` (if `XDG_CONFIG_HOME` is set)
/// 2. `~/.config/expose/config.jsonc`
/// 3. The platform configuration directory, e.g.
///    `~/Library/Application Support/expose/config.jsonc` on macOS
/// 4. `~/.expose.jsonc` (legacy/simple location)
///
/// Each location is tried with a `.jsonc` and then a `.json` extension.
#[must_use]
pub fn config_paths() -> Vec<PathBuf> {
    let mut dirs_to_check = Vec::new();

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        dirs_to_check.push(PathBuf::from(xdg_config).join("expose"));
    }

    if let Some(home) = dirs::home_dir() {
        dirs_to_check.push(home.join(".config").join("expose"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        dirs_to_check.push(config_dir.join("expose"));
    }

    let mut paths = Vec::new();
    for dir in dirs_to_check {
        for name in FILE_NAMES {
            let path = dir.join(name);
            // XDG_CONFIG_HOME and the platform dir are often ~/.config
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".expose.jsonc"));
        paths.push(home.join(".expose.json"));
    }

    paths
}

/// Loads the configuration from the first available config file.
///
/// # Returns
///
/// Returns `Ok((ExposeConfig, PathBuf))` if a configuration file was found and parsed successfully.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if no configuration file exists in any of the expected locations.
/// Returns `ConfigError::Io` if a configuration file exists but could not be read.
/// Returns `ConfigError::Parse` if the configuration file contains invalid JSON.
pub fn load_config() -> Result<(ExposeConfig, PathBuf), ConfigError> {
    for path in config_paths() {
        if path.exists() {
            tracing::debug!("config: loading {}", path.display());
            let config = load_config_from_path(&path)?;
            return Ok((config, path));
        }
    }

    Err(ConfigError::NotFound)
}

/// Loads the configuration from a specific file.
///
/// # Errors
///
/// Returns `ConfigError::Io` if the file could not be read and
/// `ConfigError::Parse` if it contains invalid JSON.
pub fn load_config_from_path(path: &Path) -> Result<ExposeConfig, ConfigError> {
    let file = fs::File::open(path)?;
    // Strip comments from JSONC before parsing
    let reader = json_comments::StripComments::new(file);
    let config: ExposeConfig = serde_json::from_reader(reader)?;

    if config.layout.distance < MIN_DISTANCE {
        tracing::warn!(
            "config: distance {} is below {MIN_DISTANCE}, using {MIN_DISTANCE}",
            config.layout.distance
        );
    }

    Ok(config)
}

/// Loads the configuration, falling back to the defaults when no file exists.
///
/// # Errors
///
/// Returns `ConfigError::Io` or `ConfigError::Parse` when a file exists but
/// cannot be used.
pub fn load_config_or_default() -> Result<ExposeConfig, ConfigError> {
    match load_config() {
        Ok((config, _)) => Ok(config),
        Err(ConfigError::NotFound) => Ok(ExposeConfig::default()),
        Err(err) => Err(err),
    }
}
