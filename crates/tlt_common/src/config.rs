//! Tracker Configuration
//!
//! User configuration for guard thresholds, display widths and storage.
//! Config file: $TLT_CONFIG or ~/.config/typing-level-tracker/config.toml

use crate::guard::GuardConfig;
use crate::store::APP_DIR;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment override for the config file
pub const CONFIG_FILE_ENV: &str = "TLT_CONFIG";

/// Color display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color when stdout is a terminal
    Auto,
    /// Force basic ANSI colors
    Basic,
    /// No colors (plain text)
    None,
}

impl Default for ColorMode {
    fn default() -> Self {
        Self::Auto
    }
}

impl ColorMode {
    pub fn label(&self) -> &'static str {
        match self {
            ColorMode::Auto => "auto",
            ColorMode::Basic => "basic",
            ColorMode::None => "none",
        }
    }
}

/// Display configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Glyphs in the status line bar
    #[serde(default = "default_status_bar_width")]
    pub status_bar_width: usize,

    /// Glyphs in the detail report bar
    #[serde(default = "default_detail_bar_width")]
    pub detail_bar_width: usize,

    #[serde(default)]
    pub color: ColorMode,
}

fn default_status_bar_width() -> usize {
    5
}

fn default_detail_bar_width() -> usize {
    10
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            status_bar_width: default_status_bar_width(),
            detail_bar_width: default_detail_bar_width(),
            color: ColorMode::Auto,
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Explicit state file, overrides $TLT_STATE_FILE and the default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_file: Option<PathBuf>,
}

/// Main tracker configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default)]
    pub guard: GuardConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl TrackerConfig {
    /// Get default user config path
    ///
    /// Priority:
    /// 1. $TLT_CONFIG
    /// 2. <config_dir>/typing-level-tracker/config.toml
    pub fn user_config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_FILE_ENV) {
            if !path.trim().is_empty() {
                return Ok(PathBuf::from(path));
            }
        }

        let config_dir = dirs::config_dir().context("Cannot determine config directory")?;
        Ok(config_dir.join(APP_DIR).join("config.toml"))
    }

    /// Load configuration from the user path, or defaults when absent
    pub fn load() -> Result<Self> {
        let path = Self::user_config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific file, or defaults when absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: TrackerConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid settings in {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {}", parent.display()))?;
            }
        }

        let toml_string =
            toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        fs::write(path, toml_string).with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(())
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.guard.max_fragment_len == 0 {
            anyhow::bail!("guard.max_fragment_len must be at least 1");
        }
        if self.guard.repeat_limit == 0 {
            anyhow::bail!("guard.repeat_limit must be at least 1");
        }
        if self.display.status_bar_width == 0 {
            anyhow::bail!("display.status_bar_width must be at least 1");
        }
        if self.display.detail_bar_width == 0 {
            anyhow::bail!("display.detail_bar_width must be at least 1");
        }
        Ok(())
    }

    /// Set a value from a `section.key` name
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key.trim() {
            "guard.max_fragment_len" => self.guard.max_fragment_len = parse_number(key, value)?,
            "guard.repeat_limit" => self.guard.repeat_limit = parse_number(key, value)?,
            "display.status_bar_width" => self.display.status_bar_width = parse_number(key, value)?,
            "display.detail_bar_width" => self.display.detail_bar_width = parse_number(key, value)?,
            "display.color" => self.set_color_mode(value)?,
            "storage.state_file" => {
                self.storage.state_file = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            other => anyhow::bail!(
                "Unknown setting '{}'. Valid keys: guard.max_fragment_len, guard.repeat_limit, \
                 display.status_bar_width, display.detail_bar_width, display.color, storage.state_file",
                other
            ),
        }
        self.validate()
    }

    /// Set output color mode
    pub fn set_color_mode(&mut self, mode: &str) -> Result<()> {
        self.display.color = match mode.to_lowercase().as_str() {
            "auto" => ColorMode::Auto,
            "basic" | "on" => ColorMode::Basic,
            "none" | "off" | "disabled" => ColorMode::None,
            _ => anyhow::bail!("Invalid color mode: '{}'. Valid values: auto, basic, none", mode),
        };
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse::<T>()
        .map_err(|_| anyhow::anyhow!("Invalid value for {}: '{}' is not a number", key, value))
}
