//! Configuration management for daybook.
//!
//! Handles:
//! - Storage location
//! - Display options (date format, list previews, refresh rate)
//! - Extra writing prompts

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{JournalError, Result};
use crate::model::{is_valid_date_format, DEFAULT_DATE_FORMAT};
use crate::prompts::PromptList;
use crate::storage::default_data_dir;
use crate::util::atomic_write;

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Display options.
    #[serde(default)]
    pub display: DisplayConfig,
    /// Prompt settings.
    #[serde(default)]
    pub prompts: PromptsConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let config_path = default_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            JournalError::io(format!("Failed to read config file: {}", path.display()), e)
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| JournalError::InvalidConfig {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would break the journal at runtime.
    pub fn validate(&self) -> Result<()> {
        if self.display.date_format.trim().is_empty() {
            return Err(JournalError::InvalidConfig {
                message: "display.date_format must not be empty".to_string(),
            });
        }
        if !is_valid_date_format(&self.display.date_format) {
            return Err(JournalError::InvalidConfig {
                message: format!(
                    "display.date_format is not a valid strftime format: {}",
                    self.display.date_format
                ),
            });
        }
        if self.display.tick_rate_ms == 0 {
            return Err(JournalError::InvalidConfig {
                message: "display.tick_rate_ms must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        let config_path = default_config_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to a specific path, atomically.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| JournalError::InvalidConfig {
            message: format!("Failed to serialize config: {e}"),
        })?;

        atomic_write(path, content.as_bytes())
    }

    /// Directory holding the journal data.
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.storage.directory {
            Some(dir) => Ok(dir.clone()),
            None => default_data_dir(),
        }
    }

    /// Built-in prompts plus the configured extras.
    pub fn prompt_list(&self) -> PromptList {
        let mut prompts = PromptList::with_defaults();
        prompts.extend(self.prompts.extra.iter().cloned());
        prompts
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Data directory (platform data dir when unset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

/// Display configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// chrono format string for new entry dates.
    #[serde(default = "default_date_format")]
    pub date_format: String,
    /// Characters of content shown per entry in lists.
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
    /// TUI refresh interval in milliseconds.
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            preview_chars: default_preview_chars(),
            tick_rate_ms: default_tick_rate(),
        }
    }
}

/// Prompt configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptsConfig {
    /// Prompts offered in addition to the built-in list.
    #[serde(default)]
    pub extra: Vec<String>,
}

// Default value functions for serde
fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_preview_chars() -> usize {
    50
}

fn default_tick_rate() -> u64 {
    250
}

/// Get the default configuration path.
pub fn default_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| JournalError::unsupported("config directory discovery"))?;

    Ok(config_dir.join(crate::NAME).join("config.toml"))
}
