//! Configuration management for branchdo
//!
//! This module handles loading, parsing, and validation of configuration files.
//! Everything has a default, so running without a config file is the norm.

use crate::constants::{CONFIG_GENERATED, DB_PATH_ENV, DEFAULT_DB_FILE};
use crate::utils::datetime;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub editor: EditorConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file. The BRANCHDO_DB environment variable takes precedence,
    /// and `~/.branchdo.db` is used when neither is set.
    pub database_path: Option<PathBuf>,
}

/// Editor configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EditorConfig {
    /// Editor command, possibly with arguments. Falls back to `git var GIT_EDITOR`.
    pub command: Option<String>,
}

/// List screen configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Ring the terminal bell on rejected actions
    pub bell: bool,
    /// Show item ids when the list opens
    pub show_item_ids: bool,
    /// Show the key-binding table when the list opens
    pub show_help: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable logging to a file
    pub enabled: bool,
    /// Log level: error, warn, info, debug or trace
    pub level: Option<String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            bell: true,
            show_item_ids: false,
            show_help: false,
        }
    }
}

impl LoggingConfig {
    /// Configured level, `info` when unset.
    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        match &self.level {
            None => Ok(log::LevelFilter::Info),
            Some(level) => level
                .parse::<log::LevelFilter>()
                .map_err(|_| anyhow::anyhow!("Invalid logging level '{}'", level)),
        }
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    pub fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from("branchdo.toml");
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("branchdo").join("config.toml");
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.storage.database_path {
            if path.as_os_str().is_empty() {
                anyhow::bail!("database_path cannot be empty");
            }
            if path.is_dir() {
                anyhow::bail!("database_path '{}' is a directory", path.display());
            }
        }

        if let Some(command) = &self.editor.command {
            if command.trim().is_empty() {
                anyhow::bail!("editor command cannot be empty");
            }
        }

        self.logging.level_filter()?;

        Ok(())
    }

    /// Resolve the database file: environment, then config, then home directory.
    pub fn database_path(&self) -> Result<PathBuf> {
        if let Some(env_path) = std::env::var_os(DB_PATH_ENV).filter(|p| !p.is_empty()) {
            let path = PathBuf::from(env_path);
            if path.is_absolute() {
                return Ok(path);
            }
            let cwd = std::env::current_dir().with_context(|| format!("Failed to resolve {}", DB_PATH_ENV))?;
            return Ok(cwd.join(path));
        }

        if let Some(path) = &self.storage.database_path {
            return Ok(path.clone());
        }

        Ok(dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(DEFAULT_DB_FILE))
    }

    /// Editor command: config, then git's editor, then a plain fallback.
    pub fn editor_command(&self, git_editor: &str) -> String {
        self.editor
            .command
            .clone()
            .filter(|c| !c.trim().is_empty())
            .or_else(|| Some(git_editor.trim().to_string()).filter(|c| !c.is_empty()))
            .unwrap_or_else(|| crate::shell::editor::FALLBACK_EDITOR.to_string())
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        // Add header comment
        let header = format!(
            "# branchdo Configuration File\n# Generated on {}\n\n",
            datetime::now_timestamp()
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join("branchdo"))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("config.toml"))
    }
}
