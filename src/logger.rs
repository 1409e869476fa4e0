//! File logging behind the `log` facade.
//!
//! The list screen owns the terminal, so log records never go to stdout or
//! stderr. When logging is enabled they are appended to a file in the user's
//! data directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;

use crate::config::LoggingConfig;

/// Handle describing where log records go.
#[derive(Debug, Clone, Default)]
pub struct Logger {
    file: Option<PathBuf>,
}

impl Logger {
    /// Install the file logger when enabled in `config`.
    pub fn from_config(config: &LoggingConfig) -> Result<Self> {
        if !config.enabled {
            return Ok(Self::default());
        }
        Self::to_file(config, &Self::get_log_file_path()?)
    }

    /// Install a logger appending to `path`.
    pub fn to_file(config: &LoggingConfig, path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
        }

        let file = fern::log_file(path).with_context(|| format!("Failed to open log file: {}", path.display()))?;

        let dispatch = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{} {:<5} {}] {}",
                    Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .level(config.level_filter()?)
            .chain(file);

        // a global logger can only be installed once per process
        if dispatch.apply().is_err() {
            log::debug!("Logger already installed, keeping the existing one");
        }

        log::info!("Logging to {}", path.display());
        Ok(Self {
            file: Some(path.to_path_buf()),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.file.is_some()
    }

    /// File receiving the records, when enabled.
    pub fn log_file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Default log file location.
    pub fn get_log_file_path() -> Result<PathBuf> {
        dirs::data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
            .map(|dir| dir.join("branchdo").join("branchdo.log"))
    }
}
