// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Engine configuration.
//!
//! Configuration is stored in `config.toml` at the storage root. Every field
//! is optional; a missing file yields the defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const CONFIG_FILE_NAME: &str = "config.toml";
const APP_DIR_NAME: &str = "leavn";

/// Tunables for the sync engine and the offline content cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Failed remote attempts after which an item is discarded (default: 3).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Delay before retrying a pass that left items behind, in seconds (default: 30).
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,
    /// Whether `download` also synthesizes narration (default: true).
    #[serde(default = "default_download_audio")]
    pub download_audio: bool,
    /// Voice passed to the text-to-speech provider (default: "default").
    #[serde(default = "default_voice")]
    pub voice: String,
    /// Log filter used when `RUST_LOG` is unset (default: "info").
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Capacity of the engine's command channel (default: 64).
    #[serde(default = "default_command_buffer")]
    pub command_buffer: usize,
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_secs() -> u64 {
    30
}

fn default_download_audio() -> bool {
    true
}

fn default_voice() -> String {
    "default".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_command_buffer() -> usize {
    64
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            max_retries: default_max_retries(),
            retry_delay_secs: default_retry_delay_secs(),
            download_audio: default_download_audio(),
            voice: default_voice(),
            log_filter: default_log_filter(),
            command_buffer: default_command_buffer(),
        }
    }
}

impl SyncConfig {
    /// Loads `config.toml` from `root`, falling back to defaults when absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE_NAME);
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };

        let config: SyncConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Writes this config to `config.toml` under `root`.
    pub fn save(&self, root: &Path) -> Result<()> {
        self.validate()?;
        let content = toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        fs::create_dir_all(root)?;
        fs::write(root.join(CONFIG_FILE_NAME), content)?;
        Ok(())
    }

    /// Rejects values the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_retries == 0 {
            return Err(Error::Config("max_retries must be at least 1".to_string()));
        }
        if self.command_buffer == 0 {
            return Err(Error::Config("command_buffer must be at least 1".to_string()));
        }
        if self.voice.trim().is_empty() {
            return Err(Error::Config("voice must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }

    /// Default app-private storage root (`<data_local_dir>/leavn`).
    pub fn default_root() -> Option<PathBuf> {
        dirs::data_local_dir().map(|d| d.join(APP_DIR_NAME))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
