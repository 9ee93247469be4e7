use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::sanitizer::SanitizePreset;

/// Application configuration module
/// This module handles loading, validating and saving `conf.json`.
/// Every field has a serde default, so a partial file is valid.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    /// Sanitizer settings
    #[serde(default)]
    pub sanitizer: SanitizerConfig,

    /// Translation batching settings
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Sanitizer settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct SanitizerConfig {
    // @field: Preset applied by `parse` when no --preset is given
    #[serde(default)]
    pub preset: SanitizePreset,

    // @field: Character limit applied after sanitization
    #[serde(default)]
    pub max_length: Option<usize>,
}

/// Translation batching settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TranslationConfig {
    /// Target language code
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Cues per provider request
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Cues of read-only context on each side of a batch
    #[serde(default = "default_context_size")]
    pub context_size: usize,

    /// Retry count for failed requests
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay before each retry in milliseconds; the last value repeats
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: Vec<u64>,

    /// Maximum batches in flight at once
    #[serde(default = "default_concurrent_requests")]
    pub concurrent_requests: usize,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            target_language: default_target_language(),
            batch_size: default_batch_size(),
            context_size: default_context_size(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
            concurrent_requests: default_concurrent_requests(),
        }
    }
}

impl TranslationConfig {
    /// Backoff before retry number `attempt` (zero-based)
    pub fn backoff_ms(&self, attempt: usize) -> u64 {
        self.retry_backoff_ms
            .get(attempt)
            .or_else(|| self.retry_backoff_ms.last())
            .copied()
            .unwrap_or(0)
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_target_language() -> String {
    "zh-TW".to_string()
}

fn default_batch_size() -> usize {
    30
}

fn default_context_size() -> usize {
    2
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_backoff_ms() -> Vec<u64> {
    vec![1000, 2000, 4000]
}

fn default_concurrent_requests() -> usize {
    4
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.translation.target_language.trim().is_empty() {
            return Err(anyhow!("Target language must not be empty"));
        }

        if self.translation.batch_size == 0 {
            return Err(anyhow!("Batch size must be at least 1"));
        }

        if self.translation.concurrent_requests == 0 {
            return Err(anyhow!("Concurrent requests must be at least 1"));
        }

        if self.sanitizer.max_length == Some(0) {
            return Err(anyhow!("Sanitizer max_length must be positive when set"));
        }

        Ok(())
    }

    /// Read a config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Write this config as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Read `path`, or write and return the default config when it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::from_file(path);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Self::default();
        config.save(path)?;
        Ok(config)
    }
}
