// ABOUTME: Environment-based configuration for storage backend, data directory, and session timers
// ABOUTME: Parses JOURNAL_* variables with typed defaults and validates the result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_training_core::constants::{service_names, session};
use pierre_training_core::errors::{AppError, AppResult};
use pierre_training_core::units::UnitSystem;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    /// Process-local storage, lost on exit
    Memory,
    /// One JSON file per collection in the data directory
    #[default]
    JsonFile,
}

impl StorageKind {
    /// Lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::JsonFile => "json_file",
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "in_memory" | "mem" => Ok(Self::Memory),
            "json" | "json_file" | "file" => Ok(Self::JsonFile),
            other => Err(AppError::config(format!(
                "Unknown storage backend '{other}' (expected 'memory' or 'json_file')"
            ))),
        }
    }
}

/// Journal configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalConfig {
    /// Storage backend
    pub storage: StorageKind,
    /// Directory for the JSON file backend
    pub data_dir: PathBuf,
    /// Interval between auto-saves of an active workout
    pub auto_save_interval: Duration,
    /// Rest timer countdown tick
    pub rest_tick: Duration,
    /// Unit system used until the user saves settings
    pub default_unit_system: UnitSystem,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            storage: StorageKind::default(),
            data_dir: default_data_dir(),
            auto_save_interval: Duration::from_secs(session::DEFAULT_AUTO_SAVE_INTERVAL_SECS),
            rest_tick: Duration::from_millis(session::REST_TIMER_TICK_MS),
            default_unit_system: UnitSystem::default(),
        }
    }
}

impl JournalConfig {
    /// In-memory configuration, used by tests and ephemeral sessions
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            storage: StorageKind::Memory,
            ..Self::default()
        }
    }

    /// Load configuration from environment variables
    ///
    /// Recognized variables: `JOURNAL_STORAGE`, `JOURNAL_DATA_DIR`,
    /// `JOURNAL_AUTO_SAVE_INTERVAL_SECS`, `JOURNAL_REST_TICK_MS`,
    /// `JOURNAL_UNIT_SYSTEM`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when a variable is set but cannot be parsed, or
    /// when the resulting configuration fails validation
    pub fn from_env() -> AppResult<Self> {
        info!("Loading journal configuration from environment variables");
        let defaults = Self::default();

        let storage = match env::var("JOURNAL_STORAGE") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.storage,
        };

        let data_dir = env::var("JOURNAL_DATA_DIR")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map_or(defaults.data_dir, PathBuf::from);

        let auto_save_interval = env_parse::<u64>("JOURNAL_AUTO_SAVE_INTERVAL_SECS")?
            .map_or(defaults.auto_save_interval, Duration::from_secs);

        let rest_tick = env_parse::<u64>("JOURNAL_REST_TICK_MS")?
            .map_or(defaults.rest_tick, Duration::from_millis);

        let default_unit_system = match env::var("JOURNAL_UNIT_SYSTEM") {
            Ok(value) => value.parse().map_err(AppError::config)?,
            Err(_) => defaults.default_unit_system,
        };

        let config = Self {
            storage,
            data_dir,
            auto_save_interval,
            rest_tick,
            default_unit_system,
        };
        config.validate()?;
        info!(
            storage = %config.storage,
            data_dir = %config.data_dir.display(),
            "Journal configuration loaded"
        );
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` for zero intervals or a missing data directory
    pub fn validate(&self) -> AppResult<()> {
        if self.auto_save_interval.is_zero() {
            return Err(AppError::config(
                "JOURNAL_AUTO_SAVE_INTERVAL_SECS must be greater than zero",
            ));
        }
        if self.rest_tick.is_zero() {
            return Err(AppError::config("JOURNAL_REST_TICK_MS must be greater than zero"));
        }
        if self.storage == StorageKind::JsonFile && self.data_dir.as_os_str().is_empty() {
            return Err(AppError::config(
                "JOURNAL_DATA_DIR is required for the json_file storage backend",
            ));
        }
        if self.auto_save_interval > Duration::from_secs(3600) {
            warn!(
                interval_secs = self.auto_save_interval.as_secs(),
                "Auto-save interval is longer than an hour; progress may be lost on crash"
            );
        }
        Ok(())
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(env::temp_dir)
        .join(service_names::TRAINING_JOURNAL)
}

/// Parse an optional environment variable, failing only when it is set but malformed
fn env_parse<T: FromStr>(key: &str) -> AppResult<Option<T>> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| AppError::config(format!("Invalid {key} value: '{raw}'"))),
        Err(_) => Ok(None),
    }
}
