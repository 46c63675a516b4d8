// ABOUTME: User settings record: unit system, rest and auto-save defaults, data version
// ABOUTME: Stored as a single well-known record in the settings collection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{Collection, Entity};
use crate::constants::{data, session};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::units::UnitSystem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Storage id of the settings record
pub const SETTINGS_ID: &str = "user_settings";

/// Per-user preferences consumed by formatting and session control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    /// Display unit system
    #[serde(default)]
    pub unit_system: UnitSystem,
    /// Default rest between sets in seconds
    #[serde(default = "default_rest_seconds")]
    pub default_rest_seconds: u32,
    /// Auto-save interval chosen by the user, in seconds
    ///
    /// `None` defers to the configured interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_save_interval_seconds: Option<u64>,
    /// Layout version the record was written with
    #[serde(default = "current_data_version")]
    pub data_version: u32,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

const fn default_rest_seconds() -> u32 {
    session::DEFAULT_REST_SECONDS
}

const fn current_data_version() -> u32 {
    data::CURRENT_DATA_VERSION
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            unit_system: UnitSystem::default(),
            default_rest_seconds: default_rest_seconds(),
            auto_save_interval_seconds: None,
            data_version: current_data_version(),
            updated_at: Utc::now(),
        }
    }
}

impl UserSettings {
    /// Defaults with the given unit system
    #[must_use]
    pub fn with_unit_system(unit_system: UnitSystem) -> Self {
        Self {
            unit_system,
            ..Self::default()
        }
    }
}

impl Entity for UserSettings {
    const COLLECTION: Collection = Collection::Settings;
    const KIND: &'static str = "Settings";

    fn id(&self) -> &str {
        SETTINGS_ID
    }

    fn version(&self) -> u64 {
        u64::from(self.data_version)
    }

    fn prepare_new(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn validate(&self) -> AppResult<()> {
        if self.auto_save_interval_seconds == Some(0) {
            return Err(AppError::out_of_range(
                "auto_save_interval_seconds",
                "must be at least one second",
            ));
        }
        if self.data_version > data::CURRENT_DATA_VERSION {
            return Err(AppError::new(
                ErrorCode::UnsupportedDataVersion,
                format!(
                    "settings data version {} is newer than supported version {}",
                    self.data_version,
                    data::CURRENT_DATA_VERSION
                ),
            ));
        }
        Ok(())
    }
}
