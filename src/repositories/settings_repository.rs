// ABOUTME: Settings repository storing the single user settings record
// ABOUTME: Missing or unreadable settings fall back to configured defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::EntityStore;
use crate::storage::SharedStorage;
use chrono::Utc;
use pierre_training_core::errors::AppResult;
use pierre_training_core::models::{Entity, UserSettings, SETTINGS_ID};
use pierre_training_core::units::UnitSystem;
use tracing::{info, warn};

/// User settings
#[derive(Clone)]
pub struct SettingsRepository {
    settings: EntityStore<UserSettings>,
    default_unit_system: UnitSystem,
}

impl SettingsRepository {
    /// Create a repository over `storage`, defaulting to `default_unit_system`
    #[must_use]
    pub fn new(storage: SharedStorage, default_unit_system: UnitSystem) -> Self {
        Self {
            settings: EntityStore::new(storage),
            default_unit_system,
        }
    }

    /// Settings that apply when nothing has been saved yet
    #[must_use]
    pub fn defaults(&self) -> UserSettings {
        UserSettings::with_unit_system(self.default_unit_system)
    }

    /// Current settings, or defaults when none are stored or they cannot be read
    pub async fn get(&self) -> UserSettings {
        match self.settings.get(SETTINGS_ID).await {
            Ok(Some(settings)) => settings,
            Ok(None) => self.defaults(),
            Err(e) => {
                warn!(error = %e, "Falling back to default settings");
                self.defaults()
            }
        }
    }

    /// Persist settings
    ///
    /// # Errors
    ///
    /// Returns a validation or storage error
    pub async fn save(&self, mut settings: UserSettings) -> AppResult<UserSettings> {
        settings.touch(Utc::now());
        settings.validate()?;
        self.settings.put(&settings).await?;
        info!(unit_system = %settings.unit_system, "Settings saved");
        Ok(settings)
    }

    /// Change the unit system, keeping every other setting
    ///
    /// # Errors
    ///
    /// Returns a storage error
    pub async fn set_unit_system(&self, unit_system: UnitSystem) -> AppResult<UserSettings> {
        let mut settings = self.get().await;
        settings.unit_system = unit_system;
        self.save(settings).await
    }

    /// Whether settings have been saved
    ///
    /// # Errors
    ///
    /// Returns a storage error
    pub async fn is_stored(&self) -> AppResult<bool> {
        Ok(self.settings.get(SETTINGS_ID).await?.is_some())
    }

    pub(crate) const fn store(&self) -> &EntityStore<UserSettings> {
        &self.settings
    }
}
