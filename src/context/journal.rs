// ABOUTME: Top-level journal context created once per process from configuration
// ABOUTME: Holds storage, repositories, and a cached settings snapshot; reset() wipes all data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::DataContext;
use crate::config::JournalConfig;
use crate::export::JournalExporter;
use crate::session::{ActiveWorkoutController, SessionServices};
use crate::storage::{create_storage, SharedStorage};
use pierre_training_core::errors::AppResult;
use pierre_training_core::models::{SessionPath, UserSettings};
use pierre_training_core::units::UnitSystem;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::info;

/// Everything a caller needs to drive the journal
#[derive(Clone)]
pub struct JournalContext {
    config: Arc<JournalConfig>,
    data: DataContext,
    settings: Arc<RwLock<UserSettings>>,
}

impl JournalContext {
    /// Validate `config`, open its storage backend, and load settings
    ///
    /// # Errors
    ///
    /// Returns a configuration or storage error
    pub async fn init(config: JournalConfig) -> AppResult<Self> {
        config.validate()?;
        let storage = create_storage(&config).await?;
        Ok(Self::with_storage(config, storage).await)
    }

    /// Build a context over an existing backend
    pub async fn with_storage(config: JournalConfig, storage: SharedStorage) -> Self {
        let data = DataContext::new(storage, config.default_unit_system);
        let settings = data.settings().get().await;
        info!(
            backend = data.storage().backend_name(),
            unit_system = %settings.unit_system,
            "Journal context initialized"
        );
        Self {
            config: Arc::new(config),
            data,
            settings: Arc::new(RwLock::new(settings)),
        }
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &JournalConfig {
        &self.config
    }

    /// Storage and repositories
    #[must_use]
    pub const fn data(&self) -> &DataContext {
        &self.data
    }

    /// Cached user settings
    pub async fn settings(&self) -> UserSettings {
        self.settings.read().await.clone()
    }

    /// Unit system from the cached settings
    pub async fn unit_system(&self) -> UnitSystem {
        self.settings.read().await.unit_system
    }

    /// Persist new settings and refresh the cache
    ///
    /// # Errors
    ///
    /// Returns a validation or storage error
    pub async fn update_settings(&self, settings: UserSettings) -> AppResult<UserSettings> {
        let saved = self.data.settings().save(settings).await?;
        *self.settings.write().await = saved.clone();
        Ok(saved)
    }

    /// Switch unit system and refresh the cache
    ///
    /// # Errors
    ///
    /// Returns a storage error
    pub async fn set_unit_system(&self, unit_system: UnitSystem) -> AppResult<UserSettings> {
        let saved = self.data.settings().set_unit_system(unit_system).await?;
        *self.settings.write().await = saved.clone();
        Ok(saved)
    }

    /// Reload the settings snapshot from storage
    pub async fn reload_settings(&self) -> UserSettings {
        let settings = self.data.settings().get().await;
        *self.settings.write().await = settings.clone();
        settings
    }

    /// Delete all data and restore default settings
    ///
    /// # Errors
    ///
    /// Returns the first storage failure
    pub async fn reset(&self) -> AppResult<()> {
        self.data.clear_all().await?;
        *self.settings.write().await = self.data.settings().defaults();
        info!("Journal reset");
        Ok(())
    }

    /// Exporter over every repository
    #[must_use]
    pub fn exporter(&self) -> JournalExporter {
        self.data.exporter()
    }

    /// Session dependencies using configured timers and the user's rest default
    pub async fn session_services(&self) -> SessionServices {
        let settings = self.settings.read().await;
        SessionServices {
            workouts: self.data.workouts().clone(),
            plans: self.data.plans().clone(),
            auto_save_interval: self.auto_save_interval(&settings),
            rest_tick: self.config.rest_tick,
            default_rest_seconds: settings.default_rest_seconds,
        }
    }

    /// Start a blank workout
    ///
    /// # Errors
    ///
    /// Returns a validation or storage error
    pub async fn start_empty_workout(&self, title: &str) -> AppResult<ActiveWorkoutController> {
        ActiveWorkoutController::start_empty(self.session_services().await, title).await
    }

    /// Start a workout from a plan session
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound`, `InvalidSessionPath`, or a storage error
    pub async fn start_plan_workout(
        &self,
        plan_id: &str,
        path: SessionPath,
    ) -> AppResult<ActiveWorkoutController> {
        ActiveWorkoutController::start_from_plan(self.session_services().await, plan_id, path)
            .await
    }

    fn auto_save_interval(&self, settings: &UserSettings) -> Duration {
        settings
            .auto_save_interval_seconds
            .map_or(self.config.auto_save_interval, Duration::from_secs)
    }
}
