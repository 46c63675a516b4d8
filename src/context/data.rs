// ABOUTME: Data context bundling the storage backend with every repository
// ABOUTME: Repositories share one backend handle and are cheap to clone
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::export::JournalExporter;
use crate::repositories::{
    BodyMetricRepository, GlossaryRepository, GoalRepository, PlanRepository, SettingsRepository,
    WorkoutRepository,
};
use crate::storage::SharedStorage;
use pierre_training_core::errors::AppResult;
use pierre_training_core::models::Collection;
use pierre_training_core::units::UnitSystem;
use tracing::info;

/// Storage and repository dependencies
///
/// # Dependencies
/// - `storage`: backend every repository writes through
/// - one repository per entity family
#[derive(Clone)]
pub struct DataContext {
    storage: SharedStorage,
    plans: PlanRepository,
    goals: GoalRepository,
    glossary: GlossaryRepository,
    workouts: WorkoutRepository,
    body_metrics: BodyMetricRepository,
    settings: SettingsRepository,
}

impl DataContext {
    /// Build every repository over `storage`
    #[must_use]
    pub fn new(storage: SharedStorage, default_unit_system: UnitSystem) -> Self {
        Self {
            plans: PlanRepository::new(storage.clone()),
            goals: GoalRepository::new(storage.clone()),
            glossary: GlossaryRepository::new(storage.clone()),
            workouts: WorkoutRepository::new(storage.clone()),
            body_metrics: BodyMetricRepository::new(storage.clone()),
            settings: SettingsRepository::new(storage.clone(), default_unit_system),
            storage,
        }
    }

    /// Storage backend
    #[must_use]
    pub const fn storage(&self) -> &SharedStorage {
        &self.storage
    }

    /// Plans and plan completions
    #[must_use]
    pub const fn plans(&self) -> &PlanRepository {
        &self.plans
    }

    /// Fitness goals
    #[must_use]
    pub const fn goals(&self) -> &GoalRepository {
        &self.goals
    }

    /// Exercise glossary
    #[must_use]
    pub const fn glossary(&self) -> &GlossaryRepository {
        &self.glossary
    }

    /// Workout log
    #[must_use]
    pub const fn workouts(&self) -> &WorkoutRepository {
        &self.workouts
    }

    /// Body measurements
    #[must_use]
    pub const fn body_metrics(&self) -> &BodyMetricRepository {
        &self.body_metrics
    }

    /// User settings
    #[must_use]
    pub const fn settings(&self) -> &SettingsRepository {
        &self.settings
    }

    /// Exporter over every repository
    #[must_use]
    pub fn exporter(&self) -> JournalExporter {
        JournalExporter::new(
            self.plans.clone(),
            self.goals.clone(),
            self.glossary.clone(),
            self.workouts.clone(),
            self.body_metrics.clone(),
            self.settings.clone(),
        )
    }

    /// Remove every stored entity
    ///
    /// # Errors
    ///
    /// Returns the first storage failure
    pub async fn clear_all(&self) -> AppResult<()> {
        for collection in Collection::ALL {
            self.storage.clear(collection).await?;
        }
        info!(backend = self.storage.backend_name(), "All collections cleared");
        Ok(())
    }
}
