// ABOUTME: Whole-journal JSON export and import with data-version checks
// ABOUTME: Import validates every entity before writing and supports replace or merge modes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Export / Import
//!
//! A [`JournalExport`] is a self-describing snapshot of every collection.
//! Entities are written back as-is on import, so ids, versions and timestamps
//! survive a round trip unchanged.

use crate::repositories::{
    BodyMetricRepository, EntityStore, GlossaryRepository, GoalRepository, PlanRepository,
    SettingsRepository, WorkoutRepository,
};
use chrono::{DateTime, Utc};
use pierre_training_core::constants::data::CURRENT_DATA_VERSION;
use pierre_training_core::errors::{AppError, AppResult, ErrorCode};
use pierre_training_core::models::{
    BodyMetricEntry, CompletedSession, Entity, FitnessGoal, GlossaryItem, ProgramPlan,
    UserSettings, WorkoutLogEntry,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// Snapshot of the whole journal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalExport {
    /// Format version of this document
    pub data_version: u32,
    /// When the snapshot was taken
    pub exported_at: DateTime<Utc>,
    /// User settings
    pub settings: UserSettings,
    /// Workout plans
    #[serde(default)]
    pub plans: Vec<ProgramPlan>,
    /// Plan session completion records
    #[serde(default)]
    pub completed_sessions: Vec<CompletedSession>,
    /// Fitness goals
    #[serde(default)]
    pub goals: Vec<FitnessGoal>,
    /// Glossary terms
    #[serde(default)]
    pub glossary: Vec<GlossaryItem>,
    /// Workout log
    #[serde(default)]
    pub workouts: Vec<WorkoutLogEntry>,
    /// Body measurements
    #[serde(default)]
    pub body_metrics: Vec<BodyMetricEntry>,
}

impl JournalExport {
    /// Total number of entities, settings excluded
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.plans.len()
            + self.completed_sessions.len()
            + self.goals.len()
            + self.glossary.len()
            + self.workouts.len()
            + self.body_metrics.len()
    }

    /// Pretty-printed JSON document
    ///
    /// # Errors
    ///
    /// Returns a serialization error
    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a JSON document, rejecting versions newer than this build supports
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedDataVersion`, `MissingRequiredField` when no
    /// version is present, or a serialization error
    pub fn from_json(json: &str) -> AppResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        let version = value
            .get("data_version")
            .and_then(Value::as_u64)
            .ok_or_else(|| AppError::missing_field("data_version"))?;
        if version > u64::from(CURRENT_DATA_VERSION) {
            return Err(AppError::new(
                ErrorCode::UnsupportedDataVersion,
                format!(
                    "export data version {version} is newer than supported version {CURRENT_DATA_VERSION}"
                ),
            ));
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// How imported data combines with existing data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportMode {
    /// Clear every collection first
    #[default]
    Replace,
    /// Upsert by id, keeping entities absent from the import
    Merge,
}

/// Entities written per collection by an import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImportSummary {
    /// Plans written
    pub plans: usize,
    /// Completion records written
    pub completed_sessions: usize,
    /// Goals written
    pub goals: usize,
    /// Glossary terms written
    pub glossary: usize,
    /// Workouts written
    pub workouts: usize,
    /// Body measurements written
    pub body_metrics: usize,
}

impl ImportSummary {
    /// Total entities written
    #[must_use]
    pub const fn total(&self) -> usize {
        self.plans
            + self.completed_sessions
            + self.goals
            + self.glossary
            + self.workouts
            + self.body_metrics
    }
}

/// Reads and writes whole-journal snapshots
#[derive(Clone)]
pub struct JournalExporter {
    plans: PlanRepository,
    goals: GoalRepository,
    glossary: GlossaryRepository,
    workouts: WorkoutRepository,
    body_metrics: BodyMetricRepository,
    settings: SettingsRepository,
}

impl JournalExporter {
    /// Bind an exporter to the journal repositories
    #[must_use]
    pub const fn new(
        plans: PlanRepository,
        goals: GoalRepository,
        glossary: GlossaryRepository,
        workouts: WorkoutRepository,
        body_metrics: BodyMetricRepository,
        settings: SettingsRepository,
    ) -> Self {
        Self {
            plans,
            goals,
            glossary,
            workouts,
            body_metrics,
            settings,
        }
    }

    /// Snapshot every collection
    ///
    /// # Errors
    ///
    /// Returns the first storage failure; unlike list queries, export never
    /// silently drops a collection
    pub async fn export_all(&self) -> AppResult<JournalExport> {
        let export = JournalExport {
            data_version: CURRENT_DATA_VERSION,
            exported_at: Utc::now(),
            settings: self.settings.get().await,
            plans: self.plans.plan_store().try_list().await?,
            completed_sessions: self.plans.completion_store().try_list().await?,
            goals: self.goals.store().try_list().await?,
            glossary: self.glossary.store().try_list().await?,
            workouts: self.workouts.store().try_list().await?,
            body_metrics: self.body_metrics.store().try_list().await?,
        };
        info!(entities = export.entity_count(), "Journal exported");
        Ok(export)
    }

    /// Write a snapshot into storage
    ///
    /// Nothing is written unless every entity validates.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedDataVersion`, the first validation error, or a
    /// storage error
    pub async fn import_all(
        &self,
        export: &JournalExport,
        mode: ImportMode,
    ) -> AppResult<ImportSummary> {
        if export.data_version > CURRENT_DATA_VERSION {
            return Err(AppError::new(
                ErrorCode::UnsupportedDataVersion,
                format!(
                    "export data version {} is newer than supported version {CURRENT_DATA_VERSION}",
                    export.data_version
                ),
            ));
        }

        export.settings.validate()?;
        validate_all(&export.plans)?;
        validate_all(&export.completed_sessions)?;
        validate_all(&export.goals)?;
        validate_all(&export.glossary)?;
        validate_all(&export.workouts)?;
        validate_all(&export.body_metrics)?;

        if mode == ImportMode::Replace {
            self.settings.store().clear().await?;
            self.plans.plan_store().clear().await?;
            self.plans.completion_store().clear().await?;
            self.goals.store().clear().await?;
            self.glossary.store().clear().await?;
            self.workouts.store().clear().await?;
            self.body_metrics.store().clear().await?;
        }

        self.settings.store().put(&export.settings).await?;
        let summary = ImportSummary {
            plans: put_all(self.plans.plan_store(), &export.plans).await?,
            completed_sessions: put_all(
                self.plans.completion_store(),
                &export.completed_sessions,
            )
            .await?,
            goals: put_all(self.goals.store(), &export.goals).await?,
            glossary: put_all(self.glossary.store(), &export.glossary).await?,
            workouts: put_all(self.workouts.store(), &export.workouts).await?,
            body_metrics: put_all(self.body_metrics.store(), &export.body_metrics).await?,
        };

        info!(?mode, entities = summary.total(), "Journal imported");
        Ok(summary)
    }
}

fn validate_all<T: Entity>(entities: &[T]) -> AppResult<()> {
    for entity in entities {
        if entity.id().trim().is_empty() {
            return Err(AppError::missing_field(&format!("{} id", T::KIND)));
        }
        entity.validate()?;
    }
    Ok(())
}

async fn put_all<T: Entity>(store: &EntityStore<T>, entities: &[T]) -> AppResult<usize> {
    for entity in entities {
        store.put(entity).await?;
    }
    Ok(entities.len())
}
