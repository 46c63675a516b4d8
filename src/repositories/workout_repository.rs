// ABOUTME: Workout log repository with history queries and analysis shortcuts
// ABOUTME: Drafts of in-progress workouts are saved without bumping the version counter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::EntityStore;
use crate::storage::SharedStorage;
use pierre_training_core::errors::AppResult;
use pierre_training_core::models::WorkoutLogEntry;
use pierre_training_core::units::WeightUnit;
use pierre_training_intelligence::workout_analysis::{
    self, PersonalRecords, ProgressTrend, TrendMetric,
};

/// Workout log entries
#[derive(Clone)]
pub struct WorkoutRepository {
    workouts: EntityStore<WorkoutLogEntry>,
}

impl WorkoutRepository {
    /// Create a repository over `storage`
    #[must_use]
    pub fn new(storage: SharedStorage) -> Self {
        Self {
            workouts: EntityStore::new(storage),
        }
    }

    /// Store a new workout
    ///
    /// # Errors
    ///
    /// Returns a validation or storage error
    pub async fn create(&self, workout: WorkoutLogEntry) -> AppResult<WorkoutLogEntry> {
        self.workouts.insert(workout).await
    }

    /// Load a workout
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id
    pub async fn get(&self, workout_id: &str) -> AppResult<WorkoutLogEntry> {
        self.workouts.require(workout_id).await
    }

    /// All workouts, most recent first
    pub async fn list(&self) -> Vec<WorkoutLogEntry> {
        let mut workouts = self.workouts.list().await;
        workouts.sort_by(|a, b| b.date_time_start.cmp(&a.date_time_start));
        workouts
    }

    /// Replace a workout, bumping its version
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound`, a validation error, or a storage error
    pub async fn update(&self, workout: WorkoutLogEntry) -> AppResult<WorkoutLogEntry> {
        self.workouts.update(workout).await
    }

    /// Persist an in-progress workout as-is
    ///
    /// # Errors
    ///
    /// Returns a storage error
    pub async fn save_draft(&self, workout: &WorkoutLogEntry) -> AppResult<()> {
        self.workouts.put(workout).await
    }

    /// Delete a workout
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id or a storage error
    pub async fn delete(&self, workout_id: &str) -> AppResult<()> {
        self.workouts.delete(workout_id).await
    }

    /// Number of stored workouts
    ///
    /// # Errors
    ///
    /// Returns a storage error
    pub async fn count(&self) -> AppResult<usize> {
        self.workouts.count().await
    }

    /// The `limit` most recent finalized workouts
    pub async fn recent(&self, limit: usize) -> Vec<WorkoutLogEntry> {
        self.list()
            .await
            .into_iter()
            .filter(WorkoutLogEntry::is_finalized)
            .take(limit)
            .collect()
    }

    /// Finalized workouts containing `exercise_id`, most recent first
    pub async fn for_exercise(&self, exercise_id: &str) -> Vec<WorkoutLogEntry> {
        self.list()
            .await
            .into_iter()
            .filter(|w| w.is_finalized() && w.contains_exercise(exercise_id))
            .collect()
    }

    /// Trend of one exercise over its recent finalized sessions
    pub async fn progress_trend(&self, exercise_id: &str, metric: TrendMetric) -> ProgressTrend {
        let history = self.for_exercise(exercise_id).await;
        workout_analysis::get_progress_trend(&history, exercise_id, metric)
    }

    /// Records of one exercise over all finalized sessions
    pub async fn personal_records(
        &self,
        exercise_id: &str,
        unit: WeightUnit,
    ) -> Option<PersonalRecords> {
        let history = self.for_exercise(exercise_id).await;
        workout_analysis::personal_records(&history, exercise_id, unit)
    }

    pub(crate) const fn store(&self) -> &EntityStore<WorkoutLogEntry> {
        &self.workouts
    }
}
