// ABOUTME: Workout log model: performed strength sets, cardio segments, and the active session wrapper
// ABOUTME: The log entry is the durable record; the active session adds transient state-machine fields
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{impl_versioned_entity, Collection, SessionPath};
use crate::errors::{AppError, AppResult};
use crate::units::{DistanceUnit, WeightUnit};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one performed set
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PerformedSet {
    /// Repetitions performed
    pub reps: u32,
    /// Load used, absent for bodyweight sets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Unit of `weight`
    #[serde(default)]
    pub weight_unit: WeightUnit,
    /// Whether the set was finished
    #[serde(default)]
    pub completed: bool,
    /// Explicit RPE score (1-10)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpe_score: Option<f64>,
    /// Perceived effort text such as "hard"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perceived_effort: Option<String>,
    /// Technique broke down during the set
    #[serde(default)]
    pub form_breakdown: bool,
    /// Back pain score (0-10)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_pain: Option<u8>,
    /// Knee pain score (0-10)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knee_pain: Option<u8>,
}

impl PerformedSet {
    /// A completed set with the given load
    #[must_use]
    pub fn completed(reps: u32, weight: f64, weight_unit: WeightUnit) -> Self {
        Self {
            reps,
            weight: Some(weight),
            weight_unit,
            completed: true,
            ..Self::default()
        }
    }
}

/// One cardio segment (steady piece or interval)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CardioSegment {
    /// Segment duration in seconds
    pub duration_seconds: u32,
    /// Distance covered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    /// Unit of `distance`
    #[serde(default)]
    pub distance_unit: DistanceUnit,
    /// Average heart rate in bpm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_heart_rate: Option<u32>,
    /// Intensity label such as "fast" or "easy"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<String>,
}

/// Strength exercise with its performed sets
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StrengthEntry {
    /// Exercise identifier
    pub exercise_id: String,
    /// Exercise display name
    pub exercise_name: String,
    /// Ordered performed sets
    #[serde(default)]
    pub sets: Vec<PerformedSet>,
    /// Notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Cardio exercise with its segments
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CardioEntry {
    /// Exercise identifier
    pub exercise_id: String,
    /// Exercise display name
    pub exercise_name: String,
    /// Ordered segments
    #[serde(default)]
    pub segments: Vec<CardioSegment>,
    /// Notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One exercise performed in a workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExerciseEntry {
    /// Sets and reps
    Strength(StrengthEntry),
    /// Time and distance
    Cardio(CardioEntry),
}

impl ExerciseEntry {
    /// Exercise identifier
    #[must_use]
    pub fn exercise_id(&self) -> &str {
        match self {
            Self::Strength(e) => &e.exercise_id,
            Self::Cardio(e) => &e.exercise_id,
        }
    }

    /// Exercise display name
    #[must_use]
    pub fn exercise_name(&self) -> &str {
        match self {
            Self::Strength(e) => &e.exercise_name,
            Self::Cardio(e) => &e.exercise_name,
        }
    }

    /// Performed sets; empty for cardio entries
    #[must_use]
    pub fn sets(&self) -> &[PerformedSet] {
        match self {
            Self::Strength(e) => &e.sets,
            Self::Cardio(_) => &[],
        }
    }
}

/// A performed workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutLogEntry {
    /// Unique identifier
    pub id: String,
    /// Workout title
    pub title: String,
    /// Plan this workout was started from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<String>,
    /// Plan session this workout was started from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_path: Option<SessionPath>,
    /// Start time
    pub date_time_start: DateTime<Utc>,
    /// End time, set when the workout is finalized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time_end: Option<DateTime<Utc>>,
    /// Ordered exercises
    #[serde(default)]
    pub exercises: Vec<ExerciseEntry>,
    /// Overall perceived effort text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perceived_effort: Option<String>,
    /// Overall RPE score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpe_score: Option<f64>,
    /// Notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Version counter
    #[serde(default = "super::initial_version")]
    pub version: u64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl WorkoutLogEntry {
    /// Start a new, empty workout at `start`
    #[must_use]
    pub fn new(title: impl Into<String>, start: DateTime<Utc>) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            plan_id: None,
            session_path: None,
            date_time_start: start,
            date_time_end: None,
            exercises: Vec::new(),
            perceived_effort: None,
            rpe_score: None,
            notes: None,
            version: super::initial_version(),
            created_at: start,
            updated_at: start,
        }
    }

    /// Whether the workout has been finalized
    #[must_use]
    pub const fn is_finalized(&self) -> bool {
        self.date_time_end.is_some()
    }

    /// Wall-clock duration in seconds, if finalized
    #[must_use]
    pub fn duration_seconds(&self) -> Option<i64> {
        self.date_time_end
            .map(|end| (end - self.date_time_start).num_seconds().max(0))
    }

    /// Sets recorded for `exercise_id` across all entries of this workout
    pub fn sets_for<'a>(&'a self, exercise_id: &'a str) -> impl Iterator<Item = &'a PerformedSet> {
        self.exercises
            .iter()
            .filter(move |e| e.exercise_id() == exercise_id)
            .flat_map(ExerciseEntry::sets)
    }

    /// Every performed set in the workout
    pub fn all_sets(&self) -> impl Iterator<Item = &PerformedSet> {
        self.exercises.iter().flat_map(ExerciseEntry::sets)
    }

    /// Whether any entry refers to `exercise_id`
    #[must_use]
    pub fn contains_exercise(&self, exercise_id: &str) -> bool {
        self.exercises.iter().any(|e| e.exercise_id() == exercise_id)
    }

    fn validate_fields(&self) -> AppResult<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::missing_field("title"));
        }
        if let Some(end) = self.date_time_end {
            if end < self.date_time_start {
                return Err(AppError::out_of_range(
                    "date_time_end",
                    "workout cannot end before it starts",
                ));
            }
        }
        for set in self.all_sets() {
            if set.weight.is_some_and(|w| !w.is_finite() || w < 0.0) {
                return Err(AppError::out_of_range(
                    "weight",
                    "must be a non-negative number",
                ));
            }
            if set.back_pain.is_some_and(|p| p > 10) || set.knee_pain.is_some_and(|p| p > 10) {
                return Err(AppError::out_of_range("pain", "scores range from 0 to 10"));
            }
        }
        Ok(())
    }
}

impl_versioned_entity!(WorkoutLogEntry, Collection::Workouts, "Workout");

/// Lifecycle of an in-progress workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Being performed
    Active,
    /// Temporarily stopped; paused time is excluded from duration
    Paused,
    /// Finished and saved
    Completed,
    /// Discarded
    Abandoned,
}

impl SessionStatus {
    /// Whether moving to `next` is allowed
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Active, Self::Paused | Self::Completed | Self::Abandoned)
                | (Self::Paused, Self::Active | Self::Completed | Self::Abandoned)
        )
    }

    /// Completed and abandoned sessions accept no further changes
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Abandoned)
    }
}

/// Transient wrapper around a workout being performed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveWorkoutSession {
    /// Underlying durable record
    pub workout: WorkoutLogEntry,
    /// State-machine status
    pub session_status: SessionStatus,
    /// Index into `workout.exercises` the user is working on
    pub current_exercise_index: usize,
    /// When the current pause began
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paused_at: Option<DateTime<Utc>>,
    /// Accumulated paused time in seconds
    #[serde(default)]
    pub total_paused_seconds: i64,
    /// Last successful persistence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_saved_at: Option<DateTime<Utc>>,
}

impl ActiveWorkoutSession {
    /// Wrap a workout in an active session
    #[must_use]
    pub const fn new(workout: WorkoutLogEntry) -> Self {
        Self {
            workout,
            session_status: SessionStatus::Active,
            current_exercise_index: 0,
            paused_at: None,
            total_paused_seconds: 0,
            last_saved_at: None,
        }
    }

    /// Seconds spent working so far, excluding pauses
    #[must_use]
    pub fn elapsed_active_seconds(&self, now: DateTime<Utc>) -> i64 {
        let end = self.workout.date_time_end.unwrap_or(now);
        let mut paused = self.total_paused_seconds;
        if let Some(paused_at) = self.paused_at {
            paused += (end - paused_at).num_seconds().max(0);
        }
        ((end - self.workout.date_time_start).num_seconds() - paused).max(0)
    }
}
