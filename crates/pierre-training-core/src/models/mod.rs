// ABOUTME: Core data models for the training journal
// ABOUTME: Re-exports plans, workouts, goals, body metrics, glossary items, and settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Every top-level record implements [`Entity`], which ties it to a named storage
//! [`Collection`] and gives repositories a uniform way to stamp identity and
//! bump the `version` counter.
//!
//! ## Design Principles
//!
//! - **Exclusive ownership**: nested structures (phases, weeks, sets) belong to
//!   exactly one parent and are stored inline.
//! - **Latest wins**: `version` is bookkeeping only, no conflict detection.
//! - **Serializable**: all models round-trip through JSON losslessly.

/// Implements [`Entity`] for records with `id`, `version`, `created_at` and
/// `updated_at` fields and an inherent `validate_fields` method.
macro_rules! impl_versioned_entity {
    ($ty:ty, $collection:expr, $kind:literal) => {
        impl $crate::models::Entity for $ty {
            const COLLECTION: $crate::models::Collection = $collection;
            const KIND: &'static str = $kind;

            fn id(&self) -> &str {
                &self.id
            }

            fn version(&self) -> u64 {
                self.version
            }

            fn prepare_new(&mut self, now: chrono::DateTime<chrono::Utc>) {
                if self.id.trim().is_empty() {
                    self.id = $crate::models::new_id();
                }
                self.version = $crate::constants::data::INITIAL_ENTITY_VERSION;
                self.created_at = now;
                self.updated_at = now;
            }

            fn touch(&mut self, now: chrono::DateTime<chrono::Utc>) {
                self.version += 1;
                self.updated_at = now;
            }

            fn validate(&self) -> $crate::errors::AppResult<()> {
                self.validate_fields()
            }
        }
    };
}

pub(crate) use impl_versioned_entity;

mod body_metrics;
mod glossary;
mod goal;
mod plan;
mod settings;
mod workout;

pub use body_metrics::BodyMetricEntry;
pub use glossary::GlossaryItem;
pub use goal::{FitnessGoal, GoalStatus};
pub use plan::{
    CardioBlock, CardioInterval, CompletedSession, Day, Equipment, ExercisePrescription, Phase,
    ProgramPlan, RepTarget, Session, SessionPath, SessionType, Week,
};
pub use settings::{UserSettings, SETTINGS_ID};
pub use workout::{
    ActiveWorkoutSession, CardioEntry, CardioSegment, ExerciseEntry, PerformedSet, SessionStatus,
    StrengthEntry, WorkoutLogEntry,
};

use crate::constants::data::INITIAL_ENTITY_VERSION;
use crate::errors::AppResult;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named collections of the persistence boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    /// Workout plans
    Plans,
    /// Plan session completion records
    CompletedSessions,
    /// Fitness goals
    Goals,
    /// Exercise glossary
    Glossary,
    /// Workout log entries
    Workouts,
    /// Body measurements
    BodyMetrics,
    /// User settings
    Settings,
}

impl Collection {
    /// All collections, in export order
    pub const ALL: [Self; 7] = [
        Self::Settings,
        Self::Plans,
        Self::CompletedSessions,
        Self::Goals,
        Self::Glossary,
        Self::Workouts,
        Self::BodyMetrics,
    ];

    /// Storage name of the collection
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plans => "plans",
            Self::CompletedSessions => "completed_sessions",
            Self::Goals => "goals",
            Self::Glossary => "glossary",
            Self::Workouts => "workouts",
            Self::BodyMetrics => "body_metrics",
            Self::Settings => "settings",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A top-level record stored in its own collection
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection the entity is stored in
    const COLLECTION: Collection;
    /// Human-readable entity name used in error messages
    const KIND: &'static str;

    /// Unique identifier
    fn id(&self) -> &str;

    /// Current version counter
    fn version(&self) -> u64;

    /// Assign identity and reset bookkeeping for a freshly created record
    fn prepare_new(&mut self, now: DateTime<Utc>);

    /// Bump the version counter and update timestamp after a modification
    fn touch(&mut self, now: DateTime<Utc>);

    /// Check the record's shape before it is persisted
    ///
    /// # Errors
    ///
    /// Returns a validation error describing the first invalid field
    fn validate(&self) -> AppResult<()>;
}

/// Generate a new random identifier
#[must_use]
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

const fn initial_version() -> u64 {
    INITIAL_ENTITY_VERSION
}
