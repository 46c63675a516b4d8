// ABOUTME: Fitness goal model with status lifecycle and progress bookkeeping
// ABOUTME: Status transitions are validated here; progress math lives in the intelligence crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{impl_versioned_entity, Collection};
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Goal lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    /// Being worked on
    #[default]
    Active,
    /// Target reached
    Completed,
    /// Temporarily on hold
    Paused,
    /// Given up
    Abandoned,
}

impl GoalStatus {
    /// Whether `self -> next` is an ordinary transition
    ///
    /// `Completed -> Active` is deliberately absent; it is only reachable by
    /// an explicit reopen.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Active, Self::Paused | Self::Completed | Self::Abandoned)
                | (Self::Paused, Self::Active)
        )
    }

    /// Lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Paused => "paused",
            Self::Abandoned => "abandoned",
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user goal tracked against a numeric metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessGoal {
    /// Unique identifier
    pub id: String,
    /// Goal title
    pub title: String,
    /// Longer description
    #[serde(default)]
    pub description: String,
    /// Name of the tracked metric, e.g. "bench_press_1rm" or "body_weight"
    pub metric: String,
    /// Unit label of the metric values
    #[serde(default)]
    pub unit: String,
    /// Value when the goal was set; progress is measured from here when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_value: Option<f64>,
    /// Latest recorded value
    pub current_value: f64,
    /// Value that completes the goal
    pub target_value: f64,
    /// Start of the goal window
    pub start_date: DateTime<Utc>,
    /// Deadline
    pub target_date: DateTime<Utc>,
    /// Lifecycle status
    #[serde(default)]
    pub status: GoalStatus,
    /// Progress toward the target, 0 to 100
    #[serde(default)]
    pub completion_percentage: f64,
    /// When the goal was completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Version counter
    #[serde(default = "super::initial_version")]
    pub version: u64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl FitnessGoal {
    /// Create an active goal with no recorded progress
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        metric: impl Into<String>,
        target_value: f64,
        start_date: DateTime<Utc>,
        target_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            description: String::new(),
            metric: metric.into(),
            unit: String::new(),
            start_value: None,
            current_value: 0.0,
            target_value,
            start_date,
            target_date,
            status: GoalStatus::Active,
            completion_percentage: 0.0,
            completed_at: None,
            version: super::initial_version(),
            created_at: start_date,
            updated_at: start_date,
        }
    }

    /// Set the starting value and begin tracking from it
    #[must_use]
    pub const fn with_start_value(mut self, start_value: f64) -> Self {
        self.start_value = Some(start_value);
        self.current_value = start_value;
        self
    }

    fn validate_fields(&self) -> AppResult<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::missing_field("title"));
        }
        if self.metric.trim().is_empty() {
            return Err(AppError::missing_field("metric"));
        }
        if !self.target_value.is_finite() || !self.current_value.is_finite() {
            return Err(AppError::out_of_range(
                "target_value",
                "goal values must be finite numbers",
            ));
        }
        if !(0.0..=100.0).contains(&self.completion_percentage) {
            return Err(AppError::out_of_range(
                "completion_percentage",
                format!("{} is not between 0 and 100", self.completion_percentage),
            ));
        }
        Ok(())
    }
}

impl_versioned_entity!(FitnessGoal, Collection::Goals, "Goal");
