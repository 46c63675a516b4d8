// ABOUTME: Goal repository: CRUD, progress updates with auto-completion, and lifecycle transitions
// ABOUTME: Attention and completion-rate queries delegate to the goal progress math
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::EntityStore;
use crate::storage::SharedStorage;
use chrono::{DateTime, Utc};
use pierre_training_core::errors::{AppError, AppResult};
use pierre_training_core::models::{FitnessGoal, GoalStatus};
use pierre_training_intelligence::goal_progress;
use tracing::info;

/// Fitness goals
#[derive(Clone)]
pub struct GoalRepository {
    goals: EntityStore<FitnessGoal>,
}

impl GoalRepository {
    /// Create a repository over `storage`
    #[must_use]
    pub fn new(storage: SharedStorage) -> Self {
        Self {
            goals: EntityStore::new(storage),
        }
    }

    /// Store a new goal with its initial completion percentage
    ///
    /// # Errors
    ///
    /// Returns a validation or storage error
    pub async fn create(&self, mut goal: FitnessGoal) -> AppResult<FitnessGoal> {
        goal.completion_percentage =
            goal_progress::compute_completion_percentage(&goal, goal.current_value);
        let goal = self.goals.insert(goal).await?;
        info!(goal_id = %goal.id, metric = %goal.metric, "Goal created");
        Ok(goal)
    }

    /// Load a goal
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id
    pub async fn get(&self, goal_id: &str) -> AppResult<FitnessGoal> {
        self.goals.require(goal_id).await
    }

    /// All goals ordered by target date
    pub async fn list(&self) -> Vec<FitnessGoal> {
        let mut goals = self.goals.list().await;
        goals.sort_by_key(|g| g.target_date);
        goals
    }

    /// Replace a goal, bumping its version
    ///
    /// A status change must follow the lifecycle graph, so a completed goal
    /// still needs [`Self::reopen`]. Progress is recomputed from
    /// `current_value`, and an active goal reaching 100% is completed.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound`, `InvalidStateTransition` for a disallowed
    /// status change, a validation error, or a storage error
    pub async fn update(&self, mut goal: FitnessGoal) -> AppResult<FitnessGoal> {
        let stored = self.goals.require(&goal.id).await?;
        if goal.status != stored.status && !stored.status.can_transition_to(goal.status) {
            return Err(AppError::invalid_transition(stored.status, goal.status));
        }

        let now = Utc::now();
        match goal.status {
            GoalStatus::Completed if goal.completed_at.is_none() => {
                goal.completed_at = stored.completed_at.or(Some(now));
            }
            GoalStatus::Completed => {}
            _ => goal.completed_at = None,
        }
        let current = goal.current_value;
        let completed_now = goal_progress::apply_progress(&mut goal, current, now);

        let goal = self.goals.update(goal).await?;
        if completed_now {
            info!(goal_id = %goal.id, "Goal completed");
        }
        Ok(goal)
    }

    /// Delete a goal
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id or a storage error
    pub async fn delete(&self, goal_id: &str) -> AppResult<()> {
        self.goals.delete(goal_id).await
    }

    /// Record a new current value and recompute progress
    ///
    /// An active goal reaching 100% is completed. A completed goal is never
    /// reverted by a lower value; use [`Self::reopen`] for that.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound`, `ValueOutOfRange` for non-finite values, or
    /// a storage error
    pub async fn update_goal_progress(
        &self,
        goal_id: &str,
        current_value: f64,
    ) -> AppResult<FitnessGoal> {
        if !current_value.is_finite() {
            return Err(AppError::out_of_range(
                "current_value",
                "must be a finite number",
            ));
        }
        let mut goal = self.goals.require(goal_id).await?;
        let completed_now = goal_progress::apply_progress(&mut goal, current_value, Utc::now());
        let goal = self.goals.update(goal).await?;
        if completed_now {
            info!(goal_id, "Goal completed");
        }
        Ok(goal)
    }

    /// Propagate a new value of `metric` to every goal tracking it
    ///
    /// Abandoned goals are left untouched.
    ///
    /// # Errors
    ///
    /// Returns the first storage error encountered
    pub async fn record_metric_value(
        &self,
        metric: &str,
        current_value: f64,
    ) -> AppResult<Vec<FitnessGoal>> {
        let tracking: Vec<FitnessGoal> = self
            .goals
            .list()
            .await
            .into_iter()
            .filter(|g| g.metric.eq_ignore_ascii_case(metric) && g.status != GoalStatus::Abandoned)
            .collect();
        let mut updated = Vec::with_capacity(tracking.len());
        for goal in tracking {
            updated.push(self.update_goal_progress(&goal.id, current_value).await?);
        }
        Ok(updated)
    }

    /// Move a goal to `next` along the allowed lifecycle graph
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` for disallowed moves (including
    /// completed to active, which needs [`Self::reopen`])
    pub async fn transition_status(
        &self,
        goal_id: &str,
        next: GoalStatus,
    ) -> AppResult<FitnessGoal> {
        let mut goal = self.goals.require(goal_id).await?;
        if !goal.status.can_transition_to(next) {
            return Err(AppError::invalid_transition(goal.status, next));
        }
        goal.status = next;
        if next == GoalStatus::Completed {
            goal.completed_at = Some(Utc::now());
        }
        let goal = self.goals.update(goal).await?;
        info!(goal_id, status = %goal.status, "Goal status changed");
        Ok(goal)
    }

    /// Explicitly reopen a completed goal
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` unless the goal is completed
    pub async fn reopen(&self, goal_id: &str) -> AppResult<FitnessGoal> {
        let mut goal = self.goals.require(goal_id).await?;
        if goal.status != GoalStatus::Completed {
            return Err(AppError::invalid_transition(goal.status, GoalStatus::Active));
        }
        goal.status = GoalStatus::Active;
        goal.completed_at = None;
        goal.completion_percentage =
            goal_progress::compute_completion_percentage(&goal, goal.current_value);
        let goal = self.goals.update(goal).await?;
        info!(goal_id, "Goal reopened");
        Ok(goal)
    }

    /// Active goals that are overdue or behind schedule at `now`
    pub async fn goals_needing_attention(&self, now: DateTime<Utc>) -> Vec<FitnessGoal> {
        self.list()
            .await
            .into_iter()
            .filter(|g| goal_progress::needs_attention(g, now))
            .collect()
    }

    /// Percentage of goals completed, rounded
    pub async fn goal_completion_rate(&self) -> f64 {
        goal_progress::completion_rate(&self.goals.list().await)
    }

    /// Goals currently being worked on
    pub async fn active_goals(&self) -> Vec<FitnessGoal> {
        self.list()
            .await
            .into_iter()
            .filter(|g| g.status == GoalStatus::Active)
            .collect()
    }

    pub(crate) const fn store(&self) -> &EntityStore<FitnessGoal> {
        &self.goals
    }
}
