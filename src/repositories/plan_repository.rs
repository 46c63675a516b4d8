// ABOUTME: Plan repository: CRUD, search, duplication, session editing, and progress tracking
// ABOUTME: Completion records live in their own collection so plan templates are never mutated by use
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::EntityStore;
use crate::storage::SharedStorage;
use chrono::{DateTime, Utc};
use pierre_training_core::errors::AppResult;
use pierre_training_core::models::{
    CardioBlock, CompletedSession, Entity, ExercisePrescription, ProgramPlan, Session, SessionPath,
    SessionType,
};
use pierre_training_intelligence::plan_analysis::{self, PlanProgress, PlanStats};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, warn};

/// Search criteria for plans; every populated field must match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanFilters {
    /// Case-insensitive substring of title, description, or any tag
    #[serde(default)]
    pub query: Option<String>,
    /// Minimum `duration_weeks` (inclusive)
    #[serde(default)]
    pub min_weeks: Option<u32>,
    /// Maximum `duration_weeks` (inclusive)
    #[serde(default)]
    pub max_weeks: Option<u32>,
    /// Session types that must all appear somewhere in the plan
    #[serde(default)]
    pub session_types: Vec<SessionType>,
    /// Tags that must all be present (case-insensitive)
    #[serde(default)]
    pub tags: Vec<String>,
    /// Template flag to match
    #[serde(default)]
    pub is_template: Option<bool>,
}

impl PlanFilters {
    /// Whether `plan` satisfies every populated criterion
    #[must_use]
    pub fn matches(&self, plan: &ProgramPlan) -> bool {
        if let Some(query) = self
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
        {
            let needle = query.to_lowercase();
            let hit = plan.title.to_lowercase().contains(&needle)
                || plan.description.to_lowercase().contains(&needle)
                || plan.tags.iter().any(|t| t.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        if self.min_weeks.is_some_and(|min| plan.duration_weeks < min)
            || self.max_weeks.is_some_and(|max| plan.duration_weeks > max)
        {
            return false;
        }

        if !self.session_types.is_empty() {
            let present = plan.session_types();
            if !self.session_types.iter().all(|t| present.contains(t)) {
                return false;
            }
        }

        if !self.tags.iter().all(|wanted| {
            plan.tags
                .iter()
                .any(|tag| tag.trim().eq_ignore_ascii_case(wanted.trim()))
        }) {
            return false;
        }

        !matches!(self.is_template, Some(flag) if plan.is_template != flag)
    }
}

/// Partial update of one plan session; `None` fields are left unchanged
///
/// `notes` and `cardio_block` take `Some(None)` to clear the field. In JSON
/// an explicit `null` clears and an absent key leaves it unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionUpdate {
    /// New session name
    #[serde(default)]
    pub name: Option<String>,
    /// New session type
    #[serde(default)]
    pub session_type: Option<SessionType>,
    /// New duration estimate
    #[serde(default)]
    pub estimated_duration_minutes: Option<u32>,
    /// New notes, or `Some(None)` to remove them
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<Option<String>>,
    /// Replacement exercise list
    #[serde(default)]
    pub exercises: Option<Vec<ExercisePrescription>>,
    /// Replacement cardio block, or `Some(None)` to remove it
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub cardio_block: Option<Option<CardioBlock>>,
}

fn present_or_null<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl SessionUpdate {
    /// Apply the populated fields to `session`
    pub fn apply(self, session: &mut Session) {
        if let Some(name) = self.name {
            session.name = name;
        }
        if let Some(session_type) = self.session_type {
            session.session_type = session_type;
        }
        if let Some(minutes) = self.estimated_duration_minutes {
            session.estimated_duration_minutes = minutes;
        }
        if let Some(notes) = self.notes {
            session.notes = notes;
        }
        if let Some(exercises) = self.exercises {
            session.exercises = exercises;
        }
        if let Some(block) = self.cardio_block {
            session.cardio_block = block;
        }
    }
}

/// Plans and their completion records
#[derive(Clone)]
pub struct PlanRepository {
    plans: EntityStore<ProgramPlan>,
    completions: EntityStore<CompletedSession>,
}

impl PlanRepository {
    /// Create a repository over `storage`
    #[must_use]
    pub fn new(storage: SharedStorage) -> Self {
        Self {
            plans: EntityStore::new(storage.clone()),
            completions: EntityStore::new(storage),
        }
    }

    /// Store a new plan
    ///
    /// # Errors
    ///
    /// Returns a validation or storage error
    pub async fn create(&self, plan: ProgramPlan) -> AppResult<ProgramPlan> {
        let plan = self.plans.insert(plan).await?;
        info!(plan_id = %plan.id, title = %plan.title, "Plan created");
        Ok(plan)
    }

    /// Load a plan
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id
    pub async fn get(&self, plan_id: &str) -> AppResult<ProgramPlan> {
        self.plans.require(plan_id).await
    }

    /// All plans, most recently updated first
    pub async fn list(&self) -> Vec<ProgramPlan> {
        let mut plans = self.plans.list().await;
        sort_recent_first(&mut plans);
        plans
    }

    /// Replace a plan, bumping its version
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound`, a validation error, or a storage error
    pub async fn update(&self, plan: ProgramPlan) -> AppResult<ProgramPlan> {
        self.plans.update(plan).await
    }

    /// Delete a plan together with its completion records
    ///
    /// Completion records go first, so a failure leaves the plan in place and
    /// the delete can be retried.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id or a storage error
    pub async fn delete(&self, plan_id: &str) -> AppResult<()> {
        self.plans.require(plan_id).await?;
        let owned: Vec<CompletedSession> = self
            .completions
            .try_list()
            .await?
            .into_iter()
            .filter(|c| c.plan_id == plan_id)
            .collect();
        for record in &owned {
            self.completions.delete(record.id()).await?;
        }
        self.plans.delete(plan_id).await?;
        info!(plan_id, removed_completions = owned.len(), "Plan deleted");
        Ok(())
    }

    /// Number of stored plans
    ///
    /// # Errors
    ///
    /// Returns a storage error
    pub async fn count(&self) -> AppResult<usize> {
        self.plans.count().await
    }

    /// Plans matching every populated filter, most recently updated first
    pub async fn search(&self, filters: &PlanFilters) -> Vec<ProgramPlan> {
        let mut plans: Vec<ProgramPlan> = self
            .plans
            .list()
            .await
            .into_iter()
            .filter(|plan| filters.matches(plan))
            .collect();
        sort_recent_first(&mut plans);
        plans
    }

    /// Deep-copy a plan under a new identity
    ///
    /// The copy is never a template and starts again at version 1.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id, or a validation/storage error
    pub async fn duplicate(&self, plan_id: &str, new_title: &str) -> AppResult<ProgramPlan> {
        let mut copy = self.plans.require(plan_id).await?;
        copy.id.clear();
        copy.title = new_title.to_owned();
        copy.is_template = false;
        let copy = self.plans.insert(copy).await?;
        info!(source_plan_id = plan_id, plan_id = %copy.id, "Plan duplicated");
        Ok(copy)
    }

    /// Apply a partial update to the session at `path`
    ///
    /// # Errors
    ///
    /// Returns `InvalidSessionPath` without touching storage when any index is
    /// out of range, `ResourceNotFound` for an unknown plan, or a
    /// validation/storage error
    pub async fn update_session(
        &self,
        plan_id: &str,
        path: SessionPath,
        update: SessionUpdate,
    ) -> AppResult<ProgramPlan> {
        let mut plan = self.plans.require(plan_id).await?;
        match plan.session_mut(path) {
            Ok(session) => update.apply(session),
            Err(e) => {
                warn!(plan_id, %path, error = %e, "Rejected session update");
                return Err(e);
            }
        }
        self.plans.update(plan).await
    }

    /// Record that the session at `path` was performed
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound`, `InvalidSessionPath`, or a storage error
    pub async fn mark_session_complete(
        &self,
        plan_id: &str,
        path: SessionPath,
        completed_at: DateTime<Utc>,
        workout_id: Option<String>,
    ) -> AppResult<CompletedSession> {
        let plan = self.plans.require(plan_id).await?;
        plan.validate_path(path)?;
        let mut record = CompletedSession::new(plan_id, path, completed_at);
        record.workout_id = workout_id;
        let record = self.completions.insert(record).await?;
        info!(plan_id, %path, "Plan session marked complete");
        Ok(record)
    }

    /// Completion records of one plan, oldest first
    pub async fn completed_sessions(&self, plan_id: &str) -> Vec<CompletedSession> {
        let mut records: Vec<CompletedSession> = self
            .completions
            .list()
            .await
            .into_iter()
            .filter(|c| c.plan_id == plan_id)
            .collect();
        records.sort_by_key(|c| c.completed_at);
        records
    }

    /// Every completion record, for export
    ///
    /// # Errors
    ///
    /// Returns a storage error
    pub async fn all_completed_sessions(&self) -> AppResult<Vec<CompletedSession>> {
        self.completions.try_list().await
    }

    /// Progress of a plan from its completion records
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id
    pub async fn calculate_progress(&self, plan_id: &str) -> AppResult<PlanProgress> {
        let plan = self.plans.require(plan_id).await?;
        let completed = self.completed_sessions(plan_id).await;
        Ok(plan_analysis::calculate_progress(&plan, &completed))
    }

    /// Structural statistics of a plan
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id
    pub async fn get_stats(&self, plan_id: &str) -> AppResult<PlanStats> {
        let plan = self.plans.require(plan_id).await?;
        Ok(plan_analysis::plan_stats(&plan))
    }

    pub(crate) const fn plan_store(&self) -> &EntityStore<ProgramPlan> {
        &self.plans
    }

    pub(crate) const fn completion_store(&self) -> &EntityStore<CompletedSession> {
        &self.completions
    }
}

fn sort_recent_first(plans: &mut [ProgramPlan]) {
    plans.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
}
