// ABOUTME: Plan progress from completion records and structural statistics of a plan tree
// ABOUTME: Progress position follows the most recent completion, not the calendar
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use pierre_training_core::models::{CompletedSession, ProgramPlan, SessionPath, SessionType};
use pierre_training_core::units::round2;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Completion state of a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanProgress {
    /// Leaf sessions in the plan
    pub total_sessions: usize,
    /// Distinct sessions marked complete
    pub completed_sessions: usize,
    /// `completed / total * 100`, 0 for an empty plan
    pub completion_percentage: f64,
    /// Phase of the most recent completion
    pub current_phase_index: Option<usize>,
    /// Week of the most recent completion
    pub current_week_index: Option<usize>,
    /// Time of the most recent completion
    pub last_completed_at: Option<DateTime<Utc>>,
}

/// Structural summary of a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStats {
    /// Number of phases
    pub total_phases: usize,
    /// Number of weeks across all phases
    pub total_weeks: usize,
    /// Number of days across all weeks
    pub total_days: usize,
    /// Number of leaf sessions
    pub total_sessions: usize,
    /// Sessions per type
    pub session_type_counts: BTreeMap<SessionType, usize>,
    /// Prescriptions across all sessions
    pub total_exercises: usize,
    /// Distinct exercises across all sessions
    pub unique_exercises: usize,
    /// Sum of session duration estimates
    pub estimated_duration_minutes: u64,
}

/// Compute plan progress from completion records
///
/// Records for other plans and records whose path no longer exists are
/// ignored. Completing the same session twice counts once.
#[must_use]
pub fn calculate_progress(plan: &ProgramPlan, completed: &[CompletedSession]) -> PlanProgress {
    let total_sessions = plan.total_sessions();

    let valid: Vec<&CompletedSession> = completed
        .iter()
        .filter(|c| c.plan_id == plan.id)
        .filter(|c| plan.validate_path(c.session_path).is_ok())
        .collect();

    let distinct: BTreeSet<SessionPath> = valid.iter().map(|c| c.session_path).collect();
    let completed_sessions = distinct.len();

    let completion_percentage = if total_sessions == 0 {
        0.0
    } else {
        round2(completed_sessions as f64 / total_sessions as f64 * 100.0)
    };

    let latest = valid.iter().max_by_key(|c| c.completed_at);

    PlanProgress {
        total_sessions,
        completed_sessions,
        completion_percentage,
        current_phase_index: latest.map(|c| c.session_path.phase_index),
        current_week_index: latest.map(|c| c.session_path.week_index),
        last_completed_at: latest.map(|c| c.completed_at),
    }
}

/// Flatten a plan once and summarize its structure
#[must_use]
pub fn plan_stats(plan: &ProgramPlan) -> PlanStats {
    let total_phases = plan.phases.len();
    let total_weeks = plan.phases.iter().map(|p| p.weeks.len()).sum();
    let total_days = plan
        .phases
        .iter()
        .flat_map(|p| &p.weeks)
        .map(|w| w.days.len())
        .sum();

    let mut session_type_counts = BTreeMap::new();
    let mut unique = HashSet::new();
    let mut total_sessions = 0;
    let mut total_exercises = 0;
    let mut estimated_duration_minutes = 0_u64;

    for (_, session) in plan.iter_sessions() {
        total_sessions += 1;
        *session_type_counts.entry(session.session_type).or_insert(0) += 1;
        estimated_duration_minutes += u64::from(session.estimated_duration_minutes);
        total_exercises += session.exercises.len();
        for prescription in &session.exercises {
            unique.insert(exercise_key(
                &prescription.exercise_id,
                &prescription.exercise_name,
            ));
        }
    }

    PlanStats {
        total_phases,
        total_weeks,
        total_days,
        total_sessions,
        session_type_counts,
        total_exercises,
        unique_exercises: unique.len(),
        estimated_duration_minutes,
    }
}

fn exercise_key(id: &str, name: &str) -> String {
    if id.trim().is_empty() {
        format!("name:{}", name.trim().to_lowercase())
    } else {
        format!("id:{}", id.trim())
    }
}
