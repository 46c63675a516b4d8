// ABOUTME: Goal progress math: completion percentage, auto-completion, and behind-schedule detection
// ABOUTME: A goal needs attention when overdue or when actual progress trails 70% of expected progress
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use pierre_training_core::constants::goals;
use pierre_training_core::models::{FitnessGoal, GoalStatus};
use pierre_training_core::units::round2;

/// Percentage of the way from start (or zero) to target, clamped to 0..=100
#[must_use]
pub fn compute_completion_percentage(goal: &FitnessGoal, current: f64) -> f64 {
    let raw = match goal.start_value {
        Some(start) if (goal.target_value - start).abs() > f64::EPSILON => {
            (current - start) / (goal.target_value - start) * 100.0
        }
        _ if goal.target_value.abs() < f64::EPSILON => 0.0,
        _ => current / goal.target_value * 100.0,
    };
    if raw.is_finite() {
        round2(raw.clamp(0.0, goals::COMPLETE_PERCENTAGE))
    } else {
        0.0
    }
}

/// Record a new metric value on `goal`
///
/// An active goal reaching 100% becomes completed. A goal that is already
/// completed stays completed whatever the new value is. Returns `true` when
/// this call completed the goal.
pub fn apply_progress(goal: &mut FitnessGoal, current: f64, now: DateTime<Utc>) -> bool {
    goal.current_value = current;
    goal.completion_percentage = compute_completion_percentage(goal, current);

    if goal.status == GoalStatus::Active
        && goal.completion_percentage >= goals::COMPLETE_PERCENTAGE
    {
        goal.status = GoalStatus::Completed;
        goal.completed_at = Some(now);
        return true;
    }
    false
}

/// Fraction of the goal window elapsed at `now`, as a percentage
///
/// `None` for zero-length or inverted windows.
#[must_use]
pub fn expected_progress(goal: &FitnessGoal, now: DateTime<Utc>) -> Option<f64> {
    let window = (goal.target_date - goal.start_date).num_seconds();
    if window <= 0 {
        return None;
    }
    let elapsed = (now - goal.start_date).num_seconds().clamp(0, window);
    Some(elapsed as f64 / window as f64 * 100.0)
}

/// Whether an active goal is overdue or behind schedule
#[must_use]
pub fn needs_attention(goal: &FitnessGoal, now: DateTime<Utc>) -> bool {
    if goal.status != GoalStatus::Active {
        return false;
    }
    let incomplete = goal.completion_percentage < goals::COMPLETE_PERCENTAGE;
    if now > goal.target_date && incomplete {
        return true;
    }
    expected_progress(goal, now)
        .is_some_and(|expected| goal.completion_percentage < goals::ON_SCHEDULE_FRACTION * expected)
}

/// Share of goals completed, rounded to a whole percent; 0 with no goals
#[must_use]
pub fn completion_rate(all: &[FitnessGoal]) -> f64 {
    if all.is_empty() {
        return 0.0;
    }
    let completed = all
        .iter()
        .filter(|g| g.status == GoalStatus::Completed)
        .count();
    (completed as f64 / all.len() as f64 * 100.0).round()
}
