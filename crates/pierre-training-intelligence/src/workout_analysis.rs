// ABOUTME: Workout history analysis: volume, estimated one-rep max, trends, records, flags, RPE
// ABOUTME: Trend direction comes from the regression slope over the most recent sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Workout Analysis
//!
//! Summary statistics over completed [`WorkoutLogEntry`] records. Only sets
//! marked `completed` contribute to volume, records, and trends.

use crate::statistical_analysis::StatisticalAnalyzer;
use chrono::{DateTime, Utc};
use pierre_training_core::constants::{analysis, units};
use pierre_training_core::models::{PerformedSet, WorkoutLogEntry};
use pierre_training_core::units::{round2, WeightUnit};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Metric sampled per session for trend detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendMetric {
    /// Heaviest completed set
    #[default]
    Weight,
    /// Most repetitions in a completed set
    Reps,
    /// Session volume (weight x reps)
    Volume,
}

/// Direction of a progress trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    /// Slope above the stability threshold
    Increasing,
    /// Slope below the negative stability threshold
    Decreasing,
    /// Flat or not enough data
    Stable,
}

/// Result of trend detection for one exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressTrend {
    /// Classified direction
    pub trend: TrendDirection,
    /// Change between first and last sampled value, in percent
    pub percentage: f64,
    /// Sampled window, e.g. "last 6 sessions"
    pub period: String,
    /// Regression slope, 0 when no regression ran
    pub slope: f64,
    /// Number of sessions sampled
    pub data_points: usize,
}

impl ProgressTrend {
    fn insufficient(data_points: usize) -> Self {
        Self {
            trend: TrendDirection::Stable,
            percentage: 0.0,
            period: analysis::INSUFFICIENT_DATA_LABEL.to_owned(),
            slope: 0.0,
            data_points,
        }
    }
}

/// Best-ever values for one exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalRecords {
    /// Exercise the records belong to
    pub exercise_id: String,
    /// Heaviest completed set
    pub max_weight: f64,
    /// Most repetitions in any completed set
    pub max_reps: u32,
    /// Largest single-session volume
    pub max_volume: f64,
    /// Unit of `max_weight` and `max_volume`
    pub unit: WeightUnit,
    /// Start of the session that produced `max_weight`
    pub best_weight_date: Option<DateTime<Utc>>,
}

/// Form and pain flags aggregated over one workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionFlags {
    /// Any set reported a form breakdown
    pub form_breakdown: bool,
    /// Highest back pain score
    pub max_back_pain: u8,
    /// Highest knee pain score
    pub max_knee_pain: u8,
}

impl SessionFlags {
    /// Whether anything was reported at all
    #[must_use]
    pub const fn any(&self) -> bool {
        self.form_breakdown || self.max_back_pain > 0 || self.max_knee_pain > 0
    }
}

/// Convert a set weight into `target` using the precise factors
#[must_use]
pub fn normalize_weight(weight: f64, from: WeightUnit, to: WeightUnit) -> f64 {
    match (from, to) {
        (WeightUnit::Lb, WeightUnit::Kg) => weight * units::KG_PER_LB_PRECISE,
        (WeightUnit::Kg, WeightUnit::Lb) => weight * units::LBS_PER_KG_PRECISE,
        _ => weight,
    }
}

/// Total volume (weight x reps) of completed, weighted sets in `target_unit`
#[must_use]
pub fn calculate_volume(sets: &[PerformedSet], target_unit: WeightUnit) -> f64 {
    round2(raw_volume(sets.iter(), target_unit))
}

fn raw_volume<'a>(sets: impl Iterator<Item = &'a PerformedSet>, target_unit: WeightUnit) -> f64 {
    sets.filter(|s| s.completed)
        .filter_map(|s| {
            s.weight
                .map(|w| normalize_weight(w, s.weight_unit, target_unit) * f64::from(s.reps))
        })
        .sum()
}

/// Brzycki one-rep-max estimate
///
/// One rep returns the weight itself, as does anything above 30 reps where
/// the formula stops being meaningful. Zero reps estimate nothing.
#[must_use]
pub fn estimated_one_rep_max(weight: f64, reps: u32) -> f64 {
    match reps {
        0 => 0.0,
        1 => weight,
        r if r > analysis::MAX_REPS_FOR_ESTIMATION => weight,
        r => round2(
            weight * analysis::BRZYCKI_NUMERATOR / (analysis::BRZYCKI_DENOMINATOR - f64::from(r)),
        ),
    }
}

/// Workouts containing `exercise_id`, oldest first
fn sessions_with<'a>(
    workouts: &'a [WorkoutLogEntry],
    exercise_id: &str,
) -> Vec<&'a WorkoutLogEntry> {
    let mut sessions: Vec<&WorkoutLogEntry> = workouts
        .iter()
        .filter(|w| w.contains_exercise(exercise_id))
        .collect();
    sessions.sort_by_key(|w| w.date_time_start);
    sessions
}

fn session_metric(
    workout: &WorkoutLogEntry,
    exercise_id: &str,
    metric: TrendMetric,
    unit: WeightUnit,
) -> f64 {
    let completed = workout.sets_for(exercise_id).filter(|s| s.completed);
    match metric {
        TrendMetric::Weight => completed
            .filter_map(|s| s.weight.map(|w| normalize_weight(w, s.weight_unit, unit)))
            .fold(0.0, f64::max),
        TrendMetric::Reps => f64::from(completed.map(|s| s.reps).max().unwrap_or(0)),
        TrendMetric::Volume => raw_volume(completed, unit),
    }
}

/// Detect the progress trend of one exercise over its most recent sessions
///
/// Weights are compared in pounds so mixed-unit history stays comparable.
#[must_use]
pub fn get_progress_trend(
    workouts: &[WorkoutLogEntry],
    exercise_id: &str,
    metric: TrendMetric,
) -> ProgressTrend {
    let sessions = sessions_with(workouts, exercise_id);
    let window_start = sessions
        .len()
        .saturating_sub(analysis::TREND_WINDOW_SESSIONS);
    let values: Vec<f64> = sessions[window_start..]
        .iter()
        .map(|w| session_metric(w, exercise_id, metric, WeightUnit::Lb))
        .collect();

    let Ok(regression) = StatisticalAnalyzer::linear_regression(&values) else {
        debug!(
            exercise_id,
            data_points = values.len(),
            "Not enough sessions for trend detection"
        );
        return ProgressTrend::insufficient(values.len());
    };

    let trend = if regression.slope > analysis::TREND_SLOPE_THRESHOLD {
        TrendDirection::Increasing
    } else if regression.slope < -analysis::TREND_SLOPE_THRESHOLD {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    };

    let first = values.first().copied().unwrap_or_default();
    let last = values.last().copied().unwrap_or_default();
    let percentage = if first.abs() < f64::EPSILON {
        0.0
    } else {
        round2((last - first) / first * 100.0)
    };

    ProgressTrend {
        trend,
        percentage,
        period: format!("last {} sessions", values.len()),
        slope: regression.slope,
        data_points: values.len(),
    }
}

/// Scan the full history of one exercise for its records
///
/// Returns `None` when the exercise never appears.
#[must_use]
pub fn personal_records(
    workouts: &[WorkoutLogEntry],
    exercise_id: &str,
    unit: WeightUnit,
) -> Option<PersonalRecords> {
    let sessions = sessions_with(workouts, exercise_id);
    if sessions.is_empty() {
        return None;
    }

    let mut records = PersonalRecords {
        exercise_id: exercise_id.to_owned(),
        max_weight: 0.0,
        max_reps: 0,
        max_volume: 0.0,
        unit,
        best_weight_date: None,
    };

    for workout in sessions {
        for set in workout.sets_for(exercise_id).filter(|s| s.completed) {
            if let Some(weight) = set.weight {
                let weight = normalize_weight(weight, set.weight_unit, unit);
                if weight > records.max_weight {
                    records.max_weight = weight;
                    records.best_weight_date = Some(workout.date_time_start);
                }
            }
            records.max_reps = records.max_reps.max(set.reps);
        }
        let volume = raw_volume(workout.sets_for(exercise_id), unit);
        records.max_volume = records.max_volume.max(volume);
    }

    records.max_weight = round2(records.max_weight);
    records.max_volume = round2(records.max_volume);
    Some(records)
}

/// Aggregate form and pain reports across every set of a workout
#[must_use]
pub fn session_flags(workout: &WorkoutLogEntry) -> SessionFlags {
    workout
        .all_sets()
        .fold(SessionFlags::default(), |mut flags, set| {
            flags.form_breakdown |= set.form_breakdown;
            flags.max_back_pain = flags.max_back_pain.max(set.back_pain.unwrap_or(0));
            flags.max_knee_pain = flags.max_knee_pain.max(set.knee_pain.unwrap_or(0));
            flags
        })
}

/// Numeric score for a perceived-effort phrase, 3 when unrecognized
#[must_use]
pub fn perceived_effort_score(text: &str) -> f64 {
    match text.trim().to_lowercase().as_str() {
        "very easy" => 1.0,
        "easy" => 2.0,
        "moderately hard" => 3.0,
        "hard" => 4.0,
        "very hard" => 5.0,
        _ => analysis::DEFAULT_PERCEIVED_EFFORT_SCORE,
    }
}

/// Average RPE over the sets of a workout
///
/// Explicit scores win; otherwise each set's effort text (or the workout's)
/// is mapped to a score. `None` when the workout has no sets.
#[must_use]
pub fn average_rpe(workout: &WorkoutLogEntry) -> Option<f64> {
    let sets: Vec<&PerformedSet> = workout.all_sets().collect();
    if sets.is_empty() {
        return None;
    }

    let explicit: Vec<f64> = sets.iter().filter_map(|s| s.rpe_score).collect();
    if let Some(mean) = StatisticalAnalyzer::mean(&explicit) {
        return Some(round2(mean));
    }

    let derived: Vec<f64> = sets
        .iter()
        .map(|s| {
            s.perceived_effort
                .as_deref()
                .or(workout.perceived_effort.as_deref())
                .map_or(analysis::DEFAULT_PERCEIVED_EFFORT_SCORE, perceived_effort_score)
        })
        .collect();
    StatisticalAnalyzer::mean(&derived).map(round2)
}
