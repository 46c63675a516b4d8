// ABOUTME: Friendly display strings for reps, weights, durations, effort, dates, and prescriptions
// ABOUTME: Weight output follows the user's unit system and snaps to dumbbell increments when relevant
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Friendly Formatting
//!
//! Pure functions turning structured values into the strings shown to the
//! user. Nothing here fails: out-of-range input falls back to `"unknown"` or to
//! the closest sensible rendering.

use chrono::{DateTime, Utc};
use pierre_training_core::models::{CardioBlock, Equipment, ExercisePrescription, RepTarget};
use pierre_training_core::units::{convert_weight, round2, Precision, UnitSystem, WeightUnit};
use serde::{Deserialize, Serialize};

/// Fixed closing line of every cardio narrative
const HEART_RATE_RECOVERY_NOTE: &str =
    "Check your heart rate within 60 seconds of finishing to track recovery.";

/// Verbosity of rep strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepStyle {
    /// "10 repetitions", "8 to 12 reps"
    #[default]
    Long,
    /// "10 reps", "8-12 reps"
    Short,
}

/// Date rendering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFormat {
    /// "Jan 5, 2025"
    #[default]
    Short,
    /// "Sunday, January 5, 2025"
    Long,
    /// "Today", "Yesterday", "3 days ago"
    Relative,
}

/// Render a number with at most two decimals and no trailing zeros
#[must_use]
pub fn format_number(value: f64) -> String {
    let rounded = round2(value);
    if rounded.fract().abs() < f64::EPSILON {
        format!("{rounded:.0}")
    } else {
        let text = format!("{rounded:.2}");
        text.trim_end_matches('0').to_owned()
    }
}

/// Render a rep target
#[must_use]
pub fn format_reps(reps: RepTarget, style: RepStyle) -> String {
    match (reps, style) {
        (RepTarget::Count(1), RepStyle::Long) => "1 repetition".to_owned(),
        (RepTarget::Count(1), RepStyle::Short) => "1 rep".to_owned(),
        (RepTarget::Count(n), RepStyle::Long) => format!("{n} repetitions"),
        (RepTarget::Count(n), RepStyle::Short) => format!("{n} reps"),
        (RepTarget::Range { min, max }, RepStyle::Long) => format!("{min} to {max} reps"),
        (RepTarget::Range { min, max }, RepStyle::Short) => format!("{min}-{max} reps"),
    }
}

/// Render a weight in the user's unit system
///
/// Dumbbell prescriptions snap to real dumbbell increments and read
/// "per dumbbell"; everything else is rounded to two decimals.
#[must_use]
pub fn format_weight(
    value: f64,
    unit: WeightUnit,
    system: UnitSystem,
    equipment: Equipment,
) -> String {
    let target = system.weight_unit();
    let precision = if equipment == Equipment::Dumbbell {
        Precision::Dumbbell
    } else {
        Precision::Exact
    };
    let converted = convert_weight(value, unit, target, precision);
    let base = format!("{} {}", format_number(converted), target.symbol());
    if equipment == Equipment::Dumbbell {
        format!("{base} per dumbbell")
    } else {
        base
    }
}

/// Render a duration: "45s", "2m 5s", "1m", "1h 30m", "2h"
#[must_use]
pub fn format_time_to_readable(seconds: u64) -> String {
    if seconds < 60 {
        return format!("{seconds}s");
    }
    if seconds < 3600 {
        let minutes = seconds / 60;
        let secs = seconds % 60;
        return if secs == 0 {
            format!("{minutes}m")
        } else {
            format!("{minutes}m {secs}s")
        };
    }
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    if minutes == 0 {
        format!("{hours}h")
    } else {
        format!("{hours}h {minutes}m")
    }
}

/// Render a 1-10 effort level as a phrase
#[must_use]
pub fn format_effort(level: u32) -> &'static str {
    match level {
        1 | 2 => "very easy",
        3 | 4 => "easy",
        5 | 6 => "moderate",
        7 | 8 => "hard",
        9 | 10 => "maximum effort",
        _ => "unknown",
    }
}

/// Render a date relative to `now` or as a calendar date
#[must_use]
pub fn format_date(date: DateTime<Utc>, mode: DateFormat, now: DateTime<Utc>) -> String {
    match mode {
        DateFormat::Short => date.format("%b %-d, %Y").to_string(),
        DateFormat::Long => date.format("%A, %B %-d, %Y").to_string(),
        DateFormat::Relative => format_relative(date, now),
    }
}

fn format_relative(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    // Future dates have no "ago"; treat them as today
    let days = (now - date).num_days().max(0);
    match days {
        0 => "Today".to_owned(),
        1 => "Yesterday".to_owned(),
        2..=6 => format!("{days} days ago"),
        7..=29 => plural_ago(days / 7, "week"),
        30..=364 => plural_ago(days / 30, "month"),
        _ => plural_ago(days / 365, "year"),
    }
}

fn plural_ago(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

/// Narrate a cardio block
///
/// Every round is described with the first interval's durations, even when
/// later intervals differ.
#[must_use]
pub fn describe_cardio_block(block: &CardioBlock) -> String {
    let mut sentences = Vec::with_capacity(4);

    if block.warm_up_seconds > 0 {
        sentences.push(format!(
            "Warm up for {}.",
            format_time_to_readable(u64::from(block.warm_up_seconds))
        ));
    }

    if let Some(first) = block.intervals.first() {
        let rounds = block.intervals.len();
        let round_word = if rounds == 1 { "round" } else { "rounds" };
        let lead = if sentences.is_empty() { "" } else { "Then " };
        sentences.push(format!(
            "{lead}{rounds} {round_word}: {}s fast / {}s easy.",
            first.work_seconds, first.recovery_seconds
        ));
    }

    if block.cool_down_seconds > 0 {
        sentences.push(format!(
            "Cool down for {}.",
            format_time_to_readable(u64::from(block.cool_down_seconds))
        ));
    }

    sentences.push(HEART_RATE_RECOVERY_NOTE.to_owned());
    sentences.join(" ")
}

/// Describe a prescription as one sentence
///
/// Example: "3 sets of 8 to 12 reps at 45 kg per dumbbell, rest 1m 30s between sets"
#[must_use]
pub fn describe_prescription(prescription: &ExercisePrescription, system: UnitSystem) -> String {
    let set_word = if prescription.sets == 1 { "set" } else { "sets" };
    let mut text = format!(
        "{} {set_word} of {}",
        prescription.sets,
        format_reps(prescription.reps, RepStyle::Long)
    );

    if let Some(weight) = prescription.weight {
        text.push_str(" at ");
        text.push_str(&format_weight(
            weight,
            prescription.weight_unit,
            system,
            prescription.equipment,
        ));
    }

    if let Some(duration) = prescription.duration_seconds.filter(|d| *d > 0) {
        text.push_str(&format!(
            ", hold {} per set",
            format_time_to_readable(u64::from(duration))
        ));
    }

    if let Some(tempo) = prescription.tempo.as_deref().filter(|t| !t.trim().is_empty()) {
        text.push_str(&format!(", tempo {tempo}"));
    }

    if let Some(effort) = prescription.effort_level {
        text.push_str(&format!(
            ", effort {effort}/10 ({})",
            format_effort(u32::from(effort))
        ));
    }

    if let Some(rest) = prescription.rest_seconds.filter(|r| *r > 0) {
        text.push_str(&format!(
            ", rest {} between sets",
            format_time_to_readable(u64::from(rest))
        ));
    }

    text
}
