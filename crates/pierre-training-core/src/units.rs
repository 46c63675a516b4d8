// ABOUTME: Weight, distance, and length conversion between imperial and metric units
// ABOUTME: Includes equipment-aware rounding that snaps to real dumbbell and plate increments
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unit Conversion
//!
//! Pure conversion functions. None of them validate magnitudes: zero and negative
//! values go through the same formula, so callers are responsible for passing
//! meaningful quantities.

use crate::constants::{dumbbell, units};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Measurement system selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Pounds, miles, inches
    #[default]
    Imperial,
    /// Kilograms, kilometers, centimeters
    Metric,
}

impl UnitSystem {
    /// Weight unit used for display in this system
    #[must_use]
    pub const fn weight_unit(self) -> WeightUnit {
        match self {
            Self::Imperial => WeightUnit::Lb,
            Self::Metric => WeightUnit::Kg,
        }
    }

    /// Distance unit used for display in this system
    #[must_use]
    pub const fn distance_unit(self) -> DistanceUnit {
        match self {
            Self::Imperial => DistanceUnit::Mi,
            Self::Metric => DistanceUnit::Km,
        }
    }

    /// Body length unit used for display in this system
    #[must_use]
    pub const fn length_unit(self) -> LengthUnit {
        match self {
            Self::Imperial => LengthUnit::In,
            Self::Metric => LengthUnit::Cm,
        }
    }

    /// Lowercase name as used in settings files
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Imperial => "imperial",
            Self::Metric => "metric",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "imperial" | "us" => Ok(Self::Imperial),
            "metric" | "si" => Ok(Self::Metric),
            other => Err(format!("unknown unit system: {other}")),
        }
    }
}

/// Unit of a weight value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    /// Pounds
    #[default]
    #[serde(alias = "lbs")]
    Lb,
    /// Kilograms
    #[serde(alias = "kgs")]
    Kg,
}

impl WeightUnit {
    /// Display suffix
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Lb => "lb",
            Self::Kg => "kg",
        }
    }
}

/// Unit of a distance value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    /// Miles
    #[default]
    Mi,
    /// Kilometers
    Km,
}

impl DistanceUnit {
    /// Display suffix
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Mi => "mi",
            Self::Km => "km",
        }
    }
}

/// Unit of a body length value (height, circumference)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// Inches
    #[default]
    In,
    /// Centimeters
    Cm,
}

impl LengthUnit {
    /// Display suffix
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Cm => "cm",
        }
    }
}

/// Rounding applied after a weight conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    /// Two decimal places
    #[default]
    Exact,
    /// Nearest available dumbbell increment
    Dumbbell,
}

/// Round to two decimal places
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Snap a weight to the nearest real dumbbell increment for its unit
///
/// Pounds step by 2.5 up to 50 lb and by 5 above; kilograms step by 1.25 up to
/// 25 kg and by 2.5 above.
#[must_use]
pub fn round_to_nearest_dumbbell(value: f64, unit: WeightUnit) -> f64 {
    let step = match unit {
        WeightUnit::Lb if value <= dumbbell::LB_FINE_LIMIT => dumbbell::LB_FINE_STEP,
        WeightUnit::Lb => dumbbell::LB_COARSE_STEP,
        WeightUnit::Kg if value <= dumbbell::KG_FINE_LIMIT => dumbbell::KG_FINE_STEP,
        WeightUnit::Kg => dumbbell::KG_COARSE_STEP,
    };
    (value / step).round() * step
}

/// Convert a weight between units and apply the requested rounding
#[must_use]
pub fn convert_weight(value: f64, from: WeightUnit, to: WeightUnit, precision: Precision) -> f64 {
    let raw = match (from, to) {
        (WeightUnit::Lb, WeightUnit::Kg) => value / units::LBS_PER_KG,
        (WeightUnit::Kg, WeightUnit::Lb) => value * units::LBS_PER_KG,
        _ => value,
    };
    match precision {
        Precision::Exact => round2(raw),
        Precision::Dumbbell => round_to_nearest_dumbbell(raw, to),
    }
}

/// Convert a distance between miles and kilometers, rounded to two decimals
#[must_use]
pub fn convert_distance(value: f64, from: DistanceUnit, to: DistanceUnit) -> f64 {
    let raw = match (from, to) {
        (DistanceUnit::Mi, DistanceUnit::Km) => value * units::KM_PER_MILE,
        (DistanceUnit::Km, DistanceUnit::Mi) => value / units::KM_PER_MILE,
        _ => value,
    };
    round2(raw)
}

/// Convert a length between inches and centimeters, rounded to two decimals
#[must_use]
pub fn convert_length(value: f64, from: LengthUnit, to: LengthUnit) -> f64 {
    let raw = match (from, to) {
        (LengthUnit::In, LengthUnit::Cm) => value * units::CM_PER_INCH,
        (LengthUnit::Cm, LengthUnit::In) => value / units::CM_PER_INCH,
        _ => value,
    };
    round2(raw)
}

/// Convert a feet + inches height into centimeters
#[must_use]
pub fn feet_inches_to_cm(feet: f64, inches: f64) -> f64 {
    round2(feet.mul_add(units::INCHES_PER_FOOT, inches) * units::CM_PER_INCH)
}

/// Convert centimeters into whole feet and remaining inches (one decimal)
#[must_use]
pub fn cm_to_feet_inches(cm: f64) -> (f64, f64) {
    let total_inches = cm / units::CM_PER_INCH;
    let mut feet = (total_inches / units::INCHES_PER_FOOT).floor();
    let mut inches = round1(feet.mul_add(-units::INCHES_PER_FOOT, total_inches));
    // 71.98 in rounds to 5 ft 12.0 in otherwise
    if inches >= units::INCHES_PER_FOOT {
        feet += 1.0;
        inches -= units::INCHES_PER_FOOT;
    }
    (feet, inches)
}
