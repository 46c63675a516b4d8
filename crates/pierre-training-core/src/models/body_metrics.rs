// ABOUTME: Dated body measurement entries (weight, composition, circumferences)
// ABOUTME: History is append-only except for explicit versioned updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{impl_versioned_entity, Collection};
use crate::errors::{AppError, AppResult};
use crate::units::WeightUnit;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One dated body measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyMetricEntry {
    /// Unique identifier
    pub id: String,
    /// When the measurement was taken
    pub date: DateTime<Utc>,
    /// Body weight
    pub weight: f64,
    /// Unit of `weight`
    #[serde(default)]
    pub weight_unit: WeightUnit,
    /// Body fat percentage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_fat_percentage: Option<f64>,
    /// Muscle mass percentage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muscle_mass_percentage: Option<f64>,
    /// Waist circumference in centimeters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waist_cm: Option<f64>,
    /// Chest circumference in centimeters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chest_cm: Option<f64>,
    /// Upper arm circumference in centimeters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arms_cm: Option<f64>,
    /// Notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Opaque media identifier of a progress photo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_source: Option<String>,
    /// Version counter
    #[serde(default = "super::initial_version")]
    pub version: u64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl BodyMetricEntry {
    /// Create a weight-only entry
    #[must_use]
    pub const fn new(date: DateTime<Utc>, weight: f64, weight_unit: WeightUnit) -> Self {
        Self {
            id: String::new(),
            date,
            weight,
            weight_unit,
            body_fat_percentage: None,
            muscle_mass_percentage: None,
            waist_cm: None,
            chest_cm: None,
            arms_cm: None,
            notes: None,
            photo_source: None,
            version: super::initial_version(),
            created_at: date,
            updated_at: date,
        }
    }

    fn validate_fields(&self) -> AppResult<()> {
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(AppError::out_of_range("weight", "must be a positive number"));
        }
        for (field, value) in [
            ("body_fat_percentage", self.body_fat_percentage),
            ("muscle_mass_percentage", self.muscle_mass_percentage),
        ] {
            if value.is_some_and(|v| !(0.0..=100.0).contains(&v)) {
                return Err(AppError::out_of_range(field, "must be between 0 and 100"));
            }
        }
        Ok(())
    }
}

impl_versioned_entity!(BodyMetricEntry, Collection::BodyMetrics, "Body metric");
