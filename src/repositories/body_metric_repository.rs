// ABOUTME: Body metric repository: append-only measurement history with explicit versioned edits
// ABOUTME: Queries return entries in date order for trend display
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::EntityStore;
use crate::storage::SharedStorage;
use chrono::{DateTime, Utc};
use pierre_training_core::errors::AppResult;
use pierre_training_core::models::BodyMetricEntry;
use pierre_training_core::units::{convert_weight, Precision, WeightUnit};

/// Body measurement history
#[derive(Clone)]
pub struct BodyMetricRepository {
    entries: EntityStore<BodyMetricEntry>,
}

impl BodyMetricRepository {
    /// Create a repository over `storage`
    #[must_use]
    pub fn new(storage: SharedStorage) -> Self {
        Self {
            entries: EntityStore::new(storage),
        }
    }

    /// Append a measurement
    ///
    /// # Errors
    ///
    /// Returns a validation or storage error
    pub async fn add(&self, entry: BodyMetricEntry) -> AppResult<BodyMetricEntry> {
        self.entries.insert(entry).await
    }

    /// Load a measurement
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id
    pub async fn get(&self, entry_id: &str) -> AppResult<BodyMetricEntry> {
        self.entries.require(entry_id).await
    }

    /// Full history, oldest first
    pub async fn list(&self) -> Vec<BodyMetricEntry> {
        let mut entries = self.entries.list().await;
        entries.sort_by_key(|e| e.date);
        entries
    }

    /// Correct a measurement, bumping its version
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound`, a validation error, or a storage error
    pub async fn update(&self, entry: BodyMetricEntry) -> AppResult<BodyMetricEntry> {
        self.entries.update(entry).await
    }

    /// Delete a measurement
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id or a storage error
    pub async fn delete(&self, entry_id: &str) -> AppResult<()> {
        self.entries.delete(entry_id).await
    }

    /// Most recent measurement
    pub async fn latest(&self) -> Option<BodyMetricEntry> {
        self.list().await.pop()
    }

    /// Measurements with `from <= date <= to`, oldest first
    pub async fn in_range(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<BodyMetricEntry> {
        self.list()
            .await
            .into_iter()
            .filter(|e| e.date >= from && e.date <= to)
            .collect()
    }

    /// Body weight history converted to `unit`, oldest first
    pub async fn weight_series(&self, unit: WeightUnit) -> Vec<(DateTime<Utc>, f64)> {
        self.list()
            .await
            .into_iter()
            .map(|e| {
                (
                    e.date,
                    convert_weight(e.weight, e.weight_unit, unit, Precision::Exact),
                )
            })
            .collect()
    }

    pub(crate) const fn store(&self) -> &EntityStore<BodyMetricEntry> {
        &self.entries
    }
}
