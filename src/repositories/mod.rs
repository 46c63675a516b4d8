// ABOUTME: Repository layer providing typed CRUD and queries over the storage boundary
// ABOUTME: Shared EntityStore handles serialization, identity, versioning, and failure logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Repositories
//!
//! Each repository wraps an [`EntityStore`] for its entity type. Failure policy
//! is uniform: writes propagate storage errors, list reads log them and
//! degrade to an empty result so read-heavy callers stay available.

/// Body measurement history
pub mod body_metric_repository;
/// Exercise glossary
pub mod glossary_repository;
/// Fitness goals
pub mod goal_repository;
/// Workout plans and plan completion records
pub mod plan_repository;
/// User settings
pub mod settings_repository;
/// Workout log entries
pub mod workout_repository;

pub use body_metric_repository::BodyMetricRepository;
pub use glossary_repository::GlossaryRepository;
pub use goal_repository::GoalRepository;
pub use plan_repository::{PlanFilters, PlanRepository, SessionUpdate};
pub use settings_repository::SettingsRepository;
pub use workout_repository::WorkoutRepository;

use crate::storage::SharedStorage;
use chrono::Utc;
use pierre_training_core::errors::{AppError, AppResult};
use pierre_training_core::models::Entity;
use std::marker::PhantomData;
use tracing::{debug, error, warn};

/// Typed access to one collection
pub struct EntityStore<T: Entity> {
    storage: SharedStorage,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> Clone for EntityStore<T> {
    fn clone(&self) -> Self {
        Self::new(self.storage.clone())
    }
}

impl<T: Entity> EntityStore<T> {
    /// Bind a store to a storage backend
    #[must_use]
    pub fn new(storage: SharedStorage) -> Self {
        Self {
            storage,
            _entity: PhantomData,
        }
    }

    /// Assign identity, validate, and persist a new entity
    ///
    /// # Errors
    ///
    /// Returns a validation error or the storage failure
    pub async fn insert(&self, mut entity: T) -> AppResult<T> {
        entity.prepare_new(Utc::now());
        entity.validate()?;
        self.put(&entity).await?;
        debug!(collection = %T::COLLECTION, id = entity.id(), "Created {}", T::KIND);
        Ok(entity)
    }

    /// Persist an entity as-is, without touching its bookkeeping
    ///
    /// # Errors
    ///
    /// Returns the serialization or storage failure
    pub async fn put(&self, entity: &T) -> AppResult<()> {
        let value = serde_json::to_value(entity)?;
        self.storage
            .save(T::COLLECTION, entity.id(), value)
            .await
            .map_err(|e| {
                error!(
                    collection = %T::COLLECTION,
                    id = entity.id(),
                    error = %e,
                    "Failed to save {}",
                    T::KIND
                );
                AppError::from(e)
            })
    }

    /// Fetch an entity by id
    ///
    /// # Errors
    ///
    /// Returns the storage failure or a deserialization error
    pub async fn get(&self, id: &str) -> AppResult<Option<T>> {
        let value = self.storage.get(T::COLLECTION, id).await.map_err(|e| {
            error!(collection = %T::COLLECTION, id, error = %e, "Failed to load {}", T::KIND);
            AppError::from(e)
        })?;
        value.map(serde_json::from_value).transpose().map_err(Into::into)
    }

    /// Fetch an entity that must exist
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the id is unknown
    pub async fn require(&self, id: &str) -> AppResult<T> {
        self.get(id)
            .await?
            .ok_or_else(|| AppError::not_found(T::KIND, id))
    }

    /// Every entity in the collection, propagating failures
    ///
    /// Records that no longer deserialize are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns the storage failure
    pub async fn try_list(&self) -> AppResult<Vec<T>> {
        let values = self.storage.get_all(T::COLLECTION).await?;
        Ok(values
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<T>(value) {
                Ok(entity) => Some(entity),
                Err(e) => {
                    warn!(
                        collection = %T::COLLECTION,
                        error = %e,
                        "Skipping unreadable {} record",
                        T::KIND
                    );
                    None
                }
            })
            .collect())
    }

    /// Every entity in the collection; storage failures yield an empty list
    pub async fn list(&self) -> Vec<T> {
        match self.try_list().await {
            Ok(entities) => entities,
            Err(e) => {
                error!(
                    collection = %T::COLLECTION,
                    error = %e,
                    "Failed to list {} records",
                    T::KIND
                );
                Vec::new()
            }
        }
    }

    /// Replace an existing entity, bumping its version
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound`, a validation error, or the storage failure
    pub async fn update(&self, mut entity: T) -> AppResult<T> {
        let stored = self.require(entity.id()).await?;
        if entity.version() < stored.version() {
            debug!(
                collection = %T::COLLECTION,
                id = entity.id(),
                incoming = entity.version(),
                stored = stored.version(),
                "Overwriting newer {} with an older copy",
                T::KIND
            );
        }
        entity.touch(Utc::now());
        entity.validate()?;
        self.put(&entity).await?;
        Ok(entity)
    }

    /// Delete an entity
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when nothing was deleted, or the storage failure
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let removed = self.storage.delete(T::COLLECTION, id).await.map_err(|e| {
            error!(collection = %T::COLLECTION, id, error = %e, "Failed to delete {}", T::KIND);
            AppError::from(e)
        })?;
        if removed {
            Ok(())
        } else {
            Err(AppError::not_found(T::KIND, id))
        }
    }

    /// Number of stored entities
    ///
    /// # Errors
    ///
    /// Returns the storage failure
    pub async fn count(&self) -> AppResult<usize> {
        Ok(self.storage.count(T::COLLECTION).await?)
    }

    /// Remove every entity in the collection
    ///
    /// # Errors
    ///
    /// Returns the storage failure
    pub async fn clear(&self) -> AppResult<()> {
        Ok(self.storage.clear(T::COLLECTION).await?)
    }
}
