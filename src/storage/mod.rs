// ABOUTME: Persistence boundary: async key/value storage per named collection
// ABOUTME: Backends store raw JSON values; typed access lives in the repositories
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Storage
//!
//! A [`StorageBackend`] keeps one keyed map of JSON values per [`Collection`].
//! Calls are not serialized against each other beyond what a single backend
//! call guarantees, so the last write to an id wins.

/// In-memory backend
pub mod memory;

/// One-file-per-collection JSON backend
pub mod json_file;

pub use json_file::JsonFileStorage;
pub use memory::InMemoryStorage;

use crate::config::{JournalConfig, StorageKind};
use async_trait::async_trait;
use pierre_training_core::errors::{AppResult, StorageError};
use pierre_training_core::models::Collection;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Result type of storage calls
pub type StorageResult<T> = Result<T, StorageError>;

/// Shared handle to a storage backend
pub type SharedStorage = Arc<dyn StorageBackend>;

/// Async key/value store with one namespace per collection
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Insert or replace `value` under `id`
    async fn save(&self, collection: Collection, id: &str, value: Value) -> StorageResult<()>;

    /// Fetch the value stored under `id`
    async fn get(&self, collection: Collection, id: &str) -> StorageResult<Option<Value>>;

    /// Every value in the collection, ordered by id
    async fn get_all(&self, collection: Collection) -> StorageResult<Vec<Value>>;

    /// Remove `id`; returns whether it existed
    async fn delete(&self, collection: Collection, id: &str) -> StorageResult<bool>;

    /// Number of values in the collection
    async fn count(&self, collection: Collection) -> StorageResult<usize>;

    /// Remove every value in the collection
    async fn clear(&self, collection: Collection) -> StorageResult<()>;

    /// Short backend name for logs
    fn backend_name(&self) -> &'static str;
}

/// Create the backend selected by `config`
///
/// # Errors
///
/// Returns an error if the JSON data directory cannot be created
pub async fn create_storage(config: &JournalConfig) -> AppResult<SharedStorage> {
    let storage: SharedStorage = match config.storage {
        StorageKind::Memory => Arc::new(InMemoryStorage::new()),
        StorageKind::JsonFile => Arc::new(JsonFileStorage::open(&config.data_dir).await?),
    };
    info!(backend = storage.backend_name(), "Storage backend initialized");
    Ok(storage)
}
