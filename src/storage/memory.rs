// ABOUTME: In-memory storage backend keyed by collection and id
// ABOUTME: Shared behind an async RwLock; contents are lost when the process exits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{StorageBackend, StorageResult};
use async_trait::async_trait;
use pierre_training_core::models::Collection;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

type CollectionMap = BTreeMap<String, Value>;

/// Process-local storage
///
/// Cloning shares the same underlying maps.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    collections: Arc<RwLock<HashMap<Collection, CollectionMap>>>,
}

impl InMemoryStorage {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageBackend for InMemoryStorage {
    async fn save(&self, collection: Collection, id: &str, value: Value) -> StorageResult<()> {
        self.collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .insert(id.to_owned(), value);
        Ok(())
    }

    async fn get(&self, collection: Collection, id: &str) -> StorageResult<Option<Value>> {
        let store = self.collections.read().await;
        Ok(store.get(&collection).and_then(|c| c.get(id)).cloned())
    }

    async fn get_all(&self, collection: Collection) -> StorageResult<Vec<Value>> {
        let store = self.collections.read().await;
        Ok(store
            .get(&collection)
            .map(|c| c.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn delete(&self, collection: Collection, id: &str) -> StorageResult<bool> {
        let mut store = self.collections.write().await;
        Ok(store
            .get_mut(&collection)
            .is_some_and(|c| c.remove(id).is_some()))
    }

    async fn count(&self, collection: Collection) -> StorageResult<usize> {
        let store = self.collections.read().await;
        Ok(store.get(&collection).map_or(0, BTreeMap::len))
    }

    async fn clear(&self, collection: Collection) -> StorageResult<()> {
        self.collections.write().await.remove(&collection);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
