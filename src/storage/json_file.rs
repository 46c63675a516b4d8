// ABOUTME: JSON file storage backend writing one pretty-printed file per collection
// ABOUTME: Writes go to a temporary file that is renamed into place
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{StorageBackend, StorageResult};
use async_trait::async_trait;
use pierre_training_core::errors::StorageError;
use pierre_training_core::models::Collection;
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

type CollectionMap = BTreeMap<String, Value>;

/// File-backed storage rooted at a data directory
///
/// Each collection lives in `<dir>/<collection>.json` as an object keyed by
/// id. Mutations within one process are serialized by an async mutex so a
/// read-modify-write cycle never interleaves with another.
pub struct JsonFileStorage {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStorage {
    /// Open (and create if needed) a data directory
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be created
    pub async fn open(dir: impl AsRef<Path>) -> StorageResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| StorageError::io(dir.display().to_string(), e))?;
        debug!(dir = %dir.display(), "Opened JSON file storage");
        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    /// Directory the collection files live in
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, collection: Collection) -> PathBuf {
        self.dir.join(format!("{}.json", collection.as_str()))
    }

    async fn read_collection(&self, collection: Collection) -> StorageResult<CollectionMap> {
        let bytes = match fs::read(self.path_for(collection)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(CollectionMap::new()),
            Err(e) => return Err(StorageError::io(collection.as_str(), e)),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(CollectionMap::new());
        }
        match serde_json::from_slice::<Value>(&bytes)
            .map_err(|e| StorageError::serialization(collection.as_str(), e))?
        {
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(StorageError::Corrupted {
                collection: collection.as_str().to_owned(),
                reason: format!("expected an object keyed by id, found {}", json_kind(&other)),
            }),
        }
    }

    async fn write_collection(
        &self,
        collection: Collection,
        map: &CollectionMap,
    ) -> StorageResult<()> {
        let path = self.path_for(collection);
        let tmp = path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(map)
            .map_err(|e| StorageError::serialization(collection.as_str(), e))?;
        fs::write(&tmp, bytes)
            .await
            .map_err(|e| StorageError::io(collection.as_str(), e))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| StorageError::io(collection.as_str(), e))?;
        debug!(collection = %collection, entries = map.len(), "Wrote collection file");
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl StorageBackend for JsonFileStorage {
    async fn save(&self, collection: Collection, id: &str, value: Value) -> StorageResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.read_collection(collection).await?;
        map.insert(id.to_owned(), value);
        self.write_collection(collection, &map).await
    }

    async fn get(&self, collection: Collection, id: &str) -> StorageResult<Option<Value>> {
        let mut map = self.read_collection(collection).await?;
        Ok(map.remove(id))
    }

    async fn get_all(&self, collection: Collection) -> StorageResult<Vec<Value>> {
        Ok(self
            .read_collection(collection)
            .await?
            .into_values()
            .collect())
    }

    async fn delete(&self, collection: Collection, id: &str) -> StorageResult<bool> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.read_collection(collection).await?;
        if map.remove(id).is_none() {
            return Ok(false);
        }
        self.write_collection(collection, &map).await?;
        Ok(true)
    }

    async fn count(&self, collection: Collection) -> StorageResult<usize> {
        Ok(self.read_collection(collection).await?.len())
    }

    async fn clear(&self, collection: Collection) -> StorageResult<()> {
        let _guard = self.write_lock.lock().await;
        match fs::remove_file(self.path_for(collection)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(collection.as_str(), e)),
        }
    }

    fn backend_name(&self) -> &'static str {
        "json_file"
    }
}
