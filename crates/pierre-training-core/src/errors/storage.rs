// ABOUTME: Storage-layer error types for the persistence boundary
// ABOUTME: Structured variants with collection context, converted into AppError at the repository edge
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

/// Errors raised by storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed
    #[error("I/O error in collection '{collection}': {source}")]
    Io {
        /// Collection being accessed
        collection: String,
        /// Original I/O error
        #[source]
        source: std::io::Error,
    },

    /// A value could not be (de)serialized
    #[error("Serialization error in collection '{collection}': {source}")]
    Serialization {
        /// Collection being accessed
        collection: String,
        /// Original serde error
        #[source]
        source: serde_json::Error,
    },

    /// Stored data exists but does not have the expected shape
    #[error("Corrupted data in collection '{collection}': {reason}")]
    Corrupted {
        /// Collection being accessed
        collection: String,
        /// What was wrong
        reason: String,
    },

    /// Backend cannot serve requests
    #[error("Storage unavailable: {reason}")]
    Unavailable {
        /// Why the backend is unavailable
        reason: String,
    },
}

impl StorageError {
    /// Wrap an I/O error with the collection it happened in
    #[must_use]
    pub fn io(collection: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            collection: collection.into(),
            source,
        }
    }

    /// Wrap a serde error with the collection it happened in
    #[must_use]
    pub fn serialization(collection: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            collection: collection.into(),
            source,
        }
    }
}
