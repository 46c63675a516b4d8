// ABOUTME: Dependency containers replacing process-global journal state
// ABOUTME: DataContext bundles storage and repositories; JournalContext adds config and settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Journal contexts
//!
//! # Architecture
//!
//! - `DataContext`: storage backend and the repositories built on it
//! - `JournalContext`: configuration, data, and the cached user settings

/// Storage and repositories
pub mod data;
/// Configuration, data, and cached settings
pub mod journal;

pub use data::DataContext;
pub use journal::JournalContext;
