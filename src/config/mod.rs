// ABOUTME: Configuration module for the training journal
// ABOUTME: Environment-only configuration of storage, session timers, and display defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration is read from environment variables once at startup and
//! passed explicitly to [`crate::context::JournalContext::init`].

/// Environment-based configuration
pub mod environment;

pub use environment::{JournalConfig, StorageKind};
