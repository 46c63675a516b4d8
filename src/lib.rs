// ABOUTME: Main library entry point for the Pierre training journal
// ABOUTME: Local-first storage, repositories, active workout sessions, and export over the training core
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Training Journal
//!
//! A local-first fitness journal: workout logging, multi-phase plans, goals,
//! body metrics and an exercise glossary, persisted through a pluggable
//! storage backend.
//!
//! ## Features
//!
//! - **Plans**: phases, weeks, days and sessions with progress tracking
//! - **Workout log**: active sessions with auto-save and rest timers
//! - **Goals**: progress math, auto-completion and behind-schedule detection
//! - **Analysis**: volume, trends, personal records and friendly formatting
//! - **Portability**: whole-journal JSON export and import
//!
//! ## Architecture
//!
//! - **Storage**: async key/value backends (in-memory, JSON files)
//! - **Repositories**: typed CRUD and queries per entity family
//! - **Session**: the in-progress workout state machine
//! - **Context**: configuration, repositories and cached settings
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pierre_training_journal::config::JournalConfig;
//! use pierre_training_journal::context::JournalContext;
//! use pierre_training_journal::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let context = JournalContext::init(JournalConfig::from_env()?).await?;
//!
//!     let mut workout = context.start_empty_workout("Morning lift").await?;
//!     let saved = workout.complete().await?;
//!     println!("Logged workout {}", saved.id);
//!
//!     Ok(())
//! }
//! ```

/// Environment-based configuration
pub mod config;

/// Journal dependency containers
pub mod context;

/// Whole-journal JSON export and import
pub mod export;

/// Structured logging setup
pub mod logging;

/// Typed repositories over the storage boundary
pub mod repositories;

/// Active workout sessions with auto-save and rest timers
pub mod session;

/// Storage backends
pub mod storage;

pub use pierre_training_core::{constants, errors, models, units};
pub use pierre_training_intelligence as intelligence;
