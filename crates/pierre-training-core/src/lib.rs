// ABOUTME: Core types and constants for the Pierre training journal
// ABOUTME: Foundation crate with error handling, unit conversion, constants, and data models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Training Core
//!
//! Foundation crate providing shared types and constants for the Pierre training
//! journal. This crate is designed to change infrequently, enabling incremental
//! compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `StorageError`
//! - **constants**: Conversion factors, analysis thresholds, and defaults
//! - **units**: Weight, distance, and length conversion with equipment-aware rounding
//! - **models**: Plans, workouts, goals, body metrics, glossary, and settings

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Unit conversion between imperial and metric measurements
pub mod units;

/// Core data models persisted by the journal
pub mod models;

pub use errors::{AppError, AppResult, ErrorCode, StorageError};
pub use units::{DistanceUnit, LengthUnit, Precision, UnitSystem, WeightUnit};
