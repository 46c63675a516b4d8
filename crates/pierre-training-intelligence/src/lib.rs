// ABOUTME: Training analysis, progress math, and friendly formatting for the Pierre training journal
// ABOUTME: Pure functions over core models; nothing here performs I/O or fails on degenerate input
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Training Intelligence
//!
//! Derived values computed from stored journal entities. Every public function
//! is total over its input domain: empty collections and unrecognized values
//! produce sentinels (`0`, `Stable`, `"unknown"`, `"insufficient data"`) rather
//! than errors. The single fallible entry point is
//! [`statistical_analysis::StatisticalAnalyzer::linear_regression`], whose
//! errors are absorbed by the trend detector.
//!
//! ## Modules
//!
//! - **formatting**: human-readable reps, weights, durations, effort, dates, and prescriptions
//! - **statistical_analysis**: least-squares regression
//! - **workout_analysis**: volume, one-rep max, trends, personal records, flags, RPE
//! - **plan_analysis**: plan progress and structural statistics
//! - **goal_progress**: goal completion percentage and behind-schedule detection

/// Friendly display strings for prescriptions and performance data
pub mod formatting;

/// Goal completion and schedule tracking
pub mod goal_progress;

/// Plan progress and statistics
pub mod plan_analysis;

/// Linear regression used by trend detection
pub mod statistical_analysis;

/// Volume, strength estimates, trends, and records from workout history
pub mod workout_analysis;

pub use formatting::{DateFormat, RepStyle};
pub use plan_analysis::{PlanProgress, PlanStats};
pub use statistical_analysis::{RegressionResult, StatisticalAnalyzer};
pub use workout_analysis::{
    PersonalRecords, ProgressTrend, SessionFlags, TrendDirection, TrendMetric,
};
