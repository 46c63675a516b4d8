// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Conversion factors, analysis thresholds, and defaults for the training journal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into small domain modules rather than a single flat list.

/// Unit conversion factors
pub mod units {
    /// Pounds per kilogram used for display conversions
    pub const LBS_PER_KG: f64 = 2.205;
    /// Precise pounds per kilogram used inside volume calculations
    pub const LBS_PER_KG_PRECISE: f64 = 2.204_62;
    /// Precise kilograms per pound used inside volume calculations
    pub const KG_PER_LB_PRECISE: f64 = 0.453_592;
    /// Kilometers per mile
    pub const KM_PER_MILE: f64 = 1.609_344;
    /// Centimeters per inch
    pub const CM_PER_INCH: f64 = 2.54;
    /// Inches per foot
    pub const INCHES_PER_FOOT: f64 = 12.0;
}

/// Equipment increments used when snapping weights to real dumbbells and plates
pub mod dumbbell {
    /// Upper bound (inclusive) of the fine pound increment range
    pub const LB_FINE_LIMIT: f64 = 50.0;
    /// Pound increment at or below the fine limit
    pub const LB_FINE_STEP: f64 = 2.5;
    /// Pound increment above the fine limit
    pub const LB_COARSE_STEP: f64 = 5.0;
    /// Upper bound (inclusive) of the fine kilogram increment range
    pub const KG_FINE_LIMIT: f64 = 25.0;
    /// Kilogram increment at or below the fine limit
    pub const KG_FINE_STEP: f64 = 1.25;
    /// Kilogram increment above the fine limit
    pub const KG_COARSE_STEP: f64 = 2.5;
}

/// Workout analysis thresholds
pub mod analysis {
    /// Number of most recent sessions sampled for trend detection
    pub const TREND_WINDOW_SESSIONS: usize = 6;
    /// Absolute regression slope below which a trend is considered stable
    pub const TREND_SLOPE_THRESHOLD: f64 = 0.1;
    /// Period label used when too few sessions exist for a trend
    pub const INSUFFICIENT_DATA_LABEL: &str = "insufficient data";
    /// Brzycki numerator constant
    pub const BRZYCKI_NUMERATOR: f64 = 36.0;
    /// Brzycki denominator constant
    pub const BRZYCKI_DENOMINATOR: f64 = 37.0;
    /// Rep count above which one-rep-max estimation is not attempted
    pub const MAX_REPS_FOR_ESTIMATION: u32 = 30;
    /// Perceived effort score used when the effort text is not recognized
    pub const DEFAULT_PERCEIVED_EFFORT_SCORE: f64 = 3.0;
}

/// Goal tracking thresholds
pub mod goals {
    /// Actual progress must reach this fraction of expected progress to be on schedule
    pub const ON_SCHEDULE_FRACTION: f64 = 0.7;
    /// Completion percentage at which a goal is achieved
    pub const COMPLETE_PERCENTAGE: f64 = 100.0;
}

/// Persistence format
pub mod data {
    /// Current version of the persisted/exported data layout
    pub const CURRENT_DATA_VERSION: u32 = 1;
    /// Version assigned to newly created entities
    pub const INITIAL_ENTITY_VERSION: u64 = 1;
}

/// Session and timer defaults
pub mod session {
    /// Default rest between sets in seconds
    pub const DEFAULT_REST_SECONDS: u32 = 90;
    /// Default auto-save interval for an active workout in seconds
    pub const DEFAULT_AUTO_SAVE_INTERVAL_SECS: u64 = 30;
    /// Rest countdown tick in milliseconds
    pub const REST_TIMER_TICK_MS: u64 = 1000;
}

/// Service identity used in structured logs
pub mod service_names {
    /// Service name reported by the logging layer
    pub const TRAINING_JOURNAL: &str = "pierre-training-journal";
}
