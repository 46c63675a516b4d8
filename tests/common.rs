// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides logging setup, in-memory contexts, and plan/workout builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::wildcard_in_or_patterns,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::cast_possible_truncation
)]
//! Shared test utilities for `pierre_training_journal`

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
use pierre_training_journal::config::JournalConfig;
use pierre_training_journal::context::JournalContext;
use pierre_training_journal::errors::StorageError;
use pierre_training_journal::models::{
    Collection, Day, Equipment, ExerciseEntry, ExercisePrescription, PerformedSet, Phase,
    ProgramPlan, RepTarget, Session, SessionType, StrengthEntry, Week, WorkoutLogEntry,
};
use pierre_training_journal::storage::{
    InMemoryStorage, SharedStorage, StorageBackend, StorageResult,
};
use pierre_training_journal::units::WeightUnit;
use serde_json::Value;
use std::env;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Once};
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            Ok("WARN" | "ERROR") | _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Fixed reference instant so date math is deterministic
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap()
}

/// Fresh in-memory storage handle
pub fn memory_storage() -> SharedStorage {
    Arc::new(InMemoryStorage::new())
}

/// In-memory backend whose writes or listings can be switched to fail
#[derive(Default)]
pub struct FaultyStorage {
    inner: InMemoryStorage,
    failing_saves: AtomicBool,
    failing_listings: AtomicBool,
}

impl FaultyStorage {
    /// Make every `save` fail until switched back
    pub fn fail_saves(&self, fail: bool) {
        self.failing_saves.store(fail, Ordering::SeqCst);
    }

    /// Make every `get_all` fail until switched back
    pub fn fail_listings(&self, fail: bool) {
        self.failing_listings.store(fail, Ordering::SeqCst);
    }

    fn unavailable(operation: &str) -> StorageError {
        StorageError::Unavailable {
            reason: format!("{operation} disabled for this test"),
        }
    }
}

#[async_trait]
impl StorageBackend for FaultyStorage {
    async fn save(&self, collection: Collection, id: &str, value: Value) -> StorageResult<()> {
        if self.failing_saves.load(Ordering::SeqCst) {
            return Err(Self::unavailable("save"));
        }
        self.inner.save(collection, id, value).await
    }

    async fn get(&self, collection: Collection, id: &str) -> StorageResult<Option<Value>> {
        self.inner.get(collection, id).await
    }

    async fn get_all(&self, collection: Collection) -> StorageResult<Vec<Value>> {
        if self.failing_listings.load(Ordering::SeqCst) {
            return Err(Self::unavailable("get_all"));
        }
        self.inner.get_all(collection).await
    }

    async fn delete(&self, collection: Collection, id: &str) -> StorageResult<bool> {
        self.inner.delete(collection, id).await
    }

    async fn count(&self, collection: Collection) -> StorageResult<usize> {
        self.inner.count(collection).await
    }

    async fn clear(&self, collection: Collection) -> StorageResult<()> {
        self.inner.clear(collection).await
    }

    fn backend_name(&self) -> &'static str {
        "faulty"
    }
}

/// In-memory configuration with timers fast enough for tests
pub fn test_config() -> JournalConfig {
    JournalConfig {
        auto_save_interval: Duration::from_millis(50),
        rest_tick: Duration::from_millis(10),
        ..JournalConfig::in_memory()
    }
}

/// Context over a fresh in-memory backend
pub async fn memory_context() -> JournalContext {
    init_test_logging();
    JournalContext::with_storage(test_config(), memory_storage()).await
}

/// Strength prescription for `exercise_id`
pub fn prescription(exercise_id: &str, name: &str) -> ExercisePrescription {
    ExercisePrescription {
        exercise_id: exercise_id.to_owned(),
        exercise_name: name.to_owned(),
        sets: 3,
        reps: RepTarget::Range { min: 8, max: 12 },
        weight: Some(100.0),
        weight_unit: WeightUnit::Lb,
        equipment: Equipment::Barbell,
        rest_seconds: Some(90),
        ..ExercisePrescription::default()
    }
}

/// Plan with `phases x weeks x days` days holding `sessions_per_day` strength sessions each
pub fn sample_plan(
    title: &str,
    phases: usize,
    weeks: usize,
    days: usize,
    sessions_per_day: usize,
) -> ProgramPlan {
    let mut plan = ProgramPlan::new(title);
    plan.duration_weeks = (phases * weeks) as u32;
    plan.phases = (0..phases)
        .map(|p| Phase {
            name: format!("Phase {}", p + 1),
            description: None,
            weeks: (0..weeks)
                .map(|w| Week {
                    week_number: (w + 1) as u32,
                    focus: None,
                    days: (0..days)
                        .map(|d| Day {
                            label: format!("Day {}", d + 1),
                            sessions: (0..sessions_per_day)
                                .map(|s| {
                                    let mut session = Session::new(
                                        format!("Session {}", s + 1),
                                        SessionType::Strength,
                                    );
                                    session.estimated_duration_minutes = 45;
                                    session.exercises =
                                        vec![prescription("back-squat", "Back Squat")];
                                    session
                                })
                                .collect(),
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect();
    plan
}

/// Finalized workout with one strength exercise and completed sets of `(reps, weight)`
pub fn strength_workout(
    exercise_id: &str,
    start: DateTime<Utc>,
    sets: &[(u32, f64)],
    unit: WeightUnit,
) -> WorkoutLogEntry {
    let mut workout = WorkoutLogEntry::new(format!("{exercise_id} day"), start);
    workout.date_time_end = Some(start + ChronoDuration::minutes(45));
    workout.exercises = vec![ExerciseEntry::Strength(StrengthEntry {
        exercise_id: exercise_id.to_owned(),
        exercise_name: exercise_id.to_owned(),
        sets: sets
            .iter()
            .map(|(reps, weight)| PerformedSet::completed(*reps, *weight, unit))
            .collect(),
        notes: None,
    })];
    workout
}

/// Wait for `condition` to become true, polling every 10ms up to `timeout`
pub async fn wait_until<F, Fut>(timeout: Duration, mut condition: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition().await {
            return true;
        }
        sleep(Duration::from_millis(10)).await;
    }
    condition().await
}
