// ABOUTME: Active workout controller driving the in-progress session state machine
// ABOUTME: Owns the auto-save task and rest timer, persisting drafts and the final workout record
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Active Workout Sessions
//!
//! An [`ActiveWorkoutController`] wraps one [`ActiveWorkoutSession`]:
//!
//! ```text
//! Active <-> Paused
//!    |         |
//!    +--> Completed | Abandoned
//! ```
//!
//! The workout record is created in storage when the session starts and
//! saved as a draft periodically while active. Completing stamps the end time
//! and bumps the record's version; abandoning deletes the draft.

/// Periodic persistence of the in-progress workout
pub mod auto_save;
/// Countdown between sets
pub mod rest_timer;

pub use auto_save::AutoSaveTask;
pub use rest_timer::RestTimer;

use crate::repositories::{PlanRepository, WorkoutRepository};
use chrono::Utc;
use pierre_training_core::constants::session as session_defaults;
use pierre_training_core::errors::{AppError, AppResult, ErrorCode};
use pierre_training_core::models::{
    ActiveWorkoutSession, CardioBlock, CardioEntry, CardioSegment, ExerciseEntry, PerformedSet,
    RepTarget, Session, SessionPath, SessionStatus, StrengthEntry, WorkoutLogEntry,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

/// Dependencies of an active workout
#[derive(Clone)]
pub struct SessionServices {
    /// Where the workout record lives
    pub workouts: WorkoutRepository,
    /// Plans, for prefilling and recording completions
    pub plans: PlanRepository,
    /// Auto-save period
    pub auto_save_interval: Duration,
    /// Rest timer tick
    pub rest_tick: Duration,
    /// Rest length used when none is given
    pub default_rest_seconds: u32,
}

impl SessionServices {
    /// Services with default timing
    #[must_use]
    pub fn new(workouts: WorkoutRepository, plans: PlanRepository) -> Self {
        Self {
            workouts,
            plans,
            auto_save_interval: Duration::from_secs(
                session_defaults::DEFAULT_AUTO_SAVE_INTERVAL_SECS,
            ),
            rest_tick: Duration::from_millis(session_defaults::REST_TIMER_TICK_MS),
            default_rest_seconds: session_defaults::DEFAULT_REST_SECONDS,
        }
    }
}

type SharedSession = Arc<Mutex<ActiveWorkoutSession>>;

/// Controller of one in-progress workout
pub struct ActiveWorkoutController {
    state: SharedSession,
    services: SessionServices,
    auto_save: Option<AutoSaveTask>,
    rest_timer: RestTimer,
}

impl ActiveWorkoutController {
    /// Start a blank workout
    ///
    /// # Errors
    ///
    /// Returns a validation or storage error from creating the record
    pub async fn start_empty(services: SessionServices, title: &str) -> AppResult<Self> {
        let workout = WorkoutLogEntry::new(title, Utc::now());
        Self::start(services, workout).await
    }

    /// Start a workout prefilled from the plan session at `path`
    ///
    /// Every prescription becomes a strength entry with one uncompleted set
    /// per prescribed set; a cardio block becomes a cardio entry with one
    /// segment per warm-up, work, recovery, and cool-down piece.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound`, `InvalidSessionPath`, or a storage error
    pub async fn start_from_plan(
        services: SessionServices,
        plan_id: &str,
        path: SessionPath,
    ) -> AppResult<Self> {
        let plan = services.plans.get(plan_id).await?;
        let session = plan.session(path)?;

        let mut workout = WorkoutLogEntry::new(session.name.clone(), Utc::now());
        workout.plan_id = Some(plan.id.clone());
        workout.session_path = Some(path);
        workout.notes.clone_from(&session.notes);
        workout.exercises = planned_exercises(session);

        Self::start(services, workout).await
    }

    async fn start(services: SessionServices, workout: WorkoutLogEntry) -> AppResult<Self> {
        let workout = services.workouts.create(workout).await?;
        info!(
            workout_id = %workout.id,
            plan_id = workout.plan_id.as_deref().unwrap_or(""),
            "Workout session started"
        );

        let rest_timer = RestTimer::new(services.rest_tick);
        let mut controller = Self {
            state: Arc::new(Mutex::new(ActiveWorkoutSession::new(workout))),
            services,
            auto_save: None,
            rest_timer,
        };
        controller.spawn_auto_save();
        Ok(controller)
    }

    fn spawn_auto_save(&mut self) {
        let state = Arc::clone(&self.state);
        let workouts = self.services.workouts.clone();
        self.auto_save = Some(AutoSaveTask::spawn(
            self.services.auto_save_interval,
            move || {
                let state = Arc::clone(&state);
                let workouts = workouts.clone();
                async move {
                    if let Err(e) = persist_draft(&state, &workouts).await {
                        warn!(error = %e, "Auto-save failed");
                    }
                }
            },
        ));
    }

    async fn stop_auto_save(&mut self) {
        if let Some(task) = self.auto_save.take() {
            task.stop().await;
        }
    }

    /// Copy of the current session state
    pub async fn snapshot(&self) -> ActiveWorkoutSession {
        self.state.lock().await.clone()
    }

    /// Current status
    pub async fn status(&self) -> SessionStatus {
        self.state.lock().await.session_status
    }

    /// Id of the underlying workout record
    pub async fn workout_id(&self) -> String {
        self.state.lock().await.workout.id.clone()
    }

    /// Whether the auto-save loop is running
    #[must_use]
    pub fn is_auto_saving(&self) -> bool {
        self.auto_save.as_ref().is_some_and(AutoSaveTask::is_running)
    }

    /// Seconds worked so far, excluding pauses
    pub async fn elapsed_active_seconds(&self) -> i64 {
        self.state.lock().await.elapsed_active_seconds(Utc::now())
    }

    /// Append an exercise and return its index
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` once the session has ended
    pub async fn add_exercise(&self, entry: ExerciseEntry) -> AppResult<usize> {
        let mut state = self.state.lock().await;
        ensure_editable(&state)?;
        state.workout.exercises.push(entry);
        Ok(state.workout.exercises.len() - 1)
    }

    /// Append a set to the strength exercise at `exercise_index`
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` once the session has ended,
    /// `ValueOutOfRange` for a bad index, or `InvalidInput` for a cardio entry
    pub async fn add_set(&self, exercise_index: usize, set: PerformedSet) -> AppResult<usize> {
        let mut state = self.state.lock().await;
        ensure_editable(&state)?;
        let sets = strength_sets_mut(&mut state.workout, exercise_index)?;
        sets.push(set);
        Ok(sets.len() - 1)
    }

    /// Replace one set of the strength exercise at `exercise_index`
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` once the session has ended,
    /// `ValueOutOfRange` for a bad index, or `InvalidInput` for a cardio entry
    pub async fn update_set(
        &self,
        exercise_index: usize,
        set_index: usize,
        set: PerformedSet,
    ) -> AppResult<()> {
        let mut state = self.state.lock().await;
        ensure_editable(&state)?;
        let sets = strength_sets_mut(&mut state.workout, exercise_index)?;
        let len = sets.len();
        let slot = sets.get_mut(set_index).ok_or_else(|| {
            AppError::out_of_range("set_index", format!("{set_index} is out of range ({len} sets)"))
        })?;
        *slot = set;
        Ok(())
    }

    /// Move to the next exercise, staying on the last one; returns the index
    pub async fn next_exercise(&self) -> usize {
        let mut state = self.state.lock().await;
        let last = state.workout.exercises.len().saturating_sub(1);
        state.current_exercise_index = (state.current_exercise_index + 1).min(last);
        state.current_exercise_index
    }

    /// Move to the previous exercise, staying on the first one; returns the index
    pub async fn previous_exercise(&self) -> usize {
        let mut state = self.state.lock().await;
        state.current_exercise_index = state.current_exercise_index.saturating_sub(1);
        state.current_exercise_index
    }

    /// Pause: stop the clock, save once, and stop background timers
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` unless active, or a storage error
    pub async fn pause(&mut self) -> AppResult<()> {
        {
            let mut state = self.state.lock().await;
            transition(&mut state, SessionStatus::Paused)?;
            state.paused_at = Some(Utc::now());
        }
        self.stop_auto_save().await;
        self.rest_timer.cancel();
        persist_draft(&self.state, &self.services.workouts).await?;
        info!("Workout session paused");
        Ok(())
    }

    /// Resume a paused session and restart auto-save
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` unless paused
    pub async fn resume(&mut self) -> AppResult<()> {
        {
            let mut state = self.state.lock().await;
            transition(&mut state, SessionStatus::Active)?;
            fold_pause(&mut state);
        }
        self.spawn_auto_save();
        info!("Workout session resumed");
        Ok(())
    }

    /// Finish the workout and return the saved record
    ///
    /// The session only becomes completed once the final record is stored. If
    /// that save fails the session keeps its previous status, so completing
    /// can be retried.
    ///
    /// A workout started from a plan also records a plan session completion.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` once ended, or a storage error
    pub async fn complete(&mut self) -> AppResult<WorkoutLogEntry> {
        let previous = {
            let state = self.state.lock().await;
            check_transition(&state, SessionStatus::Completed)?;
            state.session_status
        };
        self.stop_auto_save().await;

        let mut finalized = self.state.lock().await.clone();
        fold_pause(&mut finalized);
        finalized.workout.date_time_end = Some(Utc::now());

        let saved = match self.services.workouts.update(finalized.workout.clone()).await {
            Ok(saved) => saved,
            Err(e) => {
                warn!(
                    workout_id = %finalized.workout.id,
                    error = %e,
                    "Failed to save completed workout"
                );
                if previous == SessionStatus::Active {
                    self.spawn_auto_save();
                }
                return Err(e);
            }
        };
        self.rest_timer.cancel();
        {
            let mut state = self.state.lock().await;
            finalized.session_status = SessionStatus::Completed;
            finalized.workout = saved.clone();
            finalized.last_saved_at = Some(saved.updated_at);
            *state = finalized;
        }

        if let (Some(plan_id), Some(path)) = (saved.plan_id.as_deref(), saved.session_path) {
            let completed_at = saved.date_time_end.unwrap_or(saved.updated_at);
            if let Err(e) = self
                .services
                .plans
                .mark_session_complete(plan_id, path, completed_at, Some(saved.id.clone()))
                .await
            {
                warn!(plan_id, %path, error = %e, "Could not record plan session completion");
            }
        }

        info!(
            workout_id = %saved.id,
            duration_secs = saved.duration_seconds().unwrap_or(0),
            "Workout session completed"
        );
        Ok(saved)
    }

    /// Discard the workout and delete its draft
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` once ended, or a storage error
    pub async fn abandon(&mut self) -> AppResult<()> {
        let workout_id = {
            let mut state = self.state.lock().await;
            transition(&mut state, SessionStatus::Abandoned)?;
            state.workout.id.clone()
        };
        self.stop_auto_save().await;
        self.rest_timer.cancel();

        match self.services.workouts.delete(&workout_id).await {
            Ok(()) => {}
            Err(e) if e.code == ErrorCode::ResourceNotFound => {
                debug!(workout_id, "No draft to delete");
            }
            Err(e) => return Err(e),
        }
        info!(workout_id, "Workout session abandoned");
        Ok(())
    }

    /// Persist the current draft immediately
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` once ended, or a storage error
    pub async fn save_now(&self) -> AppResult<()> {
        ensure_editable(&*self.state.lock().await)?;
        persist_draft(&self.state, &self.services.workouts).await
    }

    /// Start a rest countdown, `None` meaning the default rest length
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` unless the session is active
    pub async fn start_rest(&mut self, seconds: Option<u32>) -> AppResult<watch::Receiver<u32>> {
        {
            let state = self.state.lock().await;
            ensure_editable(&state)?;
            if state.session_status == SessionStatus::Paused {
                return Err(AppError::new(
                    ErrorCode::InvalidStateTransition,
                    "Cannot start a rest timer while the workout is paused",
                ));
            }
        }
        self.rest_timer
            .start(seconds.unwrap_or(self.services.default_rest_seconds));
        Ok(self.rest_timer.subscribe())
    }

    /// The rest countdown
    #[must_use]
    pub const fn rest_timer(&self) -> &RestTimer {
        &self.rest_timer
    }

    /// The rest countdown, for extending, resetting, or cancelling
    pub fn rest_timer_mut(&mut self) -> &mut RestTimer {
        &mut self.rest_timer
    }
}

async fn persist_draft(state: &SharedSession, workouts: &WorkoutRepository) -> AppResult<()> {
    let workout = {
        let guard = state.lock().await;
        if guard.session_status.is_terminal() {
            return Ok(());
        }
        guard.workout.clone()
    };
    workouts.save_draft(&workout).await?;
    state.lock().await.last_saved_at = Some(Utc::now());
    debug!(workout_id = %workout.id, "Workout draft saved");
    Ok(())
}

fn check_transition(state: &ActiveWorkoutSession, next: SessionStatus) -> AppResult<()> {
    if state.session_status.can_transition_to(next) {
        Ok(())
    } else {
        Err(AppError::invalid_transition(state.session_status, next))
    }
}

fn transition(state: &mut ActiveWorkoutSession, next: SessionStatus) -> AppResult<()> {
    check_transition(state, next)?;
    state.session_status = next;
    Ok(())
}

fn fold_pause(state: &mut ActiveWorkoutSession) {
    if let Some(paused_at) = state.paused_at.take() {
        state.total_paused_seconds += (Utc::now() - paused_at).num_seconds().max(0);
    }
}

fn ensure_editable(state: &ActiveWorkoutSession) -> AppResult<()> {
    if state.session_status.is_terminal() {
        return Err(AppError::new(
            ErrorCode::InvalidStateTransition,
            format!("Workout session is already {:?}", state.session_status),
        ));
    }
    Ok(())
}

fn strength_sets_mut(
    workout: &mut WorkoutLogEntry,
    exercise_index: usize,
) -> AppResult<&mut Vec<PerformedSet>> {
    let len = workout.exercises.len();
    match workout.exercises.get_mut(exercise_index) {
        Some(ExerciseEntry::Strength(entry)) => Ok(&mut entry.sets),
        Some(ExerciseEntry::Cardio(entry)) => Err(AppError::invalid_input(format!(
            "'{}' is a cardio exercise and has no sets",
            entry.exercise_name
        ))),
        None => Err(AppError::out_of_range(
            "exercise_index",
            format!("{exercise_index} is out of range ({len} exercises)"),
        )),
    }
}

fn planned_exercises(session: &Session) -> Vec<ExerciseEntry> {
    let mut exercises: Vec<ExerciseEntry> = session
        .exercises
        .iter()
        .map(|prescription| {
            let reps = match prescription.reps {
                RepTarget::Count(n) => n,
                RepTarget::Range { min, .. } => min,
            };
            let planned_set = PerformedSet {
                reps,
                weight: prescription.weight,
                weight_unit: prescription.weight_unit,
                ..PerformedSet::default()
            };
            ExerciseEntry::Strength(StrengthEntry {
                exercise_id: prescription.exercise_id.clone(),
                exercise_name: prescription.exercise_name.clone(),
                sets: vec![planned_set; prescription.sets as usize],
                notes: prescription.notes.clone(),
            })
        })
        .collect();

    if let Some(block) = &session.cardio_block {
        exercises.push(ExerciseEntry::Cardio(CardioEntry {
            exercise_id: "cardio".to_owned(),
            exercise_name: session.name.clone(),
            segments: cardio_segments(block),
            notes: None,
        }));
    }
    exercises
}

fn cardio_segments(block: &CardioBlock) -> Vec<CardioSegment> {
    let segment = |seconds: u32, intensity: &str| CardioSegment {
        duration_seconds: seconds,
        intensity: Some(intensity.to_owned()),
        ..CardioSegment::default()
    };

    let mut segments = Vec::with_capacity(block.intervals.len() * 2 + 2);
    if block.warm_up_seconds > 0 {
        segments.push(segment(block.warm_up_seconds, "warm-up"));
    }
    for interval in &block.intervals {
        segments.push(segment(interval.work_seconds, "fast"));
        if interval.recovery_seconds > 0 {
            segments.push(segment(interval.recovery_seconds, "easy"));
        }
    }
    if block.cool_down_seconds > 0 {
        segments.push(segment(block.cool_down_seconds, "cool-down"));
    }
    segments
}
