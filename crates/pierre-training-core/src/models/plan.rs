// ABOUTME: Workout plan tree model: plan, phases, weeks, days, sessions, prescriptions
// ABOUTME: Includes session-path addressing with bounds validation and tree flattening helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{impl_versioned_entity, Collection, Entity};
use crate::errors::{AppError, AppResult};
use crate::units::WeightUnit;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Category of a planned session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    /// Resistance training
    Strength,
    /// Steady-state or interval cardio
    Cardio,
    /// High-intensity interval training
    Hiit,
    /// Mobility and stretching
    Mobility,
    /// Active recovery
    Recovery,
    /// Mixed modality
    Mixed,
    /// Scheduled rest
    Rest,
}

impl SessionType {
    /// Lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Cardio => "cardio",
            Self::Hiit => "hiit",
            Self::Mobility => "mobility",
            Self::Recovery => "recovery",
            Self::Mixed => "mixed",
            Self::Rest => "rest",
        }
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Equipment an exercise is prescribed with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    /// Barbell and plates
    Barbell,
    /// Pair of dumbbells; weight is per hand
    Dumbbell,
    /// Kettlebell
    Kettlebell,
    /// Selectorized or plate-loaded machine
    Machine,
    /// Cable station
    Cable,
    /// No external load
    #[default]
    Bodyweight,
    /// Resistance band
    Band,
    /// Anything else
    Other,
}

/// Planned repetitions: a fixed count or an inclusive range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RepTarget {
    /// Exact repetition count
    Count(u32),
    /// Inclusive repetition range
    Range {
        /// Lower bound
        min: u32,
        /// Upper bound
        max: u32,
    },
}

impl Default for RepTarget {
    fn default() -> Self {
        Self::Count(0)
    }
}

/// Planned parameters for one exercise within a session
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExercisePrescription {
    /// Glossary or catalogue identifier of the exercise
    pub exercise_id: String,
    /// Display name of the exercise
    pub exercise_name: String,
    /// Number of working sets
    pub sets: u32,
    /// Repetitions per set
    pub reps: RepTarget,
    /// Prescribed load, absent for bodyweight work
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Unit of `weight`
    #[serde(default)]
    pub weight_unit: WeightUnit,
    /// Equipment used
    #[serde(default)]
    pub equipment: Equipment,
    /// Rest between sets in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_seconds: Option<u32>,
    /// Lifting tempo such as "3-1-1"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tempo: Option<String>,
    /// Target effort on a 1-10 scale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort_level: Option<u8>,
    /// Time-based work per set in seconds (planks, carries)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u32>,
    /// Coaching notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One work/recovery pair inside an interval block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CardioInterval {
    /// Hard effort duration in seconds
    pub work_seconds: u32,
    /// Easy effort duration in seconds
    pub recovery_seconds: u32,
}

/// Structured cardio prescription: warm-up, intervals, cool-down
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CardioBlock {
    /// Warm-up duration in seconds
    pub warm_up_seconds: u32,
    /// Ordered work intervals, one per round
    pub intervals: Vec<CardioInterval>,
    /// Cool-down duration in seconds
    pub cool_down_seconds: u32,
}

/// A single planned workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Session name
    pub name: String,
    /// Session category
    pub session_type: SessionType,
    /// Planned duration in minutes
    #[serde(default)]
    pub estimated_duration_minutes: u32,
    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Ordered exercise prescriptions
    #[serde(default)]
    pub exercises: Vec<ExercisePrescription>,
    /// Interval structure for cardio sessions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardio_block: Option<CardioBlock>,
}

impl Session {
    /// Create an empty session of the given type
    #[must_use]
    pub fn new(name: impl Into<String>, session_type: SessionType) -> Self {
        Self {
            name: name.into(),
            session_type,
            estimated_duration_minutes: 0,
            notes: None,
            exercises: Vec::new(),
            cardio_block: None,
        }
    }
}

/// A training day holding one or more sessions
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Day {
    /// Day label such as "Monday" or "Day 1"
    pub label: String,
    /// Ordered sessions
    #[serde(default)]
    pub sessions: Vec<Session>,
}

/// A week of training days
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Week {
    /// One-based week number within the phase
    pub week_number: u32,
    /// Optional focus note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
    /// Ordered days
    #[serde(default)]
    pub days: Vec<Day>,
}

/// A block of weeks sharing a training goal
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Phase {
    /// Phase name
    pub name: String,
    /// Phase description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ordered weeks
    #[serde(default)]
    pub weeks: Vec<Week>,
}

/// Index address of one session inside a plan tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct SessionPath {
    /// Index into `plan.phases`
    pub phase_index: usize,
    /// Index into `phase.weeks`
    pub week_index: usize,
    /// Index into `week.days`
    pub day_index: usize,
    /// Index into `day.sessions`
    pub session_index: usize,
}

impl SessionPath {
    /// Build a path from its four indices
    #[must_use]
    pub const fn new(
        phase_index: usize,
        week_index: usize,
        day_index: usize,
        session_index: usize,
    ) -> Self {
        Self {
            phase_index,
            week_index,
            day_index,
            session_index,
        }
    }
}

impl fmt::Display for SessionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.phase_index, self.week_index, self.day_index, self.session_index
        )
    }
}

/// Root of the plan tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramPlan {
    /// Unique identifier
    pub id: String,
    /// Plan title
    pub title: String,
    /// Plan description
    #[serde(default)]
    pub description: String,
    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Nominal length of the plan in weeks
    #[serde(default)]
    pub duration_weeks: u32,
    /// Whether this plan is a reusable template
    #[serde(default)]
    pub is_template: bool,
    /// Ordered phases
    #[serde(default)]
    pub phases: Vec<Phase>,
    /// Version counter, bumped on every update
    #[serde(default = "super::initial_version")]
    pub version: u64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl ProgramPlan {
    /// Create an empty plan; identity is assigned when it is first saved
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            title: title.into(),
            description: String::new(),
            tags: Vec::new(),
            duration_weeks: 0,
            is_template: false,
            phases: Vec::new(),
            version: super::initial_version(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check every level of `path` against the current tree
    ///
    /// # Errors
    ///
    /// Returns `InvalidSessionPath` naming the first out-of-range level
    pub fn validate_path(&self, path: SessionPath) -> AppResult<()> {
        self.session(path).map(|_| ())
    }

    /// Borrow the session addressed by `path`
    ///
    /// # Errors
    ///
    /// Returns `InvalidSessionPath` when any index is out of range
    pub fn session(&self, path: SessionPath) -> AppResult<&Session> {
        let phase = self
            .phases
            .get(path.phase_index)
            .ok_or_else(|| out_of_range("phase", path.phase_index, self.phases.len()))?;
        let week = phase
            .weeks
            .get(path.week_index)
            .ok_or_else(|| out_of_range("week", path.week_index, phase.weeks.len()))?;
        let day = week
            .days
            .get(path.day_index)
            .ok_or_else(|| out_of_range("day", path.day_index, week.days.len()))?;
        day.sessions
            .get(path.session_index)
            .ok_or_else(|| out_of_range("session", path.session_index, day.sessions.len()))
    }

    /// Mutably borrow the session addressed by `path`
    ///
    /// # Errors
    ///
    /// Returns `InvalidSessionPath` when any index is out of range
    pub fn session_mut(&mut self, path: SessionPath) -> AppResult<&mut Session> {
        let phase_count = self.phases.len();
        let phase = self
            .phases
            .get_mut(path.phase_index)
            .ok_or_else(|| out_of_range("phase", path.phase_index, phase_count))?;
        let week_count = phase.weeks.len();
        let week = phase
            .weeks
            .get_mut(path.week_index)
            .ok_or_else(|| out_of_range("week", path.week_index, week_count))?;
        let day_count = week.days.len();
        let day = week
            .days
            .get_mut(path.day_index)
            .ok_or_else(|| out_of_range("day", path.day_index, day_count))?;
        let session_count = day.sessions.len();
        day.sessions
            .get_mut(path.session_index)
            .ok_or_else(|| out_of_range("session", path.session_index, session_count))
    }

    /// Flatten the tree into `(path, session)` pairs in plan order
    pub fn iter_sessions(&self) -> impl Iterator<Item = (SessionPath, &Session)> + '_ {
        self.phases.iter().enumerate().flat_map(|(pi, phase)| {
            phase.weeks.iter().enumerate().flat_map(move |(wi, week)| {
                week.days.iter().enumerate().flat_map(move |(di, day)| {
                    day.sessions
                        .iter()
                        .enumerate()
                        .map(move |(si, session)| (SessionPath::new(pi, wi, di, si), session))
                })
            })
        })
    }

    /// Number of leaf sessions in the tree
    #[must_use]
    pub fn total_sessions(&self) -> usize {
        self.iter_sessions().count()
    }

    /// Distinct session types present anywhere in the tree
    #[must_use]
    pub fn session_types(&self) -> BTreeSet<SessionType> {
        self.iter_sessions().map(|(_, s)| s.session_type).collect()
    }

    fn validate_fields(&self) -> AppResult<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::missing_field("title"));
        }
        for (path, session) in self.iter_sessions() {
            if session.name.trim().is_empty() {
                return Err(AppError::invalid_input(format!(
                    "Session at {path} has no name"
                )));
            }
            for prescription in &session.exercises {
                validate_prescription(prescription, path)?;
            }
        }
        Ok(())
    }
}

impl_versioned_entity!(ProgramPlan, Collection::Plans, "Plan");

fn validate_prescription(prescription: &ExercisePrescription, path: SessionPath) -> AppResult<()> {
    if prescription.exercise_name.trim().is_empty() {
        return Err(AppError::invalid_input(format!(
            "Exercise in session {path} has no name"
        )));
    }
    if let RepTarget::Range { min, max } = prescription.reps {
        if min > max {
            return Err(AppError::out_of_range(
                "reps",
                format!("range {min}-{max} in session {path} is inverted"),
            ));
        }
    }
    if let Some(effort) = prescription.effort_level {
        if !(1..=10).contains(&effort) {
            return Err(AppError::out_of_range(
                "effort_level",
                format!("{effort} is not between 1 and 10"),
            ));
        }
    }
    if prescription.weight.is_some_and(|w| !w.is_finite()) {
        return Err(AppError::out_of_range("weight", "must be a finite number"));
    }
    Ok(())
}

fn out_of_range(level: &str, index: usize, len: usize) -> AppError {
    AppError::invalid_session_path(format!(
        "{level} index {index} is out of range ({len} available)"
    ))
}

/// Record that one plan session was performed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedSession {
    /// Unique identifier
    pub id: String,
    /// Plan the session belongs to
    pub plan_id: String,
    /// Address of the performed session
    pub session_path: SessionPath,
    /// When the session was completed
    pub completed_at: DateTime<Utc>,
    /// Workout log entry produced by the session, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_id: Option<String>,
    /// Version counter
    #[serde(default = "super::initial_version")]
    pub version: u64,
}

impl CompletedSession {
    /// Create a completion record for `path` in `plan_id`
    #[must_use]
    pub fn new(
        plan_id: impl Into<String>,
        session_path: SessionPath,
        completed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: String::new(),
            plan_id: plan_id.into(),
            session_path,
            completed_at,
            workout_id: None,
            version: super::initial_version(),
        }
    }
}

impl Entity for CompletedSession {
    const COLLECTION: Collection = Collection::CompletedSessions;
    const KIND: &'static str = "Completed session";

    fn id(&self) -> &str {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn prepare_new(&mut self, _now: DateTime<Utc>) {
        if self.id.trim().is_empty() {
            self.id = super::new_id();
        }
        self.version = super::initial_version();
    }

    fn touch(&mut self, _now: DateTime<Utc>) {
        self.version += 1;
    }

    fn validate(&self) -> AppResult<()> {
        if self.plan_id.trim().is_empty() {
            return Err(AppError::missing_field("plan_id"));
        }
        Ok(())
    }
}
