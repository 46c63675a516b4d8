// ABOUTME: Tests for goal progress math and goal lifecycle management
// ABOUTME: Covers completion percentage, auto-completion, transitions, and behind-schedule detection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use common::{base_time, init_test_logging, memory_storage};
use pierre_training_journal::errors::ErrorCode;
use pierre_training_journal::intelligence::goal_progress::{
    compute_completion_percentage, completion_rate, expected_progress, needs_attention,
};
use pierre_training_journal::models::{FitnessGoal, GoalStatus};
use pierre_training_journal::repositories::GoalRepository;

fn repository() -> GoalRepository {
    init_test_logging();
    GoalRepository::new(memory_storage())
}

fn goal_window(now: DateTime<Utc>, started_days_ago: i64, due_in_days: i64) -> FitnessGoal {
    FitnessGoal::new(
        "Squat 315",
        "squat_1rm",
        315.0,
        now - Duration::days(started_days_ago),
        now + Duration::days(due_in_days),
    )
}

#[test]
fn test_completion_percentage_from_start_value() {
    let goal = goal_window(base_time(), 0, 30).with_start_value(215.0);
    assert!(compute_completion_percentage(&goal, 215.0).abs() < f64::EPSILON);
    assert!((compute_completion_percentage(&goal, 265.0) - 50.0).abs() < f64::EPSILON);
    assert!((compute_completion_percentage(&goal, 400.0) - 100.0).abs() < f64::EPSILON);
    assert!(compute_completion_percentage(&goal, 100.0).abs() < f64::EPSILON);
}

#[test]
fn test_completion_percentage_for_decreasing_targets() {
    let mut goal = goal_window(base_time(), 0, 30).with_start_value(200.0);
    goal.target_value = 180.0;
    assert!((compute_completion_percentage(&goal, 190.0) - 50.0).abs() < f64::EPSILON);
    assert!((compute_completion_percentage(&goal, 175.0) - 100.0).abs() < f64::EPSILON);
}

#[test]
fn test_completion_percentage_without_start_value() {
    let mut goal = goal_window(base_time(), 0, 30);
    goal.target_value = 100.0;
    assert!((compute_completion_percentage(&goal, 25.0) - 25.0).abs() < f64::EPSILON);

    goal.target_value = 0.0;
    assert!(compute_completion_percentage(&goal, 25.0).abs() < f64::EPSILON);

    // Start equal to target falls back to current / target
    let mut goal = goal_window(base_time(), 0, 30).with_start_value(50.0);
    goal.target_value = 50.0;
    assert!((compute_completion_percentage(&goal, 25.0) - 50.0).abs() < f64::EPSILON);
}

#[test]
fn test_needs_attention_rules() {
    let now = base_time();

    let mut behind = goal_window(now, 50, 50);
    behind.completion_percentage = 10.0;
    assert!((expected_progress(&behind, now).unwrap() - 50.0).abs() < 1e-9);
    assert!(needs_attention(&behind, now));

    let mut on_track = goal_window(now, 50, 50);
    on_track.completion_percentage = 40.0;
    assert!(!needs_attention(&on_track, now));

    let mut overdue = goal_window(now, 100, -1);
    overdue.completion_percentage = 90.0;
    assert!(needs_attention(&overdue, now));

    let mut paused = goal_window(now, 50, 50);
    paused.status = GoalStatus::Paused;
    assert!(!needs_attention(&paused, now));

    let mut inverted = goal_window(now, -10, 5);
    inverted.completion_percentage = 0.0;
    assert!(expected_progress(&inverted, now).is_none());
    assert!(!needs_attention(&inverted, now));
}

#[test]
fn test_zero_length_window_only_flags_overdue() {
    let now = base_time();

    let mut due_later = goal_window(now, -3, 3);
    assert_eq!(due_later.start_date, due_later.target_date);
    due_later.completion_percentage = 0.0;
    assert!(expected_progress(&due_later, now).is_none());
    assert!(!needs_attention(&due_later, now));

    let mut lapsed = goal_window(now, 3, -3);
    assert_eq!(lapsed.start_date, lapsed.target_date);
    lapsed.completion_percentage = 20.0;
    assert!(expected_progress(&lapsed, now).is_none());
    assert!(needs_attention(&lapsed, now));

    lapsed.completion_percentage = 100.0;
    assert!(!needs_attention(&lapsed, now));
}

#[test]
fn test_completion_rate() {
    assert!(completion_rate(&[]).abs() < f64::EPSILON);

    let mut goals: Vec<FitnessGoal> = (0..3).map(|_| goal_window(base_time(), 0, 30)).collect();
    goals[0].status = GoalStatus::Completed;
    assert!((completion_rate(&goals) - 33.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_create_computes_initial_percentage() -> Result<()> {
    let repo = repository();
    let mut goal = goal_window(Utc::now(), 0, 30);
    goal.target_value = 100.0;
    goal.current_value = 40.0;
    let goal = repo.create(goal).await?;

    assert!(!goal.id.is_empty());
    assert!((goal.completion_percentage - 40.0).abs() < f64::EPSILON);
    assert_eq!(goal.status, GoalStatus::Active);
    Ok(())
}

#[tokio::test]
async fn test_progress_auto_completes_and_never_reverts() -> Result<()> {
    let repo = repository();
    let goal = repo
        .create(goal_window(Utc::now(), 0, 30).with_start_value(215.0))
        .await?;

    let halfway = repo.update_goal_progress(&goal.id, 265.0).await?;
    assert_eq!(halfway.status, GoalStatus::Active);
    assert!((halfway.completion_percentage - 50.0).abs() < f64::EPSILON);

    let done = repo.update_goal_progress(&goal.id, 320.0).await?;
    assert_eq!(done.status, GoalStatus::Completed);
    assert!((done.completion_percentage - 100.0).abs() < f64::EPSILON);
    assert!(done.completed_at.is_some());

    let regressed = repo.update_goal_progress(&goal.id, 290.0).await?;
    assert_eq!(regressed.status, GoalStatus::Completed);
    assert_eq!(regressed.completed_at, done.completed_at);

    let reopened = repo.reopen(&goal.id).await?;
    assert_eq!(reopened.status, GoalStatus::Active);
    assert!(reopened.completed_at.is_none());
    assert!((reopened.completion_percentage - 75.0).abs() < f64::EPSILON);
    Ok(())
}

#[tokio::test]
async fn test_progress_rejects_non_finite_values() -> Result<()> {
    let repo = repository();
    let goal = repo.create(goal_window(Utc::now(), 0, 30)).await?;
    let err = repo
        .update_goal_progress(&goal.id, f64::NAN)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    Ok(())
}

#[tokio::test]
async fn test_status_transitions() -> Result<()> {
    let repo = repository();
    let goal = repo.create(goal_window(Utc::now(), 0, 30)).await?;

    let paused = repo.transition_status(&goal.id, GoalStatus::Paused).await?;
    assert_eq!(paused.status, GoalStatus::Paused);

    let err = repo
        .transition_status(&goal.id, GoalStatus::Completed)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidStateTransition);

    repo.transition_status(&goal.id, GoalStatus::Active).await?;
    let completed = repo
        .transition_status(&goal.id, GoalStatus::Completed)
        .await?;
    assert!(completed.completed_at.is_some());

    let err = repo
        .transition_status(&goal.id, GoalStatus::Active)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidStateTransition);

    let err = repo
        .transition_status(&goal.id, GoalStatus::Completed)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    Ok(())
}

#[tokio::test]
async fn test_update_recomputes_progress() -> Result<()> {
    let repo = repository();
    let mut goal = goal_window(Utc::now(), 0, 30);
    goal.target_value = 100.0;
    let goal = repo.create(goal).await?;

    let mut edited = goal.clone();
    edited.current_value = 40.0;
    let edited = repo.update(edited).await?;
    assert!((edited.completion_percentage - 40.0).abs() < f64::EPSILON);
    assert_eq!(edited.status, GoalStatus::Active);
    assert_eq!(edited.version, 2);

    let mut reached = edited.clone();
    reached.current_value = 100.0;
    let reached = repo.update(reached).await?;
    assert!((reached.completion_percentage - 100.0).abs() < f64::EPSILON);
    assert_eq!(reached.status, GoalStatus::Completed);
    assert!(reached.completed_at.is_some());

    let mut lowered = reached.clone();
    lowered.current_value = 10.0;
    let lowered = repo.update(lowered).await?;
    assert_eq!(lowered.status, GoalStatus::Completed);
    assert_eq!(lowered.completed_at, reached.completed_at);
    assert!((lowered.completion_percentage - 10.0).abs() < f64::EPSILON);
    Ok(())
}

#[tokio::test]
async fn test_update_follows_lifecycle_graph() -> Result<()> {
    let repo = repository();
    let goal = repo.create(goal_window(Utc::now(), 0, 30)).await?;

    let mut paused = goal.clone();
    paused.status = GoalStatus::Paused;
    let paused = repo.update(paused).await?;
    assert_eq!(paused.status, GoalStatus::Paused);

    let mut skipped = paused.clone();
    skipped.status = GoalStatus::Completed;
    let err = repo.update(skipped).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidStateTransition);

    let abandoned = repo
        .transition_status(&goal.id, GoalStatus::Abandoned)
        .await?;
    let mut revived = abandoned.clone();
    revived.status = GoalStatus::Active;
    let err = repo.update(revived).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    assert_eq!(repo.get(&goal.id).await?.status, GoalStatus::Abandoned);

    let finished = repo.create(goal_window(Utc::now(), 0, 30)).await?;
    let finished = repo
        .transition_status(&finished.id, GoalStatus::Completed)
        .await?;
    let mut reactivated = finished.clone();
    reactivated.status = GoalStatus::Active;
    let err = repo.update(reactivated).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    assert_eq!(repo.reopen(&finished.id).await?.status, GoalStatus::Active);
    Ok(())
}

#[tokio::test]
async fn test_abandoned_goal_is_final_and_not_reopenable() -> Result<()> {
    let repo = repository();
    let goal = repo.create(goal_window(Utc::now(), 0, 30)).await?;
    repo.transition_status(&goal.id, GoalStatus::Abandoned)
        .await?;

    for next in [GoalStatus::Active, GoalStatus::Paused, GoalStatus::Completed] {
        assert!(repo.transition_status(&goal.id, next).await.is_err());
    }
    assert_eq!(
        repo.reopen(&goal.id).await.unwrap_err().code,
        ErrorCode::InvalidStateTransition
    );
    Ok(())
}

#[tokio::test]
async fn test_attention_and_rate_queries() -> Result<()> {
    let repo = repository();
    let now = Utc::now();

    let behind = repo.create(goal_window(now, 50, 50)).await?;
    let mut on_track = goal_window(now, 50, 50);
    on_track.target_value = 100.0;
    on_track.current_value = 60.0;
    repo.create(on_track).await?;
    let finished = repo.create(goal_window(now, 10, 10)).await?;
    repo.transition_status(&finished.id, GoalStatus::Completed)
        .await?;

    let attention = repo.goals_needing_attention(now).await;
    assert_eq!(attention.len(), 1);
    assert_eq!(attention[0].id, behind.id);

    assert!((repo.goal_completion_rate().await - 33.0).abs() < f64::EPSILON);
    assert_eq!(repo.active_goals().await.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_record_metric_value_updates_tracking_goals() -> Result<()> {
    let repo = repository();
    let now = Utc::now();

    let mut weight_loss = FitnessGoal::new(
        "Cut",
        "bodyweight",
        180.0,
        now,
        now + Duration::days(60),
    )
    .with_start_value(200.0);
    weight_loss.unit = "lb".to_owned();
    let weight_loss = repo.create(weight_loss).await?;

    let abandoned = repo
        .create(FitnessGoal::new("Old cut", "bodyweight", 170.0, now, now + Duration::days(60)))
        .await?;
    repo.transition_status(&abandoned.id, GoalStatus::Abandoned)
        .await?;
    repo.create(goal_window(now, 0, 30)).await?;

    let updated = repo.record_metric_value("Bodyweight", 190.0).await?;
    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0].id, weight_loss.id);
    assert!((updated[0].completion_percentage - 50.0).abs() < f64::EPSILON);
    assert!(repo.get(&abandoned.id).await?.current_value.abs() < f64::EPSILON);
    Ok(())
}

#[tokio::test]
async fn test_delete_goal() -> Result<()> {
    let repo = repository();
    let goal = repo.create(goal_window(Utc::now(), 0, 30)).await?;
    repo.delete(&goal.id).await?;
    assert!(repo.list().await.is_empty());
    assert_eq!(
        repo.get(&goal.id).await.unwrap_err().code,
        ErrorCode::ResourceNotFound
    );
    Ok(())
}
