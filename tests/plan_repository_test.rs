// ABOUTME: Tests for plan CRUD, search, duplication, session editing, and progress
// ABOUTME: Exercises the plan repository over in-memory storage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use chrono::Duration;
use common::{base_time, init_test_logging, memory_storage, sample_plan, FaultyStorage};
use pierre_training_journal::errors::ErrorCode;
use pierre_training_journal::models::{
    CardioBlock, CardioInterval, ProgramPlan, Session, SessionPath, SessionType,
};
use pierre_training_journal::repositories::{PlanFilters, PlanRepository, SessionUpdate};
use serde_json::json;
use std::sync::Arc;

fn repository() -> PlanRepository {
    init_test_logging();
    PlanRepository::new(memory_storage())
}

/// 2 phases x 1 week x 5 days x 1 session = 10 sessions
fn ten_session_plan() -> ProgramPlan {
    sample_plan("Base Building", 2, 1, 5, 1)
}

#[tokio::test]
async fn test_create_assigns_identity_and_version() -> Result<()> {
    let repo = repository();
    let plan = repo.create(ten_session_plan()).await?;

    assert!(!plan.id.is_empty());
    assert_eq!(plan.version, 1);
    assert_eq!(repo.get(&plan.id).await?, plan);
    assert_eq!(repo.count().await?, 1);
    Ok(())
}

#[tokio::test]
async fn test_create_rejects_untitled_plan() {
    let repo = repository();
    let err = repo.create(ProgramPlan::new("  ")).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingRequiredField);
}

#[tokio::test]
async fn test_update_bumps_version_and_get_unknown_fails() -> Result<()> {
    let repo = repository();
    let mut plan = repo.create(ten_session_plan()).await?;
    plan.description = "Aerobic base".to_owned();
    let updated = repo.update(plan).await?;
    assert_eq!(updated.version, 2);

    let err = repo.get("missing").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    Ok(())
}

#[tokio::test]
async fn test_calculate_progress_counts_completions() -> Result<()> {
    let repo = repository();
    let plan = repo.create(ten_session_plan()).await?;

    for (day, offset) in (0..3).zip(0_i64..) {
        repo.mark_session_complete(
            &plan.id,
            SessionPath::new(0, 0, day, 0),
            base_time() + Duration::days(offset),
            None,
        )
        .await?;
    }

    let progress = repo.calculate_progress(&plan.id).await?;
    assert_eq!(progress.total_sessions, 10);
    assert_eq!(progress.completed_sessions, 3);
    assert!((progress.completion_percentage - 30.0).abs() < f64::EPSILON);
    assert_eq!(progress.current_phase_index, Some(0));
    assert_eq!(progress.current_week_index, Some(0));
    assert_eq!(progress.last_completed_at, Some(base_time() + Duration::days(2)));
    Ok(())
}

#[tokio::test]
async fn test_repeated_completion_counts_once() -> Result<()> {
    let repo = repository();
    let plan = repo.create(ten_session_plan()).await?;
    let path = SessionPath::new(1, 0, 4, 0);

    repo.mark_session_complete(&plan.id, path, base_time(), None)
        .await?;
    repo.mark_session_complete(&plan.id, path, base_time() + Duration::days(7), None)
        .await?;

    let progress = repo.calculate_progress(&plan.id).await?;
    assert_eq!(progress.completed_sessions, 1);
    assert!((progress.completion_percentage - 10.0).abs() < f64::EPSILON);
    assert_eq!(progress.current_phase_index, Some(1));
    assert_eq!(repo.completed_sessions(&plan.id).await.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_empty_plan_progress_is_zero() -> Result<()> {
    let repo = repository();
    let plan = repo.create(ProgramPlan::new("Blank")).await?;
    let progress = repo.calculate_progress(&plan.id).await?;
    assert_eq!(progress.total_sessions, 0);
    assert!(progress.completion_percentage.abs() < f64::EPSILON);
    assert_eq!(progress.current_phase_index, None);
    Ok(())
}

#[tokio::test]
async fn test_mark_complete_rejects_invalid_path() -> Result<()> {
    let repo = repository();
    let plan = repo.create(ten_session_plan()).await?;
    let err = repo
        .mark_session_complete(&plan.id, SessionPath::new(0, 0, 9, 0), base_time(), None)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidSessionPath);
    assert!(repo.completed_sessions(&plan.id).await.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_update_session_with_invalid_path_leaves_plan_unmodified() -> Result<()> {
    let repo = repository();
    let plan = repo.create(ten_session_plan()).await?;

    let update = SessionUpdate {
        name: Some("Renamed".to_owned()),
        ..SessionUpdate::default()
    };
    let err = repo
        .update_session(&plan.id, SessionPath::new(5, 0, 0, 0), update)
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::InvalidSessionPath);
    assert!(err.message.contains("phase"));
    assert_eq!(repo.get(&plan.id).await?, plan);
    Ok(())
}

#[tokio::test]
async fn test_update_session_applies_partial_update() -> Result<()> {
    let repo = repository();
    let plan = repo.create(ten_session_plan()).await?;
    let path = SessionPath::new(1, 0, 2, 0);

    let update = SessionUpdate {
        name: Some("Intervals".to_owned()),
        session_type: Some(SessionType::Hiit),
        notes: Some(Some("Bring a towel".to_owned())),
        cardio_block: Some(Some(CardioBlock {
            warm_up_seconds: 300,
            intervals: vec![CardioInterval {
                work_seconds: 30,
                recovery_seconds: 30,
            }],
            cool_down_seconds: 0,
        })),
        ..SessionUpdate::default()
    };
    let updated = repo.update_session(&plan.id, path, update).await?;

    let session = updated.session(path)?;
    assert_eq!(session.name, "Intervals");
    assert_eq!(session.session_type, SessionType::Hiit);
    assert_eq!(session.estimated_duration_minutes, 45);
    assert_eq!(session.exercises.len(), 1);
    assert_eq!(updated.version, plan.version + 1);
    Ok(())
}

#[tokio::test]
async fn test_update_session_clears_optional_fields() -> Result<()> {
    let repo = repository();
    let plan = repo.create(ten_session_plan()).await?;
    let path = SessionPath::new(0, 0, 1, 0);

    let filled = SessionUpdate {
        notes: Some(Some("Slow eccentrics".to_owned())),
        cardio_block: Some(Some(CardioBlock {
            warm_up_seconds: 120,
            intervals: Vec::new(),
            cool_down_seconds: 120,
        })),
        ..SessionUpdate::default()
    };
    repo.update_session(&plan.id, path, filled).await?;

    let rename_only: SessionUpdate = serde_json::from_value(json!({"name": "Recovery"}))?;
    let renamed = repo.update_session(&plan.id, path, rename_only).await?;
    let session = renamed.session(path)?;
    assert_eq!(session.name, "Recovery");
    assert_eq!(session.notes.as_deref(), Some("Slow eccentrics"));
    assert!(session.cardio_block.is_some());

    let clear: SessionUpdate =
        serde_json::from_value(json!({"notes": null, "cardio_block": null}))?;
    assert_eq!(clear.notes, Some(None));
    let cleared = repo.update_session(&plan.id, path, clear).await?;
    let session = cleared.session(path)?;
    assert!(session.notes.is_none());
    assert!(session.cardio_block.is_none());
    assert_eq!(session.name, "Recovery");
    Ok(())
}

#[tokio::test]
async fn test_duplicate_creates_independent_copy() -> Result<()> {
    let repo = repository();
    let mut template = ten_session_plan();
    template.is_template = true;
    let template = repo.create(template).await?;
    let mut template = repo.update(template).await?;
    assert_eq!(template.version, 2);

    let copy = repo.duplicate(&template.id, "My Base Block").await?;
    assert_ne!(copy.id, template.id);
    assert_eq!(copy.title, "My Base Block");
    assert!(!copy.is_template);
    assert_eq!(copy.version, 1);
    assert_eq!(copy.phases, template.phases);

    template.title = "Template v2".to_owned();
    repo.update(template).await?;
    assert_eq!(repo.get(&copy.id).await?.title, "My Base Block");
    assert_eq!(repo.count().await?, 2);
    Ok(())
}

#[tokio::test]
async fn test_search_filters_compose() -> Result<()> {
    let repo = repository();

    let mut strength = sample_plan("Strength Foundations", 1, 4, 3, 1);
    strength.tags = vec!["Beginner".to_owned(), "barbell".to_owned()];
    strength.description = "Linear progression".to_owned();
    let strength = repo.create(strength).await?;

    let mut conditioning = sample_plan("Engine Builder", 2, 4, 2, 1);
    conditioning.tags = vec!["conditioning".to_owned()];
    conditioning.is_template = true;
    conditioning.phases[0].weeks[0].days[0]
        .sessions
        .push(Session::new("Row intervals", SessionType::Cardio));
    let conditioning = repo.create(conditioning).await?;

    let by_text = repo
        .search(&PlanFilters {
            query: Some("LINEAR".to_owned()),
            ..PlanFilters::default()
        })
        .await;
    assert_eq!(by_text.len(), 1);
    assert_eq!(by_text[0].id, strength.id);

    let by_tag = repo
        .search(&PlanFilters {
            tags: vec!["beginner".to_owned()],
            ..PlanFilters::default()
        })
        .await;
    assert_eq!(by_tag.len(), 1);

    let by_weeks = repo
        .search(&PlanFilters {
            min_weeks: Some(6),
            ..PlanFilters::default()
        })
        .await;
    assert_eq!(by_weeks.len(), 1);
    assert_eq!(by_weeks[0].id, conditioning.id);

    let by_type = repo
        .search(&PlanFilters {
            session_types: vec![SessionType::Strength, SessionType::Cardio],
            ..PlanFilters::default()
        })
        .await;
    assert_eq!(by_type.len(), 1);
    assert_eq!(by_type[0].id, conditioning.id);

    let none = repo
        .search(&PlanFilters {
            is_template: Some(true),
            tags: vec!["beginner".to_owned()],
            ..PlanFilters::default()
        })
        .await;
    assert!(none.is_empty());

    assert_eq!(repo.search(&PlanFilters::default()).await.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_delete_removes_plan_and_completions() -> Result<()> {
    let repo = repository();
    let plan = repo.create(ten_session_plan()).await?;
    repo.mark_session_complete(&plan.id, SessionPath::new(0, 0, 0, 0), base_time(), None)
        .await?;

    repo.delete(&plan.id).await?;
    assert_eq!(repo.count().await?, 0);
    assert!(repo.all_completed_sessions().await?.is_empty());
    assert_eq!(
        repo.delete(&plan.id).await.unwrap_err().code,
        ErrorCode::ResourceNotFound
    );
    Ok(())
}

#[tokio::test]
async fn test_delete_keeps_plan_when_completions_cannot_be_listed() -> Result<()> {
    init_test_logging();
    let storage = Arc::new(FaultyStorage::default());
    let repo = PlanRepository::new(storage.clone());
    let plan = repo.create(ten_session_plan()).await?;
    repo.mark_session_complete(&plan.id, SessionPath::new(1, 0, 4, 0), base_time(), None)
        .await?;

    storage.fail_listings(true);
    let err = repo.delete(&plan.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::StorageError);
    storage.fail_listings(false);

    assert_eq!(repo.get(&plan.id).await?.id, plan.id);
    assert_eq!(repo.completed_sessions(&plan.id).await.len(), 1);

    repo.delete(&plan.id).await?;
    assert_eq!(repo.count().await?, 0);
    assert!(repo.all_completed_sessions().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_plan_stats() -> Result<()> {
    let repo = repository();
    let mut plan = sample_plan("Stats", 2, 2, 3, 1);
    plan.phases[0].weeks[0].days[0]
        .sessions
        .push(Session::new("Easy run", SessionType::Cardio));
    let plan = repo.create(plan).await?;

    let stats = repo.get_stats(&plan.id).await?;
    assert_eq!(stats.total_phases, 2);
    assert_eq!(stats.total_weeks, 4);
    assert_eq!(stats.total_days, 12);
    assert_eq!(stats.total_sessions, 13);
    assert_eq!(stats.session_type_counts.get(&SessionType::Strength), Some(&12));
    assert_eq!(stats.session_type_counts.get(&SessionType::Cardio), Some(&1));
    assert_eq!(stats.total_exercises, 12);
    assert_eq!(stats.unique_exercises, 1);
    assert_eq!(stats.estimated_duration_minutes, 12 * 45);
    Ok(())
}
