// ABOUTME: Tests for the storage backends and their behavior through repositories
// ABOUTME: Runs one contract against memory and JSON file backends, plus file persistence and corruption cases
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use common::{init_test_logging, sample_plan, test_config};
use pierre_training_journal::config::{JournalConfig, StorageKind};
use pierre_training_journal::context::JournalContext;
use pierre_training_journal::errors::ErrorCode;
use pierre_training_journal::models::{Collection, GlossaryItem};
use pierre_training_journal::repositories::{GlossaryRepository, PlanRepository};
use pierre_training_journal::storage::{
    InMemoryStorage, JsonFileStorage, SharedStorage, StorageBackend,
};
use pierre_training_journal::units::UnitSystem;
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::fs;

async fn exercise_backend_contract(storage: &dyn StorageBackend) -> Result<()> {
    assert_eq!(storage.count(Collection::Goals).await?, 0);
    assert!(storage.get(Collection::Goals, "a").await?.is_none());

    storage
        .save(Collection::Goals, "b", json!({"title": "second"}))
        .await?;
    storage
        .save(Collection::Goals, "a", json!({"title": "first"}))
        .await?;
    storage
        .save(Collection::Plans, "a", json!({"title": "plan"}))
        .await?;

    assert_eq!(storage.count(Collection::Goals).await?, 2);
    assert_eq!(
        storage.get(Collection::Goals, "a").await?,
        Some(json!({"title": "first"}))
    );

    let all = storage.get_all(Collection::Goals).await?;
    assert_eq!(all, vec![json!({"title": "first"}), json!({"title": "second"})]);

    storage
        .save(Collection::Goals, "a", json!({"title": "replaced"}))
        .await?;
    assert_eq!(storage.count(Collection::Goals).await?, 2);
    assert_eq!(
        storage.get(Collection::Goals, "a").await?,
        Some(json!({"title": "replaced"}))
    );

    assert!(storage.delete(Collection::Goals, "a").await?);
    assert!(!storage.delete(Collection::Goals, "a").await?);
    assert_eq!(storage.count(Collection::Goals).await?, 1);

    storage.clear(Collection::Goals).await?;
    storage.clear(Collection::Goals).await?;
    assert_eq!(storage.count(Collection::Goals).await?, 0);
    assert_eq!(storage.count(Collection::Plans).await?, 1);
    Ok(())
}

async fn json_storage(dir: &Path) -> Result<SharedStorage> {
    init_test_logging();
    Ok(Arc::new(JsonFileStorage::open(dir).await?))
}

fn json_config(dir: &Path) -> JournalConfig {
    JournalConfig {
        storage: StorageKind::JsonFile,
        data_dir: dir.to_path_buf(),
        ..test_config()
    }
}

#[tokio::test]
async fn test_memory_backend_contract() -> Result<()> {
    let storage = InMemoryStorage::new();
    assert_eq!(storage.backend_name(), "memory");
    exercise_backend_contract(&storage).await
}

#[tokio::test]
async fn test_json_backend_contract() -> Result<()> {
    let dir = TempDir::new()?;
    let storage = JsonFileStorage::open(dir.path()).await?;
    assert_eq!(storage.backend_name(), "json_file");
    exercise_backend_contract(&storage).await
}

#[tokio::test]
async fn test_json_backend_creates_missing_directory() -> Result<()> {
    let dir = TempDir::new()?;
    let nested = dir.path().join("journal").join("data");
    let storage = JsonFileStorage::open(&nested).await?;
    storage
        .save(Collection::Glossary, "x", json!({"term": "x"}))
        .await?;
    assert!(nested.join("glossary.json").exists());
    assert!(!nested.join("glossary.json.tmp").exists());
    Ok(())
}

#[tokio::test]
async fn test_json_backend_persists_across_instances() -> Result<()> {
    let dir = TempDir::new()?;
    let plan_id = {
        let plans = PlanRepository::new(json_storage(dir.path()).await?);
        plans.create(sample_plan("Durable", 1, 1, 2, 1)).await?.id
    };

    let plans = PlanRepository::new(json_storage(dir.path()).await?);
    let reloaded = plans.get(&plan_id).await?;
    assert_eq!(reloaded.title, "Durable");
    assert_eq!(reloaded.total_sessions(), 2);
    Ok(())
}

#[tokio::test]
async fn test_context_over_json_files_keeps_settings() -> Result<()> {
    let dir = TempDir::new()?;
    init_test_logging();
    {
        let context = JournalContext::init(json_config(dir.path())).await?;
        context.set_unit_system(UnitSystem::Metric).await?;
        context
            .data()
            .glossary()
            .create(GlossaryItem::new("Tempo", "Controlled lowering speed"))
            .await?;
    }

    let context = JournalContext::init(json_config(dir.path())).await?;
    assert_eq!(context.unit_system().await, UnitSystem::Metric);
    assert!(context.data().glossary().find_by_name("tempo").await.is_some());
    Ok(())
}

#[tokio::test]
async fn test_corrupted_collection_file() -> Result<()> {
    let dir = TempDir::new()?;
    let storage = json_storage(dir.path()).await?;
    fs::write(dir.path().join("plans.json"), "[1, 2, 3]").await?;

    let err = storage.get_all(Collection::Plans).await.unwrap_err();
    assert!(err.to_string().contains("plans"));

    let plans = PlanRepository::new(storage.clone());
    assert!(plans.list().await.is_empty());
    assert_eq!(plans.count().await.unwrap_err().code, ErrorCode::SerializationError);

    fs::write(dir.path().join("plans.json"), "{ not json").await?;
    assert_eq!(plans.count().await.unwrap_err().code, ErrorCode::SerializationError);

    fs::write(dir.path().join("plans.json"), "  \n").await?;
    assert_eq!(plans.count().await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_unreadable_records_are_skipped() -> Result<()> {
    let dir = TempDir::new()?;
    let storage = json_storage(dir.path()).await?;
    let glossary = GlossaryRepository::new(storage.clone());
    glossary
        .create(GlossaryItem::new("Deload", "Planned easy week"))
        .await?;
    storage
        .save(Collection::Glossary, "broken", json!({"bogus": true}))
        .await?;

    let terms = glossary.list().await;
    assert_eq!(terms.len(), 1);
    assert_eq!(terms[0].term, "Deload");

    let err = glossary.get("broken").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::SerializationError);
    Ok(())
}
