// ABOUTME: Tests for the journal context: settings cache, session services, and reset
// ABOUTME: Uses in-memory contexts so every test starts from an empty journal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use common::{
    base_time, init_test_logging, memory_context, memory_storage, sample_plan, test_config,
};
use pierre_training_journal::config::JournalConfig;
use pierre_training_journal::context::JournalContext;
use pierre_training_journal::errors::ErrorCode;
use pierre_training_journal::models::{BodyMetricEntry, GlossaryItem, UserSettings};
use pierre_training_journal::units::{UnitSystem, WeightUnit};
use std::time::Duration;

#[tokio::test]
async fn test_defaults_follow_configured_unit_system() -> Result<()> {
    init_test_logging();
    let config = JournalConfig {
        default_unit_system: UnitSystem::Metric,
        ..test_config()
    };
    let context = JournalContext::with_storage(config, memory_storage()).await;

    assert_eq!(context.unit_system().await, UnitSystem::Metric);
    assert!(!context.data().settings().is_stored().await?);
    assert_eq!(context.settings().await.default_rest_seconds, 90);
    Ok(())
}

#[tokio::test]
async fn test_init_validates_configuration() -> Result<()> {
    init_test_logging();
    let context = JournalContext::init(test_config()).await?;
    assert_eq!(context.data().storage().backend_name(), "memory");

    let broken = JournalConfig {
        rest_tick: Duration::ZERO,
        ..test_config()
    };
    let err = JournalContext::init(broken).await.err().unwrap();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);
    Ok(())
}

#[tokio::test]
async fn test_update_settings_refreshes_cache() -> Result<()> {
    let context = memory_context().await;

    let saved = context
        .update_settings(UserSettings {
            default_rest_seconds: 120,
            ..UserSettings::with_unit_system(UnitSystem::Metric)
        })
        .await?;
    assert_eq!(saved.default_rest_seconds, 120);
    assert_eq!(context.settings().await, saved);
    assert!(context.data().settings().is_stored().await?);

    let err = context
        .update_settings(UserSettings {
            auto_save_interval_seconds: Some(0),
            ..UserSettings::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    assert_eq!(context.settings().await, saved);

    let imperial = context.set_unit_system(UnitSystem::Imperial).await?;
    assert_eq!(imperial.default_rest_seconds, 120);
    assert_eq!(context.unit_system().await, UnitSystem::Imperial);
    Ok(())
}

#[tokio::test]
async fn test_session_services_use_settings() -> Result<()> {
    let context = memory_context().await;

    let services = context.session_services().await;
    assert_eq!(services.auto_save_interval, Duration::from_millis(50));
    assert_eq!(services.rest_tick, Duration::from_millis(10));
    assert_eq!(services.default_rest_seconds, 90);

    context
        .update_settings(UserSettings {
            auto_save_interval_seconds: Some(5),
            default_rest_seconds: 45,
            ..UserSettings::default()
        })
        .await?;
    let services = context.session_services().await;
    assert_eq!(services.auto_save_interval, Duration::from_secs(5));
    assert_eq!(services.default_rest_seconds, 45);
    Ok(())
}

#[tokio::test]
async fn test_explicit_default_interval_still_overrides_config() -> Result<()> {
    let context = memory_context().await;
    assert!(context.settings().await.auto_save_interval_seconds.is_none());

    context
        .update_settings(UserSettings {
            auto_save_interval_seconds: Some(30),
            ..UserSettings::default()
        })
        .await?;
    let services = context.session_services().await;
    assert_eq!(services.auto_save_interval, Duration::from_secs(30));

    context.update_settings(UserSettings::default()).await?;
    let services = context.session_services().await;
    assert_eq!(services.auto_save_interval, Duration::from_millis(50));
    Ok(())
}

#[tokio::test]
async fn test_reset_wipes_everything() -> Result<()> {
    let context = memory_context().await;
    let data = context.data();
    data.plans().create(sample_plan("Gone", 1, 1, 1, 1)).await?;
    data.glossary()
        .create(GlossaryItem::new("Cluster set", "Short rests inside a set"))
        .await?;
    data.body_metrics()
        .add(BodyMetricEntry::new(base_time(), 70.0, WeightUnit::Kg))
        .await?;
    context.set_unit_system(UnitSystem::Metric).await?;

    context.reset().await?;

    assert_eq!(data.plans().count().await?, 0);
    assert!(data.glossary().list().await.is_empty());
    assert!(data.body_metrics().latest().await.is_none());
    assert!(!data.settings().is_stored().await?);
    assert_eq!(context.unit_system().await, UnitSystem::Imperial);
    assert_eq!(context.exporter().export_all().await?.entity_count(), 0);
    Ok(())
}
