// ABOUTME: Tests for logging configuration and subscriber installation
// ABOUTME: Serialized because the configuration is read from process-wide environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use pierre_training_journal::logging::{LogFormat, LoggingConfig};
use serial_test::serial;
use std::env;

const VARS: [&str; 6] = [
    "RUST_LOG",
    "LOG_FORMAT",
    "ENVIRONMENT",
    "SERVICE_NAME",
    "LOG_INCLUDE_LOCATION",
    "LOG_INCLUDE_THREAD",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_logging_config_from_env() {
    clear_env();
    env::set_var("RUST_LOG", "debug");
    env::set_var("LOG_FORMAT", "json");
    env::set_var("ENVIRONMENT", "production");
    env::set_var("SERVICE_NAME", "journal-test");

    let config = LoggingConfig::from_env();
    clear_env();

    assert_eq!(config.level, "debug");
    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.environment, "production");
    assert_eq!(config.service_name, "journal-test");
    assert!(config.include_location);
    assert!(!config.include_thread);
}

#[test]
#[serial]
fn test_compact_format_and_thread_flag() {
    clear_env();
    env::set_var("LOG_FORMAT", "compact");
    env::set_var("LOG_INCLUDE_THREAD", "1");

    let config = LoggingConfig::from_env();
    clear_env();

    assert_eq!(config.format, LogFormat::Compact);
    assert!(config.include_thread);
    assert!(!config.include_location);
}

#[test]
fn test_default_logging_config() {
    let config = LoggingConfig::default();

    assert_eq!(config.level, "info");
    assert_eq!(config.format, LogFormat::Pretty);
    assert_eq!(config.environment, "development");
    assert_eq!(config.service_name, "pierre-training-journal");
    assert!(!config.include_location);
}

#[test]
fn test_second_init_is_rejected() {
    let config = LoggingConfig {
        level: "warn".to_owned(),
        format: LogFormat::Compact,
        ..LoggingConfig::default()
    };
    assert!(config.init().is_ok());
    assert!(config.init().is_err());
}
