// ABOUTME: Exercise glossary entries with safety notes and name-based related terms
// ABOUTME: Related terms are soft references resolved by case-insensitive name match
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{impl_versioned_entity, Collection};
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A glossary term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryItem {
    /// Unique identifier
    pub id: String,
    /// Term being defined
    pub term: String,
    /// Definition text
    pub definition: String,
    /// Grouping such as "technique" or "equipment"
    #[serde(default)]
    pub category: String,
    /// Safety guidance
    #[serde(default)]
    pub safety_notes: String,
    /// Names of related terms
    #[serde(default)]
    pub related_terms: Vec<String>,
    /// Opaque media identifier of an illustration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_source: Option<String>,
    /// Version counter
    #[serde(default = "super::initial_version")]
    pub version: u64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl GlossaryItem {
    /// Create a term with its definition
    #[must_use]
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            term: term.into(),
            definition: definition.into(),
            category: String::new(),
            safety_notes: String::new(),
            related_terms: Vec::new(),
            media_source: None,
            version: super::initial_version(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Case-insensitive comparison of `name` against this term
    #[must_use]
    pub fn matches_name(&self, name: &str) -> bool {
        self.term.trim().to_lowercase() == name.trim().to_lowercase()
    }

    fn validate_fields(&self) -> AppResult<()> {
        if self.term.trim().is_empty() {
            return Err(AppError::missing_field("term"));
        }
        if self.definition.trim().is_empty() {
            return Err(AppError::missing_field("definition"));
        }
        Ok(())
    }
}

impl_versioned_entity!(GlossaryItem, Collection::Glossary, "Glossary item");
