// ABOUTME: Glossary repository with case-insensitive name lookup and related-term resolution
// ABOUTME: Related terms are resolved by name at read time; dangling names are skipped
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::EntityStore;
use crate::storage::SharedStorage;
use pierre_training_core::errors::{AppError, AppResult};
use pierre_training_core::models::GlossaryItem;
use tracing::debug;

/// Exercise glossary
#[derive(Clone)]
pub struct GlossaryRepository {
    items: EntityStore<GlossaryItem>,
}

impl GlossaryRepository {
    /// Create a repository over `storage`
    #[must_use]
    pub fn new(storage: SharedStorage) -> Self {
        Self {
            items: EntityStore::new(storage),
        }
    }

    /// Add a term; terms are unique ignoring case
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a duplicate term, or a validation/storage error
    pub async fn create(&self, item: GlossaryItem) -> AppResult<GlossaryItem> {
        if self.find_by_name(&item.term).await.is_some() {
            return Err(AppError::invalid_input(format!(
                "Glossary term '{}' already exists",
                item.term
            )));
        }
        self.items.insert(item).await
    }

    /// Load a term by id
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id
    pub async fn get(&self, item_id: &str) -> AppResult<GlossaryItem> {
        self.items.require(item_id).await
    }

    /// All terms, alphabetical
    pub async fn list(&self) -> Vec<GlossaryItem> {
        let mut items = self.items.list().await;
        items.sort_by_key(|i| i.term.to_lowercase());
        items
    }

    /// Replace a term, bumping its version
    ///
    /// Renaming does not update other items' related-term references.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound`, a validation error, or a storage error
    pub async fn update(&self, item: GlossaryItem) -> AppResult<GlossaryItem> {
        self.items.update(item).await
    }

    /// Delete a term
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id or a storage error
    pub async fn delete(&self, item_id: &str) -> AppResult<()> {
        self.items.delete(item_id).await
    }

    /// Case-insensitive lookup by term
    pub async fn find_by_name(&self, name: &str) -> Option<GlossaryItem> {
        self.items
            .list()
            .await
            .into_iter()
            .find(|i| i.matches_name(name))
    }

    /// Resolve an item's related-term names to items
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id
    pub async fn related_items(&self, item_id: &str) -> AppResult<Vec<GlossaryItem>> {
        let item = self.items.require(item_id).await?;
        let all = self.items.list().await;
        let mut related = Vec::with_capacity(item.related_terms.len());
        for name in &item.related_terms {
            match all.iter().find(|candidate| candidate.matches_name(name)) {
                Some(found) => related.push(found.clone()),
                None => debug!(item_id, related_term = %name, "Related term not found"),
            }
        }
        Ok(related)
    }

    /// Terms whose term, definition, or category contains `query`
    pub async fn search(&self, query: &str) -> Vec<GlossaryItem> {
        let needle = query.trim().to_lowercase();
        self.list()
            .await
            .into_iter()
            .filter(|i| {
                needle.is_empty()
                    || i.term.to_lowercase().contains(&needle)
                    || i.definition.to_lowercase().contains(&needle)
                    || i.category.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Terms in `category`, ignoring case
    pub async fn by_category(&self, category: &str) -> Vec<GlossaryItem> {
        self.list()
            .await
            .into_iter()
            .filter(|i| i.category.eq_ignore_ascii_case(category.trim()))
            .collect()
    }

    pub(crate) const fn store(&self) -> &EntityStore<GlossaryItem> {
        &self.items
    }
}
