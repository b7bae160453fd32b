//! # Catalog Snapshot
//!
//! Turns raw repository records into the immutable item collection the
//! catalog browses: validated, scoped by the visibility policy, newest
//! first, with category counters recomputed from what is actually listed.

mod repository;

pub use repository::{CatalogDocument, InMemoryRepository, ItemRepository, JsonFileRepository};

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use tracing::{info, warn};

use crate::{
    errors::{CatalogError, CatalogResult},
    types::{
        catalog_item::{CatalogItem, Category, CategoryId},
        VisibilityPolicy,
    },
};

/// Immutable item collection plus taxonomy, cheap to clone.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    items:      Arc<[CatalogItem]>,
    categories: Arc<[Category]>,
}

impl CatalogSnapshot {
    /// Snapshot with no items and no categories.
    #[must_use]
    pub fn empty() -> Self {
        Self { items: Arc::from(Vec::new()), categories: Arc::from(Vec::new()) }
    }

    /// Wraps an already curated collection as is.
    #[must_use]
    pub fn from_parts(items: Vec<CatalogItem>, categories: Vec<Category>) -> Self {
        Self { items: Arc::from(items), categories: Arc::from(categories) }
    }

    /// Validates and curates raw repository records.
    ///
    /// # Errors
    /// Returns `DuplicateItem` if two records share an id, or
    /// `InvalidCatalogData` for a negative or non-finite price.
    pub fn assemble(
        items: Vec<CatalogItem>, categories: Vec<Category>, policy: &VisibilityPolicy,
    ) -> CatalogResult<Self> {
        let received = items.len();
        validate(&items)?;

        let mut visible: Vec<CatalogItem> = items
            .into_iter()
            .filter(|item| item.is_active && policy.admits(&item.tags))
            .collect();
        visible.sort_by(|a, b| b.sort_date().cmp(&a.sort_date()));

        let counts = count_by_category(&visible);
        let mut categories: Vec<Category> = categories
            .into_iter()
            .map(|mut category| {
                category.product_count = counts.get(&category.id).copied().unwrap_or(0);
                category
            })
            .collect();
        categories.sort_by_key(|c| c.sort_order);

        info!(
            received,
            listed = visible.len(),
            categories = categories.len(),
            "catalog_assembled"
        );
        Ok(Self::from_parts(visible, categories))
    }

    /// Loads and assembles from a repository.
    ///
    /// # Errors
    /// Returns error if the repository fails or the records are invalid.
    pub fn load<R: ItemRepository + ?Sized>(
        repo: &R, policy: &VisibilityPolicy,
    ) -> CatalogResult<Self> {
        let items = repo.load_items()?;
        let categories = repo.load_categories()?;
        Self::assemble(items, categories, policy)
    }

    /// Like [`load`](Self::load), but any failure yields an empty catalog.
    #[must_use]
    pub fn load_or_empty<R: ItemRepository + ?Sized>(repo: &R, policy: &VisibilityPolicy) -> Self {
        match Self::load(repo, policy) {
            Ok(snapshot) => snapshot,
            Err(error) => {
                warn!(error = %error, "catalog_load_failed");
                Self::empty()
            },
        }
    }

    /// Shared handle to the items.
    #[must_use]
    pub fn items(&self) -> Arc<[CatalogItem]> {
        Arc::clone(&self.items)
    }

    /// Shared handle to the categories.
    #[must_use]
    pub fn categories(&self) -> Arc<[Category]> {
        Arc::clone(&self.categories)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn validate(items: &[CatalogItem]) -> CatalogResult<()> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id.as_str()) {
            return Err(CatalogError::DuplicateItem(item.id.to_string()));
        }
        if let Some(price) = item.price() {
            if !price.is_finite() || price < 0.0 {
                return Err(CatalogError::InvalidCatalogData(format!(
                    "item {} has invalid price {}",
                    item.id, price
                )));
            }
        }
    }
    Ok(())
}

fn count_by_category(items: &[CatalogItem]) -> HashMap<CategoryId, u32> {
    let mut counts: HashMap<CategoryId, u32> = HashMap::new();
    for item in items {
        *counts.entry(item.category_id.clone()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests;
