//! Item repositories backing a catalog snapshot.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use serde::{Deserialize, Serialize};

use crate::{
    errors::{CatalogError, CatalogResult},
    types::catalog_item::{CatalogItem, Category},
};

/// Source of catalog items and categories.
pub trait ItemRepository {
    /// Loads every stored item, active or not.
    ///
    /// # Errors
    /// Returns `CatalogError::RepositoryUnavailable` if the source cannot be read.
    fn load_items(&self) -> CatalogResult<Vec<CatalogItem>>;

    /// Loads the category taxonomy.
    ///
    /// # Errors
    /// Returns `CatalogError::RepositoryUnavailable` if the source cannot be read.
    fn load_categories(&self) -> CatalogResult<Vec<Category>>;
}

// ============================================================================
// IN-MEMORY REPOSITORY
// ============================================================================

/// Repository held in process memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    items:      Arc<Mutex<Vec<CatalogItem>>>,
    categories: Arc<Mutex<Vec<Category>>>,
}

impl InMemoryRepository {
    /// Creates a repository from items and categories.
    #[must_use]
    pub fn new(items: Vec<CatalogItem>, categories: Vec<Category>) -> Self {
        Self { items: Arc::new(Mutex::new(items)), categories: Arc::new(Mutex::new(categories)) }
    }

    /// Stores an item.
    ///
    /// # Errors
    /// Returns error if the store lock is poisoned.
    pub fn insert_item(&self, item: CatalogItem) -> CatalogResult<()> {
        let mut items = self.items.lock().map_err(|_| lock_error())?;
        items.push(item);
        Ok(())
    }

    /// Stores a category.
    ///
    /// # Errors
    /// Returns error if the store lock is poisoned.
    pub fn insert_category(&self, category: Category) -> CatalogResult<()> {
        let mut categories = self.categories.lock().map_err(|_| lock_error())?;
        categories.push(category);
        Ok(())
    }
}

impl ItemRepository for InMemoryRepository {
    fn load_items(&self) -> CatalogResult<Vec<CatalogItem>> {
        let items = self.items.lock().map_err(|_| lock_error())?;
        Ok(items.clone())
    }

    fn load_categories(&self) -> CatalogResult<Vec<Category>> {
        let categories = self.categories.lock().map_err(|_| lock_error())?;
        Ok(categories.clone())
    }
}

fn lock_error() -> CatalogError {
    CatalogError::RepositoryUnavailable("store lock poisoned".to_string())
}

// ============================================================================
// JSON FILE REPOSITORY
// ============================================================================

/// On-disk catalog document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogDocument {
    pub items:      Vec<CatalogItem>,
    pub categories: Vec<Category>,
}

/// Repository reading a `{ "items": [...], "categories": [...] }` JSON file.
///
/// The file is re-read on every load.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `document` to the backing file.
    ///
    /// # Errors
    /// Returns error if serialization or the write fails.
    pub fn save(&self, document: &CatalogDocument) -> CatalogResult<()> {
        let json = serde_json::to_string_pretty(document)?;
        fs::write(&self.path, json).map_err(|e| {
            CatalogError::RepositoryUnavailable(format!("{}: {}", self.path.display(), e))
        })
    }

    fn read(&self) -> CatalogResult<CatalogDocument> {
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            CatalogError::RepositoryUnavailable(format!("{}: {}", self.path.display(), e))
        })?;
        Ok(serde_json::from_str(&raw)?)
    }
}

impl ItemRepository for JsonFileRepository {
    fn load_items(&self) -> CatalogResult<Vec<CatalogItem>> {
        Ok(self.read()?.items)
    }

    fn load_categories(&self) -> CatalogResult<Vec<Category>> {
        Ok(self.read()?.categories)
    }
}
