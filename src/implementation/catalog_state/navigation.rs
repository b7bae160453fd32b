//! Navigation host seam: where the query string lives.

use crate::errors::CatalogResult;

/// Owner of the page's current query string.
///
/// Updates are replacements of the current history entry: no new entry, no
/// scroll reset, so rapid filter changes do not pollute back navigation.
pub trait NavigationHost {
    /// Current query string, without a leading `?`.
    fn current_query(&self) -> String;

    /// Replaces the current entry with `path?query` (or `path` when empty).
    ///
    /// # Errors
    /// Returns `CatalogError::NavigationRejected` if the host refuses the update.
    fn replace(&mut self, path: &str, query: &str) -> CatalogResult<()>;
}

/// Builds `path?query`, or just `path` for an empty query.
#[must_use]
pub fn location(path: &str, query: &str) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query)
    }
}

/// In-process navigation host.
///
/// Records every replacement so callers can observe exactly how many
/// navigation updates a mutator produced.
#[derive(Debug, Clone, Default)]
pub struct MemoryNavigation {
    path:         String,
    query:        String,
    replacements: Vec<String>,
}

impl MemoryNavigation {
    /// Creates a host sitting on `path` with an empty query.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), query: String::new(), replacements: Vec::new() }
    }

    /// Starts from an existing query string (e.g. a shared link).
    #[must_use]
    pub fn with_query(mut self, query: impl AsRef<str>) -> Self {
        self.query = strip_question_mark(query.as_ref()).to_string();
        self
    }

    /// Moves to `query` from outside the controller: back/forward or a typed URL.
    ///
    /// Not counted as a replacement.
    pub fn navigate(&mut self, query: impl AsRef<str>) {
        self.query = strip_question_mark(query.as_ref()).to_string();
    }

    /// Current `path?query`.
    #[must_use]
    pub fn location(&self) -> String {
        location(&self.path, &self.query)
    }

    /// Locations written by [`NavigationHost::replace`], oldest first.
    #[must_use]
    pub fn replacements(&self) -> &[String] {
        &self.replacements
    }

    /// Number of replacements so far.
    #[must_use]
    pub fn replacement_count(&self) -> usize {
        self.replacements.len()
    }
}

impl NavigationHost for MemoryNavigation {
    fn current_query(&self) -> String {
        self.query.clone()
    }

    fn replace(&mut self, path: &str, query: &str) -> CatalogResult<()> {
        self.path = path.to_string();
        self.query = query.to_string();
        self.replacements.push(location(path, query));
        Ok(())
    }
}

fn strip_question_mark(query: &str) -> &str {
    query.strip_prefix('?').unwrap_or(query)
}
