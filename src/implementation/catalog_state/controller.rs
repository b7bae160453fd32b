//! Catalog state controller.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::{
    errors::CatalogResult,
    implementation::{
        catalog_snapshot::CatalogSnapshot,
        filter_engine::{derive_visible_indices, dynamic_max_price_or, featured_indices},
        query_codec::{foreign_pairs, parse_pairs, QueryCodec},
    },
    types::{
        catalog_item::{CatalogItem, Category, CategoryId},
        filter_state::{CatalogQuery, FilterPatch, FilterState, SearchText},
        CatalogConfig,
    },
};

use super::{
    navigation::NavigationHost,
    view::{self, CatalogView, CategoryFacet, SearchResultItem},
};

/// What a mutator did to the navigation host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The query string was replaced with this value.
    Replaced(String),
    /// The next state equals the current one; nothing was pushed.
    Unchanged,
}

impl NavigationOutcome {
    /// Whether a navigation update was issued.
    #[must_use]
    pub fn is_replaced(&self) -> bool {
        matches!(self, Self::Replaced(_))
    }
}

/// Single owner of the catalog's filter/search state.
///
/// The navigation host's query string is the only source of truth. The
/// controller keeps a decoded copy plus the derived lists purely as a memo,
/// refreshed by [`sync`](Self::sync) after every navigation event. Mutators
/// always start from the host's current query, never from the memo.
#[derive(Debug)]
pub struct CatalogController<H: NavigationHost> {
    config:       CatalogConfig,
    items:        Arc<[CatalogItem]>,
    categories:   Arc<[Category]>,
    codec:        QueryCodec,
    host:         H,
    synced_query: String,
    current:      CatalogQuery,
    visible:      Vec<usize>,
    featured:     Vec<usize>,
}

impl<H: NavigationHost> CatalogController<H> {
    /// Creates a controller and decodes the host's current query.
    #[must_use]
    pub fn new(snapshot: CatalogSnapshot, config: CatalogConfig, host: H) -> Self {
        let items = snapshot.items();
        let codec = QueryCodec::new(dynamic_max_price_or(&items, config.fallback_max_price));
        let synced_query = host.current_query();
        let current = codec.decode(&synced_query);
        let visible = derive_visible_indices(&items, &current.filters, &current.search);
        let featured = featured_indices(&items);

        Self {
            config,
            categories: snapshot.categories(),
            items,
            codec,
            host,
            synced_query,
            current,
            visible,
            featured,
        }
    }

    // ========================================================================
    // NAVIGATION
    // ========================================================================

    /// Re-reads the host's query string after a navigation event.
    ///
    /// Returns `true` when the decoded state changed and the visible list was
    /// re-derived.
    pub fn sync(&mut self) -> bool {
        let query = self.host.current_query();
        if query == self.synced_query {
            return false;
        }
        self.synced_query = query;

        let decoded = self.codec.decode(&self.synced_query);
        if decoded == self.current {
            return false;
        }
        self.current = decoded;
        self.derive();
        true
    }

    /// Swaps in a new item collection and re-derives everything from it.
    ///
    /// The dynamic max price is recomputed, so an explicit `maxPrice` that
    /// now equals the new ceiling reads back as "no restriction".
    pub fn replace_catalog(&mut self, snapshot: CatalogSnapshot) {
        self.items = snapshot.items();
        self.categories = snapshot.categories();
        self.codec =
            QueryCodec::new(dynamic_max_price_or(&self.items, self.config.fallback_max_price));
        self.synced_query = self.host.current_query();
        self.current = self.codec.decode(&self.synced_query);
        self.featured = featured_indices(&self.items);
        self.derive();
    }

    fn derive(&mut self) {
        self.visible =
            derive_visible_indices(&self.items, &self.current.filters, &self.current.search);
        trace!(total = self.items.len(), visible = self.visible.len(), "catalog_derived");
    }

    // ========================================================================
    // MUTATORS
    // ========================================================================

    /// Shallow-merges `patch` into the current filter state.
    ///
    /// # Errors
    /// Returns error if the navigation host rejects the update.
    pub fn apply_filters(&mut self, patch: FilterPatch) -> CatalogResult<NavigationOutcome> {
        let base = self.decode_host();
        let next = CatalogQuery::new(base.filters.merged(&patch), base.search);
        self.commit(&next)
    }

    /// Removes `id` from the selection if present, appends it otherwise.
    ///
    /// # Errors
    /// Returns error if the navigation host rejects the update.
    pub fn toggle_category(&mut self, id: &CategoryId) -> CatalogResult<NavigationOutcome> {
        let base = self.decode_host();
        let next = CatalogQuery::new(base.filters.toggled(id), base.search);
        self.commit(&next)
    }

    /// Replaces the search text; filters are untouched.
    ///
    /// # Errors
    /// Returns error if the navigation host rejects the update.
    pub fn set_search_query(&mut self, text: &str) -> CatalogResult<NavigationOutcome> {
        let base = self.decode_host();
        let next = CatalogQuery::new(base.filters, SearchText::new(text));
        self.commit(&next)
    }

    /// Resets the filter state to its structural default. The search text is kept.
    ///
    /// # Errors
    /// Returns error if the navigation host rejects the update.
    pub fn clear_filters(&mut self) -> CatalogResult<NavigationOutcome> {
        let base = self.decode_host();
        let next = CatalogQuery::new(self.codec.default_filters(), base.search);
        self.commit(&next)
    }

    /// Clears the search text. The filter state is kept.
    ///
    /// # Errors
    /// Returns error if the navigation host rejects the update.
    pub fn clear_search(&mut self) -> CatalogResult<NavigationOutcome> {
        self.set_search_query("")
    }

    fn decode_host(&self) -> CatalogQuery {
        self.codec.decode(&self.host.current_query())
    }

    /// Encodes `next` and replaces the host query unless it is already there.
    fn commit(&mut self, next: &CatalogQuery) -> CatalogResult<NavigationOutcome> {
        let pairs = parse_pairs(&self.host.current_query());
        let passthrough = foreign_pairs(&pairs);

        let encoded = self.codec.encode_with(next, &passthrough);
        let canonical = self.codec.encode_with(&self.codec.decode_pairs(&pairs), &passthrough);
        if encoded == canonical {
            trace!(query = %encoded, "navigation_suppressed");
            self.sync();
            return Ok(NavigationOutcome::Unchanged);
        }

        self.host.replace(&self.config.catalog_path, &encoded)?;
        debug!(path = %self.config.catalog_path, query = %encoded, "navigation_replaced");
        self.sync();
        Ok(NavigationOutcome::Replaced(encoded))
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Current filter state.
    #[must_use]
    pub fn filter_state(&self) -> &FilterState {
        &self.current.filters
    }

    /// Current search text.
    #[must_use]
    pub fn search_text(&self) -> &SearchText {
        &self.current.search
    }

    /// Current filters and search together.
    #[must_use]
    pub fn query(&self) -> &CatalogQuery {
        &self.current
    }

    /// Canonical encoding of the current state.
    #[must_use]
    pub fn query_string(&self) -> String {
        self.codec.encode(&self.current)
    }

    /// Filtered, ordered items.
    #[must_use]
    pub fn visible_items(&self) -> Vec<&CatalogItem> {
        self.visible.iter().map(|&i| &self.items[i]).collect()
    }

    /// Featured items.
    #[must_use]
    pub fn featured_items(&self) -> Vec<&CatalogItem> {
        self.featured.iter().map(|&i| &self.items[i]).collect()
    }

    /// The full item collection.
    #[must_use]
    pub fn all_items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Category taxonomy.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Ceiling price of the current collection.
    #[must_use]
    pub fn dynamic_max_price(&self) -> f64 {
        self.codec.dynamic_max_price()
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Everything the presentation layer renders from.
    #[must_use]
    pub fn view(&self) -> CatalogView<'_> {
        CatalogView {
            visible_items:     self.visible_items(),
            featured_items:    self.featured_items(),
            filter_state:      &self.current.filters,
            search_text:       &self.current.search,
            categories:        &self.categories,
            dynamic_max_price: self.dynamic_max_price(),
        }
    }

    /// Categories with live counts and selection flags.
    #[must_use]
    pub fn category_facets(&self) -> Vec<CategoryFacet<'_>> {
        view::category_facets(&self.categories, &self.items, &self.current.filters)
    }

    /// Whether a category or search narrows the listing.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        view::has_active_filters(&self.current.filters, &self.current.search)
    }

    /// Visible items as search hits; empty when there is no search text.
    #[must_use]
    pub fn search_results(&self) -> Vec<SearchResultItem> {
        if self.current.search.is_empty() {
            return Vec::new();
        }
        self.visible_items()
            .into_iter()
            .map(|item| SearchResultItem::from_item(item, &self.config))
            .collect()
    }

    /// The navigation host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host, for driving external navigation.
    ///
    /// Call [`sync`](Self::sync) afterwards.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
