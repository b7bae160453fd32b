//! # Filter State Types
//!
//! The canonical structured filter/sort state and the free-text search value.
//! Both are plain values: mutators produce new ones, nothing is edited in place.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::catalog_item::{CategoryId, ItemKind};

// ============================================================================
// FACETS
// ============================================================================

/// Which item variants are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    /// Physical products only.
    #[default]
    Product,
    /// Quoted services only.
    Service,
    /// Both.
    All,
}

impl TypeFilter {
    /// Every variant, in display order.
    pub const ALL: [TypeFilter; 3] = [Self::Product, Self::Service, Self::All];

    /// Query-string value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Service => "service",
            Self::All => "all",
        }
    }

    /// Whether items of `kind` pass this filter.
    #[must_use]
    pub fn admits(&self, kind: ItemKind) -> bool {
        match self {
            Self::All => true,
            Self::Product => kind == ItemKind::Product,
            Self::Service => kind == ItemKind::Service,
        }
    }
}

/// Field the visible list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    /// Recency.
    #[default]
    CreatedAt,
    /// Numeric price.
    Price,
    /// Average rating.
    Rating,
    /// Name, case-insensitive.
    Name,
    /// Product downloads.
    DownloadCount,
}

impl SortField {
    /// Every variant, in display order.
    pub const ALL: [SortField; 5] =
        [Self::CreatedAt, Self::Price, Self::Rating, Self::DownloadCount, Self::Name];

    /// Query-string value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreatedAt => "createdAt",
            Self::Price => "price",
            Self::Rating => "rating",
            Self::Name => "name",
            Self::DownloadCount => "downloadCount",
        }
    }
}

/// Direction of the ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Smallest first.
    Asc,
    /// Largest first.
    #[default]
    Desc,
}

impl SortOrder {
    /// Every variant.
    pub const ALL: [SortOrder; 2] = [Self::Asc, Self::Desc];

    /// Query-string value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Returned when a facet value is not one of the known variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFacetValue(pub String);

impl std::fmt::Display for UnknownFacetValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown facet value: {}", self.0)
    }
}

impl std::error::Error for UnknownFacetValue {}

macro_rules! facet_from_str {
    ($ty:ty) => {
        impl FromStr for $ty {
            type Err = UnknownFacetValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty>::ALL
                    .into_iter()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| UnknownFacetValue(s.to_string()))
            }
        }
    };
}

facet_from_str!(TypeFilter);
facet_from_str!(SortField);
facet_from_str!(SortOrder);

// ============================================================================
// FILTER STATE
// ============================================================================

/// Canonical filter and sort state.
///
/// Inactive items are never listed; there is no field to turn that off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Variant restriction.
    pub item_type:    TypeFilter,
    /// Selected categories, in selection order, without duplicates.
    /// Empty means no restriction.
    pub category_ids: Vec<CategoryId>,
    /// Inclusive lower price bound.
    pub min_price:    f64,
    /// Inclusive upper price bound.
    pub max_price:    f64,
    /// Sort field.
    pub sort_by:      SortField,
    /// Sort direction.
    pub sort_order:   SortOrder,
}

impl FilterState {
    /// Structural default for a catalog whose dynamic max price is `max_price`.
    #[must_use]
    pub fn with_max_price(max_price: f64) -> Self {
        Self {
            item_type: TypeFilter::default(),
            category_ids: Vec::new(),
            min_price: 0.0,
            max_price,
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
        }
    }

    /// Returns a copy with `patch` shallow-merged in.
    ///
    /// Fields absent from the patch are left untouched. Category ids are
    /// de-duplicated keeping the first occurrence. A price bound that is not
    /// a finite, non-negative number is ignored and the current bound kept.
    #[must_use]
    pub fn merged(&self, patch: &FilterPatch) -> Self {
        let mut next = self.clone();
        if let Some(item_type) = patch.item_type {
            next.item_type = item_type;
        }
        if let Some(category_ids) = &patch.category_ids {
            next.category_ids = dedup_categories(category_ids.iter().cloned());
        }
        if let Some(min_price) = patch.min_price.filter(|p| is_valid_price(*p)) {
            next.min_price = min_price;
        }
        if let Some(max_price) = patch.max_price.filter(|p| is_valid_price(*p)) {
            next.max_price = max_price;
        }
        if let Some(sort_by) = patch.sort_by {
            next.sort_by = sort_by;
        }
        if let Some(sort_order) = patch.sort_order {
            next.sort_order = sort_order;
        }
        next
    }

    /// Returns a copy with `id` removed if selected, appended otherwise.
    #[must_use]
    pub fn toggled(&self, id: &CategoryId) -> Self {
        let mut next = self.clone();
        if let Some(pos) = next.category_ids.iter().position(|c| c == id) {
            next.category_ids.remove(pos);
        } else {
            next.category_ids.push(id.clone());
        }
        next
    }

    /// Whether `id` is currently selected.
    #[must_use]
    pub fn is_category_selected(&self, id: &CategoryId) -> bool {
        self.category_ids.contains(id)
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::with_max_price(crate::implementation::filter_engine::FALLBACK_MAX_PRICE)
    }
}

/// Price bounds must be finite and non-negative.
pub(crate) fn is_valid_price(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

pub(crate) fn dedup_categories(ids: impl IntoIterator<Item = CategoryId>) -> Vec<CategoryId> {
    let mut out: Vec<CategoryId> = Vec::new();
    for id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}

/// Partial update for [`FilterState`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterPatch {
    /// New variant restriction.
    pub item_type:    Option<TypeFilter>,
    /// New category selection (replaces the whole list).
    pub category_ids: Option<Vec<CategoryId>>,
    /// New lower price bound.
    pub min_price:    Option<f64>,
    /// New upper price bound.
    pub max_price:    Option<f64>,
    /// New sort field.
    pub sort_by:      Option<SortField>,
    /// New sort direction.
    pub sort_order:   Option<SortOrder>,
}

impl FilterPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the variant restriction.
    #[must_use]
    pub fn item_type(mut self, item_type: TypeFilter) -> Self {
        self.item_type = Some(item_type);
        self
    }

    /// Replaces the category selection.
    #[must_use]
    pub fn categories(mut self, ids: impl IntoIterator<Item = CategoryId>) -> Self {
        self.category_ids = Some(ids.into_iter().collect());
        self
    }

    /// Sets both price bounds.
    #[must_use]
    pub fn price_range(mut self, min: f64, max: f64) -> Self {
        self.min_price = Some(min);
        self.max_price = Some(max);
        self
    }

    /// Sets the lower price bound.
    #[must_use]
    pub fn min_price(mut self, min: f64) -> Self {
        self.min_price = Some(min);
        self
    }

    /// Sets the upper price bound.
    #[must_use]
    pub fn max_price(mut self, max: f64) -> Self {
        self.max_price = Some(max);
        self
    }

    /// Sets field and direction together.
    #[must_use]
    pub fn sort(mut self, sort_by: SortField, sort_order: SortOrder) -> Self {
        self.sort_by = Some(sort_by);
        self.sort_order = Some(sort_order);
        self
    }

    /// Patch that reproduces `state` exactly.
    #[must_use]
    pub fn from_state(state: &FilterState) -> Self {
        Self {
            item_type:    Some(state.item_type),
            category_ids: Some(state.category_ids.clone()),
            min_price:    Some(state.min_price),
            max_price:    Some(state.max_price),
            sort_by:      Some(state.sort_by),
            sort_order:   Some(state.sort_order),
        }
    }
}

// ============================================================================
// SEARCH TEXT
// ============================================================================

/// Free-text search, trimmed on construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchText(String);

impl SearchText {
    /// Creates a search value from raw user input.
    #[must_use]
    pub fn new(text: impl AsRef<str>) -> Self {
        Self(text.as_ref().trim().to_string())
    }

    /// The trimmed text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether there is nothing to search for.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lower-cased needle for substring matching.
    #[must_use]
    pub fn needle(&self) -> String {
        self.0.to_lowercase()
    }
}

impl std::fmt::Display for SearchText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SearchText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Complete input to the filter/sort pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogQuery {
    /// Structured facets.
    pub filters: FilterState,
    /// Free-text search.
    pub search:  SearchText,
}

impl CatalogQuery {
    /// Creates a query from its parts.
    #[must_use]
    pub fn new(filters: FilterState, search: SearchText) -> Self {
        Self { filters, search }
    }
}
