//! # Filter/Sort Engine
//!
//! Pure derivation of the visible catalog list from the full item collection,
//! the structured filter state and the search text. Nothing here holds state:
//! identical inputs always produce the identical, identically ordered output.

mod ordering;
mod pipeline;

pub use ordering::{compare_items, sort_indices};
pub use pipeline::{
    derive_visible_indices, derive_visible_items, featured_indices, featured_items,
    matches_category, matches_price, matches_search, matches_type,
};

use crate::types::catalog_item::CatalogItem;

/// Upper price bound used when the collection has no positive price.
pub const FALLBACK_MAX_PRICE: f64 = 1000.0;

/// Highest price in the collection, floored to [`FALLBACK_MAX_PRICE`].
///
/// Items without a price count as zero. The result doubles as the default
/// upper price bound and as the codec's `maxPrice` omission comparand, so
/// both must always be computed from the same collection.
#[must_use]
pub fn dynamic_max_price(items: &[CatalogItem]) -> f64 {
    dynamic_max_price_or(items, FALLBACK_MAX_PRICE)
}

/// [`dynamic_max_price`] with a caller-supplied floor.
#[must_use]
pub fn dynamic_max_price_or(items: &[CatalogItem], fallback: f64) -> f64 {
    let max = items
        .iter()
        .map(CatalogItem::sort_price)
        .filter(|p| p.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);
    if max > 0.0 {
        max
    } else {
        fallback
    }
}
