//! Filter stages and the full derivation pipeline.

use crate::types::{
    catalog_item::{CatalogItem, Offering},
    filter_state::{FilterState, SearchText, TypeFilter},
};

use super::ordering::sort_indices;

// ============================================================================
// PIPELINE
// ============================================================================

/// Derives the visible, ordered item list.
///
/// Stages run in a fixed order: active gate, search, category, type, price,
/// then a stable sort.
#[must_use]
pub fn derive_visible_items<'a>(
    items: &'a [CatalogItem], filters: &FilterState, search: &SearchText,
) -> Vec<&'a CatalogItem> {
    derive_visible_indices(items, filters, search).into_iter().map(|i| &items[i]).collect()
}

/// Same as [`derive_visible_items`], as positions into `items`.
#[must_use]
pub fn derive_visible_indices(
    items: &[CatalogItem], filters: &FilterState, search: &SearchText,
) -> Vec<usize> {
    let needle = (!search.is_empty()).then(|| search.needle());

    let mut visible: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.is_active)
        .filter(|(_, item)| needle.as_deref().map_or(true, |n| matches_search(item, n)))
        .filter(|(_, item)| matches_category(item, filters))
        .filter(|(_, item)| matches_type(item, filters.item_type))
        .filter(|(_, item)| {
            filters.item_type == TypeFilter::Service || matches_price(item, filters)
        })
        .map(|(i, _)| i)
        .collect();

    sort_indices(items, &mut visible, filters.sort_by, filters.sort_order);
    visible
}

/// Featured items, independent of any filter or search.
#[must_use]
pub fn featured_items(items: &[CatalogItem]) -> Vec<&CatalogItem> {
    featured_indices(items).into_iter().map(|i| &items[i]).collect()
}

/// Same as [`featured_items`], as positions into `items`.
#[must_use]
pub fn featured_indices(items: &[CatalogItem]) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.is_featured && item.is_active)
        .map(|(i, _)| i)
        .collect()
}

// ============================================================================
// STAGES
// ============================================================================

/// Case-insensitive substring match on name or description.
///
/// `needle` must already be lower-cased.
#[must_use]
pub fn matches_search(item: &CatalogItem, needle: &str) -> bool {
    item.name.to_lowercase().contains(needle) || item.description.to_lowercase().contains(needle)
}

/// Category membership. An empty selection restricts nothing.
#[must_use]
pub fn matches_category(item: &CatalogItem, filters: &FilterState) -> bool {
    filters.category_ids.is_empty() || filters.category_ids.contains(&item.category_id)
}

/// Variant tag check.
#[must_use]
pub fn matches_type(item: &CatalogItem, item_type: TypeFilter) -> bool {
    item_type.admits(item.kind())
}

/// Inclusive price bounds. Services are price-exempt.
#[must_use]
pub fn matches_price(item: &CatalogItem, filters: &FilterState) -> bool {
    match &item.offering {
        Offering::Service(_) => true,
        Offering::Product(details) => {
            filters.min_price <= details.price && details.price <= filters.max_price
        },
    }
}
