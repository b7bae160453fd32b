//! Read-only projections handed to the presentation layer.

use crate::types::{
    catalog_item::{CatalogItem, Category, CategoryId, ItemId, ItemKind},
    filter_state::{FilterState, SearchText},
    CatalogConfig,
};

/// Everything a catalog page renders from.
#[derive(Debug, Clone)]
pub struct CatalogView<'a> {
    /// Filtered, ordered items.
    pub visible_items:     Vec<&'a CatalogItem>,
    /// Featured items, independent of filters.
    pub featured_items:    Vec<&'a CatalogItem>,
    /// Current filter state.
    pub filter_state:      &'a FilterState,
    /// Current search text.
    pub search_text:       &'a SearchText,
    /// Category taxonomy.
    pub categories:        &'a [Category],
    /// Ceiling price of the collection.
    pub dynamic_max_price: f64,
}

/// A category as shown in the filter panel.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryFacet<'a> {
    /// The category.
    pub category: &'a Category,
    /// Number of listed items in it.
    pub count:    u32,
    /// Whether it is part of the current selection.
    pub selected: bool,
}

/// Builds the facet list. Live counts win over the denormalized counter
/// unless there is no live collection to count from.
#[must_use]
pub fn category_facets<'a>(
    categories: &'a [Category], items: &[CatalogItem], filters: &FilterState,
) -> Vec<CategoryFacet<'a>> {
    categories
        .iter()
        .map(|category| CategoryFacet {
            category,
            count: if items.is_empty() {
                category.product_count
            } else {
                live_count(items, &category.id)
            },
            selected: filters.is_category_selected(&category.id),
        })
        .collect()
}

fn live_count(items: &[CatalogItem], id: &CategoryId) -> u32 {
    let count = items.iter().filter(|item| item.is_active && &item.category_id == id).count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Search hit projected for the quick-results dropdown.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResultItem {
    /// Item ID.
    pub id:          ItemId,
    /// Item name.
    pub title:       String,
    /// Short description, else full description.
    pub description: String,
    /// Variant tag.
    pub kind:        ItemKind,
    /// Detail page link.
    pub url:         String,
    /// Primary image.
    pub image_url:   Option<String>,
    /// Numeric price if any.
    pub price:       Option<f64>,
    /// Rating.
    pub rating:      f64,
    /// Category name.
    pub category:    String,
}

impl SearchResultItem {
    /// Projects an item, linking it under the configured paths.
    #[must_use]
    pub fn from_item(item: &CatalogItem, config: &CatalogConfig) -> Self {
        let handle = item.slug.as_deref().unwrap_or(item.id.as_str());
        let url = match item.kind() {
            ItemKind::Service => format!("{}/{}", config.service_path.trim_end_matches('/'), handle),
            ItemKind::Product => {
                format!("{}/product/{}", config.catalog_path.trim_end_matches('/'), handle)
            },
        };
        Self {
            id: item.id.clone(),
            title: item.name.clone(),
            description: item.summary().to_string(),
            kind: item.kind(),
            url,
            image_url: item.primary_image().map(|img| img.url.clone()),
            price: item.price(),
            rating: item.rating,
            category: item.category_name.clone(),
        }
    }
}

/// Whether the user narrowed the listing by category or text.
#[must_use]
pub fn has_active_filters(filters: &FilterState, search: &SearchText) -> bool {
    !filters.category_ids.is_empty() || !search.is_empty()
}
