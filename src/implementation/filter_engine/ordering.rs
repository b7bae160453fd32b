//! Per-field comparators and the stable sort stage.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::types::{
    catalog_item::CatalogItem,
    filter_state::{SortField, SortOrder},
};

/// Extracted ordering key; computed once per item before sorting.
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Number(f64),
    Count(u64),
    Text(String),
    Date(DateTime<Utc>),
}

impl SortKey {
    fn of(item: &CatalogItem, field: SortField) -> Self {
        match field {
            SortField::Price => Self::Number(item.sort_price()),
            SortField::Rating => Self::Number(item.rating),
            SortField::Name => Self::Text(item.name.to_lowercase()),
            SortField::DownloadCount => Self::Count(item.sort_download_count()),
            SortField::CreatedAt => Self::Date(item.sort_date()),
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Count(a), Self::Count(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

fn directed(ordering: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

/// Compares two items by `field` in direction `order`.
#[must_use]
pub fn compare_items(
    a: &CatalogItem, b: &CatalogItem, field: SortField, order: SortOrder,
) -> Ordering {
    directed(SortKey::of(a, field).compare(&SortKey::of(b, field)), order)
}

/// Stable sort of positions into `items`; equal keys keep their incoming
/// relative order in both directions.
pub fn sort_indices(
    items: &[CatalogItem], indices: &mut Vec<usize>, field: SortField, order: SortOrder,
) {
    let mut keyed: Vec<(SortKey, usize)> =
        indices.drain(..).map(|i| (SortKey::of(&items[i], field), i)).collect();
    keyed.sort_by(|(a, _), (b, _)| directed(a.compare(b), order));
    indices.extend(keyed.into_iter().map(|(_, i)| i));
}
