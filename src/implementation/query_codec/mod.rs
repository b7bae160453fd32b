//! # Query Codec
//!
//! Bidirectional mapping between a [`CatalogQuery`] and the catalog page's
//! query string. Every parameter is omitted when it holds its default, and
//! decoding never fails: absent or malformed parameters resolve to defaults.
//!
//! | Parameter  | Field          | Omitted when                 |
//! |------------|----------------|------------------------------|
//! | `type`     | `item_type`    | `product`                    |
//! | `sort`     | `sort_by`      | `createdAt`                  |
//! | `order`    | `sort_order`   | `desc`                       |
//! | `category` | `category_ids` | selection is empty (repeats) |
//! | `minPrice` | `min_price`    | `0`                          |
//! | `maxPrice` | `max_price`    | equal to dynamic max price   |
//! | `q`        | search text    | empty after trimming         |

use std::str::FromStr;

use tracing::debug;
use url::form_urlencoded;

use crate::types::{
    catalog_item::CategoryId,
    filter_state::{dedup_categories, is_valid_price, CatalogQuery, FilterState, SearchText},
};

/// Variant restriction parameter.
pub const PARAM_TYPE: &str = "type";
/// Sort field parameter.
pub const PARAM_SORT: &str = "sort";
/// Sort direction parameter.
pub const PARAM_ORDER: &str = "order";
/// Repeated category parameter.
pub const PARAM_CATEGORY: &str = "category";
/// Lower price bound parameter.
pub const PARAM_MIN_PRICE: &str = "minPrice";
/// Upper price bound parameter.
pub const PARAM_MAX_PRICE: &str = "maxPrice";
/// Search text parameter.
pub const PARAM_SEARCH: &str = "q";

/// Parameters owned by the codec; anything else is foreign.
pub const KNOWN_PARAMS: [&str; 7] = [
    PARAM_TYPE,
    PARAM_SORT,
    PARAM_ORDER,
    PARAM_CATEGORY,
    PARAM_MIN_PRICE,
    PARAM_MAX_PRICE,
    PARAM_SEARCH,
];

/// Ordered key/value pairs of a query string.
pub type QueryPairs = Vec<(String, String)>;

// ============================================================================
// CODEC
// ============================================================================

/// Query-string codec bound to one dynamic max price.
///
/// The max price is the `maxPrice` omission comparand and the decode default.
/// Build a new codec whenever the item collection changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryCodec {
    dynamic_max_price: f64,
}

impl QueryCodec {
    /// Creates a codec for a collection whose dynamic max price is given.
    #[must_use]
    pub fn new(dynamic_max_price: f64) -> Self {
        Self { dynamic_max_price }
    }

    /// The `maxPrice` comparand this codec was built with.
    #[must_use]
    pub fn dynamic_max_price(&self) -> f64 {
        self.dynamic_max_price
    }

    /// Structural default state for this codec's collection.
    #[must_use]
    pub fn default_filters(&self) -> FilterState {
        FilterState::with_max_price(self.dynamic_max_price)
    }

    /// Encodes filters and search text into a query string (no leading `?`).
    #[must_use]
    pub fn encode(&self, query: &CatalogQuery) -> String {
        serialize_pairs(&self.encode_pairs(query))
    }

    /// Encodes, then appends `passthrough` pairs unchanged.
    #[must_use]
    pub fn encode_with(&self, query: &CatalogQuery, passthrough: &[(String, String)]) -> String {
        let mut pairs = self.encode_pairs(query);
        pairs.extend(passthrough.iter().cloned());
        serialize_pairs(&pairs)
    }

    /// Known parameters in canonical order, defaults omitted.
    #[must_use]
    pub fn encode_pairs(&self, query: &CatalogQuery) -> QueryPairs {
        let filters = &query.filters;
        let defaults = self.default_filters();
        let mut pairs = QueryPairs::new();

        if filters.item_type != defaults.item_type {
            pairs.push((PARAM_TYPE.to_string(), filters.item_type.as_str().to_string()));
        }
        if filters.sort_by != defaults.sort_by {
            pairs.push((PARAM_SORT.to_string(), filters.sort_by.as_str().to_string()));
        }
        if filters.sort_order != defaults.sort_order {
            pairs.push((PARAM_ORDER.to_string(), filters.sort_order.as_str().to_string()));
        }
        for id in &filters.category_ids {
            pairs.push((PARAM_CATEGORY.to_string(), id.to_string()));
        }
        if filters.min_price != defaults.min_price {
            pairs.push((PARAM_MIN_PRICE.to_string(), format_number(filters.min_price)));
        }
        if filters.max_price != defaults.max_price {
            pairs.push((PARAM_MAX_PRICE.to_string(), format_number(filters.max_price)));
        }
        if !query.search.is_empty() {
            pairs.push((PARAM_SEARCH.to_string(), query.search.as_str().to_string()));
        }
        pairs
    }

    /// Decodes a query string, with or without a leading `?`.
    ///
    /// Unknown parameters are ignored. `category` may repeat; duplicates
    /// collapse onto their first occurrence.
    #[must_use]
    pub fn decode(&self, query: &str) -> CatalogQuery {
        self.decode_pairs(&parse_pairs(query))
    }

    /// Decodes already-parsed pairs.
    #[must_use]
    pub fn decode_pairs(&self, pairs: &[(String, String)]) -> CatalogQuery {
        let defaults = self.default_filters();
        let first = |key: &str| pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str());

        let filters = FilterState {
            item_type:    parse_facet(PARAM_TYPE, first(PARAM_TYPE), defaults.item_type),
            category_ids: dedup_categories(
                pairs
                    .iter()
                    .filter(|(k, _)| k == PARAM_CATEGORY)
                    .map(|(_, v)| CategoryId::new(v.clone())),
            ),
            min_price:    parse_price(PARAM_MIN_PRICE, first(PARAM_MIN_PRICE), defaults.min_price),
            max_price:    parse_price(PARAM_MAX_PRICE, first(PARAM_MAX_PRICE), defaults.max_price),
            sort_by:      parse_facet(PARAM_SORT, first(PARAM_SORT), defaults.sort_by),
            sort_order:   parse_facet(PARAM_ORDER, first(PARAM_ORDER), defaults.sort_order),
        };
        let search = SearchText::new(first(PARAM_SEARCH).unwrap_or_default());

        CatalogQuery { filters, search }
    }

    /// Canonical form of a query string: decoded, re-encoded, foreign pairs kept.
    ///
    /// Two query strings describing the same state canonicalize identically.
    #[must_use]
    pub fn canonicalize(&self, query: &str) -> String {
        let pairs = parse_pairs(query);
        self.encode_with(&self.decode_pairs(&pairs), &foreign_pairs(&pairs))
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Parses a query string into ordered pairs, stripping a leading `?`.
#[must_use]
pub fn parse_pairs(query: &str) -> QueryPairs {
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes()).into_owned().collect()
}

/// Serializes pairs as `application/x-www-form-urlencoded`.
#[must_use]
pub fn serialize_pairs(pairs: &[(String, String)]) -> String {
    form_urlencoded::Serializer::new(String::new()).extend_pairs(pairs).finish()
}

/// Pairs whose key the codec does not own, in their original order.
#[must_use]
pub fn foreign_pairs(pairs: &[(String, String)]) -> QueryPairs {
    pairs.iter().filter(|(k, _)| !KNOWN_PARAMS.contains(&k.as_str())).cloned().collect()
}

/// Shortest decimal text that parses back to the same number.
#[must_use]
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

fn parse_facet<T: FromStr + Copy>(key: &str, raw: Option<&str>, default: T) -> T {
    let Some(raw) = raw else {
        return default;
    };
    raw.parse().unwrap_or_else(|_| {
        debug!(param = key, value = raw, "query_param_fallback");
        default
    })
}

fn parse_price(key: &str, raw: Option<&str>, default: f64) -> f64 {
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse::<f64>() {
        Ok(value) if is_valid_price(value) => value,
        _ => {
            debug!(param = key, value = raw, "query_param_fallback");
            default
        },
    }
}
