//! # Storefront Catalog
//!
//! Catalog browsing core for a storefront selling physical products and
//! quoted services. Filter, sort and search state lives in the page's query
//! string so any view is shareable, bookmarkable and restored by back/forward
//! navigation; the visible list is a pure function of that state and the
//! item collection.

#![allow(clippy::unnecessary_literal_bound)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(missing_docs)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]
#![allow(clippy::missing_panics_doc)]

pub mod errors;
pub mod implementation;
pub mod types;

// Re-exports for public API
pub use errors::{CartError, CatalogError, CatalogResult, ConfigError};
pub use implementation::{
    cart_store::{merge_cart_lines, CartLine, CartStore, ScratchCartStore},
    catalog_snapshot::{CatalogSnapshot, InMemoryRepository, ItemRepository, JsonFileRepository},
    catalog_state::{
        CatalogController, CatalogView, FilterDraft, MemoryNavigation, NavigationHost,
        NavigationOutcome, SearchResultItem,
    },
    filter_engine::{derive_visible_items, dynamic_max_price, featured_items},
    query_codec::QueryCodec,
    CatalogSettings,
};
pub use types::{
    catalog_item::{CatalogItem, Category, CategoryId, ItemId, ItemKind},
    filter_state::{CatalogQuery, FilterPatch, FilterState, SearchText, SortField, SortOrder, TypeFilter},
    CatalogConfig, VisibilityPolicy,
};
