//! # Catalog State Controller
//!
//! Owns the catalog page's filter and search state for one browsing session.
//! The navigation host's query string is authoritative: every mutator encodes
//! the next state into a single query-string replacement, and the controller
//! re-derives its view from whatever the host reports afterwards. Back/forward
//! navigation and shared links therefore flow through the same path as user
//! edits.

mod controller;
mod draft;
mod navigation;
mod view;

pub use controller::{CatalogController, NavigationOutcome};
pub use draft::FilterDraft;
pub use navigation::{location, MemoryNavigation, NavigationHost};
pub use view::{category_facets, has_active_filters, CatalogView, CategoryFacet, SearchResultItem};
