//! Error types for the storefront catalog

use thiserror::Error;

/// Catalog-level errors.
///
/// Only the collaborator seams produce these. Query decoding and the
/// filter/sort pipeline never fail: malformed input degrades to defaults.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    /// The navigation host refused a query-string replacement.
    #[error("Navigation update rejected: {0}")]
    NavigationRejected(String),
    /// The item repository could not be read.
    #[error("Repository unavailable: {0}")]
    RepositoryUnavailable(String),
    /// Item data violates a model invariant.
    #[error("Invalid catalog data: {0}")]
    InvalidCatalogData(String),
    /// Two items share the same id.
    #[error("Duplicate item id: {0}")]
    DuplicateItem(String),
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A value could not be parsed for its key.
    #[error("Invalid value for {key}: {value}")]
    InvalidValue {
        /// Configuration key.
        key:   String,
        /// Rejected value.
        value: String,
    },
    /// Key is not a known setting.
    #[error("Unknown key: {0}")]
    UnknownKey(String),
    /// The configuration as a whole is inconsistent.
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Cart store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Quantity must be at least one.
    #[error("Invalid quantity")]
    InvalidQuantity,
    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(String),
    /// Backing store could not be reached.
    #[error("Cart store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Result type for cart operations.
pub type CartResult<T> = Result<T, CartError>;
