//! # Catalog Item Types
//!
//! Normalized representation of the products and quoted services shown in the
//! storefront catalog, plus the category taxonomy they belong to.

use std::{borrow::Cow, collections::BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// IDENTIFIERS
// ============================================================================

/// Unique catalog item identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub Cow<'static, str>);

impl ItemId {
    /// Creates a new item ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    /// Creates an item ID from a static string slice (zero-copy).
    #[must_use]
    pub fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub Cow<'static, str>);

impl CategoryId {
    /// Creates a new category ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    /// Creates a category ID from a static string slice (zero-copy).
    #[must_use]
    pub fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// CATEGORY
// ============================================================================

/// Category in the catalog taxonomy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Category ID.
    pub id:            CategoryId,
    /// Display name.
    pub name:          String,
    /// URL slug.
    #[serde(default)]
    pub slug:          String,
    /// Denormalized item counter supplied by the repository.
    ///
    /// Only a display fallback; live counts come from the item collection.
    #[serde(default)]
    pub product_count: u32,
    /// Sort order in category listings.
    #[serde(default)]
    pub sort_order:    u32,
}

impl Category {
    /// Creates a new category.
    #[must_use]
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        let name = name.into();
        let slug = name.to_lowercase().replace(' ', "-");
        Self { id, name, slug, product_count: 0, sort_order: 0 }
    }

    /// Sets the denormalized item count.
    #[must_use]
    pub fn with_product_count(mut self, count: u32) -> Self {
        self.product_count = count;
        self
    }
}

// ============================================================================
// ITEM METADATA
// ============================================================================

/// Item image information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemImage {
    /// Image URL.
    pub url:        String,
    /// Alternative text for accessibility.
    #[serde(default)]
    pub alt_text:   String,
    /// Whether this is the main image.
    #[serde(default)]
    pub is_primary: bool,
    /// Sort order in gallery.
    #[serde(default)]
    pub sort_order: u32,
}

impl ItemImage {
    /// Creates a new image.
    #[must_use]
    pub fn new(url: impl Into<String>, sort_order: u32) -> Self {
        Self { url: url.into(), alt_text: String::new(), is_primary: false, sort_order }
    }

    /// Marks this image as primary.
    #[must_use]
    pub fn as_primary(mut self) -> Self {
        self.is_primary = true;
        self
    }
}

/// Variant tag of a catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Physical product with price and stock.
    Product,
    /// Quoted service.
    Service,
}

impl ItemKind {
    /// Wire/display name of the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Service => "service",
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields only physical products carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetails {
    /// Unit price, currency-agnostic.
    pub price:          f64,
    /// Price before a promotion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    /// Units in stock.
    #[serde(default)]
    pub stock:          u32,
    /// Number of downloads (digital files shipped with the product).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_count: Option<u64>,
}

/// Fields only quoted services carry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDetails {
    /// Formatted text shown instead of a numeric price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_price_display: Option<String>,
    /// Optional reference price ("from ...").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price:                Option<f64>,
}

/// Variant payload of a catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Offering {
    /// Physical product.
    Product(ProductDetails),
    /// Quoted service.
    Service(ServiceDetails),
}

/// How an item's price should be presented.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceDisplay {
    /// Numeric amount.
    Amount(f64),
    /// Free-form text supplied by the service.
    Custom(String),
    /// Priced on request.
    OnRequest,
}

// ============================================================================
// CATALOG ITEM
// ============================================================================

/// A product or a service as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    /// Item ID.
    pub id:                ItemId,
    /// Item name.
    pub name:              String,
    /// Full description.
    #[serde(default)]
    pub description:       String,
    /// Short description for listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    /// Category the item belongs to.
    pub category_id:       CategoryId,
    /// Category name (cached for display).
    #[serde(default)]
    pub category_name:     String,
    /// Item images.
    #[serde(default)]
    pub images:            Vec<ItemImage>,
    /// Average rating, 0 to 5.
    #[serde(default)]
    pub rating:            f64,
    /// Tags.
    #[serde(default)]
    pub tags:              BTreeSet<String>,
    /// Whether the item is featured.
    #[serde(default)]
    pub is_featured:       bool,
    /// Whether the item is active.
    #[serde(default = "default_true")]
    pub is_active:         bool,
    /// Creation timestamp.
    pub created_at:        DateTime<Utc>,
    /// Date the item was (re)listed, overriding creation for recency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listed_at:         Option<DateTime<Utc>>,
    /// URL slug.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug:              Option<String>,
    /// Variant payload.
    #[serde(flatten)]
    pub offering:          Offering,
}

fn default_true() -> bool {
    true
}

impl CatalogItem {
    /// Creates an active product.
    #[must_use]
    pub fn product(
        id: ItemId, name: impl Into<String>, category_id: CategoryId, price: f64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self::with_offering(
            id,
            name.into(),
            category_id,
            created_at,
            Offering::Product(ProductDetails {
                price,
                original_price: None,
                stock: 0,
                download_count: None,
            }),
        )
    }

    /// Creates an active service with no numeric price.
    #[must_use]
    pub fn service(
        id: ItemId, name: impl Into<String>, category_id: CategoryId, created_at: DateTime<Utc>,
    ) -> Self {
        Self::with_offering(
            id,
            name.into(),
            category_id,
            created_at,
            Offering::Service(ServiceDetails::default()),
        )
    }

    fn with_offering(
        id: ItemId, name: String, category_id: CategoryId, created_at: DateTime<Utc>,
        offering: Offering,
    ) -> Self {
        Self {
            id,
            name,
            description: String::new(),
            short_description: None,
            category_id,
            category_name: String::new(),
            images: Vec::new(),
            rating: 0.0,
            tags: BTreeSet::new(),
            is_featured: false,
            is_active: true,
            created_at,
            listed_at: None,
            slug: None,
            offering,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the rating.
    #[must_use]
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    /// Adds a tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Marks the item as featured.
    #[must_use]
    pub fn featured(mut self) -> Self {
        self.is_featured = true;
        self
    }

    /// Marks the item as inactive.
    #[must_use]
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Sets the URL slug.
    #[must_use]
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Sets the download count. No effect on services.
    #[must_use]
    pub fn with_download_count(mut self, count: u64) -> Self {
        if let Offering::Product(details) = &mut self.offering {
            details.download_count = Some(count);
        }
        self
    }

    /// Sets stock. No effect on services.
    #[must_use]
    pub fn with_stock(mut self, stock: u32) -> Self {
        if let Offering::Product(details) = &mut self.offering {
            details.stock = stock;
        }
        self
    }

    /// Sets the custom price text. No effect on products.
    #[must_use]
    pub fn with_custom_price_display(mut self, text: impl Into<String>) -> Self {
        if let Offering::Service(details) = &mut self.offering {
            details.custom_price_display = Some(text.into());
        }
        self
    }

    /// Variant tag.
    #[must_use]
    pub fn kind(&self) -> ItemKind {
        match self.offering {
            Offering::Product(_) => ItemKind::Product,
            Offering::Service(_) => ItemKind::Service,
        }
    }

    /// Numeric price, if the item has one.
    #[must_use]
    pub fn price(&self) -> Option<f64> {
        match &self.offering {
            Offering::Product(details) => Some(details.price),
            Offering::Service(details) => details.price,
        }
    }

    /// Price used for ordering; missing prices order as zero.
    #[must_use]
    pub fn sort_price(&self) -> f64 {
        self.price().unwrap_or(0.0)
    }

    /// Download count used for ordering; services order as zero.
    #[must_use]
    pub fn sort_download_count(&self) -> u64 {
        match &self.offering {
            Offering::Product(details) => details.download_count.unwrap_or(0),
            Offering::Service(_) => 0,
        }
    }

    /// Most recent relevant date. Creation wins ties with the listing date.
    #[must_use]
    pub fn sort_date(&self) -> DateTime<Utc> {
        match self.listed_at {
            Some(listed) if listed > self.created_at => listed,
            _ => self.created_at,
        }
    }

    /// Gets the primary image, falling back to the first by sort order.
    #[must_use]
    pub fn primary_image(&self) -> Option<&ItemImage> {
        self.images
            .iter()
            .find(|img| img.is_primary)
            .or_else(|| self.images.iter().min_by_key(|img| img.sort_order))
    }

    /// How the price should be presented.
    #[must_use]
    pub fn price_display(&self) -> PriceDisplay {
        match &self.offering {
            Offering::Product(details) => PriceDisplay::Amount(details.price),
            Offering::Service(ServiceDetails { custom_price_display: Some(text), .. }) => {
                PriceDisplay::Custom(text.clone())
            },
            Offering::Service(ServiceDetails { price: Some(price), .. }) => {
                PriceDisplay::Amount(*price)
            },
            Offering::Service(_) => PriceDisplay::OnRequest,
        }
    }

    /// Checks if a product is in stock. Services are always available.
    #[must_use]
    pub fn is_in_stock(&self) -> bool {
        match &self.offering {
            Offering::Product(details) => details.stock > 0,
            Offering::Service(_) => true,
        }
    }

    /// Percentage off the original price, for discounted products.
    #[must_use]
    pub fn discount_percent(&self) -> Option<u32> {
        let Offering::Product(details) = &self.offering else {
            return None;
        };
        let original = details.original_price?;
        if original <= 0.0 || details.price >= original {
            return None;
        }
        Some(((original - details.price) / original * 100.0).round() as u32)
    }

    /// Short description if present, else the full description.
    #[must_use]
    pub fn summary(&self) -> &str {
        self.short_description.as_deref().unwrap_or(&self.description)
    }
}
