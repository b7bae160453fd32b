//! Type definitions for the storefront catalog

use serde::{Deserialize, Serialize};

use crate::errors::{CatalogError, ConfigError};

pub mod catalog_item;
pub mod filter_state;

/// Which repository items are eligible for the public catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilityPolicy {
    /// Tag an item must carry to be listed. `None` lists every active item.
    pub required_tag: Option<String>,
    /// Tags that hide an item even when the required tag is present.
    pub hidden_tags:  Vec<String>,
}

impl VisibilityPolicy {
    /// Policy that lists every active item.
    #[must_use]
    pub fn everything() -> Self {
        Self { required_tag: None, hidden_tags: Vec::new() }
    }

    /// Checks an item's tags against the policy, case-insensitively.
    pub fn admits<'a>(&self, tags: impl IntoIterator<Item = &'a String>) -> bool {
        let tags: Vec<String> = tags.into_iter().map(|t| t.to_lowercase()).collect();
        if let Some(required) = &self.required_tag {
            if !tags.contains(&required.to_lowercase()) {
                return false;
            }
        }
        !self.hidden_tags.iter().any(|hidden| tags.contains(&hidden.to_lowercase()))
    }
}

impl Default for VisibilityPolicy {
    fn default() -> Self {
        Self {
            required_tag: Some("scope:global".to_string()),
            hidden_tags:  vec!["scope:hidden".to_string(), "oculto".to_string()],
        }
    }
}

/// Catalog configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path the catalog page lives at; navigation replacements target it.
    pub catalog_path:       String,
    /// Base path for service detail links.
    pub service_path:       String,
    /// Floor for the dynamic max price when no item has a positive price.
    pub fallback_max_price: f64,
    /// Repository visibility rules.
    pub visibility:         VisibilityPolicy,
}

impl CatalogConfig {
    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    /// Returns error if the JSON is malformed or the values are inconsistent.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration for inconsistent values.
    ///
    /// # Errors
    /// Returns `ConfigError::Validation` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.catalog_path.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "catalog_path must be absolute, got {:?}",
                self.catalog_path
            )));
        }
        if !self.service_path.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "service_path must be absolute, got {:?}",
                self.service_path
            )));
        }
        if !self.fallback_max_price.is_finite() || self.fallback_max_price <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "fallback_max_price must be a positive number, got {}",
                self.fallback_max_price
            )));
        }
        Ok(())
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            catalog_path:       "/catalog".to_string(),
            service_path:       "/services".to_string(),
            fallback_max_price: crate::implementation::filter_engine::FALLBACK_MAX_PRICE,
            visibility:         VisibilityPolicy::default(),
        }
    }
}
