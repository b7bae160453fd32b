//! Implementation details for the storefront catalog

pub mod cart_store;
pub mod catalog_snapshot;
pub mod catalog_state;
pub mod filter_engine;
pub mod query_codec;

use std::sync::{Arc, Mutex};

use tracing::info;

use crate::{
    errors::ConfigError,
    types::{CatalogConfig, VisibilityPolicy},
};

/// Shared, runtime-adjustable catalog configuration.
///
/// Settings are exchanged as string key/value pairs so an admin panel or an
/// environment loader can drive them without knowing the config type.
#[derive(Debug, Clone)]
pub struct CatalogSettings {
    config: Arc<Mutex<CatalogConfig>>,
}

impl CatalogSettings {
    /// Settings holding the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(CatalogConfig::default())
    }

    #[must_use]
    pub fn from_config(config: CatalogConfig) -> Self {
        Self { config: Arc::new(Mutex::new(config)) }
    }

    /// Snapshot of the current configuration.
    #[must_use]
    pub fn config(&self) -> CatalogConfig {
        self.config.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn set_config(&self, config: CatalogConfig) {
        if let Ok(mut guard) = self.config.lock() {
            *guard = config;
        }
    }

    /// Applies one setting. The configuration is left untouched on error.
    ///
    /// # Errors
    /// Returns `UnknownKey`, `InvalidValue`, or `Validation` if the result
    /// would be inconsistent.
    pub fn on_config_changed(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut config = self.config();
        match key {
            "catalog_path" => config.catalog_path = value.to_string(),
            "service_path" => config.service_path = value.to_string(),
            "fallback_max_price" => {
                config.fallback_max_price = value.parse().map_err(|_| invalid(key, value))?;
            },
            "required_tag" => {
                let tag = value.trim();
                config.visibility.required_tag = (!tag.is_empty()).then(|| tag.to_string());
            },
            "hidden_tags" => {
                config.visibility.hidden_tags = value
                    .split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect();
            },
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        config.validate()?;
        self.set_config(config);
        info!(key, value, "catalog_setting_changed");
        Ok(())
    }

    /// Applies settings in order, stopping at the first failure.
    ///
    /// # Errors
    /// Returns the first failing setting's error.
    pub fn apply_config(&self, config: &[(String, String)]) -> Result<(), ConfigError> {
        for (key, value) in config {
            self.on_config_changed(key, value)?;
        }
        Ok(())
    }

    /// Current settings as key/value pairs.
    #[must_use]
    pub fn get_current_config(&self) -> Vec<(String, String)> {
        let config = self.config();
        let VisibilityPolicy { required_tag, hidden_tags } = config.visibility;
        vec![
            ("catalog_path".to_string(), config.catalog_path),
            ("service_path".to_string(), config.service_path),
            (
                "fallback_max_price".to_string(),
                config.fallback_max_price.to_string(),
            ),
            ("required_tag".to_string(), required_tag.unwrap_or_default()),
            ("hidden_tags".to_string(), hidden_tags.join(",")),
        ]
    }

    pub fn reset_to_defaults(&self) {
        self.set_config(CatalogConfig::default());
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self::new()
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue { key: key.to_string(), value: value.to_string() }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let settings = CatalogSettings::new();
        let config = settings.config();
        assert_eq!(config.catalog_path, "/catalog");
        assert_eq!(config.visibility.required_tag.as_deref(), Some("scope:global"));
    }

    #[test]
    fn test_on_config_changed() {
        let settings = CatalogSettings::new();
        settings.on_config_changed("catalog_path", "/tienda").expect("path");
        settings.on_config_changed("fallback_max_price", "250").expect("price");
        settings.on_config_changed("required_tag", "").expect("tag");
        settings.on_config_changed("hidden_tags", " draft , ,archived").expect("hidden");

        let config = settings.config();
        assert_eq!(config.catalog_path, "/tienda");
        assert_eq!(config.fallback_max_price, 250.0);
        assert_eq!(config.visibility, VisibilityPolicy {
            required_tag: None,
            hidden_tags:  vec!["draft".to_string(), "archived".to_string()],
        });
    }

    #[test]
    fn test_rejected_changes_leave_config_untouched() {
        let settings = CatalogSettings::new();
        assert_eq!(
            settings.on_config_changed("currency", "EUR"),
            Err(ConfigError::UnknownKey("currency".to_string()))
        );
        assert!(matches!(
            settings.on_config_changed("fallback_max_price", "lots"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            settings.on_config_changed("fallback_max_price", "-5"),
            Err(ConfigError::Validation(_))
        ));
        assert!(matches!(
            settings.on_config_changed("catalog_path", "catalog"),
            Err(ConfigError::Validation(_))
        ));
        assert_eq!(settings.config(), CatalogConfig::default());
    }

    #[test]
    fn test_round_trip_and_reset() {
        let settings = CatalogSettings::new();
        settings
            .apply_config(&[
                ("service_path".to_string(), "/servicios".to_string()),
                ("hidden_tags".to_string(), "oculto".to_string()),
            ])
            .expect("apply");

        let pairs = settings.get_current_config();
        let restored = CatalogSettings::new();
        restored.apply_config(&pairs).expect("apply");
        assert_eq!(restored.config(), settings.config());

        settings.reset_to_defaults();
        assert_eq!(settings.config(), CatalogConfig::default());
    }

    #[test]
    fn test_config_from_json() {
        let config = CatalogConfig::from_json_str(r#"{"catalog_path": "/shop"}"#).expect("json");
        assert_eq!(config.catalog_path, "/shop");
        assert_eq!(config.service_path, "/services");

        assert!(CatalogConfig::from_json_str(r#"{"fallback_max_price": 0}"#).is_err());
        assert!(CatalogConfig::from_json_str("{").is_err());
    }
}
