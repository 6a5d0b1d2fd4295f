//! # CLI Configuration
//!
//! Store settings and the product catalog the menu starts with.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SHELF_STORE_NAME="Corner Shop"                                     │
//! │     SHELF_ORDER_POLICY=all_or_nothing                                  │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <PATH>, else $SHELF_CONFIG, else                          │
//! │     ~/.config/shelf/shelf.toml (Linux)                                 │
//! │     ~/Library/Application Support/com.shelf.shelf/shelf.toml (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     The demo electronics store                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! name = "Best Buy"
//! order_policy = "best_effort"   # best_effort | all_or_nothing
//!
//! [[promotions]]
//! type = "percent_discount"      # percent_discount | second_half_price | third_one_free
//! name = "30% off!"
//! percent = 30.0
//!
//! [[products]]
//! kind = "stocked"               # stocked | non_stocked | limited
//! name = "MacBook Air M2"
//! price_cents = 145000
//! quantity = 100
//! promotion = "30% off!"         # optional, by promotion name
//!
//! [[products]]
//! kind = "limited"
//! name = "Shipping"
//! price_cents = 1000
//! quantity = 250
//! maximum = 1
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use shelf_core::OrderPolicy;

use crate::error::{CliError, CliResult};

/// Environment variable naming a config file.
pub const CONFIG_PATH_ENV: &str = "SHELF_CONFIG";

// =============================================================================
// Store Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Shown in the menu banner.
    #[serde(default = "default_store_name")]
    pub name: String,

    /// What a failing order does to the lines before it.
    #[serde(default)]
    pub order_policy: OrderPolicy,
}

fn default_store_name() -> String {
    "Best Buy".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
            order_policy: OrderPolicy::default(),
        }
    }
}

// =============================================================================
// Catalog Entries
// =============================================================================

/// A promotion definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PromotionConfig {
    PercentDiscount { name: String, percent: f64 },
    SecondHalfPrice { name: String },
    ThirdOneFree { name: String },
}

impl PromotionConfig {
    pub fn name(&self) -> &str {
        match self {
            PromotionConfig::PercentDiscount { name, .. }
            | PromotionConfig::SecondHalfPrice { name }
            | PromotionConfig::ThirdOneFree { name } => name,
        }
    }
}

/// A product definition. Prices are in cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProductConfig {
    Stocked {
        name: String,
        price_cents: i64,
        quantity: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        promotion: Option<String>,
    },
    NonStocked {
        name: String,
        price_cents: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        promotion: Option<String>,
    },
    Limited {
        name: String,
        price_cents: i64,
        quantity: i64,
        maximum: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        promotion: Option<String>,
    },
}

impl ProductConfig {
    pub fn name(&self) -> &str {
        match self {
            ProductConfig::Stocked { name, .. }
            | ProductConfig::NonStocked { name, .. }
            | ProductConfig::Limited { name, .. } => name,
        }
    }

    /// Name of the promotion this product refers to, if any.
    pub fn promotion(&self) -> Option<&str> {
        match self {
            ProductConfig::Stocked { promotion, .. }
            | ProductConfig::NonStocked { promotion, .. }
            | ProductConfig::Limited { promotion, .. } => promotion.as_deref(),
        }
    }
}

// =============================================================================
// App Config
// =============================================================================

/// Complete CLI configuration. Sections missing from the file fall back to
/// the demo store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreSettings,
    pub promotions: Vec<PromotionConfig>,
    pub products: Vec<ProductConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let promotions = vec![
            PromotionConfig::SecondHalfPrice {
                name: "Second Half price!".to_string(),
            },
            PromotionConfig::ThirdOneFree {
                name: "Third One Free!".to_string(),
            },
            PromotionConfig::PercentDiscount {
                name: "30% off!".to_string(),
                percent: 30.0,
            },
        ];

        let products = vec![
            ProductConfig::Stocked {
                name: "MacBook Air M2".to_string(),
                price_cents: 145_000,
                quantity: 100,
                promotion: Some("Second Half price!".to_string()),
            },
            ProductConfig::Stocked {
                name: "Bose QuietComfort Earbuds".to_string(),
                price_cents: 25_000,
                quantity: 500,
                promotion: Some("Third One Free!".to_string()),
            },
            ProductConfig::Stocked {
                name: "Google Pixel 7".to_string(),
                price_cents: 50_000,
                quantity: 250,
                promotion: None,
            },
            ProductConfig::NonStocked {
                name: "Windows License".to_string(),
                price_cents: 12_500,
                promotion: Some("30% off!".to_string()),
            },
            ProductConfig::Limited {
                name: "Shipping".to_string(),
                price_cents: 1_000,
                quantity: 250,
                maximum: 1,
                promotion: None,
            },
        ];

        AppConfig {
            store: StoreSettings::default(),
            promotions,
            products,
        }
    }
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file
    /// 3. Environment variables
    ///
    /// An explicitly named file (argument or `SHELF_CONFIG`) must exist; the
    /// platform default location is optional.
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let explicit = config_path.or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Reads and parses one config file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> CliResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn to_toml_string(&self) -> CliResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validates cross-references. Field-level rules (blank names, prices,
    /// quantities) are enforced by shelf-core when the catalog is built.
    pub fn validate(&self) -> CliResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(CliError::InvalidConfig("store name is empty".into()));
        }

        let mut promotion_names = HashSet::new();
        for promotion in &self.promotions {
            if !promotion_names.insert(promotion.name()) {
                return Err(CliError::InvalidConfig(format!(
                    "duplicate promotion name: '{}'",
                    promotion.name()
                )));
            }
        }

        for product in &self.products {
            if let Some(wanted) = product.promotion() {
                if !promotion_names.contains(wanted) {
                    return Err(CliError::InvalidConfig(format!(
                        "product '{}' refers to unknown promotion '{}'",
                        product.name(),
                        wanted
                    )));
                }
            }
        }

        Ok(())
    }

    /// Applies `SHELF_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("SHELF_STORE_NAME") {
            debug!(store_name = %name, "Overriding store name from environment");
            self.store.name = name;
        }

        if let Some(policy) = lookup("SHELF_ORDER_POLICY") {
            match policy.parse() {
                Ok(parsed) => {
                    debug!(policy = %policy, "Overriding order policy from environment");
                    self.store.order_policy = parsed;
                }
                Err(err) => warn!(policy = %policy, error = %err, "Ignoring unknown order policy"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "shelf", "shelf")
            .map(|dirs| dirs.config_dir().join("shelf.toml"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.products.len(), 5);
        assert_eq!(config.promotions.len(), 3);
        assert_eq!(config.store.order_policy, OrderPolicy::BestEffort);
    }

    #[test]
    fn test_parse_full_file() {
        let config = AppConfig::from_toml_str(
            r#"
            [store]
            name = "Corner Shop"
            order_policy = "all_or_nothing"

            [[promotions]]
            type = "percent_discount"
            name = "Spring"
            percent = 15.5

            [[products]]
            kind = "stocked"
            name = "Kettle"
            price_cents = 2999
            quantity = 12
            promotion = "Spring"

            [[products]]
            kind = "limited"
            name = "Gift Wrap"
            price_cents = 200
            quantity = 50
            maximum = 2

            [[products]]
            kind = "non_stocked"
            name = "Warranty"
            price_cents = 999
            "#,
        )
        .unwrap();

        assert_eq!(config.store.name, "Corner Shop");
        assert_eq!(config.store.order_policy, OrderPolicy::AllOrNothing);
        assert_eq!(
            config.promotions,
            vec![PromotionConfig::PercentDiscount {
                name: "Spring".to_string(),
                percent: 15.5
            }]
        );
        assert_eq!(config.products.len(), 3);
        assert_eq!(config.products[0].promotion(), Some("Spring"));
        assert!(matches!(
            config.products[1],
            ProductConfig::Limited { maximum: 2, .. }
        ));
        assert_eq!(config.products[2].name(), "Warranty");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = AppConfig::from_toml_str("[store]\nname = \"Tiny\"\n").unwrap();
        assert_eq!(config.store.name, "Tiny");
        assert_eq!(config.products, AppConfig::default().products);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AppConfig::default();
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("[store]"));
        assert!(text.contains("[[products]]"));
        assert_eq!(AppConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_unknown_kind_is_parse_error() {
        let result = AppConfig::from_toml_str(
            "[[products]]\nkind = \"rented\"\nname = \"x\"\nprice_cents = 1\n",
        );
        assert!(matches!(result, Err(CliError::ConfigParse(_))));
    }

    #[test]
    fn test_validate_rejects_unknown_promotion() {
        let mut config = AppConfig::default();
        config.promotions.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("unknown promotion 'Second Half price!'"));
    }

    #[test]
    fn test_validate_rejects_duplicate_promotion() {
        let mut config = AppConfig::default();
        config.promotions.push(PromotionConfig::ThirdOneFree {
            name: "30% off!".to_string(),
        });
        assert!(matches!(config.validate(), Err(CliError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_blank_store_name() {
        let mut config = AppConfig::default();
        config.store.name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SHELF_STORE_NAME", "Night Market"),
            ("SHELF_ORDER_POLICY", "atomic"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.store.name, "Night Market");
        assert_eq!(config.store.order_policy, OrderPolicy::AllOrNothing);
    }

    #[test]
    fn test_bad_policy_override_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(|key| (key == "SHELF_ORDER_POLICY").then(|| "never".to_string()));
        assert_eq!(config.store.order_policy, OrderPolicy::BestEffort);
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let path = std::env::temp_dir().join("shelf-config-that-does-not-exist.toml");
        assert!(matches!(AppConfig::load(Some(path)), Err(CliError::Io(_))));
    }

    #[test]
    fn test_load_explicit_file() {
        let path = std::env::temp_dir().join(format!("shelf-config-{}.toml", std::process::id()));
        std::fs::write(&path, "products = []\n\n[store]\nname = \"From File\"\n").unwrap();

        let result = AppConfig::from_file(&path);
        std::fs::remove_file(&path).unwrap();

        let config = result.unwrap();
        assert_eq!(config.store.name, "From File");
        assert!(config.products.is_empty());
    }
}
