//! # Store Configuration
//!
//! Settings for the cart store: where the cart is persisted and how the order
//! summary is priced and printed.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BANANAZON_STORAGE_KEY=bananazon-cart                               │
//! │     BANANAZON_STORAGE_DIR=/tmp/carts                                   │
//! │     BANANAZON_SHIPPING_CENTS=599                                       │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/cart/store.toml (Linux)                                  │
//! │     ~/Library/Application Support/com.bananazon.cart/store.toml        │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! storage_key = "bananazon-cart"
//! storage_dir = "/var/lib/bananazon"
//! shipping_cents = 599
//! currency_symbol = "$"
//! currency_decimals = 2
//! ```

use std::path::PathBuf;

use bananazon_core::{Money, DEFAULT_SHIPPING, DEFAULT_STORAGE_KEY};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::storage::{validate_key, FileStorage};

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_shipping_cents() -> i64 {
    DEFAULT_SHIPPING.cents()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_currency_decimals() -> u8 {
    2
}

/// Cart store configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Key the cart envelope is stored under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Root directory for file storage. `None` uses the platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,

    /// Flat shipping charge in cents for a non-empty cart.
    #[serde(default = "default_shipping_cents")]
    pub shipping_cents: i64,

    /// Currency symbol (for display)
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Number of decimal places for currency
    #[serde(default = "default_currency_decimals")]
    pub currency_decimals: u8,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            storage_key: default_storage_key(),
            storage_dir: None,
            shipping_cents: default_shipping_cents(),
            currency_symbol: default_currency_symbol(),
            currency_decimals: default_currency_decimals(),
        }
    }
}

impl StoreConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (store.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading store config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load store config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> StoreResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(StoreError::NoStorageDir)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Store config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        validate_key(&self.storage_key)
            .map_err(|_| StoreError::InvalidConfig(format!(
                "storage_key '{}' may only contain letters, digits, '-', '_' and '.'",
                self.storage_key
            )))?;

        if self.shipping_cents < 0 {
            return Err(StoreError::InvalidConfig(
                "shipping_cents must not be negative".into(),
            ));
        }

        if self.currency_decimals > 4 {
            return Err(StoreError::InvalidConfig(
                "currency_decimals must be at most 4".into(),
            ));
        }

        Ok(())
    }

    /// Applies `BANANAZON_*` overrides using `lookup` to read variables.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup("BANANAZON_STORAGE_KEY") {
            debug!(storage_key = %key, "Overriding storage key from environment");
            self.storage_key = key;
        }

        if let Some(dir) = lookup("BANANAZON_STORAGE_DIR") {
            debug!(storage_dir = %dir, "Overriding storage dir from environment");
            self.storage_dir = Some(PathBuf::from(dir));
        }

        if let Some(cents) = lookup("BANANAZON_SHIPPING_CENTS") {
            match cents.parse::<i64>() {
                Ok(c) => self.shipping_cents = c,
                Err(_) => warn!(value = %cents, "Ignoring non-numeric BANANAZON_SHIPPING_CENTS"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "bananazon", "cart")
            .map(|dirs| dirs.config_dir().join("store.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Flat shipping charge.
    pub fn shipping(&self) -> Money {
        Money::from_cents(self.shipping_cents)
    }

    /// File storage rooted at `storage_dir`, or the platform data dir.
    pub fn file_storage(&self) -> StoreResult<FileStorage> {
        match &self.storage_dir {
            Some(dir) => Ok(FileStorage::new(dir.clone())),
            None => FileStorage::in_data_dir(),
        }
    }

    /// Formats an amount with the configured symbol and decimals.
    ///
    /// ## Example
    /// ```rust
    /// use bananazon_core::Money;
    /// use bananazon_store::StoreConfig;
    ///
    /// let config = StoreConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1697)), "$16.97");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let cents = amount.cents();
        // Amounts are held in hundredths; rescale for other precisions.
        let decimals = u32::from(self.currency_decimals);
        let scaled: i128 = if decimals >= 2 {
            i128::from(cents) * 10_i128.pow(decimals - 2)
        } else {
            i128::from(cents) / 10_i128.pow(2 - decimals)
        };

        let divisor = 10_i128.pow(decimals);
        let whole = (scaled / divisor).abs();
        let frac = (scaled % divisor).abs();
        let sign = if scaled < 0 { "-" } else { "" };

        if decimals > 0 {
            format!(
                "{}{}{}.{:0width$}",
                sign,
                self.currency_symbol,
                whole,
                frac,
                width = decimals as usize
            )
        } else {
            format!("{}{}{}", sign, self.currency_symbol, whole)
        }
    }
}
