//! Storefront: the application core of a small online shop.
//!
//! The crate provides:
//! - A catalog with item preview and a basket that never holds duplicates
//! - A two-step checkout (delivery, then contacts) with live validation
//! - A synchronous event bus connecting state changes to a presentation layer
//! - Market API clients over HTTP and over local JSON files
//! - A terminal front end driving all of the above from typed commands

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal binary (main.rs)                          │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │ intents
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Storefront session, intent handler               │
//! │  - AppState mutations + change notifications        │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Events        │   │ Validation    │   │ API           │
//! │ (events/)     │   │ (validation/) │   │ (api/)        │
//! │ - Event bus   │   │ - Field rules │   │ - HTTP market │
//! │ - Topics      │   │ - Form states │   │ - JSON market │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │
//! ┌─────────────────────────────────────────────────────┐
//! │  UI Layer (ui/): view models, text renderer, input  │
//! └─────────────────────────────────────────────────────┘
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/), paths (infrastructure/),         │
//! │  logging and OTLP export (observability/)           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`api`]: [`MarketApi`](api::MarketApi) and its HTTP and file implementations
//! - [`app`]: application state, intent handler and the [`Storefront`] session
//! - [`domain`]: items, order draft and the crate error type
//! - [`events`]: event catalogue and the publish/subscribe bus
//! - [`infrastructure`]: data directory resolution
//! - [`observability`]: `tracing` subscriber and OpenTelemetry file export
//! - [`ui`]: view models, the text renderer and command parsing
//! - [`validation`]: field rules and per-form validation state
//!
//! # Configuration
//!
//! Settings come from a TOML file, a flat key/value map, or both:
//!
//! ```toml
//! api_url = "http://localhost:3000/api/weblarek"
//! cdn_url = "http://localhost:3000/content/weblarek"
//! # Use a local catalog and order log instead of the HTTP backend:
//! # catalog_file = "fixtures/catalog.json"
//! trace_level = "debug"
//! trace_export = true
//! request_timeout_secs = 10
//! ```
//!
//! # Example
//!
//! ```
//! use storefront::api::MarketApi;
//! use storefront::app::{CheckoutStep, Storefront};
//! use storefront::domain::{DeliveryField, Item, OrderConfirmation, OrderSnapshot, Result};
//! use storefront::events::Event;
//!
//! struct Shelf;
//! impl MarketApi for Shelf {
//!     fn fetch_catalog(&self) -> Result<Vec<Item>> {
//!         Ok(vec![Item::new("a", "Widget", Some(100))])
//!     }
//!     fn submit_order(&mut self, order: &OrderSnapshot) -> Result<OrderConfirmation> {
//!         Ok(OrderConfirmation { id: "1".into(), total: order.total })
//!     }
//! }
//!
//! let mut shop = Storefront::new(Box::new(Shelf));
//! shop.start();
//! shop.dispatch(&Event::ItemAdded { id: "a".into() });
//! shop.dispatch(&Event::CheckoutStarted);
//! shop.dispatch(&Event::DeliveryFieldEdited { field: DeliveryField::Address, value: "Main St 1".into() });
//! assert_eq!(shop.state().step(), CheckoutStep::Delivery);
//! assert_eq!(shop.state().basket_total(), 100);
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod events;
pub mod infrastructure;
pub mod observability;
pub mod ui;
pub mod validation;

pub use app::{handle_event, Action, AppState, CheckoutStep, Storefront};
pub use domain::{Result, StorefrontError};
pub use events::{Event, EventBus};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use api::{HttpMarket, JsonMarket, MarketApi};

const DEFAULT_API_URL: &str = "http://localhost:3000/api/weblarek";
const DEFAULT_CDN_URL: &str = "http://localhost:3000/content/weblarek";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Runtime configuration.
///
/// Every key is optional; missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the backend API. Default: `http://localhost:3000/api/weblarek`
    pub api_url: String,

    /// Base URL item image paths are resolved against.
    pub cdn_url: String,

    /// Local catalog JSON. When set, the file-backed market is used instead
    /// of HTTP.
    pub catalog_file: Option<String>,

    /// Order log of the file-backed market. Default: `orders.json` in the
    /// data directory.
    pub orders_file: Option<String>,

    /// Overrides the data directory.
    pub data_dir: Option<String>,

    /// `EnvFilter` directive used when `RUST_LOG` is unset. Default: `"info"`
    pub trace_level: Option<String>,

    /// Export spans as OTLP JSON into the data directory.
    pub trace_export: bool,

    /// Connect and request timeout for the HTTP market.
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            cdn_url: DEFAULT_CDN_URL.to_string(),
            catalog_file: None,
            orders_file: None,
            data_dir: None,
            trace_level: None,
            trace_export: false,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Parses configuration from a flat key/value map.
    ///
    /// Unknown keys are ignored and unparsable numbers or flags fall back to
    /// their defaults, so a partial map always yields a usable config.
    ///
    /// # Parsing Rules
    ///
    /// - `trace_export`: `true`, `1`, `yes` or `on` enable it
    /// - `request_timeout_secs`: positive integer, else 10
    /// - empty strings count as unset
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use storefront::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("catalog_file".to_string(), "fixtures/catalog.json".to_string());
    /// map.insert("request_timeout_secs".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.catalog_file.as_deref(), Some("fixtures/catalog.json"));
    /// assert_eq!(config.request_timeout_secs, 10);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let text = |key: &str| {
            map.get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        Self {
            api_url: text("api_url").unwrap_or(defaults.api_url),
            cdn_url: text("cdn_url").unwrap_or(defaults.cdn_url),
            catalog_file: text("catalog_file"),
            orders_file: text("orders_file"),
            data_dir: text("data_dir"),
            trace_level: text("trace_level"),
            trace_export: text("trace_export").is_some_and(|v| {
                matches!(v.to_ascii_lowercase().as_str(), "true" | "1" | "yes" | "on")
            }),
            request_timeout_secs: text("request_timeout_secs")
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.request_timeout_secs),
        }
    }

    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Config`] for malformed TOML, a wrongly typed
    /// value, or a zero timeout.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| StorefrontError::Config(format!("invalid config: {e}")))?;
        if config.request_timeout_secs == 0 {
            return Err(StorefrontError::Config(
                "request_timeout_secs must be positive".to_string(),
            ));
        }
        Ok(config)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            StorefrontError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }
}

/// Builds a session for `config`.
///
/// Uses [`JsonMarket`] when `catalog_file` is set and [`HttpMarket`]
/// otherwise. The catalog is not requested yet; call
/// [`Storefront::start`] after attaching the presentation.
///
/// # Errors
///
/// Returns an error if the market cannot be constructed (bad URL, unreadable
/// order log, unwritable data directory).
pub fn initialize(config: &Config) -> Result<Storefront> {
    let market: Box<dyn MarketApi> = match &config.catalog_file {
        Some(catalog) => {
            let orders = infrastructure::orders_file(config);
            tracing::debug!(catalog = %catalog, orders = %orders.display(), "using file-backed market");
            Box::new(JsonMarket::new(
                PathBuf::from(infrastructure::expand_tilde(
                    catalog,
                    std::env::var("HOME").ok().as_deref(),
                )),
                orders,
                config.cdn_url.clone(),
            )?)
        }
        None => {
            tracing::debug!(api_url = %config.api_url, "using HTTP market");
            Box::new(HttpMarket::from_config(config)?)
        }
    };

    Ok(Storefront::new(market))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_fills_missing_keys_with_defaults() {
        let config = Config::from_toml_str("trace_export = true\ncatalog_file = \"c.json\"").unwrap();
        assert!(config.trace_export);
        assert_eq!(config.catalog_file.as_deref(), Some("c.json"));
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn toml_type_errors_are_config_errors() {
        assert!(matches!(
            Config::from_toml_str("request_timeout_secs = \"ten\""),
            Err(StorefrontError::Config(_))
        ));
        assert!(matches!(
            Config::from_toml_str("request_timeout_secs = 0"),
            Err(StorefrontError::Config(_))
        ));
    }

    #[test]
    fn map_flags_and_blanks() {
        let map: BTreeMap<String, String> = [
            ("trace_export", "Yes"),
            ("api_url", "  "),
            ("trace_level", "debug"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = Config::from_map(&map);
        assert!(config.trace_export);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn initialize_with_local_catalog() {
        let dir = tempfile::TempDir::new().unwrap();
        let catalog = dir.path().join("catalog.json");
        std::fs::write(&catalog, r#"{"total":0,"items":[]}"#).unwrap();

        let config = Config {
            catalog_file: Some(catalog.display().to_string()),
            data_dir: Some(dir.path().display().to_string()),
            ..Config::default()
        };
        let mut shop = initialize(&config).unwrap();
        shop.start();
        assert!(shop.state().catalog().is_empty());
    }
}
