//! File-backed market.
//!
//! Reads the catalog from a JSON file shaped like the backend's `GET /product`
//! response and appends accepted orders to a local order log. The log is
//! written atomically (write-to-temp + rename) so a crash never leaves it
//! half-written.
//!
//! Orders are checked the way the backend checks them: every item must exist
//! and have a price, the total must match, and the contact fields must pass
//! the same rules as the checkout forms.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::client::MarketApi;
use super::models::{resolve_image, ApiListResponse, OrderRecord};
use crate::domain::{Item, ItemId, OrderConfirmation, OrderSnapshot, Result, StorefrontError};
use crate::validation::rules;

/// Status reported for orders the local market refuses.
const REJECTED: u16 = 400;

/// On-disk order log.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OrderLog {
    /// Format version for future migrations.
    version: u32,

    #[serde(default)]
    orders: Vec<OrderRecord>,
}

impl Default for OrderLog {
    fn default() -> Self {
        Self {
            version: 1,
            orders: Vec::new(),
        }
    }
}

/// [`MarketApi`] backed by local JSON files.
///
/// # File Format
///
/// Catalog:
///
/// ```json
/// { "total": 1, "items": [
///   { "id": "c101", "title": "Mood booster", "description": "", "price": 750,
///     "category": "soft", "image": "/5_Dots.svg" }
/// ] }
/// ```
///
/// Order log:
///
/// ```json
/// { "version": 1, "orders": [
///   { "id": "…uuid…", "placed_at": 1718000000, "order": { "payment": "online", "…": "…" } }
/// ] }
/// ```
pub struct JsonMarket {
    catalog_path: PathBuf,
    orders_path: PathBuf,
    cdn_url: String,
    log: OrderLog,

    /// Set when the log has changes not yet on disk.
    dirty: bool,
}

impl JsonMarket {
    /// Opens the market, loading an existing order log if there is one.
    ///
    /// The catalog file is read lazily by [`MarketApi::fetch_catalog`]. The
    /// order log's parent directory is created if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or an existing
    /// order log is not valid JSON.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use storefront::api::{JsonMarket, MarketApi};
    /// use std::path::PathBuf;
    ///
    /// let market = JsonMarket::new(
    ///     PathBuf::from("fixtures/catalog.json"),
    ///     PathBuf::from("/tmp/storefront/orders.json"),
    ///     "",
    /// )?;
    /// let items = market.fetch_catalog()?;
    /// # Ok::<(), storefront::domain::StorefrontError>(())
    /// ```
    pub fn new(catalog_path: PathBuf, orders_path: PathBuf, cdn_url: impl Into<String>) -> Result<Self> {
        tracing::debug!(catalog = ?catalog_path, orders = ?orders_path, "initializing JSON market");

        if let Some(parent) = orders_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let log = if orders_path.exists() {
            Self::load_log(&orders_path)?
        } else {
            OrderLog::default()
        };

        tracing::debug!(orders = log.orders.len(), "order log loaded");

        Ok(Self {
            catalog_path,
            orders_path,
            cdn_url: cdn_url.into(),
            log,
            dirty: false,
        })
    }

    /// Orders accepted so far, oldest first.
    #[must_use]
    pub fn orders(&self) -> &[OrderRecord] {
        &self.log.orders
    }

    fn load_log(path: &Path) -> Result<OrderLog> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents)
            .map_err(|e| StorefrontError::Storage(format!("failed to parse order log: {e}")))
    }

    fn load_catalog(&self) -> Result<Vec<Item>> {
        let contents = std::fs::read_to_string(&self.catalog_path).map_err(|e| {
            StorefrontError::Storage(format!(
                "failed to read catalog {}: {e}",
                self.catalog_path.display()
            ))
        })?;
        let list: ApiListResponse<Item> = serde_json::from_str(&contents)
            .map_err(|e| StorefrontError::Storage(format!("failed to parse catalog: {e}")))?;
        Ok(list.items)
    }

    fn save_log(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.log)
            .map_err(|e| StorefrontError::Storage(format!("failed to serialize order log: {e}")))?;

        let tmp_path = self.orders_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.orders_path)?;

        self.dirty = false;
        tracing::debug!(path = ?self.orders_path, "order log saved");
        Ok(())
    }

    /// Checks an order against the catalog. Returns the rejection reason.
    fn check_order(order: &OrderSnapshot, catalog: &[Item]) -> std::result::Result<(), String> {
        if order.items.is_empty() {
            return Err("Order has no items".to_string());
        }
        if order.payment.is_none() {
            return Err("Payment method is not set".to_string());
        }
        if !rules::is_valid_address(&order.address) {
            return Err("Invalid address".to_string());
        }
        if !rules::is_valid_email(&order.email) {
            return Err("Invalid email".to_string());
        }
        if !rules::is_valid_phone(&order.phone) {
            return Err("Invalid phone".to_string());
        }

        let prices: HashMap<&ItemId, Option<u64>> =
            catalog.iter().map(|item| (&item.id, item.price)).collect();

        let mut total = 0_u64;
        for id in &order.items {
            match prices.get(id) {
                None => return Err(format!("Item {id} not found")),
                Some(None) => return Err(format!("Item {id} is not for sale")),
                Some(Some(price)) => {
                    total = total
                        .checked_add(*price)
                        .ok_or_else(|| "Order total overflows".to_string())?;
                }
            }
        }

        if total != order.total {
            return Err(format!("Order total {} does not match {total}", order.total));
        }
        Ok(())
    }
}

impl MarketApi for JsonMarket {
    fn fetch_catalog(&self) -> Result<Vec<Item>> {
        let _span = tracing::debug_span!("json_fetch_catalog", path = ?self.catalog_path).entered();

        let items: Vec<Item> = self
            .load_catalog()?
            .into_iter()
            .map(|item| Item {
                image: resolve_image(&self.cdn_url, &item.image),
                ..item
            })
            .collect();

        tracing::debug!(count = items.len(), "catalog loaded");
        Ok(items)
    }

    fn submit_order(&mut self, order: &OrderSnapshot) -> Result<OrderConfirmation> {
        let _span = tracing::debug_span!("json_submit_order",
            items = order.items.len(),
            total = order.total
        ).entered();

        let catalog = self.load_catalog()?;
        if let Err(message) = Self::check_order(order, &catalog) {
            tracing::warn!(%message, "order rejected");
            return Err(StorefrontError::Api {
                status: REJECTED,
                message,
            });
        }

        let record = OrderRecord::new(order.clone());
        let confirmation = record.confirmation();
        self.log.orders.push(record);
        self.dirty = true;
        if let Err(e) = self.save_log() {
            self.log.orders.pop();
            self.dirty = false;
            tracing::error!(error = %e, "order log not saved, order dropped");
            return Err(e);
        }

        tracing::debug!(order_id = %confirmation.id, "order recorded");
        Ok(confirmation)
    }
}

impl Drop for JsonMarket {
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("saving dirty order log on drop");
            if let Err(e) = self.save_log() {
                tracing::error!(error = %e, "failed to save order log on drop");
            }
        }
    }
}
