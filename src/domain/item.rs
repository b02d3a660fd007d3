//! Catalog item domain model.
//!
//! Items are loaded once from the market API and never mutated afterwards.
//! A missing price marks the item as *priceless*: it is shown in the catalog
//! but can never be put into the basket.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque catalog identifier as issued by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Wraps a raw backend identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A product offered by the store.
///
/// `image` is an absolute URL by the time an item reaches application state;
/// the API client resolves backend-relative paths against the CDN base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: Option<u64>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: String,
}

impl Item {
    /// Creates a minimal item with empty description, category and image.
    ///
    /// # Examples
    ///
    /// ```
    /// use storefront::domain::Item;
    ///
    /// let item = Item::new("b7a3", "Mood booster", Some(750));
    /// assert!(item.is_orderable());
    /// assert!(!Item::new("0001", "Exhibit", None).is_orderable());
    /// ```
    pub fn new(id: impl Into<String>, title: impl Into<String>, price: Option<u64>) -> Self {
        Self {
            id: ItemId::new(id),
            title: title.into(),
            description: String::new(),
            price,
            category: String::new(),
            image: String::new(),
        }
    }

    /// Whether the item can be put into the basket.
    #[must_use]
    pub const fn is_orderable(&self) -> bool {
        self.price.is_some()
    }

    /// Price used for totals; priceless items count as zero.
    #[must_use]
    pub fn billable_price(&self) -> u64 {
        self.price.unwrap_or(0)
    }
}

/// Formats an amount in the store currency.
#[must_use]
pub fn format_price(price: Option<u64>) -> String {
    price.map_or_else(|| "Priceless".to_string(), |amount| format!("{amount} synapses"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priceless_items_bill_as_zero() {
        let item = Item::new("x", "Exhibit", None);
        assert_eq!(item.billable_price(), 0);
        assert!(!item.is_orderable());
    }

    #[test]
    fn deserializes_null_price() {
        let json = r#"{"id":"854cef69","title":"HEX-leaf","description":"","price":null,"category":"other","image":"/Asterisk_2.svg"}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.id.as_str(), "854cef69");
        assert_eq!(item.price, None);
    }

    #[test]
    fn formats_prices() {
        assert_eq!(format_price(Some(2500)), "2500 synapses");
        assert_eq!(format_price(None), "Priceless");
    }
}
