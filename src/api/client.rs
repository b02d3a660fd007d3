//! Market API abstraction.
//!
//! [`MarketApi`] is the seam between the session and the backend. The session
//! calls it only while executing queued [`Action`](crate::app::Action)s and
//! turns each outcome into an [`ApiResponse`] event, so application state never
//! sees a transport error directly.

use crate::domain::{Item, OrderConfirmation, OrderSnapshot, Result, StorefrontError};

/// Operations the storefront needs from a backend.
///
/// # Implementations
///
/// - [`HttpMarket`](super::HttpMarket): JSON over HTTP
/// - [`JsonMarket`](super::JsonMarket): local catalog file and order log
///
/// # Examples
///
/// ```
/// use storefront::api::MarketApi;
/// use storefront::domain::{Item, OrderConfirmation, OrderSnapshot, Result};
///
/// struct Fixed;
///
/// impl MarketApi for Fixed {
///     fn fetch_catalog(&self) -> Result<Vec<Item>> {
///         Ok(vec![Item::new("a", "Widget", Some(100))])
///     }
///
///     fn submit_order(&mut self, order: &OrderSnapshot) -> Result<OrderConfirmation> {
///         Ok(OrderConfirmation { id: "1".into(), total: order.total })
///     }
/// }
///
/// assert_eq!(Fixed.fetch_catalog().unwrap().len(), 1);
/// ```
pub trait MarketApi {
    /// Loads the full catalog. Image paths are already absolute.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached or answers with an
    /// error status or a malformed body.
    fn fetch_catalog(&self) -> Result<Vec<Item>>;

    /// Places an order.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Api`](crate::domain::StorefrontError::Api)
    /// when the backend rejects the order, or a transport error.
    fn submit_order(&mut self, order: &OrderSnapshot) -> Result<OrderConfirmation>;
}

/// Outcome of an executed action, published as
/// [`Event::Api`](crate::events::Event::Api).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResponse {
    CatalogLoaded { items: Vec<Item> },
    CatalogFailed { message: String },
    OrderAccepted { confirmation: OrderConfirmation },
    OrderRejected { message: String },
}

impl ApiResponse {
    /// Wraps a catalog fetch result.
    #[must_use]
    pub fn from_catalog(result: Result<Vec<Item>>) -> Self {
        match result {
            Ok(items) => Self::CatalogLoaded { items },
            Err(e) => Self::CatalogFailed {
                message: e.to_string(),
            },
        }
    }

    /// Wraps an order submission result. A backend rejection keeps only the
    /// backend's own message.
    #[must_use]
    pub fn from_order(result: Result<OrderConfirmation>) -> Self {
        match result {
            Ok(confirmation) => Self::OrderAccepted { confirmation },
            Err(StorefrontError::Api { message, .. }) => Self::OrderRejected { message },
            Err(e) => Self::OrderRejected {
                message: e.to_string(),
            },
        }
    }
}
