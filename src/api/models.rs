//! Wire models shared by the market implementations.
//!
//! These mirror the backend's JSON bodies. They stay separate from the domain
//! types so the wire shape can change without touching application state.

use serde::{Deserialize, Serialize};

use crate::domain::{OrderSnapshot, OrderConfirmation};

/// Paged list envelope returned by `GET /product`.
///
/// The catalog file read by [`JsonMarket`](super::JsonMarket) has the same
/// shape, so a saved backend response can be used as a local catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiListResponse<T> {
    pub total: usize,
    pub items: Vec<T>,
}

impl<T> ApiListResponse<T> {
    #[must_use]
    pub fn new(items: Vec<T>) -> Self {
        Self {
            total: items.len(),
            items,
        }
    }
}

/// Error body the backend sends with non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

/// One accepted order as kept in the local order log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// UUID v4 assigned when the order was accepted.
    pub id: String,

    /// Unix timestamp of acceptance.
    pub placed_at: i64,

    pub order: OrderSnapshot,
}

impl OrderRecord {
    /// Records `order` under a fresh id, stamped with the current time.
    ///
    /// # Examples
    ///
    /// ```
    /// use storefront::api::OrderRecord;
    /// use storefront::domain::OrderSnapshot;
    ///
    /// let order = OrderSnapshot {
    ///     payment: None,
    ///     address: String::new(),
    ///     email: String::new(),
    ///     phone: String::new(),
    ///     items: vec![],
    ///     total: 0,
    /// };
    /// let record = OrderRecord::new(order);
    /// assert_eq!(record.id.len(), 36);
    /// ```
    #[must_use]
    pub fn new(order: OrderSnapshot) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            placed_at: chrono::Utc::now().timestamp(),
            order,
        }
    }

    #[must_use]
    pub fn confirmation(&self) -> OrderConfirmation {
        OrderConfirmation {
            id: self.id.clone(),
            total: self.order.total,
        }
    }
}

/// Resolves a backend image path against the CDN base URL.
///
/// Absolute URLs and empty paths are returned unchanged. Exactly one `/`
/// separates base and path.
///
/// # Examples
///
/// ```
/// use storefront::api::resolve_image;
///
/// assert_eq!(resolve_image("https://cdn.example/content", "/a.svg"), "https://cdn.example/content/a.svg");
/// assert_eq!(resolve_image("https://cdn.example/", "a.svg"), "https://cdn.example/a.svg");
/// assert_eq!(resolve_image("https://cdn.example", "https://other/b.png"), "https://other/b.png");
/// ```
#[must_use]
pub fn resolve_image(cdn_url: &str, path: &str) -> String {
    if path.is_empty() || path.starts_with("http://") || path.starts_with("https://") || cdn_url.is_empty() {
        return path.to_string();
    }
    format!(
        "{}/{}",
        cdn_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
