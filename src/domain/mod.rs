//! Domain layer for the storefront.
//!
//! Core types with no knowledge of the event bus, transport, or presentation.
//!
//! # Organization
//!
//! - [`error`]: Error type and result alias
//! - [`item`]: Catalog items and price formatting
//! - [`order`]: Order draft, form fields, submission payload and confirmation
//!
//! # Examples
//!
//! ```
//! use storefront::domain::{Item, OrderDraft, DeliveryField};
//!
//! let item = Item::new("c101", "Pocket sun", Some(1450));
//! let mut draft = OrderDraft::default();
//! draft.set_delivery(DeliveryField::Address, "Main St 1");
//! assert_eq!(item.billable_price(), 1450);
//! ```

pub mod error;
pub mod item;
pub mod order;

pub use error::{Result, StorefrontError};
pub use item::{format_price, Item, ItemId};
pub use order::{
    ContactField, DeliveryField, FormKind, OrderConfirmation, OrderDraft, OrderSnapshot,
    PaymentMethod,
};
