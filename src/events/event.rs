//! Event catalogue carried by the bus.
//!
//! Three families share one enum so a single bus can route them:
//!
//! - **Change notifications**, published by [`AppState`](crate::app::AppState)
//!   after a mutation. Payloads are snapshots so subscribers never need to
//!   reach back into state.
//! - **Intents**, published by the presentation layer when the user acts.
//! - **API responses**, published by the session once a queued request to the
//!   market API has finished.

use crate::api::ApiResponse;
use crate::app::modes::CheckoutStep;
use crate::domain::{ContactField, DeliveryField, Item, ItemId, OrderConfirmation};
use crate::validation::{ContactErrors, DeliveryErrors, FormState};

/// Basket contents together with the derived figures the UI shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasketSnapshot {
    pub items: Vec<Item>,
    pub total: u64,
    pub count: usize,
}

/// Everything that travels over the [`EventBus`](super::EventBus).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    CatalogChanged { items: Vec<Item> },
    PreviewChanged { item: Item, in_basket: bool },
    BasketChanged(BasketSnapshot),
    DeliveryFormChanged(FormState<DeliveryErrors>),
    ContactFormChanged(FormState<ContactErrors>),
    StepChanged { step: CheckoutStep },
    OrderCompleted { confirmation: OrderConfirmation },
    OrderFailed { message: String },

    /// Ask the session to (re)load the catalog from the market API.
    CatalogRequested,
    CardSelected { id: ItemId },
    /// Preview button: add when absent, remove when present.
    ItemToggled { id: ItemId },
    ItemAdded { id: ItemId },
    ItemRemoved { id: ItemId },
    BasketOpened,
    /// Basket "checkout" button; restarts the order draft.
    CheckoutStarted,
    DeliveryFieldEdited { field: DeliveryField, value: String },
    DeliverySubmitted,
    ContactFieldEdited { field: ContactField, value: String },
    ContactsSubmitted,
    ModalClosed,

    Api(ApiResponse),
}

/// Payload-free discriminant of [`Event`], used as an exact subscription key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    CatalogChanged,
    PreviewChanged,
    BasketChanged,
    DeliveryFormChanged,
    ContactFormChanged,
    StepChanged,
    OrderCompleted,
    OrderFailed,
    CatalogRequested,
    CardSelected,
    ItemToggled,
    ItemAdded,
    ItemRemoved,
    BasketOpened,
    CheckoutStarted,
    DeliveryFieldEdited,
    DeliverySubmitted,
    ContactFieldEdited,
    ContactsSubmitted,
    ModalClosed,
    Api,
}

impl EventKind {
    /// Notifications the presentation layer renders from.
    pub const CHANGES: [Self; 8] = [
        Self::CatalogChanged,
        Self::PreviewChanged,
        Self::BasketChanged,
        Self::DeliveryFormChanged,
        Self::ContactFormChanged,
        Self::StepChanged,
        Self::OrderCompleted,
        Self::OrderFailed,
    ];

    /// Intents with no field parameter. Field edits are routed through the
    /// wildcard topics instead.
    pub const COMMANDS: [Self; 10] = [
        Self::CatalogRequested,
        Self::CardSelected,
        Self::ItemToggled,
        Self::ItemAdded,
        Self::ItemRemoved,
        Self::BasketOpened,
        Self::CheckoutStarted,
        Self::DeliverySubmitted,
        Self::ContactsSubmitted,
        Self::ModalClosed,
    ];
}

impl Event {
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::CatalogChanged { .. } => EventKind::CatalogChanged,
            Self::PreviewChanged { .. } => EventKind::PreviewChanged,
            Self::BasketChanged(_) => EventKind::BasketChanged,
            Self::DeliveryFormChanged(_) => EventKind::DeliveryFormChanged,
            Self::ContactFormChanged(_) => EventKind::ContactFormChanged,
            Self::StepChanged { .. } => EventKind::StepChanged,
            Self::OrderCompleted { .. } => EventKind::OrderCompleted,
            Self::OrderFailed { .. } => EventKind::OrderFailed,
            Self::CatalogRequested => EventKind::CatalogRequested,
            Self::CardSelected { .. } => EventKind::CardSelected,
            Self::ItemToggled { .. } => EventKind::ItemToggled,
            Self::ItemAdded { .. } => EventKind::ItemAdded,
            Self::ItemRemoved { .. } => EventKind::ItemRemoved,
            Self::BasketOpened => EventKind::BasketOpened,
            Self::CheckoutStarted => EventKind::CheckoutStarted,
            Self::DeliveryFieldEdited { .. } => EventKind::DeliveryFieldEdited,
            Self::DeliverySubmitted => EventKind::DeliverySubmitted,
            Self::ContactFieldEdited { .. } => EventKind::ContactFieldEdited,
            Self::ContactsSubmitted => EventKind::ContactsSubmitted,
            Self::ModalClosed => EventKind::ModalClosed,
            Self::Api(_) => EventKind::Api,
        }
    }

    /// Stable topic name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CatalogChanged { .. } => "catalog:changed",
            Self::PreviewChanged { .. } => "preview:changed",
            Self::BasketChanged(_) => "basket:changed",
            Self::DeliveryFormChanged(_) => "delivery-form:changed",
            Self::ContactFormChanged(_) => "contact-form:changed",
            Self::StepChanged { .. } => "step:changed",
            Self::OrderCompleted { .. } => "order:completed",
            Self::OrderFailed { .. } => "order:failed",
            Self::CatalogRequested => "catalog:requested",
            Self::CardSelected { .. } => "card:select",
            Self::ItemToggled { .. } => "item:check",
            Self::ItemAdded { .. } => "item:add",
            Self::ItemRemoved { .. } => "item:delete",
            Self::BasketOpened => "basket:open",
            Self::CheckoutStarted => "order:open",
            Self::DeliveryFieldEdited { field: DeliveryField::Address, .. } => "order.address:change",
            Self::DeliveryFieldEdited { field: DeliveryField::Payment, .. } => "order.payment:change",
            Self::DeliverySubmitted => "order:submit",
            Self::ContactFieldEdited { field: ContactField::Email, .. } => "contacts.email:change",
            Self::ContactFieldEdited { field: ContactField::Phone, .. } => "contacts.phone:change",
            Self::ContactsSubmitted => "contacts:submit",
            Self::ModalClosed => "modal:close",
            Self::Api(_) => "api:response",
        }
    }
}
