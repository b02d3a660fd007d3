//! Application state and its change notifications.
//!
//! [`AppState`] is the single source of truth for one storefront session:
//! the catalog, the basket, the previewed item, the order draft with the
//! validation state of both checkout forms, the current checkout step and the
//! submission guard.
//!
//! # Notification contract
//!
//! Every mutating method follows the same order: check, mutate, then publish
//! one or more change events on the bus. The payload of each event is a
//! snapshot taken after the mutation, so subscribers see the new state without
//! borrowing `AppState` again. Read accessors never publish.
//!
//! # Example
//!
//! ```
//! use storefront::app::AppState;
//! use storefront::domain::Item;
//! use storefront::events::EventBus;
//!
//! let mut state = AppState::new(EventBus::new());
//! state.set_catalog(vec![Item::new("a", "Widget", Some(100))]);
//! let item = state.catalog()[0].clone();
//! state.add_to_cart(&item)?;
//! assert_eq!(state.basket_total(), 100);
//! # Ok::<(), storefront::domain::StorefrontError>(())
//! ```

use super::modes::CheckoutStep;
use crate::domain::{
    ContactField, DeliveryField, FormKind, Item, ItemId, OrderConfirmation, OrderDraft,
    OrderSnapshot, Result, StorefrontError,
};
use crate::events::{BasketSnapshot, Event, EventBus};
use crate::validation::{self, ContactErrors, DeliveryErrors, FormState};

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    bus: EventBus,

    /// Items as delivered by the market API, in backend order.
    catalog: Vec<Item>,

    /// Basket in insertion order. Never holds two items with the same id and
    /// never holds a priceless item.
    basket: Vec<Item>,

    /// Id of the item shown in the preview modal.
    preview: Option<ItemId>,

    order: OrderDraft,
    delivery: FormState<DeliveryErrors>,
    contacts: FormState<ContactErrors>,
    step: CheckoutStep,

    /// Set between `begin_submission` and `complete_order`/`fail_order`.
    submitting: bool,
}

impl AppState {
    /// Creates an empty state that publishes its changes on `bus`.
    ///
    /// Both forms start pristine and the step is
    /// [`Browsing`](CheckoutStep::Browsing). Nothing is published.
    #[must_use]
    pub fn new(bus: EventBus) -> Self {
        Self {
            bus,
            catalog: Vec::new(),
            basket: Vec::new(),
            preview: None,
            order: OrderDraft::default(),
            delivery: FormState::pristine(),
            contacts: FormState::pristine(),
            step: CheckoutStep::Browsing,
            submitting: false,
        }
    }

    /// Replaces the catalog and publishes `CatalogChanged`.
    ///
    /// Basket membership is kept as is; an item removed from the catalog stays
    /// in the basket until the user removes it.
    pub fn set_catalog(&mut self, items: Vec<Item>) {
        tracing::debug!(count = items.len(), "catalog replaced");
        self.catalog = items;
        self.bus.publish(&Event::CatalogChanged {
            items: self.catalog.clone(),
        });
    }

    /// Records `item` as the previewed item and publishes `PreviewChanged`.
    ///
    /// The item need not be in the catalog. Publishing again with the same item
    /// re-renders the preview, which is how the basket toggle refreshes its
    /// button label.
    pub fn set_preview(&mut self, item: &Item) {
        self.preview = Some(item.id.clone());
        self.bus.publish(&Event::PreviewChanged {
            item: item.clone(),
            in_basket: self.is_in_basket(&item.id),
        });
    }

    /// Appends `item` to the basket unless an item with the same id is already
    /// there, then publishes `BasketChanged`.
    ///
    /// # Returns
    ///
    /// `true` if the basket grew, `false` for a duplicate.
    ///
    /// # Errors
    ///
    /// [`StorefrontError::NotOrderable`] for a priceless item. Nothing is
    /// published in that case.
    pub fn add_to_cart(&mut self, item: &Item) -> Result<bool> {
        if !item.is_orderable() {
            tracing::warn!(item = %item.id, "priceless item rejected");
            return Err(StorefrontError::NotOrderable(item.id.clone()));
        }

        let added = !self.is_in_basket(&item.id);
        if added {
            self.basket.push(item.clone());
        }
        tracing::debug!(item = %item.id, added, count = self.basket.len(), "add to basket");
        self.publish_basket();
        Ok(added)
    }

    /// Removes the item with `id` and publishes `BasketChanged`.
    ///
    /// Removing an absent id changes nothing but still publishes. Returns
    /// whether an item was removed.
    pub fn remove_from_cart(&mut self, id: &ItemId) -> bool {
        let before = self.basket.len();
        self.basket.retain(|item| &item.id != id);
        let removed = before != self.basket.len();
        tracing::debug!(item = %id, removed, count = self.basket.len(), "remove from basket");
        self.publish_basket();
        removed
    }

    /// Empties the basket and publishes `BasketChanged`.
    pub fn clear_cart(&mut self) {
        self.basket.clear();
        self.publish_basket();
    }

    /// Writes one delivery field, re-validates the delivery form and publishes
    /// `DeliveryFormChanged`.
    ///
    /// For [`DeliveryField::Payment`] an unrecognised value clears the payment
    /// method.
    pub fn set_delivery_field(&mut self, field: DeliveryField, value: &str) {
        self.order.set_delivery(field, value);
        tracing::debug!(field = field.as_str(), "delivery field edited");
        self.validate_delivery_form();
    }

    /// Writes one contact field, re-validates the contacts form and publishes
    /// `ContactFormChanged`.
    pub fn set_contact_field(&mut self, field: ContactField, value: &str) {
        self.order.set_contact(field, value);
        tracing::debug!(field = field.as_str(), "contact field edited");
        self.validate_contact_form();
    }

    /// Re-runs delivery validation, publishes the result and reports whether
    /// the form is submittable.
    pub fn validate_delivery_form(&mut self) -> bool {
        self.delivery = validation::validate_delivery(&self.order);
        self.bus
            .publish(&Event::DeliveryFormChanged(self.delivery.clone()));
        self.delivery.valid
    }

    /// Re-runs contact validation, publishes the result and reports whether
    /// the form is submittable.
    pub fn validate_contact_form(&mut self) -> bool {
        self.contacts = validation::validate_contact(&self.order);
        self.bus
            .publish(&Event::ContactFormChanged(self.contacts.clone()));
        self.contacts.valid
    }

    /// Builds the submission payload from the draft and the basket.
    ///
    /// Item ids keep basket order and `total` equals [`basket_total`](Self::basket_total).
    #[must_use]
    pub fn prepare_order_snapshot(&self) -> OrderSnapshot {
        OrderSnapshot {
            payment: self.order.payment,
            address: self.order.address.clone(),
            email: self.order.email.clone(),
            phone: self.order.phone.clone(),
            items: self.basket.iter().map(|item| item.id.clone()).collect(),
            total: self.basket_total(),
        }
    }

    /// Clears the draft and resets both forms to pristine, publishing both
    /// form events.
    pub fn reset_order_draft(&mut self) {
        self.order = OrderDraft::default();
        self.delivery = FormState::pristine();
        self.contacts = FormState::pristine();
        self.bus
            .publish(&Event::DeliveryFormChanged(self.delivery.clone()));
        self.bus
            .publish(&Event::ContactFormChanged(self.contacts.clone()));
    }

    /// Moves to `step` and publishes `StepChanged`.
    pub fn set_step(&mut self, step: CheckoutStep) {
        tracing::debug!(from = %self.step, to = %step, "step changed");
        self.step = step;
        self.bus.publish(&Event::StepChanged { step });
    }

    /// Starts an order submission.
    ///
    /// Re-validates both forms (publishing their states), then marks the
    /// submission as in flight and returns the payload to send.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::SubmissionInFlight`] if a submission is pending
    /// - [`StorefrontError::EmptyBasket`] if there is nothing to order
    /// - [`StorefrontError::InvalidForm`] naming the first form with errors
    pub fn begin_submission(&mut self) -> Result<OrderSnapshot> {
        if self.submitting {
            return Err(StorefrontError::SubmissionInFlight);
        }
        if self.basket.is_empty() {
            return Err(StorefrontError::EmptyBasket);
        }
        if !self.validate_delivery_form() {
            return Err(StorefrontError::InvalidForm(FormKind::Delivery));
        }
        if !self.validate_contact_form() {
            return Err(StorefrontError::InvalidForm(FormKind::Contact));
        }

        self.submitting = true;
        let snapshot = self.prepare_order_snapshot();
        tracing::info!(items = snapshot.items.len(), total = snapshot.total, "order submission started");
        Ok(snapshot)
    }

    /// Applies an accepted order: releases the guard, clears the basket,
    /// resets the draft, publishes `OrderCompleted` and moves to
    /// [`Success`](CheckoutStep::Success).
    pub fn complete_order(&mut self, confirmation: OrderConfirmation) {
        tracing::info!(order = %confirmation.id, total = confirmation.total, "order completed");
        self.submitting = false;
        self.clear_cart();
        self.reset_order_draft();
        self.bus.publish(&Event::OrderCompleted { confirmation });
        self.set_step(CheckoutStep::Success);
    }

    /// Applies a rejected order: releases the guard and publishes
    /// `OrderFailed`. Basket, draft and step are left untouched so the user
    /// can retry.
    pub fn fail_order(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!(%message, "order failed");
        self.submitting = false;
        self.bus.publish(&Event::OrderFailed { message });
    }

    /// Sum of the prices of the items in the basket, saturating at `u64::MAX`.
    #[must_use]
    pub fn basket_total(&self) -> u64 {
        self.basket
            .iter()
            .map(Item::billable_price)
            .fold(0, u64::saturating_add)
    }

    #[must_use]
    pub fn basket_count(&self) -> usize {
        self.basket.len()
    }

    #[must_use]
    pub fn is_in_basket(&self, id: &ItemId) -> bool {
        self.basket.iter().any(|item| &item.id == id)
    }

    /// Looks an item up in the catalog, falling back to the basket.
    #[must_use]
    pub fn find_item(&self, id: &ItemId) -> Option<&Item> {
        self.catalog
            .iter()
            .chain(self.basket.iter())
            .find(|item| &item.id == id)
    }

    #[must_use]
    pub fn catalog(&self) -> &[Item] {
        &self.catalog
    }

    #[must_use]
    pub fn basket(&self) -> &[Item] {
        &self.basket
    }

    /// Basket contents with total and count, as carried by `BasketChanged`.
    #[must_use]
    pub fn basket_snapshot(&self) -> BasketSnapshot {
        BasketSnapshot {
            items: self.basket.clone(),
            total: self.basket_total(),
            count: self.basket.len(),
        }
    }

    /// The previewed item, if its id still resolves.
    #[must_use]
    pub fn preview(&self) -> Option<&Item> {
        self.preview.as_ref().and_then(|id| self.find_item(id))
    }

    #[must_use]
    pub const fn order(&self) -> &OrderDraft {
        &self.order
    }

    #[must_use]
    pub const fn delivery_state(&self) -> &FormState<DeliveryErrors> {
        &self.delivery
    }

    #[must_use]
    pub const fn contact_state(&self) -> &FormState<ContactErrors> {
        &self.contacts
    }

    #[must_use]
    pub const fn step(&self) -> CheckoutStep {
        self.step
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    fn publish_basket(&self) {
        self.bus.publish(&Event::BasketChanged(self.basket_snapshot()));
    }
}
