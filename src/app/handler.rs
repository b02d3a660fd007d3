//! Intent handling and state transitions.
//!
//! [`handle_event`] is the only place that mutates [`AppState`] in response to
//! the outside world. It receives user intents from the presentation layer and
//! API responses from the session, calls the state's mutators (which publish
//! change events themselves) and returns the side effects to run next.
//!
//! # Event Types
//!
//! - **Browsing**: `CatalogRequested`, `CardSelected`, `ItemToggled`,
//!   `ItemAdded`, `ItemRemoved`, `BasketOpened`, `ModalClosed`
//! - **Checkout**: `CheckoutStarted`, `DeliveryFieldEdited`,
//!   `DeliverySubmitted`, `ContactFieldEdited`, `ContactsSubmitted`
//! - **API**: `Api` with a typed [`ApiResponse`]
//!
//! Change notifications are ignored; they are outputs of this module.
//!
//! # Example
//!
//! ```
//! use storefront::app::{handle_event, Action, AppState};
//! use storefront::events::{Event, EventBus};
//!
//! let mut state = AppState::new(EventBus::new());
//! let actions = handle_event(&mut state, &Event::CatalogRequested)?;
//! assert_eq!(actions, vec![Action::FetchCatalog]);
//! # Ok::<(), storefront::domain::StorefrontError>(())
//! ```

use super::modes::CheckoutStep;
use crate::api::ApiResponse;
use crate::app::{Action, AppState};
use crate::domain::{Item, ItemId, Result, StorefrontError};
use crate::events::Event;

/// Processes one event, mutates state and returns actions to execute.
///
/// # Parameters
///
/// * `state` - Mutable application state
/// * `event` - Intent or API response to process
///
/// # Returns
///
/// Actions to execute in order. Empty when the event needs no side effect or
/// was blocked (a submit with validation errors, a priceless item, a second
/// submit while one is pending, a submit or form edit arriving at the wrong
/// checkout step). Blocked intents are logged at `warn`.
///
/// # Errors
///
/// [`StorefrontError::UnknownItem`] when an intent names an id that is in
/// neither the catalog nor the basket.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<Vec<Action>> {
    let _span = tracing::debug_span!("handle_event", event = event.name(), step = %state.step()).entered();

    match event {
        Event::CatalogRequested => Ok(vec![Action::FetchCatalog]),

        Event::CardSelected { id } => {
            let item = lookup(state, id)?;
            state.set_preview(&item);
            state.set_step(CheckoutStep::Preview);
            Ok(vec![])
        }

        Event::ItemToggled { id } => {
            let item = lookup(state, id)?;
            if state.is_in_basket(id) {
                state.remove_from_cart(id);
            } else {
                add_or_warn(state, &item);
            }
            if state.preview().is_some_and(|previewed| &previewed.id == id) {
                state.set_preview(&item);
            }
            Ok(vec![])
        }

        Event::ItemAdded { id } => {
            let item = lookup(state, id)?;
            add_or_warn(state, &item);
            Ok(vec![])
        }

        Event::ItemRemoved { id } => {
            state.remove_from_cart(id);
            Ok(vec![])
        }

        Event::BasketOpened => {
            state.set_step(CheckoutStep::Basket);
            Ok(vec![])
        }

        Event::CheckoutStarted => {
            if state.basket_count() == 0 {
                tracing::warn!("checkout blocked: basket is empty");
                return Ok(vec![]);
            }
            state.reset_order_draft();
            state.set_step(CheckoutStep::Delivery);
            Ok(vec![])
        }

        Event::DeliveryFieldEdited { field, value } => {
            if checkout_open(state, event) {
                state.set_delivery_field(*field, value);
            }
            Ok(vec![])
        }

        Event::DeliverySubmitted => {
            if !at_step(state, CheckoutStep::Delivery, event) {
                return Ok(vec![]);
            }
            if state.validate_delivery_form() {
                state.set_step(CheckoutStep::Contacts);
            } else {
                tracing::warn!(
                    errors = %state.delivery_state().error_message(),
                    "delivery submit blocked"
                );
            }
            Ok(vec![])
        }

        Event::ContactFieldEdited { field, value } => {
            if checkout_open(state, event) {
                state.set_contact_field(*field, value);
            }
            Ok(vec![])
        }

        Event::ContactsSubmitted if !at_step(state, CheckoutStep::Contacts, event) => Ok(vec![]),

        Event::ContactsSubmitted => match state.begin_submission() {
            Ok(snapshot) => Ok(vec![Action::SubmitOrder(snapshot)]),
            Err(
                e @ (StorefrontError::InvalidForm(_)
                | StorefrontError::EmptyBasket
                | StorefrontError::SubmissionInFlight),
            ) => {
                tracing::warn!(error = %e, "order submit blocked");
                Ok(vec![])
            }
            Err(e) => Err(e),
        },

        Event::ModalClosed => {
            state.set_step(CheckoutStep::Browsing);
            Ok(vec![])
        }

        Event::Api(response) => {
            handle_api_response(state, response);
            Ok(vec![])
        }

        Event::CatalogChanged { .. }
        | Event::PreviewChanged { .. }
        | Event::BasketChanged(_)
        | Event::DeliveryFormChanged(_)
        | Event::ContactFormChanged(_)
        | Event::StepChanged { .. }
        | Event::OrderCompleted { .. }
        | Event::OrderFailed { .. } => Ok(vec![]),
    }
}

fn handle_api_response(state: &mut AppState, response: &ApiResponse) {
    match response {
        ApiResponse::CatalogLoaded { items } => state.set_catalog(items.clone()),
        ApiResponse::CatalogFailed { message } => {
            tracing::error!(%message, "catalog fetch failed");
        }
        ApiResponse::OrderAccepted { confirmation } => state.complete_order(confirmation.clone()),
        ApiResponse::OrderRejected { message } => state.fail_order(message.as_str()),
    }
}

/// Whether `event` arrives at `step`; logs and refuses it otherwise.
fn at_step(state: &AppState, step: CheckoutStep, event: &Event) -> bool {
    let current = state.step();
    if current != step {
        tracing::warn!(event = event.name(), step = %current, expected = %step, "out-of-step submit ignored");
    }
    current == step
}

fn checkout_open(state: &AppState, event: &Event) -> bool {
    let open = state.step().is_checkout();
    if !open {
        tracing::warn!(event = event.name(), step = %state.step(), "form edit outside checkout ignored");
    }
    open
}

fn lookup(state: &AppState, id: &ItemId) -> Result<Item> {
    state
        .find_item(id)
        .cloned()
        .ok_or_else(|| StorefrontError::UnknownItem(id.clone()))
}

/// Adds `item`; a priceless item is logged and skipped.
fn add_or_warn(state: &mut AppState, item: &Item) {
    if let Err(e) = state.add_to_cart(item) {
        tracing::warn!(error = %e, "add to basket blocked");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContactField, DeliveryField, OrderConfirmation};
    use crate::events::EventBus;

    fn state_with_catalog() -> AppState {
        let mut state = AppState::new(EventBus::new());
        state.set_catalog(vec![
            Item::new("a", "Alpha", Some(100)),
            Item::new("b", "Beta", Some(250)),
            Item::new("r", "Relic", None),
        ]);
        state
    }

    fn run(state: &mut AppState, event: Event) -> Vec<Action> {
        handle_event(state, &event).unwrap()
    }

    fn fill_forms(state: &mut AppState) {
        run(state, Event::CheckoutStarted);
        for (field, value) in [(DeliveryField::Address, "Main St 1"), (DeliveryField::Payment, "cash")] {
            run(state, Event::DeliveryFieldEdited { field, value: value.into() });
        }
        run(state, Event::DeliverySubmitted);
        assert_eq!(state.step(), CheckoutStep::Contacts);
        for (field, value) in [(ContactField::Email, "a@b.co"), (ContactField::Phone, "+79991234567")] {
            run(state, Event::ContactFieldEdited { field, value: value.into() });
        }
    }

    #[test]
    fn card_select_opens_preview() {
        let mut state = state_with_catalog();
        run(&mut state, Event::CardSelected { id: "b".into() });
        assert_eq!(state.step(), CheckoutStep::Preview);
        assert_eq!(state.preview().map(|item| item.title.as_str()), Some("Beta"));
    }

    #[test]
    fn unknown_card_is_an_error() {
        let mut state = state_with_catalog();
        let err = handle_event(&mut state, &Event::CardSelected { id: "nope".into() }).unwrap_err();
        assert!(matches!(err, StorefrontError::UnknownItem(_)));
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut state = state_with_catalog();
        run(&mut state, Event::ItemToggled { id: "a".into() });
        assert!(state.is_in_basket(&"a".into()));
        run(&mut state, Event::ItemToggled { id: "a".into() });
        assert_eq!(state.basket_count(), 0);
    }

    #[test]
    fn priceless_toggle_is_blocked_without_error() {
        let mut state = state_with_catalog();
        assert!(run(&mut state, Event::ItemToggled { id: "r".into() }).is_empty());
        assert_eq!(state.basket_count(), 0);
    }

    #[test]
    fn checkout_needs_a_basket() {
        let mut state = state_with_catalog();
        run(&mut state, Event::CheckoutStarted);
        assert_eq!(state.step(), CheckoutStep::Browsing);

        run(&mut state, Event::ItemAdded { id: "a".into() });
        run(&mut state, Event::CheckoutStarted);
        assert_eq!(state.step(), CheckoutStep::Delivery);
        assert!(!state.delivery_state().valid);
    }

    #[test]
    fn delivery_submit_advances_only_when_valid() {
        let mut state = state_with_catalog();
        run(&mut state, Event::ItemAdded { id: "a".into() });
        run(&mut state, Event::CheckoutStarted);

        run(&mut state, Event::DeliverySubmitted);
        assert_eq!(state.step(), CheckoutStep::Delivery);
        assert!(state.delivery_state().errors.address.is_some());

        run(&mut state, Event::DeliveryFieldEdited { field: DeliveryField::Address, value: "Main St 1".into() });
        run(&mut state, Event::DeliveryFieldEdited { field: DeliveryField::Payment, value: "online".into() });
        run(&mut state, Event::DeliverySubmitted);
        assert_eq!(state.step(), CheckoutStep::Contacts);
    }

    #[test]
    fn contacts_submit_emits_one_order_action() {
        let mut state = state_with_catalog();
        run(&mut state, Event::ItemAdded { id: "a".into() });
        run(&mut state, Event::ItemAdded { id: "b".into() });
        fill_forms(&mut state);

        let actions = run(&mut state, Event::ContactsSubmitted);
        let [Action::SubmitOrder(snapshot)] = actions.as_slice() else {
            panic!("expected a single submit action, got {actions:?}");
        };
        assert_eq!(snapshot.total, 350);

        assert!(run(&mut state, Event::ContactsSubmitted).is_empty());
    }

    #[test]
    fn accepted_order_lands_on_success() {
        let mut state = state_with_catalog();
        run(&mut state, Event::ItemAdded { id: "a".into() });
        fill_forms(&mut state);
        run(&mut state, Event::ContactsSubmitted);

        let confirmation = OrderConfirmation { id: "o-1".into(), total: 100 };
        run(&mut state, Event::Api(ApiResponse::OrderAccepted { confirmation }));
        assert_eq!(state.step(), CheckoutStep::Success);
        assert_eq!(state.basket_count(), 0);

        run(&mut state, Event::ModalClosed);
        assert_eq!(state.step(), CheckoutStep::Browsing);
    }

    #[test]
    fn delivery_submit_outside_delivery_step_is_ignored() {
        let mut state = state_with_catalog();
        assert!(run(&mut state, Event::DeliverySubmitted).is_empty());
        assert_eq!(state.step(), CheckoutStep::Browsing);

        run(&mut state, Event::ItemAdded { id: "a".into() });
        run(&mut state, Event::BasketOpened);
        run(&mut state, Event::DeliverySubmitted);
        assert_eq!(state.step(), CheckoutStep::Basket);
    }

    #[test]
    fn contacts_submit_outside_contacts_step_is_ignored() {
        let mut state = state_with_catalog();
        run(&mut state, Event::ItemAdded { id: "a".into() });
        fill_forms(&mut state);
        run(&mut state, Event::ModalClosed);

        assert!(run(&mut state, Event::ContactsSubmitted).is_empty());
        assert!(!state.is_submitting());
        assert_eq!(state.step(), CheckoutStep::Browsing);
    }

    #[test]
    fn form_edits_outside_checkout_are_ignored() {
        let mut state = state_with_catalog();
        run(&mut state, Event::DeliveryFieldEdited { field: DeliveryField::Address, value: "Main St 1".into() });
        run(&mut state, Event::ContactFieldEdited { field: ContactField::Email, value: "a@b.co".into() });
        assert!(state.order().address.is_empty());
        assert!(state.order().email.is_empty());
    }

    #[test]
    fn catalog_failure_keeps_previous_catalog() {
        let mut state = state_with_catalog();
        run(&mut state, Event::Api(ApiResponse::CatalogFailed { message: "offline".into() }));
        assert_eq!(state.catalog().len(), 3);
    }
}
