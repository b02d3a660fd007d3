//! Session runtime wiring the bus, state, handler and market together.
//!
//! ```text
//! intent ──publish──▶ EventBus ──▶ handle_event ──▶ AppState ──publish──▶ change events
//!                                      │
//!                                      ▼
//!                               pending actions ──▶ MarketApi ──▶ Event::Api ─┐
//!                                      ▲                                      │
//!                                      └──────────────────────────────────────┘
//! ```
//!
//! Everything runs on one thread. Actions are queued while a publish is in
//! progress and executed by [`Storefront::run_pending`] once it returns, so a
//! slow backend call never happens inside a subscriber.

use std::cell::{Ref, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use super::actions::Action;
use super::handler::handle_event;
use super::state::AppState;
use crate::api::{ApiResponse, MarketApi};
use crate::domain::{Result, StorefrontError};
use crate::events::{Delivery, Event, EventBus, EventKind, SubscriptionId, Topic};

/// One storefront session.
///
/// Owns the [`EventBus`], the shared [`AppState`] and the market client.
/// The presentation layer subscribes to change events on [`bus`](Self::bus)
/// and feeds user intents through [`dispatch`](Self::dispatch).
pub struct Storefront {
    bus: EventBus,
    state: Rc<RefCell<AppState>>,
    market: Box<dyn MarketApi>,
    pending: Rc<RefCell<VecDeque<Action>>>,
    subscriptions: Vec<SubscriptionId>,
}

impl Storefront {
    /// Creates a session and subscribes the intent handler to every intent and
    /// to API responses.
    ///
    /// # Examples
    ///
    /// ```
    /// use storefront::api::MarketApi;
    /// use storefront::app::{CheckoutStep, Storefront};
    /// use storefront::domain::{Item, OrderConfirmation, OrderSnapshot, Result};
    /// use storefront::events::Event;
    ///
    /// struct Shelf;
    /// impl MarketApi for Shelf {
    ///     fn fetch_catalog(&self) -> Result<Vec<Item>> {
    ///         Ok(vec![Item::new("a", "Widget", Some(100))])
    ///     }
    ///     fn submit_order(&mut self, order: &OrderSnapshot) -> Result<OrderConfirmation> {
    ///         Ok(OrderConfirmation { id: "1".into(), total: order.total })
    ///     }
    /// }
    ///
    /// let mut session = Storefront::new(Box::new(Shelf));
    /// session.start();
    /// session.dispatch(&Event::CardSelected { id: "a".into() });
    /// assert_eq!(session.state().step(), CheckoutStep::Preview);
    /// ```
    #[must_use]
    pub fn new(market: Box<dyn MarketApi>) -> Self {
        let bus = EventBus::new();
        let state = Rc::new(RefCell::new(AppState::new(bus.clone())));
        let pending = Rc::new(RefCell::new(VecDeque::new()));

        let handler = {
            let state = Rc::clone(&state);
            let pending = Rc::clone(&pending);
            move |event: &Event| -> Result<()> {
                let mut state = state
                    .try_borrow_mut()
                    .map_err(|_| StorefrontError::Reentrant(event.name()))?;
                let actions = handle_event(&mut state, event)?;
                pending.borrow_mut().extend(actions);
                Ok(())
            }
        };

        let topics = EventKind::COMMANDS
            .into_iter()
            .chain([EventKind::Api])
            .map(Topic::Kind)
            .chain([Topic::AnyDeliveryField, Topic::AnyContactField]);

        let subscriptions = topics
            .map(|topic| bus.subscribe(topic, handler.clone()))
            .collect();

        Self {
            bus,
            state,
            market,
            pending,
            subscriptions,
        }
    }

    /// Bus to subscribe presentation handlers on.
    #[must_use]
    pub const fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Read access to the current state.
    ///
    /// # Panics
    ///
    /// Panics if called from inside a bus handler while an intent is being
    /// handled. Change subscribers should use their event payloads instead.
    #[must_use]
    pub fn state(&self) -> Ref<'_, AppState> {
        self.state.borrow()
    }

    /// Publishes `event`, then runs every action it queued.
    pub fn dispatch(&mut self, event: &Event) -> Delivery {
        let delivery = self.bus.publish(event);
        self.run_pending();
        delivery
    }

    /// Requests the catalog. Called once after the presentation is attached.
    pub fn start(&mut self) {
        tracing::info!("storefront session started");
        self.dispatch(&Event::CatalogRequested);
    }

    /// Executes queued actions in order until the queue is empty. Responses
    /// that queue further actions are drained in the same call.
    pub fn run_pending(&mut self) {
        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some(action) = next else {
                break;
            };
            let response = self.execute_action(action);
            self.bus.publish(&Event::Api(response));
        }
    }

    fn execute_action(&mut self, action: Action) -> ApiResponse {
        let _span = tracing::debug_span!("execute_action", action = action_name(&action)).entered();

        match action {
            Action::FetchCatalog => {
                let result = self.market.fetch_catalog();
                if let Err(e) = &result {
                    tracing::error!(error = %e, "failed to load catalog");
                }
                ApiResponse::from_catalog(result)
            }
            Action::SubmitOrder(order) => {
                let result = self.market.submit_order(&order);
                if let Err(e) = &result {
                    tracing::error!(error = %e, total = order.total, "failed to submit order");
                }
                ApiResponse::from_order(result)
            }
        }
    }
}

const fn action_name(action: &Action) -> &'static str {
    match action {
        Action::FetchCatalog => "fetch_catalog",
        Action::SubmitOrder(_) => "submit_order",
    }
}

impl Drop for Storefront {
    /// Removes the handler subscriptions, which hold the state alive through
    /// the bus.
    fn drop(&mut self) {
        for id in self.subscriptions.drain(..) {
            self.bus.unsubscribe(id);
        }
    }
}
