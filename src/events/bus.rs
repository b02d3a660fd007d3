//! Synchronous publish/subscribe bus.
//!
//! The bus is a cheap clonable handle over a shared registry. Publishing runs
//! every matching handler to completion, in registration order, before
//! returning. Handlers may publish or subscribe from inside a callback: the
//! matching set is snapshotted before dispatch so the registry is never
//! borrowed while user code runs. A subscription added during a publish does
//! not receive the event being published.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::event::Event;
use super::topic::Topic;
use crate::domain::Result;

/// Callback invoked with each matching event.
pub type Handler = Rc<dyn Fn(&Event) -> Result<()>>;

/// Opaque handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// How a publish went: handlers that returned `Ok` and those that failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Delivery {
    pub delivered: usize,
    pub failed: usize,
}

struct Subscription {
    id: SubscriptionId,
    topic: Topic,
    handler: Handler,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    subscriptions: Vec<Subscription>,
}

#[derive(Clone, Default)]
pub struct EventBus {
    registry: Rc<RefCell<Registry>>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriptions", &self.subscriber_count())
            .finish()
    }
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `topic`.
    ///
    /// # Parameters
    ///
    /// * `topic` - An exact [`Topic::Kind`] or field key, or one of the
    ///   wildcard patterns
    /// * `handler` - Callback; an `Err` is logged and counted, never propagated
    ///
    /// # Returns
    ///
    /// An id that can later be passed to [`EventBus::unsubscribe`].
    pub fn subscribe<F>(&self, topic: impl Into<Topic>, handler: F) -> SubscriptionId
    where
        F: Fn(&Event) -> Result<()> + 'static,
    {
        let topic = topic.into();
        let mut registry = self.registry.borrow_mut();
        registry.next_id += 1;
        let id = SubscriptionId(registry.next_id);
        registry.subscriptions.push(Subscription {
            id,
            topic,
            handler: Rc::new(handler),
        });
        tracing::trace!(?topic, id = id.0, "subscribed");
        id
    }

    /// Removes a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut registry = self.registry.borrow_mut();
        let before = registry.subscriptions.len();
        registry.subscriptions.retain(|s| s.id != id);
        before != registry.subscriptions.len()
    }

    /// Delivers `event` to every matching subscriber.
    ///
    /// A topic with no subscribers is a no-op. A failing handler does not stop
    /// delivery to the ones after it.
    pub fn publish(&self, event: &Event) -> Delivery {
        let _span = tracing::debug_span!("publish", event = event.name()).entered();

        let handlers: Vec<Handler> = self
            .registry
            .borrow()
            .subscriptions
            .iter()
            .filter(|s| s.topic.matches(event))
            .map(|s| Rc::clone(&s.handler))
            .collect();

        let mut delivery = Delivery::default();
        for handler in handlers {
            match handler(event) {
                Ok(()) => delivery.delivered += 1,
                Err(e) => {
                    delivery.failed += 1;
                    tracing::error!(event = event.name(), error = %e, "subscriber failed");
                }
            }
        }

        if delivery.delivered + delivery.failed == 0 {
            tracing::trace!(event = event.name(), "no subscribers");
        }
        delivery
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().subscriptions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DeliveryField, StorefrontError};
    use crate::events::EventKind;
    use std::cell::Cell;

    fn recorder(bus: &EventBus, topic: impl Into<Topic>, log: &Rc<RefCell<Vec<&'static str>>>, tag: &'static str) {
        let log = Rc::clone(log);
        bus.subscribe(topic, move |_| {
            log.borrow_mut().push(tag);
            Ok(())
        });
    }

    #[test]
    fn publish_without_subscribers_is_a_no_op() {
        let bus = EventBus::new();
        assert_eq!(bus.publish(&Event::BasketOpened), Delivery::default());
    }

    #[test]
    fn handlers_run_in_registration_order() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        recorder(&bus, EventKind::ItemAdded, &log, "first");
        recorder(&bus, EventKind::ItemAdded, &log, "second");
        recorder(&bus, EventKind::ItemRemoved, &log, "other");

        let delivery = bus.publish(&Event::ItemAdded { id: "x".into() });
        assert_eq!(delivery.delivered, 2);
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn exact_and_pattern_subscribers_each_fire_once() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        recorder(&bus, Topic::DeliveryField(DeliveryField::Address), &log, "exact");
        recorder(&bus, Topic::AnyDeliveryField, &log, "pattern");

        bus.publish(&Event::DeliveryFieldEdited {
            field: DeliveryField::Address,
            value: "Main St 1".into(),
        });
        assert_eq!(*log.borrow(), vec!["exact", "pattern"]);
    }

    #[test]
    fn unsubscribed_handler_is_not_called() {
        let bus = EventBus::new();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let id = bus.subscribe(EventKind::ModalClosed, move |_| {
            counter.set(counter.get() + 1);
            Ok(())
        });

        bus.publish(&Event::ModalClosed);
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.publish(&Event::ModalClosed);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn failing_handler_does_not_stop_delivery() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        bus.subscribe(EventKind::BasketOpened, |_| Err(StorefrontError::EmptyBasket));
        recorder(&bus, EventKind::BasketOpened, &log, "after");

        let delivery = bus.publish(&Event::BasketOpened);
        assert_eq!(delivery, Delivery { delivered: 1, failed: 1 });
        assert_eq!(*log.borrow(), vec!["after"]);
    }

    #[test]
    fn handlers_may_publish_and_subscribe_reentrantly() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        recorder(&bus, EventKind::StepChanged, &log, "step");

        let inner_bus = bus.clone();
        let inner_log = Rc::clone(&log);
        bus.subscribe(EventKind::CheckoutStarted, move |_| {
            recorder(&inner_bus, EventKind::CheckoutStarted, &inner_log, "late");
            inner_bus.publish(&Event::StepChanged {
                step: crate::app::CheckoutStep::Delivery,
            });
            Ok(())
        });

        bus.publish(&Event::CheckoutStarted);
        assert_eq!(*log.borrow(), vec!["step"]);

        bus.publish(&Event::CheckoutStarted);
        assert_eq!(log.borrow().len(), 3);
    }
}
