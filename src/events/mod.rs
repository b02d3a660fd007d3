//! Event catalogue, subscription topics and the synchronous bus.

pub mod bus;
pub mod event;
pub mod topic;

pub use bus::{Delivery, EventBus, Handler, SubscriptionId};
pub use event::{BasketSnapshot, Event, EventKind};
pub use topic::Topic;
