//! Application layer coordinating state, events and actions.
//!
//! ```text
//! Intent → EventBus → handle_event → AppState mutation → change events
//!                          │
//!                          └→ Actions → MarketApi → Event::Api ─┐
//!                          ↑                                    │
//!                          └────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: side effects requested by the handler
//! - [`handler`]: intent processing and step transitions
//! - [`modes`]: the checkout step state machine
//! - [`session`]: the [`Storefront`] runtime owning bus, state and market
//! - [`state`]: [`AppState`] and its change notifications

pub mod actions;
pub mod handler;
pub mod modes;
pub mod session;
pub mod state;

pub use actions::Action;
pub use handler::handle_event;
pub use modes::CheckoutStep;
pub use session::Storefront;
pub use state::AppState;
