//! Side effects requested by the intent handler.
//!
//! The handler never talks to the market API itself. It returns [`Action`]s
//! that the session executes once the current publish has finished, and the
//! results come back through the bus as [`ApiResponse`](crate::api::ApiResponse)
//! events.

use crate::domain::OrderSnapshot;

/// Commands executed by [`Storefront`](super::Storefront) after dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Load the catalog and publish `CatalogLoaded` or `CatalogFailed`.
    FetchCatalog,

    /// Send the order and publish `OrderAccepted` or `OrderRejected`.
    ///
    /// The snapshot is taken when the contacts form is submitted, so later
    /// edits cannot change what is sent.
    SubmitOrder(OrderSnapshot),
}
