//! Checkout step state machine.
//!
//! The step decides which modal the presentation shows. Transitions are made
//! by the intent handler:
//!
//! ```text
//! Browsing ─card:select→ Preview ─basket:open→ Basket ─order:open→ Delivery
//!     ↑                                                               │
//!     └──── modal:close ──── Success ←─order accepted── Contacts ←────┘
//! ```

use std::fmt;

/// Which view of the storefront is in front.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CheckoutStep {
    /// Catalog gallery, no modal open.
    #[default]
    Browsing,
    /// Single item preview.
    Preview,
    Basket,
    /// First checkout form: address and payment method.
    Delivery,
    /// Second checkout form: email and phone.
    Contacts,
    /// Order accepted; shows the charged total.
    Success,
}

impl CheckoutStep {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browsing => "browsing",
            Self::Preview => "preview",
            Self::Basket => "basket",
            Self::Delivery => "delivery",
            Self::Contacts => "contacts",
            Self::Success => "success",
        }
    }

    /// True while one of the checkout forms is open.
    #[must_use]
    pub const fn is_checkout(self) -> bool {
        matches!(self, Self::Delivery | Self::Contacts)
    }
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
