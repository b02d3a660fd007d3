//! View models representing renderable storefront state.
//!
//! Each view model is computed from a change-event payload and holds only
//! display-ready data: formatted price labels, button captions and enabled
//! flags. The renderer turns them into text; nothing here touches
//! [`AppState`](crate::app::AppState).
//!
//! # Example
//!
//! ```
//! use storefront::domain::Item;
//! use storefront::ui::viewmodel::CardView;
//!
//! let card = CardView::new(&Item::new("a", "Widget", Some(100)), false);
//! assert_eq!(card.price_label, "100 synapses");
//! assert_eq!(card.button.label, "Add to basket");
//! assert!(card.button.enabled);
//! ```

use crate::domain::{format_price, Item, OrderConfirmation};
use crate::events::BasketSnapshot;
use crate::validation::{FormErrors, FormState};

pub const ADD_LABEL: &str = "Add to basket";
pub const REMOVE_LABEL: &str = "Remove from basket";
pub const NOT_FOR_SALE_LABEL: &str = "Not for sale";
pub const EMPTY_BASKET: &str = "Basket is empty";

/// A caption plus whether the control accepts input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub label: &'static str,
    pub enabled: bool,
}

/// One catalog card or the preview of an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub title: String,
    pub category: String,
    pub description: String,
    pub image: String,
    /// `"N synapses"`, or `"Priceless"` for items without a price.
    pub price_label: String,
    /// Basket toggle; disabled for priceless items.
    pub button: ButtonView,
}

impl CardView {
    /// Builds the card for `item`.
    ///
    /// # Parameters
    ///
    /// * `item` - Item to display
    /// * `in_basket` - Whether the toggle should offer removal
    #[must_use]
    pub fn new(item: &Item, in_basket: bool) -> Self {
        let button = if !item.is_orderable() {
            ButtonView {
                label: NOT_FOR_SALE_LABEL,
                enabled: false,
            }
        } else if in_basket {
            ButtonView {
                label: REMOVE_LABEL,
                enabled: true,
            }
        } else {
            ButtonView {
                label: ADD_LABEL,
                enabled: true,
            }
        };

        Self {
            title: item.title.clone(),
            category: item.category.clone(),
            description: item.description.clone(),
            image: item.image.clone(),
            price_label: format_price(item.price),
            button,
        }
    }
}

/// One numbered row of the basket list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasketLine {
    /// 1-based position, as shown to the user.
    pub index: usize,
    pub title: String,
    pub price_label: String,
}

/// The basket modal and the header counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasketView {
    pub lines: Vec<BasketLine>,
    pub total_label: String,
    pub count: usize,
    pub checkout: ButtonView,
    /// Shown in place of the list when the basket has no items.
    pub empty_message: Option<&'static str>,
}

impl BasketView {
    #[must_use]
    pub fn new(basket: &BasketSnapshot) -> Self {
        let lines = basket
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| BasketLine {
                index: i + 1,
                title: item.title.clone(),
                price_label: format_price(item.price),
            })
            .collect();

        Self {
            lines,
            total_label: format_price(Some(basket.total)),
            count: basket.count,
            checkout: ButtonView {
                label: "Checkout",
                enabled: basket.count > 0,
            },
            empty_message: (basket.count == 0).then_some(EMPTY_BASKET),
        }
    }
}

/// Submit button state and inline error line of one checkout form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub submit_enabled: bool,
    /// Messages of every failing field joined with `"; "`; empty when none.
    pub error_line: String,
}

impl FormView {
    #[must_use]
    pub fn new<E: FormErrors + Default>(state: &FormState<E>) -> Self {
        Self {
            submit_enabled: state.valid,
            error_line: state.error_message(),
        }
    }
}

/// Order confirmation screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessView {
    pub title: &'static str,
    pub description: String,
}

impl SuccessView {
    #[must_use]
    pub fn new(confirmation: &OrderConfirmation) -> Self {
        Self {
            title: "Order placed",
            description: format!("Charged {}", format_price(Some(confirmation.total))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::DeliveryErrors;

    #[test]
    fn priceless_card_has_disabled_button() {
        let card = CardView::new(&Item::new("r", "Relic", None), false);
        assert_eq!(card.price_label, "Priceless");
        assert_eq!(
            card.button,
            ButtonView {
                label: NOT_FOR_SALE_LABEL,
                enabled: false
            }
        );
    }

    #[test]
    fn card_in_basket_offers_removal() {
        let card = CardView::new(&Item::new("a", "A", Some(10)), true);
        assert_eq!(card.button.label, REMOVE_LABEL);
    }

    #[test]
    fn basket_lines_are_numbered_from_one() {
        let snapshot = BasketSnapshot {
            items: vec![Item::new("a", "A", Some(100)), Item::new("b", "B", Some(250))],
            total: 350,
            count: 2,
        };
        let view = BasketView::new(&snapshot);
        assert_eq!(view.lines[1].index, 2);
        assert_eq!(view.total_label, "350 synapses");
        assert!(view.checkout.enabled);
        assert_eq!(view.empty_message, None);
    }

    #[test]
    fn empty_basket_disables_checkout() {
        let view = BasketView::new(&BasketSnapshot::default());
        assert!(!view.checkout.enabled);
        assert_eq!(view.empty_message, Some(EMPTY_BASKET));
        assert_eq!(view.total_label, "0 synapses");
    }

    #[test]
    fn form_view_joins_errors() {
        let state = FormState::from_errors(DeliveryErrors {
            address: Some("bad".into()),
            payment: Some("missing".into()),
        });
        let view = FormView::new(&state);
        assert!(!view.submit_enabled);
        assert_eq!(view.error_line, "bad; missing");
    }

    #[test]
    fn success_reports_charged_total() {
        let view = SuccessView::new(&OrderConfirmation { id: "1".into(), total: 350 });
        assert_eq!(view.description, "Charged 350 synapses");
    }
}
