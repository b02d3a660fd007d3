//! Text renderer driven by change events.
//!
//! [`TerminalView`] subscribes to every change notification on the bus and
//! writes a plain-text rendering of the payload to its sink. It never reads
//! application state; everything it prints comes from the event itself.
//!
//! # Example
//!
//! ```
//! use storefront::domain::Item;
//! use storefront::events::{Event, EventBus};
//! use storefront::ui::TerminalView;
//!
//! let bus = EventBus::new();
//! let view = TerminalView::attach(&bus, Vec::new());
//! bus.publish(&Event::CatalogChanged { items: vec![Item::new("a", "Widget", Some(100))] });
//! let text = String::from_utf8(view.output().clone()).unwrap();
//! assert!(text.contains("Widget"));
//! ```

use std::cell::{Ref, RefCell};
use std::io::{self, Write};
use std::rc::Rc;

use crate::app::CheckoutStep;
use crate::domain::Item;
use crate::events::{Event, EventBus, EventKind, SubscriptionId};
use crate::ui::viewmodel::{BasketView, CardView, FormView, SuccessView};
use crate::validation::{FormErrors, FormState};

/// Presentation layer writing to any [`Write`] sink.
pub struct TerminalView<W: Write> {
    bus: EventBus,
    sink: Rc<RefCell<W>>,
    subscriptions: Vec<SubscriptionId>,
}

impl<W: Write + 'static> TerminalView<W> {
    /// Subscribes to all change events on `bus`.
    pub fn attach(bus: &EventBus, sink: W) -> Self {
        let sink = Rc::new(RefCell::new(sink));

        let subscriptions = EventKind::CHANGES
            .into_iter()
            .map(|kind| {
                let sink = Rc::clone(&sink);
                bus.subscribe(kind, move |event| {
                    let mut out = sink.borrow_mut();
                    render_event(event, &mut *out)?;
                    out.flush()?;
                    Ok(())
                })
            })
            .collect();

        Self {
            bus: bus.clone(),
            sink,
            subscriptions,
        }
    }

    /// Everything written so far.
    #[must_use]
    pub fn output(&self) -> Ref<'_, W> {
        self.sink.borrow()
    }

    /// Writes directly to the sink, e.g. help text or command errors.
    ///
    /// # Errors
    ///
    /// Returns the sink's I/O error.
    pub fn print(&self, text: &str) -> io::Result<()> {
        let mut out = self.sink.borrow_mut();
        writeln!(out, "{text}")?;
        out.flush()
    }
}

impl<W: Write> Drop for TerminalView<W> {
    fn drop(&mut self) {
        for id in self.subscriptions.drain(..) {
            self.bus.unsubscribe(id);
        }
    }
}

/// Renders one change event. Intents and API responses produce no output.
///
/// # Errors
///
/// Returns the sink's I/O error.
pub fn render_event(event: &Event, out: &mut impl Write) -> io::Result<()> {
    match event {
        Event::CatalogChanged { items } => render_catalog(items, out),
        Event::PreviewChanged { item, in_basket } => render_card(&CardView::new(item, *in_basket), out),
        Event::BasketChanged(basket) => render_basket(&BasketView::new(basket), out),
        Event::DeliveryFormChanged(state) => render_form("Delivery", state, out),
        Event::ContactFormChanged(state) => render_form("Contacts", state, out),
        Event::StepChanged { step } => render_step(*step, out),
        Event::OrderCompleted { confirmation } => {
            let view = SuccessView::new(confirmation);
            writeln!(out, "{}", view.title)?;
            writeln!(out, "{}", view.description)
        }
        Event::OrderFailed { message } => writeln!(out, "Order failed: {message}"),
        _ => Ok(()),
    }
}

fn render_catalog(items: &[Item], out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Catalog ({} items)", items.len())?;
    for (i, item) in items.iter().enumerate() {
        let card = CardView::new(item, false);
        writeln!(
            out,
            "{:>3}. {:<32} {:<12} {}",
            i + 1,
            card.title,
            card.category,
            card.price_label
        )?;
    }
    Ok(())
}

fn render_card(card: &CardView, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{} [{}]", card.title, card.category)?;
    if !card.description.is_empty() {
        writeln!(out, "  {}", card.description)?;
    }
    writeln!(out, "  Price: {}", card.price_label)?;
    if card.button.enabled {
        writeln!(out, "  [{}] (toggle)", card.button.label)
    } else {
        writeln!(out, "  [{}]", card.button.label)
    }
}

fn render_basket(view: &BasketView, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Basket ({})", view.count)?;
    if let Some(message) = view.empty_message {
        return writeln!(out, "  {message}");
    }
    for line in &view.lines {
        writeln!(out, "{:>3}. {:<32} {}", line.index, line.title, line.price_label)?;
    }
    writeln!(out, "  Total: {}", view.total_label)
}

fn render_form<E: FormErrors + Default>(
    name: &str,
    state: &FormState<E>,
    out: &mut impl Write,
) -> io::Result<()> {
    let view = FormView::new(state);
    if view.submit_enabled {
        writeln!(out, "{name}: ready")
    } else if view.error_line.is_empty() {
        writeln!(out, "{name}: not filled in")
    } else {
        writeln!(out, "{name}: {}", view.error_line)
    }
}

fn render_step(step: CheckoutStep, out: &mut impl Write) -> io::Result<()> {
    let hint = match step {
        CheckoutStep::Browsing => "show <n> to preview an item, basket to open the basket",
        CheckoutStep::Preview => "toggle to add or remove, close to go back",
        CheckoutStep::Basket => "remove <n>, checkout, or close",
        CheckoutStep::Delivery => "address <text>, pay <online|cash>, then next",
        CheckoutStep::Contacts => "email <address>, phone <number>, then submit",
        CheckoutStep::Success => "close to continue shopping",
    };
    writeln!(out, "-- {step} -- {hint}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderConfirmation;
    use crate::events::BasketSnapshot;
    use crate::validation::{ContactErrors, DeliveryErrors};

    fn rendered(event: &Event) -> String {
        let mut out = Vec::new();
        render_event(event, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn preview_shows_price_and_button() {
        let text = rendered(&Event::PreviewChanged {
            item: Item::new("r", "Relic", None),
            in_basket: false,
        });
        assert!(text.contains("Price: Priceless"));
        assert!(text.contains("[Not for sale]"));
    }

    #[test]
    fn empty_basket_message() {
        let text = rendered(&Event::BasketChanged(BasketSnapshot::default()));
        assert!(text.contains("Basket (0)"));
        assert!(text.contains("Basket is empty"));
    }

    #[test]
    fn form_states_render_three_ways() {
        let pristine: FormState<ContactErrors> = FormState::pristine();
        assert_eq!(rendered(&Event::ContactFormChanged(pristine)), "Contacts: not filled in\n");

        let ok: FormState<DeliveryErrors> = FormState::from_errors(DeliveryErrors::default());
        assert_eq!(rendered(&Event::DeliveryFormChanged(ok)), "Delivery: ready\n");

        let bad = FormState::from_errors(ContactErrors {
            email: Some("bad email".into()),
            phone: None,
        });
        assert_eq!(rendered(&Event::ContactFormChanged(bad)), "Contacts: bad email\n");
    }

    #[test]
    fn success_screen() {
        let text = rendered(&Event::OrderCompleted {
            confirmation: OrderConfirmation { id: "x".into(), total: 750 },
        });
        assert!(text.contains("Charged 750 synapses"));
    }

    #[test]
    fn intents_render_nothing() {
        assert!(rendered(&Event::BasketOpened).is_empty());
    }

    #[test]
    fn detached_view_stops_rendering() {
        let bus = EventBus::new();
        {
            let _view = TerminalView::attach(&bus, Vec::new());
            assert_eq!(bus.subscriber_count(), EventKind::CHANGES.len());
        }
        assert_eq!(bus.subscriber_count(), 0);
    }
}
