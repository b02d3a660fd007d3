//! Typed command parsing.
//!
//! Turns one line of user input into the intent event it stands for. Item
//! references are 1-based positions in the catalog listing (or, for `remove`,
//! in the basket listing) or raw item ids. Commands that act on an item fall
//! back to the previewed item when no reference is given.

use std::str::FromStr;

use crate::app::AppState;
use crate::domain::{ContactField, DeliveryField, ItemId, Result, StorefrontError};
use crate::events::Event;

pub const HELP: &str = "\
Commands:
  list                 reload the catalog
  show <n|id>          preview an item
  toggle [n|id]        add or remove the previewed item
  add <n|id>           add an item to the basket
  remove <n|id>        remove a basket line
  basket               open the basket
  checkout             start checkout
  address <text>       set the delivery address
  pay <online|cash>    set the payment method
  next                 continue to contacts
  email <address>      set the email
  phone <number>       set the phone
  set <form.field> <v> set any form field, e.g. set order.address Main St 1
  submit               place the order
  close                close the current modal
  help                 show this text
  quit                 exit";

/// What the front end should do with a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Publish this intent through the session.
    Publish(Event),
    Help,
    Quit,
}

/// Parses one line of input.
///
/// # Returns
///
/// `Ok(None)` for a blank line.
///
/// # Errors
///
/// - [`StorefrontError::UnknownCommand`] for an unrecognised first word
/// - [`StorefrontError::UnknownItem`] when an item reference does not resolve
/// - [`StorefrontError::UnknownField`] for a bad `set` field name
///
/// # Examples
///
/// ```
/// use storefront::app::AppState;
/// use storefront::domain::{DeliveryField, Item};
/// use storefront::events::{Event, EventBus};
/// use storefront::ui::{parse_command, Command};
///
/// let mut state = AppState::new(EventBus::new());
/// state.set_catalog(vec![Item::new("a", "Widget", Some(100))]);
///
/// assert_eq!(
///     parse_command("show 1", &state)?,
///     Some(Command::Publish(Event::CardSelected { id: "a".into() }))
/// );
/// assert_eq!(
///     parse_command("address  Main St 1 ", &state)?,
///     Some(Command::Publish(Event::DeliveryFieldEdited {
///         field: DeliveryField::Address,
///         value: "Main St 1".into(),
///     }))
/// );
/// # Ok::<(), storefront::domain::StorefrontError>(())
/// ```
pub fn parse_command(line: &str, state: &AppState) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));

    let event = match word {
        "help" | "?" => return Ok(Some(Command::Help)),
        "quit" | "exit" => return Ok(Some(Command::Quit)),
        "list" => Event::CatalogRequested,
        "show" => Event::CardSelected {
            id: catalog_ref(rest, state)?,
        },
        "toggle" => Event::ItemToggled {
            id: catalog_ref(rest, state)?,
        },
        "add" => Event::ItemAdded {
            id: catalog_ref(rest, state)?,
        },
        "remove" => Event::ItemRemoved {
            id: basket_ref(rest, state)?,
        },
        "basket" => Event::BasketOpened,
        "checkout" => Event::CheckoutStarted,
        "address" => delivery(DeliveryField::Address, rest),
        "pay" => delivery(DeliveryField::Payment, rest),
        "next" => Event::DeliverySubmitted,
        "email" => contact(ContactField::Email, rest),
        "phone" => contact(ContactField::Phone, rest),
        "set" => parse_set(rest)?,
        "submit" => Event::ContactsSubmitted,
        "close" => Event::ModalClosed,
        other => return Err(StorefrontError::UnknownCommand(other.to_string())),
    };

    Ok(Some(Command::Publish(event)))
}

fn delivery(field: DeliveryField, value: &str) -> Event {
    Event::DeliveryFieldEdited {
        field,
        value: value.to_string(),
    }
}

fn contact(field: ContactField, value: &str) -> Event {
    Event::ContactFieldEdited {
        field,
        value: value.to_string(),
    }
}

/// `set order.<field> <value>` or `set contacts.<field> <value>`.
fn parse_set(rest: &str) -> Result<Event> {
    let (key, value) = rest
        .split_once(char::is_whitespace)
        .map_or((rest, ""), |(key, value)| (key, value.trim()));

    match key.split_once('.') {
        Some(("order", name)) => Ok(delivery(DeliveryField::from_str(name)?, value)),
        Some(("contacts", name)) => Ok(contact(ContactField::from_str(name)?, value)),
        _ => Err(StorefrontError::UnknownField(key.to_string())),
    }
}

fn catalog_ref(reference: &str, state: &AppState) -> Result<ItemId> {
    resolve(reference, state, state.catalog().iter().map(|item| &item.id))
}

fn basket_ref(reference: &str, state: &AppState) -> Result<ItemId> {
    resolve(reference, state, state.basket().iter().map(|item| &item.id))
}

/// Resolves a position in `listing`, a raw id, or the previewed item when
/// `reference` is empty.
fn resolve<'a>(
    reference: &str,
    state: &'a AppState,
    mut listing: impl Iterator<Item = &'a ItemId>,
) -> Result<ItemId> {
    if reference.is_empty() {
        return state
            .preview()
            .map(|item| item.id.clone())
            .ok_or_else(|| StorefrontError::UnknownItem(ItemId::new("")));
    }

    if let Ok(position) = reference.parse::<usize>() {
        return position
            .checked_sub(1)
            .and_then(|index| listing.nth(index))
            .cloned()
            .ok_or_else(|| StorefrontError::UnknownItem(ItemId::new(reference)));
    }

    let id = ItemId::new(reference);
    if state.find_item(&id).is_some() {
        Ok(id)
    } else {
        Err(StorefrontError::UnknownItem(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Item;
    use crate::events::EventBus;

    fn state() -> AppState {
        let mut state = AppState::new(EventBus::new());
        state.set_catalog(vec![
            Item::new("a", "Alpha", Some(100)),
            Item::new("b", "Beta", Some(250)),
        ]);
        state
    }

    fn publish(line: &str, state: &AppState) -> Event {
        match parse_command(line, state).unwrap() {
            Some(Command::Publish(event)) => event,
            other => panic!("expected an event for {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn blank_line_is_nothing() {
        assert_eq!(parse_command("   ", &state()).unwrap(), None);
    }

    #[test]
    fn positions_and_ids_resolve() {
        let state = state();
        assert_eq!(publish("add 2", &state), Event::ItemAdded { id: "b".into() });
        assert_eq!(publish("show a", &state), Event::CardSelected { id: "a".into() });
    }

    #[test]
    fn remove_counts_basket_lines() {
        let mut state = state();
        let beta = state.catalog()[1].clone();
        state.add_to_cart(&beta).unwrap();
        assert_eq!(publish("remove 1", &state), Event::ItemRemoved { id: "b".into() });
    }

    #[test]
    fn toggle_defaults_to_preview() {
        let mut state = state();
        assert!(matches!(
            parse_command("toggle", &state),
            Err(StorefrontError::UnknownItem(_))
        ));

        let alpha = state.catalog()[0].clone();
        state.set_preview(&alpha);
        assert_eq!(publish("toggle", &state), Event::ItemToggled { id: "a".into() });
    }

    #[test]
    fn out_of_range_position_fails() {
        let state = state();
        assert!(matches!(parse_command("show 0", &state), Err(StorefrontError::UnknownItem(_))));
        assert!(matches!(parse_command("show 9", &state), Err(StorefrontError::UnknownItem(_))));
    }

    #[test]
    fn set_parses_qualified_field_names() {
        let state = state();
        assert_eq!(
            publish("set contacts.phone +7 999 123-4567", &state),
            Event::ContactFieldEdited {
                field: ContactField::Phone,
                value: "+7 999 123-4567".into()
            }
        );
        assert!(matches!(
            parse_command("set order.colour red", &state),
            Err(StorefrontError::UnknownField(name)) if name == "order.colour"
        ));
        assert!(matches!(
            parse_command("set misc red", &state),
            Err(StorefrontError::UnknownField(_))
        ));
    }

    #[test]
    fn unknown_word_is_reported() {
        assert!(matches!(
            parse_command("dance", &state()),
            Err(StorefrontError::UnknownCommand(word)) if word == "dance"
        ));
        assert_eq!(parse_command("quit", &state()).unwrap(), Some(Command::Quit));
    }
}
