//! Subscription topics.
//!
//! A topic is either an exact key or one of two wildcard patterns. The only
//! patterns the storefront needs are "any delivery field edited" and "any
//! contact field edited", so they are spelled out as variants instead of
//! matching event names against regular expressions.

use super::event::{Event, EventKind};
use crate::domain::{ContactField, DeliveryField};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Every event of one kind.
    Kind(EventKind),
    /// Edits of one delivery field, e.g. `order.address:change`.
    DeliveryField(DeliveryField),
    /// Edits of one contact field, e.g. `contacts.phone:change`.
    ContactField(ContactField),
    /// Pattern: edits of any delivery field.
    AnyDeliveryField,
    /// Pattern: edits of any contact field.
    AnyContactField,
}

impl Topic {
    /// Whether an event published now should reach subscribers of this topic.
    ///
    /// # Examples
    ///
    /// ```
    /// use storefront::domain::DeliveryField;
    /// use storefront::events::{Event, Topic};
    ///
    /// let edit = Event::DeliveryFieldEdited { field: DeliveryField::Address, value: "Main St 1".into() };
    /// assert!(Topic::AnyDeliveryField.matches(&edit));
    /// assert!(Topic::DeliveryField(DeliveryField::Address).matches(&edit));
    /// assert!(!Topic::DeliveryField(DeliveryField::Payment).matches(&edit));
    /// assert!(!Topic::AnyContactField.matches(&edit));
    /// ```
    #[must_use]
    pub fn matches(&self, event: &Event) -> bool {
        match (self, event) {
            (Self::Kind(kind), event) => event.kind() == *kind,
            (Self::DeliveryField(wanted), Event::DeliveryFieldEdited { field, .. }) => wanted == field,
            (Self::ContactField(wanted), Event::ContactFieldEdited { field, .. }) => wanted == field,
            (Self::AnyDeliveryField, Event::DeliveryFieldEdited { .. })
            | (Self::AnyContactField, Event::ContactFieldEdited { .. }) => true,
            _ => false,
        }
    }
}

impl From<EventKind> for Topic {
    fn from(kind: EventKind) -> Self {
        Self::Kind(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_topic_ignores_payload() {
        let event = Event::ItemAdded { id: "a".into() };
        assert!(Topic::from(EventKind::ItemAdded).matches(&event));
        assert!(!Topic::from(EventKind::ItemRemoved).matches(&event));
    }

    #[test]
    fn contact_patterns() {
        let edit = Event::ContactFieldEdited {
            field: ContactField::Phone,
            value: "+79991234567".into(),
        };
        assert!(Topic::AnyContactField.matches(&edit));
        assert!(Topic::ContactField(ContactField::Phone).matches(&edit));
        assert!(!Topic::ContactField(ContactField::Email).matches(&edit));
        assert!(!Topic::AnyDeliveryField.matches(&edit));
    }
}
