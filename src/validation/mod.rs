//! Checkout form validation.
//!
//! Two independent validators, each a pure function of [`OrderDraft`]. Every
//! run recomputes the complete error set for its form; nothing is merged with
//! a previous pass. They run on every field edit to drive inline errors and
//! again on submit to gate the next step.
//!
//! # Example
//!
//! ```
//! use storefront::domain::{DeliveryField, OrderDraft};
//! use storefront::validation::{validate_delivery, FormErrors};
//!
//! let mut draft = OrderDraft::default();
//! draft.set_delivery(DeliveryField::Address, "Main St 1");
//! let state = validate_delivery(&draft);
//! assert!(!state.valid);
//! assert!(state.errors.payment.is_some());
//! assert!(state.errors.address.is_none());
//! ```

pub mod errors;
pub mod rules;

pub use errors::{ContactErrors, DeliveryErrors, FormErrors, FormState};

use crate::domain::OrderDraft;

pub const ADDRESS_REQUIRED: &str = "Address must not be empty";
pub const ADDRESS_INVALID: &str =
    "Enter a valid address: Latin or Cyrillic letters, digits, punctuation and spaces only";
pub const PAYMENT_REQUIRED: &str = "Choose a payment method";
pub const EMAIL_INVALID: &str = "Enter a valid email in the form name@example.com";
pub const PHONE_INVALID: &str = "Enter a valid phone number in the form +79XXXXXXXXX";

/// Validates the delivery step: address and payment method.
#[must_use]
pub fn validate_delivery(order: &OrderDraft) -> FormState<DeliveryErrors> {
    let address = if order.address.trim().is_empty() {
        Some(ADDRESS_REQUIRED.to_string())
    } else if rules::is_valid_address(&order.address) {
        None
    } else {
        Some(ADDRESS_INVALID.to_string())
    };

    let payment = order.payment.is_none().then(|| PAYMENT_REQUIRED.to_string());

    let state = FormState::from_errors(DeliveryErrors { address, payment });
    tracing::trace!(valid = state.valid, "delivery form validated");
    state
}

/// Validates the contacts step: email and phone.
#[must_use]
pub fn validate_contact(order: &OrderDraft) -> FormState<ContactErrors> {
    let email = (!rules::is_valid_email(&order.email)).then(|| EMAIL_INVALID.to_string());
    let phone = (!rules::is_valid_phone(&order.phone)).then(|| PHONE_INVALID.to_string());

    let state = FormState::from_errors(ContactErrors { email, phone });
    tracing::trace!(valid = state.valid, "contact form validated");
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContactField, DeliveryField, PaymentMethod};

    #[test]
    fn empty_address_fails() {
        let draft = OrderDraft {
            payment: Some(PaymentMethod::Cash),
            ..OrderDraft::default()
        };
        let state = validate_delivery(&draft);
        assert!(!state.valid);
        assert_eq!(state.errors.address.as_deref(), Some(ADDRESS_REQUIRED));
        assert!(state.errors.payment.is_none());
    }

    #[test]
    fn address_with_known_payment_passes() {
        let mut draft = OrderDraft::default();
        draft.set_delivery(DeliveryField::Payment, "online");
        draft.set_delivery(DeliveryField::Address, "Main St 1");
        let state = validate_delivery(&draft);
        assert!(state.valid);
        assert!(state.errors.is_empty());
    }

    #[test]
    fn disallowed_symbols_get_the_pattern_message() {
        let mut draft = OrderDraft::default();
        draft.set_delivery(DeliveryField::Address, "Main St #1");
        let state = validate_delivery(&draft);
        assert_eq!(state.errors.address.as_deref(), Some(ADDRESS_INVALID));
    }

    #[test]
    fn contact_requires_both_fields() {
        let mut draft = OrderDraft::default();
        draft.set_contact(ContactField::Email, "not-an-email");
        let state = validate_contact(&draft);
        assert!(state.errors.email.is_some());
        assert!(state.errors.phone.is_some());

        draft.set_contact(ContactField::Email, "a@b.co");
        draft.set_contact(ContactField::Phone, "+79991234567");
        let state = validate_contact(&draft);
        assert!(state.valid);
        assert_eq!(state.error_message(), "");
    }

    #[test]
    fn each_pass_replaces_previous_errors() {
        let mut draft = OrderDraft::default();
        assert!(validate_contact(&draft).errors.email.is_some());
        draft.set_contact(ContactField::Email, "a@b.co");
        let state = validate_contact(&draft);
        assert!(state.errors.email.is_none());
        assert_eq!(state.errors.messages(), vec![PHONE_INVALID]);
    }
}
