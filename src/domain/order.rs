//! Order draft, submission payload and confirmation.
//!
//! The draft is filled field by field while the user types. It stays
//! independent of the basket until submission, when [`OrderSnapshot`] joins
//! the two into the payload posted to the backend.

use super::error::StorefrontError;
use super::item::ItemId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Card payment online. The delivery form labels this button `card`.
    Online,
    /// Cash on delivery.
    Cash,
}

impl PaymentMethod {
    /// Wire name sent to the backend.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Cash => "cash",
        }
    }

    /// Parses a payment name, accepting the form's `card` alias.
    ///
    /// Returns `None` for empty or unrecognized input so the draft can never
    /// hold an arbitrary string.
    ///
    /// # Examples
    ///
    /// ```
    /// use storefront::domain::PaymentMethod;
    ///
    /// assert_eq!(PaymentMethod::parse("card"), Some(PaymentMethod::Online));
    /// assert_eq!(PaymentMethod::parse(" Cash "), Some(PaymentMethod::Cash));
    /// assert_eq!(PaymentMethod::parse("barter"), None);
    /// ```
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "online" | "card" => Some(Self::Online),
            "cash" => Some(Self::Cash),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields of the first checkout step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryField {
    Address,
    Payment,
}

impl DeliveryField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Address => "address",
            Self::Payment => "payment",
        }
    }
}

impl FromStr for DeliveryField {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "address" => Ok(Self::Address),
            "payment" => Ok(Self::Payment),
            other => Err(StorefrontError::UnknownField(format!("order.{other}"))),
        }
    }
}

/// Fields of the second checkout step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Email,
    Phone,
}

impl ContactField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}

impl FromStr for ContactField {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            other => Err(StorefrontError::UnknownField(format!("contacts.{other}"))),
        }
    }
}

/// The two independently validated checkout forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    Delivery,
    Contact,
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delivery => f.write_str("delivery"),
            Self::Contact => f.write_str("contact"),
        }
    }
}

/// In-progress checkout data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub address: String,
    pub payment: Option<PaymentMethod>,
    pub email: String,
    pub phone: String,
}

impl OrderDraft {
    /// Writes one delivery field.
    ///
    /// An unrecognized payment value clears the payment method rather than
    /// storing the raw text; validation then reports the missing method.
    pub fn set_delivery(&mut self, field: DeliveryField, value: &str) {
        match field {
            DeliveryField::Address => value.clone_into(&mut self.address),
            DeliveryField::Payment => self.payment = PaymentMethod::parse(value),
        }
    }

    /// Writes one contact field.
    pub fn set_contact(&mut self, field: ContactField, value: &str) {
        match field {
            ContactField::Email => value.clone_into(&mut self.email),
            ContactField::Phone => value.clone_into(&mut self.phone),
        }
    }
}

/// Immutable submission payload posted to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSnapshot {
    pub payment: Option<PaymentMethod>,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub items: Vec<ItemId>,
    pub total: u64,
}

/// Backend acknowledgement of an accepted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub id: String,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_field_names_are_rejected() {
        let err = "zip".parse::<DeliveryField>().unwrap_err();
        assert!(matches!(err, StorefrontError::UnknownField(name) if name == "order.zip"));
        assert!("fax".parse::<ContactField>().is_err());
        assert_eq!("phone".parse::<ContactField>().unwrap(), ContactField::Phone);
    }

    #[test]
    fn unrecognized_payment_clears_the_method() {
        let mut draft = OrderDraft::default();
        draft.set_delivery(DeliveryField::Payment, "cash");
        assert_eq!(draft.payment, Some(PaymentMethod::Cash));
        draft.set_delivery(DeliveryField::Payment, "crypto");
        assert_eq!(draft.payment, None);
    }

    #[test]
    fn snapshot_serializes_wire_names() {
        let snapshot = OrderSnapshot {
            payment: Some(PaymentMethod::Online),
            address: "Main St 1".into(),
            email: "a@b.co".into(),
            phone: "+79991234567".into(),
            items: vec![ItemId::new("a"), ItemId::new("b")],
            total: 350,
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["payment"], "online");
        assert_eq!(json["items"][1], "b");
        assert_eq!(json["total"], 350);
    }
}
