//! Per-form error slots and the form state published to the presentation.

use serde::Serialize;

/// Read access shared by the fixed-shape error structs.
pub trait FormErrors {
    /// Messages of the failing fields, in field order.
    fn messages(&self) -> Vec<&str>;

    fn is_empty(&self) -> bool {
        self.messages().is_empty()
    }

    /// All messages joined for a single inline error line.
    fn summary(&self) -> String {
        self.messages().join("; ")
    }
}

/// Errors of the delivery step, one slot per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeliveryErrors {
    pub address: Option<String>,
    pub payment: Option<String>,
}

impl FormErrors for DeliveryErrors {
    fn messages(&self) -> Vec<&str> {
        [&self.address, &self.payment]
            .into_iter()
            .filter_map(Option::as_deref)
            .collect()
    }
}

/// Errors of the contacts step, one slot per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactErrors {
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl FormErrors for ContactErrors {
    fn messages(&self) -> Vec<&str> {
        [&self.email, &self.phone]
            .into_iter()
            .filter_map(Option::as_deref)
            .collect()
    }
}

/// Outcome of the last validation pass of one form.
///
/// `valid` is true only after a pass that produced no errors. A reset form is
/// pristine: it shows no messages but is not submittable until validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormState<E> {
    pub valid: bool,
    pub errors: E,
}

impl<E: FormErrors + Default> FormState<E> {
    /// A form that has not been validated since the last reset.
    #[must_use]
    pub fn pristine() -> Self {
        Self {
            valid: false,
            errors: E::default(),
        }
    }

    /// Builds the state from a freshly computed error set.
    #[must_use]
    pub fn from_errors(errors: E) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Joined message line for inline display; empty when nothing failed.
    #[must_use]
    pub fn error_message(&self) -> String {
        self.errors.summary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_joins_in_field_order() {
        let errors = DeliveryErrors {
            address: Some("bad address".into()),
            payment: Some("no payment".into()),
        };
        assert_eq!(errors.summary(), "bad address; no payment");
        assert!(!FormState::from_errors(errors).valid);
    }

    #[test]
    fn pristine_form_is_not_submittable() {
        let state: FormState<ContactErrors> = FormState::pristine();
        assert!(!state.valid);
        assert!(state.errors.is_empty());
        assert_eq!(state.error_message(), "");
    }
}
