//! Field predicates for the checkout forms.
//!
//! Each predicate answers one question about one raw field value. They are
//! shared by the validators in [`super`] and by the file-backed market, which
//! re-checks submitted orders the way the backend does.

use regex::Regex;
use std::sync::LazyLock;

/// Latin and Cyrillic letters, digits, common punctuation and spaces.
static ADDRESS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[а-яА-ЯёЁa-zA-Z0-9.,!?:;\-()'" ]+$"#).expect("address pattern compiles")
});

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

/// Optional leading `+`, then 11 to 14 digits, spaces, dashes or parentheses.
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?[0-9\s\-()]{11,14}$").expect("phone pattern compiles")
});

#[must_use]
pub fn is_valid_address(value: &str) -> bool {
    !value.trim().is_empty() && ADDRESS_PATTERN.is_match(value)
}

#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    !value.is_empty() && EMAIL_PATTERN.is_match(value)
}

#[must_use]
pub fn is_valid_phone(value: &str) -> bool {
    !value.trim().is_empty() && PHONE_PATTERN.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_accepts_both_alphabets_and_punctuation() {
        assert!(is_valid_address("Main St 1"));
        assert!(is_valid_address("ул. Ленина, д. 5 (кв. 12)"));
        assert!(is_valid_address("Apt \"B\"; floor 2"));
    }

    #[test]
    fn address_rejects_blank_and_symbols() {
        assert!(!is_valid_address(""));
        assert!(!is_valid_address("   "));
        assert!(!is_valid_address("Main St #1"));
        assert!(!is_valid_address("Main\tSt"));
        assert!(!is_valid_address("<script>"));
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last+tag@mail.example.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@b.c"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn phone_length_and_prefix() {
        assert!(is_valid_phone("+79991234567"));
        assert!(is_valid_phone("89991234567"));
        assert!(is_valid_phone("+7 999 123-4567"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("+7999123456789012"));
        assert!(!is_valid_phone("7999abc4567"));
        assert!(!is_valid_phone(""));
    }
}
