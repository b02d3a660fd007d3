//! Error types for the storefront.
//!
//! This module defines the centralized error type [`StorefrontError`] and a type
//! alias [`Result`] used throughout the crate. Validation failures are *not*
//! errors: they travel as [`FormState`](crate::validation::FormState) values.
//! The variants here cover transport, persistence, configuration, and
//! violations of the state core's input contract.

use super::item::ItemId;
use super::order::FormKind;
use thiserror::Error;

/// The main error type for storefront operations.
///
/// # Examples
///
/// ```
/// use storefront::domain::StorefrontError;
///
/// fn load_settings() -> Result<(), StorefrontError> {
///     Err(StorefrontError::Config("api_url must not be empty".to_string()))
/// }
/// assert!(load_settings().is_err());
/// ```
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Reading or writing the local order log or catalog file failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The HTTP transport failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with an error status.
    ///
    /// `message` carries the backend's `error` field when one was provided.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code, or 0 for a file-backed market.
        status: u16,
        /// Human-readable failure reason.
        message: String,
    },

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A form field name outside the known set was supplied.
    #[error("Unknown form field: {0}")]
    UnknownField(String),

    /// An intent referenced an item id that is not in the catalog.
    #[error("Unknown item: {0}")]
    UnknownItem(ItemId),

    /// A typed command was not recognised by the terminal front end.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// A priceless item was offered to the basket.
    #[error("Item {0} has no price and cannot be ordered")]
    NotOrderable(ItemId),

    /// Checkout was attempted with an empty basket.
    #[error("Basket is empty")]
    EmptyBasket,

    /// Submission was attempted while a form still has errors.
    #[error("The {0} form has validation errors")]
    InvalidForm(FormKind),

    /// A second order submission arrived while the first is pending.
    #[error("An order submission is already in flight")]
    SubmissionInFlight,

    /// Application state was already borrowed when an event tried to mutate it.
    ///
    /// Happens when a change subscriber publishes an intent synchronously.
    #[error("State is busy; cannot handle {0} re-entrantly")]
    Reentrant(&'static str),
}

/// A specialized `Result` type for storefront operations.
pub type Result<T> = std::result::Result<T, StorefrontError>;
