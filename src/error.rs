//! Error types for card and payment validation.
//!
//! A rejected card is an ordinary outcome, so every variant here describes
//! what was wrong with the input in terms the checkout can show to the user.

use thiserror::Error;

use crate::cvv::CvvError;
use crate::expiry::ExpiryError;

/// Errors that can occur during card number validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The input string was empty.
    #[error("card number is empty")]
    Empty,

    /// The input held characters but no digits.
    #[error("card number contains no digits")]
    NoDigits,

    /// The card number has too few digits.
    #[error("card number too short: got {length} digits, minimum is {minimum}")]
    TooShort {
        /// The actual number of digits provided.
        length: usize,
        /// The minimum required digits (13).
        minimum: usize,
    },

    /// The card number has too many digits.
    #[error("card number too long: got {length} digits, maximum is {maximum}")]
    TooLong {
        /// The actual number of digits provided.
        length: usize,
        /// The maximum allowed digits (19).
        maximum: usize,
    },

    /// The Luhn checksum validation failed.
    ///
    /// This usually indicates a typo in the card number.
    #[error("invalid checksum (Luhn check failed) - please verify the card number")]
    InvalidChecksum,
}

/// First failure found while checking a payment submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    /// The card number was rejected.
    #[error(transparent)]
    Card(#[from] ValidationError),

    /// The expiry was unreadable or has lapsed.
    #[error(transparent)]
    Expiry(#[from] ExpiryError),

    /// The security code was rejected.
    #[error(transparent)]
    Cvv(#[from] CvvError),
}
