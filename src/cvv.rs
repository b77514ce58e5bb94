//! Card security code (CVV/CVC/CID) checks.
//!
//! # Length Requirements
//!
//! - American Express: 4 digits (printed on front)
//! - All other variants: 3 digits (printed on back)
//!
//! # Example
//!
//! ```
//! use booking_guard::cvv::{validate_cvv, validate_cvv_for_variant};
//! use booking_guard::CardVariant;
//!
//! assert!(validate_cvv("123").is_ok());
//! assert!(validate_cvv_for_variant("1234", CardVariant::AmericanExpress).is_ok());
//! assert!(validate_cvv_for_variant("1234", CardVariant::Visa).is_err());
//! ```

use std::fmt;
use thiserror::Error;
use zeroize::Zeroize;

use crate::CardVariant;

/// A checked security code. Never shown in `Debug` or `Display`.
#[derive(Clone)]
pub struct ValidatedCvv {
    digits: [u8; 4],
    length: u8,
}

impl ValidatedCvv {
    /// Returns the number of digits.
    #[inline]
    pub const fn length(&self) -> usize {
        self.length as usize
    }

    /// Returns true if this is a 4-digit code (Amex style).
    #[inline]
    pub const fn is_four_digit(&self) -> bool {
        self.length == 4
    }

    /// Returns the code as a string.
    pub fn as_string(&self) -> String {
        self.digits[..self.length()]
            .iter()
            .map(|&d| (b'0' + d) as char)
            .collect()
    }
}

impl fmt::Debug for ValidatedCvv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedCvv")
            .field("value", &"***")
            .field("length", &self.length)
            .finish()
    }
}

impl fmt::Display for ValidatedCvv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", "*".repeat(self.length()))
    }
}

impl Drop for ValidatedCvv {
    fn drop(&mut self) {
        self.digits.zeroize();
    }
}

/// Errors that can occur during CVV validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CvvError {
    /// The input is empty.
    #[error("CVV is empty")]
    Empty,

    /// The CVV contains a non-digit character.
    #[error("invalid character '{character}' at position {position}")]
    InvalidCharacter {
        /// The invalid character found.
        character: char,
        /// Position of the invalid character.
        position: usize,
    },

    /// The CVV is neither 3 nor 4 digits.
    #[error("CVV must be 3 or 4 digits, got {length}")]
    InvalidLength {
        /// Actual length provided.
        length: usize,
    },

    /// The CVV length does not match the card variant.
    #[error("{variant} cards require a {expected} digit CVV, got {length}")]
    WrongLengthForVariant {
        /// The card variant.
        variant: CardVariant,
        /// Actual length provided.
        length: usize,
        /// Expected length for this variant.
        expected: usize,
    },
}

/// Returns the expected CVV length for a card variant.
#[inline]
pub const fn cvv_length_for_variant(variant: CardVariant) -> usize {
    match variant {
        CardVariant::AmericanExpress => 4,
        _ => 3,
    }
}

/// Validates a CVV string of 3 or 4 ASCII digits.
///
/// Surrounding whitespace is ignored; anything else that is not a digit is
/// rejected with its position.
pub fn validate_cvv(input: &str) -> Result<ValidatedCvv, CvvError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CvvError::Empty);
    }

    let mut digits = [0u8; 4];
    let mut count = 0usize;

    for (position, character) in input.chars().enumerate() {
        if !character.is_ascii_digit() {
            digits.zeroize();
            return Err(CvvError::InvalidCharacter {
                character,
                position,
            });
        }
        if count < digits.len() {
            digits[count] = (character as u8) - b'0';
        }
        count += 1;
    }

    if !(3..=4).contains(&count) {
        digits.zeroize();
        return Err(CvvError::InvalidLength { length: count });
    }

    Ok(ValidatedCvv {
        digits,
        length: count as u8,
    })
}

/// Validates a CVV string for a specific card variant.
pub fn validate_cvv_for_variant(
    input: &str,
    variant: CardVariant,
) -> Result<ValidatedCvv, CvvError> {
    let cvv = validate_cvv(input)?;
    let expected = cvv_length_for_variant(variant);

    if cvv.length() != expected {
        return Err(CvvError::WrongLengthForVariant {
            variant,
            length: cvv.length(),
            expected,
        });
    }

    Ok(cvv)
}

/// Checks if a string is a valid CVV (3 or 4 digits).
#[inline]
pub fn is_valid_cvv(input: &str) -> bool {
    validate_cvv(input).is_ok()
}
