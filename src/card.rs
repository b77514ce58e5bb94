//! Core card types for payment validation.
//!
//! This module provides the `CardVariant` enum for identifying card networks
//! and the `ValidatedCard` struct for holding a checked card number securely.

use std::fmt;
use zeroize::Zeroize;

use crate::digits::NormalizedDigits;
use crate::mask::MaskedIdentifier;

/// Payment networks recognized by the booking checkout.
///
/// Derived purely from the leading digits of a card number, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CardVariant {
    /// Visa - Prefix 4
    Visa,
    /// Mastercard - Prefix 51-55
    Mastercard,
    /// American Express - Prefix 34, 37
    AmericanExpress,
    /// Discover - Prefix 6011, 65
    Discover,
    /// No known prefix matched.
    Unknown,
}

impl CardVariant {
    /// All variants, in classification order.
    pub const ALL: [CardVariant; 5] = [
        Self::Visa,
        Self::Mastercard,
        Self::AmericanExpress,
        Self::Discover,
        Self::Unknown,
    ];

    /// Returns a human-readable name for the variant.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Visa => "Visa",
            Self::Mastercard => "Mastercard",
            Self::AmericanExpress => "American Express",
            Self::Discover => "Discover",
            Self::Unknown => "Unknown",
        }
    }

    /// Returns the display grouping for a number of this variant.
    ///
    /// American Express prints as 4-6-5; everything else in runs of four.
    /// The returned group sizes always sum to `length`.
    pub fn grouping(&self, length: usize) -> Vec<usize> {
        match self {
            Self::AmericanExpress => {
                let mut groups = Vec::with_capacity(4);
                let mut remaining = length;
                for size in [4, 6, 5] {
                    if remaining == 0 {
                        break;
                    }
                    let take = size.min(remaining);
                    groups.push(take);
                    remaining -= take;
                }
                if remaining > 0 {
                    groups.push(remaining);
                }
                groups
            }
            _ => {
                let mut groups = vec![4; length / 4];
                if length % 4 > 0 {
                    groups.push(length % 4);
                }
                groups
            }
        }
    }

    /// Returns true for a recognized network.
    #[inline]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for CardVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Maximum number of digits in a card number.
pub const MAX_CARD_DIGITS: usize = 19;

/// Minimum number of digits in a card number.
pub const MIN_CARD_DIGITS: usize = 13;

/// A card number that passed normalization, length, and checksum checks.
///
/// # Security
///
/// - Full card number is private and only accessible via controlled methods
/// - Memory is zeroed on drop using the `zeroize` crate
/// - Debug and Display output are masked
#[derive(Clone)]
pub struct ValidatedCard {
    variant: CardVariant,
    digits: [u8; MAX_CARD_DIGITS],
    digit_count: u8,
}

impl ValidatedCard {
    /// Creates a new ValidatedCard from digits already known to be valid.
    ///
    /// Use [`crate::validate`] to create instances.
    pub(crate) fn new(variant: CardVariant, normalized: &NormalizedDigits) -> Self {
        let mut digits = [0u8; MAX_CARD_DIGITS];
        let count = normalized.len().min(MAX_CARD_DIGITS);
        for (slot, byte) in digits.iter_mut().zip(normalized.as_str().bytes()) {
            *slot = byte - b'0';
        }
        Self {
            variant,
            digits,
            digit_count: count as u8,
        }
    }

    /// Returns the detected card variant.
    #[inline]
    pub const fn variant(&self) -> CardVariant {
        self.variant
    }

    /// Returns the number of digits in the card number.
    #[inline]
    pub const fn length(&self) -> usize {
        self.digit_count as usize
    }

    /// Returns the last four digits as a string.
    pub fn last_four(&self) -> String {
        let len = self.length();
        self.digits[len.saturating_sub(4)..len]
            .iter()
            .map(|&d| (b'0' + d) as char)
            .collect()
    }

    /// Returns the full card number as normalized digits.
    ///
    /// # Security Warning
    ///
    /// This exposes the full card number. Never log the result; use
    /// `masked()` for display.
    pub fn number(&self) -> NormalizedDigits {
        NormalizedDigits::from_values(&self.digits[..self.length()])
    }

    /// Returns the redacted form, e.g. `************1111`.
    pub fn masked(&self) -> MaskedIdentifier {
        crate::mask::mask(&self.number())
    }

    /// Returns the grouped redacted form, e.g. `****-****-****-1111`.
    pub fn masked_grouped(&self) -> String {
        crate::mask::mask_grouped(&self.number())
    }

    /// Returns the number grouped for display, e.g. `3782 822463 10005`.
    ///
    /// # Security Warning
    ///
    /// The output contains the full number.
    pub fn formatted(&self) -> String {
        crate::format::format_digits(&self.number(), self.variant)
    }
}

impl fmt::Debug for ValidatedCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedCard")
            .field("variant", &self.variant)
            .field("number", &self.masked_grouped())
            .field("length", &self.digit_count)
            .finish()
    }
}

impl fmt::Display for ValidatedCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.variant, self.masked_grouped())
    }
}

impl Drop for ValidatedCard {
    fn drop(&mut self) {
        self.digits.zeroize();
    }
}
