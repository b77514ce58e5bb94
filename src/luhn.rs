//! Luhn checksum for card number structural validity.
//!
//! The Luhn algorithm (also known as the "modulus 10" algorithm) catches
//! single-digit typos and most adjacent transpositions. It says nothing about
//! the card network; a Luhn-valid number may still classify as `Unknown`.

use crate::card::{MAX_CARD_DIGITS, MIN_CARD_DIGITS};
use crate::digits::NormalizedDigits;

/// Doubled digit with 9 subtracted when the result exceeds 9.
/// Index is the digit (0-9).
const DOUBLE_TABLE: [u8; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Decides whether normalized digits form a structurally valid card number.
///
/// Returns `false` for fewer than 13 or more than 19 digits, and for any
/// sequence whose Luhn sum is not a multiple of 10. Never fails: a non-card
/// input is simply invalid.
///
/// # Example
///
/// ```
/// use booking_guard::digits::normalize;
/// use booking_guard::luhn::is_structurally_valid;
///
/// assert!(is_structurally_valid(&normalize("4111 1111 1111 1111")));
/// assert!(!is_structurally_valid(&normalize("1234567890123456")));
/// ```
pub fn is_structurally_valid(digits: &NormalizedDigits) -> bool {
    passes_checksum(digits.as_str())
}

/// Applies the structural check to a string that has not been normalized.
///
/// Any character outside `0`-`9` makes the result `false`, as does a length
/// outside 13..=19.
pub fn passes_checksum(input: &str) -> bool {
    let len = input.len();
    if !(MIN_CARD_DIGITS..=MAX_CARD_DIGITS).contains(&len) {
        return false;
    }
    if !input.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    luhn_sum(input.bytes().map(|b| b - b'0'), false) % 10 == 0
}

/// Validates digit values (0-9) using the Luhn algorithm, with no length bounds.
///
/// Returns `false` for empty input.
///
/// ```
/// use booking_guard::luhn::validate;
///
/// assert!(validate(&[4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1]));
/// assert!(!validate(&[4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2]));
/// ```
#[inline]
pub fn validate(digits: &[u8]) -> bool {
    if digits.is_empty() {
        return false;
    }
    compute_checksum(digits) % 10 == 0
}

/// Computes the Luhn sum (not reduced modulo 10).
///
/// Walks from the rightmost digit leftward. The check digit is never doubled;
/// the digit next to it is, and every second one after that.
pub fn compute_checksum(digits: &[u8]) -> u32 {
    luhn_sum(digits.iter().copied(), false)
}

/// Computes the check digit that makes `digits` followed by it Luhn-valid.
///
/// ```
/// use booking_guard::luhn::generate_check_digit;
///
/// let partial = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
/// assert_eq!(generate_check_digit(&partial), 1);
/// ```
pub fn generate_check_digit(digits: &[u8]) -> u8 {
    // Every digit shifts one place left once the check digit is appended,
    // so the doubling starts at the rightmost given digit.
    let sum = luhn_sum(digits.iter().copied(), true);
    ((10 - (sum % 10)) % 10) as u8
}

/// Sums digit values from the right, doubling every second one.
fn luhn_sum(digits: impl DoubleEndedIterator<Item = u8>, double_first: bool) -> u32 {
    let mut sum: u32 = 0;
    let mut double = double_first;

    for digit in digits.rev() {
        let digit = digit % 10;
        sum += if double {
            DOUBLE_TABLE[digit as usize] as u32
        } else {
            digit as u32
        };
        double = !double;
    }

    sum
}
