//! Card variant detection using prefix matching.
//!
//! The leading digits of a card number (the IIN) identify the network.
//! Classification looks only at the prefix; it places no requirement on the
//! number of digits, so partially typed numbers classify as well.
//!
//! | Variant | Prefix |
//! |---------|--------|
//! | Visa | 4 |
//! | Mastercard | 51-55 |
//! | American Express | 34, 37 |
//! | Discover | 6011, 65 |

use crate::digits::NormalizedDigits;
use crate::CardVariant;

/// Classifies a sequence of digit values (0-9).
///
/// Total: every input, including the empty one, maps to exactly one variant.
///
/// # Example
///
/// ```
/// use booking_guard::detect::classify_digits;
/// use booking_guard::CardVariant;
///
/// assert_eq!(classify_digits(&[4, 1, 1, 1]), CardVariant::Visa);
/// assert_eq!(classify_digits(&[3, 7, 8, 2]), CardVariant::AmericanExpress);
/// assert_eq!(classify_digits(&[]), CardVariant::Unknown);
/// ```
#[inline]
pub fn classify_digits(digits: &[u8]) -> CardVariant {
    // First match wins
    match digits {
        [4, ..] => CardVariant::Visa,
        [5, 1..=5, ..] => CardVariant::Mastercard,
        [3, 4, ..] | [3, 7, ..] => CardVariant::AmericanExpress,
        [6, 0, 1, 1, ..] | [6, 5, ..] => CardVariant::Discover,
        _ => CardVariant::Unknown,
    }
}

/// Longest prefix any variant rule inspects.
const PREFIX_DIGITS: usize = 4;

/// Classifies normalized digits into a card variant.
///
/// Only the leading digits are read, into a stack buffer.
pub fn classify(digits: &NormalizedDigits) -> CardVariant {
    let mut prefix = [0u8; PREFIX_DIGITS];
    let mut count = 0;
    for (slot, value) in prefix.iter_mut().zip(digits.iter_values()) {
        *slot = value;
        count += 1;
    }
    classify_digits(&prefix[..count])
}

/// Normalizes raw input and classifies the result.
///
/// Empty input yields empty digits and [`CardVariant::Unknown`].
///
/// # Example
///
/// ```
/// use booking_guard::detect::identify;
/// use booking_guard::CardVariant;
///
/// let (digits, variant) = identify("4111 1111 1111 1111");
/// assert_eq!(digits.as_str(), "4111111111111111");
/// assert_eq!(variant, CardVariant::Visa);
/// ```
pub fn identify(raw: &str) -> (NormalizedDigits, CardVariant) {
    let digits = NormalizedDigits::new(raw);
    let variant = classify(&digits);
    (digits, variant)
}
