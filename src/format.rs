//! Card number formatting for display.
//!
//! Formatting only inserts separators between groups of already-normalized
//! digits; it never reorders, adds, or drops a digit, so stripping the
//! separators again always gives back the original digits.
//!
//! # Format Conventions
//!
//! - **American Express**: `XXXX XXXXXX XXXXX`
//! - **Everything else**: groups of 4 from the left, remainder at the end
//!
//! # Example
//!
//! ```
//! use booking_guard::format::{format_card_number, format_with_separator};
//!
//! assert_eq!(format_card_number("4111111111111111"), "4111 1111 1111 1111");
//! assert_eq!(format_card_number("378282246310005"), "3782 822463 10005");
//! assert_eq!(format_with_separator("4111111111111111", "-"), "4111-1111-1111-1111");
//! ```

use crate::detect::identify;
use crate::digits::NormalizedDigits;
use crate::CardVariant;

/// Groups normalized digits for display using the variant's grouping.
///
/// ```
/// use booking_guard::digits::normalize;
/// use booking_guard::format::format_digits;
/// use booking_guard::CardVariant;
///
/// let digits = normalize("371234567891234");
/// assert_eq!(format_digits(&digits, CardVariant::AmericanExpress), "3712 345678 91234");
/// ```
pub fn format_digits(digits: &NormalizedDigits, variant: CardVariant) -> String {
    format_digits_with_separator(digits, variant, " ")
}

/// Groups normalized digits with a custom separator.
pub fn format_digits_with_separator(
    digits: &NormalizedDigits,
    variant: CardVariant,
    separator: &str,
) -> String {
    split_digits(digits, variant).join(separator)
}

/// Normalizes, classifies, and formats raw input with spaces.
pub fn format_card_number(input: &str) -> String {
    format_with_separator(input, " ")
}

/// Normalizes, classifies, and formats raw input with a custom separator.
///
/// ```
/// use booking_guard::format::format_with_separator;
///
/// assert_eq!(format_with_separator("4111111111111111", " - "), "4111 - 1111 - 1111 - 1111");
/// ```
pub fn format_with_separator(input: &str, separator: &str) -> String {
    let (digits, variant) = identify(input);
    format_digits_with_separator(&digits, variant, separator)
}

/// Splits raw input into its display groups.
///
/// ```
/// use booking_guard::format::split_into_groups;
///
/// assert_eq!(split_into_groups("378282246310005"), vec!["3782", "822463", "10005"]);
/// ```
pub fn split_into_groups(input: &str) -> Vec<String> {
    let (digits, variant) = identify(input);
    split_digits(&digits, variant)
}

/// Strips all formatting, leaving only digits.
pub fn strip_formatting(input: &str) -> String {
    NormalizedDigits::new(input).as_str().to_string()
}

fn split_digits(digits: &NormalizedDigits, variant: CardVariant) -> Vec<String> {
    let text = digits.as_str();
    let mut groups = Vec::new();
    let mut pos = 0;

    for size in variant.grouping(text.len()) {
        groups.push(text[pos..pos + size].to_string());
        pos += size;
    }

    groups
}
