//! Redaction of card numbers for display, audit records, and logs.
//!
//! PCI-DSS allows showing at most the last four digits to customers. All
//! functions here are one-way: the masked output cannot be turned back into
//! the number, and never shows more than four trailing digits.
//!
//! Masking works on [`NormalizedDigits`], not on a display-formatted string,
//! so the visible suffix is always the true last four of the number.

use std::fmt;

use crate::digits::NormalizedDigits;

/// Character substituted for every hidden digit.
pub const MASK_CHAR: char = '*';

/// Number of trailing digits left visible.
pub const VISIBLE_DIGITS: usize = 4;

/// A display-safe redacted identifier.
///
/// Carries no relationship back to the original number beyond its visible
/// suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MaskedIdentifier(String);

impl MaskedIdentifier {
    /// Returns the masked text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the digits left visible (empty when everything was masked).
    pub fn visible_suffix(&self) -> &str {
        self.0.trim_start_matches(MASK_CHAR)
    }

    /// Returns the length in characters, equal to the source digit count.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the source had no digits.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for MaskedIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MaskedIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Masks every digit except the last four.
///
/// With fewer than four digits, all of them are masked.
///
/// # Example
///
/// ```
/// use booking_guard::digits::normalize;
/// use booking_guard::mask::mask;
///
/// assert_eq!(mask(&normalize("4111 1111 1111 1111")).as_str(), "************1111");
/// assert_eq!(mask(&normalize("123")).as_str(), "***");
/// ```
pub fn mask(digits: &NormalizedDigits) -> MaskedIdentifier {
    let len = digits.len();
    if len < VISIBLE_DIGITS {
        return MaskedIdentifier(MASK_CHAR.to_string().repeat(len));
    }

    let mut result = String::with_capacity(len);
    for _ in 0..len - VISIBLE_DIGITS {
        result.push(MASK_CHAR);
    }
    result.push_str(&digits.as_str()[len - VISIBLE_DIGITS..]);
    MaskedIdentifier(result)
}

/// Masks the digits of an arbitrary display string, in place.
///
/// Every ASCII digit except the final four digits is replaced with
/// [`MASK_CHAR`]; all other characters are kept. If the text holds fewer than
/// four digits, all of them are masked. Applying this to text that is
/// already masked changes nothing.
///
/// ```
/// use booking_guard::mask::mask_display;
///
/// assert_eq!(mask_display("4111 1111 1111 1111"), "**** **** **** 1111");
/// assert_eq!(mask_display("**** **** **** 1111"), "**** **** **** 1111");
/// ```
pub fn mask_display(text: &str) -> String {
    let digit_count = text.chars().filter(|c| c.is_ascii_digit()).count();
    let keep_from = if digit_count < VISIBLE_DIGITS {
        digit_count
    } else {
        digit_count - VISIBLE_DIGITS
    };

    let mut seen = 0;
    text.chars()
        .map(|c| {
            if !c.is_ascii_digit() {
                return c;
            }
            let index = seen;
            seen += 1;
            if index < keep_from {
                MASK_CHAR
            } else {
                c
            }
        })
        .collect()
}

/// Masks the number and groups it in fours from the right.
///
/// Format: `****-****-****-1234`. The visible digits always form one group.
///
/// ```
/// use booking_guard::digits::normalize;
/// use booking_guard::mask::mask_grouped;
///
/// assert_eq!(mask_grouped(&normalize("4111111111111111")), "****-****-****-1111");
/// assert_eq!(mask_grouped(&normalize("378282246310005")), "***-****-****-0005");
/// ```
pub fn mask_grouped(digits: &NormalizedDigits) -> String {
    let masked = mask(digits);
    let chars: Vec<char> = masked.as_str().chars().collect();
    let len = chars.len();

    let mut result = String::with_capacity(len + len / 4);
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (len - i) % 4 == 0 {
            result.push('-');
        }
        result.push(*c);
    }
    result
}

/// Returns the last four digits, or an empty string if there are fewer.
pub fn last_four(digits: &NormalizedDigits) -> String {
    let len = digits.len();
    if len >= VISIBLE_DIGITS {
        digits.as_str()[len - VISIBLE_DIGITS..].to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digits::normalize;

    #[test]
    fn test_mask_16_digits() {
        let masked = mask(&normalize("4111111111111111"));
        assert_eq!(masked.as_str(), "************1111");
        assert_eq!(masked.visible_suffix(), "1111");
        assert_eq!(masked.len(), 16);
    }

    #[test]
    fn test_mask_ignores_input_grouping() {
        let plain = mask(&normalize("4111111111111234"));
        let grouped = mask(&normalize("4111 1111-1111 1234"));
        assert_eq!(plain, grouped);
        assert_eq!(grouped.visible_suffix(), "1234");
    }

    #[test]
    fn test_mask_below_floor() {
        assert_eq!(mask(&normalize("")).as_str(), "");
        assert_eq!(mask(&normalize("1")).as_str(), "*");
        assert_eq!(mask(&normalize("123")).as_str(), "***");
        assert_eq!(mask(&normalize("123")).visible_suffix(), "");
    }

    #[test]
    fn test_mask_exactly_four() {
        assert_eq!(mask(&normalize("1234")).as_str(), "1234");
        assert_eq!(mask(&normalize("12345")).as_str(), "*2345");
    }

    #[test]
    fn test_mask_display_keeps_layout() {
        assert_eq!(mask_display("3782 822463 10005"), "**** ****** *0005");
        assert_eq!(mask_display("4111-1111"), "****-1111");
        assert_eq!(mask_display("12"), "**");
    }

    #[test]
    fn test_mask_display_is_idempotent() {
        let once = mask_display("6011 0009 9013 9424");
        assert_eq!(mask_display(&once), once);

        let masked = mask(&normalize("6011000990139424"));
        assert_eq!(mask_display(masked.as_str()), masked.as_str());
    }

    #[test]
    fn test_mask_grouped() {
        assert_eq!(mask_grouped(&normalize("4111111111111111")), "****-****-****-1111");
        assert_eq!(mask_grouped(&normalize("4222222222222")), "*-****-****-2222");
        assert_eq!(mask_grouped(&normalize("1234")), "1234");
        assert_eq!(mask_grouped(&normalize("")), "");
    }

    #[test]
    fn test_last_four() {
        assert_eq!(last_four(&normalize("4111111111111111")), "1111");
        assert_eq!(last_four(&normalize("4111-1111-1111-1234")), "1234");
        assert_eq!(last_four(&normalize("123")), "");
    }
}
