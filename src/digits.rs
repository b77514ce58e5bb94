//! Digit normalization shared by identification, checksum, and masking.
//!
//! Raw user input may carry spaces, dashes, dots, or anything else a form
//! field lets through. Every other module works on [`NormalizedDigits`],
//! the punctuation-free digit sequence extracted from that input.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// A sequence of ASCII decimal digits with every other character removed.
///
/// The digit order of the original input is preserved. The sequence may be
/// empty. The backing buffer is wiped when the value is dropped, and the
/// `Debug` output never shows the digits themselves.
///
/// # Example
///
/// ```
/// use booking_guard::digits::NormalizedDigits;
///
/// let digits = NormalizedDigits::new("4111 1111-1111 1111");
/// assert_eq!(digits.as_str(), "4111111111111111");
/// assert_eq!(digits.len(), 16);
/// ```
#[derive(Clone, PartialEq, Eq, Default, Zeroize, ZeroizeOnDrop)]
pub struct NormalizedDigits {
    digits: String,
}

impl NormalizedDigits {
    /// Extracts the digits from raw input.
    pub fn new(raw: &str) -> Self {
        Self {
            digits: raw.chars().filter(|c| c.is_ascii_digit()).collect(),
        }
    }

    /// Builds a sequence from digit values (0-9).
    ///
    /// Values above 9 are skipped, so the result always upholds the
    /// digits-only invariant.
    pub fn from_values(values: &[u8]) -> Self {
        Self {
            digits: values
                .iter()
                .filter(|&&d| d <= 9)
                .map(|&d| (b'0' + d) as char)
                .collect(),
        }
    }

    /// Returns the digits as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// Returns the number of digits.
    #[inline]
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// Returns true if no digits were present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Returns the digit values (0-9) in order.
    ///
    /// The copy is wiped when dropped.
    pub fn values(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(self.digits.bytes().map(|b| b - b'0').collect())
    }

    /// Iterates over the digit values (0-9) without copying them.
    #[inline]
    pub fn iter_values(&self) -> impl DoubleEndedIterator<Item = u8> + '_ {
        self.digits.bytes().map(|b| b - b'0')
    }
}

impl fmt::Debug for NormalizedDigits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NormalizedDigits")
            .field("digits", &crate::mask::mask(self).as_str())
            .field("length", &self.len())
            .finish()
    }
}

impl From<&str> for NormalizedDigits {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Strips every non-digit character from raw input.
///
/// Shorthand for [`NormalizedDigits::new`].
#[inline]
pub fn normalize(raw: &str) -> NormalizedDigits {
    NormalizedDigits::new(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_separators() {
        assert_eq!(normalize("4111 1111 1111 1111").as_str(), "4111111111111111");
        assert_eq!(normalize("4111-1111-1111-1111").as_str(), "4111111111111111");
        assert_eq!(normalize("4111.1111.1111.1111").as_str(), "4111111111111111");
    }

    #[test]
    fn test_strips_any_non_digit() {
        assert_eq!(normalize("ab4c1d1e1").as_str(), "4111");
        assert_eq!(normalize("  3 7 x ").as_str(), "37");
    }

    #[test]
    fn test_non_ascii_digits_are_dropped() {
        // Arabic-Indic digits are not 0-9
        assert_eq!(normalize("٤١١١").as_str(), "");
        assert_eq!(normalize("4١1").as_str(), "41");
    }

    #[test]
    fn test_empty_input() {
        let digits = normalize("");
        assert!(digits.is_empty());
        assert_eq!(digits.len(), 0);

        assert!(normalize(" - - ").is_empty());
    }

    #[test]
    fn test_values() {
        assert_eq!(*normalize("4-0-9").values(), vec![4, 0, 9]);
        assert_eq!(normalize("4-0-9").iter_values().rev().collect::<Vec<_>>(), vec![9, 0, 4]);
    }

    #[test]
    fn test_from_values_skips_out_of_range() {
        assert_eq!(NormalizedDigits::from_values(&[4, 1, 12, 1]).as_str(), "411");
    }

    #[test]
    fn test_debug_is_masked() {
        let digits = normalize("4111111111111111");
        let debug = format!("{:?}", digits);
        assert!(!debug.contains("4111111111111111"));
        assert!(debug.contains("1111"));
    }
}
