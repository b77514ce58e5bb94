//! Card expiry acceptance.
//!
//! A card carries a printed month and two-digit year. It stays usable through
//! the whole of that month. Acceptance is decided against an explicit `now`
//! supplied by the caller; nothing here reads the system clock.
//!
//! # Supported Formats
//!
//! - `MM/YY` - e.g., "12/25"
//! - `MM-YY` - e.g., "12-25"
//! - `MMYY` - e.g., "1225"
//! - `MM/YYYY`, `MM-YYYY`, `MMYYYY` - the year is reduced to its last two digits
//!
//! # Example
//!
//! ```
//! use booking_guard::expiry::{is_expiry_acceptable, parse_expiry};
//! use chrono::{TimeZone, Utc};
//!
//! let now = Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap();
//!
//! assert!(is_expiry_acceptable(parse_expiry("03/25").unwrap(), now));
//! assert!(!is_expiry_acceptable(parse_expiry("02/25").unwrap(), now));
//! ```
//!
//! # Century handling
//!
//! Only the two-digit year is compared, against `now.year() % 100`. A card
//! printed `01/99` is therefore treated as far in the future, not as 1999.
//! This mirrors the data the checkout receives and is a known limitation.

use chrono::{DateTime, Datelike, Utc};
use std::fmt;
use thiserror::Error;

/// A printed card expiry: month (1-12) and two-digit year (0-99).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExpiryPoint {
    month: u8,
    year2: u8,
}

impl ExpiryPoint {
    /// Creates an expiry point.
    ///
    /// A month outside 1-12 or a year above 99 is an error, never clamped.
    pub fn new(month: u8, year2: u8) -> Result<Self, ExpiryError> {
        if !(1..=12).contains(&month) {
            return Err(ExpiryError::InvalidMonth(month as u16));
        }
        if year2 > 99 {
            return Err(ExpiryError::InvalidYear(year2 as u16));
        }
        Ok(Self { month, year2 })
    }

    /// Parses the separate month and year fields of a payment form.
    ///
    /// The year may be given with two or four digits.
    ///
    /// ```
    /// use booking_guard::expiry::ExpiryPoint;
    ///
    /// let exp = ExpiryPoint::from_fields("7", "2027").unwrap();
    /// assert_eq!((exp.month(), exp.year2()), (7, 27));
    /// ```
    pub fn from_fields(month: &str, year: &str) -> Result<Self, ExpiryError> {
        let month = month.trim();
        let year = year.trim();
        if month.is_empty() || year.is_empty() {
            return Err(ExpiryError::Empty);
        }
        if month.len() > 2 {
            return Err(ExpiryError::InvalidFormat);
        }
        parse_month_year(month, year)
    }

    /// Returns the month (1-12).
    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the two-digit year (0-99).
    #[inline]
    pub const fn year2(&self) -> u8 {
        self.year2
    }

    /// Returns true if the card may still be charged at `now`.
    #[inline]
    pub fn is_acceptable_at(&self, now: DateTime<Utc>) -> bool {
        is_expiry_acceptable(*self, now)
    }

    /// Formats as MM/YY.
    pub fn format_short(&self) -> String {
        format!("{:02}/{:02}", self.month, self.year2)
    }
}

impl fmt::Display for ExpiryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.year2)
    }
}

/// Errors that can occur during expiry parsing/validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpiryError {
    /// The input is empty.
    #[error("expiry date is empty")]
    Empty,

    /// Could not split the input into month and year.
    #[error("invalid expiry format (expected MM/YY or MM/YYYY)")]
    InvalidFormat,

    /// Month is out of range (must be 1-12).
    #[error("invalid month {0}: must be 1-12")]
    InvalidMonth(u16),

    /// Two-digit year is out of range (must be 0-99).
    #[error("invalid year {0}: must be two digits")]
    InvalidYear(u16),

    /// The card has lapsed.
    #[error("card expired ({month:02}/{year2:02})")]
    Expired {
        /// The expiry month.
        month: u8,
        /// The two-digit expiry year.
        year2: u8,
    },
}

/// Decides whether an expiry is still acceptable at `now`.
///
/// Rejects when the two-digit year is behind the current one, or when it is
/// the current year and the month is behind the current month. The current
/// month itself is accepted.
pub fn is_expiry_acceptable(expiry: ExpiryPoint, now: DateTime<Utc>) -> bool {
    let current_year2 = now.year().rem_euclid(100) as u8;
    let current_month = now.month() as u8;

    if expiry.year2 < current_year2 {
        return false;
    }
    if expiry.year2 == current_year2 && expiry.month < current_month {
        return false;
    }
    true
}

/// Parses an expiry date string.
///
/// ```
/// use booking_guard::expiry::parse_expiry;
///
/// let exp = parse_expiry("12/25").unwrap();
/// assert_eq!(exp.month(), 12);
/// assert_eq!(exp.year2(), 25);
///
/// let exp = parse_expiry("01/2030").unwrap();
/// assert_eq!(exp.year2(), 30);
/// ```
pub fn parse_expiry(input: &str) -> Result<ExpiryPoint, ExpiryError> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ExpiryError::Empty);
    }

    if let Some((month_str, year_str)) = input.split_once('/').or_else(|| input.split_once('-')) {
        return parse_month_year(month_str.trim(), year_str.trim());
    }

    if !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ExpiryError::InvalidFormat);
    }

    match input.len() {
        4 => parse_month_year(&input[0..2], &input[2..4]),
        6 => parse_month_year(&input[0..2], &input[2..6]),
        _ => Err(ExpiryError::InvalidFormat),
    }
}

/// Parses an expiry string and checks it against `now`.
pub fn validate_expiry(input: &str, now: DateTime<Utc>) -> Result<ExpiryPoint, ExpiryError> {
    let expiry = parse_expiry(input)?;
    if !is_expiry_acceptable(expiry, now) {
        return Err(ExpiryError::Expired {
            month: expiry.month,
            year2: expiry.year2,
        });
    }
    Ok(expiry)
}

fn parse_month_year(month_str: &str, year_str: &str) -> Result<ExpiryPoint, ExpiryError> {
    if month_str.is_empty() || !month_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ExpiryError::InvalidFormat);
    }
    if !year_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ExpiryError::InvalidFormat);
    }

    let month: u16 = month_str.parse().map_err(|_| ExpiryError::InvalidFormat)?;
    if !(1..=12).contains(&month) {
        return Err(ExpiryError::InvalidMonth(month));
    }

    let year2 = match year_str.len() {
        2 => year_str.parse::<u8>().map_err(|_| ExpiryError::InvalidFormat)?,
        4 => {
            let year: u16 = year_str.parse().map_err(|_| ExpiryError::InvalidFormat)?;
            (year % 100) as u8
        }
        _ => return Err(ExpiryError::InvalidFormat),
    };

    ExpiryPoint::new(month as u8, year2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn march_2025() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_mm_yy() {
        let exp = parse_expiry("12/25").unwrap();
        assert_eq!(exp.month(), 12);
        assert_eq!(exp.year2(), 25);
    }

    #[test]
    fn test_parse_four_digit_year() {
        let exp = parse_expiry("01/2030").unwrap();
        assert_eq!((exp.month(), exp.year2()), (1, 30));

        let exp = parse_expiry("122025").unwrap();
        assert_eq!((exp.month(), exp.year2()), (12, 25));
    }

    #[test]
    fn test_parse_with_dash() {
        let exp = parse_expiry("06-28").unwrap();
        assert_eq!((exp.month(), exp.year2()), (6, 28));
    }

    #[test]
    fn test_parse_mmyy() {
        let exp = parse_expiry("1225").unwrap();
        assert_eq!((exp.month(), exp.year2()), (12, 25));
    }

    #[test]
    fn test_parse_with_spaces() {
        let exp = parse_expiry("  12 / 25  ").unwrap();
        assert_eq!((exp.month(), exp.year2()), (12, 25));
    }

    #[test]
    fn test_invalid_month() {
        assert_eq!(parse_expiry("00/25"), Err(ExpiryError::InvalidMonth(0)));
        assert_eq!(parse_expiry("13/25"), Err(ExpiryError::InvalidMonth(13)));
        assert_eq!(ExpiryPoint::new(13, 25), Err(ExpiryError::InvalidMonth(13)));
    }

    #[test]
    fn test_invalid_year() {
        assert_eq!(ExpiryPoint::new(1, 100), Err(ExpiryError::InvalidYear(100)));
        assert_eq!(parse_expiry("01/5"), Err(ExpiryError::InvalidFormat));
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(parse_expiry(""), Err(ExpiryError::Empty));
        assert_eq!(parse_expiry("abc"), Err(ExpiryError::InvalidFormat));
        assert_eq!(parse_expiry("1/2/3"), Err(ExpiryError::InvalidFormat));
        assert_eq!(parse_expiry("+1/25"), Err(ExpiryError::InvalidFormat));
        assert_eq!(parse_expiry("12345"), Err(ExpiryError::InvalidFormat));
    }

    #[test]
    fn test_from_fields() {
        let exp = ExpiryPoint::from_fields("03", "25").unwrap();
        assert_eq!((exp.month(), exp.year2()), (3, 25));
        assert_eq!(ExpiryPoint::from_fields("", "25"), Err(ExpiryError::Empty));
        assert_eq!(
            ExpiryPoint::from_fields("0", "25"),
            Err(ExpiryError::InvalidMonth(0))
        );
        assert_eq!(
            ExpiryPoint::from_fields("003", "25"),
            Err(ExpiryError::InvalidFormat)
        );
    }

    #[test]
    fn test_acceptance_boundary() {
        let now = march_2025();
        assert!(is_expiry_acceptable(ExpiryPoint::new(3, 25).unwrap(), now));
        assert!(!is_expiry_acceptable(ExpiryPoint::new(2, 25).unwrap(), now));
        assert!(is_expiry_acceptable(ExpiryPoint::new(1, 26).unwrap(), now));
        assert!(!is_expiry_acceptable(ExpiryPoint::new(12, 24).unwrap(), now));
    }

    #[test]
    fn test_acceptance_last_instant_of_month() {
        let now = Utc.with_ymd_and_hms(2025, 3, 31, 23, 59, 59).unwrap();
        assert!(is_expiry_acceptable(ExpiryPoint::new(3, 25).unwrap(), now));

        let now = Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap();
        assert!(!is_expiry_acceptable(ExpiryPoint::new(3, 25).unwrap(), now));
    }

    #[test]
    fn test_two_digit_year_wraps_as_supplied() {
        // 99 compares above 25 even though it was likely printed as 1999
        let now = march_2025();
        assert!(is_expiry_acceptable(ExpiryPoint::new(1, 99).unwrap(), now));

        // Across a century boundary, next month's card reads as lapsed
        let now = Utc.with_ymd_and_hms(2099, 12, 1, 0, 0, 0).unwrap();
        assert!(!is_expiry_acceptable(ExpiryPoint::new(1, 0).unwrap(), now));
    }

    #[test]
    fn test_validate_expiry() {
        let now = march_2025();
        assert!(validate_expiry("03/25", now).is_ok());
        assert_eq!(
            validate_expiry("02/25", now),
            Err(ExpiryError::Expired { month: 2, year2: 25 })
        );
        assert_eq!(validate_expiry("13/25", now), Err(ExpiryError::InvalidMonth(13)));
    }

    #[test]
    fn test_format() {
        let exp = ExpiryPoint::new(3, 5).unwrap();
        assert_eq!(exp.format_short(), "03/05");
        assert_eq!(exp.to_string(), "03/05");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(ExpiryError::Empty.to_string(), "expiry date is empty");
        assert_eq!(
            ExpiryError::Expired { month: 2, year2: 5 }.to_string(),
            "card expired (02/05)"
        );
    }
}
