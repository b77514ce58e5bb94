//! Read-only booking view used by the cancellation policy.
//!
//! Booking records arrive from the document store with a free-text status and
//! departure timestamps as text. This module turns them into a
//! [`BookingSnapshot`] with a typed [`BookingStatus`] and a UTC departure
//! instant. Text that cannot be interpreted is a [`BookingError`], never a
//! defaulted value.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lifecycle state of a booking.
///
/// The four named states are the ones this crate knows about. Records may
/// carry others (`refunded`, `failed`, ...); those are kept as
/// [`BookingStatus::Other`] and are subject to the departure window like any
/// non-blocking status.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum BookingStatus {
    /// Created, payment not yet confirmed.
    Pending,
    /// Paid and ticketed.
    Confirmed,
    /// Travel has taken place. Terminal.
    Completed,
    /// Cancelled by the customer or the airline.
    Cancelled,
    /// Any other status text, trimmed and lowercased.
    Other(String),
}

impl BookingStatus {
    /// All named statuses.
    pub const ALL: [BookingStatus; 4] = [
        Self::Pending,
        Self::Confirmed,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Returns the lowercase name used in booking records.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Other(name) => name,
        }
    }

    /// Returns true for one of the four named statuses.
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = BookingError;

    /// Parses a status, ignoring surrounding whitespace and ASCII case.
    ///
    /// `"Completed"` and `"COMPLETED"` both read as
    /// [`BookingStatus::Completed`]. Unrecognized text becomes
    /// [`BookingStatus::Other`] holding its lowercase form. Only blank text
    /// is an error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(BookingError::UnknownStatus(s.to_string()));
        }

        let status = Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .unwrap_or_else(|| Self::Other(trimmed.to_ascii_lowercase()));
        Ok(status)
    }
}

impl TryFrom<String> for BookingStatus {
    type Error = BookingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BookingStatus> for String {
    fn from(status: BookingStatus) -> Self {
        match status {
            BookingStatus::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

/// Errors raised when a booking record cannot be interpreted.
///
/// These are data faults, distinct from a booking that is simply not
/// eligible for cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    /// The status text was empty or whitespace only. Holds the raw text.
    #[error("booking status is blank ('{0}')")]
    UnknownStatus(String),

    /// No departure timestamp was present.
    #[error("booking has no departure time")]
    MissingDeparture,

    /// The departure timestamp could not be read as a date and time.
    #[error("unparsable departure time '{value}'")]
    InvalidDeparture {
        /// The text that failed to parse.
        value: String,
    },
}

/// Formats accepted for departure timestamps without an offset; read as UTC.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Parses a departure timestamp.
///
/// RFC 3339 text is converted to UTC; a timestamp with no offset is taken
/// to be UTC already.
///
/// ```
/// use booking_guard::booking::parse_departure;
///
/// let departure = parse_departure("2025-06-01T10:30:00+02:00").unwrap();
/// assert_eq!(departure.to_rfc3339(), "2025-06-01T08:30:00+00:00");
/// ```
pub fn parse_departure(text: &str) -> Result<DateTime<Utc>, BookingError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(BookingError::MissingDeparture);
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| BookingError::InvalidDeparture {
            value: text.to_string(),
        })
}

/// The minimal booking view needed to decide on cancellation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingSnapshot {
    /// Current lifecycle state.
    pub status: BookingStatus,
    /// Departure of the first itinerary leg.
    pub departure: DateTime<Utc>,
}

impl BookingSnapshot {
    /// Creates a snapshot from typed fields.
    pub fn new(status: BookingStatus, departure: DateTime<Utc>) -> Self {
        Self { status, departure }
    }

    /// Builds a snapshot from the raw status and departure text of a record.
    ///
    /// ```
    /// use booking_guard::booking::{BookingSnapshot, BookingStatus};
    ///
    /// let booking = BookingSnapshot::parse("Confirmed", "2025-06-01T08:30:00Z").unwrap();
    /// assert_eq!(booking.status, BookingStatus::Confirmed);
    /// assert!(BookingSnapshot::parse("confirmed", "next tuesday").is_err());
    /// ```
    pub fn parse(status: &str, departure: &str) -> Result<Self, BookingError> {
        Ok(Self {
            status: status.parse()?,
            departure: parse_departure(departure)?,
        })
    }

    /// Builds a snapshot from a record's status and its itinerary legs'
    /// departure times, in travel order. Only the first leg is used.
    pub fn from_itinerary<I, S>(status: &str, leg_departures: I) -> Result<Self, BookingError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let first = leg_departures
            .into_iter()
            .next()
            .ok_or(BookingError::MissingDeparture)?;
        Self::parse(status, first.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing() {
        assert_eq!("pending".parse::<BookingStatus>(), Ok(BookingStatus::Pending));
        assert_eq!(" Confirmed ".parse::<BookingStatus>(), Ok(BookingStatus::Confirmed));
        assert_eq!("COMPLETED".parse::<BookingStatus>(), Ok(BookingStatus::Completed));
        assert_eq!("cancelled".parse::<BookingStatus>(), Ok(BookingStatus::Cancelled));
    }

    #[test]
    fn test_unlisted_status_is_kept() {
        assert_eq!(
            "refunded".parse::<BookingStatus>(),
            Ok(BookingStatus::Other("refunded".to_string()))
        );
        assert_eq!(
            " Failed ".parse::<BookingStatus>(),
            Ok(BookingStatus::Other("failed".to_string()))
        );
        // Misspellings are not folded into a named status
        let canceled = "canceled".parse::<BookingStatus>().unwrap();
        assert!(!canceled.is_known());
        assert_eq!(canceled.as_str(), "canceled");
    }

    #[test]
    fn test_blank_status() {
        assert_eq!(
            "".parse::<BookingStatus>(),
            Err(BookingError::UnknownStatus(String::new()))
        );
        assert_eq!(
            " \t ".parse::<BookingStatus>(),
            Err(BookingError::UnknownStatus(" \t ".to_string()))
        );
    }

    #[test]
    fn test_status_display_roundtrip() {
        for status in BookingStatus::ALL {
            assert!(status.is_known());
            assert_eq!(status.to_string().parse::<BookingStatus>(), Ok(status));
        }
        let other = BookingStatus::Other("on-hold".to_string());
        assert_eq!(other.to_string().parse::<BookingStatus>(), Ok(other.clone()));
        assert_eq!(String::from(other), "on-hold");
    }

    #[test]
    fn test_parse_departure_rfc3339() {
        let departure = parse_departure("2025-06-01T08:30:00Z").unwrap();
        assert_eq!(departure, Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_departure_naive_is_utc() {
        let expected = Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap();
        assert_eq!(parse_departure("2025-06-01T08:30:00").unwrap(), expected);
        assert_eq!(parse_departure("2025-06-01T08:30").unwrap(), expected);
        assert_eq!(parse_departure("2025-06-01 08:30:00").unwrap(), expected);
        assert_eq!(parse_departure("2025-06-01T08:30:00.000").unwrap(), expected);
    }

    #[test]
    fn test_parse_departure_missing() {
        assert_eq!(parse_departure(""), Err(BookingError::MissingDeparture));
        assert_eq!(parse_departure("   "), Err(BookingError::MissingDeparture));
    }

    #[test]
    fn test_parse_departure_invalid() {
        assert_eq!(
            parse_departure("not a date"),
            Err(BookingError::InvalidDeparture {
                value: "not a date".to_string()
            })
        );
        assert!(parse_departure("2025-13-01T00:00:00Z").is_err());
        assert!(parse_departure("2025-06-01").is_err());
    }

    #[test]
    fn test_snapshot_from_itinerary_uses_first_leg() {
        let booking = BookingSnapshot::from_itinerary(
            "confirmed",
            ["2025-06-01T08:30:00Z", "2025-06-01T14:00:00Z"],
        )
        .unwrap();
        assert_eq!(
            booking.departure,
            Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_snapshot_from_empty_itinerary() {
        let legs: [&str; 0] = [];
        assert_eq!(
            BookingSnapshot::from_itinerary("confirmed", legs),
            Err(BookingError::MissingDeparture)
        );
    }

    #[test]
    fn test_snapshot_parse_reports_status_first() {
        assert_eq!(
            BookingSnapshot::parse("", "garbage"),
            Err(BookingError::UnknownStatus(String::new()))
        );
        assert_eq!(
            BookingSnapshot::parse("lost", "garbage"),
            Err(BookingError::InvalidDeparture {
                value: "garbage".to_string()
            })
        );
    }
}
