//! Cancellation eligibility.
//!
//! A booking may be cancelled while its status is not blocking and its first
//! leg departs at least the minimum lead time (24 hours by default) after
//! `now`. `now` is always passed in; callers sample their clock once per
//! request.
//!
//! # Example
//!
//! ```
//! use booking_guard::booking::{BookingSnapshot, BookingStatus};
//! use booking_guard::cancel::is_cancellable;
//! use chrono::{Duration, TimeZone, Utc};
//!
//! let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
//! let booking = BookingSnapshot::new(BookingStatus::Confirmed, now + Duration::hours(24));
//! assert!(is_cancellable(&booking, now));
//!
//! let booking = BookingSnapshot::new(BookingStatus::Completed, now + Duration::days(30));
//! assert!(!is_cancellable(&booking, now));
//! ```

use chrono::{DateTime, Duration, Utc};

use crate::booking::{BookingError, BookingSnapshot, BookingStatus};

/// Default minimum time between cancellation and departure.
pub const DEFAULT_MIN_LEAD_HOURS: u32 = 24;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Rules for when a booking may still be cancelled.
///
/// The default only blocks `completed` bookings. An already `cancelled`
/// booking is not blocked unless listed in `blocking_statuses`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CancellationPolicy {
    /// Minimum whole hours between now and departure.
    pub min_lead_hours: u32,
    /// Statuses that can never be cancelled.
    pub blocking_statuses: Vec<BookingStatus>,
}

impl Default for CancellationPolicy {
    fn default() -> Self {
        Self {
            min_lead_hours: DEFAULT_MIN_LEAD_HOURS,
            blocking_statuses: vec![BookingStatus::Completed],
        }
    }
}

/// Outcome of a cancellation check.
///
/// A refusal is an ordinary, user-facing answer, not a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum CancellationDecision {
    /// The booking may be cancelled.
    Allowed,
    /// The booking's status does not permit cancellation.
    BlockedStatus(BookingStatus),
    /// Departure is too close, or already past.
    InsideWindow {
        /// Fractional hours left; negative once departed.
        hours_until_departure: f64,
    },
}

impl CancellationDecision {
    /// Returns true for [`CancellationDecision::Allowed`].
    #[inline]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

impl CancellationPolicy {
    /// Sets the minimum lead time in hours.
    pub fn min_lead_hours(mut self, hours: u32) -> Self {
        self.min_lead_hours = hours;
        self
    }

    /// Adds a status that blocks cancellation.
    pub fn block(mut self, status: BookingStatus) -> Self {
        if !self.blocking_statuses.contains(&status) {
            self.blocking_statuses.push(status);
        }
        self
    }

    /// Returns the minimum lead time.
    pub fn min_lead(&self) -> Duration {
        Duration::hours(i64::from(self.min_lead_hours))
    }

    /// Decides whether `booking` may be cancelled at `now`.
    pub fn evaluate(&self, booking: &BookingSnapshot, now: DateTime<Utc>) -> CancellationDecision {
        let decision = if self.blocking_statuses.contains(&booking.status) {
            CancellationDecision::BlockedStatus(booking.status.clone())
        } else if booking.departure - now >= self.min_lead() {
            CancellationDecision::Allowed
        } else {
            CancellationDecision::InsideWindow {
                hours_until_departure: hours_until_departure(booking, now),
            }
        };

        tracing::debug!(
            status = %booking.status,
            departure = %booking.departure,
            %now,
            allowed = decision.is_allowed(),
            "evaluated cancellation"
        );

        decision
    }

    /// Returns true if `booking` may be cancelled at `now`.
    #[inline]
    pub fn is_cancellable(&self, booking: &BookingSnapshot, now: DateTime<Utc>) -> bool {
        self.evaluate(booking, now).is_allowed()
    }

    /// Evaluates a raw booking record.
    ///
    /// A record whose status or departure cannot be read is an error, never
    /// a decision.
    pub fn check(
        &self,
        status: &str,
        departure: &str,
        now: DateTime<Utc>,
    ) -> Result<CancellationDecision, BookingError> {
        let booking = BookingSnapshot::parse(status, departure).map_err(|err| {
            tracing::warn!(error = %err, "booking record could not be evaluated");
            err
        })?;
        Ok(self.evaluate(&booking, now))
    }
}

/// Fractional hours from `now` until the booking departs.
///
/// Not truncated to whole hours. Negative when departure is in the past.
pub fn hours_until_departure(booking: &BookingSnapshot, now: DateTime<Utc>) -> f64 {
    (booking.departure - now).num_milliseconds() as f64 / MILLIS_PER_HOUR
}

/// Returns true if `booking` may be cancelled at `now` under the default policy.
#[inline]
pub fn is_cancellable(booking: &BookingSnapshot, now: DateTime<Utc>) -> bool {
    CancellationPolicy::default().is_cancellable(booking, now)
}

/// Parses a raw booking record and applies the default policy.
///
/// ```
/// use booking_guard::cancel::check_cancellation;
/// use chrono::{TimeZone, Utc};
///
/// let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
/// assert_eq!(check_cancellation("confirmed", "2025-06-03T12:00:00Z", now), Ok(true));
/// assert!(check_cancellation("confirmed", "", now).is_err());
/// ```
pub fn check_cancellation(
    status: &str,
    departure: &str,
    now: DateTime<Utc>,
) -> Result<bool, BookingError> {
    CancellationPolicy::default()
        .check(status, departure, now)
        .map(|decision| decision.is_allowed())
}
