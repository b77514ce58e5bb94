//! Fuzz target for booking record parsing and cancellation.
//!
//! Tests that raw records never panic and that decisions follow the window.

#![no_main]

use arbitrary::Arbitrary;
use booking_guard::booking::{BookingSnapshot, BookingStatus};
use booking_guard::cancel::CancellationPolicy;
use chrono::{TimeZone, Utc};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Record {
    status: String,
    departure: String,
    min_lead_hours: u16,
}

fuzz_target!(|record: Record| {
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    let policy = CancellationPolicy::default().min_lead_hours(u32::from(record.min_lead_hours));

    if let Ok(decision) = policy.check(&record.status, &record.departure, now) {
        let booking = BookingSnapshot::parse(&record.status, &record.departure).unwrap();
        let expected = booking.status != BookingStatus::Completed
            && booking.departure - now >= policy.min_lead();
        assert_eq!(decision.is_allowed(), expected);
    }
});
