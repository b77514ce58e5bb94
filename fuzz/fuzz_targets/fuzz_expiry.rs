//! Fuzz target for expiry date parsing.
//!
//! Tests that expiry parsing never panics on arbitrary input.

#![no_main]

use booking_guard::expiry::{self, ExpiryPoint};
use chrono::{TimeZone, Utc};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (&str, &str, &str)| {
    let (text, month, year) = data;
    let now = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();

    let _ = expiry::validate_expiry(text, now);
    let _ = ExpiryPoint::from_fields(month, year);

    if let Ok(exp) = expiry::parse_expiry(text) {
        assert!((1..=12).contains(&exp.month()));
        assert!(exp.year2() <= 99);
        let _ = exp.is_acceptable_at(now);
        assert_eq!(exp.format_short(), exp.to_string());
    }
});
