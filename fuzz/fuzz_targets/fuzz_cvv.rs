//! Fuzz target for CVV validation.
//!
//! Tests that CVV functions never panic on arbitrary input.

#![no_main]

use booking_guard::{cvv, CardVariant};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let _ = cvv::is_valid_cvv(data);

    for variant in CardVariant::ALL {
        if let Ok(validated) = cvv::validate_cvv_for_variant(data, variant) {
            assert_eq!(validated.length(), cvv::cvv_length_for_variant(variant));
        }
    }

    if let Ok(validated) = cvv::validate_cvv(data) {
        let _ = validated.is_four_digit();
        let debug = format!("{:?}", validated);
        assert!(!debug.contains(&validated.as_string()));
    }
});
