//! Fuzz target for card formatting and masking.
//!
//! Tests that formatting functions never panic on arbitrary input.

#![no_main]

use booking_guard::{format, mask};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let _ = format::format_with_separator(data, "-");
    let _ = format::split_into_groups(data);

    let formatted = format::format_card_number(data);
    let stripped = format::strip_formatting(&formatted);
    let original_digits = format::strip_formatting(data);
    assert_eq!(stripped, original_digits, "Format roundtrip should preserve digits");

    let once = mask::mask_display(data);
    assert_eq!(mask::mask_display(&once), once, "Masking should be idempotent");
    assert!(once.chars().filter(|c| c.is_ascii_digit()).count() <= mask::VISIBLE_DIGITS);
});
