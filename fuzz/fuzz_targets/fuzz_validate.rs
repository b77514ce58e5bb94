//! Fuzz target for card identification and validation.
//!
//! Tests that validate() never panics and agrees with the Luhn module.

#![no_main]

use booking_guard::{identify, is_structurally_valid, is_valid, mask, validate};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let _ = is_valid(data);
    let (digits, _) = identify(data);
    let structural = is_structurally_valid(&digits);

    match validate(data) {
        Ok(card) => {
            assert!(structural, "validate accepted a structurally invalid number");
            let _ = card.to_string();
            let _ = format!("{:?}", card);
            assert_eq!(card.masked(), mask(&digits));
        }
        Err(_) => assert!(!structural),
    }
});
