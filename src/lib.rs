//! # booking_guard
//!
//! Payment card and cancellation checks for a flight booking service.
//!
//! Every function is pure: no I/O, no shared state, no ambient clock. Time-
//! dependent decisions take the current instant as an argument.
//!
//! ## Features
//!
//! - Card variant identification from the number prefix
//! - Luhn structural validation
//! - Display grouping and PCI-safe masking
//! - Expiry acceptance and CVV length checks
//! - Booking cancellation window policy
//!
//! ## Quick Start
//!
//! ```rust
//! use booking_guard::{identify, is_structurally_valid, mask, CardVariant};
//!
//! let (digits, variant) = identify("4111 1111 1111 1111");
//! assert_eq!(variant, CardVariant::Visa);
//! assert!(is_structurally_valid(&digits));
//! assert_eq!(mask(&digits).as_str(), "************1111");
//! ```
//!
//! ## Card Validation
//!
//! ```rust
//! use booking_guard::{validate, is_valid, CardVariant};
//!
//! let card = validate("3782-822463-10005").unwrap();
//! assert_eq!(card.variant(), CardVariant::AmericanExpress);
//! assert_eq!(card.formatted(), "3782 822463 10005");
//!
//! // Safe for logging - never exposes the full card number
//! println!("Card: {}", card); // "American Express ***-****-****-0005"
//!
//! assert!(!is_valid("1234567890123456"));
//! ```
//!
//! ## Expiry
//!
//! ```rust
//! use booking_guard::expiry::{is_expiry_acceptable, ExpiryPoint};
//! use chrono::{TimeZone, Utc};
//!
//! let now = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
//! assert!(is_expiry_acceptable(ExpiryPoint::new(3, 25).unwrap(), now));
//! assert!(!is_expiry_acceptable(ExpiryPoint::new(2, 25).unwrap(), now));
//! ```
//!
//! ## Cancellation
//!
//! ```rust
//! use booking_guard::booking::BookingSnapshot;
//! use booking_guard::cancel::{CancellationDecision, CancellationPolicy};
//! use chrono::{TimeZone, Utc};
//!
//! let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
//! let booking = BookingSnapshot::parse("confirmed", "2025-06-02T06:00:00Z").unwrap();
//!
//! let decision = CancellationPolicy::default().evaluate(&booking, now);
//! assert_eq!(
//!     decision,
//!     CancellationDecision::InsideWindow { hours_until_departure: 18.0 }
//! );
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | Serialize/deserialize `CancellationPolicy`, `BookingStatus`, `CardVariant` |
//! | `generate` | Random test card generation |
//! | `cli` | Command-line tool |
//!
//! ## Security
//!
//! - Card digits are zeroized when `NormalizedDigits`, `ValidatedCard`, or
//!   `ValidatedCvv` is dropped
//! - `Debug` and `Display` show masked numbers only
//! - Log events carry masked identifiers only
//! - No unsafe code (`#![deny(unsafe_code)]`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod booking;
pub mod cancel;
pub mod card;
pub mod cvv;
pub mod detect;
pub mod digits;
pub mod error;
pub mod expiry;
pub mod format;
pub mod generate;
pub mod luhn;
pub mod mask;
pub mod validate;

// Re-export main types at crate root
pub use booking::{BookingError, BookingSnapshot, BookingStatus};
pub use cancel::{check_cancellation, is_cancellable, CancellationDecision, CancellationPolicy};
pub use card::{CardVariant, ValidatedCard, MAX_CARD_DIGITS, MIN_CARD_DIGITS};
pub use detect::identify;
pub use digits::{normalize, NormalizedDigits};
pub use error::{PaymentError, ValidationError};
pub use expiry::{is_expiry_acceptable, ExpiryPoint};
pub use luhn::is_structurally_valid;
pub use mask::{mask, MaskedIdentifier};
pub use validate::{is_valid, validate, validate_payment, PaymentDetails, ValidatedPayment};
