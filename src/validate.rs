//! Card and payment validation entry points.
//!
//! `validate` checks a card number on its own. `validate_payment` runs the
//! full payment-submission sequence: identify the card, check its structure,
//! check the expiry against `now`, and check the security code length for the
//! card's variant. The first failure is returned.

use chrono::{DateTime, Utc};

use crate::card::{ValidatedCard, MAX_CARD_DIGITS, MIN_CARD_DIGITS};
use crate::cvv::{validate_cvv_for_variant, ValidatedCvv};
use crate::detect::identify;
use crate::error::{PaymentError, ValidationError};
use crate::expiry::{is_expiry_acceptable, ExpiryError, ExpiryPoint};
use crate::luhn;

/// Validates a card number string.
///
/// Non-digit characters are stripped first. Numbers of any variant,
/// including [`crate::CardVariant::Unknown`], are accepted once length and
/// checksum pass.
///
/// # Example
///
/// ```
/// use booking_guard::{validate, CardVariant};
///
/// let card = validate("4111-1111-1111-1111").unwrap();
/// assert_eq!(card.variant(), CardVariant::Visa);
/// assert_eq!(card.last_four(), "1111");
///
/// assert!(validate("4111-1111-1111-1112").is_err());
/// ```
pub fn validate(input: &str) -> Result<ValidatedCard, ValidationError> {
    if input.is_empty() {
        return Err(ValidationError::Empty);
    }

    let (digits, variant) = identify(input);
    let count = digits.len();

    if count == 0 {
        return Err(ValidationError::NoDigits);
    }
    if count < MIN_CARD_DIGITS {
        return Err(ValidationError::TooShort {
            length: count,
            minimum: MIN_CARD_DIGITS,
        });
    }
    if count > MAX_CARD_DIGITS {
        return Err(ValidationError::TooLong {
            length: count,
            maximum: MAX_CARD_DIGITS,
        });
    }
    if !luhn::is_structurally_valid(&digits) {
        return Err(ValidationError::InvalidChecksum);
    }

    Ok(ValidatedCard::new(variant, &digits))
}

/// Quickly checks if a card number is valid.
///
/// ```
/// use booking_guard::is_valid;
///
/// assert!(is_valid("4111 1111 1111 1111"));
/// assert!(!is_valid("1234567890123456"));
/// ```
#[inline]
pub fn is_valid(input: &str) -> bool {
    validate(input).is_ok()
}

/// Raw payment form fields as submitted.
#[derive(Clone, Copy)]
pub struct PaymentDetails<'a> {
    /// Card number, possibly with spaces or dashes.
    pub card_number: &'a str,
    /// Expiry month field.
    pub expiry_month: &'a str,
    /// Expiry year field, two or four digits.
    pub expiry_year: &'a str,
    /// Security code.
    pub cvv: &'a str,
}

/// Payment details that passed every check.
#[derive(Debug, Clone)]
pub struct ValidatedPayment {
    /// The checked card.
    pub card: ValidatedCard,
    /// The accepted expiry.
    pub expiry: ExpiryPoint,
    /// The checked security code.
    pub cvv: ValidatedCvv,
}

/// Checks a payment submission at `now`.
///
/// # Example
///
/// ```
/// use booking_guard::validate::{validate_payment, PaymentDetails};
/// use booking_guard::error::PaymentError;
/// use chrono::{TimeZone, Utc};
///
/// let now = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
/// let details = PaymentDetails {
///     card_number: "4111 1111 1111 1111",
///     expiry_month: "03",
///     expiry_year: "25",
///     cvv: "123",
/// };
/// let payment = validate_payment(&details, now).unwrap();
/// assert_eq!(payment.card.masked().as_str(), "************1111");
///
/// let expired = PaymentDetails { expiry_month: "02", ..details };
/// assert!(matches!(validate_payment(&expired, now), Err(PaymentError::Expiry(_))));
/// ```
pub fn validate_payment(
    details: &PaymentDetails<'_>,
    now: DateTime<Utc>,
) -> Result<ValidatedPayment, PaymentError> {
    let result = check_payment(details, now);

    match &result {
        Ok(payment) => tracing::debug!(
            card = %payment.card.masked(),
            variant = %payment.card.variant(),
            expiry = %payment.expiry,
            "payment details accepted"
        ),
        Err(err) => tracing::debug!(error = %err, "payment details rejected"),
    }

    result
}

fn check_payment(
    details: &PaymentDetails<'_>,
    now: DateTime<Utc>,
) -> Result<ValidatedPayment, PaymentError> {
    let card = validate(details.card_number)?;

    let expiry = ExpiryPoint::from_fields(details.expiry_month, details.expiry_year)?;
    if !is_expiry_acceptable(expiry, now) {
        return Err(ExpiryError::Expired {
            month: expiry.month(),
            year2: expiry.year2(),
        }
        .into());
    }

    let cvv = validate_cvv_for_variant(details.cvv, card.variant())?;

    Ok(ValidatedPayment { card, expiry, cvv })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cvv::CvvError;
    use crate::CardVariant;
    use chrono::TimeZone;

    const VISA_VALID: &str = "4111111111111111";
    const MASTERCARD_VALID: &str = "5500000000000004";
    const AMEX_VALID: &str = "378282246310005";
    const DISCOVER_VALID: &str = "6011111111111117";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap()
    }

    fn details(card_number: &'static str, cvv: &'static str) -> PaymentDetails<'static> {
        PaymentDetails {
            card_number,
            expiry_month: "11",
            expiry_year: "27",
            cvv,
        }
    }

    #[test]
    fn test_validate_variants() {
        assert_eq!(validate(VISA_VALID).unwrap().variant(), CardVariant::Visa);
        assert_eq!(
            validate(MASTERCARD_VALID).unwrap().variant(),
            CardVariant::Mastercard
        );
        assert_eq!(
            validate(AMEX_VALID).unwrap().variant(),
            CardVariant::AmericanExpress
        );
        assert_eq!(
            validate(DISCOVER_VALID).unwrap().variant(),
            CardVariant::Discover
        );
    }

    #[test]
    fn test_validate_unknown_variant_with_valid_checksum() {
        // Diners Club passes Luhn but is not a recognized variant
        let card = validate("30569309025904").unwrap();
        assert_eq!(card.variant(), CardVariant::Unknown);
    }

    #[test]
    fn test_validate_formatted() {
        assert!(validate("4111-1111-1111-1111").is_ok());
        assert!(validate("4111 1111 1111 1111").is_ok());
        assert!(validate("4111.1111.1111.1111").is_ok());
    }

    #[test]
    fn test_validate_errors() {
        assert_eq!(validate("").unwrap_err(), ValidationError::Empty);
        assert_eq!(validate(" -- ").unwrap_err(), ValidationError::NoDigits);
        assert_eq!(
            validate("411111111111").unwrap_err(),
            ValidationError::TooShort {
                length: 12,
                minimum: 13
            }
        );
        assert_eq!(
            validate("41111111111111111111").unwrap_err(),
            ValidationError::TooLong {
                length: 20,
                maximum: 19
            }
        );
        assert_eq!(
            validate("4111111111111112").unwrap_err(),
            ValidationError::InvalidChecksum
        );
    }

    #[test]
    fn test_is_valid() {
        assert!(is_valid(VISA_VALID));
        assert!(!is_valid("1234567890123456"));
        assert!(!is_valid(""));
    }

    #[test]
    fn test_validate_payment_ok() {
        let payment = validate_payment(&details(VISA_VALID, "123"), now()).unwrap();
        assert_eq!(payment.card.variant(), CardVariant::Visa);
        assert_eq!(payment.expiry.month(), 11);
        assert_eq!(payment.cvv.length(), 3);
    }

    #[test]
    fn test_validate_payment_amex_needs_four_digit_cvv() {
        assert!(validate_payment(&details(AMEX_VALID, "1234"), now()).is_ok());
        assert!(matches!(
            validate_payment(&details(AMEX_VALID, "123"), now()),
            Err(PaymentError::Cvv(CvvError::WrongLengthForVariant { .. }))
        ));
    }

    #[test]
    fn test_validate_payment_card_checked_first() {
        let bad = PaymentDetails {
            card_number: "4111111111111112",
            expiry_month: "13",
            expiry_year: "20",
            cvv: "",
        };
        assert_eq!(
            validate_payment(&bad, now()).unwrap_err(),
            PaymentError::Card(ValidationError::InvalidChecksum)
        );
    }

    #[test]
    fn test_validate_payment_expiry() {
        let expired = PaymentDetails {
            expiry_month: "02",
            expiry_year: "25",
            ..details(VISA_VALID, "123")
        };
        assert_eq!(
            validate_payment(&expired, now()).unwrap_err(),
            PaymentError::Expiry(ExpiryError::Expired { month: 2, year2: 25 })
        );

        let current = PaymentDetails {
            expiry_month: "3",
            expiry_year: "2025",
            ..details(VISA_VALID, "123")
        };
        assert!(validate_payment(&current, now()).is_ok());

        let malformed = PaymentDetails {
            expiry_month: "13",
            ..details(VISA_VALID, "123")
        };
        assert_eq!(
            validate_payment(&malformed, now()).unwrap_err(),
            PaymentError::Expiry(ExpiryError::InvalidMonth(13))
        );
    }

    #[test]
    fn test_payment_debug_is_safe() {
        let payment = validate_payment(&details(VISA_VALID, "987"), now()).unwrap();
        let debug = format!("{:?}", payment);
        assert!(!debug.contains(VISA_VALID));
        assert!(!debug.contains("987"));
    }
}
