//! Test card number generation.
//!
//! Generated numbers pass the Luhn check and classify as the requested
//! variant, but belong to no real account. Use them only in tests and demos.
//!
//! # Example
//!
//! ```
//! use booking_guard::generate::{generate_card_deterministic, CardGenerator};
//! use booking_guard::CardVariant;
//!
//! let number = generate_card_deterministic(CardVariant::Visa);
//! assert!(number.starts_with('4'));
//! assert!(booking_guard::is_valid(&number));
//!
//! let number = CardGenerator::new(CardVariant::Mastercard).length(16).generate_deterministic();
//! assert!(number.starts_with("51"));
//! ```

use crate::luhn;
use crate::CardVariant;

#[cfg(feature = "generate")]
use rand::Rng;

/// Returns a representative prefix for a card variant.
///
/// `Unknown` uses `9`, which no recognized variant starts with.
pub const fn prefix_for_variant(variant: CardVariant) -> &'static str {
    match variant {
        CardVariant::Visa => "4",
        CardVariant::Mastercard => "51",
        CardVariant::AmericanExpress => "34",
        CardVariant::Discover => "6011",
        CardVariant::Unknown => "9",
    }
}

/// Returns the usual length of a card of this variant.
pub const fn default_length(variant: CardVariant) -> usize {
    match variant {
        CardVariant::AmericanExpress => 15,
        _ => 16,
    }
}

/// Generates a valid card number deterministically (no randomness).
///
/// Middle digits are zeros; the last digit is the Luhn check digit.
pub fn generate_card_deterministic(variant: CardVariant) -> String {
    generate_card_deterministic_with_prefix(prefix_for_variant(variant), default_length(variant))
}

/// Generates a valid card number deterministically with a custom prefix.
///
/// A `length` that leaves no room after the prefix is raised to the prefix
/// length plus one, so the check digit always fits.
pub fn generate_card_deterministic_with_prefix(prefix: &str, length: usize) -> String {
    complete_number(prefix, length, |_| 0)
}

/// Generates a random valid card number for the given variant.
///
/// Requires the `generate` feature.
#[cfg(feature = "generate")]
pub fn generate_card(variant: CardVariant) -> String {
    let mut rng = rand::thread_rng();
    generate_card_with_rng(prefix_for_variant(variant), default_length(variant), &mut rng)
}

/// Generates a random valid card number using a provided RNG.
///
/// Useful for reproducible sequences with a seeded RNG. A `length` too short
/// for the prefix is raised as in [`generate_card_deterministic_with_prefix`].
#[cfg(feature = "generate")]
pub fn generate_card_with_rng<R: Rng>(prefix: &str, length: usize, rng: &mut R) -> String {
    complete_number(prefix, length, |_| rng.gen_range(0..10))
}

/// Generates `count` random valid card numbers for the given variant.
#[cfg(feature = "generate")]
pub fn generate_cards(variant: CardVariant, count: usize) -> Vec<String> {
    (0..count).map(|_| generate_card(variant)).collect()
}

fn complete_number(prefix: &str, length: usize, mut fill: impl FnMut(usize) -> u8) -> String {
    let mut digits: Vec<u8> = prefix
        .chars()
        .filter_map(|c| c.to_digit(10).map(|d| d as u8))
        .collect();

    let length = length.max(digits.len() + 1);

    while digits.len() < length - 1 {
        let position = digits.len();
        digits.push(fill(position));
    }

    let check_digit = luhn::generate_check_digit(&digits);
    digits.push(check_digit);

    digits.iter().map(|&d| (b'0' + d) as char).collect()
}

/// Card generator builder for custom prefixes and lengths.
#[derive(Debug, Clone)]
pub struct CardGenerator {
    prefix: String,
    length: usize,
}

impl CardGenerator {
    /// Creates a new card generator for the given variant.
    pub fn new(variant: CardVariant) -> Self {
        Self {
            prefix: prefix_for_variant(variant).to_string(),
            length: default_length(variant),
        }
    }

    /// Creates a new card generator with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            length: 16,
        }
    }

    /// Sets the card length.
    pub fn length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    /// Generates a card number deterministically.
    pub fn generate_deterministic(&self) -> String {
        generate_card_deterministic_with_prefix(&self.prefix, self.length)
    }

    /// Generates a card number with randomness.
    #[cfg(feature = "generate")]
    pub fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        generate_card_with_rng(&self.prefix, self.length, &mut rng)
    }
}
