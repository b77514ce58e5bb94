//! CLI tool for payment card and booking cancellation checks.
//!
//! # Usage
//!
//! ```bash
//! # Identify and check a card number
//! bookingguard identify "4111 1111 1111 1111"
//!
//! # Check a whole payment submission
//! bookingguard pay 4111111111111111 --month 03 --year 27 --cvv 123
//!
//! # Can this booking still be cancelled?
//! bookingguard cancel confirmed 2025-06-02T12:00:00Z --now 2025-06-01T12:00:00Z
//!
//! # Use a policy file and block already-cancelled bookings
//! bookingguard cancel cancelled 2025-06-09T08:00:00Z --policy policy.json --block cancelled
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG` (default `warn`).

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use booking_guard::booking::{BookingSnapshot, BookingStatus};
use booking_guard::cancel::{CancellationDecision, CancellationPolicy};
use booking_guard::{cvv, expiry, format, generate, luhn, mask};
use booking_guard::{identify, validate_payment, CardVariant, PaymentDetails};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bookingguard")]
#[command(author, version, about = "Payment card and booking cancellation checks")]
struct Cli {
    /// Evaluate as of this instant (RFC 3339) instead of the system clock
    #[arg(long, global = true, value_parser = parse_instant)]
    now: Option<DateTime<Utc>>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Identify a card number's variant and check its structure
    Identify {
        /// Card number (spaces and dashes allowed)
        card_number: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Check if a card number passes the Luhn checksum
    Luhn {
        /// Card number to check
        card_number: String,
    },

    /// Format a card number for display
    Format {
        /// Card number to format
        card_number: String,

        /// Separator to use
        #[arg(short, long, default_value = " ")]
        separator: String,
    },

    /// Mask a card number, leaving the last four digits
    Mask {
        /// Card number to mask
        card_number: String,

        /// Group the masked output in fours
        #[arg(short, long)]
        grouped: bool,
    },

    /// Check a card expiry date
    Expiry {
        /// Expiry date (MM/YY, MM/YYYY, MMYY)
        date: String,
    },

    /// Validate a CVV/CVC
    Cvv {
        /// CVV to validate
        cvv: String,

        /// Card variant (affects the required length)
        #[arg(short, long)]
        variant: Option<VariantArg>,
    },

    /// Check a full payment submission
    Pay {
        /// Card number
        card_number: String,

        /// Expiry month
        #[arg(long)]
        month: String,

        /// Expiry year (two or four digits)
        #[arg(long)]
        year: String,

        /// Security code
        #[arg(long)]
        cvv: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Decide whether a booking may still be cancelled
    Cancel {
        /// Booking status (pending, confirmed, completed, cancelled, or any other)
        status: String,

        /// Departure time of each itinerary leg, in travel order
        #[arg(required = true)]
        departures: Vec<String>,

        /// JSON policy file
        #[arg(short, long)]
        policy: Option<PathBuf>,

        /// Minimum hours before departure
        #[arg(long)]
        min_lead_hours: Option<u32>,

        /// Additional status that blocks cancellation (repeatable)
        #[arg(long, value_parser = parse_status)]
        block: Vec<BookingStatus>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Generate test card numbers (for testing only)
    Generate {
        /// Card variant to generate
        #[arg(short, long, default_value = "visa")]
        variant: VariantArg,

        /// Number of cards to generate
        #[arg(short, long, default_value = "1")]
        count: usize,

        /// Output formatted (with spaces)
        #[arg(short, long)]
        formatted: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum VariantArg {
    Visa,
    Mastercard,
    Amex,
    Discover,
    Unknown,
}

impl From<VariantArg> for CardVariant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Visa => CardVariant::Visa,
            VariantArg::Mastercard => CardVariant::Mastercard,
            VariantArg::Amex => CardVariant::AmericanExpress,
            VariantArg::Discover => CardVariant::Discover,
            VariantArg::Unknown => CardVariant::Unknown,
        }
    }
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp: {e}"))
}

fn parse_status(s: &str) -> Result<BookingStatus, String> {
    s.parse().map_err(|e: booking_guard::BookingError| e.to_string())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    // Sampled once so every check in this command sees the same instant.
    let now = cli.now.unwrap_or_else(Utc::now);

    match cli.command {
        Commands::Identify {
            card_number,
            output,
        } => cmd_identify(&card_number, output),
        Commands::Luhn { card_number } => cmd_luhn(&card_number),
        Commands::Format {
            card_number,
            separator,
        } => cmd_format(&card_number, &separator),
        Commands::Mask {
            card_number,
            grouped,
        } => cmd_mask(&card_number, grouped),
        Commands::Expiry { date } => cmd_expiry(&date, now),
        Commands::Cvv { cvv: code, variant } => cmd_cvv(&code, variant.map(Into::into)),
        Commands::Pay {
            card_number,
            month,
            year,
            cvv: code,
            output,
        } => {
            let details = PaymentDetails {
                card_number: &card_number,
                expiry_month: &month,
                expiry_year: &year,
                cvv: &code,
            };
            cmd_pay(&details, now, output)
        }
        Commands::Cancel {
            status,
            departures,
            policy,
            min_lead_hours,
            block,
            output,
        } => {
            let policy = match build_policy(policy.as_deref(), min_lead_hours, &block) {
                Ok(policy) => policy,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::from(2);
                }
            };
            cmd_cancel(&status, &departures, &policy, now, output)
        }
        Commands::Generate {
            variant,
            count,
            formatted,
        } => cmd_generate(variant.into(), count, formatted),
    }
}

fn cmd_identify(card_number: &str, output: OutputFormat) -> ExitCode {
    let (digits, variant) = identify(card_number);
    let valid = luhn::is_structurally_valid(&digits);
    let masked = mask::mask(&digits);

    match output {
        OutputFormat::Text => {
            println!("Variant: {}", variant);
            println!("Digits: {}", digits.len());
            println!("Structurally Valid: {}", if valid { "yes" } else { "no" });
            println!("Masked: {}", masked);
        }
        OutputFormat::Json => {
            let body = json!({
                "variant": variant.name(),
                "length": digits.len(),
                "valid": valid,
                "masked": masked.as_str(),
            });
            println!("{}", body);
        }
    }

    exit_for(valid)
}

fn cmd_luhn(card_number: &str) -> ExitCode {
    let (digits, _) = identify(card_number);
    if luhn::is_structurally_valid(&digits) {
        println!("Luhn check: PASS");
        ExitCode::SUCCESS
    } else {
        println!("Luhn check: FAIL");
        ExitCode::FAILURE
    }
}

fn cmd_format(card_number: &str, separator: &str) -> ExitCode {
    println!("{}", format::format_with_separator(card_number, separator));
    ExitCode::SUCCESS
}

fn cmd_mask(card_number: &str, grouped: bool) -> ExitCode {
    let (digits, _) = identify(card_number);
    if grouped {
        println!("{}", mask::mask_grouped(&digits));
    } else {
        println!("{}", mask::mask(&digits));
    }
    ExitCode::SUCCESS
}

fn cmd_expiry(date: &str, now: DateTime<Utc>) -> ExitCode {
    match expiry::validate_expiry(date, now) {
        Ok(exp) => {
            println!("Valid: yes");
            println!("Month: {:02}", exp.month());
            println!("Year: {:02}", exp.year2());
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("Valid: no");
            println!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_cvv(code: &str, variant: Option<CardVariant>) -> ExitCode {
    let result = match variant {
        Some(v) => cvv::validate_cvv_for_variant(code, v),
        None => cvv::validate_cvv(code),
    };

    match result {
        Ok(validated) => {
            println!("Valid: yes");
            println!("Length: {} digits", validated.length());
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("Valid: no");
            println!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_pay(details: &PaymentDetails<'_>, now: DateTime<Utc>, output: OutputFormat) -> ExitCode {
    let result = validate_payment(details, now);

    match (&result, output) {
        (Ok(payment), OutputFormat::Text) => {
            println!("Accepted: yes");
            println!("Variant: {}", payment.card.variant());
            println!("Card: {}", payment.card.masked_grouped());
            println!("Expiry: {}", payment.expiry);
        }
        (Err(e), OutputFormat::Text) => {
            println!("Accepted: no");
            println!("Error: {}", e);
        }
        (Ok(payment), OutputFormat::Json) => {
            let body = json!({
                "accepted": true,
                "variant": payment.card.variant().name(),
                "masked": payment.card.masked().as_str(),
                "expiry": payment.expiry.format_short(),
            });
            println!("{}", body);
        }
        (Err(e), OutputFormat::Json) => {
            let body = json!({ "accepted": false, "error": e.to_string() });
            println!("{}", body);
        }
    }

    exit_for(result.is_ok())
}

fn cmd_cancel(
    status: &str,
    departures: &[String],
    policy: &CancellationPolicy,
    now: DateTime<Utc>,
    output: OutputFormat,
) -> ExitCode {
    let booking = match BookingSnapshot::from_itinerary(status, departures) {
        Ok(booking) => booking,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    let decision = policy.evaluate(&booking, now);
    let reason = match &decision {
        CancellationDecision::Allowed => "eligible for cancellation".to_string(),
        CancellationDecision::BlockedStatus(status) => {
            format!("{} bookings cannot be cancelled", status)
        }
        CancellationDecision::InsideWindow {
            hours_until_departure,
        } => format!(
            "departure in {:.2} hours, cancellation closes {} hours before",
            hours_until_departure, policy.min_lead_hours
        ),
    };

    match output {
        OutputFormat::Text => {
            println!(
                "Cancellable: {}",
                if decision.is_allowed() { "yes" } else { "no" }
            );
            println!("Reason: {}", reason);
        }
        OutputFormat::Json => {
            let body = json!({
                "cancellable": decision.is_allowed(),
                "status": booking.status,
                "departure": booking.departure,
                "reason": reason,
            });
            println!("{}", body);
        }
    }

    exit_for(decision.is_allowed())
}

fn cmd_generate(variant: CardVariant, count: usize, formatted: bool) -> ExitCode {
    for number in generate::generate_cards(variant, count) {
        if formatted {
            println!("{}", format::format_card_number(&number));
        } else {
            println!("{}", number);
        }
    }
    ExitCode::SUCCESS
}

fn build_policy(
    path: Option<&Path>,
    min_lead_hours: Option<u32>,
    block: &[BookingStatus],
) -> Result<CancellationPolicy, String> {
    let mut policy = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("cannot read policy {}: {}", path.display(), e))?;
            serde_json::from_str::<CancellationPolicy>(&text)
                .map_err(|e| format!("invalid policy {}: {}", path.display(), e))?
        }
        None => CancellationPolicy::default(),
    };

    if let Some(hours) = min_lead_hours {
        policy = policy.min_lead_hours(hours);
    }
    for status in block {
        policy = policy.block(status.clone());
    }

    tracing::debug!(?policy, "using cancellation policy");
    Ok(policy)
}

fn exit_for(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
