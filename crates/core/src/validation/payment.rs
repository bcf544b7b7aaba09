//! Card field checks. Shape only; nothing here talks to a payment processor.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use super::{Field, FieldErrors, require};
use crate::types::PaymentInfo;

static CARD_NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{15,16}$").expect("card number pattern is valid"));

static EXPIRY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(0[1-9]|1[0-2])/([0-9]{2})$").expect("expiry pattern is valid")
});

static CVV_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3}$").expect("cvv pattern is valid"));

/// Validate the payment section of the checkout form against today's local date.
#[must_use]
pub fn validate_payment_info(info: &PaymentInfo) -> FieldErrors {
    validate_payment_info_at(info, chrono::Local::now().date_naive())
}

/// Validate the payment section of the checkout form as of `today`.
///
/// A card is expired when the first day of its expiry month falls strictly
/// before `today`.
#[must_use]
pub fn validate_payment_info_at(info: &PaymentInfo, today: NaiveDate) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if require(&mut errors, Field::CardNumber, "Card number", &info.card_number) {
        let digits: String = info
            .card_number
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if !CARD_NUMBER_PATTERN.is_match(&digits) {
            errors.insert(Field::CardNumber, "Card number must be 15 or 16 digits");
        }
    }

    if require(&mut errors, Field::ExpiryDate, "Expiry date", &info.expiry_date) {
        match expiry_month_start(&info.expiry_date) {
            None => errors.insert(Field::ExpiryDate, "Expiry date must be in MM/YY format"),
            Some(expiry) if expiry < today => errors.insert(Field::ExpiryDate, "Card has expired"),
            Some(_) => {}
        }
    }

    if require(&mut errors, Field::Cvv, "CVV", &info.cvv) && !CVV_PATTERN.is_match(&info.cvv) {
        errors.insert(Field::Cvv, "CVV must be exactly 3 digits");
    }

    errors
}

/// First day of the month named by an `MM/YY` expiry, in the 2000s.
fn expiry_month_start(expiry: &str) -> Option<NaiveDate> {
    let captures = EXPIRY_PATTERN.captures(expiry)?;
    let month: u32 = captures.get(1)?.as_str().parse().ok()?;
    let year: i32 = captures.get(2)?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(2000 + year, month, 1)
}
