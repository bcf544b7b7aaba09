//! Shipping address checks.

use std::sync::LazyLock;

use regex::Regex;

use super::{Field, FieldErrors, require, validate_email};
use crate::types::ShippingInfo;

/// Names and places: 2-50 letters, spaces, hyphens or apostrophes.
static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s'\-]{2,50}$").expect("name pattern is valid"));

/// Canadian postal code, e.g. `A1A 1A1`, `A1A-1A1` or `A1A1A1`.
static POSTAL_CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][0-9][A-Za-z][ \-]?[0-9][A-Za-z][0-9]$")
        .expect("postal code pattern is valid")
});

const MIN_ADDRESS_LENGTH: usize = 5;
const MAX_ADDRESS_LENGTH: usize = 100;

/// Validate the shipping section of the checkout form.
#[must_use]
pub fn validate_shipping_info(info: &ShippingInfo) -> FieldErrors {
    let mut errors = FieldErrors::new();

    check_name(&mut errors, Field::FirstName, "First name", &info.first_name);
    check_name(&mut errors, Field::LastName, "Last name", &info.last_name);

    if !validate_email(&info.email) {
        errors.insert(Field::Email, "Please enter a valid email address");
    }

    if require(&mut errors, Field::Address, "Address", &info.address) {
        let length = info.address.chars().count();
        if !(MIN_ADDRESS_LENGTH..=MAX_ADDRESS_LENGTH).contains(&length) {
            errors.insert(
                Field::Address,
                "Address must be between 5 and 100 characters",
            );
        }
    }

    check_name(&mut errors, Field::City, "City", &info.city);
    check_name(&mut errors, Field::Province, "Province", &info.province);

    if require(&mut errors, Field::ZipCode, "ZIP code", &info.zip_code)
        && !POSTAL_CODE_PATTERN.is_match(&info.zip_code)
    {
        errors.insert(
            Field::ZipCode,
            "Please enter a valid Canadian ZIP code (e.g., A1A 1A1)",
        );
    }

    errors
}

fn check_name(errors: &mut FieldErrors, field: Field, label: &str, value: &str) {
    if require(errors, field, label, value) && !NAME_PATTERN.is_match(value) {
        errors.insert(
            field,
            format!(
                "{label} must be 2-50 characters and contain only letters, spaces, hyphens, and apostrophes"
            ),
        );
    }
}
