//! Field-level validation of form input.
//!
//! Every function here is pure and total: no I/O, no state, cheap enough to
//! run on every keystroke. Multi-field forms report one message per invalid
//! field in a [`FieldErrors`] map keyed by [`Field`].

mod account;
mod password;
mod payment;
mod shipping;

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::types::Email;

pub use account::{
    validate_contact_message, validate_new_account, validate_password_change, validate_registration,
};
pub use password::{PasswordError, validate_password};
pub use payment::{validate_payment_info, validate_payment_info_at};
pub use shipping::validate_shipping_info;

/// Maximum length of a contact-form message.
pub const MAX_CONTACT_MESSAGE_LENGTH: usize = 300;

/// A validated form field.
///
/// Serialises to the field name the forms and the API use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Field {
    #[serde(rename = "firstName")]
    FirstName,
    #[serde(rename = "lastName")]
    LastName,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "address")]
    Address,
    #[serde(rename = "city")]
    City,
    #[serde(rename = "province")]
    Province,
    #[serde(rename = "zip_code")]
    ZipCode,
    #[serde(rename = "cardNumber")]
    CardNumber,
    #[serde(rename = "expiryDate")]
    ExpiryDate,
    #[serde(rename = "cvv")]
    Cvv,
    #[serde(rename = "currentPassword")]
    CurrentPassword,
    #[serde(rename = "password")]
    Password,
    #[serde(rename = "confirmPassword")]
    ConfirmPassword,
    #[serde(rename = "message")]
    Message,
}

impl Field {
    /// The form/API name of this field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Address => "address",
            Self::City => "city",
            Self::Province => "province",
            Self::ZipCode => "zip_code",
            Self::CardNumber => "cardNumber",
            Self::ExpiryDate => "expiryDate",
            Self::Cvv => "cvv",
            Self::CurrentPassword => "currentPassword",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation messages keyed by field. Empty means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    /// Create an empty set of errors.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Record a message for a field, replacing any earlier one.
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// The message recorded for `field`, if any.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Returns `true` if no field failed validation.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of invalid fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no field failed validation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// Merge another set of errors into this one.
    pub fn extend(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// `Ok(())` when valid, otherwise the errors themselves.
    ///
    /// # Errors
    ///
    /// Returns `self` if any field failed validation.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_valid() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Returns `true` if `email` has the shape `local@domain.tld`.
#[must_use]
pub fn validate_email(email: &str) -> bool {
    Email::is_well_formed(email)
}

/// Required-field check shared by the multi-field forms.
///
/// Records `"<label> is required"` and returns `false` when `value` is blank.
fn require(errors: &mut FieldErrors, field: Field, label: &str, value: &str) -> bool {
    if value.trim().is_empty() {
        errors.insert(field, format!("{label} is required"));
        return false;
    }
    true
}
