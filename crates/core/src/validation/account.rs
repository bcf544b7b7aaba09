//! Checks for the account and contact forms.

use super::{Field, FieldErrors, MAX_CONTACT_MESSAGE_LENGTH, validate_email, validate_password};

const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match";

/// Validate the registration form.
#[must_use]
pub fn validate_registration(email: &str, password: &str, confirm: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if !validate_email(email) {
        errors.insert(Field::Email, "Please enter a valid email address");
    }
    errors.extend(validate_password_change(password, confirm));
    errors
}

/// Validate the admin dashboard's new-user form, which has no confirmation.
#[must_use]
pub fn validate_new_account(email: &str, password: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if !validate_email(email) {
        errors.insert(Field::Email, "Please enter a valid email address");
    }
    if let Err(err) = validate_password(password) {
        errors.insert(Field::Password, err.to_string());
    }
    errors
}

/// Validate a new password and its confirmation.
#[must_use]
pub fn validate_password_change(new_password: &str, confirm: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if let Err(err) = validate_password(new_password) {
        errors.insert(Field::Password, err.to_string());
    }
    if new_password != confirm {
        errors.insert(Field::ConfirmPassword, PASSWORDS_DO_NOT_MATCH);
    }
    errors
}

/// Validate the contact form.
#[must_use]
pub fn validate_contact_message(email: &str, message: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if !validate_email(email) {
        errors.insert(Field::Email, "Please enter a valid email address");
    }
    if message.trim().is_empty() {
        errors.insert(Field::Message, "Message is required");
    } else if message.chars().count() > MAX_CONTACT_MESSAGE_LENGTH {
        errors.insert(Field::Message, "Message must not exceed 300 characters");
    }
    errors
}
