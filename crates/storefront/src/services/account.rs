//! Account flows: registration, password change, order history and the
//! contact form.

use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use rowing_shop_core::validation::{
    validate_contact_message, validate_new_account, validate_password_change,
    validate_registration,
};
use rowing_shop_core::{Email, Field, FieldErrors};

use crate::api::Registration;
use crate::error::{ApiError, Result};
use crate::models::{ContactMessage, Order, UserAccount, UserProfile};
use crate::state::AppState;

/// Validate the registration form, then create the account.
///
/// # Errors
///
/// Returns `ApiError::Validation` without sending anything if the email,
/// password or confirmation is unacceptable.
#[instrument(skip(state, password, confirm))]
pub async fn register(
    state: &AppState,
    email: &str,
    password: &SecretString,
    confirm: &SecretString,
) -> Result<Registration> {
    validate_registration(email, password.expose_secret(), confirm.expose_secret())
        .into_result()
        .map_err(ApiError::Validation)?;
    let email = parse_email(email)?;
    state.client().register(&email, password).await
}

/// Validate the admin dashboard's new-user form, then create the account.
///
/// # Errors
///
/// Returns `ApiError::Validation` without sending anything if the email or
/// password is unacceptable, otherwise whatever
/// [`crate::api::ApiClient::create_user`] returns.
#[instrument(skip(state, password))]
pub async fn create_user(
    state: &AppState,
    email: &str,
    password: &SecretString,
) -> Result<UserAccount> {
    validate_new_account(email, password.expose_secret())
        .into_result()
        .map_err(ApiError::Validation)?;
    let email = parse_email(email)?;
    state.client().create_user(&email, password).await
}

/// Change the signed-in user's password, then sign in again with it.
///
/// # Errors
///
/// Returns `ApiError::NotSignedIn` or `ApiError::Validation` without sending
/// anything, otherwise the error from the password change or the new login.
#[instrument(skip_all)]
pub async fn change_password(
    state: &AppState,
    current: &SecretString,
    new: &SecretString,
    confirm: &SecretString,
) -> Result<UserProfile> {
    let user = state
        .session()
        .current_user()
        .ok_or(ApiError::NotSignedIn)?;

    let mut errors = validate_password_change(new.expose_secret(), confirm.expose_secret());
    if current.expose_secret().is_empty() {
        errors.insert(Field::CurrentPassword, "Current password is required");
    }
    errors.into_result().map_err(ApiError::Validation)?;

    state.client().change_password(current, new).await?;
    state.client().login(&user.email, new).await
}

/// The signed-in user's orders.
///
/// # Errors
///
/// Returns `ApiError::NotSignedIn` without sending anything when signed out.
pub async fn my_orders(state: &AppState) -> Result<Vec<Order>> {
    let user = state
        .session()
        .current_user()
        .ok_or(ApiError::NotSignedIn)?;
    state.client().list_orders(user.id).await
}

/// Validate and send the contact form.
///
/// # Errors
///
/// Returns `ApiError::Validation` without sending anything if the email is
/// malformed or the message is empty or too long.
#[instrument(skip(state, message))]
pub async fn submit_contact(state: &AppState, email: &str, message: &str) -> Result<()> {
    validate_contact_message(email, message)
        .into_result()
        .map_err(ApiError::Validation)?;
    state
        .client()
        .submit_contact(&ContactMessage {
            email: email.trim().to_string(),
            message: message.to_string(),
        })
        .await
}

fn parse_email(email: &str) -> Result<Email> {
    Email::parse(email).map_err(|err| {
        let mut errors = FieldErrors::new();
        errors.insert(Field::Email, err.to_string());
        ApiError::Validation(errors)
    })
}
