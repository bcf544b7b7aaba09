//! Session and account commands.
//!
//! # Environment Variables
//!
//! - `ROWING_SHOP_PASSWORD` - Password for `login`/`register`, and the current
//!   password for `change-password`
//! - `ROWING_SHOP_NEW_PASSWORD` - New password for `change-password`, and the
//!   password for `admin create-user`
//!
//! Passwords not given in the environment are read from stdin.

use rowing_shop_core::{Email, Field, FieldErrors};
use rowing_shop_storefront::services::account;
use rowing_shop_storefront::{ApiError, Registration};

use super::{Result, Shell, read_password};

const PASSWORD_ENV: &str = "ROWING_SHOP_PASSWORD";
pub(super) const NEW_PASSWORD_ENV: &str = "ROWING_SHOP_NEW_PASSWORD";

/// Sign in and report who is signed in.
#[allow(clippy::print_stdout)]
pub async fn login(shell: &Shell, email: &str) -> Result<()> {
    let email = Email::parse(email).map_err(|e| {
        let mut errors = FieldErrors::new();
        errors.insert(Field::Email, e.to_string());
        ApiError::Validation(errors)
    })?;
    let password = read_password(PASSWORD_ENV, "Password")?;

    let user = shell.state.client().login(&email, &password).await?;
    println!("Signed in as {}", user.email);
    Ok(())
}

/// Sign out, dropping the cart and stored tokens.
#[allow(clippy::print_stdout)]
pub async fn logout(shell: &Shell) {
    shell.state.logout().await;
    println!("Signed out");
}

/// Print the signed-in user.
#[allow(clippy::print_stdout)]
pub fn whoami(shell: &Shell) -> Result<()> {
    let user = shell
        .state
        .session()
        .current_user()
        .ok_or(ApiError::NotSignedIn)?;

    let role = if user.is_admin { "administrator" } else { "customer" };
    println!("{} ({role})", user.email);
    println!("id: {}", user.id);
    Ok(())
}

/// Create an account. The password is entered twice when prompted.
#[allow(clippy::print_stdout)]
pub async fn register(shell: &Shell, email: &str) -> Result<()> {
    let password = read_password(PASSWORD_ENV, "Password")?;
    let confirm = read_password(PASSWORD_ENV, "Confirm password")?;

    match account::register(&shell.state, email, &password, &confirm).await? {
        Registration::SignedIn(user) => println!("Account created; signed in as {}", user.email),
        Registration::Created => println!("Account created; run `rowing-cli login` to sign in"),
    }
    Ok(())
}

/// Change the password and sign in again with it.
#[allow(clippy::print_stdout)]
pub async fn change_password(shell: &Shell) -> Result<()> {
    let current = read_password(PASSWORD_ENV, "Current password")?;
    let new = read_password(NEW_PASSWORD_ENV, "New password")?;
    let confirm = read_password(NEW_PASSWORD_ENV, "Confirm new password")?;

    let user = account::change_password(&shell.state, &current, &new, &confirm).await?;
    println!("Password changed; signed in as {}", user.email);
    Ok(())
}
