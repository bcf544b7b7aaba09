//! Administration commands.
//!
//! # Usage
//!
//! ```bash
//! rowing-cli admin users
//! rowing-cli admin create-user -e novice@club.ca
//! rowing-cli admin delete-user 7d4c4f8e-7a3c-4c53-9a51-0f4d3b8e2c10
//! rowing-cli admin contacts
//! ```
//!
//! All of these need a signed-in administrator; the client refuses before
//! sending anything otherwise.

use rowing_shop_core::UserId;
use rowing_shop_storefront::services::account;

use super::account::NEW_PASSWORD_ENV;
use super::{Result, Shell, read_password};

/// List every registered user.
#[allow(clippy::print_stdout)]
pub async fn users(shell: &Shell) -> Result<()> {
    let users = shell.state.client().list_users().await?;
    for user in &users {
        let role = if user.is_admin { "admin" } else { "customer" };
        let status = if user.is_active { "" } else { " (inactive)" };
        println!("{}  {:<40} {role}{status}", user.id, user.email);
    }
    tracing::info!("Listed {} user(s)", users.len());
    Ok(())
}

/// Create a user account without signing in as it.
#[allow(clippy::print_stdout)]
pub async fn create_user(shell: &Shell, email: &str) -> Result<()> {
    let password = read_password(NEW_PASSWORD_ENV, "Password for the new user")?;
    let user = account::create_user(&shell.state, email, &password).await?;
    println!("Created user {}  {}", user.id, user.email);
    Ok(())
}

/// Delete one user account.
#[allow(clippy::print_stdout)]
pub async fn delete_user(shell: &Shell, id: UserId) -> Result<()> {
    shell.state.client().delete_user(id).await?;
    println!("Deleted user {id}");
    Ok(())
}

/// List contact-form messages, oldest first.
#[allow(clippy::print_stdout)]
pub async fn contacts(shell: &Shell) -> Result<()> {
    let mut contacts = shell.state.client().list_contacts().await?;
    contacts.sort_by_key(|contact| contact.created_at);

    for contact in &contacts {
        println!(
            "{}  {}",
            contact.created_at.format("%Y-%m-%d %H:%M"),
            contact.email
        );
        println!("    {}", contact.message);
    }
    tracing::info!("Listed {} message(s)", contacts.len());
    Ok(())
}
