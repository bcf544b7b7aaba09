//! User administration endpoints. Administrators only.

use secrecy::{ExposeSecret, SecretString};
use tracing::{info, instrument};

use rowing_shop_core::{Email, UserId};

use super::auth::RegisterRequest;
use super::{ApiClient, PendingRequest, paths};
use crate::error::Result;
use crate::models::UserAccount;

impl ApiClient {
    /// List all registered users.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::AdminRequired` without sending anything unless the
    /// signed-in user is an administrator.
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<UserAccount>> {
        self.ensure_admin()?;
        self.call(&PendingRequest::get(paths::ALL_USERS).authorized())
            .await
    }

    /// Create an account on someone else's behalf.
    ///
    /// Sent with the administrator's token. Unlike [`ApiClient::register`] the
    /// session is never touched, whatever the server answers with.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::AdminRequired` without sending anything unless the
    /// signed-in user is an administrator, or `ApiError::Remote` when the
    /// server refuses the account (for example "Email already registered").
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn create_user(&self, email: &Email, password: &SecretString) -> Result<UserAccount> {
        self.ensure_admin()?;
        let request = PendingRequest::post(paths::REGISTER)
            .authorized()
            .json(&RegisterRequest {
                email: email.as_str(),
                password: password.expose_secret(),
            })?;
        let created: UserAccount = self.call(&request).await?;
        info!(user_id = %created.id, "user created");
        Ok(created)
    }

    /// Delete a user account.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::AdminRequired` without sending anything unless the
    /// signed-in user is an administrator.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn delete_user(&self, id: UserId) -> Result<()> {
        self.ensure_admin()?;
        self.call_ignoring_body(&PendingRequest::delete(paths::user(id)).authorized())
            .await?;
        info!("user deleted");
        Ok(())
    }
}
