//! Contact form endpoints.

use tracing::instrument;

use super::{ApiClient, PendingRequest, paths};
use crate::error::Result;
use crate::models::{ContactMessage, ContactSubmission};

impl ApiClient {
    /// Send a contact form message. Anyone may call this.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Remote` if the server rejects the message.
    #[instrument(skip(self, message), fields(email = %message.email))]
    pub async fn submit_contact(&self, message: &ContactMessage) -> Result<()> {
        let request = PendingRequest::post(paths::CONTACT).json(message)?;
        self.call_ignoring_body(&request).await
    }

    /// List received contact messages. Administrators only.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::AdminRequired` without sending anything unless the
    /// signed-in user is an administrator.
    #[instrument(skip(self))]
    pub async fn list_contacts(&self) -> Result<Vec<ContactSubmission>> {
        self.ensure_admin()?;
        self.call(&PendingRequest::get(paths::CONTACT).authorized())
            .await
    }
}
