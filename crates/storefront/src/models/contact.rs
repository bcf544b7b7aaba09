//! Contact form types.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use rowing_shop_core::ContactId;

/// Body of `POST /contact/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub email: String,
    pub message: String,
}

/// A stored contact-form submission, as listed for administrators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub id: ContactId,
    pub email: String,
    pub message: String,
    /// Server-local timestamp without offset.
    pub created_at: NaiveDateTime,
}
