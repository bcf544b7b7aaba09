//! Error taxonomy for client operations.
//!
//! Only a 401 from a protected endpoint is recovered automatically (by the
//! refresh-and-retry cycle in [`crate::api`]); every other error is returned
//! to the caller, which renders it and leaves the session and cart untouched.

use reqwest::StatusCode;
use rowing_shop_core::FieldErrors;
use serde::Deserialize;
use thiserror::Error;

/// Errors returned by client operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Client-side form validation failed; nothing was sent.
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// The operation needs a signed-in user; nothing was sent.
    #[error("You must be logged in")]
    NotSignedIn,

    /// The operation needs an administrator; nothing was sent.
    #[error("Administrator access required")]
    AdminRequired,

    /// Checkout was attempted with an empty cart; nothing was sent.
    #[error("Your cart is empty")]
    EmptyCart,

    /// The access token was rejected and could not be refreshed.
    ///
    /// The session store has already been cleared.
    #[error("Session expired, please log in again")]
    SessionExpired,

    /// The server answered with a non-success status.
    #[error("Request failed ({status}): {detail}")]
    Remote {
        /// HTTP status code
        status: StatusCode,
        /// Server-provided detail text
        detail: String,
    },

    /// Transport failure (connection refused, timeout, reset, ...).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A request body could not be encoded or a response body decoded.
    #[error("Payload error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl ApiError {
    /// Build a [`ApiError::Remote`] from an error response.
    ///
    /// The detail comes from the body's `detail` field when present (a string,
    /// or a list of `{msg}` objects joined by commas), otherwise from the raw
    /// body, otherwise from the status's canonical reason.
    #[must_use]
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        Self::Remote {
            status,
            detail: error_detail(status, body),
        }
    }

    /// HTTP status for remote errors.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text suitable for showing to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Remote { detail, .. } => detail.clone(),
            Self::Validation(errors) => errors
                .iter()
                .map(|(_, message)| message)
                .collect::<Vec<_>>()
                .join(", "),
            Self::Network(_) => "Could not reach the shop, please try again".to_string(),
            other => other.to_string(),
        }
    }
}

/// Result type alias for [`ApiError`].
pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<ErrorDetail>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Message(String),
    Items(Vec<DetailItem>),
    Other(serde_json::Value),
}

#[derive(Deserialize)]
struct DetailItem {
    msg: String,
}

fn error_detail(status: StatusCode, body: &[u8]) -> String {
    let parsed = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.detail);

    match parsed {
        Some(ErrorDetail::Message(message)) => message,
        Some(ErrorDetail::Items(items)) => items
            .into_iter()
            .map(|item| item.msg)
            .collect::<Vec<_>>()
            .join(", "),
        Some(ErrorDetail::Other(value)) => value.to_string(),
        None => {
            let text = String::from_utf8_lossy(body);
            let text = text.trim();
            if text.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            } else {
                text.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail_of(err: &ApiError) -> &str {
        match err {
            ApiError::Remote { detail, .. } => detail,
            other => panic!("expected remote error, got {other:?}"),
        }
    }

    #[test]
    fn test_string_detail() {
        let err = ApiError::from_response(
            StatusCode::BAD_REQUEST,
            br#"{"detail":"Email already registered"}"#,
        );
        assert_eq!(detail_of(&err), "Email already registered");
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn test_field_error_list_is_joined() {
        let err = ApiError::from_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            br#"{"detail":[{"loc":["body","cvv"],"msg":"CVV must be exactly 3 digits"},
                          {"loc":["body","expiryDate"],"msg":"Card has expired"}]}"#,
        );
        assert_eq!(
            detail_of(&err),
            "CVV must be exactly 3 digits, Card has expired"
        );
    }

    #[test]
    fn test_plain_text_body() {
        let err = ApiError::from_response(StatusCode::BAD_GATEWAY, b"upstream down\n");
        assert_eq!(detail_of(&err), "upstream down");
    }

    #[test]
    fn test_empty_body_uses_reason() {
        let err = ApiError::from_response(StatusCode::NOT_FOUND, b"");
        assert_eq!(detail_of(&err), "Not Found");
        assert_eq!(err.user_message(), "Not Found");
    }

    #[test]
    fn test_display() {
        let err = ApiError::from_response(StatusCode::UNAUTHORIZED, br#"{"detail":"Not authenticated"}"#);
        assert_eq!(err.to_string(), "Request failed (401 Unauthorized): Not authenticated");
        assert_eq!(
            ApiError::SessionExpired.to_string(),
            "Session expired, please log in again"
        );
    }
}
