//! User types.

use serde::{Deserialize, Serialize};

use rowing_shop_core::{Email, UserId};

/// The signed-in user's profile, as returned by `GET /users/me`.
///
/// Replaced wholesale on login or refresh, never partially mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub email: Email,
    #[serde(default)]
    pub is_admin: bool,
}

/// A user row in the admin dashboard's listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    pub email: Email,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_ignores_extra_fields() {
        let profile: UserProfile = serde_json::from_str(
            r#"{"id":"7d4c4f8e-7a3c-4c53-9a51-0f4d3b8e2c10","email":"cox@club.ca",
                "is_admin":true,"is_active":true}"#,
        )
        .unwrap();
        assert!(profile.is_admin);
        assert_eq!(profile.email.as_str(), "cox@club.ca");
    }

    #[test]
    fn test_account_defaults_to_active() {
        let account: UserAccount = serde_json::from_str(
            r#"{"id":"7d4c4f8e-7a3c-4c53-9a51-0f4d3b8e2c10","email":"cox@club.ca","is_admin":false}"#,
        )
        .unwrap();
        assert!(account.is_active);
    }
}
