//! Password strength rules.

use thiserror::Error;

const MIN_PASSWORD_LENGTH: usize = 12;
const MAX_PASSWORD_LENGTH: usize = 64;

/// Characters that satisfy the "special character" rule.
const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Why a password was rejected. The `Display` text is shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("Password must be at least 12 characters long")]
    TooShort,
    #[error("Password must not exceed 64 characters")]
    TooLong,
    #[error(
        "Password must contain at least one lowercase letter, one uppercase letter, one number, and one special character"
    )]
    MissingCharacterClass,
}

/// Check a password against the shop's strength rules.
///
/// A password is valid when it is 12 to 64 characters long and contains at
/// least one lowercase letter, one uppercase letter, one digit and one of
/// `!@#$%^&*(),.?":{}|<>`. Length is checked first.
///
/// # Errors
///
/// Returns the first rule the password breaks.
pub fn validate_password(password: &str) -> Result<(), PasswordError> {
    let length = password.chars().count();
    if length < MIN_PASSWORD_LENGTH {
        return Err(PasswordError::TooShort);
    }
    if length > MAX_PASSWORD_LENGTH {
        return Err(PasswordError::TooLong);
    }

    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| SPECIAL_CHARACTERS.contains(c));

    if has_lower && has_upper && has_digit && has_special {
        Ok(())
    } else {
        Err(PasswordError::MissingCharacterClass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_password() {
        assert_eq!(validate_password("Sculling2024!"), Ok(()));
        assert_eq!(validate_password("aB3{aaaaaaaa"), Ok(()));
    }

    #[test]
    fn test_length_bounds() {
        assert_eq!(validate_password("Short1!a"), Err(PasswordError::TooShort));
        assert_eq!(validate_password("Abcdefgh12!"), Err(PasswordError::TooShort));
        assert_eq!(validate_password("Abcdefgh123!"), Ok(()));

        let at_max = format!("Aa1!{}", "x".repeat(60));
        assert_eq!(validate_password(&at_max), Ok(()));
        let over_max = format!("Aa1!{}", "x".repeat(61));
        assert_eq!(validate_password(&over_max), Err(PasswordError::TooLong));
    }

    #[test]
    fn test_each_character_class_required() {
        assert_eq!(
            validate_password("sculling2024!"),
            Err(PasswordError::MissingCharacterClass)
        );
        assert_eq!(
            validate_password("SCULLING2024!"),
            Err(PasswordError::MissingCharacterClass)
        );
        assert_eq!(
            validate_password("Sculling!!!!!"),
            Err(PasswordError::MissingCharacterClass)
        );
        assert_eq!(
            validate_password("Sculling20245"),
            Err(PasswordError::MissingCharacterClass)
        );
    }

    #[test]
    fn test_special_set_is_exact() {
        // `-` and `_` are not in the special set.
        assert_eq!(
            validate_password("Sculling-2024_"),
            Err(PasswordError::MissingCharacterClass)
        );
        for special in SPECIAL_CHARACTERS.chars() {
            let password = format!("Sculling2024{special}");
            assert_eq!(validate_password(&password), Ok(()), "{special}");
        }
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            PasswordError::TooShort.to_string(),
            "Password must be at least 12 characters long"
        );
        assert_eq!(
            PasswordError::TooLong.to_string(),
            "Password must not exceed 64 characters"
        );
    }
}
