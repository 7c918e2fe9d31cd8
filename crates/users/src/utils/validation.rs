//! Input validation utilities.

use crate::types::UserError;
use once_cell::sync::Lazy;
use regex::Regex;

pub const MIN_PASSWORD_LENGTH: usize = 4;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is valid")
});

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), UserError> {
    if email.len() > 255 || !EMAIL_PATTERN.is_match(email) {
        return Err(UserError::InvalidEmail);
    }

    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), UserError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(UserError::InvalidPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(validate_email("a@x.com").is_ok());
        assert!(validate_email("user.name+tag@domain.co.uk").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("invalid-email").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("test@").is_err());
        assert!(validate_email(&format!("{}@x.com", "a".repeat(256))).is_err());
    }

    #[test]
    fn test_password_validation() {
        assert!(validate_password("pass").is_ok());
        assert!(validate_password("pass1").is_ok());

        assert!(validate_password("").is_err());
        assert!(validate_password("abc").is_err());
    }
}
