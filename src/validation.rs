// Validation utilities module
// Custom validation functions for registration input

use regex::Regex;
use std::sync::OnceLock;
use validator::ValidationError;

fn username_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_]{3,32}$").expect("valid regex"))
}

/// Validates that a username is 3-32 characters of letters, digits or underscores
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username_regex().is_match(username) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_username"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("user_42").is_ok());
        assert!(validate_username("ABC").is_ok());
    }

    #[test]
    fn test_invalid_usernames() {
        assert!(validate_username("ab").is_err());
        assert!(validate_username("").is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username("semi;colon").is_err());
        assert!(validate_username(&"x".repeat(33)).is_err());
    }
}
