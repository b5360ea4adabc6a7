/// Validation utilities for user input, run before anything is sent
use shared::{LoginRequest, RegisterRequest};

use crate::core::error::{ClientError, Result};

/// Shortest password the backend accepts.
pub const MIN_PASSWORD_LEN: usize = 6;

pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
        }
    }

    /// Convert into a `Validation` error carrying the message.
    pub fn into_result(self) -> Result<()> {
        match self.error {
            Some(message) if !self.is_valid => Err(ClientError::Validation(message)),
            _ => Ok(()),
        }
    }
}

/// Validate email format
pub fn validate_email(email: &str) -> ValidationResult {
    let email = email.trim();
    if email.is_empty() {
        return ValidationResult::err("Email is required");
    }

    let Some((local, domain)) = email.split_once('@') else {
        return ValidationResult::err("Invalid email format");
    };

    if local.is_empty() || domain.contains('@') {
        return ValidationResult::err("Invalid email format");
    }

    if domain.is_empty() || !domain.contains('.') {
        return ValidationResult::err("Invalid email domain");
    }

    ValidationResult::ok()
}

/// Validate password length
pub fn validate_password(password: &str) -> ValidationResult {
    if password.is_empty() {
        return ValidationResult::err("Password is required");
    }

    if password.chars().count() < MIN_PASSWORD_LEN {
        return ValidationResult::err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        ));
    }

    ValidationResult::ok()
}

pub fn validate_login(request: &LoginRequest) -> ValidationResult {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return ValidationResult::err("Email and password are required");
    }
    ValidationResult::ok()
}

/// Validate a sign-up form: required fields, email shape, password length
/// and confirmation.
pub fn validate_registration(request: &RegisterRequest) -> ValidationResult {
    if request.username.trim().is_empty() {
        return ValidationResult::err("Username is required");
    }

    let email = validate_email(&request.email);
    if !email.is_valid {
        return email;
    }

    let password = validate_password(&request.password);
    if !password.is_valid {
        return password;
    }

    if request.password != request.confirm_password {
        return ValidationResult::err("Passwords don't match");
    }

    ValidationResult::ok()
}

/// Validate a 1-5 star rating
pub fn validate_rating(stars: u8) -> ValidationResult {
    if !(1..=5).contains(&stars) {
        return ValidationResult::err("Rating must be between 1 and 5 stars");
    }
    ValidationResult::ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup() -> RegisterRequest {
        RegisterRequest {
            username: "bella".to_string(),
            email: "bella@example.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_email_validation() {
        assert!(validate_email("test@example.com").is_valid);
        assert!(!validate_email("").is_valid);
        assert!(!validate_email("invalid").is_valid);
        assert!(!validate_email("@example.com").is_valid);
        assert!(!validate_email("test@").is_valid);
        assert!(!validate_email("a@b@c.com").is_valid);
    }

    #[test]
    fn test_password_validation() {
        assert!(validate_password("123456").is_valid);
        assert!(!validate_password("").is_valid);
        assert!(!validate_password("12345").is_valid);
    }

    #[test]
    fn test_registration_mismatch() {
        let mut request = signup();
        request.confirm_password = "secret2".to_string();
        let result = validate_registration(&request);
        assert!(!result.is_valid);
        assert_eq!(result.error.as_deref(), Some("Passwords don't match"));
    }

    #[test]
    fn test_registration_short_password_reported_before_mismatch() {
        let mut request = signup();
        request.password = "abc".to_string();
        assert_eq!(
            validate_registration(&request).into_result(),
            Err(ClientError::Validation(
                "Password must be at least 6 characters".to_string()
            ))
        );
    }

    #[test]
    fn test_registration_ok() {
        assert!(validate_registration(&signup()).into_result().is_ok());
    }

    #[test]
    fn test_rating_bounds() {
        assert!(validate_rating(1).is_valid);
        assert!(validate_rating(5).is_valid);
        assert!(!validate_rating(0).is_valid);
        assert!(!validate_rating(6).is_valid);
    }
}
