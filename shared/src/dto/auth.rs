use serde::{Deserialize, Serialize};

use super::user::User;

/// Login request (`POST /auth/login`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration request (`POST /auth/register`)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Authentication response (login/register success)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,
}

/// Error body returned by the backend.
///
/// The human-readable text lives under `error`, `message` or `detail`
/// depending on which layer produced it; form validation failures arrive
/// as `non_field_errors`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub non_field_errors: Vec<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// First non-empty message in precedence order.
    pub fn message(&self) -> Option<&str> {
        [&self.error, &self.message, &self.detail]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .chain(self.non_field_errors.iter().map(String::as_str))
            .find(|m| !m.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_precedence() {
        let body: ErrorResponse =
            serde_json::from_str(r#"{"message": "second", "detail": "third"}"#).unwrap();
        assert_eq!(body.message(), Some("second"));

        let body: ErrorResponse =
            serde_json::from_str(r#"{"error": "first", "detail": "third"}"#).unwrap();
        assert_eq!(body.message(), Some("first"));

        let body: ErrorResponse =
            serde_json::from_str(r#"{"detail": "Authentication credentials were not provided."}"#)
                .unwrap();
        assert_eq!(body.message(), Some("Authentication credentials were not provided."));
    }

    #[test]
    fn test_error_message_from_form_errors() {
        let body: ErrorResponse =
            serde_json::from_str(r#"{"non_field_errors": ["Invalid credentials"]}"#).unwrap();
        assert_eq!(body.message(), Some("Invalid credentials"));
    }

    #[test]
    fn test_error_message_absent() {
        let body: ErrorResponse = serde_json::from_str(r#"{"email": ["already taken"]}"#).unwrap();
        assert_eq!(body.message(), None);
        let blank = ErrorResponse::new("  ");
        assert_eq!(blank.message(), None);
    }

    #[test]
    fn test_auth_response_parses_backend_shape() {
        let json = r#"{
            "user": {"id": 1, "email": "demo@example.com", "rating": "0.00", "rating_count": 0},
            "token": "abc",
            "refresh": "def"
        }"#;
        let auth: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(auth.user.id, "1");
        assert_eq!(auth.token, "abc");
        assert_eq!(auth.refresh.as_deref(), Some("def"));
    }

    #[test]
    fn test_register_request_omits_missing_location() {
        let req = RegisterRequest {
            username: "alex".to_string(),
            email: "alex@example.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&req).unwrap();
        assert!(value.get("location").is_none());
        assert_eq!(value["confirm_password"], "secret1");
    }
}
