//! Data structures for authentication-related payloads.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Token payload issued by `POST /token`.
///
/// Treated as opaque by the client; it is stored verbatim and echoed back
/// in the `Authorization` header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthToken {
    pub access_token: String,
    pub token_type: String,
}

impl AuthToken {
    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

/// Sign-up form for `POST /CreateUserAccount`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct SignUpRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    #[validate(email(message = "Must be a valid email"))]
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_header_value() {
        let token = AuthToken {
            access_token: "abc".to_string(),
            token_type: "bearer".to_string(),
        };
        assert_eq!(token.bearer(), "Bearer abc");
    }

    #[test]
    fn test_sign_up_request_rejects_bad_email() {
        let request = SignUpRequest {
            username: "alice".to_string(),
            password: "pw".to_string(),
            email: "not-an-email".to_string(),
        };
        assert!(validator::Validate::validate(&request).is_err());
    }
}
