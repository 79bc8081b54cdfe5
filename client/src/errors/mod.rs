//! Error types shared across the client.
//!
//! This module defines the error taxonomy every API call can surface and
//! provides helper constructors for consistent error construction. The view
//! layer is expected to map each variant to a user-visible message; only
//! `SessionExpired` carries navigation semantics (back to login).

use thiserror::Error;

/// Errors surfaced by the API access layer.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Login or sign-up was rejected by the server.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// A protected call was attempted without a stored token.
    /// Raised before any network traffic happens.
    #[error("No authentication token available")]
    NoSession,

    /// The server rejected the bearer token (HTTP 401). The session store
    /// has already been cleared when this is returned; the caller decides
    /// how to get the user back to the login screen.
    #[error("Session expired, please log in again")]
    SessionExpired,

    /// Any other non-success HTTP response.
    #[error("API request failed ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body was not valid JSON or did not match the expected
    /// shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The request never produced an HTTP response (DNS, connect, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// A payload failed local validation; no request was issued.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The persistent session mirror could not be read or written.
    #[error("Session storage error: {0}")]
    Storage(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    // Helper constructors for common patterns

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Whether the caller should treat this as "redirect to login".
    pub fn requires_login(&self) -> bool {
        matches!(self, Self::NoSession | Self::SessionExpired)
    }

    /// Flattens validator output into a single `Validation` error.
    pub fn from_validation(errors: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    format!(
                        "{}: {}",
                        field,
                        error.message.as_ref().unwrap_or(&"Invalid value".into())
                    )
                })
            })
            .collect();
        Self::validation(messages.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_login_classification() {
        assert!(ClientError::NoSession.requires_login());
        assert!(ClientError::SessionExpired.requires_login());
        assert!(!ClientError::api(500, "boom").requires_login());
        assert!(!ClientError::authentication("bad credentials").requires_login());
    }

    #[test]
    fn test_display_carries_server_detail() {
        let err = ClientError::api(404, "Machine not found");
        assert_eq!(
            err.to_string(),
            "API request failed (404): Machine not found"
        );
    }
}
