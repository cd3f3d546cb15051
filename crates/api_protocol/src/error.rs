//! Error envelope and error codes.

use serde::{Deserialize, Serialize};

/// Machine-readable error codes carried in error responses.
pub mod error_codes {
    /// The request body or parameters are invalid.
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    /// The requested resource does not exist.
    pub const RESOURCE_NOT_FOUND: &str = "RESOURCE_NOT_FOUND";
    /// No valid access token was presented.
    pub const AUTHENTICATION_REQUIRED: &str = "AUTHENTICATION_REQUIRED";
    /// Email or password did not match.
    pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
    /// The caller's role or ownership does not allow the action.
    pub const PERMISSION_DENIED: &str = "PERMISSION_DENIED";
    /// The resource already exists.
    pub const ALREADY_EXISTS: &str = "ALREADY_EXISTS";
    /// Unexpected server failure.
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Error details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// One of [`error_codes`].
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

/// Body of every non-2xx JSON response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

impl ErrorResponse {
    /// Creates an error response.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
        }
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.error.code, self.error.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = ErrorResponse::new(error_codes::RESOURCE_NOT_FOUND, "Room not found");
        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(json["error"]["code"], "RESOURCE_NOT_FOUND");
        assert_eq!(json["error"]["message"], "Room not found");
        assert_eq!(error.to_string(), "[RESOURCE_NOT_FOUND] Room not found");
    }
}
