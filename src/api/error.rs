//! API Client Error Types
//!
//! Errors produced while talking to the Staple backend.

use thiserror::Error;

/// Errors that can occur when calling the Staple API
#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection refused, DNS failure, reset...
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timeout")]
    Timeout,

    /// The backend answered with a non-2xx status
    #[error("{status} {status_text}")]
    Status {
        status: u16,
        status_text: String,
        message: Option<String>,
    },

    /// A 2xx body did not have the expected shape
    #[error("Parse error: {0}")]
    Decode(String),

    /// An authorized call was attempted without a session token
    #[error("Not logged in")]
    MissingToken,
}

impl ClientError {
    /// Build a status error from a status code and optional server message
    pub fn status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        ClientError::Status {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
            message,
        }
    }

    /// HTTP status code, if the backend answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text shown to the user: the status line plus the server's message
    pub fn describe(&self) -> String {
        match self {
            ClientError::Status {
                message: Some(message),
                ..
            } => format!("{} ({})", self, message),
            _ => self.to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

/// Result type for API client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let err = ClientError::status(reqwest::StatusCode::UNAUTHORIZED, None);
        assert_eq!(err.to_string(), "401 Unauthorized");
        assert_eq!(err.describe(), "401 Unauthorized");
        assert_eq!(err.status_code(), Some(401));
    }

    #[test]
    fn test_describe_includes_server_message() {
        let err = ClientError::status(
            reqwest::StatusCode::BAD_REQUEST,
            Some("User already registered.".to_string()),
        );
        assert_eq!(err.describe(), "400 Bad Request (User already registered.)");
        assert_eq!(err.status_code(), Some(400));
    }

    #[test]
    fn test_missing_token() {
        let err = ClientError::MissingToken;
        assert_eq!(err.describe(), "Not logged in");
        assert_eq!(err.status_code(), None);
    }
}
