//! Error types for the campus HTTP transport.

use thiserror::Error;

/// Message used when the backend gives no usable text.
pub const DEFAULT_ERROR_MESSAGE: &str = "request failed";

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Backend answered 2xx but the envelope carried a non-success `code`.
    #[error("{msg}")]
    Business { code: i64, msg: String },

    /// Non-2xx HTTP status.
    #[error("{msg}")]
    Status { status: u16, msg: String },

    /// Network failure, timeout, or connection refusal.
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl ApiError {
    /// Text suitable for a transient notification.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Business { msg, .. } | ApiError::Status { msg, .. } => msg.clone(),
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[inline]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_backend_text() {
        let err = ApiError::Business {
            code: 400,
            msg: "title is required".to_string(),
        };
        assert_eq!(err.user_message(), "title is required");

        let err = ApiError::Http("connection refused".to_string());
        assert_eq!(err.user_message(), "HTTP error: connection refused");
    }

    #[test]
    fn test_unauthorized_only_for_status_401() {
        let err = ApiError::Status {
            status: 401,
            msg: "token expired".to_string(),
        };
        assert!(err.is_unauthorized());

        let err = ApiError::Business {
            code: 401,
            msg: "business 401".to_string(),
        };
        assert!(!err.is_unauthorized());
    }
}
