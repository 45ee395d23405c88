//! LLM backend error types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors that can occur while talking to an LLM backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BackendError {
    /// API request failed with the given message
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// Authentication failed or credentials are invalid
    AuthenticationError { message: String },

    /// Request timed out after the specified duration (in seconds)
    TimeoutError { seconds: u64 },

    /// Rate limit exceeded, retry after the specified duration (in seconds)
    RateLimitError { retry_after: Option<u64> },

    /// Invalid or malformed response from the LLM
    InvalidResponse {
        message: String,
        raw_response: Option<String>,
    },

    /// Configuration error (missing API keys, invalid settings, etc.)
    ConfigurationError { message: String },

    /// The LLM response could not be parsed into a story definition
    ParseError { message: String, context: String },

    /// Generic error for other cases
    Other { message: String },
}

impl BackendError {
    /// Whether this error came from interpreting response content rather
    /// than from transport, auth or configuration. Parse-class errors are
    /// the only ones worth retrying with a more lenient extraction.
    pub fn is_parse_failure(&self) -> bool {
        matches!(
            self,
            BackendError::ParseError { .. } | BackendError::InvalidResponse { .. }
        )
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::ApiError {
                message,
                status_code,
            } => {
                if let Some(code) = status_code {
                    write!(f, "API error ({}): {}", code, message)
                } else {
                    write!(f, "API error: {}", message)
                }
            }
            BackendError::AuthenticationError { message } => {
                write!(f, "Authentication failed: {}", message)
            }
            BackendError::TimeoutError { seconds } => {
                write!(f, "Request timed out after {} seconds", seconds)
            }
            BackendError::RateLimitError { retry_after } => {
                if let Some(seconds) = retry_after {
                    write!(f, "Rate limit exceeded, retry after {} seconds", seconds)
                } else {
                    write!(f, "Rate limit exceeded")
                }
            }
            BackendError::InvalidResponse { message, .. } => {
                write!(f, "Invalid response from LLM: {}", message)
            }
            BackendError::ConfigurationError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            BackendError::ParseError { message, context } => {
                write!(f, "Parse error: {} (context: {})", message, context)
            }
            BackendError::Other { message } => {
                write!(f, "Error: {}", message)
            }
        }
    }
}

impl std::error::Error for BackendError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_failure_classification() {
        assert!(BackendError::ParseError {
            message: "bad json".to_string(),
            context: "scenario output".to_string(),
        }
        .is_parse_failure());
        assert!(BackendError::InvalidResponse {
            message: "empty".to_string(),
            raw_response: None,
        }
        .is_parse_failure());
        assert!(!BackendError::TimeoutError { seconds: 60 }.is_parse_failure());
        assert!(!BackendError::AuthenticationError {
            message: "bad key".to_string(),
        }
        .is_parse_failure());
    }
}
