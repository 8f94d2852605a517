// src/error.rs

//! Unified error handling for the webhook handler.

use std::fmt;

use thiserror::Error;

/// Result type alias for handler operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Inbound notification body could not be understood
    #[error("{0}")]
    Parse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Content API returned an error
    #[error("Content API error for {endpoint}: {message}")]
    Content { endpoint: String, message: String },
}

impl AppError {
    /// Create an inbound payload parse error.
    pub fn parse(message: impl fmt::Display) -> Self {
        Self::Parse(message.to_string())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a content API error with the endpoint that failed.
    pub fn content(endpoint: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Content {
            endpoint: endpoint.into(),
            message: message.to_string(),
        }
    }
}

/// Failure of a best-effort outbound call.
///
/// Never returned as `Err` from the pipeline; it is carried inside a
/// [`StepOutcome`](crate::pipeline::StepOutcome) and logged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// The endpoint could not be reached (DNS, TLS, timeout, ...)
    #[error("request failed: {0}")]
    Transport(String),

    /// The endpoint answered with a non-2xx status
    #[error("endpoint returned HTTP {status}")]
    Status { status: u16 },
}

impl From<reqwest::Error> for DeliveryError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_displays_bare_message() {
        let err = AppError::parse("missing field `api`");
        assert_eq!(err.to_string(), "missing field `api`");
    }

    #[test]
    fn delivery_status_display() {
        let err = DeliveryError::Status { status: 503 };
        assert_eq!(err.to_string(), "endpoint returned HTTP 503");
    }
}
