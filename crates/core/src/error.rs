//! Error types for shiplabel operations.
//!
//! This module defines the main error type [`LabelError`] which represents
//! everything that can go wrong while auto-filling an address, editing the
//! label form, loading settings, or rendering output.
//!
//! # Example
//!
//! ```rust
//! use shiplabel_core::{LabelError, Result};
//!
//! fn require_text(input: &str) -> Result<&str> {
//!     if input.trim().is_empty() {
//!         return Err(LabelError::EmptyInput);
//!     }
//!     Ok(input)
//! }
//! # assert!(require_text("  ").is_err());
//! ```

use thiserror::Error;

/// Main error type for label operations.
///
/// The three service-level variants ([`ServiceUnavailable`](Self::ServiceUnavailable),
/// [`EmptyResponse`](Self::EmptyResponse) and
/// [`MalformedResponse`](Self::MalformedResponse)) all mean the same thing to a
/// user: the auto-fill did not work and may be retried. Use
/// [`LabelError::is_service_failure`] to treat them as one.
///
/// # Example
///
/// ```rust
/// use shiplabel_core::LabelError;
///
/// let err = LabelError::EmptyResponse;
/// match err {
///     e if e.is_service_failure() => println!("Failed to parse address. Please try again."),
///     e => println!("Error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum LabelError {
    /// Nothing to parse.
    ///
    /// Returned when the free text handed to a normalizer is empty or
    /// whitespace only. No outbound call is made.
    #[error("Address text is empty")]
    EmptyInput,

    /// The parsing service could not be reached or answered with an error.
    ///
    /// Covers DNS and connection failures as well as non-success HTTP
    /// statuses, in which case `status` carries the code.
    #[error("Address service unavailable: {message}")]
    ServiceUnavailable { status: Option<u16>, message: String },

    /// The service answered but returned no usable content.
    #[error("Address service returned no content")]
    EmptyResponse,

    /// The service content could not be read as the expected address object.
    #[error("Address service returned a malformed response: {0}")]
    MalformedResponse(String),

    /// No API credential is configured for the parsing service.
    #[error("No API key configured (set GEMINI_API_KEY or pass --api-key)")]
    MissingApiKey,

    /// The configured service endpoint is not a valid base URL.
    #[error("Invalid service endpoint: {0}")]
    InvalidEndpoint(String),

    /// A label size id that is not part of the selectable set.
    #[error("Unknown label size: {0} (expected 4x6, 4x4 or custom)")]
    UnknownLabelSize(String),

    /// An address field name that does not exist.
    #[error("Unknown address field: {0}")]
    UnknownField(String),

    /// Settings file errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File read and write errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LabelError {
    /// Whether this error is one of the service-level auto-fill failures.
    pub fn is_service_failure(&self) -> bool {
        matches!(
            self,
            LabelError::ServiceUnavailable { .. } | LabelError::EmptyResponse | LabelError::MalformedResponse(_)
        )
    }
}

#[cfg(feature = "gemini")]
impl From<reqwest::Error> for LabelError {
    fn from(err: reqwest::Error) -> Self {
        LabelError::ServiceUnavailable { status: err.status().map(|s| s.as_u16()), message: err.to_string() }
    }
}

impl From<serde_json::Error> for LabelError {
    fn from(err: serde_json::Error) -> Self {
        LabelError::MalformedResponse(err.to_string())
    }
}

/// Result type alias for LabelError.
///
/// This is a convenience alias for `std::result::Result<T, LabelError>`.
pub type Result<T> = std::result::Result<T, LabelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LabelError::UnknownLabelSize("5x7".to_string());
        assert!(err.to_string().contains("5x7"));
    }

    #[test]
    fn test_service_unavailable_message() {
        let err = LabelError::ServiceUnavailable { status: Some(503), message: "HTTP 503".to_string() };
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_service_failures_grouped() {
        assert!(LabelError::EmptyResponse.is_service_failure());
        assert!(LabelError::MalformedResponse("x".into()).is_service_failure());
        assert!(LabelError::ServiceUnavailable { status: None, message: "down".into() }.is_service_failure());
        assert!(!LabelError::EmptyInput.is_service_failure());
        assert!(!LabelError::MissingApiKey.is_service_failure());
    }

    #[test]
    fn test_json_error_is_malformed() {
        let err: LabelError = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err().into();
        assert!(matches!(err, LabelError::MalformedResponse(_)));
    }
}
