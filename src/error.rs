//! Error types for API operations.
//!
//! Every fallible call in this crate returns [`OpenAIResult`]. Failures come in
//! exactly two kinds, reported by [`OpenAIError::kind()`]:
//!
//! - [`ErrorKind::Client`]: something went wrong on our side of the wire.
//!   Configuration problems, request encoding, connection failures, timeouts
//!   once the configured attempts are exhausted, and response bodies that do
//!   not decode into the expected record shape.
//! - [`ErrorKind::Api`]: the service answered with a non-success status and a
//!   well-formed error payload. The payload is kept verbatim in
//!   [`ApiErrorObject`].
//!
//! # Error Handling Example
//!
//! ```rust,no_run
//! use openai_client::{ErrorKind, OpenAIError};
//!
//! fn handle_error(err: OpenAIError) {
//!     match err.kind() {
//!         ErrorKind::Api => {
//!             if let Some(api) = err.api_error() {
//!                 println!("service rejected the call: {}", api.message);
//!             }
//!         }
//!         ErrorKind::Client => {
//!             if err.is_retryable() {
//!                 println!("transient failure: {err}");
//!             }
//!         }
//!     }
//! }
//! ```

use crate::logging::{log_error, log_warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Error categorization types
// ============================================================================

/// The two error kinds callers pattern-match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport, encoding, decoding or configuration failure.
    Client,
    /// A decoded error object returned by the service.
    Api,
}

/// High-level categorization of errors for routing and handling decisions.
///
/// Use [`OpenAIError::category()`] to get the category for any error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The remote service or the network had an issue.
    External,

    /// Something went wrong in this crate (bugs, invariant violations).
    Internal,

    /// The caller made a mistake they can fix (bad key, bad parameters).
    Client,

    /// Temporary failures worth retrying with backoff.
    Transient,
}

/// Severity level for logging and alerting decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Requires immediate attention.
    Critical,

    /// Action failed but the system is stable.
    Error,

    /// Unexpected but recoverable situation.
    Warning,

    /// Expected failure (validation, not found).
    Info,
}

/// Error object returned by the service inside `{"error": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorObject {
    /// Human-readable description from the service.
    pub message: String,
    /// Service error type, e.g. `invalid_request_error`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Request parameter the error refers to, when the service names one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    /// Machine-readable code; the service sends strings, numbers or null.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<serde_json::Value>,
}

crate::wire_record!(ApiErrorObject, "aeo", ["Message", "Type", "Param", "Code"]);

/// Envelope wrapping [`ApiErrorObject`] on non-success responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorObject,
}

crate::wire_record!(ApiErrorEnvelope, "aee", ["Error"]);

impl std::fmt::Display for ApiErrorObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.error_type {
            Some(error_type) => write!(f, "{error_type}: {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

// ============================================================================
// OpenAI Error types
// ============================================================================

/// Convenient result type for API operations.
pub type OpenAIResult<T> = std::result::Result<T, OpenAIError>;

/// Errors that can occur when calling the API.
///
/// | Variant | Kind | Category | Retryable |
/// |---------|------|----------|-----------|
/// | `ConfigurationError` | Client | Client | No |
/// | `InvalidRequest` | Client | Client | No |
/// | `EncodingError` | Client | Internal | No |
/// | `RequestFailed` | Client | External | Yes |
/// | `Timeout` | Client | Transient | Yes |
/// | `ResponseParsingError` | Client | External | No |
/// | `UnexpectedStatus` | Client | External | 429/5xx only |
/// | `Api` | Api | Client/Transient/External | 429/5xx only |
///
/// Use the constructor methods, which log the error at an appropriate level.
#[derive(Error, Debug)]
pub enum OpenAIError {
    /// Client configuration is invalid or incomplete.
    #[error("Client configuration error: {message}")]
    ConfigurationError {
        /// Description of the configuration problem.
        message: String,
    },

    /// The caller supplied a value the API cannot accept (empty id, unreadable file).
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Description of the problem.
        message: String,
    },

    /// A request record could not be turned into its wire form.
    #[error("Request encoding failed: {message}")]
    EncodingError {
        /// Details about the encoding failure.
        message: String,
    },

    /// The HTTP round-trip failed before a response arrived.
    #[error("Request failed: {message}")]
    RequestFailed {
        /// Description of the failure.
        message: String,
        /// The underlying error, if available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A request attempt or the whole operation exceeded its deadline.
    #[error("Request timed out after {timeout_seconds}s")]
    Timeout {
        /// The timeout duration that was exceeded.
        timeout_seconds: u64,
    },

    /// The response body did not decode into the expected record.
    #[error("Response parsing failed: {message}")]
    ResponseParsingError {
        /// Details about the parsing failure.
        message: String,
    },

    /// Non-success status whose body is not a service error payload.
    #[error("Unexpected HTTP status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Response body, lossily decoded and truncated.
        body: String,
    },

    /// The service returned a decoded error object.
    #[error("API error (HTTP {status}): {error}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// The service's own error description.
        error: ApiErrorObject,
        /// Value of the `Retry-After` header, when present.
        retry_after_seconds: Option<u64>,
    },
}

impl OpenAIError {
    /// Which of the two error kinds this is.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Api { .. } => ErrorKind::Api,
            _ => ErrorKind::Client,
        }
    }

    /// The decoded service error, for [`ErrorKind::Api`] errors.
    pub fn api_error(&self) -> Option<&ApiErrorObject> {
        match self {
            Self::Api { error, .. } => Some(error),
            _ => None,
        }
    }

    /// HTTP status, for errors that carry one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-suggested wait before retrying, if any.
    pub fn retry_after_seconds(&self) -> Option<u64> {
        match self {
            Self::Api {
                retry_after_seconds,
                ..
            } => *retry_after_seconds,
            _ => None,
        }
    }

    /// Get the error category for routing and handling decisions.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigurationError { .. } => ErrorCategory::Client,
            Self::InvalidRequest { .. } => ErrorCategory::Client,
            Self::EncodingError { .. } => ErrorCategory::Internal,
            Self::RequestFailed { .. } => ErrorCategory::External,
            Self::Timeout { .. } => ErrorCategory::Transient,
            Self::ResponseParsingError { .. } => ErrorCategory::External,
            Self::UnexpectedStatus { status, .. } | Self::Api { status, .. } => {
                status_category(*status)
            }
        }
    }

    /// Get the error severity for logging and alerting.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ConfigurationError { .. } => ErrorSeverity::Error,
            Self::InvalidRequest { .. } => ErrorSeverity::Info,
            Self::EncodingError { .. } => ErrorSeverity::Critical,
            Self::RequestFailed { .. } => ErrorSeverity::Error,
            Self::Timeout { .. } => ErrorSeverity::Warning,
            Self::ResponseParsingError { .. } => ErrorSeverity::Warning,
            Self::UnexpectedStatus { .. } => ErrorSeverity::Error,
            Self::Api { status, .. } => match status_category(*status) {
                ErrorCategory::Client => ErrorSeverity::Info,
                ErrorCategory::Transient => ErrorSeverity::Warning,
                _ => ErrorSeverity::Error,
            },
        }
    }

    /// Whether this error is transient and a retry may succeed.
    ///
    /// Returns `true` for transport failures, timeouts, rate limiting (429)
    /// and server-side (5xx) statuses.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RequestFailed { .. } | Self::Timeout { .. } => true,
            Self::UnexpectedStatus { status, .. } | Self::Api { status, .. } => {
                is_retryable_status(*status)
            }
            _ => false,
        }
    }

    /// Convert to a message safe to show to end users.
    pub fn user_message(&self) -> String {
        match self {
            Self::ConfigurationError { .. } => {
                "AI service configuration issue. Please check your settings".to_string()
            }
            Self::InvalidRequest { .. } | Self::EncodingError { .. } => {
                "The request could not be prepared".to_string()
            }
            Self::RequestFailed { .. } => {
                "Unable to communicate with AI service. Please try again".to_string()
            }
            Self::Timeout { .. } => "Request timed out. Please try again".to_string(),
            Self::ResponseParsingError { .. } => {
                "Received an invalid response from AI service".to_string()
            }
            Self::UnexpectedStatus { status, .. } | Self::Api { status, .. } => match status {
                401 | 403 => "Authentication failed. Please check your credentials".to_string(),
                429 => match self.retry_after_seconds() {
                    Some(seconds) => format!(
                        "Service is busy. Please wait {seconds} seconds and try again"
                    ),
                    None => "Service is busy. Please try again later".to_string(),
                },
                500..=599 => "AI service is unavailable. Please try again".to_string(),
                _ => "The AI service rejected the request".to_string(),
            },
        }
    }

    // =========================================================================
    // Constructor methods with automatic logging
    // =========================================================================

    pub fn configuration_error(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "configuration_error",
            message = %message,
            "Client configuration validation failed"
        );
        Self::ConfigurationError { message }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        let message = message.into();
        log_warn!(
            error_type = "invalid_request",
            message = %message,
            "Request rejected before sending"
        );
        Self::InvalidRequest { message }
    }

    pub fn encoding_error(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "encoding_error",
            message = %message,
            "Request record could not be encoded"
        );
        Self::EncodingError { message }
    }

    pub fn request_failed(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        let message = message.into();
        log_error!(
            error_type = "request_failed",
            message = %message,
            has_source = source.is_some(),
            "HTTP request execution failed"
        );
        Self::RequestFailed { message, source }
    }

    pub fn timeout(timeout_seconds: u64) -> Self {
        log_warn!(
            error_type = "timeout",
            timeout_seconds = timeout_seconds,
            "Request timed out"
        );
        Self::Timeout { timeout_seconds }
    }

    pub fn response_parsing_error(message: impl Into<String>) -> Self {
        let message = message.into();
        log_warn!(
            error_type = "response_parsing_error",
            message = %message,
            "Response body did not match the expected record"
        );
        Self::ResponseParsingError { message }
    }

    pub fn unexpected_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        log_error!(
            error_type = "unexpected_status",
            status = status,
            body = %body,
            "Non-success response without an error payload"
        );
        Self::UnexpectedStatus { status, body }
    }

    pub fn api(status: u16, error: ApiErrorObject, retry_after_seconds: Option<u64>) -> Self {
        log_warn!(
            error_type = "api_error",
            status = status,
            api_error_type = ?error.error_type,
            message = %error.message,
            "Service returned an error object"
        );
        Self::Api {
            status,
            error,
            retry_after_seconds,
        }
    }
}

/// Statuses worth retrying: rate limiting and server-side failures.
pub(crate) fn is_retryable_status(status: u16) -> bool {
    status == 429 || (500..=599).contains(&status)
}

fn status_category(status: u16) -> ErrorCategory {
    if is_retryable_status(status) {
        if status == 429 {
            ErrorCategory::Transient
        } else {
            ErrorCategory::External
        }
    } else {
        ErrorCategory::Client
    }
}
