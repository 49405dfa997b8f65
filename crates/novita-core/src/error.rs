//! Error types for Novita operations.
//!
//! This module provides the single error type shared by every client crate,
//! the structured payload captured from failed HTTP calls, and the mapping
//! from HTTP status codes to error variants.

use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Message used when no credential could be found at construction time.
pub const MISSING_API_KEY_MESSAGE: &str = "No API key provided. Pass an API key explicitly \
     or set the NOVITA_API_KEY environment variable";

/// Message used for every 401 response, regardless of the body.
pub const AUTHENTICATION_FAILED_MESSAGE: &str = "Authentication failed: invalid or expired API key";

/// Message used for every 429 response, regardless of the body.
pub const RATE_LIMITED_MESSAGE: &str = "Rate limit exceeded, slow down and retry later";

/// Main error type for Novita operations.
///
/// The HTTP variants (`Authentication`, `BadRequest`, `NotFound`, `RateLimit`,
/// `Api`) carry the [`ErrorPayload`] captured from the failed response so
/// callers can build their own retry or reporting policy.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Missing, invalid or expired credential.
    #[error("{message}")]
    Authentication {
        /// Human-readable message
        message: String,
        /// Response payload, absent when raised before any request
        payload: Option<ErrorPayload>,
    },

    /// The server rejected the request parameters.
    #[error("Bad request: {message}")]
    BadRequest {
        /// Server-provided message, or a generic one
        message: String,
        /// Response payload
        payload: ErrorPayload,
    },

    /// The requested resource does not exist.
    #[error("Not found: {message}")]
    NotFound {
        /// Message naming the request or resource
        message: String,
        /// Response payload, absent when detected client-side
        payload: Option<ErrorPayload>,
    },

    /// Too many requests.
    #[error("{message}")]
    RateLimit {
        /// Human-readable message
        message: String,
        /// Response payload
        payload: ErrorPayload,
    },

    /// Any other non-2xx response.
    #[error("API error {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Server message or raw body
        message: String,
        /// Response payload
        payload: ErrorPayload,
    },

    /// Request timed out in the transport.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Connection or protocol failure before a response was received.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Response body could not be decoded into the expected model.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Local validation of a request model failed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The client was closed before the call was made.
    #[error("Client has been closed")]
    ClientClosed,
}

/// Specialized result type for Novita operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Details captured at the point an HTTP call fails.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ErrorPayload {
    /// HTTP status code
    pub status: u16,
    /// Machine message from the `message` field of a JSON body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Structured details (`details` or `metadata` field of a JSON body)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// Raw response body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl ErrorPayload {
    /// Build a payload from a status code and the fully read response body.
    #[must_use]
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body).into_owned();
        let json = serde_json::from_slice::<Value>(body).ok();

        let message = json
            .as_ref()
            .and_then(|value| value.get("message"))
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
            .map(str::to_owned);
        let details = json.as_ref().and_then(|value| {
            value
                .get("details")
                .or_else(|| value.get("metadata"))
                .filter(|details| !details.is_null())
                .cloned()
        });

        Self {
            status: status.as_u16(),
            message,
            details,
            body: (!text.is_empty()).then_some(text),
        }
    }
}

impl Error {
    /// Error raised when no API key is available at construction time.
    #[must_use]
    pub fn missing_api_key() -> Self {
        Self::Authentication {
            message: MISSING_API_KEY_MESSAGE.to_string(),
            payload: None,
        }
    }

    /// Not-found error detected on the client side (no HTTP 404 involved).
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            payload: None,
        }
    }

    /// Translate a non-2xx response into an error.
    ///
    /// `target` names the request (method, path and query) and is used in
    /// not-found messages. The body must already be fully read.
    #[must_use]
    pub fn from_response(status: StatusCode, target: &str, body: &[u8]) -> Self {
        let payload = ErrorPayload::from_response(status, body);

        match status {
            StatusCode::UNAUTHORIZED => Self::Authentication {
                message: AUTHENTICATION_FAILED_MESSAGE.to_string(),
                payload: Some(payload),
            },
            StatusCode::BAD_REQUEST => Self::BadRequest {
                message: payload
                    .message
                    .clone()
                    .unwrap_or_else(|| "the request was rejected by the server".to_string()),
                payload,
            },
            StatusCode::NOT_FOUND => Self::NotFound {
                message: format!("resource not found for {target}"),
                payload: Some(payload),
            },
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimit {
                message: RATE_LIMITED_MESSAGE.to_string(),
                payload,
            },
            status => {
                let message = payload
                    .message
                    .clone()
                    .or_else(|| payload.body.clone())
                    .unwrap_or_else(|| {
                        status
                            .canonical_reason()
                            .unwrap_or("unexpected status")
                            .to_string()
                    });
                Self::Api {
                    status: status.as_u16(),
                    message,
                    payload,
                }
            }
        }
    }

    /// Pass 2xx responses through and translate everything else.
    ///
    /// # Errors
    ///
    /// Returns the translated error for any non-2xx status.
    pub fn check_response(status: StatusCode, target: &str, body: &[u8]) -> Result<()> {
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::from_response(status, target, body))
        }
    }

    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Authentication { .. } => "AUTHENTICATION_ERROR",
            Self::BadRequest { .. } => "BAD_REQUEST",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::RateLimit { .. } => "RATE_LIMITED",
            Self::Api { .. } => "API_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::Http(_) => "HTTP_ERROR",
            Self::Decode(_) => "DECODE_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::ClientClosed => "CLIENT_CLOSED",
        }
    }

    /// HTTP status code of the failed response, if there was one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.payload().map(|payload| payload.status)
    }

    /// Payload captured from the failed response, if there was one.
    #[must_use]
    pub fn payload(&self) -> Option<&ErrorPayload> {
        match self {
            Self::Authentication { payload, .. } | Self::NotFound { payload, .. } => {
                payload.as_ref()
            }
            Self::BadRequest { payload, .. }
            | Self::RateLimit { payload, .. }
            | Self::Api { payload, .. } => Some(payload),
            _ => None,
        }
    }

    /// Whether a caller-side retry has a chance of succeeding.
    ///
    /// The SDK never retries on its own.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimit { .. } | Self::Timeout(_) | Self::Http(_) => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else if err.is_builder() {
            Self::Config(err.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}
