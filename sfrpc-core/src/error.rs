//! Error types for sfrpc
//!
//! This module defines the error taxonomy of a single JSON-RPC round trip
//! against a storage-array management endpoint, plus the wire-format error
//! object the array embeds in failed responses.
//!
//! - **Error**: everything a call can fail with (uses thiserror)
//! - **ApiErrorData**: the `error` member of a failed response body
//!
//! # Failure Classes
//!
//! | variant | cause | retry? |
//! |---|---|---|
//! | `Serialization` | outbound params could not be encoded | never, caller bug |
//! | `Transport` | connection refused, timeout, unreadable body | caller may retry |
//! | `Unauthorized` | the endpoint rejected the credentials | after fixing credentials |
//! | `Api` | the array rejected the operation | depends on the code |
//! | `Decode` | body matched neither the error nor the result shape | never |
//! | `IdMismatch` | response id differs from the request id | never |
//! | `Config` | endpoint configuration could not be loaded | never |
//!
//! Nothing in this crate retries. Every layer hands its error straight back
//! to the caller.
//!
//! # Examples
//!
//! ```rust
//! use sfrpc_core::{ApiErrorData, Error};
//!
//! let error = Error::Api(ApiErrorData::new(500, "xInvalidParameter", "bad start id"));
//! assert_eq!(error.kind(), "api");
//! assert!(!error.is_retryable());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for sfrpc operations
pub type Result<T> = std::result::Result<T, Error>;

/// Everything a JSON-RPC call against the array can fail with
///
/// Payloads are kept as strings so the error stays `Clone` and can be handed
/// across tasks and recorded in metrics without borrowing the source error.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The outbound parameter value could not be serialized
    ///
    /// Permanent. Usually a map with non-string keys or a custom `Serialize`
    /// impl that refuses the value.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Network level failure
    ///
    /// Connection refused, TLS handshake failure, timeout, or a response body
    /// that could not be read. The pipeline does not distinguish these.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The endpoint answered with an authorization failure
    ///
    /// Detected from the status line alone; the body is never read.
    #[error("Unauthorized request: {status}")]
    Unauthorized {
        /// Status line as reported by the transport (e.g. "401 Unauthorized")
        status: String,
    },

    /// The array reported an error inside a well-formed response body
    #[error("Device API error: {0}")]
    Api(#[from] ApiErrorData),

    /// The body matched neither the error envelope nor the requested shape
    #[error("Decode error: {reason}")]
    Decode {
        /// Parser message
        reason: String,
        /// Raw response body, kept for diagnostics
        body: String,
    },

    /// The response carried a different correlation id than the request
    #[error("Response id mismatch: expected={expected}, actual={actual}")]
    IdMismatch {
        /// Id sent with the request
        expected: i64,
        /// Id found in the response
        actual: i64,
    },

    /// Endpoint configuration could not be read or is invalid
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Short, stable label for logs and metric attributes
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Serialization(_) => "serialization",
            Error::Transport(_) => "transport",
            Error::Unauthorized { .. } => "unauthorized",
            Error::Api(_) => "api",
            Error::Decode { .. } => "decode",
            Error::IdMismatch { .. } => "id_mismatch",
            Error::Config(_) => "config",
        }
    }

    /// Whether repeating the same call could plausibly succeed
    ///
    /// Only transport failures qualify. API errors may be transient for some
    /// codes, but mapping codes to retry classes is left to the caller.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// The embedded API error, if this is one
    pub fn api_error(&self) -> Option<&ApiErrorData> {
        match self {
            Error::Api(data) => Some(data),
            _ => None,
        }
    }
}

/// Error object embedded in a failed response body
///
/// Wire shape: `{"code": 500, "name": "xInvalidParameter", "message": "..."}`.
/// All fields default when absent, so a bare `{}` parses to code 0, which
/// means "no error".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorData {
    /// Numeric error code; 0 means success
    #[serde(default)]
    pub code: i64,

    /// Symbolic error name, e.g. `xVolumeIDDoesNotExist`
    #[serde(default)]
    pub name: String,

    /// Human-readable description
    #[serde(default)]
    pub message: String,
}

impl ApiErrorData {
    /// Create an error object
    ///
    /// ```rust
    /// use sfrpc_core::ApiErrorData;
    ///
    /// let error = ApiErrorData::new(500, "xInvalidParameter", "bad start id");
    /// assert!(error.is_error());
    /// ```
    pub fn new(code: i64, name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
            message: message.into(),
        }
    }

    /// True when the code signals a failure
    pub fn is_error(&self) -> bool {
        self.code != 0
    }
}

impl std::fmt::Display for ApiErrorData {
    /// Formats as "[code] name: message"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.name, self.message)
    }
}

impl std::error::Error for ApiErrorData {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds_are_distinct() {
        let errors = vec![
            Error::Serialization("x".into()),
            Error::Transport("x".into()),
            Error::Unauthorized { status: "401 Unauthorized".into() },
            Error::Api(ApiErrorData::new(1, "x", "x")),
            Error::Decode { reason: "x".into(), body: "x".into() },
            Error::IdMismatch { expected: 1, actual: 2 },
            Error::Config("x".into()),
        ];

        let mut kinds: Vec<_> = errors.iter().map(|e| e.kind()).collect();
        kinds.sort();
        kinds.dedup();
        assert_eq!(kinds.len(), errors.len());
    }

    #[test]
    fn test_only_transport_is_retryable() {
        assert!(Error::Transport("connection refused".into()).is_retryable());
        assert!(!Error::Unauthorized { status: "401".into() }.is_retryable());
        assert!(!Error::Api(ApiErrorData::new(500, "xDBConnectionLoss", "")).is_retryable());
        assert!(!Error::Serialization("bad".into()).is_retryable());
    }

    #[test]
    fn test_api_error_display() {
        let error = ApiErrorData::new(500, "xInvalidParameter", "bad start id");
        let display = format!("{}", error);

        assert!(display.contains("500"));
        assert!(display.contains("xInvalidParameter"));
        assert!(display.contains("bad start id"));
    }

    #[test]
    fn test_api_error_from_conversion() {
        let error: Error = ApiErrorData::new(404, "xVolumeIDDoesNotExist", "no such volume").into();

        let data = error.api_error().unwrap();
        assert_eq!(data.code, 404);
        assert_eq!(data.name, "xVolumeIDDoesNotExist");
    }

    #[test]
    fn test_api_error_deserialization_defaults() {
        let error: ApiErrorData = serde_json::from_str("{}").unwrap();
        assert_eq!(error.code, 0);
        assert!(!error.is_error());

        let error: ApiErrorData =
            serde_json::from_str(r#"{"code":500,"name":"xUnknown"}"#).unwrap();
        assert!(error.is_error());
        assert!(error.message.is_empty());
    }

    #[test]
    fn test_decode_error_keeps_body() {
        let error = Error::Decode {
            reason: "expected value".into(),
            body: "<html>".into(),
        };

        match error {
            Error::Decode { body, .. } => assert_eq!(body, "<html>"),
            _ => panic!("Expected Decode error"),
        }
    }

    #[test]
    fn test_id_mismatch_display() {
        let error = Error::IdMismatch { expected: 7, actual: 8 };
        let display = error.to_string();
        assert!(display.contains("expected=7"));
        assert!(display.contains("actual=8"));
    }
}
