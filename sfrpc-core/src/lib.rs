//! Core JSON-RPC types, codec and configuration for sfrpc
//!
//! This crate is transport-agnostic. It knows how a storage-array management
//! API call looks on the wire and how a response body is classified, but not
//! how bytes get to the array; `sfrpc-client` supplies that.
//!
//! - **types**: request envelope, error envelope, decoded result
//! - **codec**: envelope encoding and the response classification steps
//! - **error**: the error taxonomy shared by every layer
//! - **config**: endpoint configuration loading
//! - **observability**: tracing subscriber and OpenTelemetry setup
//!
//! # Example
//!
//! ```rust
//! use sfrpc_core::{codec, Decoded, Error, Request};
//! use serde_json::json;
//!
//! let request = Request::new("ListActiveVolumes", 1, json!({"startVolumeID": 0, "limit": 10}));
//! let body = codec::encode_request(&request).unwrap();
//! assert!(body.starts_with(r#"{"method":"ListActiveVolumes""#));
//!
//! let failed = codec::decode_response_body::<serde_json::Value>(
//!     br#"{"id":1,"error":{"code":500,"name":"xInvalidParameter","message":"bad start id"}}"#,
//! );
//! assert!(matches!(failed, Err(Error::Api(_))));
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod observability;
pub mod types;

pub use config::{BlockSize, EndpointConfig};
pub use error::{ApiErrorData, Error, Result};
pub use observability::{init_observability, shutdown_observability, ObservabilityConfig};
pub use types::{ApiErrorEnvelope, Decoded, Request};
