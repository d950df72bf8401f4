//! JSON-RPC client for storage-array management endpoints
//!
//! Each call is one HTTPS POST carrying a `{"method","id","params"}` envelope
//! and one response classified as an authorization failure, an API error, or
//! a result decoded into the caller's type.
//!
//! # Components
//!
//! - **transport**: the `Transport` trait and its HTTPS implementation
//! - **request**: correlation id generation
//! - **decoder**: response classification over a transport response
//! - **client**: the `SfClient` facade
//! - **client_builder**: configuration of transport, id checks, metrics
//! - **metrics**: OpenTelemetry instruments
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sfrpc_client::SfClient;
//! use sfrpc_core::EndpointConfig;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SfClient::new(EndpointConfig::from_env()?)?;
//!
//!     let volumes = client
//!         .call_value("ListActiveVolumes", &json!({"startVolumeID": 0, "limit": 10}))
//!         .await?;
//!     println!("{}", volumes);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Testing Against a Fake
//!
//! ```rust
//! use async_trait::async_trait;
//! use sfrpc_client::{RawResponse, SfClient, Transport};
//! use sfrpc_core::{EndpointConfig, Result};
//! use std::sync::Arc;
//!
//! struct AlwaysEmpty;
//!
//! #[async_trait]
//! impl Transport for AlwaysEmpty {
//!     async fn send(&self, _url: &str, _body: String) -> Result<RawResponse> {
//!         Ok(RawResponse::from_bytes("200 OK", r#"{"result":{"volumes":[]}}"#))
//!     }
//! }
//!
//! let client = SfClient::builder(EndpointConfig::new("https://10.0.0.1/json-rpc/9.0"))
//!     .with_transport(Arc::new(AlwaysEmpty))
//!     .build()
//!     .unwrap();
//! # let _ = client;
//! ```

mod client;
mod client_builder;
mod decoder;
mod metrics;
mod request;
mod transport;

pub use client::SfClient;
pub use client_builder::ClientBuilder;
pub use decoder::decode_response;
pub use metrics::ClientMetrics;
pub use request::{RequestIdGenerator, MAX_REQUEST_ID, MIN_REQUEST_ID};
pub use transport::{
    HttpsTransport, RawResponse, ResponseBody, Transport, TransportOptions, JSON_RPC_CONTENT_TYPE,
};
