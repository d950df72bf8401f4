//! sfrpc - JSON-RPC client for storage-array management APIs
//!
//! This is the convenience crate that re-exports the sfrpc sub-crates. Use it
//! when you want a single dependency covering configuration, the wire codec
//! and the HTTPS client.
//!
//! # Architecture
//!
//! - **sfrpc-core**: envelope types, codec, errors, configuration, observability
//! - **sfrpc-client**: HTTPS transport, id generation, response decoding, `SfClient`
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sfrpc::{EndpointConfig, SfClient};
//! use serde::Deserialize;
//! use serde_json::json;
//!
//! #[derive(Deserialize)]
//! struct Volumes {
//!     volumes: Vec<serde_json::Value>,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SfClient::new(EndpointConfig::from_env()?)?;
//!
//!     let listed: Volumes = client
//!         .call("ListActiveVolumes", &json!({"startVolumeID": 0, "limit": 10}))
//!         .await?;
//!     println!("{} active volumes", listed.volumes.len());
//!
//!     Ok(())
//! }
//! ```

pub use sfrpc_client as client;
pub use sfrpc_core as core;

pub use sfrpc_client::{ClientBuilder, SfClient};
pub use sfrpc_core::{EndpointConfig, Error, Result};
