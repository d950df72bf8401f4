//! The client facade
//!
//! [`SfClient`] owns the endpoint configuration, a transport and an id
//! generator, and turns each call into exactly one round trip:
//!
//! 1. draw a correlation id
//! 2. build and encode the `{"method","id","params"}` envelope
//! 3. send it through the transport
//! 4. classify and decode the response
//! 5. check the echoed id against the request id
//!
//! The first failing step ends the call and its error is returned as is.
//! There is no retry, backoff or timeout here; timeouts belong to the
//! transport.
//!
//! # Sharing
//!
//! Build one client at startup and clone it wherever calls are made. Clones
//! share the transport and the id generator. Concurrent calls from separate
//! tasks are fine; each call is independent of the others.

use crate::decoder::decode_response;
use crate::metrics::ClientMetrics;
use crate::request::RequestIdGenerator;
use crate::transport::Transport;
use crate::ClientBuilder;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sfrpc_core::{codec, Decoded, EndpointConfig, Error, Request, Result};
use std::sync::Arc;
use std::time::Instant;

/// JSON-RPC client for one array management endpoint
#[derive(Clone)]
pub struct SfClient {
    pub(crate) config: Arc<EndpointConfig>,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) ids: Arc<RequestIdGenerator>,
    pub(crate) verify_response_id: bool,
    pub(crate) debug: bool,
    pub(crate) metrics: Option<Arc<ClientMetrics>>,
}

impl SfClient {
    /// Client over HTTPS with default options
    pub fn new(config: EndpointConfig) -> Result<Self> {
        ClientBuilder::new(config).build()
    }

    /// Start configuring a client
    pub fn builder(config: EndpointConfig) -> ClientBuilder {
        ClientBuilder::new(config)
    }

    /// Endpoint configuration this client was built with
    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    /// JSON-RPC endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    pub fn tenant_id(&self) -> i64 {
        self.config.tenant_id
    }

    pub fn api_version(&self) -> &str {
        &self.config.api_version
    }

    /// Call `method` and decode its `result` into `R`
    ///
    /// # Errors
    ///
    /// - `Error::Serialization` if `params` cannot be encoded
    /// - `Error::Transport` if no response was obtained
    /// - `Error::Unauthorized` if the endpoint rejected the credentials
    /// - `Error::Api` if the array reported an error
    /// - `Error::Decode` if the body matched neither shape
    /// - `Error::IdMismatch` if the echoed id differs (when verification is on)
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use serde::{Deserialize, Serialize};
    /// use sfrpc_client::SfClient;
    /// use sfrpc_core::EndpointConfig;
    ///
    /// #[derive(Serialize)]
    /// struct ListActiveVolumes {
    ///     #[serde(rename = "startVolumeID")]
    ///     start_volume_id: i64,
    ///     limit: i64,
    /// }
    ///
    /// #[derive(Deserialize)]
    /// struct Volumes {
    ///     volumes: Vec<serde_json::Value>,
    /// }
    ///
    /// # async fn example() -> sfrpc_core::Result<()> {
    /// let client = SfClient::new(EndpointConfig::from_env()?)?;
    /// let listed: Volumes = client
    ///     .call("ListActiveVolumes", &ListActiveVolumes { start_volume_id: 0, limit: 10 })
    ///     .await?;
    /// println!("{} volumes", listed.volumes.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn call<P, R>(&self, method: &str, params: &P) -> Result<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.call_raw(method, params).await.map(Decoded::into_result)
    }

    /// Call `method` without a declared result shape
    pub async fn call_value<P>(&self, method: &str, params: &P) -> Result<serde_json::Value>
    where
        P: Serialize + ?Sized,
    {
        self.call(method, params).await
    }

    /// Call `method` and keep the echoed correlation id next to the result
    #[tracing::instrument(skip(self, params), fields(id = tracing::field::Empty))]
    pub async fn call_raw<P, R>(&self, method: &str, params: &P) -> Result<Decoded<R>>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let start = Instant::now();
        let outcome = self.round_trip(method, params).await;
        let duration = start.elapsed().as_secs_f64();

        match &outcome {
            Ok(_) => {
                tracing::debug!(duration_secs = duration, "Call completed");
                if let Some(ref m) = self.metrics {
                    m.record_request(method, "success", duration);
                }
            }
            Err(e) => {
                tracing::error!(error = %e, kind = e.kind(), "Call failed");
                if let Some(ref m) = self.metrics {
                    m.record_request(method, "error", duration);
                    m.record_error(e.kind());
                    if let Error::Api(api) = e {
                        m.record_api_error(method, api);
                    }
                }
            }
        }

        outcome
    }

    async fn round_trip<P, R>(&self, method: &str, params: &P) -> Result<Decoded<R>>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let id = self.ids.next_id();
        tracing::Span::current().record("id", id);

        let request = Request::from_params(method, id, params)?
            .with_url(self.config.endpoint.as_str())
            .with_debug(self.debug);
        let payload = codec::encode_request(&request)?;

        if request.debug {
            tracing::debug!(%payload, "Issuing request");
        }

        let raw = self
            .transport
            .send(&request.url, payload)
            .await
            .inspect_err(|e| {
                if request.debug {
                    tracing::debug!(error = %e, "Transport failed");
                }
            })?;

        let decoded = decode_response::<R>(raw, &request).await?;

        if self.verify_response_id {
            if let Some(actual) = decoded.id {
                if actual != id {
                    return Err(Error::IdMismatch { expected: id, actual });
                }
            }
        }

        Ok(decoded)
    }
}

impl std::fmt::Debug for SfClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The endpoint URL usually embeds credentials
        f.debug_struct("SfClient")
            .field("tenant_id", &self.config.tenant_id)
            .field("api_version", &self.config.api_version)
            .field("verify_response_id", &self.verify_response_id)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}
