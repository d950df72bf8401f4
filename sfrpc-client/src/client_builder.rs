//! Client builder
//!
//! `ClientBuilder` gathers everything an [`SfClient`] needs before the first
//! call:
//! - the endpoint configuration (required)
//! - a transport, or the HTTPS transport options to build one
//! - response id verification and request debug logging
//! - observability (OpenTelemetry) and metrics
//!
//! # Examples
//!
//! ```rust,no_run
//! use sfrpc_client::ClientBuilder;
//! use sfrpc_core::EndpointConfig;
//! use std::time::Duration;
//!
//! # fn example() -> sfrpc_core::Result<()> {
//! let client = ClientBuilder::new(EndpointConfig::from_file("/etc/sf/solidfire.json")?)
//!     .timeout(Duration::from_secs(30))
//!     .accept_invalid_certs(false)
//!     .with_metrics()
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use crate::metrics::ClientMetrics;
use crate::request::RequestIdGenerator;
use crate::transport::{HttpsTransport, Transport, TransportOptions};
use crate::SfClient;
use sfrpc_core::{EndpointConfig, Error, ObservabilityConfig, Result};
use std::sync::Arc;
use std::time::Duration;

/// Builder for configuring and creating an [`SfClient`]
pub struct ClientBuilder {
    config: EndpointConfig,
    transport: Option<Arc<dyn Transport>>,
    transport_options: TransportOptions,
    verify_response_id: bool,
    debug: bool,
    id_seed: Option<u64>,
    enable_metrics: bool,
    observability_config: Option<ObservabilityConfig>,
    service_name: Option<String>,
}

impl ClientBuilder {
    /// Start from an endpoint configuration
    pub fn new(config: EndpointConfig) -> Self {
        Self {
            config,
            transport: None,
            transport_options: TransportOptions::default(),
            verify_response_id: true,
            debug: false,
            id_seed: None,
            enable_metrics: false,
            observability_config: None,
            service_name: None,
        }
    }

    /// Use a custom transport instead of HTTPS
    ///
    /// Transport options set on this builder are ignored when a transport is
    /// supplied.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Validate server certificates or not (default: accept invalid ones)
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.transport_options.accept_invalid_certs = accept;
        self
    }

    /// Whole-request timeout for the HTTPS transport
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.transport_options.timeout = Some(timeout);
        self
    }

    /// Connect timeout for the HTTPS transport
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.transport_options.connect_timeout = Some(timeout);
        self
    }

    /// Reject responses whose id differs from the request id (default: on)
    pub fn verify_response_id(mut self, verify: bool) -> Self {
        self.verify_response_id = verify;
        self
    }

    /// Log request payloads and transport failures at debug level
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Seed the id generator instead of seeding from the clock
    pub fn id_seed(mut self, seed: u64) -> Self {
        self.id_seed = Some(seed);
        self
    }

    /// Record client metrics on the global meter provider
    pub fn with_metrics(mut self) -> Self {
        self.enable_metrics = true;
        self
    }

    /// Initialize OpenTelemetry with this configuration when building
    ///
    /// Also enables metrics. Only one client per process should do this.
    pub fn with_observability(mut self, config: ObservabilityConfig) -> Self {
        self.observability_config = Some(config);
        self.enable_metrics = true;
        self
    }

    /// Initialize OpenTelemetry with default configuration when building
    pub fn with_default_observability(self) -> Self {
        self.with_observability(ObservabilityConfig::default())
    }

    /// Service name for observability and metrics
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    /// Validate the configuration and create the client
    ///
    /// # Errors
    ///
    /// - `Error::Config` if the endpoint configuration is invalid or
    ///   observability cannot be initialized
    /// - `Error::Transport` if the HTTPS transport cannot be built
    pub fn build(self) -> Result<SfClient> {
        self.config.validate()?;

        let service_name = self
            .service_name
            .clone()
            .or_else(|| self.observability_config.as_ref().map(|c| c.service_name.clone()))
            .unwrap_or_else(|| "sfrpc".to_string());

        if let Some(mut config) = self.observability_config {
            config.service_name = service_name.clone();
            sfrpc_core::init_observability(config)
                .map_err(|e| Error::Config(format!("Failed to initialize observability: {}", e)))?;
        }

        let metrics = self
            .enable_metrics
            .then(|| Arc::new(ClientMetrics::new(service_name)));

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpsTransport::with_options(self.transport_options)?),
        };

        let ids = match self.id_seed {
            Some(seed) => RequestIdGenerator::with_seed(seed),
            None => RequestIdGenerator::new(),
        };

        tracing::info!(
            tenant_id = self.config.tenant_id,
            api_version = %self.config.api_version,
            "Client configured"
        );

        Ok(SfClient {
            config: Arc::new(self.config),
            transport,
            ids: Arc::new(ids),
            verify_response_id: self.verify_response_id,
            debug: self.debug,
            metrics,
        })
    }
}
