//! Client metrics
//!
//! OpenTelemetry instruments recorded by [`SfClient`](crate::SfClient) when
//! metrics are enabled on the builder:
//!
//! - **sfrpc.client.requests.total**: calls issued, by method and outcome
//! - **sfrpc.client.request.duration**: round-trip latency in seconds
//! - **sfrpc.client.errors.total**: failed calls, by error kind
//! - **sfrpc.client.api_errors.total**: API errors, by array error name
//!
//! Instruments come from the global meter provider, so they are no-ops until
//! `init_observability` installs one.

use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
    InstrumentationScope, KeyValue,
};
use sfrpc_core::ApiErrorData;

/// Instruments for one client
pub struct ClientMetrics {
    pub requests_total: Counter<u64>,
    pub request_duration: Histogram<f64>,
    pub errors_total: Counter<u64>,
    pub api_errors_total: Counter<u64>,
}

impl ClientMetrics {
    /// Instruments on the global meter named after the service
    pub fn new(service_name: impl Into<String>) -> Self {
        let scope = InstrumentationScope::builder(service_name.into()).build();
        let meter = global::meter_with_scope(scope);
        Self::new_with_meter(&meter)
    }

    /// Instruments on a caller-supplied meter
    pub fn new_with_meter(meter: &Meter) -> Self {
        Self {
            requests_total: meter
                .u64_counter("sfrpc.client.requests.total")
                .with_description("Total number of API calls issued")
                .build(),
            request_duration: meter
                .f64_histogram("sfrpc.client.request.duration")
                .with_description("API call round-trip duration in seconds")
                .with_unit("s")
                .build(),
            errors_total: meter
                .u64_counter("sfrpc.client.errors.total")
                .with_description("Total number of failed API calls by error kind")
                .build(),
            api_errors_total: meter
                .u64_counter("sfrpc.client.api_errors.total")
                .with_description("Total number of errors reported by the array")
                .build(),
        }
    }

    /// Record a finished call
    pub fn record_request(&self, method: &str, status: &str, duration_secs: f64) {
        let attributes = &[
            KeyValue::new("method", method.to_string()),
            KeyValue::new("status", status.to_string()),
        ];
        self.requests_total.add(1, attributes);
        self.request_duration.record(duration_secs, attributes);
    }

    /// Record a failure by kind (see `Error::kind`)
    pub fn record_error(&self, kind: &'static str) {
        self.errors_total.add(1, &[KeyValue::new("error_kind", kind)]);
    }

    /// Record an error reported by the array itself
    pub fn record_api_error(&self, method: &str, error: &ApiErrorData) {
        let attributes = &[
            KeyValue::new("method", method.to_string()),
            KeyValue::new("code", error.code),
            KeyValue::new("name", error.name.clone()),
        ];
        self.api_errors_total.add(1, attributes);
    }
}
