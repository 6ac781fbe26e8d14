//! Prometheus metrics collection for searchrelay
//!
//! Tracks handler invocations and the outcome of every upstream call.
//! Metrics are exposed via the `/metrics` endpoint in Prometheus text format.

use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::Arc;

use crate::error::AppResult;
use crate::upstream::Provider;

/// Handler label for `searchrelay_requests_total`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    BingSearch,
    GoogleSearch,
    Chat,
}

impl Handler {
    /// Convert handler to Prometheus label string
    pub fn as_str(&self) -> &'static str {
        match self {
            Handler::BingSearch => "bing_search",
            Handler::GoogleSearch => "google_search",
            Handler::Chat => "chat",
        }
    }
}

/// How an upstream call ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// 2xx with a decodable body
    Success,
    /// Upstream answered with a non-success status
    UpstreamError,
    /// Network failure, malformed body, missing credential
    Failure,
}

impl Outcome {
    /// Convert outcome to Prometheus label string
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::UpstreamError => "upstream_error",
            Outcome::Failure => "failure",
        }
    }

    /// Classify the result of an upstream call
    pub fn of<T>(result: &AppResult<T>) -> Self {
        match result {
            Ok(_) => Outcome::Success,
            Err(crate::error::AppError::Upstream { .. }) => Outcome::UpstreamError,
            Err(_) => Outcome::Failure,
        }
    }
}

/// Metrics collector for searchrelay
#[derive(Clone)]
pub struct Metrics {
    pub registry: Arc<Registry>,
    requests_total: IntCounterVec,
    upstream_requests_total: IntCounterVec,
}

impl Metrics {
    /// Create a new Metrics instance
    ///
    /// Registers all metrics with a new Prometheus registry.
    ///
    /// # Errors
    ///
    /// Returns an error if metric registration fails (e.g., duplicate names).
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let requests_total = IntCounterVec::new(
            Opts::new(
                "searchrelay_requests_total",
                "Total number of handler invocations",
            ),
            &["handler"],
        )?;

        let upstream_requests_total = IntCounterVec::new(
            Opts::new(
                "searchrelay_upstream_requests_total",
                "Upstream provider calls by outcome",
            ),
            &["provider", "outcome"],
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(upstream_requests_total.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            requests_total,
            upstream_requests_total,
        })
    }

    /// Count one invocation of `handler`
    pub fn record_request(&self, handler: Handler) {
        self.requests_total
            .with_label_values(&[handler.as_str()])
            .inc();
    }

    /// Count one upstream call
    pub fn record_upstream(&self, provider: Provider, outcome: Outcome) {
        self.upstream_requests_total
            .with_label_values(&[provider.as_str(), outcome.as_str()])
            .inc();
    }

    /// Current invocation count for `handler`
    pub fn requests_count(&self, handler: Handler) -> u64 {
        self.requests_total
            .with_label_values(&[handler.as_str()])
            .get()
    }

    /// Current call count for `provider` with `outcome`
    pub fn upstream_count(&self, provider: Provider, outcome: Outcome) -> u64 {
        self.upstream_requests_total
            .with_label_values(&[provider.as_str(), outcome.as_str()])
            .get()
    }

    /// Gather all metrics and encode them in Prometheus text format
    ///
    /// # Errors
    ///
    /// Returns an error if metric encoding fails.
    pub fn gather(&self) -> Result<String, prometheus::Error> {
        let metric_families = self.registry.gather();

        let mut buffer = Vec::new();
        let encoder = TextEncoder::new();
        encoder.encode(&metric_families, &mut buffer).map_err(|e| {
            tracing::error!(
                error = %e,
                metric_family_count = metric_families.len(),
                "Prometheus text encoder failed"
            );
            e
        })?;

        String::from_utf8(buffer).map_err(|e| {
            prometheus::Error::Msg(format!(
                "Failed to convert metrics to UTF-8 at byte {}: {}",
                e.utf8_error().valid_up_to(),
                e
            ))
        })
    }
}
