//! Prometheus metrics endpoint
//!
//! Exposes metrics in Prometheus text format for scraping.

use axum::{extract::State, http::StatusCode};

use crate::handlers::AppState;

/// Metrics handler for Prometheus scraping
///
/// # Response
///
/// - `200 OK` with metrics in Prometheus text format
/// - `500 Internal Server Error` if metrics collection fails
///
/// # Example
///
/// ```bash
/// curl http://localhost:8888/metrics
/// # HELP searchrelay_requests_total Total number of handler invocations
/// # TYPE searchrelay_requests_total counter
/// searchrelay_requests_total{handler="chat"} 42
/// ```
pub async fn handler(State(state): State<AppState>) -> (StatusCode, String) {
    match state.metrics().gather() {
        Ok(output) => (StatusCode::OK, output),
        Err(e) => {
            tracing::error!(error = %e, "Failed to gather metrics for Prometheus scraping");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to gather metrics: {}", e),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::metrics::{Handler, Outcome};
    use crate::upstream::Provider;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_metrics_handler_returns_prometheus_format() {
        let state = AppState::new(Arc::new(Config::default())).unwrap();
        state.metrics().record_request(Handler::BingSearch);
        state
            .metrics()
            .record_upstream(Provider::Bing, Outcome::UpstreamError);

        let (status, body) = handler(State(state)).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("# HELP"));
        assert!(body.contains("# TYPE"));
        assert!(body.contains("searchrelay_requests_total{handler=\"bing_search\"} 1"));
        assert!(body.contains("outcome=\"upstream_error\""));
    }
}
