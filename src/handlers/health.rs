//! Health check endpoint
//!
//! Provides a simple health check for monitoring and load balancers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::handlers::AppState;

/// Which handlers have the credentials they need
#[derive(Debug, Serialize)]
pub struct ProviderStatus {
    pub bing: bool,
    pub google: bool,
    pub openai: bool,
    /// Chat search path: needs the deployment base URL
    pub internal_search: bool,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: &'static str,
    pub providers: ProviderStatus,
}

/// Health check handler
///
/// Always 200 OK. A provider reported as `false` will answer its handler's
/// requests with a configuration error until its credentials are set.
pub async fn handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let config = state.config();
    let providers = ProviderStatus {
        bing: config.bing.api_key().is_some(),
        google: config.google.api_key().is_some() && config.google.cx().is_some(),
        openai: config.openai.api_key().is_some(),
        internal_search: config.server.public_base_url().is_some(),
    };

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "OK",
            providers,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::str::FromStr;
    use std::sync::Arc;

    fn create_test_state(toml: &str) -> AppState {
        let config = Config::from_str(toml).expect("should parse test config");
        AppState::new(Arc::new(config)).expect("should create AppState")
    }

    #[tokio::test]
    async fn test_health_handler_returns_ok() {
        let state = create_test_state("");
        let (status, Json(body)) = handler(State(state)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "OK");
        assert!(!body.providers.bing);
        assert!(!body.providers.google);
        assert!(!body.providers.openai);
        assert!(!body.providers.internal_search);
    }

    #[tokio::test]
    async fn test_health_handler_reports_configured_providers() {
        let state = create_test_state(
            r#"
[bing]
api_key = "bing"

[google]
api_key = "google"
"#,
        );
        let (_, Json(body)) = handler(State(state)).await;
        assert!(body.providers.bing);
        // CX missing
        assert!(!body.providers.google);
    }
}
