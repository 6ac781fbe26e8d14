//! HTTP request handlers for searchrelay

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::metrics::Metrics;
use crate::router::KeywordRouter;
use crate::upstream::{BingClient, GoogleClient, InternalSearchClient, OpenAiClient};
use std::sync::Arc;
use std::time::Duration;

pub mod bing;
pub mod chat;
pub mod google;
pub mod health;
pub mod metrics;

/// Route of the Bing search proxy
pub const BING_SEARCH_PATH: &str = "/api/bing-search";
/// Route of the Google search proxy
pub const GOOGLE_SEARCH_PATH: &str = "/api/google-search";
/// Route of the chat router
pub const CHAT_PATH: &str = "/api/chat";

/// Application state shared across all handlers
///
/// Built once from validated configuration. All clients share one pooled
/// HTTP client; cloning the state is cheap.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    metrics: Metrics,
    router: Arc<KeywordRouter>,
    bing: BingClient,
    google: GoogleClient,
    openai: OpenAiClient,
    internal_search: InternalSearchClient,
}

impl AppState {
    /// Create a new AppState from configuration
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the HTTP client or the metrics registry
    /// cannot be built.
    pub fn new(config: Arc<Config>) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.server.request_timeout_seconds))
            .user_agent(concat!("searchrelay/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let metrics = Metrics::new()
            .map_err(|e| AppError::Config(format!("Failed to register metrics: {}", e)))?;

        let router = Arc::new(KeywordRouter::new(&config.chat.trigger_keywords));

        Ok(Self {
            bing: BingClient::new(http.clone(), config.bing.clone(), metrics.clone()),
            google: GoogleClient::new(http.clone(), config.google.clone(), metrics.clone()),
            openai: OpenAiClient::new(http.clone(), config.openai.clone(), metrics.clone()),
            internal_search: InternalSearchClient::new(
                http,
                config.server.public_base_url().map(str::to_string),
                metrics.clone(),
            ),
            router,
            metrics,
            config,
        })
    }

    /// Get reference to the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get reference to the metrics collector
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Get reference to the chat intent router
    pub fn router(&self) -> &KeywordRouter {
        &self.router
    }

    pub fn bing(&self) -> &BingClient {
        &self.bing
    }

    pub fn google(&self) -> &GoogleClient {
        &self.google
    }

    pub fn openai(&self) -> &OpenAiClient {
        &self.openai
    }

    pub fn internal_search(&self) -> &InternalSearchClient {
        &self.internal_search
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn create_test_config() -> Config {
        Config::from_str(
            r#"
[server]
request_timeout_seconds = 5
public_base_url = "http://localhost:8888/"

[chat]
trigger_keywords = ["Keress", "google"]
"#,
        )
        .expect("should parse test config")
    }

    #[test]
    fn test_appstate_new_creates_state() {
        let state = AppState::new(Arc::new(create_test_config())).expect("should create state");
        assert_eq!(state.config().server.request_timeout_seconds, 5);
        assert_eq!(state.router().keywords(), ["keress", "google"]);
    }

    #[test]
    fn test_appstate_is_clonable() {
        let state = AppState::new(Arc::new(create_test_config())).unwrap();
        let state2 = state.clone();
        state.metrics().record_request(crate::metrics::Handler::Chat);
        assert_eq!(
            state2
                .metrics()
                .requests_count(crate::metrics::Handler::Chat),
            1
        );
    }

    #[test]
    fn test_internal_search_uses_public_base_url() {
        let state = AppState::new(Arc::new(create_test_config())).unwrap();
        let url = state.internal_search().search_url("weather").unwrap();
        assert_eq!(url, "http://localhost:8888/api/google-search?q=weather");
    }
}
