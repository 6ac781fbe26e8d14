//! Google Custom Search JSON API client

use serde::Deserialize;

use super::{Provider, decode, send};
use crate::config::GoogleConfig;
use crate::error::{AppError, AppResult};
use crate::metrics::{Metrics, Outcome};
use crate::models::SearchQuery;

#[derive(Debug, Deserialize)]
struct CustomSearchResponse {
    #[serde(default)]
    items: Option<Vec<serde_json::Value>>,
}

/// Client for the Google Custom Search JSON API
#[derive(Clone)]
pub struct GoogleClient {
    http: reqwest::Client,
    config: GoogleConfig,
    metrics: Metrics,
}

impl GoogleClient {
    pub fn new(http: reqwest::Client, config: GoogleConfig, metrics: Metrics) -> Self {
        Self {
            http,
            config,
            metrics,
        }
    }

    /// Search and return Google's raw `items`, empty when Google sends none
    pub async fn search(&self, query: &SearchQuery) -> AppResult<Vec<serde_json::Value>> {
        let (Some(api_key), Some(cx)) = (self.config.api_key(), self.config.cx()) else {
            return Err(AppError::Config(
                "Google API key or search engine ID is not configured (GOOGLE_API_KEY, GOOGLE_CX)"
                    .to_string(),
            ));
        };

        let result = self.fetch(api_key, cx, query).await;
        self.metrics
            .record_upstream(Provider::Google, Outcome::of(&result));
        result
    }

    async fn fetch(
        &self,
        api_key: &str,
        cx: &str,
        query: &SearchQuery,
    ) -> AppResult<Vec<serde_json::Value>> {
        tracing::debug!(query = %query, "Querying Google Custom Search");

        let request = self.http.get(&self.config.endpoint).query(&[
            ("key", api_key),
            ("cx", cx),
            ("q", query.as_str()),
        ]);

        let response = send(Provider::Google, request).await?;
        let body: CustomSearchResponse = decode(Provider::Google, response).await?;
        Ok(body.items.unwrap_or_default())
    }
}
