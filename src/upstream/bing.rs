//! Bing Web Search v7 client

use serde::Deserialize;

use super::{Provider, decode, send};
use crate::config::BingConfig;
use crate::error::{AppError, AppResult};
use crate::metrics::{Metrics, Outcome};
use crate::models::{SearchQuery, SearchResult};

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

#[derive(Debug, Default, Deserialize)]
struct BingResponse {
    #[serde(default, rename = "webPages")]
    web_pages: Option<WebPages>,
}

#[derive(Debug, Default, Deserialize)]
struct WebPages {
    #[serde(default)]
    value: Vec<WebPage>,
}

#[derive(Debug, Deserialize)]
struct WebPage {
    #[serde(default)]
    name: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    snippet: String,
}

impl From<WebPage> for SearchResult {
    fn from(page: WebPage) -> Self {
        Self {
            title: page.name,
            url: page.url,
            snippet: page.snippet,
        }
    }
}

/// Client for the Bing Web Search API
#[derive(Clone)]
pub struct BingClient {
    http: reqwest::Client,
    config: BingConfig,
    metrics: Metrics,
}

impl BingClient {
    pub fn new(http: reqwest::Client, config: BingConfig, metrics: Metrics) -> Self {
        Self {
            http,
            config,
            metrics,
        }
    }

    /// Subscription key, or a configuration error when none is set
    pub fn api_key(&self) -> AppResult<&str> {
        self.config.api_key().ok_or_else(|| {
            AppError::Config("Bing API key is not configured (BING_API_KEY)".to_string())
        })
    }

    /// Search the web and return at most `max_results` hits in Bing's order
    pub async fn search(&self, query: &SearchQuery) -> AppResult<Vec<SearchResult>> {
        let api_key = self.api_key()?;
        let result = self.fetch(api_key, query).await;
        self.metrics
            .record_upstream(Provider::Bing, Outcome::of(&result));
        result
    }

    async fn fetch(&self, api_key: &str, query: &SearchQuery) -> AppResult<Vec<SearchResult>> {
        tracing::debug!(
            query = %query,
            market = %self.config.market,
            "Querying Bing Web Search"
        );

        let request = self
            .http
            .get(&self.config.endpoint)
            .header(SUBSCRIPTION_KEY_HEADER, api_key)
            .query(&[("q", query.as_str()), ("mkt", self.config.market.as_str())]);

        let response = send(Provider::Bing, request).await?;
        let body: BingResponse = decode(Provider::Bing, response).await?;

        Ok(body
            .web_pages
            .unwrap_or_default()
            .value
            .into_iter()
            .take(self.config.max_results)
            .map(SearchResult::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_page_maps_name_to_title() {
        let page: WebPage = serde_json::from_str(
            r#"{"name": "Nemzeti Sport", "url": "https://nso.hu", "snippet": "Foci hírek", "id": "x"}"#,
        )
        .unwrap();
        let result = SearchResult::from(page);
        assert_eq!(result.title, "Nemzeti Sport");
        assert_eq!(result.url, "https://nso.hu");
        assert_eq!(result.snippet, "Foci hírek");
    }

    #[test]
    fn test_response_without_web_pages_parses() {
        let body: BingResponse = serde_json::from_str(r#"{"_type": "SearchResponse"}"#).unwrap();
        assert!(body.web_pages.is_none());
    }

    #[test]
    fn test_missing_key_is_config_error() {
        let client = BingClient::new(
            reqwest::Client::new(),
            BingConfig::default(),
            Metrics::new().unwrap(),
        );
        assert!(matches!(client.api_key(), Err(AppError::Config(_))));
    }
}
