//! Client for this deployment's own Google proxy
//!
//! The chat router reaches the Google proxy over HTTP through the public base
//! URL rather than calling it in-process, so it sees exactly what an outside
//! caller would.

use super::{Provider, decode, send};
use crate::error::{AppError, AppResult};
use crate::handlers::GOOGLE_SEARCH_PATH;
use crate::metrics::{Metrics, Outcome};
use crate::middleware::{REQUEST_ID_HEADER, RequestId};
use crate::models::GoogleSearchResponse;

/// Title and link of the top search hit
///
/// Fields are `None` when the hit lacks them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopHit {
    pub title: Option<String>,
    pub link: Option<String>,
}

impl TopHit {
    fn from_item(item: &serde_json::Value) -> Self {
        let field = |name: &str| item.get(name).and_then(|v| v.as_str()).map(str::to_string);
        Self {
            title: field("title"),
            link: field("link"),
        }
    }
}

#[derive(Clone)]
pub struct InternalSearchClient {
    http: reqwest::Client,
    base_url: Option<String>,
    metrics: Metrics,
}

impl InternalSearchClient {
    pub fn new(http: reqwest::Client, base_url: Option<String>, metrics: Metrics) -> Self {
        Self {
            http,
            base_url: base_url.map(|url| url.trim_end_matches('/').to_string()),
            metrics,
        }
    }

    /// Full URL of the search call for `query`
    pub fn search_url(&self, query: &str) -> AppResult<String> {
        let base = self.base_url.as_deref().ok_or_else(|| {
            AppError::Config("Deployment base URL is not configured (URL)".to_string())
        })?;
        Ok(format!(
            "{}{}?q={}",
            base,
            GOOGLE_SEARCH_PATH,
            urlencoding::encode(query)
        ))
    }

    /// Run `query` through the Google proxy and return its first result
    ///
    /// `request_id` is forwarded so the proxy logs under the caller's ID.
    pub async fn top_hit(&self, query: &str, request_id: RequestId) -> AppResult<Option<TopHit>> {
        let url = self.search_url(query)?;

        let result = self.fetch(&url, request_id).await;
        self.metrics
            .record_upstream(Provider::InternalSearch, Outcome::of(&result));
        result
    }

    async fn fetch(&self, url: &str, request_id: RequestId) -> AppResult<Option<TopHit>> {
        tracing::debug!(url = %url, "Calling internal search endpoint");

        let request = self
            .http
            .get(url)
            .header(REQUEST_ID_HEADER, request_id.to_string());
        let response = send(Provider::InternalSearch, request).await?;
        let body: GoogleSearchResponse = decode(Provider::InternalSearch, response).await?;
        Ok(body.results.first().map(TopHit::from_item))
    }
}
