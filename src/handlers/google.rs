//! Google search proxy
//!
//! `POST /api/google-search` with `{"query": ...}` returns Google's raw result
//! items as `{results: [...]}`. The same route answers `GET ?q=...`, which
//! is how the chat router calls it.

use axum::{
    Json,
    body::Bytes,
    extract::{RawQuery, State},
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::AppState;
use crate::metrics::Handler;
use crate::models::{GoogleSearchResponse, SearchQuery, query_param};
use crate::upstream::Provider;

/// JSON request body
#[derive(Debug, Default, Deserialize)]
pub struct GoogleSearchRequest {
    #[serde(default)]
    pub query: Option<String>,
}

impl GoogleSearchRequest {
    /// Parse a raw request body; an empty body counts as `{}`
    pub fn from_body(body: &[u8]) -> AppResult<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
            .map_err(|e| AppError::unexpected(Provider::Google.failure_context(), e))
    }
}

/// Google search handler
///
/// The body's `query` wins over `q` when both are present; the query string
/// is not even parsed then.
pub async fn handler(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
    body: Bytes,
) -> AppResult<Json<GoogleSearchResponse>> {
    state.metrics().record_request(Handler::GoogleSearch);

    let request = GoogleSearchRequest::from_body(&body)?;
    let raw = match request.query {
        Some(query) => Some(query),
        None => query_param(raw_query.as_deref(), "q")?,
    };
    let query = SearchQuery::parse(raw.as_deref(), "query")?;

    let results = state.google().search(&query).await?;
    tracing::info!(
        query = %query,
        result_count = results.len(),
        "Google search completed"
    );

    Ok(Json(GoogleSearchResponse { results }))
}
