//! Bing search proxy
//!
//! `GET /api/bing-search?q=...` returns the top Bing web results as
//! `{query, items: [{title, url, snippet}]}`.

use axum::{
    Json,
    extract::{RawQuery, State},
};

use crate::error::AppResult;
use crate::handlers::AppState;
use crate::metrics::Handler;
use crate::models::{BingSearchResponse, SearchQuery, query_param};

/// Bing search handler
///
/// The key check comes before input validation: an unconfigured proxy
/// answers 500 regardless of the query. A repeated or undecodable `q` is a
/// 400 like a missing one.
pub async fn handler(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> AppResult<Json<BingSearchResponse>> {
    state.metrics().record_request(Handler::BingSearch);

    state.bing().api_key()?;
    let q = query_param(raw.as_deref(), "q")?;
    let query = SearchQuery::parse(q.as_deref(), "q")?;

    let items = state.bing().search(&query).await?;
    tracing::info!(
        query = %query,
        item_count = items.len(),
        "Bing search completed"
    );

    Ok(Json(BingSearchResponse {
        query: query.into_inner(),
        items,
    }))
}
