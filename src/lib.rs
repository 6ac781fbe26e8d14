//! searchrelay - search and chat proxy
//!
//! Serves three independent handlers that forward requests to Bing Search,
//! Google Custom Search and OpenAI chat completions, and reshape the answers
//! into small JSON envelopes.

pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod router;
pub mod telemetry;
pub mod upstream;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use handlers::{AppState, BING_SEARCH_PATH, CHAT_PATH, GOOGLE_SEARCH_PATH};

/// Build the HTTP application with every route and middleware attached
pub fn app(state: AppState) -> Router {
    Router::new()
        .route(BING_SEARCH_PATH, get(handlers::bing::handler))
        .route(
            GOOGLE_SEARCH_PATH,
            post(handlers::google::handler).get(handlers::google::handler),
        )
        .route(CHAT_PATH, post(handlers::chat::handler))
        .route("/health", get(handlers::health::handler))
        .route("/metrics", get(handlers::metrics::handler))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(
            middleware::request_id_middleware,
        ))
        .with_state(state)
}
