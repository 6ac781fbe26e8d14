//! Chat endpoint handler
//!
//! Handles `POST /api/chat`. Messages that mention a trigger keyword are
//! answered from the top Google result (through this deployment's own Google
//! proxy); everything else goes to the chat completion provider.

use axum::{Extension, Json, body::Bytes, extract::State};

use crate::error::{AppError, AppResult};
use crate::handlers::AppState;
use crate::metrics::Handler;
use crate::middleware::RequestId;
use crate::models::{ChatReply, ChatRequest};
use crate::router::Intent;
use crate::upstream::internal::TopHit;

/// Error message for every failed chat request
pub const CHAT_FAILURE: &str = "Chat request failed";

/// Placeholder for a missing title or link in a synthesized reply.
/// Existing callers receive this literal when search finds nothing.
pub const MISSING_FIELD: &str = "undefined";

/// Chat handler
///
/// Any failure along either path is reported as a 500 carrying the
/// underlying error text.
pub async fn handler(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    body: Bytes,
) -> AppResult<Json<ChatReply>> {
    state.metrics().record_request(Handler::Chat);

    respond(&state, request_id, &body)
        .await
        .map(Json)
        .map_err(|e| AppError::unexpected(CHAT_FAILURE, e))
}

async fn respond(state: &AppState, request_id: RequestId, body: &[u8]) -> AppResult<ChatReply> {
    let request = ChatRequest::from_body(body)?;
    let intent = state.router().classify(&request.message);
    tracing::info!(intent = %intent, "Routing chat message");

    let reply = match intent {
        Intent::Search { query } => {
            let hit = state.internal_search().top_hit(&query, request_id).await?;
            synthesize_reply(&state.config().chat.result_label, hit.as_ref())
        }
        Intent::Chat => state
            .openai()
            .complete(&request.message)
            .await?
            .unwrap_or_else(|| state.config().chat.fallback_reply.clone()),
    };

    Ok(ChatReply { reply })
}

/// Build `"<label>: <title> - <link>"` from the top search hit
pub fn synthesize_reply(label: &str, hit: Option<&TopHit>) -> String {
    let title = hit
        .and_then(|h| h.title.as_deref())
        .unwrap_or(MISSING_FIELD);
    let link = hit
        .and_then(|h| h.link.as_deref())
        .unwrap_or(MISSING_FIELD);
    format!("{}: {} - {}", label, title, link)
}
