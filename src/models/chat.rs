//! Chat request and reply shapes

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Chat request from client
///
/// A missing `message` is an empty message, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

impl ChatRequest {
    /// Parse a raw request body; an empty body counts as `{}`
    pub fn from_body(body: &[u8]) -> AppResult<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
            .map_err(|e| AppError::unexpected("Invalid chat request body", e))
    }
}

/// Chat response to client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}
