//! Error types for searchrelay
//!
//! All errors implement `IntoResponse` for Axum handlers. Every error body has
//! the shape `{"error": ..., "detail": ...}` where `detail` is omitted when
//! there is nothing more to say.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::upstream::Provider;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read config file {path}: {source}")]
    ConfigFileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration in {path}: {reason}")]
    ConfigValidationFailed { path: String, reason: String },

    #[error("Invalid request: {0}")]
    Validation(String),

    /// Upstream answered with a non-success status. The status is handed back
    /// to the caller unchanged.
    #[error("{provider} returned HTTP {status}: {body}")]
    Upstream {
        provider: Provider,
        status: StatusCode,
        body: String,
    },

    /// Anything else that went wrong while serving a request.
    #[error("{context}: {detail}")]
    Unexpected {
        context: &'static str,
        detail: String,
    },
}

impl AppError {
    /// Wrap an arbitrary failure under a handler-specific message
    pub fn unexpected(context: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Unexpected {
            context,
            detail: err.to_string(),
        }
    }

    /// Status code this error is reported with
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Upstream { status, .. } => *status,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::Config(msg) | Self::Validation(msg) => serde_json::json!({ "error": msg }),
            Self::Upstream { provider, body, .. } => {
                tracing::warn!(
                    provider = %provider,
                    status = status.as_u16(),
                    "Upstream provider returned an error"
                );
                serde_json::json!({
                    "error": format!("{} request failed", provider),
                    "detail": body,
                })
            }
            Self::Unexpected { context, detail } => {
                tracing::error!(error = %detail, "{}", context);
                serde_json::json!({ "error": context, "detail": detail })
            }
            other => serde_json::json!({ "error": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

/// Convenience type alias for Results
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_config_error_creates() {
        let err = AppError::Config("BING_API_KEY is not set".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: BING_API_KEY is not set"
        );
    }

    #[test]
    fn test_validation_error_creates() {
        let err = AppError::Validation("query is required".to_string());
        assert_eq!(err.to_string(), "Invalid request: query is required");
    }

    #[test]
    fn test_unexpected_error_keeps_context_and_detail() {
        let err = AppError::unexpected("Bing search failed", "connection refused");
        assert_eq!(err.to_string(), "Bing search failed: connection refused");
    }

    #[tokio::test]
    async fn test_config_error_response() {
        let response = AppError::Config("missing key".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "missing key");
        assert!(body.get("detail").is_none());
    }

    #[tokio::test]
    async fn test_validation_error_response() {
        let response = AppError::Validation("query is required".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "query is required");
    }

    #[tokio::test]
    async fn test_upstream_error_propagates_status_and_body() {
        let err = AppError::Upstream {
            provider: Provider::Google,
            status: StatusCode::TOO_MANY_REQUESTS,
            body: "quota exceeded".to_string(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        let body = body_json(response).await;
        assert_eq!(body["detail"], "quota exceeded");
    }

    #[tokio::test]
    async fn test_unexpected_error_response() {
        let response = AppError::unexpected("Chat request failed", "boom").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Chat request failed");
        assert_eq!(body["detail"], "boom");
    }
}
