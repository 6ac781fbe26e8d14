//! Clients for the third-party providers behind each handler
//!
//! Every client shares one pooled `reqwest::Client` and reports each call's
//! outcome to the Prometheus metrics.

use std::fmt;

use crate::error::{AppError, AppResult};

pub mod bing;
pub mod google;
pub mod internal;
pub mod openai;

pub use bing::BingClient;
pub use google::GoogleClient;
pub use internal::InternalSearchClient;
pub use openai::OpenAiClient;

/// Upstream a request was sent to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Bing,
    Google,
    OpenAi,
    /// This deployment's own Google proxy, called by the chat router
    InternalSearch,
}

impl Provider {
    /// Prometheus label value
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Bing => "bing",
            Provider::Google => "google",
            Provider::OpenAi => "openai",
            Provider::InternalSearch => "internal_search",
        }
    }

    /// Error message used when a call fails before a status is available
    pub fn failure_context(&self) -> &'static str {
        match self {
            Provider::Bing => "Bing search failed",
            Provider::Google => "Google search failed",
            Provider::OpenAi => "Chat completion failed",
            Provider::InternalSearch => "Internal search failed",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Provider::Bing => "Bing",
            Provider::Google => "Google",
            Provider::OpenAi => "OpenAI",
            Provider::InternalSearch => "Internal search",
        };
        f.write_str(name)
    }
}

/// Send a prepared request, turning a non-success status into `AppError::Upstream`
///
/// The upstream body is kept verbatim so the caller sees exactly what the
/// provider said.
pub(crate) async fn send(
    provider: Provider,
    request: reqwest::RequestBuilder,
) -> AppResult<reqwest::Response> {
    let response = request
        .send()
        .await
        .map_err(|e| AppError::unexpected(provider.failure_context(), e))?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(
                provider = provider.as_str(),
                status = status.as_u16(),
                error = %e,
                "Failed to read upstream error body"
            );
            format!("Failed to read response body: {}", e)
        }
    };
    tracing::warn!(
        provider = provider.as_str(),
        status = status.as_u16(),
        body_len = body.len(),
        "Upstream returned non-success status"
    );
    Err(AppError::Upstream {
        provider,
        status,
        body,
    })
}

/// Decode a successful upstream body as JSON
pub(crate) async fn decode<T: serde::de::DeserializeOwned>(
    provider: Provider,
    response: reqwest::Response,
) -> AppResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| AppError::unexpected(provider.failure_context(), e))
}
