//! OpenAI chat completions client
//!
//! Single-turn only: the user's message is the whole conversation.

use serde::{Deserialize, Serialize};

use super::{Provider, decode, send};
use crate::config::OpenAiConfig;
use crate::error::{AppError, AppResult};
use crate::metrics::{Metrics, Outcome};

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Option<Vec<Choice>>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<AssistantMessage>,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
}

impl CompletionResponse {
    /// Content of the first choice, if it has any
    fn first_content(self) -> Option<String> {
        self.choices?
            .into_iter()
            .next()?
            .message?
            .content
            .filter(|c| !c.is_empty())
    }
}

/// Client for the OpenAI chat completions endpoint
#[derive(Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    config: OpenAiConfig,
    metrics: Metrics,
}

impl OpenAiClient {
    pub fn new(http: reqwest::Client, config: OpenAiConfig, metrics: Metrics) -> Self {
        Self {
            http,
            config,
            metrics,
        }
    }

    /// Send `message` as a single user turn
    ///
    /// Returns the first choice's content, or `None` when the completion
    /// carries no usable text.
    pub async fn complete(&self, message: &str) -> AppResult<Option<String>> {
        let api_key = self.config.api_key().ok_or_else(|| {
            AppError::Config("OpenAI API key is not configured (OPENAI_API_KEY)".to_string())
        })?;

        let result = self.fetch(api_key, message).await;
        self.metrics
            .record_upstream(Provider::OpenAi, Outcome::of(&result));
        result
    }

    async fn fetch(&self, api_key: &str, message: &str) -> AppResult<Option<String>> {
        tracing::debug!(
            model = %self.config.model,
            message_chars = message.chars().count(),
            "Requesting chat completion"
        );

        let body = CompletionRequest {
            model: &self.config.model,
            messages: [Message {
                role: "user",
                content: message,
            }],
        };

        let request = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .json(&body);

        let response = send(Provider::OpenAi, request).await?;
        let completion: CompletionResponse = decode(Provider::OpenAi, response).await?;
        Ok(completion.first_content())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> CompletionResponse {
        serde_json::from_str(json).expect("should parse completion")
    }

    #[test]
    fn test_request_serializes_single_user_turn() {
        let body = CompletionRequest {
            model: "gpt-3.5-turbo",
            messages: [Message {
                role: "user",
                content: "Szia",
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "gpt-3.5-turbo",
                "messages": [{"role": "user", "content": "Szia"}]
            })
        );
    }

    #[test]
    fn test_first_choice_content_is_extracted() {
        let completion = parse(
            r#"{"choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Első"}},
                {"index": 1, "message": {"role": "assistant", "content": "Második"}}
            ]}"#,
        );
        assert_eq!(completion.first_content().as_deref(), Some("Első"));
    }

    #[test]
    fn test_missing_pieces_yield_none() {
        assert_eq!(parse("{}").first_content(), None);
        assert_eq!(parse(r#"{"choices": []}"#).first_content(), None);
        assert_eq!(parse(r#"{"choices": [{}]}"#).first_content(), None);
        assert_eq!(
            parse(r#"{"choices": [{"message": {"content": null}}]}"#).first_content(),
            None
        );
        assert_eq!(
            parse(r#"{"choices": [{"message": {"content": ""}}]}"#).first_content(),
            None
        );
    }
}
