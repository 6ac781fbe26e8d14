//! Configuration management for searchrelay
//!
//! Parses TOML configuration files, layers provider credentials from the
//! environment on top, and provides typed access to settings. The result is
//! validated once at startup and then shared read-only by every handler.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::error::{AppError, AppResult};

/// Environment variable holding the Bing Search subscription key
pub const ENV_BING_API_KEY: &str = "BING_API_KEY";
/// Environment variable holding the Google Custom Search API key
pub const ENV_GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
/// Environment variable holding the Google search engine ID
pub const ENV_GOOGLE_CX: &str = "GOOGLE_CX";
/// Environment variable holding the OpenAI API key
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
/// Environment variable holding the deployment base URL
pub const ENV_PUBLIC_BASE_URL: &str = "URL";

const MAX_TIMEOUT_SECONDS: u64 = 300;

/// Root configuration structure
///
/// Every section is optional; a deployment that only sets environment
/// variables runs on the defaults below.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub bing: BingConfig,
    #[serde(default)]
    pub google: GoogleConfig,
    #[serde(default)]
    pub openai: OpenAiConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_seconds: u64,
    /// Base URL this deployment is reachable at. The chat router calls the
    /// Google proxy through it.
    pub public_base_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8888,
            request_timeout_seconds: 30,
            public_base_url: None,
        }
    }
}

impl ServerConfig {
    /// Deployment base URL without a trailing slash, if configured
    pub fn public_base_url(&self) -> Option<&str> {
        non_blank(&self.public_base_url).map(|url| url.trim_end_matches('/'))
    }
}

/// Bing Web Search settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BingConfig {
    pub api_key: Option<String>,
    pub endpoint: String,
    /// Market locale sent as `mkt`
    pub market: String,
    pub max_results: usize,
}

impl Default for BingConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: "https://api.bing.microsoft.com/v7.0/search".to_string(),
            market: "hu-HU".to_string(),
            max_results: 5,
        }
    }
}

impl BingConfig {
    /// Subscription key, treating an empty value as absent
    pub fn api_key(&self) -> Option<&str> {
        non_blank(&self.api_key)
    }
}

/// Google Custom Search settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GoogleConfig {
    pub api_key: Option<String>,
    pub cx: Option<String>,
    pub endpoint: String,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            cx: None,
            endpoint: "https://www.googleapis.com/customsearch/v1".to_string(),
        }
    }
}

impl GoogleConfig {
    /// API key, treating an empty value as absent
    pub fn api_key(&self) -> Option<&str> {
        non_blank(&self.api_key)
    }

    /// Search engine ID, treating an empty value as absent
    pub fn cx(&self) -> Option<&str> {
        non_blank(&self.cx)
    }
}

/// OpenAI chat completion settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-3.5-turbo".to_string(),
        }
    }
}

impl OpenAiConfig {
    /// API key, treating an empty value as absent
    pub fn api_key(&self) -> Option<&str> {
        non_blank(&self.api_key)
    }
}

/// Chat router behaviour
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Substrings that send a message down the search path
    pub trigger_keywords: Vec<String>,
    /// Prefix of a reply synthesized from a search result
    pub result_label: String,
    /// Reply used when the completion carries no content
    pub fallback_reply: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            trigger_keywords: vec!["keress".to_string(), "google".to_string()],
            result_label: "Találat".to_string(),
            fallback_reply: "Nem értem a kérdést.".to_string(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path_display = path.as_ref().display().to_string();
        let config = Self::parse_file(path.as_ref())?;

        config
            .validate()
            .map_err(|e| AppError::ConfigValidationFailed {
                path: path_display,
                reason: e.to_string(),
            })?;

        Ok(config)
    }

    /// Load configuration the way the server does at startup
    ///
    /// Reads `path` if it exists (defaults otherwise), applies environment
    /// overrides from the process environment, then validates the result.
    pub fn load<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref();
        let path_display = path.display().to_string();

        let mut config = if path.exists() {
            Self::parse_file(path)?
        } else {
            tracing::info!(
                path = %path_display,
                "Config file not found, using defaults and environment"
            );
            Self::default()
        };

        config.apply_env_overrides(|name| std::env::var(name).ok());

        config
            .validate()
            .map_err(|e| AppError::ConfigValidationFailed {
                path: path_display,
                reason: e.to_string(),
            })?;

        Ok(config)
    }

    fn parse_file(path: &Path) -> AppResult<Self> {
        let path_display = path.display().to_string();

        let content =
            std::fs::read_to_string(path).map_err(|source| AppError::ConfigFileRead {
                path: path_display.clone(),
                source,
            })?;

        toml::from_str(&content).map_err(|source| AppError::ConfigParseFailed {
            path: path_display,
            source,
        })
    }

    /// Overlay credentials and the base URL from an environment lookup
    ///
    /// Only non-empty values override what the file set. The lookup is
    /// injectable so tests need not touch the process environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(ENV_BING_API_KEY) {
            self.bing.api_key = Some(v);
        }
        if let Some(v) = get(ENV_GOOGLE_API_KEY) {
            self.google.api_key = Some(v);
        }
        if let Some(v) = get(ENV_GOOGLE_CX) {
            self.google.cx = Some(v);
        }
        if let Some(v) = get(ENV_OPENAI_API_KEY) {
            self.openai.api_key = Some(v);
        }
        if let Some(v) = get(ENV_PUBLIC_BASE_URL) {
            self.server.public_base_url = Some(v);
        }
    }

    /// Names of the credentials that are not configured
    ///
    /// Missing credentials do not fail startup: each handler reports its own
    /// missing key when called, so the others keep working.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.bing.api_key().is_none() {
            missing.push(ENV_BING_API_KEY);
        }
        if self.google.api_key().is_none() {
            missing.push(ENV_GOOGLE_API_KEY);
        }
        if self.google.cx().is_none() {
            missing.push(ENV_GOOGLE_CX);
        }
        if self.openai.api_key().is_none() {
            missing.push(ENV_OPENAI_API_KEY);
        }
        if self.server.public_base_url().is_none() {
            missing.push(ENV_PUBLIC_BASE_URL);
        }
        missing
    }

    /// Validate configuration after parsing
    ///
    /// This is called automatically by `from_file()` and `load()`, but can also
    /// be called explicitly when constructing Config via other means.
    pub fn validate(&self) -> AppResult<()> {
        let timeout = self.server.request_timeout_seconds;
        if timeout == 0 || timeout > MAX_TIMEOUT_SECONDS {
            return Err(AppError::Config(format!(
                "server.request_timeout_seconds must be in (0, {}], got {}",
                MAX_TIMEOUT_SECONDS, timeout
            )));
        }

        for (field, url) in [
            ("bing.endpoint", self.bing.endpoint.as_str()),
            ("google.endpoint", self.google.endpoint.as_str()),
            ("openai.endpoint", self.openai.endpoint.as_str()),
        ] {
            validate_http_url(field, url)?;
        }
        if let Some(base) = self.server.public_base_url() {
            validate_http_url("server.public_base_url", base)?;
        }

        if self.bing.max_results == 0 {
            return Err(AppError::Config(
                "bing.max_results must be greater than 0".to_string(),
            ));
        }

        if self.bing.market.trim().is_empty() {
            return Err(AppError::Config("bing.market cannot be empty".to_string()));
        }

        if self.openai.model.trim().is_empty() {
            return Err(AppError::Config("openai.model cannot be empty".to_string()));
        }

        if self.chat.trigger_keywords.is_empty() {
            return Err(AppError::Config(
                "chat.trigger_keywords must contain at least one keyword".to_string(),
            ));
        }
        if self
            .chat
            .trigger_keywords
            .iter()
            .any(|k| k.trim().is_empty())
        {
            return Err(AppError::Config(
                "chat.trigger_keywords cannot contain blank entries".to_string(),
            ));
        }

        Ok(())
    }
}

fn validate_http_url(field: &str, url: &str) -> AppResult<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(AppError::Config(format!(
            "{} must start with http:// or https://, got '{}'",
            field, url
        )))
    }
}

impl FromStr for Config {
    type Err = AppError;

    fn from_str(toml_str: &str) -> Result<Self, Self::Err> {
        let config: Config =
            toml::from_str(toml_str).map_err(|source| AppError::ConfigParseFailed {
                path: "<string>".to_string(),
                source,
            })?;

        config.validate()?;
        Ok(config)
    }
}
