//! Command-line interface for searchrelay
//!
//! Provides argument parsing and subcommand handling for the searchrelay binary.

use clap::{Parser, Subcommand};

/// Search and chat proxy for Bing, Google and OpenAI
#[derive(Parser)]
#[command(name = "searchrelay")]
#[command(version)]
#[command(about = "Search and chat proxy for Bing, Google and OpenAI")]
#[command(
    long_about = "searchrelay serves three proxies: a Bing search proxy, a Google Custom \
    Search proxy, and a chat router that answers from search results or from an OpenAI \
    chat completion. Credentials come from the config file or the environment."
)]
pub struct Cli {
    /// Path to configuration file (optional; defaults and environment are used if absent)
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a template configuration file
    Config {
        /// Output file path (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Load and validate the configuration, then list missing credentials
    Check,
}

/// Generate template configuration content
pub fn generate_config_template() -> &'static str {
    r#"# searchrelay Configuration
# ==========================
#
# Every value below is optional. Credentials are usually supplied through the
# environment instead (BING_API_KEY, GOOGLE_API_KEY, GOOGLE_CX,
# OPENAI_API_KEY, URL), which overrides anything set here.

# ─────────────────────────────────────────────────────────────────────────────
# SERVER
# ─────────────────────────────────────────────────────────────────────────────

[server]
# IP address to bind to (0.0.0.0 for all interfaces, 127.0.0.1 for localhost only)
host = "0.0.0.0"
port = 8888

# Upstream request timeout in seconds (1-300)
request_timeout_seconds = 30

# Public base URL of this deployment. The chat router calls
# <public_base_url>/api/google-search for search-intent messages. (env: URL)
# public_base_url = "https://your-site.example.com"

# ─────────────────────────────────────────────────────────────────────────────
# BING SEARCH PROXY  (GET /api/bing-search?q=...)
# ─────────────────────────────────────────────────────────────────────────────

[bing]
# api_key = "..."            # env: BING_API_KEY
endpoint = "https://api.bing.microsoft.com/v7.0/search"
market = "hu-HU"
max_results = 5

# ─────────────────────────────────────────────────────────────────────────────
# GOOGLE SEARCH PROXY  (POST /api/google-search {"query": ...})
# ─────────────────────────────────────────────────────────────────────────────

[google]
# api_key = "..."            # env: GOOGLE_API_KEY
# cx = "..."                 # env: GOOGLE_CX
endpoint = "https://www.googleapis.com/customsearch/v1"

# ─────────────────────────────────────────────────────────────────────────────
# CHAT COMPLETIONS  (used by POST /api/chat)
# ─────────────────────────────────────────────────────────────────────────────

[openai]
# api_key = "..."            # env: OPENAI_API_KEY
endpoint = "https://api.openai.com/v1/chat/completions"
model = "gpt-3.5-turbo"

[chat]
# Case-insensitive substrings that send a message to search instead of chat
trigger_keywords = ["keress", "google"]
result_label = "Találat"
fallback_reply = "Nem értem a kérdést."

# ─────────────────────────────────────────────────────────────────────────────
# OBSERVABILITY
# ─────────────────────────────────────────────────────────────────────────────

[observability]
# Log level: "trace", "debug", "info", "warn", "error" (RUST_LOG overrides)
log_level = "info"
"#
}
