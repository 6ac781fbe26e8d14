//! Transient request and response shapes
//!
//! Nothing here outlives a single request.

pub mod chat;
pub mod search;

pub use chat::{ChatReply, ChatRequest};
pub use search::{BingSearchResponse, GoogleSearchResponse, SearchQuery, SearchResult, query_param};
