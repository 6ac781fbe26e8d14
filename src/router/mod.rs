//! Keyword-based intent routing for chat messages
//!
//! A message is routed to search when it contains any trigger keyword as a
//! case-insensitive substring. Matching is plain substring
//! matching: "googled" triggers, and stripping it leaves "d".

use std::fmt;

/// What the chat router should do with a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Search for `query` (trigger keywords removed, trimmed)
    Search { query: String },
    /// Forward the message to the chat completion provider
    Chat,
}

impl Intent {
    /// Short label for logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Search { .. } => "search",
            Intent::Chat => "chat",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies chat messages by trigger keyword
#[derive(Debug, Clone)]
pub struct KeywordRouter {
    /// Lowercased, non-empty
    keywords: Vec<String>,
}

impl KeywordRouter {
    /// Create a router for `keywords`; blank entries are ignored
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().to_lowercase())
            .filter(|k| !k.trim().is_empty())
            .collect();
        Self { keywords }
    }

    /// Keywords this router matches, lowercased
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Decide between search and chat for `message`
    pub fn classify(&self, message: &str) -> Intent {
        if self.is_triggered(message) {
            Intent::Search {
                query: self.strip_keywords(message),
            }
        } else {
            Intent::Chat
        }
    }

    /// Whether any trigger keyword occurs in `message`, ignoring case
    pub fn is_triggered(&self, message: &str) -> bool {
        let mut rest = message;
        while !rest.is_empty() {
            if self.match_at(rest).is_some() {
                return true;
            }
            rest = skip_char(rest);
        }
        false
    }

    /// Remove every keyword occurrence, ignoring case, and trim the remainder
    ///
    /// Scans left to right; at each position the first keyword (in configured
    /// order) that matches is removed.
    pub fn strip_keywords(&self, message: &str) -> String {
        let mut out = String::with_capacity(message.len());
        let mut rest = message;
        while !rest.is_empty() {
            if let Some(len) = self.match_at(rest) {
                rest = &rest[len..];
                continue;
            }
            let next = skip_char(rest);
            out.push_str(&rest[..rest.len() - next.len()]);
            rest = next;
        }
        out.trim().to_string()
    }

    /// Byte length of the first keyword matching at the start of `haystack`
    fn match_at(&self, haystack: &str) -> Option<usize> {
        self.keywords
            .iter()
            .find_map(|keyword| prefix_len_ignoring_case(haystack, keyword))
    }
}

fn skip_char(s: &str) -> &str {
    let mut chars = s.chars();
    chars.next();
    chars.as_str()
}

/// If `haystack` starts with `keyword` (already lowercase) ignoring case,
/// return how many bytes of `haystack` the match covers
fn prefix_len_ignoring_case(haystack: &str, keyword: &str) -> Option<usize> {
    let mut expected = keyword.chars();
    let mut consumed = 0;
    for c in haystack.chars() {
        for lower in c.to_lowercase() {
            if expected.next() != Some(lower) {
                return None;
            }
        }
        consumed += c.len_utf8();
        if expected.as_str().is_empty() {
            return Some(consumed);
        }
    }
    None
}
