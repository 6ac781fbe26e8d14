//! Search request and result shapes

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// A validated, trimmed, non-empty search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Trim `raw` and reject it if nothing is left
    ///
    /// `field` names the input in the error message (`q` or `query`).
    pub fn parse(raw: Option<&str>, field: &str) -> AppResult<Self> {
        let trimmed = raw.map(str::trim).unwrap_or_default();
        if trimmed.is_empty() {
            return Err(AppError::Validation(format!(
                "Missing search query: '{}' is required",
                field
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read the single parameter `name` from a raw query string
///
/// Form encoding applies: `+` is a space and `%XX` escapes are decoded.
/// A repeated parameter or an escape sequence that does not decode to UTF-8
/// is a validation error rather than a guess at what the caller meant.
pub fn query_param(raw: Option<&str>, name: &str) -> AppResult<Option<String>> {
    let mut found = None;
    for pair in raw.unwrap_or_default().split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if form_decode(key, name).ok().as_deref() != Some(name) {
            continue;
        }
        if found.is_some() {
            return Err(AppError::Validation(format!(
                "Duplicate '{}' parameter",
                name
            )));
        }
        found = Some(form_decode(value, name)?);
    }
    Ok(found)
}

fn form_decode(encoded: &str, name: &str) -> AppResult<String> {
    urlencoding::decode(&encoded.replace('+', " "))
        .map(|decoded| decoded.into_owned())
        .map_err(|_| AppError::Validation(format!("'{}' is not valid UTF-8", name)))
}

/// One simplified search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// Body returned by `GET /api/bing-search`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BingSearchResponse {
    pub query: String,
    pub items: Vec<SearchResult>,
}

/// Body returned by the Google proxy
///
/// `results` is Google's item array passed through untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoogleSearchResponse {
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_is_trimmed() {
        let query = SearchQuery::parse(Some("  football \n"), "q").unwrap();
        assert_eq!(query.as_str(), "football");
    }

    #[test]
    fn test_missing_query_rejected() {
        let err = SearchQuery::parse(None, "query").unwrap_err();
        assert!(matches!(err, AppError::Validation(ref msg) if msg.contains("'query'")));
    }

    #[test]
    fn test_whitespace_query_rejected() {
        for raw in ["", " ", "\t\n", "   \r\n "] {
            assert!(
                SearchQuery::parse(Some(raw), "q").is_err(),
                "{:?} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_query_param_decodes_form_encoding() {
        let q = query_param(Some("mkt=x&q=id%C5%91j%C3%A1r%C3%A1s+Budapest"), "q").unwrap();
        assert_eq!(q.as_deref(), Some("időjárás Budapest"));
    }

    #[test]
    fn test_query_param_absent() {
        assert_eq!(query_param(None, "q").unwrap(), None);
        assert_eq!(query_param(Some("foo=bar&&"), "q").unwrap(), None);
        assert_eq!(query_param(Some("q"), "q").unwrap().as_deref(), Some(""));
        assert_eq!(query_param(Some("%FF=1&q=x"), "q").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn test_query_param_rejects_duplicates() {
        let err = query_param(Some("q=a&q=b"), "q").unwrap_err();
        assert!(matches!(err, AppError::Validation(ref msg) if msg.contains("Duplicate 'q'")));
    }

    #[test]
    fn test_query_param_rejects_invalid_utf8() {
        let err = query_param(Some("q=%FF"), "q").unwrap_err();
        assert!(matches!(err, AppError::Validation(ref msg) if msg.contains("UTF-8")));
    }

    #[test]
    fn test_google_response_defaults_to_empty_results() {
        let response: GoogleSearchResponse = serde_json::from_str("{}").unwrap();
        assert!(response.results.is_empty());
    }
}
