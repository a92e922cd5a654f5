//! Session domain models.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::host::HostKey;

/// Page information delivered by the host when a session starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContext {
    pub page_title: String,
    #[serde(rename = "pageURL")]
    pub page_url: String,
}

impl PageContext {
    pub fn new(page_title: impl Into<String>, page_url: impl Into<String>) -> Self {
        Self {
            page_title: page_title.into(),
            page_url: page_url.into(),
        }
    }

    /// Builds a context from the host's JavaScript preprocessing results.
    ///
    /// The page-side preprocessor reports `{ "title": ..., "URL": ... }`.
    /// Missing or non-string fields become empty strings.
    pub fn from_preprocessing_results(results: &Value) -> Self {
        let field = |name: &str| {
            results
                .get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        Self {
            page_title: field("title"),
            page_url: field("URL"),
        }
    }

    /// Derives the lookup key for the per-site script.
    pub fn host_key(&self) -> Option<HostKey> {
        HostKey::from_page_url(&self.page_url)
    }
}

/// Payload handed back to the host when a session completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionPayload {
    #[serde(rename = "customJavaScript")]
    pub custom_javascript: String,
}

impl CompletionPayload {
    pub fn new(custom_javascript: impl Into<String>) -> Self {
        Self {
            custom_javascript: custom_javascript.into(),
        }
    }
}

/// Lifecycle of one selection session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Uninitialized,
    /// Started, waiting for the host to deliver page context.
    AwaitingContext,
    /// Stores loaded, user may edit or pick scripts.
    Ready,
    /// Payload handed to the host. Terminal.
    Completed,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        self == Self::Completed
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "Uninitialized",
            Self::AwaitingContext => "AwaitingContext",
            Self::Ready => "Ready",
            Self::Completed => "Completed",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_preprocessing_results() {
        let results = json!({ "title": "Cart", "URL": "https://shop.example.com/cart" });
        let context = PageContext::from_preprocessing_results(&results);

        assert_eq!(context.page_title, "Cart");
        assert_eq!(context.page_url, "https://shop.example.com/cart");
        assert_eq!(context.host_key().unwrap().as_str(), "shop.example.com");
    }

    #[test]
    fn test_from_preprocessing_results_defaults() {
        let context = PageContext::from_preprocessing_results(&json!({ "title": 42 }));
        assert_eq!(context, PageContext::default());
        assert!(context.host_key().is_none());

        let context = PageContext::from_preprocessing_results(&json!(null));
        assert_eq!(context, PageContext::default());
    }

    #[test]
    fn test_payload_wire_format() {
        let payload = CompletionPayload::new("alert(1)");
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({ "customJavaScript": "alert(1)" })
        );
    }

    #[test]
    fn test_page_context_wire_format() {
        let context = PageContext::new("Home", "https://example.com/");
        assert_eq!(
            serde_json::to_value(&context).unwrap(),
            json!({ "pageTitle": "Home", "pageURL": "https://example.com/" })
        );
    }

    #[test]
    fn test_session_state_display() {
        assert_eq!(SessionState::default(), SessionState::Uninitialized);
        assert_eq!(SessionState::AwaitingContext.to_string(), "AwaitingContext");
        assert!(SessionState::Completed.is_terminal());
        assert!(!SessionState::Ready.is_terminal());
    }
}
