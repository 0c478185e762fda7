//! URL shortening service abstraction
//!
//! The form only knows about the [`Shortener`] trait. The real
//! implementation talks to the TinyURL API ([`TinyUrlClient`]); tests swap
//! in in-process fakes.
//!
//! # Failure kinds
//!
//! ```text
//! Shortener::shorten
//! ├── Ok(short_url)
//! ├── Err(Logical)    HTTP 2xx, but no data.tiny_url in the body
//! └── Err(Transport)  network error, non-2xx status, undecodable body
//! ```

mod tinyurl;

pub use tinyurl::{TinyUrlClient, TinyUrlSettings};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shown when the API answered but produced no short URL
pub const LOGICAL_FAILURE_MESSAGE: &str = "Error shortening the URL. Please try again.";

/// Shown when the request itself failed
pub const TRANSPORT_FAILURE_MESSAGE: &str =
    "Request failed. Please check the URL or try again later.";

/// Errors from a shortening call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortenError {
    /// The call succeeded but the expected payload was absent
    Logical,
    /// The call itself failed
    Transport {
        /// HTTP status, when a response was received
        status: Option<u16>,
        /// Operator-facing detail (never shown in the form)
        detail: String,
    },
}

impl ShortenError {
    /// Build a transport error from anything printable
    pub fn transport(status: Option<u16>, detail: impl Into<String>) -> Self {
        Self::Transport {
            status,
            detail: detail.into(),
        }
    }

    /// Generic one-line message for the user
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Logical => LOGICAL_FAILURE_MESSAGE,
            Self::Transport { .. } => TRANSPORT_FAILURE_MESSAGE,
        }
    }
}

impl fmt::Display for ShortenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Logical => write!(f, "response did not contain data.tiny_url"),
            Self::Transport {
                status: Some(status),
                detail,
            } => write!(f, "request failed with HTTP {}: {}", status, detail),
            Self::Transport {
                status: None,
                detail,
            } => write!(f, "request failed: {}", detail),
        }
    }
}

impl std::error::Error for ShortenError {}

/// A service that maps a long URL to a short one
#[async_trait]
pub trait Shortener: Send + Sync {
    /// Name for log lines
    fn name(&self) -> &'static str;

    /// Shorten one URL
    async fn shorten(&self, long_url: &str) -> Result<String, ShortenError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire format
// ─────────────────────────────────────────────────────────────────────────────

/// Body of `POST /create`
#[derive(Debug, Serialize)]
pub struct CreateRequest<'a> {
    pub url: &'a str,
    pub domain: &'a str,
}

/// Response of `POST /create`
///
/// Only `data.tiny_url` matters. `data` is kept loose because the API
/// sends `[]` instead of an object when it has nothing to return.
#[derive(Debug, Deserialize)]
pub struct CreateResponse {
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl CreateResponse {
    /// Extract the short URL, if the payload has one
    pub fn into_short_url(self) -> Option<String> {
        self.data?
            .get("tiny_url")
            .and_then(serde_json::Value::as_str)
            .filter(|url| !url.is_empty())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Option<String> {
        serde_json::from_str::<CreateResponse>(body)
            .unwrap()
            .into_short_url()
    }

    #[test]
    fn test_short_url_extracted_from_data() {
        let body = r#"{
            "data": {
                "domain": "tinyurl.com",
                "alias": "abc123",
                "tiny_url": "https://tinyurl.com/abc123",
                "url": "https://example.com/a/very/long/path"
            },
            "code": 0,
            "errors": []
        }"#;

        assert_eq!(parse(body).as_deref(), Some("https://tinyurl.com/abc123"));
    }

    #[test]
    fn test_missing_data_is_none() {
        assert_eq!(parse(r#"{"code": 5, "errors": ["bad"]}"#), None);
    }

    #[test]
    fn test_empty_array_data_is_none() {
        assert_eq!(parse(r#"{"data": [], "code": 0}"#), None);
    }

    #[test]
    fn test_data_without_tiny_url_is_none() {
        assert_eq!(parse(r#"{"data": {"alias": "x"}}"#), None);
        assert_eq!(parse(r#"{"data": {"tiny_url": ""}}"#), None);
    }

    #[test]
    fn test_user_messages_differ_by_kind() {
        let logical = ShortenError::Logical;
        let transport = ShortenError::transport(Some(500), "boom");

        assert_ne!(logical.user_message(), transport.user_message());
        assert!(!transport.user_message().contains("boom"));
        assert_eq!(transport.to_string(), "request failed with HTTP 500: boom");
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(CreateRequest {
            url: "https://example.com",
            domain: "tinyurl.com",
        })
        .unwrap();

        assert_eq!(
            body,
            serde_json::json!({"url": "https://example.com", "domain": "tinyurl.com"})
        );
    }
}
