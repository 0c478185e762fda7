//! TinyURL API client
//!
//! `POST {api_url}/create?api_token=<TOKEN>` with `{"url", "domain"}`.
//! The token travels in the query string, so reqwest errors are stripped
//! of their URL before they reach a log line.

use super::{CreateRequest, CreateResponse, ShortenError, Shortener};
use crate::config::{ApiToken, VERSION};
use anyhow::{Context, Result};
use async_trait::async_trait;

/// Everything the client needs, resolved once from [`crate::config::Config`]
#[derive(Debug, Clone)]
pub struct TinyUrlSettings {
    /// API base, e.g. `https://api.tinyurl.com`
    pub api_url: String,
    /// Domain to create the short link on
    pub domain: String,
    /// Static API credential
    pub token: ApiToken,
}

/// Shortener backed by the TinyURL REST API
pub struct TinyUrlClient {
    client: reqwest::Client,
    endpoint: String,
    domain: String,
    token: ApiToken,
}

impl TinyUrlClient {
    /// Create a client from resolved settings
    pub fn new(settings: TinyUrlSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(format!("shorten-my-url/{}", VERSION))
            .build()
            .context("Failed to create HTTP client")?;

        let endpoint = format!("{}/create", settings.api_url.trim_end_matches('/'));

        tracing::info!(
            "Initialized TinyURL client: {} (domain: {}, token: sha256:{})",
            endpoint,
            settings.domain,
            settings.token.fingerprint()
        );

        Ok(Self {
            client,
            endpoint,
            domain: settings.domain,
            token: settings.token,
        })
    }
}

/// Full cause chain of a reqwest error, with the request URL (and so the
/// token) removed
fn describe(e: reqwest::Error) -> String {
    format!("{:#}", anyhow::Error::from(e.without_url()))
}

#[async_trait]
impl Shortener for TinyUrlClient {
    fn name(&self) -> &'static str {
        "tinyurl"
    }

    async fn shorten(&self, long_url: &str) -> Result<String, ShortenError> {
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("api_token", self.token.expose())])
            .json(&CreateRequest {
                url: long_url,
                domain: &self.domain,
            })
            .send()
            .await
            .map_err(|e| ShortenError::transport(None, describe(e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ShortenError::transport(Some(status.as_u16()), body));
        }

        let body: CreateResponse = response.json().await.map_err(|e| {
            ShortenError::transport(
                Some(status.as_u16()),
                format!("invalid response body: {}", describe(e)),
            )
        })?;

        body.into_short_url().ok_or(ShortenError::Logical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    /// Serve `router` on an ephemeral local port, returning its base URL
    async fn spawn_api(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client_for(api_url: String) -> TinyUrlClient {
        TinyUrlClient::new(TinyUrlSettings {
            api_url,
            domain: "tinyurl.com".to_string(),
            token: ApiToken::new("test-token").unwrap(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_success_returns_tiny_url() {
        // Echo the token and body back so the request shape is verified
        let router = Router::new().route(
            "/create",
            post(
                |Query(query): Query<HashMap<String, String>>, Json(body): Json<Value>| async move {
                    let token = query.get("api_token").cloned().unwrap_or_default();
                    let domain = body["domain"].as_str().unwrap_or_default().to_string();
                    let url = body["url"].as_str().unwrap_or_default().to_string();
                    Json(json!({
                        "data": {
                            "tiny_url": format!("https://{}/{}", domain, token),
                            "url": url,
                        },
                        "code": 0,
                        "errors": []
                    }))
                },
            ),
        );
        let client = client_for(spawn_api(router).await);

        let short = client.shorten("https://example.com/long").await.unwrap();
        assert_eq!(short, "https://tinyurl.com/test-token");
    }

    #[tokio::test]
    async fn test_missing_data_is_logical_failure() {
        let router = Router::new().route(
            "/create",
            post(|| async { Json(json!({"code": 0, "errors": []})) }),
        );
        let client = client_for(spawn_api(router).await);

        let err = client.shorten("https://example.com").await.unwrap_err();
        assert_eq!(err, ShortenError::Logical);
    }

    #[tokio::test]
    async fn test_non_2xx_is_transport_failure() {
        let router = Router::new().route(
            "/create",
            post(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"code": 1, "errors": ["Unauthorized"]})),
                )
            }),
        );
        let client = client_for(spawn_api(router).await);

        match client.shorten("https://example.com").await {
            Err(ShortenError::Transport { status, detail }) => {
                assert_eq!(status, Some(401));
                assert!(detail.contains("Unauthorized"));
            }
            other => panic!("Expected Transport error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_undecodable_body_is_transport_failure() {
        let router = Router::new().route("/create", post(|| async { "not json" }));
        let client = client_for(spawn_api(router).await);

        match client.shorten("https://example.com").await {
            Err(ShortenError::Transport { status, detail }) => {
                assert_eq!(status, Some(200));
                assert!(detail.starts_with("invalid response body: "));
                assert!(!detail.contains("test-token"), "token leaked: {}", detail);
            }
            other => panic!("Expected Transport error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_failure_without_token() {
        // Grab a free port, then close it
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(format!("http://{}", addr));

        match client.shorten("https://example.com").await {
            Err(ShortenError::Transport { status, detail }) => {
                assert_eq!(status, None);
                assert!(!detail.contains("test-token"), "token leaked: {}", detail);
                assert!(!detail.contains("api_token"), "URL leaked: {}", detail);
                // The underlying connect failure, not just "error sending request"
                assert!(
                    detail.to_lowercase().contains("connect"),
                    "cause missing: {}",
                    detail
                );
            }
            other => panic!("Expected Transport error, got {:?}", other),
        }
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = client_for("https://api.tinyurl.com/".to_string());
        assert_eq!(client.endpoint, "https://api.tinyurl.com/create");
    }
}
