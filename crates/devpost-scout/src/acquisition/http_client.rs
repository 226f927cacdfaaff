// Copyright 2026 Devpost Scout Contributors
// SPDX-License-Identifier: Apache-2.0

//! Async HTTP client wrapping reqwest.
//!
//! One GET at a time with an identifying browser user-agent. No retries:
//! a non-success status comes back as a normal response and the caller
//! decides what to do with it.

use crate::config::ScrapeSettings;
use crate::error::ScoutResult;
use async_trait::async_trait;
use std::time::Duration;

/// A GET request for the fetcher.
#[derive(Debug, Clone, Default)]
pub struct FetchRequest {
    /// Endpoint URL without query string.
    pub url: String,
    /// Query parameters, URL-encoded by the client.
    pub query: Vec<(String, String)>,
    /// Extra headers on top of the client defaults.
    pub headers: Vec<(String, String)>,
}

impl FetchRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn param(mut self, name: &str, value: impl ToString) -> Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// Response from an HTTP GET request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Final URL after redirects, including the query string.
    pub final_url: String,
    /// HTTP status code.
    pub status: u16,
    /// Content-Type header, if the server sent one.
    pub content_type: Option<String>,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can perform a GET. The paginator only talks to this.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, request: &FetchRequest) -> ScoutResult<HttpResponse>;
}

/// reqwest-backed fetcher.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpClient {
    /// Create a client that sends `user_agent` and gives up after `timeout`.
    pub fn new(user_agent: &str, timeout: Duration) -> ScoutResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, timeout })
    }

    pub fn from_settings(settings: &ScrapeSettings) -> ScoutResult<Self> {
        Self::new(&settings.user_agent, settings.timeout)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl Fetcher for HttpClient {
    async fn fetch(&self, request: &FetchRequest) -> ScoutResult<HttpResponse> {
        let mut builder = self.client.get(&request.url).query(&request.query);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let r = builder.send().await?;
        let status = r.status().as_u16();
        let final_url = r.url().to_string();
        let content_type = r
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let body = r.text().await?;
        tracing::debug!("GET {final_url} -> {status} ({} bytes)", body.len());

        Ok(HttpResponse {
            final_url,
            status,
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_http_client_creation() {
        let client = HttpClient::new("scout-test", Duration::from_secs(5)).unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_success_range() {
        let mut resp = HttpResponse {
            final_url: "https://example.com".to_string(),
            status: 204,
            content_type: None,
            body: String::new(),
        };
        assert!(resp.is_success());
        resp.status = 404;
        assert!(!resp.is_success());
    }

    #[tokio::test]
    async fn test_fetch_sends_params_and_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/software/search"))
            .and(query_param("query", "is:winner ai agents"))
            .and(query_param("page", "2"))
            .and(header("user-agent", "scout-test/1.0"))
            .and(header("x-extra", "yes"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(r#"{"software":[]}"#, "application/json"),
            )
            .mount(&server)
            .await;

        let client = HttpClient::new("scout-test/1.0", Duration::from_secs(5)).unwrap();
        let req = FetchRequest::get(format!("{}/software/search", server.uri()))
            .param("query", "is:winner ai agents")
            .param("page", 2)
            .header("x-extra", "yes");
        let resp = client.fetch(&req).await.unwrap();

        assert_eq!(resp.status, 200);
        assert!(resp
            .content_type
            .as_deref()
            .unwrap()
            .starts_with("application/json"));
        assert_eq!(resp.body, r#"{"software":[]}"#);
    }

    #[tokio::test]
    async fn test_error_status_is_returned_not_raised() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
            .mount(&server)
            .await;

        let client = HttpClient::new("scout-test", Duration::from_secs(5)).unwrap();
        let resp = client
            .fetch(&FetchRequest::get(server.uri()))
            .await
            .unwrap();
        assert_eq!(resp.status, 503);
        assert!(!resp.is_success());
        assert_eq!(resp.body, "busy");
    }
}
