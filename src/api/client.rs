//! reqwest-backed implementation of [`Backend`].

use super::Backend;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::{Method, StatusCode, Url};
use serde_json::Value;

/// HTTP client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    /// Create a client for `base_url`. The URL is validated once here; a
    /// trailing slash is optional.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url.trim())
            .map_err(|e| Error::Config(format!("invalid base URL '{}': {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(Error::Config(format!("base URL '{}' cannot carry a path", base_url)));
        }
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Resolve `/api/{segments...}` against the base URL. Segments are
    /// percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("api").extend(segments);
        }
        url
    }

    async fn send(&self, method: Method, url: Url, body: Option<&Value>) -> Result<reqwest::Response> {
        tracing::debug!("{} {}", method, url);
        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        Ok(request.send().await?)
    }

    async fn fetch(&self, method: Method, url: Url, body: Option<&Value>) -> Result<Option<Value>> {
        let response = self.send(method, url, body).await?;
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        normalize_response(status, &text)
    }
}

/// Map a status and body onto the access-layer contract.
pub fn normalize_response(status: StatusCode, body: &str) -> Result<Option<Value>> {
    if !status.is_success() {
        let message = failure_message(status, body);
        tracing::warn!("request failed with {}: {}", status, message);
        return Err(Error::Request(message));
    }
    if body.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(body)?))
}

fn failure_message(status: StatusCode, body: &str) -> String {
    if !body.is_empty() {
        return body.to_string();
    }
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}

#[async_trait]
impl Backend for ApiClient {
    async fn list(&self, resource: &str) -> Result<Option<Value>> {
        self.fetch(Method::GET, self.endpoint(&[resource]), None).await
    }

    async fn get(&self, resource: &str, id: &str) -> Result<Option<Value>> {
        self.fetch(Method::GET, self.endpoint(&[resource, id]), None).await
    }

    async fn create(&self, resource: &str, payload: &Value) -> Result<Option<Value>> {
        self.fetch(Method::POST, self.endpoint(&[resource]), Some(payload)).await
    }

    async fn update(&self, resource: &str, id: &str, payload: &Value) -> Result<Option<Value>> {
        self.fetch(Method::PUT, self.endpoint(&[resource, id]), Some(payload)).await
    }

    async fn delete(&self, resource: &str, id: &str) -> Result<()> {
        let response = self
            .send(Method::DELETE, self.endpoint(&[resource, id]), None)
            .await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let text = response.text().await.unwrap_or_default();
        let message = failure_message(status, &text);
        tracing::warn!("delete {}/{} failed with {}: {}", resource, id, status, message);
        Err(Error::Request(message))
    }

    async fn query(&self, name: &str) -> Result<Option<Value>> {
        self.fetch(Method::GET, self.endpoint(&["query", name]), None).await
    }
}
