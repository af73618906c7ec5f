//! Access layer over the backend's REST contract.
//!
//! Every operation is a single request with no retry and no timeout.
//! Successful responses with an empty body come back as `None`; non-empty
//! bodies are parsed as JSON and handed back untouched.

pub mod client;
#[cfg(test)]
pub(crate) mod fake;

pub use client::ApiClient;

use crate::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// The operations the console needs from a backend.
#[async_trait]
pub trait Backend: Send + Sync {
    /// `GET /api/{resource}`
    async fn list(&self, resource: &str) -> Result<Option<Value>>;

    /// `GET /api/{resource}/{id}`
    async fn get(&self, resource: &str, id: &str) -> Result<Option<Value>>;

    /// `POST /api/{resource}`; returns the server's canonical record.
    async fn create(&self, resource: &str, payload: &Value) -> Result<Option<Value>>;

    /// `PUT /api/{resource}/{id}`
    async fn update(&self, resource: &str, id: &str, payload: &Value) -> Result<Option<Value>>;

    /// `DELETE /api/{resource}/{id}`
    async fn delete(&self, resource: &str, id: &str) -> Result<()>;

    /// `GET /api/query/{name}`
    async fn query(&self, name: &str) -> Result<Option<Value>>;
}

#[async_trait]
impl<T: Backend + ?Sized> Backend for Arc<T> {
    async fn list(&self, resource: &str) -> Result<Option<Value>> {
        (**self).list(resource).await
    }

    async fn get(&self, resource: &str, id: &str) -> Result<Option<Value>> {
        (**self).get(resource, id).await
    }

    async fn create(&self, resource: &str, payload: &Value) -> Result<Option<Value>> {
        (**self).create(resource, payload).await
    }

    async fn update(&self, resource: &str, id: &str, payload: &Value) -> Result<Option<Value>> {
        (**self).update(resource, id, payload).await
    }

    async fn delete(&self, resource: &str, id: &str) -> Result<()> {
        (**self).delete(resource, id).await
    }

    async fn query(&self, name: &str) -> Result<Option<Value>> {
        (**self).query(name).await
    }
}
