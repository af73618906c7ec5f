//! Scripted in-process backend for unit tests.

use super::Backend;
use crate::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// One recorded call: method, path and optional body.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

/// Replies are queued per `"METHOD path"`; an unscripted call answers with
/// an empty body.
#[derive(Default)]
pub struct FakeBackend {
    replies: Mutex<HashMap<String, VecDeque<Result<Option<Value>>>>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, method: &str, path: &str, value: Value) -> &Self {
        self.push(method, path, Ok(Some(value)))
    }

    pub fn reply_empty(&self, method: &str, path: &str) -> &Self {
        self.push(method, path, Ok(None))
    }

    pub fn fail(&self, method: &str, path: &str, message: &str) -> &Self {
        self.push(method, path, Err(Error::Request(message.to_string())))
    }

    fn push(&self, method: &str, path: &str, reply: Result<Option<Value>>) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .entry(format!("{} {}", method, path))
            .or_default()
            .push_back(reply);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, method: &str) -> Vec<Call> {
        self.calls().into_iter().filter(|c| c.method == method).collect()
    }

    fn answer(&self, method: &'static str, path: String, body: Option<&Value>) -> Result<Option<Value>> {
        let key = format!("{} {}", method, path);
        self.calls.lock().unwrap().push(Call {
            method,
            path,
            body: body.cloned(),
        });
        self.replies
            .lock()
            .unwrap()
            .get_mut(&key)
            .and_then(VecDeque::pop_front)
            .unwrap_or(Ok(None))
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn list(&self, resource: &str) -> Result<Option<Value>> {
        self.answer("GET", format!("/api/{}", resource), None)
    }

    async fn get(&self, resource: &str, id: &str) -> Result<Option<Value>> {
        self.answer("GET", format!("/api/{}/{}", resource, id), None)
    }

    async fn create(&self, resource: &str, payload: &Value) -> Result<Option<Value>> {
        self.answer("POST", format!("/api/{}", resource), Some(payload))
    }

    async fn update(&self, resource: &str, id: &str, payload: &Value) -> Result<Option<Value>> {
        self.answer("PUT", format!("/api/{}/{}", resource, id), Some(payload))
    }

    async fn delete(&self, resource: &str, id: &str) -> Result<()> {
        self.answer("DELETE", format!("/api/{}/{}", resource, id), None)
            .map(|_| ())
    }

    async fn query(&self, name: &str) -> Result<Option<Value>> {
        self.answer("GET", format!("/api/query/{}", name), None)
    }
}
