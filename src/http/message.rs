// ABOUTME: Request and response values exchanged with a Transport.
// ABOUTME: JSON in, status code plus raw body out; no engine semantics here.

use bytes::Bytes;
use hyper::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// One HTTP call: method, path (with query) and optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: None,
        }
    }

    /// POST without a body.
    pub fn post(path: impl Into<String>) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            body: None,
        }
    }

    pub fn post_json(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::DELETE,
            path: path.into(),
            body: None,
        }
    }

    /// Serialized body bytes; empty when there is no body.
    pub fn body_bytes(&self) -> Bytes {
        match &self.body {
            Some(value) => Bytes::from(value.to_string()),
            None => Bytes::new(),
        }
    }
}

/// Status code and fully collected body of a response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Bytes,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Response with a JSON body.
    pub fn json_body(status: u16, body: &Value) -> Self {
        Self::new(status, body.to_string())
    }

    pub fn empty(status: u16) -> Self {
        Self::new(status, Bytes::new())
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// The `message` field engines put in error bodies, falling back to the raw
    /// text, then to the status's reason phrase when the body is empty.
    pub fn error_message(&self) -> String {
        let message = match serde_json::from_slice::<Value>(&self.body) {
            Ok(Value::Object(map)) => match map.get("message") {
                Some(Value::String(message)) => message.clone(),
                _ => Value::Object(map).to_string(),
            },
            _ => String::from_utf8_lossy(&self.body).trim().to_string(),
        };
        if !message.is_empty() {
            return message;
        }
        StatusCode::from_u16(self.status)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or("no response body")
            .to_string()
    }
}
