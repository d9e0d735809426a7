use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use reqwest::{header::HeaderMap, Client, Method};
use serde_json::Value;
use std::time::Duration;

/// Upstream merchant API client
/// Every HTTP status is a normal outcome; only transport failures are errors.
pub struct UpstreamClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("timeout of {timeout_ms}ms exceeded")]
    Timeout { timeout_ms: u128 },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid value for header {0}")]
    InvalidHeader(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamMethod {
    Get,
    Post,
}

impl UpstreamMethod {
    /// Case-insensitive; only GET and POST are forwarded.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_uppercase().as_str() {
            "GET" => Some(Self::Get),
            "POST" => Some(Self::Post),
            _ => None,
        }
    }

    fn as_method(self) -> Method {
        match self {
            Self::Get => Method::GET,
            Self::Post => Method::POST,
        }
    }
}

#[derive(Debug)]
pub struct UpstreamRequest {
    pub endpoint: String,
    pub method: UpstreamMethod,
    pub body: Value,
    pub headers: HeaderMap,
}

impl UpstreamRequest {
    pub fn post(endpoint: impl Into<String>, body: Value, headers: HeaderMap) -> Self {
        Self {
            endpoint: endpoint.into(),
            method: UpstreamMethod::Post,
            body,
            headers,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamBody {
    Json(Value),
    Text(String),
}

impl UpstreamBody {
    /// JSON when the payload parses, raw text otherwise.
    pub fn decode(bytes: &[u8]) -> Self {
        match serde_json::from_slice(bytes) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(String::from_utf8_lossy(bytes).into_owned()),
        }
    }

    /// The body as a JSON value; empty text becomes `null`.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Json(value) => value.clone(),
            Self::Text(text) if text.is_empty() => Value::Null,
            Self::Text(text) => Value::String(text.clone()),
        }
    }
}

#[derive(Debug)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub data: UpstreamBody,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Human-readable reason for a failed call.
    pub fn failure_message(&self) -> String {
        if let UpstreamBody::Json(Value::Object(map)) = &self.data {
            for key in ["message", "error"] {
                if let Some(message) = map.get(key).and_then(truthy_text) {
                    return message;
                }
            }
        }
        match &self.data {
            UpstreamBody::Json(Value::String(text)) | UpstreamBody::Text(text) if !text.is_empty() => {
                text.clone()
            }
            _ => format!("HTTP_{}", self.status.as_u16()),
        }
    }
}

fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Forward upstream status and body unchanged.
impl IntoResponse for UpstreamResponse {
    fn into_response(self) -> Response {
        match self.data {
            UpstreamBody::Json(value) => (self.status, Json(value)).into_response(),
            UpstreamBody::Text(text) => {
                let content_type = self
                    .content_type
                    .unwrap_or_else(|| HeaderValue::from_static("text/plain; charset=utf-8"));
                (self.status, [(header::CONTENT_TYPE, content_type)], text).into_response()
            }
        }
    }
}

impl UpstreamClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            timeout,
        })
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    pub async fn send(&self, request: UpstreamRequest) -> Result<UpstreamResponse, UpstreamError> {
        let url = self.url(&request.endpoint);

        let response = self
            .client
            .request(request.method.as_method(), &url)
            .headers(request.headers)
            .json(&request.body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
        let bytes = response.bytes().await.map_err(|e| self.classify(e))?;

        tracing::debug!(
            method = ?request.method,
            endpoint = %request.endpoint,
            status = status.as_u16(),
            "upstream responded"
        );

        Ok(UpstreamResponse {
            status,
            content_type,
            data: UpstreamBody::decode(&bytes),
        })
    }

    fn classify(&self, error: reqwest::Error) -> UpstreamError {
        if error.is_timeout() {
            UpstreamError::Timeout {
                timeout_ms: self.timeout.as_millis(),
            }
        } else {
            UpstreamError::Transport(error)
        }
    }
}
