use serde::Deserialize;
use serde_json::{json, Value};

use crate::modules::schema::lenient_string;
use crate::services::session::{lenient_session, SessionInput};

pub const DEFAULT_METHOD: &str = "POST";

// =============================================================================
// RAW PROXY
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ProxyRequest {
    /// Kept untyped so a non-string value is reported as an invalid endpoint.
    #[serde(default)]
    pub endpoint: Option<Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub method: Option<String>,
    #[serde(default)]
    pub body: Option<Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub accept: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub bearer: Option<String>,
    #[serde(default, deserialize_with = "lenient_session")]
    pub session: Option<SessionInput>,
}

impl ProxyRequest {
    pub fn method_name(&self) -> String {
        self.method
            .as_deref()
            .unwrap_or(DEFAULT_METHOD)
            .to_ascii_uppercase()
    }

    /// Missing or `null` bodies are forwarded as an empty object.
    pub fn upstream_body(&mut self) -> Value {
        match self.body.take() {
            None | Some(Value::Null) => json!({}),
            Some(body) => body,
        }
    }
}
