use lazy_static::lazy_static;
use serde_json::Value;
use std::collections::HashSet;

pub const OTP_REQUEST_ENDPOINT: &str = "/goid/login/request";
pub const OTP_VERIFY_ENDPOINT: &str = "/goid/token";
pub const MERCHANT_SEARCH_ENDPOINT: &str = "/v1/merchants/search";
pub const JOURNAL_SEARCH_ENDPOINT: &str = "/journals/search";

lazy_static! {
    /// Exact upstream paths reachable through the raw proxy. No patterns.
    pub static ref ALLOWED_ENDPOINTS: HashSet<&'static str> = [
        OTP_REQUEST_ENDPOINT,
        OTP_VERIFY_ENDPOINT,
        MERCHANT_SEARCH_ENDPOINT,
        JOURNAL_SEARCH_ENDPOINT,
    ]
    .into_iter()
    .collect();
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    #[error("endpoint must be a string starting with '/'")]
    InvalidEndpoint,

    #[error("endpoint {0} is not allowed")]
    NotAllowed(String),
}

/// Strip the query string from a caller-supplied path.
///
/// Returns `None` unless the value is a string beginning with `/`.
pub fn normalize_endpoint(raw: Option<&Value>) -> Option<String> {
    let raw = raw?.as_str()?;
    if !raw.starts_with('/') {
        return None;
    }
    let path = raw.split('?').next().unwrap_or(raw);
    Some(path.to_string())
}

/// Validate a raw-proxy endpoint against the allowlist.
pub fn check_endpoint(raw: Option<&Value>) -> Result<String, GateError> {
    let endpoint = normalize_endpoint(raw).ok_or(GateError::InvalidEndpoint)?;
    if !ALLOWED_ENDPOINTS.contains(endpoint.as_str()) {
        return Err(GateError::NotAllowed(endpoint));
    }
    Ok(endpoint)
}
