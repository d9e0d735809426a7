use axum::http::HeaderMap;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::modules::schema::lenient_string;
use crate::services::session::{lenient_session, SessionInput};

pub const CLIENT_ID: &str = "go-biz-web-new";
pub const DEFAULT_COUNTRY_CODE: &str = "62";
pub const OTP_TOKEN_HEADER: &str = "x-otp-token";

// =============================================================================
// OTP REQUEST
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub country_code: Option<String>,
    #[serde(default, deserialize_with = "lenient_session")]
    pub session: Option<SessionInput>,
}

pub fn login_request_body(phone: &str, country_code: &str) -> Value {
    json!({
        "client_id": CLIENT_ID,
        "phone_number": phone,
        "country_code": country_code,
    })
}

// =============================================================================
// OTP VERIFY
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpVerifyRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub otp: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub otp_token: Option<String>,
    #[serde(default, deserialize_with = "lenient_session")]
    pub session: Option<SessionInput>,
}

impl OtpVerifyRequest {
    /// Body value first, then the `x-otp-token` header.
    pub fn resolve_otp_token(&mut self, headers: &HeaderMap) -> Option<String> {
        self.otp_token.take().or_else(|| {
            headers
                .get(OTP_TOKEN_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        })
    }
}

pub fn token_request_body(otp: &str, otp_token: &str) -> Value {
    json!({
        "client_id": CLIENT_ID,
        "grant_type": "otp",
        "data": {
            "otp": otp,
            "otp_token": otp_token,
        },
    })
}
