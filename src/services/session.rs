use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, AUTHORIZATION, CONTENT_TYPE, ORIGIN,
    REFERER, USER_AGENT,
};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use uuid::Uuid;

use crate::modules::schema::lenient_string;
use crate::services::upstream::UpstreamError;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (GoBizProxy)";
pub const PUBLIC_UNIQUE_ID: &str = "public";

pub const DEFAULT_ACCEPT: &str = "application/json, text/plain, */*";
pub const JOURNAL_ACCEPT: &str = "application/json, application/vnd.journal.v1+json";

const PORTAL_ORIGIN: &str = "https://portal.gofoodmerchant.co.id";
const PORTAL_REFERER: &str = "https://portal.gofoodmerchant.co.id/";

// Device identity expected by the merchant portal API
const AUTHENTICATION_TYPE: HeaderName = HeaderName::from_static("authentication-type");
const COUNTRY_CODE: HeaderName = HeaderName::from_static("gojek-country-code");
const TIMEZONE: HeaderName = HeaderName::from_static("gojek-timezone");
const APP_ID: HeaderName = HeaderName::from_static("x-appid");
const APP_VERSION: HeaderName = HeaderName::from_static("x-appversion");
const DEVICE_OS: HeaderName = HeaderName::from_static("x-deviceos");
const PHONE_MAKE: HeaderName = HeaderName::from_static("x-phonemake");
const PHONE_MODEL: HeaderName = HeaderName::from_static("x-phonemodel");
const PLATFORM: HeaderName = HeaderName::from_static("x-platform");
const UNIQUE_ID: HeaderName = HeaderName::from_static("x-uniqueid");
const USER_TYPE: HeaderName = HeaderName::from_static("x-user-type");

/// Session object as sent by the caller; both fields optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInput {
    #[serde(default, deserialize_with = "lenient_string")]
    pub unique_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub user_agent: Option<String>,
}

/// A `session` that is not an object counts as absent.
pub fn lenient_session<'de, D>(deserializer: D) -> Result<Option<SessionInput>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(value @ Value::Object(_)) => serde_json::from_value(value).ok(),
        _ => None,
    })
}

/// Per-request device identity attached to every upstream call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub unique_id: String,
    pub user_agent: String,
}

impl Session {
    pub fn new(unique_id: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            unique_id: unique_id.into(),
            user_agent: user_agent.into(),
        }
    }

    /// Fill in whatever the caller left out: a fresh v4 id, the default user agent.
    pub fn from_input(input: Option<SessionInput>) -> Self {
        let input = input.unwrap_or_default();

        let unique_id = input
            .unique_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let user_agent = input
            .user_agent
            .filter(|ua| !ua.is_empty())
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        Self {
            unique_id,
            user_agent,
        }
    }

    /// Build the identity headers the upstream requires for this session.
    ///
    /// Pure: the same session always yields the same map. Only the caller-supplied
    /// values can fail, when they are not representable as header values.
    pub fn headers(&self) -> Result<HeaderMap, UpstreamError> {
        let unique_id = if self.unique_id.is_empty() {
            PUBLIC_UNIQUE_ID
        } else {
            self.unique_id.as_str()
        };
        let user_agent = if self.user_agent.is_empty() {
            DEFAULT_USER_AGENT
        } else {
            self.user_agent.as_str()
        };

        let mut headers = HeaderMap::with_capacity(20);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static(DEFAULT_ACCEPT));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("id"));
        headers.insert(ORIGIN, HeaderValue::from_static(PORTAL_ORIGIN));
        headers.insert(REFERER, HeaderValue::from_static(PORTAL_REFERER));
        headers.insert(AUTHENTICATION_TYPE, HeaderValue::from_static("go-id"));
        headers.insert(COUNTRY_CODE, HeaderValue::from_static("ID"));
        headers.insert(TIMEZONE, HeaderValue::from_static("Asia/Jakarta"));
        headers.insert(APP_ID, HeaderValue::from_static("go-biz-web-dashboard"));
        headers.insert(APP_VERSION, HeaderValue::from_static("platform-v3.97.0-b986b897"));
        headers.insert(DEVICE_OS, HeaderValue::from_static("Web"));
        headers.insert(PHONE_MAKE, HeaderValue::from_static("Windows 10 64-bit"));
        headers.insert(
            PHONE_MODEL,
            HeaderValue::from_static("Chrome 143.0.0.0 on Windows 10 64-bit"),
        );
        headers.insert(PLATFORM, HeaderValue::from_static("Web"));
        headers.insert(UNIQUE_ID, header_value("X-Uniqueid", unique_id)?);
        headers.insert(USER_TYPE, HeaderValue::from_static("merchant"));
        headers.insert(USER_AGENT, header_value("User-Agent", user_agent)?);

        Ok(headers)
    }
}

/// `Bearer <token>`, or the bare scheme when no token was supplied.
pub fn authorization(bearer: Option<&str>) -> Result<HeaderValue, UpstreamError> {
    match bearer {
        Some(token) if !token.is_empty() => {
            header_value("Authorization", &format!("Bearer {}", token))
        }
        _ => Ok(HeaderValue::from_static("Bearer")),
    }
}

pub fn with_authorization(
    mut headers: HeaderMap,
    bearer: Option<&str>,
) -> Result<HeaderMap, UpstreamError> {
    headers.insert(AUTHORIZATION, authorization(bearer)?);
    Ok(headers)
}

pub(crate) fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, UpstreamError> {
    HeaderValue::from_str(value).map_err(|_| UpstreamError::InvalidHeader(name))
}
