use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::modules::schema::ErrorResponse;
use crate::services::gate::GateError;
use crate::services::upstream::{UpstreamError, UpstreamResponse};

/// Exposed operations, used to label failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Proxy,
    OtpRequest,
    OtpVerify,
    MerchantSearch,
    Mutasi,
}

impl Operation {
    /// Code reported when the handler itself fails (transport, internal).
    pub fn error_code(self) -> &'static str {
        match self {
            Self::Proxy => "PROXY_ERROR",
            Self::OtpRequest => "OTP_REQUEST_ERROR",
            Self::OtpVerify => "OTP_VERIFY_ERROR",
            Self::MerchantSearch => "MERCHANT_ERROR",
            Self::Mutasi => "MUTASI_ERROR",
        }
    }

    /// Code reported when the upstream answers with a non-2xx status.
    /// Only the OTP steps wrap such replies; the rest pass them through.
    pub fn failure_code(self) -> Option<&'static str> {
        match self {
            Self::OtpRequest => Some("OTP_REQUEST_FAILED"),
            Self::OtpVerify => Some("OTP_VERIFY_FAILED"),
            Self::Proxy | Self::MerchantSearch | Self::Mutasi => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Endpoint is missing or malformed")]
    InvalidEndpoint,

    #[error("Endpoint {0} is not allowed")]
    EndpointNotAllowed(String),

    #[error("Method {0} is not allowed")]
    MethodNotAllowed(String),

    #[error("phone is required")]
    PhoneRequired,

    #[error("otp is required")]
    OtpRequired,

    #[error("otpToken is required")]
    OtpTokenRequired,

    #[error("bearer is required")]
    AccessTokenRequired,

    #[error("merchantId is required")]
    MerchantIdRequired,

    #[error("dateYmd is required")]
    DateRequired,

    #[error("dateYmd must be a YYYY-MM-DD calendar date, got {0:?}")]
    InvalidDate(String),

    #[error("Upstream rejected {operation:?} with {status}: {message}")]
    UpstreamRejected {
        operation: Operation,
        status: StatusCode,
        message: String,
        data: Value,
    },

    #[error("{operation:?} failed: {source}")]
    Upstream {
        operation: Operation,
        #[source]
        source: UpstreamError,
    },
}

impl ApiError {
    pub fn upstream(operation: Operation) -> impl FnOnce(UpstreamError) -> Self {
        move |source| Self::Upstream { operation, source }
    }

    /// Wrap a non-2xx upstream reply, keeping its status and raw body.
    pub fn rejected(operation: Operation, response: &UpstreamResponse) -> Self {
        Self::UpstreamRejected {
            operation,
            status: response.status,
            message: response.failure_message(),
            data: response.data.to_value(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            Self::InvalidEndpoint => "INVALID_ENDPOINT",
            Self::EndpointNotAllowed(_) => "ENDPOINT_NOT_ALLOWED",
            Self::MethodNotAllowed(_) => "METHOD_NOT_ALLOWED",
            Self::PhoneRequired => "PHONE_REQUIRED",
            Self::OtpRequired => "OTP_REQUIRED",
            Self::OtpTokenRequired => "OTP_TOKEN_REQUIRED",
            Self::AccessTokenRequired => "ACCESS_TOKEN_REQUIRED",
            Self::MerchantIdRequired => "MERCHANT_ID_REQUIRED",
            Self::DateRequired => "DATE_REQUIRED",
            Self::InvalidDate(_) => "INVALID_DATE",
            Self::UpstreamRejected { operation, .. } => operation
                .failure_code()
                .unwrap_or_else(|| operation.error_code()),
            Self::Upstream { operation, .. } => operation.error_code(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::EndpointNotAllowed(_) => StatusCode::FORBIDDEN,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::UpstreamRejected { status, .. } => *status,
            Self::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn body(self) -> ErrorResponse {
        let code = self.code();
        match self {
            Self::InvalidBody(message) => ErrorResponse::with_message(code, message),
            Self::EndpointNotAllowed(endpoint) => ErrorResponse {
                endpoint: Some(endpoint),
                ..ErrorResponse::new(code)
            },
            Self::UpstreamRejected { message, data, .. } => ErrorResponse {
                data: Some(data),
                ..ErrorResponse::with_message(code, message)
            },
            Self::Upstream { source, .. } => {
                let message = source.to_string();
                if message.is_empty() {
                    ErrorResponse::with_message(code, "UNKNOWN_ERROR")
                } else {
                    ErrorResponse::with_message(code, message)
                }
            }
            _ => ErrorResponse::new(code),
        }
    }
}

impl From<GateError> for ApiError {
    fn from(error: GateError) -> Self {
        match error {
            GateError::InvalidEndpoint => Self::InvalidEndpoint,
            GateError::NotAllowed(endpoint) => Self::EndpointNotAllowed(endpoint),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            Self::Upstream { operation, source } => {
                tracing::error!(operation = ?operation, error = %source, "upstream call failed");
            }
            Self::UpstreamRejected { operation, status, message, .. } => {
                tracing::warn!(operation = ?operation, status = status.as_u16(), %message, "upstream rejected request");
            }
            _ => tracing::debug!(code = self.code(), "request rejected"),
        }
        (status, Json(self.body())).into_response()
    }
}
