use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use std::sync::Arc;

use crate::error::{ApiError, Operation};
use crate::modules::schema::parse_body;
use crate::services::gate::{OTP_REQUEST_ENDPOINT, OTP_VERIFY_ENDPOINT};
use crate::services::session::{with_authorization, Session};
use crate::services::upstream::{UpstreamRequest, UpstreamResponse};
use crate::AppState;
use super::schema::{
    login_request_body, token_request_body, OtpRequest, OtpVerifyRequest, DEFAULT_COUNTRY_CODE,
};

// =============================================================================
// POST /api/otp/request - Send an OTP to a phone number
// =============================================================================

pub async fn request_otp(
    State(state): State<Arc<AppState>>,
    body: Result<Json<OtpRequest>, JsonRejection>,
) -> Result<UpstreamResponse, ApiError> {
    let req = parse_body(body)?;

    let phone = req.phone.ok_or(ApiError::PhoneRequired)?;
    let country_code = req
        .country_code
        .unwrap_or_else(|| DEFAULT_COUNTRY_CODE.to_string());

    let upstream_request = anonymous_request(
        Operation::OtpRequest,
        Session::from_input(req.session),
        OTP_REQUEST_ENDPOINT,
        login_request_body(&phone, &country_code),
    )?;

    call(&state, Operation::OtpRequest, upstream_request).await
}

// =============================================================================
// POST /api/otp/verify - Exchange OTP + otp_token for an access token
// =============================================================================

pub async fn verify_otp(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<OtpVerifyRequest>, JsonRejection>,
) -> Result<UpstreamResponse, ApiError> {
    let mut req = parse_body(body)?;

    let otp = req.otp.take().ok_or(ApiError::OtpRequired)?;
    let otp_token = req
        .resolve_otp_token(&headers)
        .ok_or(ApiError::OtpTokenRequired)?;

    let upstream_request = anonymous_request(
        Operation::OtpVerify,
        Session::from_input(req.session),
        OTP_VERIFY_ENDPOINT,
        token_request_body(&otp, &otp_token),
    )?;

    call(&state, Operation::OtpVerify, upstream_request).await
}

/// OTP steps run before the caller has a token, so only the bare scheme is sent.
fn anonymous_request(
    operation: Operation,
    session: Session,
    endpoint: &str,
    body: serde_json::Value,
) -> Result<UpstreamRequest, ApiError> {
    let headers = session
        .headers()
        .and_then(|headers| with_authorization(headers, None))
        .map_err(ApiError::upstream(operation))?;

    Ok(UpstreamRequest::post(endpoint, body, headers))
}

/// Non-2xx replies are wrapped; 2xx bodies are returned as-is with status 200.
async fn call(
    state: &AppState,
    operation: Operation,
    request: UpstreamRequest,
) -> Result<UpstreamResponse, ApiError> {
    let response = state
        .upstream
        .send(request)
        .await
        .map_err(ApiError::upstream(operation))?;

    if !response.is_success() {
        return Err(ApiError::rejected(operation, &response));
    }

    Ok(UpstreamResponse {
        status: StatusCode::OK,
        ..response
    })
}
