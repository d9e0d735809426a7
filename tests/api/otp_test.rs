use axum::http::{HeaderName, HeaderValue, StatusCode};
use serde_json::{json, Value};

use crate::common::{echoed_header, Behavior, TestContext};

// =============================================================================
// OTP REQUEST
// =============================================================================

#[tokio::test]
async fn otp_request_builds_login_request() {
    let ctx = TestContext::new(Behavior::Echo).await;

    let response = ctx
        .server
        .post("/api/otp/request")
        .json(&json!({"phone": " 81234567890 "}))
        .await;

    response.assert_status(StatusCode::OK);

    let echo: Value = response.json();
    assert_eq!(echo["path"], "/goid/login/request");
    assert_eq!(
        echo["body"],
        json!({"client_id": "go-biz-web-new", "phone_number": "81234567890", "country_code": "62"})
    );
    assert_eq!(echoed_header(&echo, "authorization"), "Bearer");
    assert_eq!(echoed_header(&echo, "user-agent"), "Mozilla/5.0 (GoBizProxy)");
}

#[tokio::test]
async fn otp_request_keeps_custom_country_code() {
    let ctx = TestContext::new(Behavior::Echo).await;

    let response = ctx
        .server
        .post("/api/otp/request")
        .json(&json!({"phone": "91234567", "countryCode": "65"}))
        .await;

    let echo: Value = response.json();
    assert_eq!(echo["body"]["country_code"], "65");
}

#[tokio::test]
async fn otp_request_without_phone_is_rejected() {
    let ctx = TestContext::new(Behavior::Echo).await;

    let response = ctx
        .server
        .post("/api/otp/request")
        .json(&json!({"phone": "   "}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body, json!({"error": "PHONE_REQUIRED"}));
    assert_eq!(ctx.upstream.hits(), 0);
}

#[tokio::test]
async fn otp_request_success_returns_upstream_body_with_ok() {
    let upstream_body = json!({"success": true, "data": {"otp_token": "corr-1", "otp_expires_in": 60}});
    let ctx = TestContext::new(Behavior::Reply(StatusCode::CREATED, upstream_body.clone())).await;

    let response = ctx
        .server
        .post("/api/otp/request")
        .json(&json!({"phone": "81234567890"}))
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body, upstream_body);
}

#[tokio::test]
async fn otp_request_failure_is_wrapped_with_upstream_status() {
    let upstream_body = json!({"message": "Phone number is not registered", "code": "GoId-404"});
    let ctx = TestContext::new(Behavior::Reply(StatusCode::NOT_FOUND, upstream_body.clone())).await;

    let response = ctx
        .server
        .post("/api/otp/request")
        .json(&json!({"phone": "81234567890"}))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "OTP_REQUEST_FAILED");
    assert_eq!(body["message"], "Phone number is not registered");
    assert_eq!(body["data"], upstream_body);
}

#[tokio::test]
async fn otp_request_failure_without_body_falls_back_to_status() {
    let ctx = TestContext::new(Behavior::Text(StatusCode::SERVICE_UNAVAILABLE, "")).await;

    let response = ctx
        .server
        .post("/api/otp/request")
        .json(&json!({"phone": "81234567890"}))
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({"error": "OTP_REQUEST_FAILED", "message": "HTTP_503", "data": null})
    );
}

#[tokio::test]
async fn otp_request_timeout_returns_otp_request_error() {
    let ctx = TestContext::stalled().await;

    let response = ctx
        .server
        .post("/api/otp/request")
        .json(&json!({"phone": "81234567890"}))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "OTP_REQUEST_ERROR");
}

// =============================================================================
// OTP VERIFY
// =============================================================================

#[tokio::test]
async fn otp_verify_builds_token_request_from_body() {
    let ctx = TestContext::new(Behavior::Echo).await;

    let response = ctx
        .server
        .post("/api/otp/verify")
        .json(&json!({"otp": "123456", "otpToken": "corr-1"}))
        .await;

    response.assert_status(StatusCode::OK);

    let echo: Value = response.json();
    assert_eq!(echo["path"], "/goid/token");
    assert_eq!(
        echo["body"],
        json!({
            "client_id": "go-biz-web-new",
            "grant_type": "otp",
            "data": {"otp": "123456", "otp_token": "corr-1"}
        })
    );
    assert_eq!(echoed_header(&echo, "authorization"), "Bearer");
}

#[tokio::test]
async fn otp_verify_falls_back_to_header_token() {
    let ctx = TestContext::new(Behavior::Echo).await;

    let response = ctx
        .server
        .post("/api/otp/verify")
        .add_header(
            HeaderName::from_static("x-otp-token"),
            HeaderValue::from_static("corr-from-header"),
        )
        .json(&json!({"otp": "123456"}))
        .await;

    response.assert_status(StatusCode::OK);

    let echo: Value = response.json();
    assert_eq!(echo["body"]["data"]["otp"], "123456");
    assert_eq!(echo["body"]["data"]["otp_token"], "corr-from-header");
}

#[tokio::test]
async fn otp_verify_requires_otp_then_token() {
    let ctx = TestContext::new(Behavior::Echo).await;

    let response = ctx
        .server
        .post("/api/otp/verify")
        .json(&json!({"otpToken": "corr-1"}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "OTP_REQUIRED");

    let response = ctx
        .server
        .post("/api/otp/verify")
        .json(&json!({"otp": "123456"}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "OTP_TOKEN_REQUIRED");

    assert_eq!(ctx.upstream.hits(), 0);
}

#[tokio::test]
async fn otp_verify_failure_prefers_error_field_when_no_message() {
    let upstream_body = json!({"error": "invalid_grant", "error_description": "OTP expired"});
    let ctx = TestContext::new(Behavior::Reply(StatusCode::BAD_REQUEST, upstream_body.clone())).await;

    let response = ctx
        .server
        .post("/api/otp/verify")
        .json(&json!({"otp": "123456", "otpToken": "corr-1"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "OTP_VERIFY_FAILED");
    assert_eq!(body["message"], "invalid_grant");
    assert_eq!(body["data"], upstream_body);
}

#[tokio::test]
async fn otp_verify_success_passes_access_token_through() {
    let upstream_body = json!({"access_token": "at-1", "refresh_token": "rt-1", "expires_in": 3600});
    let ctx = TestContext::new(Behavior::Reply(StatusCode::OK, upstream_body.clone())).await;

    let response = ctx
        .server
        .post("/api/otp/verify")
        .json(&json!({"otp": "123456", "otpToken": "corr-1"}))
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body, upstream_body);
}

#[tokio::test]
async fn otp_verify_timeout_returns_otp_verify_error() {
    let ctx = TestContext::stalled().await;

    let response = ctx
        .server
        .post("/api/otp/verify")
        .json(&json!({"otp": "123456", "otpToken": "corr-1"}))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "OTP_VERIFY_ERROR");
    assert!(body["message"].is_string());
}
