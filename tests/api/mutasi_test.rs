use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{echoed_header, Behavior, TestContext};

fn mutasi_body(size: Value) -> Value {
    json!({
        "bearer": "access-123",
        "merchantId": "M-123",
        "dateYmd": "2024-05-01",
        "size": size,
    })
}

#[tokio::test]
async fn mutasi_builds_day_bounded_journal_query() {
    let ctx = TestContext::new(Behavior::Echo).await;

    let response = ctx
        .server
        .post("/api/mutasi")
        .json(&mutasi_body(Value::Null))
        .await;

    response.assert_status(StatusCode::OK);

    let echo: Value = response.json();
    assert_eq!(echo["path"], "/journals/search");
    assert_eq!(
        echo["body"],
        json!({
            "from": 0,
            "size": 50,
            "sort": {"time": {"order": "desc"}},
            "included_categories": {"incoming": ["transaction_share", "action"]},
            "query": [{
                "op": "and",
                "clauses": [
                    {"field": "metadata.transaction.merchant_id", "op": "equal", "value": "M-123"},
                    {"field": "metadata.transaction.transaction_time", "op": "gte", "value": "2024-05-01T00:00:00+07:00"},
                    {"field": "metadata.transaction.transaction_time", "op": "lte", "value": "2024-05-01T23:59:59+07:00"}
                ]
            }]
        })
    );
    assert_eq!(
        echoed_header(&echo, "accept"),
        "application/json, application/vnd.journal.v1+json"
    );
    assert_eq!(echoed_header(&echo, "authorization"), "Bearer access-123");
}

#[tokio::test]
async fn mutasi_clamps_page_size() {
    let ctx = TestContext::new(Behavior::Echo).await;

    for (requested, expected) in [(json!(0), 1), (json!(500), 200), (json!(30), 30), (json!("75"), 75)] {
        let response = ctx.server.post("/api/mutasi").json(&mutasi_body(requested)).await;

        response.assert_status(StatusCode::OK);
        let echo: Value = response.json();
        assert_eq!(echo["body"]["size"], expected);
    }
}

#[tokio::test]
async fn mutasi_validates_required_fields_in_order() {
    let ctx = TestContext::new(Behavior::Echo).await;

    let cases = [
        (json!({"merchantId": "M-123", "dateYmd": "2024-05-01"}), "ACCESS_TOKEN_REQUIRED"),
        (json!({"bearer": "access-123", "dateYmd": "2024-05-01"}), "MERCHANT_ID_REQUIRED"),
        (json!({"bearer": "access-123", "merchantId": "M-123"}), "DATE_REQUIRED"),
        (json!({}), "ACCESS_TOKEN_REQUIRED"),
    ];

    for (body, code) in cases {
        let response = ctx.server.post("/api/mutasi").json(&body).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], code);
    }

    assert_eq!(ctx.upstream.hits(), 0);
}

#[tokio::test]
async fn mutasi_rejects_non_calendar_dates() {
    let ctx = TestContext::new(Behavior::Echo).await;

    let response = ctx
        .server
        .post("/api/mutasi")
        .json(&json!({"bearer": "access-123", "merchantId": "M-123", "dateYmd": "2024-13-01"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "INVALID_DATE");
    assert_eq!(ctx.upstream.hits(), 0);
}

#[tokio::test]
async fn mutasi_passes_upstream_status_through() {
    let upstream_body = json!({"hits": [], "total": 0});
    let ctx = TestContext::new(Behavior::Reply(StatusCode::PARTIAL_CONTENT, upstream_body.clone())).await;

    let response = ctx.server.post("/api/mutasi").json(&mutasi_body(json!(10))).await;

    response.assert_status(StatusCode::PARTIAL_CONTENT);
    let body: Value = response.json();
    assert_eq!(body, upstream_body);
}

#[tokio::test]
async fn mutasi_timeout_returns_mutasi_error() {
    let ctx = TestContext::stalled().await;

    let response = ctx.server.post("/api/mutasi").json(&mutasi_body(json!(10))).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "MUTASI_ERROR");
    assert_eq!(body["message"], "timeout of 200ms exceeded");
}
