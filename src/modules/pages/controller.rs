use axum::{extract::State, response::Html};
use std::sync::Arc;

use crate::services::gate::ALLOWED_ENDPOINTS;
use crate::AppState;

const OPERATIONS: [(&str, &str, &str); 5] = [
    (
        "/api/otp/request",
        "Send an OTP to a phone number. The reply carries the otp_token needed by verify.",
        r#"{"phone": "81234567890", "countryCode": "62"}"#,
    ),
    (
        "/api/otp/verify",
        "Exchange the OTP for an access token. otpToken may also be sent as the x-otp-token header.",
        r#"{"otp": "123456", "otpToken": "<otp_token>"}"#,
    ),
    (
        "/api/merchant/search",
        "First merchant visible to the access token (id and name).",
        r#"{"bearer": "<access_token>"}"#,
    ),
    (
        "/api/mutasi",
        "One day of a merchant's transaction journal in UTC+7, newest first. size is clamped to 1..200.",
        r#"{"bearer": "<access_token>", "merchantId": "<merchant_id>", "dateYmd": "2024-05-01", "size": 50}"#,
    ),
    (
        "/api/proxy",
        "Raw call to an allowlisted upstream endpoint. Query strings are dropped.",
        r#"{"endpoint": "/v1/merchants/search", "method": "POST", "body": {}, "bearer": "<access_token>"}"#,
    ),
];

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, content: &str) -> Html<String> {
    Html(format!(
        r#"<!doctype html>
<html lang="id">
<head>
  <meta charset="utf-8"/>
  <meta name="viewport" content="width=device-width,initial-scale=1"/>
  <title>{title}</title>
  <link rel="stylesheet" href="/public/app.css"/>
</head>
<body>
{content}
</body>
</html>"#,
        title = escape_html(title),
        content = content,
    ))
}

/// GET / - landing card
pub async fn home(State(state): State<Arc<AppState>>) -> Html<String> {
    let content = format!(
        r#"  <div class="home">
    <div class="homeCard">
      <div class="homeTitle">GoBiz Proxy</div>
      <div class="homeMeta">
        <div class="homeMetaK">Upstream</div>
        <div class="homeMetaV mono">{base_url}</div>
      </div>
      <a class="btn primary" href="/docs">Open API Explorer</a>
      <div class="muted small">Flow: Request OTP, keep otp_token, verify with the OTP only.</div>
    </div>
  </div>"#,
        base_url = escape_html(&state.config.upstream_base),
    );
    layout("GoBiz Proxy", &content)
}

/// GET /docs - operation reference
pub async fn docs(State(state): State<Arc<AppState>>) -> Html<String> {
    let operations: String = OPERATIONS
        .iter()
        .map(|(path, summary, example)| {
            format!(
                r#"    <section class="op">
      <h2 class="mono">POST {path}</h2>
      <p>{summary}</p>
      <pre class="mono">{example}</pre>
    </section>
"#,
                path = escape_html(path),
                summary = escape_html(summary),
                example = escape_html(example),
            )
        })
        .collect();

    let mut allowed: Vec<&str> = ALLOWED_ENDPOINTS.iter().copied().collect();
    allowed.sort_unstable();
    let allowed: String = allowed
        .iter()
        .map(|endpoint| format!("<li class=\"mono\">{}</li>", escape_html(endpoint)))
        .collect();

    let content = format!(
        r#"  <div class="docs">
    <h1>GoBiz Proxy Docs</h1>
    <p class="muted">Upstream: <span class="mono">{base_url}</span></p>
    <p class="muted">Every body may carry <span class="mono">session: {{"uniqueId", "userAgent"}}</span>; missing values are generated per request.</p>
{operations}    <h2>Raw proxy allowlist</h2>
    <ul>{allowed}</ul>
  </div>"#,
        base_url = escape_html(&state.config.upstream_base),
        operations = operations,
        allowed = allowed,
    );
    layout("GoBiz Proxy Docs", &content)
}
