use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use axum_test::TestServer;
use gobiz_proxy::config::Config;
use serde_json::{json, Map, Value};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;

/// How the fake upstream answers every request.
#[allow(dead_code)]
#[derive(Clone)]
pub enum Behavior {
    /// 200 with `{method, path, query, headers, body}` of the received request.
    Echo,
    Reply(StatusCode, Value),
    Text(StatusCode, &'static str),
    Stall(Duration),
}

#[derive(Clone)]
struct FakeState {
    behavior: Behavior,
    hits: Arc<AtomicUsize>,
}

/// Upstream stand-in bound to an ephemeral local port.
pub struct FakeUpstream {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl FakeUpstream {
    pub async fn spawn(behavior: Behavior) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake upstream");
        let addr = listener.local_addr().expect("Fake upstream has no address");

        let hits = Arc::new(AtomicUsize::new(0));
        let app = Router::new().fallback(handle).with_state(FakeState {
            behavior,
            hits: hits.clone(),
        });

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            base_url: format!("http://{}", addr),
            hits,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn handle(
    State(state): State<FakeState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);

    match state.behavior {
        Behavior::Echo => {
            let headers: Map<String, Value> = headers
                .iter()
                .map(|(name, value)| {
                    (
                        name.as_str().to_string(),
                        json!(value.to_str().unwrap_or_default()),
                    )
                })
                .collect();
            let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

            Json(json!({
                "method": method.as_str(),
                "path": uri.path(),
                "query": uri.query(),
                "headers": headers,
                "body": body,
            }))
            .into_response()
        }
        Behavior::Reply(status, value) => (status, Json(value)).into_response(),
        Behavior::Text(status, text) => (
            status,
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            text,
        )
            .into_response(),
        Behavior::Stall(delay) => {
            tokio::time::sleep(delay).await;
            Json(json!({"late": true})).into_response()
        }
    }
}

#[allow(dead_code)]
pub struct TestContext {
    pub server: TestServer,
    pub upstream: FakeUpstream,
}

#[allow(dead_code)]
impl TestContext {
    pub async fn new(behavior: Behavior) -> Self {
        Self::with_config(behavior, |_| {}).await
    }

    pub async fn with_config(behavior: Behavior, tweak: impl FnOnce(&mut Config)) -> Self {
        let upstream = FakeUpstream::spawn(behavior).await;

        let mut config = Config {
            upstream_base: upstream.base_url.clone(),
            upstream_timeout_ms: 2_000,
            ..Config::default()
        };
        tweak(&mut config);

        let app = gobiz_proxy::create_app(config).expect("Failed to build app");
        let server = TestServer::new(app).expect("Failed to create test server");

        Self { server, upstream }
    }

    /// Context whose upstream never answers within the configured timeout.
    pub async fn stalled() -> Self {
        Self::with_config(Behavior::Stall(Duration::from_secs(3)), |config| {
            config.upstream_timeout_ms = 200;
        })
        .await
    }
}

// Helper to read a forwarded header out of an echo reply
#[allow(dead_code)]
pub fn echoed_header<'a>(echo: &'a Value, name: &str) -> &'a str {
    echo["headers"][name].as_str().unwrap_or_default()
}
