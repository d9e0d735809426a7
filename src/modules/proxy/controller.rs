use axum::{
    extract::{rejection::JsonRejection, State},
    http::header::ACCEPT,
    Json,
};
use std::sync::Arc;

use crate::error::{ApiError, Operation};
use crate::modules::schema::parse_body;
use crate::services::gate;
use crate::services::session::{header_value, with_authorization, Session};
use crate::services::upstream::{UpstreamMethod, UpstreamRequest, UpstreamResponse};
use crate::AppState;
use super::schema::ProxyRequest;

// =============================================================================
// POST /api/proxy - Forward to an allowlisted upstream endpoint
// =============================================================================

pub async fn forward(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ProxyRequest>, JsonRejection>,
) -> Result<UpstreamResponse, ApiError> {
    let mut req = parse_body(body)?;

    let endpoint = gate::check_endpoint(req.endpoint.as_ref()).map_err(|e| {
        tracing::warn!(error = %e, "raw proxy endpoint rejected");
        ApiError::from(e)
    })?;

    let method_name = req.method_name();
    let method = UpstreamMethod::parse(&method_name).ok_or(ApiError::MethodNotAllowed(method_name))?;

    let session = Session::from_input(req.session.take());

    // Without a bearer the bare scheme is still sent; upstream decides what that means.
    let headers = session
        .headers()
        .and_then(|mut headers| {
            if let Some(accept) = req.accept.as_deref() {
                headers.insert(ACCEPT, header_value("Accept", accept)?);
            }
            with_authorization(headers, req.bearer.as_deref())
        })
        .map_err(ApiError::upstream(Operation::Proxy))?;

    let request = UpstreamRequest {
        endpoint,
        method,
        body: req.upstream_body(),
        headers,
    };

    state
        .upstream
        .send(request)
        .await
        .map_err(ApiError::upstream(Operation::Proxy))
}
