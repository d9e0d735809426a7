use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use crate::error::{ApiError, Operation};
use crate::modules::schema::parse_body;
use crate::services::gate::MERCHANT_SEARCH_ENDPOINT;
use crate::services::session::{with_authorization, Session};
use crate::services::upstream::{UpstreamRequest, UpstreamResponse};
use crate::AppState;
use super::schema::{merchant_search_body, MerchantSearchRequest};

// =============================================================================
// POST /api/merchant/search - Merchants visible to the bearer
// =============================================================================

pub async fn search_merchants(
    State(state): State<Arc<AppState>>,
    body: Result<Json<MerchantSearchRequest>, JsonRejection>,
) -> Result<UpstreamResponse, ApiError> {
    let req = parse_body(body)?;

    let bearer = req.bearer.ok_or(ApiError::AccessTokenRequired)?;

    let headers = Session::from_input(req.session)
        .headers()
        .and_then(|headers| with_authorization(headers, Some(bearer.as_str())))
        .map_err(ApiError::upstream(Operation::MerchantSearch))?;

    let request = UpstreamRequest::post(MERCHANT_SEARCH_ENDPOINT, merchant_search_body(), headers);

    state
        .upstream
        .send(request)
        .await
        .map_err(ApiError::upstream(Operation::MerchantSearch))
}
