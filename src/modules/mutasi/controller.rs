use axum::{
    extract::{rejection::JsonRejection, State},
    http::header::ACCEPT,
    http::HeaderValue,
    Json,
};
use std::sync::Arc;

use crate::error::{ApiError, Operation};
use crate::modules::schema::parse_body;
use crate::services::gate::JOURNAL_SEARCH_ENDPOINT;
use crate::services::session::{with_authorization, Session, JOURNAL_ACCEPT};
use crate::services::upstream::{UpstreamRequest, UpstreamResponse};
use crate::AppState;
use super::query::{journal_search_body, page_size, DayRange};
use super::schema::MutasiRequest;

// =============================================================================
// POST /api/mutasi - One day of a merchant's transaction journal
// =============================================================================

pub async fn search_journal(
    State(state): State<Arc<AppState>>,
    body: Result<Json<MutasiRequest>, JsonRejection>,
) -> Result<UpstreamResponse, ApiError> {
    let req = parse_body(body)?;

    let size = page_size(req.size);
    let bearer = req.bearer.ok_or(ApiError::AccessTokenRequired)?;
    let merchant_id = req.merchant_id.ok_or(ApiError::MerchantIdRequired)?;
    let date_ymd = req.date_ymd.ok_or(ApiError::DateRequired)?;
    let range = DayRange::parse(&date_ymd).ok_or(ApiError::InvalidDate(date_ymd))?;

    let headers = Session::from_input(req.session)
        .headers()
        .and_then(|mut headers| {
            headers.insert(ACCEPT, HeaderValue::from_static(JOURNAL_ACCEPT));
            with_authorization(headers, Some(bearer.as_str()))
        })
        .map_err(ApiError::upstream(Operation::Mutasi))?;

    tracing::debug!(merchant_id = %merchant_id, from = %range.from, to = %range.to, size, "journal search");

    let request = UpstreamRequest::post(
        JOURNAL_SEARCH_ENDPOINT,
        journal_search_body(&merchant_id, &range, size),
        headers,
    );

    state
        .upstream
        .send(request)
        .await
        .map_err(ApiError::upstream(Operation::Mutasi))
}
