use axum::{routing::get, Router};
use std::sync::Arc;

use crate::AppState;
use super::controller;

pub fn page_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(controller::home))
        .route("/docs", get(controller::docs))
}
