use axum::{routing::post, Router};
use std::sync::Arc;

use crate::AppState;
use super::controller;

pub fn merchant_routes() -> Router<Arc<AppState>> {
    Router::new().route("/search", post(controller::search_merchants))
}
