use axum::{routing::post, Router};
use std::sync::Arc;

use crate::AppState;
use super::controller;

pub fn mutasi_routes() -> Router<Arc<AppState>> {
    Router::new().route("/mutasi", post(controller::search_journal))
}
