use axum::{routing::post, Router};
use std::sync::Arc;

use crate::AppState;
use super::controller;

pub fn proxy_routes() -> Router<Arc<AppState>> {
    Router::new().route("/proxy", post(controller::forward))
}
