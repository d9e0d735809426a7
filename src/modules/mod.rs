pub mod merchant;
pub mod mutasi;
pub mod otp;
pub mod pages;
pub mod proxy;
pub mod schema;

use axum::Router;
use std::sync::Arc;

use crate::AppState;

/// Every JSON operation, mounted under `/api`.
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(proxy::proxy_routes())
        .merge(mutasi::mutasi_routes())
        .nest("/otp", otp::otp_routes())
        .nest("/merchant", merchant::merchant_routes())
}
