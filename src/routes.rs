use axum::{
    routing::{get, post},
    Extension, Router,
};

use crate::state::AppState;
use crate::{billing, notifications};

pub async fn root() -> &'static str {
    "Membership API"
}

pub fn api_routes() -> Router {
    Router::new()
        .route("/api/billing/health", get(billing::billing_health))
        .route("/api/billing/history", get(billing::billing_history_route))
        .route("/api/billing/sync", post(billing::billing_sync_route))
        .route(
            "/api/notifications/send",
            post(notifications::send_notification),
        )
}

/// Full application router with shared state attached.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .merge(api_routes())
        .layer(Extension(state))
}
