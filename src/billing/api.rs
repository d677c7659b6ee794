use axum::{extract::Extension, Json};
use serde_json::Value;

use super::{billing_history_stub, billing_sync_stub, BillingHealthChecker, HealthReport};
use crate::state::AppState;

/// key: billing-api -> rest endpoints
///
/// Always answers 200; callers read `ok` from the body.
pub async fn billing_health(Extension(state): Extension<AppState>) -> Json<HealthReport> {
    let checker = BillingHealthChecker::new(state.config.clone(), state.prices.clone());
    Json(checker.check_health().await)
}

pub async fn billing_history() -> Json<Value> {
    Json(billing_history_stub())
}

pub async fn billing_sync(payload: Option<Json<Value>>) -> Json<Value> {
    let metadata = payload.map(|Json(value)| value).unwrap_or(Value::Null);
    Json(billing_sync_stub(metadata))
}
