use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    Json,
};

use super::{DispatchResult, NotificationDispatcher, NotificationRequest, NotificationResponse};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// key: notifications-api -> send endpoint
pub async fn send_notification(
    Extension(state): Extension<AppState>,
    payload: Result<Json<NotificationRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<NotificationResponse>)> {
    let Json(request) = payload.map_err(|err| AppError::InvalidRequest(err.body_text()))?;

    let dispatcher = NotificationDispatcher::new(state.config.clone(), state.sender.clone());
    let result = dispatcher.dispatch(&request).await?;

    let status = match result {
        DispatchResult::Sent { .. } | DispatchResult::Skipped { .. } => StatusCode::OK,
        DispatchResult::Failed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    Ok((status, Json(NotificationResponse::from(&result))))
}
