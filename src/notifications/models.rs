use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Inbound send request. Absent fields deserialize as empty and are rejected by
/// [`NotificationRequest::validate`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationRequest {
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub body: String,
}

impl NotificationRequest {
    pub fn new(to: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            body: body.into(),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.to.trim().is_empty() {
            return Err(AppError::InvalidRequest("`to` is required".into()));
        }
        if self.body.trim().is_empty() {
            return Err(AppError::InvalidRequest("`body` is required".into()));
        }
        Ok(())
    }
}

/// Message handed to the messaging provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub from: String,
    pub to: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NotConfigured,
}

/// Terminal outcome of one dispatch call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DispatchResult {
    Sent {
        #[serde(rename = "messageId")]
        message_id: String,
    },
    Skipped {
        reason: SkipReason,
    },
    Failed {
        reason: String,
    },
}

/// Wire shape returned by the send endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<bool>,
}

impl From<&DispatchResult> for NotificationResponse {
    fn from(result: &DispatchResult) -> Self {
        match result {
            DispatchResult::Sent { message_id } => Self {
                message: "Notification sent".into(),
                sid: Some(message_id.clone()),
                skipped: None,
            },
            DispatchResult::Skipped { .. } => Self {
                message: "Messaging not configured; notification skipped".into(),
                sid: None,
                skipped: Some(true),
            },
            DispatchResult::Failed { reason } => Self {
                message: format!("Failed to send notification: {reason}"),
                sid: None,
                skipped: None,
            },
        }
    }
}
