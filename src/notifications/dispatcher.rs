use std::sync::Arc;

use super::models::{DispatchResult, NotificationRequest, OutboundMessage, SkipReason};
use super::twilio::MessageSender;
use crate::config::{ConfigResolver, ConfigSource};
use crate::error::AppResult;
use crate::redact::mask_identifier;

/// key: notifications-dispatch -> conditional single-shot delivery
///
/// Validation failures are the only errors; every other outcome is a
/// [`DispatchResult`]. At most one delivery attempt is made per call.
pub struct NotificationDispatcher {
    config: Arc<dyn ConfigSource>,
    sender: Arc<dyn MessageSender>,
}

impl NotificationDispatcher {
    pub fn new(config: Arc<dyn ConfigSource>, sender: Arc<dyn MessageSender>) -> Self {
        Self { config, sender }
    }

    pub async fn dispatch(&self, request: &NotificationRequest) -> AppResult<DispatchResult> {
        request.validate()?;

        let config = match ConfigResolver::new(self.config.as_ref()).messaging() {
            Ok(config) => config,
            Err(err) => {
                tracing::info!(%err, "messaging not configured; skipping notification");
                return Ok(DispatchResult::Skipped {
                    reason: SkipReason::NotConfigured,
                });
            }
        };

        let message = OutboundMessage {
            from: config.from_address.clone(),
            to: request.to.trim().to_string(),
            body: request.body.clone(),
        };
        let recipient = mask_identifier(&message.to, 4);

        match self.sender.send(&config, &message).await {
            Ok(message_id) => {
                tracing::info!(%recipient, %message_id, "notification sent");
                Ok(DispatchResult::Sent { message_id })
            }
            Err(err) => {
                tracing::warn!(%recipient, %err, "notification delivery failed");
                let reason = match err.to_string() {
                    reason if reason.trim().is_empty() => "messaging provider error".to_string(),
                    reason => reason,
                };
                Ok(DispatchResult::Failed { reason })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        MapSource, MessagingConfiguration, TWILIO_ACCOUNT_SID, TWILIO_AUTH_TOKEN,
        TWILIO_FROM_NUMBER,
    };
    use crate::error::{AppError, ProviderError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeSender {
        calls: AtomicUsize,
        fail_with: Option<String>,
        sent: Mutex<Vec<OutboundMessage>>,
    }

    impl FakeSender {
        fn failing(message: &str) -> Self {
            Self {
                fail_with: Some(message.to_string()),
                ..Self::default()
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MessageSender for FakeSender {
        async fn send(
            &self,
            _config: &MessagingConfiguration,
            message: &OutboundMessage,
        ) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.sent.lock().unwrap().push(message.clone());
            match &self.fail_with {
                Some(message) => Err(ProviderError::Rejected {
                    status: 401,
                    message: message.clone(),
                }),
                None => Ok("SM0001".to_string()),
            }
        }
    }

    fn configured() -> MapSource {
        MapSource::new()
            .with(TWILIO_ACCOUNT_SID, "AC123")
            .with(TWILIO_AUTH_TOKEN, "token")
            .with(TWILIO_FROM_NUMBER, "+15550000000")
    }

    fn dispatcher(source: MapSource, sender: Arc<FakeSender>) -> NotificationDispatcher {
        NotificationDispatcher::new(Arc::new(source), sender)
    }

    #[tokio::test]
    async fn unconfigured_messaging_is_skipped() {
        let sender = Arc::new(FakeSender::default());
        let result = dispatcher(MapSource::new(), sender.clone())
            .dispatch(&NotificationRequest::new("+15551234567", "hi"))
            .await
            .unwrap();
        assert_eq!(
            result,
            DispatchResult::Skipped {
                reason: SkipReason::NotConfigured
            }
        );
        assert_eq!(sender.calls(), 0);
    }

    #[tokio::test]
    async fn any_missing_value_skips() {
        for missing in [TWILIO_ACCOUNT_SID, TWILIO_AUTH_TOKEN, TWILIO_FROM_NUMBER] {
            let source = configured().with(missing, "");
            let sender = Arc::new(FakeSender::default());
            let result = dispatcher(source, sender.clone())
                .dispatch(&NotificationRequest::new("+15551234567", "hi"))
                .await
                .unwrap();
            assert!(matches!(result, DispatchResult::Skipped { .. }), "{missing}");
            assert_eq!(sender.calls(), 0);
        }
    }

    #[tokio::test]
    async fn empty_recipient_is_rejected_before_configuration() {
        let sender = Arc::new(FakeSender::default());
        let err = dispatcher(configured(), sender.clone())
            .dispatch(&NotificationRequest::new("", "hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
        assert_eq!(sender.calls(), 0);
    }

    #[tokio::test]
    async fn configured_dispatch_sends_once() {
        let sender = Arc::new(FakeSender::default());
        let result = dispatcher(configured(), sender.clone())
            .dispatch(&NotificationRequest::new("+15551234567", "hi"))
            .await
            .unwrap();
        assert_eq!(
            result,
            DispatchResult::Sent {
                message_id: "SM0001".into()
            }
        );
        assert_eq!(sender.calls(), 1);
        assert_eq!(
            sender.sent.lock().unwrap()[0],
            OutboundMessage {
                from: "+15550000000".into(),
                to: "+15551234567".into(),
                body: "hi".into(),
            }
        );
    }

    #[tokio::test]
    async fn provider_failure_is_folded_into_result() {
        let sender = Arc::new(FakeSender::failing("Authenticate"));
        let result = dispatcher(configured(), sender.clone())
            .dispatch(&NotificationRequest::new("+15551234567", "hi"))
            .await
            .unwrap();
        assert_eq!(
            result,
            DispatchResult::Failed {
                reason: "Authenticate".into()
            }
        );
        assert_eq!(sender.calls(), 1);
    }

    #[tokio::test]
    async fn blank_provider_message_still_yields_reason() {
        let sender = Arc::new(FakeSender::failing(""));
        let result = dispatcher(configured(), sender)
            .dispatch(&NotificationRequest::new("+15551234567", "hi"))
            .await
            .unwrap();
        match result {
            DispatchResult::Failed { reason } => assert!(!reason.is_empty()),
            other => panic!("unexpected outcome {other:?}"),
        }
    }
}
