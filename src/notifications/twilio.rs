use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use super::models::OutboundMessage;
use crate::config::MessagingConfiguration;
use crate::error::ProviderError;

/// key: messaging-provider -> single message submission
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Submits one message and returns the provider-assigned identifier.
    async fn send(
        &self,
        config: &MessagingConfiguration,
        message: &OutboundMessage,
    ) -> Result<String, ProviderError>;
}

#[derive(Clone)]
pub struct TwilioClient {
    client: reqwest::Client,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct TwilioMessage {
    sid: String,
}

#[derive(Debug, Deserialize)]
struct TwilioError {
    message: String,
}

impl TwilioClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url).context("invalid twilio api base url")?;
        if base_url.cannot_be_a_base() {
            bail!("twilio api base url `{base_url}` cannot carry a path");
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build twilio client")?;
        Ok(Self { client, base_url })
    }

    /// Appends `segments` to the base path, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[async_trait]
impl MessageSender for TwilioClient {
    async fn send(
        &self,
        config: &MessagingConfiguration,
        message: &OutboundMessage,
    ) -> Result<String, ProviderError> {
        let url = self.endpoint(&[
            "2010-04-01",
            "Accounts",
            config.account_id.as_str(),
            "Messages.json",
        ]);
        let response = self
            .client
            .post(url)
            .basic_auth(&config.account_id, Some(&config.auth_token))
            .form(&[
                ("From", message.from.as_str()),
                ("To", message.to.as_str()),
                ("Body", message.body.as_str()),
            ])
            .send()
            .await
            .map_err(|err| ProviderError::from(err.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<TwilioError>(&body)
                .map(|err| err.message)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("request rejected")
                        .to_string()
                });
            return Err(ProviderError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let created: TwilioMessage = response
            .json()
            .await
            .map_err(|err| ProviderError::Decode(err.without_url().to_string()))?;
        Ok(created.sid)
    }
}
