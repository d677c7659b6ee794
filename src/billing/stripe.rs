use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use super::models::PriceRecord;
use crate::error::ProviderError;

/// key: billing-provider -> read-only price retrieval
#[async_trait]
pub trait PriceLookup: Send + Sync {
    async fn retrieve_price(
        &self,
        secret_credential: &str,
        price_id: &str,
    ) -> Result<PriceRecord, ProviderError>;
}

#[derive(Clone)]
pub struct StripeClient {
    client: reqwest::Client,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct StripePrice {
    #[serde(default)]
    deleted: bool,
    #[serde(default)]
    active: bool,
    #[serde(default)]
    unit_amount: Option<i64>,
    #[serde(default)]
    recurring: Option<StripeRecurring>,
}

#[derive(Debug, Deserialize)]
struct StripeRecurring {
    interval: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorEnvelope {
    error: StripeErrorBody,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    message: String,
}

impl StripeClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url).context("invalid stripe api base url")?;
        if base_url.cannot_be_a_base() {
            bail!("stripe api base url `{base_url}` cannot carry a path");
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build stripe client")?;
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
impl PriceLookup for StripeClient {
    async fn retrieve_price(
        &self,
        secret_credential: &str,
        price_id: &str,
    ) -> Result<PriceRecord, ProviderError> {
        let response = self
            .client
            .get(self.endpoint(&["v1", "prices", price_id]))
            .bearer_auth(secret_credential)
            .send()
            .await
            .map_err(|err| ProviderError::from(err.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<StripeErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
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

        let price: StripePrice = response
            .json()
            .await
            .map_err(|err| ProviderError::Decode(err.without_url().to_string()))?;

        Ok(PriceRecord {
            exists: true,
            deleted: price.deleted,
            active: price.active,
            unit_amount: price.unit_amount,
            recurring_interval: price.recurring.map(|recurring| recurring.interval),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> StripeClient {
        StripeClient::new(base_url, Duration::from_secs(2)).unwrap()
    }

    #[test]
    fn price_id_is_encoded_as_a_single_segment() {
        let stripe = client("https://api.stripe.com");
        let url = stripe.endpoint(&["v1", "prices", "price_a/../b?x#y"]);
        assert_eq!(
            url.as_str(),
            "https://api.stripe.com/v1/prices/price_a%2F..%2Fb%3Fx%23y"
        );
    }

    #[test]
    fn base_path_is_preserved() {
        let stripe = client("http://127.0.0.1:8080/stripe/");
        let url = stripe.endpoint(&["v1", "prices", "price_1"]);
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8080/stripe/v1/prices/price_1"
        );
    }

    #[test]
    fn rejects_unusable_base_url() {
        let timeout = Duration::from_secs(2);
        assert!(StripeClient::new("not a url", timeout).is_err());
        assert!(StripeClient::new("mailto:billing@example.com", timeout).is_err());
    }

    #[tokio::test]
    async fn transport_errors_do_not_echo_the_price_id() {
        let err = client("http://127.0.0.1:9")
            .retrieve_price("sk_live_x", "price_ABCD1234SECRETTAIL")
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Transport(_)));
        let rendered = err.to_string();
        assert!(!rendered.is_empty());
        assert!(!rendered.contains("SECRETTAIL"), "{rendered}");
    }
}
