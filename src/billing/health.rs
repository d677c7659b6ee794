use std::sync::Arc;

use super::models::HealthReport;
use super::stripe::PriceLookup;
use crate::config::{
    ConfigError, ConfigResolver, ConfigSource, PRICE_ID_PREFIX, STRIPE_PRICE_ID,
    STRIPE_SECRET_KEY,
};
use crate::redact::mask_identifier;

/// Characters of the price identifier kept visible after the literal prefix.
pub const PRICE_ID_VISIBLE_CHARS: usize = 4;

/// key: billing-health -> payment provider verification
///
/// Resolves the payment configuration on every call and performs at most one
/// read-only price lookup. Business failures are reported through
/// [`HealthReport::ok`] rather than as errors.
pub struct BillingHealthChecker {
    config: Arc<dyn ConfigSource>,
    prices: Arc<dyn PriceLookup>,
}

impl BillingHealthChecker {
    pub fn new(config: Arc<dyn ConfigSource>, prices: Arc<dyn PriceLookup>) -> Self {
        Self { config, prices }
    }

    pub async fn check_health(&self) -> HealthReport {
        let resolver = ConfigResolver::new(self.config.as_ref());
        let has_price_id = resolver.is_present(STRIPE_PRICE_ID);

        let config = match resolver.payment() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(%err, "billing health check aborted before price lookup");
                return match err {
                    ConfigError::MissingConfiguration {
                        variable: STRIPE_SECRET_KEY,
                    } => HealthReport::failed(false, has_price_id, "Missing secret credential"),
                    ConfigError::MissingConfiguration { .. } => {
                        HealthReport::failed(true, false, "Missing price id")
                    }
                    ConfigError::InvalidConfiguration { reason, .. } => {
                        HealthReport::failed(true, true, format!("Invalid price id: {reason}"))
                    }
                };
            }
        };

        let masked = mask_price_id(&config.product_price_id);
        let price = match self
            .prices
            .retrieve_price(&config.secret_credential, &config.product_price_id)
            .await
        {
            Ok(price) => price,
            Err(err) => {
                tracing::warn!(price_id = %masked, %err, "price lookup failed");
                return HealthReport::failed(true, true, format!("Price lookup failed: {err}"))
                    .with_masked_id(masked);
            }
        };

        let price_ok = price.exists && !price.deleted;
        tracing::info!(
            price_id = %masked,
            price_ok,
            active = price.active,
            "billing health check completed"
        );

        HealthReport {
            ok: true,
            has_secret: true,
            has_price_id: true,
            price_ok,
            price_id_masked: masked,
            price_amount: price.unit_amount,
            price_recurring: price.recurring_interval,
            error: None,
        }
    }
}

pub fn mask_price_id(price_id: &str) -> String {
    mask_identifier(price_id, PRICE_ID_PREFIX.len() + PRICE_ID_VISIBLE_CHARS)
}
