use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use crate::billing::{PriceLookup, StripeClient};
use crate::config::{
    ConfigSource, EnvSource, PROVIDER_HTTP_TIMEOUT_SECS, STRIPE_API_BASE, TWILIO_API_BASE,
};
use crate::notifications::{MessageSender, TwilioClient};

/// Handles shared by every request. Holds no mutable state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<dyn ConfigSource>,
    pub prices: Arc<dyn PriceLookup>,
    pub sender: Arc<dyn MessageSender>,
}

impl AppState {
    pub fn new(
        config: Arc<dyn ConfigSource>,
        prices: Arc<dyn PriceLookup>,
        sender: Arc<dyn MessageSender>,
    ) -> Self {
        Self {
            config,
            prices,
            sender,
        }
    }

    /// Production wiring: process environment plus real provider clients.
    pub fn from_env() -> Result<Self> {
        Self::with_provider_bases(
            Arc::new(EnvSource),
            STRIPE_API_BASE.as_str(),
            TWILIO_API_BASE.as_str(),
        )
    }

    pub fn with_provider_bases(
        config: Arc<dyn ConfigSource>,
        stripe_base: &str,
        twilio_base: &str,
    ) -> Result<Self> {
        let timeout = Duration::from_secs(*PROVIDER_HTTP_TIMEOUT_SECS);
        Ok(Self::new(
            config,
            Arc::new(StripeClient::new(stripe_base, timeout)?),
            Arc::new(TwilioClient::new(twilio_base, timeout)?),
        ))
    }
}
