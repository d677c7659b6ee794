use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

pub const STRIPE_SECRET_KEY: &str = "STRIPE_SECRET_KEY";
pub const STRIPE_PRICE_ID: &str = "STRIPE_PRICE_ID";
pub const TWILIO_ACCOUNT_SID: &str = "TWILIO_ACCOUNT_SID";
pub const TWILIO_AUTH_TOKEN: &str = "TWILIO_AUTH_TOKEN";
pub const TWILIO_FROM_NUMBER: &str = "TWILIO_FROM_NUMBER";

/// Literal prefix every Stripe price identifier starts with.
pub const PRICE_ID_PREFIX: &str = "price_";

/// Address the HTTP server should bind to. Defaults to `0.0.0.0`.
pub static BIND_ADDRESS: Lazy<String> =
    Lazy::new(|| read_optional_env("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0".to_string()));

/// Port the HTTP server should listen on. Defaults to `3000`.
pub static BIND_PORT: Lazy<u16> = Lazy::new(|| {
    std::env::var("BIND_PORT")
        .ok()
        .and_then(|value| value.trim().parse::<u16>().ok())
        .unwrap_or(3000)
});

/// Base URL of the Stripe REST API. Overridable so staging and tests can point at a stand-in.
pub static STRIPE_API_BASE: Lazy<String> = Lazy::new(|| {
    read_optional_env("STRIPE_API_BASE").unwrap_or_else(|| "https://api.stripe.com".to_string())
});

/// Base URL of the Twilio REST API.
pub static TWILIO_API_BASE: Lazy<String> = Lazy::new(|| {
    read_optional_env("TWILIO_API_BASE").unwrap_or_else(|| "https://api.twilio.com".to_string())
});

/// Request timeout applied by the outbound provider clients. Defaults to 30 seconds.
pub static PROVIDER_HTTP_TIMEOUT_SECS: Lazy<u64> = Lazy::new(|| {
    std::env::var("PROVIDER_HTTP_TIMEOUT_SECS")
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(30)
});

fn read_optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing configuration value `{variable}`")]
    MissingConfiguration { variable: &'static str },
    #[error("invalid configuration value `{variable}`: {reason}")]
    InvalidConfiguration {
        variable: &'static str,
        reason: String,
    },
}

/// Key/value store that provider configuration is read from.
pub trait ConfigSource: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads from the process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvSource;

impl ConfigSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        read_optional_env(key)
    }
}

/// Explicit value map, used where process-wide variables are not wanted.
#[derive(Debug, Default, Clone)]
pub struct MapSource {
    values: HashMap<String, String>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl<K, V> FromIterator<(K, V)> for MapSource
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl ConfigSource for MapSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Payment,
    Messaging,
}

#[derive(Clone, PartialEq, Eq)]
pub struct PaymentConfiguration {
    pub secret_credential: String,
    pub product_price_id: String,
}

#[derive(Clone, PartialEq, Eq)]
pub struct MessagingConfiguration {
    pub account_id: String,
    pub auth_token: String,
    pub from_address: String,
}

// Credentials stay out of Debug output so they never reach the logs.
impl fmt::Debug for PaymentConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentConfiguration")
            .field("secret_credential", &"<redacted>")
            .field("product_price_id", &"<redacted>")
            .finish()
    }
}

impl fmt::Debug for MessagingConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessagingConfiguration")
            .field("account_id", &self.account_id)
            .field("auth_token", &"<redacted>")
            .field("from_address", &self.from_address)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderConfiguration {
    Payment(PaymentConfiguration),
    Messaging(MessagingConfiguration),
}

/// Single entry point for third-party provider configuration.
///
/// Every call reads the source afresh; nothing is cached between invocations.
#[derive(Clone, Copy)]
pub struct ConfigResolver<'a> {
    source: &'a dyn ConfigSource,
}

impl<'a> ConfigResolver<'a> {
    pub fn new(source: &'a dyn ConfigSource) -> Self {
        Self { source }
    }

    pub fn resolve(&self, kind: ProviderKind) -> Result<ProviderConfiguration, ConfigError> {
        match kind {
            ProviderKind::Payment => self.payment().map(ProviderConfiguration::Payment),
            ProviderKind::Messaging => self.messaging().map(ProviderConfiguration::Messaging),
        }
    }

    pub fn payment(&self) -> Result<PaymentConfiguration, ConfigError> {
        let secret_credential = self.require(STRIPE_SECRET_KEY)?;
        let product_price_id = self.require(STRIPE_PRICE_ID)?;
        if !product_price_id.starts_with(PRICE_ID_PREFIX) {
            return Err(ConfigError::InvalidConfiguration {
                variable: STRIPE_PRICE_ID,
                reason: format!("expected identifier starting with `{PRICE_ID_PREFIX}`"),
            });
        }
        Ok(PaymentConfiguration {
            secret_credential,
            product_price_id,
        })
    }

    /// All three messaging values or an error naming the first one absent.
    pub fn messaging(&self) -> Result<MessagingConfiguration, ConfigError> {
        Ok(MessagingConfiguration {
            account_id: self.require(TWILIO_ACCOUNT_SID)?,
            auth_token: self.require(TWILIO_AUTH_TOKEN)?,
            from_address: self.require(TWILIO_FROM_NUMBER)?,
        })
    }

    pub fn is_present(&self, variable: &str) -> bool {
        self.source.get(variable).is_some()
    }

    fn require(&self, variable: &'static str) -> Result<String, ConfigError> {
        self.source
            .get(variable)
            .ok_or(ConfigError::MissingConfiguration { variable })
    }
}
