use serde::Serialize;

/// Price as reported by the payment provider. Read-only, discarded once the
/// health report has been built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRecord {
    pub exists: bool,
    pub deleted: bool,
    pub active: bool,
    /// Smallest currency unit, e.g. cents.
    pub unit_amount: Option<i64>,
    /// `month`, `year`, ... or `None` for one-time prices.
    pub recurring_interval: Option<String>,
}

/// key: billing-health -> redacted status report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub ok: bool,
    pub has_secret: bool,
    pub has_price_id: bool,
    pub price_ok: bool,
    pub price_id_masked: String,
    pub price_amount: Option<i64>,
    pub price_recurring: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthReport {
    pub fn failed(has_secret: bool, has_price_id: bool, error: impl Into<String>) -> Self {
        Self {
            ok: false,
            has_secret,
            has_price_id,
            price_ok: false,
            price_id_masked: String::new(),
            price_amount: None,
            price_recurring: None,
            error: Some(error.into()),
        }
    }

    pub fn with_masked_id(mut self, masked: String) -> Self {
        self.price_id_masked = masked;
        self
    }
}
