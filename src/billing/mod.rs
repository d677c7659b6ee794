pub mod adapters;
pub mod api;
pub mod health;
pub mod models;
pub mod stripe;

pub use adapters::{billing_history_stub, billing_sync_stub};
pub use api::{
    billing_health, billing_history as billing_history_route, billing_sync as billing_sync_route,
};
pub use health::{mask_price_id, BillingHealthChecker, PRICE_ID_VISIBLE_CHARS};
pub use models::{HealthReport, PriceRecord};
pub use stripe::{PriceLookup, StripeClient};
