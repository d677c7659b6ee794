pub mod billing;
pub mod config;
pub mod error;
pub mod notifications;
pub mod redact;
pub mod routes;
pub mod state;

pub use routes::app;
pub use state::AppState;
