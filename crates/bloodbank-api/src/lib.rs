//! HTTP API for the blood bank service

pub mod config;
pub mod handlers;
pub mod logging;
pub mod router;
pub mod state;
pub mod types;

pub use config::{AppConfig, StoreBackend};
pub use logging::{LoggingConfig, init_default_logging, init_development_logging};
pub use router::{api_router, build_router};
pub use state::AppState;
