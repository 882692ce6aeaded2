//! Logging and tracing subscriber setup

use std::env;

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::{self};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Logging configuration for the API server
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level for the blood bank crates
    pub level: Level,
    /// Whether to include file and line numbers
    pub include_location: bool,
    /// Whether to include thread IDs
    pub include_thread_ids: bool,
    /// Whether to use JSON formatting
    pub json_format: bool,
    /// Whether to log spans (enter/exit)
    pub log_spans: bool,
    /// Environment filter string, overrides `level` when set
    pub env_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            include_location: false,
            include_thread_ids: false,
            json_format: false,
            log_spans: false,
            env_filter: None,
        }
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name).ok().and_then(|s| s.parse().ok()).unwrap_or(default)
}

impl LoggingConfig {
    /// Create a logging configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            level: env::var("LOG_LEVEL")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.level),
            include_location: env_flag("LOG_INCLUDE_LOCATION", defaults.include_location),
            include_thread_ids: env_flag("LOG_INCLUDE_THREAD_IDS", defaults.include_thread_ids),
            json_format: env_flag("LOG_JSON_FORMAT", defaults.json_format),
            log_spans: env_flag("LOG_SPANS", defaults.log_spans),
            env_filter: env::var("RUST_LOG").ok(),
        }
    }

    /// Initialize the global tracing subscriber
    pub fn init_tracing(&self) -> Result<()> {
        let env_filter = self.build_env_filter()?;
        let span_events = if self.log_spans { FmtSpan::ENTER | FmtSpan::EXIT } else { FmtSpan::NONE };

        let fmt_layer = if self.json_format {
            fmt::layer()
                .json()
                .with_current_span(true)
                .with_file(self.include_location)
                .with_line_number(self.include_location)
                .with_thread_ids(self.include_thread_ids)
                .with_target(true)
                .with_span_events(span_events)
                .boxed()
        } else {
            fmt::layer()
                .pretty()
                .with_file(self.include_location)
                .with_line_number(self.include_location)
                .with_thread_ids(self.include_thread_ids)
                .with_target(false)
                .with_span_events(span_events)
                .boxed()
        };

        Registry::default().with(env_filter).with(fmt_layer).try_init()?;
        Ok(())
    }

    fn build_env_filter(&self) -> Result<EnvFilter> {
        let filter = if let Some(ref env_filter) = self.env_filter {
            EnvFilter::try_new(env_filter)?
        } else {
            EnvFilter::default()
                .add_directive(format!("bloodbank_api={}", self.level).parse()?)
                .add_directive(format!("bloodbank_services={}", self.level).parse()?)
                .add_directive("tower_http=debug".parse()?)
                .add_directive("axum=info".parse()?)
                .add_directive("mongodb=info".parse()?)
        };

        Ok(filter)
    }
}

/// Initialize logging from the environment
pub fn init_default_logging() -> Result<()> {
    LoggingConfig::from_env().init_tracing()
}

/// Initialize verbose pretty logging for local development
pub fn init_development_logging() -> Result<()> {
    let mut config = LoggingConfig::from_env();
    config.json_format = false;
    config.include_location = true;
    config.log_spans = true;
    config.level = Level::DEBUG;
    config.init_tracing()
}
