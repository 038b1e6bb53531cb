// ABOUTME: Logging configuration and structured logging setup for the nutrition facts server
// ABOUTME: Configures log levels and formatters, and records upstream and normalization events
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Structured logging
//!
//! Output format and detail are chosen from the environment at startup:
//!
//! | Variable | Effect |
//! |---|---|
//! | `RUST_LOG` | level or full filter directive |
//! | `LOG_FORMAT` | `json`, `pretty` (default) or `compact` |
//! | `LOG_INCLUDE_LOCATION`, `LOG_INCLUDE_THREAD`, `LOG_INCLUDE_SPANS` | extra detail when set |
//! | `ENVIRONMENT` | `production` turns every detail on |

use crate::constants::service_names;
use anyhow::Result;
use std::env;
use std::io;
use std::time::Duration;
use tracing::{debug, info, warn};
use tracing_subscriber::{
    filter::Directive,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Targets that are chatty at debug level and only interesting when they fail
const QUIET_TARGETS: [&str; 4] = ["hyper=warn", "hyper::proto=warn", "reqwest=warn", "tower_http=info"];

/// Crates whose events follow the configured level
const APP_TARGETS: [&str; 2] = ["nutrition_facts_server", "nutrition_core"];

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per event, for log shippers
    Json,
    /// Multi-field human readable output
    #[default]
    Pretty,
    /// Single-line output without targets
    Compact,
}

impl LogFormat {
    /// Parse the `LOG_FORMAT` value, defaulting to pretty output
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

/// Optional detail attached to each event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogDetail {
    /// Source file and line
    pub location: bool,
    /// Thread id and name
    pub thread: bool,
    /// Span open and close events
    pub spans: bool,
}

impl LogDetail {
    /// Everything on
    #[must_use]
    pub const fn full() -> Self {
        Self {
            location: true,
            thread: true,
            spans: true,
        }
    }

    fn from_env() -> Self {
        let flag = |key: &str| env::var(key).is_ok();
        Self {
            location: flag("LOG_INCLUDE_LOCATION"),
            thread: flag("LOG_INCLUDE_THREAD"),
            spans: flag("LOG_INCLUDE_SPANS"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Level or filter directive
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Optional per-event detail
    pub detail: LogDetail,
    /// Service name reported at startup
    pub service_name: String,
    /// Service version reported at startup
    pub service_version: String,
    /// Deployment environment reported at startup
    pub environment: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::default(),
            detail: LogDetail::default(),
            service_name: service_names::NUTRITION_FACTS_SERVER.to_owned(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment: "development".to_owned(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let environment = env::var("ENVIRONMENT").unwrap_or(defaults.environment);
        let detail = if environment == "production" {
            LogDetail::full()
        } else {
            LogDetail::from_env()
        };

        Self {
            level: env::var("RUST_LOG").unwrap_or(defaults.level),
            format: env::var("LOG_FORMAT").map_or(defaults.format, |raw| LogFormat::parse(&raw)),
            detail,
            service_name: env::var("SERVICE_NAME").unwrap_or(defaults.service_name),
            service_version: env::var("SERVICE_VERSION").unwrap_or(defaults.service_version),
            environment,
        }
    }

    /// Filter with the configured level for this service and fixed levels for HTTP internals
    fn env_filter(&self) -> EnvFilter {
        let app_directives = APP_TARGETS.map(|target| format!("{target}={}", self.level));

        QUIET_TARGETS
            .iter()
            .map(|directive| (*directive).to_owned())
            .chain(app_directives)
            .filter_map(|directive| directive.parse::<Directive>().ok())
            .fold(EnvFilter::new(&self.level), EnvFilter::add_directive)
    }

    /// Formatting layer for the selected output format
    fn output_layer(&self) -> Box<dyn Layer<Registry> + Send + Sync> {
        let span_events = if self.detail.spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        let layer = fmt::layer()
            .with_writer(io::stdout)
            .with_file(self.detail.location)
            .with_line_number(self.detail.location)
            .with_thread_ids(self.detail.thread)
            .with_thread_names(self.detail.thread)
            .with_span_events(span_events);

        match self.format {
            LogFormat::Json => layer.json().boxed(),
            LogFormat::Pretty => layer.boxed(),
            LogFormat::Compact => layer.compact().with_target(false).boxed(),
        }
    }

    /// Initialize the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        tracing_subscriber::registry()
            .with(self.output_layer())
            .with(self.env_filter())
            .try_init()?;

        info!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            environment = %self.environment,
            log.level = %self.level,
            log.format = ?self.format,
            log.location = self.detail.location,
            log.thread = self.detail.thread,
            log.spans = self.detail.spans,
            "Logging initialized"
        );
        Ok(())
    }
}

/// Initialize logging from environment
///
/// # Errors
///
/// Returns an error if logging initialization fails
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}

/// Structured events for upstream lookups and record normalization
pub struct AppLogger;

impl AppLogger {
    /// Record one request to the upstream food database
    pub fn log_upstream_call(operation: &str, target: &str, success: bool, duration: Duration) {
        let duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        if success {
            info!(
                upstream.service = service_names::USDA_API,
                upstream.operation = operation,
                upstream.target = target,
                upstream.duration_ms = duration_ms,
                "Upstream call succeeded"
            );
        } else {
            warn!(
                upstream.service = service_names::USDA_API,
                upstream.operation = operation,
                upstream.target = target,
                upstream.duration_ms = duration_ms,
                "Upstream call failed"
            );
        }
    }

    /// Record a lookup answered from the response cache
    pub fn log_cache_hit(cache: &str, key: &str) {
        debug!(cache.name = cache, cache.key = key, "Cache hit");
    }

    /// Record the result of normalizing one food record
    pub fn log_normalization(fdc_id: u64, data_type: &str, outcome: &str, row_count: usize) {
        debug!(
            food.fdc_id = fdc_id,
            food.data_type = data_type,
            normalize.outcome = outcome,
            normalize.rows = row_count,
            "Food record normalized"
        );
    }

    /// Record a food record the normalizer could not interpret
    pub fn log_normalization_failure(fdc_id: u64, error: &str) {
        warn!(food.fdc_id = fdc_id, normalize.error = error, "Food record rejected");
    }
}
