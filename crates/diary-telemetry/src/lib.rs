//! # Diary Telemetry
//!
//! Observability for the Food Diary workspace.
//!
//! ## Components
//!
//! - **Logs**: `tracing` events rendered by `tracing-subscriber`, human
//!   readable for development or JSON for log shippers.
//! - **Metrics**: Prometheus counters and histograms in a private registry.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use diary_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     let _guard = init_telemetry(&config).expect("Failed to init telemetry");
//!
//!     // Logs and metrics are now being collected
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `FD_SERVICE_NAME` | `food-diary` | Service name on every log line |
//! | `FD_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `FD_JSON_LOGS` | `false` | Emit JSON instead of pretty logs |
//! | `FD_CONSOLE_OUTPUT` | `true` | Write logs to stdout at all |

#![warn(missing_docs)]

mod config;
mod logging;
pub mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{
    gather_metrics, register_metrics, HistogramTimer, MetricsHandle, ACCESS_DENIED,
    FOOD_ENTRIES_ADDED, OUT_OF_RANGE_REJECTIONS, QUERIES_SERVED, QUERY_SCAN_DURATION,
    THRESHOLD_UPDATES,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The global subscriber could not be installed.
    #[error("Failed to initialize log subscriber: {0}")]
    SubscriberInit(String),

    /// Metrics could not be registered or encoded.
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    /// The configuration is unusable.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging and metrics.
///
/// Returns a guard that should be held for the lifetime of the application.
/// Fails if a global subscriber is already installed.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    // Metrics first so the subscriber's startup line can be counted on
    let metrics_handle = register_metrics()?;

    tracing_setup::init_subscriber(config)?;
    logging::announce(config);

    Ok(TelemetryGuard {
        _metrics: metrics_handle,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    _metrics: MetricsHandle,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!("Shutting down telemetry...");
    }
}

/// Convenience macro for creating a span with diary context.
///
/// # Example
///
/// ```rust,ignore
/// use diary_telemetry::diary_span;
///
/// fn list_entries() {
///     let _span = diary_span!("list_entries", user = %user).entered();
/// }
/// ```
#[macro_export]
macro_rules! diary_span {
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
