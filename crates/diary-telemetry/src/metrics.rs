//! Prometheus metrics for the food diary.
//!
//! All metrics follow the naming convention: `fd_<area>_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: Monotonically increasing value (e.g., entries added)
//! - **Histogram**: Distribution of values (e.g., ledger scan duration)

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Encoder, Histogram, HistogramOpts, HistogramVec, IntCounter,
    IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Metrics registry for the diary
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // LEDGER
    // =========================================================================

    /// Total food entries appended
    pub static ref FOOD_ENTRIES_ADDED: IntCounter = IntCounter::new(
        "fd_ledger_entries_added_total",
        "Total number of food entries appended across all users"
    ).expect("metric creation failed");

    /// Inputs rejected for exceeding a field width
    pub static ref OUT_OF_RANGE_REJECTIONS: IntCounterVec = IntCounterVec::new(
        Opts::new("fd_ledger_out_of_range_total", "Inputs rejected for exceeding their width"),
        &["field"]
    ).expect("metric creation failed");

    // =========================================================================
    // THRESHOLDS
    // =========================================================================

    /// Total threshold writes
    pub static ref THRESHOLD_UPDATES: IntCounter = IntCounter::new(
        "fd_thresholds_updates_total",
        "Total number of daily calorie threshold writes"
    ).expect("metric creation failed");

    // =========================================================================
    // QUERIES & ACCESS
    // =========================================================================

    /// Queries answered, by query name
    pub static ref QUERIES_SERVED: IntCounterVec = IntCounterVec::new(
        Opts::new("fd_queries_total", "Read queries answered"),
        &["query"]
    ).expect("metric creation failed");

    /// Time spent scanning a ledger for a windowed query
    pub static ref QUERY_SCAN_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "fd_query_scan_duration_seconds",
            "Time spent scanning a ledger for a windowed query"
        ).buckets(exponential_buckets(0.000_01, 2.0, 16).expect("valid buckets")),
        &["query"]
    ).expect("metric creation failed");

    /// Calls denied by the access controller, by operation
    pub static ref ACCESS_DENIED: IntCounterVec = IntCounterVec::new(
        Opts::new("fd_access_denied_total", "Calls denied by the access controller"),
        &["operation"]
    ).expect("metric creation failed");
}

/// Handle to the registered metrics
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metrics with the diary registry.
///
/// Safe to call more than once; already registered collectors are skipped.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Ledger
        Box::new(FOOD_ENTRIES_ADDED.clone()),
        Box::new(OUT_OF_RANGE_REJECTIONS.clone()),
        // Thresholds
        Box::new(THRESHOLD_UPDATES.clone()),
        // Queries & access
        Box::new(QUERIES_SERVED.clone()),
        Box::new(QUERY_SCAN_DURATION.clone()),
        Box::new(ACCESS_DENIED.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn gather_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }

    /// Start a timer for one label of a histogram family.
    pub fn labelled(histogram: &HistogramVec, label: &str) -> Self {
        Self::new(&histogram.with_label_values(&[label]))
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        self.histogram.observe(duration);
    }
}
