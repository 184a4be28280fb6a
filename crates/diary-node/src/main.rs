//! # Food Diary Node
//!
//! Runs the food diary in-process and drives it through the standard
//! client session.
//!
//! ## Startup Sequence
//!
//! 1. Initialize telemetry (logs + metrics) from the environment
//! 2. Load the diary configuration (`FD_ADMIN_ADDRESS`, `FD_EVENT_CAPACITY`)
//! 3. Wire stores, event bus and call handler
//! 4. Start the audit observer
//! 5. Run the walkthrough as the admin
//! 6. Shut down, dumping metrics at debug level

use std::sync::Arc;

use anyhow::{Context, Result};
use diary_telemetry::{gather_metrics, init_telemetry, TelemetryConfig};
use food_diary::{ConfigError, DiaryConfig, SystemTimeSource, TimeSource};
use shared_types::Address;
use tracing::{debug, info, warn};

use diary_node::{run_walkthrough, DiaryNode};

/// Admin used when `FD_ADMIN_ADDRESS` is not set.
const DEV_ADMIN: Address = Address::repeat_byte(0xad);

/// Load configuration from the environment.
fn load_config() -> Result<DiaryConfig> {
    match DiaryConfig::from_env() {
        Ok(config) => Ok(config),
        Err(ConfigError::MissingVar(var)) => {
            warn!(
                var,
                admin = %DEV_ADMIN,
                "Admin address not set, using development admin"
            );
            Ok(DiaryConfig::new(DEV_ADMIN))
        }
        Err(e) => Err(e).context("Invalid diary configuration"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let telemetry = TelemetryConfig::from_env();
    let _guard = init_telemetry(&telemetry).context("Failed to initialize telemetry")?;

    let config = load_config()?;
    let admin = config.admin;

    let clock = Arc::new(SystemTimeSource);
    let mut node = DiaryNode::new(config, Arc::clone(&clock));
    node.start();

    info!("===========================================");
    info!("  Food Diary Node v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    // Logged a minute after eating, so the entry falls inside [now - 7d, now)
    let entry_time = clock.now().saturating_sub(60);
    let report = run_walkthrough(&node.container().handler, admin, entry_time)
        .await
        .context("Walkthrough failed")?;

    info!(
        entries = report.entries.len(),
        last_week = report.weekly.last_week,
        week_before = report.weekly.week_before,
        average_7d = report.average_7d,
        threshold = report.new_threshold,
        "Walkthrough complete"
    );

    node.shutdown().await;

    let stats = node.container().service.stats();
    info!(
        entries_appended = stats.entries_appended,
        thresholds_set = stats.thresholds_set,
        queries_served = stats.queries_served,
        rejected = stats.rejected_requests(),
        "Service statistics"
    );

    match gather_metrics() {
        Ok(text) => debug!("Metrics:\n{}", text),
        Err(e) => warn!("Failed to gather metrics: {}", e),
    }

    Ok(())
}
