//! # Food Diary Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Criterion benchmarks for ledger scans
//! └── src/
//!     └── integration/  # Cross-crate flows
//!         ├── scenario.rs     # The standard client session, end to end
//!         ├── access.rs       # Access policy through every surface
//!         ├── windows.rs      # Window boundaries and properties
//!         ├── events.rs       # Notification ordering and filtering
//!         ├── telemetry.rs    # Prometheus collectors driven by calls
//!         └── concurrency.rs  # Parallel callers
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p fd-tests
//!
//! # By category
//! cargo test -p fd-tests integration::windows::
//!
//! # Benchmarks
//! cargo bench -p fd-tests
//! ```

#![allow(unused_variables)]
#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
