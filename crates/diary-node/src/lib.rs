//! # Diary Node Library
//!
//! Exposes the runtime pieces of the diary node for testing.
//! The main entry point is the `main.rs` binary.
//!
//! - `container/` - Wired service, event bus and call handler
//! - `observer/` - Audit logging of bus notifications
//! - `walkthrough/` - The standard client session

pub mod container;
pub mod observer;
pub mod walkthrough;

use std::sync::Arc;

use food_diary::{DiaryConfig, TimeSource};
use shared_bus::EventFilter;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

pub use container::{DiaryContainer, InMemoryDiary};
pub use observer::AuditObserver;
pub use walkthrough::{run_walkthrough, WalkthroughError, WalkthroughReport};

/// The diary node: container plus background observer.
pub struct DiaryNode<C: TimeSource + 'static> {
    /// The wired diary.
    container: DiaryContainer<C>,
    /// Shutdown signal sender.
    shutdown_tx: watch::Sender<bool>,
    /// Shutdown signal receiver.
    shutdown_rx: watch::Receiver<bool>,
    /// Observer task, once started.
    observer: Option<JoinHandle<()>>,
}

impl<C: TimeSource + 'static> DiaryNode<C> {
    /// Create a node with configuration and a time source.
    pub fn new(config: DiaryConfig, clock: Arc<C>) -> Self {
        info!(admin = %config.admin, "Creating diary node");

        let container = DiaryContainer::new(config, clock);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Self {
            container,
            shutdown_tx,
            shutdown_rx,
            observer: None,
        }
    }

    /// Start background tasks.
    ///
    /// Subscribes the audit observer before returning, so every event
    /// published afterwards is seen.
    pub fn start(&mut self) {
        let observer = AuditObserver::new(self.container.bus.subscribe(EventFilter::all()));
        self.observer = Some(tokio::spawn(observer.run(self.shutdown_rx.clone())));
        info!("Diary node started");
    }

    /// The wired diary.
    pub fn container(&self) -> &DiaryContainer<C> {
        &self.container
    }

    /// Shutdown the node gracefully.
    ///
    /// Signals the observer, which logs buffered events and exits.
    pub async fn shutdown(&mut self) {
        info!("Initiating graceful shutdown...");

        if let Err(e) = self.shutdown_tx.send(true) {
            error!("Failed to send shutdown signal: {}", e);
        }

        if let Some(task) = self.observer.take() {
            if let Err(e) = task.await {
                error!("Observer task failed: {}", e);
            }
        }

        info!("Shutdown complete");
    }
}
