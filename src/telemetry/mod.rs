//! Delivery of buffered usage records to the collection endpoint.

mod worker;

use std::sync::{mpsc, Arc};
use std::thread::JoinHandle;

use crate::models::UsageRecord;
use crate::settings::SettingsStore;

// Set to true to log dropped batches on the send path
const ENABLE_LOGS: bool = true;

use crate::log_warn;

/// Fire-and-forget sender for usage record batches.
///
/// Batches are handed to a background worker over a channel. The worker owns
/// the HTTP client and delivers batches strictly one at a time, so two sends
/// are never in flight at once; a close event firing during a delivery
/// queues behind it instead of racing it.
pub struct TelemetrySender {
    batch_tx: Option<mpsc::Sender<Vec<UsageRecord>>>,
    worker: Option<JoinHandle<()>>,
}

impl TelemetrySender {
    /// `host` overrides the configured destination URL when present;
    /// otherwise the URL is read from the settings store at send time.
    pub fn new(settings: Arc<SettingsStore>, host: Option<String>) -> Self {
        let (batch_tx, batch_rx) = mpsc::channel();
        let worker = worker::spawn(settings, host, batch_rx);
        Self {
            batch_tx: Some(batch_tx),
            worker: Some(worker),
        }
    }

    /// Queues a batch for delivery and returns immediately.
    ///
    /// Empty batches are skipped. Delivery failures are logged by the worker
    /// and never surfaced here.
    pub fn send(&self, records: Vec<UsageRecord>) {
        if records.is_empty() {
            return;
        }
        let Some(batch_tx) = &self.batch_tx else {
            return;
        };
        if batch_tx.send(records).is_err() {
            log_warn!("telemetry worker is gone, dropping batch");
        }
    }
}

impl Drop for TelemetrySender {
    fn drop(&mut self) {
        // Closing the channel lets the worker drain queued batches and exit;
        // an in-flight send always runs to completion or failure.
        self.batch_tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
