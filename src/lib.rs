mod controller;
mod counter;
mod host;
mod models;
mod settings;
mod telemetry;
pub mod test_utils;
mod utils;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

pub use controller::Controller;
pub use counter::{count_words, normalize, EventBuffer, WordCounter};
pub use host::{DocumentSnapshot, HostCallback, HostEditor, HostEvent, StatusItem, Subscription};
pub use models::{format_timestamp, UsageRecord};
pub use settings::{SettingsStore, TelemetrySettings};
pub use telemetry::TelemetrySender;

/// A live tracker instance.
///
/// Holds the controller's event subscriptions and the word counter (which in
/// turn owns the status item and the telemetry worker). Dropping the handle
/// tears everything down; [`Extension::deactivate`] does the same
/// explicitly.
pub struct Extension {
    controller: Controller,
    counter: Rc<RefCell<WordCounter>>,
}

impl Extension {
    /// Unsubscribes from the host and releases the status indicator.
    /// Queued telemetry batches are still delivered before the worker exits.
    pub fn deactivate(mut self) {
        self.controller.dispose();
        self.counter.borrow_mut().dispose();
    }
}

/// Wires a word counter and its controller against the given host.
///
/// The returned handle must be kept alive for as long as the host is
/// running; the host calls back into it through the subscriptions
/// registered here.
pub fn activate(host: Rc<dyn HostEditor>, settings: Arc<SettingsStore>) -> Extension {
    log::info!("word count tracker is now active");

    let sender = TelemetrySender::new(settings, None);
    let counter = Rc::new(RefCell::new(WordCounter::new(Rc::clone(&host), sender)));
    let controller = Controller::new(host, Rc::clone(&counter));

    Extension { controller, counter }
}

/// Initializes logging for hosts that do not bring their own logger
/// (reads RUST_LOG env var).
pub fn init_logging() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_helpers::{serve_one, FakeHost};
    use std::net::TcpListener;

    #[test]
    fn full_session_delivers_edited_document_usage_on_close() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/events", listener.local_addr().unwrap());
        let server = serve_one(listener);

        let settings = Arc::new(SettingsStore::in_memory(TelemetrySettings {
            url,
            email: "writer@example.com".into(),
            ..TelemetrySettings::default()
        }));

        let host = FakeHost::new();
        host.set_document(Some(FakeHost::markdown_document(
            "/notes/draft.md",
            "Hello   world\n\nfoo",
        )));

        let extension = activate(Rc::clone(&host) as Rc<dyn HostEditor>, settings);

        // One edit, then the document closes.
        host.emit(HostEvent::SelectionChanged);
        host.emit(HostEvent::DocumentClosed);
        extension.deactivate();

        let body = server.join().unwrap();
        let batch: Vec<UsageRecord> = serde_json::from_str(&body).unwrap();
        // Two records from activation plus one from the edit.
        assert_eq!(batch.len(), 3);
        assert!(batch.iter().all(|record| record.word_count == 3));
        assert!(batch
            .iter()
            .all(|record| record.user_id == "writer@example.com"));
        let first_hash = &batch[0].filename_hash;
        assert!(batch
            .iter()
            .all(|record| &record.filename_hash == first_hash));
    }

    #[test]
    fn deactivation_with_nothing_buffered_is_clean() {
        let settings = Arc::new(SettingsStore::in_memory(TelemetrySettings::default()));
        let host = FakeHost::new();
        let extension = activate(Rc::clone(&host) as Rc<dyn HostEditor>, settings);
        assert_eq!(host.listener_count(), 3);

        extension.deactivate();
        assert_eq!(host.listener_count(), 0);
        assert!(host.status.borrow().disposed);
    }
}
