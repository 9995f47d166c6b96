//! Bridges host editor lifecycle events to the word counter.

use std::cell::RefCell;
use std::rc::Rc;

use crate::counter::WordCounter;
use crate::host::{HostEditor, HostEvent, Subscription};

// Set to true to log every dispatched host event
const ENABLE_LOGS: bool = true;

use crate::log_info;

/// Subscribes the word counter to the host's event streams.
///
/// Selection changes and editor switches recompute the count; a document
/// close flushes the buffered records to the sender. Disposal releases all
/// three subscriptions as one unit.
pub struct Controller {
    subscriptions: Vec<Subscription>,
}

impl Controller {
    pub fn new(host: Rc<dyn HostEditor>, counter: Rc<RefCell<WordCounter>>) -> Self {
        counter.borrow_mut().update_word_count();

        let mut subscriptions = Vec::with_capacity(3);
        for event in [HostEvent::SelectionChanged, HostEvent::ActiveEditorChanged] {
            let counter = Rc::clone(&counter);
            subscriptions.push(host.subscribe(
                event,
                Box::new(move || {
                    log_info!("edit event received");
                    counter.borrow_mut().update_word_count();
                }),
            ));
        }
        {
            let counter = Rc::clone(&counter);
            subscriptions.push(host.subscribe(
                HostEvent::DocumentClosed,
                Box::new(move || {
                    log_info!("close event received");
                    counter.borrow_mut().send_event();
                }),
            ));
        }

        // Refresh for the file that is already open.
        counter.borrow_mut().update_word_count();

        Self { subscriptions }
    }

    /// Drops every event subscription as one unit.
    pub fn dispose(&mut self) {
        for subscription in self.subscriptions.drain(..) {
            subscription.dispose();
        }
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{SettingsStore, TelemetrySettings};
    use crate::telemetry::TelemetrySender;
    use crate::test_utils::test_helpers::FakeHost;
    use std::sync::Arc;

    fn tracked_counter(host: &Rc<FakeHost>) -> Rc<RefCell<WordCounter>> {
        let settings = Arc::new(SettingsStore::in_memory(TelemetrySettings::default()));
        let sender = TelemetrySender::new(settings, None);
        Rc::new(RefCell::new(WordCounter::new(
            Rc::clone(host) as Rc<dyn HostEditor>,
            sender,
        )))
    }

    #[test]
    fn construction_updates_twice_for_an_open_markdown_document() {
        let host = FakeHost::new();
        host.set_document(Some(FakeHost::markdown_document("/notes/a.md", "one two")));
        let counter = tracked_counter(&host);

        let _controller = Controller::new(Rc::clone(&host) as Rc<dyn HostEditor>, Rc::clone(&counter));

        assert_eq!(counter.borrow().events().len(), 2);
    }

    #[test]
    fn selection_and_editor_events_recompute_the_count() {
        let host = FakeHost::new();
        host.set_document(Some(FakeHost::markdown_document("/notes/a.md", "one two")));
        let counter = tracked_counter(&host);
        let _controller = Controller::new(Rc::clone(&host) as Rc<dyn HostEditor>, Rc::clone(&counter));

        host.emit(HostEvent::SelectionChanged);
        host.emit(HostEvent::ActiveEditorChanged);

        assert_eq!(counter.borrow().events().len(), 4);
    }

    #[test]
    fn document_close_flushes_the_buffer() {
        let host = FakeHost::new();
        host.set_document(Some(FakeHost::markdown_document("/notes/a.md", "one two")));
        let counter = tracked_counter(&host);
        let _controller = Controller::new(Rc::clone(&host) as Rc<dyn HostEditor>, Rc::clone(&counter));
        assert_eq!(counter.borrow().events().len(), 2);

        host.emit(HostEvent::DocumentClosed);

        assert!(counter.borrow().events().is_empty());
    }

    #[test]
    fn dispose_unregisters_every_listener() {
        let host = FakeHost::new();
        host.set_document(Some(FakeHost::markdown_document("/notes/a.md", "one two")));
        let counter = tracked_counter(&host);
        let mut controller =
            Controller::new(Rc::clone(&host) as Rc<dyn HostEditor>, Rc::clone(&counter));
        assert_eq!(host.listener_count(), 3);

        controller.dispose();
        assert_eq!(host.listener_count(), 0);

        // Events after disposal reach nothing.
        host.emit(HostEvent::SelectionChanged);
        assert_eq!(counter.borrow().events().len(), 2);
    }

    #[test]
    fn dropping_the_controller_unregisters_listeners() {
        let host = FakeHost::new();
        let counter = tracked_counter(&host);
        {
            let _controller =
                Controller::new(Rc::clone(&host) as Rc<dyn HostEditor>, Rc::clone(&counter));
            assert_eq!(host.listener_count(), 3);
        }
        assert_eq!(host.listener_count(), 0);
    }
}
