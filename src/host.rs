//! Contracts for the editor host the tracker runs against.
//!
//! The host owns the text buffers, the status bar, and the event loop; this
//! crate only ever sees it through these traits. Everything here runs on the
//! host's single logical thread.

use std::path::PathBuf;

/// The host's view of the active document at a point in time.
#[derive(Debug, Clone)]
pub struct DocumentSnapshot {
    /// Full document text.
    pub text: String,
    /// Path of the backing file.
    pub path: PathBuf,
    /// Host-declared language identifier, e.g. `"markdown"`.
    pub language_id: String,
}

/// A status-bar slot supplied by the host.
///
/// Dropping the boxed item releases the host resource.
pub trait StatusItem {
    fn set_text(&mut self, text: &str);
    fn show(&mut self);
    fn hide(&mut self);
}

/// Host-level event streams a controller can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostEvent {
    SelectionChanged,
    ActiveEditorChanged,
    DocumentClosed,
}

/// Callback registered for a host event.
pub type HostCallback = Box<dyn FnMut()>;

/// Disposer capability handed back by [`HostEditor::subscribe`].
///
/// Disposing (explicitly or by drop) unregisters the callback. Disposal runs
/// at most once.
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// A subscription with nothing to release, for hosts that cannot
    /// unregister callbacks.
    pub fn noop() -> Self {
        Self { unsubscribe: None }
    }

    pub fn dispose(mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

/// The editor surface an embedding host implements.
pub trait HostEditor {
    /// Snapshot of the currently active document, if any editor has focus.
    fn active_document(&self) -> Option<DocumentSnapshot>;

    /// Allocates a status-bar slot.
    fn create_status_item(&self) -> Box<dyn StatusItem>;

    /// Registers `callback` for `event` and returns the disposer for it.
    fn subscribe(&self, event: HostEvent, callback: HostCallback) -> Subscription;
}
