//! Word counting, status display, and usage record accumulation.

mod algorithm;
mod buffer;

pub use algorithm::{count_words, normalize};
pub use buffer::EventBuffer;

use std::rc::Rc;

use chrono::{DateTime, Utc};
use sha1::{Digest, Sha1};

use crate::host::{DocumentSnapshot, HostEditor, StatusItem};
use crate::models::{format_timestamp, UsageRecord};
use crate::telemetry::TelemetrySender;

// Set to true to log the status line on every recomputation
const ENABLE_LOGS: bool = true;

use crate::log_info;

const MARKDOWN_LANGUAGE_ID: &str = "markdown";

/// Tracks the active markdown document: keeps the status indicator current
/// and appends one usage record per recomputation.
pub struct WordCounter {
    host: Rc<dyn HostEditor>,
    status_item: Option<Box<dyn StatusItem>>,
    file_hash: Option<String>,
    events: EventBuffer,
    sender: TelemetrySender,
}

impl WordCounter {
    pub fn new(host: Rc<dyn HostEditor>, sender: TelemetrySender) -> Self {
        Self {
            host,
            status_item: None,
            file_hash: None,
            events: EventBuffer::new(),
            sender,
        }
    }

    /// Recomputes the word count for the active document.
    ///
    /// Non-markdown documents (and no document at all) hide the indicator
    /// and produce no record. For markdown, the indicator is updated and a
    /// record is appended to the buffer.
    pub fn update_word_count(&mut self) {
        // Create as needed
        if self.status_item.is_none() {
            self.status_item = Some(self.host.create_status_item());
        }

        let Some(document) = self.host.active_document() else {
            self.hide_status();
            return;
        };

        if document.language_id != MARKDOWN_LANGUAGE_ID {
            self.hide_status();
            return;
        }

        let word_count = algorithm::count_words(&document.text);
        let char_count = document.text.chars().count() as u64;
        let timestamp = Utc::now();
        let filename_hash = self.file_hash_for(&document);

        let status_text = display_text(
            word_count,
            &document.language_id,
            char_count,
            &timestamp,
            &filename_hash,
        );
        log_info!("{status_text}");
        if let Some(item) = self.status_item.as_mut() {
            item.set_text(&status_text);
            item.show();
        }

        self.events.append(UsageRecord {
            word_count,
            language_id: document.language_id,
            char_count,
            timestamp,
            filename_hash,
            user_id: String::new(),
        });
    }

    /// Hands every buffered record to the telemetry sender.
    ///
    /// Fire-and-forget: the buffer is drained, ownership moves to the
    /// sender's queue, and delivery failures are logged there.
    pub fn send_event(&mut self) {
        let records = self.events.drain();
        if records.is_empty() {
            return;
        }
        self.sender.send(records);
    }

    /// Releases the status indicator.
    pub fn dispose(&mut self) {
        self.status_item = None;
    }

    pub(crate) fn events(&self) -> &EventBuffer {
        &self.events
    }

    fn hide_status(&mut self) {
        if let Some(item) = self.status_item.as_mut() {
            item.hide();
        }
    }

    // The hash is computed on the first markdown update and reused for the
    // counter's whole lifetime, even if another file becomes active.
    fn file_hash_for(&mut self, document: &DocumentSnapshot) -> String {
        self.file_hash
            .get_or_insert_with(|| {
                let mut hasher = Sha1::new();
                hasher.update(document.path.to_string_lossy().as_bytes());
                format!("{:x}", hasher.finalize())
            })
            .clone()
    }
}

fn display_text(
    word_count: u64,
    language_id: &str,
    char_count: u64,
    timestamp: &DateTime<Utc>,
    filename_hash: &str,
) -> String {
    let words = if word_count == 1 {
        "1 Word".to_string()
    } else {
        format!("{word_count} Words")
    };
    format!(
        "language: {language_id} {words} {char_count} Characters {} {filename_hash}",
        format_timestamp(timestamp)
    )
}
