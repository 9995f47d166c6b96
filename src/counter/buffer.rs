//! In-memory buffer of usage records awaiting delivery.

use crate::models::UsageRecord;

/// Ordered, append-only sequence of usage records.
///
/// Lives entirely in memory; records still buffered at teardown are lost.
/// Handing records to the sender goes through [`EventBuffer::drain`], which
/// transfers ownership, so a record can be sent at most once.
#[derive(Debug, Default)]
pub struct EventBuffer {
    records: Vec<UsageRecord>,
}

impl EventBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: UsageRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[UsageRecord] {
        &self.records
    }

    /// Removes and returns every buffered record, oldest first.
    pub fn drain(&mut self) -> Vec<UsageRecord> {
        std::mem::take(&mut self.records)
    }
}
