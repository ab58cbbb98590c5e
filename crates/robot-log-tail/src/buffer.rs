//! Bounded buffer holding the most recent log entries

use crate::types::LogEntry;

/// Number of entries kept on screen
pub const MAX_LOG_LINES: usize = 500;

/// Fixed-capacity ring of log entries in arrival order
///
/// Appending past capacity evicts the oldest entries. Every mutation bumps
/// [`revision`](Self::revision) so observers can cheaply detect changes.
#[derive(Debug, Clone)]
pub struct LogBuffer {
    slots: Vec<LogEntry>,
    /// Index of the oldest entry once the ring is full
    head: usize,
    capacity: usize,
    revision: u64,
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new(MAX_LOG_LINES)
    }
}

impl LogBuffer {
    /// Create an empty buffer (capacity is at least 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: Vec::with_capacity(capacity),
            head: 0,
            capacity,
            revision: 0,
        }
    }

    /// Append a batch, keeping only the newest `capacity` entries overall
    pub fn append(&mut self, batch: impl IntoIterator<Item = LogEntry>) {
        let batch: Vec<LogEntry> = batch.into_iter().collect();
        if batch.is_empty() {
            return;
        }

        let skip = batch.len().saturating_sub(self.capacity);
        for entry in batch.into_iter().skip(skip) {
            if self.slots.len() < self.capacity {
                self.slots.push(entry);
            } else {
                self.slots[self.head] = entry;
                self.head = (self.head + 1) % self.capacity;
            }
        }

        self.revision += 1;
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = 0;
        self.revision += 1;
    }

    /// Entries from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        let (newer, older) = self.slots.split_at(self.head);
        older.iter().chain(newer.iter())
    }

    pub fn to_vec(&self) -> Vec<LogEntry> {
        self.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Counter bumped on every append or clear
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
