use std::collections::BTreeMap;
use std::sync::Arc;

/// Label key/value pairs attached to a stream
pub type LabelSet = BTreeMap<String, String>;

/// A single log line received from the backend
///
/// Entries from the same stream share one label set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Nanoseconds since the Unix epoch, as a decimal string
    pub timestamp: String,
    pub line: String,
    pub labels: Arc<LabelSet>,
}

impl LogEntry {
    pub fn new(timestamp: impl Into<String>, line: impl Into<String>, labels: Arc<LabelSet>) -> Self {
        Self {
            timestamp: timestamp.into(),
            line: line.into(),
            labels,
        }
    }

    /// Display key (`timestamp-line`); not guaranteed unique
    pub fn id(&self) -> String {
        format!("{}-{}", self.timestamp, self.line)
    }

    /// Timestamp as integer nanoseconds, if it parses
    pub fn timestamp_nanos(&self) -> Option<i64> {
        self.timestamp.trim().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_id_and_nanos() {
        let labels = Arc::new(LabelSet::from([("service".to_string(), "x".to_string())]));
        let entry = LogEntry::new("1700000000000000000", "hello", labels);

        assert_eq!(entry.id(), "1700000000000000000-hello");
        assert_eq!(entry.timestamp_nanos(), Some(1_700_000_000_000_000_000));

        let bad = LogEntry::new("soon", "x", Arc::default());
        assert_eq!(bad.timestamp_nanos(), None);
    }
}
