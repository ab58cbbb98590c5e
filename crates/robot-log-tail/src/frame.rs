//! Decoding of text frames received on the tail stream
//!
//! Two shapes are recognised:
//!
//! - error frames: `{"type": "error", "message": "..."}`
//! - batch frames: `{"streams": [{"stream": {...labels}, "values": [[ts, line], ...]}]}`
//!
//! Anything else (invalid JSON, missing `streams`, foreign payloads) decodes
//! to `None` and is dropped by the session.

use crate::connection::messages;
use crate::types::{LabelSet, LogEntry};
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// The backend reported an error and the stream is over
    Error { message: String },
    Batch(Batch),
}

/// Entries decoded from one batch frame, in stream/value order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Batch {
    pub entries: Vec<LogEntry>,
    /// Entries the backend reported as dropped before sending
    pub dropped_entries: usize,
}

/// Decode a text frame
pub fn decode_frame(text: &str) -> Option<Frame> {
    let value: Value = serde_json::from_str(text).ok()?;
    let object = value.as_object()?;

    if object.get("type").and_then(Value::as_str) == Some("error") {
        let message = object
            .get("message")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(messages::BACKEND_ERROR);
        return Some(Frame::Error {
            message: message.to_string(),
        });
    }

    let streams = object.get("streams")?.as_array()?;

    let mut batch = Batch::default();
    for stream in streams {
        decode_stream(stream, &mut batch.entries);
    }

    batch.dropped_entries = object
        .get("dropped_entries")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);

    Some(Frame::Batch(batch))
}

fn decode_stream(stream: &Value, out: &mut Vec<LogEntry>) {
    let labels: LabelSet = stream
        .get("stream")
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect()
        })
        .unwrap_or_default();
    let labels = Arc::new(labels);

    let Some(values) = stream.get("values").and_then(Value::as_array) else {
        return;
    };

    for pair in values {
        let Some(items) = pair.as_array() else {
            continue;
        };
        if let (Some(ts), Some(line)) = (
            items.first().and_then(Value::as_str),
            items.get(1).and_then(Value::as_str),
        ) {
            out.push(LogEntry::new(ts, line, Arc::clone(&labels)));
        }
    }
}
