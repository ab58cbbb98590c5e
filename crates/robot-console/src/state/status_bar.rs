//! Status Bar State

use chrono::{DateTime, Local};
use std::collections::VecDeque;

/// Kind of status message (determines icon and color)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Running,
    Success,
    Error,
    Warning,
    Info,
}

impl StatusKind {
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Running => "…",
            Self::Success => "✔",
            Self::Error => "✖",
            Self::Warning => "!",
            Self::Info => "i",
        }
    }
}

/// A single status message with metadata
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub timestamp: DateTime<Local>,
    pub kind: StatusKind,
    pub message: String,
    /// Page or subsystem that produced the message
    pub source: String,
}

impl StatusMessage {
    pub fn new(kind: StatusKind, message: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            kind,
            message: message.into(),
            source: source.into(),
        }
    }
}

/// Status bar state - bounded history of messages
#[derive(Debug, Clone)]
pub struct StatusBarState {
    /// Newest at back
    pub messages: VecDeque<StatusMessage>,
    pub max_history: usize,
}

impl Default for StatusBarState {
    fn default() -> Self {
        Self {
            messages: VecDeque::new(),
            max_history: 100,
        }
    }
}

impl StatusBarState {
    pub fn latest(&self) -> Option<&StatusMessage> {
        self.messages.back()
    }

    /// Push a new message, trimming the oldest if over limit
    pub fn push(&mut self, message: StatusMessage) {
        self.messages.push_back(message);
        if self.messages.len() > self.max_history {
            self.messages.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_is_bounded() {
        let mut state = StatusBarState::default();
        for i in 0..105 {
            state.push(StatusMessage::new(StatusKind::Info, format!("m{}", i), "test"));
        }
        assert_eq!(state.messages.len(), 100);
        assert_eq!(state.messages.front().map(|m| m.message.as_str()), Some("m5"));
        assert_eq!(state.latest().map(|m| m.message.as_str()), Some("m104"));
    }
}
