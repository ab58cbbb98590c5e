//! Logs Page State

use robot_log_tail::{ConnectionStatus, FilterCriteria, FilterMode, LogEntry, SessionStats};
use std::sync::Arc;

/// Lines moved per PageUp/PageDown
pub const SCROLL_PAGE: usize = 10;

const DEFAULT_LIMIT: &str = "200";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogsField {
    Mode,
    #[default]
    Target,
    Limit,
    Delay,
    AutoScroll,
}

impl LogsField {
    pub fn next(self) -> Self {
        match self {
            Self::Mode => Self::Target,
            Self::Target => Self::Limit,
            Self::Limit => Self::Delay,
            Self::Delay => Self::AutoScroll,
            Self::AutoScroll => Self::Mode,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Mode => Self::AutoScroll,
            Self::Target => Self::Mode,
            Self::Limit => Self::Target,
            Self::Delay => Self::Limit,
            Self::AutoScroll => Self::Delay,
        }
    }

    /// Whether the field takes typed characters
    pub fn is_text(self) -> bool {
        matches!(self, Self::Target | Self::Limit | Self::Delay)
    }
}

/// What the stream session looked like after its latest change
#[derive(Debug, Clone, Default)]
pub struct LogsSnapshot {
    pub status: ConnectionStatus,
    pub entries: Arc<Vec<LogEntry>>,
    pub stats: SessionStats,
}

/// State for the Logs page
#[derive(Debug, Clone)]
pub struct LogsState {
    pub criteria: FilterCriteria,
    pub limit: String,
    pub delay_for: String,
    pub auto_scroll: bool,
    pub focused_field: LogsField,
    pub status: ConnectionStatus,
    pub entries: Arc<Vec<LogEntry>>,
    pub stats: SessionStats,
    /// Lines scrolled back from the newest entry (0 = following the tail)
    pub scroll_back: usize,
}

impl Default for LogsState {
    fn default() -> Self {
        Self {
            criteria: FilterCriteria::default(),
            limit: DEFAULT_LIMIT.to_string(),
            delay_for: String::new(),
            auto_scroll: true,
            focused_field: LogsField::default(),
            status: ConnectionStatus::default(),
            entries: Arc::default(),
            stats: SessionStats::default(),
            scroll_back: 0,
        }
    }
}

impl LogsState {
    pub fn selector(&self) -> String {
        self.criteria.selector()
    }

    pub fn can_start(&self) -> bool {
        self.status.state.can_start()
    }

    pub fn can_stop(&self) -> bool {
        self.status.state.can_stop()
    }

    /// Text field currently being edited, if the focused field is one
    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focused_field {
            LogsField::Target => Some(match self.criteria.mode {
                FilterMode::Custom => &mut self.criteria.custom,
                FilterMode::Service | FilterMode::RosNode => &mut self.criteria.target,
            }),
            LogsField::Limit => Some(&mut self.limit),
            LogsField::Delay => Some(&mut self.delay_for),
            LogsField::Mode | LogsField::AutoScroll => None,
        }
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(text) = self.focused_text_mut() {
            text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.focused_text_mut() {
            text.pop();
        }
    }

    pub fn clear_field(&mut self) {
        if let Some(text) = self.focused_text_mut() {
            text.clear();
        }
    }

    pub fn set_auto_scroll(&mut self, enabled: bool) {
        self.auto_scroll = enabled;
        if enabled {
            self.scroll_back = 0;
        }
    }

    pub fn scroll_up(&mut self, lines: usize) {
        if self.auto_scroll {
            return;
        }
        let max = self.entries.len().saturating_sub(1);
        self.scroll_back = (self.scroll_back + lines).min(max);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        if self.auto_scroll {
            return;
        }
        self.scroll_back = self.scroll_back.saturating_sub(lines);
    }

    pub fn apply_snapshot(&mut self, snapshot: &LogsSnapshot) {
        self.status = snapshot.status.clone();
        self.entries = Arc::clone(&snapshot.entries);
        self.stats = snapshot.stats;

        if self.auto_scroll {
            self.scroll_back = 0;
        } else {
            self.scroll_back = self.scroll_back.min(self.entries.len().saturating_sub(1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use robot_log_tail::{ConnectionState, DEFAULT_CUSTOM_SELECTOR};

    fn entries(count: usize) -> Arc<Vec<LogEntry>> {
        Arc::new(
            (0..count)
                .map(|i| LogEntry::new(i.to_string(), "x", Arc::default()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults() {
        let state = LogsState::default();
        assert_eq!(state.limit, "200");
        assert!(state.auto_scroll);
        assert_eq!(state.criteria.custom, DEFAULT_CUSTOM_SELECTOR);
        assert!(state.can_start());
        assert!(!state.can_stop());
    }

    #[test]
    fn test_target_field_follows_mode() {
        let mut state = LogsState::default();
        state.push_char('a');
        assert_eq!(state.criteria.target, "a");

        state.criteria.mode = FilterMode::Custom;
        state.clear_field();
        state.push_char('{');
        assert_eq!(state.criteria.custom, "{");
        assert_eq!(state.criteria.target, "a");
    }

    #[test]
    fn test_non_text_fields_ignore_typing() {
        let mut state = LogsState {
            focused_field: LogsField::Mode,
            ..LogsState::default()
        };
        state.push_char('x');
        assert_eq!(state.criteria.target, "");
    }

    #[test]
    fn test_scrolling_only_without_auto_scroll() {
        let mut state = LogsState::default();
        state.apply_snapshot(&LogsSnapshot {
            entries: entries(30),
            ..LogsSnapshot::default()
        });

        state.scroll_up(SCROLL_PAGE);
        assert_eq!(state.scroll_back, 0);

        state.set_auto_scroll(false);
        state.scroll_up(SCROLL_PAGE);
        state.scroll_up(100);
        assert_eq!(state.scroll_back, 29);
        state.scroll_down(SCROLL_PAGE);
        assert_eq!(state.scroll_back, 19);

        state.set_auto_scroll(true);
        assert_eq!(state.scroll_back, 0);
    }

    #[test]
    fn test_snapshot_clamps_scroll() {
        let mut state = LogsState {
            auto_scroll: false,
            scroll_back: 40,
            ..LogsState::default()
        };
        state.apply_snapshot(&LogsSnapshot {
            status: ConnectionStatus::new(ConnectionState::Streaming, "Connected"),
            entries: entries(5),
            stats: SessionStats::default(),
        });
        assert_eq!(state.scroll_back, 4);
        assert!(state.can_stop());
    }
}
