//! Logs Page View Model
//!
//! Computes the visible window of the log list plus status presentation.
//! The window depends on the height of the list area, so it is built per
//! frame.

use crate::state::AppState;
use ratatui::style::{Modifier, Style};
use robot_log_tail::{format_labels, format_timestamp, ConnectionState};

pub const EMPTY_STATE: &str = "No log entries yet. Start streaming to view logs.";
pub const NO_SELECTOR: &str = "Choose a selector to begin streaming";

const STATUS_DOT: &str = "●";

#[derive(Debug, Clone)]
pub struct LogsViewModel {
    pub status_dot: &'static str,
    pub status_style: Style,
    /// "streaming · Connected to log stream"
    pub status_text: String,
    /// Active selector, or a prompt when there is none
    pub subtitle: String,
    pub rows: Vec<LogRowViewModel>,
    /// Shown instead of rows when the buffer is empty
    pub empty_state: Option<&'static str>,
    /// "entries 120/500 · frames 14 · ignored 0"
    pub footer: String,
    /// Start/stop hints reflecting what the current state allows
    pub controls: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRowViewModel {
    pub timestamp: String,
    pub line: String,
    pub labels: String,
}

impl LogsViewModel {
    /// Build the view model for a list area of `visible_rows` lines
    pub fn from_state(state: &AppState, visible_rows: usize) -> Self {
        let theme = &state.theme;
        let logs = &state.logs;

        let status_color = match logs.status.state {
            ConnectionState::Idle => theme.text_muted,
            ConnectionState::Connecting => theme.status_warning,
            ConnectionState::Streaming => theme.status_success,
            ConnectionState::Error => theme.status_error,
        };
        let status_text = match logs.status.message.as_deref() {
            Some(message) => format!("{} · {}", logs.status.state.label(), message),
            None => logs.status.state.label().to_string(),
        };

        let selector = logs.selector();
        let subtitle = if selector.is_empty() {
            NO_SELECTOR.to_string()
        } else {
            selector
        };

        // Window ending `scroll_back` lines before the newest entry
        let total = logs.entries.len();
        let end = total.saturating_sub(logs.scroll_back);
        let start = end.saturating_sub(visible_rows);
        let rows = logs.entries[start..end]
            .iter()
            .map(|entry| LogRowViewModel {
                timestamp: format_timestamp(&entry.timestamp),
                line: entry.line.clone(),
                labels: format_labels(&entry.labels),
            })
            .collect();

        let mut footer = format!(
            "entries {}/{} · frames {} · ignored {}",
            total,
            robot_log_tail::MAX_LOG_LINES,
            logs.stats.frames_received,
            logs.stats.frames_ignored
        );
        if logs.stats.backend_dropped > 0 {
            footer.push_str(&format!(" · dropped {}", logs.stats.backend_dropped));
        }
        if !logs.auto_scroll && logs.scroll_back > 0 {
            footer.push_str(&format!(" · {} lines back", logs.scroll_back));
        }

        let mut controls = Vec::new();
        if logs.can_start() {
            controls.push("Enter start");
        }
        if logs.can_stop() {
            controls.push("Ctrl+X stop");
        }
        if !logs.auto_scroll {
            controls.push("PgUp/PgDn scroll");
        }

        Self {
            status_dot: STATUS_DOT,
            status_style: Style::default()
                .fg(status_color)
                .add_modifier(Modifier::BOLD),
            status_text,
            subtitle,
            rows,
            empty_state: (total == 0).then_some(EMPTY_STATE),
            footer,
            controls: controls.join("  "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::LogsSnapshot;
    use robot_log_tail::{ConnectionStatus, LabelSet, LogEntry};
    use std::sync::Arc;

    fn with_entries(count: usize) -> AppState {
        let labels = Arc::new(LabelSet::from([("unit".to_string(), "a".to_string())]));
        let entries = (0..count)
            .map(|i| LogEntry::new("soon", format!("line {}", i), Arc::clone(&labels)))
            .collect();

        let mut state = AppState::default();
        state.logs.apply_snapshot(&LogsSnapshot {
            status: ConnectionStatus::new(ConnectionState::Streaming, "Connected to log stream"),
            entries: Arc::new(entries),
            ..LogsSnapshot::default()
        });
        state
    }

    #[test]
    fn test_empty_state_and_prompt() {
        let vm = LogsViewModel::from_state(&AppState::default(), 10);
        assert_eq!(vm.empty_state, Some(EMPTY_STATE));
        assert_eq!(vm.subtitle, NO_SELECTOR);
        assert_eq!(vm.status_text, "idle");
        assert_eq!(vm.controls, "Enter start");
    }

    #[test]
    fn test_tail_window_follows_newest() {
        let vm = LogsViewModel::from_state(&with_entries(30), 5);
        let lines: Vec<&str> = vm.rows.iter().map(|r| r.line.as_str()).collect();
        assert_eq!(lines, vec!["line 25", "line 26", "line 27", "line 28", "line 29"]);
        assert_eq!(vm.rows[0].labels, "unit=a");
        assert_eq!(vm.rows[0].timestamp, "soon");
        assert_eq!(vm.status_text, "streaming · Connected to log stream");
        assert_eq!(vm.controls, "Ctrl+X stop");
    }

    #[test]
    fn test_scrolled_back_window() {
        let mut state = with_entries(30);
        state.logs.set_auto_scroll(false);
        state.logs.scroll_up(10);

        let vm = LogsViewModel::from_state(&state, 5);
        assert_eq!(vm.rows.first().map(|r| r.line.as_str()), Some("line 15"));
        assert_eq!(vm.rows.last().map(|r| r.line.as_str()), Some("line 19"));
        assert!(vm.footer.ends_with("10 lines back"));
    }

    #[test]
    fn test_subtitle_shows_selector() {
        let mut state = AppState::default();
        state.logs.criteria.target = "rtabmap".to_string();
        let vm = LogsViewModel::from_state(&state, 5);
        assert_eq!(vm.subtitle, r#"{service="rtabmap"}"#);
    }
}
