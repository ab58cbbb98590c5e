//! Status Bar View Model
//!
//! Pre-computes presentation data for the status bar.

use crate::state::{AppState, StatusKind};
use ratatui::style::{Color, Modifier, Style};

/// View model for rendering the status bar
#[derive(Debug, Clone)]
pub struct StatusBarViewModel {
    pub icon: &'static str,
    pub message: String,
    /// Timestamp formatted for display (e.g., "14:32:05"), empty for the welcome line
    pub timestamp: String,
    /// Page or subsystem that produced the message
    pub source: String,
    pub message_style: Style,
    pub bg_color: Color,
    /// Style for timestamp and source
    pub metadata_style: Style,
}

impl StatusBarViewModel {
    pub fn from_state(state: &AppState) -> Self {
        let theme = &state.theme;
        let metadata_style = Style::default().fg(theme.text_muted);

        let Some(msg) = state.status_bar.latest() else {
            return Self {
                icon: "»",
                message: format!("Robot console ready ({})", state.api_url),
                timestamp: String::new(),
                source: String::new(),
                message_style: Style::default()
                    .fg(theme.text_muted)
                    .add_modifier(Modifier::ITALIC),
                bg_color: theme.bg_secondary,
                metadata_style,
            };
        };

        let fg_color = match msg.kind {
            StatusKind::Running | StatusKind::Warning => theme.status_warning,
            StatusKind::Success => theme.status_success,
            StatusKind::Error => theme.status_error,
            StatusKind::Info => theme.status_info,
        };

        Self {
            icon: msg.kind.icon(),
            message: msg.message.clone(),
            timestamp: msg.timestamp.format("%H:%M:%S").to_string(),
            source: msg.source.clone(),
            message_style: Style::default().fg(fg_color).add_modifier(Modifier::BOLD),
            bg_color: theme.bg_secondary,
            metadata_style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::StatusBarAction;
    use crate::reducers::status_bar_reducer;

    #[test]
    fn test_welcome_without_messages() {
        let vm = StatusBarViewModel::from_state(&AppState::new("http://robot/api"));
        assert_eq!(vm.message, "Robot console ready (http://robot/api)");
        assert!(vm.timestamp.is_empty());
    }

    #[test]
    fn test_latest_message_shown() {
        let mut state = AppState::default();
        state.status_bar = status_bar_reducer::reduce(
            state.status_bar,
            &StatusBarAction::error("Log stream connection error", "Logs"),
        );

        let vm = StatusBarViewModel::from_state(&state);
        assert_eq!(vm.icon, StatusKind::Error.icon());
        assert_eq!(vm.message, "Log stream connection error");
        assert_eq!(vm.source, "Logs");
        assert_eq!(vm.timestamp.len(), 8);
    }
}
