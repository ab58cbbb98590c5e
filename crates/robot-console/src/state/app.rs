use super::{ConnectionFormState, GeneralState, LogsState, StatusBarState};
use crate::theme::Theme;

/// Top-level pages of the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    General,
    #[default]
    Connection,
    Logs,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::General, Page::Connection, Page::Logs];

    pub fn title(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Connection => "Connection Settings",
            Self::Logs => "Logs",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::General => "General robot information and settings",
            Self::Connection => "Connect to Wi-Fi",
            Self::Logs => "ROS and service logs",
        }
    }

    /// Function key that selects this page
    pub fn key_hint(&self) -> &'static str {
        match self {
            Self::General => "F1",
            Self::Connection => "F2",
            Self::Logs => "F3",
        }
    }
}

/// Application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub running: bool,
    pub page: Page,
    /// Resolved API base, shown in the header
    pub api_url: String,
    pub general: GeneralState,
    pub connection: ConnectionFormState,
    pub logs: LogsState,
    pub status_bar: StatusBarState,
    pub theme: Theme,
}

impl AppState {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            running: true,
            page: Page::default(),
            api_url: String::new(),
            general: GeneralState::default(),
            connection: ConnectionFormState::default(),
            logs: LogsState::default(),
            status_bar: StatusBarState::default(),
            theme: Theme::default(),
        }
    }
}
