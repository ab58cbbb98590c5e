//! Actions module
//!
//! All actions use a tagged architecture:
//! - Global actions affect the whole application (keys, page selection, quit)
//! - Page actions are already targeted at one page's reducer or middleware

pub mod connection;
pub mod general;
pub mod global;
pub mod logs;
pub mod status_bar;
pub mod text_input;

pub use connection::ConnectionAction;
pub use general::GeneralAction;
pub use global::GlobalAction;
pub use logs::LogsAction;
pub use status_bar::StatusBarAction;
pub use text_input::TextInputAction;

/// Root action enum - tagged by page/domain
#[derive(Debug, Clone)]
pub enum Action {
    /// Global application actions
    Global(GlobalAction),
    /// General page (system stats)
    General(GeneralAction),
    /// Connection page (Wi-Fi form)
    Connection(ConnectionAction),
    /// Logs page (live tail)
    Logs(LogsAction),
    /// Status bar messages
    StatusBar(StatusBarAction),
}

impl Action {
    /// Actions emitted continuously while streaming; logged at trace level only
    pub fn is_high_frequency(&self) -> bool {
        matches!(
            self,
            Action::Logs(LogsAction::TransportEvent(_) | LogsAction::SessionUpdated(_))
        )
    }
}
