use crate::state::LogsSnapshot;
use robot_log_tail::SessionEvent;

/// Logs page actions
#[derive(Debug, Clone)]
pub enum LogsAction {
    NextField,
    PrevField,
    Char(char),
    Backspace,
    ClearField,
    NextMode,
    PrevMode,
    ToggleAutoScroll,
    ScrollUp,
    ScrollDown,

    /// Start tailing with the current form (handled by the log tail middleware)
    Start,
    /// Stop tailing (handled by the log tail middleware)
    Stop,
    /// Event from the WebSocket transport
    TransportEvent(SessionEvent),
    /// Session changed; carries what the page should show
    SessionUpdated(LogsSnapshot),
}
