use crate::actions::LogsAction;
use crate::state::{LogsState, SCROLL_PAGE};

pub fn reduce(mut state: LogsState, action: &LogsAction) -> LogsState {
    match action {
        LogsAction::NextField => {
            state.focused_field = state.focused_field.next();
        }
        LogsAction::PrevField => {
            state.focused_field = state.focused_field.prev();
        }
        LogsAction::Char(c) => state.push_char(*c),
        LogsAction::Backspace => state.backspace(),
        LogsAction::ClearField => state.clear_field(),
        LogsAction::NextMode => {
            state.criteria.mode = state.criteria.mode.next();
        }
        LogsAction::PrevMode => {
            state.criteria.mode = state.criteria.mode.previous();
        }
        LogsAction::ToggleAutoScroll => {
            let enabled = !state.auto_scroll;
            state.set_auto_scroll(enabled);
        }
        LogsAction::ScrollUp => state.scroll_up(SCROLL_PAGE),
        LogsAction::ScrollDown => state.scroll_down(SCROLL_PAGE),
        LogsAction::SessionUpdated(snapshot) => state.apply_snapshot(snapshot),
        // Consumed by the log tail middleware
        LogsAction::Start | LogsAction::Stop | LogsAction::TransportEvent(_) => {}
    }
    state
}
