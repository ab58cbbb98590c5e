//! Reducers - pure functions producing new state from current state + action

pub mod connection_reducer;
pub mod general_reducer;
pub mod logs_reducer;
pub mod status_bar_reducer;

use crate::actions::{Action, GlobalAction};
use crate::state::AppState;

/// Root reducer that orchestrates all sub-reducers
pub fn reduce(mut state: AppState, action: &Action) -> AppState {
    match action {
        Action::Global(GlobalAction::Quit) => {
            state.running = false;
        }
        Action::Global(GlobalAction::SelectPage(page)) => {
            if state.page != *page {
                log::debug!("Switching page {:?} -> {:?}", state.page, page);
                state.page = *page;
            }
        }
        Action::General(action) => {
            state.general = general_reducer::reduce(state.general, action);
        }
        Action::Connection(action) => {
            state.connection = connection_reducer::reduce(state.connection, action);
        }
        Action::Logs(action) => {
            state.logs = logs_reducer::reduce(state.logs, action);
        }
        Action::StatusBar(action) => {
            state.status_bar = status_bar_reducer::reduce(state.status_bar, action);
        }
        Action::Global(GlobalAction::KeyPressed(_) | GlobalAction::Bootstrap) => {}
    }

    state
}
