use crate::actions::GeneralAction;
use crate::state::GeneralState;
use chrono::Local;

pub fn reduce(mut state: GeneralState, action: &GeneralAction) -> GeneralState {
    match action {
        GeneralAction::Loading => {
            state.loading = true;
        }
        GeneralAction::StatsLoaded(stats) => {
            state.stats = Some(stats.clone());
            state.error = None;
            state.loading = false;
            state.last_updated = Some(Local::now());
        }
        GeneralAction::StatsFailed(message) => {
            // Keep the last stats visible next to the error
            state.error = Some(message.clone());
            state.loading = false;
        }
        GeneralAction::Refresh => {}
    }
    state
}
