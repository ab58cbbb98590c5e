use crate::actions::ConnectionAction;
use crate::state::{ConnectionFormState, SaveStatus};

const SAVED: &str = "Saved. Switching modes...";
const CLEARED: &str = "Wi-Fi configuration cleared";

pub fn reduce(mut state: ConnectionFormState, action: &ConnectionAction) -> ConnectionFormState {
    match action {
        ConnectionAction::NextField => {
            state.focused_field = state.focused_field.next();
        }
        ConnectionAction::PrevField => {
            state.focused_field = state.focused_field.prev();
        }
        ConnectionAction::Char(c) => state.push_char(*c),
        ConnectionAction::Backspace => state.backspace(),
        ConnectionAction::ClearField => state.clear_field(),

        ConnectionAction::Load => {
            state.loading = true;
        }
        ConnectionAction::Loaded(status) => {
            state.loading = false;
            state.load_error = None;
            state.apply_status(status);
        }
        ConnectionAction::LoadFailed(message) => {
            // Form stays editable
            state.loading = false;
            state.load_error = Some(message.clone());
        }

        ConnectionAction::Saving => {
            state.save_status = SaveStatus::Saving;
            state.status_message.clear();
        }
        ConnectionAction::Saved => {
            state.save_status = SaveStatus::Success;
            state.status_message = SAVED.to_string();
        }
        ConnectionAction::SaveFailed(message) => {
            state.save_status = SaveStatus::Error;
            state.status_message = message.clone();
        }
        ConnectionAction::Cleared => {
            state.reset();
            state.save_status = SaveStatus::Success;
            state.status_message = CLEARED.to_string();
        }
        // Handled by the robot API middleware
        ConnectionAction::Save | ConnectionAction::Clear => {}
    }
    state
}
