//! KeyboardMiddleware - translates raw keys into page actions
//!
//! Two layers:
//!
//! 1. Priority keys that work everywhere: Ctrl+C / Ctrl+Q quit, F1-F3 select
//!    a page, Tab / Shift+Tab move focus.
//! 2. Page keys: shortcuts of the active page, then text input routed to the
//!    focused field.

use crate::actions::{
    Action, ConnectionAction, GeneralAction, GlobalAction, LogsAction, TextInputAction,
};
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::state::{AppState, LogsField, Page};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub struct KeyboardMiddleware;

impl KeyboardMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Middleware for KeyboardMiddleware {
    fn handle(&mut self, action: &Action, state: &AppState, dispatcher: &Dispatcher) -> bool {
        let Action::Global(GlobalAction::KeyPressed(key)) = action else {
            return true;
        };

        match translate_key(*key, state) {
            Some(translated) => {
                log::debug!("Key {:?} -> {:?}", key.code, translated);
                dispatcher.dispatch(translated);
            }
            None => log::trace!("Unhandled key {:?}", key),
        }

        // Raw keys never reach the reducers
        false
    }
}

/// Translate a key press into an action for the current state
pub fn translate_key(key: KeyEvent, state: &AppState) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Layer 1: priority keys
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => {
            return Some(Action::Global(GlobalAction::Quit));
        }
        KeyCode::F(n) => {
            let page = Page::ALL.get(usize::from(n).checked_sub(1)?)?;
            return Some(Action::Global(GlobalAction::SelectPage(*page)));
        }
        _ => {}
    }

    // Layer 2: page keys
    match state.page {
        Page::General => translate_general(key),
        Page::Connection => translate_connection(key),
        Page::Logs => translate_logs(key, state),
    }
}

/// Map editing keys to generic text input
fn text_input(key: KeyEvent) -> Option<TextInputAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char('u') if ctrl => Some(TextInputAction::ClearLine),
        KeyCode::Char(c) if !ctrl && !alt => Some(TextInputAction::Char(c)),
        KeyCode::Backspace if key.modifiers.contains(KeyModifiers::SUPER) => {
            Some(TextInputAction::ClearLine)
        }
        KeyCode::Backspace => Some(TextInputAction::Backspace),
        KeyCode::Enter => Some(TextInputAction::Confirm),
        _ => None,
    }
}

fn translate_general(key: KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('r') if ctrl => Some(Action::General(GeneralAction::Refresh)),
        _ => None,
    }
}

fn translate_connection(key: KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let action = match key.code {
        KeyCode::Tab | KeyCode::Down => ConnectionAction::NextField,
        KeyCode::BackTab | KeyCode::Up => ConnectionAction::PrevField,
        KeyCode::Char('r') if ctrl => ConnectionAction::Load,
        KeyCode::Char('d') if ctrl => ConnectionAction::Clear,
        _ => match text_input(key)? {
            TextInputAction::Char(c) => ConnectionAction::Char(c),
            TextInputAction::Backspace => ConnectionAction::Backspace,
            TextInputAction::ClearLine => ConnectionAction::ClearField,
            TextInputAction::Confirm => ConnectionAction::Save,
        },
    };
    Some(Action::Connection(action))
}

fn translate_logs(key: KeyEvent, state: &AppState) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let focused = state.logs.focused_field;

    let action = match key.code {
        KeyCode::Tab | KeyCode::Down => LogsAction::NextField,
        KeyCode::BackTab | KeyCode::Up => LogsAction::PrevField,
        KeyCode::PageUp => LogsAction::ScrollUp,
        KeyCode::PageDown => LogsAction::ScrollDown,
        KeyCode::Char('s') if ctrl => LogsAction::Start,
        KeyCode::Char('x') if ctrl => LogsAction::Stop,
        KeyCode::Left if focused == LogsField::Mode => LogsAction::PrevMode,
        KeyCode::Right if focused == LogsField::Mode => LogsAction::NextMode,
        KeyCode::Char(' ') if focused == LogsField::AutoScroll => LogsAction::ToggleAutoScroll,
        KeyCode::Enter => LogsAction::Start,
        _ if focused.is_text() => match text_input(key)? {
            TextInputAction::Char(c) => LogsAction::Char(c),
            TextInputAction::Backspace => LogsAction::Backspace,
            TextInputAction::ClearLine => LogsAction::ClearField,
            TextInputAction::Confirm => LogsAction::Start,
        },
        _ => return None,
    };
    Some(Action::Logs(action))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn on_page(page: Page) -> AppState {
        AppState {
            page,
            ..AppState::default()
        }
    }

    #[test]
    fn test_quit_works_on_every_page() {
        for page in Page::ALL {
            assert!(matches!(
                translate_key(ctrl('c'), &on_page(page)),
                Some(Action::Global(GlobalAction::Quit))
            ));
            assert!(matches!(
                translate_key(ctrl('q'), &on_page(page)),
                Some(Action::Global(GlobalAction::Quit))
            ));
        }
    }

    #[test]
    fn test_function_keys_select_pages() {
        let state = AppState::default();
        assert!(matches!(
            translate_key(key(KeyCode::F(3)), &state),
            Some(Action::Global(GlobalAction::SelectPage(Page::Logs)))
        ));
        assert!(translate_key(key(KeyCode::F(9)), &state).is_none());
        assert!(translate_key(key(KeyCode::F(0)), &state).is_none());
    }

    #[test]
    fn test_plain_q_is_typed_into_form() {
        assert!(matches!(
            translate_key(key(KeyCode::Char('q')), &on_page(Page::Connection)),
            Some(Action::Connection(ConnectionAction::Char('q')))
        ));
    }

    #[test]
    fn test_enter_saves_connection_form() {
        assert!(matches!(
            translate_key(key(KeyCode::Enter), &on_page(Page::Connection)),
            Some(Action::Connection(ConnectionAction::Save))
        ));
    }

    #[test]
    fn test_logs_keys_depend_on_focus() {
        let mut state = on_page(Page::Logs);
        assert!(matches!(
            translate_key(key(KeyCode::Char('a')), &state),
            Some(Action::Logs(LogsAction::Char('a')))
        ));

        state.logs.focused_field = LogsField::Mode;
        assert!(matches!(
            translate_key(key(KeyCode::Right), &state),
            Some(Action::Logs(LogsAction::NextMode))
        ));
        assert!(translate_key(key(KeyCode::Char('a')), &state).is_none());

        state.logs.focused_field = LogsField::AutoScroll;
        assert!(matches!(
            translate_key(key(KeyCode::Char(' ')), &state),
            Some(Action::Logs(LogsAction::ToggleAutoScroll))
        ));
    }

    #[test]
    fn test_logs_start_stop() {
        let state = on_page(Page::Logs);
        assert!(matches!(
            translate_key(ctrl('s'), &state),
            Some(Action::Logs(LogsAction::Start))
        ));
        assert!(matches!(
            translate_key(key(KeyCode::Enter), &state),
            Some(Action::Logs(LogsAction::Start))
        ));
        assert!(matches!(
            translate_key(ctrl('x'), &state),
            Some(Action::Logs(LogsAction::Stop))
        ));
    }
}
