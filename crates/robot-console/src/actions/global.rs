//! Global actions - not tied to any specific page

use crate::state::Page;
use ratatui::crossterm::event::KeyEvent;

#[derive(Debug, Clone)]
pub enum GlobalAction {
    /// Raw key pressed (before translation)
    KeyPressed(KeyEvent),
    /// Startup; dispatched once before the first key
    Bootstrap,
    SelectPage(Page),
    Quit,
}
