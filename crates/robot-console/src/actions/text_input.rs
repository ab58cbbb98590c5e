//! Text input actions - shared by the form pages
//!
//! The keyboard middleware translates keys into these and then into the
//! active page's own actions.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextInputAction {
    /// Character typed into the focused field
    Char(char),
    /// Remove the last character
    Backspace,
    /// Clear the focused field (Ctrl+U)
    ClearLine,
    /// Enter pressed
    Confirm,
}
