//! Application State Module
//!
//! Contains all state types used by the application, organized by page.

mod app;
pub mod connection;
mod general;
mod logs;
mod status_bar;

pub use app::{AppState, Page};
pub use connection::{ConnectionField, ConnectionFormState, SaveStatus};
pub use general::GeneralState;
pub use logs::{LogsField, LogsSnapshot, LogsState, SCROLL_PAGE};
pub use status_bar::{StatusBarState, StatusKind, StatusMessage};
