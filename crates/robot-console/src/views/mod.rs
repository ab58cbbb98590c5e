use crate::state::{AppState, Page};
use crate::view_models::{PageTabsViewModel, StatusBarViewModel};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Block,
    Frame,
};

pub mod connection;
pub mod form;
pub mod general;
pub mod logs;
pub mod status_bar;
pub mod tabs;

use status_bar::StatusBarWidget;
use tabs::PageTabsWidget;

/// Render the entire application UI
///
/// Layout: tab line, active page, status bar.
pub fn render(state: &AppState, area: Rect, f: &mut Frame) {
    f.render_widget(Block::default().style(state.theme.panel_background()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tabs
            Constraint::Min(0),    // Page
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let tabs = PageTabsViewModel::from_state(state);
    f.render_widget(PageTabsWidget(&tabs), chunks[0]);

    match state.page {
        Page::General => general::render(state, chunks[1], f),
        Page::Connection => connection::render(state, chunks[1], f),
        Page::Logs => logs::render(state, chunks[1], f),
    }

    let status = StatusBarViewModel::from_state(state);
    f.render_widget(StatusBarWidget(&status), chunks[2]);
}

/// Bordered panel with the page title, used by every page
pub(crate) fn page_block<'a>(state: &AppState, title: &'a str) -> Block<'a> {
    use ratatui::widgets::{BorderType, Borders, Padding};

    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" {} ", title))
        .title_style(state.theme.panel_title())
        .border_style(state.theme.panel_border())
        .padding(Padding::horizontal(1))
}
