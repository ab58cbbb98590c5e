use super::page_block;
use crate::state::{AppState, Page};
use crate::view_models::GeneralViewModel;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(state: &AppState, area: Rect, f: &mut Frame) {
    let theme = &state.theme;
    let vm = GeneralViewModel::from_state(state);

    let block = page_block(state, Page::General.title());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Robot name
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // CPU
            Constraint::Length(1), // RAM
            Constraint::Length(1), // Temperature
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Updated / error
            Constraint::Min(0),
            Constraint::Length(1), // Hints
        ])
        .split(inner);

    let row = |label: &str, value: String| {
        Paragraph::new(Line::from(vec![
            Span::styled(format!("{:14}", format!("{}:", label)), theme.text_secondary()),
            Span::styled(value, theme.text()),
        ]))
    };

    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Robot ", theme.muted()),
            Span::styled(vm.robot_name, theme.panel_title()),
        ])),
        chunks[0],
    );
    f.render_widget(row("CPU", vm.cpu), chunks[2]);
    f.render_widget(row("RAM", vm.ram), chunks[3]);
    f.render_widget(row("Temperature", vm.temperature), chunks[4]);

    let status = match vm.error {
        Some(error) => Line::from(Span::styled(error, theme.error())),
        None => Line::from(Span::styled(vm.updated, theme.muted())),
    };
    f.render_widget(Paragraph::new(status), chunks[6]);

    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Ctrl+R", theme.key_hint()),
            Span::styled(" refresh", theme.muted()),
        ])),
        chunks[8],
    );
}
