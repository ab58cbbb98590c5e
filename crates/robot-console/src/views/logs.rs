use super::form::{render_choice, render_field};
use super::page_block;
use crate::state::{AppState, LogsField, Page};
use crate::view_models::LogsViewModel;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use robot_log_tail::FilterMode;

pub fn render(state: &AppState, area: Rect, f: &mut Frame) {
    let theme = &state.theme;
    let logs = &state.logs;

    let block = page_block(state, Page::Logs.title());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Mode
            Constraint::Length(1), // Target / selector
            Constraint::Length(1), // Limit
            Constraint::Length(1), // Delay
            Constraint::Length(1), // Auto-scroll
            Constraint::Length(1), // Status
            Constraint::Min(3),    // Log list
            Constraint::Length(1), // Footer
        ])
        .split(inner);

    let mode = logs.criteria.mode;
    let focused = logs.focused_field;

    render_choice(
        f,
        chunks[0],
        "Mode",
        mode.title(),
        mode.description(),
        focused == LogsField::Mode,
        theme,
    );
    let (target_label, target_value) = match mode {
        FilterMode::Custom => ("Selector", &logs.criteria.custom),
        FilterMode::Service | FilterMode::RosNode => (mode.title(), &logs.criteria.target),
    };
    render_field(
        f,
        chunks[1],
        target_label,
        target_value,
        focused == LogsField::Target,
        theme,
        Some(mode.placeholder()),
    );
    render_field(
        f,
        chunks[2],
        "Limit",
        &logs.limit,
        focused == LogsField::Limit,
        theme,
        Some("no limit"),
    );
    render_field(
        f,
        chunks[3],
        "Delay",
        &logs.delay_for,
        focused == LogsField::Delay,
        theme,
        Some("e.g. 1s"),
    );
    render_choice(
        f,
        chunks[4],
        "Auto-scroll",
        if logs.auto_scroll { "on" } else { "off" },
        "",
        focused == LogsField::AutoScroll,
        theme,
    );

    let list_block = Block::default()
        .borders(Borders::TOP)
        .border_style(theme.muted());
    let list_area = list_block.inner(chunks[6]);

    let vm = LogsViewModel::from_state(state, list_area.height as usize);

    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(vm.status_dot, vm.status_style),
            Span::raw(" "),
            Span::styled(vm.status_text.as_str(), theme.text()),
        ])),
        chunks[5],
    );

    f.render_widget(list_block.title(Span::styled(vm.subtitle.as_str(), theme.muted())), chunks[6]);

    if let Some(empty) = vm.empty_state {
        f.render_widget(
            Paragraph::new(Span::styled(empty, theme.muted().add_modifier(Modifier::ITALIC))),
            list_area,
        );
    } else {
        let lines: Vec<Line> = vm
            .rows
            .iter()
            .map(|row| {
                let mut spans = vec![
                    Span::styled(row.timestamp.as_str(), theme.accent()),
                    Span::raw("  "),
                    Span::styled(row.line.as_str(), theme.text()),
                ];
                if !row.labels.is_empty() {
                    spans.push(Span::styled(
                        format!("  {}", row.labels),
                        theme.muted().add_modifier(Modifier::DIM),
                    ));
                }
                Line::from(spans)
            })
            .collect();
        f.render_widget(Paragraph::new(lines), list_area);
    }

    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(vm.controls.as_str(), theme.key_hint()),
            Span::raw("   "),
            Span::styled(vm.footer.as_str(), theme.muted()),
        ])),
        chunks[7],
    );
}
