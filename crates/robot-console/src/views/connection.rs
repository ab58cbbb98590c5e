use super::form::render_field;
use super::page_block;
use crate::state::{AppState, ConnectionField, Page, SaveStatus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(state: &AppState, area: Rect, f: &mut Frame) {
    let theme = &state.theme;
    let form = &state.connection;

    let block = page_block(state, Page::Connection.title());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Configured / connected
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // SSID
            Constraint::Length(1), // Password
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Status message
            Constraint::Min(0),
            Constraint::Length(1), // Hints
        ])
        .split(inner);

    let indicator = |label: &'static str, on: bool| {
        let style = if on { theme.success() } else { theme.muted() };
        [
            Span::styled(if on { "● " } else { "○ " }, style),
            Span::styled(label, theme.text_secondary()),
        ]
    };
    let mut summary = Vec::new();
    summary.extend(indicator("configured", form.configured));
    summary.push(Span::raw("   "));
    summary.extend(indicator("connected", form.connected));
    if form.loading {
        summary.push(Span::styled("   Loading...", theme.muted()));
    } else if let Some(error) = &form.load_error {
        summary.push(Span::styled(format!("   {}", error), theme.warning()));
    }
    f.render_widget(Paragraph::new(Line::from(summary)), chunks[0]);

    render_field(
        f,
        chunks[2],
        "SSID",
        &form.ssid,
        form.focused_field == ConnectionField::Ssid,
        theme,
        Some("network name"),
    );

    // Never echo the passphrase; the stored-password mask is shown as is
    let password = if form.password_masked {
        form.password.clone()
    } else {
        "•".repeat(form.password.chars().count())
    };
    render_field(
        f,
        chunks[3],
        "Password",
        &password,
        form.focused_field == ConnectionField::Password,
        theme,
        Some("leave empty for an open network"),
    );

    let status = match form.save_status {
        SaveStatus::Idle => Span::raw(""),
        SaveStatus::Saving => Span::styled("Saving...", theme.warning()),
        SaveStatus::Success => Span::styled(form.status_message.as_str(), theme.success()),
        SaveStatus::Error => Span::styled(form.status_message.as_str(), theme.error()),
    };
    f.render_widget(Paragraph::new(Line::from(status)), chunks[5]);

    let hints = [("Enter", " save  "), ("Ctrl+D", " clear  "), ("Ctrl+R", " reload")];
    let hint_spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, text)| {
            [
                Span::styled(*key, theme.key_hint()),
                Span::styled(*text, theme.muted()),
            ]
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(hint_spans)), chunks[7]);
}
