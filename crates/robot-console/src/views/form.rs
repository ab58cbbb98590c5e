//! Form field rendering shared by the pages

use crate::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Label column width (14 chars for alignment)
const LABEL_WIDTH: usize = 14;

fn label_spans<'a>(label: &str, focused: bool, theme: &Theme) -> [Span<'a>; 2] {
    let indicator = if focused { "> " } else { "  " };
    let label_style = if focused {
        theme.text().add_modifier(Modifier::BOLD)
    } else {
        theme.text()
    };

    [
        Span::styled(indicator, theme.accent().bold()),
        Span::styled(
            format!("{:width$}", format!("{}:", label), width = LABEL_WIDTH),
            label_style,
        ),
    ]
}

/// Render a single text field
pub fn render_field(
    f: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
    theme: &Theme,
    placeholder: Option<&str>,
) {
    let mut spans = Vec::from(label_spans(label, focused, theme));

    match (value.is_empty(), placeholder) {
        (true, Some(ph)) => {
            // Cursor first, then the dimmed placeholder
            if focused {
                spans.push(Span::styled("▌", theme.accent()));
            }
            spans.push(Span::styled(
                ph.to_string(),
                theme.muted().italic().add_modifier(Modifier::DIM),
            ));
        }
        _ => {
            let value_style = if focused {
                theme.input_focused()
            } else {
                theme.text()
            };
            spans.push(Span::styled(value.to_string(), value_style));
            if focused {
                spans.push(Span::styled("▌", theme.accent()));
            }
        }
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render a field whose value is picked rather than typed (`◀ value ▶`)
pub fn render_choice(
    f: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    hint: &str,
    focused: bool,
    theme: &Theme,
) {
    let mut spans = Vec::from(label_spans(label, focused, theme));

    let value_style = if focused {
        theme.input_focused()
    } else {
        theme.text()
    };
    spans.push(Span::styled(format!("◀ {} ▶", value), value_style));
    if !hint.is_empty() {
        spans.push(Span::styled(format!("  {}", hint), theme.muted()));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
