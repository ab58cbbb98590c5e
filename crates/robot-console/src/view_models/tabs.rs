//! Page Tabs View Model

use crate::state::{AppState, Page};
use ratatui::style::{Color, Modifier, Style};

/// View model for the page tab line
#[derive(Debug, Clone)]
pub struct PageTabsViewModel {
    pub tabs: Vec<TabViewModel>,
    /// Description of the active page, shown after the tabs
    pub description: String,
    pub description_style: Style,
    pub line_bg: Color,
}

#[derive(Debug, Clone)]
pub struct TabViewModel {
    /// "F1 General"
    pub display_text: String,
    pub style: Style,
    /// Powerline separator style (fg=tab_bg, bg=line_bg)
    pub separator_style: Style,
    /// Width in cells: separators(2) + padding(4) + text
    pub width: u16,
}

impl PageTabsViewModel {
    pub fn from_state(state: &AppState) -> Self {
        let theme = &state.theme;

        let style_active = Style::default()
            .fg(theme.tab_active_fg)
            .bg(theme.tab_active_bg)
            .add_modifier(Modifier::BOLD);
        let style_inactive = Style::default()
            .fg(theme.tab_inactive_fg)
            .bg(theme.tab_line_bg);

        let tabs = Page::ALL
            .iter()
            .map(|page| {
                let (style, tab_bg) = if *page == state.page {
                    (style_active, theme.tab_active_bg)
                } else {
                    (style_inactive, theme.tab_line_bg)
                };
                let display_text = format!("{} {}", page.key_hint(), page.title());
                let width = display_text.chars().count() as u16 + 6;

                TabViewModel {
                    display_text,
                    style,
                    separator_style: Style::default().fg(tab_bg).bg(theme.tab_line_bg),
                    width,
                }
            })
            .collect();

        Self {
            tabs,
            description: state.page.description().to_string(),
            description_style: theme.muted().bg(theme.tab_line_bg),
            line_bg: theme.tab_line_bg,
        }
    }
}
