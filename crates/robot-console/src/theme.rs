use ratatui::{prelude::*, style::palette::tailwind};

/// Application theme - centralized color and style management
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg_primary: Color,
    pub bg_secondary: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    // Accent colors
    pub accent_primary: Color,
    pub accent_secondary: Color,

    // Status colors
    pub status_success: Color,
    pub status_error: Color,
    pub status_warning: Color,
    pub status_info: Color,

    // Focused input
    pub active_fg: Color,
    pub active_bg: Color,

    // Tabs
    pub tab_active_fg: Color,
    pub tab_active_bg: Color,
    pub tab_inactive_fg: Color,
    pub tab_line_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            bg_primary: tailwind::SLATE.c950,
            bg_secondary: tailwind::SLATE.c900,

            text_primary: tailwind::SLATE.c100,
            text_secondary: tailwind::SLATE.c200,
            text_muted: tailwind::SLATE.c400,

            accent_primary: tailwind::CYAN.c400,
            accent_secondary: tailwind::CYAN.c600,

            status_success: tailwind::GREEN.c400,
            status_error: tailwind::RED.c400,
            status_warning: tailwind::YELLOW.c400,
            status_info: tailwind::BLUE.c400,

            active_fg: Color::White,
            active_bg: tailwind::SLATE.c700,

            tab_active_fg: tailwind::SLATE.c950,
            tab_active_bg: tailwind::CYAN.c400,
            tab_inactive_fg: tailwind::SLATE.c300,
            tab_line_bg: tailwind::SLATE.c900,
        }
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    pub fn text_secondary(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent_primary)
    }

    /// Style for panel borders
    pub fn panel_border(&self) -> Style {
        Style::default().fg(self.accent_secondary)
    }

    /// Style for panel titles
    pub fn panel_title(&self) -> Style {
        Style::default()
            .fg(self.accent_primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn panel_background(&self) -> Style {
        Style::default().bg(self.bg_primary)
    }

    /// Style for key hints (e.g., "F3" in "F3 logs")
    pub fn key_hint(&self) -> Style {
        Style::default()
            .fg(self.accent_primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the value of a focused input field
    pub fn input_focused(&self) -> Style {
        Style::default().fg(self.active_fg).bg(self.active_bg)
    }

    pub fn error(&self) -> Style {
        Style::default()
            .fg(self.status_error)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success(&self) -> Style {
        Style::default()
            .fg(self.status_success)
            .add_modifier(Modifier::BOLD)
    }

    pub fn warning(&self) -> Style {
        Style::default()
            .fg(self.status_warning)
            .add_modifier(Modifier::BOLD)
    }
}
