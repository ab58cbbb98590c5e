//! Status Bar Widget
//!
//! Renders the status bar at the bottom of the screen.
//! Format: `[timestamp] icon message                     [source]`

use crate::view_models::StatusBarViewModel;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

pub struct StatusBarWidget<'a>(pub &'a StatusBarViewModel);

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let vm = self.0;

        if area.height < 1 || area.width < 4 {
            return;
        }

        // Fill entire row with background
        for x in area.x..area.x + area.width {
            buf[(x, area.y)].set_bg(vm.bg_color).set_char(' ');
        }

        let mut x = area.x + 1; // 1 char padding

        if !vm.timestamp.is_empty() {
            let ts_str = format!("[{}] ", vm.timestamp);
            buf.set_string(x, area.y, &ts_str, vm.metadata_style);
            x += ts_str.chars().count() as u16;
        }

        let icon_str = format!("{} ", vm.icon);
        buf.set_string(x, area.y, &icon_str, vm.message_style);
        x += icon_str.chars().count() as u16;

        // "[source] " on the right
        let source_width = if vm.source.is_empty() {
            0
        } else {
            vm.source.chars().count() as u16 + 3
        };

        let available_width = area
            .width
            .saturating_sub(x - area.x + source_width + 1) as usize;

        if vm.message.chars().count() > available_width {
            let truncated: String = vm
                .message
                .chars()
                .take(available_width.saturating_sub(1))
                .collect();
            buf.set_string(x, area.y, format!("{}…", truncated), vm.message_style);
        } else {
            buf.set_string(x, area.y, &vm.message, vm.message_style);
        }

        if source_width > 0 && source_width < area.width {
            let source_str = format!("[{}]", vm.source);
            let source_x = area.x + area.width - source_width;
            buf.set_string(source_x, area.y, &source_str, vm.metadata_style);
        }
    }
}
