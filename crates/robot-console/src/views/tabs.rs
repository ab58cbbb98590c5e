use crate::view_models::PageTabsViewModel;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

/// Left separator - lower right triangle (creates "/" slope into tab)
const LEFT_SEP: &str = "◢";
/// Right separator - lower left triangle (creates "\" slope out of tab)
const RIGHT_SEP: &str = "◣";

/// Page tab line with powerline separators
pub struct PageTabsWidget<'a>(pub &'a PageTabsViewModel);

impl Widget for PageTabsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 || area.width < 10 {
            return;
        }

        let vm = self.0;
        let right = area.x + area.width;

        for x in area.x..right {
            buf[(x, area.y)].set_bg(vm.line_bg);
        }

        let mut x = area.x + 1;

        for tab in &vm.tabs {
            if x + tab.width > right {
                break; // Don't overflow
            }

            buf.set_string(x, area.y, LEFT_SEP, tab.separator_style);
            x += 1;

            let padded_text = format!("  {}  ", tab.display_text);
            buf.set_string(x, area.y, &padded_text, tab.style);
            x += padded_text.chars().count() as u16;

            buf.set_string(x, area.y, RIGHT_SEP, tab.separator_style);
            x += 1;
        }

        let description_width = vm.description.chars().count() as u16 + 2;
        if x + description_width <= right {
            buf.set_string(x + 2, area.y, &vm.description, vm.description_style);
        }
    }
}
