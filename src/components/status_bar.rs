use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::ui::{UiFrame, safe_set_string, truncate_to_width};

/// One-line bar with a message on the left and key hints on the right.
pub struct StatusBar {
    left: String,
    right: String,
    style: Style,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            left: String::new(),
            right: String::new(),
            style: Style::default()
                .fg(crate::theme::status_fg())
                .bg(crate::theme::status_bg()),
        }
    }

    pub fn set_left<T: Into<String>>(&mut self, value: T) {
        self.left = value.into();
    }

    pub fn left(&self) -> &str {
        &self.left
    }

    pub fn set_right<T: Into<String>>(&mut self, value: T) {
        self.right = value.into();
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl super::Component for StatusBar {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let y = area.y;
        let x = area.x;
        let width = area.width as usize;
        let buffer = frame.buffer_mut();
        let bounds = area.intersection(buffer.area);
        if bounds.width == 0 || bounds.height == 0 {
            return;
        }
        for col in bounds.x..bounds.x.saturating_add(bounds.width) {
            if let Some(cell) = buffer.cell_mut((col, y)) {
                cell.set_symbol(" ");
                cell.set_style(self.style);
            }
        }

        let left = truncate_to_width(&self.left, width);
        safe_set_string(buffer, bounds, x, y, &left, self.style);

        let left_width = left.chars().count();
        if !self.right.is_empty() && left_width < width {
            let right = truncate_to_width(&self.right, width);
            let right_width = right.chars().count();
            // hints give way to the message
            if left_width + 1 + right_width <= width {
                let start_x = x.saturating_add((width - right_width) as u16);
                safe_set_string(buffer, bounds, start_x, y, &right, self.style);
            }
        }
    }
}
