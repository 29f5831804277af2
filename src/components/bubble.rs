use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::ui::UiFrame;

/// The floating bubble itself: a rounded box with a short label and an
/// optional unread badge in the top-right corner.
#[derive(Debug, Clone)]
pub struct BubbleComponent {
    label: String,
    badge: Option<u32>,
    dragging: bool,
}

impl BubbleComponent {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            badge: None,
            dragging: false,
        }
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn set_badge(&mut self, badge: Option<u32>) {
        self.badge = badge.filter(|count| *count > 0);
    }

    pub fn badge(&self) -> Option<u32> {
        self.badge
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    fn badge_text(&self) -> Option<String> {
        self.badge.map(|count| {
            if count > 99 {
                " 99+ ".to_string()
            } else {
                format!(" {count} ")
            }
        })
    }
}

impl super::Component for BubbleComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let bg = if self.dragging {
            crate::theme::bubble_dragging_bg()
        } else {
            crate::theme::bubble_bg()
        };
        let style = Style::default().fg(crate::theme::bubble_fg()).bg(bg);
        frame.render_widget(Clear, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(style);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height > 0 && inner.width > 0 {
            let label_row = Rect {
                y: inner.y.saturating_add(inner.height.saturating_sub(1) / 2),
                height: 1,
                ..inner
            };
            let paragraph = Paragraph::new(self.label.as_str())
                .alignment(Alignment::Center)
                .style(style.add_modifier(Modifier::BOLD));
            frame.render_widget(paragraph, label_row);
        }
        if let Some(text) = self.badge_text() {
            let width = text.chars().count() as u16;
            let right = area.x.saturating_add(area.width);
            let x = right.saturating_sub(width);
            let badge_style = Style::default()
                .fg(crate::theme::badge_fg())
                .bg(crate::theme::badge_bg())
                .add_modifier(Modifier::BOLD);
            frame.set_string(x.max(area.x), area.y, &text, badge_style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Component;
    use ratatui::buffer::Buffer;

    #[test]
    fn zero_badge_is_hidden() {
        let mut b = BubbleComponent::new("Ride");
        b.set_badge(Some(0));
        assert_eq!(b.badge(), None);
        b.set_badge(Some(3));
        assert_eq!(b.badge(), Some(3));
        b.set_badge(Some(250));
        assert_eq!(b.badge_text().as_deref(), Some(" 99+ "));
    }

    #[test]
    fn renders_border_label_and_badge() {
        let screen = Rect::new(0, 0, 20, 8);
        let mut buf = Buffer::empty(screen);
        let mut b = BubbleComponent::new("Ride");
        b.set_badge(Some(2));
        let area = Rect::new(4, 1, 10, 5);
        b.render(&mut UiFrame::from_parts(screen, &mut buf), area);
        assert_eq!(buf.cell((4, 1)).map(|c| c.symbol()), Some("╭"));
        // badge " 2 " flush with the right edge of the top border
        assert_eq!(buf.cell((12, 1)).map(|c| c.symbol()), Some("2"));
        let label: String = (5..13)
            .filter_map(|x| buf.cell((x, 3)).map(|c| c.symbol().to_string()))
            .collect();
        assert!(label.contains("Ride"));
    }

    #[test]
    fn render_partially_offscreen_does_not_panic() {
        let screen = Rect::new(0, 0, 6, 3);
        let mut buf = Buffer::empty(screen);
        let mut b = BubbleComponent::new("Ride");
        b.set_badge(Some(1));
        b.render(&mut UiFrame::from_parts(screen, &mut buf), Rect::new(3, 1, 10, 5));
    }
}
