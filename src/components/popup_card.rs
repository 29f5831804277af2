use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use crate::components::Component;
use crate::layout::{PopupLayout, popup_layout, rect_contains};
use crate::service::{PopupAction, PopupContent};
use crate::ui::UiFrame;

/// Ride-request card shown after the bubble is tapped.
///
/// Mouse: click a button to choose, click outside the card to dismiss.
/// Keys: Tab/Left/Right move between buttons, Enter chooses, Esc dismisses.
#[derive(Debug, Default)]
pub struct PopupCardComponent {
    content: PopupContent,
    visible: bool,
    accept_selected: bool,
    layout: Option<PopupLayout>,
    decided: Option<PopupAction>,
}

impl Component for PopupCardComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect) {
        self.layout = None;
        if !self.visible {
            return;
        }
        let Some(layout) = popup_layout(area) else {
            return;
        };
        self.layout = Some(layout);

        frame.render_widget(Clear, layout.card);
        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", self.content.title),
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(
                Style::default()
                    .fg(crate::theme::popup_fg())
                    .bg(crate::theme::popup_bg()),
            );
        frame.render_widget(block, layout.card);

        let paragraph = Paragraph::new(self.body_lines())
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, layout.body);

        let separator_y = layout.reject.y.saturating_sub(1);
        let separator_style = Style::default().fg(crate::theme::popup_separator());
        for x in layout.body.x..layout.body.x.saturating_add(layout.body.width) {
            frame.set_string(x, separator_y, "─", separator_style);
        }

        let (reject_bg, accept_bg) = if self.accept_selected {
            (crate::theme::button_idle_bg(), crate::theme::accept_bg())
        } else {
            (crate::theme::reject_bg(), crate::theme::button_idle_bg())
        };
        render_button(frame, layout.reject, &self.content.reject_text, reject_bg);
        render_button(frame, layout.accept, &self.content.accept_text, accept_bg);
    }

    /// Modal: consumes every event while open. A decision closes the card
    /// and waits in [`PopupCardComponent::take_action`].
    fn handle_event(&mut self, event: &Event) -> bool {
        if !self.visible {
            return false;
        }
        if let Some(action) = self.handle_popup_event(event) {
            self.decided = Some(action);
            self.close();
        }
        true
    }
}

fn render_button(frame: &mut UiFrame<'_>, rect: Rect, label: &str, bg: ratatui::style::Color) {
    if rect.width == 0 {
        return;
    }
    let style = Style::default()
        .fg(crate::theme::button_fg())
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let button = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(style);
    frame.render_widget(button, rect);
}

impl PopupCardComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, content: PopupContent) {
        self.content = content;
        self.visible = true;
        self.accept_selected = true;
        self.decided = None;
    }

    /// The choice made through [`Component::handle_event`], once.
    pub fn take_action(&mut self) -> Option<PopupAction> {
        self.decided.take()
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.layout = None;
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn content(&self) -> &PopupContent {
        &self.content
    }

    pub fn layout(&self) -> Option<PopupLayout> {
        self.layout
    }

    fn body_lines(&self) -> Vec<Line<'_>> {
        let c = &self.content;
        let muted = Style::default().fg(crate::theme::popup_muted());
        let price = Style::default()
            .fg(crate::theme::popup_price())
            .add_modifier(Modifier::BOLD);
        vec![
            Line::from(Span::styled(c.subtitle.as_str(), muted)),
            Line::from(vec![
                Span::styled(c.price.as_str(), price),
                Span::raw("  "),
                Span::raw(c.duration.as_str()),
                Span::styled(" · ", muted),
                Span::raw(c.distance.as_str()),
            ]),
            Line::default(),
            Line::from(Span::styled(c.pickup_title.as_str(), muted)),
            Line::from(c.pickup_address.as_str()),
            Line::from(Span::styled(c.destination_title.as_str(), muted)),
            Line::from(c.destination_address.as_str()),
            Line::default(),
            Line::from(vec![
                Span::styled("Payment: ", muted),
                Span::raw(c.payment_method.as_str()),
            ]),
        ]
    }

    /// Resolve an input event to a popup decision, if it makes one.
    pub fn handle_popup_event(&mut self, event: &Event) -> Option<PopupAction> {
        if !self.visible {
            return None;
        }
        match event {
            Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) => {
                let layout = self.layout?;
                if rect_contains(layout.accept, mouse.column, mouse.row) {
                    Some(PopupAction::Accept)
                } else if rect_contains(layout.reject, mouse.column, mouse.row) {
                    Some(PopupAction::Reject)
                } else if !rect_contains(layout.card, mouse.column, mouse.row) {
                    Some(PopupAction::Dismiss)
                } else {
                    None
                }
            }
            Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
                KeyCode::Tab | KeyCode::BackTab => {
                    self.accept_selected = !self.accept_selected;
                    None
                }
                KeyCode::Left => {
                    self.accept_selected = false;
                    None
                }
                KeyCode::Right => {
                    self.accept_selected = true;
                    None
                }
                KeyCode::Enter => Some(if self.accept_selected {
                    PopupAction::Accept
                } else {
                    PopupAction::Reject
                }),
                KeyCode::Esc => Some(PopupAction::Dismiss),
                _ => None,
            },
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers, MouseEvent};
    use ratatui::buffer::Buffer;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn rendered() -> (PopupCardComponent, Buffer) {
        let area = Rect::new(0, 0, 80, 30);
        let mut buf = Buffer::empty(area);
        let mut card = PopupCardComponent::new();
        card.open(PopupContent::default());
        card.render(&mut UiFrame::from_parts(area, &mut buf), area);
        (card, buf)
    }

    #[test]
    fn keys_move_selection_and_choose() {
        let (mut card, _) = rendered();
        assert_eq!(card.handle_popup_event(&key(KeyCode::Enter)), Some(PopupAction::Accept));
        assert_eq!(card.handle_popup_event(&key(KeyCode::Tab)), None);
        assert_eq!(card.handle_popup_event(&key(KeyCode::Enter)), Some(PopupAction::Reject));
        assert_eq!(card.handle_popup_event(&key(KeyCode::Right)), None);
        assert_eq!(card.handle_popup_event(&key(KeyCode::Enter)), Some(PopupAction::Accept));
        assert_eq!(card.handle_popup_event(&key(KeyCode::Esc)), Some(PopupAction::Dismiss));
    }

    #[test]
    fn clicks_resolve_against_rendered_layout() {
        let (mut card, _) = rendered();
        let layout = card.layout().unwrap();
        assert_eq!(
            card.handle_popup_event(&click(layout.accept.x, layout.accept.y)),
            Some(PopupAction::Accept)
        );
        assert_eq!(
            card.handle_popup_event(&click(layout.reject.x, layout.reject.y)),
            Some(PopupAction::Reject)
        );
        assert_eq!(
            card.handle_popup_event(&click(layout.body.x, layout.body.y)),
            None
        );
        assert_eq!(card.handle_popup_event(&click(0, 0)), Some(PopupAction::Dismiss));
    }

    #[test]
    fn renders_content_strings() {
        let (card, buf) = rendered();
        let buf = &buf;
        let layout = card.layout().unwrap();
        let text: String = (layout.card.y..layout.card.y + layout.card.height)
            .flat_map(|y| {
                (layout.card.x..layout.card.x + layout.card.width)
                    .filter_map(move |x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
            })
            .collect();
        assert!(text.contains("New Ride Request"));
        assert!(text.contains("$24.50"));
        assert!(text.contains("Accept"));
        assert!(text.contains("Reject"));
    }

    #[test]
    fn closed_card_ignores_input() {
        let mut card = PopupCardComponent::new();
        assert!(!card.handle_event(&key(KeyCode::Enter)));
        assert_eq!(card.handle_popup_event(&key(KeyCode::Enter)), None);
        assert_eq!(card.take_action(), None);
        card.open(PopupContent::default());
        assert!(card.handle_event(&key(KeyCode::Char('x'))));
        assert!(card.visible());
        assert_eq!(card.take_action(), None);
        card.close();
        assert!(!card.visible());
    }

    #[test]
    fn component_event_closes_card_and_keeps_choice() {
        let mut card = PopupCardComponent::new();
        card.open(PopupContent::default());
        assert!(card.handle_event(&key(KeyCode::Enter)));
        assert!(!card.visible());
        assert_eq!(card.take_action(), Some(PopupAction::Accept));
        assert_eq!(card.take_action(), None);

        card.open(PopupContent::default());
        assert!(card.handle_event(&key(KeyCode::Left)));
        assert!(card.visible());
        assert!(card.handle_event(&key(KeyCode::Enter)));
        assert_eq!(card.take_action(), Some(PopupAction::Reject));
    }
}
