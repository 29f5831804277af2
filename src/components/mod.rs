use crossterm::event::Event;
use ratatui::layout::Rect;

use crate::ui::UiFrame;

pub mod bubble;
pub mod popup_card;
pub mod status_bar;

pub use bubble::BubbleComponent;
pub use popup_card::PopupCardComponent;
pub use status_bar::StatusBar;

pub trait Component {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect);

    fn handle_event(&mut self, _event: &Event) -> bool {
        false
    }
}
