use crate::ui::UiFrame;
use ratatui::backend::Backend;
use ratatui::layout::Rect;
use std::io;

pub trait OutputDriver {
    type Backend: Backend;

    fn enter(&mut self) -> io::Result<()>;
    fn exit(&mut self) -> io::Result<()>;

    /// Drawable area in cells.
    fn size(&self) -> io::Result<Rect>;

    fn draw<F>(&mut self, f: F) -> io::Result<()>
    where
        F: FnOnce(UiFrame<'_>);
}
