//! Overlay host backed by a terminal grid.
//!
//! The positioner works in pixels. Each terminal cell stands for a block of
//! virtual pixels given by [`CellMetrics`], so a 120x40 terminal at the
//! default 10x20 metrics is a 1200x800 px screen and the default 100x100 px
//! bubble covers 10x5 cells.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::config::CellMetrics;
use crate::geometry::{WidgetPosition, WidgetSize};
use crate::gesture::{PointerEvent, PointerSample};
use crate::layout::rect_contains;
use crate::overlay::OverlayHost;

#[derive(Debug, Clone)]
pub struct TerminalHost {
    cells: CellMetrics,
    widget: Option<WidgetPosition>,
    pointer_captured: bool,
    dirty: bool,
    updates: u64,
}

impl TerminalHost {
    pub fn new(cells: CellMetrics) -> Self {
        Self {
            cells,
            widget: None,
            pointer_captured: false,
            dirty: true,
            updates: 0,
        }
    }

    pub fn cells(&self) -> CellMetrics {
        self.cells
    }

    pub fn widget_position(&self) -> Option<WidgetPosition> {
        self.widget
    }

    pub fn is_attached(&self) -> bool {
        self.widget.is_some()
    }

    /// Number of position writes received, animation frames included.
    pub fn update_count(&self) -> u64 {
        self.updates
    }

    /// Returns and clears the repaint request flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Screen size in pixels for a terminal area.
    pub fn screen_pixels(&self, area: Rect) -> (i32, i32) {
        (
            i32::from(area.width) * self.cells.px_per_col,
            i32::from(area.height) * self.cells.px_per_row,
        )
    }

    /// Pixel coordinates of the centre of a cell.
    pub fn pointer_sample(&self, column: u16, row: u16) -> PointerSample {
        let x = i32::from(column) * self.cells.px_per_col + self.cells.px_per_col / 2;
        let y = i32::from(row) * self.cells.px_per_row + self.cells.px_per_row / 2;
        PointerSample::new(x as f32, y as f32)
    }

    /// Cells covered by the widget, or `None` while it is not on screen.
    ///
    /// `scale` shrinks the box around its centre (tap pulse). The result is
    /// never smaller than one cell.
    pub fn widget_rect(&self, size: WidgetSize, scale: f32) -> Option<Rect> {
        let pos = self.widget?;
        let cols = div_ceil(size.width(), self.cells.px_per_col).max(1);
        let rows = div_ceil(size.height(), self.cells.px_per_row).max(1);
        let scale = f64::from(scale);
        let scaled_cols = (f64::from(cols) * scale).round().max(1.0) as i32;
        let scaled_rows = (f64::from(rows) * scale).round().max(1.0) as i32;
        let x = pos.x / self.cells.px_per_col + (cols - scaled_cols) / 2;
        let y = pos.y / self.cells.px_per_row + (rows - scaled_rows) / 2;
        Some(Rect {
            x: to_u16(x),
            y: to_u16(y),
            width: to_u16(scaled_cols),
            height: to_u16(scaled_rows),
        })
    }

    /// Translate a terminal mouse event into a pointer event for the bubble.
    ///
    /// Only a left press that lands on the bubble opens a gesture; after that
    /// every drag and the release are forwarded until the button goes up,
    /// matching a touch listener attached to the bubble view.
    pub fn translate_mouse(&mut self, mouse: &MouseEvent, size: WidgetSize) -> Option<PointerEvent> {
        let sample = self.pointer_sample(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let hit = self
                    .widget_rect(size, 1.0)
                    .is_some_and(|rect| rect_contains(rect, mouse.column, mouse.row));
                self.pointer_captured = hit;
                hit.then_some(PointerEvent::Down(sample))
            }
            MouseEventKind::Drag(MouseButton::Left) if self.pointer_captured => {
                Some(PointerEvent::Move(sample))
            }
            MouseEventKind::Up(MouseButton::Left) if self.pointer_captured => {
                self.pointer_captured = false;
                Some(PointerEvent::Up(sample))
            }
            _ => None,
        }
    }

    /// Drop any captured pointer, e.g. when focus leaves the terminal.
    pub fn release_pointer(&mut self) -> Option<PointerEvent> {
        std::mem::take(&mut self.pointer_captured).then_some(PointerEvent::Cancel)
    }
}

impl OverlayHost for TerminalHost {
    fn set_widget_position(&mut self, position: WidgetPosition) {
        if self.widget.is_none() {
            return;
        }
        self.widget = Some(position);
        self.updates += 1;
        self.dirty = true;
    }

    fn add_widget(&mut self, position: WidgetPosition) {
        self.widget = Some(position);
        self.dirty = true;
    }

    fn remove_widget(&mut self) {
        self.widget = None;
        self.pointer_captured = false;
        self.dirty = true;
    }
}

fn div_ceil(value: i32, step: i32) -> i32 {
    let cells = (i64::from(value) + i64::from(step) - 1) / i64::from(step);
    cells.clamp(0, i64::from(i32::MAX)) as i32
}

fn to_u16(value: i32) -> u16 {
    value.clamp(0, i32::from(u16::MAX)) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn attached() -> TerminalHost {
        let mut host = TerminalHost::new(CellMetrics::default());
        host.add_widget(WidgetPosition::new(500, 200));
        host
    }

    #[test]
    fn maps_cells_to_pixels() {
        let host = TerminalHost::new(CellMetrics::default());
        assert_eq!(host.screen_pixels(Rect::new(0, 0, 120, 40)), (1200, 800));
        assert_eq!(host.pointer_sample(3, 2), PointerSample::new(35.0, 50.0));
    }

    #[test]
    fn widget_rect_covers_size_in_cells() {
        let host = attached();
        assert_eq!(
            host.widget_rect(WidgetSize::default(), 1.0),
            Some(Rect::new(50, 10, 10, 5))
        );
        // pulse shrinks around the centre
        assert_eq!(
            host.widget_rect(WidgetSize::default(), 0.8),
            Some(Rect::new(51, 10, 8, 4))
        );
    }

    #[test]
    fn huge_widget_rect_saturates() {
        let host = attached();
        let size = WidgetSize::new(i32::MAX, i32::MAX).unwrap();
        let rect = host.widget_rect(size, 1.0).unwrap();
        assert_eq!((rect.x, rect.y), (50, 10));
        assert_eq!((rect.width, rect.height), (u16::MAX, u16::MAX));
        assert_eq!(div_ceil(i32::MAX, 10), 214_748_365);
    }

    #[test]
    fn press_outside_bubble_is_not_captured() {
        let mut host = attached();
        let size = WidgetSize::default();
        assert_eq!(
            host.translate_mouse(&mouse(MouseEventKind::Down(MouseButton::Left), 0, 0), size),
            None
        );
        assert_eq!(
            host.translate_mouse(&mouse(MouseEventKind::Drag(MouseButton::Left), 5, 5), size),
            None
        );
        assert_eq!(
            host.translate_mouse(&mouse(MouseEventKind::Up(MouseButton::Left), 5, 5), size),
            None
        );
    }

    #[test]
    fn press_on_bubble_captures_until_release() {
        let mut host = attached();
        let size = WidgetSize::default();
        assert!(matches!(
            host.translate_mouse(&mouse(MouseEventKind::Down(MouseButton::Left), 52, 11), size),
            Some(PointerEvent::Down(_))
        ));
        // drag far outside the bubble rect is still forwarded
        assert!(matches!(
            host.translate_mouse(&mouse(MouseEventKind::Drag(MouseButton::Left), 2, 30), size),
            Some(PointerEvent::Move(_))
        ));
        assert!(matches!(
            host.translate_mouse(&mouse(MouseEventKind::Up(MouseButton::Left), 2, 30), size),
            Some(PointerEvent::Up(_))
        ));
        assert_eq!(host.release_pointer(), None);
    }

    #[test]
    fn detached_host_ignores_position_writes() {
        let mut host = TerminalHost::new(CellMetrics::default());
        host.set_widget_position(WidgetPosition::new(1, 1));
        assert_eq!(host.widget_position(), None);
        assert_eq!(host.update_count(), 0);
        host.add_widget(WidgetPosition::new(1, 1));
        assert!(host.take_dirty());
        assert!(!host.take_dirty());
        host.set_widget_position(WidgetPosition::new(2, 2));
        assert_eq!(host.update_count(), 1);
        host.remove_widget();
        assert!(!host.is_attached());
    }
}
