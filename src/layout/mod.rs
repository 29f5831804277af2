use ratatui::prelude::Rect;

pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    if rect.width == 0 || rect.height == 0 {
        return false;
    }
    let max_x = rect.x.saturating_add(rect.width);
    let max_y = rect.y.saturating_add(rect.height);
    column >= rect.x && column < max_x && row >= rect.y && row < max_y
}

/// Shrink `rect` by `by` cells on every side.
pub fn inset(rect: Rect, by: u16) -> Rect {
    Rect {
        x: rect.x.saturating_add(by),
        y: rect.y.saturating_add(by),
        width: rect.width.saturating_sub(by.saturating_mul(2)),
        height: rect.height.saturating_sub(by.saturating_mul(2)),
    }
}

/// Preferred popup card width as a share of the screen.
pub const POPUP_WIDTH_PERCENT: u16 = 90;
pub const POPUP_MAX_WIDTH: u16 = 60;
pub const POPUP_HEIGHT: u16 = 16;

/// Regions of the ride-request card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupLayout {
    pub card: Rect,
    pub body: Rect,
    pub reject: Rect,
    pub accept: Rect,
}

/// Lay out the popup card centred in `area`: a bordered card with the body
/// on top and the reject/accept buttons side by side on the last inner row.
///
/// Returns `None` when the area is too small to show both buttons.
pub fn popup_layout(area: Rect) -> Option<PopupLayout> {
    let preferred = (u32::from(area.width) * u32::from(POPUP_WIDTH_PERCENT) / 100) as u16;
    let width = preferred.min(POPUP_MAX_WIDTH).min(area.width);
    let height = POPUP_HEIGHT.min(area.height);
    if width < 12 || height < 5 {
        return None;
    }
    let card = crate::ui::centered_rect(area, width, height);
    let inner = inset(card, 1);
    let button_row = inner.y.saturating_add(inner.height.saturating_sub(1));
    let half = inner.width / 2;
    let reject = Rect {
        x: inner.x.saturating_add(1),
        y: button_row,
        width: half.saturating_sub(2),
        height: 1,
    };
    let accept = Rect {
        x: inner.x.saturating_add(half).saturating_add(1),
        y: button_row,
        width: inner.width.saturating_sub(half).saturating_sub(2),
        height: 1,
    };
    let body = Rect {
        x: inner.x.saturating_add(1),
        y: inner.y,
        width: inner.width.saturating_sub(2),
        height: inner.height.saturating_sub(2),
    };
    Some(PopupLayout {
        card,
        body,
        reject,
        accept,
    })
}
