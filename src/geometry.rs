use crate::constants::{DEFAULT_WIDGET_HEIGHT, DEFAULT_WIDGET_WIDTH, SNAP_SIDE_MARGIN};
use crate::error::{OverlayError, OverlayResult};

/// Screen dimensions in pixels. Always strictly positive once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenBounds {
    width: i32,
    height: i32,
}

impl ScreenBounds {
    pub fn new(width: i32, height: i32) -> OverlayResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(OverlayError::InvalidBounds { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }
}

/// Hit-box size of the floating widget in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetSize {
    width: i32,
    height: i32,
}

impl WidgetSize {
    pub fn new(width: i32, height: i32) -> OverlayResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(OverlayError::InvalidWidgetSize { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }
}

impl Default for WidgetSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDGET_WIDTH,
            height: DEFAULT_WIDGET_HEIGHT,
        }
    }
}

/// Top-left corner of the widget's bounding box, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WidgetPosition {
    pub x: i32,
    pub y: i32,
}

impl WidgetPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Resting place for a freshly shown bubble: hugging the right edge,
    /// vertically centred.
    pub fn initial(bounds: ScreenBounds, size: WidgetSize) -> Self {
        let pos = Self {
            x: bounds.width() - size.width() - SNAP_SIDE_MARGIN,
            y: (bounds.height() - size.height()) / 2,
        };
        clamp_to_bounds(pos, bounds, size)
    }
}

/// `max(lo, min(value, hi))`.
///
/// Unlike `i32::clamp` this never panics when `hi < lo`; the lower bound wins,
/// which is what pins a widget larger than the screen to the origin.
pub fn clamp_axis(value: i32, lo: i32, hi: i32) -> i32 {
    lo.max(value.min(hi))
}

/// Keep the whole widget on screen: `0..=W-w` by `0..=H-h`.
pub fn clamp_to_bounds(
    pos: WidgetPosition,
    bounds: ScreenBounds,
    size: WidgetSize,
) -> WidgetPosition {
    WidgetPosition {
        x: clamp_axis(pos.x, 0, bounds.width() - size.width()),
        y: clamp_axis(pos.y, 0, bounds.height() - size.height()),
    }
}

pub fn within_bounds(pos: WidgetPosition, bounds: ScreenBounds, size: WidgetSize) -> bool {
    clamp_to_bounds(pos, bounds, size) == pos
}
