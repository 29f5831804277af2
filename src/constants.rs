//! Shared crate-wide constants.

/// Minimum pointer displacement, in pixels, before a gesture counts as a drag.
///
/// Anything at or below this distance from the press-down point is treated
/// as finger jitter and the gesture still resolves to a tap on release.
pub const DRAG_THRESHOLD_PX: f32 = 15.0;

/// Default hit-box width of the bubble in pixels.
pub const DEFAULT_WIDGET_WIDTH: i32 = 100;

/// Default hit-box height of the bubble in pixels.
pub const DEFAULT_WIDGET_HEIGHT: i32 = 100;

/// Largest accepted bubble width or height in pixels.
pub const MAX_WIDGET_DIMENSION_PX: i32 = 100_000;

/// Gap kept between the bubble and the left/right edge after snapping.
pub const SNAP_SIDE_MARGIN: i32 = 20;

/// Gap kept between the bubble and the top/bottom edge after snapping.
///
/// Also the lower bound of the cross-axis clamp when snapping to a side.
pub const SNAP_VERTICAL_MARGIN: i32 = 50;

/// Inset subtracted from the far screen edge for the cross-axis clamp after a
/// snap.
///
/// Snapping to the left edge clamps `y` into
/// `SNAP_VERTICAL_MARGIN..=screen_height - SNAP_CROSS_AXIS_FAR_INSET`, which
/// keeps the bubble out of the corners. This range is intentionally different
/// from the drag-time clamp.
pub const SNAP_CROSS_AXIS_FAR_INSET: i32 = 150;

/// Length of the glide to the snap target, in milliseconds.
pub const SNAP_ANIMATION_MS: u64 = 300;

/// Length of each half of the tap pulse (shrink, then grow back).
pub const PRESS_FEEDBACK_HALF_MS: u64 = 100;

/// Smallest scale reached by the tap pulse.
pub const PRESS_FEEDBACK_MIN_SCALE: f32 = 0.8;

/// Upper bound accepted for a configured snap animation.
pub const MAX_SNAP_ANIMATION_MS: u64 = 5_000;
