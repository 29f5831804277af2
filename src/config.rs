use std::time::Duration;

use crate::animation::Easing;
use crate::constants::{
    DRAG_THRESHOLD_PX, MAX_SNAP_ANIMATION_MS, MAX_WIDGET_DIMENSION_PX, SNAP_ANIMATION_MS,
};
use crate::error::{OverlayError, OverlayResult};
use crate::geometry::WidgetSize;
use crate::overlay::AnimationSettings;

/// Virtual pixels covered by one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMetrics {
    pub px_per_col: i32,
    pub px_per_row: i32,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            px_per_col: 10,
            px_per_row: 20,
        }
    }
}

impl CellMetrics {
    pub fn new(px_per_col: i32, px_per_row: i32) -> OverlayResult<Self> {
        if px_per_col <= 0 || px_per_row <= 0 {
            return Err(OverlayError::InvalidConfig(format!(
                "cell metrics must be positive, got {px_per_col}x{px_per_row}"
            )));
        }
        Ok(Self {
            px_per_col,
            px_per_row,
        })
    }
}

/// Validated tuning for one overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayConfig {
    pub widget_size: WidgetSize,
    pub drag_threshold: f32,
    pub animation: AnimationSettings,
    pub cells: CellMetrics,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            widget_size: WidgetSize::default(),
            drag_threshold: DRAG_THRESHOLD_PX,
            animation: AnimationSettings {
                duration: Duration::from_millis(SNAP_ANIMATION_MS),
                easing: Easing::default(),
            },
            cells: CellMetrics::default(),
        }
    }
}

/// Unvalidated values as they come off the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawOverlayConfig {
    pub widget_width: i32,
    pub widget_height: i32,
    pub drag_threshold: f32,
    pub snap_duration_ms: u64,
    pub easing: Easing,
    pub px_per_col: i32,
    pub px_per_row: i32,
}

impl TryFrom<RawOverlayConfig> for OverlayConfig {
    type Error = OverlayError;

    fn try_from(raw: RawOverlayConfig) -> Result<Self, Self::Error> {
        let widget_size = WidgetSize::new(raw.widget_width, raw.widget_height)?;
        if raw.widget_width > MAX_WIDGET_DIMENSION_PX || raw.widget_height > MAX_WIDGET_DIMENSION_PX {
            return Err(OverlayError::InvalidConfig(format!(
                "widget dimensions must be at most {MAX_WIDGET_DIMENSION_PX} px"
            )));
        }
        if !raw.drag_threshold.is_finite() || raw.drag_threshold < 0.0 {
            return Err(OverlayError::InvalidConfig(
                "drag threshold must be a non-negative number".to_string(),
            ));
        }
        if raw.snap_duration_ms > MAX_SNAP_ANIMATION_MS {
            return Err(OverlayError::InvalidConfig(format!(
                "snap duration must be at most {MAX_SNAP_ANIMATION_MS} ms"
            )));
        }
        Ok(Self {
            widget_size,
            drag_threshold: raw.drag_threshold,
            animation: AnimationSettings {
                duration: Duration::from_millis(raw.snap_duration_ms),
                easing: raw.easing,
            },
            cells: CellMetrics::new(raw.px_per_col, raw.px_per_row)?,
        })
    }
}
