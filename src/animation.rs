//! Time-stepped interpolation for the snap glide and the tap pulse.
//!
//! Nothing here owns a clock. Hosts call [`SnapAnimation::advance`] from their
//! render tick with the time elapsed since the previous tick.

use std::f32::consts::PI;
use std::time::Duration;

use crate::constants::{PRESS_FEEDBACK_HALF_MS, PRESS_FEEDBACK_MIN_SCALE, SNAP_ANIMATION_MS};
use crate::geometry::WidgetPosition;

/// Linear interpolation between two pixel coordinates.
///
/// Once `elapsed_ms >= duration_ms` (or the duration is zero) the result is
/// exactly `end`, so an animation always lands on its target.
pub fn interpolate(start: i32, end: i32, elapsed_ms: u64, duration_ms: u64) -> i32 {
    interpolate_eased(start, end, elapsed_ms, duration_ms, Easing::Linear)
}

pub fn interpolate_eased(
    start: i32,
    end: i32,
    elapsed_ms: u64,
    duration_ms: u64,
    easing: Easing,
) -> i32 {
    if duration_ms == 0 || elapsed_ms >= duration_ms {
        return end;
    }
    let fraction = f64::from(easing.transform(elapsed_ms as f32 / duration_ms as f32));
    let span = i64::from(end) - i64::from(start);
    let value = i64::from(start) + (span as f64 * fraction).round() as i64;
    // fraction is in [0, 1], so value lies between start and end
    value.clamp(i64::from(start.min(end)), i64::from(start.max(end))) as i32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Slow start and end, fast middle. The default curve of platform
    /// property animators.
    #[default]
    AccelerateDecelerate,
}

impl Easing {
    /// Map a linear fraction in `[0, 1]` onto the curve.
    pub fn transform(&self, fraction: f32) -> f32 {
        let t = fraction.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
        }
    }
}

/// Glide from the release point to a snap target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapAnimation {
    from: WidgetPosition,
    to: WidgetPosition,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
}

impl SnapAnimation {
    pub fn new(from: WidgetPosition, to: WidgetPosition) -> Self {
        Self::with_timing(
            from,
            to,
            Duration::from_millis(SNAP_ANIMATION_MS),
            Easing::default(),
        )
    }

    pub fn with_timing(
        from: WidgetPosition,
        to: WidgetPosition,
        duration: Duration,
        easing: Easing,
    ) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing,
        }
    }

    pub fn target(&self) -> WidgetPosition {
        self.to
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Position at the current elapsed time without advancing.
    pub fn current(&self) -> WidgetPosition {
        let elapsed = self.elapsed.as_millis() as u64;
        let total = self.duration.as_millis() as u64;
        WidgetPosition::new(
            interpolate_eased(self.from.x, self.to.x, elapsed, total, self.easing),
            interpolate_eased(self.from.y, self.to.y, elapsed, total, self.easing),
        )
    }

    /// Step forward by `dt` and return the position for this frame.
    pub fn advance(&mut self, dt: Duration) -> WidgetPosition {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        self.current()
    }
}

/// Shrink-then-grow pulse played when the bubble is tapped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressFeedback {
    elapsed: Duration,
    half: Duration,
}

impl Default for PressFeedback {
    fn default() -> Self {
        Self::new()
    }
}

impl PressFeedback {
    pub fn new() -> Self {
        Self {
            elapsed: Duration::ZERO,
            half: Duration::from_millis(PRESS_FEEDBACK_HALF_MS),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.half * 2
    }

    pub fn advance(&mut self, dt: Duration) -> f32 {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.half * 2);
        self.scale()
    }

    /// Current scale factor, 1.0 at rest.
    pub fn scale(&self) -> f32 {
        let half = self.half.as_secs_f32();
        if half <= 0.0 {
            return 1.0;
        }
        let t = self.elapsed.as_secs_f32();
        let depth = 1.0 - PRESS_FEEDBACK_MIN_SCALE;
        if t <= half {
            1.0 - depth * (t / half)
        } else {
            PRESS_FEEDBACK_MIN_SCALE + depth * ((t - half) / half).min(1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolate_hits_endpoints() {
        assert_eq!(interpolate(100, 300, 0, 300), 100);
        assert_eq!(interpolate(100, 300, 150, 300), 200);
        assert_eq!(interpolate(100, 300, 300, 300), 300);
        assert_eq!(interpolate(100, 300, 9_999, 300), 300);
        assert_eq!(interpolate(100, 300, 0, 0), 300);
        assert_eq!(interpolate(300, 100, 75, 300), 250);
    }

    #[test]
    fn interpolate_spans_full_i32_range() {
        assert_eq!(interpolate(i32::MIN, i32::MAX, 0, 300), i32::MIN);
        assert_eq!(interpolate(i32::MIN, i32::MAX, 300, 300), i32::MAX);
        let mid = interpolate(i32::MIN, i32::MAX, 150, 300);
        assert!((-1..=1).contains(&mid));
        let eased = interpolate_eased(i32::MAX, i32::MIN, 100, 300, Easing::AccelerateDecelerate);
        assert!(eased > 0);
    }

    #[test]
    fn accelerate_decelerate_is_symmetric() {
        let e = Easing::AccelerateDecelerate;
        assert!(e.transform(0.0).abs() < 1e-6);
        assert!((e.transform(1.0) - 1.0).abs() < 1e-6);
        assert!((e.transform(0.5) - 0.5).abs() < 1e-6);
        // slow start
        assert!(e.transform(0.1) < 0.1);
        // fast finish approach
        assert!(e.transform(0.9) > 0.9);
    }

    #[test]
    fn snap_animation_lands_on_target() {
        let mut anim = SnapAnimation::new(WidgetPosition::new(970, 900), WidgetPosition::new(960, 900));
        let mut last = anim.current();
        assert_eq!(last, WidgetPosition::new(970, 900));
        let mut steps = 0;
        while !anim.is_finished() {
            let next = anim.advance(Duration::from_millis(16));
            assert!(next.x <= last.x, "glide must be monotonic");
            last = next;
            steps += 1;
        }
        assert_eq!(last, WidgetPosition::new(960, 900));
        assert_eq!(steps, 19);
    }

    #[test]
    fn zero_duration_jumps_immediately() {
        let mut anim = SnapAnimation::with_timing(
            WidgetPosition::new(0, 0),
            WidgetPosition::new(20, 50),
            Duration::ZERO,
            Easing::Linear,
        );
        assert!(anim.is_finished());
        assert_eq!(anim.advance(Duration::ZERO), WidgetPosition::new(20, 50));
    }

    #[test]
    fn press_feedback_dips_and_recovers() {
        let mut pulse = PressFeedback::new();
        assert_eq!(pulse.scale(), 1.0);
        let bottom = pulse.advance(Duration::from_millis(100));
        assert!((bottom - PRESS_FEEDBACK_MIN_SCALE).abs() < 1e-4);
        assert!(!pulse.is_finished());
        let end = pulse.advance(Duration::from_millis(250));
        assert!((end - 1.0).abs() < 1e-4);
        assert!(pulse.is_finished());
    }
}
