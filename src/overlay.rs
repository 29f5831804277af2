use std::fmt;
use std::time::Duration;

use crate::animation::{Easing, PressFeedback, SnapAnimation};
use crate::constants::SNAP_ANIMATION_MS;
use crate::error::OverlayResult;
use crate::geometry::{ScreenBounds, WidgetPosition, WidgetSize};
use crate::gesture::{GestureOutcome, PointerEvent, Positioner};

/// The window layer that actually puts the bubble on screen.
pub trait OverlayHost {
    fn set_widget_position(&mut self, position: WidgetPosition);
    fn add_widget(&mut self, position: WidgetPosition);
    fn remove_widget(&mut self);
}

impl<T: OverlayHost + ?Sized> OverlayHost for &mut T {
    fn set_widget_position(&mut self, position: WidgetPosition) {
        (**self).set_widget_position(position)
    }

    fn add_widget(&mut self, position: WidgetPosition) {
        (**self).add_widget(position)
    }

    fn remove_widget(&mut self) {
        (**self).remove_widget()
    }
}

pub type TapHandler = Box<dyn FnMut()>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSettings {
    pub duration: Duration,
    pub easing: Easing,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(SNAP_ANIMATION_MS),
            easing: Easing::default(),
        }
    }
}

/// Glue between a [`Positioner`], its host window and the tap handler.
///
/// Owns at most one in-flight [`SnapAnimation`]. A new press cancels it on the
/// spot and the gesture starts from wherever the glide had got to.
pub struct BubbleOverlay<H: OverlayHost> {
    host: H,
    positioner: Positioner,
    on_tap: TapHandler,
    animation: Option<SnapAnimation>,
    settings: AnimationSettings,
    feedback: Option<PressFeedback>,
    visible: bool,
    expanded: bool,
}

impl<H: OverlayHost> fmt::Debug for BubbleOverlay<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BubbleOverlay")
            .field("positioner", &self.positioner)
            .field("animation", &self.animation)
            .field("visible", &self.visible)
            .field("expanded", &self.expanded)
            .finish_non_exhaustive()
    }
}

impl<H: OverlayHost> BubbleOverlay<H> {
    pub fn new<F>(host: H, positioner: Positioner, on_tap: F) -> Self
    where
        F: FnMut() + 'static,
    {
        Self {
            host,
            positioner,
            on_tap: Box::new(on_tap),
            animation: None,
            settings: AnimationSettings::default(),
            feedback: None,
            visible: false,
            expanded: false,
        }
    }

    /// Positioner at the default resting place for `bounds`.
    pub fn at_initial_position<F>(
        host: H,
        bounds: ScreenBounds,
        size: WidgetSize,
        on_tap: F,
    ) -> Self
    where
        F: FnMut() + 'static,
    {
        let positioner =
            Positioner::with_bounds(bounds, size, WidgetPosition::initial(bounds, size));
        Self::new(host, positioner, on_tap)
    }

    pub fn set_animation_settings(&mut self, settings: AnimationSettings) {
        self.settings = settings;
    }

    pub fn positioner(&self) -> &Positioner {
        &self.positioner
    }

    pub fn positioner_mut(&mut self) -> &mut Positioner {
        &mut self.positioner
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn position(&self) -> WidgetPosition {
        self.positioner.position()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn animation_target(&self) -> Option<WidgetPosition> {
        self.animation.as_ref().map(SnapAnimation::target)
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// While expanded (popup open) move samples are dropped so the bubble
    /// stays put; taps still get through.
    pub fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }

    /// Scale of the tap pulse, 1.0 when idle.
    pub fn feedback_scale(&self) -> f32 {
        self.feedback.as_ref().map_or(1.0, PressFeedback::scale)
    }

    pub fn show(&mut self) {
        if self.visible {
            return;
        }
        self.visible = true;
        let pos = self.positioner.position();
        tracing::info!(x = pos.x, y = pos.y, "bubble added");
        self.host.add_widget(pos);
    }

    pub fn hide(&mut self) {
        if !self.visible {
            return;
        }
        self.visible = false;
        self.animation = None;
        self.feedback = None;
        self.positioner.handle(PointerEvent::Cancel);
        tracing::info!("bubble removed");
        self.host.remove_widget();
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> GestureOutcome {
        if !self.visible {
            return GestureOutcome::Ignored;
        }
        if self.expanded && matches!(event, PointerEvent::Move(_)) {
            return GestureOutcome::Ignored;
        }
        if matches!(event, PointerEvent::Down(_)) && self.animation.take().is_some() {
            // the positioner already holds the last intermediate frame
            tracing::debug!("snap animation cancelled by new press");
        }

        let outcome = self.positioner.handle(event);
        match outcome {
            GestureOutcome::Moved(pos) => self.host.set_widget_position(pos),
            GestureOutcome::Tap => {
                self.feedback = Some(PressFeedback::new());
                (self.on_tap)();
            }
            GestureOutcome::AnimateTo(target) => {
                self.animation = Some(SnapAnimation::with_timing(
                    self.positioner.position(),
                    target.position,
                    self.settings.duration,
                    self.settings.easing,
                ));
            }
            GestureOutcome::Ignored | GestureOutcome::Pressed | GestureOutcome::Cancelled => {}
        }
        outcome
    }

    /// Advance animations by `dt`. Returns `true` when anything changed and
    /// the host should redraw.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let mut changed = false;
        if let Some(pulse) = self.feedback.as_mut() {
            pulse.advance(dt);
            changed = true;
            if pulse.is_finished() {
                self.feedback = None;
            }
        }
        if let Some(anim) = self.animation.as_mut() {
            let frame = anim.advance(dt);
            let finished = anim.is_finished();
            let applied = self.positioner.set_position(frame);
            self.host.set_widget_position(applied);
            changed = true;
            if finished {
                tracing::debug!(x = applied.x, y = applied.y, "snap animation finished");
                self.animation = None;
            }
        }
        changed
    }

    /// Forward new screen bounds; a running glide is dropped and the widget is
    /// pulled back on screen.
    pub fn resize(&mut self, width: i32, height: i32) -> OverlayResult<WidgetPosition> {
        let pos = self.positioner.set_screen_bounds(width, height)?;
        self.animation = None;
        if self.visible {
            self.host.set_widget_position(pos);
        }
        Ok(pos)
    }
}
