//! Pointer gesture interpretation for the floating bubble.
//!
//! [`Positioner`] is the single owner of the bubble's [`WidgetPosition`]. Hosts
//! feed it raw [`PointerEvent`]s and act on the returned [`GestureOutcome`]:
//! repaint on `Moved`, open the popup on `Tap`, glide to the target on
//! `AnimateTo`. Drag state lives in an explicit [`DragSession`] value that is
//! created on press-down and consumed on release.

use crate::constants::DRAG_THRESHOLD_PX;
use crate::error::OverlayResult;
use crate::geometry::{ScreenBounds, WidgetPosition, WidgetSize, clamp_to_bounds};
use crate::snap::{SnapTarget, snap_target};

/// Raw pointer coordinates in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
}

impl PointerSample {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(PointerSample),
    Move(PointerSample),
    Up(PointerSample),
    /// The platform aborted the gesture (e.g. another window took the pointer).
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Nothing changed; the event arrived outside a session or was jitter.
    Ignored,
    /// A session started on press-down.
    Pressed,
    /// The widget moved and the host should repaint.
    Moved(WidgetPosition),
    /// The gesture never crossed the drag threshold.
    Tap,
    /// A drag ended; the host should glide the widget to the target.
    AnimateTo(SnapTarget),
    /// The session was abandoned without a tap or snap.
    Cancelled,
}

/// State of one press-to-release gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub origin: WidgetPosition,
    pub start_pointer: PointerSample,
    pub is_dragging: bool,
    pub bounds: ScreenBounds,
}

impl DragSession {
    pub fn new(origin: WidgetPosition, start_pointer: PointerSample, bounds: ScreenBounds) -> Self {
        Self {
            origin,
            start_pointer,
            is_dragging: false,
            bounds,
        }
    }

    /// Feed one move sample. Returns the new clamped position once the session
    /// is dragging, `None` while it is still within the tap slop.
    pub fn track(
        &mut self,
        sample: PointerSample,
        size: WidgetSize,
        threshold: f32,
    ) -> Option<WidgetPosition> {
        let dx = sample.x - self.start_pointer.x;
        let dy = sample.y - self.start_pointer.y;
        if !self.is_dragging && dx.hypot(dy) > threshold {
            self.is_dragging = true;
            tracing::debug!(dx, dy, "drag threshold crossed");
        }
        if !self.is_dragging {
            return None;
        }
        let moved = WidgetPosition::new(
            self.origin.x.saturating_add(dx as i32),
            self.origin.y.saturating_add(dy as i32),
        );
        Some(clamp_to_bounds(moved, self.bounds, size))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum GestureState {
    Idle,
    Tracking(DragSession),
}

#[derive(Debug, Clone)]
pub struct Positioner {
    bounds: ScreenBounds,
    size: WidgetSize,
    position: WidgetPosition,
    threshold: f32,
    state: GestureState,
}

impl Positioner {
    /// Creates a positioner with the widget at `position`, clamped on screen.
    ///
    /// Fails with [`crate::OverlayError::InvalidBounds`] when either screen
    /// dimension is not positive.
    pub fn new(
        width: i32,
        height: i32,
        size: WidgetSize,
        position: WidgetPosition,
    ) -> OverlayResult<Self> {
        let bounds = ScreenBounds::new(width, height).inspect_err(|err| {
            tracing::warn!(%err, "rejecting overlay session");
        })?;
        Ok(Self::with_bounds(bounds, size, position))
    }

    pub fn with_bounds(bounds: ScreenBounds, size: WidgetSize, position: WidgetPosition) -> Self {
        Self {
            bounds,
            size,
            position: clamp_to_bounds(position, bounds, size),
            threshold: DRAG_THRESHOLD_PX,
            state: GestureState::Idle,
        }
    }

    pub fn set_drag_threshold(&mut self, threshold: f32) {
        self.threshold = threshold.max(0.0);
    }

    pub fn drag_threshold(&self) -> f32 {
        self.threshold
    }

    pub fn position(&self) -> WidgetPosition {
        self.position
    }

    pub fn bounds(&self) -> ScreenBounds {
        self.bounds
    }

    pub fn widget_size(&self) -> WidgetSize {
        self.size
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            GestureState::Idle => None,
            GestureState::Tracking(session) => Some(session),
        }
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self.state, GestureState::Tracking(_))
    }

    pub fn is_dragging(&self) -> bool {
        self.session().is_some_and(|s| s.is_dragging)
    }

    /// Write path for hosts (animation ticks, programmatic moves).
    ///
    /// The value is clamped so the widget stays fully on screen.
    pub fn set_position(&mut self, position: WidgetPosition) -> WidgetPosition {
        self.position = clamp_to_bounds(position, self.bounds, self.size);
        self.position
    }

    /// Swap in new screen bounds (rotation, terminal resize) and pull the
    /// widget back on screen. A session in progress clamps its remaining
    /// moves against the new bounds.
    pub fn set_screen_bounds(&mut self, width: i32, height: i32) -> OverlayResult<WidgetPosition> {
        self.bounds = ScreenBounds::new(width, height)?;
        self.position = clamp_to_bounds(self.position, self.bounds, self.size);
        if let GestureState::Tracking(session) = &mut self.state {
            session.bounds = self.bounds;
        }
        Ok(self.position)
    }

    pub fn handle(&mut self, event: PointerEvent) -> GestureOutcome {
        match event {
            PointerEvent::Down(sample) => {
                let session = DragSession::new(self.position, sample, self.bounds);
                tracing::debug!(
                    x = self.position.x,
                    y = self.position.y,
                    "gesture session started"
                );
                self.state = GestureState::Tracking(session);
                GestureOutcome::Pressed
            }
            PointerEvent::Move(sample) => {
                let GestureState::Tracking(session) = &mut self.state else {
                    return GestureOutcome::Ignored;
                };
                match session.track(sample, self.size, self.threshold) {
                    Some(pos) if pos != self.position => {
                        self.position = pos;
                        GestureOutcome::Moved(pos)
                    }
                    _ => GestureOutcome::Ignored,
                }
            }
            PointerEvent::Up(_) => {
                let GestureState::Tracking(session) =
                    std::mem::replace(&mut self.state, GestureState::Idle)
                else {
                    return GestureOutcome::Ignored;
                };
                // bounds may have changed mid-gesture
                self.position = clamp_to_bounds(self.position, self.bounds, self.size);
                if !session.is_dragging {
                    tracing::debug!("gesture classified as tap");
                    return GestureOutcome::Tap;
                }
                let target = snap_target(self.position, self.bounds, self.size);
                tracing::debug!(
                    edge = ?target.edge,
                    x = target.position.x,
                    y = target.position.y,
                    "drag released, snapping"
                );
                GestureOutcome::AnimateTo(target)
            }
            PointerEvent::Cancel => {
                let previous = std::mem::replace(&mut self.state, GestureState::Idle);
                if matches!(previous, GestureState::Tracking(_)) {
                    self.position = clamp_to_bounds(self.position, self.bounds, self.size);
                    GestureOutcome::Cancelled
                } else {
                    GestureOutcome::Ignored
                }
            }
        }
    }

    /// Feed several events and keep the last outcome that was not `Ignored`.
    pub fn handle_all<I>(&mut self, events: I) -> GestureOutcome
    where
        I: IntoIterator<Item = PointerEvent>,
    {
        let mut last = GestureOutcome::Ignored;
        for event in events {
            let outcome = self.handle(event);
            if outcome != GestureOutcome::Ignored {
                last = outcome;
            }
        }
        last
    }
}
