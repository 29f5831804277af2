use std::io;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::layout::Rect;

use crate::components::{BubbleComponent, Component, PopupCardComponent, StatusBar};
use crate::config::OverlayConfig;
use crate::event_loop::ControlFlow;
use crate::geometry::{ScreenBounds, WidgetPosition};
use crate::gesture::{GestureOutcome, PointerEvent, Positioner};
use crate::overlay::BubbleOverlay;
use crate::service::{BubbleOptions, BubbleService, PopupAction, StaticPermission};
use crate::terminal_host::TerminalHost;
use crate::ui::UiFrame;

const KEY_HINTS: &str = "s show  h hide  g grant  q quit";

/// The terminal demo: one bubble over an empty screen, a status line at the
/// bottom, and the ride-request card on tap.
pub struct App {
    config: OverlayConfig,
    options: BubbleOptions,
    service: BubbleService<StaticPermission>,
    overlay: BubbleOverlay<TerminalHost>,
    taps: Receiver<()>,
    bubble: BubbleComponent,
    popup: PopupCardComponent,
    status: StatusBar,
    area: Rect,
    last_action: Option<PopupAction>,
}

impl App {
    /// Builds the app for a terminal of `area` cells and tries to show the
    /// bubble straight away.
    pub fn new(
        config: OverlayConfig,
        options: BubbleOptions,
        permission: StaticPermission,
        area: Rect,
    ) -> io::Result<Self> {
        let host = TerminalHost::new(config.cells);
        let (width, height) = host.screen_pixels(overlay_area(area));
        let bounds = ScreenBounds::new(width, height)?;
        let mut positioner = Positioner::with_bounds(
            bounds,
            config.widget_size,
            WidgetPosition::initial(bounds, config.widget_size),
        );
        positioner.set_drag_threshold(config.drag_threshold);

        let (tx, taps) = mpsc::channel();
        let mut overlay = BubbleOverlay::new(host, positioner, move || {
            let _ = tx.send(());
        });
        overlay.set_animation_settings(config.animation);

        let mut status = StatusBar::new();
        status.set_right(KEY_HINTS);

        let mut app = Self {
            config,
            bubble: BubbleComponent::new(options.title.clone()),
            options,
            service: BubbleService::new(permission),
            overlay,
            taps,
            popup: PopupCardComponent::new(),
            status,
            area,
            last_action: None,
        };
        app.show_bubble();
        Ok(app)
    }

    pub fn overlay(&self) -> &BubbleOverlay<TerminalHost> {
        &self.overlay
    }

    pub fn service(&self) -> &BubbleService<StaticPermission> {
        &self.service
    }

    pub fn popup(&self) -> &PopupCardComponent {
        &self.popup
    }

    pub fn status(&self) -> &str {
        self.status.left()
    }

    pub fn last_action(&self) -> Option<PopupAction> {
        self.last_action
    }

    pub fn show_bubble(&mut self) {
        if !self.service.show_bubble(self.options.clone()) {
            self.status
                .set_left("Overlay permission missing: press g to grant");
            return;
        }
        if let Some(opts) = self.service.options() {
            self.bubble.set_label(opts.title.as_str());
            self.bubble
                .set_badge(opts.show_badge.then_some(opts.badge_count));
        }
        self.overlay.show();
        self.status.set_left("Drag the bubble, tap it for details");
    }

    pub fn hide_bubble(&mut self) {
        self.service.hide_bubble();
        self.popup.close();
        self.overlay.set_expanded(false);
        self.overlay.hide();
        self.status.set_left("Bubble hidden");
    }

    pub fn request_permission(&mut self) {
        if self.service.request_permission() {
            self.status.set_left("Overlay permission already granted");
        } else {
            self.status
                .set_left("Overlay permission requested: press s to show");
        }
    }

    pub fn handle_event(&mut self, event: &Event) -> ControlFlow {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return ControlFlow::Quit;
                }
                if self.route_to_popup(event) {
                    return ControlFlow::Continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return ControlFlow::Quit,
                    KeyCode::Char('s') => self.show_bubble(),
                    KeyCode::Char('h') => self.hide_bubble(),
                    KeyCode::Char('g') => self.request_permission(),
                    _ => {}
                }
            }
            Event::Mouse(mouse) => {
                if self.route_to_popup(event) {
                    return ControlFlow::Continue;
                }
                let size = self.overlay.positioner().widget_size();
                if let Some(pointer) = self.overlay.host_mut().translate_mouse(mouse, size) {
                    self.dispatch_pointer(pointer);
                }
            }
            Event::FocusLost => {
                if let Some(cancel) = self.overlay.host_mut().release_pointer() {
                    self.dispatch_pointer(cancel);
                }
            }
            Event::Resize(cols, rows) => self.resize(Rect::new(0, 0, *cols, *rows)),
            _ => {}
        }
        ControlFlow::Continue
    }

    /// Give the open card first pick of `event`. Returns `true` when consumed.
    fn route_to_popup(&mut self, event: &Event) -> bool {
        if !self.popup.handle_event(event) {
            return false;
        }
        if let Some(action) = self.popup.take_action() {
            self.apply_popup_action(action);
        }
        true
    }

    fn dispatch_pointer(&mut self, pointer: PointerEvent) {
        if let GestureOutcome::AnimateTo(target) = self.overlay.handle_pointer(pointer) {
            tracing::debug!(edge = ?target.edge, "bubble snapping");
        }
        while self.taps.try_recv().is_ok() {
            self.open_popup();
        }
    }

    fn open_popup(&mut self) {
        let content = self
            .service
            .options()
            .map(|opts| opts.popup.clone())
            .unwrap_or_default();
        self.popup.open(content);
        self.overlay.set_expanded(true);
        self.status.set_left("Ride request opened");
    }

    fn apply_popup_action(&mut self, action: PopupAction) {
        tracing::info!(?action, "popup closed");
        self.popup.close();
        self.overlay.set_expanded(false);
        self.last_action = Some(action);
        let message = match action {
            PopupAction::Accept => "Ride accepted",
            PopupAction::Reject => "Ride rejected",
            PopupAction::Dismiss => "Ride request dismissed",
        };
        self.status.set_left(message);
    }

    fn resize(&mut self, area: Rect) {
        if area == self.area {
            return;
        }
        self.area = area;
        let (width, height) = self.overlay.host().screen_pixels(overlay_area(area));
        if let Err(err) = self.overlay.resize(width, height) {
            tracing::warn!(%err, "ignoring terminal resize");
        }
    }

    /// Advance animations. Returns `true` when a redraw is needed.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let animated = self.overlay.tick(dt);
        let dirty = self.overlay.host_mut().take_dirty();
        animated || dirty
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>) {
        let area = frame.area();
        self.resize(area);
        let screen = overlay_area(area);

        self.bubble
            .set_dragging(self.overlay.positioner().is_dragging());
        let scale = self.overlay.feedback_scale();
        if let Some(rect) = self
            .overlay
            .host()
            .widget_rect(self.config.widget_size, scale)
        {
            self.bubble.render(frame, rect.intersection(screen));
        }
        self.popup.render(frame, screen);

        let status_row = Rect {
            y: area.y.saturating_add(area.height.saturating_sub(1)),
            height: area.height.min(1),
            ..area
        };
        self.status.render(frame, status_row);
    }
}

/// Everything above the status line.
fn overlay_area(area: Rect) -> Rect {
    Rect {
        height: area.height.saturating_sub(1),
        ..area
    }
}
