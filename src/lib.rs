//! A draggable floating bubble that snaps to the nearest screen edge.
//!
//! The core is host-agnostic: [`Positioner`] turns pointer samples into
//! widget positions, [`snap_target`] picks the resting place on release and
//! [`BubbleOverlay`] ties both to an [`OverlayHost`] with animations and a tap
//! handler. [`terminal_host`] and [`app`] put the bubble on a terminal grid.

pub mod animation;
pub mod app;
pub mod components;
pub mod config;
pub mod constants;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod geometry;
pub mod gesture;
pub mod layout;
pub mod overlay;
pub mod runner;
pub mod service;
pub mod snap;
pub mod terminal_host;
pub mod theme;
pub mod tracing_sub;
pub mod ui;

pub use animation::{Easing, PressFeedback, SnapAnimation, interpolate, interpolate_eased};
pub use config::{CellMetrics, OverlayConfig, RawOverlayConfig};
pub use error::{OverlayError, OverlayResult};
pub use geometry::{ScreenBounds, WidgetPosition, WidgetSize};
pub use gesture::{DragSession, GestureOutcome, PointerEvent, PointerSample, Positioner};
pub use overlay::{AnimationSettings, BubbleOverlay, OverlayHost, TapHandler};
pub use service::{
    BubbleOptions, BubbleService, PermissionProvider, PopupAction, PopupContent, StaticPermission,
};
pub use snap::{Edge, SnapTarget, snap_target};
