use bubble_overlay::{
    Edge, GestureOutcome, OverlayError, PointerEvent, PointerSample, Positioner, ScreenBounds,
    WidgetPosition, WidgetSize, snap_target,
};

fn sample(x: f32, y: f32) -> PointerSample {
    PointerSample::new(x, y)
}

fn positioner_at(x: i32, y: i32) -> Positioner {
    Positioner::new(1080, 2000, WidgetSize::default(), WidgetPosition::new(x, y)).unwrap()
}

#[test]
fn small_wiggle_is_a_tap() {
    let mut p = positioner_at(500, 500);
    let outcome = p.handle_all([
        PointerEvent::Down(sample(500.0, 500.0)),
        PointerEvent::Move(sample(505.0, 503.0)),
        PointerEvent::Up(sample(505.0, 503.0)),
    ]);
    assert_eq!(outcome, GestureOutcome::Tap);
    assert_eq!(p.position(), WidgetPosition::new(500, 500));
}

#[test]
fn moves_within_slop_never_change_position() {
    // points on and inside a 15 px circle around the press
    let offsets = [
        (0.0, 0.0),
        (15.0, 0.0),
        (0.0, -15.0),
        (-10.0, 10.0),
        (7.0, -12.0),
        (-15.0, 0.0),
    ];
    let mut p = positioner_at(300, 300);
    p.handle(PointerEvent::Down(sample(200.0, 200.0)));
    for (dx, dy) in offsets {
        assert_eq!(
            p.handle(PointerEvent::Move(sample(200.0 + dx, 200.0 + dy))),
            GestureOutcome::Ignored
        );
        assert_eq!(p.position(), WidgetPosition::new(300, 300));
        assert!(!p.is_dragging());
    }
    assert_eq!(p.handle(PointerEvent::Up(sample(200.0, 200.0))), GestureOutcome::Tap);
}

#[test]
fn dragging_latches_after_threshold() {
    let mut p = positioner_at(300, 300);
    p.handle(PointerEvent::Down(sample(0.0, 0.0)));
    p.handle(PointerEvent::Move(sample(40.0, 0.0)));
    assert!(p.is_dragging());
    // back inside the slop: still dragging, widget follows the pointer
    assert_eq!(
        p.handle(PointerEvent::Move(sample(2.0, 0.0))),
        GestureOutcome::Moved(WidgetPosition::new(302, 300))
    );
    assert!(p.is_dragging());
    assert!(matches!(
        p.handle(PointerEvent::Up(sample(2.0, 0.0))),
        GestureOutcome::AnimateTo(_)
    ));
    assert!(!p.is_tracking());
}

#[test]
fn drag_positions_stay_inside_clamp_range() {
    let mut p = positioner_at(500, 500);
    p.handle(PointerEvent::Down(sample(0.0, 0.0)));
    let moves = [
        (-5000.0, -5000.0),
        (5000.0, 5000.0),
        (123.0, -987.0),
        (-700.0, 1600.0),
        (600.0, 1400.0),
    ];
    for (x, y) in moves {
        p.handle(PointerEvent::Move(sample(x, y)));
        let pos = p.position();
        assert!((0..=980).contains(&pos.x), "x out of range: {pos:?}");
        assert!((0..=1900).contains(&pos.y), "y out of range: {pos:?}");
    }
    p.handle(PointerEvent::Move(sample(-5000.0, -5000.0)));
    assert_eq!(p.position(), WidgetPosition::new(0, 0));
    p.handle(PointerEvent::Move(sample(5000.0, 5000.0)));
    assert_eq!(p.position(), WidgetPosition::new(980, 1900));
}

#[test]
fn snap_scenario_right_edge() {
    let bounds = ScreenBounds::new(1080, 2000).unwrap();
    let target = snap_target(WidgetPosition::new(1000, 900), bounds, WidgetSize::default());
    assert_eq!(target.edge, Edge::Right);
    assert_eq!(target.position, WidgetPosition::new(960, 900));
}

#[test]
fn snap_is_deterministic() {
    let bounds = ScreenBounds::new(1080, 2000).unwrap();
    let size = WidgetSize::default();
    for x in (0..=980).step_by(70) {
        for y in (0..=1900).step_by(190) {
            let pos = WidgetPosition::new(x, y);
            assert_eq!(snap_target(pos, bounds, size), snap_target(pos, bounds, size));
        }
    }
}

#[test]
fn full_drag_release_snaps_to_left() {
    let mut p = positioner_at(960, 950);
    let outcome = p.handle_all([
        PointerEvent::Down(sample(1000.0, 1000.0)),
        PointerEvent::Move(sample(500.0, 1000.0)),
        PointerEvent::Move(sample(100.0, 1010.0)),
        PointerEvent::Up(sample(100.0, 1010.0)),
    ]);
    let GestureOutcome::AnimateTo(target) = outcome else {
        panic!("expected a snap, got {outcome:?}");
    };
    assert_eq!(p.position(), WidgetPosition::new(60, 960));
    assert_eq!(target.edge, Edge::Left);
    assert_eq!(target.position, WidgetPosition::new(20, 960));
}

#[test]
fn zero_bounds_reject_session() {
    assert_eq!(
        Positioner::new(0, 0, WidgetSize::default(), WidgetPosition::new(0, 0)).unwrap_err(),
        OverlayError::InvalidBounds {
            width: 0,
            height: 0
        }
    );
}

#[test]
fn events_without_press_are_ignored() {
    let mut p = positioner_at(400, 400);
    assert_eq!(p.handle(PointerEvent::Move(sample(900.0, 900.0))), GestureOutcome::Ignored);
    assert_eq!(p.handle(PointerEvent::Up(sample(900.0, 900.0))), GestureOutcome::Ignored);
    assert_eq!(p.handle(PointerEvent::Cancel), GestureOutcome::Ignored);
    assert_eq!(p.position(), WidgetPosition::new(400, 400));
}
