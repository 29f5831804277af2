use crate::constants::{SNAP_CROSS_AXIS_FAR_INSET, SNAP_SIDE_MARGIN, SNAP_VERTICAL_MARGIN};
use crate::geometry::{ScreenBounds, WidgetPosition, WidgetSize, clamp_axis};

/// Screen edge a released bubble settles against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapTarget {
    pub edge: Edge,
    pub position: WidgetPosition,
}

/// Pick the nearest screen edge for `pos` and the resting position against it.
///
/// Distances are measured from each edge to the near side of the widget, so a
/// widget hanging past the right edge yields a negative right distance and
/// wins outright. Ties go to the first edge in left, right, top, bottom order.
pub fn snap_target(pos: WidgetPosition, bounds: ScreenBounds, size: WidgetSize) -> SnapTarget {
    let screen_w = bounds.width();
    let screen_h = bounds.height();
    let candidates = [
        (Edge::Left, pos.x),
        (Edge::Right, screen_w - pos.x - size.width()),
        (Edge::Top, pos.y),
        (Edge::Bottom, screen_h - pos.y - size.height()),
    ];

    let mut edge = candidates[0].0;
    let mut best = candidates[0].1;
    for &(candidate, distance) in &candidates[1..] {
        // strict less-than keeps the earlier edge on ties
        if distance < best {
            edge = candidate;
            best = distance;
        }
    }

    let side_y = || {
        clamp_axis(
            pos.y,
            SNAP_VERTICAL_MARGIN,
            screen_h - SNAP_CROSS_AXIS_FAR_INSET,
        )
    };
    let cap_x = || {
        clamp_axis(
            pos.x,
            SNAP_VERTICAL_MARGIN,
            screen_w - SNAP_CROSS_AXIS_FAR_INSET,
        )
    };

    let position = match edge {
        Edge::Left => WidgetPosition::new(SNAP_SIDE_MARGIN, side_y()),
        Edge::Right => WidgetPosition::new(screen_w - size.width() - SNAP_SIDE_MARGIN, side_y()),
        Edge::Top => WidgetPosition::new(cap_x(), SNAP_VERTICAL_MARGIN),
        Edge::Bottom => {
            WidgetPosition::new(cap_x(), screen_h - size.height() - SNAP_VERTICAL_MARGIN)
        }
    };
    SnapTarget { edge, position }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone() -> ScreenBounds {
        ScreenBounds::new(1080, 2000).unwrap()
    }

    #[test]
    fn overhanging_right_edge_snaps_right() {
        let t = snap_target(WidgetPosition::new(1000, 900), phone(), WidgetSize::default());
        assert_eq!(t.edge, Edge::Right);
        assert_eq!(t.position, WidgetPosition::new(960, 900));
    }

    #[test]
    fn near_left_clamps_y_away_from_corner() {
        let t = snap_target(WidgetPosition::new(10, 1990), phone(), WidgetSize::default());
        // bottom distance is negative (2000 - 1990 - 100) and wins
        assert_eq!(t.edge, Edge::Bottom);
        assert_eq!(t.position, WidgetPosition::new(50, 1850));

        let t = snap_target(WidgetPosition::new(5, 1880), phone(), WidgetSize::default());
        assert_eq!(t.edge, Edge::Left);
        assert_eq!(t.position, WidgetPosition::new(20, 1850));
    }

    #[test]
    fn top_snap_clamps_x_into_cross_axis_range() {
        let t = snap_target(WidgetPosition::new(1000, 2), phone(), WidgetSize::default());
        // right = -20 beats top = 2
        assert_eq!(t.edge, Edge::Right);

        let t = snap_target(WidgetPosition::new(500, 2), phone(), WidgetSize::default());
        assert_eq!(t.edge, Edge::Top);
        assert_eq!(t.position, WidgetPosition::new(500, 50));

        let t = snap_target(WidgetPosition::new(20, 0), phone(), WidgetSize::default());
        assert_eq!(t.edge, Edge::Top);
        assert_eq!(t.position, WidgetPosition::new(50, 50));
    }

    #[test]
    fn ties_follow_left_right_top_bottom_order() {
        let bounds = ScreenBounds::new(300, 300).unwrap();
        let size = WidgetSize::default();
        // every distance is 100
        let t = snap_target(WidgetPosition::new(100, 100), bounds, size);
        assert_eq!(t.edge, Edge::Left);

        // right and top tie at 0, right comes first
        let t = snap_target(WidgetPosition::new(200, 0), bounds, size);
        assert_eq!(t.edge, Edge::Right);

        // top and bottom tie, left/right further away
        let bounds = ScreenBounds::new(1000, 300).unwrap();
        let t = snap_target(WidgetPosition::new(450, 100), bounds, size);
        assert_eq!(t.edge, Edge::Top);
    }

    #[test]
    fn selection_is_deterministic() {
        let size = WidgetSize::default();
        let pos = WidgetPosition::new(321, 777);
        let first = snap_target(pos, phone(), size);
        for _ in 0..10 {
            assert_eq!(snap_target(pos, phone(), size), first);
        }
    }

    #[test]
    fn tiny_screen_does_not_panic() {
        let bounds = ScreenBounds::new(120, 120).unwrap();
        let t = snap_target(WidgetPosition::new(10, 10), bounds, WidgetSize::default());
        assert_eq!(t.edge, Edge::Left);
        // far bound (120 - 150) is below the near bound, near bound wins
        assert_eq!(t.position, WidgetPosition::new(20, 50));
    }
}
