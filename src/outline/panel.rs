//! TOC panel drag/resize geometry.
//!
//! Pure pointer math for the floating panel: an 8-px border band starts a
//! resize (corners resize two dimensions), anywhere else starts a move. The
//! minimum size floor is enforced by clamping, never by rejecting the
//! gesture, and the panel is kept inside the viewport at every intermediate
//! step.

/// Width of the border band that starts a resize instead of a move.
pub const EDGE_BAND: f64 = 8.0;
/// Minimum panel width after clamping.
pub const MIN_WIDTH: f64 = 200.0;
/// Minimum panel height after clamping.
pub const MIN_HEIGHT: f64 = 150.0;

/// Panel rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Distance from the left viewport edge.
    pub left: f64,
    /// Distance from the top viewport edge.
    pub top: f64,
    /// Panel width.
    pub width: f64,
    /// Panel height.
    pub height: f64,
}

/// Which edges a resize gesture pulls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeDir {
    /// Pulls the top edge.
    pub north: bool,
    /// Pulls the bottom edge.
    pub south: bool,
    /// Pulls the right edge.
    pub east: bool,
    /// Pulls the left edge.
    pub west: bool,
}

/// What a press at the given panel-relative position starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    /// Press inside the body: relocate the panel.
    Move,
    /// Press inside the border band: resize along the given edges.
    Resize(ResizeDir),
}

/// Maps a press position (relative to the panel's top-left corner) to the
/// gesture it starts.
pub fn hit_test(x: f64, y: f64, width: f64, height: f64) -> GestureKind {
    let dir = ResizeDir {
        north: y <= EDGE_BAND,
        south: y >= height - EDGE_BAND,
        west: x <= EDGE_BAND,
        east: x >= width - EDGE_BAND,
    };
    if dir.north || dir.south || dir.east || dir.west {
        GestureKind::Resize(dir)
    } else {
        GestureKind::Move
    }
}

/// CSS cursor for hover feedback at a given panel-relative position.
pub fn cursor_for(kind: GestureKind) -> &'static str {
    match kind {
        GestureKind::Move => "move",
        GestureKind::Resize(dir) => match (dir.north, dir.south, dir.east, dir.west) {
            (true, _, _, true) => "nw-resize",
            (true, _, true, _) => "ne-resize",
            (_, true, _, true) => "sw-resize",
            (_, true, true, _) => "se-resize",
            (_, _, _, true) => "w-resize",
            (_, _, true, _) => "e-resize",
            (true, _, _, _) => "n-resize",
            _ => "s-resize",
        },
    }
}

/// Applies a move delta, clamping the panel into the viewport.
pub fn apply_move(origin: Rect, dx: f64, dy: f64, viewport: (f64, f64)) -> Rect {
    let (vw, vh) = viewport;
    Rect {
        left: (origin.left + dx).min(vw - origin.width).max(0.0),
        top: (origin.top + dy).min(vh - origin.height).max(0.0),
        ..origin
    }
}

/// Applies a resize delta. West/north pulls move the opposite anchor when the
/// size floor clamps, so the fixed edge stays put. The resulting position is
/// clamped into the viewport.
pub fn apply_resize(origin: Rect, dir: ResizeDir, dx: f64, dy: f64, viewport: (f64, f64)) -> Rect {
    let mut width = origin.width;
    let mut height = origin.height;
    let mut left = origin.left;
    let mut top = origin.top;

    if dir.east {
        width = origin.width + dx;
    }
    if dir.west {
        width = origin.width - dx;
        left = origin.left + dx;
    }
    if dir.south {
        height = origin.height + dy;
    }
    if dir.north {
        height = origin.height - dy;
        top = origin.top + dy;
    }

    if width < MIN_WIDTH {
        if dir.west {
            left = origin.left + origin.width - MIN_WIDTH;
        }
        width = MIN_WIDTH;
    }
    if height < MIN_HEIGHT {
        if dir.north {
            top = origin.top + origin.height - MIN_HEIGHT;
        }
        height = MIN_HEIGHT;
    }

    let (vw, vh) = viewport;
    left = left.min(vw - width).max(0.0);
    top = top.min(vh - height).max(0.0);

    Rect {
        left,
        top,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: (f64, f64) = (1280.0, 800.0);

    fn panel() -> Rect {
        Rect {
            left: 400.0,
            top: 200.0,
            width: 300.0,
            height: 400.0,
        }
    }

    #[test]
    fn body_press_moves_and_band_press_resizes() {
        assert_eq!(hit_test(150.0, 200.0, 300.0, 400.0), GestureKind::Move);
        match hit_test(2.0, 200.0, 300.0, 400.0) {
            GestureKind::Resize(dir) => assert!(dir.west && !dir.north && !dir.south),
            GestureKind::Move => panic!("edge press must resize"),
        }
    }

    #[test]
    fn corner_press_resizes_two_dimensions() {
        match hit_test(297.0, 396.0, 300.0, 400.0) {
            GestureKind::Resize(dir) => assert!(dir.south && dir.east),
            GestureKind::Move => panic!("corner press must resize"),
        }
        assert_eq!(
            cursor_for(hit_test(297.0, 396.0, 300.0, 400.0)),
            "se-resize"
        );
        assert_eq!(cursor_for(hit_test(1.0, 1.0, 300.0, 400.0)), "nw-resize");
        assert_eq!(cursor_for(GestureKind::Move), "move");
    }

    #[test]
    fn resize_never_goes_below_the_size_floor() {
        let dir = ResizeDir {
            north: false,
            south: true,
            east: true,
            west: false,
        };
        // Drag far past the minimum in both axes.
        let r = apply_resize(panel(), dir, -5000.0, -5000.0, VIEWPORT);
        assert_eq!(r.width, MIN_WIDTH);
        assert_eq!(r.height, MIN_HEIGHT);
    }

    #[test]
    fn west_resize_clamped_at_floor_keeps_the_right_edge_fixed() {
        let dir = ResizeDir {
            north: true,
            south: false,
            east: false,
            west: true,
        };
        let origin = panel();
        let r = apply_resize(origin, dir, 5000.0, 5000.0, VIEWPORT);
        assert_eq!(r.width, MIN_WIDTH);
        assert_eq!(r.height, MIN_HEIGHT);
        assert_eq!(r.left + r.width, origin.left + origin.width);
        assert_eq!(r.top + r.height, origin.top + origin.height);
    }

    #[test]
    fn move_is_clamped_inside_the_viewport() {
        let r = apply_move(panel(), -9999.0, 9999.0, VIEWPORT);
        assert_eq!(r.left, 0.0);
        assert_eq!(r.top, VIEWPORT.1 - r.height);
        assert_eq!(r.width, 300.0);
    }

    #[test]
    fn east_resize_grows_without_moving_the_origin() {
        let dir = ResizeDir {
            north: false,
            south: false,
            east: true,
            west: false,
        };
        let r = apply_resize(panel(), dir, 100.0, 0.0, VIEWPORT);
        assert_eq!(r.width, 400.0);
        assert_eq!(r.left, 400.0);
        assert_eq!(r.height, 400.0);
    }
}
