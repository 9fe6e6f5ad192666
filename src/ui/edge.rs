// Resize edge detection for frameless windows

use crate::types::geometry::Point;
use winit::window::CursorIcon;

/// Distance from a boundary (exclusive) that still counts as "on the edge"
pub const EDGE_MARGIN: i32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    None,
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeEdge {
    pub fn moves_left(self) -> bool {
        matches!(self, Self::Left | Self::TopLeft | Self::BottomLeft)
    }

    pub fn moves_right(self) -> bool {
        matches!(self, Self::Right | Self::TopRight | Self::BottomRight)
    }

    pub fn moves_top(self) -> bool {
        matches!(self, Self::Top | Self::TopLeft | Self::TopRight)
    }

    pub fn moves_bottom(self) -> bool {
        matches!(self, Self::Bottom | Self::BottomLeft | Self::BottomRight)
    }
}

/// Classify a window-local point into one of the nine zones
pub fn classify(p: Point, width: i32, height: i32, margin: i32) -> ResizeEdge {
    let at_left = p.x < margin;
    let at_right = p.x > width - margin;
    let at_top = p.y < margin;
    let at_bottom = p.y > height - margin;

    // Corners have priority
    if at_left && at_top {
        ResizeEdge::TopLeft
    } else if at_right && at_top {
        ResizeEdge::TopRight
    } else if at_left && at_bottom {
        ResizeEdge::BottomLeft
    } else if at_right && at_bottom {
        ResizeEdge::BottomRight
    } else if at_left {
        ResizeEdge::Left
    } else if at_right {
        ResizeEdge::Right
    } else if at_top {
        ResizeEdge::Top
    } else if at_bottom {
        ResizeEdge::Bottom
    } else {
        ResizeEdge::None
    }
}

pub fn cursor_for(edge: ResizeEdge) -> CursorIcon {
    match edge {
        ResizeEdge::TopLeft | ResizeEdge::BottomRight => CursorIcon::NwseResize,
        ResizeEdge::TopRight | ResizeEdge::BottomLeft => CursorIcon::NeswResize,
        ResizeEdge::Left | ResizeEdge::Right => CursorIcon::EwResize,
        ResizeEdge::Top | ResizeEdge::Bottom => CursorIcon::NsResize,
        ResizeEdge::None => CursorIcon::Default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: i32 = 300;
    const H: i32 = 200;

    fn at(x: i32, y: i32) -> ResizeEdge {
        classify(Point::new(x, y), W, H, EDGE_MARGIN)
    }

    #[test]
    fn test_single_edges() {
        for y in EDGE_MARGIN..=(H - EDGE_MARGIN) {
            assert_eq!(at(0, y), ResizeEdge::Left);
            assert_eq!(at(EDGE_MARGIN - 1, y), ResizeEdge::Left);
            assert_eq!(at(W - EDGE_MARGIN + 1, y), ResizeEdge::Right);
            assert_eq!(at(W - 1, y), ResizeEdge::Right);
        }
        for x in EDGE_MARGIN..=(W - EDGE_MARGIN) {
            assert_eq!(at(x, 0), ResizeEdge::Top);
            assert_eq!(at(x, H - 1), ResizeEdge::Bottom);
        }
    }

    #[test]
    fn test_corners_win_over_edges() {
        for a in 0..EDGE_MARGIN {
            for b in 0..EDGE_MARGIN {
                assert_eq!(at(a, b), ResizeEdge::TopLeft);
                assert_eq!(at(W - a, b), ResizeEdge::TopRight);
                assert_eq!(at(a, H - b), ResizeEdge::BottomLeft);
                assert_eq!(at(W - a, H - b), ResizeEdge::BottomRight);
            }
        }
    }

    #[test]
    fn test_margin_is_exclusive() {
        assert_eq!(at(EDGE_MARGIN, 100), ResizeEdge::None);
        assert_eq!(at(W - EDGE_MARGIN, 100), ResizeEdge::None);
        assert_eq!(at(150, EDGE_MARGIN), ResizeEdge::None);
        assert_eq!(at(150, H - EDGE_MARGIN), ResizeEdge::None);
        assert_eq!(at(150, 100), ResizeEdge::None);
    }

    #[test]
    fn test_cursor_table() {
        assert_eq!(cursor_for(ResizeEdge::TopLeft), CursorIcon::NwseResize);
        assert_eq!(cursor_for(ResizeEdge::BottomRight), CursorIcon::NwseResize);
        assert_eq!(cursor_for(ResizeEdge::TopRight), CursorIcon::NeswResize);
        assert_eq!(cursor_for(ResizeEdge::BottomLeft), CursorIcon::NeswResize);
        assert_eq!(cursor_for(ResizeEdge::Left), CursorIcon::EwResize);
        assert_eq!(cursor_for(ResizeEdge::Bottom), CursorIcon::NsResize);
        assert_eq!(cursor_for(ResizeEdge::None), CursorIcon::Default);
    }
}
