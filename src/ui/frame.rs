//! Drag-to-move and edge-resize for frameless windows.
//!
//! A window attaches a [`PointerBehavior`] and forwards primary-button press,
//! pointer move and release to it. The behavior owns its gesture state and
//! answers with the geometry or cursor the window should take. Deltas are
//! always incremental: after each applied move the anchor becomes the current
//! global pointer, so the window never drifts from the cursor.

use super::edge::{classify, cursor_for, ResizeEdge, EDGE_MARGIN};
use crate::types::geometry::{Point, WindowGeometry};
use winit::window::CursorIcon;

/// Manhattan distance (px) below which a launcher press/release is a click
pub const CLICK_THRESHOLD: i32 = 5;

/// Pointer position in window-local and global screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub local: Point,
    pub global: Point,
}

impl PointerEvent {
    /// Derive the global position from the window origin
    pub fn at(local: Point, geometry: &WindowGeometry) -> Self {
        Self {
            local,
            global: geometry.origin() + local,
        }
    }

    /// `local` is relative to where the OS has the window right now, which
    /// can trail the requested geometry while a move is in flight. Only
    /// without an OS position does the model origin stand in.
    pub fn from_window(local: Point, os_origin: Option<Point>, geometry: &WindowGeometry) -> Self {
        match os_origin {
            Some(origin) => Self {
                local,
                global: origin + local,
            },
            None => Self::at(local, geometry),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    /// Not handled, the window may route the event elsewhere
    Ignored,
    /// Press consumed, gesture started
    Captured,
    /// Window should take this geometry
    Geometry(WindowGeometry),
    /// Window should show this cursor
    Cursor(CursorIcon),
    /// Press/release without movement, window-local position of the release
    Click(Point),
}

pub trait PointerBehavior {
    fn on_press(&mut self, event: PointerEvent, geometry: WindowGeometry) -> PointerOutcome;
    fn on_move(&mut self, event: PointerEvent, geometry: WindowGeometry) -> PointerOutcome;
    fn on_release(&mut self, event: PointerEvent, geometry: WindowGeometry) -> PointerOutcome;
    /// True while a press-move-release gesture is in progress
    fn is_active(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    Idle,
    Dragging { anchor: Point },
    Resizing { edge: ResizeEdge, anchor: Point },
}

/// Title-bar drag plus edge resize, used by note and todo panels
#[derive(Debug, Clone)]
pub struct WindowFrame {
    pub state: FrameState,
    pub title_bar_height: i32,
    pub margin: i32,
}

impl WindowFrame {
    pub fn new(title_bar_height: i32) -> Self {
        Self {
            state: FrameState::Idle,
            title_bar_height,
            margin: EDGE_MARGIN,
        }
    }

    pub fn in_title_bar(&self, local: Point) -> bool {
        local.y >= 0 && local.y < self.title_bar_height
    }

    /// Resize zone under `local`. The title bar only ever moves the window.
    pub fn edge_at(&self, local: Point, geometry: &WindowGeometry) -> ResizeEdge {
        if self.in_title_bar(local) {
            return ResizeEdge::None;
        }
        classify(local, geometry.width, geometry.height, self.margin)
    }
}

/// Apply one incremental resize step. No minimum size is enforced here.
pub fn resize_geometry(geometry: WindowGeometry, edge: ResizeEdge, delta: Point) -> WindowGeometry {
    let mut left = geometry.x;
    let mut top = geometry.y;
    let mut right = geometry.right();
    let mut bottom = geometry.bottom();

    if edge.moves_left() {
        left += delta.x;
    }
    if edge.moves_right() {
        right += delta.x;
    }
    if edge.moves_top() {
        top += delta.y;
    }
    if edge.moves_bottom() {
        bottom += delta.y;
    }

    WindowGeometry::new(left, top, right - left, bottom - top)
}

impl PointerBehavior for WindowFrame {
    fn on_press(&mut self, event: PointerEvent, geometry: WindowGeometry) -> PointerOutcome {
        if self.in_title_bar(event.local) {
            self.state = FrameState::Dragging {
                anchor: event.global,
            };
            return PointerOutcome::Captured;
        }

        let edge = self.edge_at(event.local, &geometry);
        if edge != ResizeEdge::None {
            self.state = FrameState::Resizing {
                edge,
                anchor: event.global,
            };
            return PointerOutcome::Captured;
        }

        PointerOutcome::Ignored
    }

    fn on_move(&mut self, event: PointerEvent, geometry: WindowGeometry) -> PointerOutcome {
        match self.state {
            FrameState::Dragging { anchor } => {
                self.state = FrameState::Dragging {
                    anchor: event.global,
                };
                PointerOutcome::Geometry(geometry.translated(event.global - anchor))
            }
            FrameState::Resizing { edge, anchor } => {
                self.state = FrameState::Resizing {
                    edge,
                    anchor: event.global,
                };
                PointerOutcome::Geometry(resize_geometry(geometry, edge, event.global - anchor))
            }
            FrameState::Idle => PointerOutcome::Cursor(cursor_for(self.edge_at(event.local, &geometry))),
        }
    }

    fn on_release(&mut self, _event: PointerEvent, _geometry: WindowGeometry) -> PointerOutcome {
        let was_active = self.is_active();
        self.state = FrameState::Idle;
        if was_active {
            PointerOutcome::Cursor(CursorIcon::Default)
        } else {
            PointerOutcome::Ignored
        }
    }

    fn is_active(&self) -> bool {
        self.state != FrameState::Idle
    }
}

/// Launcher capsule: the whole window drags, a still press/release is a click
#[derive(Debug, Clone, Default)]
pub struct LauncherGesture {
    origin: Option<Point>,
    anchor: Point,
    dragging: bool,
}

impl LauncherGesture {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PointerBehavior for LauncherGesture {
    fn on_press(&mut self, event: PointerEvent, _geometry: WindowGeometry) -> PointerOutcome {
        self.origin = Some(event.global);
        self.anchor = event.global;
        self.dragging = false;
        PointerOutcome::Captured
    }

    fn on_move(&mut self, event: PointerEvent, geometry: WindowGeometry) -> PointerOutcome {
        if self.origin.is_none() {
            return PointerOutcome::Cursor(CursorIcon::Pointer);
        }

        let delta = event.global - self.anchor;
        if self.dragging || delta.manhattan_length() > CLICK_THRESHOLD {
            self.dragging = true;
            self.anchor = event.global;
            return PointerOutcome::Geometry(geometry.translated(delta));
        }
        PointerOutcome::Ignored
    }

    fn on_release(&mut self, event: PointerEvent, _geometry: WindowGeometry) -> PointerOutcome {
        let origin = self.origin.take();
        let dragged = std::mem::take(&mut self.dragging);

        match origin {
            Some(origin)
                if !dragged && (event.global - origin).manhattan_length() < CLICK_THRESHOLD =>
            {
                PointerOutcome::Click(event.local)
            }
            _ => PointerOutcome::Ignored,
        }
    }

    fn is_active(&self) -> bool {
        self.origin.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const TITLE: i32 = 30;

    /// Feed a local-space move to a behavior the way the window glue does:
    /// the global point is derived from the window's current origin.
    fn drive(
        behavior: &mut dyn PointerBehavior,
        geometry: &mut WindowGeometry,
        global: Point,
    ) -> PointerOutcome {
        let local = geometry.to_local(global);
        let outcome = behavior.on_move(PointerEvent { local, global }, *geometry);
        if let PointerOutcome::Geometry(g) = outcome {
            *geometry = g;
        }
        outcome
    }

    #[test]
    fn test_title_bar_press_starts_drag() {
        let mut frame = WindowFrame::new(TITLE);
        let geometry = WindowGeometry::new(100, 100, 300, 200);
        let press = PointerEvent::at(Point::new(150, 15), &geometry);
        assert_eq!(frame.on_press(press, geometry), PointerOutcome::Captured);
        assert!(matches!(frame.state, FrameState::Dragging { .. }));
    }

    #[test]
    fn test_body_press_is_ignored() {
        let mut frame = WindowFrame::new(TITLE);
        let geometry = WindowGeometry::new(100, 100, 300, 200);
        let press = PointerEvent::at(Point::new(150, 100), &geometry);
        assert_eq!(frame.on_press(press, geometry), PointerOutcome::Ignored);
        assert!(!frame.is_active());
    }

    #[test]
    fn test_drag_sum_of_deltas_independent_of_steps() {
        let mut rng = StdRng::seed_from_u64(7);
        for steps in [1usize, 2, 5, 40] {
            let start = WindowGeometry::new(200, 150, 300, 200);
            let mut geometry = start;
            let mut frame = WindowFrame::new(TITLE);

            let mut pointer = start.origin() + Point::new(120, 12);
            frame.on_press(PointerEvent::at(Point::new(120, 12), &geometry), geometry);

            let mut total = Point::default();
            for _ in 0..steps {
                let d = Point::new(rng.gen_range(-40..=40), rng.gen_range(-40..=40));
                total = total + d;
                pointer = pointer + d;
                drive(&mut frame, &mut geometry, pointer);
            }
            frame.on_release(PointerEvent::at(geometry.to_local(pointer), &geometry), geometry);

            assert_eq!(geometry, start.translated(total), "steps = {}", steps);
            assert_eq!(frame.state, FrameState::Idle);
        }
    }

    #[test]
    fn test_bottom_right_resize_changes_size_only() {
        let mut frame = WindowFrame::new(TITLE);
        let mut geometry = WindowGeometry::new(100, 100, 300, 200);
        let start = Point::new(399, 299);
        frame.on_press(PointerEvent::at(geometry.to_local(start), &geometry), geometry);
        drive(&mut frame, &mut geometry, start + Point::new(20, 10));
        drive(&mut frame, &mut geometry, start + Point::new(25, -5));
        assert_eq!(geometry, WindowGeometry::new(100, 100, 325, 195));
    }

    #[test]
    fn test_bottom_left_resize_moves_left_boundary() {
        let mut frame = WindowFrame::new(TITLE);
        let mut geometry = WindowGeometry::new(100, 100, 300, 200);
        let start = Point::new(101, 299);
        frame.on_press(PointerEvent::at(geometry.to_local(start), &geometry), geometry);
        assert!(matches!(
            frame.state,
            FrameState::Resizing {
                edge: ResizeEdge::BottomLeft,
                ..
            }
        ));
        drive(&mut frame, &mut geometry, start + Point::new(-10, 30));
        assert_eq!(geometry, WindowGeometry::new(90, 100, 310, 230));
    }

    #[test]
    fn test_title_bar_edges_and_corners_move() {
        let geometry = WindowGeometry::new(100, 100, 300, 200);
        for local in [Point::new(150, 2), Point::new(1, 1), Point::new(298, 3), Point::new(2, 20)] {
            let mut frame = WindowFrame::new(TITLE);
            assert_eq!(
                frame.on_press(PointerEvent::at(local, &geometry), geometry),
                PointerOutcome::Captured
            );
            assert!(
                matches!(frame.state, FrameState::Dragging { .. }),
                "press at {:?} gave {:?}",
                local,
                frame.state
            );
        }

        // Just below the title bar the side edges resize again
        let mut frame = WindowFrame::new(TITLE);
        frame.on_press(PointerEvent::at(Point::new(2, TITLE), &geometry), geometry);
        assert!(matches!(
            frame.state,
            FrameState::Resizing {
                edge: ResizeEdge::Left,
                ..
            }
        ));
    }

    #[test]
    fn test_drag_follows_pointer_when_os_position_lags() {
        let mut frame = WindowFrame::new(TITLE);
        let start = WindowGeometry::new(100, 100, 300, 200);
        let mut model = start;
        // Where the OS has the window; applies each move one event late
        let mut os_origin = start.origin();
        let mut pointer = start.origin() + Point::new(120, 12);

        let press = PointerEvent::from_window(pointer - os_origin, Some(os_origin), &model);
        frame.on_press(press, model);
        for _ in 0..10 {
            pointer = pointer + Point::new(5, 0);
            let event = PointerEvent::from_window(pointer - os_origin, Some(os_origin), &model);
            let requested = model;
            if let PointerOutcome::Geometry(g) = frame.on_move(event, model) {
                model = g;
            }
            os_origin = requested.origin();
        }

        assert_eq!(model.origin(), start.origin() + Point::new(50, 0));
    }

    #[test]
    fn test_pointer_event_falls_back_to_model_origin() {
        let geometry = WindowGeometry::new(40, 50, 300, 200);
        let local = Point::new(7, 9);
        assert_eq!(
            PointerEvent::from_window(local, None, &geometry),
            PointerEvent::at(local, &geometry)
        );
        assert_eq!(
            PointerEvent::from_window(local, Some(Point::new(30, 50)), &geometry).global,
            Point::new(37, 59)
        );
    }

    #[test]
    fn test_edge_latched_until_release() {
        let mut frame = WindowFrame::new(TITLE);
        let mut geometry = WindowGeometry::new(0, 0, 300, 200);
        let start = Point::new(299, 100);
        frame.on_press(PointerEvent::at(geometry.to_local(start), &geometry), geometry);
        // Pointer wanders into the middle of the window, still a right-edge resize
        drive(&mut frame, &mut geometry, Point::new(150, 120));
        assert_eq!(geometry, WindowGeometry::new(0, 0, 151, 200));
        assert!(matches!(
            frame.state,
            FrameState::Resizing {
                edge: ResizeEdge::Right,
                ..
            }
        ));

        let outcome = frame.on_release(PointerEvent::at(Point::new(150, 120), &geometry), geometry);
        assert_eq!(outcome, PointerOutcome::Cursor(CursorIcon::Default));
    }

    #[test]
    fn test_resize_has_no_minimum_clamp() {
        let g = resize_geometry(
            WindowGeometry::new(0, 0, 50, 50),
            ResizeEdge::BottomRight,
            Point::new(-80, -60),
        );
        assert_eq!(g, WindowGeometry::new(0, 0, -30, -10));
    }

    #[test]
    fn test_idle_hover_reports_cursor() {
        let mut frame = WindowFrame::new(TITLE);
        let geometry = WindowGeometry::new(0, 0, 300, 200);
        let hover = |x, y| PointerEvent::at(Point::new(x, y), &geometry);
        let mut f = |e| frame.on_move(e, geometry);
        assert_eq!(f(hover(2, 2)), PointerOutcome::Cursor(CursorIcon::Default));
        assert_eq!(f(hover(2, 198)), PointerOutcome::Cursor(CursorIcon::NeswResize));
        assert_eq!(f(hover(298, 100)), PointerOutcome::Cursor(CursorIcon::EwResize));
        assert_eq!(f(hover(150, 100)), PointerOutcome::Cursor(CursorIcon::Default));
    }

    #[test]
    fn test_launcher_still_press_is_click() {
        let mut gesture = LauncherGesture::new();
        let mut geometry = WindowGeometry::new(500, 500, 160, 60);
        let press = Point::new(540, 530);
        gesture.on_press(PointerEvent::at(geometry.to_local(press), &geometry), geometry);
        drive(&mut gesture, &mut geometry, press + Point::new(2, 1));
        let release = press + Point::new(3, 1);
        let outcome = gesture.on_release(
            PointerEvent::at(geometry.to_local(release), &geometry),
            geometry,
        );
        assert_eq!(outcome, PointerOutcome::Click(Point::new(43, 31)));
        assert_eq!(geometry, WindowGeometry::new(500, 500, 160, 60));
    }

    #[test]
    fn test_launcher_threshold_is_exclusive_for_click() {
        let mut gesture = LauncherGesture::new();
        let geometry = WindowGeometry::new(0, 0, 160, 60);
        gesture.on_press(PointerEvent::at(Point::new(40, 30), &geometry), geometry);
        // Released exactly 5px away without any intermediate move
        let outcome = gesture.on_release(PointerEvent::at(Point::new(43, 32), &geometry), geometry);
        assert_eq!(outcome, PointerOutcome::Ignored);
    }

    #[test]
    fn test_launcher_drag_moves_without_click() {
        let mut gesture = LauncherGesture::new();
        let mut geometry = WindowGeometry::new(500, 500, 160, 60);
        let press = Point::new(540, 530);
        gesture.on_press(PointerEvent::at(geometry.to_local(press), &geometry), geometry);

        drive(&mut gesture, &mut geometry, press + Point::new(4, 0));
        assert_eq!(geometry.origin(), Point::new(500, 500));
        drive(&mut gesture, &mut geometry, press + Point::new(10, 0));
        assert_eq!(geometry.origin(), Point::new(510, 500));
        // Once dragging, small steps still move
        drive(&mut gesture, &mut geometry, press + Point::new(11, 2));
        assert_eq!(geometry.origin(), Point::new(511, 502));

        // Coming back near the press point does not turn it into a click
        let release = press + Point::new(1, 0);
        drive(&mut gesture, &mut geometry, release);
        let outcome = gesture.on_release(
            PointerEvent::at(geometry.to_local(release), &geometry),
            geometry,
        );
        assert_eq!(outcome, PointerOutcome::Ignored);
        assert!(!gesture.is_active());
    }
}
