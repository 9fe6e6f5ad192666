// Launcher capsule: tap the left half for a note, the right half for a todo list

use super::drawing;
use super::frame::{LauncherGesture, PointerBehavior, PointerEvent, PointerOutcome};
use super::text_rasterizing::TextRenderer;
use super::theme;
use super::AppCommand;
use crate::types::geometry::{Point, WindowGeometry};
use rand::Rng;
use winit::window::CursorIcon;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Note,
    Todo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LauncherAction {
    None,
    Geometry(WindowGeometry),
    Cursor(CursorIcon),
    Spawn(PanelKind),
}

pub struct Launcher {
    gesture: LauncherGesture,
    /// Left half colour, fixed for the launcher's lifetime
    pub fill: u32,
}

/// Which panel a click at `local` asks for
pub fn kind_at(local: Point, width: i32) -> PanelKind {
    if local.x < width / 2 {
        PanelKind::Note
    } else {
        PanelKind::Todo
    }
}

/// Ctrl shortcuts available while the launcher has focus
pub fn command_for_shortcut(letter: char) -> Option<AppCommand> {
    match letter {
        'n' => Some(AppCommand::NewNote),
        't' => Some(AppCommand::NewTodo),
        'q' => Some(AppCommand::Quit),
        _ => None,
    }
}

impl Launcher {
    pub fn new(fill: u32) -> Self {
        Self {
            gesture: LauncherGesture::new(),
            fill,
        }
    }

    /// Left half takes the pastel of a random note scheme
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(drawing::random_scheme(&theme::NOTE_SCHEMES, rng).background)
    }

    /// Button held since a press on the capsule
    pub fn is_active(&self) -> bool {
        self.gesture.is_active()
    }

    fn translate(outcome: PointerOutcome, geometry: &WindowGeometry) -> LauncherAction {
        match outcome {
            PointerOutcome::Geometry(g) => LauncherAction::Geometry(g),
            PointerOutcome::Cursor(icon) => LauncherAction::Cursor(icon),
            PointerOutcome::Click(local) => LauncherAction::Spawn(kind_at(local, geometry.width)),
            PointerOutcome::Ignored | PointerOutcome::Captured => LauncherAction::None,
        }
    }

    pub fn on_press(&mut self, event: PointerEvent, geometry: WindowGeometry) -> LauncherAction {
        let outcome = self.gesture.on_press(event, geometry);
        Self::translate(outcome, &geometry)
    }

    pub fn on_move(&mut self, event: PointerEvent, geometry: WindowGeometry) -> LauncherAction {
        let outcome = self.gesture.on_move(event, geometry);
        Self::translate(outcome, &geometry)
    }

    pub fn on_release(&mut self, event: PointerEvent, geometry: WindowGeometry) -> LauncherAction {
        let outcome = self.gesture.on_release(event, geometry);
        Self::translate(outcome, &geometry)
    }

    pub fn paint(&self, text: &mut TextRenderer, pixels: &mut [u32], width: usize, height: usize) {
        drawing::draw_capsule(pixels, width, height, self.fill);
        let (w, h) = (width as f32, height as f32);
        for (label, x) in [
            (theme::LAUNCHER_LEFT_LABEL, w / 4.),
            (theme::LAUNCHER_RIGHT_LABEL, w * 3. / 4.),
        ] {
            text.draw_text_center_u32(
                pixels,
                width,
                label,
                x,
                h / 2.,
                theme::LAUNCHER_FONT_SIZE,
                theme::FONT_WEIGHT_REGULAR,
                theme::CAPSULE_LABEL,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn launcher_geometry() -> WindowGeometry {
        WindowGeometry::new(400, 300, theme::LAUNCHER_WIDTH as i32, theme::LAUNCHER_HEIGHT as i32)
    }

    #[test]
    fn test_still_tap_spawns_by_half() {
        let geometry = launcher_geometry();
        let mut launcher = Launcher::new(0xFF_FF_FD_E7);

        launcher.on_press(PointerEvent::at(Point::new(30, 30), &geometry), geometry);
        assert_eq!(
            launcher.on_release(PointerEvent::at(Point::new(32, 31), &geometry), geometry),
            LauncherAction::Spawn(PanelKind::Note)
        );

        launcher.on_press(PointerEvent::at(Point::new(120, 30), &geometry), geometry);
        assert_eq!(
            launcher.on_release(PointerEvent::at(Point::new(120, 30), &geometry), geometry),
            LauncherAction::Spawn(PanelKind::Todo)
        );
    }

    #[test]
    fn test_midline_belongs_to_todo() {
        assert_eq!(kind_at(Point::new(79, 10), 160), PanelKind::Note);
        assert_eq!(kind_at(Point::new(80, 10), 160), PanelKind::Todo);
    }

    #[test]
    fn test_drag_moves_and_never_spawns() {
        let mut geometry = launcher_geometry();
        let mut launcher = Launcher::new(0xFF_FF_FD_E7);

        launcher.on_press(PointerEvent::at(Point::new(30, 30), &geometry), geometry);
        // 6px is past the click threshold
        match launcher.on_move(PointerEvent::at(Point::new(36, 30), &geometry), geometry) {
            LauncherAction::Geometry(g) => geometry = g,
            other => panic!("expected a move, got {:?}", other),
        }
        assert_eq!(geometry.origin(), Point::new(406, 300));
        assert!(launcher.is_active());

        // Pointer back where the press started in screen space
        let back = geometry.to_local(Point::new(430, 330));
        launcher.on_move(PointerEvent::at(back, &geometry), geometry);
        assert_eq!(launcher.on_release(PointerEvent::at(back, &geometry), geometry), LauncherAction::None);
    }

    #[test]
    fn test_hover_shows_pointing_hand() {
        let geometry = launcher_geometry();
        let mut launcher = Launcher::new(0xFF_FF_FD_E7);
        assert_eq!(
            launcher.on_move(PointerEvent::at(Point::new(50, 20), &geometry), geometry),
            LauncherAction::Cursor(CursorIcon::Pointer)
        );
    }

    #[test]
    fn test_shortcuts() {
        assert_eq!(command_for_shortcut('n'), Some(AppCommand::NewNote));
        assert_eq!(command_for_shortcut('t'), Some(AppCommand::NewTodo));
        assert_eq!(command_for_shortcut('q'), Some(AppCommand::Quit));
        assert_eq!(command_for_shortcut('x'), None);
    }

    #[test]
    fn test_random_fill_is_a_palette_pastel() {
        let mut rng = StdRng::seed_from_u64(7);
        let launcher = Launcher::random(&mut rng);
        assert!(theme::NOTE_SCHEMES.iter().any(|(bg, _)| *bg == launcher.fill));
    }
}
