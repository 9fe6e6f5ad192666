// Mouse input handling for AppWindow

use super::frame::{PointerBehavior, PointerOutcome};
use super::launcher::LauncherAction;
use super::panel::{ChromeAction, HitTarget};
use super::theme;
use super::window::{AppWindow, WindowAction, WindowContent};
use crate::types::geometry::Point;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::window::CursorIcon;

/// Wheel delta in lines, positive scrolls content up
pub fn wheel_lines(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(p) => p.y as f32 / theme::SCROLL_LINE_PIXELS,
    }
}

/// Cursor shown over a panel when no frame gesture or edge claims it
fn hover_cursor(target: HitTarget, title_editable: bool) -> CursorIcon {
    match target {
        HitTarget::Title if title_editable => CursorIcon::Text,
        HitTarget::Body => CursorIcon::Text,
        _ => CursorIcon::Default,
    }
}

impl AppWindow {
    fn apply_launcher(&mut self, action: LauncherAction) -> WindowAction {
        match action {
            LauncherAction::Geometry(g) => self.apply_geometry(g),
            LauncherAction::Cursor(icon) => self.set_cursor(icon),
            LauncherAction::Spawn(kind) => return WindowAction::Spawn(kind),
            LauncherAction::None => {}
        }
        WindowAction::None
    }

    pub fn handle_cursor_moved(&mut self, position: PhysicalPosition<f64>) -> WindowAction {
        let local = Point::new(position.x as i32, position.y as i32);
        self.cursor = local;
        let geometry = self.geometry;
        let event = self.pointer_event(local);

        let panel = match &mut self.content {
            WindowContent::Launcher(launcher) => {
                let action = launcher.on_move(event, geometry);
                return self.apply_launcher(action);
            }
            WindowContent::Panel(panel) => panel,
        };

        // Drag and resize own the pointer until release
        let outcome = panel
            .chrome_mut()
            .frame
            .on_move(event, geometry);
        if let PointerOutcome::Geometry(g) = outcome {
            self.apply_geometry(g);
            return WindowAction::None;
        }

        let mut redraw = false;
        if self.selecting {
            redraw |= panel.on_drag(local);
        }

        let hit = panel.chrome().hit_test(local, geometry.width, geometry.height);
        let hover = match hit {
            HitTarget::Minimize | HitTarget::Close => hit,
            _ => HitTarget::None,
        };
        redraw |= panel.chrome_mut().set_hover(hover);
        redraw |= panel.on_hover(local);

        let icon = match outcome {
            PointerOutcome::Cursor(icon) if icon != CursorIcon::Default => icon,
            _ => hover_cursor(hit, panel.title_editable()),
        };
        self.set_cursor(icon);
        if redraw {
            self.request_redraw();
        }
        WindowAction::None
    }

    pub fn handle_cursor_left(&mut self) {
        if let WindowContent::Panel(panel) = &mut self.content {
            let mut redraw = panel.chrome_mut().set_hover(HitTarget::None);
            redraw |= panel.on_hover(Point::new(-1, -1));
            if redraw {
                self.request_redraw();
            }
        }
    }

    pub fn handle_mouse_input(&mut self, state: ElementState, button: MouseButton) -> WindowAction {
        if button != MouseButton::Left {
            return WindowAction::None;
        }
        match state {
            ElementState::Pressed => self.handle_press(),
            ElementState::Released => self.handle_release(),
        }
    }

    // Priority: window controls > title field > title bar drag > resize edges > body
    fn handle_press(&mut self) -> WindowAction {
        let local = self.cursor;
        let geometry = self.geometry;
        let extend = self.modifiers.shift_key();
        let event = self.pointer_event(local);

        let panel = match &mut self.content {
            WindowContent::Launcher(launcher) => {
                let action = launcher.on_press(event, geometry);
                return self.apply_launcher(action);
            }
            WindowContent::Panel(panel) => panel,
        };

        let hit = panel.chrome().hit_test(local, geometry.width, geometry.height);
        debug_println!("Press at {:?} on {:?}", local, hit);

        let redraw = match hit {
            HitTarget::Minimize | HitTarget::Close => {
                panel.chrome_mut().press_button(hit);
                true
            }
            HitTarget::None => false,
            _ => {
                let title_field = hit == HitTarget::Title && panel.title_editable();
                let captured = !title_field
                    && panel.chrome_mut().frame.on_press(event, geometry) == PointerOutcome::Captured;
                if captured {
                    false
                } else {
                    self.selecting = true;
                    panel.on_press(hit, local, extend)
                }
            }
        };
        if redraw {
            self.request_redraw();
        }
        WindowAction::None
    }

    fn handle_release(&mut self) -> WindowAction {
        let local = self.cursor;
        let geometry = self.geometry;
        let selecting = std::mem::take(&mut self.selecting);
        let event = self.pointer_event(local);

        let panel = match &mut self.content {
            WindowContent::Launcher(launcher) => {
                let action = launcher.on_release(event, geometry);
                return self.apply_launcher(action);
            }
            WindowContent::Panel(panel) => panel,
        };

        if panel.chrome().button_pressed() {
            let hit = panel.chrome().hit_test(local, geometry.width, geometry.height);
            let action = panel.chrome_mut().release_button(hit);
            self.request_redraw();
            return match action {
                ChromeAction::Minimize => {
                    self.minimize();
                    WindowAction::None
                }
                ChromeAction::Close => WindowAction::CloseRequested,
                ChromeAction::None => WindowAction::None,
            };
        }

        if panel.chrome().frame.is_active() {
            let outcome = panel
                .chrome_mut()
                .frame
                .on_release(event, geometry);
            if let PointerOutcome::Cursor(icon) = outcome {
                self.set_cursor(icon);
            }
            return WindowAction::None;
        }

        if selecting && panel.on_release() {
            self.request_redraw();
        }
        WindowAction::None
    }

    pub fn handle_mouse_wheel(&mut self, delta: MouseScrollDelta) {
        if let WindowContent::Panel(panel) = &mut self.content {
            if panel.on_scroll(wheel_lines(delta)) {
                self.request_redraw();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_lines() {
        assert_eq!(wheel_lines(MouseScrollDelta::LineDelta(0., -2.)), -2.);
        let pixels = MouseScrollDelta::PixelDelta(PhysicalPosition::new(0., 40.));
        assert_eq!(wheel_lines(pixels), 40. / theme::SCROLL_LINE_PIXELS);
    }

    #[test]
    fn test_hover_cursor() {
        assert_eq!(hover_cursor(HitTarget::Title, true), CursorIcon::Text);
        assert_eq!(hover_cursor(HitTarget::Title, false), CursorIcon::Default);
        assert_eq!(hover_cursor(HitTarget::Body, false), CursorIcon::Text);
        assert_eq!(hover_cursor(HitTarget::Close, true), CursorIcon::Default);
    }
}
