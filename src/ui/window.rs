//! One OS window: winit handle, pixel renderer, model geometry and what it shows.
//!
//! The model geometry is authoritative while a drag or resize is running:
//! pointer behaviors compute the next geometry from it and the result is
//! pushed to the OS window. Outside gestures, OS moves and resizes are folded
//! back into the model.

use super::dialogs::Dialogs;
use super::frame::{PointerBehavior, PointerEvent};
use super::launcher::{Launcher, PanelKind};
use super::panel::{CloseOutcome, Panel};
use super::text_rasterizing::TextRenderer;
use super::{AppCommand, AppError, Renderer};
use crate::types::geometry::{Point, WindowGeometry};
use std::sync::Arc;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::ModifiersState;
use winit::window::{CursorIcon, Window, WindowId, WindowLevel};

pub enum WindowContent {
    Launcher(Launcher),
    Panel(Box<dyn Panel>),
}

/// What a window asks of the application after handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowAction {
    None,
    Spawn(PanelKind),
    Command(AppCommand),
    /// Close button; goes through the same path as an OS close request
    CloseRequested,
}

pub struct AppWindow {
    pub content: WindowContent,
    pub geometry: WindowGeometry,
    pub modifiers: ModifiersState,
    /// Last window-local pointer position
    pub cursor: Point,
    /// Primary button held after a press routed to the panel body or title
    pub selecting: bool,
    cursor_icon: CursorIcon,
    renderer: Renderer,
    // Dropped after the renderer
    pub window: Arc<Window>,
}

impl AppWindow {
    /// Create a frameless, always-on-top window. Without a position the
    /// window manager places it.
    pub fn open(
        event_loop: &ActiveEventLoop,
        title: &str,
        width: u32,
        height: u32,
        position: Option<Point>,
        content: WindowContent,
    ) -> Result<Self, AppError> {
        let (width, height) = (width.max(1), height.max(1));
        let mut attributes = Window::default_attributes()
            .with_title(title)
            .with_inner_size(PhysicalSize::new(width, height))
            .with_decorations(false)
            .with_transparent(true)
            .with_window_level(WindowLevel::AlwaysOnTop);
        if let Some(p) = position {
            attributes = attributes.with_position(PhysicalPosition::new(p.x, p.y));
        }

        let window = Arc::new(event_loop.create_window(attributes)?);
        let origin = window
            .outer_position()
            .map(|p| Point::new(p.x, p.y))
            .or_else(|_| position.ok_or(()))
            .unwrap_or_default();
        let renderer = Renderer::new(window.clone(), width, height)?;

        debug_println!("Opened window {:?} '{}' at {:?}", window.id(), title, origin);
        window.request_redraw();

        Ok(Self {
            content,
            geometry: WindowGeometry::new(origin.x, origin.y, width as i32, height as i32),
            modifiers: ModifiersState::empty(),
            cursor: Point::default(),
            selecting: false,
            cursor_icon: CursorIcon::Default,
            renderer,
            window,
        })
    }

    pub fn id(&self) -> WindowId {
        self.window.id()
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }

    pub fn redraw(&mut self, text: &mut TextRenderer) -> Result<(), AppError> {
        let content = &mut self.content;
        self.renderer.present_with(|pixels, width, height| match content {
            WindowContent::Launcher(launcher) => launcher.paint(text, pixels, width, height),
            WindowContent::Panel(panel) => panel.paint(text, pixels, width, height),
        })?;
        Ok(())
    }

    /// A drag or resize is in progress
    pub fn gesture_active(&self) -> bool {
        match &self.content {
            WindowContent::Launcher(launcher) => launcher.is_active(),
            WindowContent::Panel(panel) => panel.chrome().frame.is_active(),
        }
    }

    /// Push a model geometry to the OS window. The OS size never drops below 1px.
    pub fn apply_geometry(&mut self, geometry: WindowGeometry) {
        let previous = self.geometry;
        self.geometry = geometry;

        if geometry.origin() != previous.origin() {
            self.window
                .set_outer_position(PhysicalPosition::new(geometry.x, geometry.y));
        }
        if (geometry.width, geometry.height) != (previous.width, previous.height) {
            let size = PhysicalSize::new(geometry.width.max(1) as u32, geometry.height.max(1) as u32);
            if let Some(actual) = self.window.request_inner_size(size) {
                self.resize_surface(actual);
            }
            self.window.request_redraw();
        }
    }

    /// Pointer in window-local and screen space. The screen point uses the
    /// OS window position, not the model, so a move the OS has not applied
    /// yet does not count twice.
    pub fn pointer_event(&self, local: Point) -> PointerEvent {
        let os_origin = self.window.outer_position().ok().map(|p| Point::new(p.x, p.y));
        PointerEvent::from_window(local, os_origin, &self.geometry)
    }

    pub fn set_cursor(&mut self, icon: CursorIcon) {
        if icon != self.cursor_icon {
            self.cursor_icon = icon;
            self.window.set_cursor(icon);
        }
    }

    fn resize_surface(&mut self, size: PhysicalSize<u32>) {
        if let Err(e) = self.renderer.resize(size.width, size.height) {
            log::warn!("Surface resize to {}x{} failed: {}", size.width, size.height, e);
        }
    }

    pub fn handle_resized(&mut self, size: PhysicalSize<u32>) {
        self.resize_surface(size);
        if !self.gesture_active() {
            self.geometry.width = size.width as i32;
            self.geometry.height = size.height as i32;
        }
        self.window.request_redraw();
    }

    pub fn handle_moved(&mut self, position: PhysicalPosition<i32>) {
        if !self.gesture_active() {
            self.geometry.x = position.x;
            self.geometry.y = position.y;
        }
    }

    pub fn minimize(&self) {
        self.window.set_minimized(true);
    }

    /// Run the close policy. Launchers and todo lists close straight away.
    pub fn request_close(&mut self, dialogs: &mut dyn Dialogs) -> CloseOutcome {
        match &mut self.content {
            WindowContent::Launcher(_) => CloseOutcome::Close,
            WindowContent::Panel(panel) => panel.request_close(self.geometry, dialogs),
        }
    }
}
