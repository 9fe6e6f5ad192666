pub mod dialogs;
pub mod drawing;
pub mod edge;
pub mod frame;
pub mod keyboard;
pub mod launcher;
mod mouse;
pub mod note_panel;
pub mod panel;
pub mod registry;
pub mod text_editing;
pub mod text_rasterizing;
pub mod todo_panel;
pub mod window;

#[cfg(target_os = "windows")]
mod renderer_windows;

#[cfg(not(target_os = "windows"))]
mod renderer_softbuffer;

#[cfg(target_os = "windows")]
use renderer_windows as renderer;

#[cfg(not(target_os = "windows"))]
use renderer_softbuffer as renderer;

pub mod theme;

pub use launcher::PanelKind;
pub use renderer::Renderer;
pub use window::{AppWindow, WindowAction, WindowContent};

use thiserror::Error;

/// Commands delivered to the event loop through its proxy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    NewNote,
    NewTodo,
    Quit,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to create drawing surface: {0}")]
    Surface(String),
    #[error("Failed to present frame: {0}")]
    Present(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error(transparent)]
    Render(#[from] RenderError),
}
