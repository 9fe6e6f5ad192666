// Hide console window on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use anyhow::{anyhow, Context};
use capsule_notes::debug_println;
use capsule_notes::platform;
use capsule_notes::types::geometry::{Point, WindowGeometry};
use capsule_notes::types::note::Note;
use capsule_notes::ui::dialogs::{Dialogs, NativeDialogs};
use capsule_notes::ui::drawing::random_scheme;
use capsule_notes::ui::launcher::Launcher;
use capsule_notes::ui::note_panel::{open_note, NotePanel};
use capsule_notes::ui::panel::CloseOutcome;
use capsule_notes::ui::registry::WindowRegistry;
use capsule_notes::ui::text_editing::SystemClipboard;
use capsule_notes::ui::text_rasterizing::TextRenderer;
use capsule_notes::ui::theme;
use capsule_notes::ui::todo_panel::TodoPanel;
use capsule_notes::ui::{AppCommand, AppError, AppWindow, PanelKind, WindowAction, WindowContent};
use std::path::PathBuf;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::WindowId,
};

struct App {
    windows: WindowRegistry<WindowId, AppWindow>,
    launcher: Option<WindowId>,
    text: TextRenderer,
    dialogs: NativeDialogs,
    clipboard: SystemClipboard,
    screen: WindowGeometry,
    /// Note given on the command line; replaces the launcher
    open_path: Option<PathBuf>,
    started: bool,
    fatal: Option<anyhow::Error>,
}

impl App {
    fn new(open_path: Option<PathBuf>) -> Self {
        Self {
            windows: WindowRegistry::new(),
            launcher: None,
            text: TextRenderer::new(),
            dialogs: NativeDialogs,
            clipboard: SystemClipboard,
            screen: WindowGeometry::default(),
            open_path,
            started: false,
            fatal: None,
        }
    }

    fn startup(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next())
            .ok_or_else(|| anyhow!("No monitor found"))?;
        let (position, size) = (monitor.position(), monitor.size());
        self.screen = WindowGeometry::new(position.x, position.y, size.width as i32, size.height as i32);
        log::info!("Screen {:?}", self.screen);

        if let Some(path) = self.open_path.take() {
            self.open_note_file(event_loop, path)
                .context("Failed to open note window")?;
            return Ok(());
        }

        let launcher = Launcher::random(&mut rand::thread_rng());
        let placement = WindowGeometry::new(0, 0, theme::LAUNCHER_WIDTH as i32, theme::LAUNCHER_HEIGHT as i32)
            .centered_in(&self.screen);
        let window = AppWindow::open(
            event_loop,
            "Capsule Notes",
            theme::LAUNCHER_WIDTH,
            theme::LAUNCHER_HEIGHT,
            Some(placement.origin()),
            WindowContent::Launcher(launcher),
        )
        .context("Failed to create launcher window")?;
        self.launcher = Some(window.id());
        self.windows.insert(window.id(), window);
        Ok(())
    }

    fn open_note_file(&mut self, event_loop: &ActiveEventLoop, path: PathBuf) -> Result<(), AppError> {
        let fallback = WindowGeometry::new(0, 0, theme::NOTE_WIDTH as i32, theme::NOTE_HEIGHT as i32)
            .centered_in(&self.screen);
        let note = open_note(&path, fallback, &self.screen, &mut self.dialogs);
        let position = note.geometry.origin();
        self.insert_note(event_loop, note, Some(position))
    }

    fn insert_note(
        &mut self,
        event_loop: &ActiveEventLoop,
        note: Note,
        position: Option<Point>,
    ) -> Result<(), AppError> {
        let (width, height) = (note.geometry.width.max(1) as u32, note.geometry.height.max(1) as u32);
        let title = note.title.clone();
        let scheme = random_scheme(&theme::NOTE_SCHEMES, &mut rand::thread_rng());
        let panel = NotePanel::new(note, scheme);
        let window = AppWindow::open(
            event_loop,
            &title,
            width,
            height,
            position,
            WindowContent::Panel(Box::new(panel)),
        )?;
        self.windows.insert(window.id(), window);
        Ok(())
    }

    /// Blank panel of `kind`, placed by the window manager
    fn spawn(&mut self, event_loop: &ActiveEventLoop, kind: PanelKind) {
        let result = match kind {
            PanelKind::Note => {
                let geometry = WindowGeometry::new(0, 0, theme::NOTE_WIDTH as i32, theme::NOTE_HEIGHT as i32);
                self.insert_note(event_loop, Note::blank(geometry), None)
            }
            PanelKind::Todo => {
                let scheme = random_scheme(&theme::TODO_SCHEMES, &mut rand::thread_rng());
                let panel = TodoPanel::new(scheme, theme::TODO_WIDTH, theme::TODO_HEIGHT);
                AppWindow::open(
                    event_loop,
                    theme::TODO_TITLE,
                    theme::TODO_WIDTH,
                    theme::TODO_HEIGHT,
                    None,
                    WindowContent::Panel(Box::new(panel)),
                )
                .map(|window| self.windows.insert(window.id(), window))
            }
        };

        match result {
            Ok(()) => log::info!("Opened {:?} panel ({} windows)", kind, self.windows.len()),
            Err(e) => {
                log::error!("Failed to open {:?} panel: {}", kind, e);
                self.dialogs.error("Could not open window", &e.to_string());
            }
        }
    }

    fn command(&mut self, event_loop: &ActiveEventLoop, command: AppCommand) {
        debug_println!("Command {:?}", command);
        match command {
            AppCommand::NewNote => self.spawn(event_loop, PanelKind::Note),
            AppCommand::NewTodo => self.spawn(event_loop, PanelKind::Todo),
            AppCommand::Quit => {
                log::info!("Quit with {} windows open", self.windows.len());
                event_loop.exit();
            }
        }
    }

    fn close(&mut self, event_loop: &ActiveEventLoop, id: WindowId) {
        let Some(window) = self.windows.get_mut(id) else {
            return;
        };
        if window.request_close(&mut self.dialogs) == CloseOutcome::Cancel {
            debug_println!("Close of {:?} cancelled", id);
            return;
        }

        self.windows.remove(id);
        if self.launcher == Some(id) {
            self.launcher = None;
        }
        if self.windows.is_empty() {
            log::info!("Last window closed");
            event_loop.exit();
        }
    }
}

impl ApplicationHandler<AppCommand> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.started {
            return;
        }
        self.started = true;
        if let Err(e) = self.startup(event_loop) {
            self.fatal = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        let Some(window) = self.windows.get_mut(id) else {
            return;
        };

        let action = match event {
            WindowEvent::CloseRequested => WindowAction::CloseRequested,
            WindowEvent::Resized(size) => {
                window.handle_resized(size);
                WindowAction::None
            }
            WindowEvent::Moved(position) => {
                window.handle_moved(position);
                WindowAction::None
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = window.redraw(&mut self.text) {
                    log::error!("Redraw of {:?} failed: {}", id, e);
                }
                WindowAction::None
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                window.modifiers = modifiers.state();
                WindowAction::None
            }
            WindowEvent::KeyboardInput { event, .. } => window.handle_keyboard(&event, &mut self.clipboard),
            WindowEvent::MouseInput { state, button, .. } => window.handle_mouse_input(state, button),
            WindowEvent::CursorMoved { position, .. } => window.handle_cursor_moved(position),
            WindowEvent::MouseWheel { delta, .. } => {
                window.handle_mouse_wheel(delta);
                WindowAction::None
            }
            WindowEvent::CursorLeft { .. } => {
                window.handle_cursor_left();
                WindowAction::None
            }
            _ => WindowAction::None,
        };

        match action {
            WindowAction::None => {}
            WindowAction::Spawn(kind) => self.spawn(event_loop, kind),
            WindowAction::Command(command) => self.command(event_loop, command),
            WindowAction::CloseRequested => self.close(event_loop, id),
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, command: AppCommand) {
        self.command(event_loop, command);
    }
}

fn run() -> anyhow::Result<()> {
    let open_path = std::env::args_os().nth(1).map(PathBuf::from);

    platform::register_note_extension();

    let event_loop = EventLoop::<AppCommand>::with_user_event()
        .build()
        .map_err(AppError::from)
        .context("Failed to create event loop")?;
    let mut app = App::new(open_path);
    event_loop.run_app(&mut app).map_err(AppError::from)?;

    match app.fatal.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn main() {
    capsule_notes::init_logging();
    log::info!("Capsule Notes {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run() {
        log::error!("{:#}", e);
        NativeDialogs.error("Capsule Notes", &format!("{:#}", e));
        std::process::exit(1);
    }
}
