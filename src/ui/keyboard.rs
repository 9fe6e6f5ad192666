// Keyboard input translation: winit key events to editing commands

#[cfg(feature = "debug-keys")]
use crate::DEBUG_ENABLED;
#[cfg(feature = "debug-keys")]
use std::sync::atomic::Ordering;

use super::launcher::command_for_shortcut;
use super::text_editing::ClipboardAccess;
use super::window::{AppWindow, WindowAction, WindowContent};
use winit::{
    event::{ElementState, KeyEvent},
    keyboard::{Key, ModifiersState, NamedKey},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditKey {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Backspace,
    Delete,
    Enter,
    Tab,
    Escape,
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyInput {
    /// Plain editing key; `shift` extends selections and reverses Tab
    Edit { key: EditKey, shift: bool },
    /// Ctrl + letter, lowercased
    Shortcut(char),
    Ignored,
}

pub fn translate(event: &KeyEvent, modifiers: ModifiersState) -> KeyInput {
    if event.state != ElementState::Pressed {
        return KeyInput::Ignored;
    }

    if modifiers.control_key() {
        let Key::Character(ref c) = event.logical_key else {
            return KeyInput::Ignored;
        };
        let Some(letter) = c.chars().next().map(|ch| ch.to_ascii_lowercase()) else {
            return KeyInput::Ignored;
        };

        // Ctrl+D: toggle debug_println! output
        #[cfg(feature = "debug-keys")]
        if letter == 'd' {
            let enabled = !DEBUG_ENABLED.load(Ordering::Relaxed);
            DEBUG_ENABLED.store(enabled, Ordering::Relaxed);
            log::info!("Debug output {}", if enabled { "on" } else { "off" });
            return KeyInput::Ignored;
        }

        debug_println!("Shortcut Ctrl+{}", letter);
        return KeyInput::Shortcut(letter);
    }

    let shift = modifiers.shift_key();
    let key = match event.logical_key {
        Key::Named(NamedKey::ArrowLeft) => EditKey::Left,
        Key::Named(NamedKey::ArrowRight) => EditKey::Right,
        Key::Named(NamedKey::ArrowUp) => EditKey::Up,
        Key::Named(NamedKey::ArrowDown) => EditKey::Down,
        Key::Named(NamedKey::Home) => EditKey::Home,
        Key::Named(NamedKey::End) => EditKey::End,
        Key::Named(NamedKey::Backspace) => EditKey::Backspace,
        Key::Named(NamedKey::Delete) => EditKey::Delete,
        Key::Named(NamedKey::Enter) => EditKey::Enter,
        Key::Named(NamedKey::Tab) => EditKey::Tab,
        Key::Named(NamedKey::Escape) => EditKey::Escape,
        Key::Named(NamedKey::Space) => EditKey::Text(" ".to_string()),
        Key::Character(ref c) => EditKey::Text(c.to_string()),
        _ => return KeyInput::Ignored,
    };
    KeyInput::Edit { key, shift }
}

impl AppWindow {
    pub fn handle_keyboard(
        &mut self,
        event: &KeyEvent,
        clipboard: &mut dyn ClipboardAccess,
    ) -> WindowAction {
        let input = translate(event, self.modifiers);
        match &mut self.content {
            WindowContent::Launcher(_) => match input {
                KeyInput::Shortcut(letter) => command_for_shortcut(letter)
                    .map(WindowAction::Command)
                    .unwrap_or(WindowAction::None),
                _ => WindowAction::None,
            },
            WindowContent::Panel(panel) => {
                if panel.on_key(&input, clipboard) {
                    self.request_redraw();
                }
                WindowAction::None
            }
        }
    }
}
