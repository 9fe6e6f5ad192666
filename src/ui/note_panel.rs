//! Sticky note: editable title in the title bar, wrapped multi-line body,
//! saved to a `.sn` file when the window closes.

use super::dialogs::{Dialogs, SavePrompt};
use super::drawing::{self, Scheme};
use super::keyboard::{EditKey, KeyInput};
use super::panel::{
    clamp_scroll, paint_text_field, scroll_into_view, CloseOutcome, HitTarget, Panel, PanelChrome,
    TitleBarLayout,
};
use super::text_editing::{apply_key, apply_shortcut, place_blinkey, ClipboardAccess};
use super::text_rasterizing::{LaidOutText, TextRenderer};
use super::theme;
use crate::storage::note_file::{self, with_note_extension};
use crate::types::geometry::{Point, Region, WindowGeometry};
use crate::types::note::{Note, DEFAULT_NOTE_TITLE};
use crate::types::text::TextField;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    None,
    Title,
    Content,
}

pub struct NotePanel {
    chrome: PanelChrome,
    pub title: TextField,
    pub content: TextField,
    pub file_path: Option<PathBuf>,
    /// Bold body text, not persisted
    pub bold: bool,
    focus: Focus,
    selecting: bool,
    scroll: f32,
    /// Scroll the blinkey into view on the next paint
    follow_blinkey: bool,
    scrollbar_hovered: bool,
    size: (i32, i32),
    title_layout: LaidOutText,
    title_offset: f32,
    content_layout: LaidOutText,
}

/// Read `path` into a note. Unreadable or malformed files warn and give a
/// blank note still bound to `path`.
pub fn open_note(path: &Path, fallback: WindowGeometry, screen: &WindowGeometry, dialogs: &mut dyn Dialogs) -> Note {
    match note_file::load(path) {
        Ok(document) => {
            log::info!("Opened note {}", path.display());
            Note::from_document(document, path.to_path_buf(), fallback, screen)
        }
        Err(e) => {
            dialogs.warn("Could not open note", &e.to_string());
            let mut note = Note::blank(fallback);
            note.file_path = Some(path.to_path_buf());
            note
        }
    }
}

impl NotePanel {
    pub fn new(note: Note, scheme: Scheme) -> Self {
        let (width, height) = (note.geometry.width, note.geometry.height);
        Self {
            chrome: PanelChrome::new(scheme, theme::NORMAL_FACTOR, width.max(1) as u32, height.max(1) as u32),
            title: TextField::single_line().with_text(&note.title),
            content: TextField::multi_line().with_text(&note.content),
            file_path: note.file_path,
            bold: false,
            focus: Focus::None,
            selecting: false,
            scroll: 0.,
            follow_blinkey: false,
            scrollbar_hovered: false,
            size: (width, height),
            title_layout: LaidOutText::default(),
            title_offset: 0.,
            content_layout: LaidOutText::default(),
        }
    }

    /// Current state as a persistable note
    pub fn snapshot(&self, geometry: WindowGeometry) -> Note {
        Note {
            title: self.title.text(),
            content: self.content.text(),
            geometry,
            file_path: self.file_path.clone(),
        }
    }

    fn display_title(&self) -> String {
        if self.title.is_empty() {
            DEFAULT_NOTE_TITLE.to_string()
        } else {
            self.title.text()
        }
    }

    fn save(&mut self, geometry: WindowGeometry, dialogs: &mut dyn Dialogs) -> CloseOutcome {
        let path = match &self.file_path {
            Some(path) => path.clone(),
            None => match dialogs.choose_save_path(&self.display_title()) {
                Some(path) => with_note_extension(path),
                None => return CloseOutcome::Cancel,
            },
        };

        let document = self.snapshot(geometry).to_document();
        match note_file::save(&path, &document) {
            Ok(()) => {
                log::info!("Saved note to {}", path.display());
                self.file_path = Some(path);
                CloseOutcome::Close
            }
            Err(e) => {
                dialogs.error("Could not save note", &e.to_string());
                CloseOutcome::Cancel
            }
        }
    }

    fn viewport(&self) -> Region {
        Region::new(
            0,
            theme::TITLE_BAR_HEIGHT,
            self.size.0,
            self.size.1 - theme::TITLE_BAR_HEIGHT,
        )
    }

    fn content_height(&self) -> f32 {
        self.content_layout.height() + 2. * theme::CONTENT_PADDING as f32
    }

    fn content_origin(&self) -> (f32, f32) {
        (
            theme::CONTENT_PADDING as f32,
            (theme::TITLE_BAR_HEIGHT + theme::CONTENT_PADDING) as f32 - self.scroll,
        )
    }

    fn title_origin(&self) -> (f32, f32) {
        let field = TitleBarLayout::new(self.size.0).title;
        (
            (field.x + theme::TITLE_FIELD_PADDING) as f32 - self.title_offset,
            field.y as f32 + (field.h as f32 - self.title_layout.line_height) / 2.,
        )
    }

    fn place(&mut self, local: Point, extend: bool) {
        match self.focus {
            Focus::Title => {
                let (ox, oy) = self.title_origin();
                place_blinkey(&mut self.title, &self.title_layout, local.x as f32 - ox, local.y as f32 - oy, extend);
            }
            Focus::Content => {
                let (ox, oy) = self.content_origin();
                place_blinkey(&mut self.content, &self.content_layout, local.x as f32 - ox, local.y as f32 - oy, extend);
            }
            Focus::None => {}
        }
    }

    fn on_scrollbar(&self, local: Point) -> bool {
        let track_x = self.size.0 - theme::SCROLLBAR_MARGIN_RIGHT - theme::SCROLLBAR_WIDTH;
        local.x >= track_x - theme::SCROLLBAR_MARGIN_RIGHT && self.viewport().contains(local)
    }
}

impl Panel for NotePanel {
    fn chrome(&self) -> &PanelChrome {
        &self.chrome
    }

    fn chrome_mut(&mut self) -> &mut PanelChrome {
        &mut self.chrome
    }

    fn title_editable(&self) -> bool {
        true
    }

    fn paint(&mut self, text: &mut TextRenderer, pixels: &mut [u32], width: usize, height: usize) {
        self.size = (width as i32, height as i32);
        self.chrome.paint_background(pixels);
        let accent = self.chrome.scheme.accent;

        // Title, scrolled sideways to keep the blinkey inside the field
        let field = TitleBarLayout::new(width as i32).title;
        let inner = (field.w - 2 * theme::TITLE_FIELD_PADDING) as f32;
        let title = text.shape(&self.title.text(), theme::TITLE_FONT_SIZE, theme::FONT_WEIGHT_BOLD, None);
        let (blinkey_x, _) = title.layout.caret_position(self.title.blinkey_index);
        if blinkey_x - self.title_offset > inner {
            self.title_offset = blinkey_x - inner;
        } else if blinkey_x < self.title_offset {
            self.title_offset = blinkey_x;
        }
        self.title_layout = title.layout.clone();
        let clip = Region::new(
            field.x + theme::TITLE_FIELD_PADDING,
            field.y,
            inner as i32 + theme::BLINKEY_WIDTH,
            field.h,
        );
        paint_text_field(
            text,
            pixels,
            width,
            &title,
            &self.title,
            self.title_origin(),
            clip,
            theme::TEXT_COLOUR,
            self.focus == Focus::Title,
            accent,
        );

        // Body
        let weight = if self.bold {
            theme::FONT_WEIGHT_BOLD
        } else {
            theme::FONT_WEIGHT_REGULAR
        };
        let wrap = width as i32
            - 2 * theme::CONTENT_PADDING
            - theme::SCROLLBAR_WIDTH
            - theme::SCROLLBAR_MARGIN_RIGHT;
        let content = text.shape(
            &self.content.text(),
            theme::CONTENT_FONT_SIZE,
            weight,
            Some(wrap.max(1) as f32),
        );
        self.content_layout = content.layout.clone();

        let viewport = self.viewport();
        let visible = viewport.h as f32 - 2. * theme::CONTENT_PADDING as f32;
        if self.follow_blinkey {
            let (_, top) = self.content_layout.caret_position(self.content.blinkey_index);
            let bottom = top + self.content_layout.line_height;
            self.scroll = scroll_into_view(self.scroll, top, bottom, visible);
            self.follow_blinkey = false;
        }
        self.scroll = clamp_scroll(self.scroll, self.content_height(), viewport.h as f32);

        paint_text_field(
            text,
            pixels,
            width,
            &content,
            &self.content,
            self.content_origin(),
            viewport,
            theme::TEXT_COLOUR,
            self.focus == Focus::Content,
            accent,
        );

        drawing::draw_scrollbar(
            pixels,
            width,
            height,
            viewport,
            self.content_height(),
            self.scroll,
            self.chrome.scrollbar_colour(self.scrollbar_hovered),
        );
        self.chrome.paint_buttons(pixels, width, height);
        self.chrome.finish(pixels, width, height);
    }

    fn on_press(&mut self, target: HitTarget, local: Point, extend: bool) -> bool {
        self.focus = match target {
            HitTarget::Title => Focus::Title,
            HitTarget::Body => Focus::Content,
            _ => Focus::None,
        };
        self.selecting = self.focus != Focus::None;
        self.place(local, extend);
        true
    }

    fn on_drag(&mut self, local: Point) -> bool {
        if !self.selecting {
            return false;
        }
        self.place(local, true);
        if self.focus == Focus::Content {
            self.follow_blinkey = true;
        }
        true
    }

    fn on_release(&mut self) -> bool {
        std::mem::take(&mut self.selecting)
    }

    fn on_hover(&mut self, local: Point) -> bool {
        let hovered = self.on_scrollbar(local);
        let changed = hovered != self.scrollbar_hovered;
        self.scrollbar_hovered = hovered;
        changed
    }

    fn on_scroll(&mut self, lines: f32) -> bool {
        let before = self.scroll;
        self.scroll = clamp_scroll(
            self.scroll - lines * theme::SCROLL_LINE_PIXELS,
            self.content_height(),
            self.viewport().h as f32,
        );
        self.scroll != before
    }

    fn on_key(&mut self, input: &KeyInput, clipboard: &mut dyn ClipboardAccess) -> bool {
        let field = match self.focus {
            Focus::Title => &mut self.title,
            Focus::Content => &mut self.content,
            Focus::None => {
                if *input == KeyInput::Shortcut('b') {
                    self.bold = !self.bold;
                    return true;
                }
                return false;
            }
        };

        match input {
            KeyInput::Shortcut('b') => {
                self.bold = !self.bold;
                debug_println!("Bold {}", self.bold);
                true
            }
            KeyInput::Shortcut(letter) => {
                let handled = apply_shortcut(field, *letter, clipboard).needs_redraw();
                self.follow_blinkey = self.focus == Focus::Content;
                handled
            }
            KeyInput::Edit { key: EditKey::Escape, .. } => {
                self.focus = Focus::None;
                true
            }
            // Enter or Tab in the title moves on to the body
            KeyInput::Edit {
                key: EditKey::Enter | EditKey::Tab,
                ..
            } if self.focus == Focus::Title => {
                self.focus = Focus::Content;
                true
            }
            KeyInput::Edit { key, shift } => {
                let handled = apply_key(field, key, *shift).needs_redraw();
                self.follow_blinkey = self.focus == Focus::Content;
                handled
            }
            KeyInput::Ignored => false,
        }
    }

    fn request_close(&mut self, geometry: WindowGeometry, dialogs: &mut dyn Dialogs) -> CloseOutcome {
        match dialogs.ask_save(&self.display_title()) {
            SavePrompt::Cancel => CloseOutcome::Cancel,
            SavePrompt::Discard => CloseOutcome::Close,
            SavePrompt::Save => self.save(geometry, dialogs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::drawing::pick_scheme;
    use crate::ui::text_editing::SystemClipboard;
    use std::collections::VecDeque;
    use tempfile::tempdir;

    const SCREEN: WindowGeometry = WindowGeometry::new(0, 0, 1920, 1080);

    /// Scripted answers, records what was shown
    #[derive(Default)]
    struct FakeDialogs {
        prompts: VecDeque<SavePrompt>,
        save_path: Option<PathBuf>,
        warnings: Vec<String>,
        errors: Vec<String>,
        asked: usize,
    }

    impl Dialogs for FakeDialogs {
        fn ask_save(&mut self, _note_title: &str) -> SavePrompt {
            self.asked += 1;
            self.prompts.pop_front().unwrap_or(SavePrompt::Cancel)
        }

        fn choose_save_path(&mut self, _suggested_name: &str) -> Option<PathBuf> {
            self.save_path.clone()
        }

        fn warn(&mut self, _title: &str, message: &str) {
            self.warnings.push(message.to_string());
        }

        fn error(&mut self, _title: &str, message: &str) {
            self.errors.push(message.to_string());
        }
    }

    fn panel(geometry: WindowGeometry) -> NotePanel {
        NotePanel::new(Note::blank(geometry), pick_scheme(&theme::NOTE_SCHEMES, 0))
    }

    fn type_text(panel: &mut NotePanel, text: &str) {
        let mut clipboard = SystemClipboard;
        for ch in text.chars() {
            panel.on_key(
                &KeyInput::Edit {
                    key: EditKey::Text(ch.to_string()),
                    shift: false,
                },
                &mut clipboard,
            );
        }
    }

    #[test]
    fn test_save_then_reopen() {
        let dir = tempdir().unwrap();
        let geometry = WindowGeometry::new(120, 140, 300, 200);

        let mut note = panel(geometry);
        note.title.set_text("Groceries");
        note.content.set_text("Buy milk");

        let mut dialogs = FakeDialogs {
            prompts: VecDeque::from([SavePrompt::Save]),
            save_path: Some(dir.path().join("x")),
            ..Default::default()
        };
        assert_eq!(note.request_close(geometry, &mut dialogs), CloseOutcome::Close);

        let path = dir.path().join("x.sn");
        assert_eq!(note.file_path.as_deref(), Some(path.as_path()));
        let saved: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["title"], "Groceries");
        assert_eq!(saved["content"], "Buy milk");
        assert_eq!(saved["geometry"], serde_json::json!([120, 140, 300, 200]));

        let reopened = open_note(&path, WindowGeometry::default(), &SCREEN, &mut dialogs);
        assert_eq!(reopened.title, "Groceries");
        assert_eq!(reopened.content, "Buy milk");
        assert_eq!(reopened.geometry, geometry);
        assert!(dialogs.warnings.is_empty());
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut note = panel(WindowGeometry::new(0, 0, 300, 200));
        note.title.set_text("");
        note.on_press(HitTarget::Title, Point::new(20, 15), false);
        type_text(&mut note, "Groceries");
        note.on_press(HitTarget::Body, Point::new(20, 60), false);
        type_text(&mut note, "Buy milk");
        assert_eq!(note.title.text(), "Groceries");
        assert_eq!(note.content.text(), "Buy milk");
    }

    #[test]
    fn test_cancel_keeps_window() {
        let mut note = panel(WindowGeometry::new(0, 0, 300, 200));
        let mut dialogs = FakeDialogs {
            prompts: VecDeque::from([SavePrompt::Cancel]),
            ..Default::default()
        };
        assert_eq!(note.request_close(WindowGeometry::default(), &mut dialogs), CloseOutcome::Cancel);
        assert_eq!(dialogs.asked, 1);
    }

    #[test]
    fn test_discard_writes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("keep.sn");
        let mut note = NotePanel::new(
            Note {
                file_path: Some(path.clone()),
                ..Note::blank(WindowGeometry::new(0, 0, 300, 200))
            },
            pick_scheme(&theme::NOTE_SCHEMES, 1),
        );
        let mut dialogs = FakeDialogs {
            prompts: VecDeque::from([SavePrompt::Discard]),
            ..Default::default()
        };
        assert_eq!(note.request_close(WindowGeometry::default(), &mut dialogs), CloseOutcome::Close);
        assert!(!path.exists());
    }

    #[test]
    fn test_dismissed_chooser_aborts_close() {
        let mut note = panel(WindowGeometry::new(0, 0, 300, 200));
        let mut dialogs = FakeDialogs {
            prompts: VecDeque::from([SavePrompt::Save]),
            save_path: None,
            ..Default::default()
        };
        assert_eq!(note.request_close(WindowGeometry::default(), &mut dialogs), CloseOutcome::Cancel);
        assert!(note.file_path.is_none());
    }

    #[test]
    fn test_failed_save_reports_and_aborts() {
        let dir = tempdir().unwrap();
        let mut note = panel(WindowGeometry::new(0, 0, 300, 200));
        let mut dialogs = FakeDialogs {
            prompts: VecDeque::from([SavePrompt::Save]),
            save_path: Some(dir.path().join("missing").join("deeper.sn")),
            ..Default::default()
        };
        assert_eq!(note.request_close(WindowGeometry::default(), &mut dialogs), CloseOutcome::Cancel);
        assert_eq!(dialogs.errors.len(), 1);
        assert!(note.file_path.is_none());
    }

    #[test]
    fn test_known_path_skips_chooser() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("known.sn");
        let mut note = NotePanel::new(
            Note {
                file_path: Some(path.clone()),
                ..Note::blank(WindowGeometry::new(0, 0, 300, 200))
            },
            pick_scheme(&theme::NOTE_SCHEMES, 2),
        );
        let mut dialogs = FakeDialogs {
            prompts: VecDeque::from([SavePrompt::Save]),
            save_path: Some(dir.path().join("other.sn")),
            ..Default::default()
        };
        assert_eq!(note.request_close(WindowGeometry::default(), &mut dialogs), CloseOutcome::Close);
        assert!(path.exists());
        assert!(!dir.path().join("other.sn").exists());
    }

    #[test]
    fn test_broken_file_warns_and_stays_bound() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.sn");
        std::fs::write(&path, "{ not json").unwrap();

        let fallback = WindowGeometry::new(10, 10, 300, 200);
        let mut dialogs = FakeDialogs::default();
        let note = open_note(&path, fallback, &SCREEN, &mut dialogs);
        assert_eq!(dialogs.warnings.len(), 1);
        assert_eq!(note.content, "");
        assert_eq!(note.geometry, fallback);
        assert_eq!(note.file_path, Some(path));
    }

    #[test]
    fn test_ctrl_b_toggles_bold() {
        let mut note = panel(WindowGeometry::new(0, 0, 300, 200));
        let mut clipboard = SystemClipboard;
        assert!(note.on_key(&KeyInput::Shortcut('b'), &mut clipboard));
        assert!(note.bold);
        note.on_press(HitTarget::Body, Point::new(20, 60), false);
        note.on_key(&KeyInput::Shortcut('b'), &mut clipboard);
        assert!(!note.bold);
    }

    #[test]
    fn test_scroll_clamps_without_overflow() {
        let mut note = panel(WindowGeometry::new(0, 0, 300, 200));
        assert!(!note.on_scroll(-3.));
        assert!(!note.on_scroll(3.));
    }
}
