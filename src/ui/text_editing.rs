// Applies editing commands to a focused text field

use super::keyboard::EditKey;
use super::text_rasterizing::LaidOutText;
use crate::types::text::TextField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Key means nothing to the field; the owner may use it (Enter/Tab in todo rows)
    Unhandled,
    /// Blinkey or selection moved
    Moved,
    /// Text changed
    Edited,
}

impl EditOutcome {
    pub fn needs_redraw(self) -> bool {
        self != Self::Unhandled
    }
}

/// Clipboard access, swappable so editing works headless
pub trait ClipboardAccess {
    fn get_text(&mut self) -> Option<String>;
    fn set_text(&mut self, text: String) -> bool;
}

/// System clipboard via arboard. A fresh handle per call, as the clipboard
/// owner can change between uses.
pub struct SystemClipboard;

#[cfg(not(target_os = "redox"))]
impl ClipboardAccess for SystemClipboard {
    fn get_text(&mut self) -> Option<String> {
        arboard::Clipboard::new().and_then(|mut c| c.get_text()).ok()
    }

    fn set_text(&mut self, text: String) -> bool {
        match arboard::Clipboard::new().and_then(|mut c| c.set_text(text)) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Clipboard unavailable: {}", e);
                false
            }
        }
    }
}

#[cfg(target_os = "redox")]
impl ClipboardAccess for SystemClipboard {
    fn get_text(&mut self) -> Option<String> {
        None
    }

    fn set_text(&mut self, _text: String) -> bool {
        false
    }
}

pub fn apply_key(field: &mut TextField, key: &EditKey, shift: bool) -> EditOutcome {
    match key {
        EditKey::Left => {
            field.move_left(shift);
            EditOutcome::Moved
        }
        EditKey::Right => {
            field.move_right(shift);
            EditOutcome::Moved
        }
        EditKey::Up if field.multiline => {
            field.move_up(shift);
            EditOutcome::Moved
        }
        EditKey::Down if field.multiline => {
            field.move_down(shift);
            EditOutcome::Moved
        }
        EditKey::Home => {
            field.move_home(shift);
            EditOutcome::Moved
        }
        EditKey::End => {
            field.move_end(shift);
            EditOutcome::Moved
        }
        EditKey::Backspace => {
            field.backspace();
            EditOutcome::Edited
        }
        EditKey::Delete => {
            field.delete_forward();
            EditOutcome::Edited
        }
        EditKey::Enter if field.multiline => {
            field.insert_char('\n');
            EditOutcome::Edited
        }
        EditKey::Text(text) => {
            field.insert_str(text);
            EditOutcome::Edited
        }
        _ => EditOutcome::Unhandled,
    }
}

/// Ctrl+A/C/X/V. Cut only deletes once the clipboard took the text.
pub fn apply_shortcut(field: &mut TextField, letter: char, clipboard: &mut dyn ClipboardAccess) -> EditOutcome {
    match letter {
        'a' => {
            field.select_all();
            EditOutcome::Moved
        }
        'c' => {
            if let Some(selected) = field.selected_text() {
                clipboard.set_text(selected);
            }
            EditOutcome::Moved
        }
        'x' => match field.selected_text() {
            Some(selected) => {
                if clipboard.set_text(selected) {
                    field.delete_selection();
                    EditOutcome::Edited
                } else {
                    EditOutcome::Moved
                }
            }
            None => EditOutcome::Moved,
        },
        'v' => match clipboard.get_text() {
            Some(text) if !text.is_empty() => {
                field.insert_str(&text);
                EditOutcome::Edited
            }
            _ => EditOutcome::Moved,
        },
        _ => EditOutcome::Unhandled,
    }
}

/// Place the blinkey from a click at (x, y) relative to the text origin
pub fn place_blinkey(field: &mut TextField, layout: &LaidOutText, x: f32, y: f32, extend: bool) {
    let index = layout.index_at(x, y).min(field.len());
    field.move_to(index, extend);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::text_rasterizing::LineLayout;

    #[derive(Default)]
    struct FakeClipboard {
        text: Option<String>,
        broken: bool,
    }

    impl ClipboardAccess for FakeClipboard {
        fn get_text(&mut self) -> Option<String> {
            self.text.clone()
        }

        fn set_text(&mut self, text: String) -> bool {
            if self.broken {
                return false;
            }
            self.text = Some(text);
            true
        }
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut field = TextField::single_line();
        for ch in ["B", "u", "y", " ", "m", "i", "l", "k", "s"] {
            apply_key(&mut field, &EditKey::Text(ch.into()), false);
        }
        assert_eq!(apply_key(&mut field, &EditKey::Backspace, false), EditOutcome::Edited);
        assert_eq!(field.text(), "Buy milk");
    }

    #[test]
    fn test_enter_only_in_multiline() {
        let mut single = TextField::single_line().with_text("a");
        assert_eq!(apply_key(&mut single, &EditKey::Enter, false), EditOutcome::Unhandled);
        assert_eq!(apply_key(&mut single, &EditKey::Tab, false), EditOutcome::Unhandled);

        let mut multi = TextField::multi_line().with_text("a");
        assert_eq!(apply_key(&mut multi, &EditKey::Enter, false), EditOutcome::Edited);
        apply_key(&mut multi, &EditKey::Text("b".into()), false);
        assert_eq!(multi.text(), "a\nb");
    }

    #[test]
    fn test_shift_arrows_select() {
        let mut field = TextField::single_line().with_text("hello");
        apply_key(&mut field, &EditKey::Home, false);
        apply_key(&mut field, &EditKey::Right, true);
        apply_key(&mut field, &EditKey::Right, true);
        assert_eq!(field.selected_text().as_deref(), Some("he"));
        apply_key(&mut field, &EditKey::Text("J".into()), false);
        assert_eq!(field.text(), "Jllo");
    }

    #[test]
    fn test_copy_cut_paste() {
        let mut clipboard = FakeClipboard::default();
        let mut field = TextField::single_line().with_text("milk");
        apply_shortcut(&mut field, 'a', &mut clipboard);
        assert_eq!(apply_shortcut(&mut field, 'x', &mut clipboard), EditOutcome::Edited);
        assert_eq!(field.text(), "");
        assert_eq!(apply_shortcut(&mut field, 'v', &mut clipboard), EditOutcome::Edited);
        apply_shortcut(&mut field, 'v', &mut clipboard);
        assert_eq!(field.text(), "milkmilk");
        assert_eq!(apply_shortcut(&mut field, 'q', &mut clipboard), EditOutcome::Unhandled);
    }

    #[test]
    fn test_cut_keeps_text_when_clipboard_fails() {
        let mut clipboard = FakeClipboard {
            broken: true,
            ..Default::default()
        };
        let mut field = TextField::single_line().with_text("eggs");
        apply_shortcut(&mut field, 'a', &mut clipboard);
        assert_eq!(apply_shortcut(&mut field, 'x', &mut clipboard), EditOutcome::Moved);
        assert_eq!(field.text(), "eggs");
    }

    #[test]
    fn test_click_places_blinkey() {
        let layout = LaidOutText {
            lines: vec![LineLayout {
                top: 0.,
                start: 0,
                end: 4,
                carets: vec![0., 10., 20., 30., 40.],
                ends_paragraph: true,
            }],
            line_height: 20.,
        };
        let mut field = TextField::single_line().with_text("milk");
        place_blinkey(&mut field, &layout, 21., 5., false);
        assert_eq!(field.blinkey_index, 2);
        place_blinkey(&mut field, &layout, 100., 5., true);
        assert_eq!(field.selected_text().as_deref(), Some("lk"));
    }
}
