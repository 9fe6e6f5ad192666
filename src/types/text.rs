//! Editable text state: characters, blinkey (caret) and selection.
//!
//! Indices are char positions, not bytes. `blinkey_index` ranges over
//! `0..=chars.len()` (0 = before the first char, len = after the last).

use std::ops::Range;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    pub chars: Vec<char>,
    pub blinkey_index: usize,
    pub selection_anchor: Option<usize>,
    pub multiline: bool,
}

impl TextField {
    pub fn single_line() -> Self {
        Self::default()
    }

    pub fn multi_line() -> Self {
        Self {
            multiline: true,
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Replace the whole content, blinkey goes to the end
    pub fn set_text(&mut self, text: &str) {
        self.chars = self.sanitize(text);
        self.blinkey_index = self.chars.len();
        self.selection_anchor = None;
    }

    /// Ordered, non-empty selection range
    pub fn selection_range(&self) -> Option<Range<usize>> {
        let anchor = self.selection_anchor?;
        if anchor == self.blinkey_index {
            return None;
        }
        Some(anchor.min(self.blinkey_index)..anchor.max(self.blinkey_index))
    }

    pub fn selected_text(&self) -> Option<String> {
        self.selection_range()
            .map(|range| self.chars[range].iter().collect())
    }

    /// Remove the selected chars. Returns true if anything was removed.
    pub fn delete_selection(&mut self) -> bool {
        match self.selection_range() {
            Some(range) => {
                self.blinkey_index = range.start;
                self.chars.drain(range);
                self.selection_anchor = None;
                true
            }
            None => {
                self.selection_anchor = None;
                false
            }
        }
    }

    pub fn insert_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut buf));
    }

    /// Insert at the blinkey, replacing any selection
    pub fn insert_str(&mut self, text: &str) {
        self.delete_selection();
        let new_chars = self.sanitize(text);
        let count = new_chars.len();
        self.chars
            .splice(self.blinkey_index..self.blinkey_index, new_chars);
        self.blinkey_index += count;
    }

    pub fn backspace(&mut self) {
        if self.delete_selection() {
            return;
        }
        if self.blinkey_index > 0 {
            self.blinkey_index -= 1;
            self.chars.remove(self.blinkey_index);
        }
    }

    pub fn delete_forward(&mut self) {
        if self.delete_selection() {
            return;
        }
        if self.blinkey_index < self.chars.len() {
            self.chars.remove(self.blinkey_index);
        }
    }

    pub fn select_all(&mut self) {
        if self.chars.is_empty() {
            return;
        }
        self.selection_anchor = Some(0);
        self.blinkey_index = self.chars.len();
    }

    /// Move the blinkey, starting or extending a selection when `extend` is set
    pub fn move_to(&mut self, index: usize, extend: bool) {
        let index = index.min(self.chars.len());
        if extend {
            if self.selection_anchor.is_none() {
                self.selection_anchor = Some(self.blinkey_index);
            }
        } else {
            self.selection_anchor = None;
        }
        self.blinkey_index = index;
    }

    pub fn move_left(&mut self, extend: bool) {
        // Collapsing a selection lands on its left edge
        if !extend {
            if let Some(range) = self.selection_range() {
                self.move_to(range.start, false);
                return;
            }
        }
        let target = self.blinkey_index.saturating_sub(1);
        self.move_to(target, extend);
    }

    pub fn move_right(&mut self, extend: bool) {
        if !extend {
            if let Some(range) = self.selection_range() {
                self.move_to(range.end, false);
                return;
            }
        }
        let target = self.blinkey_index + 1;
        self.move_to(target, extend);
    }

    /// Start and end (exclusive, before the newline) of the logical line holding `index`
    pub fn line_bounds(&self, index: usize) -> (usize, usize) {
        let index = index.min(self.chars.len());
        let start = self.chars[..index]
            .iter()
            .rposition(|&c| c == '\n')
            .map_or(0, |p| p + 1);
        let end = self.chars[index..]
            .iter()
            .position(|&c| c == '\n')
            .map_or(self.chars.len(), |p| index + p);
        (start, end)
    }

    pub fn move_home(&mut self, extend: bool) {
        let (start, _) = self.line_bounds(self.blinkey_index);
        self.move_to(start, extend);
    }

    pub fn move_end(&mut self, extend: bool) {
        let (_, end) = self.line_bounds(self.blinkey_index);
        self.move_to(end, extend);
    }

    /// Previous logical line, same column where possible
    pub fn move_up(&mut self, extend: bool) {
        let (start, _) = self.line_bounds(self.blinkey_index);
        if start == 0 {
            self.move_to(0, extend);
            return;
        }
        let column = self.blinkey_index - start;
        let (prev_start, prev_end) = self.line_bounds(start - 1);
        self.move_to((prev_start + column).min(prev_end), extend);
    }

    /// Next logical line, same column where possible
    pub fn move_down(&mut self, extend: bool) {
        let (start, end) = self.line_bounds(self.blinkey_index);
        if end == self.chars.len() {
            self.move_to(end, extend);
            return;
        }
        let column = self.blinkey_index - start;
        let (next_start, next_end) = self.line_bounds(end + 1);
        self.move_to((next_start + column).min(next_end), extend);
    }

    /// Single-line fields fold newlines into spaces; control chars are dropped
    fn sanitize(&self, text: &str) -> Vec<char> {
        text.chars()
            .filter(|&c| c != '\r')
            .filter_map(|c| match c {
                '\n' if self.multiline => Some('\n'),
                '\n' | '\t' => Some(' '),
                c if c.is_control() => None,
                c => Some(c),
            })
            .collect()
    }
}
