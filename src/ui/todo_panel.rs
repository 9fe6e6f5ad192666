//! Todo list: a fixed stack of checkbox rows under a read-only title.
//! Rows are in-memory only; closing the window drops them.

use super::dialogs::Dialogs;
use super::drawing::{self, Scheme};
use super::keyboard::{EditKey, KeyInput};
use super::panel::{
    clamp_scroll, paint_text_field, scroll_into_view, CloseOutcome, HitTarget, Panel, PanelChrome,
    TitleBarLayout,
};
use super::text_editing::{apply_key, apply_shortcut, place_blinkey, ClipboardAccess};
use super::text_rasterizing::{LaidOutText, TextRenderer};
use super::theme;
use crate::types::geometry::{Point, Region, WindowGeometry};
use crate::types::todo::TodoList;

/// Row block: padding, text line, gap, separator, padding
pub const ROW_HEIGHT: i32 = theme::TODO_ROW_PADDING
    + theme::TODO_LINE_HEIGHT
    + theme::TODO_SEPARATOR_GAP
    + 1
    + theme::TODO_ROW_PADDING;
pub const ROW_PITCH: i32 = ROW_HEIGHT + theme::TODO_ROW_SPACING;
const TEXT_LEFT: i32 = theme::TODO_MARGIN_LEFT + theme::CHECKBOX_SIZE + theme::CHECKBOX_SPACING;

/// Top of row `index`, in scrolled content coordinates
pub fn row_top(index: usize) -> i32 {
    theme::TODO_MARGIN_TOP + index as i32 * ROW_PITCH
}

/// Row under content-space `y`, None in margins and row spacing
pub fn row_at(y: i32, rows: usize) -> Option<usize> {
    let offset = y - theme::TODO_MARGIN_TOP;
    if offset < 0 {
        return None;
    }
    let index = (offset / ROW_PITCH) as usize;
    (index < rows && offset % ROW_PITCH < ROW_HEIGHT).then_some(index)
}

pub fn content_height(rows: usize) -> i32 {
    let rows = rows as i32;
    theme::TODO_MARGIN_TOP + rows * ROW_HEIGHT + (rows - 1).max(0) * theme::TODO_ROW_SPACING
        + theme::TODO_MARGIN_BOTTOM
}

pub struct TodoPanel {
    chrome: PanelChrome,
    pub list: TodoList,
    focus: Option<usize>,
    selecting: bool,
    scroll: f32,
    scrollbar_hovered: bool,
    size: (i32, i32),
    layouts: Vec<LaidOutText>,
}

impl TodoPanel {
    pub fn new(scheme: Scheme, width: u32, height: u32) -> Self {
        let list = TodoList::initial();
        let layouts = vec![LaidOutText::default(); list.len()];
        Self {
            // Todo buttons rest at the plain accent
            chrome: PanelChrome::new(scheme, 1., width, height),
            list,
            focus: None,
            selecting: false,
            scroll: 0.,
            scrollbar_hovered: false,
            size: (width as i32, height as i32),
            layouts,
        }
    }

    pub fn focused_row(&self) -> Option<usize> {
        self.focus
    }

    fn viewport(&self) -> Region {
        Region::new(
            0,
            theme::TITLE_BAR_HEIGHT,
            self.size.0,
            self.size.1 - theme::TITLE_BAR_HEIGHT,
        )
    }

    /// Window-space y of a content-space y
    fn to_window_y(&self, y: i32) -> f32 {
        (theme::TITLE_BAR_HEIGHT + y) as f32 - self.scroll
    }

    fn checkbox_region(&self, index: usize) -> Region {
        let top = row_top(index)
            + theme::TODO_ROW_PADDING
            + (theme::TODO_LINE_HEIGHT - theme::CHECKBOX_SIZE) / 2;
        Region::new(
            theme::TODO_MARGIN_LEFT,
            self.to_window_y(top) as i32,
            theme::CHECKBOX_SIZE,
            theme::CHECKBOX_SIZE,
        )
    }

    fn text_origin(&self, index: usize) -> (f32, f32) {
        let line_height = self.layouts[index].line_height;
        let top = (row_top(index) + theme::TODO_ROW_PADDING) as f32
            + (theme::TODO_LINE_HEIGHT as f32 - line_height) / 2.;
        (TEXT_LEFT as f32, self.to_window_y(0) + top)
    }

    fn set_focus(&mut self, focus: Option<usize>) {
        self.focus = focus;
        if let Some(index) = focus {
            let top = row_top(index) as f32;
            let viewport = self.viewport().h as f32;
            self.scroll = scroll_into_view(self.scroll, top, top + ROW_HEIGHT as f32, viewport);
            self.scroll = clamp_scroll(self.scroll, content_height(self.list.len()) as f32, viewport);
        }
    }

    fn step_focus(&mut self, forward: bool, wrap: bool) {
        let rows = self.list.len();
        let next = match (self.focus, forward) {
            (None, _) => 0,
            (Some(i), true) if i + 1 < rows => i + 1,
            (Some(_), true) if wrap => 0,
            (Some(i), true) => i,
            (Some(0), false) if wrap => rows - 1,
            (Some(0), false) => 0,
            (Some(i), false) => i - 1,
        };
        self.set_focus(Some(next));
    }

    fn place(&mut self, index: usize, local: Point, extend: bool) {
        let (ox, oy) = self.text_origin(index);
        let item = &mut self.list.items[index];
        place_blinkey(&mut item.text, &self.layouts[index], local.x as f32 - ox, local.y as f32 - oy, extend);
    }
}

impl Panel for TodoPanel {
    fn chrome(&self) -> &PanelChrome {
        &self.chrome
    }

    fn chrome_mut(&mut self) -> &mut PanelChrome {
        &mut self.chrome
    }

    fn title_editable(&self) -> bool {
        false
    }

    fn paint(&mut self, text: &mut TextRenderer, pixels: &mut [u32], width: usize, height: usize) {
        self.size = (width as i32, height as i32);
        self.chrome.paint_background(pixels);
        let accent = self.chrome.scheme.accent;

        let field = TitleBarLayout::new(width as i32).title;
        text.draw_text_left_u32(
            pixels,
            width,
            theme::TODO_TITLE,
            (field.x + theme::TITLE_FIELD_PADDING) as f32,
            field.y as f32 + field.h as f32 / 2.,
            theme::TITLE_FONT_SIZE,
            theme::FONT_WEIGHT_BOLD,
            theme::TEXT_COLOUR,
            field,
        );

        let viewport = self.viewport();
        let total = content_height(self.list.len()) as f32;
        self.scroll = clamp_scroll(self.scroll, total, viewport.h as f32);
        let text_right = width as i32 - theme::TODO_MARGIN_RIGHT;

        for index in 0..self.list.len() {
            let top = self.to_window_y(row_top(index)) as i32;
            if top > viewport.bottom() || top + ROW_HEIGHT < viewport.y {
                continue;
            }

            let checkbox = self.checkbox_region(index).intersect(&viewport);
            if checkbox.h == theme::CHECKBOX_SIZE {
                drawing::draw_checkbox(pixels, width, height, checkbox, self.list.items[index].checked, accent);
            }

            let item = &self.list.items[index];
            let focused = self.focus == Some(index);
            let clip = Region::new(TEXT_LEFT, top, text_right - TEXT_LEFT, ROW_HEIGHT).intersect(&viewport);
            let shaped = text.shape(&item.text.text(), theme::TODO_FONT_SIZE, theme::FONT_WEIGHT_REGULAR, None);
            self.layouts[index] = shaped.layout.clone();
            let origin = self.text_origin(index);

            if item.text.is_empty() {
                if let Some(hint) = &item.placeholder {
                    let hint = text.shape(hint, theme::TODO_FONT_SIZE, theme::FONT_WEIGHT_REGULAR, None);
                    text.draw(&hint, pixels, width, origin.0, origin.1, clip, theme::PLACEHOLDER_COLOUR);
                }
            }
            paint_text_field(
                text,
                pixels,
                width,
                &shaped,
                &item.text,
                origin,
                clip,
                theme::TEXT_COLOUR,
                focused,
                accent,
            );

            if item.is_struck_through() && !item.text.is_empty() {
                let strike_y = origin.1 + shaped.layout.line_height / 2.;
                let strike = Region::new(
                    TEXT_LEFT,
                    strike_y as i32,
                    (shaped.layout.width().ceil() as i32).min(text_right - TEXT_LEFT),
                    1,
                )
                .intersect(&viewport);
                drawing::fill_rect(pixels, width, height, strike, theme::TEXT_COLOUR);
            }

            let separator_y = top
                + theme::TODO_ROW_PADDING
                + theme::TODO_LINE_HEIGHT
                + theme::TODO_SEPARATOR_GAP;
            if separator_y >= viewport.y && separator_y < viewport.bottom() {
                drawing::draw_dashed_hline(
                    pixels,
                    width,
                    height,
                    separator_y,
                    theme::TODO_MARGIN_LEFT,
                    text_right,
                    theme::SEPARATOR_DASH,
                    theme::SEPARATOR_GAP,
                    theme::SEPARATOR_COLOUR,
                );
            }
        }

        drawing::draw_scrollbar(
            pixels,
            width,
            height,
            viewport,
            total,
            self.scroll,
            self.chrome.scrollbar_colour(self.scrollbar_hovered),
        );
        self.chrome.paint_buttons(pixels, width, height);
        self.chrome.finish(pixels, width, height);
    }

    fn on_press(&mut self, target: HitTarget, local: Point, extend: bool) -> bool {
        if target != HitTarget::Body {
            let changed = self.focus.is_some();
            self.focus = None;
            return changed;
        }
        let content_y = (local.y as f32 - theme::TITLE_BAR_HEIGHT as f32 + self.scroll) as i32;
        let Some(index) = row_at(content_y, self.list.len()) else {
            let changed = self.focus.is_some();
            self.focus = None;
            return changed;
        };

        if local.x < TEXT_LEFT {
            // Checkbox column
            self.list.items[index].toggle();
            return true;
        }
        self.focus = Some(index);
        self.selecting = true;
        self.place(index, local, extend);
        true
    }

    fn on_drag(&mut self, local: Point) -> bool {
        match self.focus {
            Some(index) if self.selecting => {
                self.place(index, local, true);
                true
            }
            _ => false,
        }
    }

    fn on_release(&mut self) -> bool {
        std::mem::take(&mut self.selecting)
    }

    fn on_hover(&mut self, local: Point) -> bool {
        let track_x = self.size.0 - 2 * theme::SCROLLBAR_MARGIN_RIGHT - theme::SCROLLBAR_WIDTH;
        let hovered = local.x >= track_x && self.viewport().contains(local);
        let changed = hovered != self.scrollbar_hovered;
        self.scrollbar_hovered = hovered;
        changed
    }

    fn on_scroll(&mut self, lines: f32) -> bool {
        let before = self.scroll;
        self.scroll = clamp_scroll(
            self.scroll - lines * theme::SCROLL_LINE_PIXELS,
            content_height(self.list.len()) as f32,
            self.viewport().h as f32,
        );
        self.scroll != before
    }

    fn on_key(&mut self, input: &KeyInput, clipboard: &mut dyn ClipboardAccess) -> bool {
        let Some(index) = self.focus else {
            return false;
        };

        match input {
            KeyInput::Edit { key: EditKey::Enter, .. } => {
                self.step_focus(true, false);
                true
            }
            KeyInput::Edit { key: EditKey::Tab, shift } => {
                self.step_focus(!*shift, true);
                true
            }
            KeyInput::Edit { key: EditKey::Up, .. } => {
                self.step_focus(false, false);
                true
            }
            KeyInput::Edit { key: EditKey::Down, .. } => {
                self.step_focus(true, false);
                true
            }
            KeyInput::Edit { key: EditKey::Escape, .. } => {
                self.focus = None;
                true
            }
            KeyInput::Edit { key, shift } => apply_key(&mut self.list.items[index].text, key, *shift).needs_redraw(),
            KeyInput::Shortcut(letter) => {
                apply_shortcut(&mut self.list.items[index].text, *letter, clipboard).needs_redraw()
            }
            KeyInput::Ignored => false,
        }
    }

    /// Nothing to save, todo windows always close
    fn request_close(&mut self, _geometry: WindowGeometry, _dialogs: &mut dyn Dialogs) -> CloseOutcome {
        CloseOutcome::Close
    }
}
