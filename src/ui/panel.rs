//! Chrome shared by note and todo panels: background, title bar controls,
//! the rounded corner mask and the drag/resize frame.

use super::dialogs::Dialogs;
use super::drawing::{self, adjust, ButtonGlyph, RoundedMask, Scheme};
use super::frame::WindowFrame;
use super::keyboard::KeyInput;
use super::text_editing::ClipboardAccess;
use super::text_rasterizing::{ShapedText, TextRenderer};
use super::theme;
use crate::types::geometry::{Point, Region, WindowGeometry};
use crate::types::text::TextField;

/// Title bar control rectangles for a given window width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleBarLayout {
    pub title: Region,
    pub minimize: Region,
    pub close: Region,
}

impl TitleBarLayout {
    pub fn new(width: i32) -> Self {
        let field_height = theme::TITLE_BAR_HEIGHT - 2 * theme::TITLE_MARGIN_TOP;
        let close_x = width - theme::TITLE_MARGIN_RIGHT - theme::TITLE_BUTTON_SIZE;
        let minimize_x = close_x - theme::TITLE_BUTTON_SPACING - theme::TITLE_BUTTON_SIZE;
        Self {
            title: Region::new(
                theme::TITLE_MARGIN_LEFT,
                theme::TITLE_MARGIN_TOP,
                theme::TITLE_FIELD_WIDTH,
                field_height,
            ),
            minimize: Region::new(
                minimize_x,
                theme::TITLE_MARGIN_TOP,
                theme::TITLE_BUTTON_SIZE,
                theme::TITLE_BUTTON_SIZE,
            ),
            close: Region::new(
                close_x,
                theme::TITLE_MARGIN_TOP,
                theme::TITLE_BUTTON_SIZE,
                theme::TITLE_BUTTON_SIZE,
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    None,
    Title,
    Minimize,
    Close,
    /// Title bar background (drag area)
    TitleBar,
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeAction {
    None,
    Minimize,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    Close,
    Cancel,
}

pub struct PanelChrome {
    pub scheme: Scheme,
    /// Factor for buttons at rest; 1.0 keeps the plain accent
    pub normal_factor: f32,
    pub frame: WindowFrame,
    pub hovered: HitTarget,
    pressed: HitTarget,
    mask: RoundedMask,
}

impl PanelChrome {
    pub fn new(scheme: Scheme, normal_factor: f32, width: u32, height: u32) -> Self {
        Self {
            scheme,
            normal_factor,
            frame: WindowFrame::new(theme::TITLE_BAR_HEIGHT),
            hovered: HitTarget::None,
            pressed: HitTarget::None,
            mask: RoundedMask::new(width as usize, height as usize, theme::PANEL_RADIUS),
        }
    }

    pub fn hit_test(&self, p: Point, width: i32, height: i32) -> HitTarget {
        if p.x < 0 || p.y < 0 || p.x >= width || p.y >= height {
            return HitTarget::None;
        }
        let layout = TitleBarLayout::new(width);
        if layout.close.contains(p) {
            HitTarget::Close
        } else if layout.minimize.contains(p) {
            HitTarget::Minimize
        } else if layout.title.contains(p) {
            HitTarget::Title
        } else if p.y < theme::TITLE_BAR_HEIGHT {
            HitTarget::TitleBar
        } else {
            HitTarget::Body
        }
    }

    /// Returns true when the hover changed and a redraw is due
    pub fn set_hover(&mut self, target: HitTarget) -> bool {
        let changed = self.hovered != target;
        self.hovered = target;
        changed
    }

    pub fn button_colour(&self, target: HitTarget) -> u32 {
        if self.hovered == target {
            adjust(self.scheme.accent, theme::HOVER_FACTOR)
        } else if self.normal_factor == 1. {
            self.scheme.accent
        } else {
            adjust(self.scheme.accent, self.normal_factor)
        }
    }

    pub fn scrollbar_colour(&self, hovered: bool) -> u32 {
        let factor = if hovered {
            theme::HOVER_FACTOR
        } else {
            theme::NORMAL_FACTOR
        };
        adjust(self.scheme.accent, factor)
    }

    pub fn press_button(&mut self, target: HitTarget) {
        self.pressed = target;
    }

    /// A button fires only when released over the button it was pressed on
    pub fn release_button(&mut self, target: HitTarget) -> ChromeAction {
        let pressed = std::mem::replace(&mut self.pressed, HitTarget::None);
        match (pressed, target) {
            (HitTarget::Minimize, HitTarget::Minimize) => ChromeAction::Minimize,
            (HitTarget::Close, HitTarget::Close) => ChromeAction::Close,
            _ => ChromeAction::None,
        }
    }

    pub fn button_pressed(&self) -> bool {
        matches!(self.pressed, HitTarget::Minimize | HitTarget::Close)
    }

    pub fn paint_background(&self, pixels: &mut [u32]) {
        drawing::clear(pixels, self.scheme.background);
    }

    pub fn paint_buttons(&self, pixels: &mut [u32], width: usize, height: usize) {
        let layout = TitleBarLayout::new(width as i32);
        drawing::draw_round_button(
            pixels,
            width,
            height,
            layout.minimize,
            self.button_colour(HitTarget::Minimize),
            ButtonGlyph::Minimize,
        );
        drawing::draw_round_button(
            pixels,
            width,
            height,
            layout.close,
            self.button_colour(HitTarget::Close),
            ButtonGlyph::Close,
        );
    }

    /// Cut the rounded corners out of the finished frame
    pub fn finish(&mut self, pixels: &mut [u32], width: usize, height: usize) {
        self.mask.update(width, height);
        self.mask.apply(pixels);
    }
}

/// What a panel window hosts beneath the chrome
pub trait Panel {
    fn chrome(&self) -> &PanelChrome;
    fn chrome_mut(&mut self) -> &mut PanelChrome;

    /// Whether the title field takes clicks (otherwise it is part of the drag area)
    fn title_editable(&self) -> bool;

    fn paint(&mut self, text: &mut TextRenderer, pixels: &mut [u32], width: usize, height: usize);

    /// Primary press on the title field or body. Returns true if a redraw is due.
    fn on_press(&mut self, target: HitTarget, local: Point, extend: bool) -> bool;
    /// Pointer moved with the button held after a body/title press
    fn on_drag(&mut self, local: Point) -> bool;
    fn on_release(&mut self) -> bool;
    /// Hover over the body, used for scrollbar highlight
    fn on_hover(&mut self, local: Point) -> bool;
    /// Positive `lines` scrolls towards the top
    fn on_scroll(&mut self, lines: f32) -> bool;
    fn on_key(&mut self, input: &KeyInput, clipboard: &mut dyn ClipboardAccess) -> bool;
    fn request_close(&mut self, geometry: WindowGeometry, dialogs: &mut dyn Dialogs) -> CloseOutcome;
}

/// Selection highlight, glyphs and (when focused) the blinkey of one field.
/// `origin` is where the laid out text's (0, 0) lands in the frame.
pub fn paint_text_field(
    text: &mut TextRenderer,
    pixels: &mut [u32],
    width: usize,
    shaped: &ShapedText,
    field: &TextField,
    origin: (f32, f32),
    clip: Region,
    colour: u32,
    focused: bool,
    accent: u32,
) {
    let height = pixels.len() / width.max(1);
    let layout = &shaped.layout;
    let line_height = layout.line_height;

    if focused {
        if let Some(range) = field.selection_range() {
            for line in &layout.lines {
                let start = range.start.max(line.start);
                let end = range.end.min(line.end);
                // Selection running on past this line's end (wrap or newline)
                let spans_break = range.start <= line.end && range.end > line.end;
                if start > end || (start == end && !spans_break) {
                    continue;
                }
                let x0 = line.caret_x(start);
                let x1 = line.caret_x(end);
                let x1 = if spans_break {
                    x1 + line_height / 3.
                } else {
                    x1
                };
                let region = Region::new(
                    (origin.0 + x0) as i32,
                    (origin.1 + line.top) as i32,
                    (x1 - x0).ceil().max(1.) as i32,
                    line_height.ceil() as i32,
                )
                .intersect(&clip);
                drawing::blend_rect(pixels, width, height, region, accent, theme::SELECTION_ALPHA);
            }
        }
    }

    text.draw(shaped, pixels, width, origin.0, origin.1, clip, colour);

    if focused {
        let (x, top) = layout.caret_position(field.blinkey_index);
        let blinkey = Region::new(
            (origin.0 + x) as i32,
            (origin.1 + top) as i32,
            theme::BLINKEY_WIDTH,
            line_height.ceil() as i32,
        )
        .intersect(&clip);
        drawing::fill_rect(pixels, width, height, blinkey, theme::TEXT_COLOUR);
    }
}

/// Scroll offset clamped to the overflow of `content` beyond `viewport`
pub fn clamp_scroll(scroll: f32, content: f32, viewport: f32) -> f32 {
    scroll.clamp(0., (content - viewport).max(0.))
}

/// Adjust `scroll` so the span [top, bottom) stays inside the viewport
pub fn scroll_into_view(scroll: f32, top: f32, bottom: f32, viewport: f32) -> f32 {
    if top < scroll {
        top
    } else if bottom > scroll + viewport {
        bottom - viewport
    } else {
        scroll
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::drawing::pick_scheme;

    fn chrome() -> PanelChrome {
        PanelChrome::new(pick_scheme(&theme::NOTE_SCHEMES, 0), theme::NORMAL_FACTOR, 300, 200)
    }

    #[test]
    fn test_title_bar_layout() {
        let layout = TitleBarLayout::new(300);
        assert_eq!(layout.close, Region::new(268, 4, 24, 24));
        assert_eq!(layout.minimize, Region::new(238, 4, 24, 24));
        assert_eq!(layout.title, Region::new(8, 4, 120, 22));
    }

    #[test]
    fn test_hit_test() {
        let c = chrome();
        assert_eq!(c.hit_test(Point::new(280, 16), 300, 200), HitTarget::Close);
        assert_eq!(c.hit_test(Point::new(250, 16), 300, 200), HitTarget::Minimize);
        assert_eq!(c.hit_test(Point::new(50, 16), 300, 200), HitTarget::Title);
        assert_eq!(c.hit_test(Point::new(180, 16), 300, 200), HitTarget::TitleBar);
        assert_eq!(c.hit_test(Point::new(150, 100), 300, 200), HitTarget::Body);
        assert_eq!(c.hit_test(Point::new(-1, 100), 300, 200), HitTarget::None);
    }

    #[test]
    fn test_button_colours_follow_hover() {
        let mut c = chrome();
        let accent = c.scheme.accent;
        assert_eq!(c.button_colour(HitTarget::Close), adjust(accent, 0.9));
        assert!(c.set_hover(HitTarget::Close));
        assert!(!c.set_hover(HitTarget::Close));
        assert_eq!(c.button_colour(HitTarget::Close), adjust(accent, 1.2));
        assert_eq!(c.button_colour(HitTarget::Minimize), adjust(accent, 0.9));

        let plain = PanelChrome::new(c.scheme, 1., 300, 400);
        assert_eq!(plain.button_colour(HitTarget::Close), accent);
    }

    #[test]
    fn test_button_fires_on_matching_release() {
        let mut c = chrome();
        c.press_button(HitTarget::Close);
        assert!(c.button_pressed());
        assert_eq!(c.release_button(HitTarget::Close), ChromeAction::Close);
        assert!(!c.button_pressed());

        c.press_button(HitTarget::Close);
        assert_eq!(c.release_button(HitTarget::Body), ChromeAction::None);

        c.press_button(HitTarget::Minimize);
        assert_eq!(c.release_button(HitTarget::Minimize), ChromeAction::Minimize);
    }

    #[test]
    fn test_scroll_helpers() {
        assert_eq!(clamp_scroll(-10., 500., 100.), 0.);
        assert_eq!(clamp_scroll(900., 500., 100.), 400.);
        assert_eq!(clamp_scroll(50., 80., 100.), 0.);
        assert_eq!(scroll_into_view(0., 120., 140., 100.), 40.);
        assert_eq!(scroll_into_view(60., 20., 40., 100.), 20.);
        assert_eq!(scroll_into_view(10., 20., 40., 100.), 10.);
    }
}
