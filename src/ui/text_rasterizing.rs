use super::drawing::blend;
use super::theme;
use crate::types::geometry::Region;
use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, SwashCache, Weight};

/// One visual line of laid out text.
/// `carets[k]` is the x offset of the caret sitting before char `start + k`,
/// so there is one more entry than there are chars in the line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineLayout {
    pub top: f32,
    pub start: usize,
    pub end: usize,
    pub carets: Vec<f32>,
    /// Last visual line of its logical (newline separated) line
    pub ends_paragraph: bool,
}

impl LineLayout {
    pub fn caret_x(&self, index: usize) -> f32 {
        let k = index.saturating_sub(self.start).min(self.carets.len().saturating_sub(1));
        self.carets.get(k).copied().unwrap_or(0.)
    }

    fn width(&self) -> f32 {
        self.carets.iter().copied().fold(0., f32::max)
    }
}

/// Char-indexed geometry of shaped text, independent of the font system
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LaidOutText {
    pub lines: Vec<LineLayout>,
    pub line_height: f32,
}

impl LaidOutText {
    pub fn height(&self) -> f32 {
        self.lines.len() as f32 * self.line_height
    }

    pub fn width(&self) -> f32 {
        self.lines.iter().map(LineLayout::width).fold(0., f32::max)
    }

    fn line_for(&self, index: usize) -> Option<&LineLayout> {
        self.lines
            .iter()
            .find(|l| index >= l.start && (index < l.end || (index == l.end && l.ends_paragraph)))
            .or(self.lines.last())
    }

    /// Top-left of the blinkey before char `index`
    pub fn caret_position(&self, index: usize) -> (f32, f32) {
        match self.line_for(index) {
            Some(line) => (line.caret_x(index), line.top),
            None => (0., 0.),
        }
    }

    /// Char index of the caret slot nearest to (x, y), both relative to the text origin
    pub fn index_at(&self, x: f32, y: f32) -> usize {
        if self.lines.is_empty() {
            return 0;
        }
        let row = if y < 0. || self.line_height <= 0. {
            0
        } else {
            ((y / self.line_height) as usize).min(self.lines.len() - 1)
        };
        let line = &self.lines[row];

        // Caret slots a wrapped line shares with the next one belong to the next line
        let last_slot = if line.ends_paragraph || line.end == line.start {
            line.end
        } else {
            line.end - 1
        };
        let mut best = line.start;
        let mut best_dist = f32::MAX;
        for index in line.start..=last_slot {
            let dist = (line.caret_x(index) - x).abs();
            if dist < best_dist {
                best = index;
                best_dist = dist;
            }
        }
        best
    }
}

/// Text shaped once and reused for hit testing and drawing
pub struct ShapedText {
    buffer: Buffer,
    pub layout: LaidOutText,
}

pub struct TextRenderer {
    font_system: FontSystem,
    swash_cache: SwashCache,
}

impl TextRenderer {
    /// Fonts come from the system font database
    pub fn new() -> Self {
        Self {
            font_system: FontSystem::new(),
            swash_cache: SwashCache::new(),
        }
    }

    /// Shape `text`, wrapping at `wrap_width` when given
    pub fn shape(&mut self, text: &str, size: f32, weight: u16, wrap_width: Option<f32>) -> ShapedText {
        let attrs = Attrs::new()
            .family(Family::SansSerif)
            .weight(Weight(weight));

        let metrics = Metrics::relative(size, theme::LINE_HEIGHT_FACTOR);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);

        buffer.set_size(&mut self.font_system, wrap_width, None);
        buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced);
        buffer.shape_until_scroll(&mut self.font_system, false);

        let layout = collect_layout(&buffer, text, metrics.line_height);
        ShapedText { buffer, layout }
    }

    pub fn measure_text_width(&mut self, text: &str, size: f32, weight: u16) -> f32 {
        self.shape(text, size, weight, None).layout.width()
    }

    /// Blit shaped glyphs with the text origin at (x, y), clipped to `clip`
    pub fn draw(
        &mut self,
        shaped: &ShapedText,
        pixels: &mut [u32], // [ARGB]
        width: usize,
        x: f32,
        y: f32,
        clip: Region,
        colour: u32,
    ) {
        let height = pixels.len() / width.max(1);
        let clip = clip.intersect(&Region::new(0, 0, width as i32, height as i32));
        if clip.is_empty() {
            return;
        }

        for run in shaped.buffer.layout_runs() {
            let baseline = run.line_y;
            for glyph in run.glyphs {
                let physical = glyph.physical((x, y), 1.);
                let Some(image) = self
                    .swash_cache
                    .get_image(&mut self.font_system, physical.cache_key)
                else {
                    continue;
                };

                let glyph_x = physical.x + image.placement.left;
                let glyph_y = physical.y + baseline as i32 - image.placement.top;
                let glyph_width = image.placement.width as usize;
                let glyph_height = image.placement.height as usize;

                for cy in 0..glyph_height {
                    let py = glyph_y + cy as i32;
                    if py < clip.y || py >= clip.bottom() {
                        continue;
                    }
                    for cx in 0..glyph_width {
                        let px = glyph_x + cx as i32;
                        if px < clip.x || px >= clip.right() {
                            continue;
                        }
                        let Some(&alpha) = image.data.get(cy * glyph_width + cx) else {
                            continue;
                        };
                        if alpha > 0 {
                            let idx = py as usize * width + px as usize;
                            pixels[idx] = blend(pixels[idx], colour, alpha);
                        }
                    }
                }
            }
        }
    }

    /// Single line of text with its left edge at `x`, vertically centred on `y`
    pub fn draw_text_left_u32(
        &mut self,
        pixels: &mut [u32],
        width: usize,
        text: &str,
        x: f32,
        y: f32,
        size: f32,
        weight: u16,
        colour: u32,
        clip: Region,
    ) -> f32 {
        let shaped = self.shape(text, size, weight, None);
        let text_width = shaped.layout.width();
        let top = y - shaped.layout.line_height / 2.;
        self.draw(&shaped, pixels, width, x, top, clip, colour);
        text_width
    }

    /// Single line of text centred on (x, y)
    pub fn draw_text_center_u32(
        &mut self,
        pixels: &mut [u32],
        width: usize,
        text: &str,
        x: f32,
        y: f32,
        size: f32,
        weight: u16,
        colour: u32,
    ) -> f32 {
        let shaped = self.shape(text, size, weight, None);
        let text_width = shaped.layout.width();
        let height = pixels.len() / width.max(1);
        let clip = Region::new(0, 0, width as i32, height as i32);
        let (left, top) = (x - text_width / 2., y - shaped.layout.line_height / 2.);
        self.draw(&shaped, pixels, width, left, top, clip, colour);
        text_width
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Char offset of every `\n` separated line
fn paragraph_starts(text: &str) -> Vec<usize> {
    let mut starts = vec![0];
    for (i, ch) in text.chars().enumerate() {
        if ch == '\n' {
            starts.push(i + 1);
        }
    }
    starts
}

/// Byte offset inside `line` to char offset inside `line`
fn char_offset(line: &str, byte: usize) -> usize {
    line.char_indices().take_while(|(b, _)| *b < byte).count()
}

fn collect_layout(buffer: &Buffer, text: &str, line_height: f32) -> LaidOutText {
    let paragraphs: Vec<&str> = text.split('\n').collect();
    let starts = paragraph_starts(text);
    let mut lines: Vec<LineLayout> = Vec::new();
    let mut next_top = 0.;
    let mut runs = buffer.layout_runs().peekable();

    for (para, para_text) in paragraphs.iter().enumerate() {
        let base = starts[para];
        let para_len = para_text.chars().count();
        let mut emitted = false;

        while let Some(run) = runs.next_if(|r| r.line_i == para) {
            let mut start = para_len;
            let mut end = 0;
            for glyph in run.glyphs {
                start = start.min(char_offset(para_text, glyph.start));
                end = end.max(char_offset(para_text, glyph.end));
            }
            if run.glyphs.is_empty() {
                start = lines.last().filter(|_| emitted).map_or(0, |l| l.end - base);
                end = start;
            }

            let mut slots: Vec<Option<f32>> = vec![None; end - start + 1];
            let mut right = 0.0f32;
            for glyph in run.glyphs {
                let s = char_offset(para_text, glyph.start);
                let e = char_offset(para_text, glyph.end).max(s + 1);
                let span = (e - s) as f32;
                for (k, c) in (s..e).enumerate() {
                    if let Some(slot) = slots.get_mut(c - start) {
                        slot.get_or_insert(glyph.x + glyph.w * k as f32 / span);
                    }
                }
                right = right.max(glyph.x + glyph.w);
            }
            if let Some(last) = slots.last_mut() {
                *last = Some(right);
            }
            let mut carry = 0.;
            let carets = slots
                .into_iter()
                .map(|slot| {
                    carry = slot.unwrap_or(carry);
                    carry
                })
                .collect();

            lines.push(LineLayout {
                top: run.line_top,
                start: base + start,
                end: base + end,
                carets,
                ends_paragraph: false,
            });
            next_top = run.line_top + line_height;
            emitted = true;
        }

        if !emitted {
            lines.push(LineLayout {
                top: next_top,
                start: base,
                end: base,
                carets: vec![0.],
                ends_paragraph: false,
            });
            next_top += line_height;
        }
        if let Some(last) = lines.last_mut() {
            last.end = base + para_len;
            last.ends_paragraph = true;
            let missing = (last.end - last.start + 1).saturating_sub(last.carets.len());
            let fill = last.carets.last().copied().unwrap_or(0.);
            last.carets.extend(std::iter::repeat(fill).take(missing));
        }
    }

    LaidOutText { lines, line_height }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Monospace stand-in: every char 10px wide, 20px lines
    fn line(top: f32, start: usize, end: usize, ends_paragraph: bool) -> LineLayout {
        LineLayout {
            top,
            start,
            end,
            carets: (0..=(end - start)).map(|k| k as f32 * 10.).collect(),
            ends_paragraph,
        }
    }

    fn two_paragraphs() -> LaidOutText {
        // "hello\nab"
        LaidOutText {
            lines: vec![line(0., 0, 5, true), line(20., 6, 8, true)],
            line_height: 20.,
        }
    }

    #[test]
    fn test_caret_positions() {
        let layout = two_paragraphs();
        assert_eq!(layout.caret_position(0), (0., 0.));
        assert_eq!(layout.caret_position(3), (30., 0.));
        assert_eq!(layout.caret_position(5), (50., 0.));
        assert_eq!(layout.caret_position(6), (0., 20.));
        assert_eq!(layout.caret_position(8), (20., 20.));
    }

    #[test]
    fn test_index_at_picks_nearest_slot() {
        let layout = two_paragraphs();
        assert_eq!(layout.index_at(0., 5.), 0);
        assert_eq!(layout.index_at(14., 5.), 1);
        assert_eq!(layout.index_at(16., 5.), 2);
        assert_eq!(layout.index_at(500., 5.), 5);
        assert_eq!(layout.index_at(12., 25.), 7);
        // Below the last line clamps to it
        assert_eq!(layout.index_at(500., 500.), 8);
        assert_eq!(layout.index_at(-5., -5.), 0);
    }

    #[test]
    fn test_wrapped_boundary_belongs_to_next_line() {
        // "abcd efg" wrapped after "abcd "
        let layout = LaidOutText {
            lines: vec![line(0., 0, 5, false), line(20., 5, 8, true)],
            line_height: 20.,
        };
        assert_eq!(layout.caret_position(5), (0., 20.));
        assert_eq!(layout.index_at(100., 5.), 4);
        assert_eq!(layout.height(), 40.);
        assert_eq!(layout.width(), 50.);
    }

    #[test]
    fn test_paragraph_starts() {
        assert_eq!(paragraph_starts("ab\n\ncd"), vec![0, 3, 4]);
        assert_eq!(paragraph_starts(""), vec![0]);
    }

    #[test]
    fn test_char_offset_multibyte() {
        let s = "añb";
        assert_eq!(char_offset(s, 0), 0);
        assert_eq!(char_offset(s, 1), 1);
        assert_eq!(char_offset(s, 3), 2);
        assert_eq!(char_offset(s, 4), 3);
    }
}
