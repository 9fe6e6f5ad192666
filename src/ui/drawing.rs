//! Shared drawing primitives
//!
//! Everything here works on a plain `&mut [u32]` pixel buffer in premultiplied
//! ARGB (0xAARRGGBB), row-major, `width` pixels per row. Shapes are
//! anti-aliased by per-pixel coverage of a signed distance, blended over what
//! is already in the buffer, so a transparent (0) background yields soft
//! translucent edges.

use super::theme;
use crate::types::geometry::Region;
use rand::Rng;
use rayon::prelude::*;

/// (background, accent) colour pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheme {
    pub background: u32,
    pub accent: u32,
}

/// Scheme at `index`, wrapping around the palette
pub fn pick_scheme(palette: &[(u32, u32)], index: usize) -> Scheme {
    let (background, accent) = palette[index % palette.len()];
    Scheme { background, accent }
}

pub fn random_scheme<R: Rng + ?Sized>(palette: &[(u32, u32)], rng: &mut R) -> Scheme {
    pick_scheme(palette, rng.gen_range(0..palette.len()))
}

#[inline]
pub fn pack_argb(r: u8, g: u8, b: u8, a: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

#[inline]
pub fn unpack_argb(pixel: u32) -> (u8, u8, u8, u8) {
    let a = (pixel >> 24) as u8;
    let r = (pixel >> 16) as u8;
    let g = (pixel >> 8) as u8;
    let b = pixel as u8;
    (r, g, b, a)
}

/// Multiply each RGB channel by `factor`, truncating and clamping to 255.
/// Alpha is kept.
pub fn adjust(colour: u32, factor: f32) -> u32 {
    let (r, g, b, a) = unpack_argb(colour);
    let scale = |c: u8| ((c as f32 * factor) as u32).min(255) as u8;
    pack_argb(scale(r), scale(g), scale(b), a)
}

/// Source-over blend of `fg` onto `bg` with weight `alpha`, all four channels.
#[inline]
pub fn blend(bg: u32, fg: u32, alpha: u8) -> u32 {
    match alpha {
        0 => return bg,
        255 => return fg,
        _ => {}
    }
    let mut b = bg as u64;
    b = (b | (b << 16)) & 0x0000FFFF0000FFFF;
    b = (b | (b << 8)) & 0x00FF00FF00FF00FF;

    let mut f = fg as u64;
    f = (f | (f << 16)) & 0x0000FFFF0000FFFF;
    f = (f | (f << 8)) & 0x00FF00FF00FF00FF;

    let alpha = alpha as u64;
    let mut blended = b * (255 - alpha) + f * alpha;
    blended = (blended >> 8) & 0x00FF00FF00FF00FF;
    blended = (blended | (blended >> 8)) & 0x0000FFFF0000FFFF;
    blended = blended | (blended >> 16);
    blended as u32
}

/// Scale a packed colour by alpha (premultiply, all four channels)
#[inline]
pub fn scale_alpha(colour: u32, alpha: u8) -> u32 {
    blend(0, colour, alpha)
}

/// Signed distance from pixel centre to a rounded rectangle (negative inside)
#[inline]
pub fn rounded_rect_distance(px: f32, py: f32, x: f32, y: f32, w: f32, h: f32, radius: f32) -> f32 {
    let radius = radius.min(w / 2.).min(h / 2.).max(0.);
    let half_w = w / 2.;
    let half_h = h / 2.;
    let qx = (px - (x + half_w)).abs() - (half_w - radius);
    let qy = (py - (y + half_h)).abs() - (half_h - radius);
    let outside = (qx.max(0.) * qx.max(0.) + qy.max(0.) * qy.max(0.)).sqrt();
    outside + qx.max(qy).min(0.) - radius
}

/// Coverage 0..=255 of pixel (px, py) by a rounded rectangle
#[inline]
pub fn rounded_rect_coverage(px: i32, py: i32, x: f32, y: f32, w: f32, h: f32, radius: f32) -> u8 {
    let d = rounded_rect_distance(px as f32 + 0.5, py as f32 + 0.5, x, y, w, h, radius);
    ((0.5 - d).clamp(0., 1.) * 255.) as u8
}

/// Distance from a point to a line segment with round caps (negative inside)
#[inline]
pub fn distance_to_capsule(px: f32, py: f32, x1: f32, y1: f32, x2: f32, y2: f32, radius: f32) -> f32 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    let len_sq = dx * dx + dy * dy;

    let t = if len_sq > 0. {
        (((px - x1) * dx + (py - y1) * dy) / len_sq).clamp(0., 1.)
    } else {
        0.
    };

    let dist_x = px - (x1 + t * dx);
    let dist_y = py - (y1 + t * dy);
    (dist_x * dist_x + dist_y * dist_y).sqrt() - radius
}

/// Clear the whole buffer to one colour
pub fn clear(pixels: &mut [u32], colour: u32) {
    pixels.par_iter_mut().for_each(|p| *p = colour);
}

/// Row span of `region` clipped to the buffer, None when nothing is visible
fn clip_rows(region: &Region, width: usize, height: usize) -> Option<Region> {
    let clipped = region.intersect(&Region::new(0, 0, width as i32, height as i32));
    (!clipped.is_empty()).then_some(clipped)
}

/// Opaque rectangle fill
pub fn fill_rect(pixels: &mut [u32], width: usize, height: usize, region: Region, colour: u32) {
    let Some(r) = clip_rows(&region, width, height) else {
        return;
    };
    let (x0, x1) = (r.x as usize, r.right() as usize);
    pixels[r.y as usize * width..r.bottom() as usize * width]
        .par_chunks_mut(width)
        .for_each(|row| row[x0..x1].fill(colour));
}

/// Translucent rectangle (selection highlight)
pub fn blend_rect(pixels: &mut [u32], width: usize, height: usize, region: Region, colour: u32, alpha: u8) {
    let Some(r) = clip_rows(&region, width, height) else {
        return;
    };
    let (x0, x1) = (r.x as usize, r.right() as usize);
    pixels[r.y as usize * width..r.bottom() as usize * width]
        .par_chunks_mut(width)
        .for_each(|row| {
            for pixel in &mut row[x0..x1] {
                *pixel = blend(*pixel, colour, alpha);
            }
        });
}

/// Anti-aliased rounded rectangle, optionally restricted to `clip`
pub fn fill_rounded_rect(
    pixels: &mut [u32],
    width: usize,
    height: usize,
    shape: Region,
    radius: f32,
    colour: u32,
    clip: Option<Region>,
) {
    let area = match clip {
        Some(c) => shape.intersect(&c),
        None => shape,
    };
    let Some(r) = clip_rows(&area, width, height) else {
        return;
    };
    let (sx, sy, sw, sh) = (shape.x as f32, shape.y as f32, shape.w as f32, shape.h as f32);
    let (x0, x1) = (r.x, r.right());
    let y0 = r.y;

    pixels[r.y as usize * width..r.bottom() as usize * width]
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(row_idx, row)| {
            let py = y0 + row_idx as i32;
            for px in x0..x1 {
                let coverage = rounded_rect_coverage(px, py, sx, sy, sw, sh, radius);
                let pixel = &mut row[px as usize];
                *pixel = blend(*pixel, colour, coverage);
            }
        });
}

/// Anti-aliased stroke from (x1, y1) to (x2, y2) with round caps
pub fn draw_segment(
    pixels: &mut [u32],
    width: usize,
    height: usize,
    (x1, y1): (f32, f32),
    (x2, y2): (f32, f32),
    thickness: f32,
    colour: u32,
) {
    let radius = thickness / 2.;
    let bounds = Region::new(
        (x1.min(x2) - radius - 1.).floor() as i32,
        (y1.min(y2) - radius - 1.).floor() as i32,
        ((x1 - x2).abs() + thickness + 3.).ceil() as i32,
        ((y1 - y2).abs() + thickness + 3.).ceil() as i32,
    );
    let Some(r) = clip_rows(&bounds, width, height) else {
        return;
    };
    for py in r.y..r.bottom() {
        for px in r.x..r.right() {
            let d = distance_to_capsule(px as f32 + 0.5, py as f32 + 0.5, x1, y1, x2, y2, radius);
            let coverage = ((0.5 - d).clamp(0., 1.) * 255.) as u8;
            let idx = py as usize * width + px as usize;
            pixels[idx] = blend(pixels[idx], colour, coverage);
        }
    }
}

/// 1px horizontal rule drawn as `dash` on / `gap` off
pub fn draw_dashed_hline(
    pixels: &mut [u32],
    width: usize,
    height: usize,
    y: i32,
    x_start: i32,
    x_end: i32,
    dash: i32,
    gap: i32,
    colour: u32,
) {
    if y < 0 || y as usize >= height {
        return;
    }
    let row = y as usize * width;
    let period = (dash + gap).max(1);
    for x in x_start.max(0)..x_end.min(width as i32) {
        if (x - x_start) % period < dash {
            pixels[row + x as usize] = colour;
        }
    }
}

/// Per-pixel coverage of a rounded rectangle the size of the window.
/// Multiplied into the frame after painting so the corners are transparent.
#[derive(Debug, Clone)]
pub struct RoundedMask {
    pub width: usize,
    pub height: usize,
    pub radius: f32,
    coverage: Vec<u8>,
}

impl RoundedMask {
    pub fn new(width: usize, height: usize, radius: f32) -> Self {
        let mut coverage = vec![0u8; width * height];
        if width > 0 {
            coverage
                .par_chunks_mut(width)
                .enumerate()
                .for_each(|(y, row)| {
                    for (x, c) in row.iter_mut().enumerate() {
                        *c = rounded_rect_coverage(
                            x as i32,
                            y as i32,
                            0.,
                            0.,
                            width as f32,
                            height as f32,
                            radius,
                        );
                    }
                });
        }
        Self {
            width,
            height,
            radius,
            coverage,
        }
    }

    /// Rebuild only when the window size changed
    pub fn update(&mut self, width: usize, height: usize) {
        if width != self.width || height != self.height {
            *self = Self::new(width, height, self.radius);
        }
    }

    pub fn coverage_at(&self, x: usize, y: usize) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.coverage[y * self.width + x]
    }

    pub fn apply(&self, pixels: &mut [u32]) {
        pixels
            .par_iter_mut()
            .zip(self.coverage.par_iter())
            .for_each(|(pixel, &c)| {
                if c != 255 {
                    *pixel = scale_alpha(*pixel, c);
                }
            });
    }
}

/// The launcher: neutral rounded capsule with the left half in `fill`.
/// The seam down the middle is straight, only the outer corners are round.
pub fn draw_capsule(pixels: &mut [u32], width: usize, height: usize, fill: u32) {
    clear(pixels, 0);
    let shape = Region::new(0, 0, width as i32, height as i32);
    fill_rounded_rect(
        pixels,
        width,
        height,
        shape,
        theme::CAPSULE_RADIUS,
        theme::CAPSULE_BASE,
        None,
    );
    let left_half = Region::new(0, 0, width as i32 / 2, height as i32);
    fill_rounded_rect(
        pixels,
        width,
        height,
        shape,
        theme::CAPSULE_RADIUS,
        fill,
        Some(left_half),
    );
}

/// Round title-bar button with a procedural glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonGlyph {
    Minimize,
    Close,
}

pub fn draw_round_button(
    pixels: &mut [u32],
    width: usize,
    height: usize,
    region: Region,
    fill: u32,
    glyph: ButtonGlyph,
) {
    let radius = region.w.min(region.h) as f32 / 2.;
    fill_rounded_rect(pixels, width, height, region, radius, fill, None);

    let (cx, cy) = (
        region.x as f32 + region.w as f32 / 2.,
        region.y as f32 + region.h as f32 / 2.,
    );
    let arm = region.w as f32 * 0.2;
    let stroke = 2.;
    match glyph {
        ButtonGlyph::Minimize => draw_segment(
            pixels,
            width,
            height,
            (cx - arm, cy),
            (cx + arm, cy),
            stroke,
            theme::GLYPH_COLOUR,
        ),
        ButtonGlyph::Close => {
            draw_segment(
                pixels,
                width,
                height,
                (cx - arm, cy - arm),
                (cx + arm, cy + arm),
                stroke,
                theme::GLYPH_COLOUR,
            );
            draw_segment(
                pixels,
                width,
                height,
                (cx - arm, cy + arm),
                (cx + arm, cy - arm),
                stroke,
                theme::GLYPH_COLOUR,
            );
        }
    }
}

pub fn draw_checkbox(
    pixels: &mut [u32],
    width: usize,
    height: usize,
    region: Region,
    checked: bool,
    accent: u32,
) {
    if checked {
        fill_rounded_rect(pixels, width, height, region, 3., accent, None);
        let (x, y, s) = (region.x as f32, region.y as f32, region.w as f32);
        draw_segment(
            pixels,
            width,
            height,
            (x + s * 0.25, y + s * 0.52),
            (x + s * 0.43, y + s * 0.7),
            2.,
            theme::GLYPH_COLOUR,
        );
        draw_segment(
            pixels,
            width,
            height,
            (x + s * 0.43, y + s * 0.7),
            (x + s * 0.75, y + s * 0.32),
            2.,
            theme::GLYPH_COLOUR,
        );
    } else {
        fill_rounded_rect(pixels, width, height, region, 3., theme::CHECKBOX_BORDER, None);
        let inner = Region::new(region.x + 1, region.y + 1, region.w - 2, region.h - 2);
        fill_rounded_rect(pixels, width, height, inner, 2., theme::CHECKBOX_FILL, None);
    }
}

/// Handle offset and length for a vertical scrollbar, None when everything fits
pub fn scrollbar_handle(track_len: i32, content_len: f32, viewport_len: f32, scroll: f32) -> Option<(i32, i32)> {
    if content_len <= viewport_len || track_len <= 0 {
        return None;
    }
    let handle = ((viewport_len / content_len) * track_len as f32) as i32;
    let handle = handle.max(theme::SCROLLBAR_MIN_HANDLE).min(track_len);
    let max_scroll = content_len - viewport_len;
    let offset = ((scroll / max_scroll).clamp(0., 1.) * (track_len - handle) as f32) as i32;
    Some((offset, handle))
}

/// Thin rounded scrollbar handle along the right side of `viewport`
pub fn draw_scrollbar(
    pixels: &mut [u32],
    width: usize,
    height: usize,
    viewport: Region,
    content_len: f32,
    scroll: f32,
    colour: u32,
) {
    let track_top = viewport.y + theme::SCROLLBAR_MARGIN_TOP;
    let track_len = viewport.h - theme::SCROLLBAR_MARGIN_TOP - theme::SCROLLBAR_MARGIN_BOTTOM;
    if let Some((offset, len)) = scrollbar_handle(track_len, content_len, viewport.h as f32, scroll) {
        let x = viewport.right() - theme::SCROLLBAR_MARGIN_RIGHT - theme::SCROLLBAR_WIDTH;
        let handle = Region::new(x, track_top + offset, theme::SCROLLBAR_WIDTH, len);
        fill_rounded_rect(pixels, width, height, handle, theme::SCROLLBAR_RADIUS, colour, None);
    }
}
