//! Text measurement and rasterization.
//! Outline faces go through fontdue; the fallback face is font8x8.
//!
//! Coordinates follow the "top-left of the line box" convention: drawing at
//! `(x, y)` puts the font's ascender line at `y`, and [`measure`] reports the
//! ink box relative to that same origin.

use font8x8::{UnicodeFonts, BASIC_FONTS, BOX_FONTS, LATIN_FONTS, MISC_FONTS};
use fontdue::Font;
use reel_core::{Color, FrameBuffer, Point, Rect};

use crate::fonts::FontFace;
use crate::layout::centered;

/// Cell size of the bitmap fallback face.
pub const BITMAP_CELL: u32 = 8;

/// Ink bounding box of a line of text, relative to the draw origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextBox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl TextBox {
    pub fn width(&self) -> u32 {
        (self.right - self.left).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.bottom - self.top).max(0) as u32
    }

    fn include(&mut self, other: TextBox, first: bool) {
        if first {
            *self = other;
            return;
        }
        self.left = self.left.min(other.left);
        self.top = self.top.min(other.top);
        self.right = self.right.max(other.right);
        self.bottom = self.bottom.max(other.bottom);
    }
}

fn ascent(font: &Font, size: f32) -> i32 {
    font.horizontal_line_metrics(size)
        .map(|m| m.ascent.round() as i32)
        .unwrap_or(size.round() as i32)
}

fn bitmap_glyph(ch: char) -> Option<[u8; 8]> {
    BASIC_FONTS
        .get(ch)
        .or_else(|| LATIN_FONTS.get(ch))
        .or_else(|| BOX_FONTS.get(ch))
        .or_else(|| MISC_FONTS.get(ch))
}

/// Walk the glyphs of `text` as laid out from the origin, calling `visit`
/// with each glyph's pen position.
fn layout_vector<F>(font: &Font, size: f32, text: &str, mut visit: F) -> i32
where
    F: FnMut(char, i32, i32),
{
    let baseline = ascent(font, size);
    let mut pen = 0.0f32;
    for ch in text.chars() {
        let x = pen.round() as i32;
        if font.lookup_glyph_index(ch) != 0 {
            visit(ch, x, baseline);
        }
        pen += font.metrics(ch, size).advance_width;
    }
    pen.round() as i32
}

fn vector_ink(font: &Font, size: f32, ch: char, x: i32, baseline: i32) -> Option<TextBox> {
    let m = font.metrics(ch, size);
    if m.width == 0 || m.height == 0 {
        return None;
    }
    let left = x + m.xmin;
    let top = baseline - (m.height as i32 + m.ymin);
    Some(TextBox {
        left,
        top,
        right: left + m.width as i32,
        bottom: top + m.height as i32,
    })
}

fn bitmap_ink(glyph: &[u8; 8], x: i32) -> Option<TextBox> {
    let mut ink: Option<TextBox> = None;
    for (row, bits) in glyph.iter().enumerate() {
        for col in 0..8 {
            if bits & (1 << col) == 0 {
                continue;
            }
            let cell = TextBox {
                left: x + col,
                top: row as i32,
                right: x + col + 1,
                bottom: row as i32 + 1,
            };
            match ink.as_mut() {
                Some(b) => b.include(cell, false),
                None => ink = Some(cell),
            }
        }
    }
    ink
}

/// Ink bounding box of `text` drawn at the origin with `face`.
///
/// Text with no visible ink (empty, spaces only, or unsupported glyphs)
/// measures as zero height and its advance width.
pub fn measure(face: &FontFace, text: &str) -> TextBox {
    let mut bounds = TextBox::default();
    let mut seen = false;
    let advance = match face {
        FontFace::Vector { font, size, .. } => layout_vector(font, *size, text, |ch, x, baseline| {
            if let Some(ink) = vector_ink(font, *size, ch, x, baseline) {
                bounds.include(ink, !seen);
                seen = true;
            }
        }),
        FontFace::Bitmap => {
            let mut x = 0;
            for ch in text.chars() {
                if let Some(ink) = bitmap_glyph(ch).and_then(|g| bitmap_ink(&g, x)) {
                    bounds.include(ink, !seen);
                    seen = true;
                }
                x += BITMAP_CELL as i32;
            }
            x
        }
    };
    if seen {
        bounds
    } else {
        TextBox {
            left: 0,
            top: 0,
            right: advance,
            bottom: 0,
        }
    }
}

/// Draw one line of text with its line-box top-left at `origin`.
pub fn draw_text(fb: &mut FrameBuffer, face: &FontFace, origin: Point, text: &str, color: Color) {
    let clip = fb.bounds();
    draw_text_clipped(fb, face, origin, text, color, clip);
}

/// Draw one line of text, touching only pixels inside `clip`.
pub fn draw_text_clipped(
    fb: &mut FrameBuffer,
    face: &FontFace,
    origin: Point,
    text: &str,
    color: Color,
    clip: Rect,
) {
    let clip = clip.intersect(&fb.bounds());
    if clip.is_empty() || text.is_empty() {
        return;
    }
    match face {
        FontFace::Vector { font, size, .. } => {
            layout_vector(font, *size, text, |ch, x, baseline| {
                let (m, bitmap) = font.rasterize(ch, *size);
                let gx = origin.x + x + m.xmin;
                let gy = origin.y + baseline - (m.height as i32 + m.ymin);
                for row in 0..m.height {
                    for col in 0..m.width {
                        let coverage = bitmap[row * m.width + col];
                        let (px, py) = (gx + col as i32, gy + row as i32);
                        if coverage > 0 && clip.contains(px, py) {
                            fb.blend_pixel(px, py, color, coverage);
                        }
                    }
                }
            });
        }
        FontFace::Bitmap => {
            let mut x = origin.x;
            for ch in text.chars() {
                if let Some(glyph) = bitmap_glyph(ch) {
                    for (row, bits) in glyph.iter().enumerate() {
                        for col in 0..8 {
                            let (px, py) = (x + col, origin.y + row as i32);
                            if bits & (1 << col) != 0 && clip.contains(px, py) {
                                fb.blend_pixel(px, py, color, 255);
                            }
                        }
                    }
                }
                x += BITMAP_CELL as i32;
            }
        }
    }
}

/// Draw `text` horizontally centered on the canvas at line-box top `y`.
/// Returns the ink box measured for the layout.
pub fn draw_centered(
    fb: &mut FrameBuffer,
    face: &FontFace,
    y: i32,
    text: &str,
    color: Color,
) -> TextBox {
    let bounds = measure(face, text);
    let x = centered(fb.width, bounds.width());
    draw_text(fb, face, Point::new(x, y), text, color);
    bounds
}
