use crate::math::{Rect, Size};
use crate::Color;

/// Bytes per pixel of a frame buffer (packed 8-bit RGB).
pub const BYTES_PER_PIXEL: usize = 3;

/// A single video frame as a raw RGB pixel buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    /// Raw pixel data, row-major.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameBuffer {
    /// Create a new frame buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width as usize) * (height as usize) * BYTES_PER_PIXEL;
        Self {
            data: vec![0u8; size],
            width,
            height,
        }
    }

    /// Create a frame buffer filled with a solid color.
    pub fn solid(width: u32, height: u32, color: &Color) -> Self {
        let pixel = color.to_rgb8();
        let pixel_count = (width as usize) * (height as usize);
        let mut data = Vec::with_capacity(pixel_count * BYTES_PER_PIXEL);
        for _ in 0..pixel_count {
            data.extend_from_slice(&pixel);
        }
        Self {
            data,
            width,
            height,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The whole canvas as a rectangle.
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Total byte size of the pixel data.
    pub fn byte_size(&self) -> usize {
        self.data.len()
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * BYTES_PER_PIXEL
    }

    /// Get the color at a pixel coordinate. Returns None if out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let o = self.offset(x, y);
        Some(Color::rgb(self.data[o], self.data[o + 1], self.data[o + 2]))
    }

    /// Set the color at a pixel coordinate. No-op if out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }
        let o = self.offset(x, y);
        self.data[o..o + BYTES_PER_PIXEL].copy_from_slice(&color.to_rgb8());
    }

    /// Blend `color` over the pixel at (x, y) with `coverage` in 0..=255.
    /// Coordinates outside the canvas are ignored.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color, coverage: u8) {
        if coverage == 0 || x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        if coverage == 255 {
            self.set_pixel(x as u32, y as u32, color);
            return;
        }
        let o = self.offset(x as u32, y as u32);
        let a = coverage as u32;
        let inv = 255 - a;
        for (dst, src) in self.data[o..o + BYTES_PER_PIXEL]
            .iter_mut()
            .zip(color.to_rgb8())
        {
            *dst = ((src as u32 * a + *dst as u32 * inv + 127) / 255) as u8;
        }
    }

    /// Fill a rectangle, clipped to the canvas.
    pub fn fill_rect(&mut self, rect: &Rect, color: Color) {
        let clipped = rect.intersect(&self.bounds());
        if clipped.is_empty() {
            return;
        }
        let pixel = color.to_rgb8();
        let row_len = clipped.width as usize * BYTES_PER_PIXEL;
        for y in clipped.y..clipped.bottom() {
            let start = self.offset(clipped.x as u32, y as u32);
            for px in self.data[start..start + row_len].chunks_exact_mut(BYTES_PER_PIXEL) {
                px.copy_from_slice(&pixel);
            }
        }
    }

    /// Write this frame's bytes scaled by `factor` (fade to black) into `out`.
    ///
    /// `out` is cleared first so callers can reuse one scratch buffer per run.
    pub fn write_faded(&self, factor: f32, out: &mut Vec<u8>) {
        out.clear();
        let f = factor.clamp(0.0, 1.0);
        if f >= 1.0 {
            out.extend_from_slice(&self.data);
            return;
        }
        // 16.16 fixed point keeps the per-byte work to one multiply.
        let scale = (f * 65536.0).round() as u32;
        out.extend(
            self.data
                .iter()
                .map(|&c| ((c as u32 * scale + 0x8000) >> 16) as u8),
        );
    }
}
