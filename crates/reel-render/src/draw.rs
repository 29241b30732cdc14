//! Shape primitives. Hard-edged: a pixel is painted when its center falls
//! inside the shape.

use reel_core::{Color, FrameBuffer, Rect};

/// Whether the pixel center `(x + 0.5, y + 0.5)` lies inside the ellipse
/// inscribed in `rect`.
fn in_ellipse(rect: &Rect, x: i32, y: i32) -> bool {
    if rect.is_empty() {
        return false;
    }
    let rx = rect.width as f64 / 2.0;
    let ry = rect.height as f64 / 2.0;
    let dx = (x as f64 + 0.5 - (rect.x as f64 + rx)) / rx;
    let dy = (y as f64 + 0.5 - (rect.y as f64 + ry)) / ry;
    dx * dx + dy * dy <= 1.0
}

fn paint_where<F>(fb: &mut FrameBuffer, area: &Rect, color: Color, mut inside: F)
where
    F: FnMut(i32, i32) -> bool,
{
    let clipped = area.intersect(&fb.bounds());
    for y in clipped.y..clipped.bottom() {
        for x in clipped.x..clipped.right() {
            if inside(x, y) {
                fb.set_pixel(x as u32, y as u32, color);
            }
        }
    }
}

/// Outline of `width` pixels drawn inside `rect`.
pub fn outline_rect(fb: &mut FrameBuffer, rect: &Rect, color: Color, width: u32) {
    let inner = rect.inset(width);
    paint_where(fb, rect, color, |x, y| !inner.contains(x, y));
}

/// Filled ellipse inscribed in `rect`.
pub fn fill_ellipse(fb: &mut FrameBuffer, rect: &Rect, color: Color) {
    paint_where(fb, rect, color, |x, y| in_ellipse(rect, x, y));
}

/// Elliptical ring of `width` pixels drawn inside `rect`.
pub fn ring(fb: &mut FrameBuffer, rect: &Rect, color: Color, width: u32) {
    let inner = rect.inset(width);
    paint_where(fb, rect, color, |x, y| {
        in_ellipse(rect, x, y) && !in_ellipse(&inner, x, y)
    });
}

/// Filled rectangle with quarter-circle corners of `radius` pixels.
pub fn fill_rounded_rect(fb: &mut FrameBuffer, rect: &Rect, radius: u32, color: Color) {
    let r = radius.min(rect.width / 2).min(rect.height / 2) as i32;
    if r == 0 {
        fb.fill_rect(rect, color);
        return;
    }
    let (left, top) = (rect.x + r, rect.y + r);
    let (right, bottom) = (rect.right() - r, rect.bottom() - r);
    let r2 = (r * r) as f64;
    paint_where(fb, rect, color, |x, y| {
        // Nearest point of the inner (corner-center) rectangle.
        let cx = x.clamp(left, right - 1);
        let cy = y.clamp(top, bottom - 1);
        if cx == x || cy == y {
            return true;
        }
        let corner_x = if x < left { left as f64 } else { right as f64 };
        let corner_y = if y < top { top as f64 } else { bottom as f64 };
        let dx = x as f64 + 0.5 - corner_x;
        let dy = y as f64 + 0.5 - corner_y;
        dx * dx + dy * dy <= r2
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_core::Point;

    const RED: Color = Color::rgb(255, 0, 0);

    fn count(fb: &FrameBuffer, color: Color) -> usize {
        fb.data
            .chunks_exact(3)
            .filter(|px| *px == color.to_rgb8())
            .count()
    }

    #[test]
    fn test_outline_is_inside_rect() {
        let mut fb = FrameBuffer::new(20, 20);
        outline_rect(&mut fb, &Rect::new(2, 2, 10, 6), RED, 2);
        assert_eq!(fb.get_pixel(2, 2), Some(RED));
        assert_eq!(fb.get_pixel(11, 7), Some(RED));
        assert_eq!(fb.get_pixel(12, 7), Some(Color::BLACK));
        assert_eq!(fb.get_pixel(4, 4), Some(Color::BLACK));
        // 10x6 minus the 6x2 hole.
        assert_eq!(count(&fb, RED), 60 - 12);
    }

    #[test]
    fn test_circle_is_symmetric_and_bounded() {
        let mut fb = FrameBuffer::new(40, 40);
        let rect = Rect::around(Point::new(20, 20), 10);
        fill_ellipse(&mut fb, &rect, RED);
        assert_eq!(fb.get_pixel(20, 20), Some(RED));
        assert_eq!(fb.get_pixel(10, 20), Some(RED));
        assert_eq!(fb.get_pixel(29, 20), Some(RED));
        assert_eq!(fb.get_pixel(10, 10), Some(Color::BLACK));
        assert_eq!(fb.get_pixel(30, 20), Some(Color::BLACK));
        let area = count(&fb, RED) as f64;
        assert!((area - std::f64::consts::PI * 100.0).abs() < 20.0);
    }

    #[test]
    fn test_ring_leaves_center_untouched() {
        let mut fb = FrameBuffer::new(40, 40);
        let rect = Rect::around(Point::new(20, 20), 15);
        ring(&mut fb, &rect, RED, 3);
        assert_eq!(fb.get_pixel(20, 20), Some(Color::BLACK));
        assert_eq!(fb.get_pixel(5, 20), Some(RED));
        assert_eq!(fb.get_pixel(7, 20), Some(RED));
        assert_eq!(fb.get_pixel(9, 20), Some(Color::BLACK));
    }

    #[test]
    fn test_rounded_rect_cuts_corners() {
        let mut fb = FrameBuffer::new(40, 30);
        let rect = Rect::new(5, 5, 30, 20);
        fill_rounded_rect(&mut fb, &rect, 6, RED);
        assert_eq!(fb.get_pixel(5, 5), Some(Color::BLACK));
        assert_eq!(fb.get_pixel(34, 24), Some(Color::BLACK));
        assert_eq!(fb.get_pixel(5, 15), Some(RED));
        assert_eq!(fb.get_pixel(20, 5), Some(RED));
        assert_eq!(fb.get_pixel(20, 15), Some(RED));
        assert_eq!(fb.get_pixel(35, 15), Some(Color::BLACK));
    }

    #[test]
    fn test_zero_radius_is_plain_rect() {
        let mut fb = FrameBuffer::new(10, 10);
        fill_rounded_rect(&mut fb, &Rect::new(1, 1, 4, 3), 0, RED);
        assert_eq!(count(&fb, RED), 12);
    }

    #[test]
    fn test_shapes_clip_to_canvas() {
        let mut fb = FrameBuffer::new(10, 10);
        fill_ellipse(&mut fb, &Rect::new(-10, -10, 40, 40), RED);
        outline_rect(&mut fb, &Rect::new(-5, -5, 30, 30), RED, 2);
        fill_rounded_rect(&mut fb, &Rect::new(5, 5, 50, 50), 10, RED);
        assert_eq!(fb.get_pixel(5, 5), Some(RED));
    }
}
