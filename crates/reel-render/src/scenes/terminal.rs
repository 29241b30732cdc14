//! Mock terminal window replaying an install session.

use reel_core::{FrameBuffer, Point, ReelConfig, ReelResult, Rect};

use super::canvas;
use crate::draw::fill_ellipse;
use crate::fonts::FontResolver;
use crate::text::draw_text;

const TITLE_BAR_HEIGHT: u32 = 40;
const INDICATOR_XS: [i32; 3] = [20, 46, 72];
const INDICATOR_Y: i32 = 12;
const INDICATOR_SIZE: u32 = 16;
const TEXT_ORIGIN: Point = Point::new(40, 80);
const TEXT_SIZE: f32 = 28.0;

pub fn render(config: &ReelConfig, fonts: &mut FontResolver) -> ReelResult<FrameBuffer> {
    let scene = &config.script.terminal;
    let mut fb = canvas(config, scene.background)?;
    let faces = fonts.resolve(&config.fonts.mono, &[TEXT_SIZE]);

    fb.fill_rect(
        &Rect::new(0, 0, fb.width, TITLE_BAR_HEIGHT),
        scene.title_bar,
    );
    for (x, color) in INDICATOR_XS.iter().zip(scene.indicators) {
        let dot = Rect::new(*x, INDICATOR_Y, INDICATOR_SIZE, INDICATOR_SIZE);
        fill_ellipse(&mut fb, &dot, color);
    }

    let mut y = TEXT_ORIGIN.y;
    for line in &scene.lines {
        if let Some(color) = line.color.filter(|_| !line.is_blank()) {
            draw_text(
                &mut fb,
                &faces[0],
                Point::new(TEXT_ORIGIN.x, y),
                &line.text,
                color,
            );
        }
        y += scene.line_pitch as i32;
    }

    Ok(fb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenes::testing;
    use reel_core::script::TerminalLine;
    use reel_core::Color;

    #[test]
    fn test_chrome() {
        let config = testing::config();
        let scene = &config.script.terminal;
        let fb = render(&config, &mut FontResolver::new()).unwrap();
        assert_eq!(fb.get_pixel(1000, 20), Some(scene.title_bar));
        assert_eq!(fb.get_pixel(28, 20), Some(scene.indicators[0]));
        assert_eq!(fb.get_pixel(54, 20), Some(scene.indicators[1]));
        assert_eq!(fb.get_pixel(80, 20), Some(scene.indicators[2]));
        assert_eq!(fb.get_pixel(1000, 60), Some(scene.background));
    }

    #[test]
    fn test_blank_lines_advance_the_cursor() {
        let marker = Color::rgb(1, 2, 3);
        let mut config = testing::config();
        let scene = &mut config.script.terminal;
        scene.lines = vec![
            TerminalLine {
                text: "A".into(),
                color: Some(marker),
            },
            TerminalLine::blank(),
            TerminalLine {
                text: "B".into(),
                color: Some(marker),
            },
        ];
        let pitch = scene.line_pitch as i32;
        let fb = render(&config, &mut FontResolver::new()).unwrap();

        let row = |i: i32| Rect::new(40, 80 + i * pitch, 16, 8);
        assert!(testing::count_in(&fb, row(0), marker) > 0);
        assert_eq!(testing::count_in(&fb, row(1), marker), 0);
        assert!(testing::count_in(&fb, row(2), marker) > 0);
    }
}
