//! Opening title card.

use reel_core::{FrameBuffer, Point, ReelConfig, ReelResult};

use super::canvas;
use crate::fonts::FontResolver;
use crate::layout::centered;
use crate::text::{draw_text, measure};

/// Vertical shift of the title when a subtitle sits under it.
const SUBTITLE_LIFT: i32 = 50;
/// Space between the title's ink box and the subtitle.
const SUBTITLE_GAP: i32 = 40;

pub fn render(config: &ReelConfig, fonts: &mut FontResolver) -> ReelResult<FrameBuffer> {
    let scene = &config.script.hook;
    let palette = &config.palette;
    let mut fb = canvas(config, palette.background)?;
    let faces = fonts.resolve(
        &config.fonts.hook,
        &[scene.title_size, scene.title_size / 2.0],
    );

    let title = measure(&faces[0], &scene.title);
    let mut y = centered(fb.height, title.height());
    if scene.subtitle.is_some() {
        y -= SUBTITLE_LIFT;
    }
    let x = centered(fb.width, title.width());
    draw_text(
        &mut fb,
        &faces[0],
        Point::new(x, y),
        &scene.title,
        palette.text,
    );

    if let Some(subtitle) = &scene.subtitle {
        let bounds = measure(&faces[1], subtitle);
        let origin = Point::new(
            centered(fb.width, bounds.width()),
            y + title.height() as i32 + SUBTITLE_GAP,
        );
        draw_text(&mut fb, &faces[1], origin, subtitle, palette.text_muted);
    }

    Ok(fb)
}
