//! Product name card: a ringed disc, the name, the tagline and the selling points.

use reel_core::{FrameBuffer, Point, ReelConfig, ReelResult, Rect};

use super::canvas;
use crate::draw::{fill_ellipse, ring};
use crate::fonts::FontResolver;
use crate::text::draw_centered;

const DISC_CENTER_Y: i32 = 280;
const DISC_RADIUS: u32 = 100;
const RING_WIDTH: u32 = 8;
const NAME_Y: i32 = 430;
const TAGLINE_Y: i32 = 580;
const FEATURES_Y: i32 = 700;
const FEATURE_STEP: i32 = 60;

pub fn render(config: &ReelConfig, fonts: &mut FontResolver) -> ReelResult<FrameBuffer> {
    let scene = &config.script.logo;
    let palette = &config.palette;
    let mut fb = canvas(config, palette.background)?;
    let faces = fonts.resolve(&config.fonts.sans, &[120.0, 48.0, 36.0]);

    let disc = Rect::around(Point::new(fb.width as i32 / 2, DISC_CENTER_Y), DISC_RADIUS);
    fill_ellipse(&mut fb, &disc, palette.primary);
    ring(&mut fb, &disc, palette.secondary, RING_WIDTH);

    draw_centered(&mut fb, &faces[0], NAME_Y, &scene.name, palette.text);
    draw_centered(
        &mut fb,
        &faces[1],
        TAGLINE_Y,
        &scene.tagline,
        palette.text_muted,
    );
    for (i, feature) in scene.features.iter().enumerate() {
        let y = FEATURES_Y + i as i32 * FEATURE_STEP;
        draw_centered(&mut fb, &faces[2], y, feature, palette.secondary);
    }

    Ok(fb)
}
