//! Closing card with the repository link and a call to action.

use reel_core::{FrameBuffer, Point, ReelConfig, ReelResult, Rect};

use super::canvas;
use crate::draw::fill_ellipse;
use crate::fonts::FontResolver;
use crate::text::{draw_centered, draw_text, measure};

const BADGE_CENTER_Y: i32 = 200;
const BADGE_RADIUS: u32 = 80;
const TITLE_Y: i32 = 350;
const URL_Y: i32 = 480;
const CTA_Y: i32 = 600;
const FEATURES_Y: i32 = 720;
const FEATURE_STEP: i32 = 50;

pub fn render(config: &ReelConfig, fonts: &mut FontResolver) -> ReelResult<FrameBuffer> {
    let scene = &config.script.closing;
    let palette = &config.palette;
    let mut fb = canvas(config, palette.background)?;
    let faces = fonts.resolve(&config.fonts.sans, &[72.0, 48.0, 36.0]);
    let (large, medium, small) = (&faces[0], &faces[1], &faces[2]);

    let center = Point::new(fb.width as i32 / 2, BADGE_CENTER_Y);
    fill_ellipse(
        &mut fb,
        &Rect::around(center, BADGE_RADIUS),
        palette.primary,
    );
    let badge = measure(large, &scene.badge);
    let badge_origin = Point::new(
        center.x - (badge.width() / 2) as i32,
        center.y - (badge.height() / 2) as i32,
    );
    draw_text(&mut fb, large, badge_origin, &scene.badge, palette.text);

    draw_centered(&mut fb, large, TITLE_Y, &scene.title, palette.text);
    draw_centered(&mut fb, medium, URL_Y, &scene.url, palette.primary);
    draw_centered(
        &mut fb,
        medium,
        CTA_Y,
        &scene.call_to_action,
        palette.secondary,
    );
    for (i, feature) in scene.features.iter().enumerate() {
        let y = FEATURES_Y + i as i32 * FEATURE_STEP;
        draw_centered(&mut fb, small, y, feature, palette.text_muted);
    }

    Ok(fb)
}
