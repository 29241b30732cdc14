//! Horizontal bar chart comparing token usage.

use reel_core::{FrameBuffer, Point, ReelConfig, ReelResult, Rect};

use super::canvas;
use crate::draw::outline_rect;
use crate::fonts::FontResolver;
use crate::layout::{bar_width, row_top, thousands};
use crate::text::{draw_centered, draw_text};

const TITLE_Y: i32 = 80;
const LABEL_X: i32 = 150;
const LABEL_DY: i32 = 20;
const VALUE_DY: i32 = 25;
/// Gap between the end of the track and the token count.
const COUNT_GAP: i32 = 40;
/// Offset of the cost label from the token count.
const COST_OFFSET: i32 = 230;
const TRACK_OUTLINE: u32 = 2;

pub fn render(config: &ReelConfig, fonts: &mut FontResolver) -> ReelResult<FrameBuffer> {
    let scene = &config.script.chart;
    let layout = &scene.layout;
    let palette = &config.palette;
    let mut fb = canvas(config, palette.background)?;
    let faces = fonts.resolve(&config.fonts.sans, &[48.0, 32.0, 28.0]);
    let (title_face, label_face, value_face) = (&faces[0], &faces[1], &faces[2]);

    draw_centered(&mut fb, title_face, TITLE_Y, &scene.title, palette.text);

    let count_x = layout.bar_x + layout.bar_max_width as i32 + COUNT_GAP;
    for (i, row) in scene.rows.iter().enumerate() {
        let y = row_top(layout, i);
        let label_origin = Point::new(LABEL_X, y + LABEL_DY);
        draw_text(&mut fb, label_face, label_origin, &row.label, palette.text);

        let track = Rect::new(layout.bar_x, y, layout.bar_max_width, layout.bar_height);
        fb.fill_rect(&track, scene.track);
        outline_rect(&mut fb, &track, scene.track_outline, TRACK_OUTLINE);

        let width = bar_width(row.value, scene.max_value, layout.bar_max_width);
        fb.fill_rect(
            &Rect::new(layout.bar_x, y, width, layout.bar_height),
            row.color,
        );

        let count = format!("{} tokens", thousands(row.value));
        let count_origin = Point::new(count_x, y + VALUE_DY);
        draw_text(&mut fb, value_face, count_origin, &count, palette.text);
        let cost_origin = Point::new(count_x + COST_OFFSET, y + VALUE_DY);
        draw_text(&mut fb, value_face, cost_origin, &row.cost, row.color);
    }

    Ok(fb)
}
