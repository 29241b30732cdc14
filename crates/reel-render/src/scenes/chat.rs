//! Mock chat window: header bar, four message bubbles and a memory footnote.
//!
//! Bubble height follows the number of `\n`-separated lines in the message.
//! Text never wraps; anything wider than a bubble is clipped at its padding.

use reel_core::script::ChatRole;
use reel_core::{FrameBuffer, Point, ReelConfig, ReelResult, Rect};

use super::canvas;
use crate::draw::fill_rounded_rect;
use crate::fonts::FontResolver;
use crate::layout::{bubble_x, BubbleStack};
use crate::text::{draw_text, draw_text_clipped};

const HEADER_HEIGHT: u32 = 70;
const TITLE_ORIGIN: Point = Point::new(40, 20);
/// Distance of the stats label from the right edge.
const STATS_INSET: i32 = 350;
const STATS_Y: i32 = 25;
const NOTE_OFFSET: i32 = 15;

pub fn render(config: &ReelConfig, fonts: &mut FontResolver) -> ReelResult<FrameBuffer> {
    let scene = &config.script.chat;
    let layout = &scene.layout;
    let palette = &config.palette;
    let mut fb = canvas(config, palette.background)?;
    let faces = fonts.resolve(&config.fonts.sans, &[36.0, 24.0, 20.0]);
    let (title_face, message_face, small_face) = (&faces[0], &faces[1], &faces[2]);

    fb.fill_rect(&Rect::new(0, 0, fb.width, HEADER_HEIGHT), scene.header);
    draw_text(
        &mut fb,
        title_face,
        TITLE_ORIGIN,
        &scene.title,
        palette.text,
    );
    let stats_origin = Point::new(fb.width as i32 - STATS_INSET, STATS_Y);
    draw_text(
        &mut fb,
        small_face,
        stats_origin,
        &scene.stats,
        palette.secondary,
    );

    let mut stack = BubbleStack::new(layout);
    for message in &scene.messages {
        let (top, height) = stack.push(message.line_count());
        let x = bubble_x(layout, message.role, fb.width);
        let fill = match message.role {
            ChatRole::User => palette.primary,
            ChatRole::Assistant => scene.assistant_bubble,
        };
        let bubble = Rect::new(x, top, layout.bubble_width, height);
        fill_rounded_rect(&mut fb, &bubble, layout.corner_radius, fill);

        let inner = bubble.inset(layout.padding);
        let pad = layout.padding as i32;
        for (i, line) in message.content.split('\n').enumerate() {
            let origin = Point::new(x + pad, top + pad + (i as u32 * layout.line_height) as i32);
            draw_text_clipped(&mut fb, message_face, origin, line, palette.text, inner);
        }
    }

    let note_origin = Point::new(layout.side_margin as i32, stack.cursor() + NOTE_OFFSET);
    draw_text(
        &mut fb,
        small_face,
        note_origin,
        &scene.memory_note,
        palette.accent,
    );

    Ok(fb)
}
