//! Layout arithmetic shared by the scene renderers.

use reel_core::script::{ChartLayout, ChatLayout, ChatRole};

/// Start offset that centers `content` pixels within `canvas` pixels (floor division).
pub fn centered(canvas: u32, content: u32) -> i32 {
    (canvas as i64 - content as i64).div_euclid(2) as i32
}

/// Bar length for `value` on a scale where `max` spans `max_width` pixels.
/// Truncates toward zero; a zero `max` draws nothing.
pub fn bar_width(value: u64, max: u64, max_width: u32) -> u32 {
    if max == 0 {
        return 0;
    }
    (value as f64 / max as f64 * max_width as f64) as u32
}

/// Top edge of chart row `index`.
pub fn row_top(layout: &ChartLayout, index: usize) -> i32 {
    layout.start_y + (index as u32 * layout.row_step) as i32
}

/// Height of a chat bubble holding `lines` lines of text.
pub fn bubble_height(layout: &ChatLayout, lines: usize) -> u32 {
    lines as u32 * layout.line_height + 2 * layout.padding
}

/// Left edge of a bubble for `role` on a canvas `canvas_width` wide.
/// User bubbles hug the right margin, assistant bubbles the left.
pub fn bubble_x(layout: &ChatLayout, role: ChatRole, canvas_width: u32) -> i32 {
    match role {
        ChatRole::User => {
            canvas_width as i32 - layout.bubble_width as i32 - layout.side_margin as i32
        }
        ChatRole::Assistant => layout.side_margin as i32,
    }
}

/// Vertical cursor of the chat transcript.
#[derive(Debug, Clone, Copy)]
pub struct BubbleStack {
    layout: ChatLayout,
    cursor: i32,
}

impl BubbleStack {
    pub fn new(layout: &ChatLayout) -> Self {
        Self {
            layout: *layout,
            cursor: layout.start_y,
        }
    }

    pub fn cursor(&self) -> i32 {
        self.cursor
    }

    /// Reserve a bubble of `lines` lines; returns its top and height.
    pub fn push(&mut self, lines: usize) -> (i32, u32) {
        let top = self.cursor;
        let height = bubble_height(&self.layout, lines);
        self.cursor += (height + self.layout.gap) as i32;
        (top, height)
    }
}

/// Format `value` with comma thousands separators: `15000` → `"15,000"`.
pub fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use reel_core::script::Script;

    fn chat_layout() -> ChatLayout {
        Script::canonical().unwrap().chat.layout
    }

    #[test]
    fn test_centered_floors() {
        assert_eq!(centered(1920, 800), 560);
        assert_eq!(centered(1920, 801), 559);
        assert_eq!(centered(100, 120), -10);
        assert_eq!(centered(100, 121), -11);
    }

    #[test]
    fn test_bar_width() {
        assert_eq!(bar_width(15_000, 15_000, 800), 800);
        assert_eq!(bar_width(10_000, 15_000, 800), 533);
        assert_eq!(bar_width(5_000, 15_000, 800), 266);
        assert_eq!(bar_width(0, 15_000, 800), 0);
        assert_eq!(bar_width(5_000, 0, 800), 0);
        assert_eq!(bar_width(30_000, 15_000, 800), 1600);
    }

    #[test]
    fn test_row_top() {
        let layout = Script::canonical().unwrap().chart.layout;
        assert_eq!(row_top(&layout, 0), 250);
        assert_eq!(row_top(&layout, 2), 490);
    }

    #[test]
    fn test_bubble_geometry() {
        let layout = chat_layout();
        assert_eq!(bubble_height(&layout, 1), 60);
        assert_eq!(bubble_height(&layout, 6), 210);
        assert_eq!(bubble_x(&layout, ChatRole::User, 1920), 1140);
        assert_eq!(bubble_x(&layout, ChatRole::Assistant, 1920), 80);
    }

    #[test]
    fn test_canonical_transcript_cursor() {
        let layout = chat_layout();
        let mut stack = BubbleStack::new(&layout);
        let tops: Vec<i32> = [1, 6, 1, 7].iter().map(|&n| stack.push(n).0).collect();
        assert_eq!(tops, vec![120, 205, 440, 525]);
        assert_eq!(stack.cursor(), 525 + 240 + 25);
    }

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(5_000), "5,000");
        assert_eq!(thousands(15_000), "15,000");
        assert_eq!(thousands(1_234_567), "1,234,567");
    }

    proptest! {
        #[test]
        fn prop_cursor_is_start_plus_heights_and_gaps(
            lines in proptest::collection::vec(0usize..20, 0..12)
        ) {
            let layout = chat_layout();
            let mut stack = BubbleStack::new(&layout);
            for &n in &lines {
                stack.push(n);
            }
            let expected: i32 = layout.start_y
                + lines
                    .iter()
                    .map(|&n| (bubble_height(&layout, n) + layout.gap) as i32)
                    .sum::<i32>();
            prop_assert_eq!(stack.cursor(), expected);
        }

        #[test]
        fn prop_bar_never_exceeds_max_width(max in 1u64..=1_000_000, frac in 0.0f64..=1.0) {
            let value = (max as f64 * frac) as u64;
            prop_assert!(bar_width(value, max, 800) <= 800);
        }
    }
}
