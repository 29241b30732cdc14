//! The six promo scenes.
//!
//! Every renderer has the same shape: take the run configuration and the
//! shared font resolver, return one finished frame at the configured
//! resolution. Renderers never branch on anything but font availability.

use std::fmt;

use reel_core::script::{SceneTiming, Script};
use reel_core::{Clip, Color, FrameBuffer, ReelConfig, ReelError, ReelResult};

use crate::fonts::FontResolver;

pub mod chart;
pub mod chat;
pub mod closing;
pub mod hook;
pub mod logo;
pub mod terminal;

/// A scene of the promo, in playback order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneKind {
    Hook,
    Logo,
    Terminal,
    Chat,
    Chart,
    Closing,
}

impl SceneKind {
    pub const ALL: [SceneKind; 6] = [
        SceneKind::Hook,
        SceneKind::Logo,
        SceneKind::Terminal,
        SceneKind::Chat,
        SceneKind::Chart,
        SceneKind::Closing,
    ];

    /// Short machine-friendly name, used for clip labels and still file names.
    pub fn label(self) -> &'static str {
        match self {
            SceneKind::Hook => "hook",
            SceneKind::Logo => "logo",
            SceneKind::Terminal => "terminal",
            SceneKind::Chat => "chat",
            SceneKind::Chart => "chart",
            SceneKind::Closing => "closing",
        }
    }

    /// Human-readable name for progress output.
    pub fn title(self) -> &'static str {
        match self {
            SceneKind::Hook => "hook card",
            SceneKind::Logo => "logo and tagline",
            SceneKind::Terminal => "terminal session",
            SceneKind::Chat => "chat demo",
            SceneKind::Chart => "token usage chart",
            SceneKind::Closing => "closing call to action",
        }
    }

    pub fn timing(self, script: &Script) -> SceneTiming {
        match self {
            SceneKind::Hook => script.hook.timing,
            SceneKind::Logo => script.logo.timing,
            SceneKind::Terminal => script.terminal.timing,
            SceneKind::Chat => script.chat.timing,
            SceneKind::Chart => script.chart.timing,
            SceneKind::Closing => script.closing.timing,
        }
    }

    pub fn render(self, config: &ReelConfig, fonts: &mut FontResolver) -> ReelResult<FrameBuffer> {
        tracing::debug!("rendering {} scene at {}", self, config.resolution);
        match self {
            SceneKind::Hook => hook::render(config, fonts),
            SceneKind::Logo => logo::render(config, fonts),
            SceneKind::Terminal => terminal::render(config, fonts),
            SceneKind::Chat => chat::render(config, fonts),
            SceneKind::Chart => chart::render(config, fonts),
            SceneKind::Closing => closing::render(config, fonts),
        }
    }

    /// Render the scene and wrap it with its timing.
    pub fn clip(self, config: &ReelConfig, fonts: &mut FontResolver) -> ReelResult<Clip> {
        let frame = self.render(config, fonts)?;
        Ok(Clip::new(self.label(), frame, self.timing(&config.script)))
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A blank frame of the configured resolution.
pub(crate) fn canvas(config: &ReelConfig, background: Color) -> ReelResult<FrameBuffer> {
    let size = config.resolution;
    if size.is_empty() {
        return Err(ReelError::Render(format!(
            "cannot render onto a {} canvas",
            size
        )));
    }
    Ok(FrameBuffer::solid(size.width, size.height, &background))
}

#[cfg(test)]
pub(crate) mod testing {
    use reel_core::{Color, FontCatalog, FrameBuffer, ReelConfig, Rect};

    /// Canonical configuration with no font candidates, so every run uses the
    /// bitmap face regardless of the machine.
    pub fn config() -> ReelConfig {
        ReelConfig::canonical().unwrap().with_fonts(FontCatalog::empty())
    }

    pub fn count_in(fb: &FrameBuffer, area: Rect, color: Color) -> usize {
        let mut n = 0;
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                if fb.get_pixel(x as u32, y as u32) == Some(color) {
                    n += 1;
                }
            }
        }
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_core::hash::hash_frame;
    use reel_core::Size;

    #[test]
    fn test_every_scene_renders_at_configured_resolution() {
        let config = testing::config();
        let mut fonts = FontResolver::new();
        for kind in SceneKind::ALL {
            let frame = kind.render(&config, &mut fonts).unwrap();
            assert_eq!(frame.size(), Size::new(1920, 1080), "{kind}");
        }
    }

    #[test]
    fn test_scenes_are_deterministic() {
        let config = testing::config();
        for kind in SceneKind::ALL {
            let a = kind.render(&config, &mut FontResolver::new()).unwrap();
            let b = kind.render(&config, &mut FontResolver::new()).unwrap();
            assert_eq!(hash_frame(&a), hash_frame(&b), "{kind}");
        }
    }

    #[test]
    fn test_scenes_differ_from_each_other() {
        let config = testing::config();
        let mut fonts = FontResolver::new();
        let mut hashes: Vec<String> = SceneKind::ALL
            .iter()
            .map(|k| hash_frame(&k.render(&config, &mut fonts).unwrap()).to_hex())
            .collect();
        hashes.sort();
        hashes.dedup();
        assert_eq!(hashes.len(), 6);
    }

    #[test]
    fn test_empty_resolution_is_a_render_error() {
        let mut config = testing::config();
        config.resolution = Size::new(0, 1080);
        let err = SceneKind::Hook
            .render(&config, &mut FontResolver::new())
            .unwrap_err();
        assert!(matches!(err, ReelError::Render(_)));
    }

    #[test]
    fn test_clip_carries_scene_timing() {
        let config = testing::config();
        let clip = SceneKind::Closing
            .clip(&config, &mut FontResolver::new())
            .unwrap();
        assert_eq!(clip.label, "closing");
        assert_eq!(clip.duration.as_seconds(), 5.0);
        assert_eq!(clip.fade_out.as_seconds(), 1.5);
    }

    #[test]
    fn test_labels_are_unique() {
        let mut labels: Vec<&str> = SceneKind::ALL.iter().map(|k| k.label()).collect();
        labels.dedup();
        assert_eq!(labels.len(), 6);
        assert_eq!(SceneKind::Chat.to_string(), "chat");
    }
}
