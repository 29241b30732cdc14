use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::ReelResult;
use crate::math::Size;
use crate::script::Script;
use crate::Color;

/// Theme colors shared by the title-card style scenes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Palette {
    pub background: Color,
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub text: Color,
    pub text_muted: Color,
}

impl Palette {
    /// Slate/blue theme.
    pub fn canonical() -> ReelResult<Self> {
        Ok(Self {
            background: Color::from_hex("#0F172A")?,
            primary: Color::from_hex("#3B82F6")?,
            secondary: Color::from_hex("#10B981")?,
            accent: Color::from_hex("#F59E0B")?,
            text: Color::from_hex("#F8FAFC")?,
            text_muted: Color::from_hex("#94A3B8")?,
        })
    }
}

/// Font files to probe, in priority order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontCatalog {
    /// Proportional faces for titles and body text.
    pub sans: Vec<PathBuf>,
    /// The hook card's list: `sans` plus a last-resort Linux face.
    pub hook: Vec<PathBuf>,
    /// Monospace faces for the terminal scene.
    pub mono: Vec<PathBuf>,
}

impl FontCatalog {
    pub fn canonical() -> Self {
        let paths = |items: &[&str]| -> Vec<PathBuf> { items.iter().map(PathBuf::from).collect() };
        let sans = paths(&[
            "/System/Library/Fonts/PingFang.ttc",
            "/System/Library/Fonts/STHeiti Light.ttc",
            "/System/Library/Fonts/Helvetica.ttc",
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
        ]);
        let mut hook = sans.clone();
        hook.push(PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"));
        Self {
            sans,
            hook,
            mono: paths(&[
                "/System/Library/Fonts/SF-Mono-Regular.otf",
                "/System/Library/Fonts/Menlo.ttc",
                "/System/Library/Fonts/Courier.dfont",
                "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
            ]),
        }
    }

    /// A catalog with no candidates: every scene uses the built-in bitmap face.
    pub fn empty() -> Self {
        Self {
            sans: Vec::new(),
            hook: Vec::new(),
            mono: Vec::new(),
        }
    }
}

/// Knobs handed to the external encoder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncodeSettings {
    pub codec: String,
    pub pixel_format: String,
    pub preset: String,
    pub crf: u8,
    /// Encoder worker threads.
    pub threads: u32,
    /// Whether an audio track is muxed in. The promo is silent.
    pub audio: bool,
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self {
            codec: "libx264".to_string(),
            pixel_format: "yuv420p".to_string(),
            preset: "medium".to_string(),
            crf: 23,
            threads: 4,
            audio: false,
        }
    }
}

/// Everything a run needs, built once at startup and passed by reference.
#[derive(Debug, Clone, Serialize)]
pub struct ReelConfig {
    pub resolution: Size,
    pub fps: u32,
    pub output_dir: PathBuf,
    pub file_name: String,
    pub palette: Palette,
    pub fonts: FontCatalog,
    pub encode: EncodeSettings,
    pub script: Script,
}

impl ReelConfig {
    /// The shipped configuration: 1080p30, written to `./synapse-ai-demo.mp4`.
    pub fn canonical() -> ReelResult<Self> {
        Ok(Self {
            resolution: Size::full_hd(),
            fps: 30,
            output_dir: PathBuf::from("."),
            file_name: "synapse-ai-demo.mp4".to_string(),
            palette: Palette::canonical()?,
            fonts: FontCatalog::canonical(),
            encode: EncodeSettings::default(),
            script: Script::canonical()?,
        })
    }

    /// Full path of the video file this run writes.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.file_name)
    }

    /// Replace the output location. A bare file name keeps the current directory.
    pub fn with_output_path(mut self, path: &Path) -> Self {
        if let Some(name) = path.file_name() {
            self.file_name = name.to_string_lossy().into_owned();
        }
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                self.output_dir = parent.to_path_buf();
            }
            _ => {}
        }
        self
    }

    pub fn with_fonts(mut self, fonts: FontCatalog) -> Self {
        self.fonts = fonts;
        self
    }
}
