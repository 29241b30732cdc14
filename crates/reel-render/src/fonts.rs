//! Font resolution.
//!
//! Scenes ask for a set of point sizes from a priority-ordered list of font
//! files. The first file that exists and parses supplies every size; if none
//! does, every size falls back to the built-in 8×8 bitmap face. Missing fonts
//! only degrade typography, they never fail a render.

use std::collections::HashMap;
use std::fmt;
use std::ops::Index;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use fontdue::{Font, FontSettings};

/// A font at a specific size, ready for measuring and drawing.
#[derive(Clone)]
pub enum FontFace {
    /// A parsed outline font rasterized at `size` pixels.
    Vector {
        font: Arc<Font>,
        size: f32,
        source: Arc<Path>,
    },
    /// The built-in non-scalable 8×8 bitmap face.
    Bitmap,
}

impl FontFace {
    pub fn is_bitmap(&self) -> bool {
        matches!(self, FontFace::Bitmap)
    }

    /// Nominal size in pixels. The bitmap face is always 8.
    pub fn size(&self) -> f32 {
        match self {
            FontFace::Vector { size, .. } => *size,
            FontFace::Bitmap => crate::text::BITMAP_CELL as f32,
        }
    }

    pub fn source(&self) -> Option<&Path> {
        match self {
            FontFace::Vector { source, .. } => Some(source),
            FontFace::Bitmap => None,
        }
    }
}

impl fmt::Debug for FontFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontFace::Vector { size, source, .. } => f
                .debug_struct("Vector")
                .field("size", size)
                .field("source", source)
                .finish(),
            FontFace::Bitmap => f.write_str("Bitmap"),
        }
    }
}

/// One face per requested size, all from the same source.
#[derive(Debug, Clone)]
pub struct FontSet {
    faces: Vec<FontFace>,
    source: Option<PathBuf>,
}

impl FontSet {
    fn fallback(count: usize) -> Self {
        Self {
            faces: vec![FontFace::Bitmap; count],
            source: None,
        }
    }

    /// The file the faces were loaded from; `None` for the bitmap fallback.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn is_fallback(&self) -> bool {
        self.source.is_none()
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn faces(&self) -> &[FontFace] {
        &self.faces
    }
}

impl Index<usize> for FontSet {
    type Output = FontFace;

    fn index(&self, index: usize) -> &FontFace {
        &self.faces[index]
    }
}

/// Probes candidate font files and caches what it parsed.
#[derive(Default)]
pub struct FontResolver {
    /// Parsed fonts by path; `None` remembers a file that exists but failed to parse.
    cache: HashMap<PathBuf, Option<Arc<Font>>>,
}

impl FontResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Try a single candidate: `Some` with one face per size if `path` exists,
    /// parses as a font and every size is usable.
    pub fn probe(&mut self, path: &Path, sizes: &[f32]) -> Option<Vec<FontFace>> {
        if let Some(bad) = sizes.iter().find(|s| !(s.is_finite() && **s > 0.0)) {
            tracing::debug!("font size {} is not drawable; skipping {}", bad, path.display());
            return None;
        }
        if !path.exists() {
            tracing::debug!("font candidate {} does not exist", path.display());
            return None;
        }
        let font = self.load(path)?;
        let source: Arc<Path> = Arc::from(path);
        Some(
            sizes
                .iter()
                .map(|&size| FontFace::Vector {
                    font: font.clone(),
                    size,
                    source: source.clone(),
                })
                .collect(),
        )
    }

    /// Resolve `sizes` against `candidates` in priority order.
    pub fn resolve(&mut self, candidates: &[PathBuf], sizes: &[f32]) -> FontSet {
        for path in candidates {
            if let Some(faces) = self.probe(path, sizes) {
                tracing::debug!("resolved font {} for sizes {:?}", path.display(), sizes);
                return FontSet {
                    faces,
                    source: Some(path.clone()),
                };
            }
        }
        tracing::info!(
            "none of {} font candidates loaded; using the built-in bitmap face",
            candidates.len()
        );
        FontSet::fallback(sizes.len())
    }

    fn load(&mut self, path: &Path) -> Option<Arc<Font>> {
        if let Some(cached) = self.cache.get(path) {
            return cached.clone();
        }
        let loaded = match std::fs::read(path) {
            Ok(data) => match Font::from_bytes(data, FontSettings::default()) {
                Ok(font) => Some(Arc::new(font)),
                Err(e) => {
                    tracing::debug!("failed to parse font {}: {}", path.display(), e);
                    None
                }
            },
            Err(e) => {
                tracing::debug!("failed to read font file {}: {}", path.display(), e);
                None
            }
        };
        self.cache.insert(path.to_path_buf(), loaded.clone());
        loaded
    }
}

/// First common system font found on this machine, for tests that want a real outline face.
#[cfg(test)]
pub(crate) fn system_test_font() -> Option<PathBuf> {
    [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/System/Library/Fonts/Helvetica.ttc",
        "/Library/Fonts/Arial.ttf",
    ]
    .iter()
    .map(PathBuf::from)
    .find(|p| {
        std::fs::read(p)
            .ok()
            .and_then(|d| Font::from_bytes(d, FontSettings::default()).ok())
            .is_some()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("reel_fonts_{}_{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_candidates_fall_back_to_bitmap() {
        let mut resolver = FontResolver::new();
        let set = resolver.resolve(
            &[
                PathBuf::from("/nonexistent/a.ttf"),
                PathBuf::from("/nonexistent/b.ttc"),
            ],
            &[48.0, 32.0, 28.0],
        );
        assert!(set.is_fallback());
        assert_eq!(set.len(), 3);
        assert!(set.faces().iter().all(FontFace::is_bitmap));
    }

    #[test]
    fn test_empty_candidate_list_falls_back() {
        let mut resolver = FontResolver::new();
        let set = resolver.resolve(&[], &[20.0]);
        assert!(set.is_fallback());
        assert!(set[0].is_bitmap());
    }

    #[test]
    fn test_unparseable_file_is_skipped() {
        let dir = scratch_dir("garbage");
        let garbage = dir.join("broken.ttf");
        std::fs::write(&garbage, b"definitely not a font").unwrap();

        let mut resolver = FontResolver::new();
        assert!(resolver.probe(&garbage, &[24.0]).is_none());
        let set = resolver.resolve(&[garbage.clone()], &[24.0]);
        assert!(set.is_fallback());

        if let Some(real) = system_test_font() {
            let set = resolver.resolve(&[garbage, real.clone()], &[24.0, 12.0]);
            assert_eq!(set.source(), Some(real.as_path()));
            assert_eq!(set[0].size(), 24.0);
            assert_eq!(set[1].size(), 12.0);
        }
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_first_loadable_candidate_wins() {
        let Some(real) = system_test_font() else {
            return;
        };
        let dir = scratch_dir("order");
        let copy = dir.join("copy.ttf");
        std::fs::copy(&real, &copy).unwrap();

        let mut resolver = FontResolver::new();
        let set = resolver.resolve(
            &[PathBuf::from("/nonexistent/first.ttf"), copy.clone(), real.clone()],
            &[36.0],
        );
        assert_eq!(set.source(), Some(copy.as_path()));
        assert_eq!(set[0].source(), Some(copy.as_path()));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_invalid_size_rejects_candidate() {
        let Some(real) = system_test_font() else {
            return;
        };
        let mut resolver = FontResolver::new();
        assert!(resolver.probe(&real, &[24.0, 0.0]).is_none());
        assert!(resolver.probe(&real, &[f32::NAN]).is_none());
        assert_eq!(resolver.probe(&real, &[24.0]).map(|f| f.len()), Some(1));
    }

    #[test]
    fn test_bitmap_face_reports_fixed_size() {
        assert_eq!(FontFace::Bitmap.size(), 8.0);
        assert!(FontFace::Bitmap.source().is_none());
    }
}
