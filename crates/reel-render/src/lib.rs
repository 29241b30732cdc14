//! # reel-render
//!
//! CPU renderer for the promo's still frames. Resolves fonts with a
//! fallback chain, rasterizes text and simple shapes into RGB frame
//! buffers, and lays out the six scenes.

pub mod draw;
pub mod fonts;
pub mod layout;
pub mod scenes;
pub mod still;
pub mod text;

pub use fonts::{FontFace, FontResolver, FontSet};
pub use scenes::SceneKind;
pub use text::TextBox;
