//! # reel-core
//!
//! Core types shared by the Reel crates: colors, RGB frame buffers,
//! geometry, durations, the scene script, the run configuration, the
//! clip timeline, content hashes and the error type.

pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod hash;
pub mod math;
pub mod script;
pub mod time;
pub mod timeline;

pub use color::{Color, ColorError};
pub use config::{EncodeSettings, FontCatalog, Palette, ReelConfig};
pub use error::{ReelError, ReelResult};
pub use frame::FrameBuffer;
pub use math::{Point, Rect, Size};
pub use time::Duration;
pub use timeline::{Clip, Timeline};
