//! # reel-encode
//!
//! Turns a timeline into a video file. Encoding is delegated to the
//! `ffmpeg` binary, which reads raw RGB frames on stdin; `ffprobe`
//! verifies the result.

pub mod ffmpeg;
pub mod probe;

pub use ffmpeg::{EncodeOutput, FfmpegEncoder};
pub use probe::{probe_video, VideoInfo};
