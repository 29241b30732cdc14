//! Clips and the timeline they are concatenated into.
//!
//! Clips are joined end to end in the order given. Each clip keeps its own
//! fade in and fade out (to and from black); neighbours never cross-dissolve,
//! so the timeline lasts exactly as long as the sum of its clips.

use crate::error::{ReelError, ReelResult};
use crate::frame::FrameBuffer;
use crate::math::Size;
use crate::script::SceneTiming;
use crate::Duration;

/// A still frame shown for a fixed duration with its own fades.
#[derive(Debug, Clone)]
pub struct Clip {
    pub label: String,
    pub frame: FrameBuffer,
    pub duration: Duration,
    pub fade_in: Duration,
    pub fade_out: Duration,
}

impl Clip {
    pub fn new(label: impl Into<String>, frame: FrameBuffer, timing: SceneTiming) -> Self {
        Self {
            label: label.into(),
            frame,
            duration: timing.duration,
            fade_in: timing.fade_in,
            fade_out: timing.fade_out,
        }
    }

    /// Brightness multiplier at `t` seconds into the clip, in [0, 1].
    pub fn opacity_at(&self, t: f64) -> f32 {
        let mut factor = 1.0f64;
        if !self.fade_in.is_zero() {
            factor *= (t / self.fade_in.as_seconds()).min(1.0);
        }
        if !self.fade_out.is_zero() {
            factor *= ((self.duration.as_seconds() - t) / self.fade_out.as_seconds()).min(1.0);
        }
        factor.clamp(0.0, 1.0) as f32
    }

    pub fn frame_count(&self, fps: u32) -> u64 {
        self.duration.frame_count(fps)
    }
}

/// Ordered, gapless sequence of clips at a fixed frame rate.
#[derive(Debug, Clone)]
pub struct Timeline {
    fps: u32,
    size: Size,
    clips: Vec<Clip>,
}

impl Timeline {
    /// Concatenate `clips` in order.
    pub fn assemble(fps: u32, clips: Vec<Clip>) -> ReelResult<Self> {
        if fps == 0 {
            return Err(ReelError::Timeline("frame rate must be non-zero".into()));
        }
        let first = clips
            .first()
            .ok_or_else(|| ReelError::Timeline("no clips to assemble".into()))?;
        let size = first.frame.size();

        for clip in &clips {
            if clip.frame.size() != size {
                return Err(ReelError::Timeline(format!(
                    "clip '{}' is {}, expected {}",
                    clip.label,
                    clip.frame.size(),
                    size
                )));
            }
            if clip.frame_count(fps) == 0 {
                return Err(ReelError::Timeline(format!(
                    "clip '{}' is shorter than one frame",
                    clip.label
                )));
            }
            if clip.fade_in > clip.duration || clip.fade_out > clip.duration {
                return Err(ReelError::Timeline(format!(
                    "clip '{}' fades last longer than the clip ({})",
                    clip.label, clip.duration
                )));
            }
        }

        Ok(Self { fps, size, clips })
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    /// Sum of clip durations; fades do not shorten the timeline.
    pub fn duration(&self) -> Duration {
        self.clips.iter().map(|c| c.duration).sum()
    }

    pub fn frame_count(&self) -> u64 {
        self.clips.iter().map(|c| c.frame_count(self.fps)).sum()
    }

    /// Map a global frame index to `(clip index, frame index within that clip)`.
    pub fn locate(&self, index: u64) -> Option<(usize, u64)> {
        let mut start = 0u64;
        for (i, clip) in self.clips.iter().enumerate() {
            let count = clip.frame_count(self.fps);
            if index < start + count {
                return Some((i, index - start));
            }
            start += count;
        }
        None
    }

    /// Brightness of output frame `index`.
    pub fn opacity_at(&self, index: u64) -> Option<f32> {
        let (clip, local) = self.locate(index)?;
        Some(self.clips[clip].opacity_at(local as f64 / self.fps as f64))
    }

    /// Fill `out` with the RGB bytes of output frame `index`.
    pub fn write_frame(&self, index: u64, out: &mut Vec<u8>) -> ReelResult<()> {
        let (clip, local) = self.locate(index).ok_or_else(|| {
            ReelError::Timeline(format!(
                "frame {} out of range (timeline has {})",
                index,
                self.frame_count()
            ))
        })?;
        let clip = &self.clips[clip];
        clip.frame
            .write_faded(clip.opacity_at(local as f64 / self.fps as f64), out);
        Ok(())
    }
}
