//! Post-export verification through `ffprobe`.
//!
//! Frames are counted by decoding (`-count_frames`), so the reported count
//! is what a player sees, not what the container header claims.

use std::path::Path;
use std::process::{Command, Stdio};

use reel_core::{ReelError, ReelResult, Size, Timeline};
use serde::Serialize;

/// What `ffprobe` reports about the first video stream of a file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoInfo {
    pub codec: String,
    pub width: u32,
    pub height: u32,
    pub frame_count: u64,
    pub duration_secs: f64,
    pub has_audio: bool,
}

impl VideoInfo {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Check the probed file against the timeline it was encoded from.
    pub fn verify_against(&self, timeline: &Timeline) -> ReelResult<()> {
        if self.size() != timeline.size() {
            return Err(ReelError::Probe(format!(
                "video is {}, timeline is {}",
                self.size(),
                timeline.size()
            )));
        }
        if self.frame_count != timeline.frame_count() {
            return Err(ReelError::Probe(format!(
                "video has {} frames, timeline has {}",
                self.frame_count,
                timeline.frame_count()
            )));
        }
        if self.has_audio {
            return Err(ReelError::Probe("video unexpectedly carries an audio track".into()));
        }
        Ok(())
    }
}

/// Check if ffprobe is available on the system.
pub fn is_available() -> bool {
    Command::new("ffprobe")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Arguments for a JSON probe of `path` with decoded frame counts.
pub fn probe_args(path: &Path) -> Vec<String> {
    vec![
        "-v".to_string(),
        "error".to_string(),
        "-count_frames".to_string(),
        "-print_format".to_string(),
        "json".to_string(),
        "-show_format".to_string(),
        "-show_streams".to_string(),
        path.to_string_lossy().into_owned(),
    ]
}

/// Probe an encoded video file.
pub fn probe_video(path: &Path) -> ReelResult<VideoInfo> {
    if !path.is_file() {
        return Err(ReelError::Probe(format!("'{}' is not a file", path.display())));
    }
    let output = Command::new("ffprobe")
        .args(probe_args(path))
        .stdin(Stdio::null())
        .output()
        .map_err(|e| ReelError::Probe(format!("failed to execute ffprobe: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ReelError::Probe(format!(
            "ffprobe exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    let info = parse_probe_json(&String::from_utf8_lossy(&output.stdout))?;
    tracing::debug!(
        "probed {}: {}x{}, {} frames, {:.2}s",
        path.display(),
        info.width,
        info.height,
        info.frame_count,
        info.duration_secs
    );
    Ok(info)
}

fn as_number<T: std::str::FromStr>(value: Option<&serde_json::Value>) -> Option<T> {
    match value? {
        serde_json::Value::String(s) => s.parse().ok(),
        serde_json::Value::Number(n) => n.to_string().parse().ok(),
        _ => None,
    }
}

/// Parse `ffprobe -print_format json` output.
pub fn parse_probe_json(json: &str) -> ReelResult<VideoInfo> {
    let parsed: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| ReelError::Probe(format!("failed to parse ffprobe JSON: {}", e)))?;

    let streams = parsed
        .get("streams")
        .and_then(|s| s.as_array())
        .ok_or_else(|| ReelError::Probe("ffprobe output missing 'streams' array".into()))?;

    let codec_type = |s: &serde_json::Value| {
        s.get("codec_type")
            .and_then(|t| t.as_str())
            .map(str::to_owned)
    };
    let video = streams
        .iter()
        .find(|s| codec_type(s).as_deref() == Some("video"))
        .ok_or_else(|| ReelError::Probe("no video stream found".into()))?;
    let has_audio = streams
        .iter()
        .any(|s| codec_type(s).as_deref() == Some("audio"));

    let frame_count = as_number(video.get("nb_read_frames"))
        .or_else(|| as_number(video.get("nb_frames")))
        .ok_or_else(|| ReelError::Probe("ffprobe did not report a frame count".into()))?;

    let duration_secs = as_number(video.get("duration"))
        .or_else(|| as_number(parsed.get("format").and_then(|f| f.get("duration"))))
        .unwrap_or(0.0);

    Ok(VideoInfo {
        codec: video
            .get("codec_name")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown")
            .to_string(),
        width: as_number(video.get("width")).unwrap_or(0),
        height: as_number(video.get("height")).unwrap_or(0),
        frame_count,
        duration_secs,
        has_audio,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_core::script::SceneTiming;
    use reel_core::{Clip, FrameBuffer};

    const SAMPLE: &str = r#"{
        "streams": [
            {
                "index": 0,
                "codec_name": "h264",
                "codec_type": "video",
                "width": 1920,
                "height": 1080,
                "pix_fmt": "yuv420p",
                "r_frame_rate": "30/1",
                "duration": "33.000000",
                "nb_frames": "990",
                "nb_read_frames": "990"
            }
        ],
        "format": { "duration": "33.000000" }
    }"#;

    fn timeline(width: u32, height: u32, seconds: f64) -> Timeline {
        let clip = Clip::new(
            "only",
            FrameBuffer::new(width, height),
            SceneTiming::seconds(seconds, 0.0, 0.0),
        );
        Timeline::assemble(30, vec![clip]).unwrap()
    }

    #[test]
    fn test_probe_args() {
        let args = probe_args(Path::new("/tmp/demo.mp4"));
        assert!(args.contains(&"-count_frames".to_string()));
        assert_eq!(args.last().unwrap(), "/tmp/demo.mp4");
    }

    #[test]
    fn test_parse_sample() {
        let info = parse_probe_json(SAMPLE).unwrap();
        assert_eq!(info.codec, "h264");
        assert_eq!(info.size(), Size::new(1920, 1080));
        assert_eq!(info.frame_count, 990);
        assert!((info.duration_secs - 33.0).abs() < 1e-9);
        assert!(!info.has_audio);
    }

    #[test]
    fn test_parse_falls_back_to_header_frame_count() {
        let json = r#"{"streams":[{"codec_type":"video","width":64,"height":32,"nb_frames":"12"}]}"#;
        let info = parse_probe_json(json).unwrap();
        assert_eq!(info.frame_count, 12);
        assert_eq!(info.duration_secs, 0.0);
    }

    #[test]
    fn test_parse_rejects_bad_output() {
        assert!(parse_probe_json("not json").is_err());
        assert!(parse_probe_json(r#"{"format":{}}"#).is_err());
        assert!(parse_probe_json(r#"{"streams":[{"codec_type":"audio"}]}"#).is_err());
        assert!(parse_probe_json(r#"{"streams":[{"codec_type":"video"}]}"#).is_err());
    }

    #[test]
    fn test_verify_against_timeline() {
        let info = parse_probe_json(SAMPLE).unwrap();
        assert!(info.verify_against(&timeline(1920, 1080, 33.0)).is_ok());
        assert!(info.verify_against(&timeline(1280, 720, 33.0)).is_err());
        assert!(info.verify_against(&timeline(1920, 1080, 10.0)).is_err());

        let with_audio = VideoInfo {
            has_audio: true,
            ..info
        };
        assert!(with_audio.verify_against(&timeline(1920, 1080, 33.0)).is_err());
    }

    #[test]
    fn test_probe_missing_file() {
        let err = probe_video(Path::new("/nonexistent/demo.mp4")).unwrap_err();
        assert!(matches!(err, ReelError::Probe(_)));
    }
}
