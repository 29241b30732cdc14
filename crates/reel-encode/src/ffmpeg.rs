use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use reel_core::{EncodeSettings, ReelError, ReelResult, Timeline};
use serde::Serialize;

/// What an encode produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncodeOutput {
    pub path: PathBuf,
    pub frames: u64,
    pub file_size: u64,
}

/// Encoder that pipes raw RGB frames into an `ffmpeg` child process.
pub struct FfmpegEncoder;

impl FfmpegEncoder {
    /// Check if FFmpeg is available on the system.
    pub fn is_available() -> bool {
        Command::new("ffmpeg")
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// Reject inputs ffmpeg would choke on, before spawning anything.
    pub fn validate(
        timeline: &Timeline,
        settings: &EncodeSettings,
        output_path: &Path,
    ) -> ReelResult<()> {
        if settings.audio {
            return Err(ReelError::Unsupported(
                "audio tracks are not supported; the promo is silent".into(),
            ));
        }
        let size = timeline.size();
        if size.width % 2 != 0 || size.height % 2 != 0 {
            return Err(ReelError::InvalidArgument(format!(
                "{} has an odd dimension; {} needs even width and height",
                size, settings.pixel_format
            )));
        }
        Self::check_output_path(output_path)
    }

    /// The output must name a file inside a directory that already exists.
    /// Directories are never created.
    pub fn check_output_path(output_path: &Path) -> ReelResult<()> {
        if output_path.file_name().is_none() {
            return Err(ReelError::output("output path has no file name", output_path));
        }
        let parent = match output_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        if !parent.is_dir() {
            return Err(ReelError::output("output directory does not exist", output_path));
        }
        Ok(())
    }

    /// The full ffmpeg argument list for encoding `timeline` to `output_path`.
    pub fn command_args(
        timeline: &Timeline,
        settings: &EncodeSettings,
        output_path: &Path,
    ) -> Vec<String> {
        let size = timeline.size();
        let mut args: Vec<String> = [
            "-y",
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pixel_format",
            "rgb24",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        args.extend([
            "-video_size".to_string(),
            format!("{}x{}", size.width, size.height),
            "-framerate".to_string(),
            timeline.fps().to_string(),
            "-i".to_string(),
            "-".to_string(),
            "-an".to_string(),
            "-c:v".to_string(),
            settings.codec.clone(),
            "-pix_fmt".to_string(),
            settings.pixel_format.clone(),
            "-threads".to_string(),
            settings.threads.to_string(),
            "-preset".to_string(),
            settings.preset.clone(),
            "-crf".to_string(),
            settings.crf.to_string(),
            "-movflags".to_string(),
            "+faststart".to_string(),
        ]);
        args.push(output_path.to_string_lossy().into_owned());
        args
    }

    /// Encode every frame of `timeline` to an H.264 MP4 at `output_path`,
    /// replacing any existing file.
    ///
    /// A failed encode removes whatever partial file ffmpeg left behind.
    pub fn encode(
        timeline: &Timeline,
        settings: &EncodeSettings,
        output_path: &Path,
    ) -> ReelResult<EncodeOutput> {
        Self::validate(timeline, settings, output_path)?;

        if !Self::is_available() {
            return Err(ReelError::Encode(
                "ffmpeg not found in PATH. Install FFmpeg: https://ffmpeg.org/download.html".into(),
            ));
        }

        match Self::run(timeline, settings, output_path) {
            Ok(frames) => {
                let file_size = std::fs::metadata(output_path)?.len();
                tracing::info!(
                    "Encoded {} frames to {} ({} @ {}fps, {} bytes)",
                    frames,
                    output_path.display(),
                    timeline.size(),
                    timeline.fps(),
                    file_size
                );
                Ok(EncodeOutput {
                    path: output_path.to_path_buf(),
                    frames,
                    file_size,
                })
            }
            Err(e) => {
                if output_path.exists() {
                    match std::fs::remove_file(output_path) {
                        Ok(()) => {
                            tracing::debug!("removed partial output {}", output_path.display())
                        }
                        Err(rm) => tracing::warn!(
                            "could not remove partial output {}: {}",
                            output_path.display(),
                            rm
                        ),
                    }
                }
                Err(e)
            }
        }
    }

    fn run(timeline: &Timeline, settings: &EncodeSettings, output_path: &Path) -> ReelResult<u64> {
        let args = Self::command_args(timeline, settings, output_path);
        tracing::info!("ffmpeg {}", args.join(" "));

        let mut child = Command::new("ffmpeg")
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ReelError::Encode(format!("failed to start ffmpeg: {}", e)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| ReelError::Encode("failed to open ffmpeg stdin".into()))?;

        let total = timeline.frame_count();
        let mut scratch = Vec::with_capacity(timeline.size().pixel_count() * 3);
        for index in 0..total {
            timeline.write_frame(index, &mut scratch)?;
            if let Err(e) = stdin.write_all(&scratch) {
                // A broken pipe means ffmpeg exited early; its stderr says why.
                drop(stdin);
                let stderr = child
                    .wait_with_output()
                    .map(|o| String::from_utf8_lossy(&o.stderr).trim().to_string())
                    .unwrap_or_default();
                return Err(ReelError::Encode(format!(
                    "failed to write frame {} to ffmpeg: {}. FFmpeg stderr: {}",
                    index, e, stderr
                )));
            }
        }

        // Close stdin to signal end of input
        drop(stdin);

        let output = child
            .wait_with_output()
            .map_err(|e| ReelError::Encode(format!("ffmpeg process error: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ReelError::Encode(format!(
                "ffmpeg failed with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_core::script::SceneTiming;
    use reel_core::{Clip, Color, FrameBuffer};

    fn timeline(width: u32, height: u32) -> Timeline {
        let clips = vec![
            Clip::new(
                "a",
                FrameBuffer::solid(width, height, &Color::rgb(200, 40, 40)),
                SceneTiming::seconds(0.5, 0.1, 0.1),
            ),
            Clip::new(
                "b",
                FrameBuffer::solid(width, height, &Color::rgb(40, 40, 200)),
                SceneTiming::seconds(0.5, 0.1, 0.2),
            ),
        ];
        Timeline::assemble(30, clips).unwrap()
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("reel_encode_{}_{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_ffmpeg_availability() {
        // Only checks the probe itself doesn't panic.
        let _available = FfmpegEncoder::is_available();
    }

    #[test]
    fn test_command_args() {
        let args = FfmpegEncoder::command_args(
            &timeline(64, 32),
            &EncodeSettings::default(),
            Path::new("/tmp/out.mp4"),
        );
        let joined = args.join(" ");
        assert!(joined.starts_with("-y "));
        assert!(joined.contains("-pixel_format rgb24 -video_size 64x32 -framerate 30 -i -"));
        assert!(joined.contains("-an"));
        assert!(joined.contains("-c:v libx264 -pix_fmt yuv420p -threads 4"));
        assert!(joined.contains("-crf 23"));
        assert_eq!(args.last().unwrap(), "/tmp/out.mp4");
    }

    #[test]
    fn test_audio_is_unsupported() {
        let settings = EncodeSettings {
            audio: true,
            ..EncodeSettings::default()
        };
        let err = FfmpegEncoder::encode(&timeline(64, 32), &settings, Path::new("out.mp4"))
            .unwrap_err();
        assert!(matches!(err, ReelError::Unsupported(_)));
    }

    #[test]
    fn test_odd_dimensions_rejected() {
        let err = FfmpegEncoder::validate(
            &timeline(65, 32),
            &EncodeSettings::default(),
            Path::new("out.mp4"),
        )
        .unwrap_err();
        assert!(matches!(err, ReelError::InvalidArgument(_)));
    }

    #[test]
    fn test_missing_output_directory() {
        let path = std::env::temp_dir().join("reel_encode_missing_dir/nested/out.mp4");
        let err = FfmpegEncoder::encode(&timeline(64, 32), &EncodeSettings::default(), &path)
            .unwrap_err();
        assert!(matches!(err, ReelError::Output { .. }));
        assert!(!path.exists());
        assert!(!path.parent().unwrap().exists(), "the directory is never created");
    }

    #[test]
    fn test_bare_file_name_uses_current_directory() {
        assert!(FfmpegEncoder::validate(
            &timeline(64, 32),
            &EncodeSettings::default(),
            Path::new("out.mp4"),
        )
        .is_ok());
    }

    #[test]
    fn test_failed_encode_leaves_no_file() {
        if !FfmpegEncoder::is_available() {
            return;
        }
        let dir = scratch_dir("bad_codec");
        let path = dir.join("broken.mp4");
        let settings = EncodeSettings {
            codec: "no-such-codec".into(),
            ..EncodeSettings::default()
        };
        assert!(FfmpegEncoder::encode(&timeline(64, 32), &settings, &path).is_err());
        assert!(!path.exists());
        std::fs::remove_dir_all(&dir).ok();
    }
}
