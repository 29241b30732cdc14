use std::backtrace::{Backtrace, BacktraceStatus};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;

use reel_core::hash::{hash_frame, ContentHash};
use reel_core::{FrameBuffer, ReelConfig, Size, Timeline};
use reel_encode::{probe, FfmpegEncoder, VideoInfo};
use reel_render::{still, FontResolver, SceneKind};

#[derive(Parser)]
#[command(
    name = "reel",
    version,
    about = "Reel: renders the Synapse AI promo video",
    long_about = "Renders six still scenes (hook, logo, terminal, chat, chart, closing),\nchains them with fades and encodes a 1080p H.264 MP4 through ffmpeg.\n\nAll content is built in; no arguments are required."
)]
struct Cli {
    /// Output file path (default: ./synapse-ai-demo.mp4). Its directory must exist.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write every scene as NN-<scene>.png into this existing directory
    #[arg(long, value_name = "DIR")]
    stills: Option<PathBuf>,

    /// Probe the exported file and fail if its frame count or resolution is off
    #[arg(long)]
    verify: bool,

    /// Print the run summary as JSON on stdout; progress and logs go to stderr
    #[arg(long)]
    json: bool,
}

/// Per-scene entry of the run summary.
#[derive(Serialize)]
struct SceneSummary {
    label: &'static str,
    title: &'static str,
    duration_secs: f64,
    fade_in_secs: f64,
    fade_out_secs: f64,
    hash: ContentHash,
}

#[derive(Serialize)]
struct RunSummary {
    output: PathBuf,
    resolution: Size,
    fps: u32,
    duration_secs: f64,
    frames: u64,
    file_size: u64,
    scenes: Vec<SceneSummary>,
    stills: Vec<PathBuf>,
    verified: Option<VideoInfo>,
    elapsed_secs: f64,
}

/// Human-readable progress. Goes to stderr when stdout carries JSON.
struct Progress {
    json: bool,
}

impl Progress {
    fn line(&self, message: impl AsRef<str>) {
        if self.json {
            eprintln!("{}", message.as_ref());
        } else {
            println!("{}", message.as_ref());
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt().with_env_filter(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    );

    if cli.json {
        // Keep stdout pure JSON.
        subscriber
            .with_ansi(false)
            .with_writer(std::io::stderr)
            .init();
    } else {
        subscriber.with_writer(std::io::stderr).init();
    }

    let summary = match cmd_generate(&cli) {
        Ok(summary) => summary,
        Err(err) => {
            report(&err);
            std::process::exit(1);
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}

/// Write a failure to stderr: message, cause chain and a stack trace.
/// The trace is captured here when the error did not carry one.
fn report(err: &anyhow::Error) {
    eprintln!("Error: {}", err);
    for cause in err.chain().skip(1) {
        eprintln!("Caused by: {}", cause);
    }
    let backtrace = err.backtrace();
    if backtrace.status() == BacktraceStatus::Captured {
        eprintln!("\nstack backtrace:\n{}", backtrace);
    } else {
        eprintln!("\nstack backtrace:\n{}", Backtrace::force_capture());
    }
}

fn cmd_generate(cli: &Cli) -> Result<RunSummary> {
    let started = Instant::now();
    let progress = Progress { json: cli.json };

    let mut config =
        ReelConfig::canonical().context("failed to build the built-in configuration")?;
    if let Some(output) = &cli.output {
        config = config.with_output_path(output);
    }
    let output_path = config.output_path();

    // Fail before spending time on rendering.
    FfmpegEncoder::check_output_path(&output_path)
        .with_context(|| format!("cannot write {}", output_path.display()))?;
    if !FfmpegEncoder::is_available() {
        bail!("ffmpeg not found in PATH. Install FFmpeg: https://ffmpeg.org/download.html");
    }

    progress.line("🎬 Reel promo render");
    progress.line(format!("   Output:     {}", output_path.display()));
    progress.line(format!(
        "   Resolution: {} @ {}fps",
        config.resolution, config.fps
    ));

    let mut fonts = FontResolver::new();
    let mut clips = Vec::with_capacity(SceneKind::ALL.len());
    let mut scenes = Vec::with_capacity(SceneKind::ALL.len());
    for (i, kind) in SceneKind::ALL.into_iter().enumerate() {
        progress.line(format!(
            "   [{}/{}] Rendering {}...",
            i + 1,
            SceneKind::ALL.len(),
            kind.title()
        ));
        let scene_start = Instant::now();
        let clip = kind
            .clip(&config, &mut fonts)
            .with_context(|| format!("failed to render the {} scene", kind))?;
        let hash = hash_frame(&clip.frame);
        progress.line(format!(
            "   ✓ {} in {:.1}ms ({})",
            kind,
            scene_start.elapsed().as_secs_f64() * 1000.0,
            hash.short()
        ));
        scenes.push(SceneSummary {
            label: kind.label(),
            title: kind.title(),
            duration_secs: clip.duration.as_seconds(),
            fade_in_secs: clip.fade_in.as_seconds(),
            fade_out_secs: clip.fade_out.as_seconds(),
            hash,
        });
        clips.push(clip);
    }

    let stills = match &cli.stills {
        Some(dir) => {
            let frames: Vec<(SceneKind, &FrameBuffer)> = SceneKind::ALL
                .into_iter()
                .zip(clips.iter().map(|c| &c.frame))
                .collect();
            let written = still::write_stills(dir, &frames)
                .with_context(|| format!("failed to write stills to {}", dir.display()))?;
            progress.line(format!("   ✓ Wrote {} stills to {}", written.len(), dir.display()));
            written
        }
        None => Vec::new(),
    };

    let timeline =
        Timeline::assemble(config.fps, clips).context("failed to assemble the timeline")?;
    progress.line(format!(
        "   ✓ Timeline: {} clips, {} frames, {}",
        timeline.clips().len(),
        timeline.frame_count(),
        timeline.duration()
    ));

    progress.line("   Encoding with ffmpeg...");
    let encode_start = Instant::now();
    let encoded = FfmpegEncoder::encode(&timeline, &config.encode, &output_path)
        .with_context(|| format!("failed to export {}", output_path.display()))?;
    progress.line(format!(
        "   ✓ Encoded in {:.1}s",
        encode_start.elapsed().as_secs_f64()
    ));

    let verified = if cli.verify {
        let info = verify(&output_path, &timeline)?;
        progress.line(format!(
            "   ✓ Verified: {} frames at {}x{}",
            info.frame_count, info.width, info.height
        ));
        Some(info)
    } else {
        None
    };

    let summary = RunSummary {
        output: encoded.path,
        resolution: timeline.size(),
        fps: timeline.fps(),
        duration_secs: timeline.duration().as_seconds(),
        frames: encoded.frames,
        file_size: encoded.file_size,
        scenes,
        stills,
        verified,
        elapsed_secs: started.elapsed().as_secs_f64(),
    };

    progress.line("");
    progress.line(format!(
        "✅ Video ready: {} ({}, {})",
        summary.output.display(),
        timeline.duration(),
        summary.resolution
    ));
    Ok(summary)
}

fn verify(path: &Path, timeline: &Timeline) -> Result<VideoInfo> {
    if !probe::is_available() {
        bail!("--verify needs ffprobe, which was not found in PATH");
    }
    let info = probe::probe_video(path)
        .with_context(|| format!("failed to probe {}", path.display()))?;
    info.verify_against(timeline)
        .with_context(|| format!("{} does not match the timeline", path.display()))?;
    Ok(info)
}
