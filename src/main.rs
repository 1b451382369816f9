//! Gaze Snake entry point
//!
//! Runs a headless session: a scripted face stands in for the webcam and the
//! face-mesh model, the game loop runs for a fixed duration, and a JSON
//! summary is printed at the end.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use gaze_snake::gaze::{FrameSize, GazeTracker};
use gaze_snake::platform::{GazeScript, ScriptedCamera, ScriptedFace, SystemClock};
use gaze_snake::{GrowthPolicy, Session, Settings, ThresholdPreset};

#[derive(Parser)]
#[command(name = "gaze-snake")]
#[command(version, about = "Snake steered by calibrated gaze direction")]
struct Cli {
    /// Settings JSON file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Write the effective settings to this file and exit
    #[arg(long)]
    write_settings: Option<PathBuf>,

    /// RNG seed (overrides settings)
    #[arg(long)]
    seed: Option<u64>,

    /// Threshold preset: standard or relaxed
    #[arg(long)]
    preset: Option<String>,

    /// Spread bonus growth over several moves instead of one
    #[arg(long)]
    accumulate_growth: bool,

    /// Session length in seconds
    #[arg(long, default_value = "20")]
    duration: u64,

    /// Gaze script, e.g. "40:center,60:right,20:none,60:down"
    #[arg(long)]
    script: Option<GazeScript>,

    /// Simulate a camera that fails to open (keyboard-only fallback)
    #[arg(long)]
    no_camera: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut settings = match &cli.settings {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(name) = &cli.preset {
        let preset = ThresholdPreset::from_str(name)
            .with_context(|| format!("unknown threshold preset '{name}'"))?;
        settings.apply_preset(preset);
    }
    if cli.accumulate_growth {
        settings.growth = GrowthPolicy::Accumulate;
    }
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }
    settings.validate()?;

    if let Some(path) = &cli.write_settings {
        settings.save(path)?;
        return Ok(());
    }

    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!(
        "Gaze Snake starting (seed {seed}, thresholds {}: {}x{} px)",
        settings.preset.as_str(),
        settings.threshold_x,
        settings.threshold_y
    );

    let camera = if cli.no_camera {
        ScriptedCamera::unavailable()
    } else {
        ScriptedCamera::new(FrameSize::default())
    };
    let face = ScriptedFace::new(cli.script.unwrap_or_default(), settings.mirror_camera);

    let mut tracker = match GazeTracker::start(camera, face, &settings) {
        Ok(tracker) => Some(tracker),
        Err(e) => {
            log::warn!("{e}; continuing with keyboard control only");
            None
        }
    };

    let mut session = Session::new(&settings, seed, tracker.as_ref().map(|t| t.shared()));
    let summary = session.run(&SystemClock::new(), Duration::from_secs(cli.duration));

    if let Some(tracker) = tracker.as_mut() {
        tracker.stop();
    }

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
