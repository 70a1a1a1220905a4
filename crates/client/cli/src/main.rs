//! Headless encounter simulator.
//!
//! Loads a scene and tuning from a data directory, drives the session with a
//! scripted player and prints what happened.
//! Run with: `dread-sim --scene manor --seed 7 --duration 120`

mod autopilot;
mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use game_content::{ConfigLoader, ContentFactory, SceneLoader};
use game_core::{ChanceJudge, SeededRandom};
use runtime::{DEFAULT_STEP, Session};

use autopilot::Autopilot;
use output::OutputFormat;

/// Salt that keeps the player's and the judge's random streams apart from the session's.
const AUTOPILOT_SALT: u64 = 0x5EED_A11C;
const JUDGE_SALT: u64 = 0x5EED_C0DE;

/// Headless stealth-horror encounter simulator
#[derive(Parser)]
#[command(name = "dread-sim")]
#[command(about = "Simulate an adversary encounter without a renderer", long_about = None)]
#[command(version)]
struct Cli {
    /// Data directory holding `config.toml` and `scenes/`
    #[arg(
        short,
        long,
        value_name = "DIR",
        default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/data")
    )]
    data_dir: PathBuf,

    /// Scene name under `<data-dir>/scenes/`
    #[arg(short, long, default_value = "manor")]
    scene: String,

    /// Scene file to load instead of a named scene
    #[arg(long, value_name = "FILE", conflicts_with = "scene")]
    scene_file: Option<PathBuf>,

    /// Tuning file (defaults to `<data-dir>/config.toml`)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed for every random branch
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Simulated seconds to run
    #[arg(long, default_value_t = 60.0)]
    duration: f32,

    /// Fixed simulation step in seconds
    #[arg(long, default_value_t = DEFAULT_STEP)]
    dt: f32,

    /// Variable frame time fed to the fixed-step clock
    #[arg(long, default_value_t = 1.0 / 30.0)]
    frame: f32,

    /// Chance that the scripted player passes a skill check
    #[arg(long, default_value_t = 0.75)]
    skill: f32,

    /// Seconds the scripted player lingers on a node
    #[arg(long, default_value_t = 1.5)]
    patience: f32,

    /// Times (seconds) at which the adversary is disabled
    #[arg(long, value_name = "SECONDS", value_delimiter = ',')]
    disable_at: Vec<f32>,

    /// Stop as soon as the player is caught
    #[arg(long)]
    stop_on_caught: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

impl Cli {
    fn execute(self) -> Result<()> {
        anyhow::ensure!(self.frame > 0.0, "--frame must be positive, got {}", self.frame);

        let factory = ContentFactory::new(&self.data_dir);
        let scene = match &self.scene_file {
            Some(path) => SceneLoader::load(path)?,
            None => factory
                .load_scene(&self.scene)
                .with_context(|| format!("Failed to load scene '{}'", self.scene))?,
        };
        let config = match &self.config {
            Some(path) => ConfigLoader::load(path)?,
            None => factory.load_config()?,
        };

        let mut session = Session::builder(scene)
            .config(config)
            .seed(self.seed)
            .step(self.dt)?
            .build()?;
        let mut judge =
            ChanceJudge::new(self.skill, 0.4, SeededRandom::new(self.seed ^ JUDGE_SALT));
        let mut pilot = Autopilot::new(self.seed ^ AUTOPILOT_SALT, self.patience);

        let mut disables = self.disable_at.clone();
        disables.sort_by(f32::total_cmp);
        let mut disables = disables.into_iter().peekable();

        let mut timeline = Vec::new();
        while session.elapsed() < self.duration {
            let mut input = pilot.decide(&session, self.frame);
            if disables.next_if(|&at| at <= session.elapsed()).is_some() {
                input = input.with_disable(0.0);
            }

            let reports = session.advance(self.frame, &input, &mut judge);
            timeline.extend(reports.iter().flat_map(output::timeline_entries));
            if self.stop_on_caught && session.outcome().is_some() {
                break;
            }
        }

        tracing::info!(
            ticks = session.ticks(),
            elapsed = session.elapsed(),
            caught = session.outcome().is_some(),
            "Simulation finished"
        );
        output::print(&session.summary(), &timeline, self.format)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    Cli::parse().execute()
}
