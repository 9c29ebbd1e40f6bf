//! Roid Rush headless runner
//!
//! Drives the simulation with a scripted autopilot and reports how the run
//! went. Usage: `roid-rush [TUNING.json] [--seed N] [--frames N]`

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use roid_rush::Tuning;
use roid_rush::renderer::DrawList;
use roid_rush::sim::{Control, ControlState, FrameDriver, GamePhase, TickInput};

const DEFAULT_FRAMES: u64 = 60 * 60;

#[derive(Parser, Debug)]
#[command(name = "roid-rush")]
#[command(about = "Run the asteroid simulation headless under a scripted pilot")]
struct Cli {
    /// Tuning JSON file; built-in defaults when omitted
    tuning: Option<PathBuf>,
    /// Session seed
    #[arg(long, default_value_t = 0x5eed)]
    seed: u64,
    /// Number of frames to simulate
    #[arg(long, default_value_t = DEFAULT_FRAMES)]
    frames: u64,
}

/// Scripted player: spins, thrusts in bursts, taps fire
#[derive(Debug, Default)]
struct Autopilot {
    frame: u64,
    controls: ControlState,
}

impl Autopilot {
    fn next_input(&mut self) -> TickInput {
        self.frame += 1;
        self.controls.end_frame();

        self.controls.press(Control::TurnLeft);
        if self.frame % 120 < 30 {
            self.controls.press(Control::Forward);
        } else {
            self.controls.release(Control::Forward);
        }
        // Release and re-press so fire produces an edge every other frame
        if self.frame % 2 == 0 {
            self.controls.press(Control::Fire);
        } else {
            self.controls.release(Control::Fire);
        }

        TickInput::sample(&self.controls)
    }
}

#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    frames: u64,
    level: u32,
    score: u32,
    lives: i32,
    asteroids: usize,
    bullets: usize,
    phase: String,
    draw_calls: usize,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    log::info!("Roid Rush (headless) starting...");

    let cli = Cli::parse();
    let tuning = match &cli.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    let (seed, frames) = (cli.seed, cli.frames);

    let mut driver = FrameDriver::new(tuning, seed);
    let mut pilot = Autopilot::default();
    let mut surface = DrawList::new();
    let mut last_phase = driver.phase();

    for _ in 0..frames {
        let input = pilot.next_input();
        let phase = driver.step(&input);
        if std::mem::discriminant(&phase) != std::mem::discriminant(&last_phase) {
            log::info!(
                "frame {}: {:?} (score {}, lives {})",
                pilot.frame,
                phase,
                driver.session().score,
                driver.session().lives
            );
            last_phase = phase;
        }

        surface.clear();
        driver.render(&mut surface);
    }

    let session = driver.session();
    let summary = RunSummary {
        seed,
        frames,
        level: driver.level() + 1,
        score: session.score,
        lives: session.lives,
        asteroids: session.asteroid_count(),
        bullets: session.bullet_count(),
        phase: match driver.phase() {
            GamePhase::Title => "title",
            GamePhase::LevelStart { .. } => "level_start",
            GamePhase::Playing => "playing",
            GamePhase::GameOver { .. } => "game_over",
        }
        .to_string(),
        draw_calls: surface.commands.len(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
