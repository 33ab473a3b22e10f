//! Rock Belt headless runner
//!
//! Plays one game on autopilot with no window or audio attached, logging
//! sound events and a final summary. Usage:
//!
//! ```text
//! rock-belt [settings.json] [seconds]
//! ```

use std::process::ExitCode;

use env_logger::Env;

use rock_belt::consts::TICKS_PER_SECOND;
use rock_belt::sim::{GameEvent, LogSink};
use rock_belt::{EventSink, Settings, TickInput, TickOutcome, World, tick};

const DEFAULT_SECONDS: u64 = 120;

/// Forwards every event to the log and keeps a few tallies
#[derive(Default)]
struct Tally {
    log: LogSink,
    shots: u32,
    rocks: u32,
    deaths: u32,
}

impl EventSink for Tally {
    fn emit(&mut self, event: GameEvent) {
        match event {
            GameEvent::PlayerFired => self.shots += 1,
            GameEvent::AsteroidExploded { .. } => self.rocks += 1,
            GameEvent::PlayerDestroyed => self.deaths += 1,
            GameEvent::LevelStarted { level } => log::info!("Level {level}"),
            _ => {}
        }
        self.log.emit(event);
    }
}

fn load_settings(path: Option<&str>) -> Result<Settings, String> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    let json = std::fs::read_to_string(path).map_err(|e| format!("{path}: {e}"))?;
    Settings::from_json(&json).map_err(|e| format!("{path}: {e}"))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    log::info!("Rock Belt (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let settings = match load_settings(args.first().map(String::as_str)) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Failed to load settings: {e}");
            return ExitCode::FAILURE;
        }
    };
    let seconds = match args.get(1).map(|s| s.parse::<u64>()) {
        None => DEFAULT_SECONDS,
        Some(Ok(seconds)) => seconds,
        Some(Err(e)) => {
            log::error!("Bad duration {:?}: {e}", args[1]);
            return ExitCode::FAILURE;
        }
    };

    let mut world = match World::new(settings) {
        Ok(world) => world,
        Err(e) => {
            log::error!("Invalid settings: {e}");
            return ExitCode::FAILURE;
        }
    };

    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    let mut tally = Tally::default();
    let max_ticks = seconds * u64::from(TICKS_PER_SECOND);

    while world.time_ticks < max_ticks && !world.is_game_over() {
        if tick(&mut world, &input, &mut tally) == TickOutcome::Quit {
            break;
        }
    }

    let hud = world.snapshot().hud;
    log::info!(
        "Finished after {} ticks: score {}, level {}, lives {}{}",
        world.time_ticks,
        hud.score,
        hud.level,
        hud.lives,
        if hud.game_over { " (game over)" } else { "" }
    );
    log::info!(
        "{} shots fired, {} asteroids broken, {} deaths",
        tally.shots,
        tally.rocks,
        tally.deaths
    );
    ExitCode::SUCCESS
}
