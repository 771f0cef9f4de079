//! Bounce Arcade headless runner
//!
//! Runs a session without a renderer: the simulation plays its demo for the
//! requested number of seconds, logging phase changes, then prints the final
//! snapshot as JSON.
//!
//! Usage: `bounce-arcade [MODE | SETTINGS.json] [SECONDS]`

use std::path::Path;
use std::process::ExitCode;

use bounce_arcade::sim::{GameEvent, GameState};
use bounce_arcade::{FixedStepDriver, GameConfig, GameMode, Settings};

const DEFAULT_SECONDS: f32 = 10.0;

fn settings_from_arg(arg: Option<&str>) -> Settings {
    match arg {
        None => Settings::default(),
        Some(arg) => match GameMode::from_str(arg) {
            Some(mode) => Settings {
                game: GameConfig::for_mode(mode),
                ..Settings::default()
            },
            None => Settings::load(Path::new(arg)),
        },
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let settings = settings_from_arg(args.first().map(String::as_str));
    let seconds = match args.get(1).map(|s| s.parse::<f32>()) {
        None => DEFAULT_SECONDS,
        Some(Ok(secs)) if secs >= 0.0 => secs,
        Some(_) => {
            log::error!("SECONDS must be a non-negative number");
            return ExitCode::FAILURE;
        }
    };

    let mut state = match GameState::new(settings.game.clone()) {
        Ok(state) => state,
        Err(err) => {
            log::error!("Could not start session: {err}");
            return ExitCode::FAILURE;
        }
    };

    log::info!("Bounce Arcade starting ({} for {seconds}s)", state.mode().as_str());

    let mut driver = FixedStepDriver::from_settings(&settings);
    let frame_dt = driver.sim_dt();
    let frames = (seconds / frame_dt).round() as u64;
    for _ in 0..frames {
        driver.advance(&mut state, frame_dt);
        for event in state.events() {
            match event {
                GameEvent::LevelLoaded { level } => log::debug!("Level {level} ready"),
                GameEvent::BrickDestroyed { value } => log::trace!("Brick worth {value} destroyed"),
                _ => {}
            }
        }
    }
    state.quit();

    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("Could not serialize snapshot: {err}");
            ExitCode::FAILURE
        }
    }
}
