//! Game settings and tuning
//!
//! Loaded from a JSON file; every field falls back to its default, and a
//! missing or unreadable file falls back to the default settings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{SimError, SimResult};
use crate::sim::level::LevelLayout;

/// Which arcade variant a session runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// One horizontal paddle, brick grid, three lives
    #[default]
    Breakout,
    /// Two vertical paddles, first to the win score
    Pong,
    /// Static paddle with a pointer-driven bounce-direction line
    Aim,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Breakout => "breakout",
            GameMode::Pong => "pong",
            GameMode::Aim => "aim",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "breakout" | "bricks" => Some(GameMode::Breakout),
            "pong" => Some(GameMode::Pong),
            "aim" | "bounce-vector" => Some(GameMode::Aim),
            _ => None,
        }
    }

    /// Whether the mode has a brick grid
    pub fn has_bricks(&self) -> bool {
        matches!(self, GameMode::Breakout)
    }
}

/// Simulation tuning for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub mode: GameMode,
    /// Seed for the serve-angle RNG
    pub seed: u64,

    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Bodies ===
    pub ball_size: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_floor_gap: f32,
    pub pong_paddle_width: f32,
    pub pong_paddle_height: f32,

    // === Serve ===
    /// Breakout serve speed as a fraction of the shorter arena side
    pub serve_speed_scale: f32,
    /// Pong serve speed (units per tick)
    pub pong_serve_speed: f32,

    // === Two-paddle bounce ===
    pub speedup: f32,
    pub spin_factor: f32,

    // === Progress ===
    pub level: LevelLayout,
    pub max_misses: u32,
    pub win_score: u32,
    /// Demo ticks before the start prompt is shown (0 = wait for an explicit call)
    pub start_prompt_delay_ticks: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::Breakout,
            seed: 0x5eed,

            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            ball_size: BALL_SIZE,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_floor_gap: PADDLE_FLOOR_GAP,
            pong_paddle_width: PONG_PADDLE_WIDTH,
            pong_paddle_height: PONG_PADDLE_HEIGHT,

            serve_speed_scale: SERVE_SPEED_SCALE,
            pong_serve_speed: PONG_SERVE_SPEED,

            speedup: PONG_SPEEDUP,
            spin_factor: PONG_SPIN_FACTOR,

            level: LevelLayout::default(),
            max_misses: MAX_MISSES,
            win_score: WIN_SCORE,
            start_prompt_delay_ticks: START_PROMPT_DELAY_TICKS,
        }
    }
}

impl GameConfig {
    /// Defaults for the given mode
    pub fn for_mode(mode: GameMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> SimResult<()> {
        if !(self.arena_width > 0.0 && self.arena_height > 0.0) {
            return Err(SimError::InvalidSettings(format!(
                "arena must have a positive size, got {}x{}",
                self.arena_width, self.arena_height
            )));
        }
        if self.ball_size <= 0.0 {
            return Err(SimError::InvalidSettings("ball_size must be positive".into()));
        }
        if self.mode == GameMode::Pong && self.win_score == 0 {
            return Err(SimError::InvalidSettings("win_score must be positive".into()));
        }
        if self.mode == GameMode::Breakout && self.max_misses == 0 {
            return Err(SimError::InvalidSettings("max_misses must be positive".into()));
        }
        if self.mode.has_bricks() {
            self.level.validate()?;
        }
        Ok(())
    }
}

/// Top-level settings file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub game: GameConfig,
    /// Simulation rate in ticks per second
    pub tick_rate: u32,
    /// Upper bound on ticks run for a single frame
    pub max_substeps: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            tick_rate: (1.0 / SIM_DT).round() as u32,
            max_substeps: MAX_SUBSTEPS,
        }
    }
}

impl Settings {
    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> SimResult<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.tick_rate == 0 {
            return Err(SimError::InvalidSettings("tick_rate must be positive".into()));
        }
        if self.max_substeps == 0 {
            return Err(SimError::InvalidSettings("max_substeps must be positive".into()));
        }
        self.game.validate()
    }

    /// Read settings from `path`
    pub fn read(path: &Path) -> SimResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Read settings from `path`, falling back to defaults on any error
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("{err}; using default settings");
                Self::default()
            }
        }
    }

    /// Fixed timestep in seconds
    pub fn sim_dt(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_str() {
        assert_eq!(GameMode::from_str("Pong"), Some(GameMode::Pong));
        assert_eq!(GameMode::from_str("bricks"), Some(GameMode::Breakout));
        assert_eq!(GameMode::from_str("tetris"), None);
        assert_eq!(GameMode::Aim.as_str(), "aim");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings =
            Settings::from_json(r#"{ "game": { "mode": "pong", "win_score": 7 } }"#).unwrap();
        assert_eq!(settings.game.mode, GameMode::Pong);
        assert_eq!(settings.game.win_score, 7);
        assert_eq!(settings.game.max_misses, MAX_MISSES);
        assert_eq!(settings.tick_rate, 60);
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = Settings::default();
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_zero_grid_rejected() {
        let err = Settings::from_json(r#"{ "game": { "level": { "width": 0 } } }"#).unwrap_err();
        assert!(matches!(err, SimError::InvalidLevel { width: 0, .. }));
    }

    #[test]
    fn test_zero_grid_ignored_without_bricks() {
        let json = r#"{ "game": { "mode": "pong", "level": { "width": 0 } } }"#;
        assert!(Settings::from_json(json).is_ok());
    }

    #[test]
    fn test_zero_misses_rejected_for_breakout() {
        let err = Settings::from_json(r#"{ "game": { "max_misses": 0 } }"#).unwrap_err();
        assert!(matches!(err, SimError::InvalidSettings(_)));

        let json = r#"{ "game": { "mode": "pong", "max_misses": 0 } }"#;
        assert!(Settings::from_json(json).is_ok());
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            Settings::from_json("{ nope"),
            Err(SimError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let settings = Settings::load(Path::new("/nonexistent/bounce-arcade.json"));
        assert_eq!(settings, Settings::default());
    }
}
