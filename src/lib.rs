//! Bounce Arcade - rectangle-bounce arcade simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, bounces, game state machine)
//! - `driver`: Fixed-timestep accumulator for an external frame loop
//! - `settings`: Data-driven game configuration
//! - `error`: Error kinds shared by the above

pub mod driver;
pub mod error;
pub mod settings;
pub mod sim;

pub use driver::FixedStepDriver;
pub use error::{SimError, SimResult};
pub use settings::{GameConfig, GameMode, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default arena size
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 20.0;

    /// Breakout paddle
    pub const PADDLE_WIDTH: f32 = 120.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    /// Gap between the arena floor and the breakout paddle
    pub const PADDLE_FLOOR_GAP: f32 = 20.0;

    /// Pong paddles (vertical)
    pub const PONG_PADDLE_WIDTH: f32 = 25.0;
    pub const PONG_PADDLE_HEIGHT: f32 = 200.0;

    /// Serve speed as a fraction of the shorter arena side (breakout)
    pub const SERVE_SPEED_SCALE: f32 = 0.0067;
    /// Serve speed in units per tick (pong)
    pub const PONG_SERVE_SPEED: f32 = 4.0;
    /// Breakout serve angle range (degrees from +x)
    pub const SERVE_ANGLE_MIN: i32 = 15;
    pub const SERVE_ANGLE_MAX: i32 = 165;

    /// Two-paddle spin bounce
    pub const PONG_SPEEDUP: f32 = 1.1;
    pub const PONG_SPIN_FACTOR: f32 = 0.02;

    /// Autoplay follows at this fraction of ball speed, enough to keep up
    /// with balls no shallower than ~55 degrees from vertical
    pub const FOLLOW_SPEED_FACTOR: f32 = 0.57;

    /// Brick grid
    pub const LEVEL_WIDTH: u32 = 8;
    pub const LEVEL_HEIGHT: u32 = 5;
    pub const GRID_PADDING: f32 = 2.0;
    pub const CELL_PADDING: f32 = 2.0;
    pub const BRICK_COLORS: u32 = 5;

    /// Game-ending thresholds
    pub const MAX_MISSES: u32 = 3;
    pub const WIN_SCORE: u32 = 5;

    /// Demo runs this long before the start prompt appears (2 seconds)
    pub const START_PROMPT_DELAY_TICKS: u32 = 120;

    /// Normal used when the surface vector degenerates to zero
    pub const DEFAULT_NORMAL: (f32, f32) = (0.0, 1.0);
}
