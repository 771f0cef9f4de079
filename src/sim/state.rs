//! Game state and core simulation types
//!
//! `GameState` is the single owner of every body in the arena. External
//! callers submit pointer events and read `Snapshot`s; all mutation happens
//! inside `tick` or the explicit session operations below.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::autoplay::Autoplay;
use super::body::{Ball, BrickField, Paddle};
use super::input::{InputQueue, PointerEvent, PointerTracker};
use super::level::generate_level;
use super::rect::Rect;
use super::surface::AimLine;
use super::vector::rotate_degrees;
use crate::consts::{SERVE_ANGLE_MAX, SERVE_ANGLE_MIN};
use crate::error::SimResult;
use crate::settings::{GameConfig, GameMode};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Autoplay, nothing is scored
    Demo,
    /// Start prompt is showing; autoplay keeps running behind it
    AwaitingStart,
    /// Player in control, scoring active
    Playing,
    /// Every brick is gone; the next tick loads a fresh grid
    LevelCleared,
    /// Final scores are kept until the next start confirmation
    GameOver,
}

impl GamePhase {
    /// Phases in which the start prompt accepts a confirmation
    pub fn accepts_start(&self) -> bool {
        matches!(self, GamePhase::AwaitingStart | GamePhase::GameOver)
    }
}

/// Things that happened during the last tick, for audio/visual feedback
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BallServed,
    PaddleHit { paddle: usize },
    WallHit,
    BrickDestroyed { value: u32 },
    BallMissed { missed: u32 },
    PointScored { paddle: usize, score: u32 },
    LevelLoaded { level: u32 },
    PhaseChanged { from: GamePhase, to: GamePhase },
}

/// Read-only view of a paddle for renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaddleView {
    pub rect: Rect,
    pub score: u32,
    pub missed_balls: u32,
}

/// Read-only view of a live brick for renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickView {
    pub rect: Rect,
    pub color: u8,
    pub value: u32,
}

/// Immutable copy of everything a renderer draws
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub elapsed: f32,
    pub mode: GameMode,
    pub phase: GamePhase,
    pub level: u32,
    pub arena: Rect,
    pub ball: Rect,
    pub ball_vel: Vec2,
    pub paddles: Vec<PaddleView>,
    pub bricks: Vec<BrickView>,
    pub aim: Option<AimLine>,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) config: GameConfig,
    pub(crate) mode: GameMode,
    pub(crate) phase: GamePhase,
    pub(crate) arena: Rect,
    pub(crate) ball: Ball,
    /// One paddle for breakout and aim, `[left, right]` for pong
    pub(crate) paddles: Vec<Paddle>,
    pub(crate) bricks: BrickField,
    pub(crate) autoplay: Autoplay,
    /// Levels cleared plus one
    pub(crate) level: u32,
    /// Simulation tick counter
    pub(crate) time_ticks: u64,
    /// Ticks spent in the current phase
    pub(crate) phase_ticks: u64,
    /// Accumulated simulated time in seconds
    pub(crate) elapsed: f32,
    /// Bounce-direction line (aim mode, while a pointer is down)
    pub(crate) aim: Option<AimLine>,
    /// Events emitted by the last tick or session operation
    pub(crate) events: Vec<GameEvent>,
    pub(crate) input: InputQueue,
    pub(crate) pointers: PointerTracker,
    rng: Pcg32,
    running: bool,
}

impl GameState {
    /// Create a session: build bodies, load the first level, serve
    pub fn new(config: GameConfig) -> SimResult<Self> {
        config.validate()?;

        let arena = Rect::new(0.0, 0.0, config.arena_width, config.arena_height);
        let paddles = Self::spawn_paddles(&config, &arena);
        let phase = match config.mode {
            GameMode::Aim => GamePhase::Playing,
            GameMode::Breakout | GameMode::Pong => GamePhase::Demo,
        };

        let mut state = Self {
            mode: config.mode,
            phase,
            arena,
            ball: Ball::new(config.ball_size),
            paddles,
            bricks: BrickField::default(),
            autoplay: Autoplay::new(),
            level: 1,
            time_ticks: 0,
            phase_ticks: 0,
            elapsed: 0.0,
            aim: None,
            events: Vec::new(),
            input: InputQueue::default(),
            pointers: PointerTracker::default(),
            rng: Pcg32::seed_from_u64(config.seed),
            running: true,
            config,
        };

        if state.mode.has_bricks() {
            state.load_level()?;
        }
        if state.mode != GameMode::Aim {
            state.serve_ball();
        }

        log::info!(
            "New {} session (seed {:#x}, arena {}x{})",
            state.mode.as_str(),
            state.config.seed,
            state.arena.width,
            state.arena.height
        );

        Ok(state)
    }

    fn spawn_paddles(config: &GameConfig, arena: &Rect) -> Vec<Paddle> {
        let center = arena.center();
        match config.mode {
            GameMode::Breakout | GameMode::Aim => {
                let y = arena.y + config.paddle_floor_gap;
                let x = center.x - config.paddle_width / 2.0;
                vec![Paddle::new(Rect::new(
                    x,
                    y,
                    config.paddle_width,
                    config.paddle_height,
                ))]
            }
            GameMode::Pong => {
                let w = config.pong_paddle_width;
                let h = config.pong_paddle_height;
                let y = center.y - h / 2.0;
                vec![
                    Paddle::new(Rect::new(arena.x, y, w, h)),
                    Paddle::new(Rect::new(arena.right() - w, y, w, h)),
                ]
            }
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn arena(&self) -> &Rect {
        &self.arena
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn paddles(&self) -> &[Paddle] {
        &self.paddles
    }

    /// The single player paddle (breakout/aim) or the left paddle (pong)
    pub fn player(&self) -> &Paddle {
        &self.paddles[0]
    }

    pub(crate) fn player_mut(&mut self) -> &mut Paddle {
        &mut self.paddles[0]
    }

    pub fn bricks(&self) -> &BrickField {
        &self.bricks
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Simulated seconds since the session started
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn aim(&self) -> Option<&AimLine> {
        self.aim.as_ref()
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(crate) fn set_phase(&mut self, phase: GamePhase) {
        if self.phase == phase {
            return;
        }
        log::info!("Phase {:?} -> {:?} (tick {})", self.phase, phase, self.time_ticks);
        self.emit(GameEvent::PhaseChanged {
            from: self.phase,
            to: phase,
        });
        self.phase = phase;
        self.phase_ticks = 0;
    }

    /// Put the ball back in play with a random direction.
    ///
    /// Breakout serves upward from the top of the paddle at a speed scaled
    /// to the arena; pong serves from the arena center in any direction.
    pub(crate) fn serve_ball(&mut self) {
        match self.mode {
            GameMode::Breakout | GameMode::Aim => {
                let paddle = self.paddles[0].rect;
                let h = self.ball.rect.height;
                self.ball
                    .rect
                    .set_center(Vec2::new(paddle.center().x, paddle.top() + h / 2.0));
                let degrees = self.rng.random_range(SERVE_ANGLE_MIN..=SERVE_ANGLE_MAX);
                let speed = self.arena.width.min(self.arena.height) * self.config.serve_speed_scale;
                self.ball.vel = rotate_degrees(Vec2::new(speed, 0.0), degrees as f32);
            }
            GameMode::Pong => {
                self.ball.rect.set_center(self.arena.center());
                let degrees = self.rng.random_range(0..=360);
                self.ball.vel =
                    rotate_degrees(Vec2::new(self.config.pong_serve_speed, 0.0), degrees as f32);
            }
        }
        log::trace!("Served ball with velocity {}", self.ball.vel);
        self.emit(GameEvent::BallServed);
    }

    /// Replace the brick grid with a freshly generated one
    pub(crate) fn load_level(&mut self) -> SimResult<()> {
        let bricks = generate_level(&self.arena, &self.config.level)?;
        log::info!("Level {} loaded with {} bricks", self.level, bricks.len());
        self.bricks.replace(bricks);
        self.emit(GameEvent::LevelLoaded { level: self.level });
        Ok(())
    }

    /// Reload the grid and re-serve after it has been cleared
    pub(crate) fn refill_level(&mut self) -> SimResult<()> {
        self.load_level()?;
        self.serve_ball();
        Ok(())
    }

    /// Restore the first level, then zero scores and misses
    pub fn reset_game(&mut self) -> SimResult<()> {
        self.level = 1;
        if self.mode.has_bricks() {
            self.load_level()?;
        }
        for paddle in &mut self.paddles {
            paddle.reset_counters();
            paddle.collided = false;
        }
        Ok(())
    }

    /// Demo -> AwaitingStart. Returns false from any other phase.
    pub fn show_start_prompt(&mut self) -> bool {
        if self.phase != GamePhase::Demo {
            return false;
        }
        self.events.clear();
        self.open_prompt();
        true
    }

    /// Prompt transition shared with the tick's automatic prompt
    pub(crate) fn open_prompt(&mut self) {
        self.set_phase(GamePhase::AwaitingStart);
    }

    /// Start a game from the prompt: reset counters and level, serve, play.
    ///
    /// Accepted while the prompt is up (`AwaitingStart` or `GameOver`).
    /// Fails without leaving the prompt if the level cannot be built.
    pub fn confirm_start(&mut self) -> SimResult<bool> {
        if !self.running || self.mode == GameMode::Aim || !self.phase.accepts_start() {
            return Ok(false);
        }
        self.events.clear();
        self.reset_game()?;
        self.serve_ball();
        self.set_phase(GamePhase::Playing);
        Ok(true)
    }

    /// End the session; later ticks are no-ops
    pub fn quit(&mut self) {
        if self.running {
            log::info!("Session stopped after {} ticks", self.time_ticks);
        }
        self.running = false;
    }

    pub fn pointer_down(&mut self, id: u64, x: f32, y: f32) {
        self.input.push(PointerEvent::Down {
            id,
            pos: Vec2::new(x, y),
        });
    }

    pub fn pointer_move(&mut self, id: u64, x: f32, y: f32) {
        self.input.push(PointerEvent::Move {
            id,
            pos: Vec2::new(x, y),
        });
    }

    pub fn pointer_up(&mut self, id: u64) {
        self.input.push(PointerEvent::Up { id });
    }

    /// Copy of the observable state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.time_ticks,
            elapsed: self.elapsed,
            mode: self.mode,
            phase: self.phase,
            level: self.level,
            arena: self.arena,
            ball: self.ball.rect,
            ball_vel: self.ball.vel,
            paddles: self
                .paddles
                .iter()
                .map(|p| PaddleView {
                    rect: p.rect,
                    score: p.score,
                    missed_balls: p.missed_balls,
                })
                .collect(),
            bricks: self
                .bricks
                .iter()
                .map(|b| BrickView {
                    rect: b.rect,
                    color: b.color,
                    value: b.value,
                })
                .collect(),
            aim: self.aim,
        }
    }
}
