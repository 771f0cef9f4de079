//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically. Resolution
//! order within a tick is fixed: ball motion, paddles, walls, then either
//! the scored play step or the demo step.

use super::autoplay::FollowAxis;
use super::input::apply_pending;
use super::state::{GameEvent, GamePhase, GameState};
use crate::settings::GameMode;

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, dt: f32) {
    if !state.is_running() {
        return;
    }

    state.events.clear();
    apply_pending(state);

    // The aim tool has no moving parts
    if state.mode != GameMode::Aim {
        if state.phase == GamePhase::LevelCleared {
            state.level += 1;
            if !refill_or_halt(state) {
                return;
            }
            state.set_phase(GamePhase::Playing);
        }

        state.ball.advance();
        bounce_paddles(state);
        bounce_walls(state);

        match state.phase {
            GamePhase::Playing => play_step(state),
            GamePhase::Demo | GamePhase::AwaitingStart | GamePhase::GameOver => demo_step(state),
            GamePhase::LevelCleared => {}
        }

        state.bricks.compact();
    }

    state.time_ticks += 1;
    state.phase_ticks += 1;
    state.elapsed += dt;

    let delay = state.config.start_prompt_delay_ticks;
    if state.phase == GamePhase::Demo && delay > 0 && state.phase_ticks >= u64::from(delay) {
        state.open_prompt();
    }
}

/// Load a fresh grid and re-serve. A grid that cannot be built stops the
/// session.
fn refill_or_halt(state: &mut GameState) -> bool {
    match state.refill_level() {
        Ok(()) => true,
        Err(err) => {
            log::error!("Could not regenerate level {}: {err}", state.level);
            state.quit();
            false
        }
    }
}

fn bounce_paddles(state: &mut GameState) {
    match state.mode {
        GameMode::Pong => {
            let (speedup, spin) = (state.config.speedup, state.config.spin_factor);
            for (i, paddle) in state.paddles.iter().enumerate() {
                if paddle.spin_bounce_ball(&mut state.ball, speedup, spin) {
                    state.events.push(GameEvent::PaddleHit { paddle: i });
                }
            }
        }
        GameMode::Breakout | GameMode::Aim => {
            for (i, paddle) in state.paddles.iter_mut().enumerate() {
                if paddle.bounce_ball(&mut state.ball) {
                    state.events.push(GameEvent::PaddleHit { paddle: i });
                }
            }
        }
    }
}

/// Breakout reflects off left, right and top; pong off top and bottom
/// (its side walls are score zones)
fn bounce_walls(state: &mut GameState) {
    let arena = state.arena;
    let ball = &mut state.ball;
    let mut hit = false;

    match state.mode {
        GameMode::Pong => {
            if ball.rect.y < arena.y || ball.rect.top() > arena.top() {
                ball.vel.y = -ball.vel.y;
                hit = true;
            }
        }
        GameMode::Breakout | GameMode::Aim => {
            if ball.rect.x < arena.x || ball.rect.right() > arena.right() {
                ball.vel.x = -ball.vel.x;
                hit = true;
            }
            if ball.rect.top() > arena.top() {
                ball.vel.y = -ball.vel.y;
                hit = true;
            }
        }
    }

    if hit {
        state.events.push(GameEvent::WallHit);
    }
}

/// Scored play: bricks, misses/points, then end-of-game and level checks
fn play_step(state: &mut GameState) {
    match state.mode {
        GameMode::Breakout => {
            if let Some(value) = state.bricks.hit_first(&mut state.ball) {
                state.paddles[0].score += value;
                state.emit(GameEvent::BrickDestroyed { value });
            }

            if state.ball.rect.y < state.arena.y {
                let paddle = &mut state.paddles[0];
                paddle.missed_balls += 1;
                let missed = paddle.missed_balls;
                log::debug!("Ball missed ({missed}/{})", state.config.max_misses);
                state.emit(GameEvent::BallMissed { missed });
                state.serve_ball();
            }

            if state.paddles[0].missed_balls >= state.config.max_misses {
                log::info!("Game over with score {}", state.paddles[0].score);
                state.set_phase(GamePhase::GameOver);
            } else if state.bricks.is_cleared() {
                log::info!("Level {} cleared", state.level);
                state.set_phase(GamePhase::LevelCleared);
            }
        }
        GameMode::Pong => {
            if let Some(scorer) = pong_scorer(state) {
                let paddle = &mut state.paddles[scorer];
                paddle.score += 1;
                let score = paddle.score;
                state.emit(GameEvent::PointScored {
                    paddle: scorer,
                    score,
                });
                state.serve_ball();
            }

            let win = state.config.win_score;
            if state.paddles.iter().any(|p| p.score >= win) {
                log::info!(
                    "Game over {}:{}",
                    state.paddles[0].score,
                    state.paddles[1].score
                );
                state.set_phase(GamePhase::GameOver);
            }
        }
        GameMode::Aim => {}
    }
}

/// Unscored autoplay: collisions still happen, counters stay untouched
fn demo_step(state: &mut GameState) {
    match state.mode {
        GameMode::Breakout => {
            if let Some(value) = state.bricks.hit_first(&mut state.ball) {
                state.emit(GameEvent::BrickDestroyed { value });
            }
            if state.ball.rect.y < state.arena.y {
                state.serve_ball();
            }
            state
                .autoplay
                .follow(&mut state.paddles[0], &state.ball, FollowAxis::Horizontal);
            if state.bricks.is_cleared() {
                log::debug!("Demo cleared the grid, regenerating");
                refill_or_halt(state);
            }
        }
        GameMode::Pong => {
            if pong_scorer(state).is_some() {
                state.serve_ball();
            }
            if let [left, right] = state.paddles.as_mut_slice() {
                state.autoplay.follow_pair(left, right, &state.ball);
            }
        }
        GameMode::Aim => {}
    }
}

/// Paddle index credited when the ball leaves through a side
fn pong_scorer(state: &GameState) -> Option<usize> {
    if state.ball.rect.x < state.arena.x {
        Some(1)
    } else if state.ball.rect.x > state.arena.right() {
        Some(0)
    } else {
        None
    }
}
