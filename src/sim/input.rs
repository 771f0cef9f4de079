//! Pointer input: queued events and drag routing
//!
//! Events are queued as they arrive and applied at the start of the next
//! tick, so they never interleave with collision resolution.

use std::collections::BTreeMap;

use glam::Vec2;

use super::state::{GamePhase, GameState};
use super::surface::AimLine;
use crate::settings::GameMode;

/// A raw pointer event in arena coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { id: u64, pos: Vec2 },
    Move { id: u64, pos: Vec2 },
    Up { id: u64 },
}

/// Pending pointer events, in arrival order
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    events: Vec<PointerEvent>,
}

impl InputQueue {
    pub fn push(&mut self, event: PointerEvent) {
        self.events.push(event);
    }

    pub fn take(&mut self) -> Vec<PointerEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// What a held pointer is driving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    Paddle(usize),
    Aim,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerDrag {
    pub target: DragTarget,
    pub last: Vec2,
}

/// Held pointers by id
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    drags: BTreeMap<u64, PointerDrag>,
}

impl PointerTracker {
    pub fn get(&self, id: u64) -> Option<PointerDrag> {
        self.drags.get(&id).copied()
    }

    pub fn insert(&mut self, id: u64, drag: PointerDrag) {
        self.drags.insert(id, drag);
    }

    pub fn remove(&mut self, id: u64) -> Option<PointerDrag> {
        self.drags.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.drags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drags.is_empty()
    }
}

/// Apply every queued pointer event to the state
pub fn apply_pending(state: &mut GameState) {
    for event in state.input.take() {
        apply_event(state, event);
    }
}

fn apply_event(state: &mut GameState, event: PointerEvent) {
    match event {
        PointerEvent::Down { id, pos } => {
            let pos = state.arena.clamp_point(pos);
            if let Some(target) = drag_target(state, pos) {
                if target == DragTarget::Aim {
                    state.aim = Some(AimLine::from_pointer(&state.paddles[0], pos));
                }
                state.pointers.insert(id, PointerDrag { target, last: pos });
            }
        }
        PointerEvent::Move { id, pos } => {
            let Some(drag) = state.pointers.get(id) else {
                return;
            };
            let pos = state.arena.clamp_point(pos);
            match drag.target {
                DragTarget::Aim => {
                    state.aim = Some(AimLine::from_pointer(&state.paddles[0], pos));
                }
                DragTarget::Paddle(index) => {
                    if state.phase == GamePhase::Playing {
                        drag_paddle(state, index, pos - drag.last);
                    }
                }
            }
            state.pointers.insert(id, PointerDrag { last: pos, ..drag });
        }
        PointerEvent::Up { id } => {
            if let Some(drag) = state.pointers.remove(id) {
                if drag.target == DragTarget::Aim {
                    state.aim = None;
                }
            }
        }
    }
}

/// Which body a new pointer grabs. Pong splits the arena into thirds: the
/// left third drives the left paddle, the right third the right paddle.
fn drag_target(state: &GameState, pos: Vec2) -> Option<DragTarget> {
    match state.mode {
        GameMode::Aim => Some(DragTarget::Aim),
        GameMode::Breakout => Some(DragTarget::Paddle(0)),
        GameMode::Pong => {
            let third = state.arena.width / 3.0;
            if pos.x < state.arena.x + third {
                Some(DragTarget::Paddle(0))
            } else if pos.x > state.arena.right() - third {
                Some(DragTarget::Paddle(1))
            } else {
                None
            }
        }
    }
}

/// Shift a paddle by the pointer delta along its travel axis, keeping it
/// inside the arena
fn drag_paddle(state: &mut GameState, index: usize, delta: Vec2) {
    let arena = state.arena;
    let Some(paddle) = state.paddles.get_mut(index) else {
        return;
    };
    let rect = &mut paddle.rect;
    match state.mode {
        GameMode::Pong => {
            let half = rect.height / 2.0;
            let cy = (rect.center().y + delta.y)
                .min(arena.top() - half)
                .max(arena.y + half);
            rect.set_center_y(cy);
        }
        GameMode::Breakout | GameMode::Aim => {
            let half = rect.width / 2.0;
            let cx = (rect.center().x + delta.x)
                .min(arena.right() - half)
                .max(arena.x + half);
            rect.set_center_x(cx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameConfig;

    fn playing(mode: GameMode) -> GameState {
        let mut state = GameState::new(GameConfig::for_mode(mode)).unwrap();
        state.show_start_prompt();
        state.confirm_start().unwrap();
        state
    }

    #[test]
    fn test_events_wait_for_apply() {
        let mut state = playing(GameMode::Breakout);
        let before = state.player().rect.x;
        state.pointer_down(1, 100.0, 50.0);
        state.pointer_move(1, 130.0, 80.0);
        assert_eq!(state.input.len(), 2);
        assert_eq!(state.player().rect.x, before);

        apply_pending(&mut state);
        assert!(state.input.is_empty());
        assert!((state.player().rect.x - (before + 30.0)).abs() < 1e-4);
    }

    #[test]
    fn test_breakout_drag_clamped_to_arena() {
        let mut state = playing(GameMode::Breakout);
        state.pointer_down(7, 400.0, 10.0);
        state.pointer_move(7, 5000.0, 10.0);
        apply_pending(&mut state);
        // Pointer clamps to the arena edge first: delta is 400
        assert_eq!(state.player().rect.right(), 800.0);

        state.pointer_move(7, -5000.0, 10.0);
        apply_pending(&mut state);
        assert_eq!(state.player().rect.x, 0.0);
    }

    #[test]
    fn test_drag_ignored_outside_playing() {
        let mut state = GameState::new(GameConfig::default()).unwrap();
        let before = state.player().rect;
        state.pointer_down(1, 100.0, 50.0);
        state.pointer_move(1, 200.0, 50.0);
        apply_pending(&mut state);
        assert_eq!(state.player().rect, before);
        assert_eq!(state.pointers.len(), 1);
    }

    #[test]
    fn test_pong_thirds_route_to_paddles() {
        let mut state = playing(GameMode::Pong);
        let left_y = state.paddles[0].rect.y;
        let right_y = state.paddles[1].rect.y;

        state.pointer_down(1, 50.0, 300.0);
        state.pointer_down(2, 750.0, 300.0);
        state.pointer_down(3, 400.0, 300.0);
        state.pointer_move(1, 50.0, 350.0);
        state.pointer_move(2, 750.0, 280.0);
        state.pointer_move(3, 400.0, 500.0);
        apply_pending(&mut state);

        assert_eq!(state.pointers.len(), 2);
        assert!((state.paddles[0].rect.y - (left_y + 50.0)).abs() < 1e-4);
        assert!((state.paddles[1].rect.y - (right_y - 20.0)).abs() < 1e-4);
    }

    #[test]
    fn test_pong_drag_clamped_vertically() {
        let mut state = playing(GameMode::Pong);
        state.pointer_down(1, 10.0, 300.0);
        state.pointer_move(1, 10.0, 900.0);
        apply_pending(&mut state);
        assert_eq!(state.paddles[0].rect.top(), 600.0);
    }

    #[test]
    fn test_aim_line_lifecycle() {
        let mut state = GameState::new(GameConfig::for_mode(GameMode::Aim)).unwrap();
        let paddle = state.player().rect;

        // Pointer above the paddle: line from the top edge to the pointer
        state.pointer_down(1, paddle.center().x, paddle.top() + 50.0);
        apply_pending(&mut state);
        let line = state.aim.unwrap();
        assert_eq!(line.start, Vec2::new(paddle.center().x, paddle.top()));
        assert_eq!(line.end, Vec2::new(paddle.center().x, paddle.top() + 50.0));

        // Pointer inside the paddle near its left edge: line flips outward
        state.pointer_move(1, paddle.x + 2.0, paddle.center().y);
        apply_pending(&mut state);
        let line = state.aim.unwrap();
        assert_eq!(line.start, Vec2::new(paddle.x, paddle.center().y));
        assert_eq!(line.end, Vec2::new(paddle.x - 2.0, paddle.center().y));

        state.pointer_up(1);
        apply_pending(&mut state);
        assert!(state.aim.is_none());
        assert!(state.pointers.is_empty());
    }

    #[test]
    fn test_move_without_down_is_ignored() {
        let mut state = playing(GameMode::Breakout);
        let before = state.player().rect;
        state.pointer_move(9, 10.0, 10.0);
        state.pointer_up(9);
        apply_pending(&mut state);
        assert_eq!(state.player().rect, before);
    }
}
