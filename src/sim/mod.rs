//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (bricks in grid order, paddles left to right)
//! - No rendering or platform dependencies

pub mod autoplay;
pub mod body;
pub mod input;
pub mod level;
pub mod rect;
pub mod state;
pub mod surface;
pub mod tick;
pub mod vector;

pub use autoplay::{Autoplay, FollowAxis};
pub use body::{Ball, Brick, BrickField, Paddle};
pub use input::PointerEvent;
pub use level::{LevelLayout, generate_level};
pub use rect::Rect;
pub use state::{BrickView, GameEvent, GamePhase, GameState, PaddleView, Snapshot};
pub use surface::{AimLine, Bounceable, Edge, SurfaceContact, surface_contact, surface_point};
pub use tick::tick;
pub use vector::{reflect_velocity, rotate_degrees, try_normalize};
