//! 2D vector helpers on top of `glam::Vec2`
//!
//! Arithmetic, dot product and length come straight from glam. This module
//! adds the two operations the simulation needs with its own semantics.

use glam::Vec2;

use crate::error::{SimError, SimResult};

/// Normalize `v`, failing with `ZeroVector` when its length is exactly zero
#[inline]
pub fn try_normalize(v: Vec2) -> SimResult<Vec2> {
    let len = v.length();
    if len == 0.0 {
        return Err(SimError::ZeroVector);
    }
    Ok(v / len)
}

/// Rotate `v` counter-clockwise by `degrees`
#[inline]
pub fn rotate_degrees(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}

/// Mirror `velocity` about a surface with unit `normal`: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}
