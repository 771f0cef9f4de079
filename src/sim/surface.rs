//! Surface geometry and bounce response for rectangular bodies
//!
//! The tricky part of the simulation: finding the point on a rectangle's
//! boundary nearest to another body's center, an outward-pointing normal at
//! that point (even after the other body has already penetrated), and the
//! mirrored velocity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::vector::{reflect_velocity, try_normalize};
use crate::consts::DEFAULT_NORMAL;
use crate::error::SimResult;

/// Which edge of a rectangle the nearest surface point lies on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

/// Nearest-surface query result
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceContact {
    /// Point on the boundary closest to the other center
    pub point: Vec2,
    /// Edge the point was snapped to
    pub edge: Edge,
    /// End of the outward surface vector
    pub end: Vec2,
    /// Whether the other center was strictly inside the rectangle
    pub inside: bool,
}

impl SurfaceContact {
    /// Vector from the surface point to the end point (outward)
    pub fn vector(&self) -> Vec2 {
        self.end - self.point
    }
}

/// Nearest boundary point of `rect` to `center`.
///
/// Ties resolve left, then right, then top, then bottom.
pub fn surface_point(rect: &Rect, center: Vec2) -> (Vec2, Edge) {
    let p = rect.clamp_point(center);

    let d_left = p.x - rect.x;
    let d_right = rect.right() - p.x;
    let d_top = rect.top() - p.y;
    let d_bottom = p.y - rect.y;
    let d_min = d_left.min(d_right).min(d_top).min(d_bottom);

    if d_left == d_min {
        (Vec2::new(rect.x, p.y), Edge::Left)
    } else if d_right == d_min {
        (Vec2::new(rect.right(), p.y), Edge::Right)
    } else if d_top == d_min {
        (Vec2::new(p.x, rect.top()), Edge::Top)
    } else {
        (Vec2::new(p.x, rect.y), Edge::Bottom)
    }
}

/// Full surface query: nearest point plus an end point that always lies
/// on the outward side. A center inside the rect is mirrored through the
/// surface point.
pub fn surface_contact(rect: &Rect, center: Vec2) -> SurfaceContact {
    let (point, edge) = surface_point(rect, center);
    let inside = rect.contains_strict(center);
    let end = if inside {
        point + (point - center)
    } else {
        center
    };
    SurfaceContact {
        point,
        edge,
        end,
        inside,
    }
}

/// Solid bodies a ball can bounce off
pub trait Bounceable {
    /// Collision bounds of this body
    fn bounds(&self) -> &Rect;

    fn surface_contact(&self, other_center: Vec2) -> SurfaceContact {
        surface_contact(self.bounds(), other_center)
    }

    fn surface_vector(&self, other_center: Vec2) -> Vec2 {
        self.surface_contact(other_center).vector()
    }

    /// Fails with `ZeroVector` when the other center sits exactly on the
    /// nearest surface point
    fn surface_normal(&self, other_center: Vec2) -> SimResult<Vec2> {
        try_normalize(self.surface_vector(other_center))
    }

    /// Mirrored velocity for a body centered at `other_center` moving with
    /// `velocity`. A degenerate normal falls back to straight up.
    fn bounce_vector(&self, other_center: Vec2, velocity: Vec2) -> Vec2 {
        let normal = self.surface_normal(other_center).unwrap_or_else(|_| {
            log::debug!("degenerate surface normal at {other_center}, using default");
            Vec2::new(DEFAULT_NORMAL.0, DEFAULT_NORMAL.1)
        });
        reflect_velocity(velocity, normal)
    }
}

impl Bounceable for Rect {
    fn bounds(&self) -> &Rect {
        self
    }
}

/// Visual bounce-direction line for the aim tool: surface point to end point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AimLine {
    pub start: Vec2,
    pub end: Vec2,
}

impl AimLine {
    /// Aim line from `body` toward a pointer at `pointer`
    pub fn from_pointer<B: Bounceable + ?Sized>(body: &B, pointer: Vec2) -> Self {
        let contact = body.surface_contact(pointer);
        Self {
            start: contact.point,
            end: contact.end,
        }
    }
}
