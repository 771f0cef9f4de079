//! Ball, paddle and brick bodies and their bounce rules

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::surface::Bounceable;

/// The ball: a bounding box moving by `vel` units every tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub rect: Rect,
    pub vel: Vec2,
}

impl Ball {
    pub fn new(size: f32) -> Self {
        Self {
            rect: Rect::new(0.0, 0.0, size, size),
            vel: Vec2::ZERO,
        }
    }

    /// Move one step along the current velocity
    pub fn advance(&mut self) {
        self.rect.translate(self.vel);
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// A player paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
    pub score: u32,
    /// Balls lost past this paddle (breakout)
    pub missed_balls: u32,
    /// Set while the ball keeps overlapping after a bounce (debounce)
    #[serde(skip)]
    pub collided: bool,
}

impl Paddle {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            score: 0,
            missed_balls: 0,
            collided: false,
        }
    }

    /// Debounced surface-normal bounce.
    ///
    /// Returns true when the ball's velocity was changed this call.
    pub fn bounce_ball(&mut self, ball: &mut Ball) -> bool {
        if !self.rect.overlaps(&ball.rect) {
            self.collided = false;
            return false;
        }
        if self.collided {
            return false;
        }
        ball.vel = self.bounce_vector(ball.center(), ball.vel);
        self.collided = true;
        true
    }

    /// Two-paddle return: reverses the ball, adds vertical "spin" from the
    /// hit offset and speeds it up. Re-applied on every overlapping tick.
    pub fn spin_bounce_ball(&self, ball: &mut Ball, speedup: f32, spin_factor: f32) -> bool {
        if !self.rect.overlaps(&ball.rect) {
            return false;
        }
        let offset = Vec2::new(0.0, spin_factor * (ball.center().y - self.rect.center().y));
        ball.vel = speedup * (offset - ball.vel);
        true
    }

    pub fn reset_counters(&mut self) {
        self.score = 0;
        self.missed_balls = 0;
    }
}

impl Bounceable for Paddle {
    fn bounds(&self) -> &Rect {
        &self.rect
    }
}

/// A single-hit brick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    /// Points awarded when hit
    pub value: u32,
    /// Color category (row index modulo palette size)
    pub color: u8,
    /// Marked on hit; compacted out at the end of the tick
    #[serde(default)]
    pub destroyed: bool,
}

impl Brick {
    pub fn new(rect: Rect, value: u32, color: u8) -> Self {
        Self {
            rect,
            value,
            color,
            destroyed: false,
        }
    }

    /// Bounce the ball off this brick if they overlap and mark it destroyed
    pub fn bounce_ball(&mut self, ball: &mut Ball) -> bool {
        if self.destroyed || !self.rect.overlaps(&ball.rect) {
            return false;
        }
        ball.vel = self.bounce_vector(ball.center(), ball.vel);
        self.destroyed = true;
        true
    }
}

impl Bounceable for Brick {
    fn bounds(&self) -> &Rect {
        &self.rect
    }
}

/// Owned brick collection with stable indices during a tick
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrickField {
    bricks: Vec<Brick>,
}

impl BrickField {
    pub fn new(bricks: Vec<Brick>) -> Self {
        Self { bricks }
    }

    /// Resolve at most one brick hit: the first live overlapping brick in
    /// field order. Returns the hit brick's value.
    pub fn hit_first(&mut self, ball: &mut Ball) -> Option<u32> {
        self.bricks
            .iter_mut()
            .find_map(|b| b.bounce_ball(ball).then_some(b.value))
    }

    /// Drop destroyed bricks
    pub fn compact(&mut self) {
        self.bricks.retain(|b| !b.destroyed);
    }

    /// Number of bricks not yet destroyed
    pub fn remaining(&self) -> usize {
        self.bricks.iter().filter(|b| !b.destroyed).count()
    }

    pub fn is_cleared(&self) -> bool {
        self.remaining() == 0
    }

    pub fn replace(&mut self, bricks: Vec<Brick>) {
        self.bricks = bricks;
    }

    pub fn clear(&mut self) {
        self.bricks.clear();
    }

    /// Live bricks in field order
    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter().filter(|b| !b.destroyed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball_at(center: Vec2, vel: Vec2) -> Ball {
        let mut ball = Ball::new(4.0);
        ball.rect.set_center(center);
        ball.vel = vel;
        ball
    }

    #[test]
    fn test_paddle_bounce_debounced() {
        let mut paddle = Paddle::new(Rect::new(0.0, 0.0, 100.0, 10.0));
        let mut ball = ball_at(Vec2::new(50.0, 11.0), Vec2::new(1.0, -2.0));

        assert!(paddle.bounce_ball(&mut ball));
        assert_eq!(ball.vel, Vec2::new(1.0, 2.0));
        assert!(paddle.collided);

        // Still overlapping: no second flip
        assert!(!paddle.bounce_ball(&mut ball));
        assert_eq!(ball.vel, Vec2::new(1.0, 2.0));

        // Leave the paddle: flag clears
        ball.rect.set_center(Vec2::new(50.0, 40.0));
        assert!(!paddle.bounce_ball(&mut ball));
        assert!(!paddle.collided);
    }

    #[test]
    fn test_spin_bounce_speeds_up() {
        let paddle = Paddle::new(Rect::new(0.0, 0.0, 10.0, 100.0));
        // Ball hits 10 units above paddle center
        let mut ball = ball_at(Vec2::new(11.0, 60.0), Vec2::new(-4.0, 0.0));

        assert!(paddle.spin_bounce_ball(&mut ball, 1.1, 0.02));
        assert!((ball.vel.x - 4.4).abs() < 1e-5);
        assert!((ball.vel.y - 0.22).abs() < 1e-5);
    }

    #[test]
    fn test_spin_bounce_misses() {
        let paddle = Paddle::new(Rect::new(0.0, 0.0, 10.0, 100.0));
        let mut ball = ball_at(Vec2::new(50.0, 50.0), Vec2::new(-4.0, 0.0));
        assert!(!paddle.spin_bounce_ball(&mut ball, 1.1, 0.02));
        assert_eq!(ball.vel, Vec2::new(-4.0, 0.0));
    }

    #[test]
    fn test_brick_field_resolves_one_hit() {
        let mut field = BrickField::new(vec![
            Brick::new(Rect::new(0.0, 10.0, 10.0, 5.0), 1, 0),
            Brick::new(Rect::new(5.0, 10.0, 10.0, 5.0), 2, 1),
        ]);
        let mut ball = ball_at(Vec2::new(7.0, 8.5), Vec2::new(0.0, 1.0));

        assert_eq!(field.hit_first(&mut ball), Some(1));
        assert_eq!(field.remaining(), 1);
        assert_eq!(ball.vel, Vec2::new(0.0, -1.0));

        field.compact();
        assert_eq!(field.iter().count(), 1);
        assert_eq!(field.iter().next().map(|b| b.value), Some(2));
    }

    #[test]
    fn test_destroyed_brick_is_not_hit_again() {
        let mut brick = Brick::new(Rect::new(0.0, 0.0, 10.0, 10.0), 3, 2);
        let mut ball = ball_at(Vec2::new(5.0, 11.0), Vec2::new(0.0, -1.0));
        assert!(brick.bounce_ball(&mut ball));
        assert!(!brick.bounce_ball(&mut ball));
    }
}
