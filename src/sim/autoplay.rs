//! Demo-mode paddle control
//!
//! The paddle chases the ball at a constant per-tick step. The step is
//! derived from the ball speed the first time it is needed and kept for the
//! rest of the session. It is not clamped to the remaining distance, so the
//! paddle may jitter around the ball center.

use serde::{Deserialize, Serialize};

use super::body::{Ball, Paddle};
use crate::consts::FOLLOW_SPEED_FACTOR;

/// Axis along which a paddle tracks the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowAxis {
    /// Breakout: horizontal paddle follows ball x
    Horizontal,
    /// Pong: vertical paddle follows ball y
    Vertical,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Autoplay {
    follow_speed: Option<f32>,
}

impl Autoplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached step size, if one has been derived yet
    pub fn follow_speed(&self) -> Option<f32> {
        self.follow_speed
    }

    fn speed_for(&mut self, ball: &Ball) -> f32 {
        *self.follow_speed.get_or_insert_with(|| {
            let speed = ball.speed() * FOLLOW_SPEED_FACTOR;
            log::debug!("Autoplay follow speed set to {speed:.3}");
            speed
        })
    }

    /// Step `paddle` one tick toward the ball's center on `axis`
    pub fn follow(&mut self, paddle: &mut Paddle, ball: &Ball, axis: FollowAxis) {
        let step = self.speed_for(ball);
        let (paddle_c, ball_c) = match axis {
            FollowAxis::Horizontal => (paddle.rect.center().x, ball.center().x),
            FollowAxis::Vertical => (paddle.rect.center().y, ball.center().y),
        };

        let delta = if paddle_c > ball_c {
            -step
        } else if paddle_c < ball_c {
            step
        } else {
            0.0
        };

        match axis {
            FollowAxis::Horizontal => paddle.rect.x += delta,
            FollowAxis::Vertical => paddle.rect.y += delta,
        }
    }

    /// Two-paddle demo: only the paddle the ball is heading toward moves
    pub fn follow_pair(&mut self, left: &mut Paddle, right: &mut Paddle, ball: &Ball) {
        if ball.vel.x >= 0.0 {
            self.follow(right, ball, FollowAxis::Vertical);
        } else {
            self.follow(left, ball, FollowAxis::Vertical);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rect::Rect;
    use glam::Vec2;

    fn ball(center: Vec2, vel: Vec2) -> Ball {
        let mut ball = Ball::new(10.0);
        ball.rect.set_center(center);
        ball.vel = vel;
        ball
    }

    #[test]
    fn test_speed_cached_from_first_ball() {
        let mut auto = Autoplay::new();
        let mut paddle = Paddle::new(Rect::new(0.0, 0.0, 100.0, 10.0));
        let fast = ball(Vec2::new(500.0, 100.0), Vec2::new(0.0, 10.0));
        auto.follow(&mut paddle, &fast, FollowAxis::Horizontal);
        assert!((auto.follow_speed().unwrap() - 5.7).abs() < 1e-5);
        assert!((paddle.rect.x - 5.7).abs() < 1e-5);

        // A slower ball does not change the cached step
        let slow = ball(Vec2::new(500.0, 100.0), Vec2::new(0.0, 1.0));
        auto.follow(&mut paddle, &slow, FollowAxis::Horizontal);
        assert!((paddle.rect.x - 11.4).abs() < 1e-4);
    }

    #[test]
    fn test_step_not_clamped_to_distance() {
        let mut auto = Autoplay::new();
        let mut paddle = Paddle::new(Rect::new(0.0, 0.0, 100.0, 10.0));
        // Ball center is one unit right of the paddle center
        let b = ball(Vec2::new(51.0, 100.0), Vec2::new(0.0, 10.0));
        auto.follow(&mut paddle, &b, FollowAxis::Horizontal);
        assert!((paddle.rect.center().x - 55.7).abs() < 1e-4);
    }

    #[test]
    fn test_pair_moves_paddle_ball_heads_toward() {
        let mut auto = Autoplay::new();
        let mut left = Paddle::new(Rect::new(0.0, 0.0, 10.0, 100.0));
        let mut right = Paddle::new(Rect::new(490.0, 0.0, 10.0, 100.0));
        let b = ball(Vec2::new(250.0, 200.0), Vec2::new(-3.0, 4.0));

        auto.follow_pair(&mut left, &mut right, &b);
        assert!((left.rect.y - 2.85).abs() < 1e-5);
        assert_eq!(right.rect.y, 0.0);
    }
}
