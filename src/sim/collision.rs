//! Collision detection and response between the ball and the paddles
//!
//! Everything is axis aligned, so detection is a plain rectangle overlap.
//! The interesting part is the response: the ball's horizontal speed grows
//! on each hit and its vertical speed is chosen by where it struck the
//! paddle, which is what gives players control over the angle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Ball, GameEvent, Paddle, Side};
use crate::config::GameConfig;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap: boxes that only share an edge do not overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }
}

/// Whether the ball is travelling toward the given paddle
fn approaching(ball: &Ball, side: Side) -> bool {
    match side {
        Side::Left => ball.vel.x < 0.0,
        Side::Right => ball.vel.x > 0.0,
    }
}

/// Where on the paddle the ball struck, in `[-1, 1]` (negative = upper half)
pub fn impact_offset(ball: &Ball, paddle: &Paddle) -> f32 {
    let half = paddle.height / 2.0;
    ((ball.center().y - paddle.center_y()) / half).clamp(-1.0, 1.0)
}

/// Bounce the ball off a paddle if they overlap and the ball is incoming.
///
/// Returns true if a bounce happened. A ball that still overlaps the paddle
/// after bouncing is moving away from it, so it cannot be bounced twice.
pub fn paddle_bounce(ball: &mut Ball, paddle: &Paddle, config: &GameConfig) -> bool {
    if !approaching(ball, paddle.side) || !ball.bounds().overlaps(&paddle.bounds()) {
        return false;
    }

    let mut vx = -ball.vel.x * config.bounce_growth;
    if let Some(max) = config.max_ball_speed {
        vx = vx.clamp(-max, max);
    }
    ball.vel.x = vx;
    ball.vel.y = impact_offset(ball, paddle) * config.deflection_scale;
    true
}

/// Resolve ball/paddle contacts for one tick.
///
/// The left paddle is checked first; the right paddle is then checked
/// against the already updated velocity.
pub fn resolve_collisions(
    ball: &mut Ball,
    left: &Paddle,
    right: &Paddle,
    config: &GameConfig,
    events: &mut Vec<GameEvent>,
) {
    for paddle in [left, right] {
        if paddle_bounce(ball, paddle, config) {
            log::debug!(
                "{:?} paddle hit, ball velocity now {:?}",
                paddle.side,
                ball.vel
            );
            events.push(GameEvent::PaddleHit { side: paddle.side });
        }
    }
}
