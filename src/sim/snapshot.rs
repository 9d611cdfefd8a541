//! Read-only view of a match for presentation layers

use serde::{Deserialize, Serialize};

use super::state::{Ball, GameEvent, GamePhase, GameState, Paddle, Side};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddleView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl From<&Paddle> for PaddleView {
    fn from(paddle: &Paddle) -> Self {
        Self {
            x: paddle.x,
            y: paddle.y,
            width: paddle.width,
            height: paddle.height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

impl From<&Ball> for BallView {
    fn from(ball: &Ball) -> Self {
        Self {
            x: ball.pos.x,
            y: ball.pos.y,
            size: ball.size,
        }
    }
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub score_left: u32,
    pub score_right: u32,
    pub winner: Option<Side>,
    pub left: PaddleView,
    pub right: PaddleView,
    pub ball: BallView,
    pub events: Vec<GameEvent>,
}

impl<R> GameState<R> {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.time_ticks,
            phase: self.phase,
            score_left: self.score_left,
            score_right: self.score_right,
            winner: self.winner,
            left: PaddleView::from(&self.left),
            right: PaddleView::from(&self.right),
            ball: BallView::from(&self.ball),
            events: self.events.clone(),
        }
    }
}
