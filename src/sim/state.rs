//! Game state and core simulation types
//!
//! `GameState` is the single owner of every entity in a match.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::random::{self, ServeRandom};
use crate::config::{ConfigError, GameConfig};

/// One of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Idle title screen, waiting for start input
    Welcome,
    /// Active rally
    Playing,
    /// A side reached the winning score; frozen until restart
    GameOver,
}

/// Something noteworthy that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    MatchStarted,
    WallBounce,
    PaddleHit { side: Side },
    PointScored { scorer: Side },
    MatchWon { winner: Side },
}

/// A player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    /// Left edge (fixed for the whole match)
    pub x: f32,
    /// Top edge, kept within `[0, max_y]`
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    max_y: f32,
}

impl Paddle {
    /// Create a vertically centered paddle for the given side
    pub fn new(side: Side, config: &GameConfig) -> Self {
        let x = match side {
            Side::Left => config.left_paddle_x(),
            Side::Right => config.right_paddle_x(),
        };
        let mut paddle = Self {
            side,
            x,
            y: 0.0,
            width: config.paddle_width,
            height: config.paddle_height,
            speed: config.paddle_speed,
            max_y: config.paddle_max_y(),
        };
        paddle.recenter();
        paddle
    }

    pub fn move_up(&mut self) {
        self.y = (self.y - self.speed).clamp(0.0, self.max_y);
    }

    pub fn move_down(&mut self) {
        self.y = (self.y + self.speed).clamp(0.0, self.max_y);
    }

    /// Put the paddle back at mid-field
    pub fn recenter(&mut self) {
        self.y = self.max_y / 2.0;
    }

    /// Lowest legal `y`
    pub fn max_y(&self) -> f32 {
        self.max_y
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(Vec2::new(self.x, self.y), Vec2::new(self.width, self.height))
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Top-left corner
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub size: f32,
}

impl Ball {
    /// A motionless ball at the center of the field
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: Self::center_pos(config),
            vel: Vec2::ZERO,
            size: config.ball_size,
        }
    }

    fn center_pos(config: &GameConfig) -> Vec2 {
        Vec2::new(
            (config.field_width - config.ball_size) / 2.0,
            (config.field_height - config.ball_size) / 2.0,
        )
    }

    /// Re-center and launch in a random diagonal direction
    pub fn serve(&mut self, config: &GameConfig, rng: &mut impl ServeRandom) {
        self.pos = Self::center_pos(config);
        let sx = rng.sign();
        let sy = rng.sign();
        self.vel = Vec2::new(sx * config.ball_speed_x, sy * config.ball_speed_y);
        log::debug!("Serve from {:?} with velocity {:?}", self.pos, self.vel);
    }

    /// Move one tick, bouncing off the top and bottom walls.
    ///
    /// Returns true if the ball bounced, i.e. `vel.y` flipped sign. The
    /// bounce is perfectly elastic and `vel.y` always ends up pointing back
    /// into the field. A ball sliding along a wall with `vel.y == 0` is
    /// clamped but does not bounce.
    pub fn advance(&mut self, field_height: f32) -> bool {
        self.pos += self.vel;

        let bottom = field_height - self.size;
        if self.pos.y <= 0.0 {
            self.pos.y = 0.0;
            let bounced = self.vel.y < 0.0;
            self.vel.y = self.vel.y.abs();
            bounced
        } else if self.pos.y >= bottom {
            self.pos.y = bottom;
            let bounced = self.vel.y > 0.0;
            self.vel.y = -self.vel.y.abs();
            bounced
        } else {
            false
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(self.size))
    }
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct GameState<R = Pcg32> {
    pub config: GameConfig,
    pub phase: GamePhase,
    pub score_left: u32,
    pub score_right: u32,
    /// Set only in `GameOver`
    pub winner: Option<Side>,
    pub left: Paddle,
    pub right: Paddle,
    pub ball: Ball,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised during the most recent tick
    pub events: Vec<GameEvent>,
    /// Whether start was held on the previous tick (press detection)
    pub(crate) start_held: bool,
    rng: R,
}

impl GameState<Pcg32> {
    /// Create a match with a seeded serve generator
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, random::seeded(seed))
    }
}

impl<R: ServeRandom> GameState<R> {
    /// Create a match drawing serve directions from `rng`
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            phase: GamePhase::Welcome,
            score_left: 0,
            score_right: 0,
            winner: None,
            left: Paddle::new(Side::Left, &config),
            right: Paddle::new(Side::Right, &config),
            ball: Ball::new(&config),
            time_ticks: 0,
            events: Vec::new(),
            start_held: false,
            rng,
            config,
        })
    }

    /// Reset scores and entities and begin a fresh rally.
    ///
    /// Used both for the first start and for restarts after game over.
    pub fn start_match(&mut self) {
        self.score_left = 0;
        self.score_right = 0;
        self.winner = None;
        self.phase = GamePhase::Playing;
        self.left.recenter();
        self.right.recenter();
        self.serve();
        self.events.push(GameEvent::MatchStarted);
        log::info!("Match started (first to {})", self.config.winning_score);
    }

    /// Serve the ball from the center
    pub fn serve(&mut self) {
        self.ball.serve(&self.config, &mut self.rng);
    }
}

impl<R> GameState<R> {
    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.score_left,
            Side::Right => self.score_right,
        }
    }
}
