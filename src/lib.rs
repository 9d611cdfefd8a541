//! Retro Tennis - a two-player paddle-and-ball engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, match state)
//! - `config`: Tunable game parameters and their validation
//! - `driver`: Fixed-tick loop, input sources and presentation sinks

pub mod config;
pub mod driver;
pub mod error;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use error::Error;

/// Default game constants (the classic 800x600 layout)
pub mod consts {
    /// Target simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;
    /// How many tick periods the loop may fall behind before resyncing
    pub const MAX_TICK_LAG: u32 = 8;

    /// Field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 15.0;
    pub const PADDLE_HEIGHT: f32 = 90.0;
    /// Units per tick while a direction is held
    pub const PADDLE_SPEED: f32 = 7.0;
    /// Gap between a field edge and the paddle facing it
    pub const PADDLE_MARGIN: f32 = 30.0;

    /// Ball defaults (units per tick)
    pub const BALL_SIZE: f32 = 15.0;
    pub const BALL_SPEED_X: f32 = 5.0;
    pub const BALL_SPEED_Y: f32 = 5.0;
    /// Horizontal speed multiplier on every paddle hit
    pub const BOUNCE_GROWTH: f32 = 1.05;
    /// Horizontal speed ceiling; stays below paddle + ball width so the
    /// ball cannot skip over a paddle in a single tick
    pub const BALL_MAX_SPEED: f32 = 24.0;
    /// Vertical speed for a hit on the very edge of a paddle
    pub const DEFLECTION_SCALE: f32 = 8.0;

    /// Points needed to win a match
    pub const WINNING_SCORE: u32 = 10;
}
