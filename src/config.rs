//! Game configuration
//!
//! Every tunable constant of the match lives here. Values are fixed for a
//! run but can be overridden (from JSON or directly in tests); a config is
//! always validated before a match is built from it.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Rejected configuration, reported at startup
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be a positive finite number, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("{name} must be a non-negative finite number, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error("paddle height {paddle} does not fit in a field of height {field}")]
    PaddleTooTall { paddle: f32, field: f32 },
    #[error("paddles need {needed} units of width but the field is only {field} wide")]
    PaddlesDoNotFit { needed: f32, field: f32 },
    #[error("ball size {ball} does not fit in a {width}x{height} field")]
    BallTooLarge { ball: f32, width: f32, height: f32 },
    #[error("bounce growth factor must be at least 1.0, got {0}")]
    ShrinkingBounce(f32),
    #[error("max ball speed {max} is below the base speed {base}")]
    MaxSpeedBelowBase { max: f32, base: f32 },
    #[error("winning score must be at least 1")]
    ZeroWinningScore,
    #[error("tick rate must be at least 1 tick per second")]
    ZeroTickRate,
}

/// Tunable match parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field_width: f32,
    pub field_height: f32,

    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    pub paddle_margin: f32,

    pub ball_size: f32,
    pub ball_speed_x: f32,
    pub ball_speed_y: f32,
    /// Multiplier applied to horizontal speed on every paddle hit
    pub bounce_growth: f32,
    /// Horizontal speed ceiling; `None` lets rallies speed up forever
    pub max_ball_speed: Option<f32>,
    /// Vertical speed produced by a hit at the very tip of a paddle
    pub deflection_scale: f32,

    pub winning_score: u32,
    pub tick_rate: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            paddle_margin: PADDLE_MARGIN,

            ball_size: BALL_SIZE,
            ball_speed_x: BALL_SPEED_X,
            ball_speed_y: BALL_SPEED_Y,
            bounce_growth: BOUNCE_GROWTH,
            max_ball_speed: Some(BALL_MAX_SPEED),
            deflection_scale: DEFLECTION_SCALE,

            winning_score: WINNING_SCORE,
            tick_rate: TICK_RATE,
        }
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

impl GameConfig {
    /// Check that a match can be played with these parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("field_width", self.field_width)?;
        positive("field_height", self.field_height)?;
        positive("paddle_width", self.paddle_width)?;
        positive("paddle_height", self.paddle_height)?;
        positive("paddle_speed", self.paddle_speed)?;
        non_negative("paddle_margin", self.paddle_margin)?;
        positive("ball_size", self.ball_size)?;
        positive("ball_speed_x", self.ball_speed_x)?;
        non_negative("ball_speed_y", self.ball_speed_y)?;
        non_negative("deflection_scale", self.deflection_scale)?;
        positive("bounce_growth", self.bounce_growth)?;

        if self.paddle_height > self.field_height {
            return Err(ConfigError::PaddleTooTall {
                paddle: self.paddle_height,
                field: self.field_height,
            });
        }

        let needed = 2.0 * (self.paddle_margin + self.paddle_width);
        if needed >= self.field_width {
            return Err(ConfigError::PaddlesDoNotFit {
                needed,
                field: self.field_width,
            });
        }

        if self.ball_size >= self.field_height || self.ball_size >= self.field_width {
            return Err(ConfigError::BallTooLarge {
                ball: self.ball_size,
                width: self.field_width,
                height: self.field_height,
            });
        }

        if self.bounce_growth < 1.0 {
            return Err(ConfigError::ShrinkingBounce(self.bounce_growth));
        }

        if let Some(max) = self.max_ball_speed {
            positive("max_ball_speed", max)?;
            if max < self.ball_speed_x {
                return Err(ConfigError::MaxSpeedBelowBase {
                    max,
                    base: self.ball_speed_x,
                });
            }
        }

        if self.winning_score == 0 {
            return Err(ConfigError::ZeroWinningScore);
        }
        if self.tick_rate == 0 {
            return Err(ConfigError::ZeroTickRate);
        }

        Ok(())
    }

    /// Parse a (possibly partial) JSON override on top of the defaults
    pub fn from_json_str(json: &str) -> Result<Self, crate::Error> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, crate::Error> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Column of the left paddle's left edge
    pub fn left_paddle_x(&self) -> f32 {
        self.paddle_margin
    }

    /// Column of the right paddle's left edge
    pub fn right_paddle_x(&self) -> f32 {
        self.field_width - self.paddle_margin - self.paddle_width
    }

    /// Lowest legal paddle offset (top edge)
    pub fn paddle_max_y(&self) -> f32 {
        self.field_height - self.paddle_height
    }

    /// Duration of one tick in seconds
    pub fn tick_seconds(&self) -> f64 {
        1.0 / f64::from(self.tick_rate)
    }
}
