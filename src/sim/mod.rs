//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, velocities in units per tick
//! - Injected serve randomness only
//! - Left paddle resolved before right
//! - No rendering, timing or platform dependencies

pub mod collision;
pub mod random;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Aabb, impact_offset, paddle_bounce};
pub use random::{ScriptedCoin, ServeRandom};
pub use snapshot::{BallView, PaddleView, Snapshot};
pub use state::{Ball, GameEvent, GamePhase, GameState, Paddle, Side};
pub use tick::{TickInput, TickOutcome, tick};
