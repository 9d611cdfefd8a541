//! Fixed timestep simulation tick
//!
//! One call to `tick` applies one sampled input and advances the match by
//! exactly one step. The individual steps are exposed so tests can drive
//! them in isolation; `tick` always runs them in the same order.

use serde::{Deserialize, Serialize};

use super::collision;
use super::random::ServeRandom;
use super::state::{GameEvent, GamePhase, GameState, Side};

/// Held state of the six logical controls for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left_up: bool,
    pub left_down: bool,
    pub right_up: bool,
    pub right_down: bool,
    /// Start a match from the title screen, or restart after game over
    pub start: bool,
    pub quit: bool,
}

impl TickInput {
    pub fn start() -> Self {
        Self {
            start: true,
            ..Default::default()
        }
    }

    pub fn quit() -> Self {
        Self {
            quit: true,
            ..Default::default()
        }
    }
}

/// What the caller should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Quit,
}

/// Advance the match by one fixed step
pub fn tick<R: ServeRandom>(state: &mut GameState<R>, input: &TickInput) -> TickOutcome {
    if input.quit {
        return TickOutcome::Quit;
    }

    state.events.clear();
    state.time_ticks += 1;

    // Start only fires on the tick the control is pressed
    let start_pressed = input.start && !state.start_held;
    state.start_held = input.start;

    match state.phase {
        GamePhase::Welcome | GamePhase::GameOver => {
            if start_pressed {
                state.start_match();
            }
        }
        GamePhase::Playing => {
            apply_paddle_input(state, input);
            advance_ball(state);
            resolve_collisions(state);
            if let Some(scorer) = check_scoring(state) {
                check_win(state, scorer);
            }
        }
    }

    TickOutcome::Continue
}

/// Move paddles for whichever directions are held
pub fn apply_paddle_input<R>(state: &mut GameState<R>, input: &TickInput) {
    if input.left_up {
        state.left.move_up();
    }
    if input.left_down {
        state.left.move_down();
    }
    if input.right_up {
        state.right.move_up();
    }
    if input.right_down {
        state.right.move_down();
    }
}

/// Move the ball one step, bouncing off the top and bottom walls
pub fn advance_ball<R>(state: &mut GameState<R>) {
    if state.ball.advance(state.config.field_height) {
        state.events.push(GameEvent::WallBounce);
    }
}

pub fn resolve_collisions<R>(state: &mut GameState<R>) {
    collision::resolve_collisions(
        &mut state.ball,
        &state.left,
        &state.right,
        &state.config,
        &mut state.events,
    );
}

/// Award a point if the ball left the field horizontally.
///
/// The ball must still be heading out: one that a paddle returned this tick
/// re-enters the field instead. Returns the side that scored.
pub fn check_scoring<R>(state: &mut GameState<R>) -> Option<Side> {
    let ball = &state.ball;
    let scorer = if ball.pos.x <= 0.0 && ball.vel.x < 0.0 {
        Side::Right
    } else if ball.pos.x >= state.config.field_width && ball.vel.x > 0.0 {
        Side::Left
    } else {
        return None;
    };

    match scorer {
        Side::Left => state.score_left += 1,
        Side::Right => state.score_right += 1,
    }
    state.events.push(GameEvent::PointScored { scorer });
    log::info!(
        "{:?} scores ({} - {})",
        scorer,
        state.score_left,
        state.score_right
    );
    Some(scorer)
}

/// End the match if `scorer` reached the winning score, otherwise serve again
pub fn check_win<R: ServeRandom>(state: &mut GameState<R>, scorer: Side) {
    if state.score(scorer) >= state.config.winning_score {
        state.phase = GamePhase::GameOver;
        state.winner = Some(scorer);
        state.events.push(GameEvent::MatchWon { winner: scorer });
        log::info!(
            "{:?} wins the match {} - {}",
            scorer,
            state.score_left,
            state.score_right
        );
    } else {
        state.serve();
    }
}
