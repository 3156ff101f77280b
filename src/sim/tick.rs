//! Per-frame ball update
//!
//! Moves the ball one step and reports whether it escaped. Scoring and round
//! transitions are the controller's job.

use super::state::GameState;
use crate::config::GameConfig;

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Ball is still inside the bounds
    Moved,
    /// Ball center passed a bound on this tick
    OutOfBounds,
}

/// Advance the ball by one frame: move first, then check bounds
pub fn tick(state: &mut GameState, config: &GameConfig) -> TickOutcome {
    state.time_ticks += 1;
    state.ball.advance(config.ball_speed);

    if config.is_out_of_bounds(state.ball.pos.x) {
        TickOutcome::OutOfBounds
    } else {
        TickOutcome::Moved
    }
}
