//! Game state and core simulation types
//!
//! Everything the controller mutates lives here; the presentation layer only
//! ever sees it through [`crate::view::RoundView`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// Current phase of the session
///
/// Ending a round is not a phase of its own: the controller moves straight
/// from the finished round into the next one (or into `GameOver`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball is moving and clickable
    Running,
    /// Clock stopped, ball frozen in place
    Paused,
    /// Miss threshold reached; only a reset leaves this phase
    GameOver,
}

/// Horizontal travel direction for one round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Uniform coin flip
    pub fn random(rng: &mut impl Rng) -> Self {
        if rng.random_bool(0.5) {
            Direction::Right
        } else {
            Direction::Left
        }
    }

    /// Sign applied to the ball speed
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// The ball entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Center position in window coordinates
    pub pos: Vec2,
    pub radius: f32,
    pub direction: Direction,
    /// Hidden once the game is over
    pub visible: bool,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            radius,
            direction: Direction::Right,
            visible: true,
        }
    }

    /// Move along x only; y never changes during a round
    pub fn advance(&mut self, speed: f32) {
        self.pos.x += self.direction.sign() * speed;
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the direction RNG was built from
    pub rng_state: RngState,
    /// Successful clicks this session
    pub hits: u32,
    /// Balls that escaped this session
    pub misses: u32,
    /// Current phase
    pub phase: GamePhase,
    pub ball: Ball,
    /// Rounds started since the last reset (1-based once the first round begins)
    pub round: u32,
    /// Ticks applied since the last reset
    pub time_ticks: u64,
}

impl GameState {
    /// Fresh state with zeroed counters. The first round has not started yet.
    pub fn new(seed: u64, config: &GameConfig) -> Self {
        Self {
            rng_state: RngState::new(seed),
            hits: 0,
            misses: 0,
            phase: GamePhase::Running,
            ball: Ball::new(config.center(), config.ball_radius),
            round: 0,
            time_ticks: 0,
        }
    }

    /// Zero counters in place without touching the ball
    pub fn clear_score(&mut self) {
        self.hits = 0;
        self.misses = 0;
        self.round = 0;
        self.time_ticks = 0;
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

/// Notable transitions, queued for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RoundEvent {
    /// Ball re-centered and launched
    RoundStarted { round: u32, direction: Direction },
    /// Player clicked the ball
    Hit { hits: u32 },
    /// Ball left the bounds
    Missed { misses: u32 },
    Paused,
    Resumed,
    /// Miss threshold reached
    GameOver { hits: u32, misses: u32 },
    /// Counters cleared by the player
    Reset,
}
