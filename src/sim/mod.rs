//! Round simulation module
//!
//! All gameplay logic lives here. This module has no rendering or platform
//! dependencies:
//! - Seeded RNG only
//! - One owned `GameState`, mutated only by `RoundController`
//! - Frames are applied only while the animation clock runs

pub mod clock;
pub mod controller;
pub mod state;
pub mod tick;

pub use clock::AnimationClock;
pub use controller::RoundController;
pub use state::{Ball, Direction, GamePhase, GameState, RngState, RoundEvent};
pub use tick::{TickOutcome, tick};
