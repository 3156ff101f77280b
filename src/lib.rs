//! Ball Game - click the ball before it leaves the window
//!
//! Core modules:
//! - `sim`: Round controller, game state and the animation clock
//! - `config`: Fixed game configuration carried into the controller
//! - `view`: Snapshot published to the presentation layer

pub mod config;
pub mod sim;
pub mod view;

pub use config::GameConfig;
pub use sim::{Direction, GamePhase, GameState, RoundController, RoundEvent};
pub use view::RoundView;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Window dimensions
    pub const WINDOW_WIDTH: f32 = 400.0;
    pub const WINDOW_HEIGHT: f32 = 300.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 20.0;
    /// Horizontal displacement per frame tick
    pub const BALL_SPEED: f32 = 2.0;

    /// How far past each window edge the ball center may travel before the round is lost
    pub const BOUNDS_MARGIN: f32 = 20.0;

    /// Misses that end the session
    pub const MISS_THRESHOLD: u32 = 5;
}

/// Center point of a `width` x `height` window
#[inline]
pub fn window_center(width: f32, height: f32) -> Vec2 {
    Vec2::new(width / 2.0, height / 2.0)
}
