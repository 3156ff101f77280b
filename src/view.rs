//! Presentation snapshot
//!
//! Everything a host needs to draw one frame, plus the fixed HUD layout.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{AnimationClock, GamePhase, GameState};

/// HUD layout and text
pub mod hud {
    pub const GAME_OVER_TEXT: &str = "Game Over";
    /// Baseline position of the Game Over label
    pub const GAME_OVER_POS: (f32, f32) = (120.0, 150.0);
    pub const GAME_OVER_FONT_SIZE: f32 = 36.0;
    pub const SCORE_FONT_SIZE: f32 = 20.0;
    pub const FOREGROUND_COLOR: &str = "#ffffff";
}

/// Read-only state published after every event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundView {
    pub ball_pos: Vec2,
    pub ball_radius: f32,
    pub hits: u32,
    pub misses: u32,
    pub phase: GamePhase,
    pub game_over_visible: bool,
    /// Ball is drawn and accepts clicks
    pub ball_visible: bool,
    /// Host should keep delivering frames
    pub ticking: bool,
}

impl RoundView {
    pub fn capture(state: &GameState, clock: &AnimationClock) -> Self {
        Self {
            ball_pos: state.ball.pos,
            ball_radius: state.ball.radius,
            hits: state.hits,
            misses: state.misses,
            phase: state.phase,
            game_over_visible: state.is_game_over(),
            ball_visible: state.ball.visible,
            ticking: clock.is_active(),
        }
    }

    pub fn hits_label(&self) -> String {
        format!("Hits: {}", self.hits)
    }

    pub fn misses_label(&self) -> String {
        format!("Misses: {}", self.misses)
    }

    /// Pause button caption for the current phase
    pub fn pause_label(&self) -> &'static str {
        match self.phase {
            GamePhase::Paused => "Resume",
            _ => "Pause",
        }
    }

    /// Hit test for a pointer position in window coordinates
    pub fn ball_contains(&self, point: Vec2) -> bool {
        self.ball_visible && point.distance(self.ball_pos) <= self.ball_radius
    }
}
