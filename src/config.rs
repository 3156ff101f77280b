//! Game configuration
//!
//! The player cannot change any of this; the struct exists so the controller
//! receives its dimensions explicitly instead of reading globals.

use anyhow::{Result, ensure};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::window_center;

/// Dimensions and tuning for one game session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub window_width: f32,
    pub window_height: f32,
    pub ball_radius: f32,
    /// Displacement per tick
    pub ball_speed: f32,
    /// Overshoot allowed past each horizontal edge
    pub bounds_margin: f32,
    pub miss_threshold: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            ball_radius: BALL_RADIUS,
            ball_speed: BALL_SPEED,
            bounds_margin: BOUNDS_MARGIN,
            miss_threshold: MISS_THRESHOLD,
        }
    }
}

impl GameConfig {
    /// Where every round starts
    pub fn center(&self) -> Vec2 {
        window_center(self.window_width, self.window_height)
    }

    pub fn left_bound(&self) -> f32 {
        -self.bounds_margin
    }

    pub fn right_bound(&self) -> f32 {
        self.window_width + self.bounds_margin
    }

    /// True once the ball center is strictly outside the horizontal bounds
    pub fn is_out_of_bounds(&self, x: f32) -> bool {
        x > self.right_bound() || x < self.left_bound()
    }

    /// Reject configurations the round logic cannot make progress with
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.window_width > 0.0 && self.window_height > 0.0,
            "window must have a positive size, got {}x{}",
            self.window_width,
            self.window_height
        );
        ensure!(self.ball_radius > 0.0, "ball radius must be positive, got {}", self.ball_radius);
        ensure!(self.ball_speed > 0.0, "ball speed must be positive, got {}", self.ball_speed);
        ensure!(
            self.bounds_margin >= 0.0,
            "bounds margin must not be negative, got {}",
            self.bounds_margin
        );
        ensure!(self.miss_threshold > 0, "miss threshold must be at least 1");
        Ok(())
    }
}
