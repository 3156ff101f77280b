//! Animation clock
//!
//! The host owns the real frame source (requestAnimationFrame, a timer, a
//! test loop). This only records whether frames should currently be applied.

use serde::{Deserialize, Serialize};

/// Start/stop switch for per-frame updates
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnimationClock {
    active: bool,
    /// Incremented on every stopped -> active transition
    epoch: u32,
    /// Frames accepted since the last start
    frames: u64,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume ticking. Starting an active clock keeps its epoch.
    pub fn start(&mut self) {
        if !self.active {
            self.active = true;
            self.epoch = self.epoch.wrapping_add(1);
            self.frames = 0;
        }
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Accept a frame if the clock is running
    pub fn accept_frame(&mut self) -> bool {
        if self.active {
            self.frames += 1;
        }
        self.active
    }
}
