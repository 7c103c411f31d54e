//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Frame pacing (variable frame time → fixed simulation steps)
//! - Headless play (native runner, demos)
//! - Browser bridge (wasm32 only)

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::sim::{GameState, TickInput, tick};

/// Converts variable frame times into fixed simulation steps
#[derive(Debug, Clone, Default)]
pub struct FrameStepper {
    accumulator: f32,
}

impl FrameStepper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run as many fixed steps as `frame_dt` covers. One-shot inputs
    /// (pause) are cleared after the first step consumes them.
    /// Returns the number of steps taken.
    pub fn advance(&mut self, state: &mut GameState, input: &mut TickInput, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, 0.1);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(state, input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            input.pause = false;
        }

        // Drop time we could not catch up on
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }
}
