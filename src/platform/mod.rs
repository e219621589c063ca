//! Platform abstraction layer
//!
//! Both drivers (browser animation frames, native sleep loop) feed wall-clock
//! deltas into a `FrameClock`, which turns them into whole simulation ticks
//! at the fixed frame rate after a one-shot startup delay.

use crate::consts::{FRAME_DT, MAX_CATCHUP_TICKS, STARTUP_DELAY};

/// Longest wall-clock step credited to the accumulator, in seconds
const MAX_FRAME_GAP: f32 = 0.1;

/// Fixed-rate tick scheduler with a startup delay
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Seconds left before the first tick
    delay_remaining: f32,
    accumulator: f32,
    started: bool,
    dt: f32,
    max_catchup: u32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(STARTUP_DELAY)
    }
}

impl FrameClock {
    pub fn new(startup_delay: f32) -> Self {
        Self {
            delay_remaining: startup_delay.max(0.0),
            accumulator: 0.0,
            started: false,
            dt: FRAME_DT,
            max_catchup: MAX_CATCHUP_TICKS,
        }
    }

    /// Whether the startup delay has elapsed
    pub fn is_running(&self) -> bool {
        self.started
    }

    /// Feed `elapsed` seconds of wall time; returns how many ticks to run now
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        let mut elapsed = elapsed.max(0.0);

        // The delay is wall time, so it takes the full step unclamped
        if !self.started {
            if elapsed < self.delay_remaining {
                self.delay_remaining -= elapsed;
                return 0;
            }
            elapsed -= self.delay_remaining;
            self.delay_remaining = 0.0;
            self.started = true;
            log::info!("Startup delay elapsed, simulation running");
        }

        // Ignore huge gaps (tab in background, debugger pause)
        self.accumulator += elapsed.min(MAX_FRAME_GAP);
        let mut ticks = 0;
        while self.accumulator >= self.dt && ticks < self.max_catchup {
            self.accumulator -= self.dt;
            ticks += 1;
        }
        // Drop backlog we refused to run
        if ticks == self.max_catchup {
            self.accumulator = self.accumulator.min(self.dt);
        }
        ticks
    }

    /// Seconds until the next tick is due
    pub fn time_to_next_tick(&self) -> f32 {
        if self.started {
            (self.dt - self.accumulator).max(0.0)
        } else {
            self.delay_remaining
        }
    }
}
