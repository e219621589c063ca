//! Pong Wars - three factions fighting over a grid of territory cells
//!
//! Core modules:
//! - `sim`: Deterministic simulation (territory grid, balls, collisions, tick)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Fixed-rate frame clock shared by the web and native drivers
//! - `scoreboard`: Score display model derived from the per-frame tally
//! - `settings`: Driver preferences (motion policy, seed, diagnostics)

pub mod platform;
pub mod renderer;
pub mod scoreboard;
pub mod settings;
pub mod sim;

pub use scoreboard::Scoreboard;
pub use settings::{MotionPolicy, Settings};

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Edge length of one territory cell
    pub const CELL_SIZE: f32 = 16.0;
    /// Ball radius (half a cell)
    pub const BALL_RADIUS: f32 = CELL_SIZE / 2.0;

    /// Playfield dimensions (40 x 30 cells)
    pub const FIELD_WIDTH: f32 = 640.0;
    pub const FIELD_HEIGHT: f32 = 480.0;
    pub const CELLS_X: usize = (FIELD_WIDTH / CELL_SIZE) as usize;
    pub const CELLS_Y: usize = (FIELD_HEIGHT / CELL_SIZE) as usize;

    /// Territory-speed model: speed at full territory
    pub const MAX_SPEED: f32 = 20.0;
    /// Speed every ball starts with before the first territory update
    pub const START_SPEED: f32 = 3.0;

    /// Jitter model bounds (per velocity component)
    pub const VECTOR_MAX_SPEED: f32 = 10.0;
    pub const MIN_SPEED: f32 = 5.0;
    pub const VECTOR_START_SPEED: f32 = 8.0;
    /// Per-frame velocity noise amplitude for the jitter model
    pub const VECTOR_NOISE: f32 = 0.01;

    /// Perturbation strength at zero territory / floor at full territory
    pub const PERTURBATION_SPAN: f32 = 0.05;
    pub const PERTURBATION_FLOOR: f32 = 0.005;

    /// Fixed simulation rate
    pub const FRAME_RATE: u32 = 100;
    pub const FRAME_DT: f32 = 1.0 / FRAME_RATE as f32;
    /// Maximum ticks a driver may run to catch up in one wakeup
    pub const MAX_CATCHUP_TICKS: u32 = 8;
    /// Delay before the first tick (seconds)
    pub const STARTUP_DELAY: f32 = 1.0;

    /// Frames between diagnostic snapshots
    pub const DIAGNOSTIC_INTERVAL: u64 = 1_000;

    /// Ball outline width
    pub const BALL_OUTLINE_WIDTH: f32 = 2.0;
}

/// Normalize an angle into [0, 2π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::TAU;
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negatives up to exactly TAU
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
