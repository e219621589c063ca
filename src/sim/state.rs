//! Simulation state and core types
//!
//! Everything one tick reads or writes lives in `SimState`; the driver owns it
//! and passes it into `tick` by `&mut`.

use std::f32::consts::{FRAC_PI_4, PI};

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::faction::Faction;
use super::grid::{Tally, TerritoryGrid};
use crate::consts::*;
use crate::{normalize_angle, polar_to_cartesian};
use crate::settings::MotionPolicy;

/// How a ball's motion is parameterized
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Motion {
    /// Heading in [0, 2π) plus scalar speed (territory-speed model)
    Polar { angle: f32, speed: f32 },
    /// Raw per-frame velocity (jitter model)
    Vector { vel: Vec2 },
}

impl Motion {
    /// Displacement applied per frame
    pub fn velocity(&self) -> Vec2 {
        match *self {
            Motion::Polar { angle, speed } => polar_to_cartesian(speed, angle),
            Motion::Vector { vel } => vel,
        }
    }

    pub fn speed(&self) -> f32 {
        match *self {
            Motion::Polar { speed, .. } => speed,
            Motion::Vector { vel } => vel.length(),
        }
    }

    /// Invert the horizontal component
    pub fn reflect_x(&mut self) {
        match self {
            Motion::Polar { angle, .. } => *angle = normalize_angle(PI - *angle),
            Motion::Vector { vel } => vel.x = -vel.x,
        }
    }

    /// Invert the vertical component
    pub fn reflect_y(&mut self) {
        match self {
            Motion::Polar { angle, .. } => *angle = normalize_angle(-*angle),
            Motion::Vector { vel } => vel.y = -vel.y,
        }
    }
}

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ball {
    /// Side this ball paints for
    pub faction: Faction,
    pub pos: Vec2,
    pub motion: Motion,
    pub radius: f32,
}

impl Ball {
    pub fn new(faction: Faction, pos: Vec2, motion: Motion) -> Self {
        Self {
            faction,
            pos,
            motion,
            radius: BALL_RADIUS,
        }
    }

    /// Ball placed at the center of its faction's starting territory
    pub fn spawn(faction: Faction, policy: MotionPolicy, width: f32, height: f32) -> Self {
        let (pos, heading) = match faction {
            Faction::Wei => (Vec2::new(width / 2.0, height / 4.0), FRAC_PI_4),
            Faction::Shu => (Vec2::new(width / 4.0, height * 3.0 / 4.0), -FRAC_PI_4),
            Faction::Wu => (Vec2::new(width * 3.0 / 4.0, height * 3.0 / 4.0), 5.0 * FRAC_PI_4),
        };
        let motion = match policy {
            MotionPolicy::TerritorySpeed => Motion::Polar {
                angle: normalize_angle(heading),
                speed: START_SPEED,
            },
            MotionPolicy::Jitter => Motion::Vector {
                vel: polar_to_cartesian(VECTOR_START_SPEED, heading),
            },
        };
        Self::new(faction, pos, motion)
    }

    /// Move by one frame of motion
    pub fn advance(&mut self) {
        self.pos += self.motion.velocity();
    }
}

/// Per-ball output of the speed model, kept for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SpeedSample {
    pub speed: f32,
    /// Territory ratio the speed was derived from
    pub ratio: f32,
    /// Perturbation strength bound used this frame (0 for the jitter model)
    pub perturbation: f32,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Frames simulated so far
    pub frame: u64,
    /// Playfield size in world units
    pub width: f32,
    pub height: f32,
    pub grid: TerritoryGrid,
    /// Balls in fixed faction order
    pub balls: Vec<Ball>,
    /// Tally from the most recent scan
    pub tally: Tally,
    /// Latest speed-model output per ball (same order as `balls`)
    pub samples: Vec<SpeedSample>,
}

impl SimState {
    /// Standard 40x30 field with one ball per faction
    pub fn new(seed: u64, policy: MotionPolicy) -> Self {
        let grid = TerritoryGrid::with_initial_partition(CELLS_X, CELLS_Y);
        let balls = Faction::ALL
            .iter()
            .map(|&f| Ball::spawn(f, policy, FIELD_WIDTH, FIELD_HEIGHT))
            .collect();
        Self::from_parts(seed, grid, balls)
    }

    /// Build a state from an explicit grid and ball list. The playfield size
    /// follows the grid.
    pub fn from_parts(seed: u64, grid: TerritoryGrid, balls: Vec<Ball>) -> Self {
        let tally = grid.tally();
        let samples = vec![SpeedSample::default(); balls.len()];
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            frame: 0,
            width: grid.width() as f32 * CELL_SIZE,
            height: grid.height() as f32 * CELL_SIZE,
            grid,
            balls,
            tally,
            samples,
        }
    }

    pub fn total_cells(&self) -> usize {
        self.grid.total_cells()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_positions() {
        let state = SimState::new(1, MotionPolicy::TerritorySpeed);
        assert_eq!(state.balls.len(), 3);
        assert_eq!(state.balls[0].pos, Vec2::new(320.0, 120.0));
        assert_eq!(state.balls[1].pos, Vec2::new(160.0, 360.0));
        assert_eq!(state.balls[2].pos, Vec2::new(480.0, 360.0));

        // Each ball starts on its own territory
        for ball in &state.balls {
            let (i, j) = state.grid.cell_at(ball.pos.x, ball.pos.y).unwrap();
            assert_eq!(state.grid.get(i, j), Some(ball.faction));
        }
    }

    #[test]
    fn test_reflect_polar() {
        let mut m = Motion::Polar { angle: FRAC_PI_4, speed: 1.0 };
        m.reflect_x();
        let v = m.velocity();
        assert!(v.x < 0.0 && v.y > 0.0);
        m.reflect_y();
        let v = m.velocity();
        assert!(v.x < 0.0 && v.y < 0.0);
        if let Motion::Polar { angle, .. } = m {
            assert!((angle - 5.0 * FRAC_PI_4).abs() < 1e-5);
        }
    }

    #[test]
    fn test_reflect_vector() {
        let mut m = Motion::Vector { vel: Vec2::new(3.0, -2.0) };
        m.reflect_x();
        assert_eq!(m.velocity(), Vec2::new(-3.0, -2.0));
        m.reflect_y();
        assert_eq!(m.velocity(), Vec2::new(-3.0, 2.0));
    }

    #[test]
    fn test_jitter_spawn_within_bounds() {
        let state = SimState::new(1, MotionPolicy::Jitter);
        for ball in &state.balls {
            let v = ball.motion.velocity();
            assert!(v.x.abs() >= MIN_SPEED && v.x.abs() <= VECTOR_MAX_SPEED);
            assert!(v.y.abs() >= MIN_SPEED && v.y.abs() <= VECTOR_MAX_SPEED);
        }
    }
}
