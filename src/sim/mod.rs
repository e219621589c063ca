//! Deterministic simulation module
//!
//! All territory logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick
//! - Seeded RNG only
//! - Stable iteration order (balls in faction order)
//! - No rendering or platform dependencies; drawing goes through `Frontend`

pub mod collision;
pub mod faction;
pub mod grid;
pub mod speed;
pub mod state;
pub mod tick;

pub use collision::{BoundaryHit, PROBES, resolve_boundary, resolve_cell_hits};
pub use faction::Faction;
pub use grid::{Tally, TerritoryGrid};
pub use speed::{bezier_speed_curve, perturbation_strength, update_speed};
pub use state::{Ball, Motion, SimState, SpeedSample};
pub use tick::{Diagnostics, Frontend, Headless, present_initial, speed_samples, tick};
