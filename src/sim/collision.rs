//! Collision detection and response against the territory grid
//!
//! Deliberately fuzzy: a ball samples eight points on its rim, and every probe
//! that lands on an enemy cell both captures the cell and flips one motion
//! axis. Several probes can fire in the same frame.

use std::f32::consts::FRAC_1_SQRT_2;

use glam::Vec2;

use super::grid::TerritoryGrid;
use super::state::Ball;

/// Which motion component a probe hit inverts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A sample point on the ball rim, as a unit offset from its center
#[derive(Debug, Clone, Copy)]
pub struct Probe {
    pub offset: Vec2,
    pub axis: Axis,
}

const D: f32 = FRAC_1_SQRT_2;

/// Probes at 0°, 45°, ..., 315°. The axis is horizontal only where
/// |cos| > |sin|; the diagonals have equal magnitudes and count as vertical.
pub const PROBES: [Probe; 8] = [
    Probe { offset: Vec2::new(1.0, 0.0), axis: Axis::Horizontal },
    Probe { offset: Vec2::new(D, D), axis: Axis::Vertical },
    Probe { offset: Vec2::new(0.0, 1.0), axis: Axis::Vertical },
    Probe { offset: Vec2::new(-D, D), axis: Axis::Vertical },
    Probe { offset: Vec2::new(-1.0, 0.0), axis: Axis::Horizontal },
    Probe { offset: Vec2::new(-D, -D), axis: Axis::Vertical },
    Probe { offset: Vec2::new(0.0, -1.0), axis: Axis::Vertical },
    Probe { offset: Vec2::new(D, -D), axis: Axis::Vertical },
];

/// Capture enemy cells under the ball's rim and bounce off them.
///
/// Returns the number of cells repainted this call.
pub fn resolve_cell_hits(ball: &mut Ball, grid: &mut TerritoryGrid) -> u32 {
    let mut repainted = 0;
    for probe in &PROBES {
        let point = ball.pos + probe.offset * ball.radius;
        let Some((i, j)) = grid.cell_at(point.x, point.y) else {
            continue;
        };
        if grid.get(i, j) == Some(ball.faction) {
            continue;
        }

        grid.paint(i, j, ball.faction);
        repainted += 1;

        match probe.axis {
            Axis::Horizontal => ball.motion.reflect_x(),
            Axis::Vertical => ball.motion.reflect_y(),
        }
    }
    repainted
}

/// Axes flipped by the boundary resolver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundaryHit {
    pub x: bool,
    pub y: bool,
}

impl BoundaryHit {
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}

/// Bounce off the playfield edges if the next step would leave
/// [radius, size - radius] on either axis.
pub fn resolve_boundary(ball: &mut Ball, width: f32, height: f32) -> BoundaryHit {
    let next = ball.pos + ball.motion.velocity();
    let r = ball.radius;
    let mut hit = BoundaryHit::default();

    if next.x > width - r || next.x < r {
        ball.motion.reflect_x();
        hit.x = true;
    }
    if next.y > height - r || next.y < r {
        ball.motion.reflect_y();
        hit.y = true;
    }
    hit
}
