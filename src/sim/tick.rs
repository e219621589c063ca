//! Fixed-rate simulation tick
//!
//! One call advances the world by exactly one frame. The frontend is borrowed
//! for the whole step and sees the grid and balls at the points in the frame
//! where they are drawn.

use serde::Serialize;

use super::collision::{resolve_boundary, resolve_cell_hits};
use super::faction::Faction;
use super::grid::Tally;
use super::speed::update_speed;
use super::state::{Ball, SimState, SpeedSample};
use crate::consts::DIAGNOSTIC_INTERVAL;

/// Per-ball entry in a diagnostics snapshot
#[derive(Debug, Clone, Serialize)]
pub struct BallDiagnostics {
    pub faction: Faction,
    pub speed: f32,
    pub ratio: f32,
    pub perturbation: f32,
}

/// Periodic snapshot for the log
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostics {
    pub frame: u64,
    pub territories: Tally,
    pub balls: Vec<BallDiagnostics>,
}

impl Diagnostics {
    /// Write the snapshot to the log as one JSON line
    pub fn log(&self) {
        match serde_json::to_string(self) {
            Ok(json) => log::info!("frame {}: {}", self.frame, json),
            Err(e) => log::warn!("Failed to encode diagnostics: {}", e),
        }
    }

    fn capture(state: &SimState) -> Self {
        let balls = state
            .balls
            .iter()
            .zip(&state.samples)
            .map(|(ball, s)| BallDiagnostics {
                faction: ball.faction,
                speed: s.speed,
                ratio: s.ratio,
                perturbation: s.perturbation,
            })
            .collect();
        Self {
            frame: state.frame,
            territories: state.tally,
            balls,
        }
    }
}

/// Display, score and log collaborators for a running simulation.
///
/// All hooks are fire-and-forget; the defaults discard everything except
/// diagnostics, which go to the `log` facade.
pub trait Frontend {
    /// One cell of the per-frame full-grid repaint
    fn draw_cell(&mut self, _i: usize, _j: usize, _faction: Faction) {}

    /// Scores for this frame (called once, right after the grid scan)
    fn show_scores(&mut self, _tally: &Tally, _total_cells: usize) {}

    /// A ball at its pre-move position for this frame
    fn draw_ball(&mut self, _ball: &Ball) {}

    fn log_diagnostics(&mut self, diagnostics: &Diagnostics) {
        diagnostics.log();
    }
}

/// Frontend that ignores drawing and logs diagnostics
#[derive(Debug, Default)]
pub struct Headless;

impl Frontend for Headless {}

/// Advance the simulation by one frame
pub fn tick<F: Frontend + ?Sized>(state: &mut SimState, frontend: &mut F) {
    let total_cells = state.total_cells();

    // Redraw and recount in a single pass; scores reflect last frame's paints
    state.tally = state
        .grid
        .scan_and_tally(|i, j, faction| frontend.draw_cell(i, j, faction));
    frontend.show_scores(&state.tally, total_cells);

    let SimState {
        grid,
        balls,
        tally,
        samples,
        rng,
        width,
        height,
        ..
    } = state;

    for (ball, sample) in balls.iter_mut().zip(samples.iter_mut()) {
        resolve_cell_hits(ball, grid);
        if resolve_boundary(ball, *width, *height).any() {
            log::trace!("{} ball bounced off the edge at {}", ball.faction.as_str(), ball.pos);
        }
        frontend.draw_ball(ball);
        ball.advance();
        *sample = update_speed(ball, tally.count(ball.faction), total_cells, rng);
    }

    state.frame += 1;
    if state.frame % DIAGNOSTIC_INTERVAL == 0 {
        frontend.log_diagnostics(&Diagnostics::capture(state));
    }
}

/// Draw the starting layout once, before the first tick
pub fn present_initial<F: Frontend + ?Sized>(state: &SimState, frontend: &mut F) {
    let tally = state
        .grid
        .scan_and_tally(|i, j, faction| frontend.draw_cell(i, j, faction));
    for ball in &state.balls {
        frontend.draw_ball(ball);
    }
    frontend.show_scores(&tally, state.total_cells());
}

/// Latest speed samples paired with their balls
pub fn speed_samples(state: &SimState) -> impl Iterator<Item = (&Ball, &SpeedSample)> {
    state.balls.iter().zip(&state.samples)
}
