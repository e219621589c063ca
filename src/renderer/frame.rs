//! Frame assembly: turns the simulation's draw calls into one vertex list
//!
//! `FrameBuilder` is the display-surface side of `sim::Frontend`. Each tick's
//! grid scan starts a fresh frame, so if a driver runs several ticks between
//! presents, only the latest one is shown.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::Scoreboard;
use crate::consts::{BALL_OUTLINE_WIDTH, CELL_SIZE};
use crate::sim::{Ball, Diagnostics, Faction, Frontend, Tally};

/// Segments used for ball fill and outline
const BALL_SEGMENTS: u32 = 24;

/// Collects vertices and scores for the next present
#[derive(Debug, Default)]
pub struct FrameBuilder {
    vertices: Vec<Vertex>,
    scoreboard: Option<Scoreboard>,
    /// Forward periodic snapshots to the log
    pub diagnostics: bool,
}

impl FrameBuilder {
    pub fn new(diagnostics: bool) -> Self {
        Self {
            vertices: Vec::new(),
            scoreboard: None,
            diagnostics,
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Scores published by the latest tick, taken once
    pub fn take_scoreboard(&mut self) -> Option<Scoreboard> {
        self.scoreboard.take()
    }
}

impl Frontend for FrameBuilder {
    fn draw_cell(&mut self, i: usize, j: usize, faction: Faction) {
        // First cell of the scan starts a new frame
        if i == 0 && j == 0 {
            self.vertices.clear();
        }
        let min = Vec2::new(i as f32 * CELL_SIZE, j as f32 * CELL_SIZE);
        shapes::rect(
            &mut self.vertices,
            min,
            Vec2::splat(CELL_SIZE),
            colors::territory(faction),
        );
    }

    fn show_scores(&mut self, tally: &Tally, total_cells: usize) {
        self.scoreboard = Some(Scoreboard::from_tally(tally, total_cells));
    }

    fn draw_ball(&mut self, ball: &Ball) {
        shapes::circle(
            &mut self.vertices,
            ball.pos,
            ball.radius,
            colors::ball(ball.faction),
            BALL_SEGMENTS,
        );
        // Stroke centered on the rim
        let half = BALL_OUTLINE_WIDTH / 2.0;
        shapes::ring(
            &mut self.vertices,
            ball.pos,
            ball.radius - half,
            ball.radius + half,
            colors::BALL_OUTLINE,
            BALL_SEGMENTS,
        );
    }

    fn log_diagnostics(&mut self, diagnostics: &Diagnostics) {
        if self.diagnostics {
            diagnostics.log();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MotionPolicy;
    use crate::sim::{SimState, present_initial, tick};

    #[test]
    fn test_frame_holds_grid_and_balls() {
        let mut state = SimState::new(1, MotionPolicy::TerritorySpeed);
        let mut frame = FrameBuilder::new(false);
        tick(&mut state, &mut frame);

        let cells = state.total_cells() * 6;
        let per_ball = (BALL_SEGMENTS * 3 + BALL_SEGMENTS * 6) as usize;
        assert_eq!(frame.vertices().len(), cells + 3 * per_ball);
        assert!(frame.take_scoreboard().is_some());
        assert!(frame.take_scoreboard().is_none());
    }

    #[test]
    fn test_consecutive_ticks_do_not_accumulate() {
        let mut state = SimState::new(1, MotionPolicy::TerritorySpeed);
        let mut frame = FrameBuilder::new(false);
        present_initial(&state, &mut frame);
        let first = frame.vertices().len();
        tick(&mut state, &mut frame);
        tick(&mut state, &mut frame);
        assert_eq!(frame.vertices().len(), first);
    }

    #[test]
    fn test_cells_use_faction_colors() {
        let state = SimState::new(1, MotionPolicy::TerritorySpeed);
        let mut frame = FrameBuilder::new(false);
        present_initial(&state, &mut frame);
        // Scan is column-major, so the first quad is cell (0, 0): Wei
        assert_eq!(frame.vertices()[0].color, colors::WEI_TERRITORY);
    }
}
