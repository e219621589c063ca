//! Score display model
//!
//! Turns a raw tally into what the score widgets show: a count and a
//! percentage-of-field bar per faction.

use serde::Serialize;

use crate::sim::{Faction, Tally};

/// One faction's line on the scoreboard
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreEntry {
    pub faction: Faction,
    /// Cells owned
    pub count: usize,
    /// Share of the whole field, 0-100
    pub percent: f32,
}

/// Scores for one frame, in faction order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scoreboard {
    pub entries: [ScoreEntry; Faction::COUNT],
    pub total_cells: usize,
}

impl Scoreboard {
    pub fn from_tally(tally: &Tally, total_cells: usize) -> Self {
        let entries = Faction::ALL.map(|faction| ScoreEntry {
            faction,
            count: tally.count(faction),
            percent: tally.ratio(faction, total_cells) * 100.0,
        });
        Self {
            entries,
            total_cells,
        }
    }

    pub fn entry(&self, faction: Faction) -> &ScoreEntry {
        &self.entries[faction.index()]
    }

    /// Faction with the most cells (earlier faction wins ties)
    pub fn leader(&self) -> Faction {
        self.entries
            .iter()
            .fold(&self.entries[0], |best, e| if e.count > best.count { e } else { best })
            .faction
    }

    /// One-line summary for logs, e.g. `wei 600 (50.0%) | shu 300 (25.0%) | ...`
    pub fn summary(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{} {} ({:.1}%)", e.faction.as_str(), e.count, e.percent))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::TerritoryGrid;

    #[test]
    fn test_initial_scoreboard() {
        let grid = TerritoryGrid::with_initial_partition(40, 30);
        let board = Scoreboard::from_tally(&grid.tally(), grid.total_cells());
        assert_eq!(board.entry(Faction::Wei).count, 600);
        assert!((board.entry(Faction::Wei).percent - 50.0).abs() < 1e-4);
        assert!((board.entry(Faction::Wu).percent - 25.0).abs() < 1e-4);
        let sum: f32 = board.entries.iter().map(|e| e.percent).sum();
        assert!((sum - 100.0).abs() < 1e-3);
        assert_eq!(board.leader(), Faction::Wei);
    }

    #[test]
    fn test_leader_changes_hands() {
        let grid = TerritoryGrid::new(4, 4, Faction::Wu);
        let board = Scoreboard::from_tally(&grid.tally(), grid.total_cells());
        assert_eq!(board.leader(), Faction::Wu);
        assert_eq!(board.entry(Faction::Shu).count, 0);
    }

    #[test]
    fn test_summary_format() {
        let grid = TerritoryGrid::with_initial_partition(40, 30);
        let board = Scoreboard::from_tally(&grid.tally(), grid.total_cells());
        assert_eq!(
            board.summary(),
            "wei 600 (50.0%) | shu 300 (25.0%) | wu 300 (25.0%)"
        );
    }
}
