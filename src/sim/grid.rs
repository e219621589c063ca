//! Territory grid and per-frame tally
//!
//! Every cell always belongs to exactly one faction; there is no empty state.

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::faction::Faction;
use crate::consts::CELL_SIZE;

/// Per-faction cell counts from one full-grid scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    counts: [usize; Faction::COUNT],
}

// Serialized as `{"wei": n, "shu": n, "wu": n}` for log snapshots
impl Serialize for Tally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Faction::COUNT))?;
        for faction in Faction::ALL {
            map.serialize_entry(faction.as_str(), &self.count(faction))?;
        }
        map.end()
    }
}

impl Tally {
    #[inline]
    pub fn count(&self, faction: Faction) -> usize {
        self.counts[faction.index()]
    }

    /// Sum over all factions (equals the grid's cell count after a scan)
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Fraction of `total_cells` owned by `faction`, in [0, 1]
    pub fn ratio(&self, faction: Faction, total_cells: usize) -> f32 {
        if total_cells == 0 {
            return 0.0;
        }
        self.count(faction) as f32 / total_cells as f32
    }

    fn add(&mut self, faction: Faction) {
        self.counts[faction.index()] += 1;
    }
}

/// Fixed-size grid of faction-owned cells, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerritoryGrid {
    width: usize,
    height: usize,
    cells: Vec<Faction>,
}

impl TerritoryGrid {
    /// A grid entirely owned by `fill`
    pub fn new(width: usize, height: usize, fill: Faction) -> Self {
        assert!(width > 0 && height > 0, "territory grid must be non-empty");
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    /// Starting layout: Wei holds the top half, Shu and Wu split the bottom
    /// half into left and right quarters.
    pub fn with_initial_partition(width: usize, height: usize) -> Self {
        let mut grid = Self::new(width, height, Faction::Wei);
        for j in 0..height {
            for i in 0..width {
                // Same halving as the playfield spawn points: j < H/2, i < W/2
                let faction = if (j as f32) < height as f32 / 2.0 {
                    Faction::Wei
                } else if (i as f32) < width as f32 / 2.0 {
                    Faction::Shu
                } else {
                    Faction::Wu
                };
                grid.paint(i, j, faction);
            }
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    fn index(&self, i: usize, j: usize) -> usize {
        j * self.width + i
    }

    /// Owner of cell (i, j), or None if out of bounds
    pub fn get(&self, i: usize, j: usize) -> Option<Faction> {
        if i < self.width && j < self.height {
            Some(self.cells[self.index(i, j)])
        } else {
            None
        }
    }

    /// Hand cell (i, j) to `faction`. Caller guarantees bounds.
    #[inline]
    pub fn paint(&mut self, i: usize, j: usize, faction: Faction) {
        debug_assert!(i < self.width && j < self.height, "paint out of bounds: ({i}, {j})");
        let idx = self.index(i, j);
        self.cells[idx] = faction;
    }

    /// Map a playfield point to the cell containing it
    pub fn cell_at(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        let i = (x / CELL_SIZE).floor();
        let j = (y / CELL_SIZE).floor();
        if !i.is_finite() || !j.is_finite() || i < 0.0 || j < 0.0 {
            return None;
        }
        let (i, j) = (i as usize, j as usize);
        (i < self.width && j < self.height).then_some((i, j))
    }

    /// Visit every cell once (column-major, matching the draw order) and
    /// return the resulting tally.
    pub fn scan_and_tally<F>(&self, mut visit: F) -> Tally
    where
        F: FnMut(usize, usize, Faction),
    {
        let mut tally = Tally::default();
        for i in 0..self.width {
            for j in 0..self.height {
                let faction = self.cells[self.index(i, j)];
                visit(i, j, faction);
                tally.add(faction);
            }
        }
        tally
    }

    pub fn tally(&self) -> Tally {
        self.scan_and_tally(|_, _, _| {})
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_initial_partition_counts() {
        let grid = TerritoryGrid::with_initial_partition(40, 30);
        let tally = grid.tally();
        assert_eq!(tally.count(Faction::Wei), 40 * 15);
        assert_eq!(tally.count(Faction::Shu), 20 * 15);
        assert_eq!(tally.count(Faction::Wu), 20 * 15);
        assert_eq!(tally.total(), 40 * 30);
    }

    #[test]
    fn test_initial_partition_layout() {
        let grid = TerritoryGrid::with_initial_partition(40, 30);
        assert_eq!(grid.get(0, 0), Some(Faction::Wei));
        assert_eq!(grid.get(39, 14), Some(Faction::Wei));
        assert_eq!(grid.get(0, 15), Some(Faction::Shu));
        assert_eq!(grid.get(19, 29), Some(Faction::Shu));
        assert_eq!(grid.get(20, 15), Some(Faction::Wu));
        assert_eq!(grid.get(39, 29), Some(Faction::Wu));
        assert_eq!(grid.get(40, 0), None);
    }

    #[test]
    fn test_paint_moves_one_cell() {
        let mut grid = TerritoryGrid::with_initial_partition(40, 30);
        grid.paint(0, 0, Faction::Wu);
        let tally = grid.tally();
        assert_eq!(tally.count(Faction::Wei), 599);
        assert_eq!(tally.count(Faction::Wu), 301);
        assert_eq!(tally.total(), 1200);
    }

    #[test]
    fn test_cell_at_bounds() {
        let grid = TerritoryGrid::new(40, 30, Faction::Wei);
        assert_eq!(grid.cell_at(0.0, 0.0), Some((0, 0)));
        assert_eq!(grid.cell_at(15.9, 16.0), Some((0, 1)));
        assert_eq!(grid.cell_at(639.9, 479.9), Some((39, 29)));
        assert_eq!(grid.cell_at(640.0, 10.0), None);
        assert_eq!(grid.cell_at(-0.1, 10.0), None);
        assert_eq!(grid.cell_at(10.0, f32::NAN), None);
    }

    #[test]
    fn test_scan_visits_every_cell_once() {
        let grid = TerritoryGrid::with_initial_partition(8, 6);
        let mut seen = vec![0u32; 48];
        let tally = grid.scan_and_tally(|i, j, faction| {
            assert_eq!(grid.get(i, j), Some(faction));
            seen[j * 8 + i] += 1;
        });
        assert!(seen.iter().all(|&n| n == 1));
        assert_eq!(tally.total(), 48);
    }

    #[test]
    fn test_full_conquest_ratio() {
        let grid = TerritoryGrid::new(40, 30, Faction::Shu);
        let tally = grid.tally();
        assert_eq!(tally.ratio(Faction::Shu, grid.total_cells()), 1.0);
        assert_eq!(tally.ratio(Faction::Wei, grid.total_cells()), 0.0);
    }

    #[test]
    fn test_tally_serializes_by_faction_name() {
        let tally = TerritoryGrid::with_initial_partition(40, 30).tally();
        let json = serde_json::to_string(&tally).unwrap();
        assert_eq!(json, r#"{"wei":600,"shu":300,"wu":300}"#);
    }

    proptest! {
        #[test]
        fn tally_is_conserved_under_paints(
            paints in prop::collection::vec((0usize..40, 0usize..30, 0usize..3), 0..200)
        ) {
            let mut grid = TerritoryGrid::with_initial_partition(40, 30);
            for (i, j, f) in paints {
                grid.paint(i, j, Faction::ALL[f]);
            }
            prop_assert_eq!(grid.tally().total(), 40 * 30);
        }
    }
}
