//! The three competing factions

use serde::Serialize;

/// One side of the territory war. Cells and balls both carry this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Faction {
    /// Starts with the top half of the field
    Wei,
    /// Starts with the bottom-left quarter
    Shu,
    /// Starts with the bottom-right quarter
    Wu,
}

impl Faction {
    /// Stable iteration order (ball order, tally order, HUD order)
    pub const ALL: [Faction; 3] = [Faction::Wei, Faction::Shu, Faction::Wu];
    pub const COUNT: usize = Self::ALL.len();

    /// Dense index into per-faction arrays
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Faction::Wei => 0,
            Faction::Shu => 1,
            Faction::Wu => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Faction::Wei => "wei",
            Faction::Shu => "shu",
            Faction::Wu => "wu",
        }
    }
}
