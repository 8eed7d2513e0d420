use serde::{Deserialize, Serialize};

use crate::{Coord, Coord2};

/// One grid position. Position is fixed for the board's lifetime, the flags change as the game is played.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    coords: Coord2,
    pub(crate) is_mine: bool,
    pub(crate) is_revealed: bool,
    pub(crate) is_flagged: bool,
}

impl Cell {
    pub(crate) const fn new(coords: Coord2) -> Self {
        Self {
            coords,
            is_mine: false,
            is_revealed: false,
            is_flagged: false,
        }
    }

    pub const fn coords(&self) -> Coord2 {
        self.coords
    }

    pub const fn row(&self) -> Coord {
        self.coords.0
    }

    pub const fn col(&self) -> Coord {
        self.coords.1
    }

    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub const fn is_revealed(&self) -> bool {
        self.is_revealed
    }

    pub const fn is_flagged(&self) -> bool {
        self.is_flagged
    }
}

/// Player-visible state of a cell, what a renderer needs to draw it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    #[default]
    Hidden,
    /// Revealed safe cell with its adjacent mine count.
    Revealed(u8),
    Flagged,
    /// Mine exposed at the end of a lost game.
    Mine,
}

impl CellView {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}
