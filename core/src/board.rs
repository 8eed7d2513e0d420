use core::ops::Index;
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Rectangular grid of cells stored row-major, plus the number of mines it holds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl Board {
    /// Creates a board of the configured size without any mines.
    pub fn new(config: GameConfig) -> Self {
        let (rows, cols) = config.size;
        let cells = Array2::from_shape_fn((usize::from(rows), usize::from(cols)), |(row, col)| {
            Cell::new((row as Coord, col as Coord))
        });
        Self {
            cells,
            mine_count: 0,
        }
    }

    /// Creates a board with mines exactly at `mine_coords`, duplicates are counted once.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let config = GameConfig::new(size, 0);
        let mut board = Self::new(config);

        for &coords in mine_coords {
            let coords = board.validate_coords(coords)?;
            let cell = &mut board.cells[coords.to_nd_index()];
            if !cell.is_mine {
                cell.is_mine = true;
                board.mine_count += 1;
            }
        }

        Ok(board)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, cols) = self.size();
        if coords.0 < rows && coords.1 < cols {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&self[coords])
    }

    /// All cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// The up-to-8 cells around `coords`, never the cell itself and never wrapping around an edge.
    pub fn adjacent_cells(&self, coords: Coord2) -> impl Iterator<Item = &Cell> {
        self.iter_neighbors(coords).map(move |pos| &self[pos])
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most 8 neighbours
        self.adjacent_cells(coords).filter(|cell| cell.is_mine).count() as u8
    }

    /// Marks `count` more cells as mines, sampling uniformly random positions and rejecting the ones that already
    /// hold a mine.
    pub fn place_mines<R: Rng>(&mut self, count: CellCount, rng: &mut R) {
        let free_cells = self.safe_cell_count();
        let count = if count > free_cells {
            log::warn!(
                "Cannot place {} mines, only {} cells are free",
                count,
                free_cells
            );
            free_cells
        } else {
            count
        };

        let (rows, cols) = self.size();
        let mut placed = 0;
        while placed < count {
            let coords = (rng.random_range(0..rows), rng.random_range(0..cols));
            let cell = &mut self.cells[coords.to_nd_index()];
            if !cell.is_mine {
                cell.is_mine = true;
                placed += 1;
            }
        }
        self.mine_count += placed;
        log::debug!("placed {} mines on a {}x{} board", placed, rows, cols);
    }

    /// Whether every cell is either a mine or revealed, flags play no part.
    pub fn has_won(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_mine || cell.is_revealed)
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
