use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything a renderer needs to draw the board at one point in time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: EngineState,
    pub cells: Array2<CellView>,
}

impl Snapshot {
    pub(crate) fn from_engine(engine: &PlayEngine) -> Self {
        let board = engine.board();
        let (rows, cols) = board.size();
        let mut cells = Array2::default((usize::from(rows), usize::from(cols)));
        for cell in board.iter() {
            cells[cell.coords().to_nd_index()] = engine.view_of(cell);
        }
        Self {
            state: engine.state(),
            cells,
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn view_at(&self, coords: Coord2) -> CellView {
        self.cells[coords.to_nd_index()]
    }

    /// Cells whose view differs from `older`, in row-major order. A board of a different size counts as all new.
    pub fn changes_since(&self, older: &Snapshot) -> Vec<(Coord2, CellView)> {
        let same_size = self.cells.dim() == older.cells.dim();
        self.cells
            .indexed_iter()
            .filter(|&(index, view)| !same_size || older.cells[index] != *view)
            .map(|((row, col), &view)| ((row as Coord, col as Coord), view))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(size: Coord2, mines: &[Coord2]) -> PlayEngine {
        PlayEngine::new(Board::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn fresh_snapshot_is_all_hidden() {
        let snapshot = engine((8, 8), &[(1, 1)]).snapshot();

        assert_eq!(snapshot.size(), (8, 8));
        assert_eq!(snapshot.state, EngineState::Active);
        assert!(snapshot.cells.iter().all(|&view| view == CellView::Hidden));
    }

    #[test]
    fn changes_list_only_touched_cells() {
        let mut engine = engine((3, 3), &[(0, 0), (0, 2)]);
        let before = engine.snapshot();

        assert_eq!(engine.dig((2, 1)).unwrap(), RevealOutcome::Revealed);
        engine.flag((0, 0)).unwrap();
        let after = engine.snapshot();

        let changes = after.changes_since(&before);
        assert_eq!(changes.len(), 7);
        assert_eq!(changes[0], ((0, 0), CellView::Flagged));
        assert!(changes.contains(&((1, 1), CellView::Revealed(2))));
        assert!(changes.contains(&((2, 1), CellView::Revealed(0))));
        assert!(!changes.iter().any(|&(coords, _)| coords == (0, 1)));
        assert!(after.changes_since(&after).is_empty());
    }

    #[test]
    fn loss_changes_include_every_mine() {
        let mut engine = engine((3, 3), &[(0, 0), (2, 2)]);
        let before = engine.snapshot();

        engine.dig((0, 0)).unwrap();
        let changes = engine.snapshot().changes_since(&before);

        assert_eq!(
            changes,
            [((0, 0), CellView::Mine), ((2, 2), CellView::Mine)]
        );
    }

    #[test]
    fn resized_board_is_all_changes() {
        let small = engine((2, 2), &[(0, 0)]).snapshot();
        let large = engine((3, 3), &[(0, 0)]).snapshot();

        assert_eq!(large.changes_since(&small).len(), 9);
    }

    #[test]
    fn snapshot_encodes_views_by_name() {
        let mut engine = engine((1, 4), &[(0, 3)]);
        engine.flag((0, 2)).unwrap();
        engine.dig((0, 0)).unwrap();

        let json = serde_json::to_value(engine.snapshot()).unwrap();

        assert_eq!(json["state"], "Active");
        assert_eq!(
            json["cells"]["data"],
            serde_json::json!([{ "Revealed": 0 }, { "Revealed": 0 }, "Flagged", "Hidden"])
        );
    }
}
