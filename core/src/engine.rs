use alloc::collections::VecDeque;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    #[default]
    Active,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// A single game: the board plus whether it is still being played.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayEngine {
    board: Board,
    flagged_count: CellCount,
    state: EngineState,
}

impl PlayEngine {
    pub fn new(board: Board) -> Self {
        log::debug!(
            "new game: {:?} board with {} mines",
            board.size(),
            board.mine_count()
        );
        Self {
            board,
            flagged_count: 0,
            state: Default::default(),
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.board.mine_count()
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<&Cell> {
        self.board.cell_at(coords)
    }

    pub fn view_at(&self, coords: Coord2) -> Result<CellView> {
        let cell = self.board.cell_at(coords)?;
        Ok(self.view_of(cell))
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_engine(self)
    }

    pub fn has_won(&self) -> bool {
        self.board.has_won()
    }

    pub(crate) fn view_of(&self, cell: &Cell) -> CellView {
        if cell.is_mine && matches!(self.state, EngineState::Lost) {
            CellView::Mine
        } else if cell.is_revealed {
            CellView::Revealed(self.board.adjacent_mine_count(cell.coords()))
        } else if cell.is_flagged {
            CellView::Flagged
        } else {
            CellView::Hidden
        }
    }

    /// Toggles the flag on an unrevealed cell; revealed cells and finished games are left alone.
    pub fn flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.board.validate_coords(coords)?;
        if !self.state.is_active() {
            return Ok(MarkOutcome::NoChange);
        }

        let cell = self.board.cell_mut(coords);
        if cell.is_revealed {
            return Ok(MarkOutcome::NoChange);
        }

        cell.is_flagged = !cell.is_flagged;
        if cell.is_flagged {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        log::trace!("flag {:?}: {}", coords, cell.is_flagged);
        Ok(MarkOutcome::Changed)
    }

    /// Reveals a cell. A zero cell keeps opening its unrevealed, unflagged neighbours until the region is bounded
    /// by numbered cells.
    pub fn dig(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.board.validate_coords(coords)?;
        if !self.state.is_active() {
            return Ok(RevealOutcome::NoChange);
        }

        let cell = self.board.cell_mut(coords);
        if cell.is_flagged {
            return Ok(RevealOutcome::NoChange);
        }

        let mut newly_revealed: CellCount = 0;
        if !cell.is_revealed {
            cell.is_revealed = true;
            newly_revealed += 1;
        }

        if cell.is_mine {
            log::debug!("dug a mine at {:?}", coords);
            self.game_over(false);
            return Ok(RevealOutcome::HitMine);
        }

        if self.board.adjacent_mine_count(coords) == 0 {
            newly_revealed += self.flood_from(coords);
        }

        if self.board.has_won() {
            self.game_over(true);
            Ok(RevealOutcome::Won)
        } else if newly_revealed > 0 {
            Ok(RevealOutcome::Revealed)
        } else {
            Ok(RevealOutcome::NoChange)
        }
    }

    /// Ends the game, later calls are ignored.
    pub fn game_over(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won {
            EngineState::Won
        } else {
            EngineState::Lost
        };
        log::debug!("game over: {:?}", self.state);
    }

    /// Worklist flood fill from a revealed zero cell, returns how many cells it revealed.
    ///
    /// Neighbours of a zero cell are never mines, so nothing opened here can end the game.
    fn flood_from(&mut self, origin: Coord2) -> CellCount {
        let mut revealed = 0;
        let mut to_visit: VecDeque<Coord2> = self.hidden_neighbors(origin).collect();

        while let Some(visit_coords) = to_visit.pop_front() {
            let cell = self.board.cell_mut(visit_coords);
            if cell.is_revealed || cell.is_flagged {
                continue;
            }
            cell.is_revealed = true;
            revealed += 1;

            if self.board.adjacent_mine_count(visit_coords) == 0 {
                to_visit.extend(self.hidden_neighbors(visit_coords));
            }
        }

        revealed
    }

    fn hidden_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + use<'_> {
        self.board.iter_neighbors(coords).filter(|&pos| {
            let cell = &self.board[pos];
            !cell.is_revealed && !cell.is_flagged
        })
    }
}
