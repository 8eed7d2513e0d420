use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::*;

/// Line shown next to the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Playing,
    Won,
    Lost,
}

impl Status {
    pub const fn message(self) -> &'static str {
        use Status::*;
        match self {
            Playing => "Play!",
            Won => "You Won!",
            Lost => "Game Over!",
        }
    }
}

impl From<EngineState> for Status {
    fn from(state: EngineState) -> Self {
        match state {
            EngineState::Active => Self::Playing,
            EngineState::Won => Self::Won,
            EngineState::Lost => Self::Lost,
        }
    }
}

/// Owns the game currently being played. Starting a new game drops the previous one.
///
/// Every board's seed is drawn from a generator seeded once here, so a fixed session seed replays the same sequence
/// of boards.
#[derive(Clone, Debug)]
pub struct Session {
    difficulty: Difficulty,
    engine: PlayEngine,
    seeds: SmallRng,
}

impl Session {
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        let mut seeds = SmallRng::seed_from_u64(seed);
        let engine = Self::create_engine(difficulty, &mut seeds);
        Self {
            difficulty,
            engine,
            seeds,
        }
    }

    pub fn new_game(&mut self, difficulty: Difficulty) {
        log::debug!("new {} game", difficulty);
        self.difficulty = difficulty;
        self.engine = Self::create_engine(difficulty, &mut self.seeds);
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn engine(&self) -> &PlayEngine {
        &self.engine
    }

    pub fn status(&self) -> Status {
        self.engine.state().into()
    }

    pub fn dig(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        self.engine.dig(coords)
    }

    pub fn flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        self.engine.flag(coords)
    }

    fn create_engine(difficulty: Difficulty, seeds: &mut SmallRng) -> PlayEngine {
        let seed: u64 = seeds.random();
        let board = RandomBoardGenerator::new(seed).generate(difficulty.config());
        PlayEngine::new(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_mine(session: &Session) -> Coord2 {
        session
            .engine()
            .board()
            .iter()
            .find(|cell| cell.is_mine())
            .map(Cell::coords)
            .unwrap()
    }

    #[test]
    fn starts_playing_with_preset_board() {
        let session = Session::new(Difficulty::Medium, 3);

        assert_eq!(session.status(), Status::Playing);
        assert_eq!(session.status().message(), "Play!");
        assert_eq!(session.engine().size(), (16, 16));
        assert_eq!(session.engine().total_mines(), 40);
    }

    #[test]
    fn digging_a_mine_reports_game_over() {
        let mut session = Session::new(Difficulty::Easy, 11);
        let mine = first_mine(&session);

        assert_eq!(session.dig(mine), Ok(RevealOutcome::HitMine));
        assert_eq!(session.status(), Status::Lost);
        assert_eq!(session.status().message(), "Game Over!");
    }

    #[test]
    fn revealing_every_safe_cell_reports_win() {
        let mut session = Session::new(Difficulty::Easy, 5);
        let safe: alloc::vec::Vec<_> = session
            .engine()
            .board()
            .iter()
            .filter(|cell| !cell.is_mine())
            .map(Cell::coords)
            .collect();

        for coords in safe {
            session.dig(coords).unwrap();
        }

        assert_eq!(session.status(), Status::Won);
        assert_eq!(session.status().message(), "You Won!");
    }

    #[test]
    fn new_game_replaces_board_and_resets_status() {
        let mut session = Session::new(Difficulty::Easy, 9);
        let mine = first_mine(&session);
        session.dig(mine).unwrap();

        session.new_game(Difficulty::Hard);

        assert_eq!(session.difficulty(), Difficulty::Hard);
        assert_eq!(session.status(), Status::Playing);
        assert_eq!(session.engine().size(), (16, 30));
        assert_eq!(session.engine().total_mines(), 99);
        assert!(session.engine().board().iter().all(|cell| !cell.is_revealed()));
    }

    #[test]
    fn same_seed_replays_same_boards() {
        let mut a = Session::new(Difficulty::Easy, 77);
        let mut b = Session::new(Difficulty::Easy, 77);
        assert_eq!(a.engine(), b.engine());

        a.new_game(Difficulty::Medium);
        b.new_game(Difficulty::Medium);
        assert_eq!(a.engine(), b.engine());
    }

    #[test]
    fn consecutive_games_get_fresh_layouts() {
        let mut session = Session::new(Difficulty::Hard, 77);
        let first = session.engine().board().clone();

        session.new_game(Difficulty::Hard);

        assert_ne!(session.engine().board(), &first);
    }
}
