use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;

/// Uniform placement with no protected cells, the first dig may well hit a mine.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Board {
        let mut board = Board::new(config);
        let mut rng = SmallRng::seed_from_u64(self.seed);
        board.place_mines(config.mines, &mut rng);

        if board.mine_count() != config.mines {
            log::warn!(
                "Generated board mine count mismatch, actual: {}, requested: {}",
                board.mine_count(),
                config.mines
            );
        }
        board
    }
}
