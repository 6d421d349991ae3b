use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Purely random generation: each mine lands on a fresh position found by
/// rejection sampling, so the layout depends only on the seed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Result<MineBoard> {
        config.validate()?;
        log::debug!(
            "generating {}x{} board with {} mines, seed {}",
            config.rows,
            config.cols,
            config.mines,
            self.seed
        );

        let mut board = MineBoard::empty(config.rows, config.cols)?;
        let mut rng = SmallRng::seed_from_u64(self.seed);

        while board.mine_count() < config.mines {
            let pos = next_mine_pos(&mut rng, &board);
            log::trace!("placing mine {} at {:?}", board.mine_count() + 1, pos);
            board.place_mine(pos)?;
        }

        // double check mine count
        let placed = board.cells().count_total(TruthCell::Mine);
        if placed != config.mines {
            log::warn!(
                "generated board mine count mismatch, actual: {}, requested: {}",
                placed,
                config.mines
            );
        }
        Ok(board)
    }
}

/// Draws a row, then a column, retrying until the cell is not already mined.
/// The loop terminates because the config keeps at least one cell mine-free.
fn next_mine_pos(rng: &mut SmallRng, board: &MineBoard) -> Pos {
    let (rows, cols) = board.size();
    loop {
        let row = rng.random_range(0..rows);
        let col = rng.random_range(0..cols);
        if !board.is_mine((row, col)) {
            return (row, col);
        }
    }
}
