use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use player::*;
pub use solver::*;

mod cell;
mod engine;
mod error;
mod generator;
mod grid;
mod player;
mod solver;

/// Mine density presets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Fraction of cells that hold a mine.
    pub const fn rate(self) -> f64 {
        match self {
            Self::Easy => 0.10,
            Self::Medium => 0.30,
            Self::Hard => 0.50,
        }
    }

    /// Resolves a difficulty name. Only the exact, case-sensitive names
    /// `EASY`, `MEDIUM` and `HARD` are recognized; anything else plays `Hard`.
    pub fn from_input(input: &str) -> Self {
        match input {
            "EASY" => Self::Easy,
            "MEDIUM" => Self::Medium,
            _ => Self::Hard,
        }
    }

    /// Number of mines for a `rows` x `cols` board, rounded down.
    pub fn mine_count(self, rows: usize, cols: usize) -> usize {
        (rows.saturating_mul(cols) as f64 * self.rate()) as usize
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Hard
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub mines: usize,
}

impl GameConfig {
    pub fn new(rows: usize, cols: usize, mines: usize) -> Result<Self> {
        let config = Self { rows, cols, mines };
        config.validate()?;
        Ok(config)
    }

    pub fn with_difficulty(rows: usize, cols: usize, difficulty: Difficulty) -> Result<Self> {
        Self::new(rows, cols, difficulty.mine_count(rows, cols))
    }

    /// At least one cell on each axis, and at least one safe cell overall.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GameError::InvalidDimension);
        }
        if self.mines >= self.total_cells() {
            return Err(GameError::InvalidMineCount);
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }
}

/// Ground truth of one game: which cells are mined, with every safe cell
/// holding its adjacent-mine count. The counts are maintained incrementally
/// as mines are placed, so they are correct at every point of generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineBoard {
    cells: Array2<TruthCell>,
    mine_count: usize,
}

impl MineBoard {
    pub fn empty(rows: usize, cols: usize) -> Result<Self> {
        Ok(Self {
            cells: init_board(rows, cols, TruthCell::default())?,
            mine_count: 0,
        })
    }

    /// Builds a board with a fixed mine layout; the deterministic counterpart
    /// to [`RandomBoardGenerator`].
    pub fn with_mines(rows: usize, cols: usize, mine_positions: &[Pos]) -> Result<Self> {
        let mut board = Self::empty(rows, cols)?;
        for &pos in mine_positions {
            board.place_mine(pos)?;
        }
        Ok(board)
    }

    /// Turns `pos` into a mine and bumps the count of every adjacent safe
    /// cell. Placing onto an existing mine changes nothing.
    pub(crate) fn place_mine(&mut self, pos: Pos) -> Result<()> {
        let pos = self.validate_pos(pos)?;
        if self.cells[pos].is_mine() {
            return Ok(());
        }

        self.cells[pos] = TruthCell::Mine;
        self.mine_count += 1;

        for npos in self.cells.iter_neighbors(pos) {
            if let TruthCell::Count(count) = self.cells[npos] {
                self.cells[npos] = TruthCell::Count(count + 1);
            }
        }
        Ok(())
    }

    pub fn validate_pos(&self, pos: Pos) -> Result<Pos> {
        if self.cells.contains_pos(pos) {
            Ok(pos)
        } else {
            Err(GameError::InvalidPosition)
        }
    }

    pub fn cell(&self, pos: Pos) -> Result<TruthCell> {
        Ok(self.cells[self.validate_pos(pos)?])
    }

    pub fn is_mine(&self, pos: Pos) -> bool {
        self.cells.contains_pos(pos) && self.cells[pos].is_mine()
    }

    pub fn cells(&self) -> &Array2<TruthCell> {
        &self.cells
    }

    /// Board shape as `(rows, cols)`.
    pub fn size(&self) -> Pos {
        self.cells.dim()
    }

    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn mine_count(&self) -> usize {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> usize {
        self.total_cells() - self.mine_count
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            Won => true,
        }
    }

    pub const fn is_won(self) -> bool {
        matches!(self, Self::Won)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn difficulty_rates_scale_with_the_preset() {
        assert_eq!(Difficulty::Easy.rate(), 0.10);
        assert_eq!(Difficulty::Medium.rate(), 0.30);
        assert_eq!(Difficulty::Hard.rate(), 0.50);
    }

    #[test]
    fn difficulty_resolves_exact_names_and_defaults_to_hard() {
        assert_eq!(Difficulty::from_input("EASY"), Difficulty::Easy);
        assert_eq!(Difficulty::from_input("MEDIUM"), Difficulty::Medium);
        assert_eq!(Difficulty::from_input("HARD"), Difficulty::Hard);
        assert_eq!(Difficulty::from_input("easy"), Difficulty::Hard);
        assert_eq!(Difficulty::from_input("impossible"), Difficulty::Hard);
        assert_eq!(Difficulty::from_input(""), Difficulty::Hard);
    }

    #[test]
    fn mine_counts_round_down() {
        assert_eq!(Difficulty::Easy.mine_count(3, 3), 0);
        assert_eq!(Difficulty::Medium.mine_count(3, 3), 2);
        assert_eq!(Difficulty::Hard.mine_count(3, 3), 4);
        assert_eq!(Difficulty::Easy.mine_count(4, 4), 1);
        assert_eq!(Difficulty::Hard.mine_count(8, 8), 32);
    }

    #[test]
    fn config_rejects_degenerate_boards() {
        assert_eq!(
            GameConfig::new(0, 5, 1).unwrap_err(),
            GameError::InvalidDimension
        );
        assert_eq!(
            GameConfig::new(5, 0, 1).unwrap_err(),
            GameError::InvalidDimension
        );
        assert_eq!(
            GameConfig::new(2, 2, 4).unwrap_err(),
            GameError::InvalidMineCount
        );
        assert!(GameConfig::new(2, 2, 3).is_ok());
        assert!(GameConfig::new(2, 2, 0).is_ok());
    }

    #[test]
    fn fixed_layout_matches_the_expected_counts() {
        use TruthCell::*;

        let board = MineBoard::with_mines(3, 3, &[(1, 2)]).unwrap();

        let expected = arr2(&[
            [Count(0), Count(1), Count(1)],
            [Count(0), Count(1), Mine],
            [Count(0), Count(1), Count(1)],
        ]);
        assert_eq!(board.cells(), &expected);
        assert_eq!(board.mine_count(), 1);
        assert_eq!(board.safe_cell_count(), 8);
    }

    #[test]
    fn every_count_cell_tallies_its_mined_neighbors() {
        let board = MineBoard::with_mines(4, 4, &[(0, 0), (1, 1), (3, 2)]).unwrap();

        assert_eq!(board.cells().count_total(TruthCell::Mine), 3);
        for ((row, col), &cell) in board.cells().indexed_iter() {
            if let TruthCell::Count(count) = cell {
                let mined_neighbors = board.cells().count_neighbors((row, col), TruthCell::Mine);
                assert_eq!(usize::from(count), mined_neighbors, "at ({row}, {col})");
            }
        }
    }

    #[test]
    fn placing_on_an_existing_mine_changes_nothing() {
        let board = MineBoard::with_mines(2, 2, &[(1, 1), (1, 1)]).unwrap();

        assert_eq!(board.mine_count(), 1);
        assert_eq!(board.cell((0, 0)).unwrap(), TruthCell::Count(1));
    }

    #[test]
    fn out_of_bounds_mines_are_rejected() {
        assert_eq!(
            MineBoard::with_mines(2, 2, &[(2, 0)]).unwrap_err(),
            GameError::InvalidPosition
        );
    }

    #[test]
    fn cell_lookup_validates_the_position() {
        let board = MineBoard::with_mines(2, 2, &[(0, 0)]).unwrap();

        assert_eq!(board.cell((0, 0)).unwrap(), TruthCell::Mine);
        assert_eq!(board.cell((1, 1)).unwrap(), TruthCell::Count(1));
        assert_eq!(board.cell((2, 2)).unwrap_err(), GameError::InvalidPosition);
        assert!(board.is_mine((0, 0)));
        assert!(!board.is_mine((5, 5)));
    }
}
