use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::*;

/// What the player sees: every cell starts hidden and changes only through
/// flag toggles and reveals. Reveals are checked against a [`MineBoard`];
/// this is the single place a loss can surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerBoard {
    cells: Array2<PlayerCell>,
    revealed_count: usize,
    flagged_count: usize,
}

impl PlayerBoard {
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        Ok(Self {
            cells: init_board(rows, cols, PlayerCell::default())?,
            revealed_count: 0,
            flagged_count: 0,
        })
    }

    pub fn validate_pos(&self, pos: Pos) -> Result<Pos> {
        if self.cells.contains_pos(pos) {
            Ok(pos)
        } else {
            Err(GameError::InvalidPosition)
        }
    }

    pub fn cell(&self, pos: Pos) -> Result<PlayerCell> {
        Ok(self.cells[self.validate_pos(pos)?])
    }

    pub fn cells(&self) -> &Array2<PlayerCell> {
        &self.cells
    }

    /// Board shape as `(rows, cols)`.
    pub fn size(&self) -> Pos {
        self.cells.dim()
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> usize {
        self.flagged_count
    }

    pub fn hidden_count(&self) -> usize {
        self.cells.len() - self.revealed_count - self.flagged_count
    }

    /// Toggles `Hidden` to `Flagged` and back; revealed cells never change.
    pub fn flag(&mut self, pos: Pos) -> Result<MarkOutcome> {
        use MarkOutcome::*;
        use PlayerCell::*;

        let pos = self.validate_pos(pos)?;
        Ok(match self.cells[pos] {
            Hidden => {
                self.cells[pos] = Flagged;
                self.flagged_count += 1;
                Changed
            }
            Flagged => {
                self.cells[pos] = Hidden;
                self.flagged_count -= 1;
                Changed
            }
            Revealed(_) => NoChange,
        })
    }

    /// Uncovers a hidden cell against the ground truth. A mined cell loses
    /// the game with [`GameError::Lost`] and the cell itself is left
    /// untouched; a safe cell becomes `Revealed(n)`, with `Won` reported as
    /// soon as no safe cell remains hidden. Flagged and already-revealed
    /// cells are no-ops.
    pub fn reveal(&mut self, mines: &MineBoard, pos: Pos) -> Result<RevealOutcome> {
        use RevealOutcome::*;

        if self.size() != mines.size() {
            return Err(GameError::BoardShapeMismatch);
        }
        let pos = self.validate_pos(pos)?;

        if !matches!(self.cells[pos], PlayerCell::Hidden) {
            return Ok(NoChange);
        }

        match mines.cell(pos)? {
            TruthCell::Mine => Err(GameError::Lost),
            TruthCell::Count(count) => {
                self.cells[pos] = PlayerCell::Revealed(count);
                self.revealed_count += 1;

                if self.revealed_count == mines.safe_cell_count() {
                    Ok(Won)
                } else {
                    Ok(Revealed)
                }
            }
        }
    }

    /// Flags every cell still hidden, returning how many were flipped.
    pub fn flag_all_hidden(&mut self) -> usize {
        let mut flipped = 0;
        for cell in self.cells.iter_mut() {
            if matches!(cell, PlayerCell::Hidden) {
                *cell = PlayerCell::Flagged;
                flipped += 1;
            }
        }
        self.flagged_count += flipped;
        flipped
    }
}

impl fmt::Display for PlayerBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", self.cells[(row, col)])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
