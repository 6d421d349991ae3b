use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Hook surface the solver drives. [`Game`] is the live implementation;
/// tests substitute recorders.
pub trait SolveTarget {
    /// Current player view the deduction rules read from.
    fn board(&self) -> &PlayerBoard;

    /// Called with a hidden neighbor proven safe; expected to reveal it.
    fn on_safe_cell(&mut self, pos: Pos) -> Result<RevealOutcome>;

    /// Called with a hidden neighbor proven mined; expected to flag it.
    fn on_mine_cell(&mut self, pos: Pos) -> Result<MarkOutcome>;
}

impl SolveTarget for Game {
    fn board(&self) -> &PlayerBoard {
        self.player()
    }

    fn on_safe_cell(&mut self, pos: Pos) -> Result<RevealOutcome> {
        self.reveal(pos)
    }

    fn on_mine_cell(&mut self, pos: Pos) -> Result<MarkOutcome> {
        self.flag(pos)
    }
}

/// What a [`solve`] run did: full-board sweeps made, and how many more cells
/// ended up revealed and flagged than before (the flag tally includes the
/// automatic flagging of the last mines when the run wins the game).
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SolveRun {
    pub sweeps: usize,
    pub revealed: usize,
    pub flagged: usize,
}

/// Applies the two counting rules to the cell at `pos`.
///
/// Unrevealed cells are skipped. For a cell showing `n`:
/// - with exactly `n` flagged neighbors, every other unrevealed neighbor is
///   safe and gets passed to [`SolveTarget::on_safe_cell`];
/// - otherwise, if the revealed neighbors account for everything but the `n`
///   mines, every hidden neighbor must be mined and gets passed to
///   [`SolveTarget::on_mine_cell`].
///
/// The first matching rule wins; a cell matching neither is left alone.
pub fn solve_cell<T: SolveTarget>(target: &mut T, pos: Pos) -> Result<()> {
    let board = target.board();
    let adjacent_mines = match board.cell(pos)? {
        PlayerCell::Revealed(count) => usize::from(count),
        PlayerCell::Hidden | PlayerCell::Flagged => return Ok(()),
    };

    let mut hidden: SmallVec<[Pos; 8]> = SmallVec::new();
    let mut flagged = 0;
    let mut revealed = 0;
    let mut total = 0;

    for npos in board.cells().iter_neighbors(pos) {
        total += 1;
        match board.cells()[npos] {
            PlayerCell::Hidden => hidden.push(npos),
            PlayerCell::Flagged => flagged += 1,
            PlayerCell::Revealed(_) => revealed += 1,
        }
    }

    if hidden.is_empty() {
        return Ok(());
    }

    if flagged == adjacent_mines {
        // every mine around this cell is flagged, the rest are safe
        log::trace!("flags satisfy {:?}, revealing {} neighbors", pos, hidden.len());
        for npos in hidden {
            if target.on_safe_cell(npos)?.is_won() {
                break;
            }
        }
    } else if revealed + adjacent_mines == total {
        // only mines are left unrevealed around this cell
        log::trace!("{:?} pins its mines, flagging {} neighbors", pos, hidden.len());
        for npos in hidden {
            target.on_mine_cell(npos)?;
        }
    }

    Ok(())
}

/// Sweeps the whole board with [`solve_cell`] until no hidden cell remains.
///
/// The hidden count only ever shrinks, so a sweep that leaves it unchanged
/// means the rules are exhausted: the run aborts with
/// [`GameError::NoProgress`] instead of spinning. Errors raised by the
/// callbacks, such as losing against a wrongly flagged board, propagate
/// as-is.
pub fn solve<T: SolveTarget>(target: &mut T) -> Result<SolveRun> {
    let start_revealed = target.board().revealed_count();
    let start_flagged = target.board().flagged_count();
    let mut sweeps = 0;

    while target.board().hidden_count() > 0 {
        let hidden_before = target.board().hidden_count();
        let (rows, cols) = target.board().size();

        for row in 0..rows {
            for col in 0..cols {
                solve_cell(target, (row, col))?;
            }
        }
        sweeps += 1;
        log::debug!(
            "sweep {} done, {} hidden cells left",
            sweeps,
            target.board().hidden_count()
        );

        if target.board().hidden_count() == hidden_before {
            return Err(GameError::NoProgress);
        }
    }

    Ok(SolveRun {
        sweeps,
        revealed: target.board().revealed_count() - start_revealed,
        flagged: target.board().flagged_count() - start_flagged,
    })
}
