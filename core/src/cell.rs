use serde::{Deserialize, Serialize};
use std::fmt;

/// Ground-truth content of one cell: a mine, or the number of adjacent mines.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TruthCell {
    Mine,
    Count(u8),
}

impl TruthCell {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }
}

impl Default for TruthCell {
    fn default() -> Self {
        Self::Count(0)
    }
}

/// Player-visible state of one cell.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PlayerCell {
    Hidden,
    Revealed(u8),
    Flagged,
}

impl PlayerCell {
    pub const FLAG: char = '\u{2691}';
    pub const UNKNOWN: char = '?';

    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

impl Default for PlayerCell {
    fn default() -> Self {
        Self::Hidden
    }
}

impl fmt::Display for PlayerCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hidden => write!(f, "{}", Self::UNKNOWN),
            Self::Flagged => write!(f, "{}", Self::FLAG),
            Self::Revealed(count) => write!(f, "{count}"),
        }
    }
}
