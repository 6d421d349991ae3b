use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board dimensions must be at least 1x1")]
    InvalidDimension,
    #[error("Mine count must be smaller than the number of cells")]
    InvalidMineCount,
    #[error("Position is outside the board")]
    InvalidPosition,
    #[error("Board shape does not match declared size")]
    BoardShapeMismatch,
    #[error("BOOM! You lost.")]
    Lost,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("No progress possible on the remaining hidden cells")]
    NoProgress,
}

pub type Result<T> = std::result::Result<T, GameError>;
