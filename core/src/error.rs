use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Unknown difficulty, expected one of EASY, MEDIUM, HARD")]
    UnknownDifficulty,
}

pub type Result<T> = core::result::Result<T, GameError>;
