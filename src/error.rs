use thiserror::Error;

/// Reasons a command against the minefield can be refused.
///
/// `OutOfBounds`, `InvalidLevel` and `TooManyMines` are rejections: nothing was
/// mutated. `InvalidTransition` describes a move the current state does not
/// allow; the session swallows it and reports an empty change list.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("coordinates [{x}, {y}] are outside of the {size}x{size} field")]
    OutOfBounds { x: u16, y: u16, size: u16 },

    #[error("there is no level preset with index {0}")]
    InvalidLevel(usize),

    #[error("cannot place {mines} mines in a field of {cells} spots")]
    TooManyMines { mines: u32, cells: u32 },

    #[error("move not allowed: {0}")]
    InvalidTransition(&'static str),
}

pub type Result<T> = std::result::Result<T, GameError>;
