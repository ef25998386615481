use serde::Serialize;

use crate::error::{GameError, Result};

/// A board preset the player can pick
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Level {
    /// Width and height of the board
    pub size: u16,

    /// Number of mines on the board
    pub mines: u32,
}

impl Level {
    /// All presets, easiest first. Levels are referred to by their index here.
    pub const ALL: [Level; 3] = [
        Level { size: 8, mines: 10 },
        Level { size: 16, mines: 40 },
        Level { size: 24, mines: 99 },
    ];

    /// Look up the preset at `index`
    pub fn from_index(index: usize) -> Result<Level> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(GameError::InvalidLevel(index))
    }
}
