use crate::error::{GameError, Result};

/// A single spot of the minefield and the rules for changing it
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    mine: bool,
    adjacent_mines: u8,
    revealed: bool,
    flagged: bool,
    start: bool,
    detonated: bool,
}

/// What became visible when a cell was revealed
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Exposure {
    /// A safe cell with at least one neighboring mine
    Exposed,

    /// A safe cell with no neighboring mines; its neighbors can be flood revealed
    ExposedZero,

    /// A mine
    Detonated,
}

impl Cell {
    pub fn is_mine(&self) -> bool {
        self.mine
    }

    /// Number of mines in the 8-neighborhood. Only meaningful once mines were placed.
    pub fn adjacent_mine_count(&self) -> u8 {
        self.adjacent_mines
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn is_flagged(&self) -> bool {
        self.flagged
    }

    pub fn is_start(&self) -> bool {
        self.start
    }

    pub fn is_detonated(&self) -> bool {
        self.detonated
    }

    /// Clear all per-round state, in place
    pub fn reset(&mut self) {
        *self = Cell::default();
    }

    /// Reveal the cell, or do nothing if it is already revealed.
    ///
    /// A forced reveal takes precedence over a flag: the flag is dropped so that a
    /// cell is never flagged and revealed at the same time. Use [`Cell::click`] for
    /// reveals that must respect flags.
    pub fn reveal(&mut self) -> Option<Exposure> {
        if self.revealed {
            return None;
        }

        self.flagged = false;
        self.revealed = true;

        if self.mine {
            Some(Exposure::Detonated)
        } else if self.adjacent_mines == 0 {
            Some(Exposure::ExposedZero)
        } else {
            Some(Exposure::Exposed)
        }
    }

    /// Reveal on behalf of the player. Flagged cells are protected.
    pub fn click(&mut self) -> Option<Exposure> {
        if self.flagged {
            None
        } else {
            self.reveal()
        }
    }

    /// Flip the flag on a hidden cell, returning the new flag state
    pub fn toggle_flag(&mut self) -> Result<bool> {
        if self.revealed {
            return Err(GameError::InvalidTransition("cannot flag a revealed cell"));
        }

        self.flagged = !self.flagged;
        Ok(self.flagged)
    }

    pub(crate) fn set_mine(&mut self, mine: bool) {
        self.mine = mine;
    }

    pub(crate) fn set_adjacent_mine_count(&mut self, count: u8) {
        self.adjacent_mines = count;
    }

    pub(crate) fn mark_start(&mut self) {
        self.start = true;
    }

    /// Mark this cell as the mine that ended the round
    pub(crate) fn detonate(&mut self) {
        debug_assert!(self.mine && self.revealed);
        self.detonated = true;
    }
}
