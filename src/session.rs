use std::time::Instant;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::board::{Board, Coords};
use crate::cell::{Cell, Exposure};
use crate::error::{GameError, Result};
use crate::level::Level;

/// Where a round stands
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Board is set up, nothing was revealed by the player yet
    Ready,

    /// Clock is running
    Playing,

    /// A mine was stepped on
    Failed,

    /// Every safe cell was revealed
    Succeeded,
}

impl Status {
    pub fn is_over(&self) -> bool {
        matches!(self, Status::Failed | Status::Succeeded)
    }
}

/// What a command did: the status after it ran, and the cells to redraw
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub status: Status,
    pub changed: Vec<Coords>,
}

/// One round of minesweeper, driven by a UI through synchronous commands
#[derive(Debug)]
pub struct Session {
    board: Board,

    /// Index of the level preset, `None` for hand-built boards
    level: Option<usize>,

    status: Status,

    elapsed_seconds: u64,

    /// When the player first revealed a cell
    started_at: Option<Instant>,

    rng: StdRng,
}

/// Start a session on the level preset at `level`
pub fn new_session(level: usize) -> Result<Session> {
    Session::new(level)
}

impl Session {
    /// Start a session on the level preset at `level`, with a random board
    pub fn new(level: usize) -> Result<Self> {
        Self::with_rng(level, StdRng::from_entropy())
    }

    /// Start a session whose boards are all derived from `seed`
    pub fn with_seed(level: usize, seed: u64) -> Result<Self> {
        Self::with_rng(level, StdRng::seed_from_u64(seed))
    }

    fn with_rng(level: usize, rng: StdRng) -> Result<Self> {
        let preset = Level::from_index(level)?;

        let mut session = Session {
            board: Board::new(preset.size),
            level: None,
            status: Status::Ready,
            elapsed_seconds: 0,
            started_at: None,
            rng,
        };
        session.reset(level)?;

        Ok(session)
    }

    /// Start a session on a prepared board, e.g. one built with [`Board::with_mines`].
    /// The board is used as is: no start cell is selected.
    /// A board with every safe cell already revealed starts out won.
    pub fn with_board(board: Board) -> Self {
        let mut session = Session {
            board,
            level: None,
            status: Status::Ready,
            elapsed_seconds: 0,
            started_at: None,
            rng: StdRng::from_entropy(),
        };
        session.settle_cleared_board(&mut Vec::new());

        session
    }

    /// Throw the current round away and set up a fresh board for the preset at `level`.
    /// If opening the start cell already cleared the board, the round is won on the spot.
    pub fn reset(&mut self, level: usize) -> Result<Outcome> {
        let preset = Level::from_index(level)?;

        if self.board.size() == preset.size {
            self.board.reset();
        } else {
            self.board = Board::new(preset.size);
        }
        self.board.place_mines(preset.mines, &mut self.rng)?;
        let start = self.board.select_start(&mut self.rng);

        self.level = Some(level);
        self.status = Status::Ready;
        self.elapsed_seconds = 0;
        self.started_at = None;
        info!(
            "new round on level {}: {}x{} with {} mines, start cell {:?}",
            level, preset.size, preset.size, preset.mines, start
        );

        let mut changed = self.board.cells().map(|(coords, _)| coords).collect();
        self.settle_cleared_board(&mut changed);

        Ok(self.outcome(changed))
    }

    /// Reveal the cell at the given coordinates.
    ///
    /// The first reveal that uncovers something starts the clock. Revealing a mine
    /// fails the round; revealing the last safe cell wins it. Once the round is
    /// over, and for flagged or revealed cells, nothing changes and a `Ready`
    /// round stays `Ready`.
    pub fn reveal(&mut self, x: u16, y: u16) -> Result<Outcome> {
        self.board.check_bounds(x, y)?;

        if self.status.is_over() {
            debug!("ignoring reveal at [{}, {}], round is over", x, y);
            return Ok(self.outcome(Vec::new()));
        }

        let step = self.board.step(x, y)?;
        if step.exposure.is_none() {
            debug!("nothing to reveal at [{}, {}]", x, y);
            return Ok(self.outcome(step.changed));
        }

        if self.status == Status::Ready {
            self.status = Status::Playing;
            self.started_at = Some(Instant::now());
            info!("round started");
        }

        let mut changed = step.changed;

        if step.exposure == Some(Exposure::Detonated) {
            self.finish(Status::Failed);
        } else if self.board.is_cleared() {
            self.board.flag_mines(&mut changed);
            self.finish(Status::Succeeded);
        }

        Ok(self.outcome(changed))
    }

    /// Flag a hidden cell, or remove its flag. Revealed cells and finished rounds
    /// are left untouched.
    pub fn toggle_flag(&mut self, x: u16, y: u16) -> Result<Outcome> {
        self.board.check_bounds(x, y)?;

        if self.status.is_over() {
            debug!("ignoring flag at [{}, {}], round is over", x, y);
            return Ok(self.outcome(Vec::new()));
        }

        match self.board.toggle_flag(x, y) {
            Ok(_) => Ok(self.outcome(vec![(x, y)])),
            Err(GameError::InvalidTransition(reason)) => {
                debug!("ignoring flag at [{}, {}]: {}", x, y, reason);
                Ok(self.outcome(Vec::new()))
            }
            Err(e) => Err(e),
        }
    }

    /// Advance the displayed timer. Only has an effect while playing.
    pub fn tick(&mut self) -> Outcome {
        self.tick_at(Instant::now())
    }

    /// Advance the displayed timer to the given instant
    pub fn tick_at(&mut self, now: Instant) -> Outcome {
        if self.status == Status::Playing {
            if let Some(started_at) = self.started_at {
                self.elapsed_seconds = now.saturating_duration_since(started_at).as_secs();
            }
        }

        self.outcome(Vec::new())
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Whole seconds since the first reveal, frozen once the round is over
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn remaining_mine_count(&self) -> i64 {
        self.board.remaining_mine_count()
    }

    pub fn board_size(&self) -> u16 {
        self.board.size()
    }

    /// Index of the current level preset, if the board came from one
    pub fn level(&self) -> Option<usize> {
        self.level
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<&Cell> {
        self.board.cell(x, y)
    }

    /// Win the round if no safe cell is left hidden
    fn settle_cleared_board(&mut self, changed: &mut Vec<Coords>) {
        if !self.board.is_cleared() {
            return;
        }

        self.board.flag_mines(changed);
        self.status = Status::Succeeded;
        info!("board starts out cleared, round won without a move");
    }

    fn finish(&mut self, status: Status) {
        self.tick();
        self.status = status;
        info!("round {:?} after {} seconds", status, self.elapsed_seconds);
    }

    fn outcome(&self, changed: Vec<Coords>) -> Outcome {
        Outcome {
            status: self.status,
            changed,
        }
    }
}
