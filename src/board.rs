use log::debug;

use crate::cell::Cell;
use crate::error::{GameError, Result};

/// Coordinates of a cell, `(x, y)`. `(0, 0)` is the top-left corner of the board.
pub type Coords = (u16, u16);

/// A square grid of cells, plus the mine bookkeeping shown to the player
#[derive(Clone, Debug)]
pub struct Board {
    /// The grid, indexed as `field[x][y]`
    field: Vec<Vec<Cell>>,

    /// Width and height of the grid
    size: u16,

    /// Number of mines placed in the grid
    mines: u32,

    /// Mines minus flags. Goes negative when the player over-flags.
    remaining_mines: i64,
}

impl Board {
    /// Create an empty `size` x `size` board, with all cells hidden and no mines
    pub fn new(size: u16) -> Self {
        // Enforce a minimum number of cells
        let size = if size == 0 { 1 } else { size };

        Board {
            field: vec![vec![Cell::default(); size as usize]; size as usize],
            size,
            mines: 0,
            remaining_mines: 0,
        }
    }

    /// Create a board with mines at exactly the given coordinates. Duplicates count once.
    pub fn with_mines(size: u16, mines: &[Coords]) -> Result<Self> {
        let mut board = Board::new(size);

        for &(x, y) in mines {
            board.check_bounds(x, y)?;
        }

        for &(x, y) in mines {
            board.field[x as usize][y as usize].set_mine(true);
        }

        let placed = board.cells().filter(|(_, cell)| cell.is_mine()).count() as u32;
        if placed >= board.cell_count() {
            return Err(GameError::TooManyMines {
                mines: placed,
                cells: board.cell_count(),
            });
        }

        board.mines = placed;
        board.remaining_mines = placed as i64;
        board.compute_adjacency();

        Ok(board)
    }

    /// Clear every cell for a new round. The grid itself is kept.
    pub fn reset(&mut self) {
        for col in self.field.iter_mut() {
            for cell in col.iter_mut() {
                cell.reset();
            }
        }

        self.mines = 0;
        self.remaining_mines = 0;
    }

    /// Width (and height) of the board
    pub fn size(&self) -> u16 {
        self.size
    }

    /// Total number of cells
    pub fn cell_count(&self) -> u32 {
        self.size as u32 * self.size as u32
    }

    /// The number of mines in the board
    pub fn mine_count(&self) -> u32 {
        self.mines
    }

    /// The mine counter shown to the player: mines minus placed flags
    pub fn remaining_mine_count(&self) -> i64 {
        self.remaining_mines
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x < self.size && y < self.size
    }

    pub(crate) fn check_bounds(&self, x: u16, y: u16) -> Result<()> {
        if self.contains(x, y) {
            Ok(())
        } else {
            Err(GameError::OutOfBounds {
                x,
                y,
                size: self.size,
            })
        }
    }

    /// Get a reference to the cell at the given coordinates
    pub fn cell(&self, x: u16, y: u16) -> Option<&Cell> {
        if self.contains(x, y) {
            Some(&self.field[x as usize][y as usize])
        } else {
            None
        }
    }

    pub(crate) fn cell_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if self.contains(x, y) {
            Some(&mut self.field[x as usize][y as usize])
        } else {
            None
        }
    }

    /// Iterator over every cell with its coordinates, column by column
    pub fn cells(&self) -> impl Iterator<Item = (Coords, &Cell)> + '_ {
        self.field.iter().enumerate().flat_map(|(x, col)| {
            col.iter()
                .enumerate()
                .map(move |(y, cell)| ((x as u16, y as u16), cell))
        })
    }

    /// Coordinates of the in-bounds cells within one step of `(x, y)`, excluding `(x, y)` itself
    pub fn neighbors(&self, x: u16, y: u16) -> impl Iterator<Item = Coords> {
        let min_x = x.saturating_sub(1);
        let max_x = x.saturating_add(1);

        let min_y = y.saturating_sub(1);
        let max_y = y.saturating_add(1);

        let size = self.size;

        (min_x..=max_x)
            .flat_map(move |i| (min_y..=max_y).map(move |j| (i, j)))
            .filter(move |(neighbor_x, neighbor_y)| {
                *neighbor_x < size && *neighbor_y < size && !(*neighbor_x == x && *neighbor_y == y)
            })
    }

    /// Set a flag on a hidden cell, or clear the flag if it had one.
    /// Returns the new flag state; the remaining mine counter follows it.
    pub fn toggle_flag(&mut self, x: u16, y: u16) -> Result<bool> {
        self.check_bounds(x, y)?;

        let flagged = self.field[x as usize][y as usize].toggle_flag()?;
        if flagged {
            self.remaining_mines -= 1;
        } else {
            self.remaining_mines += 1;
        }
        debug!(
            "flag at [{}, {}] {}, {} mines remaining",
            x,
            y,
            if flagged { "set" } else { "cleared" },
            self.remaining_mines
        );

        Ok(flagged)
    }

    pub(crate) fn set_mine_count(&mut self, mines: u32) {
        self.mines = mines;
        self.remaining_mines = mines as i64;
    }

    pub(crate) fn set_remaining_mine_count(&mut self, remaining: i64) {
        self.remaining_mines = remaining;
    }
}
