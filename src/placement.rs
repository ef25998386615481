use std::collections::HashSet;

use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{Board, Coords};
use crate::error::{GameError, Result};

impl Board {
    /// Randomly scatter `count` mines over the board, replacing any mines already
    /// placed, then recompute adjacency counts.
    ///
    /// Coordinates are drawn uniformly and redrawn when they hit a spot that was
    /// already picked. At least one spot must stay free of mines.
    pub fn place_mines<R: Rng + ?Sized>(&mut self, count: u32, rng: &mut R) -> Result<()> {
        let cells = self.cell_count();
        if count >= cells {
            return Err(GameError::TooManyMines { mines: count, cells });
        }

        for x in 0..self.size() {
            for y in 0..self.size() {
                if let Some(cell) = self.cell_mut(x, y) {
                    cell.set_mine(false);
                }
            }
        }

        let mut picked: HashSet<Coords> = HashSet::with_capacity(count as usize);
        let mut draws = 0usize;
        while picked.len() < count as usize {
            let x = rng.gen_range(0..self.size());
            let y = rng.gen_range(0..self.size());
            draws += 1;

            if picked.insert((x, y)) {
                if let Some(cell) = self.cell_mut(x, y) {
                    cell.set_mine(true);
                }
            }
        }
        debug!("placed {} mines in {} draws", count, draws);

        self.set_mine_count(count);
        self.compute_adjacency();

        Ok(())
    }

    /// Count the mines around every cell. Edge and corner cells only look at the
    /// neighbors that exist; the board does not wrap around.
    pub fn compute_adjacency(&mut self) {
        for x in 0..self.size() {
            for y in 0..self.size() {
                let count = self
                    .neighbors(x, y)
                    .filter(|&(nx, ny)| self.cell(nx, ny).map_or(false, |c| c.is_mine()))
                    .count() as u8;

                if let Some(cell) = self.cell_mut(x, y) {
                    cell.set_adjacent_mine_count(count);
                }
            }
        }
    }

    /// Pick a random safe cell with no neighboring mines as the start cell, and open
    /// it up along with its neighbors.
    ///
    /// Returns the coordinates of the start cell, or `None` if no cell qualifies.
    pub fn select_start<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Coords> {
        let candidates: Vec<Coords> = self
            .cells()
            .filter(|(_, cell)| !cell.is_mine() && cell.adjacent_mine_count() == 0)
            .map(|(coords, _)| coords)
            .collect();

        let Some(&(x, y)) = candidates.choose(rng) else {
            warn!("no cell without neighboring mines, the round starts fully hidden");
            return None;
        };

        let mut changed = Vec::new();
        if let Some(cell) = self.cell_mut(x, y) {
            cell.mark_start();
            if cell.reveal().is_some() {
                changed.push((x, y));
            }
        }
        // every neighbor of a zero cell is safe
        self.flood(x, y, &mut changed);
        debug!("start cell at [{}, {}] opened {} cells", x, y, changed.len());

        Some((x, y))
    }
}
