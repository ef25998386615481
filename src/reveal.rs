use log::{debug, trace};

use crate::board::{Board, Coords};
use crate::cell::Exposure;
use crate::error::Result;

/// The result of stepping on a cell of the board
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Step {
    /// What the stepped-on cell exposed, `None` if the step changed nothing
    pub exposure: Option<Exposure>,

    /// Every cell whose visible state changed, in the order it changed
    pub changed: Vec<Coords>,
}

impl Board {
    /// Step on the cell at the given coordinates, the way a player click does.
    ///
    /// Flagged and already revealed cells are left alone. A cell without
    /// neighboring mines flood reveals its surroundings. Stepping on a mine marks
    /// it detonated and exposes every other unflagged mine.
    pub fn step(&mut self, x: u16, y: u16) -> Result<Step> {
        self.check_bounds(x, y)?;

        let mut changed = Vec::new();
        let exposure = self.cell_mut(x, y).and_then(|cell| cell.click());

        match exposure {
            Some(Exposure::Exposed) => changed.push((x, y)),
            Some(Exposure::ExposedZero) => {
                changed.push((x, y));
                self.flood(x, y, &mut changed);
            }
            Some(Exposure::Detonated) => {
                if let Some(cell) = self.cell_mut(x, y) {
                    cell.detonate();
                }
                changed.push((x, y));
                self.expose_mines(&mut changed);
            }
            None => {}
        }

        Ok(Step { exposure, changed })
    }

    /// Flood reveal outwards from a cell with no neighboring mines.
    ///
    /// Mines, flags and revealed cells stop the flood. Newly revealed cells are
    /// appended to `changed`.
    pub fn flood(&mut self, x: u16, y: u16, changed: &mut Vec<Coords>) {
        let before = changed.len();
        let mut cells_to_visit = vec![(x, y)];

        while let Some((xx, yy)) = cells_to_visit.pop() {
            for (nb_x, nb_y) in self.neighbors(xx, yy) {
                let Some(cell) = self.cell_mut(nb_x, nb_y) else {
                    continue;
                };

                if cell.is_mine() || cell.is_flagged() || cell.is_revealed() {
                    continue;
                }

                match cell.reveal() {
                    Some(Exposure::ExposedZero) => {
                        changed.push((nb_x, nb_y));
                        cells_to_visit.push((nb_x, nb_y));
                    }
                    Some(_) => changed.push((nb_x, nb_y)),
                    None => {}
                }
            }
        }

        trace!("flood from [{}, {}] revealed {} cells", x, y, changed.len() - before);
    }

    /// Check if every safe cell has been revealed. Mines need not be flagged.
    pub fn is_cleared(&self) -> bool {
        self.cells().all(|(_, cell)| cell.is_mine() || cell.is_revealed())
    }

    /// Reveal the mines the player did not flag, after a detonation
    pub(crate) fn expose_mines(&mut self, changed: &mut Vec<Coords>) {
        let hidden: Vec<Coords> = self
            .cells()
            .filter(|(_, cell)| cell.is_mine() && !cell.is_revealed() && !cell.is_flagged())
            .map(|(coords, _)| coords)
            .collect();

        for (x, y) in hidden {
            if let Some(cell) = self.cell_mut(x, y) {
                cell.reveal();
                changed.push((x, y));
            }
        }
    }

    /// Flag the mines the player did not flag, after the board was cleared
    pub(crate) fn flag_mines(&mut self, changed: &mut Vec<Coords>) {
        let unflagged: Vec<Coords> = self
            .cells()
            .filter(|(_, cell)| cell.is_mine() && !cell.is_flagged())
            .map(|(coords, _)| coords)
            .collect();

        for (x, y) in unflagged {
            if let Ok(true) = self.toggle_flag(x, y) {
                changed.push((x, y));
            }
        }

        let flags = self.cells().filter(|(_, cell)| cell.is_flagged()).count();
        debug!("board cleared, {} flags on {} mines", flags, self.mine_count());
        self.set_remaining_mine_count(0);
    }
}
