//! Read-only views of a session for a front end: a serializable snapshot, and a
//! plain text rendering of the status bar and the board.

use serde::Serialize;

use crate::board::Coords;
use crate::cell::Cell;
use crate::session::{Session, Status};

/// What the player gets to see of a cell
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed { adjacent: u8, start: bool },
    Mine,
    Detonated,
}

impl CellView {
    /// Mines stay hidden until they are revealed, or the round is lost
    pub fn of(cell: &Cell, status: Status) -> Self {
        if cell.is_detonated() {
            CellView::Detonated
        } else if cell.is_flagged() {
            CellView::Flagged
        } else if cell.is_mine() && (cell.is_revealed() || status == Status::Failed) {
            CellView::Mine
        } else if cell.is_revealed() {
            CellView::Revealed {
                adjacent: cell.adjacent_mine_count(),
                start: cell.is_start(),
            }
        } else {
            CellView::Hidden
        }
    }

    fn glyph(&self) -> String {
        match self {
            CellView::Hidden => "•".to_string(),
            CellView::Flagged => "⚐".to_string(),
            CellView::Mine => "☢".to_string(),
            CellView::Detonated => "✹".to_string(),
            CellView::Revealed { adjacent: 0, .. } => " ".to_string(),
            CellView::Revealed { adjacent, .. } => adjacent.to_string(),
        }
    }
}

/// Everything a renderer needs to draw one frame
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub status: Status,
    pub elapsed_seconds: u64,
    pub remaining_mines: i64,
    pub size: u16,
    pub level: Option<usize>,

    /// Rows of cells, `cells[y][x]`
    pub cells: Vec<Vec<CellView>>,
}

impl Session {
    pub fn snapshot(&self) -> Snapshot {
        let size = self.board_size();
        let cells = (0..size)
            .map(|y| (0..size).map(|x| self.view(x, y)).collect())
            .collect();

        Snapshot {
            status: self.status(),
            elapsed_seconds: self.elapsed_seconds(),
            remaining_mines: self.remaining_mine_count(),
            size,
            level: self.level(),
            cells,
        }
    }

    /// The visible state of the cell at the given coordinates
    pub fn view(&self, x: u16, y: u16) -> CellView {
        self.cell(x, y)
            .map_or(CellView::Hidden, |cell| CellView::of(cell, self.status()))
    }

    /// Views of just the cells a command changed, for incremental redraws
    pub fn views(&self, changed: &[Coords]) -> Vec<(Coords, CellView)> {
        changed
            .iter()
            .map(|&(x, y)| ((x, y), self.view(x, y)))
            .collect()
    }
}

fn face(status: Status) -> &'static str {
    match status {
        Status::Ready | Status::Playing => ":)",
        Status::Failed => "X(",
        Status::Succeeded => "B)",
    }
}

/// Mine counter, reset button face and timer, in one line
pub fn status_line(session: &Session) -> String {
    format!(
        "☢ {:03}   {}   {:03} ⏱",
        session.remaining_mine_count(),
        face(session.status()),
        session.elapsed_seconds()
    )
}

/// The board as text, with column numbers on top and row numbers on the left
pub fn board_text(session: &Session) -> String {
    let size = session.board_size();

    let header: String = (0..size).map(|x| format!("{:>2}", x % 100)).collect();
    let mut out = format!("    {}\n", header);

    for y in 0..size {
        let row: String = (0..size)
            .map(|x| format!(" {}", session.view(x, y).glyph()))
            .collect();
        out.push_str(&format!("{:>2} [{} ]\n", y, row));
    }

    out
}
