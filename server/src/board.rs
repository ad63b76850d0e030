//! Pure board model for the 3x3 grid: apply-move, win-check, draw-check.

use shared::{BoardCells, ErrorKind, Mark, CELL_COUNT};

/// The 8 lines that decide a game: 3 rows, 3 columns, 2 diagonals.
const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Authoritative cell grid. Mutated only through its owning room.
#[derive(Debug, Clone)]
pub struct Board {
    cells: BoardCells,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [None; CELL_COUNT],
        }
    }

    /// Places `mark` at `cell`. The index is range-checked before the
    /// occupancy lookup, so an out-of-range move can never touch a cell.
    pub fn apply(&mut self, cell: usize, mark: Mark) -> Result<(), ErrorKind> {
        if cell >= CELL_COUNT {
            return Err(ErrorKind::InvalidMove);
        }
        if self.cells[cell].is_some() {
            return Err(ErrorKind::InvalidMove);
        }
        self.cells[cell] = Some(mark);
        Ok(())
    }

    /// True iff `mark` fully holds one of the winning lines.
    pub fn is_winning(&self, mark: Mark) -> bool {
        WIN_LINES
            .iter()
            .any(|line| line.iter().all(|&i| self.cells[i] == Some(mark)))
    }

    /// True iff no cell is empty. Callers check for a win first, since a
    /// final move can fill the board and win at the same time.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    /// Snapshot for broadcasts.
    pub fn cells(&self) -> BoardCells {
        self.cells
    }

    pub fn reset(&mut self) {
        self.cells = [None; CELL_COUNT];
    }
}
