use std::{fmt, ops::Range};

use crate::core::piece::PieceKind;

/// Contents of a single board cell.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Cell {
    /// Vacant playable space.
    #[default]
    Empty,
    /// Boundary wall, or a row sealed by the game-over sweep.
    Wall,
    /// Landing preview of the falling piece. Never blocks movement.
    Ghost,
    /// A settled block left by a locked piece.
    Locked(PieceKind),
}

impl Cell {
    /// Returns true if a piece can pass through this cell.
    #[must_use]
    pub const fn is_vacant(self) -> bool {
        matches!(self, Cell::Empty | Cell::Ghost)
    }

    /// Returns true if this cell stops a piece.
    #[must_use]
    pub const fn is_blocking(self) -> bool {
        !self.is_vacant()
    }

    /// Display symbol of this cell.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Wall => '#',
            Cell::Ghost => '.',
            Cell::Locked(kind) => kind.as_char(),
        }
    }
}

/// One board row including its two wall columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Row {
    cells: [Cell; Playfield::WIDTH],
}

impl Row {
    const EMPTY: Self = {
        let mut cells = [Cell::Empty; Playfield::WIDTH];
        cells[0] = Cell::Wall;
        cells[Playfield::WIDTH - 1] = Cell::Wall;
        Self { cells }
    };

    const FLOOR: Self = Self {
        cells: [Cell::Wall; Playfield::WIDTH],
    };

    const CEILING: Self = {
        let mut cells = [Cell::Wall; Playfield::WIDTH];
        let mut x = Playfield::CEILING_GAP.start;
        while x < Playfield::CEILING_GAP.end {
            cells[x] = Cell::Empty;
            x += 1;
        }
        Self { cells }
    };

    fn playable_cells(&self) -> &[Cell] {
        &self.cells[Playfield::PLAYABLE_X]
    }

    /// Every playable cell is blocking. Ghost cells never complete a row.
    fn is_filled(&self) -> bool {
        self.playable_cells().iter().all(|cell| cell.is_blocking())
    }

    fn has_locked(&self) -> bool {
        self.playable_cells().iter().any(|cell| cell.is_locked())
    }
}

/// The fixed-size game board.
///
/// The grid is 15 columns by 20 rows. Columns 0 and 14 and row 19 are walls.
/// Row 0 is a ceiling of wall cells except for a gap over columns 5..10, which
/// is where new pieces enter. Everything else starts empty.
///
/// The falling piece is never stored here while it moves; the game stamps it
/// onto a copy for display. Only locked pieces and the ghost preview are
/// written into the grid.
#[derive(Clone, PartialEq, Eq)]
pub struct Playfield {
    rows: [Row; Playfield::HEIGHT],
}

impl fmt::Debug for Playfield {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Playfield\n{self}")
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl Playfield {
    pub const WIDTH: usize = 15;
    pub const HEIGHT: usize = 20;

    /// Columns left open in the top row so pieces can enter.
    pub const CEILING_GAP: Range<usize> = 5..10;
    /// Columns between the side walls.
    pub const PLAYABLE_X: Range<usize> = 1..Self::WIDTH - 1;
    /// Rows considered by line clearing: everything between ceiling and floor.
    pub const PLAYABLE_Y: Range<usize> = 1..Self::HEIGHT - 1;
    /// Index of the floor row.
    pub const FLOOR_Y: usize = Self::HEIGHT - 1;

    pub const INITIAL: Self = {
        let mut rows = [Row::EMPTY; Self::HEIGHT];
        rows[0] = Row::CEILING;
        rows[Self::FLOOR_Y] = Row::FLOOR;
        Self { rows }
    };

    /// Restores the initial layout.
    pub fn reset(&mut self) {
        *self = Self::INITIAL;
    }

    /// Returns the cell at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the grid.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.rows[y].cells[x]
    }

    /// Returns the cell at a signed coordinate, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, x: isize, y: isize) -> Option<Cell> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.rows.get(y)?.cells.get(x).copied()
    }

    pub fn set_cell(&mut self, x: usize, y: usize, cell: Cell) {
        self.rows[y].cells[x] = cell;
    }

    /// Iterates rows top to bottom, each as a slice of all 15 cells.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.rows.iter().map(|row| &row.cells[..])
    }

    /// Removes every full row and returns how many were removed.
    ///
    /// Rows above a removed row shift down; the ceiling and the floor stay in
    /// place and the rows opened up at the top of the playable area are empty.
    pub fn clear_lines(&mut self) -> usize {
        let mut count = 0;
        for y in Self::PLAYABLE_Y.rev() {
            if self.rows[y].is_filled() {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y + count] = self.rows[y];
            }
        }
        for row in &mut self.rows[Self::PLAYABLE_Y.start..Self::PLAYABLE_Y.start + count] {
            *row = Row::EMPTY;
        }
        count
    }

    /// Returns true if row `y` holds at least one locked block.
    #[must_use]
    pub fn row_has_locked(&self, y: usize) -> bool {
        self.rows[y].has_locked()
    }

    /// Turns every locked block in row `y` into a wall cell.
    pub fn seal_row(&mut self, y: usize) {
        for cell in &mut self.rows[y].cells[Self::PLAYABLE_X] {
            if cell.is_locked() {
                *cell = Cell::Wall;
            }
        }
    }

    /// Builds a board from ASCII rows (`#` wall, `.` ghost, space empty, piece letters locked).
    ///
    /// Missing rows and columns keep their initial contents.
    #[cfg(test)]
    pub(crate) fn from_ascii(lines: &[&str]) -> Self {
        let mut playfield = Self::INITIAL;
        for (y, line) in lines.iter().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                let cell = match ch {
                    '#' => Cell::Wall,
                    '.' => Cell::Ghost,
                    ' ' => Cell::Empty,
                    _ => Cell::Locked(PieceKind::try_from(ch).unwrap()),
                };
                playfield.set_cell(x, y, cell);
            }
        }
        playfield
    }
}

impl fmt::Display for Playfield {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for cell in row.cells {
                write!(f, "{}", cell.as_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
