use std::iter;

use arrayvec::ArrayVec;

use crate::core::{
    piece::Piece,
    playfield::{Cell, Playfield},
};

/// How [`Playfield::place`] treats the cells a piece covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum PlaceMode {
    /// Write the piece's symbol.
    Write,
    /// Reset the cells to empty.
    Erase,
}

impl Playfield {
    /// Returns true if every filled cell of `piece` is in a legal spot.
    ///
    /// A cell is legal when its column is on the board and either its row is
    /// above the board or the target cell is vacant. Ghost cells are vacant.
    #[must_use]
    pub fn can_place(&self, piece: &Piece) -> bool {
        piece
            .occupied_positions()
            .all(|(x, y)| self.is_legal_cell(x, y))
    }

    fn is_legal_cell(&self, x: i16, y: i16) -> bool {
        let Ok(x) = usize::try_from(x) else {
            return false;
        };
        if x >= Self::WIDTH {
            return false;
        }
        let Ok(y) = usize::try_from(y) else {
            // above the board
            return true;
        };
        y < Self::HEIGHT && self.cell(x, y).is_vacant()
    }

    /// Writes or erases `piece` on the board, skipping cells outside the grid.
    pub fn place(&mut self, piece: &Piece, mode: PlaceMode) {
        let value = match mode {
            PlaceMode::Write => Cell::Locked(piece.kind()),
            PlaceMode::Erase => Cell::Empty,
        };
        for (x, y) in in_bounds(piece) {
            self.set_cell(x, y, value);
        }
    }

    /// Writes `piece` only into in-bounds cells that are currently vacant.
    ///
    /// Used at game over, where the piece may overlap settled blocks.
    pub fn place_safe(&mut self, piece: &Piece) {
        for (x, y) in in_bounds(piece) {
            if self.cell(x, y).is_vacant() {
                self.set_cell(x, y, Cell::Locked(piece.kind()));
            }
        }
    }
}

fn in_bounds(piece: &Piece) -> impl Iterator<Item = (usize, usize)> + '_ {
    piece.occupied_positions().filter_map(|(x, y)| {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < Playfield::WIDTH && y < Playfield::HEIGHT).then_some((x, y))
    })
}

impl Piece {
    /// Returns the lowest legal position reachable by moving straight down.
    ///
    /// If the piece itself is not placeable it is returned unchanged.
    #[must_use]
    pub fn drop_position(&self, playfield: &Playfield) -> Self {
        iter::successors(Some(*self), |piece| {
            let next = piece.translated(0, 1);
            playfield.can_place(&next).then_some(next)
        })
        .last()
        .unwrap_or(*self)
    }
}

/// Cells currently showing the landing preview of the falling piece.
///
/// The overlay remembers exactly which cells it painted so it can remove them
/// without touching anything the board wrote afterwards.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GhostOverlay {
    positions: ArrayVec<(usize, usize), 4>,
}

impl GhostOverlay {
    /// Paints `piece` as ghost cells. Only empty in-bounds cells are painted.
    ///
    /// Any previously painted cells are forgotten, so call [`erase`](Self::erase) first.
    pub fn draw(&mut self, playfield: &mut Playfield, piece: &Piece) {
        self.positions.clear();
        for (x, y) in in_bounds(piece) {
            if playfield.cell(x, y).is_empty() {
                playfield.set_cell(x, y, Cell::Ghost);
                self.positions.push((x, y));
            }
        }
    }

    /// Removes the painted cells that are still ghost cells.
    pub fn erase(&mut self, playfield: &mut Playfield) {
        for (x, y) in self.positions.drain(..) {
            if playfield.cell(x, y).is_ghost() {
                playfield.set_cell(x, y, Cell::Empty);
            }
        }
    }

    /// Forgets the painted cells without touching the board.
    pub fn clear(&mut self) {
        self.positions.clear();
    }

    #[must_use]
    pub fn positions(&self) -> &[(usize, usize)] {
        &self.positions
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        !self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::piece::{PieceKind, PiecePosition, PieceRotation};

    fn piece_at(kind: PieceKind, rotation: u8, x: i16, y: i16) -> Piece {
        Piece::new(kind, PieceRotation::new(rotation), PiecePosition::new(x, y))
    }

    #[test]
    fn test_spawn_is_placeable_on_empty_board() {
        let playfield = Playfield::INITIAL;
        for kind in PieceKind::ALL {
            assert!(playfield.can_place(&Piece::spawn(kind)), "{kind}");
        }
    }

    #[test]
    fn test_cells_above_board_are_legal() {
        let playfield = Playfield::INITIAL;
        // Vertical I at column 6, rows -3..=0; row 0 col 6 is in the ceiling gap.
        assert!(playfield.can_place(&piece_at(PieceKind::I, 0, 5, -3)));
        // Column 4 of the ceiling is wall.
        assert!(!playfield.can_place(&piece_at(PieceKind::I, 0, 3, -3)));
    }

    #[test]
    fn test_columns_outside_board_are_illegal() {
        let playfield = Playfield::INITIAL;
        // Vertical I occupies template column 1; x = -1 puts it in column 0 (wall).
        assert!(!playfield.can_place(&piece_at(PieceKind::I, 0, -1, 5)));
        // x = -2 puts it at column -1.
        assert!(!playfield.can_place(&piece_at(PieceKind::I, 0, -2, -10)));
        assert!(!playfield.can_place(&piece_at(PieceKind::I, 0, 14, -10)));
    }

    #[test]
    fn test_rows_below_board_are_illegal() {
        let playfield = Playfield::INITIAL;
        assert!(playfield.can_place(&piece_at(PieceKind::I, 0, 5, 15)));
        assert!(!playfield.can_place(&piece_at(PieceKind::I, 0, 5, 16)));
    }

    #[test]
    fn test_ghost_cells_do_not_block() {
        let mut playfield = Playfield::INITIAL;
        playfield.set_cell(6, 10, Cell::Ghost);
        assert!(playfield.can_place(&piece_at(PieceKind::I, 0, 5, 8)));
        playfield.set_cell(6, 10, Cell::Locked(PieceKind::O));
        assert!(!playfield.can_place(&piece_at(PieceKind::I, 0, 5, 8)));
    }

    #[test]
    fn test_place_write_and_erase() {
        let mut playfield = Playfield::INITIAL;
        let piece = piece_at(PieceKind::O, 0, 3, 10);
        playfield.place(&piece, PlaceMode::Write);
        for (x, y) in [(4, 11), (5, 11), (4, 12), (5, 12)] {
            assert_eq!(playfield.cell(x, y), Cell::Locked(PieceKind::O));
        }
        playfield.place(&piece, PlaceMode::Erase);
        assert_eq!(playfield, Playfield::INITIAL);
    }

    #[test]
    fn test_place_skips_cells_above_board() {
        let mut playfield = Playfield::INITIAL;
        playfield.place(&piece_at(PieceKind::I, 0, 5, -2), PlaceMode::Write);
        assert_eq!(playfield.cell(6, 0), Cell::Locked(PieceKind::I));
        assert_eq!(playfield.cell(6, 1), Cell::Locked(PieceKind::I));
        assert_eq!(playfield.cell(6, 2), Cell::Empty);
    }

    #[test]
    fn test_place_safe_keeps_existing_blocks() {
        let mut playfield = Playfield::INITIAL;
        playfield.set_cell(6, 1, Cell::Locked(PieceKind::Z));
        playfield.place_safe(&piece_at(PieceKind::I, 0, 5, -1));
        assert_eq!(playfield.cell(6, 0), Cell::Locked(PieceKind::I));
        assert_eq!(playfield.cell(6, 1), Cell::Locked(PieceKind::Z));
        assert_eq!(playfield.cell(6, 2), Cell::Locked(PieceKind::I));
    }

    #[test]
    fn test_drop_position_lands_on_floor_and_stack() {
        let mut playfield = Playfield::INITIAL;
        let piece = Piece::spawn(PieceKind::I);
        // Vertical I occupies rows y..y+4; floor is row 19.
        assert_eq!(piece.drop_position(&playfield).position(), PiecePosition::new(5, 15));

        playfield.set_cell(6, 18, Cell::Locked(PieceKind::O));
        assert_eq!(piece.drop_position(&playfield).position(), PiecePosition::new(5, 14));
    }

    #[test]
    fn test_ghost_overlay_draw_and_erase() {
        let mut playfield = Playfield::INITIAL;
        let mut ghost = GhostOverlay::default();
        let landing = piece_at(PieceKind::O, 0, 3, 16);
        ghost.draw(&mut playfield, &landing);
        assert!(ghost.is_visible());
        assert_eq!(ghost.positions().len(), 4);
        assert_eq!(playfield.cell(4, 17), Cell::Ghost);

        ghost.erase(&mut playfield);
        assert!(!ghost.is_visible());
        assert_eq!(playfield, Playfield::INITIAL);
    }

    #[test]
    fn test_ghost_erase_leaves_overwritten_cells() {
        let mut playfield = Playfield::INITIAL;
        let mut ghost = GhostOverlay::default();
        ghost.draw(&mut playfield, &piece_at(PieceKind::O, 0, 3, 16));
        playfield.set_cell(4, 17, Cell::Locked(PieceKind::T));

        ghost.erase(&mut playfield);
        assert_eq!(playfield.cell(4, 17), Cell::Locked(PieceKind::T));
        assert_eq!(playfield.cell(5, 17), Cell::Empty);
    }

    #[test]
    fn test_ghost_draw_skips_occupied_cells() {
        let mut playfield = Playfield::INITIAL;
        playfield.set_cell(4, 17, Cell::Locked(PieceKind::T));
        let mut ghost = GhostOverlay::default();
        ghost.draw(&mut playfield, &piece_at(PieceKind::O, 0, 3, 16));
        assert_eq!(ghost.positions().len(), 3);
        assert_eq!(playfield.cell(4, 17), Cell::Locked(PieceKind::T));
    }
}
