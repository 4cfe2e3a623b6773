use std::fmt;

use rand::{Rng, distr::StandardUniform, prelude::Distribution};

/// Side length of the square bounding box every piece template lives in.
pub const TEMPLATE_SIZE: usize = 4;

/// A falling piece (tetromino) with position, rotation, and type.
///
/// Pieces are plain values: movement and rotation return new `Piece` instances,
/// and legality is decided by the [`Playfield`](crate::Playfield) they are tested
/// against.
///
/// # Coordinate System
///
/// - The position is the top-left corner of the piece's 4×4 template
/// - `x` grows rightward (columns), `y` grows downward (rows)
/// - `y` may be negative while the piece is still above the visible board
///
/// # Example
///
/// ```
/// use termtris_engine::{Piece, PieceKind};
///
/// let piece = Piece::spawn(PieceKind::T);
/// let moved = piece.translated(1, 0);
/// let rotated = moved.rotated_right();
/// assert_eq!(rotated.position().x(), piece.position().x() + 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    position: PiecePosition,
    rotation: PieceRotation,
    kind: PieceKind,
}

impl Piece {
    /// Creates a piece of the given kind at the spawn position in its spawn orientation.
    #[must_use]
    pub const fn spawn(kind: PieceKind) -> Self {
        Self {
            position: PiecePosition::SPAWN,
            rotation: PieceRotation::SPAWN,
            kind,
        }
    }

    #[must_use]
    pub const fn new(kind: PieceKind, rotation: PieceRotation, position: PiecePosition) -> Self {
        Self {
            position,
            rotation,
            kind,
        }
    }

    #[must_use]
    pub const fn position(&self) -> PiecePosition {
        self.position
    }

    #[must_use]
    pub const fn rotation(&self) -> PieceRotation {
        self.rotation
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns the board coordinates `(x, y)` of every filled template cell.
    ///
    /// Coordinates may fall outside the board; callers decide how to treat them.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i16, i16)> + '_ {
        self.kind
            .occupied_offsets(self.rotation)
            .map(move |(dx, dy)| {
                #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                let (dx, dy) = (dx as i16, dy as i16);
                (self.position.x + dx, self.position.y + dy)
            })
    }

    #[must_use]
    pub const fn translated(&self, dx: i16, dy: i16) -> Self {
        Self {
            position: PiecePosition::new(self.position.x + dx, self.position.y + dy),
            rotation: self.rotation,
            kind: self.kind,
        }
    }

    #[must_use]
    pub const fn with_rotation(&self, rotation: PieceRotation) -> Self {
        Self {
            position: self.position,
            rotation,
            kind: self.kind,
        }
    }

    #[must_use]
    pub const fn rotated_right(&self) -> Self {
        self.with_rotation(self.rotation.rotated_right())
    }
}

/// Top-left corner of a piece template in board coordinates.
///
/// Stored as signed values because a freshly spawned piece starts one row above
/// the visible board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PiecePosition {
    x: i16,
    y: i16,
}

impl PiecePosition {
    /// Where new pieces appear: horizontally centred, one row above the board.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const SPAWN: Self = Self::new(
        (crate::Playfield::WIDTH / 2 - TEMPLATE_SIZE / 2) as i16,
        -1,
    );

    #[must_use]
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn x(self) -> i16 {
        self.x
    }

    #[must_use]
    pub const fn y(self) -> i16 {
        self.y
    }

    /// Returns true while the anchor row is above the visible board.
    #[must_use]
    pub const fn is_above_board(self) -> bool {
        self.y < 0
    }
}

impl fmt::Display for PiecePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Rotation state of a piece.
///
/// - `0`: spawn orientation
/// - `1`: 90° clockwise
/// - `2`: 180°
/// - `3`: 270° clockwise
///
/// Any step count is reduced modulo 4.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PieceRotation(u8);

impl PieceRotation {
    pub const SPAWN: Self = Self(0);

    #[must_use]
    pub const fn new(steps: u8) -> Self {
        Self(steps % 4)
    }

    #[must_use]
    pub const fn rotated_right(self) -> Self {
        Self((self.0 + 1) % 4)
    }

    #[must_use]
    pub const fn rotated_left(self) -> Self {
        Self((self.0 + 3) % 4)
    }

    #[must_use]
    pub const fn steps(self) -> u8 {
        self.0
    }

    /// Maps a rotated `(row, col)` back onto the unrotated template.
    ///
    /// Applies `(r, c) -> (3 - c, r)` once per clockwise step.
    const fn template_coordinate(self, row: usize, col: usize) -> (usize, usize) {
        let (mut r, mut c) = (row, col);
        let mut i = 0;
        while i < self.0 {
            let next_r = TEMPLATE_SIZE - 1 - c;
            c = r;
            r = next_r;
            i += 1;
        }
        (r, c)
    }
}

/// The seven tetromino types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    #[display("I")]
    I = 0,
    /// O-piece.
    #[display("O")]
    O = 1,
    /// T-piece.
    #[display("T")]
    T = 2,
    /// S-piece.
    #[display("S")]
    S = 3,
    /// Z-piece.
    #[display("Z")]
    Z = 4,
    /// J-piece.
    #[display("J")]
    J = 5,
    /// L-piece.
    #[display("L")]
    L = 6,
}

/// Uniform over the seven kinds.
impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::LEN {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Returns the display symbol used for locked cells of this kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use termtris_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Returns whether the template cell at `(row, col)` is filled in the given rotation.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not in `0..4`.
    #[must_use]
    pub const fn is_occupied(self, rotation: PieceRotation, row: usize, col: usize) -> bool {
        assert!(row < TEMPLATE_SIZE && col < TEMPLATE_SIZE);
        let (r, c) = rotation.template_coordinate(row, col);
        PIECE_TEMPLATES[self.index()][r] & (1 << c) != 0
    }

    /// Looks up one template cell: the piece symbol when filled, `None` when empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use termtris_engine::{PieceKind, PieceRotation};
    ///
    /// // The I-piece is a vertical bar in column 1 of its template...
    /// assert_eq!(PieceKind::I.cell_at(PieceRotation::SPAWN, 0, 1), Some('I'));
    /// // ...and a horizontal bar in row 1 after one clockwise turn.
    /// assert_eq!(PieceKind::I.cell_at(PieceRotation::new(1), 1, 3), Some('I'));
    /// assert_eq!(PieceKind::I.cell_at(PieceRotation::new(1), 0, 1), None);
    /// ```
    #[must_use]
    pub const fn cell_at(
        self,
        rotation: PieceRotation,
        row: usize,
        col: usize,
    ) -> Option<char> {
        if self.is_occupied(rotation, row, col) {
            Some(self.as_char())
        } else {
            None
        }
    }

    /// Returns an iterator of filled `(col, row)` offsets within the template.
    pub fn occupied_offsets(self, rotation: PieceRotation) -> impl Iterator<Item = (usize, usize)> {
        (0..TEMPLATE_SIZE).flat_map(move |row| {
            (0..TEMPLATE_SIZE)
                .filter(move |&col| self.is_occupied(rotation, row, col))
                .map(move |col| (col, row))
        })
    }

    /// Spawn-orientation occupancy, row by row, for the next-piece preview.
    #[must_use]
    pub fn preview(self) -> [[bool; TEMPLATE_SIZE]; TEMPLATE_SIZE] {
        let mut rows = [[false; TEMPLATE_SIZE]; TEMPLATE_SIZE];
        for (row, cells) in rows.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                *cell = self.is_occupied(PieceRotation::SPAWN, row, col);
            }
        }
        rows
    }
}

/// Error returned when a character is not one of the seven piece symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown piece symbol {_0:?}")]
pub struct UnknownPieceSymbol(#[error(not(source))] pub char);

impl TryFrom<char> for PieceKind {
    type Error = UnknownPieceSymbol;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::from_char(c).ok_or(UnknownPieceSymbol(c))
    }
}

/// Unrotated template rows, bit `c` set when column `c` is filled.
type PieceTemplate = [u8; TEMPLATE_SIZE];

const PIECE_TEMPLATES: [PieceTemplate; PieceKind::LEN] = {
    const fn m(bits: [bool; TEMPLATE_SIZE]) -> u8 {
        let mut mask = 0;
        let mut i = 0;
        while i < TEMPLATE_SIZE {
            if bits[i] {
                mask |= 1 << i;
            }
            i += 1;
        }
        mask
    }

    const C: bool = true;
    const E: bool = false;
    const EEEE: u8 = m([E; 4]);

    [
        // I-piece
        [m([E, C, E, E]), m([E, C, E, E]), m([E, C, E, E]), m([E, C, E, E])],
        // O-piece
        [EEEE, m([E, C, C, E]), m([E, C, C, E]), EEEE],
        // T-piece
        [EEEE, m([E, C, E, E]), m([C, C, C, E]), EEEE],
        // S-piece
        [EEEE, m([E, C, C, E]), m([C, C, E, E]), EEEE],
        // Z-piece
        [EEEE, m([C, C, E, E]), m([E, C, C, E]), EEEE],
        // J-piece
        [EEEE, m([C, E, E, E]), m([C, C, C, E]), EEEE],
        // L-piece
        [EEEE, m([E, E, C, E]), m([C, C, C, E]), EEEE],
    ]
};

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(kind: PieceKind, rotation: PieceRotation) -> [[bool; 4]; 4] {
        let mut rows = [[false; 4]; 4];
        for (row, cells) in rows.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                *cell = kind.is_occupied(rotation, row, col);
            }
        }
        rows
    }

    #[test]
    fn test_every_template_has_four_cells_in_every_rotation() {
        for kind in PieceKind::ALL {
            for steps in 0..4 {
                let count = kind.occupied_offsets(PieceRotation::new(steps)).count();
                assert_eq!(count, 4, "{kind} rotation {steps} has {count} cells");
            }
        }
    }

    #[test]
    fn test_four_rotations_return_to_the_original_mask() {
        for kind in PieceKind::ALL {
            for start in 0..4 {
                let original = mask(kind, PieceRotation::new(start));
                let mut rotation = PieceRotation::new(start);
                for _ in 0..4 {
                    rotation = rotation.rotated_right();
                }
                assert_eq!(mask(kind, rotation), original);
                // Raw step counts are reduced the same way.
                assert_eq!(mask(kind, PieceRotation::new(start + 4)), original);
            }
        }
    }

    #[test]
    fn test_rotation_is_not_identity_for_asymmetric_pieces() {
        for kind in [PieceKind::I, PieceKind::T, PieceKind::J, PieceKind::L] {
            assert_ne!(
                mask(kind, PieceRotation::SPAWN),
                mask(kind, PieceRotation::new(1)),
                "{kind} should change shape after one rotation"
            );
        }
        assert_eq!(
            mask(PieceKind::O, PieceRotation::SPAWN),
            mask(PieceKind::O, PieceRotation::new(1))
        );
    }

    #[test]
    fn test_rotation_follows_coordinate_transform() {
        // T-piece: spawn has the stem at (1, 1) and the bar on row 2.
        let t = PieceKind::T;
        assert!(t.is_occupied(PieceRotation::SPAWN, 1, 1));
        assert!(t.is_occupied(PieceRotation::SPAWN, 2, 0));
        // One clockwise step looks up template (3 - col, row).
        for row in 0..4 {
            for col in 0..4 {
                assert_eq!(
                    t.is_occupied(PieceRotation::new(1), row, col),
                    t.is_occupied(PieceRotation::SPAWN, 3 - col, row),
                );
            }
        }
    }

    #[test]
    fn test_rotated_left_undoes_rotated_right() {
        for steps in 0..4 {
            let rotation = PieceRotation::new(steps);
            assert_eq!(rotation.rotated_right().rotated_left(), rotation);
        }
    }

    #[test]
    #[should_panic(expected = "row < TEMPLATE_SIZE")]
    fn test_cell_lookup_outside_template_panics() {
        let _ = PieceKind::I.cell_at(PieceRotation::SPAWN, 4, 0);
    }

    #[test]
    fn test_occupied_positions_follow_anchor() {
        let piece = Piece::spawn(PieceKind::I);
        let positions: Vec<_> = piece.occupied_positions().collect();
        assert_eq!(positions, vec![(6, -1), (6, 0), (6, 1), (6, 2)]);

        let moved = piece.translated(-2, 3);
        let positions: Vec<_> = moved.occupied_positions().collect();
        assert_eq!(positions, vec![(4, 2), (4, 3), (4, 4), (4, 5)]);
    }

    #[test]
    fn test_spawn_position() {
        assert_eq!(PiecePosition::SPAWN, PiecePosition::new(5, -1));
        assert!(PiecePosition::SPAWN.is_above_board());
    }

    #[test]
    fn test_piece_kind_char_conversion() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
            assert_eq!(kind.to_string(), kind.as_char().to_string());
        }
        assert_eq!(PieceKind::from_char('X'), None);
        assert_eq!(PieceKind::try_from('S'), Ok(PieceKind::S));
        let err = PieceKind::try_from('x').unwrap_err();
        assert_eq!(err.to_string(), "unknown piece symbol 'x'");
        assert_eq!(PieceKind::from_index(7), None);
        assert_eq!(PieceKind::from_index(2), Some(PieceKind::T));
    }

    #[test]
    fn test_preview_matches_spawn_mask() {
        assert_eq!(PieceKind::O.preview(), mask(PieceKind::O, PieceRotation::SPAWN));
        assert_eq!(
            PieceKind::L.preview(),
            [
                [false, false, false, false],
                [false, false, true, false],
                [true, true, true, false],
                [false, false, false, false],
            ]
        );
    }
}
