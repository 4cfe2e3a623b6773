//! Core data structures: piece geometry, the playfield grid, and placement rules.
//!
//! - [`Piece`] / [`PieceKind`] - tetromino templates and piece instances
//! - [`Playfield`] - the 15×20 board with walls, ceiling gap, and line clearing
//! - [`GhostOverlay`] - landing preview cells written into the board

pub use self::{piece::*, placement::*, playfield::*};

pub(crate) mod piece;
pub(crate) mod placement;
pub(crate) mod playfield;
