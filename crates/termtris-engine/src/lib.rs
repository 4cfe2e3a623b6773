//! Board, pieces, and game rules for a terminal falling-block puzzle.
//!
//! The crate has no terminal or file I/O. A front end feeds it [`Key`]s and
//! ticks, renders [`Game::frame`], and reacts to the [`GameEvent`]s it queues.
//!
//! - [`core`] - pieces, the playfield grid, and collision
//! - [`engine`] - scoring, piece sources, high-score ranking, and the game state machine
//! - [`input`] - logical keys and raw terminal byte decoding

pub use self::{core::*, engine::*, input::*};

pub mod core;
pub mod engine;
pub mod input;
