//! Game logic built on the core data structures.
//!
//! - [`Game`] - the state machine: start screen, play, pause, game over, restart
//! - [`GameStats`] - score, level, and drop speed
//! - [`PieceSource`] - where new piece kinds come from
//! - [`HighScoreStore`] / [`Ranking`] - high-score persistence contract
//! - [`GameEvent`] - cues queued for the front end
//!
//! # Game Flow
//!
//! 1. The game starts on the start screen; any key begins a run
//! 2. Every tick the caller advances the game; gravity moves the piece down
//! 3. A piece that cannot move down locks, full rows clear, and the next piece spawns
//! 4. When a new piece has no room, or a piece locks above the board, the run ends
//! 5. After game over, restart begins a fresh run; any other key terminates

pub use self::{event::*, game::*, high_score::*, piece_generator::*, scoring::*};

mod event;
mod game;
mod high_score;
mod piece_generator;
mod scoring;
