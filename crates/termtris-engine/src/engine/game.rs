use std::time::Duration;

use log::{debug, info};

use crate::{
    core::{
        piece::{Piece, PieceKind, PieceRotation, TEMPLATE_SIZE},
        placement::{GhostOverlay, PlaceMode},
        playfield::Playfield,
    },
    engine::{
        event::GameEvent,
        high_score::{HighScoreStore, Ranking},
        piece_generator::{PieceSource, RandomPieces},
        scoring::{GameStats, SUBTICKS_PER_DROP},
    },
    input::Key,
};

/// Horizontal offsets tried, in order, when a rotation collides.
pub const KICK_OFFSETS: [i16; 7] = [0, -1, 1, -2, 2, -3, 3];

/// Time between steps of the game-over sweep.
pub const SWEEP_INTERVAL: Duration = Duration::from_millis(40);

/// Lifecycle phase of a [`Game`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant, derive_more::Display)]
pub enum GamePhase {
    /// Waiting for any key before the first run.
    #[display("start screen")]
    StartScreen,
    #[display("playing")]
    Playing,
    #[display("paused")]
    Paused,
    /// The run ended. The sweep may still be animating.
    #[display("game over")]
    GameOver,
    /// The player chose not to restart. The front end should exit.
    #[display("terminated")]
    Terminated,
}

/// Game-over animation that turns settled blocks into walls one row at a time,
/// from the bottom up. Rows without settled blocks are skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
struct GameOverSweep {
    next_row: Option<usize>,
}

impl GameOverSweep {
    const fn new() -> Self {
        Self {
            next_row: Some(Playfield::FLOOR_Y - 1),
        }
    }

    /// Seals the next row and returns whether the sweep is still running.
    fn advance(&mut self, playfield: &mut Playfield) -> bool {
        let Some(start) = self.next_row else {
            return false;
        };
        match (0..=start).rev().find(|&y| playfield.row_has_locked(y)) {
            Some(y) => {
                playfield.seal_row(y);
                self.next_row = y.checked_sub(1);
                true
            }
            None => {
                self.next_row = None;
                false
            }
        }
    }
}

/// A complete game: board, falling piece, statistics, and lifecycle.
///
/// The game is driven from outside by two inputs: [`handle_key`](Self::handle_key)
/// for player actions and [`tick`](Self::tick), which the caller invokes every
/// [`tick_interval`](Self::tick_interval). Gravity advances the piece once every
/// [`SUBTICKS_PER_DROP`] ticks.
///
/// Sound-worthy moments are queued as [`GameEvent`]s and collected with
/// [`drain_events`](Self::drain_events).
///
/// # Example
///
/// ```
/// use termtris_engine::{Game, GamePhase, Key, PieceKind, SequencePieces};
///
/// let mut game = Game::with_source(SequencePieces::new([PieceKind::O]));
/// assert_eq!(game.phase(), GamePhase::StartScreen);
///
/// game.handle_key(Key::Other(b'x'));
/// assert_eq!(game.phase(), GamePhase::Playing);
///
/// game.handle_key(Key::HardDrop);
/// assert_eq!(game.stats().completed_pieces(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Game<S = RandomPieces> {
    playfield: Playfield,
    ghost: GhostOverlay,
    falling_piece: Piece,
    next_kind: PieceKind,
    source: S,
    stats: GameStats,
    phase: GamePhase,
    drop_counter: u32,
    ghost_enabled: bool,
    quit_by_user: bool,
    sweep: Option<GameOverSweep>,
    events: Vec<GameEvent>,
}

impl Default for Game<RandomPieces> {
    fn default() -> Self {
        Self::new()
    }
}

impl Game<RandomPieces> {
    /// Creates a game with uniformly random pieces.
    #[must_use]
    pub fn new() -> Self {
        Self::with_source(RandomPieces::new())
    }
}

impl<S> Game<S>
where
    S: PieceSource,
{
    /// Creates a game on the start screen, drawing piece kinds from `source`.
    pub fn with_source(mut source: S) -> Self {
        let next_kind = source.next_kind();
        Self {
            playfield: Playfield::INITIAL,
            ghost: GhostOverlay::default(),
            falling_piece: Piece::spawn(next_kind),
            next_kind,
            source,
            stats: GameStats::new(),
            phase: GamePhase::StartScreen,
            drop_counter: 0,
            ghost_enabled: true,
            quit_by_user: false,
            sweep: None,
            events: Vec::new(),
        }
    }

    /// The board with settled blocks and ghost cells, without the falling piece.
    #[must_use]
    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    #[must_use]
    pub fn falling_piece(&self) -> &Piece {
        &self.falling_piece
    }

    #[must_use]
    pub fn next_kind(&self) -> PieceKind {
        self.next_kind
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Returns true while a run is in progress, paused or not.
    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.phase, GamePhase::Playing | GamePhase::Paused)
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.phase.is_paused()
    }

    #[must_use]
    pub fn is_ghost_enabled(&self) -> bool {
        self.ghost_enabled
    }

    #[must_use]
    pub fn is_quit_by_user(&self) -> bool {
        self.quit_by_user
    }

    /// Returns true while the game-over sweep is animating.
    #[must_use]
    pub fn is_sweeping(&self) -> bool {
        self.sweep.is_some()
    }

    /// Returns true once the run has ended and the game waits for restart-or-quit.
    #[must_use]
    pub fn awaiting_decision(&self) -> bool {
        self.phase.is_game_over() && self.sweep.is_none()
    }

    /// How often [`tick`](Self::tick) should be called, or `None` when the game
    /// only reacts to keys.
    #[must_use]
    pub fn tick_interval(&self) -> Option<Duration> {
        match self.phase {
            GamePhase::Playing => Some(self.stats.tick_interval()),
            GamePhase::GameOver if self.sweep.is_some() => Some(SWEEP_INTERVAL),
            _ => None,
        }
    }

    /// Returns the board as it should be displayed: settled blocks, the ghost,
    /// and the falling piece while a run is in progress.
    #[must_use]
    pub fn frame(&self) -> Playfield {
        let mut frame = self.playfield.clone();
        if self.is_running() {
            frame.place(&self.falling_piece, PlaceMode::Write);
        }
        frame
    }

    /// The next piece in its spawn orientation.
    #[must_use]
    pub fn next_preview(&self) -> [[Option<PieceKind>; TEMPLATE_SIZE]; TEMPLATE_SIZE] {
        self.next_kind
            .preview()
            .map(|row| row.map(|filled| filled.then_some(self.next_kind)))
    }

    /// Takes the events queued since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Saves the current score to `store` and returns the resulting ranking.
    pub fn record_score(&self, store: &mut impl HighScoreStore) -> Ranking {
        store.save(self.stats.score())
    }

    /// Returns true if the falling piece could be moved by `(dx, dy)` and set to `rotation`.
    #[must_use]
    pub fn can_move(&self, dx: i16, dy: i16, rotation: PieceRotation) -> bool {
        let moved = self.falling_piece.translated(dx, dy).with_rotation(rotation);
        self.playfield.can_place(&moved)
    }

    /// Returns true if a piece of `kind` fits at the spawn position.
    #[must_use]
    pub fn can_spawn(&self, kind: PieceKind) -> bool {
        self.playfield.can_place(&Piece::spawn(kind))
    }

    pub fn set_ghost_enabled(&mut self, enabled: bool) {
        self.ghost_enabled = enabled;
        self.refresh_ghost();
    }

    /// Dispatches a key according to the current phase.
    pub fn handle_key(&mut self, key: Key) {
        match self.phase {
            GamePhase::StartScreen => {
                if key.is_quit() {
                    self.set_phase(GamePhase::Terminated);
                } else {
                    self.start();
                }
            }
            GamePhase::Playing => match key {
                Key::MoveLeft => {
                    self.try_move_left();
                }
                Key::MoveRight => {
                    self.try_move_right();
                }
                Key::Rotate => {
                    self.try_rotate();
                }
                Key::SoftDrop => self.soft_drop(),
                Key::HardDrop => self.hard_drop(),
                Key::Pause => self.toggle_pause(),
                Key::ToggleGhost => self.toggle_ghost(),
                Key::Quit => self.quit(),
                Key::Restart | Key::Other(_) => {}
            },
            GamePhase::Paused => match key {
                Key::Pause => self.toggle_pause(),
                Key::ToggleGhost => self.toggle_ghost(),
                Key::Quit => self.quit(),
                _ => {}
            },
            GamePhase::GameOver => {
                if self.sweep.is_some() {
                    return;
                }
                if key.is_restart() {
                    self.restart();
                } else {
                    self.set_phase(GamePhase::Terminated);
                }
            }
            GamePhase::Terminated => {}
        }
    }

    /// Begins the first run from the start screen.
    pub fn start(&mut self) {
        if !self.phase.is_start_screen() {
            return;
        }
        self.begin_run();
    }

    /// Resets everything except the ghost preference and begins a new run.
    pub fn restart(&mut self) {
        self.playfield.reset();
        self.ghost.clear();
        self.stats = GameStats::new();
        self.drop_counter = 0;
        self.quit_by_user = false;
        self.sweep = None;
        self.next_kind = self.source.next_kind();
        self.begin_run();
    }

    fn begin_run(&mut self) {
        info!("run started");
        self.set_phase(GamePhase::Playing);
        self.events.push(GameEvent::BackgroundStart);
        self.spawn();
    }

    /// Advances the game by one tick.
    ///
    /// While playing, every [`SUBTICKS_PER_DROP`]th tick moves the piece down
    /// (locking it if it cannot move). After game over, each tick advances the
    /// sweep. Other phases ignore ticks.
    pub fn tick(&mut self) {
        match self.phase {
            GamePhase::Playing => {
                self.drop_counter += 1;
                if self.drop_counter >= SUBTICKS_PER_DROP {
                    self.drop_counter = 0;
                    self.step_down(false);
                }
            }
            GamePhase::GameOver => {
                if let Some(sweep) = &mut self.sweep
                    && !sweep.advance(&mut self.playfield)
                {
                    debug!("game over sweep finished");
                    self.sweep = None;
                }
            }
            GamePhase::StartScreen | GamePhase::Paused | GamePhase::Terminated => {}
        }
    }

    pub fn try_move_left(&mut self) -> bool {
        self.try_shift(-1)
    }

    pub fn try_move_right(&mut self) -> bool {
        self.try_shift(1)
    }

    fn try_shift(&mut self, dx: i16) -> bool {
        if !self.can_move(dx, 0, self.falling_piece.rotation()) {
            return false;
        }
        self.falling_piece = self.falling_piece.translated(dx, 0);
        self.refresh_ghost();
        true
    }

    /// Rotates clockwise, trying each of [`KICK_OFFSETS`] in order.
    pub fn try_rotate(&mut self) -> bool {
        let rotation = self.falling_piece.rotation().rotated_right();
        let Some(dx) = KICK_OFFSETS
            .into_iter()
            .find(|&dx| self.can_move(dx, 0, rotation))
        else {
            return false;
        };
        self.falling_piece = self.falling_piece.translated(dx, 0).with_rotation(rotation);
        self.refresh_ghost();
        true
    }

    /// Moves the piece down one row, locking it without the lock cue if it cannot move.
    pub fn soft_drop(&mut self) {
        self.events.push(GameEvent::SoftDrop);
        self.step_down(true);
    }

    /// Drops the piece as far as it goes and locks it.
    pub fn hard_drop(&mut self) {
        self.events.push(GameEvent::HardDrop);
        for _ in 0..Playfield::HEIGHT {
            let moved = self.falling_piece.translated(0, 1);
            if !self.playfield.can_place(&moved) {
                break;
            }
            self.falling_piece = moved;
        }
        if self.falling_piece.position().is_above_board() {
            self.game_over();
        } else {
            self.lock(true);
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => self.set_phase(GamePhase::Paused),
            GamePhase::Paused => self.set_phase(GamePhase::Playing),
            _ => {}
        }
    }

    pub fn toggle_ghost(&mut self) {
        if !self.is_running() {
            return;
        }
        self.set_ghost_enabled(!self.ghost_enabled);
        debug!("ghost {}", if self.ghost_enabled { "on" } else { "off" });
    }

    /// Ends the run at the player's request. No sweep is played.
    pub fn quit(&mut self) {
        if !self.is_running() {
            return;
        }
        self.quit_by_user = true;
        self.game_over();
    }

    fn step_down(&mut self, mute_lock: bool) {
        let moved = self.falling_piece.translated(0, 1);
        if self.playfield.can_place(&moved) {
            self.falling_piece = moved;
            self.refresh_ghost();
        } else if self.falling_piece.position().is_above_board() {
            self.game_over();
        } else {
            self.lock(mute_lock);
        }
    }

    fn lock(&mut self, mute_lock: bool) {
        self.ghost.erase(&mut self.playfield);
        self.playfield.place(&self.falling_piece, PlaceMode::Write);
        let cleared_lines = self.playfield.clear_lines();
        let outcome = self.stats.record_lock(cleared_lines);
        debug!(
            "locked {} at {}: {} lines, {} points",
            self.falling_piece.kind(),
            self.falling_piece.position(),
            outcome.cleared_lines,
            outcome.points
        );

        match cleared_lines {
            0 if !mute_lock => self.events.push(GameEvent::Lock),
            0 => {}
            4 => self.events.push(GameEvent::TetrisClear),
            _ => self.events.push(GameEvent::LineClear),
        }
        if outcome.level_up {
            info!("level up: {}", self.stats.level());
            self.events.push(GameEvent::LevelUp);
        }

        self.drop_counter = 0;
        self.spawn();
    }

    fn spawn(&mut self) {
        self.falling_piece = Piece::spawn(self.next_kind);
        if !self.playfield.can_place(&self.falling_piece) {
            debug!("no room to spawn {}", self.falling_piece.kind());
            self.game_over();
            return;
        }
        self.next_kind = self.source.next_kind();
        debug!("spawned {}, next {}", self.falling_piece.kind(), self.next_kind);
        self.refresh_ghost();
    }

    fn game_over(&mut self) {
        self.ghost.erase(&mut self.playfield);
        if !self.quit_by_user {
            self.playfield.place_safe(&self.falling_piece);
            self.sweep = Some(GameOverSweep::new());
        }
        self.set_phase(GamePhase::GameOver);
        self.events.push(GameEvent::BackgroundStop);
        self.events.push(GameEvent::GameOver);
        info!(
            "run ended{}: score {}, level {}, lines {}",
            if self.quit_by_user { " by user" } else { "" },
            self.stats.score(),
            self.stats.level(),
            self.stats.total_cleared_lines()
        );
    }

    fn refresh_ghost(&mut self) {
        self.ghost.erase(&mut self.playfield);
        if !self.ghost_enabled || !self.is_running() {
            return;
        }
        let landing = self.falling_piece.drop_position(&self.playfield);
        if landing.position().y() != self.falling_piece.position().y() {
            self.ghost.draw(&mut self.playfield, &landing);
        }
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            debug!("phase {} -> {}", self.phase, phase);
            self.phase = phase;
        }
    }
}
