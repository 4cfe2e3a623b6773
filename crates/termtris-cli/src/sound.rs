use std::io::{self, Write};

use log::{debug, warn};
use termtris_engine::GameEvent;

const BELL: &[u8] = b"\x07";

/// Plays game events as terminal bell cues.
///
/// Only clears of four lines, level ups, and game over ring the bell; every
/// event is logged.
#[derive(Debug)]
pub struct SoundCues<W = io::Stdout> {
    out: W,
    muted: bool,
}

impl SoundCues {
    pub fn new(muted: bool) -> Self {
        Self::with_writer(io::stdout(), muted)
    }
}

impl<W> SoundCues<W>
where
    W: Write,
{
    pub fn with_writer(out: W, muted: bool) -> Self {
        Self { out, muted }
    }

    pub fn play(&mut self, event: GameEvent) {
        debug!("sound cue: {event}");
        if self.muted || !rings_bell(event) {
            return;
        }
        if let Err(e) = self.out.write_all(BELL).and_then(|()| self.out.flush()) {
            warn!("failed to ring bell: {e}");
        }
    }
}

fn rings_bell(event: GameEvent) -> bool {
    matches!(
        event,
        GameEvent::TetrisClear | GameEvent::LevelUp | GameEvent::GameOver
    )
}
