use crossterm::event::{Event, KeyEventKind};
use ratatui::Frame;
use termtris_engine::{Game, GameEvent, HighScoreStore, PieceSource, Ranking};

use crate::{
    command::play::keymap,
    high_score::HighScoreFile,
    sound::SoundCues,
    tui::{App, Tui},
    view::widgets::{GameDisplay, TitleDisplay},
};

#[derive(Debug)]
pub struct PlayApp<S = termtris_engine::RandomPieces, H = HighScoreFile> {
    game: Game<S>,
    high_scores: H,
    sound: SoundCues,
    ranking: Option<Ranking>,
}

impl<S, H> PlayApp<S, H>
where
    S: PieceSource,
    H: HighScoreStore,
{
    pub fn new(game: Game<S>, high_scores: H, sound: SoundCues) -> Self {
        Self {
            game,
            high_scores,
            sound,
            ranking: None,
        }
    }

    pub fn game(&self) -> &Game<S> {
        &self.game
    }

    /// Plays queued events, records the score when a run ends, and adjusts
    /// the tick rate to the game's current phase and level.
    fn after_step(&mut self, tui: &mut Tui) {
        for event in self.game.drain_events() {
            self.sound.play(event);
            match event {
                GameEvent::GameOver => {
                    self.ranking = Some(self.game.record_score(&mut self.high_scores));
                }
                GameEvent::BackgroundStart => self.ranking = None,
                _ => {}
            }
        }
        tui.set_tick_interval(self.game.tick_interval());
    }
}

impl<S, H> App for PlayApp<S, H>
where
    S: PieceSource,
    H: HighScoreStore,
{
    fn init(&mut self, tui: &mut Tui) {
        tui.set_tick_interval(self.game.tick_interval());
    }

    fn should_exit(&self) -> bool {
        self.game.phase().is_terminated()
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) {
        let Some(event) = event.as_key_event() else {
            return;
        };
        if event.kind == KeyEventKind::Release {
            return;
        }
        if let Some(key) = keymap::game_key(&event) {
            self.game.handle_key(key);
            self.after_step(tui);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        if self.game.phase().is_start_screen() {
            frame.render_widget(TitleDisplay::new(), frame.area());
            return;
        }
        frame.render_widget(
            GameDisplay::new(&self.game, self.ranking.as_ref()),
            frame.area(),
        );
    }

    fn update(&mut self, tui: &mut Tui) {
        self.game.tick();
        self.after_step(tui);
    }
}
