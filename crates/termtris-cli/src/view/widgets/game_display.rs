use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Color,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};
use termtris_engine::{Game, GamePhase, PieceSource, Ranking};

use crate::view::widgets::{
    BoardDisplay, GAME_OVER_KEYS, GameOverDisplay, KeyBinding, KeyBindingDisplay, PAUSED_KEYS,
    PLAYING_KEYS, PieceDisplay, StatsDisplay, color, style,
};

/// The in-game screen: stats, board, next piece, key help, and phase overlays.
#[derive(Debug)]
pub struct GameDisplay<'a, S> {
    game: &'a Game<S>,
    ranking: Option<&'a Ranking>,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a, S> GameDisplay<'a, S> {
    pub fn new(game: &'a Game<S>, ranking: Option<&'a Ranking>) -> Self {
        Self {
            game,
            ranking,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }
}

impl<S> GameDisplay<'_, S>
where
    S: PieceSource,
{
    fn border_color(&self) -> Color {
        match self.game.phase() {
            GamePhase::Paused => color::YELLOW,
            GamePhase::GameOver | GamePhase::Terminated => color::RED,
            GamePhase::StartScreen | GamePhase::Playing => color::WHITE,
        }
    }

    fn key_bindings(&self) -> &'static [KeyBinding<'static>] {
        match self.game.phase() {
            GamePhase::Playing => PLAYING_KEYS,
            GamePhase::Paused => PAUSED_KEYS,
            GamePhase::GameOver if self.game.awaiting_decision() => GAME_OVER_KEYS,
            _ => &[],
        }
    }
}

impl<S> Widget for GameDisplay<'_, S>
where
    S: PieceSource,
{
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl<S> Widget for &GameDisplay<'_, S>
where
    S: PieceSource,
{
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block_padding = Padding::symmetric(self.horizontal_padding, self.vertical_padding);
        let border_style = self.border_color();
        let playfield = self.game.frame();

        let game_board = BoardDisplay::new(&playfield).block(
            Block::bordered()
                .border_style(border_style)
                .style(style::DEFAULT),
        );
        let next_panel = PieceDisplay::new(self.game.next_preview()).block(
            Block::bordered()
                .title(Line::from("NEXT").centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT),
        );
        let stats_panel = StatsDisplay::new(self.game.stats()).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT),
        );
        let ghost_line = Line::styled(
            if self.game.is_ghost_enabled() {
                "GHOST: ON"
            } else {
                "GHOST: OFF"
            },
            style::DEFAULT,
        )
        .centered();

        let [main_area, help_area] = Layout::vertical([
            Constraint::Length(game_board.height()),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(area);

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(stats_panel.width()),
            Constraint::Length(game_board.width()),
            Constraint::Length(next_panel.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(main_area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(stats_panel.height())]).areas(left_column);
        let [next_area, ghost_area] = Layout::vertical([
            Constraint::Length(next_panel.height()),
            Constraint::Length(1),
        ])
        .areas(right_column);

        let board_area = center_column;
        let board_width = game_board.width();
        stats_panel.render(stats_area, buf);
        game_board.render(board_area, buf);
        next_panel.render(next_area, buf);
        ghost_line.render(ghost_area, buf);
        KeyBindingDisplay::new(self.key_bindings()).render(help_area, buf);

        match self.game.phase() {
            GamePhase::Paused => {
                let stats = self.game.stats();
                let text = Text::from(vec![
                    Line::from("PAUSED"),
                    Line::default(),
                    Line::from(format!("Score: {}", stats.score())),
                    Line::from(format!("Level: {}", stats.level())),
                    Line::from(format!("Lines: {}", stats.total_cleared_lines())),
                ])
                .style(style::PAUSED)
                .centered();
                let block = Block::new().style(style::PAUSED);
                let area = board_area
                    .centered(Constraint::Length(board_width), Constraint::Length(7));
                let inner = block.inner(area);
                Clear.render(area, buf);
                block.render(area, buf);
                text.render(inner.centered_vertically(Constraint::Length(5)), buf);
            }
            GamePhase::GameOver if self.game.awaiting_decision() => {
                let popup = GameOverDisplay::new(self.game.stats(), self.ranking);
                let area = board_area.centered(
                    Constraint::Length(popup.width()),
                    Constraint::Length(popup.height()),
                );
                popup.render(area, buf);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};
    use termtris_engine::{Key, PieceKind, SequencePieces};

    use super::*;

    fn render(game: &Game<SequencePieces>, ranking: Option<&Ranking>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| frame.render_widget(GameDisplay::new(game, ranking), frame.area()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(usize::from(buffer.area.width))
            .map(|row| row.iter().map(ratatui::buffer::Cell::symbol).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn started() -> Game<SequencePieces> {
        let mut game = Game::with_source(SequencePieces::new([PieceKind::T]));
        game.start();
        game
    }

    #[test]
    fn test_playing_shows_panels() {
        let screen = render(&started(), None);
        assert!(screen.contains("NEXT"));
        assert!(screen.contains("STATS"));
        assert!(screen.contains("GHOST: ON"));
        assert!(screen.contains("Hard Drop"));
        assert!(!screen.contains("PAUSED"));
    }

    #[test]
    fn test_paused_overlay() {
        let mut game = started();
        game.handle_key(Key::Pause);
        let screen = render(&game, None);
        assert!(screen.contains("PAUSED"));
        assert!(screen.contains("Resume"));
    }

    #[test]
    fn test_game_over_overlay_after_quit() {
        let mut game = started();
        game.handle_key(Key::Quit);
        let ranking = Ranking::insert(vec![500], 0);
        let screen = render(&game, Some(&ranking));
        assert!(screen.contains("GAME OVER"));
        assert!(screen.contains("HIGH SCORES"));
        assert!(screen.contains("Restart"));
    }
}
