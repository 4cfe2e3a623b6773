use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Paragraph, Widget},
};
use termtris_engine::{GameStats, MAX_HIGH_SCORES, Ranking};

use crate::view::widgets::style;

/// Final results and the high-score table, shown once the sweep has finished.
#[derive(Debug)]
pub struct GameOverDisplay<'a> {
    stats: &'a GameStats,
    ranking: Option<&'a Ranking>,
}

impl<'a> GameOverDisplay<'a> {
    pub fn new(stats: &'a GameStats, ranking: Option<&'a Ranking>) -> Self {
        Self { stats, ranking }
    }

    pub fn width(&self) -> u16 {
        30
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        self.lines().len() as u16 + 2
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::styled("GAME OVER", style::GAME_OVER).centered(),
            Line::default(),
            Line::from(format!("Score: {:>10}", self.stats.score())),
            Line::from(format!("Level: {:>10}", self.stats.level())),
            Line::from(format!("Lines: {:>10}", self.stats.total_cleared_lines())),
            Line::default(),
        ];
        let Some(ranking) = self.ranking else {
            return lines;
        };

        if ranking.is_ranked() {
            let rank = ranking.rank();
            lines.push(
                Line::styled(format!("You placed {rank}{}!", ordinal_suffix(rank)), style::HIGHLIGHT)
                    .centered(),
            );
        } else {
            lines.push(Line::from(format!("Not in the top {MAX_HIGH_SCORES}")).centered());
        }
        lines.push(Line::default());
        lines.push(Line::styled("HIGH SCORES", style::TITLE).centered());
        for (i, score) in ranking.scores().iter().enumerate() {
            if ranking.is_current(i) {
                lines.push(Line::styled(
                    format!("{:>2}. {score:>10} NEW!", i + 1),
                    style::HIGHLIGHT,
                ));
            } else {
                lines.push(Line::from(format!("{:>2}. {score:>10}", i + 1)));
            }
        }
        lines
    }
}

/// English ordinal suffix for a rank: 1st, 2nd, 3rd, then "th".
pub fn ordinal_suffix(rank: usize) -> &'static str {
    match rank {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

impl Widget for GameOverDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .border_style(style::GAME_OVER)
            .style(style::DEFAULT)
            .padding(Padding::horizontal(1));
        Clear.render(area, buf);
        Paragraph::new(Text::from(self.lines()))
            .block(block)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(lines: &[Line]) -> Vec<String> {
        lines.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_ordinal_suffix() {
        assert_eq!(ordinal_suffix(1), "st");
        assert_eq!(ordinal_suffix(2), "nd");
        assert_eq!(ordinal_suffix(3), "rd");
        assert_eq!(ordinal_suffix(4), "th");
        assert_eq!(ordinal_suffix(10), "th");
    }

    #[test]
    fn test_marks_new_entry() {
        let mut stats = GameStats::new();
        stats.record_lock(2);
        let ranking = Ranking::insert(vec![1000, 100], 300);
        let display = GameOverDisplay::new(&stats, Some(&ranking));
        let lines = text(&display.lines());

        assert!(lines.contains(&"You placed 2nd!".to_owned()));
        assert!(lines.contains(&" 2.        300 NEW!".to_owned()));
        assert!(lines.contains(&" 1.       1000".to_owned()));
        assert_eq!(lines.iter().filter(|line| line.ends_with("NEW!")).count(), 1);
    }

    #[test]
    fn test_unranked_score() {
        let stats = GameStats::new();
        let previous: Vec<usize> = (1..=10).map(|n| n * 100).collect();
        let ranking = Ranking::insert(previous, 0);
        let display = GameOverDisplay::new(&stats, Some(&ranking));
        let lines = text(&display.lines());
        assert!(lines.contains(&"Not in the top 10".to_owned()));
        assert!(!lines.iter().any(|line| line.ends_with("NEW!")));
    }
}
