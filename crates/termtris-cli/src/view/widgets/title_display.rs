use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    text::{Line, Text},
    widgets::{Block, Padding, Paragraph, Widget},
};

use crate::view::widgets::{KeyBindingDisplay, PLAYING_KEYS, style};

/// Start screen shown before the first run.
#[derive(Debug, Default)]
pub struct TitleDisplay;

impl TitleDisplay {
    pub fn new() -> Self {
        Self
    }
}

impl Widget for TitleDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Text::from(vec![
            Line::styled("T E R M T R I S", style::TITLE).centered(),
            Line::default(),
            Line::styled("Press any key to start", style::DEFAULT).centered(),
            Line::styled("(Q to quit)", style::DEFAULT).centered(),
        ]);
        let block = Block::bordered()
            .style(style::DEFAULT)
            .padding(Padding::uniform(1));

        let [panel_area, help_area] =
            Layout::vertical([Constraint::Length(8), Constraint::Length(1)])
                .flex(Flex::Center)
                .spacing(1)
                .areas(area);
        let panel_area = panel_area.centered_horizontally(Constraint::Length(40));

        Paragraph::new(text).block(block).render(panel_area, buf);
        KeyBindingDisplay::new(PLAYING_KEYS).render(help_area, buf);
    }
}
