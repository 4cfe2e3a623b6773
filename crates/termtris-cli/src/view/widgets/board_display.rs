use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};
use termtris_engine::Playfield;

use crate::view::widgets::CellDisplay;

/// The whole 15×20 grid, walls and ceiling included.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    playfield: &'a Playfield,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(playfield: &'a Playfield) -> Self {
        Self {
            playfield,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        Playfield::WIDTH as u16 * CellDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        Playfield::HEIGHT as u16 * CellDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints =
            (0..Playfield::WIDTH).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints =
            (0..Playfield::HEIGHT).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<{ Playfield::HEIGHT }>(&vertical)
            .into_iter()
            .map(|row| row.layout::<{ Playfield::WIDTH }>(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, self.playfield.rows()) {
            for (grid_cell, cell) in iter::zip(grid_row, row) {
                CellDisplay::from_cell(*cell).render(grid_cell, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    #[test]
    fn test_board_size() {
        let playfield = Playfield::INITIAL;
        let display = BoardDisplay::new(&playfield).block(BlockWidget::bordered());
        assert_eq!(display.width(), 32);
        assert_eq!(display.height(), 22);
    }

    #[test]
    fn test_renders_ghost_symbol() {
        let mut playfield = Playfield::INITIAL;
        playfield.set_cell(1, 1, termtris_engine::Cell::Ghost);
        let mut terminal = Terminal::new(TestBackend::new(30, 20)).unwrap();
        terminal
            .draw(|frame| frame.render_widget(BoardDisplay::new(&playfield), frame.area()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(2, 1)].symbol(), "[");
        assert_eq!(buffer[(3, 1)].symbol(), "]");
    }
}
