use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use termtris_engine::{PieceKind, TEMPLATE_SIZE};

use crate::view::widgets::CellDisplay;

type Preview = [[Option<PieceKind>; TEMPLATE_SIZE]; TEMPLATE_SIZE];

/// Next-piece preview: the 4×4 template in spawn orientation.
#[derive(Debug)]
pub struct PieceDisplay<'a> {
    preview: Preview,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new(preview: Preview) -> Self {
        Self {
            preview,
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
        TEMPLATE_SIZE as u16 * CellDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        TEMPLATE_SIZE as u16 * CellDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints = (0..TEMPLATE_SIZE).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints = (0..TEMPLATE_SIZE).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints).flex(Flex::Center);

        let grid_cells = area
            .layout::<TEMPLATE_SIZE>(&vertical)
            .into_iter()
            .map(|row| row.layout::<TEMPLATE_SIZE>(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, self.preview) {
            for (grid_cell, kind) in iter::zip(grid_row, row) {
                if let Some(kind) = kind {
                    CellDisplay::from_kind(kind).render(grid_cell, buf);
                }
            }
        }
    }
}
