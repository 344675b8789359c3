use std::iter;

use blockfall_engine::{COLS, CellColors, Piece, ROWS};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::ui::widgets::CellDisplay;

#[expect(clippy::cast_possible_truncation)]
const WIDTH_CELLS: u16 = COLS as u16;
#[expect(clippy::cast_possible_truncation)]
const HEIGHT_CELLS: u16 = ROWS as u16;

/// The playfield: locked cells plus the active piece on top.
#[derive(Debug)]
pub struct GridDisplay<'a> {
    colors: CellColors,
    active_piece: Option<Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> GridDisplay<'a> {
    pub fn new(colors: CellColors) -> Self {
        Self {
            colors,
            active_piece: None,
            block: None,
        }
    }

    pub fn active_piece(self, piece: Piece) -> Self {
        Self {
            active_piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        WIDTH_CELLS * CellDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        HEIGHT_CELLS * CellDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for GridDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &GridDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let mut colors = self.colors;
        if let Some(piece) = self.active_piece {
            // cells above the grid are not drawn
            for pos in piece.occupied_cells() {
                if let (Ok(row), Ok(col)) = (usize::try_from(pos.row), usize::try_from(pos.col))
                    && row < ROWS
                    && col < COLS
                {
                    colors[row][col] = Some(piece.color());
                }
            }
        }

        let col_constraints = (0..COLS).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints = (0..ROWS).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<ROWS>(&vertical)
            .into_iter()
            .map(|row| row.layout::<COLS>(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, colors) {
            for (grid_cell, color) in iter::zip(grid_row, row) {
                CellDisplay::from_cell(color, true).render(grid_cell, buf);
            }
        }
    }
}
