use blockfall_engine::Piece;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::{CellDisplay, style};

/// Largest shape extent in cells (the vertical and horizontal I pieces).
const PREVIEW_CELLS: u16 = 4;

/// The upcoming piece, centered on its bounding box.
#[derive(Debug)]
pub struct PreviewDisplay<'a> {
    piece: Option<Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PreviewDisplay<'a> {
    pub fn new() -> Self {
        Self {
            piece: None,
            block: None,
        }
    }

    pub fn piece(self, piece: Piece) -> Self {
        Self {
            piece: Some(piece),
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
        PREVIEW_CELLS * CellDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        PREVIEW_CELLS * CellDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for PreviewDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PreviewDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        buf.set_style(area, style::EMPTY);

        let Some(piece) = self.piece else {
            return;
        };
        let shape = piece.shape();
        let (w, h) = shape.size();
        let piece_area = area.centered(
            Constraint::Length(w * CellDisplay::width()),
            Constraint::Length(h * CellDisplay::height()),
        );

        let col_constraints = (0..w).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints = (0..h).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);
        let grid_rows = piece_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        let occupied = CellDisplay::piece(piece.color());
        for (y, grid_row) in grid_rows.enumerate() {
            for (x, grid_cell) in grid_row.into_iter().enumerate() {
                if shape.is_occupied((x, y)) {
                    Widget::render(&occupied, grid_cell, buf);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{CellPos, PieceColor, PieceKind, Shape};
    use ratatui::style::Color;

    use super::*;

    fn render(piece: Piece) -> Buffer {
        let display = PreviewDisplay::new().piece(piece);
        let area = Rect::new(0, 0, display.width(), display.height());
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);
        buf
    }

    fn filled(buf: &Buffer, color: Color) -> Vec<(u16, u16)> {
        buf.area
            .positions()
            .filter(|pos| buf[*pos].bg == color)
            .map(|pos| (pos.x, pos.y))
            .collect()
    }

    #[test]
    fn test_horizontal_i_is_centered() {
        let red = PieceColor::from_index(0).unwrap();
        let piece = Piece::new(CellPos::new(-3, 0), Shape::new(PieceKind::I, 1), red);
        let buf = render(piece);

        // 4x1 shape in a 4x4 box: one full row, vertically centered
        let cells = filled(&buf, Color::Rgb(255, 0, 0));
        assert_eq!(cells.len(), 8);
        assert!(cells.iter().all(|(_, y)| *y == 1 || *y == 2));
        let rows: std::collections::HashSet<u16> = cells.iter().map(|(_, y)| *y).collect();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_o_piece_fills_center() {
        let yellow = PieceColor::from_index(3).unwrap();
        let piece = Piece::new(CellPos::new(-3, 0), Shape::new(PieceKind::O, 0), yellow);
        let buf = render(piece);

        let mut cells = filled(&buf, Color::Rgb(255, 255, 0));
        cells.sort_unstable();
        let expected: Vec<(u16, u16)> = (2..6)
            .flat_map(|x| (1..3).map(move |y| (x, y)))
            .collect();
        assert_eq!(cells, expected);
    }

    #[test]
    fn test_no_piece_renders_empty() {
        let display = PreviewDisplay::new().block(BlockWidget::bordered());
        assert_eq!((display.width(), display.height()), (10, 6));
        let area = Rect::new(0, 0, display.width(), display.height());
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);
        assert_eq!(buf[(1, 1)].bg, Color::Rgb(0, 0, 0));
    }
}
