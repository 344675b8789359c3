use blockfall_engine::PieceColor;
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use crate::ui::widgets::style;

/// One grid cell, two terminal columns wide.
#[derive(Debug)]
pub struct CellDisplay {
    style: Style,
    symbol: &'static str,
}

impl CellDisplay {
    const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub fn width() -> u16 {
        2
    }

    pub fn height() -> u16 {
        1
    }

    /// An empty cell, optionally marked with a dot.
    pub fn empty(show_dots: bool) -> Self {
        if show_dots {
            Self::new(style::EMPTY_DOT, ".")
        } else {
            Self::new(style::EMPTY, "")
        }
    }

    pub fn piece(color: PieceColor) -> Self {
        Self::new(style::piece(color), "")
    }

    pub fn from_cell(color: Option<PieceColor>, show_dots: bool) -> Self {
        color.map_or_else(|| Self::empty(show_dots), Self::piece)
    }
}

impl Widget for CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        // A Paragraph fills the whole area, not just the cells under the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use ratatui::style::Color;

    use super::*;

    #[test]
    fn test_piece_cell_fills_area_with_color() {
        let color = PieceColor::from_index(2).unwrap();
        let mut buf = Buffer::empty(Rect::new(0, 0, 2, 1));
        CellDisplay::piece(color).render(buf.area, &mut buf);

        assert_eq!(buf[(0, 0)].bg, Color::Rgb(0, 0, 255));
        assert_eq!(buf[(1, 0)].bg, Color::Rgb(0, 0, 255));
    }

    #[test]
    fn test_empty_cell_dot() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 2, 1));
        CellDisplay::from_cell(None, true).render(buf.area, &mut buf);
        assert_eq!(super::super::buffer_lines(&buf).concat().trim(), ".");

        let mut buf = Buffer::empty(Rect::new(0, 0, 2, 1));
        CellDisplay::from_cell(None, false).render(buf.area, &mut buf);
        assert_eq!(super::super::buffer_lines(&buf).concat().trim(), "");
    }
}
