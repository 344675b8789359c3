use std::time::Duration;

use blockfall_engine::{GameSession, GameState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::ui::widgets::{GridDisplay, PreviewDisplay, StatsDisplay, color, style};

/// Full HUD: score panel, playfield and next-piece preview.
///
/// On the start screen the active piece is hidden and a prompt is shown over
/// the playfield; after game over a banner replaces it.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    tick_interval: Duration,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession, tick_interval: Duration) -> Self {
        Self {
            session,
            tick_interval,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }

    /// Height needed to draw the whole HUD.
    pub fn height() -> u16 {
        22
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let state = self.session.state();
        let block_padding = Padding::symmetric(self.horizontal_padding, self.vertical_padding);
        let border_style = match state {
            GameState::Start => color::YELLOW,
            GameState::Play => color::WHITE,
            GameState::GameOver => color::RED,
        };

        let grid = {
            let widget = GridDisplay::new(self.session.locked().cell_colors()).block(
                Block::bordered()
                    .title(Line::from("BLOCKFALL").centered())
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );
            match self.session.active_piece() {
                Some(piece) => widget.active_piece(*piece),
                None => widget,
            }
        };
        let preview = PreviewDisplay::new()
            .piece(*self.session.preview_piece())
            .block(
                Block::bordered()
                    .title(Line::from("NEXT BLOCK").centered())
                    .padding(block_padding)
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );
        let stats = StatsDisplay::new(self.session.stats(), self.tick_interval).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT),
        );

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(stats.width()),
            Constraint::Length(grid.width()),
            Constraint::Length(preview.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] = Layout::vertical([Constraint::Length(stats.height())]).areas(left_column);
        let [grid_area] = Layout::vertical([Constraint::Length(grid.height())]).areas(center_column);
        let [preview_area] =
            Layout::vertical([Constraint::Length(preview.height())]).areas(right_column);

        let grid_width = grid.width();
        stats.render(stats_area, buf);
        grid.render(grid_area, buf);
        preview.render(preview_area, buf);

        let popup = match state {
            GameState::Start => Some(("PRESS ENTER", style::START_POPUP)),
            GameState::Play => None,
            GameState::GameOver => Some(("GAME OVER!!", style::GAME_OVER_POPUP)),
        };

        if let Some((text, style)) = popup {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area = grid_area.centered(Constraint::Length(grid_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{PieceSeed, SessionConfig};

    use super::*;

    const SEED: &str = "00112233445566778899aabbccddeeff";

    fn session() -> GameSession {
        let seed: PieceSeed = SEED.parse().unwrap();
        GameSession::with_seed(7, SessionConfig::default(), seed)
    }

    fn render(session: &GameSession) -> Vec<String> {
        let area = Rect::new(0, 0, 80, SessionDisplay::height());
        let mut buf = Buffer::empty(area);
        SessionDisplay::new(session, Duration::from_millis(300)).render(area, &mut buf);
        super::super::buffer_lines(&buf)
    }

    fn contains(lines: &[String], text: &str) -> bool {
        lines.iter().any(|line| line.contains(text))
    }

    #[test]
    fn test_start_screen() {
        let lines = render(&session());
        assert!(contains(&lines, "PRESS ENTER"));
        assert!(contains(&lines, "BLOCKFALL"));
        assert!(contains(&lines, "NEXT BLOCK"));
        assert!(contains(&lines, "HIGH SCORE:"));
        assert!(!contains(&lines, "GAME OVER!!"));
    }

    #[test]
    fn test_play_screen_has_no_popup() {
        let mut session = session();
        session.confirm();
        session.tick();
        let lines = render(&session);
        assert!(!contains(&lines, "PRESS ENTER"));
        assert!(!contains(&lines, "GAME OVER!!"));
        assert!(contains(&lines, "SCORE:"));
    }

    #[test]
    fn test_game_over_banner() {
        let mut session = session();
        session.confirm();
        for _ in 0..10_000 {
            if session.state().is_game_over() {
                break;
            }
            session.move_left();
            session.tick();
        }
        assert!(session.state().is_game_over());

        let lines = render(&session);
        assert!(contains(&lines, "GAME OVER!!"));
    }
}
