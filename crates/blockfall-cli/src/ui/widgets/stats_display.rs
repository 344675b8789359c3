use std::{iter, time::Duration};

use blockfall_engine::GameStats;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::style;

/// Score panel: high score, score, lines and play time.
pub struct StatsDisplay<'a> {
    stats: &'a GameStats,
    tick_interval: Duration,
    block: Option<BlockWidget<'a>>,
}

impl<'a> StatsDisplay<'a> {
    pub fn new(stats: &'a GameStats, tick_interval: Duration) -> Self {
        Self {
            stats,
            tick_interval,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        16 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        u16::try_from(ROWS.len()).unwrap() + super::block_vertical_margin(self.block.as_ref())
    }
}

type ValueFn = dyn Fn(&GameStats, Duration) -> String;

#[derive(Clone, Copy)]
enum Row {
    Empty,
    FullLabel(&'static str),
    FullValue(&'static ValueFn),
    LabelValue(&'static str, &'static ValueFn),
}

const ROWS: &[Row] = &[
    Row::FullLabel("HIGH SCORE:"),
    Row::FullValue(&|stats, _| stats.high_score().to_string()),
    Row::Empty,
    Row::FullLabel("SCORE:"),
    Row::FullValue(&|stats, _| stats.score().to_string()),
    Row::Empty,
    Row::LabelValue("LINES:", &|stats, _| stats.cleared_lines().to_string()),
    Row::LabelValue("TIME:", &|stats, tick_interval| {
        let dur = stats.play_time(tick_interval);
        format!("{}:{:0>2}", dur.as_secs() / 60, dur.as_secs() % 60)
    }),
];

impl Widget for StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;

        let rows_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(ROWS.iter().copied(), rows_areas.iter().copied()) {
            match row {
                Row::Empty => {}
                Row::FullLabel(label) => {
                    Line::styled(label, style).left_aligned().render(area, buf);
                }
                Row::FullValue(value) => {
                    Line::styled(value(self.stats, self.tick_interval), style)
                        .right_aligned()
                        .render(area, buf);
                }
                Row::LabelValue(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(1),
                        Constraint::Fill(1),
                    ]));
                    Line::styled(label, style)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value(self.stats, self.tick_interval), style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_values() {
        let mut stats = GameStats::new(42);
        for _ in 0..3 {
            stats.complete_piece_lock();
        }
        stats.complete_line_clear();
        for _ in 0..200 {
            stats.increment_play_tick();
        }

        let display = StatsDisplay::new(&stats, Duration::from_millis(400));
        let area = Rect::new(0, 0, display.width(), display.height());
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);

        let lines = super::super::buffer_lines(&buf);
        assert_eq!(lines[0].trim(), "HIGH SCORE:");
        assert_eq!(lines[1].trim(), "42");
        assert_eq!(lines[4].trim(), "3");
        assert!(lines[6].starts_with("LINES:"));
        assert!(lines[6].ends_with('1'));
        // 200 ticks of 0.4 s
        assert!(lines[7].ends_with("1:20"));
    }
}
