use std::time::Duration;

/// Session statistics: score, high score and counters for the HUD.
///
/// The score grows by one for every locked piece; cleared rows do not score.
/// The high score starts at the value loaded at startup and is raised to the
/// score whenever the score overtakes it.
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new(2);
/// stats.complete_piece_lock();
/// stats.update_high_score();
/// assert_eq!((stats.score(), stats.high_score()), (1, 2));
///
/// stats.complete_piece_lock();
/// stats.complete_piece_lock();
/// stats.update_high_score();
/// assert_eq!((stats.score(), stats.high_score()), (3, 3));
/// ```
#[derive(Debug, Clone, Default)]
pub struct GameStats {
    score: usize,
    high_score: usize,
    cleared_lines: usize,
    play_ticks: u64,
}

impl GameStats {
    /// Creates statistics with a zero score and the given starting high score.
    #[must_use]
    pub const fn new(high_score: usize) -> Self {
        Self {
            score: 0,
            high_score,
            cleared_lines: 0,
            play_ticks: 0,
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn high_score(&self) -> usize {
        self.high_score
    }

    /// Returns the number of bottom rows cleared so far.
    #[must_use]
    pub const fn cleared_lines(&self) -> usize {
        self.cleared_lines
    }

    /// Returns the number of ticks spent in the play state.
    #[must_use]
    pub const fn play_ticks(&self) -> u64 {
        self.play_ticks
    }

    /// Returns the elapsed play time for the given tick interval.
    #[must_use]
    pub fn play_time(&self, tick_interval: Duration) -> Duration {
        let ticks = u32::try_from(self.play_ticks).unwrap_or(u32::MAX);
        tick_interval.saturating_mul(ticks)
    }

    pub const fn complete_piece_lock(&mut self) {
        self.score += 1;
    }

    pub const fn complete_line_clear(&mut self) {
        self.cleared_lines += 1;
    }

    pub const fn increment_play_tick(&mut self) {
        self.play_ticks += 1;
    }

    pub fn update_high_score(&mut self) {
        self.high_score = self.high_score.max(self.score);
    }
}

/// Parses a persisted high score.
///
/// The text is trimmed; anything other than a non-empty run of ASCII digits
/// that fits in `usize` yields 0.
///
/// ```
/// use blockfall_engine::parse_high_score;
///
/// assert_eq!(parse_high_score("42\n"), 42);
/// assert_eq!(parse_high_score("-3"), 0);
/// assert_eq!(parse_high_score(""), 0);
/// ```
#[must_use]
pub fn parse_high_score(text: &str) -> usize {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }
    text.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats() {
        let stats = GameStats::new(17);
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.high_score(), 17);
        assert_eq!(stats.cleared_lines(), 0);
        assert_eq!(stats.play_ticks(), 0);
    }

    #[test]
    fn test_high_score_never_decreases() {
        let mut stats = GameStats::new(5);
        for _ in 0..3 {
            stats.complete_piece_lock();
            stats.update_high_score();
            assert_eq!(stats.high_score(), 5);
        }
        for expected in [5, 7, 9] {
            stats.complete_piece_lock();
            stats.complete_piece_lock();
            stats.update_high_score();
            assert_eq!(stats.score(), expected);
            assert_eq!(stats.high_score(), expected);
        }
    }

    #[test]
    fn test_line_clears_do_not_score() {
        let mut stats = GameStats::new(0);
        stats.complete_line_clear();
        stats.complete_line_clear();
        assert_eq!(stats.cleared_lines(), 2);
        assert_eq!(stats.score(), 0);
    }

    #[test]
    fn test_play_time() {
        let mut stats = GameStats::new(0);
        for _ in 0..7 {
            stats.increment_play_tick();
        }
        assert_eq!(
            stats.play_time(Duration::from_millis(250)),
            Duration::from_millis(1750)
        );
    }

    #[test]
    fn test_parse_high_score() {
        assert_eq!(parse_high_score("0"), 0);
        assert_eq!(parse_high_score("123"), 123);
        assert_eq!(parse_high_score("  99 \r\n"), 99);
        assert_eq!(parse_high_score("007"), 7);
    }

    #[test]
    fn test_parse_invalid_high_score_is_zero() {
        assert_eq!(parse_high_score(""), 0);
        assert_eq!(parse_high_score("   "), 0);
        assert_eq!(parse_high_score("abc"), 0);
        assert_eq!(parse_high_score("12a"), 0);
        assert_eq!(parse_high_score("+12"), 0);
        assert_eq!(parse_high_score("1 2"), 0);
        assert_eq!(parse_high_score("3.5"), 0);
        assert_eq!(parse_high_score("99999999999999999999999999"), 0);
    }
}
