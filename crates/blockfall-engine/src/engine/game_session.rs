use crate::core::{Grid, Piece};

use super::{GameStats, LockedPieces, PieceSeed, SpawnQueue};

/// Top-level state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameState {
    /// Waiting for the player to confirm. Nothing moves.
    Start,
    /// Gravity and input are active.
    Play,
    /// Terminal. The session only counts down the grace delay.
    GameOver,
}

/// Engine-side session tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Number of ticks to stay in [`GameState::GameOver`] before the session
    /// reports itself finished.
    pub game_over_grace_ticks: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::from_tick_rate(Self::DEFAULT_TICK_RATE, Self::DEFAULT_GAME_OVER_DELAY)
    }
}

impl SessionConfig {
    /// Default tick rate in ticks per second.
    pub const DEFAULT_TICK_RATE: f64 = 3.0;
    /// Default game-over grace delay in seconds.
    pub const DEFAULT_GAME_OVER_DELAY: f64 = 2.5;

    /// Converts a grace delay in seconds into whole ticks, rounding up.
    ///
    /// Non-finite or negative products yield zero ticks.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_tick_rate(tick_rate: f64, game_over_delay_secs: f64) -> Self {
        let ticks = (tick_rate * game_over_delay_secs).ceil();
        let game_over_grace_ticks = if ticks.is_finite() && ticks > 0.0 {
            ticks as u32
        } else {
            0
        };
        Self {
            game_over_grace_ticks,
        }
    }
}

/// A single play-through: Start, then Play, then GameOver.
///
/// The session exclusively owns the locked pieces (and through them the grid),
/// the spawn queue and the statistics. The front end drives it with
/// [`GameSession::tick`] at a fixed rate and forwards player input through
/// [`GameSession::confirm`] and the `move_*` methods.
///
/// Each tick in [`GameState::Play`] runs, in order:
///
/// 1. If row 0 has an occupied cell, switch to [`GameState::GameOver`] and stop.
/// 2. If the bottom row is full, clear it and shift everything down one row.
/// 3. Move the active piece down one row. If it cannot move, lock it, advance
///    the spawn queue and add one to the score.
/// 4. Raise the high score to the score if the score is higher.
///
/// A row completed by a lock is therefore cleared on the following tick.
///
/// # Example
///
/// ```
/// use blockfall_engine::{GameSession, GameState, SessionConfig};
///
/// let mut session = GameSession::new(0, SessionConfig::default());
/// assert!(session.state().is_start());
///
/// session.tick(); // nothing happens before confirm
/// assert!(session.active_piece().is_none());
///
/// session.confirm();
/// assert_eq!(session.state(), GameState::Play);
/// session.tick();
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    state: GameState,
    config: SessionConfig,
    locked: LockedPieces,
    queue: SpawnQueue,
    stats: GameStats,
    grace_ticks: u32,
}

impl GameSession {
    /// Creates a session in [`GameState::Start`] with a random piece seed.
    #[must_use]
    pub fn new(initial_high_score: usize, config: SessionConfig) -> Self {
        Self::with_queue(initial_high_score, config, SpawnQueue::new())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic pieces.
    #[must_use]
    pub fn with_seed(initial_high_score: usize, config: SessionConfig, seed: PieceSeed) -> Self {
        Self::with_queue(initial_high_score, config, SpawnQueue::with_seed(seed))
    }

    fn with_queue(initial_high_score: usize, config: SessionConfig, queue: SpawnQueue) -> Self {
        Self {
            state: GameState::Start,
            config,
            locked: LockedPieces::new(),
            queue,
            stats: GameStats::new(initial_high_score),
            grace_ticks: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        self.locked.grid()
    }

    #[must_use]
    pub fn locked(&self) -> &LockedPieces {
        &self.locked
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.queue.seed()
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn high_score(&self) -> usize {
        self.stats.high_score()
    }

    /// Returns the active piece, or `None` before the game has started.
    #[must_use]
    pub fn active_piece(&self) -> Option<&Piece> {
        (!self.state.is_start()).then(|| self.queue.peek_active())
    }

    /// Returns the piece shown in the preview box.
    ///
    /// On the start screen this is the piece that will become active on
    /// confirm; afterwards it is the one following the active piece.
    #[must_use]
    pub fn preview_piece(&self) -> &Piece {
        if self.state.is_start() {
            self.queue.peek_active()
        } else {
            self.queue.peek_preview()
        }
    }

    /// Returns `true` once the game-over grace delay has elapsed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state.is_game_over() && self.grace_ticks >= self.config.game_over_grace_ticks
    }

    /// Returns the high score to persist when the session ends.
    #[must_use]
    pub fn final_high_score(&self) -> usize {
        self.stats.high_score().max(self.stats.score())
    }

    /// Starts the game. Returns `false` if it was not on the start screen.
    pub fn confirm(&mut self) -> bool {
        if !self.state.is_start() {
            return false;
        }
        self.state = GameState::Play;
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.state.is_play() && self.queue.active_mut().try_move_left(self.locked.grid())
    }

    pub fn move_right(&mut self) -> bool {
        self.state.is_play() && self.queue.active_mut().try_move_right(self.locked.grid())
    }

    /// Moves the active piece down one row.
    ///
    /// Unlike gravity, a refused manual move never locks the piece.
    pub fn move_down(&mut self) -> bool {
        self.state.is_play() && self.queue.active_mut().try_move_down(self.locked.grid())
    }

    /// Advances the session by one tick.
    pub fn tick(&mut self) {
        match self.state {
            GameState::Start => {}
            GameState::Play => self.play_tick(),
            GameState::GameOver => self.grace_ticks = self.grace_ticks.saturating_add(1),
        }
    }

    fn play_tick(&mut self) {
        if self.locked.grid().top_row_has_occupied() {
            self.state = GameState::GameOver;
            return;
        }
        self.stats.increment_play_tick();

        if self.locked.clear_full_bottom_row() {
            self.stats.complete_line_clear();
        }

        if !self.queue.active_mut().try_move_down(self.locked.grid()) {
            let landed = self.queue.advance();
            self.locked.lock(landed);
            self.stats.complete_piece_lock();
        }

        self.stats.update_high_score();
    }
}
