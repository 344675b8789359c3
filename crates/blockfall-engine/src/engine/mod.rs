//! Game rules built on top of the core data structures.
//!
//! - [`SpawnQueue`] - Seeded lookahead buffer of the next three pieces
//! - [`PieceSeed`] - Seed for deterministic piece generation
//! - [`LockedPieces`] - The grid plus the record of every landed piece
//! - [`GameStats`] - Score, high score and HUD counters
//! - [`GameSession`] - The Start / Play / `GameOver` state machine
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`] with the persisted high score
//! 2. Show the start screen until the player confirms
//! 3. Call [`GameSession::tick`] at a fixed rate; each tick applies gravity,
//!    locks landed pieces and clears a full bottom row
//! 4. Forward player moves to the session between ticks
//! 5. Once a locked cell reaches row 0 the session enters `GameOver`; persist
//!    [`GameSession::final_high_score`] when [`GameSession::is_finished`]
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{GameSession, SessionConfig};
//!
//! let mut session = GameSession::new(0, SessionConfig::default());
//! session.confirm();
//!
//! let mut ticks = 0;
//! while !session.is_finished() {
//!     session.move_left();
//!     session.tick();
//!     ticks += 1;
//!     assert!(ticks < 100_000);
//! }
//! assert!(session.final_high_score() >= session.score());
//! ```

pub use self::{game_session::*, game_stats::*, locked_pieces::*, spawn_queue::*};

mod game_session;
mod game_stats;
mod locked_pieces;
mod spawn_queue;
