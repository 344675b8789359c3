use std::{fmt, str::FromStr};

use arrayvec::ArrayVec;
use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    ParseSeedError,
    core::{CellPos, GRID_COLS, Piece},
};

/// Anchor row of newly generated pieces, above the visible grid.
pub const SPAWN_ROW: i32 = -3;

/// Seed for deterministic piece generation.
///
/// A 128-bit (16-byte) seed for the spawn queue's random number generator.
/// The same seed always produces the same sequence of shapes, columns and
/// colors. It is written as a 32-character hex string, both in serialized
/// form and on the command line.
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceSeed, SpawnQueue};
///
/// let seed: PieceSeed = "0123456789abcdeffedcba9876543210".parse().unwrap();
/// let q1 = SpawnQueue::with_seed(seed);
/// let q2 = SpawnQueue::with_seed(seed);
/// assert_eq!(q1.pieces(), q2.pieces());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseSeedError::InvalidLength(s.len()));
        }
        // from_str_radix accepts a leading '+', which is not a hex digit
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseSeedError::InvalidDigit(s.to_owned()));
        }
        let num =
            u128::from_str_radix(s, 16).map_err(|_| ParseSeedError::InvalidDigit(s.to_owned()))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

/// Lookahead buffer of upcoming pieces.
///
/// The queue always holds exactly [`SpawnQueue::LEN`] pieces:
///
/// - index 0 is the active piece, the only one the player controls,
/// - index 1 is the preview shown to the player,
/// - index 2 is generated ahead of time.
///
/// [`SpawnQueue::advance`] drops the active piece and appends a freshly
/// generated one in the same call, so the length never changes between calls.
///
/// Every new piece gets a uniformly random catalog shape, a uniformly random
/// anchor column in `[0, COLS)` (corrected by [`Piece::new`] so the piece fits)
/// and a random color. Its anchor row is [`SPAWN_ROW`].
#[derive(Debug, Clone)]
pub struct SpawnQueue {
    seed: PieceSeed,
    rng: Pcg32,
    pieces: ArrayVec<Piece, { SpawnQueue::LEN }>,
}

impl Default for SpawnQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl SpawnQueue {
    pub const LEN: usize = 3;

    /// Creates a queue with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic generation.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        let mut this = Self {
            seed,
            rng: Pcg32::from_seed(seed.0),
            pieces: ArrayVec::new(),
        };
        while !this.pieces.is_full() {
            let piece = this.generate();
            this.pieces.push(piece);
        }
        this
    }

    fn generate(&mut self) -> Piece {
        let col = self.rng.random_range(0..GRID_COLS);
        let shape = self.rng.random();
        let color = self.rng.random();
        Piece::new(CellPos::new(SPAWN_ROW, col), shape, color)
    }

    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.seed
    }

    /// Returns the active piece (index 0).
    #[must_use]
    pub fn peek_active(&self) -> &Piece {
        &self.pieces[0]
    }

    /// Returns the active piece for movement.
    pub fn active_mut(&mut self) -> &mut Piece {
        &mut self.pieces[0]
    }

    /// Returns the on-deck piece (index 1).
    #[must_use]
    pub fn peek_preview(&self) -> &Piece {
        &self.pieces[1]
    }

    /// Returns all queued pieces, active first.
    #[must_use]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Removes the active piece and appends a new one.
    ///
    /// Returns the removed piece. Call exactly once per lock.
    pub fn advance(&mut self) -> Piece {
        let removed = self.pieces.remove(0);
        let piece = self.generate();
        self.pieces.push(piece);
        removed
    }
}
