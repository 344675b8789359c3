pub use self::{grid::*, piece::*, shape::*};

pub(crate) mod grid;
pub(crate) mod piece;
pub(crate) mod shape;

/// Number of rows in the playfield.
pub const ROWS: usize = 20;
/// Number of columns in the playfield.
pub const COLS: usize = 10;

// Signed copies for piece coordinates, which may be negative.
pub(crate) const GRID_ROWS: i32 = 20;
pub(crate) const GRID_COLS: i32 = 10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_dimensions_match() {
        assert_eq!(usize::try_from(GRID_ROWS), Ok(ROWS));
        assert_eq!(usize::try_from(GRID_COLS), Ok(COLS));
    }
}
