use crate::core::{COLS, GRID_ROWS, Grid, Piece, PieceColor, ROWS};

/// Per-cell colors of the locked stack, indexed `[row][col]`.
pub type CellColors = [[Option<PieceColor>; COLS]; ROWS];

/// Registry of everything that has landed.
///
/// Owns the [`Grid`] together with the record of every locked piece. The grid
/// answers occupancy questions; the records keep the color each piece was
/// drawn with. Both are written in the same call, so they cannot drift apart:
///
/// - [`LockedPieces::lock`] marks the piece cells in the grid and appends the
///   piece to the records,
/// - [`LockedPieces::clear_bottom_row_and_shift`] shifts the grid and moves
///   every record down one row.
///
/// Records whose cells have all left the bottom of the grid are dropped.
#[derive(Debug, Clone, Default)]
pub struct LockedPieces {
    grid: Grid,
    pieces: Vec<Piece>,
}

impl LockedPieces {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the locked records in lock order.
    #[must_use]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Materializes a landed piece.
    ///
    /// Cells still above the grid are not written to the grid, but the piece
    /// is recorded as a whole.
    pub fn lock(&mut self, piece: Piece) {
        self.grid.lock(piece.occupied_cells());
        self.pieces.push(piece);
    }

    /// Clears the bottom row if it is full.
    ///
    /// Returns `true` if a row was cleared.
    pub fn clear_full_bottom_row(&mut self) -> bool {
        if !self.grid.bottom_row_full() {
            return false;
        }
        self.clear_bottom_row_and_shift();
        true
    }

    /// Drops the bottom row and moves everything above it down by one row.
    pub fn clear_bottom_row_and_shift(&mut self) {
        self.grid.clear_bottom_row_and_shift();
        for piece in &mut self.pieces {
            piece.shift_down_unchecked();
        }
        self.pieces
            .retain(|piece| piece.occupied_cells().any(|pos| pos.row < GRID_ROWS));
    }

    /// Resolves the color of every occupied grid cell.
    ///
    /// Empty cells are `None`. When several records cover the same cell the
    /// most recently locked one wins.
    #[must_use]
    pub fn cell_colors(&self) -> CellColors {
        let mut colors = [[None; COLS]; ROWS];
        for piece in &self.pieces {
            for pos in piece.occupied_cells() {
                if !self.grid.cell(pos.row, pos.col).is_some_and(|c| c.is_occupied()) {
                    continue;
                }
                // `cell` returned `Some`, so both coordinates are in bounds
                let (Ok(row), Ok(col)) = (usize::try_from(pos.row), usize::try_from(pos.col))
                else {
                    continue;
                };
                colors[row][col] = Some(piece.color());
            }
        }
        colors
    }
}
