use super::{COLS, ROWS, piece::CellPos};

/// Occupancy state of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum CellState {
    #[default]
    Empty,
    Occupied,
}

/// A single row of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridRow {
    cells: [CellState; COLS],
}

impl GridRow {
    pub const EMPTY: Self = Self {
        cells: [CellState::Empty; COLS],
    };

    /// Returns `true` if every cell in the row is occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_occupied())
    }

    /// Returns `true` if at least one cell in the row is occupied.
    #[must_use]
    pub fn has_occupied(&self) -> bool {
        self.cells.iter().any(|c| c.is_occupied())
    }
}

/// Authoritative occupancy state of the playfield.
///
/// The grid is a fixed `ROWS × COLS` matrix. Row 0 is the top of the
/// playfield, column 0 is the leftmost column.
///
/// The grid is only mutated in two ways: locking the cells of a landed piece
/// with [`Grid::lock`], and dropping the bottom row with
/// [`Grid::clear_bottom_row_and_shift`]. Only the bottom row is ever checked
/// for completion; a full row anywhere else stays in place until it reaches the
/// bottom.
///
/// # Example
///
/// ```
/// use blockfall_engine::{CellPos, Grid};
///
/// let mut grid = Grid::EMPTY;
/// grid.lock([CellPos::new(19, 0), CellPos::new(19, 1)]);
/// assert!(grid.is_occupied(19, 0));
/// assert!(!grid.bottom_row_full());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: [GridRow; ROWS],
}

impl Default for Grid {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Grid {
    pub const EMPTY: Self = Self {
        rows: [GridRow::EMPTY; ROWS],
    };

    fn index(row: i32, col: i32) -> Option<(usize, usize)> {
        let row = usize::try_from(row).ok().filter(|r| *r < ROWS)?;
        let col = usize::try_from(col).ok().filter(|c| *c < COLS)?;
        Some((row, col))
    }

    /// Returns the state of the cell, or `None` if it lies outside the grid.
    #[must_use]
    pub fn cell(&self, row: i32, col: i32) -> Option<CellState> {
        Self::index(row, col).map(|(r, c)| self.rows[r].cells[c])
    }

    /// Checks whether the cell blocks a piece.
    ///
    /// Cells outside the grid are reported as occupied. Pieces may legitimately
    /// have cells above row 0, so movement code must handle `row < 0` before
    /// asking the grid.
    #[must_use]
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        self.cell(row, col).is_none_or(|c| c.is_occupied())
    }

    /// Marks the given cells as occupied.
    ///
    /// Cells above the visible grid (`row < 0`) are skipped. Every other cell
    /// must lie inside the grid.
    ///
    /// # Panics
    ///
    /// Panics if a cell lies below, left of, or right of the grid.
    pub fn lock<I>(&mut self, cells: I)
    where
        I: IntoIterator<Item = CellPos>,
    {
        for pos in cells {
            if pos.row < 0 {
                continue;
            }
            let (r, c) = Self::index(pos.row, pos.col)
                .unwrap_or_else(|| panic!("locked cell out of grid: {pos:?}"));
            self.rows[r].cells[c] = CellState::Occupied;
        }
    }

    #[must_use]
    pub fn bottom_row_full(&self) -> bool {
        self.rows[ROWS - 1].is_full()
    }

    /// Drops the bottom row and inserts an empty row at the top.
    ///
    /// Every remaining row moves down by one index.
    pub fn clear_bottom_row_and_shift(&mut self) {
        self.rows.copy_within(0..ROWS - 1, 1);
        self.rows[0] = GridRow::EMPTY;
    }

    /// Returns `true` if any cell of row 0 is occupied.
    #[must_use]
    pub fn top_row_has_occupied(&self) -> bool {
        self.rows[0].has_occupied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &GridRow> {
        self.rows.iter()
    }

    /// Creates a grid from ASCII art for testing.
    ///
    /// `#` is an occupied cell and `.` an empty one. Rows are listed from the
    /// top; when fewer than 20 rows are given they fill the bottom of the grid.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let mut grid = Self::EMPTY;
        let lines: Vec<&str> = art.lines().filter(|line| !line.trim().is_empty()).collect();
        assert!(lines.len() <= ROWS, "at most {ROWS} rows, got {}", lines.len());

        let top = ROWS - lines.len();
        for (y, line) in lines.iter().enumerate() {
            let chars: Vec<char> = line.chars().filter(|c| *c == '#' || *c == '.').collect();
            assert_eq!(
                chars.len(),
                COLS,
                "Each row must have exactly {COLS} cells, got {} at row {y}",
                chars.len(),
            );
            for (x, &ch) in chars.iter().enumerate() {
                if ch == '#' {
                    grid.rows[top + y].cells[x] = CellState::Occupied;
                }
            }
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_grid() {
        let grid = Grid::EMPTY;
        for row in 0..20 {
            for col in 0..10 {
                assert_eq!(grid.cell(row, col), Some(CellState::Empty));
                assert!(!grid.is_occupied(row, col));
            }
        }
        assert!(!grid.bottom_row_full());
        assert!(!grid.top_row_has_occupied());
    }

    #[test]
    fn test_out_of_bounds_is_blocking() {
        let grid = Grid::EMPTY;
        assert!(grid.is_occupied(-1, 0));
        assert!(grid.is_occupied(20, 0));
        assert!(grid.is_occupied(0, -1));
        assert!(grid.is_occupied(0, 10));
        assert_eq!(grid.cell(0, 10), None);
    }

    #[test]
    fn test_lock_sets_cells() {
        let mut grid = Grid::EMPTY;
        grid.lock([CellPos::new(5, 3), CellPos::new(19, 9)]);
        assert!(grid.is_occupied(5, 3));
        assert!(grid.is_occupied(19, 9));
        assert!(!grid.is_occupied(5, 4));
    }

    #[test]
    fn test_lock_skips_cells_above_grid() {
        let mut grid = Grid::EMPTY;
        grid.lock([CellPos::new(-1, 3), CellPos::new(0, 3)]);
        assert!(grid.is_occupied(0, 3));
        assert_eq!(grid.rows().filter(|r| r.has_occupied()).count(), 1);
    }

    #[test]
    #[should_panic(expected = "locked cell out of grid")]
    fn test_lock_below_grid_panics() {
        let mut grid = Grid::EMPTY;
        grid.lock([CellPos::new(20, 0)]);
    }

    #[test]
    fn test_bottom_row_full() {
        let grid = Grid::from_ascii(
            "
            .........#
            ##########
            ",
        );
        assert!(grid.bottom_row_full());

        let grid = Grid::from_ascii("#########.");
        assert!(!grid.bottom_row_full());
    }

    #[test]
    fn test_clear_bottom_row_shifts_rows_down() {
        let mut grid = Grid::from_ascii(
            "
            #.........
            .#........
            ##########
            ",
        );
        let before: Vec<GridRow> = grid.rows().copied().collect();

        grid.clear_bottom_row_and_shift();

        assert_eq!(grid.rows[0], GridRow::EMPTY);
        for y in 0..ROWS - 1 {
            assert_eq!(grid.rows[y + 1], before[y], "row {y} should move to {}", y + 1);
        }
        assert!(grid.is_occupied(19, 1));
        assert!(grid.is_occupied(18, 0));
        assert!(!grid.bottom_row_full());
    }

    #[test]
    fn test_only_bottom_row_is_considered() {
        // A full row above the bottom is left alone.
        let grid = Grid::from_ascii(
            "
            ##########
            #.........
            ",
        );
        assert!(grid.rows[ROWS - 2].is_full());
        assert!(!grid.bottom_row_full());
    }

    #[test]
    fn test_top_row_has_occupied() {
        let mut grid = Grid::EMPTY;
        assert!(!grid.top_row_has_occupied());

        // Anything below row 0 is irrelevant.
        grid.lock((1..ROWS).map(|r| CellPos::new(i32::try_from(r).unwrap(), 0)));
        assert!(!grid.top_row_has_occupied());

        grid.lock([CellPos::new(0, 7)]);
        assert!(grid.top_row_has_occupied());
    }

    #[test]
    fn test_from_ascii_fills_bottom() {
        let grid = Grid::from_ascii("#.........");
        assert!(grid.is_occupied(19, 0));
        assert!(!grid.is_occupied(0, 0));
    }
}
