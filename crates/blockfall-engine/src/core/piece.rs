use super::{
    GRID_COLS, GRID_ROWS,
    grid::Grid,
    shape::{Offset, PieceColor, Shape},
};

/// A grid coordinate.
///
/// Rows may be negative while a piece is still above the visible grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPos {
    pub row: i32,
    pub col: i32,
}

impl CellPos {
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    #[must_use]
    pub const fn offset(self, offset: Offset) -> Self {
        Self::new(self.row + offset.drow, self.col + offset.dcol)
    }
}

/// A falling piece: a fixed shape placed at an anchor position.
///
/// The shape and color are chosen once at construction and never change;
/// movement only translates the anchor. Movement methods check the target
/// position against a [`Grid`] and either move the whole piece or leave it
/// untouched.
///
/// Cells above the grid (`row < 0`) never collide with anything, so a freshly
/// spawned piece can slide sideways within the column bounds before it becomes
/// visible.
///
/// # Example
///
/// ```
/// use blockfall_engine::{CellPos, Grid, Piece, PieceColor, PieceKind, Shape};
///
/// let grid = Grid::EMPTY;
/// let shape = Shape::new(PieceKind::O, 0);
/// let color = PieceColor::from_index(0).unwrap();
/// let mut piece = Piece::new(CellPos::new(-3, 4), shape, color);
///
/// assert!(piece.try_move_down(&grid));
/// assert_eq!(piece.anchor(), CellPos::new(-2, 4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    anchor: CellPos,
    shape: Shape,
    color: PieceColor,
}

impl Piece {
    /// Creates a piece, shifting the anchor column so that every cell lies
    /// within `[0, COLS)`.
    ///
    /// Construction never fails; an out-of-range column is corrected rather
    /// than rejected. The row is kept as given.
    #[must_use]
    pub fn new(anchor: CellPos, shape: Shape, color: PieceColor) -> Self {
        let (min_dcol, max_dcol) = shape.col_range();
        let col = anchor.col.clamp(-min_dcol, GRID_COLS - 1 - max_dcol);
        Self {
            anchor: CellPos::new(anchor.row, col),
            shape,
            color,
        }
    }

    #[must_use]
    pub fn anchor(&self) -> CellPos {
        self.anchor
    }

    #[must_use]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    #[must_use]
    pub fn color(&self) -> PieceColor {
        self.color
    }

    /// Returns the absolute grid cells covered by the piece.
    ///
    /// Rows may be negative while the piece is above the grid.
    pub fn occupied_cells(&self) -> impl Iterator<Item = CellPos> + '_ {
        self.shape
            .offsets()
            .iter()
            .map(move |offset| self.anchor.offset(*offset))
    }

    /// Returns `true` if no cell of the piece is above row 0.
    #[must_use]
    pub fn is_fully_visible(&self) -> bool {
        self.occupied_cells().all(|pos| pos.row >= 0)
    }

    pub fn try_move_left(&mut self, grid: &Grid) -> bool {
        self.try_shift(grid, 0, -1)
    }

    pub fn try_move_right(&mut self, grid: &Grid) -> bool {
        self.try_shift(grid, 0, 1)
    }

    /// Moves the piece one row down if possible.
    ///
    /// Returns `false` when the piece has landed: some cell would leave the
    /// bottom of the grid or hit an occupied cell. Landing is reported, not
    /// handled; the caller decides when to lock.
    pub fn try_move_down(&mut self, grid: &Grid) -> bool {
        self.try_shift(grid, 1, 0)
    }

    /// Moves the anchor one row down without any collision check.
    ///
    /// Used for locked records when the grid shifts under them.
    pub(crate) fn shift_down_unchecked(&mut self) {
        self.anchor.row += 1;
    }

    fn try_shift(&mut self, grid: &Grid, drow: i32, dcol: i32) -> bool {
        let target = CellPos::new(self.anchor.row + drow, self.anchor.col + dcol);
        if !self.fits_at(grid, target) {
            return false;
        }
        self.anchor = target;
        true
    }

    fn fits_at(&self, grid: &Grid, anchor: CellPos) -> bool {
        self.shape.offsets().iter().all(|offset| {
            let pos = anchor.offset(*offset);
            if !(0..GRID_COLS).contains(&pos.col) || pos.row >= GRID_ROWS {
                return false;
            }
            pos.row < 0 || !grid.is_occupied(pos.row, pos.col)
        })
    }
}
