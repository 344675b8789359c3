use rand::{Rng, distr::StandardUniform, prelude::Distribution};

/// Offset of one piece cell relative to the piece anchor.
///
/// `dcol` grows to the right and `drow` grows downward, matching grid
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub dcol: i32,
    pub drow: i32,
}

impl Offset {
    #[must_use]
    pub const fn new(dcol: i32, drow: i32) -> Self {
        Self { dcol, drow }
    }
}

/// Logical piece type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// J-piece.
    J = 1,
    /// L-piece.
    L = 2,
    /// O-piece.
    O = 3,
    /// S-piece.
    S = 4,
    /// Z-piece.
    Z = 5,
    /// T-piece.
    T = 6,
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
    ];
}

/// One pre-rotated shape variant from the static catalog.
///
/// Every piece kind contributes four variants. Some kinds repeat a variant
/// (I, O, S and Z only have two or one distinct orientations), so drawing a
/// shape uniformly from the catalog is not the same as drawing a distinct
/// orientation uniformly. Shapes are never rotated at runtime: the orientation
/// is fixed when the piece is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    kind: PieceKind,
    variant: u8,
}

impl Shape {
    /// Number of variants each kind contributes.
    pub const VARIANTS: usize = 4;
    /// Total number of catalog entries (28).
    pub const CATALOG_LEN: usize = PieceKind::LEN * Self::VARIANTS;

    /// Returns the catalog entry for the kind and variant.
    ///
    /// # Panics
    ///
    /// Panics if `variant >= 4`.
    #[must_use]
    pub const fn new(kind: PieceKind, variant: u8) -> Self {
        assert!((variant as usize) < Self::VARIANTS);
        Self { kind, variant }
    }

    /// Returns the shape at the given flat catalog index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 28`.
    #[must_use]
    pub fn from_catalog_index(index: usize) -> Self {
        assert!(index < Self::CATALOG_LEN, "catalog index out of range: {index}");
        let variant = u8::try_from(index % Self::VARIANTS).unwrap();
        Self::new(PieceKind::ALL[index / Self::VARIANTS], variant)
    }

    /// Iterates over all 28 catalog entries in catalog order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::CATALOG_LEN).map(Self::from_catalog_index)
    }

    #[must_use]
    pub const fn kind(self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn variant(self) -> u8 {
        self.variant
    }

    #[must_use]
    pub const fn offsets(self) -> &'static [Offset; 4] {
        &SHAPE_CATALOG[self.kind as usize][self.variant as usize]
    }

    /// Returns the inclusive `(min, max)` column offsets of the shape.
    #[must_use]
    pub fn col_range(self) -> (i32, i32) {
        let cols = self.offsets().iter().map(|o| o.dcol);
        (cols.clone().min().unwrap_or(0), cols.max().unwrap_or(0))
    }

    /// Returns the inclusive `(min, max)` row offsets of the shape.
    #[must_use]
    pub fn row_range(self) -> (i32, i32) {
        let rows = self.offsets().iter().map(|o| o.drow);
        (rows.clone().min().unwrap_or(0), rows.max().unwrap_or(0))
    }

    /// Returns the `(width, height)` of the shape's bounding box in cells.
    #[must_use]
    pub fn size(self) -> (u16, u16) {
        let (c0, c1) = self.col_range();
        let (r0, r1) = self.row_range();
        let w = u16::try_from(c1 - c0 + 1).unwrap_or(0);
        let h = u16::try_from(r1 - r0 + 1).unwrap_or(0);
        (w, h)
    }

    /// Checks whether the bounding-box relative cell `(x, y)` is part of the shape.
    ///
    /// `(0, 0)` is the top-left corner of the bounding box, not the anchor.
    #[must_use]
    pub fn is_occupied(self, (x, y): (usize, usize)) -> bool {
        let (c0, _) = self.col_range();
        let (r0, _) = self.row_range();
        self.offsets().iter().any(|o| {
            usize::try_from(o.dcol - c0).is_ok_and(|dx| dx == x)
                && usize::try_from(o.drow - r0).is_ok_and(|dy| dy == y)
        })
    }
}

impl Distribution<Shape> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Shape {
        Shape::from_catalog_index(rng.random_range(0..Shape::CATALOG_LEN))
    }
}

const SHAPE_CATALOG: [[[Offset; 4]; Shape::VARIANTS]; PieceKind::LEN] = {
    const fn s(cells: [(i32, i32); 4]) -> [Offset; 4] {
        [
            Offset::new(cells[0].0, cells[0].1),
            Offset::new(cells[1].0, cells[1].1),
            Offset::new(cells[2].0, cells[2].1),
            Offset::new(cells[3].0, cells[3].1),
        ]
    }

    // (dcol, drow) pairs
    const I_VERTICAL: [Offset; 4] = s([(0, 0), (0, 1), (0, 2), (0, 3)]);
    const I_HORIZONTAL: [Offset; 4] = s([(0, 0), (1, 0), (2, 0), (3, 0)]);
    const O: [Offset; 4] = s([(0, 0), (0, 1), (1, 0), (1, 1)]);
    const S_HORIZONTAL: [Offset; 4] = s([(0, 0), (1, 0), (1, -1), (2, -1)]);
    const S_VERTICAL: [Offset; 4] = s([(0, 0), (0, 1), (1, 1), (1, 2)]);
    const Z_HORIZONTAL: [Offset; 4] = s([(0, 0), (1, 0), (1, 1), (2, 1)]);
    const Z_VERTICAL: [Offset; 4] = s([(0, 0), (0, -1), (1, -1), (1, -2)]);

    [
        // I-piece
        [I_VERTICAL, I_HORIZONTAL, I_VERTICAL, I_HORIZONTAL],
        // J-piece
        [
            s([(0, -1), (0, 0), (1, 0), (2, 0)]),
            s([(0, 0), (1, 0), (0, 1), (0, 2)]),
            s([(0, 0), (1, 0), (2, 0), (2, 1)]),
            s([(0, 0), (0, 1), (0, 2), (-1, 2)]),
        ],
        // L-piece
        [
            s([(0, 0), (1, 0), (2, 0), (2, -1)]),
            s([(0, 0), (0, 1), (0, 2), (1, 2)]),
            s([(0, 0), (0, 1), (1, 0), (2, 0)]),
            s([(-1, 0), (0, 0), (0, 1), (0, 2)]),
        ],
        // O-piece
        [O, O, O, O],
        // S-piece
        [S_HORIZONTAL, S_VERTICAL, S_HORIZONTAL, S_VERTICAL],
        // Z-piece
        [Z_HORIZONTAL, Z_VERTICAL, Z_HORIZONTAL, Z_VERTICAL],
        // T-piece
        [
            s([(0, 0), (1, 0), (1, -1), (2, 0)]),
            s([(0, 0), (0, 1), (1, 1), (0, 2)]),
            s([(0, 0), (1, 0), (1, 1), (2, 0)]),
            s([(0, 0), (0, 1), (-1, 1), (0, 2)]),
        ],
    ]
};

/// Display color of a piece, as an index into [`PieceColor::PALETTE`].
///
/// Colors carry no game logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceColor(u8);

impl PieceColor {
    /// Number of palette entries.
    pub const COUNT: u8 = 21;

    pub const PALETTE: [(u8, u8, u8); 21] = [
        (255, 0, 0),
        (0, 255, 0),
        (0, 0, 255),
        (255, 255, 0),
        (255, 0, 255),
        (0, 255, 255),
        (150, 75, 0),
        (255, 165, 0),
        (255, 70, 0),
        (255, 180, 195),
        (128, 0, 128),
        (255, 215, 0),
        (205, 0, 205),
        (155, 50, 255),
        (255, 155, 50),
        (255, 128, 0),
        (255, 0, 128),
        (0, 255, 128),
        (0, 128, 255),
        (128, 255, 0),
        (128, 0, 255),
    ];

    /// Returns the palette entry at `index`, or `None` if out of range.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        u8::try_from(index)
            .ok()
            .filter(|i| *i < Self::COUNT)
            .map(Self)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        Self::PALETTE[self.0 as usize]
    }
}

impl Distribution<PieceColor> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceColor {
        PieceColor(rng.random_range(0..PieceColor::COUNT))
    }
}
