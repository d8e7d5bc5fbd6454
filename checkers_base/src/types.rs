use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

/// Error parsing a coordinate in algebraic notation
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CoordParseError {
    #[error("unexpected column char {0:?}")]
    UnexpectedColumnChar(char),
    #[error("unexpected row char {0:?}")]
    UnexpectedRowChar(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CellParseError {
    #[error("unexpected cell char {0:?}")]
    UnexpectedChar(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("unexpected color char {0:?}")]
    UnexpectedChar(char),
    #[error("invalid string length")]
    BadLength,
}

/// Square coordinate as a zero-based `(row, col)` pair
///
/// Row 0 is the eighth rank in algebraic notation and column 0 is the file `a`, so
/// `Coord::new(0, 0)` is `a8` and `Coord::new(7, 7)` is `h1`.
///
/// The pair is not required to lie on the board. Requests coming from outside may
/// contain anything, and the board rejects such coordinates instead of panicking. Use
/// [`Coord::is_on_board()`] to check.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    row: i8,
    col: i8,
}

impl Coord {
    pub const fn new(row: i8, col: i8) -> Coord {
        Coord { row, col }
    }

    pub const fn from_index(val: usize) -> Coord {
        assert!(val < 64, "coord must be between 0 and 63");
        Coord {
            row: (val >> 3) as i8,
            col: (val & 7) as i8,
        }
    }

    pub const fn row(&self) -> i8 {
        self.row
    }

    pub const fn col(&self) -> i8 {
        self.col
    }

    /// Returns `true` if both axes are in `[0, 7]`
    pub const fn is_on_board(&self) -> bool {
        0 <= self.row && self.row < 8 && 0 <= self.col && self.col < 8
    }

    /// Index of the square in row-major order
    ///
    /// Must be called only for coordinates on the board.
    pub const fn index(&self) -> usize {
        debug_assert!(self.is_on_board());
        ((self.row as usize) << 3) | self.col as usize
    }

    /// Returns `true` for the squares on which the game is played
    pub const fn is_dark(&self) -> bool {
        self.row.wrapping_add(self.col) & 1 == 1
    }

    pub const fn shift(self, delta_row: i8, delta_col: i8) -> Coord {
        Coord {
            row: self.row.wrapping_add(delta_row),
            col: self.col.wrapping_add(delta_col),
        }
    }

    pub fn try_shift(self, delta_row: i8, delta_col: i8) -> Option<Coord> {
        let res = self.shift(delta_row, delta_col);
        res.is_on_board().then_some(res)
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0_usize..64_usize).map(Coord::from_index)
    }

    /// Converts the coordinate into algebraic notation, e.g. `(0, 0)` into `"a8"`
    ///
    /// Does the same as `Coord::to_string()`.
    pub fn to_algebraic(&self) -> String {
        self.to_string()
    }

    /// Parses the coordinate from algebraic notation
    ///
    /// Does the same as [`Coord::from_str`].
    pub fn from_algebraic(s: &str) -> Result<Coord, CoordParseError> {
        Coord::from_str(s)
    }

    fn col_char(&self) -> char {
        (b'a' + self.col as u8) as char
    }

    fn row_char(&self) -> char {
        (b'8' - self.row as u8) as char
    }
}

impl From<(i8, i8)> for Coord {
    fn from((row, col): (i8, i8)) -> Coord {
        Coord::new(row, col)
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        if self.is_on_board() {
            return write!(f, "Coord({})", self);
        }
        write!(f, "Coord(?{}, {})", self.row, self.col)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        if !self.is_on_board() {
            return write!(f, "({}, {})", self.row, self.col);
        }
        write!(f, "{}{}", self.col_char(), self.row_char())
    }
}

impl FromStr for Coord {
    type Err = CoordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (col_ch, row_ch) = match (chars.next(), chars.next(), chars.next()) {
            (Some(c), Some(r), None) => (c, r),
            _ => return Err(CoordParseError::BadLength),
        };
        let col = match col_ch {
            'a'..='h' => (u32::from(col_ch) - u32::from('a')) as i8,
            _ => return Err(CoordParseError::UnexpectedColumnChar(col_ch)),
        };
        let row = match row_ch {
            '1'..='8' => (u32::from('8') - u32::from(row_ch)) as i8,
            _ => return Err(CoordParseError::UnexpectedRowChar(row_ch)),
        };
        Ok(Coord::new(row, col))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub const fn inv(&self) -> Color {
        match *self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    pub fn as_char(&self) -> char {
        match *self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    pub fn from_char(c: char) -> Option<Color> {
        match c {
            'w' => Some(Color::White),
            'b' => Some(Color::Black),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match *self {
            Color::White => "White",
            Color::Black => "Black",
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 1 {
            return Err(ColorParseError::BadLength);
        }
        let ch = s.as_bytes()[0] as char;
        Color::from_char(ch).ok_or(ColorParseError::UnexpectedChar(ch))
    }
}

/// Piece variant
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    /// Moves only forward, toward the opponent's back rank
    Regular = 0,
    /// Promoted piece, moves in all four diagonal directions
    Crowned = 1,
}

/// Contents of a square, packed into a single byte
///
/// This is a compact value used for hashing, text diagrams and snapshots. The board itself
/// stores full pieces, which also carry their move counters.
#[derive(Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Cell(u8);

impl Cell {
    pub const EMPTY: Cell = Cell(0);
    pub const COUNT: usize = 5;

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_occupied(&self) -> bool {
        self.0 != 0
    }

    pub const fn from_index(val: usize) -> Cell {
        assert!(val < Self::COUNT, "index too large");
        Cell(val as u8)
    }

    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    pub const fn from_parts(c: Color, k: PieceKind) -> Cell {
        Cell(1 + ((c as u8) << 1) + k as u8)
    }

    pub const fn color(&self) -> Option<Color> {
        match self.0 {
            0 => None,
            1 | 2 => Some(Color::White),
            _ => Some(Color::Black),
        }
    }

    pub const fn kind(&self) -> Option<PieceKind> {
        match self.0 {
            0 => None,
            1 | 3 => Some(PieceKind::Regular),
            _ => Some(PieceKind::Crowned),
        }
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0..Self::COUNT).map(Cell::from_index)
    }

    pub fn as_char(&self) -> char {
        b".wWbB"[self.0 as usize] as char
    }

    pub fn as_utf8_char(&self) -> char {
        ['.', '⛀', '⛁', '⛂', '⛃'][self.0 as usize]
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Cell::EMPTY),
            'w' => Some(Cell::from_parts(Color::White, PieceKind::Regular)),
            'W' => Some(Cell::from_parts(Color::White, PieceKind::Crowned)),
            'b' => Some(Cell::from_parts(Color::Black, PieceKind::Regular)),
            'B' => Some(Cell::from_parts(Color::Black, PieceKind::Crowned)),
            _ => None,
        }
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        if (self.0 as usize) < Self::COUNT {
            return write!(f, "Cell({})", self.as_char());
        }
        write!(f, "Cell(?{:?})", self.0)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Cell {
    type Err = CellParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 1 {
            return Err(CellParseError::BadLength);
        }
        let ch = s.as_bytes()[0] as char;
        Cell::from_char(ch).ok_or(CellParseError::UnexpectedChar(ch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord() {
        let mut coords = Vec::new();
        for row in 0..8 {
            for col in 0..8 {
                let coord = Coord::new(row, col);
                assert!(coord.is_on_board());
                assert_eq!(Coord::from_index(coord.index()), coord);
                coords.push(coord);
            }
        }
        assert_eq!(coords, Coord::iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_on_board() {
        assert!(!Coord::new(-1, 0).is_on_board());
        assert!(!Coord::new(0, 8).is_on_board());
        assert!(!Coord::new(8, 8).is_on_board());
        assert_eq!(Coord::new(7, 0).try_shift(1, 1), None);
        assert_eq!(Coord::new(7, 0).try_shift(-1, 1), Some(Coord::new(6, 1)));
    }

    #[test]
    fn test_coord_str() {
        assert_eq!(Coord::new(0, 0).to_string(), "a8");
        assert_eq!(Coord::new(7, 7).to_string(), "h1");
        assert_eq!(Coord::new(5, 0).to_algebraic(), "a3");
        assert_eq!(Coord::new(-1, 3).to_string(), "(-1, 3)");
        assert_eq!(Coord::from_str("a8"), Ok(Coord::new(0, 0)));
        assert_eq!(Coord::from_str("e2"), Ok(Coord::new(6, 4)));
        assert_eq!(Coord::from_str("h9"), Err(CoordParseError::UnexpectedRowChar('9')));
        assert_eq!(Coord::from_str("i4"), Err(CoordParseError::UnexpectedColumnChar('i')));
        assert_eq!(Coord::from_str("a"), Err(CoordParseError::BadLength));
        assert_eq!(Coord::from_str("a10"), Err(CoordParseError::BadLength));
        assert_eq!(Coord::from_str("а1"), Err(CoordParseError::UnexpectedColumnChar('а')));
    }

    #[test]
    fn test_algebraic_roundtrip() {
        for coord in Coord::iter() {
            assert_eq!(Coord::from_algebraic(&coord.to_algebraic()), Ok(coord));
        }
    }

    #[test]
    fn test_dark() {
        assert!(Coord::new(0, 1).is_dark());
        assert!(Coord::new(5, 0).is_dark());
        assert!(!Coord::new(0, 0).is_dark());
        assert_eq!(Coord::iter().filter(Coord::is_dark).count(), 32);
    }

    #[test]
    fn test_cell() {
        assert_eq!(Cell::EMPTY.color(), None);
        assert_eq!(Cell::EMPTY.kind(), None);
        let mut cells = vec![Cell::EMPTY];
        for color in [Color::White, Color::Black] {
            for kind in [PieceKind::Regular, PieceKind::Crowned] {
                let cell = Cell::from_parts(color, kind);
                assert_eq!(cell.color(), Some(color));
                assert_eq!(cell.kind(), Some(kind));
                cells.push(cell);
            }
        }
        assert_eq!(cells, Cell::iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_cell_str() {
        for cell in Cell::iter() {
            let s = cell.to_string();
            assert_eq!(Cell::from_str(&s), Ok(cell));
        }
        assert_eq!(Cell::from_str("x"), Err(CellParseError::UnexpectedChar('x')));
    }

    #[test]
    fn test_color() {
        assert_eq!(Color::White.inv(), Color::Black);
        assert_eq!(Color::from_str("b"), Ok(Color::Black));
        assert_eq!(Color::White.to_string(), "White");
    }
}
