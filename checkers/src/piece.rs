//! Pieces and their movement rules

use crate::geometry;
use crate::types::{Cell, Color, Coord, PieceKind};

use std::fmt;

const fn forward(c: Color) -> [(i8, i8); 2] {
    let d = geometry::forward_delta(c);
    [(d, -1), (d, 1)]
}

const WHITE_FORWARD: [(i8, i8); 2] = forward(Color::White);
const BLACK_FORWARD: [(i8, i8); 2] = forward(Color::Black);

/// Longest move a piece can make, in rows
///
/// Pieces slide one square or jump over one piece, there are no long-range moves.
pub const MAX_MOVE_LENGTH: u8 = 2;

/// Single piece on the board
///
/// A piece is owned by the square it stands on. It is moved between squares by the
/// [`Board`](crate::board::Board), never copied, so its move counter follows it around.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    color: Color,
    kind: PieceKind,
    moves_made: u32,
}

impl Piece {
    /// Creates a regular piece of color `color`
    pub const fn new(color: Color) -> Piece {
        Piece {
            color,
            kind: PieceKind::Regular,
            moves_made: 0,
        }
    }

    /// Creates a crowned piece of color `color`
    pub const fn crowned(color: Color) -> Piece {
        Piece {
            color,
            kind: PieceKind::Crowned,
            moves_made: 0,
        }
    }

    /// Creates a fresh piece from its packed representation
    ///
    /// Returns `None` if the cell is empty.
    pub fn from_cell(cell: Cell) -> Option<Piece> {
        Some(Piece {
            color: cell.color()?,
            kind: cell.kind()?,
            moves_made: 0,
        })
    }

    #[inline]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub fn is_crowned(&self) -> bool {
        self.kind == PieceKind::Crowned
    }

    /// Number of moves this piece has made since it was put on the board
    #[inline]
    pub const fn moves_made(&self) -> u32 {
        self.moves_made
    }

    #[inline]
    pub const fn cell(&self) -> Cell {
        Cell::from_parts(self.color, self.kind)
    }

    pub(crate) fn record_move(&mut self) {
        self.moves_made += 1;
    }

    /// Crowns the piece
    ///
    /// Returns `true` if the piece was regular before the call. Calling it on an already
    /// crowned piece does nothing.
    pub fn promote(&mut self) -> bool {
        if self.is_crowned() {
            return false;
        }
        self.kind = PieceKind::Crowned;
        true
    }

    /// Directions in which this piece may move, as `(delta_row, delta_col)`
    pub fn directions(&self) -> &'static [(i8, i8)] {
        match (self.kind, self.color) {
            (PieceKind::Regular, Color::White) => &WHITE_FORWARD,
            (PieceKind::Regular, Color::Black) => &BLACK_FORWARD,
            (PieceKind::Crowned, _) => &geometry::DIAGONALS,
        }
    }

    /// Returns `true` if the piece may move from `from` to `to` as far as direction and
    /// distance are concerned
    ///
    /// Regular pieces go diagonally forward, crowned pieces go diagonally in any direction.
    /// In both cases the move is either one row long (a slide) or two rows long (a jump).
    /// Occupancy of the squares is not checked here, see
    /// [`Board::validate_move()`](crate::board::Board::validate_move).
    pub fn is_valid_move_shape(&self, from: Coord, to: Coord) -> bool {
        let d_row = i32::from(to.row()) - i32::from(from.row());
        let d_col = i32::from(to.col()) - i32::from(from.col());
        if d_row.abs() != d_col.abs() {
            return false;
        }
        let len = d_row.abs();
        if len == 0 || len > i32::from(MAX_MOVE_LENGTH) {
            return false;
        }
        let dir = (d_row.signum() as i8, d_col.signum() as i8);
        self.directions().contains(&dir)
    }

    /// Returns `true` if a regular piece must be crowned after arriving at `coord`
    pub fn reaches_crown_row(&self, coord: Coord) -> bool {
        !self.is_crowned() && coord.row() == geometry::crown_row(self.color)
    }

    /// Short glyph used by the text renderer
    pub fn glyph(&self) -> &'static str {
        match (self.color, self.kind) {
            (Color::White, PieceKind::Regular) => "wc",
            (Color::White, PieceKind::Crowned) => "wcc",
            (Color::Black, PieceKind::Regular) => "bc",
            (Color::Black, PieceKind::Crowned) => "bcc",
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.glyph())
    }
}
