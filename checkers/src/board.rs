//! Board and related things

use crate::bitboard::Bitboard;
use crate::moves::{self, Effect, Make, Move, ValidateError};
use crate::movegen::{self, MoveList};
use crate::piece::Piece;
use crate::types::{Cell, Color, Coord};
use crate::{bitboard_consts, zobrist};

use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::mem;
use std::str::FromStr;

use thiserror::Error;

/// Number of pieces each side has at the start of the game
pub const PIECES_PER_SIDE: usize = 12;

/// Diagram of the starting position, see [`Board::from_diagram()`]
pub const INITIAL_DIAGRAM: &str = "1b1b1b1b/b1b1b1b1/1b1b1b1b/8/8/w1w1w1w1/1w1w1w1w/w1w1w1w1";

/// Error parsing the cells of a diagram
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum CellsParseError {
    /// Diagram contains non-ASCII characters
    #[error("non-ASCII data in diagram")]
    NonAscii,
    /// Row is too large
    #[error("too many items in row {0}")]
    RowOverflow(i8),
    /// Row is too small
    #[error("not enough items in row {0}")]
    RowUnderflow(i8),
    /// Too many rows
    #[error("too many rows")]
    Overflow,
    /// Not enough rows
    #[error("not enough rows")]
    Underflow,
    /// Unexpected character
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
}

/// Error parsing [`Board`] from diagram
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum DiagramParseError {
    /// Cannot parse cells
    #[error("cannot parse cells: {0}")]
    Cells(#[from] CellsParseError),
    /// Piece stands on a light square
    #[error("piece on light square {0}")]
    LightSquare(Coord),
    /// Regular piece stands on the row where it must have been crowned
    #[error("regular piece on crown row at {0}")]
    NotCrowned(Coord),
    /// Too many pieces of given color
    ///
    /// No more than 12 pieces of each color is allowed.
    #[error("too many pieces of color {0}")]
    TooManyPieces(Color),
}

/// Single square of the board
///
/// Owns the piece standing on it, if any.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Square {
    piece: Option<Piece>,
}

impl Square {
    #[inline]
    pub fn piece(&self) -> Option<&Piece> {
        self.piece.as_ref()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.piece.is_none()
    }

    fn set_piece(&mut self, piece: Option<Piece>) -> Option<Piece> {
        mem::replace(&mut self.piece, piece)
    }
}

/// Checkers board
///
/// Holds the 64 squares together with the history of moves made and the pieces captured
/// during the game. The board doesn't know whose turn it is, this is decided by
/// [`Game`](crate::game::Game).
///
/// Pieces can be changed only by making moves. The only exception is [`Board::put()`],
/// which is intended to set up positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Square; 64],
    white: Bitboard,
    black: Bitboard,
    hash: u64,
    pub(crate) history: Vec<Move>,
    pub(crate) captured: BTreeMap<usize, Piece>,
}

impl Board {
    /// Returns a board without pieces
    pub fn empty() -> Board {
        Board {
            squares: std::array::from_fn(|_| Square::default()),
            white: Bitboard::EMPTY,
            black: Bitboard::EMPTY,
            hash: 0,
            history: Vec::new(),
            captured: BTreeMap::new(),
        }
    }

    /// Returns the board in the starting position
    ///
    /// Each side has 12 regular pieces on the dark squares of its three home rows.
    pub fn initial() -> Board {
        let mut res = Board::empty();
        for color in [Color::White, Color::Black] {
            for coord in bitboard_consts::home(color) {
                res.put(coord, Some(Piece::new(color)));
            }
        }
        res
    }

    /// Creates a board from diagram
    ///
    /// The diagram lists the rows from 0 to 7 separated by `/`. Each row is a sequence
    /// of `w` and `b` for regular pieces, `W` and `B` for crowned pieces, `.` for a
    /// single empty square and digits `1` to `8` for runs of empty squares, just like the
    /// first part of chess FEN. History of the resulting board is empty.
    ///
    /// # Example
    ///
    /// ```
    /// # use checkers::Board;
    /// # use checkers::board::INITIAL_DIAGRAM;
    /// let b = Board::from_diagram(INITIAL_DIAGRAM).unwrap();
    /// assert_eq!(b, Board::initial());
    /// assert_eq!(b.to_string(), INITIAL_DIAGRAM);
    /// ```
    pub fn from_diagram(s: &str) -> Result<Board, DiagramParseError> {
        let cells = parse_cells(s)?;
        let mut res = Board::empty();
        for (coord, cell) in Coord::iter().zip(cells) {
            let piece = match Piece::from_cell(cell) {
                Some(piece) => piece,
                None => continue,
            };
            if !bitboard_consts::DARK.has(coord) {
                return Err(DiagramParseError::LightSquare(coord));
            }
            if piece.reaches_crown_row(coord) {
                return Err(DiagramParseError::NotCrowned(coord));
            }
            res.put(coord, Some(piece));
        }
        for color in [Color::White, Color::Black] {
            if res.piece_count(color) > PIECES_PER_SIDE {
                return Err(DiagramParseError::TooManyPieces(color));
            }
        }
        Ok(res)
    }

    /// Converts the position into diagram, see [`Board::from_diagram()`] for the format
    ///
    /// Does the same as `Board::to_string()`.
    pub fn as_diagram(&self) -> String {
        self.to_string()
    }

    /// Returns the square at `c`, or `None` if `c` is off the board
    #[inline]
    pub fn square(&self, c: Coord) -> Option<&Square> {
        if !c.is_on_board() {
            return None;
        }
        Some(&self.squares[c.index()])
    }

    /// Returns the piece at `c`
    ///
    /// Returns `None` if the square is empty or if `c` is off the board.
    #[inline]
    pub fn piece(&self, c: Coord) -> Option<&Piece> {
        self.square(c)?.piece()
    }

    /// Returns the packed contents of the square at `c`
    #[inline]
    pub fn get(&self, c: Coord) -> Cell {
        self.piece(c).map_or(Cell::EMPTY, Piece::cell)
    }

    /// Puts `piece` on the square `c` and returns what stood there before
    ///
    /// No rules are checked here, so use it only to set up positions.
    ///
    /// # Panics
    ///
    /// The function panics if `c` is off the board.
    pub fn put(&mut self, c: Coord, piece: Option<Piece>) -> Option<Piece> {
        assert!(c.is_on_board(), "cannot put a piece off the board at {}", c);
        if let Some(old) = self.squares[c.index()].piece() {
            let color = old.color();
            self.hash ^= zobrist::pieces(old.cell(), c);
            self.color_mut(color).unset(c);
        }
        if let Some(new) = &piece {
            self.hash ^= zobrist::pieces(new.cell(), c);
            self.color_mut(new.color()).set(c);
        }
        self.squares[c.index()].set_piece(piece)
    }

    pub(crate) fn take(&mut self, c: Coord) -> Option<Piece> {
        if !c.is_on_board() {
            return None;
        }
        self.put(c, None)
    }

    /// Crowns the piece at `c` if it's a regular piece standing on its crown row
    ///
    /// Returns `true` if the piece was crowned.
    pub(crate) fn promote_if_crowning(&mut self, c: Coord) -> bool {
        let mut piece = match self.take(c) {
            Some(piece) => piece,
            None => return false,
        };
        let promoted = piece.reaches_crown_row(c) && piece.promote();
        self.put(c, Some(piece));
        promoted
    }

    /// Returns `true` if there is a piece at `c`
    #[inline]
    pub fn is_occupied(&self, c: Coord) -> bool {
        self.piece(c).is_some()
    }

    /// Returns `true` if both `a` and `b` hold pieces, and their colors are the same
    pub fn is_occupied_same_color(&self, a: Coord, b: Coord) -> bool {
        match (self.piece(a), self.piece(b)) {
            (Some(p), Some(q)) => p.color() == q.color(),
            _ => false,
        }
    }

    /// Returns `true` if both `a` and `b` hold pieces, and their colors differ
    pub fn is_occupied_different_color(&self, a: Coord, b: Coord) -> bool {
        match (self.piece(a), self.piece(b)) {
            (Some(p), Some(q)) => p.color() != q.color(),
            _ => false,
        }
    }

    /// Returns the squares occupied by pieces of color `c`
    #[inline]
    pub fn color(&self, c: Color) -> Bitboard {
        match c {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    fn color_mut(&mut self, c: Color) -> &mut Bitboard {
        match c {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    /// Returns all the pieces of color `c`, in row-major order of their squares
    pub fn pieces(&self, c: Color) -> Vec<&Piece> {
        self.color(c)
            .into_iter()
            .filter_map(|coord| self.piece(coord))
            .collect()
    }

    /// Returns the number of pieces of color `c`
    #[inline]
    pub fn piece_count(&self, c: Color) -> usize {
        self.color(c).popcount() as usize
    }

    /// Returns all 64 coordinates of the board, in row-major order
    pub fn locations(&self) -> Vec<Coord> {
        Coord::iter().collect()
    }

    /// Iterates over all the squares of the board together with their pieces
    ///
    /// This is the snapshot a front end needs to draw the board.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, Option<&Piece>)> + '_ {
        Coord::iter().zip(self.squares.iter().map(Square::piece))
    }

    /// Checks whether moving from `from` to `to` is valid, and reports the first violated
    /// rule if it is not
    ///
    /// See [`moves::validate()`] for the list of rules.
    #[inline]
    pub fn validate_move(&self, from: Coord, to: Coord) -> Result<Move, ValidateError> {
        moves::validate(self, from, to)
    }

    /// Returns `true` if moving from `from` to `to` is valid
    #[inline]
    pub fn is_valid_move(&self, from: Coord, to: Coord) -> bool {
        self.validate_move(from, to).is_ok()
    }

    /// Makes a move in place
    ///
    /// The move is validated first. On error, the board is left untouched.
    #[inline]
    pub fn make_move<M: Make>(&mut self, m: M) -> Result<(Move, Effect), M::Err> {
        m.make_raw(self)
    }

    /// Moves the piece from `from` to `to` if the move is valid
    ///
    /// Returns `false` and leaves the board untouched if the move is invalid.
    pub fn move_piece(&mut self, from: Coord, to: Coord) -> bool {
        self.make_move(Move::new(from, to)).is_ok()
    }

    /// Returns all valid moves for the pieces of color `c`
    #[inline]
    pub fn legal_moves(&self, c: Color) -> MoveList {
        movegen::gen_all(self, c)
    }

    /// Returns all jumps available for the pieces of color `c`
    #[inline]
    pub fn available_captures(&self, c: Color) -> MoveList {
        movegen::gen_captures(self, c)
    }

    /// Returns `true` if at least one piece of color `c` can move
    #[inline]
    pub fn has_legal_moves(&self, c: Color) -> bool {
        movegen::has_legal_moves(self, c)
    }

    /// Moves made on this board so far, in chronological order
    #[inline]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Captured pieces, keyed by the index of the capturing move in [`Board::history()`]
    #[inline]
    pub fn captured(&self) -> &BTreeMap<usize, Piece> {
        &self.captured
    }

    /// Returns the wrapper to print the history, one move per line
    pub fn history_list(&self) -> HistoryList<'_> {
        HistoryList(&self.history)
    }

    /// Returns the wrapper to print the captured pieces, one per line
    pub fn captured_list(&self) -> CapturedList<'_> {
        CapturedList(&self.captured)
    }

    /// Returns Zobrist hash of the pieces on the board
    ///
    /// Only piece colors and kinds are taken into account. History, move counters of
    /// the pieces and captured pieces are not.
    #[inline]
    pub fn zobrist_hash(&self) -> u64 {
        self.hash
    }

    /// Returns the wrapper to pretty-print the board
    ///
    /// # Example
    ///
    /// ```
    /// # use checkers::{Board, board::PrettyStyle};
    /// let b = Board::from_diagram("8/8/8/8/8/8/8/2W5").unwrap();
    /// let s = b.pretty(PrettyStyle::Ascii).to_string();
    /// assert_eq!(s.lines().count(), 8);
    /// assert_eq!(s.lines().next(), Some(" --  --  --  --  --  --  --  -- "));
    /// assert_eq!(s.lines().last(), Some(" --  --  wcc --  --  --  --  -- "));
    /// ```
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        Pretty {
            board: self,
            style,
            axes: false,
        }
    }

    #[cfg(test)]
    fn calc_hash(&self) -> u64 {
        self.cells()
            .filter_map(|(coord, piece)| piece.map(|p| zobrist::pieces(p.cell(), coord)))
            .fold(0, |acc, h| acc ^ h)
    }
}

impl Default for Board {
    #[inline]
    fn default() -> Board {
        Board::initial()
    }
}

fn parse_cells(s: &str) -> Result<[Cell; 64], CellsParseError> {
    type Error = CellsParseError;

    if !s.is_ascii() {
        return Err(Error::NonAscii);
    }

    let mut col = 0_usize;
    let mut row = 0_usize;
    let mut pos = 0_usize;
    let mut cells = [Cell::EMPTY; 64];
    for b in s.bytes() {
        match b {
            b'1'..=b'8' => {
                let add = (b - b'0') as usize;
                if col + add > 8 {
                    return Err(Error::RowOverflow(row as i8));
                }
                col += add;
                pos += add;
            }
            b'/' => {
                if col < 8 {
                    return Err(Error::RowUnderflow(row as i8));
                }
                row += 1;
                col = 0;
                if row >= 8 {
                    return Err(Error::Overflow);
                }
            }
            _ => {
                if col >= 8 {
                    return Err(Error::RowOverflow(row as i8));
                }
                cells[pos] = Cell::from_char(b as char).ok_or(Error::UnexpectedChar(b as char))?;
                col += 1;
                pos += 1;
            }
        };
    }

    if col < 8 {
        return Err(Error::RowUnderflow(row as i8));
    }
    if row < 7 {
        return Err(Error::Underflow);
    }

    Ok(cells)
}

impl FromStr for Board {
    type Err = DiagramParseError;

    fn from_str(s: &str) -> Result<Board, Self::Err> {
        Board::from_diagram(s)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for row in 0..8 {
            if row != 0 {
                write!(f, "/")?;
            }
            let mut empty = 0;
            for col in 0..8 {
                let cell = self.get(Coord::new(row, col));
                if cell.is_empty() {
                    empty += 1;
                    continue;
                }
                if empty != 0 {
                    write!(f, "{}", (b'0' + empty) as char)?;
                    empty = 0;
                }
                write!(f, "{}", cell)?;
            }
            if empty != 0 {
                write!(f, "{}", (b'0' + empty) as char)?;
            }
        }
        Ok(())
    }
}

/// Wrapper to print the move history
pub struct HistoryList<'a>(&'a [Move]);

impl<'a> Display for HistoryList<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for (i, mv) in self.0.iter().enumerate() {
            writeln!(f, "{}. {}", i + 1, mv)?;
        }
        Ok(())
    }
}

/// Wrapper to print the captured pieces
///
/// Each line contains the index of the capturing move in the history and the glyph of the
/// captured piece.
pub struct CapturedList<'a>(&'a BTreeMap<usize, Piece>);

impl<'a> Display for CapturedList<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for (index, piece) in self.0 {
            writeln!(f, "{} {}", index, piece)?;
        }
        Ok(())
    }
}

/// Style for [`Board::pretty()`]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PrettyStyle {
    /// Print pieces as short ASCII glyphs like `wc` or `bcc`
    Ascii,
    /// Print pieces as Unicode draughts characters
    Utf8,
}

/// Wrapper to pretty-print the board
///
/// Each square takes four characters. See docs for [`Board::pretty()`] for more details.
pub struct Pretty<'a> {
    board: &'a Board,
    style: PrettyStyle,
    axes: bool,
}

impl<'a> Pretty<'a> {
    /// Adds row digits and column letters around the board
    pub fn with_axes(mut self) -> Pretty<'a> {
        self.axes = true;
        self
    }
}

trait StyleTable {
    fn cell(piece: Option<&Piece>, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error>;

    fn columns(f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "   ")?;
        for col in 0..8 {
            write!(f, " {}  ", (b'a' + col) as char)?;
        }
        writeln!(f)
    }

    fn fmt(b: &Board, axes: bool, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        if axes {
            Self::columns(f)?;
            writeln!(f)?;
        }
        for row in 0..8 {
            let label = 8 - row;
            if axes {
                write!(f, "{}  ", label)?;
            }
            for col in 0..8 {
                Self::cell(b.piece(Coord::new(row, col)), f)?;
            }
            if axes {
                write!(f, "  {}", label)?;
            }
            writeln!(f)?;
        }
        if axes {
            writeln!(f)?;
            Self::columns(f)?;
        }
        Ok(())
    }
}

struct AsciiStyleTable;
struct Utf8StyleTable;

impl StyleTable for AsciiStyleTable {
    fn cell(piece: Option<&Piece>, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match piece {
            Some(p) => write!(f, " {:<3}", p.glyph()),
            None => write!(f, " -- "),
        }
    }
}

impl StyleTable for Utf8StyleTable {
    fn cell(piece: Option<&Piece>, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match piece {
            Some(p) => write!(f, " {}  ", p.cell().as_utf8_char()),
            None => write!(f, " ·  "),
        }
    }
}

impl<'a> Display for Pretty<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.style {
            PrettyStyle::Ascii => AsciiStyleTable::fmt(self.board, self.axes, f),
            PrettyStyle::Utf8 => Utf8StyleTable::fmt(self.board, self.axes, f),
        }
    }
}
