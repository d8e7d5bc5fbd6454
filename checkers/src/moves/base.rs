use super::notation;
use crate::board::Board;
use crate::piece::Piece;
use crate::types::Coord;

use std::fmt;
use std::str::FromStr;

use log::{debug, trace};
use thiserror::Error;

/// Move kind
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Diagonal step to an adjacent square
    Slide,
    /// Jump over an opposing piece, which is captured
    Jump,
}

/// Move from one square to another
///
/// A move is just a pair of coordinates and may be arbitrary garbage when it comes from
/// the outside. Use [`Board::validate_move()`] to check it against a position.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    src: Coord,
    dst: Coord,
}

/// Rule violated by an illegal move
///
/// The variants are listed in the order in which the rules are checked, so the reported
/// rule is always the first one that failed.
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum IllegalMove {
    /// Destination holds a piece of the same color as the moving one
    #[error("square {0} is occupied by a piece of the same color")]
    FriendlyDestination(Coord),
    /// There is nothing to move
    #[error("no piece at {0}")]
    NoPiece(Coord),
    /// Source and destination are not on the same diagonal
    #[error("move is not diagonal")]
    NotDiagonal,
    /// The piece cannot move in this direction or over this distance
    #[error("piece at {0} cannot move this way")]
    BadShape(Coord),
    /// Jump without an opposing piece in the middle
    #[error("no opposing piece to jump over at {0}")]
    NothingToJump(Coord),
    /// Destination is occupied by an opposing piece
    #[error("square {0} is occupied")]
    DestinationOccupied(Coord),
}

/// Error indicating that move is invalid
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ValidateError {
    /// Source or destination lies outside the board
    #[error("square {0} is out of bounds")]
    OutOfBounds(Coord),
    /// Move breaks the rules of the game
    #[error("illegal move: {0}")]
    Illegal(#[from] IllegalMove),
}

/// What happened on the board after a move
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Effect {
    /// Square of the captured piece, if the move was a jump
    pub captured: Option<Coord>,
    /// `true` if the moving piece was crowned
    pub promoted: bool,
}

impl Move {
    #[inline]
    pub const fn new(src: Coord, dst: Coord) -> Move {
        Move { src, dst }
    }

    #[inline]
    pub const fn src(&self) -> Coord {
        self.src
    }

    #[inline]
    pub const fn dst(&self) -> Coord {
        self.dst
    }

    /// Number of rows covered by the move, or `None` if it's not diagonal
    pub fn length(&self) -> Option<u8> {
        let d_row = (i32::from(self.dst.row()) - i32::from(self.src.row())).unsigned_abs();
        let d_col = (i32::from(self.dst.col()) - i32::from(self.src.col())).unsigned_abs();
        (d_row == d_col).then_some(d_row as u8)
    }

    /// Returns the kind of the move, or `None` if it's neither a slide nor a jump
    pub fn kind(&self) -> Option<MoveKind> {
        match self.length()? {
            1 => Some(MoveKind::Slide),
            2 => Some(MoveKind::Jump),
            _ => None,
        }
    }

    #[inline]
    pub fn is_jump(&self) -> bool {
        self.kind() == Some(MoveKind::Jump)
    }

    /// Square of the piece jumped over, if the move is a jump
    pub fn jumped(&self) -> Option<Coord> {
        if !self.is_jump() {
            return None;
        }
        let mid = |a: i8, b: i8| ((i32::from(a) + i32::from(b)) / 2) as i8;
        Some(Coord::new(
            mid(self.src.row(), self.dst.row()),
            mid(self.src.col(), self.dst.col()),
        ))
    }

    /// Parses the move from text
    ///
    /// Does the same as [`Move::from_str`]. See [`notation`] for the accepted formats.
    #[inline]
    pub fn from_notation(s: &str) -> Result<Move, notation::RawParseError> {
        Move::from_str(s)
    }

    /// Validates the move against position `b`
    #[inline]
    pub fn validate(&self, b: &Board) -> Result<(), ValidateError> {
        validate(b, self.src, self.dst).map(|_| ())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        let sep = if self.is_jump() { 'x' } else { '-' };
        write!(f, "{}{}{}", self.src, sep, self.dst)
    }
}

impl FromStr for Move {
    type Err = notation::RawParseError;

    fn from_str(s: &str) -> Result<Move, Self::Err> {
        notation::parse(s)
    }
}

fn check_bounds(c: Coord) -> Result<(), ValidateError> {
    match c.is_on_board() {
        true => Ok(()),
        false => Err(ValidateError::OutOfBounds(c)),
    }
}

fn check_destination_color(b: &Board, src: Coord, dst: Coord) -> Result<(), IllegalMove> {
    match b.is_occupied_same_color(src, dst) {
        true => Err(IllegalMove::FriendlyDestination(dst)),
        false => Ok(()),
    }
}

fn check_origin(b: &Board, src: Coord) -> Result<&Piece, IllegalMove> {
    b.piece(src).ok_or(IllegalMove::NoPiece(src))
}

fn check_diagonal(mv: Move) -> Result<u8, IllegalMove> {
    mv.length().ok_or(IllegalMove::NotDiagonal)
}

fn check_shape(piece: &Piece, mv: Move) -> Result<(), IllegalMove> {
    match piece.is_valid_move_shape(mv.src, mv.dst) {
        true => Ok(()),
        false => Err(IllegalMove::BadShape(mv.src)),
    }
}

fn check_path(b: &Board, mv: Move) -> Result<(), IllegalMove> {
    if let Some(mid) = mv.jumped() {
        if !b.is_occupied_different_color(mv.src, mid) {
            return Err(IllegalMove::NothingToJump(mid));
        }
    }
    if b.is_occupied(mv.dst) {
        return Err(IllegalMove::DestinationOccupied(mv.dst));
    }
    Ok(())
}

/// Checks whether moving from `src` to `dst` is valid in position `b`
///
/// The rules are checked in order, and the first violated one is reported:
///
/// 1. both squares are on the board;
/// 2. `dst` doesn't hold a piece of the same color as the piece at `src`;
/// 3. there is a piece at `src`;
/// 4. the move is diagonal;
/// 5. the piece can move in this direction over this distance;
/// 6. a jump goes over an opposing piece, and the destination is free.
///
/// On success, returns the validated move.
pub fn validate(b: &Board, src: Coord, dst: Coord) -> Result<Move, ValidateError> {
    let mv = Move::new(src, dst);
    let res = do_validate(b, mv);
    if let Err(e) = &res {
        trace!("rejected move {}: {}", mv, e);
    }
    res.map(|_| mv)
}

fn do_validate(b: &Board, mv: Move) -> Result<(), ValidateError> {
    check_bounds(mv.src)?;
    check_bounds(mv.dst)?;
    check_destination_color(b, mv.src, mv.dst)?;
    let piece = check_origin(b, mv.src)?;
    check_diagonal(mv)?;
    check_shape(piece, mv)?;
    check_path(b, mv)?;
    Ok(())
}

/// Makes the move `mv` on the board `b`
///
/// If the move is a jump, the jumped piece is removed from the board and archived under the
/// index this move gets in the history. Then the piece is transferred, its move counter is
/// incremented, the move is recorded, and the piece is crowned if it reached the last row.
///
/// The move must be validated beforehand with [`validate()`]. A move without a piece at the
/// source square leaves the board untouched.
pub fn make_move_unchecked(b: &mut Board, mv: Move) -> Effect {
    let mut piece = match b.take(mv.src) {
        Some(piece) => piece,
        None => return Effect::default(),
    };

    let index = b.history.len();
    let mut effect = Effect::default();
    if let Some(mid) = mv.jumped() {
        if let Some(victim) = b.take(mid) {
            debug!("move #{}: {} captures {} at {}", index, mv, victim, mid);
            b.captured.insert(index, victim);
            effect.captured = Some(mid);
        }
    }

    piece.record_move();
    b.put(mv.dst, Some(piece));
    b.history.push(mv);

    effect.promoted = b.promote_if_crowning(mv.dst);
    if effect.promoted {
        debug!("move #{}: piece at {} is crowned", index, mv.dst);
    }
    debug!("move #{}: {}", index, mv);
    effect
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, PieceKind};

    #[test]
    fn test_geometry() {
        let mv = Move::new(Coord::new(4, 1), Coord::new(2, 3));
        assert_eq!(mv.length(), Some(2));
        assert_eq!(mv.kind(), Some(MoveKind::Jump));
        assert_eq!(mv.jumped(), Some(Coord::new(3, 2)));
        assert_eq!(mv.to_string(), "b4xd6");

        let mv = Move::new(Coord::new(5, 0), Coord::new(4, 1));
        assert_eq!(mv.kind(), Some(MoveKind::Slide));
        assert_eq!(mv.jumped(), None);
        assert_eq!(mv.to_string(), "a3-b4");

        let mv = Move::new(Coord::new(5, 0), Coord::new(4, 0));
        assert_eq!(mv.length(), None);
        assert_eq!(mv.kind(), None);

        let mv = Move::new(Coord::new(5, 0), Coord::new(5, 0));
        assert_eq!(mv.length(), Some(0));
        assert_eq!(mv.kind(), None);
    }

    #[test]
    fn test_rule_order() {
        let b = Board::initial();
        assert_eq!(
            validate(&b, Coord::new(5, 0), Coord::new(8, 3)),
            Err(ValidateError::OutOfBounds(Coord::new(8, 3)))
        );
        assert_eq!(
            validate(&b, Coord::new(-1, 0), Coord::new(0, 1)),
            Err(ValidateError::OutOfBounds(Coord::new(-1, 0)))
        );
        assert_eq!(
            validate(&b, Coord::new(6, 1), Coord::new(5, 0)),
            Err(IllegalMove::FriendlyDestination(Coord::new(5, 0)).into())
        );
        assert_eq!(
            validate(&b, Coord::new(4, 1), Coord::new(3, 2)),
            Err(IllegalMove::NoPiece(Coord::new(4, 1)).into())
        );
        assert_eq!(
            validate(&b, Coord::new(5, 0), Coord::new(4, 0)),
            Err(IllegalMove::NotDiagonal.into())
        );
        assert_eq!(
            validate(&b, Coord::new(5, 0), Coord::new(5, 0)),
            Err(IllegalMove::FriendlyDestination(Coord::new(5, 0)).into())
        );
        assert_eq!(
            validate(&b, Coord::new(5, 0), Coord::new(2, 3)),
            Err(IllegalMove::BadShape(Coord::new(5, 0)).into())
        );
        assert_eq!(
            validate(&b, Coord::new(5, 2), Coord::new(3, 4)),
            Err(IllegalMove::NothingToJump(Coord::new(4, 3)).into())
        );
        assert_eq!(
            validate(&b, Coord::new(5, 2), Coord::new(4, 3)),
            Ok(Move::new(Coord::new(5, 2), Coord::new(4, 3)))
        );
    }

    #[test]
    fn test_occupied_destination() {
        let b = Board::from_diagram("8/8/8/8/1b6/w7/8/8").unwrap();
        assert_eq!(
            validate(&b, Coord::new(5, 0), Coord::new(4, 1)),
            Err(IllegalMove::DestinationOccupied(Coord::new(4, 1)).into())
        );
        let b = Board::from_diagram("8/8/3b4/2b5/1w6/8/8/8").unwrap();
        assert_eq!(
            validate(&b, Coord::new(4, 1), Coord::new(2, 3)),
            Err(IllegalMove::DestinationOccupied(Coord::new(2, 3)).into())
        );
    }

    #[test]
    fn test_make_jump() {
        let mut b = Board::from_diagram("8/8/8/2b5/1w6/8/8/8").unwrap();
        let mv = validate(&b, Coord::new(4, 1), Coord::new(2, 3)).unwrap();
        let effect = make_move_unchecked(&mut b, mv);
        assert_eq!(
            effect,
            Effect {
                captured: Some(Coord::new(3, 2)),
                promoted: false
            }
        );
        assert!(b.piece(Coord::new(3, 2)).is_none());
        assert_eq!(b.captured().get(&0), Some(&Piece::new(Color::Black)));
        let piece = b.piece(Coord::new(2, 3)).unwrap();
        assert_eq!(piece.kind(), PieceKind::Regular);
        assert_eq!(piece.moves_made(), 1);
    }

    #[test]
    fn test_make_without_piece() {
        let mut b = Board::initial();
        let copy = b.clone();
        let effect = make_move_unchecked(&mut b, Move::new(Coord::new(4, 1), Coord::new(3, 2)));
        assert_eq!(effect, Effect::default());
        assert_eq!(b, copy);
    }
}
