//! Utilities to work with moves in text form
//!
//! A move is written as two squares in algebraic notation, like `c3` or `h8`. Column letters
//! go from `a` on the left, row digits go from `8` at the top (row 0) to `1` at the bottom
//! (row 7). The squares may be separated with whitespace, `-`, `x` or `:`, or not separated
//! at all, so `c3 d4`, `c3-d4`, `b4xd6` and `c3d4` are all accepted.

use super::base::{self, ValidateError};
use crate::board::Board;
use crate::types::{Coord, CoordParseError};

use std::str::FromStr;

use thiserror::Error;

/// Error parsing a move from string
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum RawParseError {
    /// Bad string length
    #[error("bad string length")]
    BadLength,
    /// Unknown separator between the squares
    #[error("bad separator {0:?}")]
    BadSeparator(char),
    /// Bad source square
    #[error("bad source: {0}")]
    BadSrc(CoordParseError),
    /// Bad destination square
    #[error("bad destination: {0}")]
    BadDst(CoordParseError),
}

/// Error parsing a move and validating it in a position
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ParseError {
    /// Error parsing move
    #[error("cannot parse move: {0}")]
    Parse(#[from] RawParseError),
    /// Move is not valid in the position
    #[error("invalid move: {0}")]
    Validate(#[from] ValidateError),
}

fn split_single(s: &str) -> Result<(&str, &str), RawParseError> {
    if !s.is_ascii() {
        return Err(RawParseError::BadLength);
    }
    match s.len() {
        4 => Ok((&s[..2], &s[2..])),
        5 => match s.as_bytes()[2] {
            b'-' | b'x' | b':' => Ok((&s[..2], &s[3..])),
            sep => Err(RawParseError::BadSeparator(sep as char)),
        },
        _ => Err(RawParseError::BadLength),
    }
}

/// Parses a move from string
///
/// Only the syntax is checked, the resulting move is not validated against any position.
pub fn parse(s: &str) -> Result<base::Move, RawParseError> {
    let mut tokens = s.split_whitespace();
    let (src, dst) = match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(single), None, None) => split_single(single)?,
        (Some(src), Some(dst), None) => (src, dst),
        _ => return Err(RawParseError::BadLength),
    };
    let src = Coord::from_str(src).map_err(RawParseError::BadSrc)?;
    let dst = Coord::from_str(dst).map_err(RawParseError::BadDst)?;
    Ok(base::Move::new(src, dst))
}

/// Parses a move from string and validates it in position `b`
pub fn parse_valid(s: &str, b: &Board) -> Result<base::Move, ParseError> {
    let mv = parse(s)?;
    Ok(b.validate_move(mv.src(), mv.dst())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::IllegalMove;

    #[test]
    fn test_forms() {
        let expected = base::Move::new(Coord::new(5, 2), Coord::new(4, 3));
        for s in ["c3d4", "c3-d4", "c3xd4", "c3:d4", "c3 d4", "  c3   d4 "] {
            assert_eq!(parse(s), Ok(expected), "{}", s);
        }
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse(""), Err(RawParseError::BadLength));
        assert_eq!(parse("c3"), Err(RawParseError::BadLength));
        assert_eq!(parse("c3 d4 e5"), Err(RawParseError::BadLength));
        assert_eq!(parse("c3d4e5"), Err(RawParseError::BadLength));
        assert_eq!(parse("c3→d4"), Err(RawParseError::BadLength));
        assert_eq!(parse("c3/d4"), Err(RawParseError::BadSeparator('/')));
        assert!(matches!(parse("z3d4"), Err(RawParseError::BadSrc(_))));
        assert!(matches!(parse("c3d9"), Err(RawParseError::BadDst(_))));
        assert!(matches!(parse("c3 d44"), Err(RawParseError::BadDst(_))));
    }

    #[test]
    fn test_valid() {
        let b = Board::initial();
        assert_eq!(
            parse_valid("c3-d4", &b),
            Ok(base::Move::new(Coord::new(5, 2), Coord::new(4, 3)))
        );
        assert_eq!(
            parse_valid("c3-c4", &b),
            Err(ParseError::Validate(IllegalMove::NotDiagonal.into()))
        );
    }
}
