//! Applying moves of different origin to a board

use super::base::{self, Effect, Move, ValidateError};
use super::notation;
use crate::board::Board;

/// Something that can be made as a move on the board
pub trait Make {
    type Err;

    /// Makes the move on `board` in place
    ///
    /// On error, the board is left untouched.
    fn make_raw(&self, board: &mut Board) -> Result<(Move, Effect), Self::Err>;

    /// Returns a new board with the move made
    fn make(&self, board: &Board) -> Result<Board, Self::Err> {
        let mut cloned = board.clone();
        let _ = self.make_raw(&mut cloned)?;
        Ok(cloned)
    }
}

impl Make for Move {
    type Err = ValidateError;

    #[inline]
    fn make_raw(&self, board: &mut Board) -> Result<(Move, Effect), Self::Err> {
        let mv = base::validate(board, self.src(), self.dst())?;
        Ok((mv, base::make_move_unchecked(board, mv)))
    }
}

/// Move in text form, see [`notation`] for the syntax
pub struct Notation<S: AsRef<str>>(pub S);

impl<S: AsRef<str>> Make for Notation<S> {
    type Err = notation::ParseError;

    #[inline]
    fn make_raw(&self, board: &mut Board) -> Result<(Move, Effect), Self::Err> {
        let mv = notation::parse_valid(self.0.as_ref(), board)?;
        Ok((mv, base::make_move_unchecked(board, mv)))
    }
}
