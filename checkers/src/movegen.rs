//! Move generation
//!
//! Candidate moves are taken from the directions of each piece and then checked with
//! [`Board::validate_move()`], so the generator never disagrees with the validator.

use crate::board::Board;
use crate::moves::Move;
use crate::piece::MAX_MOVE_LENGTH;
use crate::types::{Color, Coord};

use std::convert::Infallible;
use std::ops::{Deref, DerefMut};
use std::slice;

use arrayvec::ArrayVec;

/// Upper bound for the number of moves one side can have
///
/// Twelve crowned pieces with four directions and two distances each give 96 moves.
pub const MAX_MOVES: usize = 128;

trait MaybeMovePush {
    type Err;

    fn push(&mut self, m: Move) -> Result<(), Self::Err>;
}

#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct MoveList(ArrayVec<Move, MAX_MOVES>);

impl Deref for MoveList {
    type Target = ArrayVec<Move, MAX_MOVES>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for MoveList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl MoveList {
    pub fn new() -> MoveList {
        MoveList(ArrayVec::new())
    }
}

pub trait MovePush {
    fn push(&mut self, m: Move);
}

impl<const N: usize> MovePush for ArrayVec<Move, N> {
    fn push(&mut self, m: Move) {
        self.push(m);
    }
}

impl MovePush for MoveList {
    fn push(&mut self, m: Move) {
        self.0.push(m);
    }
}

impl MovePush for Vec<Move> {
    fn push(&mut self, m: Move) {
        self.push(m);
    }
}

impl<T: MovePush> MaybeMovePush for T {
    type Err = Infallible;

    fn push(&mut self, m: Move) -> Result<(), Self::Err> {
        <Self as MovePush>::push(self, m);
        Ok(())
    }
}

/// Stops the generation as soon as the first move is found
struct Found;

struct Probe;

impl MaybeMovePush for Probe {
    type Err = Found;

    fn push(&mut self, _m: Move) -> Result<(), Self::Err> {
        Err(Found)
    }
}

struct MoveGenImpl<'a, P> {
    board: &'a Board,
    dst: &'a mut P,
}

impl<'a, P: MaybeMovePush> MoveGenImpl<'a, P> {
    fn new(board: &'a Board, dst: &'a mut P) -> Self {
        MoveGenImpl { board, dst }
    }

    fn gen_from<const SLIDES: bool, const JUMPS: bool>(
        &mut self,
        src: Coord,
    ) -> Result<(), P::Err> {
        let piece = match self.board.piece(src) {
            Some(piece) => piece,
            None => return Ok(()),
        };
        for &(d_row, d_col) in piece.directions() {
            for len in 1..=MAX_MOVE_LENGTH as i8 {
                let wanted = if len == 1 { SLIDES } else { JUMPS };
                if !wanted {
                    continue;
                }
                let dst = src.shift(d_row * len, d_col * len);
                if let Ok(mv) = self.board.validate_move(src, dst) {
                    self.dst.push(mv)?;
                }
            }
        }
        Ok(())
    }

    fn gen_color<const SLIDES: bool, const JUMPS: bool>(
        &mut self,
        c: Color,
    ) -> Result<(), P::Err> {
        for src in self.board.color(c) {
            self.gen_from::<SLIDES, JUMPS>(src)?;
        }
        Ok(())
    }
}

fn gen_into<P: MovePush, const SLIDES: bool, const JUMPS: bool>(b: &Board, c: Color, dst: &mut P) {
    let _ = MoveGenImpl::new(b, dst).gen_color::<SLIDES, JUMPS>(c);
}

/// Generates all valid moves for the pieces of color `c` into `dst`
pub fn gen_all_into<P: MovePush>(b: &Board, c: Color, dst: &mut P) {
    gen_into::<P, true, true>(b, c, dst);
}

/// Generates all jumps for the pieces of color `c` into `dst`
pub fn gen_captures_into<P: MovePush>(b: &Board, c: Color, dst: &mut P) {
    gen_into::<P, false, true>(b, c, dst);
}

/// Returns all valid moves for the pieces of color `c`
pub fn gen_all(b: &Board, c: Color) -> MoveList {
    let mut res = MoveList::new();
    gen_all_into(b, c, &mut res);
    res
}

/// Returns all jumps for the pieces of color `c`
pub fn gen_captures(b: &Board, c: Color) -> MoveList {
    let mut res = MoveList::new();
    gen_captures_into(b, c, &mut res);
    res
}

/// Returns all valid moves for the piece at `src`
///
/// If `jumps_only` is set, only jumps are returned.
pub fn gen_from(b: &Board, src: Coord, jumps_only: bool) -> MoveList {
    let mut res = MoveList::new();
    let mut imp = MoveGenImpl::new(b, &mut res);
    let _ = match jumps_only {
        true => imp.gen_from::<false, true>(src),
        false => imp.gen_from::<true, true>(src),
    };
    res
}

/// Returns `true` if any piece of color `c` can move
pub fn has_legal_moves(b: &Board, c: Color) -> bool {
    MoveGenImpl::new(b, &mut Probe)
        .gen_color::<true, true>(c)
        .is_err()
}

/// Returns `true` if any piece of color `c` can jump
pub fn has_captures(b: &Board, c: Color) -> bool {
    MoveGenImpl::new(b, &mut Probe)
        .gen_color::<false, true>(c)
        .is_err()
}

/// Returns `true` if the piece at `src` can jump
pub fn can_jump_from(b: &Board, src: Coord) -> bool {
    MoveGenImpl::new(b, &mut Probe)
        .gen_from::<false, true>(src)
        .is_err()
}
