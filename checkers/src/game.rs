//! Game controller: turns, forced jumps and game outcome

use crate::board::{Board, DiagramParseError};
use crate::movegen::{self, MoveList};
use crate::moves::{self, notation, IllegalMove, Move, ValidateError};
use crate::types::{Color, Coord, DrawReason, GameStatus, Outcome, WinReason};
use crate::zobrist;

use std::collections::HashMap;

use log::{debug, info, trace};
use thiserror::Error;

/// Error making a move in the game
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum MoveError {
    /// The game is already over
    #[error("game is finished: {0}")]
    Finished(Outcome),
    /// The piece belongs to the side which is not to move
    #[error("it's {expected}'s turn, not {actual}'s")]
    WrongTurn { expected: Color, actual: Color },
    /// The piece which has just jumped must jump again
    #[error("piece at {0} must continue jumping")]
    MustContinueJump(Coord),
    /// A jump is available, so a slide is not allowed
    #[error("capture is available and must be taken")]
    CaptureRequired,
    /// The move is invalid on the board
    #[error("invalid move: {0}")]
    Validate(#[from] ValidateError),
    /// The move cannot be parsed
    #[error("cannot parse move: {0}")]
    Parse(#[from] notation::RawParseError),
}

impl From<IllegalMove> for MoveError {
    fn from(e: IllegalMove) -> Self {
        MoveError::Validate(e.into())
    }
}

/// Error applying a list of moves
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot apply move #{}: {}", .pos + 1, .source)]
pub struct MoveListError {
    pub pos: usize,
    pub source: MoveError,
}

/// Game rules which may vary
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameConfig {
    /// Side which makes the first move
    pub starting_color: Color,
    /// Number of consecutive moves without captures and promotions after which the game
    /// is drawn, zero disables the rule
    pub draw_move_limit: usize,
    /// Number of occurrences of the same position after which the game is drawn
    ///
    /// Values below 2 disable the rule, as the starting position already counts once.
    pub repetition_limit: Option<usize>,
    /// Whether a piece that has just captured must keep jumping while it can
    pub continue_jumps: bool,
    /// Whether a jump must be taken when available
    pub mandatory_capture: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            starting_color: Color::White,
            draw_move_limit: 80,
            repetition_limit: Some(3),
            continue_jumps: true,
            mandatory_capture: true,
        }
    }
}

impl GameConfig {
    pub fn with_starting_color(mut self, color: Color) -> Self {
        self.starting_color = color;
        self
    }

    pub fn with_draw_move_limit(mut self, limit: usize) -> Self {
        self.draw_move_limit = limit;
        self
    }

    pub fn with_repetition_limit(mut self, limit: Option<usize>) -> Self {
        self.repetition_limit = limit;
        self
    }

    pub fn with_continue_jumps(mut self, value: bool) -> Self {
        self.continue_jumps = value;
        self
    }

    pub fn with_mandatory_capture(mut self, value: bool) -> Self {
        self.mandatory_capture = value;
        self
    }
}

/// Everything that happened as a result of an accepted move
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MoveReport {
    /// The move itself
    pub mv: Move,
    /// Side which made the move
    pub side: Color,
    /// Square of the captured piece, if any
    pub captured: Option<Coord>,
    /// Whether the moving piece was crowned
    pub promoted: bool,
    /// Whether the turn passed to the opponent
    ///
    /// It's `false` while the same piece must continue jumping.
    pub turn_passed: bool,
    /// State of the game after the move
    pub status: GameStatus,
}

/// Receives a notification after every move attempt
///
/// A game which is already finished when created reports nothing, check
/// [`BaseGame::status()`] instead.
pub trait Observer {
    fn on_move(&mut self, report: &MoveReport);

    /// Called when a move is rejected, the game is left unchanged
    fn on_reject(&mut self, _err: &MoveError) {}
}

/// Observer that ignores everything
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub struct NilObserver;

impl Observer for NilObserver {
    #[inline]
    fn on_move(&mut self, _report: &MoveReport) {}
}

impl<F: FnMut(&MoveReport)> Observer for F {
    #[inline]
    fn on_move(&mut self, report: &MoveReport) {
        self(report)
    }
}

/// Counts the occurrences of positions
pub trait Repeat: Default {
    fn push(&mut self, hash: u64);
    fn repeat_count(&self, hash: u64) -> usize;
}

#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct HashRepeat(HashMap<u64, usize>);

impl HashRepeat {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Repeat for HashRepeat {
    fn push(&mut self, hash: u64) {
        self.0.entry(hash).and_modify(|x| *x += 1).or_insert(1);
    }

    fn repeat_count(&self, hash: u64) -> usize {
        *self.0.get(&hash).unwrap_or(&0)
    }
}

pub type Game = BaseGame<HashRepeat, NilObserver>;

/// Checkers game
///
/// Owns the board and lets only the side to move make moves. After each move it checks
/// whether the game is over. The game is finished when the side to move has no pieces or
/// no moves left, or when one of the draw rules from [`GameConfig`] applies. Once
/// finished, all the moves are rejected.
///
/// # Example
///
/// ```
/// # use checkers::{Coord, Game, GameStatus};
/// let mut game = Game::new_initial();
/// assert!(game.make_move(Coord::new(5, 0), Coord::new(4, 1)));
/// assert!(!game.make_move(Coord::new(4, 1), Coord::new(3, 2)));
/// assert!(game.try_move_str("f6-e5").is_ok());
/// assert_eq!(game.status(), GameStatus::InProgress);
/// ```
#[derive(Debug, Clone)]
pub struct BaseGame<R: Repeat, O: Observer> {
    board: Board,
    config: GameConfig,
    repeat: R,
    observer: O,
    turn_number: usize,
    quiet_moves: usize,
    pending_jump: Option<Coord>,
    outcome: Option<Outcome>,
}

impl<R: Repeat> BaseGame<R, NilObserver> {
    /// Starts a game on `board`
    pub fn new(board: Board, config: GameConfig) -> Self {
        Self::with_observer(board, config, NilObserver)
    }

    /// Starts a game from the initial position with default rules
    pub fn new_initial() -> Self {
        Self::new(Board::initial(), GameConfig::default())
    }

    /// Starts a game from diagram, see [`Board::from_diagram()`]
    pub fn from_diagram(s: &str, config: GameConfig) -> Result<Self, DiagramParseError> {
        Ok(Self::new(Board::from_diagram(s)?, config))
    }

    /// Starts a game on `board` and applies the moves from `list`
    ///
    /// The moves are separated by whitespace, so each of them must be written as a
    /// single token, like `c3-d4` or `c3d4`.
    pub fn from_move_list(
        board: Board,
        config: GameConfig,
        list: &str,
    ) -> Result<Self, MoveListError> {
        let mut res = Self::new(board, config);
        res.push_move_list(list)?;
        Ok(res)
    }
}

impl<R: Repeat, O: Observer> BaseGame<R, O> {
    /// Starts a game on `board`, reporting every accepted move to `observer`
    pub fn with_observer(board: Board, config: GameConfig, observer: O) -> Self {
        let mut res = BaseGame {
            board,
            config,
            repeat: R::default(),
            observer,
            turn_number: 0,
            quiet_moves: 0,
            pending_jump: None,
            outcome: None,
        };
        let side = res.side();
        let hash = res.position_hash(side);
        res.repeat.push(hash);
        res.outcome = res.calc_outcome(side);
        res
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    #[inline]
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Number of completed turns
    ///
    /// A turn consists of one move, or of several jumps made by the same piece.
    #[inline]
    pub fn turn_number(&self) -> usize {
        self.turn_number
    }

    /// Returns the side which makes the turn with number `turn_number`
    ///
    /// Turns are numbered from zero, and the sides alternate starting from
    /// [`GameConfig::starting_color`].
    pub fn get_turn(&self, turn_number: usize) -> Color {
        match turn_number % 2 {
            0 => self.config.starting_color,
            _ => self.config.starting_color.inv(),
        }
    }

    /// Returns the side to move
    #[inline]
    pub fn side(&self) -> Color {
        self.get_turn(self.turn_number)
    }

    /// Returns the square of the piece which must continue jumping, if any
    #[inline]
    pub fn pending_jump(&self) -> Option<Coord> {
        self.pending_jump
    }

    /// Number of consecutive moves without captures and promotions
    #[inline]
    pub fn quiet_moves(&self) -> usize {
        self.quiet_moves
    }

    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        GameStatus::from(self.outcome)
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    fn position_hash(&self, side: Color) -> u64 {
        self.board.zobrist_hash() ^ zobrist::side(side)
    }

    /// Returns `true` if `defending` has lost, i.e. it has no pieces or no valid moves
    pub fn win_condition(&self, defending: Color) -> bool {
        self.board.piece_count(defending) == 0 || !self.board.has_legal_moves(defending)
    }

    /// Returns `true` if the game is drawn with `defending` to move
    pub fn tie(&self, defending: Color) -> bool {
        self.draw_reason(defending).is_some()
    }

    fn draw_reason(&self, defending: Color) -> Option<DrawReason> {
        let limit = self.config.draw_move_limit;
        if limit != 0 && self.quiet_moves >= limit {
            return Some(DrawReason::NoProgress);
        }
        if let Some(limit) = self.config.repetition_limit.filter(|&l| l >= 2) {
            if self.repeat.repeat_count(self.position_hash(defending)) >= limit {
                return Some(DrawReason::Repetition);
            }
        }
        None
    }

    /// Calculates the outcome with `defending` to move
    ///
    /// Wins are checked before draws.
    pub fn calc_outcome(&self, defending: Color) -> Option<Outcome> {
        if self.win_condition(defending) {
            let reason = match self.board.piece_count(defending) {
                0 => WinReason::NoPieces,
                _ => WinReason::NoMoves,
            };
            return Some(Outcome::Win {
                side: defending.inv(),
                reason,
            });
        }
        self.draw_reason(defending).map(Outcome::Draw)
    }

    /// Returns all the moves the side to move is allowed to make
    ///
    /// This takes pending jumps and forced captures into account.
    pub fn legal_moves(&self) -> MoveList {
        if self.is_finished() {
            return MoveList::new();
        }
        if let Some(src) = self.pending_jump {
            return movegen::gen_from(&self.board, src, true);
        }
        let side = self.side();
        if self.config.mandatory_capture {
            let captures = movegen::gen_captures(&self.board, side);
            if !captures.is_empty() {
                return captures;
            }
        }
        movegen::gen_all(&self.board, side)
    }

    fn check_move(&self, from: Coord, to: Coord) -> Result<Move, MoveError> {
        if let Some(outcome) = self.outcome {
            return Err(MoveError::Finished(outcome));
        }
        let side = self.side();
        if let Some(piece) = self.board.piece(from) {
            if piece.color() != side {
                return Err(MoveError::WrongTurn {
                    expected: side,
                    actual: piece.color(),
                });
            }
        }
        if let Some(src) = self.pending_jump {
            if src != from {
                return Err(MoveError::MustContinueJump(src));
            }
        }
        let mv = self.board.validate_move(from, to)?;
        if !mv.is_jump() {
            if let Some(src) = self.pending_jump {
                return Err(MoveError::MustContinueJump(src));
            }
            if self.config.mandatory_capture && movegen::has_captures(&self.board, side) {
                return Err(MoveError::CaptureRequired);
            }
        }
        Ok(mv)
    }

    /// Makes the move from `from` to `to` on behalf of the side to move
    ///
    /// On error, nothing is changed.
    pub fn try_move(&mut self, from: Coord, to: Coord) -> Result<MoveReport, MoveError> {
        let mv = match self.check_move(from, to) {
            Ok(mv) => mv,
            Err(e) => {
                trace!("game rejected move {}: {}", Move::new(from, to), e);
                self.observer.on_reject(&e);
                return Err(e);
            }
        };

        let side = self.side();
        let effect = moves::make_move_unchecked(&mut self.board, mv);
        if effect.captured.is_some() || effect.promoted {
            self.quiet_moves = 0;
        } else {
            self.quiet_moves += 1;
        }

        let continues = self.config.continue_jumps
            && effect.captured.is_some()
            && !effect.promoted
            && movegen::can_jump_from(&self.board, mv.dst());
        if continues {
            debug!("{} must continue jumping from {}", side, mv.dst());
            self.pending_jump = Some(mv.dst());
        } else {
            self.pending_jump = None;
            self.turn_number += 1;
            let next = self.side();
            let hash = self.position_hash(next);
            self.repeat.push(hash);
            self.outcome = self.calc_outcome(next);
            if let Some(outcome) = self.outcome {
                info!("game finished after {} turns: {}", self.turn_number, outcome);
            }
        }

        let report = MoveReport {
            mv,
            side,
            captured: effect.captured,
            promoted: effect.promoted,
            turn_passed: !continues,
            status: self.status(),
        };
        self.observer.on_move(&report);
        Ok(report)
    }

    /// Makes the move from `from` to `to` and returns `true` if it was accepted
    pub fn make_move(&mut self, from: Coord, to: Coord) -> bool {
        self.try_move(from, to).is_ok()
    }

    /// Parses the move from text and makes it
    ///
    /// See [`notation`](crate::moves::notation) for the accepted formats.
    pub fn try_move_str(&mut self, s: &str) -> Result<MoveReport, MoveError> {
        let mv = notation::parse(s)?;
        self.try_move(mv.src(), mv.dst())
    }

    /// Applies the moves from `list`, separated by whitespace
    ///
    /// Stops at the first rejected move, the moves before it stay applied.
    pub fn push_move_list(&mut self, list: &str) -> Result<(), MoveListError> {
        for (pos, token) in list.split_whitespace().enumerate() {
            self.try_move_str(token)
                .map_err(|source| MoveListError { pos, source })?;
        }
        Ok(())
    }
}
