//! # Checkers rules engine
//!
//! This crate keeps the state of a checkers game on the standard 8x8 board, validates moves
//! and applies them, and decides when the game is over.
//!
//! The main types are:
//!
//! - [`Board`], the squares with their pieces, together with the move history and the
//!   captured pieces. It knows the movement rules, but not whose turn it is.
//! - [`Game`], which owns the board, lets the sides move in turn, enforces forced and
//!   continued jumps, and detects wins and draws.
//!
//! Coordinates are `(row, col)` pairs, where row 0 is the top of the board (rank 8 in
//! algebraic notation) and column 0 is the file `a`. White starts at the bottom and moves
//! up, Black starts at the top and moves down.
//!
//! # Example
//!
//! ```
//! use checkers::{Color, Coord, Game, GameStatus, MoveError};
//!
//! let mut game = Game::new_initial();
//! game.try_move(Coord::new(5, 2), Coord::new(4, 3)).unwrap();
//! game.try_move_str("f6-e5").unwrap();
//!
//! // White must capture now
//! assert_eq!(game.try_move_str("a3-b4"), Err(MoveError::CaptureRequired));
//! let report = game.try_move_str("d4xf6").unwrap();
//! assert_eq!(report.captured, Some(Coord::new(3, 4)));
//! assert_eq!(game.side(), Color::Black);
//! assert_eq!(game.status(), GameStatus::InProgress);
//! ```

pub mod board;
pub mod game;
pub mod movegen;
pub mod moves;
pub mod piece;
pub mod types;

mod zobrist;

pub use checkers_base::{bitboard, bitboard_consts, geometry};

pub use bitboard::Bitboard;
pub use board::{Board, PrettyStyle};
pub use game::{Game, GameConfig, MoveError, MoveReport, Observer};
pub use moves::{IllegalMove, Make, Move, ValidateError};
pub use piece::Piece;
pub use types::{Cell, Color, Coord, DrawReason, GameStatus, Outcome, PieceKind, WinReason};
