//! Core types

pub use checkers_base::types::*;

use std::fmt;

/// Reason for a game won by one of the sides
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum WinReason {
    /// The losing side has no pieces left on the board
    NoPieces,
    /// The losing side has pieces, but none of them can move
    NoMoves,
}

/// Reason for a drawn game
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DrawReason {
    /// Too many consecutive moves without a capture or a promotion
    NoProgress,
    /// The same position with the same side to move occurred too many times
    Repetition,
}

/// Final result of the game
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// One of the sides won
    Win {
        /// Winning side
        side: Color,
        /// Why the game ended
        reason: WinReason,
    },
    /// The game ended in a draw
    Draw(DrawReason),
}

impl Outcome {
    /// Returns the winning side, or `None` for a draw
    pub fn winner(&self) -> Option<Color> {
        match self {
            Self::Win { side, .. } => Some(*side),
            Self::Draw(_) => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Self::Win { side, reason } => {
                let why = match reason {
                    WinReason::NoPieces => "opponent has no pieces left",
                    WinReason::NoMoves => "opponent has no legal moves",
                };
                write!(f, "{} wins, {}", side, why)
            }
            Self::Draw(DrawReason::NoProgress) => {
                write!(f, "draw, no captures or promotions for too long")
            }
            Self::Draw(DrawReason::Repetition) => write!(f, "draw by repetition"),
        }
    }
}

/// State of the game as seen by the front end
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GameStatus {
    #[default]
    InProgress,
    WonByWhite,
    WonByBlack,
    Tied,
}

impl GameStatus {
    pub fn is_finished(&self) -> bool {
        *self != GameStatus::InProgress
    }
}

impl From<Outcome> for GameStatus {
    fn from(outcome: Outcome) -> Self {
        match outcome.winner() {
            Some(Color::White) => GameStatus::WonByWhite,
            Some(Color::Black) => GameStatus::WonByBlack,
            None => GameStatus::Tied,
        }
    }
}

impl From<Option<Outcome>> for GameStatus {
    fn from(outcome: Option<Outcome>) -> Self {
        outcome.map(GameStatus::from).unwrap_or_default()
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        let s = match self {
            GameStatus::InProgress => "in progress",
            GameStatus::WonByWhite => "won by White",
            GameStatus::WonByBlack => "won by Black",
            GameStatus::Tied => "tied",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status() {
        assert_eq!(GameStatus::from(None), GameStatus::InProgress);
        assert_eq!(
            GameStatus::from(Some(Outcome::Win {
                side: Color::Black,
                reason: WinReason::NoMoves
            })),
            GameStatus::WonByBlack
        );
        assert_eq!(
            GameStatus::from(Outcome::Draw(DrawReason::Repetition)),
            GameStatus::Tied
        );
        assert!(!GameStatus::InProgress.is_finished());
        assert!(GameStatus::Tied.is_finished());
    }

    #[test]
    fn test_outcome_str() {
        let outcome = Outcome::Win {
            side: Color::White,
            reason: WinReason::NoPieces,
        };
        assert_eq!(outcome.to_string(), "White wins, opponent has no pieces left");
        assert_eq!(outcome.winner(), Some(Color::White));
        assert_eq!(Outcome::Draw(DrawReason::NoProgress).winner(), None);
    }
}
