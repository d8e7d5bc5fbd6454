use crate::bitboard::Bitboard;
use crate::types::Color;

/// Squares with odd `row + col`, the only ones where pieces stand
pub const DARK: Bitboard = Bitboard::from_raw(0x55aa55aa55aa55aa);
pub const LIGHT: Bitboard = Bitboard::from_raw(0xaa55aa55aa55aa55);

pub const ROWS: [Bitboard; 8] = [
    Bitboard::from_raw(0x00000000000000ff),
    Bitboard::from_raw(0x000000000000ff00),
    Bitboard::from_raw(0x0000000000ff0000),
    Bitboard::from_raw(0x00000000ff000000),
    Bitboard::from_raw(0x000000ff00000000),
    Bitboard::from_raw(0x0000ff0000000000),
    Bitboard::from_raw(0x00ff000000000000),
    Bitboard::from_raw(0xff00000000000000),
];

pub const WHITE_HOME: Bitboard = Bitboard::from_raw(0x55aa550000000000);
pub const BLACK_HOME: Bitboard = Bitboard::from_raw(0x0000000000aa55aa);

pub const fn home(c: Color) -> Bitboard {
    match c {
        Color::White => WHITE_HOME,
        Color::Black => BLACK_HOME,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry;
    use crate::types::Coord;

    #[test]
    fn test_dark() {
        for coord in Coord::iter() {
            assert_eq!(DARK.has(coord), coord.is_dark());
            assert_eq!(LIGHT.has(coord), !coord.is_dark());
        }
    }

    #[test]
    fn test_rows() {
        for (row, bb) in ROWS.iter().enumerate() {
            for coord in *bb {
                assert_eq!(coord.row() as usize, row);
            }
            assert_eq!(bb.popcount(), 8);
        }
    }

    #[test]
    fn test_home() {
        for c in [Color::White, Color::Black] {
            let (lo, hi) = geometry::home_rows(c);
            let mut expected = Bitboard::EMPTY;
            for row in lo..=hi {
                expected |= ROWS[row as usize] & DARK;
            }
            assert_eq!(home(c), expected);
            assert_eq!(home(c).popcount(), 12);
        }
    }
}
