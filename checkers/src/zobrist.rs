use crate::types::{Cell, Color, Coord};

include!(concat!(env!("OUT_DIR"), "/zobrist.rs"));

pub fn pieces(cell: Cell, coord: Coord) -> u64 {
    PIECES[cell.index()][coord.index()]
}

/// Hash contribution of the side to move
pub fn side(c: Color) -> u64 {
    match c {
        Color::White => MOVE_SIDE,
        Color::Black => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn test_distinct() {
        let cells = Cell::iter().skip(1).collect::<Vec<_>>();
        assert_eq!(pieces(Cell::EMPTY, Coord::new(0, 1)), 0);
        for coord in Coord::iter() {
            for (i, a) in cells.iter().enumerate() {
                assert_ne!(pieces(*a, coord), 0);
                for b in &cells[i + 1..] {
                    assert_ne!(pieces(*a, coord), pieces(*b, coord));
                }
            }
        }
        let man = Cell::from_parts(Color::White, PieceKind::Regular);
        assert_ne!(pieces(man, Coord::new(5, 0)), pieces(man, Coord::new(4, 1)));
    }
}
