use crate::types::Color;

/// The four diagonal directions as `(delta_row, delta_col)`
pub const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Row delta of a forward step for pieces of color `c`
pub const fn forward_delta(c: Color) -> i8 {
    match c {
        Color::White => -1,
        Color::Black => 1,
    }
}

/// Row on which regular pieces of color `c` get crowned
pub const fn crown_row(c: Color) -> i8 {
    match c {
        Color::White => 0,
        Color::Black => 7,
    }
}

/// First and last row of the initial placement for color `c`
pub const fn home_rows(c: Color) -> (i8, i8) {
    match c {
        Color::White => (5, 7),
        Color::Black => (0, 2),
    }
}
