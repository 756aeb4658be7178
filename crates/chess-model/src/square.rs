//! Board square representation.

use std::fmt;

/// A square on the chess board, addressed by (row, column).
///
/// Row 0 is Black's back rank and row 7 is White's back rank, matching
/// the orientation of the standard board layout. Columns run left to
/// right from White's perspective, so column 0 is the a-file.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Creates a square, rejecting out-of-range coordinates.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Square { row, col })
        } else {
            None
        }
    }

    /// Returns the square displaced by (d_row, d_col), if still on the board.
    #[inline]
    pub const fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        if row >= 0 && row < 8 && col >= 0 && col < 8 {
            Some(Square {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return None;
        }
        // Rank 8 is row 0.
        Some(Square {
            row: b'8' - rank,
            col: file - b'a',
        })
    }

    /// Returns the row (0-7, 0 is Black's back rank).
    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Returns the column (0-7, 0 is the a-file).
    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!(
            "{}{}",
            (b'a' + self.col) as char,
            (b'8' - self.row) as char
        )
    }

    /// Iterates over all 64 squares, row by row from Black's back rank.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Square { row, col }))
    }

    // White's back rank (row 7).
    pub const A1: Square = Square { row: 7, col: 0 };
    pub const C1: Square = Square { row: 7, col: 2 };
    pub const D1: Square = Square { row: 7, col: 3 };
    pub const E1: Square = Square { row: 7, col: 4 };
    pub const F1: Square = Square { row: 7, col: 5 };
    pub const G1: Square = Square { row: 7, col: 6 };
    pub const H1: Square = Square { row: 7, col: 7 };
    // Black's back rank (row 0).
    pub const A8: Square = Square { row: 0, col: 0 };
    pub const C8: Square = Square { row: 0, col: 2 };
    pub const D8: Square = Square { row: 0, col: 3 };
    pub const E8: Square = Square { row: 0, col: 4 };
    pub const F8: Square = Square { row: 0, col: 5 };
    pub const G8: Square = Square { row: 0, col: 6 };
    pub const H8: Square = Square { row: 0, col: 7 };
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn square_new_bounds() {
        assert!(Square::new(0, 0).is_some());
        assert!(Square::new(7, 7).is_some());
        assert!(Square::new(8, 0).is_none());
        assert!(Square::new(0, 8).is_none());
    }

    #[test]
    fn square_from_algebraic() {
        assert_eq!(Square::from_algebraic("a1"), Some(Square::A1));
        assert_eq!(Square::from_algebraic("e1"), Some(Square::E1));
        assert_eq!(Square::from_algebraic("h8"), Some(Square::H8));
        assert_eq!(Square::from_algebraic("e4"), Square::new(4, 4));
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("a9"), None);
        assert_eq!(Square::from_algebraic(""), None);
    }

    #[test]
    fn square_orientation() {
        // Row 0 is rank 8 (Black's back rank), row 7 is rank 1.
        assert_eq!(Square::A8.row(), 0);
        assert_eq!(Square::A1.row(), 7);
        assert_eq!(Square::H1.col(), 7);
    }

    #[test]
    fn square_offset() {
        let e4 = Square::from_algebraic("e4").unwrap();
        assert_eq!(e4.offset(-1, 0), Square::from_algebraic("e5"));
        assert_eq!(e4.offset(1, 1), Square::from_algebraic("f3"));
        assert_eq!(Square::A1.offset(1, 0), None);
        assert_eq!(Square::H8.offset(0, 1), None);
    }

    #[test]
    fn square_all_covers_board() {
        let squares: Vec<Square> = Square::all().collect();
        assert_eq!(squares.len(), 64);
        assert_eq!(squares[0], Square::A8);
        assert_eq!(squares[63], Square::H1);
    }

    proptest! {
        #[test]
        fn algebraic_roundtrip(row in 0u8..8, col in 0u8..8) {
            let sq = Square::new(row, col).unwrap();
            prop_assert_eq!(Square::from_algebraic(&sq.to_algebraic()), Some(sq));
        }
    }
}
