//! The 8x8 board grid.

use crate::{Color, Piece, Square};

/// An 8x8 mailbox board mapping each square to an optional piece.
///
/// Row 0 is Black's back rank. The grid is a plain value; the rules
/// engine clones it and edits the clone rather than mutating a shared
/// board, so snapshots for move simulation are a `Clone` away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: [[Option<(Piece, Color)>; 8]; 8],
}

impl Board {
    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        Board {
            grid: [[None; 8]; 8],
        }
    }

    /// Creates the standard starting position.
    pub fn standard() -> Self {
        const BACK: [Piece; 8] = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];

        let mut board = Board::empty();
        for (col, &piece) in BACK.iter().enumerate() {
            board.grid[0][col] = Some((piece, Color::Black));
            board.grid[1][col] = Some((Piece::Pawn, Color::Black));
            board.grid[6][col] = Some((Piece::Pawn, Color::White));
            board.grid[7][col] = Some((piece, Color::White));
        }
        board
    }

    /// Returns the piece and color at the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        self.grid[sq.row() as usize][sq.col() as usize]
    }

    /// Returns true if the square holds no piece.
    #[inline]
    pub fn is_empty_at(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    /// Places a piece on a square, replacing any previous occupant.
    #[inline]
    pub fn place(&mut self, sq: Square, piece: Piece, color: Color) {
        self.grid[sq.row() as usize][sq.col() as usize] = Some((piece, color));
    }

    /// Removes and returns the piece on a square.
    #[inline]
    pub fn remove(&mut self, sq: Square) -> Option<(Piece, Color)> {
        self.grid[sq.row() as usize][sq.col() as usize].take()
    }

    /// Finds the king of the given color, if present.
    ///
    /// Absence is tolerated (test positions may omit a king); callers
    /// treat a missing king as "not in check".
    pub fn king_square(&self, color: Color) -> Option<Square> {
        Square::all().find(|&sq| self.piece_at(sq) == Some((Piece::King, color)))
    }

    /// Iterates over all occupied squares with their pieces.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece, Color)> + '_ {
        Square::all().filter_map(|sq| {
            self.piece_at(sq)
                .map(|(piece, color)| (sq, piece, color))
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_layout() {
        let board = Board::standard();
        assert_eq!(
            board.piece_at(Square::E1),
            Some((Piece::King, Color::White))
        );
        assert_eq!(
            board.piece_at(Square::E8),
            Some((Piece::King, Color::Black))
        );
        assert_eq!(
            board.piece_at(Square::A1),
            Some((Piece::Rook, Color::White))
        );
        assert_eq!(
            board.piece_at(Square::from_algebraic("d8").unwrap()),
            Some((Piece::Queen, Color::Black))
        );
        assert_eq!(
            board.piece_at(Square::from_algebraic("e2").unwrap()),
            Some((Piece::Pawn, Color::White))
        );
        assert!(board.is_empty_at(Square::from_algebraic("e4").unwrap()));
    }

    #[test]
    fn standard_piece_count() {
        let board = Board::standard();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(
            board
                .pieces()
                .filter(|&(_, p, c)| p == Piece::Pawn && c == Color::White)
                .count(),
            8
        );
    }

    #[test]
    fn place_and_remove() {
        let mut board = Board::empty();
        let e4 = Square::from_algebraic("e4").unwrap();
        board.place(e4, Piece::Queen, Color::White);
        assert_eq!(board.piece_at(e4), Some((Piece::Queen, Color::White)));
        assert_eq!(board.remove(e4), Some((Piece::Queen, Color::White)));
        assert!(board.is_empty_at(e4));
        assert_eq!(board.remove(e4), None);
    }

    #[test]
    fn king_square() {
        let board = Board::standard();
        assert_eq!(board.king_square(Color::White), Some(Square::E1));
        assert_eq!(board.king_square(Color::Black), Some(Square::E8));
        assert_eq!(Board::empty().king_square(Color::White), None);
    }
}
