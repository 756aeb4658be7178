//! Attack detection.
//!
//! This module answers "is this square attacked?" with its own per-piece
//! geometry instead of routing through [`check_legality`]. Attack scans
//! ignore the attacker's own king safety, and keeping them on a separate
//! code path avoids the mutual recursion a shared validator would cause
//! through the self-check exclusion.
//!
//! [`check_legality`]: crate::check_legality

use chess_model::{Board, Color, Piece, Square};

/// Knight displacement table.
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// The eight directions around a square (also the queen's ray directions).
const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Returns true if any piece of `by` attacks `square`.
///
/// Pawns count only their diagonal capture pattern, never the push.
pub fn is_square_attacked(board: &Board, square: Square, by: Color) -> bool {
    // Pawn attacks: a pawn one row behind (in its direction of travel)
    // and one column aside reaches this square diagonally.
    let dir = by.pawn_direction();
    for d_col in [-1, 1] {
        if let Some(origin) = square.offset(-dir, d_col) {
            if board.piece_at(origin) == Some((Piece::Pawn, by)) {
                return true;
            }
        }
    }

    for (d_row, d_col) in KNIGHT_JUMPS {
        if let Some(origin) = square.offset(d_row, d_col) {
            if board.piece_at(origin) == Some((Piece::Knight, by)) {
                return true;
            }
        }
    }

    for (d_row, d_col) in KING_STEPS {
        if let Some(origin) = square.offset(d_row, d_col) {
            if board.piece_at(origin) == Some((Piece::King, by)) {
                return true;
            }
        }
    }

    // Sliders: walk each ray until the first occupied square.
    slider_on_ray(board, square, by, &ORTHOGONAL, Piece::Rook)
        || slider_on_ray(board, square, by, &DIAGONAL, Piece::Bishop)
}

fn slider_on_ray(
    board: &Board,
    square: Square,
    by: Color,
    directions: &[(i8, i8); 4],
    slider: Piece,
) -> bool {
    for &(d_row, d_col) in directions {
        let mut current = square;
        while let Some(next) = current.offset(d_row, d_col) {
            match board.piece_at(next) {
                None => current = next,
                Some((piece, color)) => {
                    if color == by && (piece == slider || piece == Piece::Queen) {
                        return true;
                    }
                    break;
                }
            }
        }
    }
    false
}

/// Returns true if `color`'s king is attacked.
///
/// A board without that king reports no check, so malformed or reduced
/// test positions stay usable.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    match board.king_square(color) {
        Some(king) => is_square_attacked(board, king, color.opposite()),
        None => false,
    }
}
