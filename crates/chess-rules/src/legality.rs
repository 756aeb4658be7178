//! Move legality checking.
//!
//! [`check_legality`] is the single entry point the session and hosts use
//! to vet a candidate move. It applies the per-piece movement rules, then
//! simulates the accepted move on a scratch board and rejects it if the
//! mover's own king would be left attacked. Rejection is an ordinary
//! `None`, not an error: most candidate squares are simply not legal
//! destinations.

use crate::apply::successor_board;
use crate::attacks::{is_in_check, is_square_attacked};
use chess_model::{Board, CastlingCols, Color, GameState, Piece, Square};

/// How an accepted move affects the board beyond the from→to relocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// Plain relocation; any occupant of the destination is captured.
    Normal,
    /// Pawn two-square advance; sets the en-passant target for one reply.
    DoublePush,
    /// King two-column move; the rook on the given columns moves too.
    Castling(CastlingCols),
    /// Pawn diagonal onto the en-passant target; the passed pawn is removed.
    EnPassant,
}

/// A positively vetted move, carrying what the caller needs to apply it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegalMove {
    pub kind: MoveKind,
    /// True if the move reaches the farthest rank and the host must
    /// supply a promotion choice before applying.
    pub needs_promotion: bool,
}

impl LegalMove {
    const fn normal() -> Self {
        LegalMove {
            kind: MoveKind::Normal,
            needs_promotion: false,
        }
    }
}

/// Checks whether moving the piece on `from` to `to` is legal.
///
/// Returns `None` for an empty origin, a same-color destination, a
/// movement-rule violation, or a move that would leave the mover's own
/// king in check. The returned [`LegalMove`] feeds
/// [`apply_move`](crate::apply_move).
pub fn check_legality(
    board: &Board,
    from: Square,
    to: Square,
    state: &GameState,
) -> Option<LegalMove> {
    if from == to {
        return None;
    }
    let (piece, color) = board.piece_at(from)?;
    if let Some((_, occupant)) = board.piece_at(to) {
        if occupant == color {
            return None;
        }
    }

    let candidate = match piece {
        Piece::Pawn => pawn_move(board, from, to, color, state)?,
        Piece::Knight => knight_move(from, to)?,
        Piece::Bishop => diagonal_move(board, from, to)?,
        Piece::Rook => straight_move(board, from, to)?,
        Piece::Queen => diagonal_move(board, from, to).or_else(|| straight_move(board, from, to))?,
        Piece::King => king_move(board, from, to, color, state)?,
    };

    // Self-check exclusion, evaluated last: play the move on a scratch
    // board and re-run check detection for the mover.
    let scratch = successor_board(board, from, to, candidate.kind, None);
    if is_in_check(&scratch, color) {
        return None;
    }

    Some(candidate)
}

fn pawn_move(
    board: &Board,
    from: Square,
    to: Square,
    color: Color,
    state: &GameState,
) -> Option<LegalMove> {
    let dir = color.pawn_direction();
    let d_row = to.row() as i8 - from.row() as i8;
    let d_col = to.col() as i8 - from.col() as i8;
    let promotes = to.row() == color.promotion_row();

    // Single push onto an empty square.
    if d_col == 0 && d_row == dir && board.is_empty_at(to) {
        return Some(LegalMove {
            kind: MoveKind::Normal,
            needs_promotion: promotes,
        });
    }

    // Double push from the home rank through two empty squares.
    if d_col == 0 && d_row == 2 * dir && from.row() == color.pawn_row() {
        let midway = from.offset(dir, 0)?;
        if board.is_empty_at(midway) && board.is_empty_at(to) {
            return Some(LegalMove {
                kind: MoveKind::DoublePush,
                needs_promotion: false,
            });
        }
    }

    // Diagonal step: capture, or en passant onto the target square.
    if d_col.abs() == 1 && d_row == dir {
        if board.piece_at(to).is_some() {
            // Same-color occupants were already rejected by the caller.
            return Some(LegalMove {
                kind: MoveKind::Normal,
                needs_promotion: promotes,
            });
        }
        if state.en_passant == Some(to) {
            return Some(LegalMove {
                kind: MoveKind::EnPassant,
                needs_promotion: false,
            });
        }
    }

    None
}

fn knight_move(from: Square, to: Square) -> Option<LegalMove> {
    let d_row = (to.row() as i8 - from.row() as i8).abs();
    let d_col = (to.col() as i8 - from.col() as i8).abs();
    if (d_row == 2 && d_col == 1) || (d_row == 1 && d_col == 2) {
        Some(LegalMove::normal())
    } else {
        None
    }
}

fn diagonal_move(board: &Board, from: Square, to: Square) -> Option<LegalMove> {
    let d_row = (to.row() as i8 - from.row() as i8).abs();
    let d_col = (to.col() as i8 - from.col() as i8).abs();
    if d_row != d_col || d_row == 0 {
        return None;
    }
    path_is_clear(board, from, to).then_some(LegalMove::normal())
}

fn straight_move(board: &Board, from: Square, to: Square) -> Option<LegalMove> {
    if (from.row() == to.row()) == (from.col() == to.col()) {
        return None;
    }
    path_is_clear(board, from, to).then_some(LegalMove::normal())
}

fn king_move(
    board: &Board,
    from: Square,
    to: Square,
    color: Color,
    state: &GameState,
) -> Option<LegalMove> {
    let d_row = (to.row() as i8 - from.row() as i8).abs();
    let d_col = (to.col() as i8 - from.col() as i8).abs();

    if d_row <= 1 && d_col <= 1 {
        return Some(LegalMove::normal());
    }

    // A two-column lateral move on the home rank is a castling attempt.
    if d_row != 0 || d_col != 2 || from.row() != color.home_row() {
        return None;
    }

    let (cols, right) = match to.col() {
        6 => (CastlingCols::KINGSIDE, state.castling.kingside(color)),
        2 => (CastlingCols::QUEENSIDE, state.castling.queenside(color)),
        _ => return None,
    };
    if !right {
        return None;
    }

    // The king may not castle out of check.
    if is_in_check(board, color) {
        return None;
    }

    // The rook must stand on its home square with only empty squares
    // between it and the king.
    let rook_home = Square::new(color.home_row(), cols.rook_from)?;
    if board.piece_at(rook_home) != Some((Piece::Rook, color)) {
        return None;
    }
    let step: i8 = if cols.rook_from > from.col() { 1 } else { -1 };
    let mut between = from.offset(0, step)?;
    while between != rook_home {
        if !board.is_empty_at(between) {
            return None;
        }
        between = between.offset(0, step)?;
    }

    // The square the king passes through must not be attacked. The
    // destination itself is covered by the self-check simulation.
    let passed = Square::new(color.home_row(), cols.rook_to)?;
    if is_square_attacked(board, passed, color.opposite()) {
        return None;
    }

    Some(LegalMove {
        kind: MoveKind::Castling(cols),
        needs_promotion: false,
    })
}

/// True if every square strictly between `from` and `to` is empty, along
/// a straight or diagonal line.
fn path_is_clear(board: &Board, from: Square, to: Square) -> bool {
    let d_row = (to.row() as i8 - from.row() as i8).signum();
    let d_col = (to.col() as i8 - from.col() as i8).signum();
    let mut current = from;
    loop {
        current = match current.offset(d_row, d_col) {
            Some(sq) => sq,
            None => return false,
        };
        if current == to {
            return true;
        }
        if !board.is_empty_at(current) {
            return false;
        }
    }
}

/// Returns every legal destination for the piece on `from`, with the
/// vetted move facts for each. Empty for an empty origin.
pub fn legal_destinations(
    board: &Board,
    from: Square,
    state: &GameState,
) -> Vec<(Square, LegalMove)> {
    Square::all()
        .filter_map(|to| check_legality(board, from, to, state).map(|legal| (to, legal)))
        .collect()
}

/// Returns true if `color` has at least one legal move.
///
/// Brute-forces origin/destination pairs with early exit; the board scan
/// is bounded at 64x64 legality checks.
pub fn has_any_legal_move(board: &Board, color: Color, state: &GameState) -> bool {
    board
        .pieces()
        .filter(|&(_, _, piece_color)| piece_color == color)
        .any(|(from, _, _)| {
            Square::all().any(|to| check_legality(board, from, to, state).is_some())
        })
}

/// Returns true if `color` is checkmated: in check with no legal move.
pub fn is_checkmate(board: &Board, color: Color, state: &GameState) -> bool {
    is_in_check(board, color) && !has_any_legal_move(board, color, state)
}
