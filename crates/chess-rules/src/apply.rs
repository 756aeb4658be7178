//! State transition for accepted moves.

use crate::legality::{LegalMove, MoveKind};
use chess_model::{Board, GameState, MoveRecord, Piece, Promotion, Square};

/// Computes the board after playing `from`→`to` with the given side
/// effects, without touching any auxiliary state.
///
/// `replacement` substitutes the arriving piece (promotion); `None`
/// relocates the moving piece as-is. Shared between [`apply_move`] and
/// the self-check simulation in the legality checker, so both see the
/// same delta (including the en-passant pawn removal and the castling
/// rook move).
pub(crate) fn successor_board(
    board: &Board,
    from: Square,
    to: Square,
    kind: MoveKind,
    replacement: Option<Piece>,
) -> Board {
    let mut next = board.clone();
    let Some((piece, color)) = next.remove(from) else {
        return next;
    };
    next.place(to, replacement.unwrap_or(piece), color);

    match kind {
        MoveKind::Normal | MoveKind::DoublePush => {}
        MoveKind::Castling(cols) => {
            // The rook co-moves along the mover's home rank.
            if let (Some(rook_from), Some(rook_to)) = (
                Square::new(from.row(), cols.rook_from),
                Square::new(from.row(), cols.rook_to),
            ) {
                if let Some((rook, rook_color)) = next.remove(rook_from) {
                    next.place(rook_to, rook, rook_color);
                }
            }
        }
        MoveKind::EnPassant => {
            // The passed pawn sits on the origin's row, destination's column.
            if let Some(captured) = Square::new(from.row(), to.col()) {
                next.remove(captured);
            }
        }
    }

    next
}

/// Applies a previously vetted move, producing the successor board and
/// game state. The inputs are left untouched.
///
/// `promotion` is the host's out-of-band choice for a move whose outcome
/// carried `needs_promotion`; a missing choice falls back to a queen so
/// the function stays total. Alongside the board delta this revokes
/// castling rights (king move, rook leaving home, rook captured on home),
/// maintains the en-passant target, and appends a [`MoveRecord`].
pub fn apply_move(
    board: &Board,
    state: &GameState,
    from: Square,
    to: Square,
    legal: &LegalMove,
    promotion: Option<Promotion>,
) -> (Board, GameState) {
    let Some((piece, color)) = board.piece_at(from) else {
        return (board.clone(), state.clone());
    };

    let promotion = if legal.needs_promotion {
        Some(promotion.unwrap_or(Promotion::Queen))
    } else {
        None
    };
    let captured = board.piece_at(to);

    let next_board = successor_board(board, from, to, legal.kind, promotion.map(Promotion::piece));

    let mut next_state = state.clone();
    // The target is valid for exactly one reply; a double push re-sets it.
    next_state.en_passant = None;

    match piece {
        Piece::King => next_state.castling.revoke_both(color),
        Piece::Rook if from.row() == color.home_row() => match from.col() {
            0 => next_state.castling.revoke_queenside(color),
            7 => next_state.castling.revoke_kingside(color),
            _ => {}
        },
        _ => {}
    }

    // Capturing a rook on its home square kills the right that rook
    // backed, so a later piece on that square cannot fake-castle.
    if let Some((Piece::Rook, victim)) = captured {
        if victim != color && to.row() == victim.home_row() {
            match to.col() {
                0 => next_state.castling.revoke_queenside(victim),
                7 => next_state.castling.revoke_kingside(victim),
                _ => {}
            }
        }
    }

    if legal.kind == MoveKind::DoublePush {
        next_state.en_passant = from.offset(color.pawn_direction(), 0);
    }

    next_state.history.push(MoveRecord {
        piece,
        color,
        from,
        to,
        castling: match legal.kind {
            MoveKind::Castling(cols) => Some(cols),
            _ => None,
        },
        en_passant: legal.kind == MoveKind::EnPassant,
        promotion,
    });

    (next_board, next_state)
}
