//! Move rules engine for two-player chess.
//!
//! This crate decides move legality, detects check and checkmate, and
//! computes the successor position and state of an accepted move,
//! including the special-move side effects: the castling rook's
//! co-movement, the en-passant pawn removal, and promotion substitution.
//!
//! The stateless layer is a handful of pure functions over
//! `chess-model` values:
//! - [`check_legality`] vets a candidate move and reports its side
//!   effects as a [`LegalMove`]
//! - [`is_square_attacked`] and [`is_in_check`] run the attack scan
//! - [`has_any_legal_move`] and [`is_checkmate`] answer the game-over
//!   question
//! - [`apply_move`] produces the successor board and state
//!
//! [`Session`] wraps these into a host-owned game driver with turn
//! tracking, the promotion handshake, and replay-based undo.
//!
//! # Example
//!
//! ```
//! use chess_model::Square;
//! use chess_rules::{PlayError, Session};
//!
//! let mut session = Session::new();
//! let e2 = Square::from_algebraic("e2").unwrap();
//! let e4 = Square::from_algebraic("e4").unwrap();
//! session.play(e2, e4).unwrap();
//! assert_eq!(session.play(e2, e4), Err(PlayError::IllegalMove));
//! ```

mod apply;
mod attacks;
mod legality;
mod session;

pub use apply::apply_move;
pub use attacks::{is_in_check, is_square_attacked};
pub use legality::{
    check_legality, has_any_legal_move, is_checkmate, legal_destinations, LegalMove, MoveKind,
};
pub use session::{PlayError, Session};
