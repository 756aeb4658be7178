//! Auxiliary game state: castling rights, en passant, move history.

use crate::{Color, Piece, Promotion, Square};

/// Castling rights flags for both colors.
///
/// A right only ever transitions from available to revoked; nothing
/// re-enables it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingRights(u8);

impl CastlingRights {
    const WHITE_KINGSIDE: u8 = 0b0001;
    const WHITE_QUEENSIDE: u8 = 0b0010;
    const BLACK_KINGSIDE: u8 = 0b0100;
    const BLACK_QUEENSIDE: u8 = 0b1000;

    /// All four rights available, as at game start.
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// No rights available.
    pub const NONE: CastlingRights = CastlingRights(0);

    #[inline]
    const fn kingside_flag(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        }
    }

    #[inline]
    const fn queenside_flag(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        }
    }

    /// Returns true if the given side may still castle king-side.
    #[inline]
    pub const fn kingside(self, color: Color) -> bool {
        (self.0 & Self::kingside_flag(color)) != 0
    }

    /// Returns true if the given side may still castle queen-side.
    #[inline]
    pub const fn queenside(self, color: Color) -> bool {
        (self.0 & Self::queenside_flag(color)) != 0
    }

    /// Revokes both rights for a color (the king moved).
    #[inline]
    pub fn revoke_both(&mut self, color: Color) {
        self.0 &= !(Self::kingside_flag(color) | Self::queenside_flag(color));
    }

    /// Revokes the king-side right for a color.
    #[inline]
    pub fn revoke_kingside(&mut self, color: Color) {
        self.0 &= !Self::kingside_flag(color);
    }

    /// Revokes the queen-side right for a color.
    #[inline]
    pub fn revoke_queenside(&mut self, color: Color) {
        self.0 &= !Self::queenside_flag(color);
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::ALL
    }
}

/// The rook column pair moved by a castling king.
///
/// King-side castling moves the rook from column 7 to 5, queen-side from
/// column 0 to 3, always on the mover's home row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingCols {
    pub rook_from: u8,
    pub rook_to: u8,
}

impl CastlingCols {
    pub const KINGSIDE: CastlingCols = CastlingCols {
        rook_from: 7,
        rook_to: 5,
    };
    pub const QUEENSIDE: CastlingCols = CastlingCols {
        rook_from: 0,
        rook_to: 3,
    };
}

/// One entry of the move history.
///
/// Records everything needed to replay the move on a board: the moving
/// piece, the squares involved, and which special-move side effects
/// applied. The history is append-only during play; undo truncates it and
/// replays the remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    /// The piece that moved (the pawn, for a promotion).
    pub piece: Piece,
    /// Color of the moving side.
    pub color: Color,
    /// Origin square.
    pub from: Square,
    /// Destination square.
    pub to: Square,
    /// Rook columns for a castling move.
    pub castling: Option<CastlingCols>,
    /// True if the move captured en passant.
    pub en_passant: bool,
    /// Promotion choice, if the move promoted.
    pub promotion: Option<Promotion>,
}

impl MoveRecord {
    /// A plain relocation with no special side effects.
    pub fn plain(piece: Piece, color: Color, from: Square, to: Square) -> Self {
        MoveRecord {
            piece,
            color,
            from,
            to,
            castling: None,
            en_passant: false,
            promotion: None,
        }
    }
}

/// Aggregate state a single game session threads through the rules engine.
///
/// Owned by exactly one session; replaced wholesale on reset and rebuilt
/// by replay on undo.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameState {
    /// Castling availability for both colors.
    pub castling: CastlingRights,
    /// Square a pawn just double-stepped over, valid for one reply only.
    pub en_passant: Option<Square>,
    /// Ordered move history, append-only during play.
    pub history: Vec<MoveRecord>,
}

impl GameState {
    /// The state at game start: all rights, no target, empty history.
    pub fn initial() -> Self {
        GameState::default()
    }
}
