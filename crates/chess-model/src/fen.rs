//! FEN (Forsyth-Edwards Notation) import and export of positions.

use crate::{Board, CastlingRights, Color, GameState, Piece, Square};
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid move counter: {0}")]
    InvalidMoveCounter(String),
}

/// A full position decoded from FEN: board plus the state needed to
/// resolve special moves, plus whose turn it is.
///
/// The move counters of the FEN string are validated syntactically but
/// not retained; draw bookkeeping is outside this engine's scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setup {
    pub board: Board,
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
}

impl Setup {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// The standard starting position.
    pub fn startpos() -> Self {
        Setup {
            board: Board::standard(),
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            en_passant: None,
        }
    }

    /// Returns the game state this setup implies (empty history).
    pub fn game_state(&self) -> GameState {
        GameState {
            castling: self.castling,
            en_passant: self.en_passant,
            history: Vec::new(),
        }
    }

    /// Parses a FEN string into a position.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() != 6 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let board = Self::parse_placement(parts[0])?;

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = Self::parse_castling(parts[2])?;

        let en_passant = match parts[3] {
            "-" => None,
            s => {
                let sq = Square::from_algebraic(s)
                    .filter(|sq| sq.row() == 2 || sq.row() == 5)
                    .ok_or_else(|| FenError::InvalidEnPassantSquare(s.to_string()))?;
                Some(sq)
            }
        };

        // Clocks must at least be numbers, even though we drop them.
        for counter in &parts[4..6] {
            counter
                .parse::<u32>()
                .map_err(|_| FenError::InvalidMoveCounter(counter.to_string()))?;
        }

        Ok(Setup {
            board,
            side_to_move,
            castling,
            en_passant,
        })
    }

    fn parse_placement(placement: &str) -> Result<Board, FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        let mut board = Board::empty();
        // FEN lists rank 8 first, which is row 0 in our orientation.
        for (row, rank_str) in ranks.iter().enumerate() {
            let mut col = 0u8;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    // Bounded before the next iteration, so this add
                    // cannot wrap.
                    col += skip as u8;
                    if col > 8 {
                        return Err(FenError::InvalidPiecePlacement(format!(
                            "rank {} overflows the board",
                            8 - row
                        )));
                    }
                } else if let Some((piece, color)) = Piece::from_fen_char(c) {
                    let sq = Square::new(row as u8, col).ok_or_else(|| {
                        FenError::InvalidPiecePlacement(format!(
                            "rank {} overflows the board",
                            8 - row
                        ))
                    })?;
                    board.place(sq, piece, color);
                    col += 1;
                } else {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c,
                        8 - row
                    )));
                }
            }
            if col != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    8 - row,
                    col
                )));
            }
        }

        Ok(board)
    }

    fn parse_castling(s: &str) -> Result<CastlingRights, FenError> {
        if s == "-" {
            return Ok(CastlingRights::NONE);
        }

        let mut rights = CastlingRights::ALL;
        let mut seen = [false; 4];
        for c in s.chars() {
            let idx = match c {
                'K' => 0,
                'Q' => 1,
                'k' => 2,
                'q' => 3,
                _ => {
                    return Err(FenError::InvalidCastlingRights(format!(
                        "invalid character '{}'",
                        c
                    )))
                }
            };
            seen[idx] = true;
        }
        if !seen[0] {
            rights.revoke_kingside(Color::White);
        }
        if !seen[1] {
            rights.revoke_queenside(Color::White);
        }
        if !seen[2] {
            rights.revoke_kingside(Color::Black);
        }
        if !seen[3] {
            rights.revoke_queenside(Color::Black);
        }
        Ok(rights)
    }

    /// Encodes the position as a FEN string.
    ///
    /// The move counters are emitted as "0 1" since they are not tracked.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for row in 0..8u8 {
            let mut empty_run = 0;
            for col in 0..8u8 {
                let sq = Square::new(row, col).expect("row and col are in range");
                if let Some((piece, color)) = self.board.piece_at(sq) {
                    if empty_run > 0 {
                        fen.push_str(&empty_run.to_string());
                        empty_run = 0;
                    }
                    fen.push(piece.to_fen_char(color));
                } else {
                    empty_run += 1;
                }
            }
            if empty_run > 0 {
                fen.push_str(&empty_run.to_string());
            }
            if row < 7 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        fen.push(' ');
        if self.castling == CastlingRights::NONE {
            fen.push('-');
        } else {
            if self.castling.kingside(Color::White) {
                fen.push('K');
            }
            if self.castling.queenside(Color::White) {
                fen.push('Q');
            }
            if self.castling.kingside(Color::Black) {
                fen.push('k');
            }
            if self.castling.queenside(Color::Black) {
                fen.push('q');
            }
        }

        fen.push(' ');
        match self.en_passant {
            Some(sq) => fen.push_str(&sq.to_algebraic()),
            None => fen.push('-'),
        }

        fen.push_str(" 0 1");
        fen
    }
}

impl Default for Setup {
    fn default() -> Self {
        Self::startpos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_startpos() {
        let setup = Setup::parse(Setup::STARTPOS).unwrap();
        assert_eq!(setup, Setup::startpos());
        assert_eq!(setup.board, Board::standard());
    }

    #[test]
    fn startpos_roundtrip() {
        assert_eq!(Setup::startpos().to_fen(), Setup::STARTPOS);
    }

    #[test]
    fn custom_roundtrip() {
        let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 0 1";
        let setup = Setup::parse(fen).unwrap();
        assert_eq!(setup.to_fen(), fen);
    }

    #[test]
    fn parse_en_passant() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let setup = Setup::parse(fen).unwrap();
        assert_eq!(setup.side_to_move, Color::Black);
        assert_eq!(setup.en_passant, Square::from_algebraic("e3"));
        assert_eq!(setup.to_fen(), fen);
    }

    #[test]
    fn parse_partial_castling() {
        let setup = Setup::parse("4k3/8/8/8/8/8/8/R3K3 w Q - 0 1").unwrap();
        assert!(!setup.castling.kingside(Color::White));
        assert!(setup.castling.queenside(Color::White));
        assert!(!setup.castling.kingside(Color::Black));
    }

    #[test]
    fn clocks_are_dropped() {
        let setup = Setup::parse("4k3/8/8/8/8/8/8/4K3 w - - 42 99").unwrap();
        assert!(setup.to_fen().ends_with(" 0 1"));
    }

    #[test]
    fn invalid_part_count() {
        assert!(matches!(
            Setup::parse("invalid"),
            Err(FenError::InvalidPartCount(_))
        ));
    }

    #[test]
    fn invalid_active_color() {
        assert!(matches!(
            Setup::parse("8/8/8/8/8/8/8/8 x KQkq - 0 1"),
            Err(FenError::InvalidActiveColor(_))
        ));
    }

    #[test]
    fn invalid_placement() {
        // Too few ranks.
        assert!(matches!(
            Setup::parse("8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        // Bad character.
        assert!(matches!(
            Setup::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPXPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        // Nine squares in a rank.
        assert!(matches!(
            Setup::parse("rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn digit_runs_past_the_rank_are_rejected() {
        // A long digit run must fail cleanly, not wrap the column counter.
        let fen = format!("{}/8/8/8/8/8/8/8 w - - 0 1", "9".repeat(40));
        assert!(matches!(
            Setup::parse(&fen),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        // Several small skips summing past 8 fail the same way.
        assert!(matches!(
            Setup::parse("44440/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn invalid_castling() {
        assert!(matches!(
            Setup::parse("8/8/8/8/8/8/8/8 w XYZ - 0 1"),
            Err(FenError::InvalidCastlingRights(_))
        ));
    }

    #[test]
    fn invalid_en_passant() {
        assert!(matches!(
            Setup::parse("8/8/8/8/8/8/8/8 w - e4 0 1"),
            Err(FenError::InvalidEnPassantSquare(_))
        ));
        assert!(matches!(
            Setup::parse("8/8/8/8/8/8/8/8 w - abc 0 1"),
            Err(FenError::InvalidEnPassantSquare(_))
        ));
    }

    #[test]
    fn invalid_counters() {
        assert!(matches!(
            Setup::parse("8/8/8/8/8/8/8/8 w - - abc 1"),
            Err(FenError::InvalidMoveCounter(_))
        ));
        assert!(matches!(
            Setup::parse("8/8/8/8/8/8/8/8 w - - 0 xyz"),
            Err(FenError::InvalidMoveCounter(_))
        ));
    }
}
