//! Game session management.
//!
//! [`Session`] is the host-owned driver for one game: it tracks whose
//! turn it is, vets and applies moves, reports check and checkmate, and
//! supports undo by replaying the retained history from the initial
//! setup. The rules functions themselves stay stateless; turn ownership,
//! history, and the game result live here as explicit fields so a UI
//! host never has to keep ambient game state of its own.

use crate::apply::apply_move;
use crate::attacks::is_in_check;
use crate::legality::{check_legality, is_checkmate, legal_destinations, LegalMove, MoveKind};
use chess_model::{Board, Color, GameState, MoveRecord, Piece, Promotion, Setup, Square};
use std::fmt;

/// Error type for session operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayError {
    /// The move is not legal for the side to move.
    IllegalMove,
    /// The move is legal but reaches the farthest rank; the host must
    /// supply a promotion choice via [`Session::play_promotion`].
    PromotionRequired,
    /// The game has already been decided.
    GameOver,
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::IllegalMove => write!(f, "illegal move"),
            PlayError::PromotionRequired => write!(f, "promotion choice required"),
            PlayError::GameOver => write!(f, "game has already ended"),
        }
    }
}

impl std::error::Error for PlayError {}

/// A single two-player game: board, auxiliary state, turn, and result.
#[derive(Debug, Clone)]
pub struct Session {
    setup: Setup,
    board: Board,
    state: GameState,
    side_to_move: Color,
    winner: Option<Color>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Starts a game from the standard starting position.
    pub fn new() -> Self {
        Self::from_setup(Setup::startpos())
    }

    /// Starts a game from a custom position.
    pub fn from_setup(setup: Setup) -> Self {
        let mut session = Session {
            board: setup.board.clone(),
            state: setup.game_state(),
            side_to_move: setup.side_to_move,
            setup,
            winner: None,
        };
        session.detect_mate();
        session
    }

    /// Returns the current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current auxiliary state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the side to move.
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Returns the winner once the game is decided by checkmate.
    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    /// Returns true if the game has ended.
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Returns true if the side to move is in check.
    pub fn in_check(&self) -> bool {
        is_in_check(&self.board, self.side_to_move)
    }

    /// Returns the move history.
    pub fn history(&self) -> &[MoveRecord] {
        &self.state.history
    }

    /// Vets a candidate move for the side to move.
    ///
    /// Pure query: repeated calls with the same arguments and no
    /// intervening play return the same outcome.
    pub fn legal_move(&self, from: Square, to: Square) -> Option<LegalMove> {
        let (_, color) = self.board.piece_at(from)?;
        if color != self.side_to_move {
            return None;
        }
        check_legality(&self.board, from, to, &self.state)
    }

    /// Returns every legal destination for the piece on `from`, for move
    /// highlighting. Empty unless the square holds the mover's piece.
    pub fn destinations(&self, from: Square) -> Vec<(Square, LegalMove)> {
        match self.board.piece_at(from) {
            Some((_, color)) if color == self.side_to_move => {
                legal_destinations(&self.board, from, &self.state)
            }
            _ => Vec::new(),
        }
    }

    /// Plays a move for the side to move.
    ///
    /// Fails with [`PlayError::PromotionRequired`] when the move needs a
    /// promotion choice; nothing is applied in that case.
    pub fn play(&mut self, from: Square, to: Square) -> Result<(), PlayError> {
        if self.winner.is_some() {
            return Err(PlayError::GameOver);
        }
        let legal = self.legal_move(from, to).ok_or(PlayError::IllegalMove)?;
        if legal.needs_promotion {
            return Err(PlayError::PromotionRequired);
        }
        self.commit(from, to, &legal, None);
        Ok(())
    }

    /// Plays a promoting move with the host's chosen piece kind.
    pub fn play_promotion(
        &mut self,
        from: Square,
        to: Square,
        promotion: Promotion,
    ) -> Result<(), PlayError> {
        if self.winner.is_some() {
            return Err(PlayError::GameOver);
        }
        let legal = self.legal_move(from, to).ok_or(PlayError::IllegalMove)?;
        self.commit(from, to, &legal, Some(promotion));
        Ok(())
    }

    fn commit(&mut self, from: Square, to: Square, legal: &LegalMove, promo: Option<Promotion>) {
        let (board, state) = apply_move(&self.board, &self.state, from, to, legal, promo);
        self.board = board;
        self.state = state;
        self.side_to_move = self.side_to_move.opposite();
        self.detect_mate();
    }

    fn detect_mate(&mut self) {
        if is_checkmate(&self.board, self.side_to_move, &self.state) {
            self.winner = Some(self.side_to_move.opposite());
        }
    }

    /// Undoes the last `plies` half-moves.
    ///
    /// The retained history is replayed from the initial setup, which
    /// rebuilds the board and the full game state; castling rights and
    /// the en-passant target come back exactly as they were. Undoing a
    /// decided game reopens it. Undoing more plies than were played
    /// resets to the start.
    pub fn undo(&mut self, plies: usize) {
        let keep = self.state.history.len().saturating_sub(plies);
        let retained: Vec<MoveRecord> = self.state.history[..keep].to_vec();

        self.board = self.setup.board.clone();
        self.state = self.setup.game_state();
        self.side_to_move = self.setup.side_to_move;
        self.winner = None;

        for record in retained {
            self.replay(record);
        }
        self.detect_mate();
    }

    /// Abandons the current game and starts over from the initial setup.
    pub fn reset(&mut self) {
        *self = Session::from_setup(self.setup.clone());
    }

    /// Re-applies a recorded move without re-validating it; the record
    /// was vetted when it was made.
    fn replay(&mut self, record: MoveRecord) {
        let kind = if let Some(cols) = record.castling {
            MoveKind::Castling(cols)
        } else if record.en_passant {
            MoveKind::EnPassant
        } else if record.piece == Piece::Pawn
            && (record.to.row() as i8 - record.from.row() as i8).abs() == 2
        {
            MoveKind::DoublePush
        } else {
            MoveKind::Normal
        };
        let legal = LegalMove {
            kind,
            needs_promotion: record.promotion.is_some(),
        };
        let (board, state) = apply_move(
            &self.board,
            &self.state,
            record.from,
            record.to,
            &legal,
            record.promotion,
        );
        self.board = board;
        self.state = state;
        self.side_to_move = self.side_to_move.opposite();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_model::CastlingRights;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn new_session() {
        let session = Session::new();
        assert_eq!(session.side_to_move(), Color::White);
        assert!(!session.in_check());
        assert!(!session.is_over());
        assert!(session.history().is_empty());
    }

    #[test]
    fn turns_alternate() {
        let mut session = Session::new();
        session.play(sq("e2"), sq("e4")).unwrap();
        assert_eq!(session.side_to_move(), Color::Black);
        session.play(sq("e7"), sq("e5")).unwrap();
        assert_eq!(session.side_to_move(), Color::White);
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn cannot_move_opponents_piece() {
        let mut session = Session::new();
        assert_eq!(
            session.play(sq("e7"), sq("e5")),
            Err(PlayError::IllegalMove)
        );
        assert!(session.legal_move(sq("e7"), sq("e5")).is_none());
        assert!(session.destinations(sq("e7")).is_empty());
    }

    #[test]
    fn rejected_move_leaves_state_alone() {
        let mut session = Session::new();
        let before = session.clone();
        assert_eq!(
            session.play(sq("e2"), sq("e5")),
            Err(PlayError::IllegalMove)
        );
        assert_eq!(session.board(), before.board());
        assert_eq!(session.state(), before.state());
        assert_eq!(session.side_to_move(), before.side_to_move());
    }

    #[test]
    fn promotion_flow() {
        let setup = Setup::parse("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let mut session = Session::from_setup(setup);

        // The engine signals; the host answers.
        assert_eq!(
            session.play(sq("a7"), sq("a8")),
            Err(PlayError::PromotionRequired)
        );
        assert_eq!(session.side_to_move(), Color::White);

        session
            .play_promotion(sq("a7"), sq("a8"), Promotion::Rook)
            .unwrap();
        assert_eq!(
            session.board().piece_at(sq("a8")),
            Some((Piece::Rook, Color::White))
        );
        assert_eq!(session.side_to_move(), Color::Black);
    }

    #[test]
    fn fools_mate_ends_the_game() {
        let mut session = Session::new();
        session.play(sq("f2"), sq("f3")).unwrap();
        session.play(sq("e7"), sq("e5")).unwrap();
        session.play(sq("g2"), sq("g4")).unwrap();
        session.play(sq("d8"), sq("h4")).unwrap();

        assert!(session.in_check());
        assert!(session.is_over());
        assert_eq!(session.winner(), Some(Color::Black));
        assert_eq!(
            session.play(sq("e2"), sq("e4")),
            Err(PlayError::GameOver)
        );
    }

    #[test]
    fn en_passant_over_the_board() {
        let mut session = Session::new();
        session.play(sq("e2"), sq("e4")).unwrap();
        session.play(sq("d7"), sq("d5")).unwrap();
        session.play(sq("e4"), sq("e5")).unwrap();
        session.play(sq("f7"), sq("f5")).unwrap();
        assert_eq!(session.state().en_passant, Some(sq("f6")));

        session.play(sq("e5"), sq("f6")).unwrap();
        assert_eq!(
            session.board().piece_at(sq("f6")),
            Some((Piece::Pawn, Color::White))
        );
        assert!(session.board().is_empty_at(sq("f5")));
        assert_eq!(session.state().en_passant, None);
    }

    #[test]
    fn undo_restores_board_and_rights() {
        let setup = Setup::parse("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let mut session = Session::from_setup(setup.clone());

        session.play(Square::E1, sq("e2")).unwrap();
        session.play(Square::A8, sq("a7")).unwrap();
        assert!(!session.state().castling.kingside(Color::White));
        assert!(!session.state().castling.queenside(Color::Black));

        session.undo(2);
        assert_eq!(session.board(), &setup.board);
        assert_eq!(session.state().castling, CastlingRights::ALL);
        assert_eq!(session.side_to_move(), Color::White);
        assert!(session.history().is_empty());

        // The rights survived, so castling works now.
        session.play(Square::E1, Square::G1).unwrap();
        assert_eq!(
            session.board().piece_at(Square::F1),
            Some((Piece::Rook, Color::White))
        );
    }

    #[test]
    fn undo_restores_en_passant_target() {
        let mut session = Session::new();
        session.play(sq("e2"), sq("e4")).unwrap();
        session.play(sq("g8"), sq("f6")).unwrap();
        assert_eq!(session.state().en_passant, None);

        session.undo(1);
        assert_eq!(session.state().en_passant, Some(sq("e3")));
        assert_eq!(session.side_to_move(), Color::Black);
    }

    #[test]
    fn undo_rebuilds_intermediate_positions() {
        let mut session = Session::new();
        session.play(sq("e2"), sq("e4")).unwrap();
        session.play(sq("d7"), sq("d5")).unwrap();
        session.play(sq("e4"), sq("d5")).unwrap();
        session.play(sq("d8"), sq("d5")).unwrap();

        session.undo(1);
        // Back to the position after exd5.
        assert_eq!(
            session.board().piece_at(sq("d5")),
            Some((Piece::Pawn, Color::White))
        );
        assert_eq!(
            session.board().piece_at(sq("d8")),
            Some((Piece::Queen, Color::Black))
        );
        assert_eq!(session.history().len(), 3);
    }

    #[test]
    fn undo_reopens_a_decided_game() {
        let mut session = Session::new();
        session.play(sq("f2"), sq("f3")).unwrap();
        session.play(sq("e7"), sq("e5")).unwrap();
        session.play(sq("g2"), sq("g4")).unwrap();
        session.play(sq("d8"), sq("h4")).unwrap();
        assert!(session.is_over());

        session.undo(1);
        assert!(!session.is_over());
        assert_eq!(session.winner(), None);
        assert_eq!(session.side_to_move(), Color::Black);
    }

    #[test]
    fn undo_past_the_start_resets() {
        let mut session = Session::new();
        session.play(sq("e2"), sq("e4")).unwrap();
        session.undo(10);
        assert_eq!(session.board(), &Board::standard());
        assert_eq!(session.side_to_move(), Color::White);
    }

    #[test]
    fn reset_replaces_everything() {
        let mut session = Session::new();
        session.play(sq("e2"), sq("e4")).unwrap();
        session.play(sq("e7"), sq("e5")).unwrap();
        session.reset();
        assert_eq!(session.board(), &Board::standard());
        assert!(session.history().is_empty());
        assert_eq!(session.side_to_move(), Color::White);
    }

    #[test]
    fn from_setup_detects_an_immediate_mate() {
        let setup = Setup::parse("4k3/8/8/8/8/8/1q6/q3K3 w - - 0 1").unwrap();
        let session = Session::from_setup(setup);
        assert!(session.is_over());
        assert_eq!(session.winner(), Some(Color::Black));
    }
}
