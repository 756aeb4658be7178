//! Data model for a two-player chess game.
//!
//! This crate provides the pure data layer shared by the rules engine:
//! - [`Piece`], [`Color`], and [`Promotion`] for piece representation
//! - [`Square`] for board coordinates
//! - [`Board`] as an 8x8 mailbox grid
//! - [`CastlingRights`], [`MoveRecord`], and [`GameState`] for the
//!   auxiliary state special moves depend on
//! - [`Setup`] for FEN import and export
//!
//! The model has no behavior beyond construction and accessors; all rule
//! logic lives in the `chess-rules` crate. Values are cheap to clone, and
//! the rules engine always derives new values instead of editing in place.

mod board;
mod color;
mod fen;
mod piece;
mod square;
mod state;

pub use board::Board;
pub use color::Color;
pub use fen::{FenError, Setup};
pub use piece::{Piece, Promotion};
pub use square::Square;
pub use state::{CastlingCols, CastlingRights, GameState, MoveRecord};
