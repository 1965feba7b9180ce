//! Core board-game types and the rules-engine boundary used by the engine.
//!
//! The search and training code only ever talks to a [`Position`]. The
//! [`ChessPosition`] adapter implements it on top of the `shakmaty` rules engine.

mod chess;
mod color;
mod error;
mod piece;
mod position;
mod square;

pub use chess::{ChessMove, ChessPosition, STARTING_FEN};
pub use color::Color;
pub use error::PositionError;
pub use piece::{Piece, PieceKind};
pub use position::{GameStatus, Outcome, Played, Position, PositionKey};
pub use square::Square;
