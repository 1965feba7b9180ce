//! Standard chess via the `shakmaty` rules engine.

use std::fmt;

use shakmaty::fen::Fen;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, EnPassantMode, Position as _};
use tracing::warn;

use crate::color::Color;
use crate::error::PositionError;
use crate::piece::Piece;
use crate::position::{GameStatus, Position, PositionKey};
use crate::square::Square;

/// FEN of the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// A chess move as produced by the rules engine.
pub type ChessMove = shakmaty::Move;

/// A chess position with make/unmake support.
///
/// `shakmaty` positions are immutable values; unmake is provided by keeping
/// the positions preceding each applied move on a stack.
#[derive(Debug, Clone, PartialEq)]
pub struct ChessPosition {
    current: Chess,
    undo: Vec<Chess>,
}

impl ChessPosition {
    /// Parse a position from FEN.
    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        let parsed = fen.parse::<Fen>().map_err(|e| PositionError::InvalidFen {
            fen: fen.to_string(),
            reason: e.to_string(),
        })?;
        let current: Chess =
            parsed
                .into_position(CastlingMode::Standard)
                .map_err(|e| PositionError::IllegalSetup {
                    fen: fen.to_string(),
                    reason: e.to_string(),
                })?;
        Ok(Self {
            current,
            undo: Vec::new(),
        })
    }

    /// FEN of the current position.
    pub fn fen(&self) -> String {
        Fen::from_position(&self.current, EnPassantMode::Legal).to_string()
    }

    /// Number of moves that can still be unmade.
    pub fn depth(&self) -> usize {
        self.undo.len()
    }

    /// Render a move in UCI notation (e.g. `e2e4`, `e7e8q`).
    pub fn uci(mv: &ChessMove) -> String {
        mv.to_uci(CastlingMode::Standard).to_string()
    }

    /// Parse a UCI move and check it is legal here.
    pub fn parse_uci(&self, uci: &str) -> Result<ChessMove, PositionError> {
        let invalid = || PositionError::InvalidMove {
            uci: uci.to_string(),
        };
        let parsed: UciMove = uci.parse().map_err(|_| invalid())?;
        parsed.to_move(&self.current).map_err(|_| invalid())
    }
}

impl Default for ChessPosition {
    fn default() -> Self {
        Self {
            current: Chess::default(),
            undo: Vec::new(),
        }
    }
}

impl Position for ChessPosition {
    type Move = ChessMove;

    fn legal_moves(&self) -> Vec<ChessMove> {
        self.current.legal_moves().into_iter().collect()
    }

    fn make_move(&mut self, mv: &ChessMove) {
        self.undo.push(self.current.clone());
        self.current.play_unchecked(*mv);
    }

    fn unmake_move(&mut self) {
        match self.undo.pop() {
            Some(previous) => self.current = previous,
            None => warn!("unmake_move without a matching make_move"),
        }
    }

    fn side_to_move(&self) -> Color {
        self.current.turn().into()
    }

    fn status(&self) -> GameStatus {
        if self.current.legal_moves().is_empty() {
            if self.current.is_check() {
                GameStatus::Checkmate
            } else {
                GameStatus::Stalemate
            }
        } else if self.current.is_insufficient_material() {
            GameStatus::InsufficientMaterial
        } else {
            GameStatus::Ongoing
        }
    }

    fn key(&self) -> PositionKey {
        PositionKey::new(self.current.board(), self.side_to_move())
    }

    fn halfmove_clock(&self) -> u32 {
        self.current.halfmoves()
    }

    fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.current
            .board()
            .iter()
            .map(|(sq, piece)| (Square::from(sq), Piece::from(piece)))
    }
}

impl fmt::Display for ChessPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fen())
    }
}
