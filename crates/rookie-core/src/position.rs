//! The rules-engine boundary: what search and training need from a game position.

use std::fmt;
use std::hash::Hash;
use std::ops::{Deref, DerefMut};

use crate::color::Color;
use crate::piece::Piece;
use crate::square::Square;

/// Canonical position key: board placement plus a side-to-move marker.
///
/// Two positions with the same placement and the same side to move produce
/// equal keys, regardless of move counters, castling rights or history.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PositionKey(String);

impl PositionKey {
    /// Build a key from a placement string and the side to move.
    pub fn new(placement: impl fmt::Display, side_to_move: Color) -> Self {
        PositionKey(format!("{placement} {}", side_to_move.marker()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for PositionKey {
    fn from(raw: String) -> Self {
        PositionKey(raw)
    }
}

impl fmt::Display for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Terminal status reported by the rules engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// The side to move has at least one legal move and mate is still possible.
    Ongoing,
    /// The side to move is in check and has no legal move.
    Checkmate,
    /// The side to move is not in check and has no legal move.
    Stalemate,
    /// Neither side has enough material to deliver mate.
    InsufficientMaterial,
}

impl GameStatus {
    /// Whether the rules engine considers the game finished.
    #[inline]
    pub const fn is_over(self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }
}

/// Final result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The given side delivered checkmate.
    Win(Color),
    /// Any drawn result, including adjudicated ones.
    Draw,
}

impl Outcome {
    /// The winning side, if the game was decisive.
    #[inline]
    pub const fn winner(self) -> Option<Color> {
        match self {
            Outcome::Win(color) => Some(color),
            Outcome::Draw => None,
        }
    }
}

/// A mutable game position with reversible moves.
///
/// `make_move` and `unmake_move` must be strictly paired in LIFO order:
/// after `unmake_move` the position is identical to the one before the
/// matching `make_move`. Prefer [`Position::play`], which enforces the pairing.
pub trait Position {
    /// A move in this game.
    type Move: Clone + Eq + Hash + fmt::Debug;

    /// All legal moves for the side to move, in a deterministic order.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Apply a legal move.
    fn make_move(&mut self, mv: &Self::Move);

    /// Revert the most recent [`make_move`](Position::make_move).
    fn unmake_move(&mut self);

    fn side_to_move(&self) -> Color;

    fn status(&self) -> GameStatus;

    /// Canonical key, stable under equal placement and side to move.
    fn key(&self) -> PositionKey;

    /// Plies since the last capture or pawn move.
    fn halfmove_clock(&self) -> u32;

    /// Every occupied square with its piece.
    fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_;

    /// Apply `mv` and return a guard that reverts it when dropped.
    fn play(&mut self, mv: &Self::Move) -> Played<'_, Self>
    where
        Self: Sized,
    {
        self.make_move(mv);
        Played { position: self }
    }
}

/// A position with one move applied; the move is unmade on drop.
///
/// Dereferences to the underlying position so recursive search can keep
/// playing moves on top of it.
pub struct Played<'a, P: Position> {
    position: &'a mut P,
}

impl<P: Position> Deref for Played<'_, P> {
    type Target = P;

    fn deref(&self) -> &P {
        self.position
    }
}

impl<P: Position> DerefMut for Played<'_, P> {
    fn deref_mut(&mut self) -> &mut P {
        self.position
    }
}

impl<P: Position> Drop for Played<'_, P> {
    fn drop(&mut self) {
        self.position.unmake_move();
    }
}
