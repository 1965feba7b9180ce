//! Weighted opening book learned from self-play.
//!
//! Each position key maps to an ordered bucket of `(move, weight)` pairs.
//! Weights only ever grow: a won or drawn game reinforces the moves the
//! updated side played during its first [`BOOK_PLIES`] plies.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use rand::Rng;
use rookie_core::{Color, Outcome, Position, PositionKey};
use tracing::trace;

/// Number of plies from the start of a game that feed the book.
pub const BOOK_PLIES: usize = 15;

const DECISIVE_INSERT: u32 = 10;
const DECISIVE_BONUS: u32 = 5;
const DRAW_INSERT: u32 = 5;
const DRAW_BONUS: u32 = 2;

/// Opening book over moves of type `M`.
pub struct OpeningBook<M> {
    buckets: HashMap<PositionKey, Vec<(M, u32)>>,
}

impl<M: Clone + Eq + Hash> OpeningBook<M> {
    pub fn new() -> Self {
        Self {
            buckets: HashMap::new(),
        }
    }

    /// Number of positions with a bucket.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// The weighted candidates stored for `key`, in insertion order.
    pub fn bucket(&self, key: &PositionKey) -> Option<&[(M, u32)]> {
        self.buckets.get(key).map(Vec::as_slice)
    }

    /// Add `weight` to `mv` in the bucket for `key`, creating either as needed.
    pub fn insert(&mut self, key: PositionKey, mv: M, weight: u32) {
        let bucket = self.buckets.entry(key).or_default();
        match bucket.iter_mut().find(|(existing, _)| *existing == mv) {
            Some((_, w)) => *w = w.saturating_add(weight),
            None => bucket.push((mv, weight)),
        }
    }

    /// Sample a move for `key` proportionally to its weight.
    ///
    /// Returns `None` when the key is unknown or its bucket has no positive
    /// weight. Zero-weight moves are never returned.
    pub fn lookup<R: Rng>(&self, key: &PositionKey, rng: &mut R) -> Option<M> {
        let bucket = self.buckets.get(key)?;
        let total: u64 = bucket.iter().map(|(_, w)| u64::from(*w)).sum();
        if total == 0 {
            return None;
        }

        let draw = rng.random::<f64>() * total as f64;
        let mut cumulative = 0u64;
        let mut last_positive = None;
        for (mv, weight) in bucket {
            if *weight == 0 {
                continue;
            }
            cumulative += u64::from(*weight);
            if cumulative as f64 >= draw {
                return Some(mv.clone());
            }
            last_positive = Some(mv);
        }
        // Only reachable through float rounding at the top of the range.
        last_positive.cloned()
    }

    /// Reinforce the opening of a finished game for `side`.
    ///
    /// Replays the first [`BOOK_PLIES`] of `moves` from `start`. Nothing is
    /// recorded unless `side` won or the game was drawn. Every replayed ply,
    /// whichever color played it, is credited to the position before it.
    pub fn update<P>(&mut self, mut start: P, moves: &[M], outcome: Outcome, side: Color)
    where
        P: Position<Move = M>,
    {
        let (insert, bonus) = match outcome {
            Outcome::Win(winner) if winner == side => (DECISIVE_INSERT, DECISIVE_BONUS),
            Outcome::Win(_) => return,
            Outcome::Draw => (DRAW_INSERT, DRAW_BONUS),
        };

        for mv in moves.iter().take(BOOK_PLIES) {
            let bucket = self.buckets.entry(start.key()).or_default();
            match bucket.iter_mut().find(|(existing, _)| existing == mv) {
                Some((_, weight)) => *weight = weight.saturating_add(bonus),
                None => bucket.push((mv.clone(), insert)),
            }
            start.make_move(mv);
        }

        trace!(
            plies = moves.len().min(BOOK_PLIES),
            positions = self.buckets.len(),
            "opening book updated"
        );
    }
}

impl<M: Clone + Eq + Hash> Default for OpeningBook<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Clone> Clone for OpeningBook<M> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
        }
    }
}

impl<M: fmt::Debug> fmt::Debug for OpeningBook<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpeningBook")
            .field("positions", &self.buckets.len())
            .finish()
    }
}
